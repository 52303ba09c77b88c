use ratatui::style::Color;
use ratatui::symbols::border;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns true when either axis has zero extent.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Per-tile colors applied by the renderer.
///
/// Each tile is drawn as a solid block; the palette decides nothing else.
#[derive(Debug)]
pub struct TilePalette {
    pub empty: Color,
    pub head: Color,
    pub body: Color,
    pub tail: Color,
    pub item: Color,
    pub obstacle: Color,
    pub border_fg: Color,
    pub status_fg: Color,
    pub popup_title: Color,
}

/// Stock palette: grey field, green snake, red items, white walls.
pub const PALETTE_CLASSIC: TilePalette = TilePalette {
    empty: Color::Rgb(0x80, 0x80, 0x80),
    head: Color::Rgb(0x80, 0xFF, 0x80),
    body: Color::Rgb(0x00, 0xFF, 0x00),
    tail: Color::Rgb(0xA0, 0xFF, 0xA0),
    item: Color::Rgb(0xFF, 0x00, 0x00),
    obstacle: Color::Rgb(0xFF, 0xFF, 0xFF),
    border_fg: Color::DarkGray,
    status_fg: Color::Gray,
    popup_title: Color::Green,
};

/// Border drawn around the play area.
pub const BORDER_PLAY_AREA: border::Set = border::ROUNDED;

/// Glyph used to paint one tile; two terminal columns make a roughly square cell.
pub const GLYPH_TILE: &str = "██";

/// Terminal columns occupied by one tile.
pub const TILE_COLUMNS: u16 = 2;

/// Default board width in tiles.
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default board height in tiles.
pub const DEFAULT_GRID_HEIGHT: u16 = 30;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 75;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 20;

/// Input poll timeout between frames in milliseconds.
pub const FRAME_POLL_MS: u64 = 16;
