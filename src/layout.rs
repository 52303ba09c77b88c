use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, GridSize};
use crate::error::LayoutError;
use crate::grid::Cell;

const USER_LAYOUT_APP_DIR: &str = "grid-snake";
const USER_LAYOUT_FILE_NAME: &str = "layout.json";

/// Starting board: dimensions, snake cells and static tiles.
///
/// ```json
/// {
///   "width": 20,
///   "height": 10,
///   "snake": [[5, 2], [5, 3], [5, 4]],
///   "items": [[1, 1]],
///   "obstacles": [[7, 7]],
///   "border": false
/// }
/// ```
///
/// `snake` lists cells tail first; the last two cells fix the starting
/// direction.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    pub snake: Vec<Cell>,
    #[serde(default)]
    pub items: Vec<Cell>,
    #[serde(default)]
    pub obstacles: Vec<Cell>,
    /// Walls off the whole outer ring of the board.
    #[serde(default)]
    pub border: bool,
}

impl Layout {
    /// Creates a layout with only a snake on it.
    #[must_use]
    pub fn new(size: GridSize, snake: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            width: size.width,
            height: size.height,
            snake: snake.into_iter().collect(),
            items: Vec::new(),
            obstacles: Vec::new(),
            border: false,
        }
    }

    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Cell>) -> Self {
        self.items.extend(items);
        self
    }

    #[must_use]
    pub fn with_obstacles(mut self, obstacles: impl IntoIterator<Item = Cell>) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    #[must_use]
    pub fn with_border(mut self) -> Self {
        self.border = true;
        self
    }

    /// The stock board: a four-cell snake heading right, a handful of items
    /// and a wall down the leftmost column.
    #[must_use]
    pub fn classic() -> Self {
        let size = GridSize {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        };
        let snake = (3..=6).map(|col| Cell::new(4, col));
        let items = [
            Cell::new(6, 4),
            Cell::new(2, 1),
            Cell::new(2, 10),
            Cell::new(20, 16),
            Cell::new(20, 13),
            Cell::new(20, 14),
            Cell::new(20, 15),
            Cell::new(21, 16),
        ];
        let wall = (0..size.height).map(|row| Cell::new(row, 0));

        Self::new(size, snake).with_items(items).with_obstacles(wall)
    }

    /// Parses a layout from JSON.
    pub fn from_json(raw: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads and parses a layout file.
    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let raw = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Explicit obstacles followed by the border ring, when enabled.
    ///
    /// Border cells already listed explicitly are not repeated.
    #[must_use]
    pub fn obstacle_cells(&self) -> Vec<Cell> {
        let mut cells = self.obstacles.clone();
        if !self.border || self.width == 0 || self.height == 0 {
            return cells;
        }

        let mut seen: HashSet<Cell> = cells.iter().copied().collect();
        let last_row = self.height - 1;
        let last_col = self.width - 1;
        let ring = (0..self.width)
            .flat_map(|col| [Cell::new(0, col), Cell::new(last_row, col)])
            .chain((0..self.height).flat_map(|row| [Cell::new(row, 0), Cell::new(row, last_col)]));

        for cell in ring {
            if seen.insert(cell) {
                cells.push(cell);
            }
        }
        cells
    }

    /// Adds `count` items on distinct cells not claimed by anything else.
    pub fn scatter_items<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Result<(), LayoutError> {
        if count == 0 {
            return Ok(());
        }

        let size = self.size();
        let taken: HashSet<Cell> = self
            .snake
            .iter()
            .chain(&self.items)
            .copied()
            .chain(self.obstacle_cells())
            .collect();

        let free: Vec<Cell> = (0..size.height)
            .flat_map(|row| (0..size.width).map(move |col| Cell::new(row, col)))
            .filter(|cell| !taken.contains(cell))
            .collect();

        if free.len() < count {
            return Err(LayoutError::NoFreeCells {
                requested: count,
                available: free.len(),
            });
        }

        self.items.extend(free.choose_multiple(rng, count).copied());
        Ok(())
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::classic()
    }
}

/// Returns the per-user layout path, if the platform has a config directory.
#[must_use]
pub fn user_layout_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(USER_LAYOUT_APP_DIR);
    path.push(USER_LAYOUT_FILE_NAME);
    Some(path)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::error::LayoutError;
    use crate::grid::Cell;

    use super::Layout;

    const SMALL: GridSize = GridSize {
        width: 4,
        height: 3,
    };

    #[test]
    fn classic_layout_matches_stock_board() {
        let layout = Layout::classic();

        assert_eq!(layout.size(), GridSize {
            width: 40,
            height: 30
        });
        assert_eq!(layout.snake.first(), Some(&Cell::new(4, 3)));
        assert_eq!(layout.snake.last(), Some(&Cell::new(4, 6)));
        assert_eq!(layout.items.len(), 8);
        assert_eq!(layout.obstacles.len(), 30);
        assert!(layout.obstacles.iter().all(|cell| cell.col == 0));
    }

    #[test]
    fn json_layout_parses_cells_as_pairs() {
        let layout = Layout::from_json(
            r#"{"width": 6, "height": 4, "snake": [[1, 1], [1, 2]], "items": [[3, 5]]}"#,
        )
        .expect("layout should parse");

        assert_eq!(layout.snake, vec![Cell::new(1, 1), Cell::new(1, 2)]);
        assert_eq!(layout.items, vec![Cell::new(3, 5)]);
        assert!(layout.obstacles.is_empty());
        assert!(!layout.border);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Layout::from_json("{\"width\": 3}"),
            Err(LayoutError::Json(_))
        ));
    }

    #[test]
    fn missing_layout_file_reports_path() {
        let path = std::env::temp_dir().join("grid-snake-tests-definitely-missing.json");
        let error = Layout::from_path(&path).expect_err("missing file should fail");
        assert!(matches!(error, LayoutError::Io { .. }));
        assert!(error.to_string().contains("definitely-missing"));
    }

    #[test]
    fn border_ring_covers_the_edge_once() {
        let layout = Layout::new(SMALL, [Cell::new(1, 1), Cell::new(1, 2)])
            .with_obstacles([Cell::new(0, 0)])
            .with_border();

        let cells = layout.obstacle_cells();
        let unique: HashSet<Cell> = cells.iter().copied().collect();

        // 4x3 ring has 2*4 + 2*1 = 10 cells.
        assert_eq!(cells.len(), 10);
        assert_eq!(unique.len(), 10);
        assert!(!unique.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn scattered_items_land_on_free_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut layout = Layout::new(SMALL, [Cell::new(1, 1), Cell::new(1, 2)])
            .with_obstacles([Cell::new(0, 0)]);

        layout
            .scatter_items(&mut rng, 5)
            .expect("enough free cells");

        let items: HashSet<Cell> = layout.items.iter().copied().collect();
        assert_eq!(items.len(), 5);
        for item in items {
            assert!(item.is_within(SMALL));
            assert!(!layout.snake.contains(&item));
            assert_ne!(item, Cell::new(0, 0));
        }
    }

    #[test]
    fn scattering_more_items_than_free_cells_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut layout = Layout::new(SMALL, [Cell::new(1, 1), Cell::new(1, 2)]);

        let error = layout
            .scatter_items(&mut rng, 11)
            .expect_err("only 10 free cells");

        assert!(matches!(error, LayoutError::NoFreeCells {
            requested: 11,
            available: 10
        }));
        assert!(layout.items.is_empty());
    }
}
