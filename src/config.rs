use std::fs;
use std::io;
use std::path::Path;

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::input::Direction;
use crate::snake::Cell;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Points awarded per food eaten.
pub const DEFAULT_SCORE_INCREMENT: u32 = 10;

/// Fixed tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
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

    /// Returns the centre cell, rounding towards the origin.
    #[must_use]
    pub fn centre(self) -> Cell {
        Cell::new(i32::from(self.width / 2), i32::from(self.height / 2))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Construction-time settings of the engine.
///
/// Every field is optional in serialized form; missing fields fall back to
/// the defaults above.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u16,
    pub height: u16,
    pub score_increment: u32,
    /// Cell of the one-segment snake at session start. `None` means the centre.
    pub initial_cell: Option<Cell>,
    pub initial_heading: Direction,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            score_increment: DEFAULT_SCORE_INCREMENT,
            initial_cell: None,
            initial_heading: Direction::Right,
        }
    }
}

impl EngineConfig {
    /// Creates the default configuration with a custom grid size.
    #[must_use]
    pub fn with_grid(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Returns the grid bounds.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the cell the snake starts on.
    #[must_use]
    pub fn start_cell(&self) -> Cell {
        self.initial_cell.unwrap_or_else(|| self.grid().centre())
    }

    /// Checks that the grid is non-empty and the start cell lies inside it.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }

        let start = self.start_cell();
        if !start.is_within_bounds(self.grid()) {
            return Err(EngineError::InvalidConfig(format!(
                "initial cell ({}, {}) lies outside the {}x{} grid",
                start.x, start.y, self.width, self.height
            )));
        }

        Ok(())
    }

    /// Loads a (possibly partial) configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
    }
}

/// Colors applied to the terminal front-end.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_label: Color,
    pub hud_value: Color,
    pub hud_best: Color,
    pub menu_title: Color,
    pub menu_alert: Color,
    pub menu_footer: Color,
}

/// Night-blue board with a red head and golden food.
pub const THEME_NIGHT: Theme = Theme {
    snake_head: Color::Rgb(0xe9, 0x45, 0x60),
    snake_body: Color::Rgb(0x0f, 0x34, 0x60),
    food: Color::Rgb(0xf3, 0x9c, 0x12),
    play_bg: Color::Rgb(0x1a, 0x1a, 0x2e),
    border_fg: Color::Rgb(0xe9, 0x45, 0x60),
    hud_label: Color::Gray,
    hud_value: Color::White,
    hud_best: Color::Yellow,
    menu_title: Color::Green,
    menu_alert: Color::LightRed,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Glyph used for every snake segment. Two columns wide so cells look square.
pub const GLYPH_SEGMENT: &str = "██";

/// Glyph used for food.
pub const GLYPH_FOOD: &str = "◆◆";

/// Terminal columns used per logical cell.
pub const CELL_COLUMNS: u16 = 2;

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, EngineConfig, GridSize};
    use crate::error::EngineError;
    use crate::input::Direction;
    use crate::snake::Cell;

    #[test]
    fn default_config_matches_reference_board() {
        let config = EngineConfig::default();

        assert_eq!(config.width, DEFAULT_GRID_WIDTH);
        assert_eq!(config.height, DEFAULT_GRID_HEIGHT);
        assert_eq!(config.score_increment, 10);
        assert_eq!(config.start_cell(), Cell::new(10, 10));
        assert_eq!(config.initial_heading, Direction::Right);
    }

    #[test]
    fn empty_grid_is_rejected() {
        let config = EngineConfig::with_grid(0, 5);

        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn start_cell_outside_grid_is_rejected() {
        let config = EngineConfig {
            initial_cell: Some(Cell::new(4, 0)),
            ..EngineConfig::with_grid(4, 4)
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn grid_total_cells() {
        let grid = GridSize {
            width: 7,
            height: 3,
        };

        assert_eq!(grid.total_cells(), 21);
        assert_eq!(grid.centre(), Cell::new(3, 1));
    }

    #[test]
    fn partial_json_file_keeps_defaults() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("grid-snake-config-{nanos}.json"));
        fs::write(&path, r#"{ "width": 12, "initial_heading": "up" }"#)
            .expect("test config write should succeed");

        let config = EngineConfig::from_json_file(&path).expect("config should parse");
        let _ = fs::remove_file(&path);

        assert_eq!(config.width, 12);
        assert_eq!(config.height, DEFAULT_GRID_HEIGHT);
        assert_eq!(config.initial_heading, Direction::Up);
        assert_eq!(config.initial_cell, None);
    }
}
