//! Grid configuration as data.
//!
//! [`GridConfig`] captures every setting of a [`crate::SplitterGrid`] so a
//! layout can be saved and restored, or loaded from TOML or JSON at startup.
//!
//! ```toml
//! columns = 3
//! margin = 8.0
//! column_ratios = [2.0, 1.0, 1.0]
//! orientation = "tb-lr"
//! ```
//!
//! ```rust,ignore
//! let config = GridConfig::from_toml_file("grid.toml")?;
//! let grid = SplitterGrid::from_config(&config, NoopCursor)?;
//! ```
//!
//! Missing keys take the defaults of [`GridConfig::default`].

use std::fmt;
#[cfg(feature = "config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::{DEFAULT_MARGIN, DEFAULT_MIN_CELL_SIZE};
use crate::orientation::Orientation;
use crate::ratios::validate_ratios;

/// Settings and ratios of one grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Column count setting; 0 derives columns from `rows`.
    pub columns: usize,
    /// Row count setting; 0 derives rows from `columns`.
    pub rows: usize,
    /// Gap between adjacent cells, also the splitter band thickness.
    pub margin: f64,
    pub column_ratios: Vec<f64>,
    pub row_ratios: Vec<f64>,
    pub min_column_width: f64,
    pub min_row_height: f64,
    pub orientation: Orientation,
    /// Whether hovering a splitter changes the system cursor.
    pub override_cursor: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 0,
            rows: 0,
            margin: DEFAULT_MARGIN,
            column_ratios: Vec::new(),
            row_ratios: Vec::new(),
            min_column_width: DEFAULT_MIN_CELL_SIZE,
            min_row_height: DEFAULT_MIN_CELL_SIZE,
            orientation: Orientation::default(),
            override_cursor: true,
        }
    }
}

impl GridConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, GridConfigError> {
        toml::from_str(s).map_err(GridConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GridConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(GridConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, GridConfigError> {
        serde_json::from_str(s).map_err(GridConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GridConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(GridConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty-printed JSON.
    #[cfg(feature = "config")]
    pub fn to_json(&self) -> Result<String, GridConfigError> {
        serde_json::to_string_pretty(self).map_err(GridConfigError::Json)
    }

    /// Check every field. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, value) in [
            ("margin", self.margin),
            ("min_column_width", self.min_column_width),
            ("min_row_height", self.min_row_height),
        ] {
            if !is_valid_length(value) {
                errors.push(format!("{name} must be finite and >= 0, got {value}"));
            }
        }

        for (name, ratios) in [
            ("column_ratios", &self.column_ratios),
            ("row_ratios", &self.row_ratios),
        ] {
            if let Err(err) = validate_ratios(ratios) {
                errors.push(format!("{name}: {err}"));
            }
        }

        errors
    }
}

/// Margins and size floors are finite and non-negative.
pub(crate) fn is_valid_length(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Errors from loading or applying a [`GridConfig`].
#[derive(Debug)]
pub enum GridConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors, one message per field.
    Invalid(Vec<String>),
}

impl fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Invalid(errors) => write!(f, "invalid grid config: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for GridConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}
