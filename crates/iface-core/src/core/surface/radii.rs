use crate::core::data::elements::default_vdw_radius;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RadiiFile {
    radii: HashMap<String, f64>,
}

/// Van der Waals radii lookup used by surface-area calculations.
///
/// Entries loaded from a file take precedence over the built-in element
/// table; elements absent from both are reported as unknown.
#[derive(Debug, Clone, Default)]
pub struct RadiiTable {
    overrides: HashMap<String, f64>,
}

impl RadiiTable {
    /// A table that only uses the built-in element radii.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads radius overrides from a TOML file with a single `[radii]` table
    /// mapping element symbols to radii in Angstroms.
    pub fn load(path: &Path) -> Result<Self, RadiiLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| RadiiLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: RadiiFile = toml::from_str(&content).map_err(|e| RadiiLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let mut overrides = HashMap::with_capacity(file.radii.len());
        for (element, radius) in file.radii {
            if !radius.is_finite() || radius <= 0.0 {
                return Err(RadiiLoadError::InvalidRadius { element, radius });
            }
            overrides.insert(element.trim().to_ascii_uppercase(), radius);
        }
        Ok(Self { overrides })
    }

    pub fn with_radius(mut self, element: &str, radius: f64) -> Self {
        self.overrides
            .insert(element.trim().to_ascii_uppercase(), radius);
        self
    }

    pub fn radius(&self, element: &str) -> Option<f64> {
        let key = element.trim().to_ascii_uppercase();
        self.overrides
            .get(&key)
            .copied()
            .or_else(|| default_vdw_radius(&key))
    }
}

#[derive(Debug, Error)]
pub enum RadiiLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Radius for element '{element}' must be a positive number, got {radius}")]
    InvalidRadius { element: String, radius: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn built_in_radii_are_used_by_default() {
        let table = RadiiTable::new();
        assert_eq!(table.radius("C"), Some(1.70));
        assert_eq!(table.radius("n"), Some(1.55));
        assert_eq!(table.radius("XX"), None);
    }

    #[test]
    fn loaded_radii_override_and_extend_defaults() {
        let file = write_toml("[radii]\nC = 1.87\nxx = 2.5\n");
        let table = RadiiTable::load(file.path()).unwrap();
        assert_eq!(table.radius("C"), Some(1.87));
        assert_eq!(table.radius("XX"), Some(2.5));
        assert_eq!(table.radius("O"), Some(1.52));
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let file = write_toml("[radii]\nC = 0.0\n");
        assert!(matches!(
            RadiiTable::load(file.path()),
            Err(RadiiLoadError::InvalidRadius { ref element, .. }) if element == "C"
        ));
    }

    #[test]
    fn unknown_top_level_keys_are_rejected() {
        let file = write_toml("[radii]\nC = 1.7\n[extra]\nfoo = 1\n");
        assert!(matches!(
            RadiiTable::load(file.path()),
            Err(RadiiLoadError::Toml { .. })
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let result = RadiiTable::load(Path::new("/nonexistent/radii.toml"));
        assert!(matches!(result, Err(RadiiLoadError::Io { .. })));
    }
}
