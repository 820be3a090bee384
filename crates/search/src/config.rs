use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sixres_core::Board;
use sixres_engine::{ActionSet, Gravity, MovementConfig};
use thiserror::Error;

const DEFAULT_MAX_ACTIONS: usize = 5;
const DEFAULT_VISION: usize = 7;
const DEFAULT_FORESIGHT: usize = 2;

/// Which placements the continuation search keeps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Net-neutral or clearing placements: filled cells never increase.
    #[default]
    Combo,
    /// Building placements: filled cells strictly increase.
    Upstack,
}

impl Style {
    /// Filled-cell counts before and after placement, measured after line clears.
    pub fn accepts(self, before: usize, after: usize) -> bool {
        match self {
            Style::Combo => after <= before,
            Style::Upstack => after > before,
        }
    }
}

/// Search configuration loaded from YAML. Unset fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub board_width: usize,
    /// Visible rows; the spawn margin comes on top.
    pub board_height: usize,
    /// Longest action sequence considered per placement (K).
    pub max_actions: usize,
    pub allow_180: bool,
    /// Preview pieces the search may look at.
    pub vision: usize,
    /// Length of the hypothetical piece sequences used to break ties; 0 disables.
    pub foresight: usize,
    pub style: Style,
    /// Upstack until the board holds this many filled cells.
    pub residual: Option<usize>,
    pub gravity: Gravity,
    /// Seed for the fallback choice; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            board_width: Board::DEFAULT_WIDTH,
            board_height: Board::DEFAULT_VISIBLE_HEIGHT,
            max_actions: DEFAULT_MAX_ACTIONS,
            allow_180: true,
            vision: DEFAULT_VISION,
            foresight: DEFAULT_FORESIGHT,
            style: Style::Combo,
            residual: None,
            gravity: Gravity::None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let cfg: SearchConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: SearchConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_range("max_actions", self.max_actions, 1, 6)?;
        check_range("vision", self.vision, 1, 14)?;
        check_range("foresight", self.foresight, 0, 7)?;
        check_range("board_width", self.board_width, 4, 16)?;
        check_range("board_height", self.board_height, 4, 40)?;
        if let Some(residual) = self.residual {
            let cells = self.board_width * self.board_height;
            if residual > cells {
                return Err(ValidationError::InvalidField {
                    field: "residual".to_string(),
                    message: format!("{residual} exceeds the {cells} visible cells"),
                });
            }
        }
        Ok(())
    }

    pub fn movement(&self) -> MovementConfig {
        MovementConfig::new(
            ActionSet::standard(self.allow_180),
            self.max_actions,
            self.gravity,
        )
    }

    pub fn empty_board(&self) -> Board {
        Board::new(self.board_width, self.board_height)
    }
}

fn check_range(field: &str, value: usize, min: usize, max: usize) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        return Ok(());
    }
    Err(ValidationError::InvalidField {
        field: field.to_string(),
        message: format!("{value} is outside {min}..={max}"),
    })
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_YAML: &str = r#"
board_width: 10
board_height: 20
max_actions: 4
allow_180: false
vision: 5
foresight: 1
style: upstack
residual: 6
gravity: instant
seed: 42
"#;

    #[test]
    fn loads_full_config() {
        let cfg = SearchConfig::from_yaml_str(FULL_YAML).expect("valid yaml");
        assert_eq!(cfg.board_width, 10);
        assert_eq!(cfg.max_actions, 4);
        assert!(!cfg.allow_180);
        assert_eq!(cfg.style, Style::Upstack);
        assert_eq!(cfg.residual, Some(6));
        assert_eq!(cfg.gravity, Gravity::Instant);
        assert_eq!(cfg.seed, Some(42));

        let movement = cfg.movement();
        assert_eq!(movement.max_actions, 4);
        assert_eq!(movement.actions, ActionSet::standard(false));
        assert_eq!(cfg.empty_board().width(), 10);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg = SearchConfig::from_yaml_str("vision: 3\n").expect("valid yaml");
        assert_eq!(
            cfg,
            SearchConfig {
                vision: 3,
                ..SearchConfig::default()
            }
        );
        let defaults = SearchConfig::default();
        assert_eq!(defaults.board_width, 4);
        assert_eq!(defaults.max_actions, 5);
        assert_eq!(defaults.vision, 7);
        assert_eq!(defaults.foresight, 2);
        assert!(defaults.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let cases = [
            ("max_actions: 0", "max_actions"),
            ("max_actions: 7", "max_actions"),
            ("vision: 15", "vision"),
            ("foresight: 8", "foresight"),
            ("board_width: 3", "board_width"),
            ("board_height: 41", "board_height"),
            ("residual: 1000", "residual"),
        ];
        for (yaml, expected) in cases {
            match SearchConfig::from_yaml_str(yaml) {
                Err(ConfigError::Validation(ValidationError::InvalidField { field, .. })) => {
                    assert_eq!(field, expected, "{yaml}")
                }
                other => panic!("expected validation error for {yaml}, got {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            SearchConfig::from_yaml_str("beam_width: 3"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn read_error_keeps_path() {
        let err = SearchConfig::from_path("/no/such/sixres.yaml").expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("sixres.yaml"));
    }

    #[test]
    fn style_filter() {
        assert!(Style::Combo.accepts(3, 3));
        assert!(Style::Combo.accepts(3, 0));
        assert!(!Style::Combo.accepts(3, 4));
        assert!(Style::Upstack.accepts(0, 4));
        assert!(!Style::Upstack.accepts(4, 4));
    }
}
