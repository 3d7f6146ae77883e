#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: String, value: String },
    InvalidThresholds { intermediate_min: i32, advanced_min: i32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: {:?}", key, value)
            }
            ConfigError::InvalidThresholds {
                intermediate_min,
                advanced_min,
            } => write!(
                f,
                "INTERMEDIATE_MIN_RANK ({}) must be below ADVANCED_MIN_RANK ({})",
                intermediate_min, advanced_min
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
