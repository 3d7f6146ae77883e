use std::net::SocketAddr;

use shared::models::rank::RankThresholds;

use crate::errors::config_errors::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub room_ttl_secs: i64,
    pub sweep_interval_secs: u64,
    pub rank_thresholds: RankThresholds,
    pub default_rank: i32,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            room_ttl_secs: 3600,
            sweep_interval_secs: 60,
            rank_thresholds: RankThresholds::default(),
            default_rank: 1000,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let bind_addr = parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?;
        let room_ttl_secs = parse_or(&lookup, "ROOM_TTL_SECS", defaults.room_ttl_secs)?;
        let sweep_interval_secs =
            parse_or(&lookup, "SWEEP_INTERVAL_SECS", defaults.sweep_interval_secs)?;
        let intermediate_min = parse_or(
            &lookup,
            "INTERMEDIATE_MIN_RANK",
            defaults.rank_thresholds.intermediate_min,
        )?;
        let advanced_min = parse_or(
            &lookup,
            "ADVANCED_MIN_RANK",
            defaults.rank_thresholds.advanced_min,
        )?;
        let default_rank = parse_or(&lookup, "DEFAULT_RANK", defaults.default_rank)?;

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "LOG_FORMAT".to_string(),
                    value: other.to_string(),
                })
            }
        };

        if room_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "ROOM_TTL_SECS".to_string(),
                value: room_ttl_secs.to_string(),
            });
        }
        if sweep_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SWEEP_INTERVAL_SECS".to_string(),
                value: sweep_interval_secs.to_string(),
            });
        }
        if intermediate_min >= advanced_min {
            return Err(ConfigError::InvalidThresholds {
                intermediate_min,
                advanced_min,
            });
        }

        Ok(Config {
            bind_addr,
            room_ttl_secs,
            sweep_interval_secs,
            rank_thresholds: RankThresholds {
                intermediate_min,
                advanced_min,
            },
            default_rank,
            log_format,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}
