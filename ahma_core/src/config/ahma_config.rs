use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::{
    ahma_error::{AhmaError, ErrCode},
    utils::round_period,
};

pub const DEFAULT_HULL_LENGTH: usize = 21;
pub const DEFAULT_ADAPTIVE_WINDOW: usize = 14;
pub const DEFAULT_FAST_PERIOD: f64 = 2.0;
pub const DEFAULT_SLOW_PERIOD: f64 = 30.0;

const MIN_HULL_LENGTH: usize = 1;
const MIN_ADAPTIVE_WINDOW: usize = 2;
const MIN_FAST_PERIOD: f64 = 1.0;

/// Caller-supplied configuration; any field left as `None` takes its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialConfig {
    pub hull_length: Option<f64>,
    pub adaptive_window: Option<f64>,
    pub fast_period: Option<f64>,
    pub slow_period: Option<f64>,
}

impl PartialConfig {
    /// Build from a loosely typed key/value map.
    ///
    /// Keys are accepted in camelCase (`hullLength`) or snake_case
    /// (`hull_length`). Unknown keys and non-numeric values are rejected, a
    /// `null` value counts as omitted.
    pub fn from_map(conf: HashMap<String, serde_json::Value>) -> Result<Self, AhmaError> {
        let mut partial = Self::default();
        for (k, v) in conf.iter() {
            let slot = match k.as_str() {
                "hullLength" | "hull_length" => &mut partial.hull_length,
                "adaptiveWindow" | "adaptive_window" => &mut partial.adaptive_window,
                "fastPeriod" | "fast_period" => &mut partial.fast_period,
                "slowPeriod" | "slow_period" => &mut partial.slow_period,
                _ => {
                    return Err(AhmaError::new(
                        format!("unknown para = {}", k),
                        ErrCode::ParaError,
                    ))
                }
            };
            *slot = match v {
                serde_json::Value::Null => None,
                serde_json::Value::Number(n) => n.as_f64(),
                other => {
                    return Err(AhmaError::new(
                        format!("para {} must be a number, got {}", k, other),
                        ErrCode::ConfigError,
                    ))
                }
            };
        }
        Ok(partial)
    }

    /// Parse a JSON object such as `{"hullLength": 9, "slowPeriod": 20}`
    pub fn from_json_str(s: &str) -> Result<Self, AhmaError> {
        let conf: HashMap<String, serde_json::Value> = serde_json::from_str(s)?;
        Self::from_map(conf)
    }

    /// Fields set in `overrides` win over fields set in `self`
    pub fn merge(&self, overrides: &PartialConfig) -> PartialConfig {
        PartialConfig {
            hull_length: overrides.hull_length.or(self.hull_length),
            adaptive_window: overrides.adaptive_window.or(self.adaptive_window),
            fast_period: overrides.fast_period.or(self.fast_period),
            slow_period: overrides.slow_period.or(self.slow_period),
        }
    }
}

/// Fully resolved AHMA configuration
///
/// Every field is already inside its valid range: `hull_length >= 1`,
/// `adaptive_window >= 2`, `fast_period >= 1` and
/// `slow_period >= fast_period + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AhmaConfig {
    pub hull_length: usize,
    pub adaptive_window: usize,
    pub fast_period: f64,
    pub slow_period: f64,
}

impl Default for AhmaConfig {
    fn default() -> Self {
        Self {
            hull_length: DEFAULT_HULL_LENGTH,
            adaptive_window: DEFAULT_ADAPTIVE_WINDOW,
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
        }
    }
}

impl AhmaConfig {
    /// Create a config from an optional key/value map, see [`PartialConfig::from_map`]
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> Result<Self, AhmaError> {
        let partial = PartialConfig::from_map(conf.unwrap_or_default())?;
        Ok(Self::resolve(&partial))
    }

    /// Merge with defaults and clamp into range. Never fails.
    ///
    /// Non-finite values fall back to the parameter's default.
    pub fn resolve(partial: &PartialConfig) -> Self {
        let hull_length = match partial.hull_length.filter(|v| v.is_finite()) {
            Some(v) => round_period(v, MIN_HULL_LENGTH),
            None => DEFAULT_HULL_LENGTH,
        };
        let adaptive_window = match partial.adaptive_window.filter(|v| v.is_finite()) {
            Some(v) => round_period(v, MIN_ADAPTIVE_WINDOW),
            None => DEFAULT_ADAPTIVE_WINDOW,
        };
        let fast_period = partial
            .fast_period
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_FAST_PERIOD)
            .max(MIN_FAST_PERIOD);
        let slow_period = partial
            .slow_period
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_SLOW_PERIOD)
            .max(fast_period + 1.0);

        Self {
            hull_length,
            adaptive_window,
            fast_period,
            slow_period,
        }
    }
}

impl From<PartialConfig> for AhmaConfig {
    fn from(partial: PartialConfig) -> Self {
        Self::resolve(&partial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = AhmaConfig::resolve(&PartialConfig::default());
        assert_eq!(config, AhmaConfig::default());
        assert_eq!(config.hull_length, 21);
        assert_eq!(config.adaptive_window, 14);
        assert_eq!(config.fast_period, 2.0);
        assert_eq!(config.slow_period, 30.0);
    }

    #[test]
    fn test_clamp_and_round() {
        let config = AhmaConfig::resolve(&PartialConfig {
            hull_length: Some(0.0),
            adaptive_window: Some(1.2),
            fast_period: Some(0.5),
            slow_period: Some(1.0),
        });
        assert_eq!(config.hull_length, 1);
        assert_eq!(config.adaptive_window, 2);
        assert_eq!(config.fast_period, 1.0);
        assert_eq!(config.slow_period, 2.0);

        let config = AhmaConfig::resolve(&PartialConfig {
            hull_length: Some(9.6),
            adaptive_window: Some(10.4),
            fast_period: Some(4.0),
            slow_period: Some(3.0),
        });
        assert_eq!(config.hull_length, 10);
        assert_eq!(config.adaptive_window, 10);
        assert_eq!(config.slow_period, 5.0);
    }

    #[test]
    fn test_non_finite_falls_back_to_default() {
        let config = AhmaConfig::resolve(&PartialConfig {
            hull_length: Some(f64::NAN),
            adaptive_window: Some(f64::INFINITY),
            fast_period: Some(f64::NEG_INFINITY),
            slow_period: Some(f64::NAN),
        });
        assert_eq!(config, AhmaConfig::default());
    }

    #[test]
    fn test_new_from_map() {
        let mut conf = HashMap::new();
        conf.insert("hullLength".to_string(), json!(4));
        conf.insert("slow_period".to_string(), json!(5.0));
        conf.insert("fastPeriod".to_string(), serde_json::Value::Null);
        let config = AhmaConfig::new(Some(conf)).unwrap();
        assert_eq!(config.hull_length, 4);
        assert_eq!(config.adaptive_window, 14);
        assert_eq!(config.fast_period, 2.0);
        assert_eq!(config.slow_period, 5.0);

        assert_eq!(AhmaConfig::new(None).unwrap(), AhmaConfig::default());
    }

    #[test]
    fn test_unknown_para() {
        let mut conf = HashMap::new();
        conf.insert("hull".to_string(), json!(4));
        let err = AhmaConfig::new(Some(conf)).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ParaError);
    }

    #[test]
    fn test_non_numeric_para() {
        let err = PartialConfig::from_json_str(r#"{"hullLength": "9"}"#).unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);

        let err = PartialConfig::from_json_str("[1, 2]").unwrap_err();
        assert_eq!(err.errcode, ErrCode::ConfigError);
    }

    #[test]
    fn test_merge() {
        let base = PartialConfig::from_json_str(r#"{"hullLength": 9, "fastPeriod": 3}"#).unwrap();
        let overrides = PartialConfig {
            hull_length: Some(12.0),
            ..Default::default()
        };
        let merged = base.merge(&overrides);
        assert_eq!(merged.hull_length, Some(12.0));
        assert_eq!(merged.fast_period, Some(3.0));
        assert_eq!(merged.slow_period, None);
    }
}
