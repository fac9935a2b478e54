use crate::application::{Session, World};
use crate::domain::{Dimension, StepStrategy};
use std::env;
use thiserror::Error;

// Environment keys read by `Config::from_env`.
pub const DIMENSION_KEY: &str = "LIFE_DIMENSION";
pub const WIDTH_KEY: &str = "LIFE_WIDTH";
pub const HEIGHT_KEY: &str = "LIFE_HEIGHT";
pub const DEPTH_KEY: &str = "LIFE_DEPTH";
pub const UPS_KEY: &str = "LIFE_UPS";
pub const STRATEGY_KEY: &str = "LIFE_STRATEGY";
pub const INTERACTION_KEY: &str = "LIFE_LAYER_INTERACTION";

pub const MAX_EXTENT: usize = 4096;
pub const MAX_DEPTH: usize = 1024;
pub const MIN_UPS: f32 = 1.0;
pub const MAX_UPS: f32 = 60.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{key}: `{value}` is not a valid number")]
    InvalidNumber { key: &'static str, value: String },

    #[error("unknown dimension `{0}` (expected 2d, 2.5d or 3d)")]
    InvalidDimension(String),

    #[error("unknown step strategy `{0}` (expected sequential or parallel)")]
    InvalidStrategy(String),

    #[error("{key}: `{value}` is not a boolean")]
    InvalidFlag { key: &'static str, value: String },

    #[error("{key}: {value} is outside {min}..={max}")]
    OutOfRange {
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Startup settings for a simulation session
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub dimension: Dimension,
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    pub updates_per_second: f32,
    pub strategy: StepStrategy,
    pub layer_interaction: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_dimension(Dimension::TwoD)
    }
}

impl Config {
    /// Defaults sized for each kind of universe
    pub fn for_dimension(dimension: Dimension) -> Self {
        let (width, height, depth) = match dimension {
            Dimension::TwoD => (100, 100, 1),
            Dimension::TwoAndHalfD => (64, 64, 5),
            Dimension::ThreeD => (32, 32, 32),
        };
        Self {
            dimension,
            width,
            height,
            depth,
            updates_per_second: 10.0,
            strategy: StepStrategy::default(),
            layer_interaction: false,
        }
    }

    /// Read settings from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`; missing keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dimension = match lookup(DIMENSION_KEY) {
            Some(value) => parse_dimension(&value)?,
            None => Dimension::TwoD,
        };
        let mut config = Self::for_dimension(dimension);

        if let Some(value) = lookup(WIDTH_KEY) {
            config.width = parse_extent(WIDTH_KEY, &value, MAX_EXTENT)?;
        }
        if let Some(value) = lookup(HEIGHT_KEY) {
            config.height = parse_extent(HEIGHT_KEY, &value, MAX_EXTENT)?;
        }
        if let Some(value) = lookup(DEPTH_KEY) {
            config.depth = parse_extent(DEPTH_KEY, &value, MAX_DEPTH)?;
        }
        if dimension == Dimension::TwoD {
            config.depth = 1;
        }

        if let Some(value) = lookup(UPS_KEY) {
            let ups: f32 = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: UPS_KEY,
                value: value.clone(),
            })?;
            if !(MIN_UPS..=MAX_UPS).contains(&ups) {
                return Err(ConfigError::OutOfRange {
                    key: UPS_KEY,
                    value: f64::from(ups),
                    min: f64::from(MIN_UPS),
                    max: f64::from(MAX_UPS),
                });
            }
            config.updates_per_second = ups;
        }

        if let Some(value) = lookup(STRATEGY_KEY) {
            config.strategy = StepStrategy::parse(&value).ok_or(ConfigError::InvalidStrategy(value))?;
        }

        if let Some(value) = lookup(INTERACTION_KEY) {
            config.layer_interaction = parse_flag(INTERACTION_KEY, &value)?;
        }

        Ok(config)
    }

    /// Build the initial world and wrap it in a paused session
    pub fn build_session(&self) -> Session {
        let mut world = World::new(self.dimension, self.width, self.height, self.depth);
        if let World::Layered(universe) = &mut world {
            universe.set_layer_interaction(self.layer_interaction);
        }

        Session::new(world)
            .with_strategy(self.strategy)
            .with_speed(self.updates_per_second)
    }
}

fn parse_dimension(value: &str) -> Result<Dimension, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "2d" | "2" => Ok(Dimension::TwoD),
        "2.5d" | "25d" | "layered" => Ok(Dimension::TwoAndHalfD),
        "3d" | "3" => Ok(Dimension::ThreeD),
        _ => Err(ConfigError::InvalidDimension(value.to_string())),
    }
}

fn parse_extent(key: &'static str, value: &str, max: usize) -> Result<usize, ConfigError> {
    let parsed: usize = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })?;
    if parsed == 0 || parsed > max {
        return Err(ConfigError::OutOfRange {
            key,
            value: parsed as f64,
            min: 1.0,
            max: max as f64,
        });
    }
    Ok(parsed)
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = Config::from_lookup(lookup(&[])).expect("defaults parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.dimension, Dimension::TwoD);
        assert_eq!((config.width, config.height, config.depth), (100, 100, 1));
    }

    #[test]
    fn test_dimension_picks_defaults() {
        let config = Config::from_lookup(lookup(&[(DIMENSION_KEY, "3D")])).expect("3d parses");
        assert_eq!(config.dimension, Dimension::ThreeD);
        assert_eq!((config.width, config.height, config.depth), (32, 32, 32));

        let config = Config::from_lookup(lookup(&[(DIMENSION_KEY, "2.5d"), (DEPTH_KEY, "3")]))
            .expect("2.5d parses");
        assert_eq!(config.depth, 3);
    }

    #[test]
    fn test_flat_world_ignores_depth() {
        let config = Config::from_lookup(lookup(&[(DEPTH_KEY, "9")])).expect("parses");
        assert_eq!(config.depth, 1);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (DIMENSION_KEY, "layered"),
            (WIDTH_KEY, "40"),
            (HEIGHT_KEY, " 30 "),
            (UPS_KEY, "25.5"),
            (STRATEGY_KEY, "sequential"),
            (INTERACTION_KEY, "on"),
        ]))
        .expect("overrides parse");

        assert_eq!(config.width, 40);
        assert_eq!(config.height, 30);
        assert_eq!(config.updates_per_second, 25.5);
        assert_eq!(config.strategy, StepStrategy::Sequential);
        assert!(config.layer_interaction);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[(WIDTH_KEY, "wide")])),
            Err(ConfigError::InvalidNumber { key: WIDTH_KEY, value: "wide".into() })
        );
        assert_eq!(
            Config::from_lookup(lookup(&[(DIMENSION_KEY, "4d")])),
            Err(ConfigError::InvalidDimension("4d".into()))
        );
        assert!(matches!(
            Config::from_lookup(lookup(&[(HEIGHT_KEY, "0")])),
            Err(ConfigError::OutOfRange { key: HEIGHT_KEY, .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(UPS_KEY, "120")])),
            Err(ConfigError::OutOfRange { key: UPS_KEY, .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(STRATEGY_KEY, "gpu")])),
            Err(ConfigError::InvalidStrategy(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(INTERACTION_KEY, "maybe")])),
            Err(ConfigError::InvalidFlag { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::OutOfRange { key: UPS_KEY, value: 99.0, min: 1.0, max: 60.0 };
        assert_eq!(err.to_string(), "LIFE_UPS: 99 is outside 1..=60");
        assert_eq!(
            ConfigError::InvalidDimension("5d".into()).to_string(),
            "unknown dimension `5d` (expected 2d, 2.5d or 3d)"
        );
    }

    #[test]
    fn test_build_session() {
        let mut config = Config::for_dimension(Dimension::TwoAndHalfD);
        config.layer_interaction = true;
        config.updates_per_second = 12.0;

        let session = config.build_session();
        assert_eq!(session.world.universe().size().z, 5);
        assert_eq!(session.updates_per_second, 12.0);
        assert!(matches!(&session.world, World::Layered(u) if u.layer_interaction()));
        assert!(!session.is_running());
    }
}
