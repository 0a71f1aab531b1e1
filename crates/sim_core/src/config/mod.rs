//! Configuration system
//!
//! Configuration is a tree of typed values loaded from a TOML or RON file and
//! addressed with dotted keys such as `game.world.width`. The engine only
//! reads it while building the world and the scene, never mid-tick.
//!
//! Every accessor takes a default. A missing key silently yields the default;
//! a key holding a value of the wrong shape logs a warning and yields the
//! default as well.

use crate::foundation::math::Vec2;
use crate::physics::Material;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use toml::{Table, Value};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value exists but cannot be read as the requested type
    #[error("value of '{key}' is not a valid {expected}")]
    InvalidValue {
        /// Dotted key
        key: String,
        /// Expected type
        expected: &'static str,
    },
}

/// Typed view over a configuration tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    values: Table,
}

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from file, picking the format from the extension
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let parse: fn(&str) -> Result<Self, ConfigError> = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str,
            Some("ron") => Self::from_ron_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        let config = parse(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let values = contents
            .parse::<Table>()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self { values })
    }

    /// Parse a RON document whose root is a map of string keys
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        let values = ron::from_str::<Table>(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(Self { values })
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::to_string_pretty(&self.values)
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(&self.values, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }

    /// Raw value at a dotted key.
    ///
    /// A key written literally with dots at the root (`"game.debug" = 1`)
    /// takes precedence over the nested path.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.values.get(key) {
            return Some(value);
        }
        let mut parts = key.split('.');
        let mut current = self.values.get(parts.next()?)?;
        for part in parts {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }

    /// Whether a value exists at the dotted key
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Set a value at a dotted key, creating intermediate tables
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        if self.values.contains_key(key) {
            self.values.insert(key.to_string(), value.into());
            return;
        }
        let parts: Vec<&str> = key.split('.').collect();
        let Some((last, parents)) = parts.split_last() else {
            return;
        };
        let mut table = &mut self.values;
        for part in parents {
            let entry = table
                .entry((*part).to_string())
                .or_insert_with(|| Value::Table(Table::new()));
            if !entry.is_table() {
                *entry = Value::Table(Table::new());
            }
            let Value::Table(next) = entry else {
                return;
            };
            table = next;
        }
        table.insert((*last).to_string(), value.into());
    }

    /// Integer value, or `default`
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.read(key, "integer", default, |v| match v {
            Value::Integer(i) => Some(*i),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// Floating point value, or `default`. Integers are widened.
    pub fn get_double(&self, key: &str, default: f64) -> f64 {
        self.read(key, "number", default, value_as_f64)
    }

    /// Boolean value, or `default`
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.read(key, "boolean", default, |v| match v {
            Value::Boolean(b) => Some(*b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    /// String value, or `default`
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.read(key, "string", default.to_string(), |v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Integer(_) | Value::Float(_) | Value::Boolean(_) => Some(v.to_string()),
            _ => None,
        })
    }

    /// 2D vector value, or `default`.
    ///
    /// Accepts `[x, y]`, `{ x = .., y = .. }` or the string form `"v(x,y)"`.
    pub fn get_vector2d(&self, key: &str, default: Vec2) -> Vec2 {
        self.read(key, "2D vector", default, value_as_vec2)
    }

    /// Material value, or `default`.
    ///
    /// Missing fields inside the table fall back to the default material's
    /// coefficients.
    pub fn get_material(&self, key: &str, default: Material) -> Material {
        self.read(key, "material", default, |v| match v {
            Value::Table(_) => Material::deserialize(v.clone()).ok(),
            _ => None,
        })
    }

    /// Apply `key=value` command-line overrides.
    ///
    /// Only keys already present are overridden; the new value is parsed to
    /// the type of the existing one. Returns the number of applied overrides.
    pub fn parse_arguments<I, S>(&mut self, args: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut applied = 0;
        for arg in args {
            let Some((key, raw)) = arg.as_ref().split_once('=') else {
                continue;
            };
            let key = key.trim();
            let Some(existing) = self.lookup(key) else {
                log::warn!("Ignoring override for unknown configuration key '{}'", key);
                continue;
            };
            match parse_like(existing, raw.trim()) {
                Ok(value) => {
                    log::debug!("Configuration override {} = {}", key, value);
                    self.set(key, value);
                    applied += 1;
                }
                Err(e) => log::warn!("Ignoring override: {}", e.with_key(key)),
            }
        }
        applied
    }

    fn read<T>(
        &self,
        key: &str,
        expected: &'static str,
        default: T,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> T {
        match self.lookup(key) {
            None => default,
            Some(value) => convert(value).unwrap_or_else(|| {
                log::warn!("{}", ConfigError::InvalidValue { key: key.to_string(), expected });
                default
            }),
        }
    }
}

impl ConfigError {
    fn with_key(self, key: &str) -> Self {
        match self {
            Self::InvalidValue { expected, .. } => Self::InvalidValue { key: key.to_string(), expected },
            other => other,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float(f) => Some(*f),
        Value::Integer(i) => Some(*i as f64),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_vec2(value: &Value) -> Option<Vec2> {
    match value {
        Value::Array(items) if items.len() == 2 => {
            Some(Vec2::new(value_as_f64(&items[0])?, value_as_f64(&items[1])?))
        }
        Value::Table(t) => Some(Vec2::new(value_as_f64(t.get("x")?)?, value_as_f64(t.get("y")?)?)),
        Value::String(s) => parse_vector_literal(s),
        _ => None,
    }
}

/// Parse the `v(x,y)` literal form
fn parse_vector_literal(text: &str) -> Option<Vec2> {
    let inner = text.trim().strip_prefix("v(")?.strip_suffix(')')?;
    let (x, y) = inner.split_once(',')?;
    Some(Vec2::new(x.trim().parse().ok()?, y.trim().parse().ok()?))
}

fn parse_like(existing: &Value, raw: &str) -> Result<Value, ConfigError> {
    let invalid = |expected| ConfigError::InvalidValue { key: String::new(), expected };
    match existing {
        Value::Integer(_) => raw.parse().map(Value::Integer).map_err(|_| invalid("integer")),
        Value::Float(_) => raw.parse().map(Value::Float).map_err(|_| invalid("number")),
        Value::Boolean(_) => raw.parse().map(Value::Boolean).map_err(|_| invalid("boolean")),
        Value::Array(_) => parse_vector_literal(raw)
            .map(|v| Value::Array(vec![Value::Float(v.x), Value::Float(v.y)]))
            .ok_or_else(|| invalid("2D vector")),
        _ => Ok(Value::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
"game.debug" = 2

[game.world]
width = 320
height = 200
gravity = [0.0, -0.981]
material = { name = "air", friction = 0.98 }

[game.screen]
fps = 60
scale = 2.0
title = "demo"
fullscreen = false
offset = "v(4.5,-2)"
"#;

    fn sample() -> Configuration {
        Configuration::from_toml_str(SAMPLE).expect("sample config parses")
    }

    #[test]
    fn test_typed_accessors() {
        let config = sample();
        assert_eq!(config.get_int("game.world.width", 0), 320);
        assert_eq!(config.get_int("game.debug", 0), 2);
        assert_eq!(config.get_double("game.screen.fps", 0.0), 60.0);
        assert_eq!(config.get_double("game.screen.scale", 0.0), 2.0);
        assert!(!config.get_bool("game.screen.fullscreen", true));
        assert_eq!(config.get_string("game.screen.title", ""), "demo");
        assert_eq!(config.get_vector2d("game.world.gravity", Vec2::zeros()), Vec2::new(0.0, -0.981));
        assert_eq!(config.get_vector2d("game.screen.offset", Vec2::zeros()), Vec2::new(4.5, -2.0));
    }

    #[test]
    fn test_defaults_for_missing_and_ill_typed_keys() {
        let config = sample();
        assert_eq!(config.get_int("game.world.depth", 7), 7);
        assert_eq!(config.get_int("game.screen.title", 9), 9);
        assert_eq!(config.get_vector2d("game.world.width", Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
        assert!(config.get_bool("nothing.here", true));
    }

    #[test]
    fn test_material_fills_missing_fields_from_default() {
        let config = sample();
        let m = config.get_material("game.world.material", Material::default());
        assert_eq!(m.name, "air");
        assert_eq!(m.friction, 0.98);
        assert_eq!(m.density, 1.0);

        let fallback = Material::new("fallback", 2.0, 0.5, 0.9);
        assert_eq!(config.get_material("game.world.width", fallback.clone()), fallback);
    }

    #[test]
    fn test_parse_arguments_only_overrides_known_keys() {
        let mut config = sample();
        let applied = config.parse_arguments([
            "game.world.width=640",
            "game.world.gravity=v(0,9.81)",
            "game.unknown=1",
            "game.screen.fps=fast",
            "no-equals-sign",
        ]);

        assert_eq!(applied, 2);
        assert_eq!(config.get_int("game.world.width", 0), 640);
        assert_eq!(config.get_vector2d("game.world.gravity", Vec2::zeros()), Vec2::new(0.0, 9.81));
        assert!(!config.contains("game.unknown"));
        assert_eq!(config.get_int("game.screen.fps", 0), 60);
    }

    #[test]
    fn test_set_creates_nested_tables() {
        let mut config = Configuration::new();
        config.set("game.camera.tween", 0.02_f64);
        config.set("game.debug", 1_i64);
        assert_eq!(config.get_double("game.camera.tween", 0.0), 0.02);
        assert_eq!(config.get_int("game.debug", 0), 1);
    }

    #[test]
    fn test_ron_document() {
        let config = Configuration::from_ron_str(
            r#"{ "game": { "world": { "width": 500, "gravity": [0.0, -1.5] } } }"#,
        )
        .expect("ron config parses");
        assert_eq!(config.get_int("game.world.width", 0), 500);
        assert_eq!(config.get_vector2d("game.world.gravity", Vec2::zeros()), Vec2::new(0.0, -1.5));
    }

    #[test]
    fn test_save_and_reload() {
        let config = sample();
        let dir = std::env::temp_dir();
        for ext in ["toml", "ron"] {
            let path = dir.join(format!("sim_core_config_{}.{ext}", std::process::id()));
            config.save_to_file(&path).expect("config saves");
            let reloaded = Configuration::load_from_file(&path).expect("config reloads");
            std::fs::remove_file(&path).ok();
            assert_eq!(reloaded, config, "{ext} round trip");
        }

        let path = dir.join(format!("sim_core_config_{}.properties", std::process::id()));
        let err = config.save_to_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Configuration::load_from_file("game.properties").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));

        let err = Configuration::load_from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
