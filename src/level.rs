// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Levels and the registry that resolves them.

use std::collections::BTreeSet;
use std::collections::HashMap;

use serde::Deserialize;

use crate::ColorSpec;
use crate::Error;

/// The built-in levels and their colors. All of them are persisted to file.
pub const DEFAULT_LEVELS: [(&str, &str); 8] = [
    ("info", "#3AFF00"),
    ("warn", "#ff960a"),
    ("debug", "#229500"),
    ("system", "#ffffff"),
    ("error", "#db0000"),
    ("fatal", "#ff0000"),
    ("database", "#0024FF"),
    ("event", "#00FFDB"),
];

/// How records of one level are rendered and persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    /// The console color.
    #[serde(default)]
    pub color: ColorSpec,
    /// Whether records are also appended to the level's daily log file.
    #[serde(default)]
    pub write_to_file: bool,
}

impl LevelConfig {
    /// Create a level config.
    pub fn new(color: impl Into<ColorSpec>, write_to_file: bool) -> Self {
        Self {
            color: color.into(),
            write_to_file,
        }
    }
}

/// Options for registering a level with [`Registry::add_config`].
///
/// The color defaults to `"white"` and file persistence defaults to off.
///
/// # Examples
///
/// ```
/// use levelforth::LevelOptions;
///
/// let options = LevelOptions::new("audit").color("#123456").write_to_file(true);
/// ```
#[derive(Debug, Clone)]
pub struct LevelOptions {
    level: String,
    color: Option<ColorSpec>,
    write_to_file: Option<bool>,
}

impl LevelOptions {
    /// Create options for the level `level`.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            color: None,
            write_to_file: None,
        }
    }

    /// Set the console color of the level.
    pub fn color(mut self, color: impl Into<ColorSpec>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set whether records of the level are persisted.
    pub fn write_to_file(mut self, write_to_file: bool) -> Self {
        self.write_to_file = Some(write_to_file);
        self
    }

    fn into_parts(self) -> (String, LevelConfig) {
        let config = LevelConfig {
            color: self.color.unwrap_or_default(),
            write_to_file: self.write_to_file.unwrap_or(false),
        };
        (self.level, config)
    }
}

/// A registered level, returned by [`Registry::add_config`].
///
/// Pass it to [`Logger::log_at`](crate::Logger::log_at) to log at that level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelHandle {
    level: String,
}

impl LevelHandle {
    /// The name of the level.
    pub fn name(&self) -> &str {
        &self.level
    }
}

/// The effective set of levels: built-in defaults shadowed by runtime overrides.
#[derive(Debug, Clone)]
pub struct Registry {
    defaults: HashMap<String, LevelConfig>,
    overrides: HashMap<String, LevelConfig>,
}

impl Default for Registry {
    fn default() -> Self {
        let defaults = DEFAULT_LEVELS
            .iter()
            .map(|(name, color)| (name.to_string(), LevelConfig::new(*color, true)))
            .collect();
        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }
}

impl Registry {
    /// Create a registry holding only the built-in levels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the config of `level`. Names are matched exactly.
    ///
    /// # Errors
    ///
    /// Return [`Error::UnknownLevel`] if no default or override is named `level`.
    pub fn resolve(&self, level: &str) -> Result<&LevelConfig, Error> {
        self.overrides
            .get(level)
            .or_else(|| self.defaults.get(level))
            .ok_or_else(|| Error::UnknownLevel {
                level: level.to_string(),
            })
    }

    /// Whether `level` resolves.
    pub fn contains(&self, level: &str) -> bool {
        self.overrides.contains_key(level) || self.defaults.contains_key(level)
    }

    /// Register a level, replacing any previous override of the same name.
    ///
    /// # Errors
    ///
    /// Return [`Error::InvalidConfig`] if the name is empty or contains a path separator, and
    /// [`Error::InvalidColor`] if the color does not resolve.
    pub fn add_config(&mut self, options: LevelOptions) -> Result<LevelHandle, Error> {
        let (level, config) = options.into_parts();
        if level.is_empty() {
            return Err(Error::InvalidConfig {
                reason: "level name must not be empty".to_string(),
            });
        }
        if level.contains(['/', '\\']) {
            return Err(Error::InvalidConfig {
                reason: format!("level name {level:?} must not contain a path separator"),
            });
        }
        config.color.resolve()?;

        self.overrides.insert(level.clone(), config);
        Ok(LevelHandle { level })
    }

    /// Remove the override named `level`, restoring the built-in default if there is one.
    ///
    /// Return whether an override was removed.
    pub fn remove_config(&mut self, level: &str) -> bool {
        self.overrides.remove(level).is_some()
    }

    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, level: &str, config: LevelConfig) {
        self.overrides.insert(level.to_string(), config);
    }

    /// The names of all effective levels, sorted.
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        let names: BTreeSet<&str> = self
            .defaults
            .keys()
            .chain(self.overrides.keys())
            .map(String::as_str)
            .collect();
        names.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorError;

    #[test]
    fn test_defaults() {
        let registry = Registry::new();
        for (name, color) in DEFAULT_LEVELS {
            let config = registry.resolve(name).unwrap();
            assert_eq!(config.color, ColorSpec::Hex(color.to_string()));
            assert!(config.write_to_file);
        }
        assert_eq!(registry.levels().count(), DEFAULT_LEVELS.len());
    }

    #[test]
    fn test_unknown_level() {
        let registry = Registry::new();
        let err = registry.resolve("doesNotExist").unwrap_err();
        assert!(matches!(err, Error::UnknownLevel { level } if level == "doesNotExist"));

        // matching is exact
        assert!(registry.resolve("INFO").is_err());
    }

    #[test]
    fn test_add_config_defaults() {
        let mut registry = Registry::new();
        let handle = registry.add_config(LevelOptions::new("custom")).unwrap();
        assert_eq!(handle.name(), "custom");

        let config = registry.resolve("custom").unwrap();
        assert_eq!(config.color, ColorSpec::Named("white".to_string()));
        assert!(!config.write_to_file);
    }

    #[test]
    fn test_override_and_remove() {
        let mut registry = Registry::new();
        registry
            .add_config(
                LevelOptions::new("debug")
                    .color("#000000")
                    .write_to_file(false),
            )
            .unwrap();
        let config = registry.resolve("debug").unwrap();
        assert_eq!(config.color, ColorSpec::Hex("#000000".to_string()));
        assert!(!config.write_to_file);

        assert!(registry.remove_config("debug"));
        let config = registry.resolve("debug").unwrap();
        assert_eq!(config.color, ColorSpec::Hex("#229500".to_string()));
        assert!(config.write_to_file);

        // defaults cannot be removed
        assert!(!registry.remove_config("debug"));
        assert!(registry.contains("debug"));
    }

    #[test]
    fn test_remove_custom_level() {
        let mut registry = Registry::new();
        registry.add_config(LevelOptions::new("custom")).unwrap();
        assert!(registry.remove_config("custom"));
        assert!(!registry.contains("custom"));
        assert!(!registry.remove_config("custom"));
    }

    #[test]
    fn test_invalid_configs() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.add_config(LevelOptions::new("")),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            registry.add_config(LevelOptions::new("../escape")),
            Err(Error::InvalidConfig { .. })
        ));
        assert!(matches!(
            registry.add_config(LevelOptions::new("rgbwith2values").color(vec![100, 100])),
            Err(Error::InvalidColor(ColorError::RgbLength { len: 2 }))
        ));
        assert!(matches!(
            registry.add_config(LevelOptions::new("#12G").color("#12G")),
            Err(Error::InvalidColor(ColorError::InvalidHex { .. }))
        ));
        assert!(!registry.contains("#12G"));
    }

    #[test]
    fn test_deserialize_level_config() {
        let config: LevelConfig =
            serde_json::from_str(r##"{"color": [1, 2, 3], "writeToFile": true}"##).unwrap();
        assert_eq!(config, LevelConfig::new([1, 2, 3], true));

        let config: LevelConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LevelConfig::new("white", false));
    }
}
