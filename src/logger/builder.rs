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

use std::collections::BTreeMap;
use std::path::PathBuf;

use jiff::tz::TimeZone;
use serde::Deserialize;

use crate::Error;
use crate::LevelConfig;
use crate::LevelOptions;
use crate::Logger;
use crate::Registry;
use crate::Trap;
use crate::append::Append;
use crate::append::DailyFile;
use crate::append::Stdout;
use crate::clock::Clock;
use crate::layout::TextLayout;
use crate::logger::DEFAULT_LOG_DIR;
use crate::trap::DefaultTrap;

/// Create a new empty [`LoggerBuilder`] instance for configuring a logger.
///
/// # Examples
///
/// ```
/// let logger = levelforth::builder().log_dir("logs").build().unwrap();
/// ```
pub fn builder() -> LoggerBuilder {
    LoggerBuilder {
        levels: vec![],
        console: Box::new(Stdout::default()),
        log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        clock: Clock::default(),
        trap: Box::new(DefaultTrap::default()),
    }
}

/// A builder for configuring the logger.
#[must_use = "call `apply` to set the global logger or `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    // registered on build, after validation
    levels: Vec<LevelOptions>,
    console: Box<dyn Append>,
    log_dir: PathBuf,
    clock: Clock,
    trap: Box<dyn Trap>,
}

#[derive(Deserialize)]
struct LevelsDocument {
    levels: BTreeMap<String, LevelConfig>,
}

impl LoggerBuilder {
    /// Set the directory log files are written to when a call does not set one.
    ///
    /// Default to `./logs`.
    pub fn log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    /// Set the console appender.
    ///
    /// Default to [`Stdout`] with a colored [`TextLayout`].
    pub fn console(mut self, console: impl Into<Box<dyn Append>>) -> Self {
        self.console = console.into();
        self
    }

    /// Print to stdout without colors. Replaces any console appender set before.
    pub fn no_color(mut self) -> Self {
        self.console = Box::new(Stdout::default().with_layout(TextLayout::default().no_color()));
        self
    }

    /// Set the timezone dates are computed in.
    ///
    /// Default to the system timezone.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    ///
    /// let builder = levelforth::builder().timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.clock = Clock::DefaultClock(tz);
        self
    }

    /// Set the trap for errors raised by records from the `log` crate facade.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Register a level on build.
    pub fn level(mut self, options: LevelOptions) -> Self {
        self.levels.push(options);
        self
    }

    /// Register the levels of a JSON document on build.
    ///
    /// The document has the shape `{"levels": {"<name>": {"color": ..., "writeToFile": ...}}}`.
    ///
    /// # Errors
    ///
    /// Return [`Error::Serialize`] if the document does not have that shape.
    ///
    /// # Examples
    ///
    /// ```
    /// let logger = levelforth::builder()
    ///     .levels_from_json(r##"{"levels": {"audit": {"color": "#123456", "writeToFile": true}}}"##)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    /// assert!(logger.registry().contains("audit"));
    /// ```
    pub fn levels_from_json(mut self, json: &str) -> Result<Self, Error> {
        let document: LevelsDocument = serde_json::from_str(json)?;
        for (name, config) in document.levels {
            let options = LevelOptions::new(name)
                .color(config.color)
                .write_to_file(config.write_to_file);
            self.levels.push(options);
        }
        Ok(self)
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the [`Logger`].
    ///
    /// # Errors
    ///
    /// Return an error if a level registered with [`level`](LoggerBuilder::level) or
    /// [`levels_from_json`](LoggerBuilder::levels_from_json) is invalid.
    pub fn build(self) -> Result<Logger, Error> {
        let LoggerBuilder {
            levels,
            console,
            log_dir,
            clock,
            trap,
        } = self;

        let mut registry = Registry::new();
        for options in levels {
            registry.add_config(options)?;
        }

        Ok(Logger {
            registry,
            console,
            file: DailyFile::default(),
            log_dir,
            clock,
            trap,
        })
    }

    /// Build the logger and set it up as the `log` crate's global logger.
    ///
    /// Records from `log::info!` and friends are dispatched to the level named by their target if
    /// there is one, otherwise to the level matching their severity. The registry can no longer
    /// be changed afterwards.
    ///
    /// # Errors
    ///
    /// Return an error if a level is invalid or a global logger has already been set.
    pub fn try_apply(self) -> Result<(), anyhow::Error> {
        let logger = self.build()?;
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    /// Build the logger and set it up as the `log` crate's global logger.
    ///
    /// # Panics
    ///
    /// Panic if a level is invalid or the global logger has already been set.
    pub fn apply(self) {
        self.try_apply()
            .expect("LoggerBuilder::apply must be called before the global logger initialized");
    }
}
