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

use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::LevelHandle;
use crate::LevelOptions;
use crate::Registry;
use crate::Trap;
use crate::append::Append;
use crate::append::DailyFile;
use crate::clock::Clock;
use crate::record::LogOptions;
use crate::record::Record;

/// The directory log files go to unless a call or the builder says otherwise.
pub const DEFAULT_LOG_DIR: &str = "./logs";

const DEFAULT_LEVEL: &str = "info";

/// A logger dispatching records to the console and to per-level daily files.
///
/// Every call renders one line on the console. If the level's config has `write_to_file`
/// set, the record is also appended to `{log_dir}/{level}-{YYYY-MM-DD}.log`.
///
/// Create one with [`builder`](crate::builder).
#[derive(Debug)]
pub struct Logger {
    pub(super) registry: Registry,
    pub(super) console: Box<dyn Append>,
    pub(super) file: DailyFile,
    pub(super) log_dir: PathBuf,
    pub(super) clock: Clock,
    pub(super) trap: Box<dyn Trap>,
}

macro_rules! level_fns {
    ($($(#[$attr:meta])* $name:ident => $level:literal;)*) => {
        $(
            $(#[$attr])*
            pub fn $name(&self, options: impl Into<LogOptions>) -> Result<(), Error> {
                self.dispatch(options.into().level($level))
            }
        )*
    };
}

impl Logger {
    /// Log a record.
    ///
    /// The level defaults to `info`. A payload takes precedence over a message.
    ///
    /// # Errors
    ///
    /// Return an error if:
    ///
    /// * `options` is `None` ([`Error::MissingOptions`]);
    /// * the level does not resolve ([`Error::UnknownLevel`]);
    /// * the level's color is invalid ([`Error::InvalidColor`]), in which case nothing is
    ///   written;
    /// * writing to the console or the log file fails.
    pub fn log(&self, options: Option<LogOptions>) -> Result<(), Error> {
        let options = options.ok_or(Error::MissingOptions)?;
        self.dispatch(options)
    }

    /// Log a record at a level registered with [`add_config`](Logger::add_config).
    pub fn log_at(
        &self,
        level: &LevelHandle,
        options: impl Into<LogOptions>,
    ) -> Result<(), Error> {
        self.dispatch(options.into().level(level.name()))
    }

    level_fns! {
        /// Log at the `info` level.
        info => "info";
        /// Log at the `debug` level.
        debug => "debug";
        /// Log at the `system` level.
        system => "system";
        /// Log at the `database` level.
        database => "database";
        /// Log at the `event` level.
        event => "event";
        /// Log at the `warn` level.
        warn => "warn";
        /// Log at the `error` level.
        ///
        /// Pass an [`ErrorInfo`](crate::ErrorInfo) to log an error: its message and stack are
        /// printed on the console and its message is persisted.
        error => "error";
        /// Log at the `fatal` level.
        ///
        /// Accepts an [`ErrorInfo`](crate::ErrorInfo) like [`error`](Logger::error).
        fatal => "fatal";
    }

    /// Register or replace a level. See [`Registry::add_config`].
    pub fn add_config(&mut self, options: LevelOptions) -> Result<LevelHandle, Error> {
        self.registry.add_config(options)
    }

    /// Remove a registered level. See [`Registry::remove_config`].
    pub fn remove_config(&mut self, level: &str) -> bool {
        self.registry.remove_config(level)
    }

    /// The levels this logger knows.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The directory log files go to when a call does not set one.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Flush the console.
    pub fn flush(&self) -> Result<(), Error> {
        self.console.flush()
    }

    pub(crate) fn trap(&self, err: &Error) {
        self.trap.trap(err);
    }

    fn dispatch(&self, mut options: LogOptions) -> Result<(), Error> {
        let level = options
            .level
            .take()
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
        let config = self.registry.resolve(&level)?;
        let message = options.take_message();
        let log_dir = options.log_dir.as_deref().unwrap_or(&self.log_dir);
        let now = self.clock.now();

        let record = Record {
            level: &level,
            config,
            message: &message,
            error: options.error.as_ref(),
            log_dir,
            now: &now,
        };

        self.console.append(&record)?;
        if config.write_to_file {
            self.file.append(&record)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::str::FromStr;

    use jiff::Zoned;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::ColorError;
    use crate::ErrorInfo;
    use crate::append::Testing;
    use crate::clock::ManualClock;
    use crate::read_log;

    struct Fixture {
        logger: Logger,
        console: Testing,
        temp_dir: TempDir,
    }

    fn fixture() -> Fixture {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let console = Testing::default();
        let now = Zoned::from_str("2024-08-10T17:12:52+08[+08]").unwrap();
        let logger = crate::builder()
            .console(console.clone())
            .log_dir(temp_dir.path().join("logs"))
            .clock(Clock::ManualClock(ManualClock::new(now)))
            .build()
            .unwrap();
        Fixture {
            logger,
            console,
            temp_dir,
        }
    }

    fn log_files(dir: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(dir) else {
            return vec![];
        };
        let mut files = entries
            .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
            .collect::<Vec<_>>();
        files.sort();
        files
    }

    #[test]
    fn test_missing_options() {
        let f = fixture();
        assert!(matches!(f.logger.log(None), Err(Error::MissingOptions)));
        assert!(f.console.lines().is_empty());
    }

    #[test]
    fn test_unknown_level() {
        let f = fixture();
        let err = f
            .logger
            .log(Some(LogOptions::new().level("doesNotExist").message("x")))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownLevel { level } if level == "doesNotExist"));
        assert!(f.console.lines().is_empty());
    }

    #[test]
    fn test_default_level_is_info() {
        let f = fixture();
        f.logger.log(Some(LogOptions::new().message("hi"))).unwrap();
        assert_eq!(f.console.lines(), vec!["[INFO] [2024/08/10] : hi"]);
        assert_eq!(
            log_files(&f.temp_dir.path().join("logs")),
            vec!["info-2024-08-10.log"]
        );
    }

    #[test]
    fn test_every_builtin_level_writes_console_and_file() {
        let f = fixture();
        let log_dir = f.temp_dir.path().join("logs");
        let wrappers: [fn(&Logger, LogOptions) -> Result<(), Error>; 8] = [
            |l, o| l.debug(o),
            |l, o| l.info(o),
            |l, o| l.system(o),
            |l, o| l.database(o),
            |l, o| l.event(o),
            |l, o| l.warn(o),
            |l, o| l.error(o),
            |l, o| l.fatal(o),
        ];
        for wrapper in wrappers {
            wrapper(&f.logger, LogOptions::new().message("test message")).unwrap();
        }

        assert_eq!(f.console.lines().len(), 8);
        let files = log_files(&log_dir);
        assert_eq!(files.len(), 8);
        for file in files {
            let content = fs::read_to_string(log_dir.join(&file)).unwrap();
            assert_eq!(content.matches("\r\n").count(), 1, "{file}");
        }
    }

    #[test]
    fn test_log_dir_override() {
        let f = fixture();
        let dir = f.temp_dir.path().join("tempLogDir");
        f.logger
            .debug(LogOptions::new().message("Testing Debug Log").log_dir(&dir))
            .unwrap();
        assert_eq!(log_files(&dir), vec!["debug-2024-08-10.log"]);
        assert!(log_files(&f.temp_dir.path().join("logs")).is_empty());
    }

    #[test]
    fn test_custom_levels() {
        let mut f = fixture();
        let log_dir = f.temp_dir.path().join("logs");

        let c1 = f
            .logger
            .add_config(
                LevelOptions::new("custom1")
                    .color([100, 100, 100])
                    .write_to_file(false),
            )
            .unwrap();
        let c2 = f
            .logger
            .add_config(
                LevelOptions::new("custom2")
                    .color("#123456")
                    .write_to_file(false),
            )
            .unwrap();
        let c3 = f
            .logger
            .add_config(
                LevelOptions::new("custom3")
                    .color("cyan")
                    .write_to_file(true),
            )
            .unwrap();

        f.logger.log_at(&c2, "test 1").unwrap();
        assert_eq!(f.console.lines(), vec!["[CUSTOM2] [2024/08/10] : test 1"]);
        assert!(log_files(&log_dir).is_empty());

        f.logger
            .log_at(&c3, LogOptions::new().payload(json!({"a": 1})))
            .unwrap();
        assert_eq!(
            f.console.lines()[1],
            r#"[CUSTOM3] [2024/08/10] : {"a":1}"#
        );
        let records = read_log(&log_dir, "custom3-2024-08-10").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, "CUSTOM3");
        assert_eq!(records[0].message, r#"{"a":1}"#);

        f.logger.log_at(&c1, "test 5").unwrap();
        assert_eq!(f.console.lines().len(), 3);
        assert_eq!(log_files(&log_dir), vec!["custom3-2024-08-10.log"]);
    }

    #[test]
    fn test_override_then_remove_default() {
        let mut f = fixture();
        let log_dir = f.temp_dir.path().join("logs");

        f.logger
            .add_config(
                LevelOptions::new("debug")
                    .color("#000000")
                    .write_to_file(false),
            )
            .unwrap();
        f.logger.debug("test 3").unwrap();
        assert!(log_files(&log_dir).is_empty());

        assert!(f.logger.remove_config("debug"));
        f.logger.debug("test 4").unwrap();
        assert_eq!(log_files(&log_dir), vec!["debug-2024-08-10.log"]);
        assert_eq!(
            f.console.lines(),
            vec![
                "[DEBUG] [2024/08/10] : test 3",
                "[DEBUG] [2024/08/10] : test 4"
            ]
        );
    }

    #[test]
    fn test_removed_custom_level_no_longer_resolves() {
        let mut f = fixture();
        let handle = f.logger.add_config(LevelOptions::new("custom")).unwrap();
        assert!(f.logger.remove_config("custom"));
        assert!(matches!(
            f.logger.log_at(&handle, "gone"),
            Err(Error::UnknownLevel { .. })
        ));
    }

    #[test]
    fn test_error_slot() {
        let f = fixture();
        let log_dir = f.temp_dir.path().join("logs");
        f.logger
            .error(ErrorInfo::new("boom", "    at main"))
            .unwrap();
        assert_eq!(
            f.console.lines(),
            vec!["[ERROR] [2024/08/10] : boom\n    at main"]
        );
        let records = read_log(&log_dir, "error-2024-08-10.log").unwrap();
        assert_eq!(records[0].message, "boom");
    }

    #[test]
    fn test_invalid_color_aborts_before_output() {
        let mut f = fixture();
        let log_dir = f.temp_dir.path().join("logs");
        f.logger
            .registry
            .insert_unchecked("broken", crate::LevelConfig::new(vec![1, 2, 3, 4], true));

        let err = f
            .logger
            .log(Some(LogOptions::new().level("broken").message("x")))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidColor(ColorError::RgbLength { len: 4 })
        ));
        assert!(f.console.lines().is_empty());
        assert!(log_files(&log_dir).is_empty());
    }
}
