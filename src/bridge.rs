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

//! Bridge from the `log` crate facade.

use crate::Logger;
use crate::record::LogOptions;

impl Logger {
    /// The level a `log` crate record is dispatched to.
    ///
    /// A target naming a known level wins, so `log::info!(target: "database", ...)` goes to the
    /// `database` level. Otherwise the severity picks one of the built-in levels.
    pub fn level_for(&self, metadata: &log::Metadata) -> String {
        let target = metadata.target();
        if self.registry().contains(target) {
            return target.to_string();
        }

        let level = match metadata.level() {
            log::Level::Error => "error",
            log::Level::Warn => "warn",
            log::Level::Info => "info",
            log::Level::Debug | log::Level::Trace => "debug",
        };
        level.to_string()
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.registry().contains(&self.level_for(metadata))
    }

    fn log(&self, record: &log::Record) {
        let options = LogOptions::new()
            .level(self.level_for(record.metadata()))
            .message(record.args().to_string());
        if let Err(err) = Logger::log(self, Some(options)) {
            self.trap(&err);
        }
    }

    fn flush(&self) {
        if let Err(err) = Logger::flush(self) {
            self.trap(&err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;
    use std::sync::Mutex;

    use jiff::Zoned;
    use log::Log;
    use tempfile::TempDir;

    use super::*;
    use crate::Error;
    use crate::LevelOptions;
    use crate::Trap;
    use crate::append::Testing;
    use crate::clock::Clock;
    use crate::clock::ManualClock;

    #[derive(Debug, Clone, Default)]
    struct CollectTrap(Arc<Mutex<Vec<String>>>);

    impl Trap for CollectTrap {
        fn trap(&self, err: &Error) {
            self.0.lock().unwrap().push(err.to_string());
        }
    }

    fn logger(temp_dir: &TempDir, console: &Testing, trap: &CollectTrap) -> Logger {
        let now = Zoned::from_str("2024-08-10T17:12:52+08[+08]").unwrap();
        crate::builder()
            .console(console.clone())
            .log_dir(temp_dir.path().join("logs"))
            .trap(trap.clone())
            .level(LevelOptions::new("audit").write_to_file(false))
            .clock(Clock::ManualClock(ManualClock::new(now)))
            .build()
            .unwrap()
    }

    #[test]
    fn test_severity_and_target_mapping() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let console = Testing::default();
        let trap = CollectTrap::default();
        let logger = logger(&temp_dir, &console, &trap);

        let records = [
            (log::Level::Warn, "app", "low disk"),
            (log::Level::Trace, "app", "tick"),
            (log::Level::Info, "audit", "login"),
        ];
        for (level, target, message) in records {
            Log::log(
                &logger,
                &log::Record::builder()
                    .level(level)
                    .target(target)
                    .args(format_args!("{message}"))
                    .build(),
            );
        }

        assert_eq!(
            console.lines(),
            vec![
                "[WARN] [2024/08/10] : low disk",
                "[DEBUG] [2024/08/10] : tick",
                "[AUDIT] [2024/08/10] : login",
            ]
        );
        assert!(trap.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failures_go_to_trap() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let console = Testing::default();
        let trap = CollectTrap::default();
        // the parent of the log directory does not exist
        let now = Zoned::from_str("2024-08-10T17:12:52+08[+08]").unwrap();
        let logger = crate::builder()
            .console(console.clone())
            .log_dir(temp_dir.path().join("missing").join("logs"))
            .trap(trap.clone())
            .clock(Clock::ManualClock(ManualClock::new(now)))
            .build()
            .unwrap();

        Log::log(
            &logger,
            &log::Record::builder()
                .level(log::Level::Error)
                .args(format_args!("boom"))
                .build(),
        );

        assert_eq!(console.lines().len(), 1);
        let trapped = trap.0.lock().unwrap();
        assert_eq!(trapped.len(), 1);
        assert!(trapped[0].starts_with("failed to create log directory"));
    }
}
