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

//! Levelforth is a level-based logger: every record is printed to the console in its level's
//! color, and levels configured to do so also append the record as a JSON line to a per-level,
//! per-day log file.
//!
//! # Overview
//!
//! A [`Logger`] owns a [`Registry`] of levels. The built-in levels are `info`, `warn`, `debug`,
//! `system`, `error`, `fatal`, `database` and `event`, all of which are persisted. New levels can
//! be added and built-in ones overridden at runtime with [`Logger::add_config`]; removing an
//! override restores the built-in level.
//!
//! Log files are named `{log_dir}/{level}-{YYYY-MM-DD}.log` and can be read back with
//! [`read_log`].
//!
//! # Examples
//!
//! ```no_run
//! use levelforth::LevelOptions;
//! use levelforth::LogOptions;
//! use serde_json::json;
//!
//! let mut logger = levelforth::builder().build().unwrap();
//!
//! logger.info("service started").unwrap();
//! logger
//!     .debug(LogOptions::new().payload(json!({"port": 8080})))
//!     .unwrap();
//!
//! let audit = logger
//!     .add_config(LevelOptions::new("audit").color("cyan").write_to_file(true))
//!     .unwrap();
//! logger.log_at(&audit, "user logged in").unwrap();
//!
//! let today = jiff::Zoned::now().strftime("%Y-%m-%d").to_string();
//! let records = levelforth::read_log("./logs", &format!("audit-{today}")).unwrap();
//! assert_eq!(records[0].level, "AUDIT");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod layout;
pub mod trap;

mod bridge;
mod clock;
mod color;
mod error;
mod level;
mod logger;
mod reader;
mod record;

pub use self::append::Append;
pub use self::color::ColorSpec;
pub use self::error::ColorError;
pub use self::error::Error;
pub use self::layout::Layout;
pub use self::level::DEFAULT_LEVELS;
pub use self::level::LevelConfig;
pub use self::level::LevelHandle;
pub use self::level::LevelOptions;
pub use self::level::Registry;
pub use self::logger::DEFAULT_LOG_DIR;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::logger::builder;
pub use self::reader::LogReader;
pub use self::reader::log_path;
pub use self::reader::read_log;
#[cfg(feature = "reader-async")]
pub use self::reader::read_log_async;
pub use self::record::ErrorInfo;
pub use self::record::LogOptions;
pub use self::record::Message;
pub use self::record::PersistedRecord;
pub use self::record::Record;
pub use self::trap::Trap;
