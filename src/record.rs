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

//! Log entries and the records derived from them.

use std::error::Error as StdError;
use std::fmt::Write;
use std::path::Path;
use std::path::PathBuf;

use jiff::Zoned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::LevelConfig;

/// The body of a log entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Literal text.
    Text(String),
    /// A structured value, logged as compact JSON.
    Structured(Value),
}

impl Message {
    /// The text form of the message. Structured values are serialized as compact JSON.
    pub fn to_text(&self) -> String {
        match self {
            Message::Text(text) => text.clone(),
            Message::Structured(value) => value.to_string(),
        }
    }
}

/// An error attached to a log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    /// The error message.
    pub message: String,
    /// The trace printed after the message on the console.
    pub stack: String,
}

impl ErrorInfo {
    /// Create an error info from its parts.
    pub fn new(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: stack.into(),
        }
    }

    /// Capture an [`anyhow::Error`], using its debug rendering (causes and, when captured,
    /// the backtrace) as the stack.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        Self {
            message: err.to_string(),
            stack: format!("{err:?}"),
        }
    }
}

impl<E: StdError + ?Sized> From<&E> for ErrorInfo {
    fn from(err: &E) -> Self {
        let mut stack = String::new();
        let mut source = err.source();
        while let Some(err) = source {
            if !stack.is_empty() {
                stack.push('\n');
            }
            // SAFETY: write to a string always succeeds
            write!(&mut stack, "    caused by: {err}").unwrap();
            source = err.source();
        }
        Self {
            message: err.to_string(),
            stack,
        }
    }
}

/// The options of one log call.
///
/// # Examples
///
/// ```
/// use levelforth::LogOptions;
/// use serde_json::json;
///
/// let options = LogOptions::new().level("debug").message("hello");
/// let options = LogOptions::new().payload(json!({"a": 1})).log_dir("tempLogDir");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub(crate) level: Option<String>,
    pub(crate) message: Option<String>,
    pub(crate) payload: Option<Value>,
    pub(crate) error: Option<ErrorInfo>,
    pub(crate) log_dir: Option<PathBuf>,
}

impl LogOptions {
    /// Create empty options. The level defaults to `info` and the message to an empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level name.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Set a text message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set a structured payload. It takes precedence over [`message`](LogOptions::message).
    pub fn payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Attach an error. On the console its message and stack replace the message; the file
    /// record stores only its message.
    pub fn error(mut self, error: impl Into<ErrorInfo>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Override the directory log files are written to.
    pub fn log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    pub(crate) fn take_message(&mut self) -> Message {
        match (self.payload.take(), self.message.take()) {
            (Some(payload), _) => Message::Structured(payload),
            (None, message) => Message::Text(message.unwrap_or_default()),
        }
    }
}

impl From<&str> for LogOptions {
    fn from(message: &str) -> Self {
        LogOptions::new().message(message)
    }
}

impl From<String> for LogOptions {
    fn from(message: String) -> Self {
        LogOptions::new().message(message)
    }
}

impl From<ErrorInfo> for LogOptions {
    fn from(error: ErrorInfo) -> Self {
        LogOptions::new().error(error)
    }
}

/// A resolved log entry, handed to appenders and layouts.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub(crate) level: &'a str,
    pub(crate) config: &'a LevelConfig,
    pub(crate) message: &'a Message,
    pub(crate) error: Option<&'a ErrorInfo>,
    pub(crate) log_dir: &'a Path,
    pub(crate) now: &'a Zoned,
}

impl<'a> Record<'a> {
    /// The level name, as registered.
    pub fn level(&self) -> &'a str {
        self.level
    }

    /// The config the level resolved to.
    pub fn config(&self) -> &'a LevelConfig {
        self.config
    }

    /// The message body.
    pub fn message(&self) -> &'a Message {
        self.message
    }

    /// The attached error, if any.
    pub fn error(&self) -> Option<&'a ErrorInfo> {
        self.error
    }

    /// The directory this record's log file lives in.
    pub fn log_dir(&self) -> &'a Path {
        self.log_dir
    }

    /// The observed time.
    pub fn time(&self) -> &'a Zoned {
        self.now
    }

    /// The date of the record formatted as `YYYY/MM/DD`.
    pub fn date(&self) -> String {
        self.now.strftime("%Y/%m/%d").to_string()
    }

    /// The text shown on the console: the error's message and stack if present, otherwise
    /// the message.
    pub fn console_text(&self) -> String {
        match self.error {
            Some(error) => format!("{}\n{}", error.message, error.stack),
            None => self.message.to_text(),
        }
    }

    /// The text stored in the log file: the error's message if present, otherwise the
    /// message.
    pub fn file_text(&self) -> String {
        match self.error {
            Some(error) => error.message.clone(),
            None => self.message.to_text(),
        }
    }
}

/// One line of a log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    /// The uppercased level name.
    pub level: String,
    /// The message; structured payloads are stored as their JSON text.
    pub message: String,
    /// The date the record was written, as `YYYY/MM/DD`.
    pub timestamp: String,
}

impl PersistedRecord {
    pub(crate) fn from_record(record: &Record) -> Self {
        Self {
            level: record.level().to_uppercase(),
            message: record.file_text(),
            timestamp: record.date(),
        }
    }
}
