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

use std::io;
use std::path::PathBuf;

/// The error type of levelforth.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// `log` was called without any options.
    #[error("no log options given; pass at least a message or a payload")]
    MissingOptions,
    /// The requested level is neither a built-in level nor a registered override.
    #[error(
        "level {level:?} was not found in the configuration; use a valid level or register it with `add_config`"
    )]
    UnknownLevel { level: String },
    /// A level configuration was rejected.
    #[error("invalid level configuration: {reason}")]
    InvalidConfig { reason: String },
    /// A level color failed validation.
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorError),
    /// A log file could not be opened or read.
    #[error("failed to read log file {}: {source}", .path.display())]
    FileRead { path: PathBuf, source: io::Error },
    /// A line of a log file is not a valid record.
    #[error("failed to parse record at {}:{line}: {source}", .path.display())]
    RecordParse {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
    /// Writing to the console or to a log file failed.
    #[error("failed to {context}: {source}")]
    Io {
        context: &'static str,
        source: io::Error,
    },
    /// A payload or record could not be serialized.
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(context: &'static str) -> impl FnOnce(io::Error) -> Error {
        move |source| Error::Io { context, source }
    }
}

/// The ways a color specification can be invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// A `#`-prefixed string that is not 3 or 6 hex digits.
    #[error(
        "hex color {value:?} has length {len}; expected `#` followed by 3 or 6 hex digits"
    )]
    InvalidHex { value: String, len: usize },
    /// An RGB list without exactly three components.
    #[error("{}", rgb_length_message(.len))]
    RgbLength { len: usize },
    /// An RGB component that is not an integer.
    #[error("rgb component {index} must be an integer, got {value}")]
    RgbType { index: usize, value: String },
    /// An RGB component outside of `0..=255`.
    #[error("rgb component {index} must be in 0..=255, got {value}")]
    RgbRange { index: usize, value: String },
    /// A color name outside of the known palette.
    #[error("unknown color name {name:?}")]
    UnknownName { name: String },
}

fn rgb_length_message(len: &usize) -> String {
    let len = *len;
    let (verb, diff) = if len > 3 {
        ("remove", len - 3)
    } else {
        ("add", 3 - len)
    };
    format!("an rgb color needs 3 values but {len} were given; please {verb} {diff}")
}
