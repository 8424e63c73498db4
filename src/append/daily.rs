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

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::append::Append;
use crate::layout::JsonLayout;
use crate::layout::Layout;
use crate::record::Record;

/// An appender that writes each record to `{log_dir}/{level}-{YYYY-MM-DD}.log`.
///
/// The directory comes from the record, so each call may target a different one. A missing
/// directory is created, but its parent must exist. Each record is one line terminated by
/// `\r\n`; files are only ever appended to, and a new file starts with each calendar day.
#[derive(Debug)]
pub struct DailyFile {
    layout: Box<dyn Layout>,
}

impl Default for DailyFile {
    fn default() -> Self {
        Self {
            layout: Box::new(JsonLayout::default()),
        }
    }
}

impl DailyFile {
    /// Set the layout for the logs.
    ///
    /// Default to [`JsonLayout`].
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// The file a record is written to.
    pub fn filepath(record: &Record) -> PathBuf {
        let date = record.time().strftime("%Y-%m-%d");
        record
            .log_dir()
            .join(format!("{}-{date}.log", record.level()))
    }
}

fn ensure_dir(dir: &Path) -> Result<(), Error> {
    if dir.is_dir() {
        return Ok(());
    }
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        // lost a race with another writer
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(Error::Io {
            context: "create log directory",
            source: err,
        }),
    }
}

fn open_append(path: &Path) -> std::io::Result<fs::File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    options.open(path)
}

impl Append for DailyFile {
    fn append(&self, record: &Record) -> Result<(), Error> {
        ensure_dir(record.log_dir())?;

        let mut bytes = self.layout.format(record)?;
        bytes.extend_from_slice(b"\r\n");

        let path = Self::filepath(record);
        let mut file = open_append(&path).map_err(Error::io("open log file"))?;
        file.write_all(&bytes)
            .map_err(Error::io("append to log file"))?;
        Ok(())
    }
}
