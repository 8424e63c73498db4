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

//! Read log files back into records.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Lines;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::record::PersistedRecord;

/// The path of `file_name` in `log_dir`, with `.log` appended if it has no `.` in it.
pub fn log_path(log_dir: impl AsRef<Path>, file_name: &str) -> PathBuf {
    if file_name.contains('.') {
        log_dir.as_ref().join(file_name)
    } else {
        log_dir.as_ref().join(format!("{file_name}.log"))
    }
}

fn parse_line(path: &Path, number: usize, line: &str) -> Result<PersistedRecord, Error> {
    serde_json::from_str(line).map_err(|source| Error::RecordParse {
        path: path.to_path_buf(),
        line: number,
        source,
    })
}

/// A lazy reader over the records of one log file.
///
/// Every line must be a record, blank lines included. The reader is fused after the first
/// error.
#[derive(Debug)]
pub struct LogReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line: usize,
    failed: bool,
}

impl LogReader {
    /// Open `file_name` in `log_dir`. See [`log_path`] for how the file name is completed.
    ///
    /// # Errors
    ///
    /// Return [`Error::FileRead`] if the file cannot be opened.
    pub fn open(log_dir: impl AsRef<Path>, file_name: &str) -> Result<Self, Error> {
        let path = log_path(log_dir, file_name);
        let file = File::open(&path).map_err(|source| Error::FileRead {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            line: 0,
            failed: false,
        })
    }

    /// The path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for LogReader {
    type Item = Result<PersistedRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(source) => {
                self.failed = true;
                return Some(Err(Error::FileRead {
                    path: self.path.clone(),
                    source,
                }));
            }
        };
        self.line += 1;

        let record = parse_line(&self.path, self.line, &line);
        self.failed = record.is_err();
        Some(record)
    }
}

/// Read all records of `file_name` in `log_dir`, in file order.
///
/// # Errors
///
/// Return [`Error::FileRead`] if the file is missing or unreadable, and
/// [`Error::RecordParse`] at the first line that is not a valid record; no records are
/// returned in either case.
///
/// # Examples
///
/// ```no_run
/// let records = levelforth::read_log("./logs", "debug-2024-08-11").unwrap();
/// for record in records {
///     println!("{} {}", record.timestamp, record.message);
/// }
/// ```
pub fn read_log(log_dir: impl AsRef<Path>, file_name: &str) -> Result<Vec<PersistedRecord>, Error> {
    LogReader::open(log_dir, file_name)?.collect()
}

/// Read all records of `file_name` in `log_dir` without blocking the async runtime.
///
/// Same contract as [`read_log`].
#[cfg(feature = "reader-async")]
pub async fn read_log_async(
    log_dir: impl AsRef<Path>,
    file_name: &str,
) -> Result<Vec<PersistedRecord>, Error> {
    use tokio::io::AsyncBufReadExt;

    let path = log_path(log_dir, file_name);
    let read_error = |source| Error::FileRead {
        path: path.clone(),
        source,
    };

    let file = tokio::fs::File::open(&path).await.map_err(read_error)?;
    let mut lines = tokio::io::BufReader::new(file).lines();
    let mut records = vec![];
    let mut number = 0;
    while let Some(line) = lines.next_line().await.map_err(read_error)? {
        number += 1;
        records.push(parse_line(&path, number, &line)?);
    }
    Ok(records)
}
