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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::append::Append;
use crate::layout::Layout;
use crate::layout::TextLayout;
use crate::record::Record;

/// An appender that keeps formatted lines in memory, for tests.
///
/// Clones share the same buffer, so keep one clone to inspect what the logger wrote.
///
/// # Examples
///
/// ```
/// use levelforth::LogOptions;
/// use levelforth::append::Testing;
///
/// let console = Testing::default();
/// let logger = levelforth::builder().console(console.clone()).build().unwrap();
/// logger.system(LogOptions::new().message("booted").log_dir(std::env::temp_dir())).unwrap();
/// assert_eq!(console.lines().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Testing {
    layout: Arc<dyn Layout>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl Default for Testing {
    fn default() -> Self {
        Self {
            layout: Arc::new(TextLayout::default().no_color()),
            lines: Arc::new(Mutex::new(vec![])),
        }
    }
}

impl Testing {
    /// Set the layout for the [`Testing`] appender.
    ///
    /// Default to [`TextLayout`] without color.
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = Arc::from(layout.into());
        self
    }

    /// The lines appended so far.
    pub fn lines(&self) -> Vec<String> {
        self.buffer().clone()
    }

    /// Drop all captured lines.
    pub fn clear(&self) {
        self.buffer().clear();
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Append for Testing {
    fn append(&self, record: &Record) -> Result<(), Error> {
        let bytes = self.layout.format(record)?;
        let line = String::from_utf8_lossy(&bytes).into_owned();
        self.buffer().push(line);
        Ok(())
    }
}
