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

use colored::Colorize;

use crate::Error;
use crate::layout::Layout;
use crate::record::Record;

/// A layout that formats a record as optionally colored text.
///
/// Output format:
///
/// ```text
/// [INFO] [2024/08/11] : Hello info!
/// [DEBUG] [2024/08/11] : {"a":1}
/// [ERROR] [2024/08/11] : failed to load
///     caused by: disk on fire
/// ```
///
/// The whole line is painted with the level's color. The color is validated on every call,
/// even with [`no_color`](TextLayout::no_color) set, so a misconfigured level fails before
/// anything is written.
///
/// # Examples
///
/// ```
/// use levelforth::layout::TextLayout;
///
/// let layout = TextLayout::default().no_color();
/// ```
#[derive(Default, Debug, Clone)]
pub struct TextLayout {
    no_color: bool,
}

impl TextLayout {
    /// Disable colored output.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }
}

impl Layout for TextLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let color = record.config().color.resolve()?;

        let level = record.level().to_uppercase();
        let date = record.date();
        let text = record.console_text();
        let line = format!("[{level}] [{date}] : {text}");

        if self.no_color {
            Ok(line.into_bytes())
        } else {
            Ok(line.as_str().color(color).to_string().into_bytes())
        }
    }
}
