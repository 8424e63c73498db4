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

use crate::Error;
use crate::layout::Layout;
use crate::record::PersistedRecord;
use crate::record::Record;

/// A JSON layout for persisted records.
///
/// Output format:
///
/// ```json
/// {"level":"DEBUG","message":"Testing Debug Log","timestamp":"2024/08/11"}
/// {"level":"DEBUG","message":"{\"a\":1}","timestamp":"2024/08/11"}
/// ```
///
/// Structured payloads are stored as their JSON text, so `message` is always a string.
#[derive(Default, Debug, Clone)]
#[non_exhaustive]
pub struct JsonLayout {}

impl Layout for JsonLayout {
    fn format(&self, record: &Record) -> Result<Vec<u8>, Error> {
        let line = PersistedRecord::from_record(record);
        Ok(serde_json::to_vec(&line)?)
    }
}
