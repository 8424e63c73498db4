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

use levelforth::ErrorInfo;
use levelforth::LevelOptions;
use levelforth::LogOptions;
use serde_json::json;

fn main() -> Result<(), levelforth::Error> {
    let mut logger = levelforth::builder().log_dir("logs").build()?;

    logger.info("Hello info!")?;
    logger.warn("Hello warn!")?;
    logger.database(LogOptions::new().payload(json!({"query": "SELECT 1", "rows": 1})))?;

    let audit = logger.add_config(
        LevelOptions::new("audit")
            .color([100, 149, 237])
            .write_to_file(true),
    )?;
    logger.log_at(&audit, "user alice logged in")?;

    // shadow the built-in debug level, then restore it
    logger.add_config(LevelOptions::new("debug").color("grey"))?;
    logger.debug("not persisted")?;
    logger.remove_config("debug");
    logger.debug("persisted again")?;

    let err = std::fs::read("does/not/exist").unwrap_err();
    logger.error(ErrorInfo::from(&err))?;

    Ok(())
}
