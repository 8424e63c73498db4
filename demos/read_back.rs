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

use jiff::Zoned;
use levelforth::LogReader;

fn main() -> Result<(), levelforth::Error> {
    let logger = levelforth::builder().log_dir("logs").build()?;
    for i in 0..3 {
        logger.debug(format!("Hello debug {i}!"))?;
    }

    let file_name = format!("debug-{}", Zoned::now().strftime("%Y-%m-%d"));
    for record in LogReader::open(logger.log_dir(), &file_name)? {
        let record = record?;
        println!("{} {} {}", record.timestamp, record.level, record.message);
    }

    Ok(())
}
