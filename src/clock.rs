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
use jiff::tz::TimeZone;

#[derive(Debug)]
pub enum Clock {
    DefaultClock(TimeZone),
    #[cfg(test)]
    ManualClock(ManualClock),
}

impl Default for Clock {
    fn default() -> Self {
        Clock::DefaultClock(TimeZone::system())
    }
}

impl Clock {
    pub fn now(&self) -> Zoned {
        match self {
            Clock::DefaultClock(tz) => Zoned::now().with_time_zone(tz.clone()),
            #[cfg(test)]
            Clock::ManualClock(clock) => clock.now(),
        }
    }
}

#[derive(Debug)]
#[cfg(test)]
pub struct ManualClock {
    now: Zoned,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(now: Zoned) -> ManualClock {
        ManualClock { now }
    }

    fn now(&self) -> Zoned {
        self.now.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_manual_clock() {
        let now = Zoned::from_str("2024-08-10T17:12:52+08[+08]").unwrap();
        let clock = Clock::ManualClock(ManualClock::new(now.clone()));
        assert_eq!(clock.now(), now);
        assert_eq!(clock.now().strftime("%Y/%m/%d").to_string(), "2024/08/10");
    }

    #[test]
    fn test_default_clock_uses_timezone() {
        let clock = Clock::DefaultClock(TimeZone::UTC);
        assert_eq!(clock.now().offset(), jiff::tz::Offset::UTC);
    }
}
