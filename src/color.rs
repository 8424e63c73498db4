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

//! Color specifications for levels.

use colored::Color;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ColorError;

/// The color of a level, as configured.
///
/// A color is one of:
///
/// * a hex string, `#` followed by 3 or 6 hex digits, e.g. `"#3AFF00"` or `"#fff"`;
/// * a named color, e.g. `"cyan"` or `"redBright"`;
/// * an RGB triple, e.g. `[100, 100, 100]`.
///
/// A `ColorSpec` is not validated on construction. Call [`ColorSpec::resolve`] to get the
/// terminal color or the reason it is invalid.
///
/// # Examples
///
/// ```
/// use colored::Color;
/// use levelforth::ColorSpec;
///
/// let color = ColorSpec::from("#abc");
/// assert_eq!(
///     color.resolve().unwrap(),
///     Color::TrueColor {
///         r: 0xaa,
///         g: 0xbb,
///         b: 0xcc
///     }
/// );
///
/// assert!(ColorSpec::from("#12345").resolve().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawColorSpec")]
pub enum ColorSpec {
    /// A `#`-prefixed hex string.
    Hex(String),
    /// A color name from the fixed palette.
    Named(String),
    /// RGB components. Kept as raw JSON values so that non-integer input can be reported.
    Rgb(Vec<Value>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColorSpec {
    Text(String),
    Rgb(Vec<Value>),
}

impl From<RawColorSpec> for ColorSpec {
    fn from(raw: RawColorSpec) -> Self {
        match raw {
            RawColorSpec::Text(text) => ColorSpec::from(text),
            RawColorSpec::Rgb(values) => ColorSpec::Rgb(values),
        }
    }
}

impl From<String> for ColorSpec {
    fn from(text: String) -> Self {
        if text.starts_with('#') {
            ColorSpec::Hex(text)
        } else {
            ColorSpec::Named(text)
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(text: &str) -> Self {
        ColorSpec::from(text.to_string())
    }
}

impl From<[u8; 3]> for ColorSpec {
    fn from([r, g, b]: [u8; 3]) -> Self {
        ColorSpec::Rgb(vec![r.into(), g.into(), b.into()])
    }
}

impl From<Vec<i64>> for ColorSpec {
    fn from(values: Vec<i64>) -> Self {
        ColorSpec::Rgb(values.into_iter().map(Value::from).collect())
    }
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Named("white".to_string())
    }
}

impl ColorSpec {
    /// Validate this color and convert it into a terminal color.
    ///
    /// # Errors
    ///
    /// Return a [`ColorError`] describing the first problem found.
    pub fn resolve(&self) -> Result<Color, ColorError> {
        match self {
            ColorSpec::Hex(hex) => resolve_hex(hex),
            ColorSpec::Rgb(values) => resolve_rgb(values),
            ColorSpec::Named(name) => resolve_name(name),
        }
    }
}

fn resolve_hex(hex: &str) -> Result<Color, ColorError> {
    let invalid = || ColorError::InvalidHex {
        value: hex.to_string(),
        len: hex.chars().count(),
    };

    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in digits.chars().enumerate() {
                rgb[i] = channel(&format!("{c}{c}"))?;
            }
            let [r, g, b] = rgb;
            Ok(Color::TrueColor { r, g, b })
        }
        6 => Ok(Color::TrueColor {
            r: channel(&digits[0..2])?,
            g: channel(&digits[2..4])?,
            b: channel(&digits[4..6])?,
        }),
        _ => Err(invalid()),
    }
}

fn resolve_rgb(values: &[Value]) -> Result<Color, ColorError> {
    if values.len() != 3 {
        return Err(ColorError::RgbLength { len: values.len() });
    }

    let mut rgb = [0u8; 3];
    for (index, value) in values.iter().enumerate() {
        let number = value
            .as_f64()
            .filter(|n| n.fract() == 0.0)
            .ok_or_else(|| ColorError::RgbType {
                index,
                value: value.to_string(),
            })?;
        if !(0.0..=255.0).contains(&number) {
            return Err(ColorError::RgbRange {
                index,
                value: value.to_string(),
            });
        }
        rgb[index] = number as u8;
    }

    let [r, g, b] = rgb;
    Ok(Color::TrueColor { r, g, b })
}

fn resolve_name(name: &str) -> Result<Color, ColorError> {
    let color = match name {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "blackBright" => Color::BrightBlack,
        "redBright" => Color::BrightRed,
        "greenBright" => Color::BrightGreen,
        "yellowBright" => Color::BrightYellow,
        "blueBright" => Color::BrightBlue,
        "magentaBright" => Color::BrightMagenta,
        "cyanBright" => Color::BrightCyan,
        "whiteBright" => Color::BrightWhite,
        _ => {
            return Err(ColorError::UnknownName {
                name: name.to_string(),
            });
        }
    };
    Ok(color)
}
