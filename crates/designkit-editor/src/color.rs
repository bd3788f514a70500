//! CSS colour parsing and formatting.
//!
//! Accepts the notations the editor's pickers produce: `#rgb`, `#rrggbb`,
//! `#rrggbbaa`, `rgb()`, `rgba()`, `transparent` and a handful of names.

use std::fmt;
use std::str::FromStr;

use designkit_core::StyleError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn parse(value: &str) -> Result<Self, StyleError> {
        let invalid = || StyleError::InvalidColor {
            value: value.to_string(),
        };
        let s = value.trim().to_ascii_lowercase();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(invalid);
        }
        if let Some(body) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_functional(body).ok_or_else(invalid);
        }
        Self::named(&s).ok_or_else(invalid)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    out[i] = v * 17;
                }
                Some(Self::rgb(out[0], out[1], out[2]))
            }
            6 | 8 => {
                let r = channel(hex.get(0..2)?)?;
                let g = channel(hex.get(2..4)?)?;
                let b = channel(hex.get(4..6)?)?;
                let a = match hex.get(6..8) {
                    Some(a) => channel(a)? as f64 / 255.0,
                    None => 1.0,
                };
                Some(Self::rgba(r, g, b, a))
            }
            _ => None,
        }
    }

    fn parse_functional(body: &str) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let v: f64 = s.parse().ok()?;
            Some(v.round().clamp(0.0, 255.0) as u8)
        };
        let a = match parts.get(3) {
            Some(a) => a.parse::<f64>().ok()?.clamp(0.0, 1.0),
            None => 1.0,
        };
        Some(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            a,
        ))
    }

    fn named(name: &str) -> Option<Self> {
        let c = match name {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            _ => return None,
        };
        Some(c)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, a)` with the spacing the colour pickers emit.
    pub fn to_rgba_string(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`.
    pub fn interpolate(&self, other: &Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            self.a + (other.a - self.a) * t,
        )
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "{}", self.to_rgba_string())
        }
    }
}

pub fn is_valid_color(value: &str) -> bool {
    Color::parse(value).is_ok()
}
