use serde::{Deserialize, Serialize};

use designkit_core::constants::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, FONT_WEIGHT_NORMAL};

use super::Size;

/// Glyph advance as a fraction of the font size, used for layout estimates.
const AVERAGE_ADVANCE: f64 = 0.6;
const LINE_HEIGHT: f64 = 1.16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextFlavour {
    #[serde(rename = "text")]
    Plain,
    #[serde(rename = "i-text")]
    Interactive,
    #[default]
    #[serde(rename = "textbox")]
    Textbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    pub fn toggled(self) -> Self {
        match self {
            FontStyle::Normal => FontStyle::Italic,
            FontStyle::Italic => FontStyle::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBox {
    #[serde(default)]
    pub flavour: TextFlavour,
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub linethrough: bool,
    #[serde(default)]
    pub text_align: TextAlign,
    /// Wrapping width for textboxes; zero means "fit the content".
    #[serde(default)]
    pub width: f64,
    #[serde(skip)]
    pub editing: bool,
}

impl TextBox {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            flavour: TextFlavour::Textbox,
            text: text.into(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FONT_WEIGHT_NORMAL,
            font_style: FontStyle::Normal,
            underline: false,
            linethrough: false,
            text_align: TextAlign::Left,
            width: 0.0,
            editing: false,
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Estimated layout box; no font metrics are available headless.
    pub fn measure(&self) -> Size {
        let longest = self.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
        let natural = longest * self.font_size * AVERAGE_ADVANCE;
        let width = if self.width > 0.0 { self.width } else { natural };
        let line_count = self.lines().count().max(1) as f64;
        Size::new(width, line_count * self.font_size * LINE_HEIGHT)
    }
}
