use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::theme::AppTheme;

/// Preference key holding the encoded [`ReaderModeStyle`].
pub const READER_MODE_STYLE_KEY: &str = "readermode.style";

/// Colour scheme of the reader view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReaderModeTheme {
    Light,
    Dark,
    Sepia,
}

impl ReaderModeTheme {
    pub const ALL: [ReaderModeTheme; 3] = [Self::Light, Self::Sepia, Self::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Sepia => "sepia",
        }
    }

    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "sepia" => Some(Self::Sepia),
            _ => None,
        }
    }

    /// Resolves the reader theme to display given the app-wide theme.
    ///
    /// A dark app always reads in dark. Otherwise the requested theme wins,
    /// falling back to light.
    pub fn preferred_theme(requested: Option<ReaderModeTheme>, app_theme: AppTheme) -> ReaderModeTheme {
        if app_theme == AppTheme::Dark {
            return Self::Dark;
        }
        requested.unwrap_or(Self::Light)
    }
}

/// Typeface used by the reader view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReaderModeFontType {
    #[serde(rename = "serif")]
    Serif,
    #[serde(rename = "sans-serif")]
    SansSerif,
    #[serde(rename = "serif-bold")]
    SerifBold,
    #[serde(rename = "sans-serif-bold")]
    SansSerifBold,
}

impl ReaderModeFontType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::SerifBold => "serif-bold",
            Self::SansSerifBold => "sans-serif-bold",
        }
    }

    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "serif" => Some(Self::Serif),
            "sans-serif" => Some(Self::SansSerif),
            "serif-bold" => Some(Self::SerifBold),
            "sans-serif-bold" => Some(Self::SansSerifBold),
            _ => None,
        }
    }

    /// Bold and regular faces of one family compare equal.
    pub fn is_same_family(&self, other: ReaderModeFontType) -> bool {
        self.is_serif() == other.is_serif()
    }

    fn is_serif(&self) -> bool {
        matches!(self, Self::Serif | Self::SerifBold)
    }
}

/// Discrete reader font size, 1 (smallest) to 13 (largest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ReaderModeFontSize(u8);

impl ReaderModeFontSize {
    pub const SMALLEST: ReaderModeFontSize = ReaderModeFontSize(1);
    pub const LARGEST: ReaderModeFontSize = ReaderModeFontSize(13);
    pub const DEFAULT: ReaderModeFontSize = ReaderModeFontSize(5);

    pub fn new(raw: i64) -> Option<Self> {
        if (Self::SMALLEST.0 as i64..=Self::LARGEST.0 as i64).contains(&raw) {
            Some(Self(raw as u8))
        } else {
            None
        }
    }

    pub fn raw_value(&self) -> i64 {
        self.0 as i64
    }

    pub fn is_smallest(&self) -> bool {
        *self == Self::SMALLEST
    }

    pub fn is_largest(&self) -> bool {
        *self == Self::LARGEST
    }

    pub fn smaller(&self) -> Self {
        if self.is_smallest() { *self } else { Self(self.0 - 1) }
    }

    pub fn bigger(&self) -> Self {
        if self.is_largest() { *self } else { Self(self.0 + 1) }
    }
}

impl Default for ReaderModeFontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for ReaderModeFontSize {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| format!("font size out of range: {}", raw))
    }
}

impl From<ReaderModeFontSize> for i64 {
    fn from(size: ReaderModeFontSize) -> i64 {
        size.raw_value()
    }
}

/// User-selected reader view style, persisted under [`READER_MODE_STYLE_KEY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReaderModeStyle {
    pub theme: ReaderModeTheme,
    pub font_type: ReaderModeFontType,
    pub font_size: ReaderModeFontSize,
}

impl Default for ReaderModeStyle {
    fn default() -> Self {
        Self {
            theme: ReaderModeTheme::Light,
            font_type: ReaderModeFontType::SansSerif,
            font_size: ReaderModeFontSize::DEFAULT,
        }
    }
}

impl ReaderModeStyle {
    pub fn new(theme: ReaderModeTheme, font_type: ReaderModeFontType, font_size: ReaderModeFontSize) -> Self {
        Self {
            theme,
            font_type,
            font_size,
        }
    }

    /// Decodes a style dictionary. Every key must be present and valid.
    pub fn from_dictionary(dict: &Map<String, Value>) -> Option<Self> {
        let theme = dict
            .get("theme")
            .and_then(Value::as_str)
            .and_then(ReaderModeTheme::from_raw)?;
        let font_type = dict
            .get("fontType")
            .and_then(Value::as_str)
            .and_then(ReaderModeFontType::from_raw)?;
        let font_size = dict
            .get("fontSize")
            .and_then(Value::as_i64)
            .and_then(ReaderModeFontSize::new)?;
        Some(Self::new(theme, font_type, font_size))
    }

    pub fn encode_as_dictionary(&self) -> Map<String, Value> {
        let mut dict = Map::new();
        dict.insert("theme".to_string(), Value::from(self.theme.as_str()));
        dict.insert("fontType".to_string(), Value::from(self.font_type.as_str()));
        dict.insert("fontSize".to_string(), Value::from(self.font_size.raw_value()));
        dict
    }

    /// JSON form handed to the reader page script.
    pub fn encode(&self) -> String {
        Value::Object(self.encode_as_dictionary()).to_string()
    }

    pub fn ensure_preferred_color_theme_if_needed(&mut self, app_theme: AppTheme) {
        self.theme = ReaderModeTheme::preferred_theme(Some(self.theme), app_theme);
    }
}
