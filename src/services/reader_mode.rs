//! Reader mode style handling.
//!
//! Loads and saves the reader style preference and tracks the edits a user
//! makes from the style popover: font family, font size steps and colour theme.

use crate::services::prefs_store::Prefs;
use crate::services::theme_engine::ThemeProvider;
use crate::types::errors::PrefsError;
use crate::types::reader::{
    ReaderModeFontSize, ReaderModeFontType, ReaderModeStyle, ReaderModeTheme, READER_MODE_STYLE_KEY,
};

/// Font size buttons offered by the style popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSizeAction {
    Smaller,
    Reset,
    Bigger,
}

/// Receives every style change made through the controller.
pub trait ReaderModeStyleDelegate {
    /// `is_using_user_defined_color` stays set once the user picks a theme
    /// explicitly, until the reader view is closed.
    fn did_configure_style(&mut self, style: &ReaderModeStyle, is_using_user_defined_color: bool);
}

impl<F> ReaderModeStyleDelegate for F
where
    F: FnMut(&ReaderModeStyle, bool),
{
    fn did_configure_style(&mut self, style: &ReaderModeStyle, is_using_user_defined_color: bool) {
        self(style, is_using_user_defined_color)
    }
}

/// Reads the stored reader style and adjusts its colour to the app theme.
///
/// Returns `None` when nothing is stored or the stored value does not decode.
pub fn load_style(prefs: &dyn Prefs, theme_provider: &dyn ThemeProvider) -> Option<ReaderModeStyle> {
    let dict = prefs.dictionary_for_key(READER_MODE_STYLE_KEY)?;
    let Some(mut style) = ReaderModeStyle::from_dictionary(&dict) else {
        log::warn!("Ignoring malformed {} preference", READER_MODE_STYLE_KEY);
        return None;
    };
    style.ensure_preferred_color_theme_if_needed(theme_provider.current_theme());
    Some(style)
}

/// Persists `style` under the reader style key.
pub fn save_style(prefs: &mut dyn Prefs, style: &ReaderModeStyle) -> Result<(), PrefsError> {
    prefs.set_dictionary(READER_MODE_STYLE_KEY, style.encode_as_dictionary())
}

/// State behind the reader style popover.
pub struct ReaderModeStyleController {
    style: ReaderModeStyle,
    is_using_user_defined_color: bool,
    delegate: Option<Box<dyn ReaderModeStyleDelegate>>,
}

impl ReaderModeStyleController {
    pub fn new(style: ReaderModeStyle) -> Self {
        Self {
            style,
            is_using_user_defined_color: false,
            delegate: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Box<dyn ReaderModeStyleDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn style(&self) -> &ReaderModeStyle {
        &self.style
    }

    pub fn is_using_user_defined_color(&self) -> bool {
        self.is_using_user_defined_color
    }

    fn notify(&mut self) {
        let style = self.style;
        let user_color = self.is_using_user_defined_color;
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.did_configure_style(&style, user_color);
        }
    }

    pub fn change_font_type(&mut self, font_type: ReaderModeFontType) {
        self.style.font_type = font_type;
        self.notify();
    }

    pub fn change_font_size(&mut self, action: FontSizeAction) {
        let current = self.style.font_size;
        self.style.font_size = match action {
            FontSizeAction::Smaller => current.smaller(),
            FontSizeAction::Bigger => current.bigger(),
            FontSizeAction::Reset => ReaderModeFontSize::DEFAULT,
        };
        self.notify();
    }

    /// An explicit theme pick overrides the app theme for the rest of the session.
    pub fn change_theme(&mut self, theme: ReaderModeTheme) {
        self.style.theme = theme;
        self.is_using_user_defined_color = true;
        self.notify();
    }

    pub fn is_font_size_action_enabled(&self, action: FontSizeAction) -> bool {
        match action {
            FontSizeAction::Bigger => !self.style.font_size.is_largest(),
            FontSizeAction::Smaller => !self.style.font_size.is_smallest(),
            FontSizeAction::Reset => true,
        }
    }

    /// Whether a font-type button should render as selected.
    pub fn is_font_type_selected(&self, font_type: ReaderModeFontType) -> bool {
        font_type.is_same_family(self.style.font_type)
    }

    /// Replaces the current style with the stored preference, if any.
    pub fn apply_preferences(
        &mut self,
        prefs: &dyn Prefs,
        theme_provider: &dyn ThemeProvider,
    ) -> Option<ReaderModeStyle> {
        let style = load_style(prefs, theme_provider)?;
        self.style = style;
        Some(style)
    }

    pub fn save_style(&self, prefs: &mut dyn Prefs) -> Result<(), PrefsError> {
        save_style(prefs, &self.style)
    }
}
