use crate::foundation::error::{ScrollFxError, ScrollFxResult};

/// Attribute and class names that connect markup to the controllers.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Markers {
    /// Boolean attribute that makes an element eligible for reveal.
    pub animate: String,
    /// Boolean attribute selecting repeatable reveal semantics.
    pub animate_repeat: String,
    /// Class that also selects repeatable semantics ("tableau" items).
    pub repeat_class: String,
    /// Class toggled on revealed elements.
    pub visible_class: String,
    /// Attribute whose value is the section's background color.
    pub background: String,
    /// Boolean attribute flagging a dark section.
    pub background_dark: String,
    /// Body attribute carrying the theme.
    pub theme_attribute: String,
    /// Value written to `theme_attribute` for dark sections.
    pub dark_theme_value: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            animate: "data-animate".to_string(),
            animate_repeat: "data-animate-repeat".to_string(),
            repeat_class: "tableau-item".to_string(),
            visible_class: "is-visible".to_string(),
            background: "data-bg".to_string(),
            background_dark: "data-bg-dark".to_string(),
            theme_attribute: "data-theme".to_string(),
            dark_theme_value: "dark".to_string(),
        }
    }
}

impl Markers {
    pub fn validate(&self) -> ScrollFxResult<()> {
        for (field, value) in [
            ("animate", &self.animate),
            ("animate_repeat", &self.animate_repeat),
            ("repeat_class", &self.repeat_class),
            ("visible_class", &self.visible_class),
            ("background", &self.background),
            ("background_dark", &self.background_dark),
            ("theme_attribute", &self.theme_attribute),
            ("dark_theme_value", &self.dark_theme_value),
        ] {
            if value.is_empty() {
                return Err(ScrollFxError::validation(format!(
                    "marker '{field}' must be non-empty"
                )));
            }
            if value.chars().any(char::is_whitespace) {
                return Err(ScrollFxError::validation(format!(
                    "marker '{field}' must not contain whitespace (got '{value}')"
                )));
            }
        }
        Ok(())
    }
}
