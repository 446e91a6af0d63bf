use crate::{
    markup::discover::SectionConfig, markup::markers::Markers, page::document::Document,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// What the body currently shows.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AppliedBackground {
    pub color: String,
    pub theme: Theme,
}

/// Exclusive write access to the body's background and theme.
///
/// Not `Clone`. One value exists per session and it moves into whichever
/// background controller is live.
#[derive(Debug, Default)]
pub struct PresentationState {
    applied: Option<AppliedBackground>,
    commits: u64,
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the section's color and theme to the body.
    pub(crate) fn commit<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        config: &SectionConfig,
        markers: &Markers,
    ) {
        doc.set_body_style("background-color", &config.color);
        let theme = if config.is_dark {
            doc.set_body_attribute(&markers.theme_attribute, Some(&markers.dark_theme_value));
            Theme::Dark
        } else {
            doc.set_body_attribute(&markers.theme_attribute, None);
            Theme::Light
        };
        self.applied = Some(AppliedBackground {
            color: config.color.clone(),
            theme,
        });
        self.commits += 1;
    }

    pub fn background(&self) -> Option<&AppliedBackground> {
        self.applied.as_ref()
    }

    /// Total commits over the state's lifetime, across controllers.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// Forget the applied background ahead of a new controller taking over.
    /// The body itself keeps its last styling until the next commit.
    pub fn reset(&mut self) {
        self.applied = None;
    }
}
