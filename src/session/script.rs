use crate::{
    foundation::core::{Timestamp, Viewport},
    foundation::error::{ScrollFxError, ScrollFxResult},
    page::model::{ElementSpec, Page, PageSpec},
    session::session::{LifecycleEvent, Session, TraceRecord},
};

/// A timed sequence of user and host actions.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ScrollScript {
    pub steps: Vec<ScriptStep>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: ScriptAction,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    Scroll { y: f64 },
    Resize { width: f64, height: f64 },
    Navigate { page: PageSpec },
    Insert { element: ElementSpec },
}

impl ScrollScript {
    pub fn from_json_str(s: &str) -> ScrollFxResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Time of the last step, or zero for an empty script.
    pub fn end_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.at_ms).max().unwrap_or(0)
    }
}

/// Outcome of a scripted run.
#[derive(Clone, Debug, serde::Serialize)]
pub struct RunReport {
    pub trace: Vec<TraceRecord>,
    pub final_background: Option<String>,
    pub final_theme: Option<String>,
    pub ended_at_ms: u64,
}

/// Initialize `session`, play `script` in time order, then let it settle for
/// `settle_ms`.
///
/// Steps scheduled before the session's current time run immediately.
#[tracing::instrument(skip_all, fields(steps = script.steps.len()))]
pub fn run_script(
    session: &mut Session,
    script: &ScrollScript,
    settle_ms: u64,
) -> ScrollFxResult<RunReport> {
    session.dispatch(LifecycleEvent::DomContentLoaded)?;

    let mut steps: Vec<&ScriptStep> = script.steps.iter().collect();
    steps.sort_by_key(|s| s.at_ms);

    for step in steps {
        session.run_until(Timestamp(step.at_ms));
        match &step.action {
            ScriptAction::Scroll { y } => {
                if !y.is_finite() {
                    return Err(ScrollFxError::validation(format!(
                        "scroll step at {}ms has a non-finite offset",
                        step.at_ms
                    )));
                }
                session.scroll_to(*y);
            }
            ScriptAction::Resize { width, height } => {
                session.resize(Viewport::new(*width, *height)?)?;
            }
            ScriptAction::Navigate { page } => {
                session.navigate(Page::from_spec(page.clone())?)?;
            }
            ScriptAction::Insert { element } => {
                session.insert_animated(element.clone())?;
            }
        }
        tracing::trace!(at_ms = step.at_ms, "script step applied");
    }

    let end = Timestamp(script.end_ms()).saturating_add_ms(settle_ms);
    session.run_until(end);

    let page = session.page();
    let markers = &session.config().markers;
    Ok(RunReport {
        trace: session.trace().to_vec(),
        final_background: page.body().style.get("background-color").cloned(),
        final_theme: page.body().attributes.get(&markers.theme_attribute).cloned(),
        ended_at_ms: session.now().0,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/script.rs"]
mod tests;
