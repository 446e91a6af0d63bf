use std::{fmt, str::FromStr};

use crate::{
    foundation::core::Rect,
    foundation::error::{ScrollFxError, ScrollFxResult},
};

/// One side of a root margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginLength {
    Px(f64),
    /// Percentage of the root's height (top/bottom) or width (left/right).
    Percent(f64),
}

impl MarginLength {
    pub fn resolve(self, basis: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Percent(p) => basis * p / 100.0,
        }
    }

    fn parse(token: &str) -> ScrollFxResult<Self> {
        let (number, percent) = if let Some(n) = token.strip_suffix("px") {
            (n, false)
        } else if let Some(n) = token.strip_suffix('%') {
            (n, true)
        } else if token == "0" {
            (token, false)
        } else {
            return Err(ScrollFxError::validation(format!(
                "root margin value '{token}' must be in px or %"
            )));
        };

        let v: f64 = number.parse().map_err(|_| {
            ScrollFxError::validation(format!("root margin value '{token}' is not a number"))
        })?;
        if !v.is_finite() {
            return Err(ScrollFxError::validation(format!(
                "root margin value '{token}' must be finite"
            )));
        }
        Ok(if percent { Self::Percent(v) } else { Self::Px(v) })
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Grows (positive) or shrinks (negative) the root box before intersection
/// tests, using the CSS `margin` shorthand order: top, right, bottom, left.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::ZERO
    }
}

impl RootMargin {
    pub const ZERO: Self = Self {
        top: MarginLength::Px(0.0),
        right: MarginLength::Px(0.0),
        bottom: MarginLength::Px(0.0),
        left: MarginLength::Px(0.0),
    };

    /// Parse the CSS shorthand, e.g. `"50px 0px -20px 0px"` or `"-35% 0px"`.
    pub fn parse(s: &str) -> ScrollFxResult<Self> {
        let values = s
            .split_whitespace()
            .map(MarginLength::parse)
            .collect::<ScrollFxResult<Vec<_>>>()?;

        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => {
                return Err(ScrollFxError::validation(format!(
                    "root margin '{s}' must have 1 to 4 values"
                )));
            }
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }

    /// Apply the margin to `root`. The result may be inverted when the margin
    /// shrinks past zero, in which case nothing intersects it.
    pub fn apply(&self, root: Rect) -> Rect {
        let w = root.width();
        let h = root.height();
        Rect {
            x0: root.x0 - self.left.resolve(w),
            y0: root.y0 - self.top.resolve(h),
            x1: root.x1 + self.right.resolve(w),
            y1: root.y1 + self.bottom.resolve(h),
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

impl FromStr for RootMargin {
    type Err = ScrollFxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RootMargin {
    type Error = ScrollFxError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RootMargin> for String {
    fn from(m: RootMargin) -> Self {
        m.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/observe/margin.rs"]
mod tests;
