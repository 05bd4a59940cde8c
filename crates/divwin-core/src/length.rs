#![forbid(unsafe_code)]

//! Style length values as they appear in inline `left/top/width/height`.
//!
//! Mutators accept unit strings verbatim; this type only exists for the
//! places that must read a length back (headless layout, saved bounds).

use std::fmt;

/// A parsed inline style length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Empty or unrecognised value; the element sizes itself.
    Auto,
    /// Absolute pixels.
    Px(f64),
    /// Percentage of the containing block.
    Percent(f64),
}

impl Length {
    /// Parse `"12px"`, `"12"`, `"99%"`, or anything else as [`Length::Auto`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return Self::Auto;
        }
        if let Some(number) = value.strip_suffix('%') {
            return number
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map_or(Self::Auto, Self::Percent);
        }
        let number = value.strip_suffix("px").unwrap_or(value);
        number
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or(Self::Auto, Self::Px)
    }

    /// Format a whole-pixel value the way style writes expect (`"{n}px"`).
    #[must_use]
    pub fn px(value: i32) -> String {
        format!("{value}px")
    }

    /// Resolve against a containing-block extent. `Auto` yields `None`.
    #[must_use]
    pub fn resolve(self, reference: i32) -> Option<i32> {
        match self {
            Self::Auto => None,
            Self::Px(px) => Some(round_to_i32(px)),
            Self::Percent(pct) => Some(round_to_i32(f64::from(reference) * pct / 100.0)),
        }
    }

    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => Ok(()),
            Self::Px(px) => write!(f, "{px}px"),
            Self::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

fn round_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    // Browsers truncate fractional offset values toward zero.
    value.trunc().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
