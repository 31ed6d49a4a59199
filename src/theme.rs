//! Expertise-driven page theme.
//!
//! The session background follows the most recent expertise level the
//! server reported.  The mapping is a fixed table; anything the table does
//! not know gets the neutral default color.

use std::fmt;

use tracing::debug;

use crate::types::ExpertiseLevel;

/// A background color as a `#rrggbb` string.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ThemeColor(&'static str);

impl ThemeColor {
    /// Neutral background for unrecognized levels.
    pub const DEFAULT: ThemeColor = ThemeColor("#f8f9fa");
    /// Background for beginners.
    pub const BEGINNER: ThemeColor = ThemeColor("#edede9");
    /// Background for intermediate users.
    pub const INTERMEDIATE: ThemeColor = ThemeColor("#f5ebe0");
    /// Background for experts.
    pub const EXPERT: ThemeColor = ThemeColor("#d5bdaf");

    /// The `#rrggbb` form.
    pub fn hex(&self) -> &'static str {
        self.0
    }

    /// The red, green and blue components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or(0)
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Map an expertise level to its background color.
pub fn color_for(level: &ExpertiseLevel) -> ThemeColor {
    match level {
        ExpertiseLevel::Beginner => ThemeColor::BEGINNER,
        ExpertiseLevel::Intermediate => ThemeColor::INTERMEDIATE,
        ExpertiseLevel::Expert => ThemeColor::EXPERT,
        ExpertiseLevel::Unrecognized(_) => ThemeColor::DEFAULT,
    }
}

/// Map a raw level string (any case) to its background color.
pub fn color_for_str(level: &str) -> ThemeColor {
    color_for(&ExpertiseLevel::parse(level))
}

/// The theme currently applied to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTheme {
    level: ExpertiseLevel,
    background: ThemeColor,
    marker: String,
}

impl PageTheme {
    /// A theme for `level`.
    pub fn for_level(level: ExpertiseLevel) -> Self {
        let background = color_for(&level);
        let marker = format!("expertise-{}", level.as_str());
        Self {
            level,
            background,
            marker,
        }
    }

    /// Replace the current theme with the one for `level`.
    ///
    /// The previous marker is dropped; applying the same level twice leaves
    /// the theme unchanged.
    pub fn apply(&mut self, level: ExpertiseLevel) {
        let next = Self::for_level(level);
        debug!(
            level = %next.level,
            background = %next.background,
            previous = %self.marker,
            "applying theme"
        );
        *self = next;
    }

    /// The normalized level this theme was built from.
    pub fn level(&self) -> &ExpertiseLevel {
        &self.level
    }

    /// The background color.
    pub fn background(&self) -> ThemeColor {
        self.background
    }

    /// The `expertise-<level>` marker recorded for inspection.
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Default for PageTheme {
    fn default() -> Self {
        Self::for_level(ExpertiseLevel::Beginner)
    }
}
