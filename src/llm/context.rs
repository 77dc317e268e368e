//! Date context for interpretation prompts
//!
//! The caller-supplied date is the only notion of "now" a request gets.
//! Relative expressions ("tomorrow", "next Friday") are resolved by the
//! model against it; this module only states it, and anchors the worked
//! examples in the prompt on it so they never contradict each other.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Per-request context for the interpretation prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptContext {
    pub current_date: NaiveDate,
}

impl PromptContext {
    pub fn new(current_date: NaiveDate) -> Self {
        Self { current_date }
    }

    /// One-line statement of the current date for the prompt
    pub fn summary(&self) -> String {
        format!(
            "Today's date is {} ({}).",
            self.current_date.format("%Y-%m-%d"),
            self.current_date.format("%A")
        )
    }

    /// The day after the current date
    pub fn tomorrow(&self) -> NaiveDate {
        self.days_after(1)
    }

    /// The first given weekday strictly after the current date
    pub fn next_weekday(&self, weekday: Weekday) -> NaiveDate {
        let today = self.current_date.weekday().num_days_from_monday();
        let target = weekday.num_days_from_monday();
        let ahead = match (target + 7 - today) % 7 {
            0 => 7,
            n => n,
        };
        self.days_after(ahead as u64)
    }

    fn days_after(&self, days: u64) -> NaiveDate {
        self.current_date
            .checked_add_days(Days::new(days))
            .unwrap_or(self.current_date)
    }
}
