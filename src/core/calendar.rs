use chrono::{Datelike, NaiveDate, Weekday};

/// Column headers for the grid, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A (year, month) pair with grid computation and navigation.
///
/// The grid is pure: cells are recomputed from scratch on every call, so
/// navigating across months of different lengths needs no clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    fn first(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Weekday index of day 1, Monday = 0.
    pub fn leading_blanks(&self) -> usize {
        match self.first().weekday() {
            Weekday::Mon => 0,
            Weekday::Tue => 1,
            Weekday::Wed => 2,
            Weekday::Thu => 3,
            Weekday::Fri => 4,
            Weekday::Sat => 5,
            Weekday::Sun => 6,
        }
    }

    /// Number of days in the month: first of next month, minus one day.
    pub fn day_count(&self) -> u32 {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .unwrap()
            .pred_opt()
            .unwrap()
            .day()
    }

    /// The day cells: leading blanks up to the weekday of day 1, one cell
    /// per day, padded with trailing blanks to a whole number of weeks so
    /// consumers can chunk by 7.
    pub fn cells(&self) -> Vec<Option<u32>> {
        let mut cells: Vec<Option<u32>> = vec![None; self.leading_blanks()];
        cells.extend((1..=self.day_count()).map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells
    }

    pub fn prev_month(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    pub fn prev_year(&mut self) {
        self.year -= 1;
    }

    pub fn next_year(&mut self) {
        self.year += 1;
    }

    /// Resolve a clicked day cell to its concrete date. This is the whole
    /// routing step between the grid and event creation; no persistence
    /// happens here.
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.day_count() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Header text, e.g. "February 2024".
    pub fn title(&self) -> String {
        self.first().format("%B %Y").to_string()
    }
}
