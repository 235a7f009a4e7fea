//! Season Calculation
//!
//! Maps a reference date to the `YYYY-YY` season label used by forecast rows.
//! Wall-clock time is only reached through [`Clock`], so tests pin "today".

use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;
use tracing::warn;

use crate::utils::dates::parse_day;

/// Source of "today" for season resolution when no date is selected.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// UTC wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Clone)]
pub struct SeasonCalculator {
    season_start_month: u32,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SeasonCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeasonCalculator")
            .field("season_start_month", &self.season_start_month)
            .finish_non_exhaustive()
    }
}

impl SeasonCalculator {
    pub fn new(season_start_month: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            season_start_month,
            clock,
        }
    }

    pub fn with_system_clock(season_start_month: u32) -> Self {
        Self::new(season_start_month, Arc::new(SystemClock))
    }

    pub fn season_start_month(&self) -> u32 {
        self.season_start_month
    }

    /// Season of `date`, or of the clock's today when `date` is `None`.
    /// Returns `None` for an unparseable date, which then matches no row.
    pub fn season(&self, date: Option<&str>) -> Option<String> {
        let day = match date {
            Some(raw) => match parse_day(raw) {
                Some(day) => day,
                None => {
                    warn!(date = raw, "unparseable reference date, no season selected");
                    return None;
                }
            },
            None => self.clock.today(),
        };
        Some(season_label(day, self.season_start_month))
    }
}

/// `(month0 + 1) >= start` opens the season in the current year.
pub fn season_label(day: NaiveDate, season_start_month: u32) -> String {
    let year = day.year();
    let month0 = day.month0();
    if month0 + 1 >= season_start_month {
        format!("{}-{:02}", year, (year + 1).rem_euclid(100))
    } else {
        format!("{}-{:02}", year - 1, year.rem_euclid(100))
    }
}
