//! Lead-time calendar
//!
//! Classifies calendar days against the production lead time. Three reference
//! dates are fixed when the calendar is activated:
//!
//! ```text
//!   past      │ blocked            │ express warning      │ available
//! ────────────┼────────────────────┼──────────────────────┼──────────────►
//!          tomorrow        expressMinDate          minAllowedDate
//!                         (tomorrow + 6 wk)      (tomorrow + 16 wk)
//! ```
//!
//! Dates are `NaiveDate`s, so there is no time-of-day component and no DST
//! edge to normalise away. "Today" always comes from a [`Clock`].

use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const MONTH_NAMES: [&str; 12] = [
    "Styczeń", "Luty", "Marzec", "Kwiecień", "Maj", "Czerwiec",
    "Lipiec", "Sierpień", "Wrzesień", "Październik", "Listopad", "Grudzień",
];

/// Monday-first weekday headers
pub const WEEKDAY_HEADERS: [&str; 7] = ["Pn", "Wt", "Śr", "Cz", "Pt", "Sb", "Nd"];

/// Source of the current date
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Lead-time rules in weeks, counted from tomorrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadTimeRules {
    /// Standard lead time
    pub min_weeks: u32,
    /// Earliest express booking
    pub express_min_weeks: u32,
}

impl Default for LeadTimeRules {
    fn default() -> Self {
        Self {
            min_weeks: 16,
            express_min_weeks: 6,
        }
    }
}

impl LeadTimeRules {
    /// Note shown above the calendar grid
    pub fn note(&self) -> String {
        format!("Minimalny termin realizacji: {} tygodni", self.min_weeks)
    }
}

/// Availability class of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Past,
    Blocked,
    ExpressWarning,
    Available,
}

impl DayStatus {
    pub const LEGEND: [DayStatus; 4] = [
        Self::Past,
        Self::Blocked,
        Self::ExpressWarning,
        Self::Available,
    ];

    /// Express dates stay selectable; the UI warns instead of blocking.
    pub fn is_selectable(self) -> bool {
        matches!(self, Self::ExpressWarning | Self::Available)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Past => "Przeszłość",
            Self::Blocked => "Zablokowane",
            Self::ExpressWarning => "Ekspresowe",
            Self::Available => "Dostępne",
        }
    }
}

/// Derived per-day state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClassification {
    pub status: DayStatus,
    pub selected: bool,
}

impl DayClassification {
    pub fn is_selectable(&self) -> bool {
        self.status.is_selectable()
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// Reference dates computed once per calendar activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateAvailability {
    tomorrow: NaiveDate,
    express_min_date: NaiveDate,
    min_allowed_date: NaiveDate,
}

impl DateAvailability {
    /// Derive reference dates from `today`.
    ///
    /// An express window longer than the standard lead time is clamped, so
    /// `express_min_date <= min_allowed_date` always holds.
    pub fn new(today: NaiveDate, rules: LeadTimeRules) -> Self {
        let tomorrow = add_days(today, 1);
        let min_allowed_date = add_days(tomorrow, u64::from(rules.min_weeks) * 7);
        let express_min_date =
            add_days(tomorrow, u64::from(rules.express_min_weeks) * 7).min(min_allowed_date);

        Self {
            tomorrow,
            express_min_date,
            min_allowed_date,
        }
    }

    pub fn from_clock(clock: &dyn Clock, rules: LeadTimeRules) -> Self {
        Self::new(clock.today(), rules)
    }

    pub fn tomorrow(&self) -> NaiveDate { self.tomorrow }
    pub fn express_min_date(&self) -> NaiveDate { self.express_min_date }
    pub fn min_allowed_date(&self) -> NaiveDate { self.min_allowed_date }

    pub fn status(&self, date: NaiveDate) -> DayStatus {
        if date < self.tomorrow {
            DayStatus::Past
        } else if date < self.express_min_date {
            DayStatus::Blocked
        } else if date < self.min_allowed_date {
            DayStatus::ExpressWarning
        } else {
            DayStatus::Available
        }
    }

    pub fn classify(&self, date: NaiveDate, selected: Option<NaiveDate>) -> DayClassification {
        DayClassification {
            status: self.status(date),
            selected: selected == Some(date),
        }
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        self.status(date).is_selectable()
    }
}

/// Step a (month, year) pair by `direction` months, wrapping across years.
///
/// Months are 1-based.
pub fn navigate_month(month: u32, year: i32, direction: i32) -> (u32, i32) {
    let index = year * 12 + (month.clamp(1, 12) as i32 - 1) + direction;
    (index.rem_euclid(12) as u32 + 1, index.div_euclid(12))
}

/// Number of days in a month, leap years included
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_month, next_year) = navigate_month(month, year, 1);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// Blank cells before the 1st in a Monday-first grid
pub fn leading_blanks(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_monday())
        .unwrap_or(0)
}

/// One cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    Blank,
    Day {
        date: NaiveDate,
        classification: DayClassification,
    },
}

impl CalendarCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::Day { date, .. } => Some(*date),
        }
    }
}

/// Date picker surface
#[derive(Debug, Clone)]
pub struct Calendar {
    availability: DateAvailability,
    rules: LeadTimeRules,
    month: u32,
    year: i32,
    selected: Option<NaiveDate>,
    open: bool,
}

impl Calendar {
    /// Activate a calendar for `today`, showing the month of the selection
    /// or else the month of tomorrow.
    pub fn new(today: NaiveDate, rules: LeadTimeRules, selected: Option<NaiveDate>) -> Self {
        let availability = DateAvailability::new(today, rules);
        let shown = selected.unwrap_or(availability.tomorrow());
        Self {
            availability,
            rules,
            month: shown.month(),
            year: shown.year(),
            selected,
            open: false,
        }
    }

    pub fn availability(&self) -> &DateAvailability { &self.availability }
    pub fn month(&self) -> u32 { self.month }
    pub fn year(&self) -> i32 { self.year }
    pub fn selected(&self) -> Option<NaiveDate> { self.selected }
    pub fn is_open(&self) -> bool { self.open }

    pub fn open(&mut self) { self.open = true; }
    pub fn close(&mut self) { self.open = false; }
    pub fn toggle(&mut self) { self.open = !self.open; }

    /// Heading such as "Luty 2027"
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    pub fn note(&self) -> String {
        self.rules.note()
    }

    /// Move the visible month; reference dates are untouched.
    pub fn navigate_month(&mut self, direction: i32) -> (u32, i32) {
        let (month, year) = navigate_month(self.month, self.year, direction);
        self.month = month;
        self.year = year;
        (month, year)
    }

    pub fn classify(&self, date: NaiveDate) -> DayClassification {
        self.availability.classify(date, self.selected)
    }

    /// Grid for the visible month: leading blanks, then one cell per day
    pub fn cells(&self) -> Vec<CalendarCell> {
        let blanks = leading_blanks(self.year, self.month);
        let days = days_in_month(self.year, self.month);
        let mut cells = Vec::with_capacity((blanks + days) as usize);

        cells.extend((0..blanks).map(|_| CalendarCell::Blank));
        cells.extend(
            (1..=days)
                .filter_map(|day| NaiveDate::from_ymd_opt(self.year, self.month, day))
                .map(|date| CalendarCell::Day {
                    date,
                    classification: self.classify(date),
                }),
        );
        cells
    }

    /// Pick a date. Selectable dates are stored and close the surface;
    /// anything else is ignored.
    pub fn select(&mut self, date: NaiveDate) -> Option<NaiveDate> {
        if !self.availability.is_selectable(date) {
            return None;
        }
        self.selected = Some(date);
        self.open = false;
        Some(date)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}
