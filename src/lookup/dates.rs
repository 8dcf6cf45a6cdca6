use chrono::{Days, Local, NaiveDate};

/// Outcome of a date pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateChoice {
    Date(NaiveDate),
    /// Remove the due date
    Clear,
}

impl DateChoice {
    pub fn into_option(self) -> Option<NaiveDate> {
        match self {
            DateChoice::Date(d) => Some(d),
            DateChoice::Clear => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized date '{0}' (try YYYY-MM-DD, today, tomorrow, +3d, +2w or none)")]
pub struct DateParseError(pub String);

/// Source of due dates
pub trait DatePicker {
    fn resolve(&self, input: &str) -> Result<DateChoice, DateParseError>;

    /// The date relative expressions count from
    fn today(&self) -> NaiveDate;
}

/// Resolves typed date expressions relative to a fixed "today"
#[derive(Debug, Clone, Copy)]
pub struct TextDatePicker {
    today: NaiveDate,
}

impl TextDatePicker {
    pub fn new(today: NaiveDate) -> Self {
        TextDatePicker { today }
    }

    /// Picker anchored on the local date
    pub fn local() -> Self {
        TextDatePicker::new(Local::now().date_naive())
    }
}

impl DatePicker for TextDatePicker {
    fn resolve(&self, input: &str) -> Result<DateChoice, DateParseError> {
        let s = input.trim().to_ascii_lowercase();
        let err = || DateParseError(input.trim().to_string());
        match s.as_str() {
            "" | "none" | "clear" => return Ok(DateChoice::Clear),
            "today" => return Ok(DateChoice::Date(self.today)),
            "tomorrow" => {
                return self
                    .today
                    .checked_add_days(Days::new(1))
                    .map(DateChoice::Date)
                    .ok_or_else(err);
            }
            _ => {}
        }

        // +Nd / +Nw
        if let Some(rel) = s.strip_prefix('+') {
            let (num, unit_days) = if let Some(n) = rel.strip_suffix('d') {
                (n, 1)
            } else if let Some(n) = rel.strip_suffix('w') {
                (n, 7)
            } else {
                (rel, 1)
            };
            let n: u64 = num.parse().map_err(|_| err())?;
            let days = n.checked_mul(unit_days).ok_or_else(err)?;
            return self
                .today
                .checked_add_days(Days::new(days))
                .map(DateChoice::Date)
                .ok_or_else(err);
        }

        NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(DateChoice::Date)
            .map_err(|_| err())
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
