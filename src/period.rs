//! Calendar month periods and the function that maps timestamps onto them.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month, OffsetDateTime, UtcOffset};

use crate::Error;

/// A calendar month, written as `YYYY-MM`.
///
/// Budgets are set per period and transactions are reconciled against the
/// period their date falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period(Date);

impl Period {
    /// Create the period for `month` of `year`.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if the year is out of range.
    pub fn new(year: i32, month: Month) -> Result<Self, Error> {
        Date::from_calendar_date(year, month, 1)
            .map(Self)
            .map_err(|_| Error::InvalidMonth(format!("{year:04}-{:02}", month as u8)))
    }

    /// The period that contains `date`.
    pub fn from_date(date: Date) -> Self {
        Self(date.replace_day(1).unwrap_or(date))
    }

    /// The period `timestamp` falls in when viewed from the timezone `offset`.
    ///
    /// Two timestamps map to the same period if and only if they fall within
    /// the same calendar month in that timezone.
    pub fn from_timestamp(timestamp: OffsetDateTime, offset: UtcOffset) -> Self {
        Self::from_date(timestamp.to_offset(offset).date())
    }

    /// The period containing the current time in the timezone `offset`.
    pub fn current(offset: UtcOffset) -> Self {
        Self::from_timestamp(OffsetDateTime::now_utc(), offset)
    }

    /// Parse an optional query parameter, falling back to the current period.
    ///
    /// Empty strings are treated the same as a missing value.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] if `text` is not in the format YYYY-MM.
    pub fn parse_or_current(text: Option<&str>, local_offset: UtcOffset) -> Result<Self, Error> {
        match text.map(str::trim) {
            Some(text) if !text.is_empty() => text.parse(),
            _ => Ok(Self::current(local_offset)),
        }
    }

    /// The year of the period.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month of the period.
    pub fn month(&self) -> Month {
        self.0.month()
    }

    /// The first day of the period.
    pub fn first_day(&self) -> Date {
        self.0
    }

    /// The period immediately after this one, or `None` past the maximum date.
    pub fn next(&self) -> Option<Self> {
        let (year, month) = match self.month() {
            Month::December => (self.year() + 1, Month::January),
            month => (self.year(), month.next()),
        };

        Date::from_calendar_date(year, month, 1).ok().map(Self)
    }

    /// The period immediately before this one, or `None` before the minimum date.
    pub fn previous(&self) -> Option<Self> {
        self.0.previous_day().map(Self::from_date)
    }

    /// The instants that bound this period in the timezone `offset`.
    ///
    /// The start is inclusive and the end is exclusive. The end is `None` for
    /// the last representable period.
    pub fn utc_bounds(&self, offset: UtcOffset) -> (OffsetDateTime, Option<OffsetDateTime>) {
        let start = self.0.midnight().assume_offset(offset);
        let end = self
            .next()
            .map(|next| next.0.midnight().assume_offset(offset));

        (start, end)
    }

    /// A human readable label, e.g. "March 2024".
    pub fn label(&self) -> String {
        format!("{} {}", self.month(), self.year())
    }

    /// The `count` periods ending at (and including) this one, oldest first.
    pub fn last_n(&self, count: usize) -> Vec<Self> {
        let mut periods = Vec::with_capacity(count);
        let mut period = Some(*self);

        while periods.len() < count {
            match period {
                Some(current) => {
                    periods.push(current);
                    period = current.previous();
                }
                None => break,
            }
        }

        periods.reverse();
        periods
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month() as u8)
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse a period from exactly four digits, a hyphen and two digits.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(text.to_owned());

        let bytes = text.as_bytes();
        let is_well_formed = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);

        if !is_well_formed {
            return Err(invalid());
        }

        let year: i32 = text[..4].parse().map_err(|_| invalid())?;
        let month: u8 = text[5..].parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Date::from_calendar_date(year, month, 1)
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(serde::de::Error::custom)
    }
}

impl ToSql for Period {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for Period {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}
