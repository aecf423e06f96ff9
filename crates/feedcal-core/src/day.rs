use std::fmt;
use std::str::FromStr;

use chrono::{
  Datelike,
  NaiveDate,
  NaiveDateTime,
  NaiveTime
};

use crate::error::DateParseError;

/// A local calendar day with the time
/// of day stripped. Two instants are the
/// same day iff their projections are
/// equal.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
  pub fn from_ymd(
    year: i32,
    month: u32,
    day: u32
  ) -> Option<Self> {
    NaiveDate::from_ymd_opt(
      year, month, day
    )
    .map(Self)
  }

  pub fn of(
    instant: NaiveDateTime
  ) -> Self {
    Self(instant.date())
  }

  pub fn from_date(
    date: NaiveDate
  ) -> Self {
    Self(date)
  }

  pub fn date(self) -> NaiveDate {
    self.0
  }

  pub fn year(self) -> i32 {
    self.0.year()
  }

  pub fn month(self) -> u32 {
    self.0.month()
  }

  pub fn day(self) -> u32 {
    self.0.day()
  }

  /// Local midnight of this day.
  pub fn start(self) -> NaiveDateTime {
    self.0.and_time(NaiveTime::MIN)
  }

  /// Parses one `YYYY-MM-DD` token by
  /// building the date from its
  /// components, never through an epoch
  /// offset, so the result cannot drift
  /// across midnight.
  pub fn parse_token(
    token: &str
  ) -> Result<Self, DateParseError> {
    let token = token.trim();
    let malformed = || {
      DateParseError::Malformed {
        token: token.to_string()
      }
    };

    let mut parts = token.split('-');
    let (
      Some(year),
      Some(month),
      Some(day),
      None
    ) = (
      parts.next(),
      parts.next(),
      parts.next(),
      parts.next()
    )
    else {
      return Err(malformed());
    };

    let numeric = |part: &str,
                   max_len: usize| {
      !part.is_empty()
        && part.len() <= max_len
        && part
          .bytes()
          .all(|b| b.is_ascii_digit())
    };
    if year.len() != 4
      || !numeric(year, 4)
      || !numeric(month, 2)
      || !numeric(day, 2)
    {
      return Err(malformed());
    }

    let year = year
      .parse::<i32>()
      .map_err(|_| malformed())?;
    let month = month
      .parse::<u32>()
      .map_err(|_| malformed())?;
    let day = day
      .parse::<u32>()
      .map_err(|_| malformed())?;

    Self::from_ymd(year, month, day)
      .ok_or_else(|| {
        DateParseError::OutOfRange {
          token: token.to_string()
        }
      })
  }
}

impl From<NaiveDateTime>
  for CalendarDay
{
  fn from(
    instant: NaiveDateTime
  ) -> Self {
    Self::of(instant)
  }
}

impl fmt::Display for CalendarDay {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "{:04}-{:02}-{:02}",
      self.year(),
      self.month(),
      self.day()
    )
  }
}

impl FromStr for CalendarDay {
  type Err = DateParseError;

  fn from_str(
    raw: &str
  ) -> Result<Self, Self::Err> {
    Self::parse_token(raw)
  }
}

pub fn same_day(
  a: NaiveDateTime,
  b: NaiveDateTime
) -> bool {
  CalendarDay::of(a)
    == CalendarDay::of(b)
}
