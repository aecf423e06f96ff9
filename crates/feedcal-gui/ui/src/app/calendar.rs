use chrono::{
  Datelike,
  Days,
  Months,
  NaiveDate,
  NaiveTime
};

const GRID_WEEKS: u64 = 6;

pub(crate) fn start_of_month(
  date: NaiveDate
) -> NaiveDate {
  date.with_day(1).unwrap_or(date)
}

/// Moves a month start forward or back
/// by `delta` months; out-of-range shifts
/// leave it where it was.
pub(crate) fn shift_month(
  month: NaiveDate,
  delta: i32
) -> NaiveDate {
  let start = start_of_month(month);
  let months =
    Months::new(delta.unsigned_abs());
  let shifted = if delta >= 0 {
    start.checked_add_months(months)
  } else {
    start.checked_sub_months(months)
  };
  shifted.unwrap_or(start)
}

/// Six Monday-first weeks covering the
/// month that contains `month`.
pub(crate) fn month_grid(
  month: NaiveDate
) -> Vec<NaiveDate> {
  let first = start_of_month(month);
  let lead = u64::from(
    first
      .weekday()
      .num_days_from_monday()
  );
  let Some(grid_start) =
    first.checked_sub_days(Days::new(lead))
  else {
    return Vec::new();
  };

  grid_start
    .iter_days()
    .take((GRID_WEEKS * 7) as usize)
    .collect()
}

pub(crate) fn format_clock(
  time: NaiveTime
) -> String {
  time.format("%H:%M:%S").to_string()
}

/// `Mar 5, 2024`
pub(crate) fn format_medium_date(
  date: NaiveDate
) -> String {
  date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
  use chrono::Weekday;

  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn grid_starts_on_monday_before_first()
  {
    let grid =
      month_grid(date(2024, 3, 17));
    assert_eq!(grid.len(), 42);
    assert_eq!(grid[0], date(2024, 2, 26));
    assert_eq!(
      grid[0].weekday(),
      Weekday::Mon
    );
    assert!(
      grid.contains(&date(2024, 3, 31))
    );
  }

  #[test]
  fn month_already_on_monday_has_no_lead()
  {
    let grid =
      month_grid(date(2024, 4, 1));
    assert_eq!(grid[0], date(2024, 4, 1));
  }

  #[test]
  fn shifting_crosses_year_boundaries() {
    assert_eq!(
      shift_month(date(2024, 1, 31), -1),
      date(2023, 12, 1)
    );
    assert_eq!(
      shift_month(date(2024, 12, 5), 1),
      date(2025, 1, 1)
    );
  }

  #[test]
  fn clock_and_medium_date_formats() {
    let time =
      NaiveTime::from_hms_opt(7, 4, 9)
        .expect("valid time");
    assert_eq!(
      format_clock(time),
      "07:04:09"
    );
    assert_eq!(
      format_medium_date(date(2024, 3, 5)),
      "Mar 5, 2024"
    );
  }
}
