use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::day::CalendarDay;

/// Day-level multi selection for the
/// date picker.
///
/// Membership is keyed by
/// [`CalendarDay`], so two clicks on the
/// same day at different instants
/// collapse into one member. Each member
/// remembers the instant that introduced
/// it.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct MultiDateSelector {
  days:    BTreeMap<
    CalendarDay,
    NaiveDateTime
  >,
  primary: Option<NaiveDateTime>,
  seeded:  bool
}

impl MultiDateSelector {
  pub fn new() -> Self {
    Self::default()
  }

  /// One-shot seed. Only the first call
  /// has any effect, so a day the user
  /// removed is never re-added by a
  /// later seed.
  pub fn initialize(
    &mut self,
    seed: Option<NaiveDateTime>
  ) -> bool {
    if self.seeded {
      return false;
    }
    self.seeded = true;

    let Some(seed) = seed else {
      return false;
    };
    self
      .days
      .entry(CalendarDay::of(seed))
      .or_insert(seed);
    if self.primary.is_none() {
      self.primary = Some(seed);
    }
    debug!(seed = %seed, "seeded date selection");
    true
  }

  pub fn is_seeded(&self) -> bool {
    self.seeded
  }

  pub fn contains(
    &self,
    instant: NaiveDateTime
  ) -> bool {
    self
      .days
      .contains_key(&CalendarDay::of(
        instant
      ))
  }

  pub fn contains_day(
    &self,
    day: CalendarDay
  ) -> bool {
    self.days.contains_key(&day)
  }

  pub fn days(
    &self
  ) -> impl Iterator<Item = CalendarDay> + '_
  {
    self.days.keys().copied()
  }

  pub fn len(&self) -> usize {
    self.days.len()
  }

  pub fn is_empty(&self) -> bool {
    self.days.is_empty()
  }

  pub fn primary(
    &self
  ) -> Option<NaiveDateTime> {
    self.primary
  }

  pub fn primary_day(
    &self
  ) -> Option<CalendarDay> {
    self.primary.map(CalendarDay::of)
  }

  /// Collapses the selection to `day`
  /// and returns it as the proposed
  /// primary date.
  pub fn select_single(
    &mut self,
    day: NaiveDateTime
  ) -> NaiveDateTime {
    self.days.clear();
    self
      .days
      .insert(CalendarDay::of(day), day);
    self.primary = Some(day);
    day
  }

  /// Flips membership of `day`. Returns
  /// whether the day is selected
  /// afterwards. The primary date is left
  /// alone.
  pub fn toggle(
    &mut self,
    day: NaiveDateTime
  ) -> bool {
    let key = CalendarDay::of(day);
    if self.days.remove(&key).is_some()
    {
      false
    } else {
      self.days.insert(key, day);
      true
    }
  }

  /// Latest selected day wins. An empty
  /// selection keeps the previous
  /// primary and proposes nothing.
  pub fn resolve_primary(
    &mut self
  ) -> Option<NaiveDateTime> {
    let (_, latest) =
      self.days.last_key_value()?;
    let latest = *latest;
    self.primary = Some(latest);
    Some(latest)
  }

  /// Day-cell click. Without a modifier
  /// key every click is a single select;
  /// with one it toggles the day and
  /// re-resolves the primary.
  pub fn click(
    &mut self,
    day: NaiveDateTime,
    modifier: bool
  ) -> Option<NaiveDateTime> {
    if !modifier {
      return Some(
        self.select_single(day)
      );
    }

    let selected = self.toggle(day);
    debug!(
      day = %CalendarDay::of(day),
      selected,
      count = self.days.len(),
      "toggled day"
    );
    self.resolve_primary()
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(
    m: u32,
    d: u32,
    h: u32
  ) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, m, d)
      .expect("valid date")
      .and_hms_opt(h, 0, 0)
      .expect("valid time")
  }

  fn selected(
    selector: &MultiDateSelector
  ) -> Vec<String> {
    selector
      .days()
      .map(|day| day.to_string())
      .collect()
  }

  #[test]
  fn toggle_uses_day_granularity() {
    let mut selector =
      MultiDateSelector::new();

    assert!(selector.toggle(at(3, 5, 8)));
    assert!(
      selector.contains(at(3, 5, 22))
    );

    assert!(
      !selector.toggle(at(3, 5, 22))
    );
    assert!(
      !selector.contains(at(3, 5, 8))
    );
    assert!(selector.is_empty());
  }

  #[test]
  fn same_day_instants_collapse_to_one_member()
   {
    let mut selector =
      MultiDateSelector::new();
    selector.toggle(at(3, 5, 8));
    selector.toggle(at(3, 6, 8));
    selector.click(at(3, 7, 1), true);
    selector.click(at(3, 7, 23), true);

    assert_eq!(selector.len(), 2);
    assert_eq!(
      selected(&selector),
      vec!["2024-03-05", "2024-03-06"]
    );
  }

  #[test]
  fn resolve_primary_picks_latest_day()
  {
    let mut selector =
      MultiDateSelector::new();
    selector.toggle(at(3, 10, 0));
    selector.toggle(at(1, 2, 0));
    selector.toggle(at(3, 5, 23));

    assert_eq!(
      selector.resolve_primary(),
      Some(at(3, 10, 0))
    );
    assert_eq!(
      selector.primary(),
      Some(at(3, 10, 0))
    );
  }

  #[test]
  fn resolve_primary_on_empty_set_keeps_previous()
   {
    let mut selector =
      MultiDateSelector::new();
    selector.select_single(at(3, 1, 0));
    selector.toggle(at(3, 1, 0));
    assert!(selector.is_empty());

    assert_eq!(
      selector.resolve_primary(),
      None
    );
    assert_eq!(
      selector.primary(),
      Some(at(3, 1, 0))
    );
  }

  #[test]
  fn select_single_collapses_any_selection()
   {
    let mut selector =
      MultiDateSelector::new();
    for day in [1, 5, 9] {
      selector.toggle(at(3, day, 0));
    }

    selector.select_single(at(3, 5, 12));
    assert_eq!(
      selected(&selector),
      vec!["2024-03-05"]
    );

    selector.select_single(at(3, 5, 12));
    assert_eq!(
      selected(&selector),
      vec!["2024-03-05"]
    );
    assert_eq!(
      selector.primary(),
      Some(at(3, 5, 12))
    );
  }

  #[test]
  fn plain_click_discards_multi_selection()
   {
    let mut selector =
      MultiDateSelector::new();
    selector.initialize(Some(at(3, 1, 9)));
    assert_eq!(
      selector.click(at(3, 5, 0), true),
      Some(at(3, 5, 0))
    );
    assert_eq!(selector.len(), 2);

    assert_eq!(
      selector.click(at(3, 10, 0), false),
      Some(at(3, 10, 0))
    );
    assert_eq!(
      selected(&selector),
      vec!["2024-03-10"]
    );
  }

  #[test]
  fn removing_every_day_proposes_nothing()
   {
    let mut selector =
      MultiDateSelector::new();
    selector.initialize(Some(at(3, 1, 9)));
    assert_eq!(
      selector.click(at(3, 1, 0), true),
      None
    );
    assert_eq!(
      selector.primary(),
      Some(at(3, 1, 9))
    );
  }

  #[test]
  fn seed_applies_only_once() {
    let mut selector =
      MultiDateSelector::new();
    assert!(
      selector
        .initialize(Some(at(3, 1, 9)))
    );
    selector.toggle(at(3, 1, 9));
    assert!(selector.is_empty());

    assert!(
      !selector
        .initialize(Some(at(3, 1, 9)))
    );
    assert!(selector.is_empty());
    assert!(selector.is_seeded());
  }
}
