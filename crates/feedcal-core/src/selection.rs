use std::fmt;

use chrono::NaiveDateTime;
use tracing::{
  debug,
  warn
};

use crate::day::CalendarDay;

/// Item name of the settings view. It
/// never carries a date.
pub const SETTINGS_ITEM: &str =
  "settings";

pub const DEFAULT_ITEM: &str =
  "Personal";

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct SelectionState {
  pub selected_item: String,
  pub selected_date:
    Option<NaiveDateTime>
}

impl SelectionState {
  /// Builds a state that already holds
  /// the settings invariant: a settings
  /// selection drops the date.
  pub fn new(
    item: impl Into<String>,
    date: Option<NaiveDateTime>
  ) -> Self {
    let item = item.into();
    let date = if item == SETTINGS_ITEM
    {
      None
    } else {
      date
    };
    Self {
      selected_item: item,
      selected_date: date
    }
  }

  pub fn is_settings(&self) -> bool {
    self.selected_item == SETTINGS_ITEM
  }

  pub fn selected_day(
    &self
  ) -> Option<CalendarDay> {
    self
      .selected_date
      .map(CalendarDay::of)
  }
}

type Observer =
  Box<dyn FnMut(&SelectionState)>;

/// Single writable source of truth for
/// the selected item and date.
///
/// Observers run synchronously after a
/// mutation has been fully applied, so
/// none of them can see the settings
/// item paired with a date.
pub struct SelectionStore {
  state:     SelectionState,
  observers: Vec<Observer>
}

impl SelectionStore {
  pub fn new(
    initial: SelectionState
  ) -> Self {
    Self {
      state:     SelectionState::new(
        initial.selected_item,
        initial.selected_date
      ),
      observers: Vec::new()
    }
  }

  pub fn get(&self) -> SelectionState {
    self.state.clone()
  }

  pub fn state(
    &self
  ) -> &SelectionState {
    &self.state
  }

  pub fn subscribe(
    &mut self,
    observer: impl FnMut(&SelectionState)
    + 'static
  ) {
    self
      .observers
      .push(Box::new(observer));
  }

  /// Returns whether anything changed.
  pub fn set_item(
    &mut self,
    name: impl Into<String>
  ) -> bool {
    let name = name.into();
    if name.trim().is_empty() {
      warn!(
        "ignoring empty item selection"
      );
      return false;
    }

    let next = SelectionState::new(
      name,
      self.state.selected_date
    );
    self.replace(next)
  }

  /// Rejected while the settings item is
  /// active unless the date is being
  /// cleared.
  pub fn set_date(
    &mut self,
    date: Option<NaiveDateTime>
  ) -> bool {
    if self.state.is_settings()
      && date.is_some()
    {
      debug!(
        "settings view carries no date; \
         rejecting date update"
      );
      return false;
    }

    let next = SelectionState {
      selected_item: self
        .state
        .selected_item
        .clone(),
      selected_date: date
    };
    self.replace(next)
  }

  fn replace(
    &mut self,
    next: SelectionState
  ) -> bool {
    if next == self.state {
      return false;
    }

    debug!(
      item = %next.selected_item,
      date = ?next.selected_date,
      "selection changed"
    );
    self.state = next;
    for observer in &mut self.observers
    {
      observer(&self.state);
    }
    true
  }
}

impl fmt::Debug for SelectionStore {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.debug_struct("SelectionStore")
      .field("state", &self.state)
      .field(
        "observers",
        &self.observers.len()
      )
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::rc::Rc;

  use chrono::NaiveDate;

  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
      .and_hms_opt(9, 30, 0)
      .expect("valid time")
  }

  fn recording_store(
    initial: SelectionState
  ) -> (
    SelectionStore,
    Rc<RefCell<Vec<SelectionState>>>
  ) {
    let seen = Rc::new(RefCell::new(
      Vec::<SelectionState>::new()
    ));
    let mut store =
      SelectionStore::new(initial);
    let sink = seen.clone();
    store.subscribe(move |state| {
      sink.borrow_mut().push(
        state.clone()
      );
    });
    (store, seen)
  }

  #[test]
  fn switching_to_settings_clears_date_in_one_update()
   {
    let (mut store, seen) =
      recording_store(
        SelectionState::new(
          "Personal",
          Some(date(2024, 3, 1))
        )
      );

    assert!(
      store.set_item(SETTINGS_ITEM)
    );

    assert_eq!(
      store.get(),
      SelectionState {
        selected_item: SETTINGS_ITEM
          .to_string(),
        selected_date: None
      }
    );
    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen.iter().all(|state| {
      !(state.is_settings()
        && state
          .selected_date
          .is_some())
    }));
  }

  #[test]
  fn settings_rejects_dates_but_allows_clearing()
   {
    let (mut store, seen) =
      recording_store(
        SelectionState::new(
          SETTINGS_ITEM,
          Some(date(2024, 3, 1))
        )
      );
    assert_eq!(
      store.state().selected_date,
      None
    );

    assert!(
      !store.set_date(Some(date(
        2024, 3, 2
      )))
    );
    assert!(!store.set_date(None));
    assert_eq!(
      store.state().selected_date,
      None
    );
    assert!(seen.borrow().is_empty());
  }

  #[test]
  fn unchanged_values_do_not_notify() {
    let (mut store, seen) =
      recording_store(
        SelectionState::new(
          "Work",
          Some(date(2024, 1, 15))
        )
      );

    assert!(!store.set_item("Work"));
    assert!(
      !store.set_date(Some(date(
        2024, 1, 15
      )))
    );
    assert!(!store.set_item("  "));
    assert!(seen.borrow().is_empty());

    assert!(store.set_item("Family"));
    assert!(
      store.set_date(Some(date(
        2024, 1, 16
      )))
    );
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(
      store.state().selected_day(),
      CalendarDay::from_ymd(2024, 1, 16)
    );
  }
}
