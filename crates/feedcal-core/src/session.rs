use chrono::NaiveDateTime;
use tracing::{
  debug,
  info
};

use crate::config::DashboardConfig;
use crate::day::CalendarDay;
use crate::multi_date::MultiDateSelector;
use crate::selection::{
  SelectionState,
  SelectionStore
};
use crate::url_sync::{
  LocationKind,
  UrlState,
  UrlSynchronizer
};

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum SessionEvent {
  /// The router reported the current
  /// location: page load, back/forward,
  /// a manual edit, or the end of a
  /// navigation we asked for.
  LocationChanged {
    path:  String,
    query: String
  },
  SelectItem(String),
  ClickDay {
    day:      NaiveDateTime,
    modifier: bool
  }
}

/// Side effects for the view layer to
/// carry out.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum Intent {
  /// Replace the current history entry.
  NavigateTo(UrlState)
}

/// One dashboard session: the selection
/// store, the date picker selection and
/// the URL synchronizer, driven by
/// discrete UI events.
#[derive(Debug)]
pub struct Session {
  store:      SelectionStore,
  dates:      MultiDateSelector,
  sync:       UrlSynchronizer,
  started_at: NaiveDateTime,
  revision:   u64
}

impl Session {
  pub fn new(
    config: &DashboardConfig,
    now: NaiveDateTime
  ) -> Self {
    info!(
      item = %config.default_item,
      started_at = %now,
      "starting dashboard session"
    );
    Self {
      store:      SelectionStore::new(
        SelectionState::new(
          config.default_item.clone(),
          Some(now)
        )
      ),
      dates:      MultiDateSelector::new(
      ),
      sync:       UrlSynchronizer::new(),
      started_at: now,
      revision:   0
    }
  }

  pub fn selection(
    &self
  ) -> &SelectionState {
    self.store.state()
  }

  pub fn dates(
    &self
  ) -> &MultiDateSelector {
    &self.dates
  }

  pub fn url(
    &self
  ) -> Option<&UrlState> {
    self.sync.current()
  }

  pub fn is_navigating(&self) -> bool {
    self.sync.is_navigating()
  }

  /// Bumped on every handled event;
  /// views compare it to decide whether
  /// to re-render.
  pub fn revision(&self) -> u64 {
    self.revision
  }

  pub fn subscribe(
    &mut self,
    observer: impl FnMut(&SelectionState)
    + 'static
  ) {
    self.store.subscribe(observer);
  }

  pub fn handle(
    &mut self,
    event: SessionEvent
  ) -> Vec<Intent> {
    self.revision =
      self.revision.wrapping_add(1);
    debug!(?event, "session event");

    match event {
      | SessionEvent::LocationChanged {
        path,
        query
      } => {
        let kind = self
          .sync
          .observe_location(
            &path, &query
          );
        if kind == LocationKind::External
        {
          self.sync.apply_location(
            &mut self.store,
            &path,
            &query
          );
          self.restore_date();
        }
        if !self.dates.is_seeded() {
          self.dates.initialize(
            self
              .store
              .state()
              .selected_date
          );
        }
      }
      | SessionEvent::SelectItem(item) => {
        self.select_item(item);
      }
      | SessionEvent::ClickDay {
        day,
        modifier
      } => {
        if let Some(primary) =
          self.dates.click(day, modifier)
        {
          self
            .store
            .set_date(Some(primary));
        }
      }
    }

    self.reconcile()
  }

  fn select_item(
    &mut self,
    item: String
  ) {
    if self.store.set_item(item) {
      self.restore_date();
    }
  }

  /// Off settings a date must be set
  /// again: the selector's primary, or
  /// the session start.
  fn restore_date(&mut self) {
    let state = self.store.state();
    if !state.is_settings()
      && state.selected_date.is_none()
    {
      let date = self
        .dates
        .primary()
        .unwrap_or(self.started_at);
      debug!(
        day = %CalendarDay::of(date),
        "re-establishing date off \
         settings"
      );
      self.store.set_date(Some(date));
    }
  }

  fn reconcile(&mut self) -> Vec<Intent> {
    self
      .sync
      .reconcile(self.store.state())
      .map(Intent::NavigateTo)
      .into_iter()
      .collect()
  }
}
