use std::fmt;

use chrono::NaiveDateTime;
use percent_encoding::{
  AsciiSet,
  CONTROLS,
  percent_decode_str,
  utf8_percent_encode
};
use tracing::{
  debug,
  warn
};
use url::form_urlencoded;

use crate::day::CalendarDay;
use crate::error::DateParseError;
use crate::selection::{
  SETTINGS_ITEM,
  SelectionState,
  SelectionStore
};

pub const DATE_PARAM: &str = "date";
pub const HOME_PATH: &str = "/home";
/// Path segment routed to the home
/// page; no feed may use it as a name.
pub const HOME_SEGMENT: &str = "home";
pub const SETTINGS_PATH: &str =
  "/settings";

const PATH_SEGMENT: &AsciiSet =
  &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Address bar projection of a
/// selection: a path plus the optional
/// `date` query parameter.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct UrlState {
  pub path: String,
  pub date: Option<String>
}

impl UrlState {
  /// Normalizes a router-reported
  /// location. Query parameters other
  /// than `date` are not tracked.
  pub fn from_location(
    path: &str,
    query: &str
  ) -> Self {
    let path = if path.is_empty() {
      "/".to_string()
    } else {
      path.to_string()
    };
    Self {
      path,
      date: query_param(
        query, DATE_PARAM
      )
    }
  }

  pub fn query(&self) -> String {
    match &self.date {
      | Some(date) => {
        format!("{DATE_PARAM}={date}")
      }
      | None => String::new()
    }
  }

  pub fn href(&self) -> String {
    match &self.date {
      | Some(_) => {
        format!(
          "{}?{}",
          self.path,
          self.query()
        )
      }
      | None => self.path.clone()
    }
  }
}

impl fmt::Display for UrlState {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(&self.href())
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum RoutePath {
  Index,
  Home,
  Settings,
  Item(String)
}

impl RoutePath {
  pub fn parse(path: &str) -> Self {
    let segment = path
      .trim_start_matches('/')
      .split('/')
      .next()
      .unwrap_or_default();
    let segment =
      percent_decode_str(segment)
        .decode_utf8_lossy()
        .into_owned();

    match segment.as_str() {
      | "" => Self::Index,
      | HOME_SEGMENT => Self::Home,
      | SETTINGS_ITEM => Self::Settings,
      | _ => Self::Item(segment)
    }
  }

  /// The `:itemId` route parameter, if
  /// the path carries one.
  pub fn item(&self) -> Option<&str> {
    match self {
      | Self::Settings => {
        Some(SETTINGS_ITEM)
      }
      | Self::Item(item) => Some(item),
      | Self::Index | Self::Home => None
    }
  }
}

pub fn item_path(item: &str) -> String {
  if item.is_empty() {
    return HOME_PATH.to_string();
  }
  if item == SETTINGS_ITEM {
    return SETTINGS_PATH.to_string();
  }
  format!(
    "/{}",
    utf8_percent_encode(
      item,
      PATH_SEGMENT
    )
  )
}

pub fn query_param(
  query: &str,
  key: &str
) -> Option<String> {
  let query =
    query.trim_start_matches('?');
  form_urlencoded::parse(
    query.as_bytes()
  )
  .find(|(name, _)| name == key)
  .map(|(_, value)| value.into_owned())
}

pub fn format_date_param(
  days: impl IntoIterator<
    Item = CalendarDay
  >
) -> String {
  days
    .into_iter()
    .map(|day| day.to_string())
    .collect::<Vec<_>>()
    .join(",")
}

/// Splits a `date` parameter on commas.
/// Empty tokens are skipped; any other
/// bad token fails the whole parameter.
pub fn parse_date_param(
  raw: &str
) -> Result<Vec<CalendarDay>, DateParseError>
{
  raw
    .split(',')
    .map(str::trim)
    .filter(|token| !token.is_empty())
    .map(CalendarDay::parse_token)
    .collect()
}

/// Serializes a selection. Only the
/// primary date is written; with no date
/// the existing parameter is kept
/// rather than dropped.
pub fn encode(
  state: &SelectionState,
  current_date_param: Option<&str>
) -> UrlState {
  if state.is_settings() {
    return UrlState {
      path: SETTINGS_PATH.to_string(),
      date: None
    };
  }

  let path =
    item_path(&state.selected_item);
  let date = match state.selected_day()
  {
    | Some(day) => Some(day.to_string()),
    | None => {
      current_date_param
        .filter(|raw| !raw.is_empty())
        .map(str::to_string)
    }
  };

  UrlState { path, date }
}

/// The parts of a selection an address
/// bar carries.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct DecodedUrl {
  pub item:       Option<String>,
  pub date:       Option<NaiveDateTime>,
  /// Settings route: any date is
  /// dropped and the query ignored.
  pub clear_date: bool
}

pub fn decode(
  path: &str,
  query: &str
) -> DecodedUrl {
  let route = RoutePath::parse(path);
  if route == RoutePath::Settings {
    return DecodedUrl {
      item:       Some(
        SETTINGS_ITEM.to_string()
      ),
      date:       None,
      clear_date: true
    };
  }

  let item =
    route.item().map(str::to_string);
  let date = query_param(
    query, DATE_PARAM
  )
  .and_then(|raw| {
    match parse_date_param(&raw) {
      | Ok(days) => {
        days
          .first()
          .map(|day| day.start())
      }
      | Err(error) => {
        warn!(
          %error,
          param = %raw,
          "skipping unparsable date \
           parameter"
        );
        None
      }
    }
  });

  DecodedUrl {
    item,
    date,
    clear_date: false
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub enum NavState {
  Idle,
  Navigating { target: UrlState }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum LocationKind {
  /// The location a pending navigation
  /// asked for; nothing to decode.
  Settled,
  /// Load, back/forward or a manual
  /// edit; decode it.
  External
}

#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
struct AppliedFields {
  location: Option<UrlState>,
  item:     bool,
  date:     bool
}

/// Keeps the selection and the address
/// bar consistent in both directions.
///
/// Encodes only navigate while `Idle`.
/// While a replace is in flight they are
/// dropped; the caller reconciles again
/// once the router reports the target
/// location, so nothing is lost.
#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct UrlSynchronizer {
  nav:     NavState,
  current: Option<UrlState>,
  applied: AppliedFields
}

impl Default for UrlSynchronizer {
  fn default() -> Self {
    Self::new()
  }
}

impl UrlSynchronizer {
  pub fn new() -> Self {
    Self {
      nav:     NavState::Idle,
      current: None,
      applied: AppliedFields::default()
    }
  }

  pub fn nav_state(&self) -> &NavState {
    &self.nav
  }

  pub fn is_navigating(&self) -> bool {
    matches!(
      self.nav,
      NavState::Navigating { .. }
    )
  }

  pub fn current(
    &self
  ) -> Option<&UrlState> {
    self.current.as_ref()
  }

  pub fn observe_location(
    &mut self,
    path: &str,
    query: &str
  ) -> LocationKind {
    let observed =
      UrlState::from_location(
        path, query
      );
    self.current =
      Some(observed.clone());

    match &self.nav {
      | NavState::Navigating {
        target
      } if *target == observed => {
        debug!(url = %observed, "navigation settled");
        self.nav = NavState::Idle;
        self.applied = AppliedFields {
          location: Some(observed),
          item:     true,
          date:     true
        };
        LocationKind::Settled
      }
      | NavState::Navigating {
        target
      } => {
        debug!(
          expected = %target,
          observed = %observed,
          "navigation superseded by \
           external location"
        );
        self.nav = NavState::Idle;
        LocationKind::External
      }
      | NavState::Idle => {
        LocationKind::External
      }
    }
  }

  /// Decodes a location into the store.
  /// Each field is applied at most once
  /// per distinct location, so repeated
  /// reports of the same URL are no-ops.
  pub fn apply_location(
    &mut self,
    store: &mut SelectionStore,
    path: &str,
    query: &str
  ) -> bool {
    let observed =
      UrlState::from_location(
        path, query
      );
    if self.applied.location.as_ref()
      != Some(&observed)
    {
      self.applied = AppliedFields {
        location: Some(observed),
        item:     false,
        date:     false
      };
    }

    let decoded = decode(path, query);
    let mut changed = false;

    if let Some(item) = decoded.item
      && !self.applied.item
    {
      self.applied.item = true;
      if item
        != store.state().selected_item
      {
        debug!(item = %item, "applying item from url");
        changed |= store.set_item(item);
      }
    }

    if decoded.clear_date {
      changed |= store.set_date(None);
    } else if let Some(date) =
      decoded.date
      && !self.applied.date
    {
      self.applied.date = true;
      debug!(date = %date, "applying date from url");
      changed |=
        store.set_date(Some(date));
    }

    changed
  }

  /// Returns the location to replace
  /// the address bar with, if the
  /// selection no longer matches it.
  pub fn reconcile(
    &mut self,
    state: &SelectionState
  ) -> Option<UrlState> {
    if let NavState::Navigating {
      target
    } = &self.nav
    {
      debug!(
        pending = %target,
        "navigation in flight; \
         deferring encode"
      );
      return None;
    }

    let current_date = self
      .current
      .as_ref()
      .and_then(|url| {
        url.date.as_deref()
      });
    let target =
      encode(state, current_date);
    if self.current.as_ref()
      == Some(&target)
    {
      return None;
    }

    debug!(target = %target, "navigating");
    self.nav = NavState::Navigating {
      target: target.clone()
    };
    Some(target)
  }
}
