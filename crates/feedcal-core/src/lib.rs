pub mod config;
pub mod day;
pub mod error;
pub mod multi_date;
pub mod selection;
pub mod session;
pub mod settings;
pub mod url_sync;

pub use day::CalendarDay;
pub use error::{
  ConfigError,
  DateParseError,
  SettingsError
};
pub use multi_date::MultiDateSelector;
pub use selection::{
  SETTINGS_ITEM,
  SelectionState,
  SelectionStore
};
pub use session::{
  Intent,
  Session,
  SessionEvent
};
pub use url_sync::{
  UrlState,
  UrlSynchronizer
};
