mod clock;
mod date_picker;
mod feed_content;
mod header;
mod settings_panel;
mod sidebar;

pub use clock::Clock;
pub use date_picker::DatePicker;
pub use feed_content::FeedContent;
pub use header::AppHeader;
pub use settings_panel::SettingsPanel;
pub use sidebar::Sidebar;
