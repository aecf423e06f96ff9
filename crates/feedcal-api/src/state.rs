use std::sync::Arc;

use feedcal_gui_shared::ThemeSettings;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
  pub settings:        Arc<RwLock<ThemeSettings>>,
  pub allowed_origins: Arc<[String]>
}

impl AppState {
  pub fn new(
    settings: ThemeSettings,
    allowed_origins: Vec<String>
  ) -> Self {
    Self {
      settings:        Arc::new(
        RwLock::new(settings)
      ),
      allowed_origins: allowed_origins
        .into()
    }
  }
}
