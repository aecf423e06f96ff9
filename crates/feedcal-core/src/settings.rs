use std::cell::{
  Cell,
  RefCell
};

use feedcal_gui_shared::{
  ThemePreference,
  ThemeSettings
};
use tracing::{
  debug,
  error,
  info
};

use crate::error::SettingsError;

/// Remote key-value endpoint holding
/// the settings document.
#[allow(async_fn_in_trait)]
pub trait SettingsClient {
  async fn fetch(
    &self
  ) -> Result<ThemeSettings, SettingsError>;

  async fn update(
    &self,
    settings: &ThemeSettings
  ) -> Result<ThemeSettings, SettingsError>;
}

/// Read-modify-invalidate access to the
/// theme setting.
///
/// Reads are cached until a write
/// succeeds. Writes set the local theme
/// before the request goes out and keep
/// it when the request fails.
#[derive(Debug)]
pub struct SettingsBridge<C> {
  client: C,
  cache:  RefCell<Option<ThemeSettings>>,
  local:  Cell<ThemePreference>
}

impl<C: SettingsClient> SettingsBridge<C> {
  pub fn new(
    client: C,
    local: ThemePreference
  ) -> Self {
    Self {
      client,
      cache: RefCell::new(None),
      local: Cell::new(local)
    }
  }

  pub fn client(&self) -> &C {
    &self.client
  }

  pub fn local_theme(
    &self
  ) -> ThemePreference {
    self.local.get()
  }

  pub fn cached(
    &self
  ) -> Option<ThemeSettings> {
    *self.cache.borrow()
  }

  pub fn invalidate(&self) {
    self.cache.replace(None);
  }

  pub async fn fetch_theme(
    &self
  ) -> Result<ThemeSettings, SettingsError>
  {
    if let Some(cached) = self.cached() {
      debug!(theme = %cached.theme, "settings served from cache");
      return Ok(cached);
    }

    let settings = self
      .client
      .fetch()
      .await
      .inspect_err(|error| {
        error!(%error, "fetching settings failed");
      })?;
    info!(theme = %settings.theme, "fetched settings");
    self.cache.replace(Some(settings));
    self.local.set(settings.theme);
    Ok(settings)
  }

  pub async fn update_theme(
    &self,
    theme: ThemePreference
  ) -> Result<ThemeSettings, SettingsError>
  {
    self.local.set(theme);

    let saved = self
      .client
      .update(&ThemeSettings { theme })
      .await
      .inspect_err(|error| {
        error!(
          %error,
          theme = %theme,
          "updating settings failed; \
           local theme kept"
        );
      })?;
    info!(theme = %saved.theme, "updated settings");
    self.invalidate();
    Ok(saved)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct FakeClient {
    stored:      RefCell<ThemeSettings>,
    fetches:     Cell<usize>,
    fail_writes: bool,
    fail_reads:  bool
  }

  impl SettingsClient for FakeClient {
    async fn fetch(
      &self
    ) -> Result<ThemeSettings, SettingsError>
    {
      self
        .fetches
        .set(self.fetches.get() + 1);
      if self.fail_reads {
        return Err(
          SettingsError::Network(
            "connection refused"
              .to_string()
          )
        );
      }
      Ok(*self.stored.borrow())
    }

    async fn update(
      &self,
      settings: &ThemeSettings
    ) -> Result<ThemeSettings, SettingsError>
    {
      if self.fail_writes {
        return Err(
          SettingsError::Status {
            status:  500,
            message: "boom".to_string()
          }
        );
      }
      self.stored.replace(*settings);
      Ok(*settings)
    }
  }

  #[tokio::test]
  async fn reads_are_cached_until_a_write()
  {
    let bridge = SettingsBridge::new(
      FakeClient::default(),
      ThemePreference::Light
    );

    let first = bridge
      .fetch_theme()
      .await
      .expect("fetch");
    assert_eq!(
      first.theme,
      ThemePreference::Dark
    );
    assert_eq!(
      bridge.local_theme(),
      ThemePreference::Dark
    );
    bridge
      .fetch_theme()
      .await
      .expect("cached fetch");
    assert_eq!(
      bridge.client().fetches.get(),
      1
    );

    bridge
      .update_theme(
        ThemePreference::System
      )
      .await
      .expect("update");
    assert_eq!(bridge.cached(), None);

    let after = bridge
      .fetch_theme()
      .await
      .expect("fetch after write");
    assert_eq!(
      after.theme,
      ThemePreference::System
    );
    assert_eq!(
      bridge.client().fetches.get(),
      2
    );
  }

  #[tokio::test]
  async fn failed_write_keeps_optimistic_theme_and_cache()
   {
    let bridge = SettingsBridge::new(
      FakeClient {
        fail_writes: true,
        ..FakeClient::default()
      },
      ThemePreference::Dark
    );
    bridge
      .fetch_theme()
      .await
      .expect("fetch");

    let error = bridge
      .update_theme(
        ThemePreference::Light
      )
      .await
      .expect_err("write fails");
    assert_eq!(
      error.to_string(),
      "settings endpoint answered \
       500: boom"
    );
    assert_eq!(
      bridge.local_theme(),
      ThemePreference::Light
    );
    assert_eq!(
      bridge.cached().map(|s| s.theme),
      Some(ThemePreference::Dark)
    );
  }

  #[tokio::test]
  async fn failed_read_is_not_cached() {
    let bridge = SettingsBridge::new(
      FakeClient {
        fail_reads: true,
        ..FakeClient::default()
      },
      ThemePreference::System
    );

    assert!(matches!(
      bridge.fetch_theme().await,
      Err(SettingsError::Network(_))
    ));
    assert_eq!(bridge.cached(), None);
    assert_eq!(
      bridge.local_theme(),
      ThemePreference::System
    );
  }
}
