use std::ops::Deref;
use std::rc::Rc;

use feedcal_core::SettingsError;
use feedcal_core::settings::{
  SettingsBridge,
  SettingsClient
};
use feedcal_gui_shared::{
  ApiErrorBody,
  ThemeSettings
};
use gloo::net::http::{
  Request,
  Response
};

const SETTINGS_PATH: &str =
  "/api/settings";

/// `GET`/`PUT` against the settings
/// service over `fetch`.
#[derive(Debug, Clone)]
pub struct HttpSettingsClient {
  url: String
}

impl HttpSettingsClient {
  pub fn new(base_url: &str) -> Self {
    Self {
      url: format!(
        "{}{SETTINGS_PATH}",
        base_url.trim_end_matches('/')
      )
    }
  }
}

impl SettingsClient
  for HttpSettingsClient
{
  async fn fetch(
    &self
  ) -> Result<ThemeSettings, SettingsError>
  {
    let response = Request::get(&self.url)
      .send()
      .await
      .map_err(|e| {
        SettingsError::Network(
          e.to_string()
        )
      })?;
    decode_settings(response).await
  }

  async fn update(
    &self,
    settings: &ThemeSettings
  ) -> Result<ThemeSettings, SettingsError>
  {
    let response = Request::put(&self.url)
      .json(settings)
      .map_err(|e| {
        SettingsError::Decode(
          format!(
            "failed to encode body: {e}"
          )
        )
      })?
      .send()
      .await
      .map_err(|e| {
        SettingsError::Network(
          e.to_string()
        )
      })?;
    decode_settings(response).await
  }
}

async fn decode_settings(
  response: Response
) -> Result<ThemeSettings, SettingsError>
{
  if !response.ok() {
    let status = response.status();
    let message = match response
      .json::<ApiErrorBody>()
      .await
    {
      | Ok(body) => body.error,
      | Err(_) => {
        response.status_text()
      }
    };
    return Err(SettingsError::Status {
      status,
      message
    });
  }

  response
    .json::<ThemeSettings>()
    .await
    .map_err(|e| {
      SettingsError::Decode(
        e.to_string()
      )
    })
}

/// Shared handle to the settings
/// bridge; equal when it is the same
/// bridge.
#[derive(Clone)]
pub struct SettingsService(
  Rc<SettingsBridge<HttpSettingsClient>>
);

impl SettingsService {
  pub fn new(
    bridge: SettingsBridge<
      HttpSettingsClient
    >
  ) -> Self {
    Self(Rc::new(bridge))
  }
}

impl Deref for SettingsService {
  type Target =
    SettingsBridge<HttpSettingsClient>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl PartialEq for SettingsService {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn client_url_joins_base_and_path() {
    assert_eq!(
      HttpSettingsClient::new(
        "http://localhost:8080/"
      )
      .url,
      "http://localhost:8080/api/settings"
    );
  }
}
