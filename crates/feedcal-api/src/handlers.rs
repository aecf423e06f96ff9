use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use feedcal_gui_shared::ThemeSettings;
use tracing::{
  info,
  warn
};

use crate::errors::AppError;
use crate::state::AppState;

pub async fn get_settings(
  State(state): State<AppState>
) -> Json<ThemeSettings> {
  let settings = *state.settings.read().await;
  Json(settings)
}

/// Replaces the stored settings and
/// echoes what was stored.
pub async fn update_settings(
  State(state): State<AppState>,
  payload: Result<
    Json<ThemeSettings>,
    JsonRejection
  >
) -> Result<Json<ThemeSettings>, AppError>
{
  let Json(next) =
    payload.map_err(|rejection| {
      warn!(
        error = %rejection.body_text(),
        "rejecting settings update"
      );
      AppError::bad_request(
        "Invalid request body"
      )
    })?;

  let mut settings =
    state.settings.write().await;
  *settings = next;
  info!(theme = %settings.theme, "settings updated");
  Ok(Json(*settings))
}
