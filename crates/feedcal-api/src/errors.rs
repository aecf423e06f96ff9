use axum::Json;
use axum::http::StatusCode;
use axum::response::{
  IntoResponse,
  Response
};
use feedcal_gui_shared::ApiErrorBody;

#[derive(Debug)]
pub struct AppError {
  pub status:  StatusCode,
  pub message: String
}

impl AppError {
  pub fn bad_request(
    message: impl Into<String>
  ) -> Self {
    Self {
      status:  StatusCode::BAD_REQUEST,
      message: message.into()
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    (
      self.status,
      Json(ApiErrorBody {
        error: self.message
      })
    )
      .into_response()
  }
}
