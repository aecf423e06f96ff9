use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::middleware::{
  cors_layer,
  trace_layer
};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
  let cors =
    cors_layer(&state.allowed_origins);

  Router::new()
    .route(
      "/api/settings",
      get(handlers::get_settings)
        .put(handlers::update_settings)
        .post(handlers::update_settings)
    )
    .layer(cors)
    .layer(trace_layer())
    .with_state(state)
}

#[cfg(test)]
mod tests {
  use std::io;
  use std::sync::{
    Arc,
    Mutex
  };

  use axum::body::Body;
  use axum::http::{
    Request,
    StatusCode
  };
  use feedcal_gui_shared::ThemeSettings;
  use tower::ServiceExt;

  use super::*;

  #[derive(Clone, Default)]
  struct Captured(Arc<Mutex<Vec<u8>>>);

  impl io::Write for Captured {
    fn write(
      &mut self,
      buf: &[u8]
    ) -> io::Result<usize> {
      self
        .0
        .lock()
        .expect("log buffer")
        .extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[tokio::test]
  async fn preflight_requests_are_logged()
  {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber =
      tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || {
          writer.clone()
        })
        .finish();
    let _guard =
      tracing::subscriber::set_default(
        subscriber
      );

    let app = router(AppState::new(
      ThemeSettings::default(),
      vec![
        "http://localhost:5173"
          .to_string(),
      ]
    ));
    let response = app
      .oneshot(
        Request::builder()
          .method("OPTIONS")
          .uri("/api/settings")
          .header(
            "origin",
            "http://localhost:5173"
          )
          .header(
            "access-control-request-method",
            "PUT"
          )
          .body(Body::empty())
          .expect("request")
      )
      .await
      .expect("response");
    assert_eq!(
      response.status(),
      StatusCode::OK
    );

    let logs = String::from_utf8(
      captured
        .0
        .lock()
        .expect("log buffer")
        .clone()
    )
    .expect("utf8 logs");
    assert!(logs.contains("OPTIONS"));
    assert!(
      logs.contains(
        "finished processing request"
      )
    );
  }
}
