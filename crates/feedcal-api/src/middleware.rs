use axum::http::header::{
  ACCEPT,
  ACCEPT_ENCODING,
  AUTHORIZATION,
  CONTENT_LENGTH,
  CONTENT_TYPE,
  HeaderName,
  HeaderValue
};
use axum::http::Method;
use tower_http::LatencyUnit;
use tower_http::classify::{
  ServerErrorsAsFailures,
  SharedClassifier
};
use tower_http::cors::{
  AllowOrigin,
  CorsLayer
};
use tower_http::trace::{
  DefaultMakeSpan,
  DefaultOnRequest,
  DefaultOnResponse,
  TraceLayer
};
use tracing::{
  Level,
  warn
};

const CSRF_TOKEN: HeaderName =
  HeaderName::from_static(
    "x-csrf-token"
  );

/// CORS for the allow-listed origins
/// only; preflight requests are
/// answered by the layer.
pub fn cors_layer(
  origins: &[String]
) -> CorsLayer {
  let origins = origins
    .iter()
    .filter_map(|origin| {
      HeaderValue::from_str(origin)
        .inspect_err(|error| {
          warn!(%origin, %error, "ignoring unusable allowed origin");
        })
        .ok()
    })
    .collect::<Vec<_>>();

  CorsLayer::new()
    .allow_origin(AllowOrigin::list(
      origins
    ))
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::PUT,
      Method::DELETE,
      Method::OPTIONS
    ])
    .allow_headers([
      ACCEPT,
      CONTENT_TYPE,
      CONTENT_LENGTH,
      ACCEPT_ENCODING,
      AUTHORIZATION,
      CSRF_TOKEN
    ])
    .allow_credentials(true)
}

/// Logs every request, preflight
/// included, with status and latency.
pub fn trace_layer() -> TraceLayer<
  SharedClassifier<ServerErrorsAsFailures>
> {
  TraceLayer::new_for_http()
    .make_span_with(
      DefaultMakeSpan::new()
        .level(Level::INFO)
    )
    .on_request(
      DefaultOnRequest::new()
        .level(Level::INFO)
    )
    .on_response(
      DefaultOnResponse::new()
        .level(Level::INFO)
        .latency_unit(LatencyUnit::Millis)
    )
}
