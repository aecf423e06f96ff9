use anyhow::Context;
use clap::Parser;
use feedcal_api::cli::{
  Cli,
  init_tracing
};
use feedcal_api::{
  AppState,
  router
};
use feedcal_gui_shared::ThemeSettings;
use tokio::net::TcpListener;
use tracing::{
  info,
  warn
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose, cli.quiet)?;

  let origins = cli.allowed_origins();
  let addr = cli.socket_addr();
  info!(
    %addr,
    theme = %cli.theme,
    origins = ?origins,
    "starting feedcal settings service"
  );

  let state = AppState::new(
    ThemeSettings { theme: cli.theme },
    origins
  );
  let listener =
    TcpListener::bind(addr)
      .await
      .with_context(|| {
        format!(
          "failed to bind {addr}"
        )
      })?;

  axum::serve(listener, router(state))
    .with_graceful_shutdown(
      shutdown_signal()
    )
    .await
    .context("settings service failed")?;

  info!("shutdown complete");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(error) =
    tokio::signal::ctrl_c().await
  {
    warn!(%error, "failed to listen for ctrl-c; running until killed");
    std::future::pending::<()>().await;
  }
  info!("ctrl-c received; shutting down");
}
