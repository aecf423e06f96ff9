use std::io::IsTerminal;
use std::net::{
  IpAddr,
  Ipv4Addr,
  SocketAddr
};

use anyhow::anyhow;
use clap::{
  ArgAction,
  Parser
};
use feedcal_gui_shared::ThemePreference;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Dev-server origins allowed when none
/// are configured.
pub const DEFAULT_ALLOWED_ORIGINS: [&str;
  5] = [
  "http://localhost:3000",
  "http://localhost:5173",
  "http://localhost:4173",
  "http://127.0.0.1:5173",
  "http://localhost:8000"
];

#[derive(Debug, Clone, Parser)]
#[command(
  name = "feedcal-api",
  about = "Settings service for the \
           feedcal dashboard"
)]
pub struct Cli {
  #[arg(
    long,
    env = "FEEDCAL_BIND",
    default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED)
  )]
  pub bind: IpAddr,

  #[arg(
    long,
    env = "FEEDCAL_PORT",
    default_value_t = 8080
  )]
  pub port: u16,

  /// Repeatable; comma-separated in the
  /// environment variable.
  #[arg(
    long = "allowed-origin",
    env = "FEEDCAL_ALLOWED_ORIGINS",
    value_delimiter = ','
  )]
  pub allowed_origins: Vec<String>,

  /// Theme served until the first
  /// update.
  #[arg(
    long,
    env = "FEEDCAL_THEME",
    default_value = "dark"
  )]
  pub theme: ThemePreference,

  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,

  #[arg(short, long, action = ArgAction::Count)]
  pub quiet: u8
}

impl Cli {
  pub fn socket_addr(&self) -> SocketAddr {
    SocketAddr::new(self.bind, self.port)
  }

  pub fn allowed_origins(
    &self
  ) -> Vec<String> {
    let configured = self
      .allowed_origins
      .iter()
      .map(|origin| {
        origin
          .trim()
          .trim_end_matches('/')
          .to_string()
      })
      .filter(|origin| !origin.is_empty())
      .collect::<Vec<_>>();

    if configured.is_empty() {
      DEFAULT_ALLOWED_ORIGINS
        .iter()
        .map(|origin| origin.to_string())
        .collect()
    } else {
      configured
    }
  }
}

pub fn init_tracing(
  verbose: u8,
  quiet: u8
) -> anyhow::Result<()> {
  let default_level = if quiet >= 2 {
    "error"
  } else if quiet == 1 {
    "warn"
  } else if verbose >= 2 {
    "trace"
  } else if verbose == 1 {
    "debug"
  } else {
    "info,feedcal_api=debug"
  };

  let env_filter =
    EnvFilter::try_from_default_env()
      .or_else(|_| {
        EnvFilter::try_new(default_level)
      })
      .map_err(|e| {
        anyhow!(
          "invalid RUST_LOG / log \
           filter: {e}"
        )
      })?;

  let init_result =
    tracing_subscriber::fmt()
      .with_env_filter(env_filter)
      .with_target(true)
      .with_line_number(true)
      .with_ansi(
        std::io::stderr().is_terminal()
      )
      .try_init();

  if let Err(err) = init_result {
    debug!(error = %err, "tracing subscriber already set, continuing");
  }

  Ok(())
}
