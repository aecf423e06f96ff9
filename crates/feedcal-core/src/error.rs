use thiserror::Error;

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum DateParseError {
  #[error(
    "date token `{token}` is not in \
     YYYY-MM-DD form"
  )]
  Malformed { token: String },
  #[error(
    "date token `{token}` names a day \
     that does not exist"
  )]
  OutOfRange { token: String }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Error,
)]
pub enum SettingsError {
  #[error("settings request failed: {0}")]
  Network(String),
  #[error(
    "settings endpoint answered \
     {status}: {message}"
  )]
  Status {
    status:  u16,
    message: String
  },
  #[error(
    "could not decode settings \
     response: {0}"
  )]
  Decode(String)
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error(
    "failed parsing dashboard config: \
     {0}"
  )]
  Parse(#[from] toml::de::Error)
}
