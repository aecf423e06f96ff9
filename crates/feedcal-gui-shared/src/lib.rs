use std::fmt;
use std::str::FromStr;

use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
  Light,
  #[default]
  Dark,
  System
}

impl ThemePreference {
  pub const ALL: [Self; 3] = [
    Self::Light,
    Self::Dark,
    Self::System
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      | Self::Light => "light",
      | Self::Dark => "dark",
      | Self::System => "system"
    }
  }
}

impl fmt::Display for ThemePreference {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "unknown theme `{}`; expected \
       light, dark or system",
      self.0
    )
  }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for ThemePreference {
  type Err = UnknownTheme;

  fn from_str(
    raw: &str
  ) -> Result<Self, Self::Err> {
    match raw.trim() {
      | "light" => Ok(Self::Light),
      | "dark" => Ok(Self::Dark),
      | "system" => Ok(Self::System),
      | other => {
        Err(UnknownTheme(
          other.to_string()
        ))
      }
    }
  }
}

/// Body of `GET /api/settings` and of
/// `PUT /api/settings` in both
/// directions.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub struct ThemeSettings {
  pub theme: ThemePreference
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ApiErrorBody {
  pub error: String
}
