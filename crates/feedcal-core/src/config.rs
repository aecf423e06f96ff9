use std::collections::BTreeSet;

use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  info,
  warn
};

use crate::error::ConfigError;
use crate::selection::{
  DEFAULT_ITEM,
  SETTINGS_ITEM
};
use crate::url_sync::HOME_SEGMENT;

pub const DEFAULT_API_BASE_URL: &str =
  "http://localhost:8080";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct FeedGroup {
  pub name:  String,
  #[serde(default)]
  pub items: Vec<String>
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct DashboardConfig {
  #[serde(default = "default_version")]
  pub version:      u32,
  #[serde(
    default = "default_item_name"
  )]
  pub default_item: String,
  #[serde(
    default = "default_api_base_url"
  )]
  pub api_base_url: String,
  #[serde(default = "default_feeds")]
  pub feeds:        Vec<FeedGroup>
}

fn default_version() -> u32 {
  1
}

fn default_item_name() -> String {
  DEFAULT_ITEM.to_string()
}

fn default_api_base_url() -> String {
  DEFAULT_API_BASE_URL.to_string()
}

fn default_feeds() -> Vec<FeedGroup> {
  let group =
    |name: &str, items: &[&str]| {
      FeedGroup {
        name:  name.to_string(),
        items: items
          .iter()
          .map(|item| item.to_string())
          .collect()
      }
    };

  vec![
    group("My Feeds", &[
      "Personal", "Work", "Family"
    ]),
    group("Favorites", &[
      "Holidays",
      "Birthdays"
    ]),
    group("Other", &[
      "Travel",
      "Reminders",
      "Deadlines"
    ]),
  ]
}

/// Names that can't be a feed: empty,
/// or taken by a route of their own.
fn is_reserved(item: &str) -> bool {
  item.is_empty()
    || item == SETTINGS_ITEM
    || item == HOME_SEGMENT
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      version:      default_version(),
      default_item: default_item_name(
      ),
      api_base_url:
        default_api_base_url(),
      feeds:        default_feeds()
    }
  }
}

impl DashboardConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> Result<Self, ConfigError> {
    let mut config: Self =
      toml::from_str(raw)?;
    config.sanitize();
    Ok(config)
  }

  /// Parses the embedded config and
  /// falls back to defaults on error.
  pub fn load_or_default(
    raw: &str
  ) -> Self {
    match Self::from_toml_str(raw) {
      | Ok(config) => {
        info!(
          version = config.version,
          default_item = %config.default_item,
          groups = config.feeds.len(),
          "loaded dashboard config"
        );
        config
      }
      | Err(error) => {
        tracing::error!(%error, "failed parsing dashboard config; using defaults");
        Self::default()
      }
    }
  }

  pub fn sanitize(&mut self) {
    let mut seen =
      BTreeSet::<String>::new();
    for group in &mut self.feeds {
      group.name =
        group.name.trim().to_string();
      group.items = group
        .items
        .iter()
        .map(|item| {
          item.trim().to_string()
        })
        .filter(|item| {
          !is_reserved(item)
            && seen.insert(item.clone())
        })
        .collect();
    }
    self.feeds.retain(|group| {
      !group.name.is_empty()
        && !group.items.is_empty()
    });
    if self.feeds.is_empty() {
      warn!(
        "dashboard config lists no \
         feeds; using built-in list"
      );
      self.feeds = default_feeds();
    }

    let default_item =
      self.default_item.trim();
    if is_reserved(default_item) {
      warn!(
        default_item = %self.default_item,
        "invalid default item; using \
         first feed"
      );
      self.default_item = self
        .feeds
        .iter()
        .flat_map(|group| {
          group.items.first()
        })
        .next()
        .cloned()
        .unwrap_or_else(
          default_item_name
        );
    } else {
      self.default_item =
        default_item.to_string();
    }

    let base =
      self.api_base_url.trim();
    self.api_base_url = if base
      .is_empty()
    {
      default_api_base_url()
    } else {
      base.trim_end_matches('/').to_string()
    };
  }

  pub fn items(
    &self
  ) -> impl Iterator<Item = &str> + '_ {
    self.feeds.iter().flat_map(|group| {
      group.items.iter().map(String::as_str)
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_built_in_feed_list()
  {
    let config =
      DashboardConfig::default();
    assert_eq!(
      config.default_item,
      "Personal"
    );
    assert_eq!(
      config.items().collect::<Vec<_>>(),
      vec![
        "Personal",
        "Work",
        "Family",
        "Holidays",
        "Birthdays",
        "Travel",
        "Reminders",
        "Deadlines"
      ]
    );
  }

  #[test]
  fn sanitize_drops_blank_and_duplicate_items()
   {
    let config =
      DashboardConfig::from_toml_str(
        r#"
default_item = "settings"
api_base_url = "http://127.0.0.1:9000/"

[[feeds]]
name = " Mine "
items = ["Work", " ", "settings", "Work"]

[[feeds]]
name = "Empty"
items = []

[[feeds]]
name = "Shared"
items = ["Work", "Club"]
"#
      )
      .expect("valid config");

    assert_eq!(
      config.feeds,
      vec![
        FeedGroup {
          name:  "Mine".to_string(),
          items: vec!["Work".to_string()]
        },
        FeedGroup {
          name:  "Shared".to_string(),
          items: vec!["Club".to_string()]
        },
      ]
    );
    assert_eq!(config.default_item, "Work");
    assert_eq!(
      config.api_base_url,
      "http://127.0.0.1:9000"
    );
  }

  #[test]
  fn route_names_cannot_be_feeds() {
    let config =
      DashboardConfig::from_toml_str(
        r#"
default_item = "home"

[[feeds]]
name = "Mine"
items = ["home", "Work"]
"#
      )
      .expect("valid config");

    assert_eq!(
      config.items().collect::<Vec<_>>(),
      vec!["Work"]
    );
    assert_eq!(config.default_item, "Work");
  }

  #[test]
  fn broken_toml_falls_back_to_defaults()
  {
    assert!(
      DashboardConfig::from_toml_str(
        "feeds = 3"
      )
      .is_err()
    );
    assert_eq!(
      DashboardConfig::load_or_default(
        "feeds = 3"
      ),
      DashboardConfig::default()
    );
  }

  #[test]
  fn empty_document_uses_defaults() {
    assert_eq!(
      DashboardConfig::from_toml_str("")
        .expect("empty config"),
      DashboardConfig::default()
    );
  }
}
