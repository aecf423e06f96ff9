use std::fmt;

use feedcal_gui_shared::ThemePreference;
use gloo::events::EventListener;
use tracing::warn;
use web_sys::MediaQueryList;
use yew::{
  hook,
  use_effect_with,
  use_state
};

const THEME_STORAGE_KEY: &str =
  "feedcal.theme";
const DARK_SCHEME_QUERY: &str =
  "(prefers-color-scheme: dark)";

pub(super) fn load_theme_preference()
-> ThemePreference {
  let stored = web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .and_then(|storage| {
      storage
        .get_item(THEME_STORAGE_KEY)
        .ok()
        .flatten()
    });

  stored
    .as_deref()
    .and_then(|raw| raw.parse().ok())
    .unwrap_or_default()
}

pub(super) fn save_theme_preference(
  theme: ThemePreference
) {
  if let Some(storage) =
    web_sys::window().and_then(
      |window| {
        window
          .local_storage()
          .ok()
          .flatten()
      }
    )
  {
    warn_on_err(
      storage.set_item(
        THEME_STORAGE_KEY,
        theme.as_str()
      ),
      "persist theme"
    );
  }
}

/// `light` or `dark`, with `system`
/// resolved against the OS preference.
pub(super) fn theme_class(
  theme: ThemePreference,
  prefers_dark: bool
) -> &'static str {
  match theme {
    | ThemePreference::Light => "light",
    | ThemePreference::Dark => "dark",
    | ThemePreference::System => {
      if prefers_dark {
        "dark"
      } else {
        "light"
      }
    }
  }
}

pub(super) fn apply_theme(
  theme: ThemePreference,
  prefers_dark: bool
) {
  let Some(body) = web_sys::window()
    .and_then(|window| window.document())
    .and_then(|document| document.body())
  else {
    return;
  };

  let class =
    theme_class(theme, prefers_dark);
  warn_on_err(
    body.set_attribute(
      "data-theme",
      theme.as_str()
    ),
    "set data-theme on body"
  );
  let list = body.class_list();
  warn_on_err(
    list
      .remove_2("light", "dark")
      .and_then(|()| list.add_1(class)),
    "set theme class on body"
  );
}

/// DOM writes fail softly; the theme
/// just doesn't stick.
fn warn_on_err<E: fmt::Debug>(
  result: Result<(), E>,
  action: &str
) -> bool {
  match result {
    | Ok(()) => true,
    | Err(error) => {
      warn!(?error, action, "theme update failed");
      false
    }
  }
}

fn dark_scheme_query()
-> Option<MediaQueryList> {
  web_sys::window()?
    .match_media(DARK_SCHEME_QUERY)
    .ok()
    .flatten()
}

/// Tracks `prefers-color-scheme` and
/// re-renders when the OS flips it.
#[hook]
pub(super) fn use_system_prefers_dark()
-> bool {
  let prefers_dark = use_state(|| {
    dark_scheme_query()
      .is_some_and(|query| {
        query.matches()
      })
  });

  {
    let prefers_dark =
      prefers_dark.clone();
    use_effect_with((), move |_| {
      let listener =
        dark_scheme_query().map(|query| {
          let target = query.clone();
          EventListener::new(
            &query,
            "change",
            move |_| {
              prefers_dark
                .set(target.matches());
            }
          )
        });
      move || drop(listener)
    });
  }

  *prefers_dark
}
