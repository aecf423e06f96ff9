mod calendar;
mod session;
mod theme;

pub(crate) use calendar::{
  format_clock,
  format_medium_date,
  month_grid,
  shift_month,
  start_of_month
};
use feedcal_core::config::DashboardConfig;
use feedcal_core::settings::SettingsBridge;
use feedcal_gui_shared::ThemePreference;
use gloo::console::log;
pub(crate) use session::{
  SessionHandle,
  SessionProvider,
  use_session
};
use theme::{
  apply_theme,
  load_theme_preference,
  save_theme_preference,
  use_system_prefers_dark
};
use yew::{
  Callback,
  Html,
  classes,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_state
};
use yew_router::prelude::{
  BrowserRouter,
  Routable,
  Switch
};

use crate::api::{
  HttpSettingsClient,
  SettingsService
};
use crate::components::{
  AppHeader,
  FeedContent,
  SettingsPanel,
  Sidebar
};

const DASHBOARD_CONFIG_TOML: &str =
  include_str!(
    "../assets/dashboard.toml"
  );

#[derive(
  Debug, Clone, PartialEq, Routable,
)]
pub enum Route {
  #[at("/")]
  Index,
  #[at("/home")]
  Home,
  #[at("/settings")]
  Settings,
  #[at("/:item_id")]
  Item { item_id: String },
  #[not_found]
  #[at("/404")]
  NotFound
}

#[function_component(App)]
pub fn app() -> Html {
  let config = use_memo((), |_| {
    DashboardConfig::load_or_default(
      DASHBOARD_CONFIG_TOML
    )
  });
  let theme =
    use_state(load_theme_preference);
  let settings = {
    let config = config.clone();
    let theme = *theme;
    use_memo((), move |_| {
      SettingsService::new(
        SettingsBridge::new(
          HttpSettingsClient::new(
            &config.api_base_url
          ),
          theme
        )
      )
    })
  };
  let prefers_dark =
    use_system_prefers_dark();

  {
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and hooks \
         initialized"
      );
      || ()
    });
  }

  {
    use_effect_with(
      (*theme, prefers_dark),
      move |(theme, prefers_dark)| {
        save_theme_preference(*theme);
        apply_theme(
          *theme,
          *prefers_dark
        );
        tracing::debug!(
          theme = %theme,
          prefers_dark,
          "applied theme"
        );
        || ()
      }
    );
  }

  let on_theme = {
    let theme = theme.clone();
    Callback::from(
      move |next: ThemePreference| {
        theme.set(next);
      }
    )
  };

  let render = {
    let settings = (*settings).clone();
    let current = *theme;
    move |route: Route| {
      match route {
        | Route::Index => html! {
            <div class="feed-content muted">{ "Loading…" }</div>
        },
        | Route::Home | Route::Item { .. } => {
          html! { <FeedContent /> }
        }
        | Route::Settings => html! {
            <SettingsPanel
              service={settings.clone()}
              theme={current}
              on_theme={on_theme.clone()}
            />
        },
        | Route::NotFound => html! {
            <div class="feed-content muted">{ "Nothing here." }</div>
        }
      }
    }
  };

  let shell_class = classes!(
    "app",
    theme::theme_class(
      *theme,
      prefers_dark
    )
  );

  html! {
      <BrowserRouter>
          <SessionProvider config={config.clone()}>
              <div class={shell_class}>
                  <Sidebar config={config.clone()} />
                  <main class="inset">
                      <AppHeader />
                      <Switch<Route> render={render} />
                  </main>
              </div>
          </SessionProvider>
      </BrowserRouter>
  }
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
