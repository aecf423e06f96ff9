use feedcal_gui_shared::ThemePreference;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::api::SettingsService;

#[derive(Clone, PartialEq)]
enum LoadStatus {
  Loading,
  Ready,
  Failed(String)
}

#[derive(Properties, PartialEq)]
pub struct SettingsPanelProps {
  pub service:  SettingsService,
  pub theme:    ThemePreference,
  pub on_theme: Callback<ThemePreference>
}

#[function_component(SettingsPanel)]
pub fn settings_panel(
  props: &SettingsPanelProps
) -> Html {
  let status =
    use_state(|| LoadStatus::Loading);
  let save_error =
    use_state(|| None::<String>);
  let notifications = use_state(|| true);
  let compact = use_state(|| false);

  {
    let service = props.service.clone();
    let on_theme = props.on_theme.clone();
    let status = status.clone();
    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          match service.fetch_theme().await
          {
            | Ok(settings) => {
              on_theme.emit(settings.theme);
              status.set(LoadStatus::Ready);
            }
            | Err(error) => {
              status.set(LoadStatus::Failed(
                error.to_string()
              ));
            }
          }
        }
      );
      || ()
    });
  }

  let apply = {
    let service = props.service.clone();
    let on_theme = props.on_theme.clone();
    let save_error = save_error.clone();
    Callback::from(
      move |next: ThemePreference| {
        on_theme.emit(next);
        save_error.set(None);
        let service = service.clone();
        let save_error = save_error.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            if let Err(error) = service
              .update_theme(next)
              .await
            {
              save_error.set(Some(format!(
                "Could not save theme: \
                 {error}"
              )));
            }
          }
        );
      }
    )
  };

  let dark_on =
    props.theme == ThemePreference::Dark;
  let system_on =
    props.theme == ThemePreference::System;

  let on_dark = {
    let apply = apply.clone();
    move |_| {
      apply.emit(if dark_on {
        ThemePreference::Light
      } else {
        ThemePreference::Dark
      })
    }
  };
  let on_system = {
    let apply = apply.clone();
    move |_| {
      apply.emit(if system_on {
        ThemePreference::Light
      } else {
        ThemePreference::System
      })
    }
  };
  let on_notifications = {
    let notifications =
      notifications.clone();
    move |_| {
      notifications.set(!*notifications)
    }
  };
  let on_compact = {
    let compact = compact.clone();
    move |_| compact.set(!*compact)
  };

  let body = match &*status {
    | LoadStatus::Loading => html! {
        <div class="muted">{ "Loading settings…" }</div>
    },
    | LoadStatus::Failed(message) => {
      html! {
          <div class="error">{ format!("Could not load settings: {message}") }</div>
      }
    }
    | LoadStatus::Ready => html! {
        <>
            { switch_row("Dark mode", dark_on, on_dark) }
            { switch_row("Use system theme", system_on, on_system) }
            { switch_row("Notifications", *notifications, on_notifications) }
            { switch_row("Compact layout", *compact, on_compact) }
        </>
    }
  };

  html! {
      <section class="panel settings">
          <div class="header">{ "Settings" }</div>
          { body }
          if let Some(message) = (*save_error).clone() {
              <div class="error">{ message }</div>
          }
      </section>
  }
}

fn switch_row(
  label: &str,
  checked: bool,
  onclick: impl Fn(yew::MouseEvent)
  + 'static
) -> Html {
  let class = if checked {
    "switch on"
  } else {
    "switch"
  };
  html! {
      <div class="setting-row">
          <span>{ label.to_string() }</span>
          <button
              class={class}
              role="switch"
              aria-checked={checked.to_string()}
              onclick={onclick}
          />
      </div>
  }
}
