use std::rc::Rc;

use feedcal_core::SETTINGS_ITEM;
use feedcal_core::config::DashboardConfig;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

use super::{
  Clock,
  DatePicker
};
use crate::app::use_session;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
  pub config: Rc<DashboardConfig>
}

#[function_component(Sidebar)]
pub fn sidebar(
  props: &SidebarProps
) -> Html {
  let session = use_session();
  let active = session
    .selection()
    .selected_item;

  let make_item = |item: &str| {
    let class = if active == item {
      "item active"
    } else {
      "item"
    };
    let session = session.clone();
    let item = item.to_string();
    let label = item.clone();
    html! {
        <div class={class} onclick={move |_| session.select_item(item.clone())}>
            { label }
        </div>
    }
  };

  let settings_class =
    if active == SETTINGS_ITEM {
      "item footer active"
    } else {
      "item footer"
    };
  let on_settings = {
    let session = session.clone();
    move |_| {
      session.select_item(SETTINGS_ITEM)
    }
  };

  html! {
      <aside class="panel sidebar">
          <Clock />
          <DatePicker />
          {
              for props.config.feeds.iter().map(|group| html! {
                  <div class="group">
                      <div class="header">{ group.name.clone() }</div>
                      { for group.items.iter().map(|item| make_item(item)) }
                  </div>
              })
          }
          <div class={settings_class} onclick={on_settings}>
              { "Settings" }
          </div>
      </aside>
  }
}
