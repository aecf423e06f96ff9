use yew::{
  Html,
  function_component,
  html
};

use crate::app::{
  format_medium_date,
  use_session
};

#[function_component(AppHeader)]
pub fn app_header() -> Html {
  let session = use_session();
  let selection = session.selection();
  let date = selection
    .selected_day()
    .map(|day| {
      format_medium_date(day.date())
    });

  html! {
      <header class="breadcrumb">
          <span class="crumb">{ "Feeds" }</span>
          <span class="sep">{ "/" }</span>
          <span class="crumb current">{ selection.selected_item.clone() }</span>
          if let Some(date) = date {
              <span class="sep">{ "/" }</span>
              <span class="crumb date">{ date }</span>
          }
      </header>
  }
}
