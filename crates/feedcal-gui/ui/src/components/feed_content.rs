use yew::{
  Html,
  function_component,
  html
};

use crate::app::{
  format_medium_date,
  use_session
};

const PLACEHOLDER_TILES: usize = 20;

#[function_component(FeedContent)]
pub fn feed_content() -> Html {
  let session = use_session();
  let selection = session.selection();
  let days = session.selected_days();

  html! {
      <section class="feed-content">
          <div class="summary">
              <span class="feed-name">{ selection.selected_item.clone() }</span>
              <span class="muted">
                  { format!("{} day(s) selected", days.len()) }
              </span>
          </div>
          <div class="day-chips">
              {
                  for days.iter().map(|day| {
                      let primary = selection.selected_day() == Some(*day);
                      let class = if primary { "chip primary" } else { "chip" };
                      html! {
                          <span class={class}>{ format_medium_date(day.date()) }</span>
                      }
                  })
              }
          </div>
          <div class="tiles">
              { for (0..PLACEHOLDER_TILES).map(|_| html! { <div class="tile" /> }) }
          </div>
      </section>
  }
}
