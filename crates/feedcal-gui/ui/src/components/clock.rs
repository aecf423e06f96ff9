use chrono::Local;
use gloo::timers::callback::Interval;
use yew::{
  Html,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::app::format_clock;

const TICK_MS: u32 = 1_000;

#[function_component(Clock)]
pub fn clock() -> Html {
  let now = use_state(|| {
    Local::now().time()
  });

  {
    let now = now.clone();
    use_effect_with((), move |_| {
      let interval =
        Interval::new(TICK_MS, move || {
          now.set(Local::now().time());
        });
      move || drop(interval)
    });
  }

  html! {
      <div class="clock">{ format_clock(*now) }</div>
  }
}
