use std::collections::BTreeSet;

use chrono::{
  Datelike,
  Local,
  NaiveDate
};
use feedcal_core::{
  CalendarDay,
  SelectionState
};
use web_sys::MouseEvent;
use yew::{
  Html,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::app::{
  month_grid,
  shift_month,
  start_of_month,
  use_session
};

const WEEKDAY_LABELS: [&str; 7] =
  ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

/// Month grid bound to the session's
/// date selection. Ctrl/Cmd-click
/// toggles a day in or out.
#[function_component(DatePicker)]
pub fn date_picker() -> Html {
  let session = use_session();
  let today = Local::now().date_naive();
  let selection = session.selection();
  let primary = selection.selected_day();
  let selected = session.selected_days();
  let enabled = !selection.is_settings();

  let month = use_state(|| {
    start_of_month(
      primary
        .map(CalendarDay::date)
        .unwrap_or(today)
    )
  });

  {
    let month = month.clone();
    use_effect_with(primary, move |primary| {
      if let Some(day) = primary {
        month.set(start_of_month(
          day.date()
        ));
      }
      || ()
    });
  }

  let on_prev = {
    let month = month.clone();
    move |_| {
      month.set(shift_month(*month, -1))
    }
  };
  let on_next = {
    let month = month.clone();
    move |_| {
      month.set(shift_month(*month, 1))
    }
  };

  let render_day = |date: NaiveDate| {
    let day = CalendarDay::from_date(date);
    let class = classes!(
      "day",
      day_marks(
        date,
        *month,
        &selection,
        &selected,
        today
      )
    );
    let session = session.clone();
    let onclick =
      move |event: MouseEvent| {
        session.click_day(
          day.start(),
          event.ctrl_key()
            || event.meta_key()
        );
      };
    html! {
        <button class={class} disabled={!enabled} {onclick}>
            { date.day() }
        </button>
    }
  };

  html! {
      <div class="panel date-picker">
          <div class="month-nav">
              <button class="nav" onclick={on_prev}>{ "‹" }</button>
              <span class="month-label">{ month.format("%B %Y").to_string() }</span>
              <button class="nav" onclick={on_next}>{ "›" }</button>
          </div>
          <div class="weekdays">
              { for WEEKDAY_LABELS.iter().map(|label| html! { <span>{ *label }</span> }) }
          </div>
          <div class="days">
              { for month_grid(*month).into_iter().map(render_day) }
          </div>
      </div>
  }
}

/// CSS marks for one grid cell. The
/// primary mark follows the selected
/// date, not the selector's own pick.
fn day_marks(
  date: NaiveDate,
  month: NaiveDate,
  selection: &SelectionState,
  selected: &BTreeSet<CalendarDay>,
  today: NaiveDate
) -> Vec<&'static str> {
  let day = CalendarDay::from_date(date);
  [
    (date.month() != month.month())
      .then_some("outside"),
    selected
      .contains(&day)
      .then_some("selected"),
    (selection.selected_day()
      == Some(day))
    .then_some("primary"),
    (date == today).then_some("today")
  ]
  .into_iter()
  .flatten()
  .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn primary_mark_follows_url_date_not_seed()
   {
    let selection = SelectionState::new(
      "Work",
      Some(
        CalendarDay::from_date(date(
          2024, 1, 15
        ))
        .start()
      )
    );
    let seeded = BTreeSet::from([
      CalendarDay::from_date(date(
        2024, 3, 1
      ))
    ]);
    let today = date(2024, 3, 1);

    assert_eq!(
      day_marks(
        date(2024, 1, 15),
        date(2024, 1, 1),
        &selection,
        &seeded,
        today
      ),
      vec!["primary"]
    );
    assert_eq!(
      day_marks(
        date(2024, 3, 1),
        date(2024, 1, 1),
        &selection,
        &seeded,
        today
      ),
      vec!["outside", "selected", "today"]
    );
  }
}
