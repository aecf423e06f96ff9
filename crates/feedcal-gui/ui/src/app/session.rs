use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::{
  Local,
  NaiveDateTime
};
use feedcal_core::config::DashboardConfig;
use feedcal_core::{
  CalendarDay,
  Intent,
  SelectionState,
  Session,
  SessionEvent,
  UrlState
};
use yew::{
  Callback,
  ContextProvider,
  Html,
  Properties,
  function_component,
  hook,
  html,
  use_context,
  use_effect_with,
  use_force_update,
  use_mut_ref
};
use yew_router::history::{
  BrowserHistory,
  History
};
use yew_router::prelude::use_location;

use super::ui_debug;

/// View of the running session handed
/// to components through context.
#[derive(Clone)]
pub struct SessionHandle {
  session:  Rc<RefCell<Session>>,
  revision: u64,
  dispatch: Callback<SessionEvent>
}

impl PartialEq for SessionHandle {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(
      &self.session,
      &other.session
    ) && self.revision == other.revision
  }
}

impl SessionHandle {
  pub fn selection(
    &self
  ) -> SelectionState {
    self.session.borrow().selection().clone()
  }

  pub fn selected_days(
    &self
  ) -> BTreeSet<CalendarDay> {
    self.session.borrow().dates().days().collect()
  }

  pub fn select_item(
    &self,
    item: impl Into<String>
  ) {
    self.dispatch.emit(
      SessionEvent::SelectItem(
        item.into()
      )
    );
  }

  pub fn click_day(
    &self,
    day: NaiveDateTime,
    modifier: bool
  ) {
    self.dispatch.emit(
      SessionEvent::ClickDay {
        day,
        modifier
      }
    );
  }
}

#[hook]
pub fn use_session() -> SessionHandle {
  use_context::<SessionHandle>().expect(
    "use_session must be used within a \
     SessionProvider"
  )
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
  pub config:   Rc<DashboardConfig>,
  #[prop_or_default]
  pub children: Html
}

#[function_component(SessionProvider)]
pub fn session_provider(
  props: &SessionProviderProps
) -> Html {
  let session = {
    let config = props.config.clone();
    use_mut_ref(move || {
      let mut session = Session::new(
        &config,
        Local::now().naive_local()
      );
      session.subscribe(|state| {
        ui_debug(
          "selection.changed",
          &format!(
            "item={} date={:?}",
            state.selected_item,
            state.selected_day()
          )
        );
      });
      session
    })
  };
  let force_update = use_force_update();

  let dispatch = {
    let session = session.clone();
    Callback::from(
      move |event: SessionEvent| {
        let intents = session
          .borrow_mut()
          .handle(event);
        force_update.force_update();
        for intent in intents {
          match intent {
            | Intent::NavigateTo(url) => {
              navigate(&url);
            }
          }
        }
      }
    )
  };

  let location = use_location();
  {
    let dispatch = dispatch.clone();
    let reported = location
      .as_ref()
      .map(|location| {
        (
          location.path().to_string(),
          location
            .query_str()
            .trim_start_matches('?')
            .to_string()
        )
      })
      .unwrap_or_default();
    use_effect_with(
      reported,
      move |(path, query)| {
        dispatch.emit(
          SessionEvent::LocationChanged {
            path:  path.clone(),
            query: query.clone()
          }
        );
        || ()
      }
    );
  }

  let revision = session.borrow().revision();
  let handle = SessionHandle {
    revision,
    session,
    dispatch
  };

  html! {
      <ContextProvider<SessionHandle> context={handle}>
          { props.children.clone() }
      </ContextProvider<SessionHandle>>
  }
}

fn navigate(url: &UrlState) {
  let href = url.href();
  ui_debug("url.navigate", &href);
  BrowserHistory::new().replace(href);
}
