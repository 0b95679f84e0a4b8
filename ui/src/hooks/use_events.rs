use payloads::Event;
use yew::prelude::*;

use super::RequestGeneration;
use crate::config::use_api_client;
use crate::contexts::use_toast;
use crate::state::{
    EventsListAction, EventsListState, delete_confirmation, delete_passcode,
};

pub const PASSCODE_PROMPT: &str = "Enter admin passcode to delete:";

pub struct EventsHookReturn {
    pub state: UseReducerHandle<EventsListState>,
    /// Confirm, ask for the admin passcode, then delete. Declining either
    /// prompt makes no request.
    pub delete: Callback<Event>,
}

/// Load the event list once on mount and manage deletes against it.
#[hook]
pub fn use_events() -> EventsHookReturn {
    let api = use_api_client();
    let toast = use_toast();
    let state = use_reducer(EventsListState::default);
    let generation = use_state(RequestGeneration::default);

    {
        let api = api.clone();
        let state = state.clone();
        let generation = (*generation).clone();

        use_effect_with((), move |_| {
            let ticket = generation.begin();
            yew::platform::spawn_local(async move {
                let result = api.list_events().await;
                if !ticket.is_current() {
                    tracing::debug!("Dropping event list for an unmounted view");
                    return;
                }
                match result {
                    Ok(events) => {
                        tracing::debug!("Loaded {} events", events.len());
                        state.dispatch(EventsListAction::Loaded(events));
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load events: {e}");
                        state.dispatch(EventsListAction::Failed(e.to_string()));
                    }
                }
            });
            move || generation.invalidate()
        });
    }

    let delete = {
        let state = state.clone();

        Callback::from(move |event: Event| {
            let Some(passcode) = prompt_for_delete(&event.title) else {
                tracing::debug!("Delete of {} cancelled", event.id);
                return;
            };

            state.dispatch(EventsListAction::DeleteStarted(event.id.clone()));
            let api = api.clone();
            let state = state.clone();
            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                match api.delete_event(&event.id, &passcode).await {
                    Ok(()) => {
                        tracing::info!("Deleted event {}", event.id);
                        state.dispatch(EventsListAction::Deleted(event.id));
                        toast.success(format!("Deleted \"{}\"", event.title));
                    }
                    Err(e) => {
                        tracing::warn!("Failed to delete event {}: {e}", event.id);
                        state.dispatch(EventsListAction::DeleteFailed(event.id));
                        toast.error(e.to_string());
                    }
                }
            });
        })
    };

    EventsHookReturn { state, delete }
}

fn prompt_for_delete(title: &str) -> Option<String> {
    let window = web_sys::window()?;
    let confirmed = window
        .confirm_with_message(&delete_confirmation(title))
        .unwrap_or(false);
    let entered = if confirmed {
        window.prompt_with_message(PASSCODE_PROMPT).ok().flatten()
    } else {
        None
    };
    delete_passcode(confirmed, entered)
}
