use payloads::{Event, EventId};
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};
use crate::config::use_api_client;

/// Fetch a single event, refetching when the id changes.
#[hook]
pub fn use_event(id: EventId) -> FetchHookReturn<Event> {
    let api = use_api_client();

    use_fetch(id.clone(), move || {
        let api = api.clone();
        let id = id.clone();
        async move { api.get_event(&id).await.map_err(|e| e.to_string()) }
    })
}
