use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::EventListItem;
use crate::hooks::{EventsHookReturn, use_events, use_title};
use crate::state::EventsListState;

#[function_component]
pub fn EventsPage() -> Html {
    use_title("Upcoming Events");
    let EventsHookReturn { state, delete } = use_events();

    let body = match &*state {
        EventsListState::Loading => html! {
            <p class="text-gray-500" role="status">{"Loading…"}</p>
        },
        EventsListState::Failed(message) => html! {
            <p class="text-red-600" role="alert">{format!("Error: {message}")}</p>
        },
        EventsListState::Loaded { events, .. } if events.is_empty() => html! {
            <p class="text-gray-500">{"No events found."}</p>
        },
        EventsListState::Loaded { events, .. } => html! {
            <ul class="space-y-4">
                {for events.iter().map(|event| html! {
                    <EventListItem
                        key={event.id.to_string()}
                        event={event.clone()}
                        deleting={state.is_deleting(&event.id)}
                        on_delete={delete.clone()}
                    />
                })}
            </ul>
        },
    };

    html! {
        <div>
            <h1 class="text-3xl font-bold text-gray-900 mb-6">{"Upcoming Events"}</h1>
            {body}
            <div class="mt-8">
                <Link<Route> to={Route::Admin} classes="text-sm font-medium text-indigo-600 hover:text-indigo-800">
                    {"Create a new event"}
                </Link<Route>>
            </div>
        </div>
    }
}
