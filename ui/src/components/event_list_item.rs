use payloads::Event;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::MoviePreview;
use crate::utils::dates::format_date_time_short;

pub const LOCATION_TBA: &str = "TBA";

#[derive(Properties, PartialEq)]
pub struct EventListItemProps {
    pub event: Event,
    pub deleting: bool,
    pub on_delete: Callback<Event>,
}

#[function_component]
pub fn EventListItem(props: &EventListItemProps) -> Html {
    let event = &props.event;

    let on_delete = {
        let event = event.clone();
        props.on_delete.reform(move |_: MouseEvent| event.clone())
    };

    let location = event
        .location
        .as_deref()
        .filter(|location| !location.trim().is_empty())
        .unwrap_or(LOCATION_TBA);

    html! {
        <li class="bg-white rounded-lg border border-gray-200 p-5">
            <div class="flex justify-between items-start gap-4">
                <div>
                    <h2 class="text-lg font-semibold text-gray-900">{&event.title}</h2>
                    <p class="text-sm text-gray-600">
                        {format_date_time_short(event.start.as_deref())}
                    </p>
                    <p class="text-sm text-gray-600">{location}</p>
                    <p class="text-sm text-gray-600">{event.price_label()}</p>
                </div>
                <button
                    onclick={on_delete}
                    disabled={props.deleting}
                    class="px-3 py-1 rounded-md border border-red-300 text-sm text-red-700 hover:bg-red-50 disabled:opacity-50"
                >
                    {if props.deleting { "Deleting…" } else { "Delete" }}
                </button>
            </div>
            {match event.movie() {
                Some(movie_id) => html! { <MoviePreview movie_id={movie_id.clone()} /> },
                None => html! {
                    <p class="mt-3 text-sm italic text-gray-400">{"No film allocated"}</p>
                },
            }}
            <Link<Route>
                to={Route::EventDetail { id: event.id.to_string() }}
                classes="inline-block mt-3 text-sm font-medium text-indigo-600 hover:text-indigo-800"
            >
                {"View details →"}
            </Link<Route>>
        </li>
    }
}
