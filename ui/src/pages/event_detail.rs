use payloads::{Event, EventId};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::{MovieDetails, SignupForm};
use crate::hooks::{use_event, use_title};
use crate::pages::NotFoundPage;
use crate::state::DetailView;
use crate::utils::dates::format_date_time;

#[derive(Properties, PartialEq)]
pub struct EventDetailPageProps {
    pub id: EventId,
}

#[function_component]
pub fn EventDetailPage(props: &EventDetailPageProps) -> Html {
    let event_hook = use_event(props.id.clone());

    match DetailView::from_fetch(event_hook.data.as_ref(), event_hook.error.as_deref()) {
        DetailView::Loading => html! {
            <p class="text-gray-500" role="status">{"Loading…"}</p>
        },
        DetailView::NotFound => html! { <NotFoundPage /> },
        DetailView::Loaded(event) => html! { <EventDetails event={event.clone()} /> },
    }
}

#[derive(Properties, PartialEq)]
struct EventDetailsProps {
    event: Event,
}

#[function_component]
fn EventDetails(props: &EventDetailsProps) -> Html {
    let event = &props.event;
    use_title(&event.title);

    let location = event
        .location
        .as_deref()
        .filter(|location| !location.trim().is_empty());

    html! {
        <article>
            <Link<Route> to={Route::Home} classes="text-sm text-indigo-600 hover:text-indigo-800">
                {"← All events"}
            </Link<Route>>
            <h1 class="mt-4 text-3xl font-bold text-gray-900">{&event.title}</h1>
            <dl class="mt-4 grid grid-cols-[auto_1fr] gap-x-4 gap-y-1 text-gray-700">
                <dt class="font-medium">{"When"}</dt>
                <dd>
                    {format_date_time(event.start.as_deref())}
                    if event.end_timestamp().is_some() {
                        {format!(" – {}", format_date_time(event.end.as_deref()))}
                    }
                </dd>
                if let Some(location) = location {
                    <>
                        <dt class="font-medium">{"Where"}</dt>
                        <dd>{location}</dd>
                    </>
                }
                <dt class="font-medium">{"Price"}</dt>
                <dd>{event.price_label()}</dd>
                if let Some(capacity) = event.capacity {
                    <>
                        <dt class="font-medium">{"Capacity"}</dt>
                        <dd>{capacity}</dd>
                    </>
                }
            </dl>
            if let Some(description) = &event.description {
                <p class="mt-6 text-gray-800 whitespace-pre-line">{description}</p>
            }
            if let Some(movie_id) = event.movie() {
                <MovieDetails movie_id={movie_id.clone()} />
            }
            <SignupForm event={event.clone()} />
        </article>
    }
}
