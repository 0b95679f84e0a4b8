use jiff::tz::TimeZone;
use payloads::requests::{DESCRIPTION_MIN_LEN, LOCATION_MIN_LEN};
use payloads::{EventId, MovieSearchHit, PriceType};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::MovieSearch;
use crate::config::use_api_client;
use crate::hooks::use_title;
use crate::state::{
    CreateEventAction, CreateEventState, EVENT_CREATED, EventField, SubmitStatus,
};
use crate::utils::dates::preview_local_input;

const FIX_FIELDS: &str = "Please fix the highlighted fields";

#[function_component]
pub fn CreateEventPage() -> Html {
    use_title("Create Event");
    let api = use_api_client();
    let state = use_reducer(CreateEventState::default);

    let on_input = |field: EventField| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(CreateEventAction::Edit(field, input.value()));
        })
    };

    let on_description = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            state.dispatch(CreateEventAction::Edit(
                EventField::Description,
                input.value(),
            ));
        })
    };

    let on_price_type = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(price_type) = PriceType::parse(&select.value()) {
                state.dispatch(CreateEventAction::PriceType(price_type));
            }
        })
    };

    let on_query = {
        let state = state.clone();
        Callback::from(move |query: String| {
            state.dispatch(CreateEventAction::SearchQuery(query))
        })
    };

    let on_search = {
        let state = state.clone();
        let api = api.clone();
        Callback::from(move |_: ()| {
            let query = state.search.query.trim().to_string();
            if query.is_empty() || state.search.searching {
                return;
            }

            state.dispatch(CreateEventAction::SearchStarted);
            let state = state.clone();
            let api = api.clone();
            yew::platform::spawn_local(async move {
                let results = match api.search_movies(&query).await {
                    Ok(found) => found.results,
                    Err(e) => {
                        tracing::warn!("Movie search for {query:?} failed: {e}");
                        Vec::new()
                    }
                };
                state.dispatch(CreateEventAction::SearchFinished(results));
            });
        })
    };

    let on_select = {
        let state = state.clone();
        Callback::from(move |hit: MovieSearchHit| state.dispatch(CreateEventAction::SelectMovie(hit)))
    };

    let on_submit = {
        let state = state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !state.can_submit() {
                return;
            }

            let request = match state.form.to_request(&TimeZone::system()) {
                Ok(request) => request,
                Err(errors) => {
                    tracing::debug!("Create event rejected locally: {errors:?}");
                    state.dispatch(CreateEventAction::Failed(FIX_FIELDS.into()));
                    return;
                }
            };
            let passcode = state.form.passcode.clone();

            state.dispatch(CreateEventAction::Submitting);
            let state = state.clone();
            let api = api.clone();
            yew::platform::spawn_local(async move {
                match api.create_event(&request, &passcode).await {
                    Ok(event) => {
                        tracing::info!("Created event {}", event.id);
                        state.dispatch(CreateEventAction::Created(event));
                    }
                    Err(e) => {
                        tracing::warn!("Create event failed: {e}");
                        state.dispatch(CreateEventAction::Failed(e.to_string()));
                    }
                }
            });
        })
    };

    let form = &state.form;
    let errors = form.validate();
    let submitting = state.status.is_submitting();
    // Only complain about fields the admin has started filling in.
    let shown = |value: &str, error: Option<&'static str>| {
        error.filter(|_| !value.trim().is_empty())
    };

    html! {
        <div class="max-w-2xl">
            <h1 class="text-3xl font-bold text-gray-900 mb-6">{"Create Event"}</h1>

            if let (SubmitStatus::Succeeded, Some(id)) = (&state.status, &state.created) {
                <CreatedNotice id={id.clone()} />
            }

            <form onsubmit={on_submit} class="space-y-5 bg-white rounded-lg border border-gray-200 p-6" novalidate=true>
                <Field label="Title" id="title" error={shown(&form.title, errors.title)}>
                    <input id="title" type="text" value={form.title.clone()}
                        oninput={on_input(EventField::Title)} class={INPUT_CLASS} />
                </Field>

                <Field label="Description" id="description"
                    hint={format!("Min {DESCRIPTION_MIN_LEN} characters")}
                    error={shown(&form.description, errors.description)}>
                    <textarea id="description" rows="4" value={form.description.clone()}
                        oninput={on_description} class={INPUT_CLASS} />
                </Field>

                <Field label="Location" id="location"
                    hint={format!("Min {LOCATION_MIN_LEN} characters")}
                    error={shown(&form.location, errors.location)}>
                    <input id="location" type="text" value={form.location.clone()}
                        oninput={on_input(EventField::Location)} class={INPUT_CLASS} />
                </Field>

                <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                    <Field label="Start" id="start" hint={format!("Preview: {}", preview_local_input(&form.start))}
                        error={shown(&form.start, errors.start)}>
                        <input id="start" type="datetime-local" value={form.start.clone()}
                            oninput={on_input(EventField::Start)} class={INPUT_CLASS} />
                    </Field>
                    <Field label="End" id="end" hint={format!("Preview: {}", preview_local_input(&form.end))}
                        error={shown(&form.end, errors.end)}>
                        <input id="end" type="datetime-local" value={form.end.clone()}
                            oninput={on_input(EventField::End)} class={INPUT_CLASS} />
                    </Field>
                </div>

                <MovieSearch
                    query={state.search.query.clone()}
                    results={state.search.results.clone()}
                    searching={state.search.searching}
                    on_query={on_query}
                    on_search={on_search}
                    on_select={on_select}
                />

                <Field label="TMDb movie ID (optional)" id="movie-id" error={shown(&form.movie_id, errors.movie_id)}>
                    <input id="movie-id" type="text" inputmode="numeric" value={form.movie_id.clone()}
                        oninput={on_input(EventField::MovieId)} class={INPUT_CLASS} />
                </Field>

                <div class="grid grid-cols-1 sm:grid-cols-3 gap-4">
                    <Field label="Pricing" id="price-type">
                        <select id="price-type" onchange={on_price_type} class={INPUT_CLASS}>
                            {for PriceType::ALL.into_iter().map(|price_type| html! {
                                <option
                                    value={price_type.as_str()}
                                    selected={price_type == form.price_type}
                                >
                                    {price_type.label()}
                                </option>
                            })}
                        </select>
                    </Field>
                    if form.price_type == PriceType::Fixed {
                        <Field label="Price (£)" id="price" error={shown(&form.price, errors.price)}>
                            <input id="price" type="text" inputmode="decimal" placeholder="0.00"
                                value={form.price.clone()}
                                oninput={on_input(EventField::Price)} class={INPUT_CLASS} />
                        </Field>
                    }
                    <Field label="Capacity (optional)" id="capacity" error={shown(&form.capacity, errors.capacity)}>
                        <input id="capacity" type="text" inputmode="numeric" value={form.capacity.clone()}
                            oninput={on_input(EventField::Capacity)} class={INPUT_CLASS} />
                    </Field>
                </div>

                <Field label="Admin passcode" id="passcode">
                    <input id="passcode" type="password" autocomplete="off" value={form.passcode.clone()}
                        oninput={on_input(EventField::Passcode)} class={INPUT_CLASS} />
                </Field>

                if let Some(error) = state.status.error() {
                    <p class="text-sm text-red-600" role="alert">{error}</p>
                }

                <button
                    type="submit"
                    disabled={!state.can_submit()}
                    class="px-4 py-2 rounded-md bg-indigo-600 text-white font-medium hover:bg-indigo-700 disabled:opacity-50"
                >
                    {if submitting { "Creating…" } else { "Create Event" }}
                </button>
            </form>
        </div>
    }
}

const INPUT_CLASS: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2";

#[derive(Properties, PartialEq)]
struct CreatedNoticeProps {
    id: EventId,
}

#[function_component]
fn CreatedNotice(props: &CreatedNoticeProps) -> Html {
    html! {
        <div class="mb-6 p-4 rounded-md bg-green-50 border border-green-200 text-green-800" role="status">
            {EVENT_CREATED}{" "}
            <Link<Route> to={Route::EventDetail { id: props.id.to_string() }} classes="font-medium underline">
                {"View event →"}
            </Link<Route>>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FieldProps {
    label: AttrValue,
    id: AttrValue,
    #[prop_or_default]
    hint: Option<AttrValue>,
    #[prop_or_default]
    error: Option<&'static str>,
    children: Html,
}

#[function_component]
fn Field(props: &FieldProps) -> Html {
    html! {
        <div>
            <label for={props.id.clone()} class="block text-sm font-medium text-gray-700">
                {props.label.clone()}
            </label>
            {props.children.clone()}
            if let Some(hint) = &props.hint {
                <p class="mt-1 text-xs text-gray-500">{hint.clone()}</p>
            }
            if let Some(error) = props.error {
                <p class="mt-1 text-sm text-red-600">{error}</p>
            }
        </div>
    }
}
