use payloads::MovieSearchHit;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MovieSearchProps {
    pub query: String,
    pub results: Vec<MovieSearchHit>,
    pub searching: bool,
    pub on_query: Callback<String>,
    pub on_search: Callback<()>,
    pub on_select: Callback<MovieSearchHit>,
}

/// Free-text movie lookup with a selectable result list.
#[function_component]
pub fn MovieSearch(props: &MovieSearchProps) -> Html {
    let on_input = props.on_query.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    });
    let on_click = props.on_search.reform(|_: MouseEvent| ());
    // Enter searches instead of submitting the surrounding form.
    let on_keydown = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                on_search.emit(());
            }
        })
    };

    html! {
        <div>
            <label for="movie-search" class="block text-sm font-medium text-gray-700">{"Find a film"}</label>
            <div class="mt-1 flex gap-2">
                <input
                    id="movie-search"
                    type="search"
                    value={props.query.clone()}
                    oninput={on_input}
                    onkeydown={on_keydown}
                    placeholder="Search TMDb"
                    class="flex-1 rounded-md border border-gray-300 px-3 py-2"
                />
                <button
                    type="button"
                    onclick={on_click}
                    disabled={props.searching}
                    class="px-4 py-2 rounded-md border border-gray-300 text-sm font-medium hover:bg-gray-50 disabled:opacity-50"
                >
                    {if props.searching { "…" } else { "Search" }}
                </button>
            </div>
            if !props.results.is_empty() {
                <ul class="mt-2 border border-gray-200 rounded-md divide-y divide-gray-200 bg-white">
                    {for props.results.iter().map(|hit| {
                        let on_select = {
                            let hit = hit.clone();
                            props.on_select.reform(move |_: MouseEvent| hit.clone())
                        };
                        html! {
                            <li key={hit.id.to_string()}>
                                <button
                                    type="button"
                                    onclick={on_select}
                                    class="w-full text-left px-3 py-2 text-sm hover:bg-gray-50"
                                >
                                    {hit.display_label()}
                                </button>
                            </li>
                        }
                    })}
                </ul>
            }
        </div>
    }
}
