use yew::prelude::*;
use yew_router::prelude::*;

use crate::{Route, hooks::use_title};

/// Landing page after a hosted checkout.
#[function_component]
pub fn ThanksPage() -> Html {
    use_title("Thanks");

    html! {
        <div class="text-center py-16">
            <h1 class="text-3xl font-bold text-gray-900">{"Thanks!"}</h1>
            <p class="mt-4 text-gray-600">{"Your action was completed."}</p>
            <Link<Route> to={Route::Home} classes="inline-block mt-6 text-indigo-600 hover:text-indigo-800">
                {"Back to events"}
            </Link<Route>>
        </div>
    }
}
