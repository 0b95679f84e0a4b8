use yew::prelude::*;
use yew_router::prelude::*;

use crate::{Route, hooks::use_title};

#[function_component]
pub fn NotFoundPage() -> Html {
    use_title("Page Not Found");

    html! {
        <div class="text-center py-16">
            <h1 class="text-4xl font-bold text-gray-900">{"404 – Page Not Found"}</h1>
            <p class="mt-4 text-gray-600">{"The page you are looking for doesn't exist."}</p>
            <Link<Route> to={Route::Home} classes="inline-block mt-6 text-indigo-600 hover:text-indigo-800">
                {"Back to events"}
            </Link<Route>>
        </div>
    }
}
