use crate::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component]
pub fn Header() -> Html {
    html! {
        <header class="sticky top-0 z-40 bg-white border-b border-gray-200">
            <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <Link<Route> to={Route::Home} classes="text-xl font-semibold text-gray-900">
                        {"FilmHub"}
                    </Link<Route>>
                    <nav class="flex items-center space-x-6 text-sm font-medium text-gray-600">
                        <Link<Route> to={Route::Events} classes="hover:text-gray-900">
                            {"Events"}
                        </Link<Route>>
                        <Link<Route> to={Route::Admin} classes="hover:text-gray-900">
                            {"Admin"}
                        </Link<Route>>
                    </nav>
                </div>
            </div>
        </header>
    }
}
