use payloads::EventId;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod config;
pub mod contexts;
pub mod hooks;
pub mod logs;
pub mod pages;
pub mod state;
pub mod utils;

use components::MainLayout;
use config::{ApiContext, AppConfig};
use contexts::ToastProvider;
use pages::{
    CreateEventPage, EventDetailPage, EventsPage, NotFoundPage, ThanksPage,
};

#[function_component]
pub fn App() -> Html {
    let api = use_memo((), |_| {
        let config = AppConfig::from_build_env();
        tracing::info!("Using backend at {}", config.backend_url);
        ApiContext::new(&config)
    });

    html! {
        <BrowserRouter>
            <ContextProvider<ApiContext> context={(*api).clone()}>
                <ToastProvider>
                    <MainLayout>
                        <Switch<Route> render={switch} />
                    </MainLayout>
                </ToastProvider>
            </ContextProvider<ApiContext>>
        </BrowserRouter>
    }
}

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/events")]
    Events,
    #[at("/events/:id")]
    EventDetail { id: String },
    #[at("/admin")]
    Admin,
    #[at("/thanks")]
    Thanks,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home | Route::Events => html! { <EventsPage /> },
        Route::EventDetail { id } => {
            html! { <EventDetailPage id={EventId(id)} /> }
        }
        Route::Admin => html! { <CreateEventPage /> },
        Route::Thanks => html! { <ThanksPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[cfg(test)]
mod tests {
    use super::Route;
    use yew_router::Routable;

    #[test]
    fn event_paths_resolve_to_detail_route() {
        assert_eq!(
            Route::recognize("/events/heat-35mm"),
            Some(Route::EventDetail {
                id: "heat-35mm".into()
            })
        );
        assert_eq!(Route::recognize("/admin"), Some(Route::Admin));
    }

    #[test]
    fn unknown_paths_fall_back_to_not_found() {
        assert_eq!(Route::not_found_route(), Some(Route::NotFound));
    }
}
