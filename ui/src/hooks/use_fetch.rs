use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

use super::{FetchState, RequestGeneration};

/// Generic fetch hook return type
pub struct FetchHookReturn<T> {
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub refetch: Callback<()>,
}

impl<T: Clone> FetchHookReturn<T> {
    /// Returns true if this is the initial load (data not yet fetched,
    /// currently loading, and no error).
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && !self.data.is_fetched() && self.error.is_none()
    }

    /// Render the loading and error states, calling `render_fn` once data
    /// has arrived.
    ///
    /// * `loading` - Text shown until the first response, e.g.
    ///   "Loading film details…"
    /// * `render_fn` - Receives the fetched data
    pub fn render<F>(&self, loading: &str, render_fn: F) -> Html
    where
        F: Fn(&T) -> Html,
    {
        match (self.data.as_ref(), &self.error) {
            (Some(data), _) => render_fn(data),
            (None, Some(error)) => html! {
                <p class="text-sm text-red-600" role="alert">{error}</p>
            },
            (None, None) => html! {
                <p class="text-sm text-gray-500" role="status">{loading}</p>
            },
        }
    }
}

/// Generic fetch hook composer.
///
/// Fetches on mount and whenever `deps` change, and provides refetch
/// capability. The fetch function captures its inputs from the closure;
/// `deps` is used only for dependency tracking.
///
/// Responses are applied only while the request's ticket is current. The
/// effect destructor invalidates outstanding tickets, so a response that
/// lands after unmount or after the deps changed is dropped.
///
/// # Example
///
/// ```rust,ignore
/// #[hook]
/// pub fn use_event(id: EventId) -> FetchHookReturn<Event> {
///     let api = use_api_client();
///     use_fetch(id.clone(), move || {
///         let api = api.clone();
///         let id = id.clone();
///         async move { api.get_event(&id).await.map_err(|e| e.to_string()) }
///     })
/// }
/// ```
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch_fn: F) -> FetchHookReturn<T>
where
    T: Clone + 'static,
    D: PartialEq + Clone + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let data = use_state(|| unfetched::<T>().0);
    let error = use_state(|| unfetched::<T>().1);
    let is_loading = use_state(|| unfetched::<T>().2);
    let generation = use_state(RequestGeneration::default);

    let refetch = {
        let data = data.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        let generation = (*generation).clone();
        let fetch_fn = Rc::new(fetch_fn);

        use_callback(deps.clone(), move |_, _| {
            let data = data.clone();
            let error = error.clone();
            let is_loading = is_loading.clone();
            let fetch_fn = fetch_fn.clone();
            let ticket = generation.begin();

            yew::platform::spawn_local(async move {
                is_loading.set(true);
                error.set(None);

                let result = fetch_fn().await;
                if !ticket.is_current() {
                    tracing::debug!("Dropping response for a stale request");
                    return;
                }

                match result {
                    Ok(result) => {
                        data.set(FetchState::Fetched(result));
                        error.set(None);
                    }
                    Err(e) => {
                        error.set(Some(e));
                    }
                }

                is_loading.set(false);
            });
        })
    };

    // Fetch on mount and when deps change; drop stale data and errors from
    // the previous deps so they are never shown against the new ones.
    {
        let refetch = refetch.clone();
        let data = data.clone();
        let error = error.clone();
        let is_loading = is_loading.clone();
        let generation = (*generation).clone();

        use_effect_with(deps, move |_| {
            let (fresh_data, fresh_error, loading) = unfetched();
            data.set(fresh_data);
            error.set(fresh_error);
            is_loading.set(loading);
            refetch.emit(());
            move || generation.invalidate()
        });
    }

    FetchHookReturn {
        data: (*data).clone(),
        is_loading: *is_loading,
        error: (*error).clone(),
        refetch: Callback::from(move |_| refetch.emit(())),
    }
}

/// Data, error and loading flag while nothing has come back for the current
/// deps.
fn unfetched<T>() -> (FetchState<T>, Option<String>, bool) {
    (FetchState::NotFetched, None, true)
}
