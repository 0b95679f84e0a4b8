use payloads::{MovieId, MovieSummary};
use yew::prelude::*;

use super::{FetchHookReturn, use_fetch};
use crate::config::use_api_client;

#[hook]
pub fn use_movie(movie_id: MovieId) -> FetchHookReturn<MovieSummary> {
    let api = use_api_client();

    use_fetch(movie_id.clone(), move || {
        let api = api.clone();
        let movie_id = movie_id.clone();
        async move {
            api.get_movie(&movie_id).await.map_err(|e| {
                tracing::warn!("Failed to load movie {movie_id}: {e}");
                e.to_string()
            })
        }
    })
}
