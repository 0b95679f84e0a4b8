use payloads::{MovieId, PosterSize};
use yew::prelude::*;

use crate::hooks::use_movie;

#[derive(Properties, PartialEq)]
pub struct MoviePreviewProps {
    pub movie_id: MovieId,
}

/// Compact movie card for list rows. Renders nothing until the movie has
/// loaded, and nothing at all if it fails to load.
#[function_component]
pub fn MoviePreview(props: &MoviePreviewProps) -> Html {
    let movie_hook = use_movie(props.movie_id.clone());

    let Some(movie) = movie_hook.data.as_ref() else {
        return html! {};
    };

    html! {
        <div class="flex items-center space-x-3 mt-3">
            {movie.poster_url(PosterSize::W185).map(|src| html! {
                <img
                    src={src}
                    alt={format!("{} poster", movie.title)}
                    class="w-12 h-18 rounded object-cover"
                    loading="lazy"
                />
            })}
            <div class="text-sm">
                <p class="font-medium text-gray-900">{&movie.title}</p>
                {movie.release_year().map(|year| html! {
                    <p class="text-gray-500">{year}</p>
                })}
            </div>
        </div>
    }
}
