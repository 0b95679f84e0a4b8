use payloads::{MovieId, PosterSize};
use yew::prelude::*;

use crate::hooks::use_movie;

pub const TMDB_URL: &str = "https://www.themoviedb.org";

#[derive(Properties, PartialEq)]
pub struct MovieDetailsProps {
    pub movie_id: MovieId,
}

/// "About the Film" section on the event detail page. A failed movie fetch
/// only affects this section.
#[function_component]
pub fn MovieDetails(props: &MovieDetailsProps) -> Html {
    let movie_hook = use_movie(props.movie_id.clone());

    html! {
        <section class="mt-8 bg-white rounded-lg border border-gray-200 p-6">
            <h2 class="text-xl font-semibold mb-4">{"About the Film"}</h2>
            {movie_hook.render("Loading film details…", |movie| html! {
                <div class="flex flex-col sm:flex-row gap-6">
                    {movie.poster_url(PosterSize::W342).map(|src| html! {
                        <img
                            src={src}
                            alt={format!("{} poster", movie.title)}
                            class="w-40 rounded shadow"
                        />
                    })}
                    <div class="space-y-2">
                        <h3 class="text-lg font-semibold">
                            {&movie.title}
                            {movie.release_year().map(|year| html! {
                                <span class="text-gray-500 font-normal">{format!(" ({year})")}</span>
                            })}
                        </h3>
                        {movie.runtime.map(|minutes| html! {
                            <p class="text-sm text-gray-500">{format!("{minutes} min")}</p>
                        })}
                        if !movie.genres.is_empty() {
                            <p class="text-sm text-gray-500">{movie.genres.join(", ")}</p>
                        }
                        {movie.overview.as_ref().map(|overview| html! {
                            <p class="text-gray-700">{overview}</p>
                        })}
                        <p class="text-xs text-gray-400">
                            <a href={TMDB_URL} target="_blank" rel="noopener noreferrer" class="underline">
                                {"Powered by TMDb"}
                            </a>
                        </p>
                    </div>
                </div>
            })}
        </section>
    }
}
