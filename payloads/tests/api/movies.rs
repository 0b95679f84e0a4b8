use payloads::{MovieId, PosterSize};
use reqwest::StatusCode;
use test_helpers::{assert_status_code, mock, spawn_app};

#[tokio::test]
async fn search_and_fetch_movie() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_movies();

    let results = app.client.search_movies("  inception ").await?.results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, mock::INCEPTION_ID);
    assert_eq!(results[0].display_label(), "Inception (2010-07-15)");

    let movie = app.client.get_movie(&results[0].movie_id()).await?;
    assert_eq!(movie.title, "Inception");
    assert_eq!(movie.release_year(), Some("2010"));
    assert!(
        movie
            .poster_url(PosterSize::default())
            .is_some_and(|url| url.starts_with("https://image.tmdb.org/t/p/w342/"))
    );

    let requests = app.requests();
    assert_eq!(requests[0].path, "/tmdb/search");

    Ok(())
}

#[tokio::test]
async fn blank_search_makes_no_request() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let results = app.client.search_movies("   ").await?;
    assert!(results.results.is_empty());
    assert_eq!(app.request_count(), 0);

    Ok(())
}

#[tokio::test]
async fn unknown_movie_is_an_error() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.seed_movies();

    assert_status_code(
        app.client.get_movie(&MovieId::from(1_u64)).await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        app.client.get_movie(&MovieId("tt0111161".into())).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}
