mod events;
mod movies;
mod signups;

use test_helpers::spawn_app;

#[tokio::test]
async fn mock_backend_records_requests() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.list_events().await?;

    let requests = app.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/events");

    Ok(())
}
