use payloads::{ClientError, EventId};
use reqwest::StatusCode;
use test_helpers::{
    ADMIN_PASSCODE, assert_status_code, event_details_a, event_details_b,
    mock, spawn_app, spawn_app_with_config, test_config,
};

#[tokio::test]
async fn create_read_delete_event() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let created = app.create_test_event().await?;
    assert_eq!(created.title, event_details_a().title);
    assert!(created.created_at.is_some());

    let fetched = app.client.get_event(&created.id).await?;
    assert_eq!(fetched, created);

    let events = app.client.list_events().await?;
    assert_eq!(events, vec![created.clone()]);

    app.client.delete_event(&created.id, ADMIN_PASSCODE).await?;
    assert_status_code(
        app.client.get_event(&created.id).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn missing_event_is_not_found_with_backend_message() -> anyhow::Result<()>
{
    let app = spawn_app().await;

    let err = app
        .client
        .get_event(&EventId::from("does-not-exist"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "Event not found");

    Ok(())
}

#[tokio::test]
async fn list_accepts_wrapped_payload() -> anyhow::Result<()> {
    let mut config = test_config(0);
    config.wrap_event_list = true;
    let app = spawn_app_with_config(config).await;
    let created = app.create_test_event().await?;

    let events = app.client.list_events().await?;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, created.id);

    Ok(())
}

#[tokio::test]
async fn events_without_dates_are_listed() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut event =
        mock::event_in("tbc", "To be confirmed", jiff::Timestamp::now(), 1, 1);
    event.start = None;
    event.end = None;
    app.seed_event(event);

    let events = app.client.list_events().await?;
    assert_eq!(events[0].start, None);
    assert_eq!(events[0].start_timestamp(), None);

    Ok(())
}

#[tokio::test]
async fn blank_passcode_fails_without_a_request() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let create = app.client.create_event(&event_details_a(), "   ").await;
    assert!(matches!(create, Err(ClientError::MissingPasscode)));

    let delete = app.client.delete_event(&EventId::from("any"), "").await;
    assert!(matches!(delete, Err(ClientError::MissingPasscode)));

    assert_eq!(app.request_count(), 0);

    Ok(())
}

#[tokio::test]
async fn wrong_passcode_is_rejected() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let created = app.create_test_event().await?;

    let err = app
        .client
        .create_event(&event_details_b(), "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "Invalid admin passcode");

    assert_status_code(
        app.client.delete_event(&created.id, "wrong").await,
        StatusCode::UNAUTHORIZED,
    );
    assert_eq!(app.client.list_events().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn passcode_is_trimmed_before_sending() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client
        .create_event(&event_details_a(), &format!("  {ADMIN_PASSCODE} "))
        .await?;

    Ok(())
}

#[tokio::test]
async fn structured_validation_errors_are_stringified() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let mut details = event_details_a();
    details.title = "".into();

    let err = app
        .client
        .create_event(&details, ADMIN_PASSCODE)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    assert_eq!(err.to_string(), r#"{"title":"required"}"#);

    Ok(())
}

#[tokio::test]
async fn delete_removes_only_that_event() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let a = app.create_test_event().await?;
    let b = app
        .client
        .create_event(&event_details_b(), ADMIN_PASSCODE)
        .await?;

    app.client.delete_event(&a.id, ADMIN_PASSCODE).await?;

    let remaining = app.client.list_events().await?;
    assert_eq!(remaining, vec![b]);

    assert_status_code(
        app.client.delete_event(&a.id, ADMIN_PASSCODE).await,
        StatusCode::NOT_FOUND,
    );

    Ok(())
}

#[tokio::test]
async fn ics_url_serves_a_calendar_file() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let created = app.create_test_event().await?;

    let url = app.client.event_ics_url(&created.id);
    assert_eq!(url, format!("{}/events/{}/ics", app.address(), created.id));

    let body = reqwest::get(&url).await?.text().await?;
    assert!(body.starts_with("BEGIN:VCALENDAR"));
    assert!(body.contains("SUMMARY:Friday Night Noir"));
    assert!(body.contains("DTSTART:20300607T180000Z"));

    Ok(())
}
