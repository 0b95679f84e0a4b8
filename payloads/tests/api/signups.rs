use payloads::requests::{CreateSignup, SignupForm, StartCheckout};
use reqwest::StatusCode;
use test_helpers::{
    ADMIN_PASSCODE, assert_status_code, event_details_b, spawn_app,
};

#[tokio::test]
async fn signup_for_an_event() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let event = app.create_test_event().await?;

    let form = SignupForm {
        name: "Test User".into(),
        email: "test@example.com".into(),
        amount: "".into(),
    };
    let request = form.to_request(&event).expect("form is valid");
    let confirmation = app.client.create_signup(&request).await?;
    assert!(confirmation.message.is_some());

    let signups = app.signups();
    assert_eq!(signups, vec![request]);
    assert_eq!(signups[0].amount_pence, None);

    Ok(())
}

#[tokio::test]
async fn invalid_signup_form_never_reaches_the_backend() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let event = app.create_test_event().await?;
    let before = app.request_count();

    let errors = SignupForm::default().to_request(&event).unwrap_err();
    assert_eq!(
        errors.messages(),
        vec!["Name is required", "Email is required"]
    );

    let errors = SignupForm {
        name: "Test User".into(),
        email: "not-an-email".into(),
        amount: "".into(),
    }
    .to_request(&event)
    .unwrap_err();
    assert_eq!(errors.messages(), vec!["Invalid email"]);

    assert_eq!(app.request_count(), before);

    Ok(())
}

#[tokio::test]
async fn full_event_reports_backend_message() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let event = app
        .client
        .create_event(&event_details_b(), ADMIN_PASSCODE)
        .await?;
    let signup = |email: &str| CreateSignup {
        event_id: event.id.clone(),
        name: "Someone".into(),
        email: email.into(),
        amount_pence: event.fixed_price_pence(),
    };

    app.client.create_signup(&signup("a@example.com")).await?;
    let err = app
        .client
        .create_signup(&signup("b@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));
    assert_eq!(err.to_string(), "Event is full");

    Ok(())
}

#[tokio::test]
async fn signup_for_missing_event_fails() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let result = app
        .client
        .create_signup(&CreateSignup {
            event_id: "gone".into(),
            name: "Someone".into(),
            email: "a@example.com".into(),
            amount_pence: None,
        })
        .await;
    assert_status_code(result, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn checkout_returns_redirect_url() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let session = app
        .client
        .start_checkout(&StartCheckout {
            event_title: "Heat in 35mm".into(),
            amount_pence: 750,
        })
        .await?;
    assert!(session.url.starts_with("https://checkout.example.com/session/"));

    let err = app
        .client
        .start_checkout(&StartCheckout {
            event_title: "Heat in 35mm".into(),
            amount_pence: 0,
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Amount must be positive");

    Ok(())
}
