pub mod backend;
pub mod mock;
pub mod store;
pub mod telemetry;

use actix_web::web;
use backend::{MockConfig, MockState};
use payloads::{Event, requests};
use reqwest::StatusCode;
use secrecy::SecretString;
use store::RecordedRequest;
use tokio::task::JoinHandle;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

pub const ADMIN_PASSCODE: &str = "letmein";

pub struct TestApp {
    pub port: u16,
    pub client: payloads::APIClient,
    pub state: web::Data<MockState>,
}

/// Inspection helpers for asserting on what the mock saw.
impl TestApp {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.store().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.store().requests.len()
    }

    pub fn signups(&self) -> Vec<requests::CreateSignup> {
        self.state.store().signups().to_vec()
    }

    pub fn seed_event(&self, event: Event) {
        self.state.store().insert_event(event);
    }

    pub fn seed_movies(&self) {
        let mut store = self.state.store();
        for movie in mock::movies() {
            store.insert_movie(movie);
        }
    }
}

/// Functions to populate test data through the api client.
///
/// Using anyhow::Result lets us get a backtrace from when the error was fist
/// converted to anyhow::Result. Run with RUST_BACKTRACE=1 to view.
impl TestApp {
    pub async fn create_test_event(&self) -> anyhow::Result<Event> {
        Ok(self
            .client
            .create_event(&event_details_a(), ADMIN_PASSCODE)
            .await?)
    }
}

pub fn test_config(port: u16) -> MockConfig {
    MockConfig {
        ip: "127.0.0.1".into(),
        port,
        admin_passcode: SecretString::from(ADMIN_PASSCODE.to_string()),
        wrap_event_list: false,
        checkout_base_url: "https://checkout.example.com".into(),
    }
}

/// Bind and spawn the mock backend on the current tokio runtime.
pub fn start(
    mut config: MockConfig,
) -> std::io::Result<(TestApp, JoinHandle<std::io::Result<()>>)> {
    let state = web::Data::new(MockState::new(&config));
    let server = backend::build(&mut config, state.clone())?;
    let handle = tokio::spawn(server);

    let app = TestApp {
        port: config.port,
        client: payloads::APIClient::new(format!(
            "http://127.0.0.1:{}",
            config.port
        )),
        state,
    };
    Ok((app, handle))
}

pub async fn spawn_app_with_config(config: MockConfig) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let (app, _) = start(config).expect("Failed to bind mock backend");
    app
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    spawn_app_with_config(test_config(port)).await
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}

pub fn event_details_a() -> requests::CreateEvent {
    requests::CreateEvent {
        title: "Friday Night Noir".into(),
        description: "A double bill of classic film noir.".into(),
        start: "2030-06-07T18:00:00Z".into(),
        end: "2030-06-07T22:30:00Z".into(),
        location: "Main Hall".into(),
        movie_id: Some(payloads::MovieId::from(mock::THIRD_MAN_ID)),
        price_type: Some(payloads::PriceType::Free),
        price_pence: None,
        capacity: None,
        is_paid: Some(false),
    }
}

pub fn event_details_b() -> requests::CreateEvent {
    requests::CreateEvent {
        title: "Heat in 35mm".into(),
        description: "Michael Mann's Heat, projected on film.".into(),
        start: "2030-07-01T19:00:00Z".into(),
        end: "2030-07-01T22:00:00Z".into(),
        location: "Screen 2".into(),
        movie_id: Some(payloads::MovieId::from(mock::HEAT_ID)),
        price_type: Some(payloads::PriceType::Fixed),
        price_pence: Some(750),
        capacity: Some(1),
        is_paid: Some(true),
    }
}
