//! An actix-web stand-in for the events backend, serving the same REST
//! surface the frontend consumes from an in-memory [`Store`].

use actix_cors::Cors;
use actix_web::dev::{HttpServiceFactory, Server, Service};
use actix_web::http::StatusCode;
use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer, Responder, ResponseError,
    body::BoxBody, delete, get, post, web,
};
use payloads::api_client::ADMIN_PASSCODE_HEADER;
use payloads::{Event, EventId, requests, responses};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use std::net::TcpListener;
use std::sync::{Mutex, MutexGuard};

use crate::store::{RecordedRequest, Store, StoreError};

pub struct MockConfig {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
    pub admin_passcode: SecretString,
    /// Serve `GET /events` as `{"events": [...]}` instead of a bare array.
    pub wrap_event_list: bool,
    /// Where checkout sessions pretend to live.
    pub checkout_base_url: String,
}

impl MockConfig {
    pub fn from_env() -> Self {
        use std::env::var;

        MockConfig {
            ip: var("IP_ADDRESS").unwrap_or_else(|_| "127.0.0.1".into()),
            port: var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(0),
            admin_passcode: SecretString::from(
                var("ADMIN_PASSCODE").unwrap_or_else(|_| "letmein".into()),
            ),
            wrap_event_list: var("WRAP_EVENT_LIST").is_ok_and(|v| v == "1"),
            checkout_base_url: var("CHECKOUT_BASE_URL")
                .unwrap_or_else(|_| "https://checkout.example.com".into()),
        }
    }
}

pub struct MockState {
    pub store: Mutex<Store>,
    pub admin_passcode: SecretString,
    pub wrap_event_list: bool,
    pub checkout_base_url: String,
}

impl MockState {
    pub fn new(config: &MockConfig) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            admin_passcode: config.admin_passcode.clone(),
            wrap_event_list: config.wrap_event_list,
            checkout_base_url: config.checkout_base_url.clone(),
        }
    }

    /// A poisoned lock only means another handler panicked; the data is
    /// still usable for a mock.
    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_passcode(&self, req: &HttpRequest) -> Result<(), APIError> {
        let given = req
            .headers()
            .get(ADMIN_PASSCODE_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if given.is_empty() || given != self.admin_passcode.expose_secret() {
            return Err(APIError::AuthError);
        }
        Ok(())
    }
}

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(
    config: &mut MockConfig,
    state: web::Data<MockState>,
) -> std::io::Result<Server> {
    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let recorder = state.clone();
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .wrap_fn(move |req, srv| {
                recorder.store().requests.push(RecordedRequest {
                    method: req.method().to_string(),
                    path: req.path().to_string(),
                });
                srv.call(req)
            })
            .service(api_services())
            .app_data(state.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}

pub fn api_services() -> impl HttpServiceFactory {
    web::scope("")
        .service(list_events)
        .service(event_ics)
        .service(get_event)
        .service(create_event)
        .service(delete_event)
        .service(create_signup)
        .service(start_checkout)
        .service(search_movies)
        .service(get_movie)
}

#[derive(Debug, thiserror::Error)]
pub enum APIError {
    #[error("Invalid admin passcode")]
    AuthError,
    /// Validation failures, reported field by field.
    #[error("Invalid request")]
    BadRequest(Value),
    #[error("{0}")]
    NotFound(#[source] StoreError),
    #[error("{0}")]
    Conflict(#[source] StoreError),
}

impl ResponseError for APIError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthError => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let error = match self {
            Self::BadRequest(fields) => fields.clone(),
            other => Value::String(other.to_string()),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": error }))
    }
}

impl From<StoreError> for APIError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EventNotFound | StoreError::MovieNotFound => {
                APIError::NotFound(e)
            }
            StoreError::EventFull => APIError::Conflict(e),
        }
    }
}

#[tracing::instrument(skip(state))]
#[get("/events")]
async fn list_events(state: web::Data<MockState>) -> impl Responder {
    let events = state.store().list_events();
    if state.wrap_event_list {
        HttpResponse::Ok().json(responses::EventList::Wrapped { events })
    } else {
        HttpResponse::Ok().json(events)
    }
}

#[tracing::instrument(skip(state))]
#[get("/events/{id}")]
async fn get_event(
    state: web::Data<MockState>,
    id: web::Path<String>,
) -> Result<HttpResponse, APIError> {
    let event = state.store().get_event(&EventId(id.into_inner()))?;
    Ok(HttpResponse::Ok().json(event))
}

#[tracing::instrument(skip(state, req, details))]
#[post("/events")]
async fn create_event(
    state: web::Data<MockState>,
    req: HttpRequest,
    details: web::Json<requests::CreateEvent>,
) -> Result<HttpResponse, APIError> {
    state.check_passcode(&req)?;
    let details = details.into_inner();
    validate_event(&details)?;
    let event = state.store().create_event(details, jiff::Timestamp::now());
    tracing::info!(id = %event.id, "created event");
    Ok(HttpResponse::Created().json(event))
}

#[tracing::instrument(skip(state, req))]
#[delete("/events/{id}")]
async fn delete_event(
    state: web::Data<MockState>,
    req: HttpRequest,
    id: web::Path<String>,
) -> Result<HttpResponse, APIError> {
    state.check_passcode(&req)?;
    state.store().delete_event(&EventId(id.into_inner()))?;
    Ok(HttpResponse::NoContent().finish())
}

#[tracing::instrument(skip(state))]
#[get("/events/{id}/ics")]
async fn event_ics(
    state: web::Data<MockState>,
    id: web::Path<String>,
) -> Result<HttpResponse, APIError> {
    let event = state.store().get_event(&EventId(id.into_inner()))?;
    Ok(HttpResponse::Ok()
        .content_type("text/calendar; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"event-{}.ics\"", event.id),
        ))
        .body(ics_for_event(&event)))
}

#[tracing::instrument(skip(state, signup))]
#[post("/signups")]
async fn create_signup(
    state: web::Data<MockState>,
    signup: web::Json<requests::CreateSignup>,
) -> Result<HttpResponse, APIError> {
    let signup = signup.into_inner();
    let mut missing = serde_json::Map::new();
    if signup.name.trim().is_empty() {
        missing.insert("name".into(), "required".into());
    }
    if !requests::is_valid_email(&signup.email) {
        missing.insert("email".into(), "invalid".into());
    }
    if !missing.is_empty() {
        return Err(APIError::BadRequest(Value::Object(missing)));
    }
    let confirmation = state.store().create_signup(signup)?;
    Ok(HttpResponse::Created().json(confirmation))
}

#[tracing::instrument(skip(state))]
#[post("/checkout")]
async fn start_checkout(
    state: web::Data<MockState>,
    details: web::Json<requests::StartCheckout>,
) -> Result<HttpResponse, APIError> {
    if details.amount_pence <= 0 {
        return Err(APIError::BadRequest(Value::String(
            "Amount must be positive".into(),
        )));
    }
    let session = responses::CheckoutSession {
        url: format!(
            "{}/session/{}",
            state.checkout_base_url.trim_end_matches('/'),
            uuid::Uuid::new_v4()
        ),
    };
    Ok(HttpResponse::Ok().json(session))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    query: String,
}

#[tracing::instrument(skip(state))]
#[get("/tmdb/search")]
async fn search_movies(
    state: web::Data<MockState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let results = match query.query.trim() {
        "" => Vec::new(),
        q => state.store().search_movies(q),
    };
    HttpResponse::Ok().json(responses::MovieSearchResults { results })
}

#[tracing::instrument(skip(state))]
#[get("/tmdb/movie/{id}")]
async fn get_movie(
    state: web::Data<MockState>,
    id: web::Path<String>,
) -> Result<HttpResponse, APIError> {
    let id: u64 = id
        .parse()
        .map_err(|_| APIError::NotFound(StoreError::MovieNotFound))?;
    let movie = state.store().get_movie(id)?;
    Ok(HttpResponse::Ok().json(movie))
}

/// Mirror the backend's required-field checks so the frontend's error
/// display paths see realistic structured errors.
fn validate_event(details: &requests::CreateEvent) -> Result<(), APIError> {
    let mut fields = serde_json::Map::new();
    if details.title.trim().is_empty() {
        fields.insert("title".into(), "required".into());
    }
    if details.description.trim().chars().count()
        < requests::DESCRIPTION_MIN_LEN
    {
        fields.insert("description".into(), "too short".into());
    }
    if details.location.trim().chars().count() < requests::LOCATION_MIN_LEN {
        fields.insert("location".into(), "too short".into());
    }
    let start = details.start.parse::<jiff::Timestamp>();
    let end = details.end.parse::<jiff::Timestamp>();
    match (start, end) {
        (Ok(start), Ok(end)) if end <= start => {
            fields.insert("end".into(), "must be after start".into());
        }
        (Ok(_), Ok(_)) => {}
        _ => {
            fields.insert("start".into(), "invalid timestamp".into());
        }
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(APIError::BadRequest(Value::Object(fields)))
    }
}

/// Render a single-event iCalendar file.
pub fn ics_for_event(event: &Event) -> String {
    let stamp = |ts: Option<jiff::Timestamp>| {
        ts.map(|ts| ts.strftime("%Y%m%dT%H%M%SZ").to_string())
    };
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//FilmHub//Events//EN".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}@filmhub", event.id),
        format!("SUMMARY:{}", ics_escape(&event.title)),
    ];
    if let Some(start) = stamp(event.start_timestamp()) {
        lines.push(format!("DTSTART:{start}"));
    }
    if let Some(end) = stamp(event.end_timestamp()) {
        lines.push(format!("DTEND:{end}"));
    }
    if let Some(location) = &event.location {
        lines.push(format!("LOCATION:{}", ics_escape(location)));
    }
    if let Some(description) = &event.description {
        lines.push(format!("DESCRIPTION:{}", ics_escape(description)));
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());
    lines.join("\r\n") + "\r\n"
}

fn ics_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}
