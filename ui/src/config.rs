//! Build-time configuration and the API client shared through context.

use payloads::APIClient;
use std::ops::Deref;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the events backend, without a trailing slash.
    pub backend_url: String,
}

impl AppConfig {
    /// Read `BACKEND_URL` as it was set at build time, falling back to the
    /// origin the app is served from.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("BACKEND_URL").map(str::to_string))
    }

    fn new(backend_url: Option<String>) -> Self {
        let backend_url = backend_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(page_origin);
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }
}

fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

/// Handle to the backend client, provided once at the root of the app.
#[derive(Debug, Clone)]
pub struct ApiContext(Rc<APIClient>);

impl ApiContext {
    pub fn new(config: &AppConfig) -> Self {
        Self(Rc::new(APIClient::new(config.backend_url.clone())))
    }
}

impl PartialEq for ApiContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for ApiContext {
    type Target = APIClient;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[hook]
pub fn use_api_client() -> ApiContext {
    use_context::<ApiContext>()
        .expect("use_api_client must be used within the App component")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_backend_url_drops_trailing_slash() {
        let config = AppConfig::new(Some("http://localhost:8000/".into()));
        assert_eq!(config.backend_url, "http://localhost:8000");
    }

    #[test]
    fn contexts_compare_by_identity() {
        let config = AppConfig::new(Some("http://localhost:8000".into()));
        let a = ApiContext::new(&config);
        let b = ApiContext::new(&config);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
