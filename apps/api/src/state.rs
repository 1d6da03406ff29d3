use std::sync::Arc;

use tokio::sync::Mutex;

use crate::llm_client::TextGenerator;
use crate::session::Session;
use crate::setup::store::ConfigStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation call boundary. Gemini in production, a stub in tests.
    pub llm: Arc<dyn TextGenerator>,
    /// Where the merchant config survives restarts, if anywhere.
    pub store: Arc<dyn ConfigStore>,
    /// The one session this service drives. Never locked across an LLM call.
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(llm: Arc<dyn TextGenerator>, store: Arc<dyn ConfigStore>, session: Session) -> Self {
        Self {
            llm,
            store,
            session: Arc::new(Mutex::new(session)),
        }
    }
}
