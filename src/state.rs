use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::gateway::ModelGateway;
use crate::models::session::QuizSession;

/// The single quiz slot of the tool. `None` until the first quiz is generated.
pub type SessionStore = Arc<Mutex<Option<QuizSession>>>;

pub type SharedGateway = Arc<dyn ModelGateway>;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub gateway: SharedGateway,
    pub session: SessionStore,
}

impl AppState {
    pub fn new(config: Config, gateway: SharedGateway) -> Self {
        Self {
            config,
            gateway,
            session: Arc::new(Mutex::new(None)),
        }
    }
}

impl FromRef<AppState> for SharedGateway {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.session.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
