use crate::api::{ApiClient, EnvConfig};

#[derive(Clone)]
pub(crate) struct AppState {
    pub config: EnvConfig,
    pub api_client: ApiClient,
}

impl AppState {
    pub fn new(config: EnvConfig) -> Self {
        Self {
            api_client: ApiClient::from_config(&config),
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EnvConfig::new())
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
