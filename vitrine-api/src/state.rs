use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::sync::RwLock;
use uuid::Uuid;

use vitrine_auth::AuthService;
use vitrine_catalog::ReviewVotes;
use vitrine_moderation::{BackOffice, Repository};
use vitrine_payment::{MockProcessor, Unlocks};
use vitrine_shared::middleware::JwtSecretSource;
use vitrine_shared::{AppResult, Clock};

use crate::config::AppConfig;

pub struct AppState {
    pub config: AppConfig,
    pub clock: Arc<dyn Clock>,
    pub back_office: RwLock<BackOffice>,
    pub auth: AuthService,
    pub payments: MockProcessor,
    pub unlocks: RwLock<Unlocks<Uuid>>,
    pub votes: RwLock<ReviewVotes<Uuid>>,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn build(config: AppConfig, clock: Arc<dyn Clock>, metrics_handle: PrometheusHandle) -> AppResult<Self> {
        let latency = config.latency();
        let repo = if config.seed_demo_data {
            Repository::seeded(clock.today())
        } else {
            Repository::empty()
        };

        Ok(Self {
            back_office: RwLock::new(BackOffice::new(repo, clock.clone())),
            auth: AuthService::with_demo_users(config.jwt_secret.clone(), config.jwt_ttl_secs, latency)?,
            payments: MockProcessor::new(latency, clock.clone()),
            unlocks: RwLock::new(Unlocks::new()),
            votes: RwLock::new(ReviewVotes::new()),
            metrics_handle,
            clock,
            config,
        })
    }
}

impl JwtSecretSource for AppState {
    fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}
