use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_jwt_ttl")]
    pub jwt_ttl_secs: i64,

    // Simulated round trip of the mock services
    #[serde(default = "default_latency_min")]
    pub latency_min_ms: u64,
    #[serde(default = "default_latency_max")]
    pub latency_max_ms: u64,

    #[serde(default = "default_unlock_fee")]
    pub unlock_fee_cents: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default = "default_seed")]
    pub seed_demo_data: bool,
}

fn default_port() -> u16 { 3000 }
fn default_jwt_secret() -> String { "development-secret-change-in-production".into() }
fn default_jwt_ttl() -> i64 { 86_400 }
fn default_latency_min() -> u64 { 500 }
fn default_latency_max() -> u64 { 1500 }
fn default_unlock_fee() -> u32 { 999 }
fn default_page_size() -> u64 { 12 }
fn default_seed() -> bool { true }

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            jwt_secret: default_jwt_secret(),
            jwt_ttl_secs: default_jwt_ttl(),
            latency_min_ms: default_latency_min(),
            latency_max_ms: default_latency_max(),
            unlock_fee_cents: default_unlock_fee(),
            page_size: default_page_size(),
            seed_demo_data: default_seed(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("VITRINE_API").separator("__"))
            .build()?;
        Ok(config.try_deserialize().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid configuration, using defaults");
            Self::default()
        }))
    }

    pub fn latency(&self) -> vitrine_shared::Latency {
        vitrine_shared::Latency::from_millis(self.latency_min_ms, self.latency_max_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.page_size, 12);
        assert!(config.seed_demo_data);
    }

    #[test]
    fn zero_latency_is_instant() {
        let config = AppConfig { latency_min_ms: 0, latency_max_ms: 0, ..Default::default() };
        assert_eq!(config.latency(), vitrine_shared::Latency::Instant);
    }
}
