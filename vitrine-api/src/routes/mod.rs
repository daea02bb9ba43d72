pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod profiles;
pub mod reviews;

use serde::{Deserialize, Serialize};

use vitrine_shared::PaginationParams;

/// `page` / `per_page` query parameters; a missing `per_page` uses the configured page size.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl PageQuery {
    pub fn resolve(&self, default_per_page: u64) -> PaginationParams {
        PaginationParams::new(self.page.unwrap_or(1), self.per_page.unwrap_or(default_per_page))
    }
}

/// Result of an admin action; `applied` is false when the record was not found.
#[derive(Debug, Serialize)]
pub struct ActionOutcome {
    pub applied: bool,
    /// New value of a toggled flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
}

impl From<bool> for ActionOutcome {
    fn from(applied: bool) -> Self {
        Self { applied, value: None }
    }
}

impl From<Option<bool>> for ActionOutcome {
    fn from(value: Option<bool>) -> Self {
        Self { applied: value.is_some(), value }
    }
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: u64,
}
