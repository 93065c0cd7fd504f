//! Rate-fetch request keys.

use serde::{Deserialize, Serialize};

/// A request key for the rates fetch service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateQuery {
    /// The most recent rate table.
    Latest,
    /// The rate table for a specific calendar date. Carries the raw draft
    /// value; the service rejects dates it cannot parse.
    Historical(String),
}

impl RateQuery {
    /// Renders the request path segment: `latest` or `historical/<date>`.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Latest => "latest".to_string(),
            Self::Historical(date) => format!("historical/{date}"),
        }
    }
}
