use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;

/// Body returned by the root endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Greeting {
    pub message: String,
    /// RFC 3339 in UTC, microsecond precision.
    pub timestamp: String,
    pub version: String,
}

impl Greeting {
    /// Build a greeting stamped with the current time.
    pub fn now(service: &ServiceConfig) -> Self {
        Self::at(service, Utc::now())
    }

    pub fn at(service: &ServiceConfig, time: DateTime<Utc>) -> Self {
        Greeting {
            message: service.message.clone(),
            timestamp: time.to_rfc3339_opts(SecondsFormat::Micros, true),
            version: service.version.clone(),
        }
    }
}
