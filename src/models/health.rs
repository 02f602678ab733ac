use serde::{Deserialize, Serialize};

/// Body returned by the liveness and readiness probes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

impl HealthStatus {
    pub fn healthy(service: &str) -> Self {
        HealthStatus {
            status: "healthy".to_string(),
            service: service.to_string(),
        }
    }

    pub fn ready(service: &str) -> Self {
        HealthStatus {
            status: "ready".to_string(),
            service: service.to_string(),
        }
    }
}
