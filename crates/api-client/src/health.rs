// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Health check types for API clients

use serde::{Deserialize, Serialize};

/// Health status of an API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum HealthStatus {
    /// Service is healthy and operational
    Up,
    /// Service is degraded but still functional
    Degraded { reason: String },
    /// Service is down and not functional
    Down { reason: String },
}

impl HealthStatus {
    /// Check if this health status indicates the service is completely down
    pub fn is_down(&self) -> bool {
        matches!(self, HealthStatus::Down { .. })
    }

    /// Get a human-readable description of the status
    pub fn description(&self) -> &str {
        match self {
            HealthStatus::Up => "Service is healthy",
            HealthStatus::Degraded { reason } | HealthStatus::Down { reason } => reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_down_check() {
        assert!(!HealthStatus::Up.is_down());
        assert!(
            HealthStatus::Down {
                reason: "offline".to_string()
            }
            .is_down()
        );
    }

    #[test]
    fn health_status_description() {
        assert_eq!(HealthStatus::Up.description(), "Service is healthy");
        let degraded = HealthStatus::Degraded {
            reason: "rate limited".to_string(),
        };
        assert_eq!(degraded.description(), "rate limited");
    }
}
