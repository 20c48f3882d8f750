//! Request and response models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::database::ConnectionStatus;
use crate::health::{DependencyState, DependencyStatus, StatusReport};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegistrationForm {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
    #[validate(required, length(min = 1))]
    pub birthdate: Option<String>,
}

/// Flat JSON rendering of a [`StatusReport`].
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub memory: u64,
    pub version: String,
    pub platform: String,
    pub port: u16,
    pub database: DependencyState,
}

impl StatusPayload {
    pub fn from_report(report: &StatusReport, port: u16) -> Self {
        Self {
            status: "online".to_string(),
            timestamp: report
                .system
                .captured_at
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            uptime: report.system.uptime_seconds,
            memory: report.system.memory_used_bytes,
            version: report.system.runtime_version.clone(),
            platform: report.system.platform.clone(),
            port,
            database: report.dependency.state,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabasePayload {
    pub connection: ConnectionStatus,
    pub is_connected: bool,
    pub timestamp: String,
}

impl DatabasePayload {
    pub fn new(connection: ConnectionStatus, dependency: &DependencyStatus) -> Self {
        Self {
            connection,
            is_connected: dependency.is_connected(),
            timestamp: dependency
                .checked_at
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse {
    pub message: String,
    pub received_data: serde_json::Value,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ConnectionState;
    use crate::health::SystemSnapshot;

    fn report(state: DependencyState) -> StatusReport {
        StatusReport {
            system: SystemSnapshot {
                uptime_seconds: 125,
                memory_used_bytes: 42 * 1024 * 1024,
                platform: "linux".to_string(),
                runtime_version: "v0.1.0".to_string(),
                captured_at: chrono::Utc::now(),
            },
            dependency: DependencyStatus {
                state,
                detail: "failed".to_string(),
                checked_at: chrono::Utc::now(),
            },
        }
    }

    #[test]
    fn test_status_payload_fields() {
        let payload = StatusPayload::from_report(&report(DependencyState::Disconnected), 3000);
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["status"], "online");
        assert_eq!(value["uptime"], 125);
        assert_eq!(value["memory"], 42 * 1024 * 1024);
        assert_eq!(value["version"], "v0.1.0");
        assert_eq!(value["platform"], "linux");
        assert_eq!(value["port"], 3000);
        assert_eq!(value["database"], "disconnected");
    }

    #[test]
    fn test_database_payload_field_names() {
        let dependency = report(DependencyState::Connected).dependency;
        let payload = DatabasePayload::new(
            ConnectionStatus {
                status: ConnectionState::Connected,
            },
            &dependency,
        );
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["isConnected"], true);
        assert_eq!(value["connection"]["status"], "connected");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_login_form_validation() {
        let complete = LoginForm {
            email: Some("a@b.com".to_string()),
            password: Some("x".to_string()),
        };
        assert!(complete.validate().is_ok());

        let missing = LoginForm {
            email: Some("a@b.com".to_string()),
            password: None,
        };
        assert!(missing.validate().is_err());

        let empty = LoginForm {
            email: Some(String::new()),
            password: Some("x".to_string()),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_registration_form_validation() {
        let form = RegistrationForm {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            password: Some("secret".to_string()),
            birthdate: None,
        };
        assert!(form.validate().is_err());
    }
}
