//! Webhook endpoint configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::conversation::ApiVersion;

/// Webhook endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Route the platform posts turns to
    #[serde(default = "default_path")]
    pub path: String,

    /// API version assumed when a request declares none
    #[serde(default = "default_api_version")]
    pub default_api_version: u32,
}

impl WebhookConfig {
    /// Default API version as a domain value
    pub fn api_version(&self) -> ApiVersion {
        ApiVersion::new(self.default_api_version)
    }

    /// Validate webhook configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.path.starts_with('/') {
            return Err(ValidationError::InvalidWebhookPath);
        }
        if self.default_api_version == 0 {
            return Err(ValidationError::InvalidApiVersion);
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            default_api_version: default_api_version(),
        }
    }
}

fn default_path() -> String {
    "/webhook".to_string()
}

fn default_api_version() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Dialect;

    #[test]
    fn test_webhook_config_defaults() {
        let config = WebhookConfig::default();
        assert_eq!(config.path, "/webhook");
        assert_eq!(config.api_version().dialect(), Dialect::Legacy);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_relative_path() {
        let config = WebhookConfig {
            path: "webhook".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidWebhookPath)
        ));
    }

    #[test]
    fn test_validation_rejects_zero_version() {
        let config = WebhookConfig {
            default_api_version: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidApiVersion)
        ));
    }

    #[test]
    fn test_deserialization() {
        let json = r#"{"path": "/fulfillment", "default_api_version": 2}"#;
        let config: WebhookConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.path, "/fulfillment");
        assert_eq!(config.api_version().dialect(), Dialect::Current);
    }
}
