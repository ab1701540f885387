//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::email::SenderIdentity;

/// Email configuration (Resend)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    pub resend_api_key: String,

    /// No-reply address for system-sent email
    #[serde(default = "default_from_email")]
    pub system_from_email: String,

    /// Display name for system-sent email
    #[serde(default = "default_from_name")]
    pub system_from_name: String,

    /// Mail domain persona addresses live under
    #[serde(default = "default_persona_domain")]
    pub persona_domain: String,
}

impl EmailConfig {
    /// Sender identity handed to the email guard
    pub fn sender_identity(&self) -> SenderIdentity {
        SenderIdentity {
            system_from_email: self.system_from_email.clone(),
            system_from_name: self.system_from_name.clone(),
            persona_domain: self.persona_domain.clone(),
        }
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resend_api_key.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__RESEND_API_KEY"));
        }

        if !self.resend_api_key.starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }

        if !self.system_from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }

        if self.persona_domain.is_empty() || self.persona_domain.contains('@') {
            return Err(ValidationError::MissingRequired("EMAIL__PERSONA_DOMAIN"));
        }

        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: String::new(),
            system_from_email: default_from_email(),
            system_from_name: default_from_name(),
            persona_domain: default_persona_domain(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@rentwise.app".to_string()
}

fn default_from_name() -> String {
    "Rentwise".to_string()
}

fn default_persona_domain() -> String {
    "team.rentwise.app".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_config_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.system_from_email, "noreply@rentwise.app");
        assert_eq!(config.system_from_name, "Rentwise");
    }

    #[test]
    fn test_sender_identity_copies_fields() {
        let identity = EmailConfig::default().sender_identity();
        assert_eq!(identity.persona_domain, "team.rentwise.app");
        assert_eq!(identity.system_from_email, "noreply@rentwise.app");
    }

    #[test]
    fn test_validation_missing_api_key() {
        assert!(EmailConfig::default().validate().is_err());
    }

    #[test]
    fn test_validation_invalid_api_key_prefix() {
        let config = EmailConfig {
            resend_api_key: "sk_xxx".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidResendKey)));
    }

    #[test]
    fn test_validation_invalid_from_email() {
        let config = EmailConfig {
            resend_api_key: "re_xxx".to_string(),
            system_from_email: "invalid-email".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = EmailConfig {
            resend_api_key: "re_abcd1234".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
