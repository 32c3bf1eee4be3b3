//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Default model fallback cascade, ordered by rate limits and
/// performance.
const DEFAULT_MODEL_CASCADE: [&str; 6] = [
    "gemini-2.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-2.0-flash",
    "gemini-2.0-flash-lite",
    "gemini-2.5-flash-preview",
    "gemini-2.5-flash-lite-preview",
];

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Comma-separated model cascade override
    pub models: Option<String>,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl AiConfig {
    /// Get per-attempt timeout as Duration
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// The model cascade: the configured override, or the built-in
    /// default ordering
    pub fn model_cascade(&self) -> Vec<String> {
        match &self.models {
            Some(models) => models
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_MODEL_CASCADE.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }

        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if self.model_cascade().is_empty() {
            return Err(ValidationError::EmptyModelCascade);
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            models: None,
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_temperature() -> f32 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.temperature, 0.7);
        assert!(config.models.is_none());
    }

    #[test]
    fn test_default_cascade_ordering() {
        let config = AiConfig::default();
        let cascade = config.model_cascade();
        assert_eq!(cascade.len(), 6);
        assert_eq!(cascade[0], "gemini-2.5-flash");
        assert_eq!(cascade[5], "gemini-2.5-flash-lite-preview");
    }

    #[test]
    fn test_cascade_override_is_parsed() {
        let config = AiConfig {
            models: Some("model-a, model-b ,model-c".to_string()),
            ..Default::default()
        };
        assert_eq!(config.model_cascade(), vec!["model-a", "model-b", "model-c"]);
    }

    #[test]
    fn test_cascade_override_drops_empty_entries() {
        let config = AiConfig {
            models: Some("model-a,,model-b,".to_string()),
            ..Default::default()
        };
        assert_eq!(config.model_cascade(), vec!["model-a", "model-b"]);
    }

    #[test]
    fn test_attempt_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.attempt_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_requires_api_key() {
        let config = AiConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        ));
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = AiConfig {
            gemini_api_key: Some("key".to_string()),
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validation_rejects_blank_cascade_override() {
        let config = AiConfig {
            gemini_api_key: Some("key".to_string()),
            models: Some(" , ,".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyModelCascade)
        ));
    }

    #[test]
    fn test_validation_rejects_out_of_range_temperature() {
        let config = AiConfig {
            gemini_api_key: Some("key".to_string()),
            temperature: 3.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTemperature)
        ));
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AiConfig {
            gemini_api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
