use aws_schema_composer_common::ServiceMetadataConfig;

/// Descriptive data about one service
#[derive(Debug, Clone, Default)]
pub struct ServiceMetadata {
    config: ServiceMetadataConfig,
}

impl ServiceMetadata {
    pub fn new(config: ServiceMetadataConfig) -> Self {
        Self { config }
    }

    /// Human-readable service name, or the empty string when absent
    pub fn description(&self) -> &str {
        self.config
            .service_full_name
            .as_deref()
            .or(self.config.service_abbreviation.as_deref())
            .unwrap_or("")
    }

    pub fn api_version(&self) -> Option<&str> {
        self.config.api_version.as_deref()
    }

    pub fn protocol(&self) -> Option<&str> {
        self.config.protocol.as_deref()
    }

    pub fn config(&self) -> &ServiceMetadataConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_prefers_full_name() {
        let metadata = ServiceMetadata::new(ServiceMetadataConfig {
            service_full_name: Some("Amazon Simple Storage Service".to_string()),
            service_abbreviation: Some("Amazon S3".to_string()),
            ..Default::default()
        });
        assert_eq!(metadata.description(), "Amazon Simple Storage Service");
    }

    #[test]
    fn test_description_falls_back_to_abbreviation() {
        let metadata = ServiceMetadata::new(ServiceMetadataConfig {
            service_abbreviation: Some("Amazon SQS".to_string()),
            ..Default::default()
        });
        assert_eq!(metadata.description(), "Amazon SQS");
    }

    #[test]
    fn test_missing_description_is_empty() {
        let metadata = ServiceMetadata::default();
        assert_eq!(metadata.description(), "");
        assert_eq!(metadata.api_version(), None);
    }
}
