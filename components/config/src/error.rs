use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to read tuning profile `{path}`")]
    Profile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Tuning profile is malformed")]
    Yaml(#[from] serde_yaml::Error),

    #[error("`{key}` is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigurationError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}
