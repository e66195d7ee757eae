use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Errors raised while reading or coercing LDAP configuration values.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// A property required by a typed accessor has not been set.
    #[error("LDAP configuration property [{key}] hasn't been set")]
    Missing { key: &'static str },

    /// The stored value cannot be coerced to the accessor's type.
    #[error("LDAP configuration property [{key}] is malformed: {reason}")]
    Malformed { key: &'static str, reason: String },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}
