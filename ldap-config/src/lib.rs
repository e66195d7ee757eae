//! Typed access to the LDAP section of the server configuration.
//!
//! The configuration store itself is flat and untyped: a map from keys such as
//! `ambari.ldap.server.host` to YAML values. [`LdapConfiguration`] wraps that
//! map and exposes one accessor per [`LdapConfigProperty`], doing all the
//! coercion in one place.
//!
//! ```rust
//! use ldap_config::LdapConfiguration;
//!
//! let config = LdapConfiguration::from_yaml(
//!     r#"
//! ambari.ldap.server.host: ldap.example.com
//! ambari.ldap.server.port: "636"
//! ambari.ldap.usessl: "true"
//! "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.ldap_server_host().unwrap().as_deref(), Some("ldap.example.com"));
//! assert_eq!(config.ldap_server_port().unwrap(), 636);
//! assert!(config.use_ssl());
//! ```

pub mod configuration;
pub mod error;
pub mod property;

pub use configuration::LdapConfiguration;
pub use error::{ConfigurationError, Result};
pub use property::LdapConfigProperty;
