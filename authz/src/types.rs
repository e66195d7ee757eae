//! Entities a privilege refers to.
//!
//! These are owned by the surrounding persistence layer; the privilege model
//! only holds shared handles to them and compares them through their own
//! `Eq`/`Hash` implementations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of security identity a [`Principal`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrincipalType {
    User,
    Group,
}

impl fmt::Display for PrincipalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("USER"),
            Self::Group => f.write_str("GROUP"),
        }
    }
}

/// A security identity (user or group) that privileges can be granted to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub principal_type: PrincipalType,
}

impl Principal {
    pub fn new(id: i64, principal_type: PrincipalType) -> Self {
        Self { id, principal_type }
    }

    /// Creates a Principal representing a user.
    pub fn user(id: i64) -> Self {
        Self::new(id, PrincipalType::User)
    }

    /// Creates a Principal representing a group.
    pub fn group(id: i64) -> Self {
        Self::new(id, PrincipalType::Group)
    }
}

/// A named capability that can be granted, e.g. `CLUSTER.ADMINISTRATOR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub id: i32,
    pub name: String,
}

impl Permission {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The object a permission applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,

    /// The type of resource (e.g. "AMBARI", "CLUSTER", "VIEW")
    pub resource_type: String,
}

impl Resource {
    pub fn new(id: i64, resource_type: impl Into<String>) -> Self {
        Self {
            id,
            resource_type: resource_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_helpers() {
        assert_eq!(Principal::user(3).principal_type, PrincipalType::User);
        assert_eq!(Principal::group(3).principal_type, PrincipalType::Group);
        assert_ne!(Principal::user(3), Principal::group(3));
    }

    #[test]
    fn test_permission_creation() {
        let permission = Permission::new(1, "AMBARI.ADMINISTRATOR");
        assert_eq!(permission.id, 1);
        assert_eq!(permission.name, "AMBARI.ADMINISTRATOR");
    }

    #[test]
    fn test_resource_creation() {
        let resource = Resource::new(2, "CLUSTER");
        assert_eq!(resource.id, 2);
        assert_eq!(resource.resource_type, "CLUSTER");
    }

    #[test]
    fn test_principal_type_serialization() {
        let json = serde_json::to_string(&Principal::group(9)).unwrap();
        assert_eq!(json, r#"{"id":9,"principal_type":"GROUP"}"#);
        assert_eq!(PrincipalType::User.to_string(), "USER");
    }
}
