//! The privilege model: principal P holds permission M on resource R.
//!
//! Two types cover the two halves of the lifecycle:
//!
//! - [`PrivilegeRecord`] is the mutable, possibly incomplete form used while a
//!   grant is being assembled. Every field may be unset and setters perform no
//!   validation.
//! - [`Privilege`] is the immutable, persisted form. It can only exist with an
//!   id and all three relationships, so the "half-populated" state never leaks
//!   past the persistence boundary.
//!
//! Both types compare equal when the id and all three relationships are equal,
//! and hash those four fields in the order id, permission, resource, principal.

use crate::error::{AuthzError, Result};
use crate::types::{Permission, Principal, Resource};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A privilege under construction.
///
/// Relationships are shared handles; getters hand back the exact handle that
/// was set, no copies are made.
///
/// ```rust
/// use authz::{Permission, Principal, PrivilegeRecord, Resource};
/// use std::sync::Arc;
///
/// let mut record = PrivilegeRecord::new();
/// record.set_principal(Some(Arc::new(Principal::user(1))));
/// record.set_permission(Some(Arc::new(Permission::new(1, "AMBARI.ADMINISTRATOR"))));
/// record.set_resource(Some(Arc::new(Resource::new(1, "AMBARI"))));
/// record.set_id(Some(1));
///
/// let privilege = record.build().unwrap();
/// assert_eq!(privilege.id(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrivilegeRecord {
    // Field order is the hash combination order.
    id: Option<i32>,
    permission: Option<Arc<Permission>>,
    resource: Option<Arc<Resource>>,
    principal: Option<Arc<Principal>>,
}

impl PrivilegeRecord {
    /// A transient record with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<i32>) {
        self.id = id;
    }

    pub fn permission(&self) -> Option<&Arc<Permission>> {
        self.permission.as_ref()
    }

    pub fn set_permission(&mut self, permission: Option<Arc<Permission>>) {
        self.permission = permission;
    }

    pub fn resource(&self) -> Option<&Arc<Resource>> {
        self.resource.as_ref()
    }

    pub fn set_resource(&mut self, resource: Option<Arc<Resource>>) {
        self.resource = resource;
    }

    pub fn principal(&self) -> Option<&Arc<Principal>> {
        self.principal.as_ref()
    }

    pub fn set_principal(&mut self, principal: Option<Arc<Principal>>) {
        self.principal = principal;
    }

    pub fn with_permission(mut self, permission: Arc<Permission>) -> Self {
        self.permission = Some(permission);
        self
    }

    pub fn with_resource(mut self, resource: Arc<Resource>) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn with_principal(mut self, principal: Arc<Principal>) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Names of the mandatory relationships that are still unset.
    pub fn missing_relationships(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.permission.is_none() {
            missing.push("permission");
        }
        if self.resource.is_none() {
            missing.push("resource");
        }
        if self.principal.is_none() {
            missing.push("principal");
        }
        missing
    }

    /// Freeze into a [`Privilege`] with the given id, ignoring any id on the record.
    fn build_with_id(self, id: i32) -> Result<Privilege> {
        match (self.permission, self.resource, self.principal) {
            (Some(permission), Some(resource), Some(principal)) => Ok(Privilege {
                id,
                permission,
                resource,
                principal,
            }),
            (permission, resource, principal) => {
                let missing = Self {
                    id: Some(id),
                    permission,
                    resource,
                    principal,
                }
                .missing_relationships();
                Err(AuthzError::DataIntegrity(format!(
                    "privilege {} is missing mandatory {}",
                    id,
                    missing.join(", ")
                )))
            }
        }
    }

    /// Freeze a fully populated record.
    ///
    /// Fails with [`AuthzError::DataIntegrity`] unless the id and all three
    /// relationships are set.
    pub fn build(self) -> Result<Privilege> {
        let id = self.id.ok_or_else(|| {
            AuthzError::DataIntegrity("privilege has not been assigned an id".to_string())
        })?;
        self.build_with_id(id)
    }
}

/// A persisted grant. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Privilege {
    // Field order is the hash combination order.
    id: i32,
    permission: Arc<Permission>,
    resource: Arc<Resource>,
    principal: Arc<Principal>,
}

impl Privilege {
    pub(crate) fn from_parts(
        id: i32,
        permission: Arc<Permission>,
        resource: Arc<Resource>,
        principal: Arc<Principal>,
    ) -> Self {
        Self {
            id,
            permission,
            resource,
            principal,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn permission(&self) -> &Arc<Permission> {
        &self.permission
    }

    pub fn resource(&self) -> &Arc<Resource> {
        &self.resource
    }

    pub fn principal(&self) -> &Arc<Principal> {
        &self.principal
    }

    /// Whether this privilege grants `permission` on `resource` to `principal`.
    pub fn grants(
        &self,
        principal: &Principal,
        permission: &Permission,
        resource: &Resource,
    ) -> bool {
        *self.principal == *principal
            && *self.permission == *permission
            && *self.resource == *resource
    }

    /// A mutable copy carrying the same id and relationship handles.
    pub fn to_record(&self) -> PrivilegeRecord {
        PrivilegeRecord {
            id: Some(self.id),
            permission: Some(Arc::clone(&self.permission)),
            resource: Some(Arc::clone(&self.resource)),
            principal: Some(Arc::clone(&self.principal)),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<Privilege> for PrivilegeRecord {
    fn from(privilege: Privilege) -> Self {
        Self {
            id: Some(privilege.id),
            permission: Some(privilege.permission),
            resource: Some(privilege.resource),
            principal: Some(privilege.principal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrincipalType;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn full_record(id: i32) -> PrivilegeRecord {
        let mut record = PrivilegeRecord::new();
        record.set_id(Some(id));
        record.set_permission(Some(Arc::new(Permission::new(1, "CLUSTER.ADMINISTRATOR"))));
        record.set_resource(Some(Arc::new(Resource::new(2, "CLUSTER"))));
        record.set_principal(Some(Arc::new(Principal::user(3))));
        record
    }

    #[test]
    fn test_new_record_is_transient() {
        let record = PrivilegeRecord::new();
        assert_eq!(record.id(), None);
        assert!(record.permission().is_none());
        assert!(record.resource().is_none());
        assert!(record.principal().is_none());
        assert_eq!(
            record.missing_relationships(),
            vec!["permission", "resource", "principal"]
        );
    }

    #[test]
    fn test_setters_round_trip_same_handle() {
        let permission = Arc::new(Permission::new(1, "VIEW.USER"));
        let resource = Arc::new(Resource::new(5, "VIEW"));
        let principal = Arc::new(Principal::group(8));

        let mut record = PrivilegeRecord::new();
        record.set_id(Some(12));
        record.set_permission(Some(Arc::clone(&permission)));
        record.set_resource(Some(Arc::clone(&resource)));
        record.set_principal(Some(Arc::clone(&principal)));

        assert_eq!(record.id(), Some(12));
        assert!(Arc::ptr_eq(record.permission().unwrap(), &permission));
        assert!(Arc::ptr_eq(record.resource().unwrap(), &resource));
        assert!(Arc::ptr_eq(record.principal().unwrap(), &principal));

        record.set_principal(None);
        assert!(record.principal().is_none());
        assert_eq!(record.missing_relationships(), vec!["principal"]);
    }

    #[test]
    fn test_equal_records_hash_equal() {
        let a = full_record(1);
        let b = full_record(1);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_any_field_change_breaks_equality() {
        let base = full_record(1);

        let mut changed = base.clone();
        changed.set_id(Some(2));
        assert_ne!(base, changed);

        let mut changed = base.clone();
        changed.set_id(None);
        assert_ne!(base, changed);

        let mut changed = base.clone();
        changed.set_permission(Some(Arc::new(Permission::new(1, "CLUSTER.USER"))));
        assert_ne!(base, changed);

        let mut changed = base.clone();
        changed.set_resource(Some(Arc::new(Resource::new(4, "CLUSTER"))));
        assert_ne!(base, changed);

        let mut changed = base.clone();
        changed.set_principal(Some(Arc::new(Principal::new(3, PrincipalType::Group))));
        assert_ne!(base, changed);
    }

    #[test]
    fn test_unset_equals_only_unset() {
        assert_eq!(PrivilegeRecord::new(), PrivilegeRecord::new());
        assert_eq!(hash_of(&PrivilegeRecord::new()), hash_of(&PrivilegeRecord::new()));

        let mut with_permission = PrivilegeRecord::new();
        with_permission.set_permission(Some(Arc::new(Permission::new(1, "A"))));
        assert_ne!(PrivilegeRecord::new(), with_permission);
        assert_ne!(with_permission, PrivilegeRecord::new());
    }

    #[test]
    fn test_compare_against_absent() {
        let record = full_record(1);
        assert_ne!(Some(&record), None);
    }

    #[test]
    fn test_equality_uses_entity_equality() {
        // Distinct allocations holding equal entities compare equal.
        let a = full_record(1);
        let b = full_record(1);
        assert!(!Arc::ptr_eq(a.permission().unwrap(), b.permission().unwrap()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_requires_id() {
        let mut record = full_record(1);
        record.set_id(None);
        assert!(matches!(record.build(), Err(AuthzError::DataIntegrity(_))));
    }

    #[test]
    fn test_build_reports_missing_relationships() {
        let mut record = full_record(4);
        record.set_resource(None);
        record.set_principal(None);

        match record.build() {
            Err(AuthzError::DataIntegrity(msg)) => {
                assert_eq!(msg, "privilege 4 is missing mandatory resource, principal")
            }
            other => panic!("expected data integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_privilege_matches_record_semantics() {
        let record = full_record(9);
        let privilege = record.clone().build().unwrap();

        assert_eq!(privilege.id(), 9);
        assert_eq!(privilege.to_record(), record);
        assert_eq!(PrivilegeRecord::from(privilege.clone()), record);
        assert_eq!(hash_of(&privilege), hash_of(&privilege.clone()));

        let other = full_record(10).build().unwrap();
        assert_ne!(privilege, other);
    }

    #[test]
    fn test_grants() {
        let privilege = full_record(1).build().unwrap();
        assert!(privilege.grants(
            &Principal::user(3),
            &Permission::new(1, "CLUSTER.ADMINISTRATOR"),
            &Resource::new(2, "CLUSTER"),
        ));
        assert!(!privilege.grants(
            &Principal::group(3),
            &Permission::new(1, "CLUSTER.ADMINISTRATOR"),
            &Resource::new(2, "CLUSTER"),
        ));
    }

    #[test]
    fn test_json_view() {
        let privilege = full_record(1).build().unwrap();
        let json = privilege.to_json().unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["permission"]["name"], "CLUSTER.ADMINISTRATOR");
        assert_eq!(json["resource"]["resource_type"], "CLUSTER");
        assert_eq!(json["principal"]["principal_type"], "USER");

        let parsed: Privilege = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, privilege);
    }
}
