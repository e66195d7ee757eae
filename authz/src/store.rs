//! In-memory persistence boundary for privileges.
//!
//! This is where the model's integrity rules are checked: a record must carry
//! all three relationships, and a principal/permission/resource triple may be
//! granted only once. Ids are drawn from an [`IdGenerator`].

use crate::error::{AuthzError, Result};
use crate::privilege::{Privilege, PrivilegeRecord};
use crate::sequence::{IdGenerator, TableSequence};
use crate::types::{Permission, Principal, Resource};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

type GrantKey = (Arc<Permission>, Arc<Resource>, Arc<Principal>);

/// Stores persisted privileges keyed by id.
#[derive(Debug)]
pub struct PrivilegeStore<G = TableSequence> {
    sequence: G,
    privileges: BTreeMap<i32, Privilege>,
    grants: HashMap<GrantKey, i32>,
}

impl PrivilegeStore<TableSequence> {
    /// A store drawing ids from a fresh `privilege_id_seq`.
    pub fn new() -> Self {
        Self::with_generator(TableSequence::privileges())
    }
}

impl Default for PrivilegeStore<TableSequence> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> PrivilegeStore<G> {
    pub fn with_generator(sequence: G) -> Self {
        Self {
            sequence,
            privileges: BTreeMap::new(),
            grants: HashMap::new(),
        }
    }

    /// Persist a record and return its immutable form.
    ///
    /// A record without an id is inserted and gets the next id from the
    /// generator; an id the generator hands out that is already taken is a
    /// data integrity error. A record with an id replaces the stored privilege
    /// with that id; the id must already be known to the store.
    pub fn persist(&mut self, record: PrivilegeRecord) -> Result<Privilege> {
        let key: GrantKey = match (record.permission(), record.resource(), record.principal()) {
            (Some(permission), Some(resource), Some(principal)) => (
                Arc::clone(permission),
                Arc::clone(resource),
                Arc::clone(principal),
            ),
            _ => {
                return Err(AuthzError::DataIntegrity(format!(
                    "privilege is missing mandatory {}",
                    record.missing_relationships().join(", ")
                )))
            }
        };

        if let Some(id) = record.id() {
            if !self.privileges.contains_key(&id) {
                return Err(AuthzError::PrivilegeNotFound(id));
            }
        }

        if let Some(&existing) = self.grants.get(&key) {
            if Some(existing) != record.id() {
                return Err(AuthzError::DataIntegrity(format!(
                    "principal {} already holds permission {} on resource {} (privilege {})",
                    key.2.id, key.0.name, key.1.id, existing
                )));
            }
        }

        let id = match record.id() {
            Some(id) => id,
            None => {
                let id = self.sequence.next_id()?;
                if self.privileges.contains_key(&id) {
                    return Err(AuthzError::DataIntegrity(format!(
                        "generated privilege id {} is already in use",
                        id
                    )));
                }
                id
            }
        };
        let privilege = Privilege::from_parts(
            id,
            Arc::clone(&key.0),
            Arc::clone(&key.1),
            Arc::clone(&key.2),
        );

        if let Some(previous) = self.privileges.insert(id, privilege.clone()) {
            self.grants.remove(&key_of(&previous));
            debug!(privilege_id = id, "Updated privilege");
        } else {
            debug!(
                privilege_id = id,
                principal_id = privilege.principal().id,
                permission = %privilege.permission().name,
                resource_id = privilege.resource().id,
                "Persisted privilege"
            );
        }
        self.grants.insert(key, id);

        Ok(privilege)
    }

    pub fn find(&self, id: i32) -> Option<&Privilege> {
        self.privileges.get(&id)
    }

    /// Look up the privilege granting `permission` on `resource` to `principal`.
    pub fn find_grant(
        &self,
        principal: &Principal,
        permission: &Permission,
        resource: &Resource,
    ) -> Option<&Privilege> {
        let key: GrantKey = (
            Arc::new(permission.clone()),
            Arc::new(resource.clone()),
            Arc::new(principal.clone()),
        );
        self.grants.get(&key).and_then(|id| self.privileges.get(id))
    }

    /// Delete a privilege. Referenced entities are left untouched.
    pub fn remove(&mut self, id: i32) -> Result<Privilege> {
        let privilege = self
            .privileges
            .remove(&id)
            .ok_or(AuthzError::PrivilegeNotFound(id))?;
        self.grants.remove(&key_of(&privilege));
        debug!(privilege_id = id, "Removed privilege");
        Ok(privilege)
    }

    /// Privileges held by `principal`, ordered by id.
    pub fn privileges_for_principal(&self, principal: &Principal) -> Vec<&Privilege> {
        self.privileges
            .values()
            .filter(|p| **p.principal() == *principal)
            .collect()
    }

    /// All privileges, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Privilege> {
        self.privileges.values()
    }

    pub fn len(&self) -> usize {
        self.privileges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.privileges.is_empty()
    }
}

fn key_of(privilege: &Privilege) -> GrantKey {
    (
        Arc::clone(privilege.permission()),
        Arc::clone(privilege.resource()),
        Arc::clone(privilege.principal()),
    )
}
