//! Privilege data model for the access-control subsystem.
//!
//! A privilege binds a security [`Principal`] to a [`Permission`] on a
//! [`Resource`]. This crate defines that binding and the rules a persisted
//! privilege must satisfy; it does not evaluate policies.
//!
//! # Lifecycle
//!
//! 1. A [`PrivilegeRecord`] is created transient, with every field unset
//! 2. The caller populates its relationships
//! 3. [`PrivilegeStore::persist`] checks the mandatory relationships, draws an
//!    id from the `privilege_id_seq` sequence and returns an immutable
//!    [`Privilege`]
//! 4. The caller may later remove it; referenced entities are not affected
//!
//! # Example
//!
//! ```rust
//! use authz::{Permission, Principal, PrivilegeRecord, PrivilegeStore, Resource};
//! use std::sync::Arc;
//!
//! let mut store = PrivilegeStore::new();
//! let record = PrivilegeRecord::new()
//!     .with_principal(Arc::new(Principal::user(1)))
//!     .with_permission(Arc::new(Permission::new(1, "AMBARI.ADMINISTRATOR")))
//!     .with_resource(Arc::new(Resource::new(1, "AMBARI")));
//!
//! let privilege = store.persist(record).unwrap();
//! assert_eq!(privilege.id(), 1);
//! assert_eq!(store.privileges_for_principal(&Principal::user(1)).len(), 1);
//! ```

pub mod error;
pub mod privilege;
pub mod sequence;
pub mod store;
pub mod types;

pub use error::{AuthzError, Result};
pub use privilege::{Privilege, PrivilegeRecord};
pub use sequence::{IdGenerator, TableSequence, PRIVILEGE_ID_SEQUENCE};
pub use store::PrivilegeStore;
pub use types::{Permission, Principal, PrincipalType, Resource};
