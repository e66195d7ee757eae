use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares the closed set of LDAP configuration properties together with
/// their external key strings.
macro_rules! ldap_properties {
    ($($(#[$meta:meta])* $variant:ident => $key:literal,)+) => {
        /// Supported LDAP related configuration properties.
        ///
        /// Each variant maps to exactly one key in the flat configuration store.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum LdapConfigProperty {
            $(
                $(#[$meta])*
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl LdapConfigProperty {
            /// Every property, in declaration order.
            pub const ALL: &'static [LdapConfigProperty] = &[$(LdapConfigProperty::$variant),+];

            /// The external key this property is stored under.
            pub const fn key(self) -> &'static str {
                match self {
                    $(LdapConfigProperty::$variant => $key,)+
                }
            }
        }
    };
}

ldap_properties! {
    LdapConfigured => "ambari.ldap.configured",
    AutomaticAttributeDetection => "ambari.ldap.automatic.attribute.detection",
    UseSsl => "ambari.ldap.usessl",
    LdapServerHost => "ambari.ldap.server.host",
    LdapServerPort => "ambari.ldap.server.port",
    LdapTruststore => "ambari.ldap.truststore",
    LdapTruststoreType => "ambari.ldap.truststore.type",
    LdapTruststorePath => "ambari.ldap.truststore.path",
    LdapTruststorePassword => "ambari.ldap.truststore.password",
    /// Stored under the historical `bind.dn` key.
    BaseDn => "ambari.ldap.bind.dn",
    Referral => "ambari.ldap.referral",
    PaginationEnabled => "ambari.ldap.pagination.enabled",

    BindAnonymously => "ambari.ldap.bindanonymously",
    ManagerDn => "ambari.ldap.managerdn",
    ManagerPassword => "ambari.ldap.managerpassword",
    UserObjectClass => "ambari.ldap.user.object.class",
    UserNameAttribute => "ambari.ldap.user.name.attribute",
    UserNameForceLowercase => "ambari.ldap.username.force.lowercase",
    UserSearchBase => "ambari.ldap.user.search.base",
    SyncUserMemberReplacePattern => "ambari.ldap.sync.user.member.replacepattern",
    SyncUserMemberFilter => "ambari.ldap.sync.user.member_filter",

    AdminGroupMappingRules => "ambari.ldap.admin.group.mappingrules",
    GroupObjectClass => "ambari.ldap.group.object.class",
    GroupNameAttribute => "ambari.ldap.group.name.attribute",
    GroupMemberAttribute => "ambari.ldap.group.member.attribute",
    GroupSearchBase => "ambari.ldap.group.search.base",
    SyncGroupMemberReplacePattern => "ambari.ldap.sync.group.member.replacepattern",
    SyncGroupMemberFilter => "ambari.ldap.sync.group.member_filter",
    DnAttribute => "authentication.ldap.dnAttribute",

    TestUserName => "ambari.ldap.test.user.name",
    TestUserPassword => "ambari.ldap.test.user.password",
}

impl LdapConfigProperty {
    /// Reverse lookup from an external key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.key() == key)
    }

    /// Whether values of this property must never be printed.
    pub fn is_secret(self) -> bool {
        matches!(
            self,
            Self::ManagerPassword | Self::LdapTruststorePassword | Self::TestUserPassword
        )
    }
}

impl fmt::Display for LdapConfigProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
