use crate::error::{ConfigurationError, Result};
use crate::property::LdapConfigProperty;
use serde_yaml::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Read-only, typed view over the LDAP related configuration entries.
///
/// The backing map is handed over once at construction and never mutated
/// afterwards. Every typed accessor funnels through
/// [`configuration_value`](Self::configuration_value) and declares its own
/// behaviour when the property is absent:
///
/// - text accessors return `Ok(None)`
/// - [`ldap_server_port`](Self::ldap_server_port) fails with
///   [`ConfigurationError::Missing`]
/// - flag accessors return `false`
#[derive(Clone, Default)]
pub struct LdapConfiguration {
    values: HashMap<String, Value>,
}

impl LdapConfiguration {
    /// Wrap a fully populated configuration map.
    pub fn new(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    /// Build from a flat YAML mapping of keys to values.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let values: HashMap<String, Value> = serde_yaml::from_str(content)?;
        Ok(Self::new(values))
    }

    /// Load from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Raw value stored for `property`.
    ///
    /// Emits one warning naming the key when the property hasn't been set.
    pub fn configuration_value(&self, property: LdapConfigProperty) -> Option<&Value> {
        let value = self.values.get(property.key());
        if value.is_none() {
            warn!(
                key = property.key(),
                "Ldap configuration property [{}] hasn't been set",
                property.key()
            );
        }
        value
    }

    /// Whether `property` is present. Never logs.
    pub fn contains(&self, property: LdapConfigProperty) -> bool {
        self.values.contains_key(property.key())
    }

    /// Keys present in the backing map, known or not.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn string_value(&self, property: LdapConfigProperty) -> Result<Option<String>> {
        match self.configuration_value(property) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(ConfigurationError::Malformed {
                key: property.key(),
                reason: format!("expected a scalar value, found {}", value_kind(other)),
            }),
        }
    }

    /// Lenient boolean parse: only `true` (any ASCII case) is true.
    fn bool_value(&self, property: LdapConfigProperty) -> bool {
        match self.configuration_value(property) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// LDAP server host name, `None` when unset.
    pub fn ldap_server_host(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::LdapServerHost)
    }

    /// Server port. Fails when absent, zero, or not a valid port number.
    pub fn ldap_server_port(&self) -> Result<u16> {
        let property = LdapConfigProperty::LdapServerPort;
        let malformed = |reason: String| ConfigurationError::Malformed {
            key: property.key(),
            reason,
        };

        match self.configuration_value(property) {
            None | Some(Value::Null) => Err(ConfigurationError::Missing {
                key: property.key(),
            }),
            Some(Value::String(s)) => s
                .trim()
                .parse::<u16>()
                .map_err(|e| malformed(e.to_string()))
                .and_then(|port| match port {
                    0 => Err(malformed("0 is not a valid port".to_string())),
                    port => Ok(port),
                }),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|port| u16::try_from(port).ok())
                .filter(|port| *port != 0)
                .ok_or_else(|| malformed(format!("{} is not a valid port", n))),
            Some(other) => Err(malformed(format!(
                "expected a port number, found {}",
                value_kind(other)
            ))),
        }
    }

    /// Whether to connect over SSL. `false` when unset.
    pub fn use_ssl(&self) -> bool {
        self.bool_value(LdapConfigProperty::UseSsl)
    }

    /// Whether to bind without manager credentials. `false` when unset.
    pub fn bind_anonymously(&self) -> bool {
        self.bool_value(LdapConfigProperty::BindAnonymously)
    }

    /// DN used to bind for directory searches.
    pub fn manager_dn(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::ManagerDn)
    }

    /// Password for [`manager_dn`](Self::manager_dn).
    pub fn manager_password(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::ManagerPassword)
    }

    /// Whether object classes and attributes are detected from the server.
    /// `false` when unset.
    pub fn automatic_attribute_detection(&self) -> bool {
        self.bool_value(LdapConfigProperty::AutomaticAttributeDetection)
    }

    /// Root of the directory tree searches start from.
    pub fn base_dn(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::BaseDn)
    }

    /// Object class identifying user entries, e.g. `person`.
    pub fn user_object_class(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::UserObjectClass)
    }

    /// Attribute holding the user name, e.g. `uid`.
    pub fn user_name_attribute(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::UserNameAttribute)
    }

    /// Subtree searched for users.
    pub fn user_search_base(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::UserSearchBase)
    }

    /// Object class identifying group entries, e.g. `groupOfNames`.
    pub fn group_object_class(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::GroupObjectClass)
    }

    /// Attribute holding the group name, e.g. `cn`.
    pub fn group_name_attribute(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::GroupNameAttribute)
    }

    /// Attribute listing group members, e.g. `member`.
    pub fn group_member_attribute(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::GroupMemberAttribute)
    }

    /// Subtree searched for groups.
    pub fn group_search_base(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::GroupSearchBase)
    }

    /// Whether LDAP has been set up at all. `false` when unset.
    pub fn ldap_configured(&self) -> bool {
        self.bool_value(LdapConfigProperty::LdapConfigured)
    }

    /// Truststore selection, e.g. `default` or `custom`.
    pub fn truststore(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::LdapTruststore)
    }

    /// Truststore format, e.g. `jks`.
    pub fn truststore_type(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::LdapTruststoreType)
    }

    /// Path to a custom truststore.
    pub fn truststore_path(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::LdapTruststorePath)
    }

    /// Password for the custom truststore.
    pub fn truststore_password(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::LdapTruststorePassword)
    }

    /// Referral handling mode, e.g. `follow` or `ignore`.
    pub fn referral(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::Referral)
    }

    /// Whether searches request paged results. `false` when unset.
    pub fn pagination_enabled(&self) -> bool {
        self.bool_value(LdapConfigProperty::PaginationEnabled)
    }

    /// Whether user names are lowercased on import. `false` when unset.
    pub fn force_lowercase_usernames(&self) -> bool {
        self.bool_value(LdapConfigProperty::UserNameForceLowercase)
    }

    /// Pattern extracting a user name from a member attribute value.
    pub fn sync_user_member_replace_pattern(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::SyncUserMemberReplacePattern)
    }

    /// Extra filter applied when resolving user members.
    pub fn sync_user_member_filter(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::SyncUserMemberFilter)
    }

    /// Groups whose members become administrators.
    pub fn admin_group_mapping_rules(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::AdminGroupMappingRules)
    }

    /// Pattern extracting a group name from a member attribute value.
    pub fn sync_group_member_replace_pattern(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::SyncGroupMemberReplacePattern)
    }

    /// Extra filter applied when resolving group members.
    pub fn sync_group_member_filter(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::SyncGroupMemberFilter)
    }

    /// Attribute holding an entry's distinguished name.
    pub fn dn_attribute(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::DnAttribute)
    }

    /// User name for connectivity checks.
    pub fn test_user_name(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::TestUserName)
    }

    /// Password for [`test_user_name`](Self::test_user_name).
    pub fn test_user_password(&self) -> Result<Option<String>> {
        self.string_value(LdapConfigProperty::TestUserPassword)
    }
}

impl From<HashMap<String, Value>> for LdapConfiguration {
    fn from(values: HashMap<String, Value>) -> Self {
        Self::new(values)
    }
}

impl fmt::Debug for LdapConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        for key in keys {
            let secret = LdapConfigProperty::from_key(key).is_some_and(|p| p.is_secret());
            if secret {
                map.entry(key, &"********");
            } else {
                map.entry(key, &self.values[key]);
            }
        }
        map.finish()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
