//! Platform addresses of store entries.
//!
//! Every platform store names an entry differently: Secret Service matches on
//! an attribute map, Credential Manager on a single target string. Both
//! encodings here are injective over (service, access group, key), so two
//! distinct scopes never share an entry. In particular a scope without an
//! access group never matches the same service with an empty group.
//!
//! The functions are built on every target so their encodings stay tested
//! on any host.

#![cfg_attr(not(any(target_os = "linux", target_os = "windows")), allow(dead_code))]

use std::collections::HashMap;

use crate::scope::StoreScope;

/// Secret Service lookup attributes for an entry.
///
/// | attribute          | value                                   |
/// |--------------------|-----------------------------------------|
/// | `service`          | scope service identifier                |
/// | `has_access_group` | `"1"` when the scope has a group, else `"0"` |
/// | `access_group`     | scope access group, empty when unset    |
/// | `key`              | entry key                               |
#[cfg_attr(target_os = "windows", allow(dead_code))]
pub(crate) fn secret_attributes<'a>(
    scope: &'a StoreScope,
    key: &'a str,
) -> HashMap<&'a str, &'a str> {
    let mut attributes = HashMap::new();
    attributes.insert("service", scope.service());
    attributes.insert(
        "has_access_group",
        if scope.access_group().is_some() { "1" } else { "0" },
    );
    attributes.insert("access_group", scope.access_group().unwrap_or(""));
    attributes.insert("key", key);
    attributes
}

/// Credential Manager target name: `service[@group]/key`, each part escaped.
#[cfg_attr(target_os = "linux", allow(dead_code))]
pub(crate) fn credential_target(scope: &StoreScope, key: &str) -> String {
    let mut target = escape(scope.service());
    if let Some(group) = scope.access_group() {
        target.push('@');
        target.push_str(&escape(group));
    }
    target.push('/');
    target.push_str(&escape(key));
    target
}

/// Percent-escape the separators and the escape character itself.
#[cfg_attr(target_os = "linux", allow(dead_code))]
fn escape(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for c in part.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '/' => escaped.push_str("%2F"),
            '@' => escaped.push_str("%40"),
            c => escaped.push(c),
        }
    }
    escaped
}
