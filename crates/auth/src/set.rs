use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Permission, catalog};

/// Permissions granted to the current session.
///
/// Unordered and deduplicated. Only catalog identifiers are ever stored:
/// anything else coming from the backend is dropped on construction, and no
/// permission implies another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PermissionSet(HashSet<Permission>);

impl PermissionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from identifiers as delivered by the backend.
    pub fn from_granted<I, S>(granted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        for name in granted {
            set.insert_raw(name.as_ref());
        }
        set
    }

    /// Insert a permission; returns `false` when it is unknown or already held.
    pub fn insert(&mut self, permission: Permission) -> bool {
        if !catalog::is_known(permission.as_str()) {
            tracing::warn!(permission = %permission, "ignoring permission outside the catalog");
            return false;
        }
        self.0.insert(permission)
    }

    fn insert_raw(&mut self, name: &str) -> bool {
        match catalog::lookup(name) {
            Some(permission) => self.0.insert(permission),
            None => {
                tracing::warn!(permission = name, "ignoring permission outside the catalog");
                false
            }
        }
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.0.iter()
    }

    /// Held permissions in stable (lexicographic) order, for display.
    pub fn sorted(&self) -> Vec<Permission> {
        let mut perms: Vec<Permission> = self.0.iter().cloned().collect();
        perms.sort();
        perms
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        let mut set = Self::empty();
        for permission in iter {
            set.insert(permission);
        }
        set
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(value: Vec<String>) -> Self {
        Self::from_granted(value)
    }
}

impl From<PermissionSet> for Vec<String> {
    fn from(value: PermissionSet) -> Self {
        value.sorted().into_iter().map(|p| p.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{INVENTARIO_LEER, PRODUCTOS_CREAR, PRODUCTOS_LEER};

    #[test]
    fn unknown_identifiers_are_dropped() {
        let set = PermissionSet::from_granted(["PRODUCTOS_LEER", "*", "ADMIN", "PRODUCTOS_LEER"]);
        assert_eq!(set.len(), 1);
        assert!(set.contains("PRODUCTOS_LEER"));
        assert!(!set.contains("*"));
    }

    #[test]
    fn insert_rejects_duplicates_and_unknowns() {
        let mut set = PermissionSet::empty();
        assert!(set.insert(PRODUCTOS_CREAR));
        assert!(!set.insert(PRODUCTOS_CREAR));
        assert!(!set.insert(Permission::new("PRODUCTOS_TODO")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serde_round_trip_filters_and_sorts() {
        let set: PermissionSet =
            serde_json::from_str(r#"["PRODUCTOS_LEER","INVENTARIO_LEER","BOGUS"]"#).unwrap();
        assert_eq!(set.sorted(), vec![INVENTARIO_LEER, PRODUCTOS_LEER]);

        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["INVENTARIO_LEER","PRODUCTOS_LEER"]"#);
    }
}
