use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "USUARIOS_LEER").
/// The closed set of identifiers the backend may grant lives in
/// [`crate::catalog`]; this type itself does not validate membership, so an
/// unknown identifier simply never matches anything a session holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Build a permission from a string literal (usable in `const` items).
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// Hash/Eq of `Cow<str>` delegate to `str`, so set lookups by `&str` are sound.
impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn owned_and_static_permissions_compare_equal() {
        let a = Permission::from_static("VENTAS_LEER");
        let b = Permission::from("VENTAS_LEER".to_string());
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "VENTAS_LEER");
    }

    #[test]
    fn hash_set_lookup_by_str() {
        let set: HashSet<Permission> =
            [Permission::from_static("COMPRAS_LEER")].into_iter().collect();
        assert!(set.contains("COMPRAS_LEER"));
        assert!(!set.contains("COMPRAS_CREAR"));
    }

    #[test]
    fn serializes_as_bare_string() {
        let json = serde_json::to_string(&Permission::from_static("ROLES_LEER")).unwrap();
        assert_eq!(json, "\"ROLES_LEER\"");
    }
}
