//! Permission evaluation against a session's granted set.
//!
//! - No IO
//! - No panics
//! - Total: unknown identifiers are simply "not held"

use serde::{Deserialize, Serialize};

use crate::{Permission, PermissionSet};

/// `true` iff `permission` is held.
pub fn has(set: &PermissionSet, permission: impl AsRef<str>) -> bool {
    set.contains(permission.as_ref())
}

/// `true` iff at least one of `permissions` is held.
///
/// An empty list yields `false`: at least one of zero options cannot hold.
pub fn has_any<P: AsRef<str>>(set: &PermissionSet, permissions: &[P]) -> bool {
    permissions.iter().any(|p| set.contains(p.as_ref()))
}

/// `true` iff every one of `permissions` is held.
///
/// An empty list yields `true` (vacuous truth).
pub fn has_all<P: AsRef<str>>(set: &PermissionSet, permissions: &[P]) -> bool {
    permissions.iter().all(|p| set.contains(p.as_ref()))
}

/// Negation of [`has`].
pub fn not(set: &PermissionSet, permission: impl AsRef<str>) -> bool {
    !has(set, permission)
}

/// Permission requirement declared by a route or a UI fragment.
///
/// The evaluation modes are mutually exclusive by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "permissions", rename_all = "snake_case")]
pub enum Requirement {
    /// Nothing was declared. Consumers decide what that means.
    #[default]
    None,
    /// Explicitly open to any caller.
    Public,
    Single(Permission),
    Any(Vec<Permission>),
    All(Vec<Permission>),
}

/// Outcome of evaluating a [`Requirement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Denied,
    Undeclared,
}

impl Requirement {
    pub fn single(permission: Permission) -> Self {
        Self::Single(permission)
    }

    pub fn any(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::Any(permissions.into_iter().collect())
    }

    pub fn all(permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self::All(permissions.into_iter().collect())
    }

    pub fn evaluate(&self, set: &PermissionSet) -> Decision {
        let granted = match self {
            Requirement::None => return Decision::Undeclared,
            Requirement::Public => true,
            Requirement::Single(p) => has(set, p),
            Requirement::Any(ps) => has_any(set, ps),
            Requirement::All(ps) => has_all(set, ps),
        };

        if granted { Decision::Granted } else { Decision::Denied }
    }

    /// Declared permissions the set does not hold (for diagnostics).
    pub fn missing(&self, set: &PermissionSet) -> Vec<Permission> {
        let declared: &[Permission] = match self {
            Requirement::None | Requirement::Public => &[],
            Requirement::Single(p) => core::slice::from_ref(p),
            Requirement::Any(ps) | Requirement::All(ps) => ps,
        };

        declared
            .iter()
            .filter(|p| not(set, p))
            .cloned()
            .collect()
    }
}

impl From<Permission> for Requirement {
    fn from(value: Permission) -> Self {
        Self::Single(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::*;

    fn products_reader() -> PermissionSet {
        PermissionSet::from_granted(["PRODUCTOS_LEER"])
    }

    #[test]
    fn any_versus_all_on_partial_grant() {
        let set = products_reader();
        assert!(has_any(&set, &[PRODUCTOS_LEER, PRODUCTOS_CREAR]));
        assert!(!has_all(&set, &[PRODUCTOS_LEER, PRODUCTOS_CREAR]));
    }

    #[test]
    fn empty_requirement_lists_are_asymmetric() {
        let none: [Permission; 0] = [];
        for set in [PermissionSet::empty(), products_reader()] {
            assert!(!has_any(&set, &none));
            assert!(has_all(&set, &none));
        }
    }

    #[test]
    fn unknown_strings_are_not_held() {
        let set = products_reader();
        assert!(!has(&set, "PRODUCTOS_BORRAR"));
        assert!(not(&set, "PRODUCTOS_BORRAR"));
        assert!(!has_any(&set, &["", "*"]));
    }

    #[test]
    fn requirement_modes() {
        let set = products_reader();
        assert_eq!(Requirement::None.evaluate(&set), Decision::Undeclared);
        assert_eq!(Requirement::Public.evaluate(&PermissionSet::empty()), Decision::Granted);
        assert_eq!(Requirement::single(PRODUCTOS_LEER).evaluate(&set), Decision::Granted);
        assert_eq!(Requirement::single(USUARIOS_LEER).evaluate(&set), Decision::Denied);
        let both = [USUARIOS_LEER, PRODUCTOS_LEER];
        assert_eq!(Requirement::any(both.clone()).evaluate(&set), Decision::Granted);
        assert_eq!(Requirement::all(both).evaluate(&set), Decision::Denied);
        assert_eq!(Requirement::any(Vec::new()).evaluate(&set), Decision::Denied);
        assert_eq!(Requirement::all(Vec::new()).evaluate(&set), Decision::Granted);
    }

    #[test]
    fn missing_lists_unheld_permissions() {
        let set = products_reader();
        let req = Requirement::all([PRODUCTOS_LEER, PRODUCTOS_CREAR, PRODUCTOS_ELIMINAR]);
        assert_eq!(req.missing(&set), vec![PRODUCTOS_CREAR, PRODUCTOS_ELIMINAR]);
        assert!(Requirement::Public.missing(&set).is_empty());
    }

    #[test]
    fn requirement_serde_shape() {
        let json = serde_json::to_value(Requirement::any([VENTAS_LEER])).unwrap();
        assert_eq!(json, serde_json::json!({ "mode": "any", "permissions": ["VENTAS_LEER"] }));
        let back: Requirement = serde_json::from_value(json).unwrap();
        assert_eq!(back, Requirement::any([VENTAS_LEER]));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn catalog_names() -> Vec<String> {
            all().map(|p| p.as_str().to_string()).collect()
        }

        fn name_strategy() -> impl Strategy<Value = String> {
            prop_oneof![
                proptest::sample::select(catalog_names()),
                "[A-Z_]{1,24}",
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: `has` is plain membership.
            #[test]
            fn has_matches_membership(
                granted in proptest::collection::vec(name_strategy(), 0..12),
                candidate in name_strategy(),
            ) {
                let set = PermissionSet::from_granted(&granted);
                let expected = granted.contains(&candidate) && is_known(&candidate);
                prop_assert_eq!(has(&set, &candidate), expected);
                prop_assert_eq!(not(&set, &candidate), !expected);
            }

            /// Property: any/all agree with per-element membership.
            #[test]
            fn any_all_follow_membership(
                granted in proptest::collection::vec(name_strategy(), 0..12),
                candidates in proptest::collection::vec(name_strategy(), 0..6),
            ) {
                let set = PermissionSet::from_granted(&granted);
                let any = candidates.iter().any(|p| has(&set, p));
                let all = candidates.iter().all(|p| has(&set, p));
                prop_assert_eq!(has_any(&set, &candidates), any);
                prop_assert_eq!(has_all(&set, &candidates), all);
            }
        }
    }
}
