//! Conditional render gate for inline UI fragments (buttons, row actions).

use pymes_auth::{Decision, PermissionSet, Requirement};

use crate::config::MissingRequirementPolicy;

/// What a gate emits for a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered<T> {
    Primary(T),
    Fallback(T),
    /// Invisible element keeping the layout slot.
    Placeholder,
    Nothing,
}

impl<T> Rendered<T> {
    pub fn is_primary(&self) -> bool {
        matches!(self, Rendered::Primary(_))
    }

    pub fn into_inner(self) -> Option<T> {
        match self {
            Rendered::Primary(v) | Rendered::Fallback(v) => Some(v),
            Rendered::Placeholder | Rendered::Nothing => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Rendered<U> {
        match self {
            Rendered::Primary(v) => Rendered::Primary(f(v)),
            Rendered::Fallback(v) => Rendered::Fallback(f(v)),
            Rendered::Placeholder => Rendered::Placeholder,
            Rendered::Nothing => Rendered::Nothing,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gate {
    requirement: Requirement,
    keep_space: bool,
    policy: MissingRequirementPolicy,
}

impl Gate {
    pub fn new(requirement: impl Into<Requirement>) -> Self {
        Self {
            requirement: requirement.into(),
            ..Self::default()
        }
    }

    /// Emit a placeholder instead of nothing when denied without fallback.
    pub fn keep_space(mut self, keep: bool) -> Self {
        self.keep_space = keep;
        self
    }

    pub fn policy(mut self, policy: MissingRequirementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn allows(&self, set: &PermissionSet) -> bool {
        match self.requirement.evaluate(set) {
            Decision::Granted => true,
            Decision::Denied => false,
            Decision::Undeclared => {
                tracing::warn!(
                    policy = ?self.policy,
                    "render gate has no declared permission requirement"
                );
                self.policy == MissingRequirementPolicy::FailOpen
            }
        }
    }

    pub fn render<T>(&self, set: &PermissionSet, primary: T, fallback: Option<T>) -> Rendered<T> {
        if self.allows(set) {
            return Rendered::Primary(primary);
        }

        match fallback {
            Some(fallback) => Rendered::Fallback(fallback),
            None if self.keep_space => Rendered::Placeholder,
            None => Rendered::Nothing,
        }
    }

    /// Like [`Self::render`], building only the branch that is emitted.
    pub fn render_with<T>(
        &self,
        set: &PermissionSet,
        primary: impl FnOnce() -> T,
        fallback: Option<&dyn Fn() -> T>,
    ) -> Rendered<T> {
        if self.allows(set) {
            return Rendered::Primary(primary());
        }

        match fallback {
            Some(fallback) => Rendered::Fallback(fallback()),
            None if self.keep_space => Rendered::Placeholder,
            None => Rendered::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use pymes_auth::catalog::{CATEGORIAS_ACTUALIZAR, CATEGORIAS_CREAR, CATEGORIAS_ELIMINAR};

    use super::*;

    fn editor() -> PermissionSet {
        PermissionSet::from_granted(["CATEGORIAS_LEER", "CATEGORIAS_ACTUALIZAR"])
    }

    #[test]
    fn granted_emits_primary() {
        let gate = Gate::new(CATEGORIAS_ACTUALIZAR);
        assert_eq!(gate.render(&editor(), "edit", Some("no")), Rendered::Primary("edit"));
    }

    #[test]
    fn denied_prefers_fallback_then_placeholder_then_nothing() {
        let set = editor();
        let gate = Gate::new(CATEGORIAS_ELIMINAR);

        assert_eq!(gate.render(&set, "delete", Some("locked")), Rendered::Fallback("locked"));
        let spaced = gate.clone().keep_space(true);
        assert_eq!(spaced.render(&set, "delete", None), Rendered::Placeholder);
        assert_eq!(gate.render(&set, "delete", None), Rendered::Nothing);
    }

    #[test]
    fn undeclared_requirement_is_fail_closed_by_default() {
        let gate = Gate::default();
        assert_eq!(gate.render(&editor(), "x", None), Rendered::Nothing);
    }

    #[test]
    fn undeclared_requirement_can_fail_open() {
        let gate = Gate::default().policy(MissingRequirementPolicy::FailOpen);
        assert!(gate.render(&PermissionSet::empty(), "x", None).is_primary());
    }

    #[test]
    fn public_requirement_always_shows() {
        let gate = Gate::new(Requirement::Public);
        assert!(gate.render(&PermissionSet::empty(), "help", None).is_primary());
    }

    #[test]
    fn any_and_all_modes() {
        let set = editor();
        let any = Gate::new(Requirement::any([CATEGORIAS_CREAR, CATEGORIAS_ACTUALIZAR]));
        let all = Gate::new(Requirement::all([CATEGORIAS_CREAR, CATEGORIAS_ACTUALIZAR]));
        assert!(any.allows(&set));
        assert!(!all.allows(&set));
    }

    #[test]
    fn render_with_builds_only_the_emitted_branch() {
        let set = editor();
        let gate = Gate::new(CATEGORIAS_ELIMINAR);
        let fallback = || "locked";
        let out: Rendered<&str> =
            gate.render_with(&set, || panic!("primary must not be built"), Some(&fallback));
        assert_eq!(out, Rendered::Fallback("locked"));
        assert_eq!(out.map(str::len).into_inner(), Some(6));
    }
}
