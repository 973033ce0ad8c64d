use tracing::debug;

use super::PermissionProfile;
use crate::filter::fields;
use crate::filter::{Constraint, FilterValue, Predicate};

/// What a request without a resolved permission profile may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnonymousAccess {
    /// Match no rows.
    #[default]
    Deny,
    /// Leave the predicate untouched. Only for endpoints that are public on purpose.
    Passthrough,
}

/// Restrict `base` to the executors `profile` may see, denying anonymous callers.
pub fn scope(profile: Option<&PermissionProfile>, base: Predicate) -> Predicate {
    scope_with(profile, base, AnonymousAccess::Deny)
}

/// [`scope`] with an explicit policy for requests that carry no profile.
pub fn scope_with(profile: Option<&PermissionProfile>, base: Predicate, anonymous: AnonymousAccess) -> Predicate {
    let Some(profile) = profile else {
        debug!(?anonymous, "no permission profile resolved");
        return match anonymous {
            AnonymousAccess::Deny => Predicate::nothing(),
            AnonymousAccess::Passthrough => base,
        };
    };

    if profile.is_admin() {
        debug!("administrator, executor filter not applied");
        return base;
    }

    if profile.authorized_executors.is_empty() {
        debug!(role = profile.role.as_str(), "empty executor allow-list, executor filter not applied");
        return base;
    }

    if let Some(Constraint::Eq(value)) = base.get(fields::EXECUTOR) {
        let authorized = value
            .as_text()
            .is_some_and(|name| profile.authorized_executors.contains(name));
        if !authorized {
            debug!(executor = ?value, "explicit executor filter not authorized");
            return Predicate::nothing();
        }
        return base;
    }

    debug!(count = profile.authorized_executors.len(), "restricting to authorized executors");
    let allowed = profile
        .authorized_executors
        .iter()
        .map(|name| FilterValue::Text(name.clone()))
        .collect();
    base.with(fields::EXECUTOR, Constraint::In(allowed))
}

/// Rows that expose an executor.
pub trait ExecutorOf {
    fn executor(&self) -> Option<&str>;
}

/// In-memory counterpart of [`scope`] for rows that were already fetched.
pub fn retain_authorized<T: ExecutorOf>(rows: Vec<T>, profile: Option<&PermissionProfile>) -> Vec<T> {
    let Some(profile) = profile else { return vec![] };
    if profile.sees_all_executors() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| row.executor().is_some_and(|e| profile.authorized_executors.contains(e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::Role;
    use std::collections::BTreeSet;

    fn base() -> Predicate {
        Predicate::new().with("status", Constraint::Eq("Pendente".into()))
    }

    fn restricted() -> PermissionProfile {
        PermissionProfile::new(Role::User).with_executors(["A", "B"])
    }

    #[test]
    fn admin_is_unrestricted() {
        let admin = PermissionProfile::new(Role::Admin).with_executors(["A"]);
        assert_eq!(scope(Some(&admin), base()), base());
        assert_eq!(scope(Some(&PermissionProfile::new(Role::Admin)), base()), base());
    }

    #[test]
    fn empty_allow_list_is_unrestricted() {
        let user = PermissionProfile::new(Role::User);
        assert_eq!(scope(Some(&user), base()), base());
        let manager = PermissionProfile::new(Role::Manager);
        assert_eq!(scope(Some(&manager), Predicate::new()), Predicate::new());
    }

    #[test]
    fn unauthorized_explicit_executor_matches_nothing() {
        let p = Predicate::new().with(fields::EXECUTOR, Constraint::Eq("C".into()));
        assert!(scope(Some(&restricted()), p).is_nothing());
    }

    #[test]
    fn authorized_explicit_executor_is_kept() {
        let p = base().with(fields::EXECUTOR, Constraint::Eq("B".into()));
        assert_eq!(scope(Some(&restricted()), p.clone()), p);
    }

    #[test]
    fn injects_allow_list() {
        let scoped = scope(Some(&restricted()), Predicate::new());
        let expected: BTreeSet<FilterValue> = ["A".into(), "B".into()].into_iter().collect();
        assert_eq!(scoped, Predicate::new().with(fields::EXECUTOR, Constraint::In(expected)));
    }

    #[test]
    fn existing_list_constraint_is_replaced_not_intersected() {
        let requested: BTreeSet<FilterValue> = ["B".into(), "Z".into()].into_iter().collect();
        let p = Predicate::new().with(fields::EXECUTOR, Constraint::In(requested));
        let scoped = scope(Some(&restricted()), p);
        let expected: BTreeSet<FilterValue> = ["A".into(), "B".into()].into_iter().collect();
        assert_eq!(scoped.get(fields::EXECUTOR), Some(&Constraint::In(expected)));
    }

    #[test]
    fn anonymous_policy() {
        assert!(scope(None, base()).is_nothing());
        assert_eq!(scope_with(None, base(), AnonymousAccess::Passthrough), base());
        assert!(scope_with(None, base(), AnonymousAccess::Deny).is_nothing());
    }

    struct Row(Option<&'static str>);

    impl ExecutorOf for Row {
        fn executor(&self) -> Option<&str> {
            self.0
        }
    }

    #[test]
    fn retains_authorized_rows() {
        let rows = || vec![Row(Some("A")), Row(Some("C")), Row(None)];
        assert_eq!(retain_authorized(rows(), Some(&restricted())).len(), 1);
        assert_eq!(retain_authorized(rows(), Some(&PermissionProfile::new(Role::User))).len(), 3);
        assert!(retain_authorized(rows(), None).is_empty());
    }
}
