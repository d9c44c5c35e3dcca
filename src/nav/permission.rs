//! Session permission codes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The set of permission codes granted to a session.
///
/// Built once per session from the login response (the distinct
/// `permission_code` values of the APIs granted to the user's roles) and
/// passed explicitly to the navigation functions. Read-only from their
/// perspective; only the authentication flow writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashSet<String>);

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(codes.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    /// True if any of the given codes is held.
    pub fn has_any<'a>(&self, codes: impl IntoIterator<Item = &'a str>) -> bool {
        codes.into_iter().any(|code| self.contains(code))
    }

    /// True if every one of the given codes is held.
    pub fn has_all<'a>(&self, codes: impl IntoIterator<Item = &'a str>) -> bool {
        codes.into_iter().all(|code| self.contains(code))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_codes(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership() {
        let perms = PermissionSet::from_codes(["sys.user.list", "sys.role.list"]);
        assert!(perms.contains("sys.user.list"));
        assert!(!perms.contains("sys.api.list"));
        assert_eq!(perms.len(), 2);
    }

    #[test]
    fn any_and_all() {
        let perms = PermissionSet::from_codes(["a", "b"]);
        assert!(perms.has_any(["a", "z"]));
        assert!(!perms.has_any(["y", "z"]));
        assert!(perms.has_all(["a", "b"]));
        assert!(!perms.has_all(["a", "z"]));
    }

    #[test]
    fn empty_set_grants_nothing() {
        let perms = PermissionSet::new();
        assert!(perms.is_empty());
        assert!(!perms.contains("sys.user.list"));
    }
}
