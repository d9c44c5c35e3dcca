//! Route reachability decisions for direct navigation and deep links.

use serde::Serialize;

use super::menu::MenuTree;
use super::permission::PermissionSet;

/// Fallback target when a navigation is denied.
pub const DENIED_REDIRECT: &str = "/";

/// Outcome of a route check.
///
/// Denial is an expected branch, not an error: the guard reports the
/// decision and the fallback target, and the caller owns the redirect and
/// any user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum RouteDecision {
    Allowed,
    Denied {
        /// Permission code the session was missing.
        required: String,
        /// Where the caller should send the user instead.
        redirect: String,
    },
}

impl RouteDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RouteDecision::Allowed)
    }
}

/// Decide whether `path` is reachable for the given permission set.
///
/// The full unfiltered tree is consulted, at arbitrary depth. Paths with no
/// matching node are allowed: this layer only enforces declared gates, and
/// unknown routes are left to the router's own 404 handling. A matching
/// node without a permission requirement is likewise allowed.
pub fn check_route(tree: &MenuTree, path: &str, permissions: &PermissionSet) -> RouteDecision {
    let Some(node) = tree.find(path) else {
        return RouteDecision::Allowed;
    };

    match node.required_permission.as_deref() {
        None => RouteDecision::Allowed,
        Some(code) if permissions.contains(code) => RouteDecision::Allowed,
        Some(code) => RouteDecision::Denied {
            required: code.to_string(),
            redirect: DENIED_REDIRECT.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::menu::{MenuNode, MenuTree};

    fn sample_tree() -> MenuTree {
        MenuTree::new(vec![
            MenuNode::item("/", "Welcome"),
            MenuNode::item("/permission", "Perms")
                .permission("sys.permission")
                .with_children(vec![
                    MenuNode::item("/permission/user", "Users").permission("sys.user.list"),
                    MenuNode::item("/permission/hidden", "Hidden").hidden(),
                ]),
        ])
        .unwrap()
    }

    #[test]
    fn unknown_route_is_allowed() {
        let decision = check_route(&sample_tree(), "/unregistered/path", &PermissionSet::new());
        assert!(decision.is_allowed());
    }

    #[test]
    fn route_without_requirement_is_allowed() {
        let decision = check_route(&sample_tree(), "/", &PermissionSet::new());
        assert!(decision.is_allowed());
    }

    #[test]
    fn gated_route_denied_without_code() {
        let decision = check_route(&sample_tree(), "/permission/user", &PermissionSet::new());
        assert_eq!(
            decision,
            RouteDecision::Denied {
                required: "sys.user.list".to_string(),
                redirect: "/".to_string(),
            }
        );
    }

    #[test]
    fn gated_route_allowed_with_code() {
        let perms = PermissionSet::from_codes(["sys.user.list"]);
        let decision = check_route(&sample_tree(), "/permission/user", &perms);
        assert!(decision.is_allowed());
    }

    #[test]
    fn hidden_nodes_are_still_route_targets() {
        // Hidden only affects navigation display; reachability follows the
        // permission rule (none declared here, so allowed).
        let decision = check_route(&sample_tree(), "/permission/hidden", &PermissionSet::new());
        assert!(decision.is_allowed());
    }

    #[test]
    fn lookup_works_below_two_levels() {
        let tree = MenuTree::new(vec![MenuNode::item("/a", "A").with_children(vec![
            MenuNode::item("/a/b", "B")
                .with_children(vec![MenuNode::item("/a/b/c", "C").permission("deep")]),
        ])])
        .unwrap();

        assert!(!check_route(&tree, "/a/b/c", &PermissionSet::new()).is_allowed());
        assert!(check_route(&tree, "/a/b/c", &PermissionSet::from_codes(["deep"])).is_allowed());
    }
}
