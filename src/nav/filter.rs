//! Permission filtering of the menu tree.

use super::menu::{MenuNode, MenuTree};
use super::permission::PermissionSet;

/// Prune the menu tree down to what the given permission set may see.
///
/// Rules, applied per node in declaration order:
/// - hidden nodes are dropped outright;
/// - a node with no required permission passes its own check;
/// - a node with a required permission passes iff the code is held;
/// - a node failing its own check is still kept, with only its filtered
///   children, when at least one descendant survives filtering (a grouping
///   node stays visible as a container for permitted children);
/// - a node passing its own check keeps its filtered children, even when
///   none survive;
/// - leaves are kept iff they pass their own check.
///
/// Output ordering matches input ordering, and filtering an already-filtered
/// tree with the same set yields an identical result.
pub fn filter_tree(tree: &MenuTree, permissions: &PermissionSet) -> Vec<MenuNode> {
    filter_nodes(tree.roots(), permissions)
}

fn filter_nodes(nodes: &[MenuNode], permissions: &PermissionSet) -> Vec<MenuNode> {
    nodes
        .iter()
        .filter_map(|node| filter_node(node, permissions))
        .collect()
}

fn filter_node(node: &MenuNode, permissions: &PermissionSet) -> Option<MenuNode> {
    if node.hidden {
        return None;
    }

    let passes_own_check = node
        .required_permission
        .as_deref()
        .map_or(true, |code| permissions.contains(code));

    let children = filter_nodes(&node.children, permissions);

    // A failing leaf is dropped; a failing group survives only as a
    // container for children that made it through.
    if !passes_own_check && children.is_empty() {
        return None;
    }

    Some(MenuNode {
        key: node.key.clone(),
        label: node.label.clone(),
        required_permission: node.required_permission.clone(),
        hidden: false,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::menu::MenuNode;

    fn tree(roots: Vec<MenuNode>) -> MenuTree {
        MenuTree::new(roots).unwrap()
    }

    fn keys(nodes: &[MenuNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.key.as_str()).collect()
    }

    #[test]
    fn hidden_nodes_never_appear() {
        let t = tree(vec![
            MenuNode::item("/a", "A").hidden(),
            MenuNode::item("/b", "B"),
        ]);
        let perms = PermissionSet::from_codes(["anything"]);
        assert_eq!(keys(&filter_tree(&t, &perms)), vec!["/b"]);
    }

    #[test]
    fn hidden_parent_drops_whole_subtree() {
        let t = tree(vec![MenuNode::item("/a", "A")
            .hidden()
            .with_children(vec![MenuNode::item("/a/b", "B")])]);
        assert!(filter_tree(&t, &PermissionSet::new()).is_empty());
    }

    #[test]
    fn leaf_without_permission_requirement_is_kept() {
        let t = tree(vec![MenuNode::item("/", "Welcome")]);
        assert_eq!(keys(&filter_tree(&t, &PermissionSet::new())), vec!["/"]);
    }

    #[test]
    fn leaf_with_missing_permission_is_dropped() {
        let t = tree(vec![MenuNode::item("/u", "Users").permission("sys.user.list")]);
        assert!(filter_tree(&t, &PermissionSet::new()).is_empty());

        let granted = PermissionSet::from_codes(["sys.user.list"]);
        assert_eq!(keys(&filter_tree(&t, &granted)), vec!["/u"]);
    }

    #[test]
    fn failing_group_survives_as_container_for_permitted_child() {
        // /a requires p1 (absent), /a/b requires p2 (absent),
        // /a/c requires nothing. Expected: /a kept with only /a/c.
        let t = tree(vec![MenuNode::item("/a", "A")
            .permission("p1")
            .with_children(vec![
                MenuNode::item("/a/b", "B").permission("p2"),
                MenuNode::item("/a/c", "C"),
            ])]);

        let filtered = filter_tree(&t, &PermissionSet::new());
        assert_eq!(keys(&filtered), vec!["/a"]);
        assert_eq!(keys(&filtered[0].children), vec!["/a/c"]);
    }

    #[test]
    fn failing_group_with_no_surviving_children_is_dropped() {
        let t = tree(vec![MenuNode::item("/a", "A")
            .permission("p1")
            .with_children(vec![MenuNode::item("/a/b", "B").permission("p2")])]);
        assert!(filter_tree(&t, &PermissionSet::new()).is_empty());
    }

    #[test]
    fn passing_group_is_kept_even_when_all_children_fail() {
        let t = tree(vec![MenuNode::item("/a", "A")
            .permission("p1")
            .with_children(vec![MenuNode::item("/a/b", "B").permission("p2")])]);

        let perms = PermissionSet::from_codes(["p1"]);
        let filtered = filter_tree(&t, &perms);
        assert_eq!(keys(&filtered), vec!["/a"]);
        assert!(filtered[0].children.is_empty());
    }

    #[test]
    fn container_rule_applies_at_depth() {
        // Grandchild survives, so both failing ancestors stay as containers.
        let t = tree(vec![MenuNode::item("/a", "A")
            .permission("p1")
            .with_children(vec![MenuNode::item("/a/b", "B")
                .permission("p2")
                .with_children(vec![MenuNode::item("/a/b/c", "C")])])]);

        let filtered = filter_tree(&t, &PermissionSet::new());
        assert_eq!(keys(&filtered), vec!["/a"]);
        assert_eq!(keys(&filtered[0].children), vec!["/a/b"]);
        assert_eq!(keys(&filtered[0].children[0].children), vec!["/a/b/c"]);
    }

    #[test]
    fn ordering_is_stable() {
        let t = tree(vec![
            MenuNode::item("/c", "C"),
            MenuNode::item("/a", "A"),
            MenuNode::item("/b", "B"),
        ]);
        assert_eq!(
            keys(&filter_tree(&t, &PermissionSet::new())),
            vec!["/c", "/a", "/b"]
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let t = tree(vec![
            MenuNode::item("/", "Welcome"),
            MenuNode::item("/p", "Perms")
                .permission("sys.permission")
                .with_children(vec![
                    MenuNode::item("/p/u", "Users").permission("sys.user.list"),
                    MenuNode::item("/p/r", "Roles").permission("sys.role.list"),
                    MenuNode::item("/p/h", "Hidden").hidden(),
                ]),
        ]);
        let perms = PermissionSet::from_codes(["sys.user.list"]);

        let once = filter_tree(&t, &perms);
        let again = filter_tree(&MenuTree::new(once.clone()).unwrap(), &perms);
        assert_eq!(once, again);
    }
}
