//! Active-node resolution for breadcrumb and sidebar open-state.

use super::menu::{MenuNode, MenuTree};

/// Return the ancestors of the node whose key equals `path`, outermost
/// first, excluding the node itself.
///
/// Drives "auto-expand the owning section" behavior: the returned keys are
/// exactly the sections the sidebar should open. Empty when the path is
/// top-level or not present in the tree.
pub fn ancestor_chain<'a>(tree: &'a MenuTree, path: &str) -> Vec<&'a MenuNode> {
    let mut chain = Vec::new();
    for root in tree.roots() {
        if descend(root, path, &mut chain) {
            // The target itself is on top of the stack.
            chain.pop();
            return chain;
        }
        chain.clear();
    }
    Vec::new()
}

/// The top-level node owning `path`, if `path` sits below one.
pub fn active_root<'a>(tree: &'a MenuTree, path: &str) -> Option<&'a MenuNode> {
    ancestor_chain(tree, path).first().copied()
}

fn descend<'a>(node: &'a MenuNode, path: &str, chain: &mut Vec<&'a MenuNode>) -> bool {
    chain.push(node);
    if node.key == path {
        return true;
    }
    for child in &node.children {
        if descend(child, path, chain) {
            return true;
        }
    }
    chain.pop();
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::menu::{MenuNode, MenuTree};

    fn sample_tree() -> MenuTree {
        MenuTree::new(vec![
            MenuNode::item("/", "Welcome"),
            MenuNode::item("/permission", "Perms").with_children(vec![
                MenuNode::item("/permission/user", "Users"),
                MenuNode::item("/permission/role", "Roles"),
            ]),
            MenuNode::item("/cms", "CMS").with_children(vec![MenuNode::item(
                "/cms/article",
                "Articles",
            )
            .with_children(vec![MenuNode::item("/cms/article/drafts", "Drafts")])]),
        ])
        .unwrap()
    }

    fn chain_keys(tree: &MenuTree, path: &str) -> Vec<String> {
        ancestor_chain(tree, path)
            .iter()
            .map(|n| n.key.clone())
            .collect()
    }

    #[test]
    fn direct_child_yields_single_ancestor() {
        let tree = sample_tree();
        assert_eq!(chain_keys(&tree, "/permission/user"), vec!["/permission"]);
        assert_eq!(
            active_root(&tree, "/permission/role").map(|n| n.key.as_str()),
            Some("/permission")
        );
    }

    #[test]
    fn deep_path_yields_full_chain() {
        let tree = sample_tree();
        assert_eq!(
            chain_keys(&tree, "/cms/article/drafts"),
            vec!["/cms", "/cms/article"]
        );
    }

    #[test]
    fn top_level_path_has_no_ancestors() {
        let tree = sample_tree();
        assert!(ancestor_chain(&tree, "/").is_empty());
        assert!(active_root(&tree, "/permission").is_none());
    }

    #[test]
    fn unknown_path_has_no_ancestors() {
        let tree = sample_tree();
        assert!(ancestor_chain(&tree, "/missing").is_empty());
    }
}
