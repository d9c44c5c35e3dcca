//! Static menu tree declaration and validation.

use serde::Serialize;
use thiserror::Error;

/// A single entry in the navigation tree.
///
/// `key` doubles as the navigable route. Nodes are declared once at startup
/// and never mutated; the filter produces pruned copies rather than editing
/// the source tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuNode {
    pub key: String,
    pub label: String,
    /// Permission code required to see or reach this node. `None` means the
    /// node is always visible when its ancestors are.
    #[serde(rename = "permission", skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<String>,
    /// Hidden nodes never appear in navigation but may still be valid route
    /// targets (the guard consults the unfiltered tree).
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// A visible node with no permission requirement.
    pub fn item(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            required_permission: None,
            hidden: false,
            children: Vec::new(),
        }
    }

    /// Require a permission code to see or reach this node.
    pub fn permission(mut self, code: impl Into<String>) -> Self {
        self.required_permission = Some(code.into());
        self
    }

    /// Exclude this node from navigation regardless of permissions.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    /// Find a node by key anywhere in this subtree.
    pub fn find(&self, key: &str) -> Option<&MenuNode> {
        if self.key == key {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(key))
    }
}

#[derive(Debug, Error)]
pub enum MenuTreeError {
    #[error("duplicate menu key: {0}")]
    DuplicateKey(String),
}

/// The full navigation tree, validated at construction.
///
/// Keys must be unique across the entire tree; a duplicate is a
/// configuration bug and aborts startup rather than surfacing per-lookup.
#[derive(Debug, Clone, Serialize)]
pub struct MenuTree {
    roots: Vec<MenuNode>,
}

impl MenuTree {
    pub fn new(roots: Vec<MenuNode>) -> Result<Self, MenuTreeError> {
        let mut seen = std::collections::HashSet::new();
        let mut stack: Vec<&MenuNode> = roots.iter().collect();
        while let Some(node) = stack.pop() {
            if !seen.insert(node.key.clone()) {
                return Err(MenuTreeError::DuplicateKey(node.key.clone()));
            }
            stack.extend(node.children.iter());
        }
        Ok(Self { roots })
    }

    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    /// Find a node by key at arbitrary depth.
    pub fn find(&self, key: &str) -> Option<&MenuNode> {
        self.roots.iter().find_map(|root| root.find(key))
    }
}

/// The console's navigation tree.
///
/// Declared in display order; grouping nodes carry their own permission code
/// but survive filtering as containers when any child remains visible.
pub fn admin_menu() -> MenuTree {
    let roots = vec![
        MenuNode::item("/", "Welcome"),
        MenuNode::item("/permission", "Permission Management")
            .permission("sys.permission")
            .with_children(vec![
                MenuNode::item("/permission/user", "User Management").permission("sys.user.list"),
                MenuNode::item("/permission/role", "Role Management").permission("sys.role.list"),
                MenuNode::item("/permission/api", "API Management").permission("sys.api.list"),
                MenuNode::item("/permission/department", "Department Management")
                    .permission("sys.department.list"),
            ]),
        MenuNode::item("/cms", "Content Management")
            .permission("cms.manage")
            .with_children(vec![
                MenuNode::item("/cms/category", "Categories").permission("cms.category.list"),
                MenuNode::item("/cms/article", "Articles").permission("cms.article.list"),
                MenuNode::item("/cms/site-setting", "Site Settings")
                    .permission("cms.site_setting.list"),
            ]),
    ];

    // The tree is static; a duplicate key cannot get past review and tests,
    // but fail loudly at startup if one does.
    match MenuTree::new(roots) {
        Ok(tree) => tree,
        Err(e) => panic!("invalid menu configuration: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let node = MenuNode::item("/x", "X");
        assert_eq!(node.key, "/x");
        assert!(node.required_permission.is_none());
        assert!(!node.hidden);
        assert!(node.children.is_empty());
    }

    #[test]
    fn duplicate_keys_rejected() {
        let result = MenuTree::new(vec![
            MenuNode::item("/a", "A"),
            MenuNode::item("/b", "B").with_children(vec![MenuNode::item("/a", "A again")]),
        ]);
        assert!(matches!(result, Err(MenuTreeError::DuplicateKey(key)) if key == "/a"));
    }

    #[test]
    fn find_searches_arbitrary_depth() {
        let tree = MenuTree::new(vec![MenuNode::item("/a", "A").with_children(vec![
            MenuNode::item("/a/b", "B").with_children(vec![MenuNode::item("/a/b/c", "C")]),
        ])])
        .unwrap();

        assert_eq!(tree.find("/a/b/c").map(|n| n.label.as_str()), Some("C"));
        assert!(tree.find("/nope").is_none());
    }

    #[test]
    fn admin_menu_is_valid() {
        let tree = admin_menu();
        assert!(tree.find("/").is_some());
        assert!(tree.find("/permission/user").is_some());
        assert_eq!(
            tree.find("/permission/user")
                .and_then(|n| n.required_permission.as_deref()),
            Some("sys.user.list")
        );
    }

    #[test]
    fn serializes_without_empty_fields() {
        let node = MenuNode::item("/x", "X");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json, serde_json::json!({"key": "/x", "label": "X"}));
    }
}
