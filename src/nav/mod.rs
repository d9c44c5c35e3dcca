//! Permission-gated navigation.
//!
//! The admin console drives its sidebar and its deep-link gating from a
//! static menu tree declared at startup. Three pure functions operate on
//! that tree together with the session's set of permission codes:
//!
//! - [`filter_tree`] prunes the tree down to what the session may see,
//! - [`check_route`] decides whether a direct navigation target is reachable,
//! - [`ancestor_chain`] resolves the ancestors of the current path so the
//!   UI can auto-expand the owning sections.
//!
//! All three take the [`PermissionSet`] as an explicit argument; nothing in
//! this module reads ambient session state.

pub mod filter;
pub mod guard;
pub mod menu;
pub mod permission;
pub mod resolver;

pub use filter::filter_tree;
pub use guard::{check_route, RouteDecision, DENIED_REDIRECT};
pub use menu::{admin_menu, MenuNode, MenuTree, MenuTreeError};
pub use permission::PermissionSet;
pub use resolver::{active_root, ancestor_chain};
