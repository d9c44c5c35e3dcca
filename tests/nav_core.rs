//! End-to-end checks of the navigation core against the console's real menu
//! tree, through the public library surface only.

use admin_console_api::nav::{
    active_root, admin_menu, ancestor_chain, check_route, filter_tree, MenuNode, PermissionSet,
    RouteDecision,
};

fn keys(nodes: &[MenuNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.key.as_str()).collect()
}

#[test]
fn empty_session_sees_only_welcome() {
    let menu = admin_menu();
    let filtered = filter_tree(&menu, &PermissionSet::new());
    assert_eq!(keys(&filtered), vec!["/"]);
}

#[test]
fn user_manager_sees_permission_section_with_one_entry() {
    let menu = admin_menu();
    let perms = PermissionSet::from_codes(["sys.user.list"]);

    let filtered = filter_tree(&menu, &perms);
    assert_eq!(keys(&filtered), vec!["/", "/permission"]);
    assert_eq!(keys(&filtered[1].children), vec!["/permission/user"]);
}

#[test]
fn section_code_alone_keeps_group_without_children() {
    let menu = admin_menu();
    let perms = PermissionSet::from_codes(["cms.manage"]);

    let filtered = filter_tree(&menu, &perms);
    assert_eq!(keys(&filtered), vec!["/", "/cms"]);
    assert!(filtered[1].children.is_empty());
}

#[test]
fn full_grant_shows_everything_in_declaration_order() {
    let menu = admin_menu();
    let perms = PermissionSet::from_codes([
        "sys.permission",
        "sys.user.list",
        "sys.role.list",
        "sys.api.list",
        "sys.department.list",
        "cms.manage",
        "cms.category.list",
        "cms.article.list",
        "cms.site_setting.list",
    ]);

    let filtered = filter_tree(&menu, &perms);
    assert_eq!(keys(&filtered), vec!["/", "/permission", "/cms"]);
    assert_eq!(
        keys(&filtered[1].children),
        vec![
            "/permission/user",
            "/permission/role",
            "/permission/api",
            "/permission/department"
        ]
    );
    assert_eq!(
        keys(&filtered[2].children),
        vec!["/cms/category", "/cms/article", "/cms/site-setting"]
    );
}

#[test]
fn guard_and_filter_agree_on_leaf_reachability() {
    let menu = admin_menu();
    let perms = PermissionSet::from_codes(["sys.user.list"]);

    assert!(check_route(&menu, "/permission/user", &perms).is_allowed());
    assert_eq!(
        check_route(&menu, "/permission/role", &perms),
        RouteDecision::Denied {
            required: "sys.role.list".to_string(),
            redirect: "/".to_string(),
        }
    );
}

#[test]
fn deep_link_to_unknown_path_is_not_blocked() {
    let menu = admin_menu();
    assert!(check_route(&menu, "/not/in/the/menu", &PermissionSet::new()).is_allowed());
}

#[test]
fn active_section_opens_for_nested_route() {
    let menu = admin_menu();

    let chain: Vec<&str> = ancestor_chain(&menu, "/cms/article")
        .iter()
        .map(|n| n.key.as_str())
        .collect();
    assert_eq!(chain, vec!["/cms"]);

    assert_eq!(
        active_root(&menu, "/permission/department").map(|n| n.key.as_str()),
        Some("/permission")
    );
    assert!(active_root(&menu, "/").is_none());
}

#[test]
fn menu_serialization_omits_internal_fields() {
    let menu = admin_menu();
    let filtered = filter_tree(&menu, &PermissionSet::from_codes(["sys.user.list"]));
    let json = serde_json::to_value(&filtered).expect("serializable");

    // Visible nodes never carry a hidden flag, and leaves carry no
    // children array.
    assert!(json[0].get("hidden").is_none());
    assert!(json[0].get("children").is_none());
    assert_eq!(json[1]["children"][0]["permission"], "sys.user.list");
}

#[test]
fn route_decision_serializes_with_tag() {
    let menu = admin_menu();

    let allowed = check_route(&menu, "/", &PermissionSet::new());
    assert_eq!(
        serde_json::to_value(&allowed).expect("serializable"),
        serde_json::json!({"decision": "allowed"})
    );

    let denied = check_route(&menu, "/permission/user", &PermissionSet::new());
    assert_eq!(
        serde_json::to_value(&denied).expect("serializable"),
        serde_json::json!({
            "decision": "denied",
            "required": "sys.user.list",
            "redirect": "/",
        })
    );
}

#[test]
fn refiltering_a_filtered_menu_changes_nothing() {
    let menu = admin_menu();
    let perms = PermissionSet::from_codes(["sys.permission", "sys.user.list", "cms.manage"]);

    let once = filter_tree(&menu, &perms);
    let again = filter_tree(
        &admin_console_api::nav::MenuTree::new(once.clone()).expect("filtered tree stays valid"),
        &perms,
    );
    assert_eq!(once, again);
}
