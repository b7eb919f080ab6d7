use proptest::prelude::*;
use toggle_domain::{Feature, UserGroups};
use toggle_resolver::{Activation, evaluate, is_active};

fn feature(enabled: bool, user_groups: UserGroups) -> Feature {
    Feature {
        group: "wibble".into(),
        name: "feat".into(),
        description: String::new(),
        enabled,
        user_groups,
    }
}

const NONE: &[&str] = &[];

#[test]
fn disabled_is_off_for_everyone() {
    let f = feature(false, UserGroups::from_list(["admin"]));
    assert_eq!(evaluate(&f, &["admin"]), Activation::Disabled);
    assert!(!is_active(&feature(false, UserGroups::default()), NONE));
}

#[test]
fn enabled_ungated_is_on_even_without_groups() {
    let f = feature(true, UserGroups::default());
    assert_eq!(evaluate(&f, NONE), Activation::Ungated);
    assert!(is_active(&f, &["anyone"]));
}

#[test]
fn list_gating() {
    let f = feature(true, UserGroups::from_list(["admin"]));
    assert_eq!(evaluate(&f, &["editor"]), Activation::NoMatch);
    assert_eq!(evaluate(&f, &["admin", "editor"]), Activation::ListMatch { group: "admin".into() });
    assert_eq!(evaluate(&f, &["editor", "admin"]), Activation::ListMatch { group: "admin".into() });
}

#[test]
fn list_match_is_exact() {
    let f = feature(true, UserGroups::from_list(["admin"]));
    assert!(!is_active(&f, &["Admin"]));
    assert!(!is_active(&f, &["superadmin"]));
}

#[test]
fn pattern_gating_searches_anywhere() {
    let f = feature(true, UserGroups::from_pattern(".*admin.*").unwrap());
    assert_eq!(
        evaluate(&f, &["superadmin"]),
        Activation::PatternMatch { group: "superadmin".into(), pattern: ".*admin.*".into() }
    );

    let unanchored = feature(true, UserGroups::from_pattern("admin").unwrap());
    assert!(is_active(&unanchored, &["superadmin"]));

    let anchored = feature(true, UserGroups::from_pattern("^admin$").unwrap());
    assert!(!is_active(&anchored, &["superadmin"]));
}

#[test]
fn gated_without_requester_groups_is_off() {
    let f = feature(true, UserGroups::new(["admin"], Some(".*")).unwrap());
    assert_eq!(evaluate(&f, NONE), Activation::NoRequesterGroups);
    assert_eq!(evaluate(&f, &[""]), Activation::NoRequesterGroups);
}

#[test]
fn list_or_pattern() {
    let f = feature(true, UserGroups::new(["admin", "editor"], Some(".*admin.*")).unwrap());
    assert!(is_active(&f, &["editor"]));
    assert!(is_active(&f, &["superadmin"]));
    assert!(!is_active(&f, &["guest"]));
    assert!(is_active(&f, &["guest".to_owned(), "editor".to_owned()]));
}

proptest! {
    #[test]
    fn disabled_never_active(ids in prop::collection::vec("[a-z]{0,8}", 0..6), list in prop::collection::vec("[a-z]{1,8}", 0..4)) {
        let f = feature(false, UserGroups::from_list(list));
        prop_assert!(!is_active(&f, &ids));
    }

    #[test]
    fn ungated_ignores_requester(ids in prop::collection::vec(".{0,12}", 0..6)) {
        let f = feature(true, UserGroups::default());
        prop_assert!(is_active(&f, &ids));
    }

    #[test]
    fn listed_member_is_always_admitted(
        list in prop::collection::vec("[a-z]{1,8}", 1..5),
        others in prop::collection::vec("[A-Z]{1,8}", 0..4),
        pick in any::<prop::sample::Index>(),
    ) {
        let member = pick.get(&list).clone();
        let f = feature(true, UserGroups::from_list(list));
        let mut ids = others;
        ids.push(member);
        prop_assert!(is_active(&f, &ids));
    }

    #[test]
    fn strangers_are_rejected_by_list_only_gating(
        list in prop::collection::vec("[a-z]{1,8}", 1..5),
        ids in prop::collection::vec("[A-Z0-9]{1,8}", 0..5),
    ) {
        let f = feature(true, UserGroups::from_list(list));
        prop_assert!(!is_active(&f, &ids));
    }

    #[test]
    fn decision_is_order_independent(
        list in prop::collection::vec("[a-c]{1,2}", 1..4),
        mut ids in prop::collection::vec("[a-c]{1,2}", 0..5),
    ) {
        let f = feature(true, UserGroups::new(list, Some("^b")).unwrap());
        let forward = is_active(&f, &ids);
        ids.reverse();
        prop_assert_eq!(forward, is_active(&f, &ids));
    }
}
