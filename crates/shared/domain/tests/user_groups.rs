use serde_json::json;
use toggle_domain::{Feature, UserGroups, UserGroupsRecord};

#[test]
fn stored_shape_is_list_and_regex() {
    let groups = UserGroups::new(["admin", "editor"], Some(".*admin.*")).unwrap();
    let value = serde_json::to_value(&groups).unwrap();
    assert_eq!(value, json!({ "list": ["admin", "editor"], "regex": ".*admin.*" }));
}

#[test]
fn missing_regex_is_omitted_and_missing_list_defaults() {
    let groups = UserGroups::from_list(["admin"]);
    assert_eq!(serde_json::to_value(&groups).unwrap(), json!({ "list": ["admin"] }));

    let parsed: UserGroups = serde_json::from_value(json!({ "regex": "^ops" })).unwrap();
    assert!(parsed.list().is_empty());
    assert_eq!(parsed.pattern().map(toggle_domain::Pattern::as_str), Some("^ops"));
}

#[test]
fn record_conversion_keeps_pattern_source() {
    let groups = UserGroups::new(["a"], Some("b+")).unwrap();
    let record = UserGroupsRecord::from(groups.clone());
    assert_eq!(record.regex.as_deref(), Some("b+"));
    assert_eq!(UserGroups::try_from(record).unwrap(), groups);
}

#[test]
fn wibble_feature_round_trips_through_json() {
    let feature = Feature {
        group: "wibble".into(),
        name: "feat".into(),
        description: String::new(),
        enabled: true,
        user_groups: UserGroups::new(["admin", "editor"], Some(".*admin.*")).unwrap(),
    };

    let text = serde_json::to_string(&feature).unwrap();
    let back: Feature = serde_json::from_str(&text).unwrap();
    assert_eq!(back, feature);
}

#[test]
fn invalid_stored_pattern_is_rejected() {
    let err = serde_json::from_value::<UserGroups>(json!({ "list": [], "regex": "[a-" }));
    assert!(err.is_err());
}
