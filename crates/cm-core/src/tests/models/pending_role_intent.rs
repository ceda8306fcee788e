use crate::{INTENT_SCHEMA_VERSION, PendingRoleIntent, Role};

use uuid::Uuid;

#[test]
fn test_pending_role_intent_new() {
    let id = Uuid::new_v4();
    let intent = PendingRoleIntent::new(id, "ada@campus.edu".to_string(), Role::Vendor);

    assert_eq!(intent.identity_id, id);
    assert_eq!(intent.declared_role, Role::Vendor);
    assert_eq!(intent.email, "ada@campus.edu");
    assert_eq!(intent.schema_version, INTENT_SCHEMA_VERSION);
}

#[test]
fn test_pending_role_intent_roundtrip() {
    let intent = PendingRoleIntent::new(Uuid::new_v4(), "ada@campus.edu".to_string(), Role::Admin);

    let json = serde_json::to_string(&intent).unwrap();
    let parsed: PendingRoleIntent = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, intent);
}

#[test]
fn test_pending_role_intent_missing_schema_version_defaults() {
    // Files written before the version field existed must still load.
    let json = format!(
        r#"{{"identity_id":"{}","declared_role":"courier","email":"kay@campus.edu","created_at":"2026-01-10T08:00:00Z"}}"#,
        Uuid::new_v4()
    );

    let parsed: PendingRoleIntent = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.schema_version, 1);
    assert_eq!(parsed.declared_role, Role::Courier);
}
