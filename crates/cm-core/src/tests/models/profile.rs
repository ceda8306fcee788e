use crate::{Profile, ProfileUpsert, Role};

use uuid::Uuid;

#[test]
fn test_profile_deserializes_minimal_row() {
    // Rows fresh from the trigger carry only the required columns.
    let json = format!(
        r#"{{"id":"{}","email":"ada@campus.edu","role":"student","created_at":"2026-01-10T08:00:00Z","updated_at":"2026-01-10T08:00:00Z"}}"#,
        Uuid::new_v4()
    );

    let profile: Profile = serde_json::from_str(&json).unwrap();
    assert_eq!(profile.role, Role::Student);
    assert_eq!(profile.display_name, None);
    assert_eq!(profile.college_id, None);
}

#[test]
fn test_profile_ignores_unknown_columns() {
    let json = format!(
        r#"{{"id":"{}","email":"ada@campus.edu","role":"vendor","created_at":"2026-01-10T08:00:00Z","updated_at":"2026-01-10T08:00:00Z","loyalty_points":42}}"#,
        Uuid::new_v4()
    );

    let profile: Profile = serde_json::from_str(&json).unwrap();
    assert_eq!(profile.role, Role::Vendor);
}

#[test]
fn test_profile_upsert_serializes_restricted_columns() {
    let id = Uuid::new_v4();
    let row = ProfileUpsert::new(id, "ada@campus.edu".to_string(), Role::Vendor);

    let value = serde_json::to_value(&row).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), 3);
    assert_eq!(object["id"], id.to_string());
    assert_eq!(object["email"], "ada@campus.edu");
    assert_eq!(object["role"], "vendor");
}
