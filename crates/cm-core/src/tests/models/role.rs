use crate::Role;

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Student.as_str(), "student");
    assert_eq!(Role::Vendor.as_str(), "vendor");
    assert_eq!(Role::Admin.as_str(), "admin");
    assert_eq!(Role::Moderator.as_str(), "moderator");
    assert_eq!(Role::Support.as_str(), "support");
    assert_eq!(Role::Courier.as_str(), "courier");
}

#[test]
fn test_role_from_str() {
    for role in Role::ALL {
        assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
    }
    assert!(Role::from_str("superuser").is_err());
    assert!(Role::from_str("Student").is_err());
    assert!(Role::from_str("").is_err());
}

#[test]
fn test_role_default_is_student() {
    assert_eq!(Role::default(), Role::Student);
}

#[test]
fn test_role_is_operational() {
    assert!(Role::Admin.is_operational());
    assert!(Role::Moderator.is_operational());
    assert!(Role::Support.is_operational());
    assert!(!Role::Student.is_operational());
    assert!(!Role::Vendor.is_operational());
    assert!(!Role::Courier.is_operational());
}

#[test]
fn test_role_wire_form_is_snake_case() {
    assert_eq!(serde_json::to_string(&Role::Vendor).unwrap(), "\"vendor\"");

    let parsed: Role = serde_json::from_str("\"moderator\"").unwrap();
    assert_eq!(parsed, Role::Moderator);
}
