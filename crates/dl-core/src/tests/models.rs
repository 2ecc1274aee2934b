use crate::{User, UserStatus};

use std::str::FromStr;

#[test]
fn test_user_new() {
    let user = User::new(5, "u5", "p5");

    assert_eq!(user.id, 5);
    assert_eq!(user.username, "u5");
    assert_eq!(user.password, "p5");
    assert_eq!(user.mobile, None);
    assert_eq!(user.email, None);
    assert_eq!(user.status, UserStatus::Active);
    assert_eq!(user.created_at, user.updated_at);
    assert!(user.is_active());
}

#[test]
fn test_user_touch_moves_updated_at() {
    let mut user = User::new(1, "u1", "p1");
    let created = user.created_at;

    user.touch();

    assert_eq!(user.created_at, created);
    assert!(user.updated_at >= created);
}

#[test]
fn test_user_json_round_trip() {
    let mut user = User::new(2, "u2", "p2");
    user.email = Some("u2@example.com".to_string());
    user.status = UserStatus::Disabled;

    let json = serde_json::to_string(&user).unwrap();
    let back: User = serde_json::from_str(&json).unwrap();

    assert_eq!(back, user);
}

#[test]
fn test_user_status_as_str() {
    assert_eq!(UserStatus::Active.as_str(), "active");
    assert_eq!(UserStatus::Disabled.as_str(), "disabled");
}

#[test]
fn test_user_status_from_str() {
    assert_eq!(UserStatus::from_str("active").unwrap(), UserStatus::Active);
    assert_eq!(
        UserStatus::from_str("disabled").unwrap(),
        UserStatus::Disabled
    );
    assert!(UserStatus::from_str("suspended").is_err());
}

#[test]
fn test_user_status_serde_snake_case() {
    let json = serde_json::to_string(&UserStatus::Active).unwrap();
    assert_eq!(json, "\"active\"");
}
