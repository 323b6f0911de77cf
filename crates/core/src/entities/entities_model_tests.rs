//! Tests for entity identity keys and check-digit computation.

use crate::entities::{
    compute_check_digit, format_nit, normalize_name_key, normalize_published_nit, Entity,
    EntityClass,
};

fn coop_a() -> Entity {
    Entity {
        nit: "900123456".to_string(),
        check_digit: 7,
        legal_name: "Cooperativa A".to_string(),
        short_name: "Coop A".to_string(),
        class: EntityClass::Solidaria,
        supervisory_code: None,
    }
}

#[test]
fn test_format_nit_groups_of_three() {
    assert_eq!(format_nit("900123456", 7), "900-123-456-7");
}

#[test]
fn test_format_nit_pads_short_identifiers() {
    assert_eq!(format_nit("1234567", 3), "001-234-567-3");
}

#[test]
fn test_format_nit_keeps_digits_beyond_nine() {
    // Ten-digit identifiers must not lose their leading digit.
    assert_eq!(format_nit("1234567890", 5), "1-234-567-890-5");
}

#[test]
fn test_long_identifier_keys_agree_on_digits() {
    let digits = "1234567890";
    let dv = compute_check_digit(digits).unwrap();
    let key = format_nit(digits, dv);
    let key_digits: String = key
        .rsplit_once('-')
        .map(|(base, _)| base.chars().filter(|c| c.is_ascii_digit()).collect())
        .unwrap();
    assert_eq!(key_digits, digits);
    assert_eq!(normalize_published_nit(digits).as_deref(), Some(key.as_str()));
}

#[test]
fn test_formatted_nit_uses_declared_check_digit() {
    assert_eq!(coop_a().formatted_nit(), "900-123-456-7");
}

#[test]
fn test_compute_check_digit_known_value() {
    // 800197268 carries the well-known check digit 4.
    assert_eq!(compute_check_digit("800197268"), Some(4));
    assert_eq!(compute_check_digit("900123456"), Some(8));
}

#[test]
fn test_compute_check_digit_rejects_empty() {
    assert_eq!(compute_check_digit(""), None);
    assert_eq!(compute_check_digit("no digits"), None);
}

#[test]
fn test_normalize_published_nit_with_suffix() {
    assert_eq!(
        normalize_published_nit("900123456-7").as_deref(),
        Some("900-123-456-7")
    );
}

#[test]
fn test_normalize_published_nit_without_suffix_computes_digit() {
    assert_eq!(
        normalize_published_nit("800197268").as_deref(),
        Some("800-197-268-4")
    );
}

#[test]
fn test_normalize_published_nit_empty() {
    assert_eq!(normalize_published_nit("  "), None);
}

#[test]
fn test_name_key_is_trimmed_uppercase() {
    assert_eq!(normalize_name_key("  Cooperativa A "), "COOPERATIVA A");
    assert_eq!(coop_a().name_key(), "COOPERATIVA A");
}

#[test]
fn test_entity_class_codes_round_trip() {
    assert_eq!(EntityClass::from_code(1), Some(EntityClass::Financiera));
    assert_eq!(EntityClass::from_code(2), Some(EntityClass::Solidaria));
    assert_eq!(EntityClass::from_code(9), None);
    assert_eq!(EntityClass::Solidaria.code(), 2);
}

#[test]
fn test_entity_class_serialization() {
    assert_eq!(
        serde_json::to_string(&EntityClass::Solidaria).unwrap(),
        "\"SOLIDARIA\""
    );
    assert_eq!(
        serde_json::from_str::<EntityClass>("\"FINANCIERA\"").unwrap(),
        EntityClass::Financiera
    );
}
