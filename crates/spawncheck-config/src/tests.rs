use super::*;

#[test]
fn test_defaults_match_known_format() {
    let config = AuditConfig::default();
    assert!(config.projection.is_whitelisted("FVRObject"));
    assert!(config.projection.is_whitelisted("ItemSpawnerID"));
    assert!(config.projection.is_whitelisted("ObjectTableDef"));
    assert!(!config.projection.is_whitelisted("FVRFireArm"));

    assert_eq!(
        config.projection.key_columns.get("ObjectTableDef"),
        Some(&"m_Name".to_string())
    );
    assert!(config
        .projection
        .ignored_fields
        .contains(&"m_Script".to_string()));

    assert_eq!(config.report.category, 1);
    assert_eq!(config.report.skip_tables, vec!["FA_ALL".to_string()]);
    config.validate().unwrap();
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = AuditConfig::from_toml_str(
        r#"
        [report]
        category = 2
        "#,
    )
    .unwrap();
    assert_eq!(config.report.category, 2);
    assert_eq!(config.report.skip_tables, vec!["FA_ALL".to_string()]);
    assert!(config.projection.is_whitelisted("FVRObject"));
}

#[test]
fn test_custom_projection() {
    let config = AuditConfig::from_toml_str(
        r#"
        [projection]
        record_kinds = ["FVRObject"]
        ignored_fields = []

        [projection.key_columns]
        FVRObject = "ItemID"
        "#,
    )
    .unwrap();
    assert!(!config.projection.is_whitelisted("ObjectTableDef"));
    assert!(config.projection.ignored_fields.is_empty());
}

#[test]
fn test_empty_whitelist_rejected() {
    let err = AuditConfig::from_toml_str(
        r#"
        [projection]
        record_kinds = []
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_key_column_outside_whitelist_rejected() {
    let err = AuditConfig::from_toml_str(
        r#"
        [projection]
        record_kinds = ["FVRObject"]

        [projection.key_columns]
        ObjectTableDef = "m_Name"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_invalid_toml_rejected() {
    assert!(matches!(
        AuditConfig::from_toml_str("not toml at all ["),
        Err(ConfigError::Toml(_))
    ));
}
