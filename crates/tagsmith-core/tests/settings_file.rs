use tagsmith_core::{Dialect, Settings, SettingsInput, TagNaming};

#[test]
fn settings_file_fills_missing_fields_with_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let contents = format!(
        r#"
db_type = "mysql"
db_name = "shop"
output_path = {:?}
output_format_tag = "o"

[tags]
structable = true
"#,
        dir.path().display().to_string()
    );

    let input: SettingsInput = toml::from_str(&contents).expect("parse settings file");
    assert_eq!(input.user, "postgres");
    assert_eq!(input.schema, "public");
    assert!(input.port.is_none());

    let settings = Settings::from_input(input).expect("valid settings");
    assert_eq!(settings.dialect, Dialect::Mysql);
    assert_eq!(settings.connection.database, "shop");
    assert_eq!(settings.connection.port, 3306);
    assert_eq!(settings.tag_naming, TagNaming::SnakeCase);
    assert!(settings.tags.structable);
    assert!(!settings.tags.sql);
}
