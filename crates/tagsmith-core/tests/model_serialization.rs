use tagsmith_core::{Column, Table};

#[test]
fn serializes_absent_metadata_as_null() {
    let mut table = Table::new("users");
    table
        .attach_columns(vec![
            Column::new(1, "id", "integer").with_constraint("users_pkey", "PRIMARY KEY"),
            Column::new(2, "bio", "text").nullable(true).with_default(""),
        ])
        .expect("ordered columns");

    let json = serde_json::to_value(&table).expect("serialize table");
    let id = &json["columns"][0];
    assert_eq!(id["default_value"], serde_json::Value::Null);
    assert_eq!(id["constraint_type"], "PRIMARY KEY");

    let bio = &json["columns"][1];
    assert_eq!(bio["default_value"], "");
    assert_eq!(bio["is_nullable"], true);
    assert_eq!(bio["character_maximum_length"], serde_json::Value::Null);

    let back: Table = serde_json::from_value(json).expect("deserialize table");
    assert_eq!(back, table);
}
