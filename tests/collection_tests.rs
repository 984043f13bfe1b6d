//! End-to-end tests: group, combine and stamp schema objects.

use schema_collection::{
    combine_schemas, group_by_title, load_documents, set_package_name, version_schemas,
    CollectionConfig, ObjectSchema, Required, SchemaError, SchemaRegistry,
};
use serde_json::json;

fn from_json(value: serde_json::Value) -> ObjectSchema {
    serde_json::from_value(value).unwrap()
}

fn widget_v100() -> ObjectSchema {
    from_json(json!({
        "version": { "major": 1, "minor": 0, "patch": 0 },
        "schema": {
            "title": "Widget",
            "type": "object",
            "properties": { "x": { "type": "number" } },
            "required": true
        },
        "example": { "x": 1 }
    }))
}

fn widget_v110() -> ObjectSchema {
    from_json(json!({
        "version": { "major": 1, "minor": 1, "patch": 0 },
        "schema": {
            "title": "Widget",
            "type": "object",
            "properties": { "x": { "type": "number" }, "y": { "type": "number" } },
            "required": false
        },
        "example": { "x": 1, "y": 2 }
    }))
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn test_widget_group_combine_stamp() {
    let versioned = version_schemas(vec![widget_v100(), widget_v110()]).unwrap();
    let mut collection = combine_schemas([versioned]);
    set_package_name(&mut collection, "my-pkg");

    assert_eq!(collection.keys().collect::<Vec<_>>(), vec!["widget"]);
    let widget = &collection["widget"];
    assert_eq!(widget.keys().collect::<Vec<_>>(), vec!["1.0.0", "1.1.0"]);

    assert_eq!(
        widget["1.0.0"].schema.required,
        Some(Required::Fields(vec!["x".to_string()]))
    );
    assert_eq!(widget["1.1.0"].schema.required, Some(Required::None));
    assert_eq!(widget["1.0.0"].package.as_deref(), Some("my-pkg"));
    assert_eq!(widget["1.1.0"].package.as_deref(), Some("my-pkg"));
}

#[test]
fn test_widget_collection_serializes_back_to_json() {
    let mut collection = combine_schemas([version_schemas(vec![widget_v100(), widget_v110()]).unwrap()]);
    set_package_name(&mut collection, "my-pkg");

    let value = serde_json::to_value(&collection).unwrap();
    assert_eq!(value["widget"]["1.0.0"]["schema"]["required"], json!(["x"]));
    assert_eq!(value["widget"]["1.1.0"]["schema"]["required"], json!(false));
    assert_eq!(value["widget"]["1.1.0"]["example"], json!({ "x": 1, "y": 2 }));
    assert_eq!(value["widget"]["1.0.0"]["package"], json!("my-pkg"));
    assert_eq!(value["widget"]["1.0.0"]["version"], json!({ "major": 1, "minor": 0, "patch": 0 }));
}

#[test]
fn test_stamp_preserves_prior_provenance() {
    let mut core = widget_v100();
    core.package = Some("core".to_string());

    let mut collection = combine_schemas([version_schemas(vec![core, widget_v110()]).unwrap()]);
    set_package_name(&mut collection, "other");
    set_package_name(&mut collection, "third");

    assert_eq!(collection["widget"]["1.0.0"].package.as_deref(), Some("core"));
    assert_eq!(collection["widget"]["1.1.0"].package.as_deref(), Some("other"));
}

#[test]
fn test_mismatched_titles_fail_before_grouping() {
    let mut gadget = widget_v110();
    gadget.schema.title = "Gadget".to_string();

    let result = version_schemas(vec![widget_v100(), gadget]);
    assert!(matches!(result, Err(SchemaError::TitleMismatch { .. })));
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_directory_to_registry() {
    let dir = tempfile::tempdir().unwrap();
    let invitation = json!({
        "version": { "major": 2, "minor": 0, "patch": 0 },
        "schema": {
            "title": "membership_invitation",
            "type": "object",
            "properties": { "email": { "type": "string", "format": "email" } },
            "required": true,
            "additionalProperties": false
        },
        "example": { "email": "joe@example.com" }
    });
    std::fs::write(
        dir.path().join("widget.json"),
        json!([widget_v100(), widget_v110()]).to_string(),
    )
    .unwrap();
    std::fs::write(dir.path().join("invitation.json"), invitation.to_string()).unwrap();

    let config = CollectionConfig::default();
    let schemas = load_documents(dir.path(), &config.loader).unwrap();

    let mut registry = SchemaRegistry::new();
    for group in group_by_title(schemas) {
        registry.register(group).unwrap();
    }
    registry.stamp("loaded");

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.versions("widget"), vec!["1.0.0", "1.1.0"]);

    let invitation = registry.latest("membershipInvitation").unwrap();
    assert_eq!(
        invitation.schema.required,
        Some(Required::Fields(vec!["email".to_string()]))
    );
    assert_eq!(invitation.package.as_deref(), Some("loaded"));
}
