use docketapp::config::DocketConfig;
use docketapp::init::initialize;
use docketapp::model::{TemplateDefinition, SEED_ORDER_NUMBER, SEED_TEMPLATE_KEY};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

#[test]
fn seed_is_rendered_from_the_current_template() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().to_path_buf();

    let before = {
        let ctx = initialize(Some(data.clone())).unwrap();
        ctx.api.view_order(SEED_ORDER_NUMBER).unwrap().document.unwrap()
    };
    assert!(before.field("product_list").is_some());

    {
        let mut ctx = initialize(Some(data.clone())).unwrap();
        let slim = json!({
            "name": "Packing (slim)",
            "fields": [
                {"identifier": "order_number", "type": "text"},
                {"identifier": "vessel", "type": "text"}
            ]
        });
        ctx.api
            .save_template_json(SEED_TEMPLATE_KEY, &slim.to_string())
            .unwrap();
    }

    let ctx = initialize(Some(data)).unwrap();
    let after = ctx.api.view_order(SEED_ORDER_NUMBER).unwrap().document.unwrap();
    assert_eq!(after.fields.len(), 2);
    assert_eq!(after.fields[1].kind.value(), Some(&json!("Maersk Kensington")));
}

#[test]
fn placed_orders_are_frozen_snapshots() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().to_path_buf();

    {
        let ctx = initialize(Some(data.clone())).unwrap();
        ctx.api
            .place_order_json(
                "packingInstructions",
                "ORD-2024-01",
                r#"{"vessel": "Ever Given", "container_details": [{"marks_numbers": "EG 1-10", "unknown": 1}]}"#,
            )
            .unwrap();
    }

    {
        let mut ctx = initialize(Some(data.clone())).unwrap();
        ctx.api
            .save_template("packingInstructions", TemplateDefinition::new("Blank", vec![]))
            .unwrap();
    }

    let ctx = initialize(Some(data.clone())).unwrap();
    let document = ctx.api.view_order("ORD-2024-01").unwrap().document.unwrap();
    assert_eq!(
        document.field("vessel").unwrap().kind.value(),
        Some(&json!("Ever Given"))
    );

    let containers = document.field("container_details").unwrap().kind.as_table().unwrap();
    assert_eq!(containers.rows.len(), 1);
    assert_eq!(containers.rows[0].cells.len(), 1);
    assert_eq!(containers.row_order.as_ref().unwrap().len(), 1);

    // Stored as plain JSON in the data dir
    let raw: Value = serde_json::from_str(&fs::read_to_string(data.join("orders.json")).unwrap()).unwrap();
    assert_eq!(raw[0]["orderNumber"], json!("ORD-2024-01"));
    assert_eq!(raw[0]["templateKey"], json!("packingInstructions"));
    assert!(raw[0].get("isStatic").is_none());
}

#[test]
fn orders_can_be_deleted_but_seed_stays() {
    let dir = TempDir::new().unwrap();
    let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();

    ctx.api.place_order_json("templateOne", "A", "{}").unwrap();
    ctx.api.place_order_json("templateTwo", "B", "{}").unwrap();
    ctx.api.delete_order("A").unwrap();
    ctx.api.delete_order(SEED_ORDER_NUMBER).unwrap();

    let numbers: Vec<String> = ctx
        .api
        .list_orders()
        .unwrap()
        .orders
        .into_iter()
        .map(|o| o.order_number)
        .collect();
    assert_eq!(numbers, vec![SEED_ORDER_NUMBER, "B"]);
}

#[test]
fn corrupt_storage_degrades_to_seed_only() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("orders.json"), "[{ this is not json").unwrap();
    fs::write(dir.path().join("savedTemplates.json"), "nope").unwrap();

    let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
    let orders = ctx.api.list_orders().unwrap().orders;
    assert_eq!(orders.len(), 1);
    assert!(orders[0].is_static);

    assert!(ctx.api.place_order_json("templateOne", "C", "{}").is_err());
    assert!(ctx.api.view_order(SEED_ORDER_NUMBER).is_ok());
}

#[test]
fn export_writes_render_request() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("exports");
    let ctx = initialize(Some(dir.path().join("data"))).unwrap();
    assert_eq!(ctx.config, DocketConfig::default());

    let result = ctx
        .api
        .export_order(SEED_ORDER_NUMBER, Some(&out), dir.path())
        .unwrap();
    assert_eq!(result.paths[0], out.join("order-PKG-001.json"));

    let request: Value = serde_json::from_str(&fs::read_to_string(&result.paths[0]).unwrap()).unwrap();
    assert_eq!(request["mode"], json!("readonly"));
    assert_eq!(request["pageWidth"], json!(830));
    assert_eq!(request["orderNumber"], json!("PKG-001"));
    assert!(request["document"]["fields"].is_array());
}
