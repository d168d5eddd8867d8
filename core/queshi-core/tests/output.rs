use queshi_core::output::{write_json_pretty, write_ndjson};
use queshi_core::{Catalog, Recipe, TagSet};

#[test]
fn writes_ndjson_one_object_per_line() {
    let recipes = sample_recipes();
    let refs: Vec<&Recipe> = recipes.iter().collect();
    let mut buf = Vec::new();

    write_ndjson(&refs, &mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf8");
    let lines: Vec<&str> = text.trim_end().split('\n').collect();

    assert_eq!(lines.len(), 2);
    for line in lines {
        serde_json::from_str::<serde_json::Value>(line).expect("valid json line");
    }
}

#[test]
fn ndjson_keeps_source_field_order() {
    let (catalog, _) = Catalog::from_json_str(
        r#"[{"name":"a","tags":"x","price":1,"season":"夏","rare":true}]"#,
    )
    .expect("parse");
    let refs: Vec<&Recipe> = catalog.iter().collect();
    let mut buf = Vec::new();

    write_ndjson(&refs, &mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf8");

    assert_eq!(
        text,
        "{\"name\":\"a\",\"tags\":[\"x\"],\"price\":1,\"season\":\"夏\",\"rare\":true}\n"
    );
}

#[test]
fn writes_pretty_json_array() {
    let recipes = sample_recipes();
    let refs: Vec<&Recipe> = recipes.iter().collect();
    let mut buf = Vec::new();

    write_json_pretty(&refs, &mut buf).expect("write");
    let text = String::from_utf8(buf).expect("utf8");

    let parsed: serde_json::Value = serde_json::from_str(&text).expect("json array");
    let array = parsed.as_array().expect("array");
    assert_eq!(array.len(), 2);
    assert_eq!(array[0]["tags"], serde_json::json!(["下饭", "辣"]));
    assert_eq!(array[1]["tags"], serde_json::Value::Null);
    assert_eq!(array[1]["price"], serde_json::json!(5));
}

fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("麻婆豆腐", Some(TagSet::from_text("辣，下饭"))).with_field("price", 45),
        Recipe::new("白饭", None).with_field("price", 5),
    ]
}
