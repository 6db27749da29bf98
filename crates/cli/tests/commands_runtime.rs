use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};
use solocart_cli::commands::{config, pools, recommend};
use tempfile::TempDir;

fn write_snapshots(dir: &TempDir) -> (PathBuf, PathBuf) {
    let categories = ["신선식품", "가공식품", "주방용품", "생활용품"];
    let mut products = Vec::new();
    for (slot, category) in categories.iter().enumerate() {
        for i in 0..20u64 {
            products.push(json!({
                "id": (slot as u64) * 100 + i,
                "name": match i % 3 {
                    0 => format!("1인용 {category} 상품 {i}"),
                    1 => format!("간편 {category} 상품 {i}"),
                    _ => format!("{category} 상품 {i}"),
                },
                "price": 2_000 + (i as u32) * 1_500,
                "large_category": category,
            }));
        }
    }

    let activity = json!([
        {
            "user_id": 42,
            "birth": "1998-03-11",
            "gender": "F",
            "base_interest_category": "가공식품",
            "search_keywords": ["간편", "미니"],
            "favorite_product_ids": [100],
            "clicked_categories": ["가공식품"]
        }
    ]);

    let catalog_path = dir.path().join("products.json");
    let profiles_path = dir.path().join("profiles.json");
    fs::write(&catalog_path, serde_json::to_string(&json!(products)).unwrap()).unwrap();
    fs::write(&profiles_path, serde_json::to_string(&activity).unwrap()).unwrap();
    (catalog_path, profiles_path)
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output must be valid JSON")
}

#[test]
fn recommend_returns_a_full_batch_for_a_known_user() {
    let dir = TempDir::new().unwrap();
    let (catalog, profiles) = write_snapshots(&dir);

    let result = recommend::run(&recommend::RecommendArgs {
        catalog,
        profiles,
        user: 42,
        top_k: None,
        config: None,
        new_user: false,
    });
    assert_eq!(result.exit_code, 0, "expected successful recommendation run");

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "recommend");
    assert_eq!(payload["status"], "ok");

    let batch = &payload["data"];
    assert_eq!(batch["user_id"], 42);
    let recommendations = batch["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 4);
    for entry in recommendations {
        assert_eq!(entry["user_type"], "single_household_optimized");
    }
}

#[test]
fn recommend_fails_cleanly_on_missing_snapshot() {
    let dir = TempDir::new().unwrap();
    let (_, profiles) = write_snapshots(&dir);

    let result = recommend::run(&recommend::RecommendArgs {
        catalog: dir.path().join("absent.json"),
        profiles,
        user: 42,
        top_k: None,
        config: None,
        new_user: false,
    });
    assert_eq!(result.exit_code, 3);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error_class"], "snapshot_io");
}

#[test]
fn recommend_for_unknown_user_returns_empty_batch() {
    let dir = TempDir::new().unwrap();
    let (catalog, profiles) = write_snapshots(&dir);

    let result = recommend::run(&recommend::RecommendArgs {
        catalog,
        profiles,
        user: 9_999,
        top_k: None,
        config: None,
        new_user: false,
    });
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    let recommendations = payload["data"]["recommendations"].as_array().unwrap();
    assert!(recommendations.is_empty());
}

#[test]
fn new_user_flag_requires_an_activity_record() {
    let dir = TempDir::new().unwrap();
    let (catalog, profiles) = write_snapshots(&dir);

    let result = recommend::run(&recommend::RecommendArgs {
        catalog,
        profiles,
        user: 9_999,
        top_k: None,
        config: None,
        new_user: true,
    });
    assert_eq!(result.exit_code, 4);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "unknown_user");
}

#[test]
fn pools_reports_sizes_per_target_category() {
    let dir = TempDir::new().unwrap();
    let (catalog, _) = write_snapshots(&dir);

    let result = pools::run(&catalog, None);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "pools");
    assert_eq!(payload["data"]["catalog_size"], 80);
    let entries = payload["data"]["pools"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    for entry in entries {
        assert!(entry["size"].as_u64().unwrap() > 0);
    }
}

#[test]
fn config_command_shows_defaults_without_a_path() {
    let result = config::run(None);
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["command"], "config");
    assert_eq!(payload["data"]["top_k"], 4);
    assert_eq!(payload["data"]["pool"]["cap"], 80);
}

#[test]
fn config_command_rejects_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    fs::write(&path, "[pool]\npercentile_cutoff = 2.0\n").unwrap();

    let result = config::run(Some(path.as_path()));
    assert_eq!(result.exit_code, 2);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["error_class"], "config_validation");
}
