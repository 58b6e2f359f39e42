//! Integration tests for material listing, upload valuation and quotes.

mod helpers;

use serde_json::json;

#[tokio::test]
async fn test_health_reports_engine() {
    let app = helpers::TestApp::new();

    let resp = app.request("GET", "/api/health", None).await;

    assert_eq!(resp.status, 200);
    assert_eq!(resp.body["success"], true);
    assert_eq!(resp.body["data"]["status"], "ok");
    assert_eq!(resp.body["data"]["engine"], "O.R.I.O.N.");
}

#[tokio::test]
async fn test_list_materials() {
    let app = helpers::TestApp::new();

    let resp = app.request("GET", "/api/materials", None).await;

    assert_eq!(resp.status, 200);
    let materials = resp.body["data"].as_array().expect("materials array");
    assert_eq!(materials.len(), 5);

    let gold = materials
        .iter()
        .find(|m| m["material"] == "Gold 18K")
        .expect("Gold 18K listed");
    assert_eq!(gold["density_g_cm3"], 15.58);
    assert_eq!(gold["spot_price_display"], "₹5,680.00/g");
}

#[tokio::test]
async fn test_evaluate_cube_upload() {
    let app = helpers::TestApp::new();

    let resp = app
        .upload(
            "/api/valuations",
            Some(("ring.stl", helpers::cube_stl(10.0))),
            Some("Gold 18K"),
        )
        .await;

    assert_eq!(resp.status, 200, "body: {}", resp.body);
    let data = &resp.body["data"];
    assert_eq!(data["material"], "Gold 18K");
    assert_eq!(data["metrics"]["vertex_count"], 8);
    assert_eq!(data["metrics"]["face_count"], 12);
    assert_eq!(data["metrics"]["is_manifold"], true);

    let volume = data["metrics"]["volume_mm3"].as_f64().unwrap();
    approx::assert_relative_eq!(volume, 1000.0, epsilon = 1e-9);
    let weight = data["valuation"]["weight_g"].as_f64().unwrap();
    approx::assert_relative_eq!(weight, 15.58, epsilon = 1e-9);

    assert_eq!(data["display"]["volume"], "1000.00 mm³");
    assert_eq!(data["display"]["manifold"], "Valid");
    assert_eq!(data["display"]["total_value"], "₹88,494.40");

    assert_eq!(app.scratch_file_count(), 0);
}

async fn assert_zero_volume_upload(file_name: &str, data: Vec<u8>) {
    let app = helpers::TestApp::new();

    let resp = app
        .upload("/api/valuations", Some((file_name, data)), Some("Gold 22K"))
        .await;

    assert_eq!(resp.status, 200, "body: {}", resp.body);
    let data = &resp.body["data"];
    let volume = data["metrics"]["volume_mm3"].as_f64().unwrap();
    approx::assert_abs_diff_eq!(volume, 0.0, epsilon = 1e-9);
    assert_eq!(data["metrics"]["is_manifold"], false);
    assert_eq!(data["valuation"]["weight_g"], 0.0);
    assert_eq!(data["valuation"]["total_value"], 0.0);
    assert_eq!(data["display"]["manifold"], "Repair Needed");
    assert_eq!(data["display"]["total_value"], "₹0.00");
    assert_eq!(app.scratch_file_count(), 0);
}

#[tokio::test]
async fn test_evaluate_flattened_cube_needs_repair() {
    assert_zero_volume_upload("flat.stl", helpers::flattened_cube_stl(10.0)).await;
}

#[tokio::test]
async fn test_evaluate_double_sided_sheet_needs_repair() {
    assert_zero_volume_upload("sheet.stl", helpers::double_sided_sheet_stl(5.0)).await;
}

#[tokio::test]
async fn test_evaluate_garbage_is_engine_error() {
    let app = helpers::TestApp::new();

    let resp = app
        .upload(
            "/api/valuations",
            Some(("broken.stl", b"definitely not triangles".to_vec())),
            Some("Platinum"),
        )
        .await;

    assert_eq!(resp.status, 422);
    assert_eq!(resp.body["error"], "ENGINE_ERROR");
    assert!(
        resp.body["message"]
            .as_str()
            .unwrap()
            .starts_with("Engine Error: ")
    );
    assert_eq!(app.scratch_file_count(), 0);
}

#[tokio::test]
async fn test_evaluate_unknown_material() {
    let app = helpers::TestApp::new();

    let resp = app
        .upload(
            "/api/valuations",
            Some(("ring.stl", helpers::cube_stl(1.0))),
            Some("Unobtainium"),
        )
        .await;

    assert_eq!(resp.status, 400);
    assert_eq!(resp.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_evaluate_rejects_other_extensions() {
    let app = helpers::TestApp::new();

    let resp = app
        .upload(
            "/api/valuations",
            Some(("ring.obj", helpers::cube_stl(1.0))),
            Some("Gold 22K"),
        )
        .await;

    assert_eq!(resp.status, 400);
    assert_eq!(app.scratch_file_count(), 0);
}

#[tokio::test]
async fn test_evaluate_requires_file() {
    let app = helpers::TestApp::new();

    let resp = app
        .upload("/api/valuations", None, Some("Gold 22K"))
        .await;

    assert_eq!(resp.status, 400);
    assert_eq!(resp.body["message"], "file is required");
}

#[tokio::test]
async fn test_quote_volume() {
    let app = helpers::TestApp::new();

    let resp = app
        .request(
            "POST",
            "/api/valuations/quote",
            Some(json!({ "volume_mm3": 1000.0, "material": "Gold 18K" })),
        )
        .await;

    assert_eq!(resp.status, 200);
    let total = resp.body["data"]["total_value"].as_f64().unwrap();
    approx::assert_relative_eq!(total, 88_494.4, epsilon = 1e-6);
}

#[tokio::test]
async fn test_quote_rejects_negative_volume() {
    let app = helpers::TestApp::new();

    let resp = app
        .request(
            "POST",
            "/api/valuations/quote",
            Some(json!({ "volume_mm3": -5.0, "material": "Silver 925" })),
        )
        .await;

    assert_eq!(resp.status, 400);
    assert_eq!(resp.body["error"], "VALIDATION_ERROR");
}
