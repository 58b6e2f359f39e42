//! Integration tests for the layered CAD export download.

mod helpers;

use jewelbench_cad::{CadDocument, Color, codec};

#[tokio::test]
async fn test_export_cube_download() {
    let app = helpers::TestApp::new();

    let resp = app
        .upload(
            "/api/exports",
            Some(("ring.stl", helpers::cube_stl(10.0))),
            Some("Gold 18K"),
        )
        .await;

    assert_eq!(resp.status, 200, "body: {}", resp.body);
    assert_eq!(
        resp.headers["content-type"].to_str().unwrap(),
        "model/3mf"
    );
    assert_eq!(
        resp.headers["content-disposition"].to_str().unwrap(),
        "attachment; filename=\"jewelbench_Gold_18K.3mf\""
    );

    let doc = codec::decode(&resp.bytes).expect("valid document");
    assert_eq!(doc.layers.len(), 3);
    assert_eq!(doc.layers[0].name, "Metal");
    assert_eq!(doc.layers[0].color, Color::GOLD);
    assert_eq!(doc.layers[1].name, "Stones");
    assert_eq!(doc.layers[2].name, "Prongs");

    let metal: Vec<_> = doc.objects_on_layer(CadDocument::METAL_LAYER).collect();
    assert_eq!(metal.len(), 1);
    assert_eq!(metal[0].vertices.len(), 8);
    assert_eq!(metal[0].faces.len(), 12);
    assert_eq!(metal[0].metadata("material"), Some("Gold 18K"));
    assert_eq!(doc.objects_on_layer(CadDocument::STONES_LAYER).count(), 0);

    let volume = metal[0].to_mesh().volume();
    approx::assert_relative_eq!(volume, 1000.0, epsilon = 1e-9);

    // Neither the staged upload nor the export outlives the request
    assert_eq!(app.scratch_file_count(), 0);
}

#[tokio::test]
async fn test_export_garbage_is_engine_error() {
    let app = helpers::TestApp::new();

    let resp = app
        .upload(
            "/api/exports",
            Some(("broken.stl", vec![0xAB; 120])),
            Some("Gold 24K"),
        )
        .await;

    assert_eq!(resp.status, 422);
    assert_eq!(resp.body["error"], "ENGINE_ERROR");
    assert_eq!(app.scratch_file_count(), 0);
}

#[tokio::test]
async fn test_export_over_size_limit_is_rejected() {
    let app = helpers::TestApp::with_max_upload(100);

    let resp = app
        .upload(
            "/api/exports",
            Some(("ring.stl", helpers::cube_stl(10.0))),
            Some("Platinum"),
        )
        .await;

    assert_eq!(resp.status, 413);
    assert_eq!(resp.body["error"], "PAYLOAD_TOO_LARGE");
    assert_eq!(app.scratch_file_count(), 0);
}

#[tokio::test]
async fn test_export_body_past_transport_limit_is_payload_too_large() {
    let app = helpers::TestApp::with_max_upload(100);

    // Larger than the limit plus the multipart allowance, so the body
    // limit trips while the file field is streamed
    let resp = app
        .upload(
            "/api/exports",
            Some(("huge.stl", vec![b's'; 200 * 1024])),
            Some("Platinum"),
        )
        .await;

    assert_eq!(resp.status, 413, "body: {}", resp.body);
    assert_eq!(resp.body["error"], "PAYLOAD_TOO_LARGE");
    assert_eq!(app.scratch_file_count(), 0);
}
