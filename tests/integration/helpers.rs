//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::{Body, Bytes};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use jewelbench_core::config::AppConfig;
use jewelbench_mesh::{IndexedMesh, Point3, stl};

const BOUNDARY: &str = "jewelbench-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Scratch directory used for staging and exports
    pub temp_dir: TempDir,
}

impl TestApp {
    /// Create a new test application with its own scratch directory
    pub fn new() -> Self {
        Self::with_max_upload(1024 * 1024)
    }

    /// Create a test application with a custom upload limit
    pub fn with_max_upload(max_upload_size_bytes: u64) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.storage.temp_dir = temp_dir.path().to_string_lossy().to_string();
        config.storage.max_upload_size_bytes = max_upload_size_bytes;

        let router = jewelbench_api::build_app(config.clone());

        Self {
            router,
            config,
            temp_dir,
        }
    }

    /// Number of files currently in the scratch directory
    pub fn scratch_file_count(&self) -> usize {
        std::fs::read_dir(self.temp_dir.path())
            .expect("Failed to read temp dir")
            .count()
    }

    /// Make a JSON request
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// POST a multipart form with an optional file and material
    pub async fn upload(
        &self,
        path: &str,
        file: Option<(&str, Vec<u8>)>,
        material: Option<&str>,
    ) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(file, material)))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Test response wrapper
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub bytes: Bytes,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
}

/// Binary STL for an axis-aligned cube
pub fn cube_stl(size: f64) -> Vec<u8> {
    stl::encode_binary(&IndexedMesh::cube(size))
}

/// Binary STL of a cube squashed onto the plane `z = 0`
pub fn flattened_cube_stl(size: f64) -> Vec<u8> {
    let mut mesh = IndexedMesh::cube(size);
    for p in &mut mesh.vertices {
        p.z = 0.0;
    }
    stl::encode_binary(&mesh)
}

/// Binary STL of one triangle listed with both windings, floating at `z`
pub fn double_sided_sheet_stl(z: f64) -> Vec<u8> {
    let mesh = IndexedMesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, z),
            Point3::new(10.0, 0.0, z),
            Point3::new(0.0, 10.0, z),
        ],
        vec![[0, 1, 2], [0, 2, 1]],
    );
    stl::encode_binary(&mesh)
}

/// Build a multipart/form-data body
pub fn multipart_body(file: Option<(&str, Vec<u8>)>, material: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(material) = material {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"material\"\r\n\r\n");
        body.extend_from_slice(material.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((file_name, data)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(&data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
