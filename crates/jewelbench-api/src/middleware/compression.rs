//! Response compression layer.

use tower_http::compression::CompressionLayer;

/// Builds a compression layer (gzip) for JSON responses.
pub fn build_compression_layer() -> CompressionLayer {
    CompressionLayer::new().gzip(true)
}
