//! 3MF package codec for layered jewelry documents.
//!
//! A 3MF file is a ZIP package holding three parts:
//!
//! ```text
//! [Content_Types].xml   content types of the parts
//! _rels/.rels           points at the model part
//! 3D/3dmodel.model      the model XML (3MF core 1.2, 2015/02 namespace)
//! ```
//!
//! Layers are stored as one `<basematerials>` group whose `<base>` entries
//! carry the layer name and `displaycolor`, in layer-index order. Each mesh
//! object references its layer through `pid`/`pindex` and keeps its
//! metadata in a `<metadatagroup>` under the `jewelbench` namespace.
//! Coordinates are millimeters and are written in their shortest
//! round-trip decimal form.

mod reader;
mod writer;

pub use reader::decode;
pub use writer::encode;

/// 3MF core specification namespace.
pub const CORE_NAMESPACE: &str = "http://schemas.microsoft.com/3dmanufacturing/core/2015/02";

/// Namespace of JewelBench object metadata.
pub const METADATA_NAMESPACE: &str = "http://schemas.jewelbench.dev/3mf/metadata/2026";

/// Prefix bound to [`METADATA_NAMESPACE`].
pub const METADATA_PREFIX: &str = "jewelbench";

/// Path of the model part inside the package.
pub const MODEL_PATH: &str = "3D/3dmodel.model";

const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

const RELS_PATH: &str = "_rels/.rels";

/// Resource id of the base-material group that holds the layers.
const LAYER_GROUP_ID: u32 = 1;

/// Object ids start after the layer group.
const FIRST_OBJECT_ID: u32 = 2;

/// Largest model part the reader will inflate.
const MAX_MODEL_BYTES: u64 = 512 * 1024 * 1024;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Target="/3D/3dmodel.model" Id="rel0" Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel"/>
</Relationships>"#;
