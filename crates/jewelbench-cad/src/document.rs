//! In-memory layered CAD document.

use std::fmt;

use jewelbench_mesh::{IndexedMesh, Point3};
use serde::Serialize;

use crate::error::{CadError, CadResult};

/// An RGBA display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Metallic gold used for the Metal layer.
    pub const GOLD: Color = Color::rgba(212, 175, 55, 255);
    /// Cyan used for the Stones layer.
    pub const CYAN: Color = Color::rgba(0, 255, 255, 255);
    /// Green used for the Prongs layer.
    pub const GREEN: Color = Color::rgba(0, 255, 0, 255);

    /// Create a color from its four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. Six digits mean fully opaque.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() || !matches!(digits.len(), 6 | 8) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// A named, colored layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    /// Position in the layer table.
    pub index: u32,
    /// Display name.
    pub name: String,
    /// Display color.
    pub color: Color,
}

/// A mesh placed on a layer, with string metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshObject {
    /// Index of the layer the object belongs to.
    pub layer_index: u32,
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Faces as vertex-index triplets.
    pub faces: Vec<[u32; 3]>,
    /// Key/value annotations in insertion order.
    pub metadata: Vec<(String, String)>,
}

impl MeshObject {
    /// An empty object on a layer.
    pub fn new(layer_index: u32) -> Self {
        Self {
            layer_index,
            vertices: Vec::new(),
            faces: Vec::new(),
            metadata: Vec::new(),
        }
    }

    /// Copy a mesh's vertex and face arrays onto a layer.
    pub fn from_mesh(mesh: &IndexedMesh, layer_index: u32) -> Self {
        Self {
            layer_index,
            vertices: mesh.vertices.clone(),
            faces: mesh.faces.clone(),
            metadata: Vec::new(),
        }
    }

    /// Set a metadata value, replacing an existing entry with the same key.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.metadata.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.metadata.push((key, value)),
        }
    }

    /// Look up a metadata value.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Check that every face index points at a vertex.
    pub fn validate(&self) -> CadResult<()> {
        let vertices = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertices) {
                return Err(CadError::FaceIndexOutOfRange {
                    face,
                    index,
                    vertices,
                });
            }
        }
        Ok(())
    }

    /// Rebuild an indexed mesh from the object geometry.
    pub fn to_mesh(&self) -> IndexedMesh {
        IndexedMesh::from_parts(self.vertices.clone(), self.faces.clone())
    }
}

/// A layered CAD document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CadDocument {
    /// Layer table, ordered by index.
    pub layers: Vec<Layer>,
    /// Mesh objects in insertion order.
    pub objects: Vec<MeshObject>,
}

impl CadDocument {
    /// Index of the Metal layer.
    pub const METAL_LAYER: u32 = 0;
    /// Index of the Stones layer.
    pub const STONES_LAYER: u32 = 1;
    /// Index of the Prongs layer.
    pub const PRONGS_LAYER: u32 = 2;

    /// Create an empty document with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty document with the Metal, Stones and Prongs layers.
    pub fn jewelry_layers() -> Self {
        let mut doc = Self::new();
        doc.add_layer("Metal", Color::GOLD);
        doc.add_layer("Stones", Color::CYAN);
        doc.add_layer("Prongs", Color::GREEN);
        doc
    }

    /// Append a layer and return its index.
    pub fn add_layer(&mut self, name: impl Into<String>, color: Color) -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let index = self.layers.len() as u32;
        self.layers.push(Layer {
            index,
            name: name.into(),
            color,
        });
        index
    }

    /// Add a mesh object after checking its layer and face indices.
    pub fn add_object(&mut self, object: MeshObject) -> CadResult<()> {
        if object.layer_index as usize >= self.layers.len() {
            return Err(CadError::LayerOutOfRange {
                layer: object.layer_index,
                layers: self.layers.len(),
            });
        }
        object.validate()?;
        self.objects.push(object);
        Ok(())
    }

    /// Find a layer by name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Objects assigned to the given layer.
    pub fn objects_on_layer(&self, layer_index: u32) -> impl Iterator<Item = &MeshObject> {
        self.objects
            .iter()
            .filter(move |o| o.layer_index == layer_index)
    }
}
