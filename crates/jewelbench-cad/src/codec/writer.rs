use std::io::{Cursor, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{
    CONTENT_TYPES_PATH, CONTENT_TYPES_XML, CORE_NAMESPACE, FIRST_OBJECT_ID, LAYER_GROUP_ID,
    METADATA_NAMESPACE, METADATA_PREFIX, MODEL_PATH, RELS_PATH, RELS_XML,
};
use crate::document::{CadDocument, MeshObject};
use crate::error::{CadError, CadResult};

type XmlWriter = Writer<Vec<u8>>;

/// Serialize a document as a 3MF package.
///
/// Entries carry a fixed timestamp, so equal documents encode to equal bytes.
pub fn encode(doc: &CadDocument) -> CadResult<Vec<u8>> {
    let model = model_xml(doc)?;

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in [
        (CONTENT_TYPES_PATH, CONTENT_TYPES_XML.as_bytes()),
        (RELS_PATH, RELS_XML.as_bytes()),
        (MODEL_PATH, model.as_slice()),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(content)?;
    }

    let bytes = zip.finish()?.into_inner();
    tracing::debug!(
        layers = doc.layers.len(),
        objects = doc.objects.len(),
        size = bytes.len(),
        "Encoded 3MF package"
    );
    Ok(bytes)
}

fn model_xml(doc: &CadDocument) -> CadResult<Vec<u8>> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    emit(
        &mut xml,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let metadata_xmlns = format!("xmlns:{METADATA_PREFIX}");
    let mut model = BytesStart::new("model");
    model.push_attribute(("unit", "millimeter"));
    model.push_attribute(("xml:lang", "en-US"));
    model.push_attribute(("xmlns", CORE_NAMESPACE));
    model.push_attribute((metadata_xmlns.as_str(), METADATA_NAMESPACE));
    emit(&mut xml, Event::Start(model))?;
    metadata(&mut xml, "Application", "JewelBench")?;

    emit(&mut xml, Event::Start(BytesStart::new("resources")))?;
    write_layers(&mut xml, doc)?;
    for (id, object) in object_ids().zip(&doc.objects) {
        write_object(&mut xml, doc, id, object)?;
    }
    emit(&mut xml, Event::End(BytesEnd::new("resources")))?;

    emit(&mut xml, Event::Start(BytesStart::new("build")))?;
    for (id, _) in object_ids().zip(&doc.objects) {
        let id = id.to_string();
        let mut item = BytesStart::new("item");
        item.push_attribute(("objectid", id.as_str()));
        emit(&mut xml, Event::Empty(item))?;
    }
    emit(&mut xml, Event::End(BytesEnd::new("build")))?;

    emit(&mut xml, Event::End(BytesEnd::new("model")))?;
    Ok(xml.into_inner())
}

fn object_ids() -> impl Iterator<Item = u32> {
    FIRST_OBJECT_ID..
}

fn write_layers(xml: &mut XmlWriter, doc: &CadDocument) -> CadResult<()> {
    if doc.layers.is_empty() {
        return Ok(());
    }

    let group_id = LAYER_GROUP_ID.to_string();
    let mut group = BytesStart::new("basematerials");
    group.push_attribute(("id", group_id.as_str()));
    emit(xml, Event::Start(group))?;
    for layer in &doc.layers {
        let color = layer.color.to_string();
        let mut base = BytesStart::new("base");
        base.push_attribute(("name", layer.name.as_str()));
        base.push_attribute(("displaycolor", color.as_str()));
        emit(xml, Event::Empty(base))?;
    }
    emit(xml, Event::End(BytesEnd::new("basematerials")))
}

fn write_object(
    xml: &mut XmlWriter,
    doc: &CadDocument,
    id: u32,
    object: &MeshObject,
) -> CadResult<()> {
    let id = id.to_string();
    let group_id = LAYER_GROUP_ID.to_string();
    let layer_index = object.layer_index.to_string();
    let name = doc
        .layers
        .get(object.layer_index as usize)
        .map_or("Object", |layer| layer.name.as_str());

    let mut start = BytesStart::new("object");
    start.push_attribute(("id", id.as_str()));
    start.push_attribute(("type", "model"));
    start.push_attribute(("name", name));
    start.push_attribute(("pid", group_id.as_str()));
    start.push_attribute(("pindex", layer_index.as_str()));
    emit(xml, Event::Start(start))?;

    if !object.metadata.is_empty() {
        emit(xml, Event::Start(BytesStart::new("metadatagroup")))?;
        for (key, value) in &object.metadata {
            metadata(xml, &format!("{METADATA_PREFIX}:{key}"), value)?;
        }
        emit(xml, Event::End(BytesEnd::new("metadatagroup")))?;
    }

    emit(xml, Event::Start(BytesStart::new("mesh")))?;

    emit(xml, Event::Start(BytesStart::new("vertices")))?;
    for v in &object.vertices {
        let (x, y, z) = (v.x.to_string(), v.y.to_string(), v.z.to_string());
        let mut vertex = BytesStart::new("vertex");
        vertex.push_attribute(("x", x.as_str()));
        vertex.push_attribute(("y", y.as_str()));
        vertex.push_attribute(("z", z.as_str()));
        emit(xml, Event::Empty(vertex))?;
    }
    emit(xml, Event::End(BytesEnd::new("vertices")))?;

    emit(xml, Event::Start(BytesStart::new("triangles")))?;
    for [a, b, c] in &object.faces {
        let (v1, v2, v3) = (a.to_string(), b.to_string(), c.to_string());
        let mut triangle = BytesStart::new("triangle");
        triangle.push_attribute(("v1", v1.as_str()));
        triangle.push_attribute(("v2", v2.as_str()));
        triangle.push_attribute(("v3", v3.as_str()));
        emit(xml, Event::Empty(triangle))?;
    }
    emit(xml, Event::End(BytesEnd::new("triangles")))?;

    emit(xml, Event::End(BytesEnd::new("mesh")))?;
    emit(xml, Event::End(BytesEnd::new("object")))
}

fn metadata(xml: &mut XmlWriter, name: &str, value: &str) -> CadResult<()> {
    let mut start = BytesStart::new("metadata");
    start.push_attribute(("name", name));
    emit(xml, Event::Start(start))?;
    emit(xml, Event::Text(BytesText::new(value)))?;
    emit(xml, Event::End(BytesEnd::new("metadata")))
}

fn emit(xml: &mut XmlWriter, event: Event<'_>) -> CadResult<()> {
    xml.write_event(event).map_err(CadError::xml)
}
