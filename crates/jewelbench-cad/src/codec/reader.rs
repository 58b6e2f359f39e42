use std::io::{Cursor, Read};
use std::str::FromStr;

use jewelbench_mesh::Point3;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};
use zip::ZipArchive;
use zip::result::ZipError;

use super::{LAYER_GROUP_ID, MAX_MODEL_BYTES, MODEL_PATH};
use crate::document::{CadDocument, Color, MeshObject};
use crate::error::{CadError, CadResult};

/// Parse a 3MF package produced by [`super::encode`].
///
/// Elements outside the layer group and mesh objects are skipped.
/// Malformed input of any kind is reported as an error.
pub fn decode(bytes: &[u8]) -> CadResult<CadDocument> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let file = match archive.by_name(MODEL_PATH) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Err(CadError::MissingPart(MODEL_PATH)),
        Err(e) => return Err(e.into()),
    };

    let mut model = String::new();
    file.take(MAX_MODEL_BYTES + 1).read_to_string(&mut model)?;
    if model.len() as u64 > MAX_MODEL_BYTES {
        return Err(CadError::ModelTooLarge {
            limit: MAX_MODEL_BYTES,
        });
    }

    parse_model(&model)
}

fn parse_model(content: &str) -> CadResult<CadDocument> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut parser = ModelParser::default();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf).map_err(CadError::xml)? {
            Event::Start(ref e) => parser.open(e, false)?,
            Event::Empty(ref e) => parser.open(e, true)?,
            Event::Text(ref t) => parser.text(t)?,
            Event::End(ref e) => parser.close(e.local_name().as_ref())?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(parser.doc)
}

#[derive(Default)]
struct ModelParser {
    doc: CadDocument,
    in_layer_group: bool,
    object: Option<MeshObject>,
    metadata_key: Option<String>,
}

impl ModelParser {
    fn open(&mut self, e: &BytesStart<'_>, self_closing: bool) -> CadResult<()> {
        match e.local_name().as_ref() {
            b"basematerials" => {
                self.in_layer_group =
                    !self_closing && optional::<u32>(e, "id")? == Some(LAYER_GROUP_ID);
            }
            b"base" if self.in_layer_group => {
                let name = required::<String>(e, "name")?;
                let color = match attribute(e, "displaycolor")? {
                    Some(hex) => Color::from_hex(&hex).ok_or_else(|| CadError::InvalidAttribute {
                        element: "base".into(),
                        attribute: "displaycolor",
                        value: hex,
                    })?,
                    None => Color::rgba(128, 128, 128, 255),
                };
                self.doc.add_layer(name, color);
            }
            b"object" => {
                let layer_index = optional::<u32>(e, "pindex")?.unwrap_or(CadDocument::METAL_LAYER);
                let object = MeshObject::new(layer_index);
                if self_closing {
                    self.doc.add_object(object)?;
                } else {
                    self.object = Some(object);
                }
            }
            b"metadata" if self.object.is_some() => {
                let name = required::<String>(e, "name")?;
                let key = name.rsplit(':').next().unwrap_or(&name).to_string();
                if self_closing {
                    if let Some(object) = self.object.as_mut() {
                        object.set_metadata(key, "");
                    }
                } else {
                    self.metadata_key = Some(key);
                }
            }
            b"vertex" => {
                if let Some(object) = self.object.as_mut() {
                    object.vertices.push(Point3::new(
                        required(e, "x")?,
                        required(e, "y")?,
                        required(e, "z")?,
                    ));
                }
            }
            b"triangle" => {
                if let Some(object) = self.object.as_mut() {
                    object
                        .faces
                        .push([required(e, "v1")?, required(e, "v2")?, required(e, "v3")?]);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, t: &BytesText<'_>) -> CadResult<()> {
        if let (Some(object), Some(key)) = (self.object.as_mut(), self.metadata_key.as_ref()) {
            let value = t.unescape().map_err(CadError::xml)?;
            object.set_metadata(key.clone(), value.into_owned());
        }
        Ok(())
    }

    fn close(&mut self, name: &[u8]) -> CadResult<()> {
        match name {
            b"basematerials" => self.in_layer_group = false,
            b"metadata" => {
                // <metadata name="..."></metadata> carries an empty value
                if let (Some(object), Some(key)) = (self.object.as_mut(), self.metadata_key.take())
                {
                    if object.metadata(&key).is_none() {
                        object.set_metadata(key, "");
                    }
                }
            }
            b"object" => {
                if let Some(object) = self.object.take() {
                    self.doc.add_object(object)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Unescaped value of the attribute with local name `name`.
fn attribute(e: &BytesStart<'_>, name: &str) -> CadResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(CadError::xml)?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr.unescape_value().map_err(CadError::xml)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn optional<T: FromStr>(e: &BytesStart<'_>, name: &'static str) -> CadResult<Option<T>> {
    attribute(e, name)?
        .map(|value| {
            value.trim().parse().map_err(|_| CadError::InvalidAttribute {
                element: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
                attribute: name,
                value,
            })
        })
        .transpose()
}

fn required<T: FromStr>(e: &BytesStart<'_>, name: &'static str) -> CadResult<T> {
    optional(e, name)?.ok_or_else(|| CadError::MissingAttribute {
        element: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
        attribute: name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;
    use jewelbench_mesh::IndexedMesh;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn package(model: &str) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file(MODEL_PATH, SimpleFileOptions::default())
            .unwrap();
        zip.write_all(model.as_bytes()).unwrap();
        zip.finish().unwrap().into_inner()
    }

    fn sample() -> CadDocument {
        let mut doc = CadDocument::jewelry_layers();
        let mut metal = MeshObject::from_mesh(&IndexedMesh::cube(10.0), CadDocument::METAL_LAYER);
        metal.set_metadata("material", "Silver 925");
        metal.set_metadata("engine", "test");
        doc.add_object(metal).unwrap();
        doc.add_object(MeshObject::from_mesh(
            &IndexedMesh::cube(0.125),
            CadDocument::STONES_LAYER,
        ))
        .unwrap();
        doc
    }

    #[test]
    fn test_round_trip_keeps_layers_objects_and_metadata() {
        let doc = sample();
        let decoded = decode(&encode(&doc).unwrap()).unwrap();
        assert_eq!(decoded, doc);
    }

    #[test]
    fn test_coordinates_survive_exactly() {
        let mut doc = CadDocument::jewelry_layers();
        let mesh = IndexedMesh::from_parts(
            vec![
                Point3::new(0.1, -2.5e-7, 1234.567_890_123),
                Point3::new(1.0 / 3.0, 0.0, -0.0),
                Point3::new(f64::MIN_POSITIVE, 7.0, 1e21),
            ],
            vec![[0, 1, 2]],
        );
        doc.add_object(MeshObject::from_mesh(&mesh, 0)).unwrap();

        let decoded = decode(&encode(&doc).unwrap()).unwrap();
        assert_eq!(decoded.objects[0].vertices, mesh.vertices);
    }

    #[test]
    fn test_not_a_package() {
        assert!(matches!(
            decode(b"definitely not a zip").unwrap_err(),
            CadError::Archive(_)
        ));
    }

    #[test]
    fn test_package_without_model() {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("readme.txt", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"hi").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        assert!(matches!(
            decode(&bytes).unwrap_err(),
            CadError::MissingPart(MODEL_PATH)
        ));
    }

    #[test]
    fn test_malformed_xml() {
        let bytes = package("<model><resources></model>");
        assert!(matches!(decode(&bytes).unwrap_err(), CadError::Xml(_)));
    }

    #[test]
    fn test_bad_coordinate_is_reported() {
        let bytes = package(
            r##"<model><resources>
                <basematerials id="1"><base name="Metal" displaycolor="#D4AF37"/></basematerials>
                <object id="2" pid="1" pindex="0"><mesh><vertices>
                  <vertex x="1" y="two" z="3"/>
                </vertices></mesh></object>
            </resources></model>"##,
        );
        match decode(&bytes).unwrap_err() {
            CadError::InvalidAttribute {
                element,
                attribute,
                value,
            } => {
                assert_eq!(element, "vertex");
                assert_eq!(attribute, "y");
                assert_eq!(value, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_triangle_index() {
        let bytes = package(
            r#"<model><resources>
                <basematerials id="1"><base name="Metal"/></basematerials>
                <object id="2" pid="1" pindex="0"><mesh><triangles>
                  <triangle v1="0" v2="1"/>
                </triangles></mesh></object>
            </resources></model>"#,
        );
        assert!(matches!(
            decode(&bytes).unwrap_err(),
            CadError::MissingAttribute { attribute: "v3", .. }
        ));
    }

    #[test]
    fn test_object_on_unknown_layer_is_rejected() {
        let bytes = package(
            r#"<model><resources>
                <basematerials id="1"><base name="Metal"/></basematerials>
                <object id="2" pid="1" pindex="4"><mesh/></object>
            </resources></model>"#,
        );
        assert!(matches!(
            decode(&bytes).unwrap_err(),
            CadError::LayerOutOfRange { layer: 4, layers: 1 }
        ));
    }

    #[test]
    fn test_six_digit_color_is_opaque_and_unknown_elements_are_skipped() {
        let bytes = package(
            r##"<?xml version="1.0" encoding="UTF-8"?>
            <model xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">
              <metadata name="Designer">someone</metadata>
              <resources>
                <basematerials id="1"><base name="Metal" displaycolor="#D4AF37"/></basematerials>
                <colorgroup id="9"><color color="#FFFFFF"/></colorgroup>
              </resources>
              <build/>
            </model>"##,
        );
        let doc = decode(&bytes).unwrap();
        assert_eq!(doc.layers.len(), 1);
        assert_eq!(doc.layers[0].color, Color::GOLD);
        assert!(doc.objects.is_empty());
    }
}
