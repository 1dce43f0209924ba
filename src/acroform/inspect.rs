use std::path::Path;

use lopdf::{Dictionary, Document, Object};
use pdf_writer::Rect;

use super::resolve;
use crate::error::Error;
use crate::model::{FF_MULTILINE, FieldDescriptor, FieldKind, FieldValue};

/// Button field flags that make a button a radio or push button.
const FF_RADIO: i64 = 1 << 15;
const FF_PUSHBUTTON: i64 = 1 << 16;

/// Attributes a child field inherits from its parent.
#[derive(Clone, Default)]
struct Inherited {
    name: String,
    field_type: Option<Vec<u8>>,
    flags: Option<i64>,
    value: Option<Object>,
}

/// PDFDocEncoding byte to Unicode char. Bytes 0x18-0x1F and 0x80-0xA0 are
/// remapped; the rest coincide with Latin-1.
fn pdfdoc_to_char(byte: u8) -> char {
    match byte {
        0x18 => '\u{02D8}',
        0x19 => '\u{02C7}',
        0x1A => '\u{02C6}',
        0x1B => '\u{02D9}',
        0x1C => '\u{02DD}',
        0x1D => '\u{02DB}',
        0x1E => '\u{02DA}',
        0x1F => '\u{02DC}',
        0x80 => '\u{2022}', // bullet
        0x81 => '\u{2020}',
        0x82 => '\u{2021}',
        0x83 => '\u{2026}',
        0x84 => '\u{2014}',
        0x85 => '\u{2013}',
        0x86 => '\u{0192}',
        0x87 => '\u{2044}',
        0x88 => '\u{2039}',
        0x89 => '\u{203A}',
        0x8A => '\u{2212}',
        0x8B => '\u{2030}',
        0x8C => '\u{201E}',
        0x8D => '\u{201C}',
        0x8E => '\u{201D}',
        0x8F => '\u{2018}',
        0x90 => '\u{2019}',
        0x91 => '\u{201A}',
        0x92 => '\u{2122}',
        0x93 => '\u{FB01}',
        0x94 => '\u{FB02}',
        0x95 => '\u{0141}',
        0x96 => '\u{0152}',
        0x97 => '\u{0160}',
        0x98 => '\u{0178}',
        0x99 => '\u{017D}',
        0x9A => '\u{0131}',
        0x9B => '\u{0142}',
        0x9C => '\u{0153}',
        0x9D => '\u{0161}',
        0x9E => '\u{017E}',
        0x9F => '\u{FFFD}',
        0xA0 => '\u{20AC}',
        _ => byte as char,
    }
}

/// Text string: UTF-16BE with a byte order mark, otherwise PDFDocEncoding.
fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        _ => bytes.iter().map(|&b| pdfdoc_to_char(b)).collect(),
    }
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn read_rect(doc: &Document, dict: &Dictionary) -> Option<Rect> {
    let arr = resolve(doc, dict.get(b"Rect").ok()?).ok()?.as_array().ok()?;
    let v: Vec<f32> = arr.iter().filter_map(number).collect();
    match v.as_slice() {
        [x1, y1, x2, y2] => Some(Rect::new(*x1, *y1, *x2, *y2)),
        _ => None,
    }
}

/// Widget rect for a terminal field: its own, or its first widget kid's.
fn widget_rect(doc: &Document, dict: &Dictionary) -> Rect {
    read_rect(doc, dict)
        .or_else(|| {
            let kids = resolve(doc, dict.get(b"Kids").ok()?).ok()?.as_array().ok()?;
            let first = resolve(doc, kids.first()?).ok()?.as_dict().ok()?;
            read_rect(doc, first)
        })
        .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0))
}

fn to_descriptor(doc: &Document, dict: &Dictionary, inherited: &Inherited) -> Option<FieldDescriptor> {
    let flags = inherited.flags.unwrap_or(0);
    let (kind, value) = match inherited.field_type.as_deref() {
        Some(b"Tx") => {
            let text = match inherited.value.as_ref().map(|v| resolve(doc, v)) {
                Some(Ok(Object::String(bytes, _))) => decode_text(bytes),
                _ => String::new(),
            };
            let multiline = flags & FF_MULTILINE as i64 != 0;
            (FieldKind::Text { multiline }, FieldValue::Text(text))
        }
        Some(b"Btn") if flags & (FF_RADIO | FF_PUSHBUTTON) == 0 => {
            let on = match inherited.value.as_ref().map(|v| resolve(doc, v)) {
                Some(Ok(Object::Name(state))) => state.as_slice() != b"Off",
                _ => false,
            };
            (FieldKind::Checkbox, FieldValue::Checked(on))
        }
        other => {
            log::warn!(
                "Skipping field {}: unsupported type {:?}",
                inherited.name,
                other.map(String::from_utf8_lossy)
            );
            return None;
        }
    };
    Some(FieldDescriptor {
        name: inherited.name.clone(),
        kind,
        rect: widget_rect(doc, dict),
        default: value,
    })
}

fn walk(
    doc: &Document,
    obj: &Object,
    parent: &Inherited,
    out: &mut Vec<FieldDescriptor>,
) -> Result<(), Error> {
    let dict = resolve(doc, obj)?.as_dict()?;

    let mut here = parent.clone();
    if let Ok(t) = dict.get(b"T").and_then(|o| o.as_str()) {
        let part = decode_text(t);
        here.name = if parent.name.is_empty() {
            part
        } else {
            format!("{}.{}", parent.name, part)
        };
    }
    if let Ok(ft) = dict.get(b"FT").and_then(|o| o.as_name()) {
        here.field_type = Some(ft.to_vec());
    }
    if let Ok(ff) = dict.get(b"Ff").and_then(|o| o.as_i64()) {
        here.flags = Some(ff);
    }
    if let Ok(v) = dict.get(b"V") {
        here.value = Some(v.clone());
    }

    // Kids carrying their own /T are child fields; kids without are widgets.
    let child_fields: Vec<&Object> = match dict.get(b"Kids") {
        Ok(kids) => resolve(doc, kids)?
            .as_array()?
            .iter()
            .filter(|k| {
                resolve(doc, k)
                    .and_then(|o| Ok(o.as_dict()?.has(b"T")))
                    .unwrap_or(false)
            })
            .collect(),
        Err(_) => Vec::new(),
    };

    if child_fields.is_empty() {
        out.extend(to_descriptor(doc, dict, &here));
    } else {
        for kid in child_fields {
            walk(doc, kid, &here, out)?;
        }
    }
    Ok(())
}

/// Every terminal field registered in the document's AcroForm, in `/Fields` order.
pub(crate) fn fields_in(doc: &Document) -> Result<Vec<FieldDescriptor>, Error> {
    let root = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_dictionary(root)?;
    let Ok(acroform) = catalog.get(b"AcroForm") else {
        return Ok(Vec::new());
    };
    let acroform = resolve(doc, acroform)?.as_dict()?;
    let Ok(fields) = acroform.get(b"Fields") else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for field in resolve(doc, fields)?.as_array()? {
        walk(doc, field, &Inherited::default(), &mut out)?;
    }
    Ok(out)
}

pub(crate) fn field_names(doc: &Document) -> Result<Vec<String>, Error> {
    Ok(fields_in(doc)?.into_iter().map(|f| f.name).collect())
}

/// Enumerate the interactive fields of a PDF on disk. `default` holds each
/// field's current `/V`.
pub fn read_fields(path: &Path) -> Result<Vec<FieldDescriptor>, Error> {
    let bytes = crate::read_file(path)?;
    let doc = Document::load_mem(&bytes)?;
    fields_in(&doc)
}
