//! Interactive form layer: widget annotations plus the document-wide
//! AcroForm dictionary, written into an existing single-page PDF.

mod inspect;

pub use inspect::read_fields;

use std::collections::HashSet;

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

use crate::error::Error;
use crate::model::{FieldDescriptor, FieldKind, FieldValue};
use crate::sheet::ensure_unique;

/// Default appearance for text: Helvetica, auto-sized, black.
const TEXT_DA: &str = "/Helv 0 Tf 0 g";
/// Default appearance for checkboxes: ZapfDingbats, auto-sized, black.
const CHECK_DA: &str = "/ZaDb 0 Tf 0 g";
/// ZapfDingbats glyph drawn for the on state (a check mark).
const CHECK_GLYPH: &str = "4";
/// Annotation flag bit 3: print the widget.
const ANNOT_PRINT: i64 = 4;

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object, Error> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        other => Ok(other),
    }
}

fn rect_object(field: &FieldDescriptor) -> Object {
    let r = field.rect;
    Object::Array(
        [r.x1, r.y1, r.x2, r.y2]
            .into_iter()
            .map(|v| Object::Real(v.into()))
            .collect(),
    )
}

fn widget(field: &FieldDescriptor, page_id: ObjectId) -> Dictionary {
    let mut annot = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "Rect" => rect_object(field),
        "T" => Object::string_literal(field.name.as_str()),
        "Ff" => Object::Integer(field.flags() as i64),
        "F" => Object::Integer(ANNOT_PRINT),
        "P" => Object::Reference(page_id),
    };
    match (field.kind, &field.default) {
        (FieldKind::Text { .. }, value) => {
            let text = match value {
                FieldValue::Text(s) => s.as_str(),
                FieldValue::Checked(_) => "",
            };
            annot.set("FT", "Tx");
            annot.set("V", Object::string_literal(text));
            annot.set("DA", Object::string_literal(TEXT_DA));
        }
        (FieldKind::Checkbox, value) => {
            let state = match value {
                FieldValue::Checked(true) => "Yes",
                _ => "Off",
            };
            annot.set("FT", "Btn");
            annot.set("V", state);
            annot.set("AS", state);
            annot.set("DA", Object::string_literal(CHECK_DA));
            annot.set(
                "MK",
                dictionary! { "CA" => Object::string_literal(CHECK_GLYPH) },
            );
        }
    }
    annot
}

/// The page's `/Annots` entries, with an indirect array resolved. Empty if absent.
fn page_annotations(doc: &Document, page_id: ObjectId) -> Result<Vec<Object>, Error> {
    let page = doc.get_dictionary(page_id)?;
    match page.get(b"Annots") {
        Ok(obj) => match resolve(doc, obj)? {
            Object::Array(items) => Ok(items.clone()),
            other => Err(Error::InvalidTemplate(format!(
                "page /Annots is not an array: {other:?}"
            ))),
        },
        Err(_) => Ok(Vec::new()),
    }
}

fn catalog_id(doc: &Document) -> Result<ObjectId, Error> {
    Ok(doc.trailer.get(b"Root")?.as_reference()?)
}

/// Current AcroForm dictionary (if any) and the object that holds it when indirect.
fn existing_acroform(doc: &Document) -> Result<(Option<ObjectId>, Dictionary), Error> {
    let catalog = doc.get_dictionary(catalog_id(doc)?)?;
    match catalog.get(b"AcroForm") {
        Ok(Object::Reference(id)) => Ok((Some(*id), doc.get_dictionary(*id)?.clone())),
        Ok(Object::Dictionary(d)) => Ok((None, d.clone())),
        _ => Ok((None, Dictionary::new())),
    }
}

fn default_resources(doc: &mut Document) -> Dictionary {
    let helv = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let zadb = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "ZapfDingbats",
    });
    dictionary! {
        "Font" => dictionary! {
            "Helv" => Object::Reference(helv),
            "ZaDb" => Object::Reference(zadb),
        },
    }
}

fn install_acroform(doc: &mut Document, new_fields: &[ObjectId]) -> Result<(), Error> {
    let (holder, mut acroform) = existing_acroform(doc)?;

    let mut fields = match acroform.get(b"Fields") {
        Ok(obj) => resolve(doc, obj)?.as_array()?.clone(),
        Err(_) => Vec::new(),
    };
    fields.extend(new_fields.iter().map(|id| Object::Reference(*id)));

    acroform.set("Fields", Object::Array(fields));
    acroform.set("NeedAppearances", Object::Boolean(true));
    acroform.set("DA", Object::string_literal(TEXT_DA));
    if !acroform.has(b"DR") {
        let dr = default_resources(doc);
        acroform.set("DR", dr);
    }

    match holder {
        Some(id) => {
            doc.objects.insert(id, Object::Dictionary(acroform));
        }
        None => {
            let catalog_id = catalog_id(doc)?;
            doc.get_object_mut(catalog_id)?
                .as_dict_mut()?
                .set("AcroForm", acroform);
        }
    }
    Ok(())
}

/// Attach one widget per field to the document's only page and register
/// every field in the AcroForm.
pub fn attach_fields(doc: &mut Document, fields: &[FieldDescriptor]) -> Result<(), Error> {
    let pages = doc.get_pages();
    let page_id = match (pages.len(), pages.values().next()) {
        (1, Some(id)) => *id,
        (n, _) => {
            return Err(Error::InvalidTemplate(format!(
                "expected a single page, found {n}"
            )));
        }
    };

    ensure_unique(fields)?;
    let taken: HashSet<String> = inspect::field_names(doc)?.into_iter().collect();
    if let Some(clash) = fields.iter().find(|f| taken.contains(&f.name)) {
        return Err(Error::DuplicateField(clash.name.clone()));
    }

    let mut annots = page_annotations(doc, page_id)?;
    let mut refs = Vec::with_capacity(fields.len());
    for field in fields {
        let id = doc.add_object(widget(field, page_id));
        log::debug!("widget {} -> {:?} ({:?})", field.name, id, field.kind);
        annots.push(Object::Reference(id));
        refs.push(id);
    }
    doc.get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Annots", Object::Array(annots));

    install_acroform(doc, &refs)
}

/// Parse `input`, overlay `fields` and serialize the result.
pub fn overlay(input: &[u8], fields: &[FieldDescriptor]) -> Result<Vec<u8>, Error> {
    let mut doc = Document::load_mem(input)?;
    attach_fields(&mut doc, fields)?;
    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| Error::Pdf(e.to_string()))?;
    Ok(out)
}
