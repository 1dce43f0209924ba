#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lopdf::{Dictionary, Document, Object, dictionary};
use soapnote_pdf::model::FieldDescriptor;

/// Output directory: tests/output/<case>/
pub fn output_dir(case: &str) -> PathBuf {
    let _ = env_logger::try_init();
    let dir = PathBuf::from("tests/output").join(case);
    fs::create_dir_all(&dir).expect("create output dir");
    dir
}

/// Run both phases into tests/output/<case>/ and return (base, fillable).
pub fn generate_case(case: &str) -> (PathBuf, PathBuf) {
    let dir = output_dir(case);
    let base = dir.join("base.pdf");
    let fillable = dir.join("fillable.pdf");
    soapnote_pdf::generate(&base, &fillable).expect("generate form");
    (base, fillable)
}

pub fn load(pdf: &Path) -> Document {
    Document::load(pdf).expect("load generated PDF")
}

pub fn by_name(fields: Vec<FieldDescriptor>) -> HashMap<String, FieldDescriptor> {
    fields.into_iter().map(|f| (f.name.clone(), f)).collect()
}

pub fn only_page(doc: &Document) -> &Dictionary {
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1, "expected a single page");
    let id = *pages.values().next().unwrap();
    doc.get_dictionary(id).unwrap()
}

pub fn acroform(doc: &Document) -> &Dictionary {
    let root = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    let catalog = doc.get_dictionary(root).unwrap();
    match catalog.get(b"AcroForm").unwrap() {
        Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
        Object::Dictionary(d) => d,
        other => panic!("unexpected AcroForm object: {other:?}"),
    }
}

/// Minimal PDF with `page_count` empty letter pages; `page_extra` is merged
/// into every page dictionary.
pub fn blank_pdf(page_count: usize, page_extra: Dictionary) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..page_count)
        .map(|_| {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            };
            for (key, value) in page_extra.iter() {
                page.set(key.clone(), value.clone());
            }
            Object::Reference(doc.add_object(page))
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub fn save(doc: &mut Document, path: &Path) {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize test PDF");
    fs::write(path, bytes).expect("write test PDF");
}
