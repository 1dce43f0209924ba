mod common;

use std::collections::BTreeSet;

use lopdf::Object;
use soapnote_pdf::model::{FF_MULTILINE, FieldKind, FieldValue};

/// Group sizes in attachment order: header text, chief complaints, sleep,
/// ADL, medications, pain location, pain description, prolonged, repetitive,
/// alleviated by, assessment, treatment areas, modalities, trailing text.
const GROUP_SIZES: [usize; 14] = [3, 1, 5, 10, 1, 1, 10, 11, 11, 1, 1, 12, 8, 4];

#[test]
fn field_names_are_unique() {
    let fields = soapnote_pdf::field_descriptors().expect("field table");
    let expected: usize = GROUP_SIZES.iter().sum();
    assert_eq!(fields.len(), expected);
    assert_eq!(expected, 79);

    let names: BTreeSet<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names.len(), fields.len(), "duplicate field names");
}

#[test]
fn defaults_are_empty_and_off() {
    for f in soapnote_pdf::field_descriptors().unwrap() {
        match f.kind {
            FieldKind::Checkbox => assert_eq!(f.default, FieldValue::Checked(false), "{}", f.name),
            FieldKind::Text { .. } => {
                assert_eq!(f.default, FieldValue::Text(String::new()), "{}", f.name)
            }
        }
    }
}

#[test]
fn multiline_only_on_long_form_fields() {
    let fields = soapnote_pdf::field_descriptors().unwrap();
    let multiline: BTreeSet<&str> = fields
        .iter()
        .filter(|f| f.is_multiline())
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(multiline, BTreeSet::from(["Assessment", "ChiefComplaints"]));

    for f in &fields {
        let expected = if f.is_multiline() { FF_MULTILINE } else { 0 };
        assert_eq!(f.flags(), expected, "{}", f.name);
    }
}

#[test]
fn generated_form_matches_field_table() {
    let (_, fillable) = common::generate_case("field_table");
    let written = common::by_name(soapnote_pdf::read_fields(&fillable).unwrap());
    let expected = common::by_name(soapnote_pdf::field_descriptors().unwrap());

    println!();
    println!("+{:-<42}+{:-<20}+{:-<8}+", "", "", "");
    let mut mismatches = Vec::new();
    for (name, want) in &expected {
        let status = match written.get(name) {
            Some(got) if got == want => "OK",
            Some(_) => "DIFF",
            None => "MISSING",
        };
        if status != "OK" {
            println!("| {:<40} | {:<18} | {:<6} |", name, format!("{:?}", want.kind), status);
            mismatches.push(name.clone());
        }
    }
    println!("+{:-<42}+{:-<20}+{:-<8}+", "", "", "");
    println!("{} of {} fields match", expected.len() - mismatches.len(), expected.len());

    assert!(mismatches.is_empty(), "mismatched fields: {mismatches:?}");
    assert_eq!(written.len(), expected.len());
}

#[test]
fn repeated_runs_produce_same_fields() {
    let (_, first) = common::generate_case("repeat_a");
    let (_, second) = common::generate_case("repeat_b");

    let a = soapnote_pdf::read_fields(&first).unwrap();
    let b = soapnote_pdf::read_fields(&second).unwrap();
    assert_eq!(a, b);

    // Overwriting an existing output gives the same result.
    let (_, again) = common::generate_case("repeat_a");
    assert_eq!(soapnote_pdf::read_fields(&again).unwrap(), a);
}

#[test]
fn patient_name_and_sleep_checkbox_end_to_end() {
    let (_, fillable) = common::generate_case("end_to_end");
    let fields = common::by_name(soapnote_pdf::read_fields(&fillable).unwrap());

    let patient = &fields["PatientName"];
    assert_eq!(patient.kind, FieldKind::Text { multiline: false });
    assert_eq!(patient.default, FieldValue::Text(String::new()));

    let sleep = &fields["Sleep_FallingAsleep"];
    assert_eq!(sleep.kind, FieldKind::Checkbox);
    assert_eq!(sleep.default, FieldValue::Checked(false));
}

#[test]
fn acroform_requests_appearance_regeneration() {
    let (_, fillable) = common::generate_case("acroform");
    let doc = common::load(&fillable);
    let form = common::acroform(&doc);

    assert_eq!(form.get(b"NeedAppearances").unwrap(), &Object::Boolean(true));
    assert!(form.has(b"DA"));
    let dr_fonts = form
        .get(b"DR")
        .and_then(|dr| dr.as_dict())
        .and_then(|dr| dr.get(b"Font"))
        .and_then(|f| f.as_dict())
        .expect("DR font dictionary");
    assert!(dr_fonts.has(b"Helv"));
    assert!(dr_fonts.has(b"ZaDb"));

    // Every registered field is a widget on the page.
    let fields: BTreeSet<_> = form
        .get(b"Fields")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_reference().unwrap())
        .collect();
    let annots: BTreeSet<_> = common::only_page(&doc)
        .get(b"Annots")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_reference().unwrap())
        .collect();
    assert_eq!(fields.len(), 79);
    assert_eq!(fields, annots);

    for id in &fields {
        let widget = doc.get_dictionary(*id).unwrap();
        assert_eq!(widget.get(b"Subtype").unwrap().as_name().unwrap(), b"Widget");
        if widget.get(b"FT").unwrap().as_name().unwrap() == b"Btn" {
            assert_eq!(widget.get(b"AS").unwrap().as_name().unwrap(), b"Off");
        }
    }
}
