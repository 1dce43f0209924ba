//! The SOAP note sheet: every label, box and form field on the page.
//!
//! Positions are literal constants measured from the top-left of the page.
//! Both the renderer and the form overlay read from the same tables, so the
//! static outlines and the interactive widgets cannot drift apart.

use std::collections::HashSet;

use pdf_writer::Rect;

use crate::error::Error;
use crate::model::{
    Alignment, CHECKBOX_SIZE, FieldDescriptor, FontStyle, PAGE_HEIGHT, PAGE_WIDTH,
    VisualElement, rect_from_top,
};

const LABEL_SIZE: f32 = 10.0;
const HEADING_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 16.0;
const CAPTION_SIZE: f32 = 9.0;

/// Gap between a checkbox and its caption.
const CAPTION_GAP: f32 = 4.0;

pub struct TextEntry {
    pub name: &'static str,
    /// Caption text and its x position; drawn on the field's baseline.
    pub label: Option<(&'static str, f32)>,
    pub x: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub multiline: bool,
}

impl TextEntry {
    pub fn rect(&self) -> Rect {
        rect_from_top(self.x, self.top, self.width, self.height)
    }
}

/// A group of checkboxes filled left to right, top to bottom.
pub struct CheckboxGrid {
    pub prefix: &'static str,
    pub label: &'static str,
    pub x0: f32,
    /// Top edge of the first row.
    pub top: f32,
    pub columns: usize,
    pub dx: f32,
    pub dy: f32,
    /// `(name suffix, printed caption)`
    pub items: &'static [(&'static str, &'static str)],
}

impl CheckboxGrid {
    /// Lower-left corner of the first cell in PDF space.
    pub fn origin(&self) -> (f32, f32) {
        (self.x0, PAGE_HEIGHT - self.top - CHECKBOX_SIZE)
    }

    pub fn cell(&self, index: usize) -> Rect {
        let (x0, y0) = self.origin();
        let x = x0 + (index % self.columns) as f32 * self.dx;
        let y = y0 - (index / self.columns) as f32 * self.dy;
        Rect::new(x, y, x + CHECKBOX_SIZE, y + CHECKBOX_SIZE)
    }

    fn cell_top(&self, index: usize) -> f32 {
        self.top + (index / self.columns) as f32 * self.dy
    }

    fn cell_x(&self, index: usize) -> f32 {
        self.x0 + (index % self.columns) as f32 * self.dx
    }

    pub fn field_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }
}

pub enum Entry {
    Text(TextEntry),
    Grid(CheckboxGrid),
}

const fn label(text: &'static str, x: f32, top: f32) -> VisualElement {
    VisualElement::Label {
        text,
        x,
        top,
        font: FontStyle::Regular,
        size: LABEL_SIZE,
        alignment: Alignment::Left,
    }
}

const fn heading(text: &'static str, top: f32) -> VisualElement {
    VisualElement::Label {
        text,
        x: 40.0,
        top,
        font: FontStyle::Bold,
        size: HEADING_SIZE,
        alignment: Alignment::Left,
    }
}

const DECORATIONS: &[VisualElement] = &[
    VisualElement::Label {
        text: "Acupuncture SOAP Note",
        x: PAGE_WIDTH / 2.0,
        top: 34.0,
        font: FontStyle::Bold,
        size: TITLE_SIZE,
        alignment: Alignment::Center,
    },
    heading("S \u{2013} Subjective", 102.0),
    label("Chief complaints (describe):", 50.0, 117.0),
    heading("O \u{2013} Objective", 320.0),
    heading("A \u{2013} Assessment", 540.0),
    heading("P \u{2013} Plan (treatment / modalities)", 610.0),
];

const fn single_line(
    name: &'static str,
    caption: &'static str,
    caption_x: f32,
    x: f32,
    top: f32,
    width: f32,
) -> Entry {
    Entry::Text(TextEntry {
        name,
        label: Some((caption, caption_x)),
        x,
        top,
        width,
        height: 16.0,
        multiline: false,
    })
}

const fn free_text(name: &'static str, top: f32, height: f32) -> Entry {
    Entry::Text(TextEntry {
        name,
        label: None,
        x: 48.0,
        top,
        width: 520.0,
        height,
        multiline: true,
    })
}

const fn grid(
    prefix: &'static str,
    label: &'static str,
    top: f32,
    columns: usize,
    dx: f32,
    items: &'static [(&'static str, &'static str)],
) -> Entry {
    Entry::Grid(CheckboxGrid {
        prefix,
        label,
        x0: 60.0,
        top,
        columns,
        dx,
        dy: 15.0,
        items,
    })
}

const SLEEP: &[(&str, &str)] = &[
    ("FallingAsleep", "Falling asleep"),
    ("WakingNight", "Waking at night"),
    ("WakesWithPain", "Wakes with pain"),
    ("ReducedAlertness", "Reduced alertness"),
    ("Fatigue", "Fatigue"),
];

const ADL: &[(&str, &str)] = &[
    ("GetOutOfBed", "Getting out of bed"),
    ("HouseholdChores", "Household chores"),
    ("Bathing", "Bathing"),
    ("Dressing", "Dressing"),
    ("PutOnSocksShoes", "Putting on socks/shoes"),
    ("Sweeping", "Sweeping"),
    ("Cleaning", "Cleaning"),
    ("TakingOutTrash", "Taking out trash"),
    ("Laundry", "Laundry"),
    ("GroceryShopping", "Grocery shopping"),
];

const PAIN_DESCRIPTION: &[(&str, &str)] = &[
    ("Aching", "Aching"),
    ("Sore", "Sore"),
    ("Burning", "Burning"),
    ("Sharp", "Sharp"),
    ("Stabbing", "Stabbing"),
    ("Stinging", "Stinging"),
    ("Shooting", "Shooting"),
    ("Throbbing", "Throbbing"),
    ("Cutting", "Cutting"),
    ("Dull", "Dull"),
];

const PROLONGED: &[(&str, &str)] = &[
    ("Sitting", "Sitting"),
    ("Twisting", "Twisting"),
    ("Standing", "Standing"),
    ("Walking", "Walking"),
    ("Driving", "Driving"),
    ("Squatting", "Squatting"),
    ("ClimbingStairs", "Climbing stairs"),
    ("Stooping", "Stooping"),
    ("Bending", "Bending"),
    ("Running", "Running"),
    ("Kneeling", "Kneeling"),
];

const REPETITIVE: &[(&str, &str)] = &[
    ("Lifting", "Lifting"),
    ("Carrying", "Carrying"),
    ("Pushing", "Pushing"),
    ("Pulling", "Pulling"),
    ("Gripping", "Gripping"),
    ("Grasping", "Grasping"),
    ("Reclining", "Reclining"),
    ("ArmMovements", "Arm movements"),
    ("NeckBending", "Neck bending"),
    ("TactileDistribution", "Tactile distribution"),
    ("ApplyingTorque", "Applying torque"),
];

const AREAS: &[(&str, &str)] = &[
    ("Scalp", "Scalp"),
    ("Face", "Face"),
    ("Ear", "Ear"),
    ("Neck", "Neck"),
    ("Shoulder", "Shoulder"),
    ("Back", "Back"),
    ("Abdomen", "Abdomen"),
    ("Arms", "Arms"),
    ("Pelvis", "Pelvis"),
    ("Hips_Buttocks", "Hips/buttocks"),
    ("Knee", "Knee"),
    ("Foot", "Foot"),
];

const MODALITIES: &[(&str, &str)] = &[
    ("Acupuncture", "Acupuncture"),
    ("Acupuncture_w_Stim", "Acupuncture w/ stim"),
    ("Acupuncture_wo_Stim", "Acupuncture w/o stim"),
    ("ElectricalStim", "Electrical stim"),
    ("SoftTissue", "Soft tissue"),
    ("Myofascial", "Myofascial"),
    ("HerbalMedicine", "Herbal medicine"),
    ("InfraredHeat", "Infrared heat"),
];

/// Every interactive control, in the order the widgets are attached.
pub const SHEET: &[Entry] = &[
    single_line("PatientName", "Patient Name:", 40.0, 120.0, 49.0, 230.0),
    single_line("Date", "Date:", 372.0, 400.0, 49.0, 162.0),
    single_line("Diagnosis", "Diagnosis:", 40.0, 120.0, 69.0, 442.0),
    free_text("ChiefComplaints", 122.0, 56.0),
    grid("Sleep", "Sleep concerns (check):", 196.0, 5, 102.0, SLEEP),
    grid("ADL", "ADL concerns (check):", 226.0, 3, 170.0, ADL),
    single_line("Medications", "Medications:", 50.0, 120.0, 287.0, 442.0),
    single_line("PainLocationScale", "Pain - location/scale:", 50.0, 160.0, 325.0, 402.0),
    grid("PainDesc", "Pain description (check):", 356.0, 5, 102.0, PAIN_DESCRIPTION),
    grid(
        "Aggravated_Prolonged",
        "Aggravated by - prolonged (check):",
        401.0,
        4,
        128.0,
        PROLONGED,
    ),
    grid(
        "Aggravated_Repetitive",
        "Aggravated by - repetitive (check):",
        461.0,
        4,
        128.0,
        REPETITIVE,
    ),
    single_line("AlleviatedBy", "Alleviated by:", 50.0, 140.0, 507.0, 422.0),
    free_text("Assessment", 546.0, 44.0),
    grid("Area", "Treatment areas (check):", 629.0, 4, 128.0, AREAS),
    grid("Modality", "Modalities (check):", 689.0, 4, 128.0, MODALITIES),
    single_line("TotalTimeSpent", "Total time spent:", 50.0, 155.0, 723.0, 120.0),
    single_line("ProviderSignature", "Acupuncturist signature:", 300.0, 420.0, 723.0, 142.0),
    single_line("TreatmentFrequency", "Treatment frequency:", 50.0, 155.0, 745.0, 120.0),
    single_line("GoalsForTreatment", "Goals:", 300.0, 340.0, 745.0, 222.0),
];

pub fn checkbox_grids() -> impl Iterator<Item = &'static CheckboxGrid> {
    SHEET.iter().filter_map(|entry| match entry {
        Entry::Grid(g) => Some(g),
        Entry::Text(_) => None,
    })
}

/// Drawing instructions for the static page.
pub fn visual_elements() -> Vec<VisualElement> {
    let mut out = DECORATIONS.to_vec();
    for entry in SHEET {
        match entry {
            Entry::Text(t) => {
                if let Some((text, x)) = t.label {
                    // Baseline sits 4pt above the bottom of the box.
                    out.push(label(text, x, t.top + t.height - 4.0));
                }
                out.push(VisualElement::Outline {
                    x: t.x,
                    top: t.top,
                    width: t.width,
                    height: t.height,
                });
            }
            Entry::Grid(g) => {
                out.push(label(g.label, 50.0, g.top - 4.0));
                for (i, (_, caption)) in g.items.iter().enumerate() {
                    let x = g.cell_x(i);
                    let top = g.cell_top(i);
                    out.push(VisualElement::Outline {
                        x,
                        top,
                        width: CHECKBOX_SIZE,
                        height: CHECKBOX_SIZE,
                    });
                    out.push(VisualElement::Label {
                        text: *caption,
                        x: x + CHECKBOX_SIZE + CAPTION_GAP,
                        top: top + CHECKBOX_SIZE - 2.0,
                        font: FontStyle::Regular,
                        size: CAPTION_SIZE,
                        alignment: Alignment::Left,
                    });
                }
            }
        }
    }
    out
}

/// One descriptor per interactive control. Fails if two controls share a name.
pub fn field_descriptors() -> Result<Vec<FieldDescriptor>, Error> {
    let mut fields = Vec::new();
    for entry in SHEET {
        match entry {
            Entry::Text(t) => fields.push(FieldDescriptor::text(t.name, t.rect(), t.multiline)),
            Entry::Grid(g) => {
                for (i, (suffix, _)) in g.items.iter().enumerate() {
                    fields.push(FieldDescriptor::checkbox(g.field_name(suffix), g.cell(i)));
                }
            }
        }
    }
    ensure_unique(&fields)?;
    Ok(fields)
}

pub(crate) fn ensure_unique(fields: &[FieldDescriptor]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for f in fields {
        if !seen.insert(f.name.as_str()) {
            return Err(Error::DuplicateField(f.name.clone()));
        }
    }
    Ok(())
}
