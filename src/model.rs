use pdf_writer::Rect;

/// US letter, in PDF user-space units.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

/// Side length of every checkbox widget.
pub const CHECKBOX_SIZE: f32 = 12.0;

/// PDF field flag bit 13: text field accepts multiple lines.
pub const FF_MULTILINE: i32 = 1 << 12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Static page content. `top` is measured downward from the top edge of the
/// page; for labels it is the text baseline.
#[derive(Clone, Debug, PartialEq)]
pub enum VisualElement {
    Label {
        text: &'static str,
        x: f32,
        top: f32,
        font: FontStyle,
        size: f32,
        alignment: Alignment,
    },
    Outline {
        x: f32,
        top: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text { multiline: bool },
    Checkbox,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Bounding box in PDF (bottom-up) coordinates.
    pub rect: Rect,
    pub default: FieldValue,
}

impl FieldDescriptor {
    pub fn text(name: impl Into<String>, rect: Rect, multiline: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text { multiline },
            rect,
            default: FieldValue::Text(String::new()),
        }
    }

    pub fn checkbox(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Checkbox,
            rect,
            default: FieldValue::Checked(false),
        }
    }

    /// Value of the `/Ff` entry written for this field.
    pub fn flags(&self) -> i32 {
        match self.kind {
            FieldKind::Text { multiline: true } => FF_MULTILINE,
            _ => 0,
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self.kind, FieldKind::Text { multiline: true })
    }
}

/// Rectangle given from the top-left of the page, converted to PDF space.
pub fn rect_from_top(x: f32, top: f32, width: f32, height: f32) -> Rect {
    let y = PAGE_HEIGHT - top - height;
    Rect::new(x, y, x + width, y + height)
}

/// Baseline given from the top of the page, converted to PDF space.
pub fn baseline_from_top(top: f32) -> f32 {
    PAGE_HEIGHT - top
}
