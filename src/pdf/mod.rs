use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{PageFonts, register_page_fonts, to_winansi_bytes};
use crate::model::{
    Alignment, PAGE_HEIGHT, PAGE_WIDTH, VisualElement, baseline_from_top, rect_from_top,
};

const OUTLINE_WIDTH: f32 = 1.0;

fn draw_element(content: &mut Content, element: &VisualElement, fonts: &PageFonts) {
    match *element {
        VisualElement::Label {
            text,
            x,
            top,
            font,
            size,
            alignment,
        } => {
            let entry = fonts.get(font);
            let x = match alignment {
                Alignment::Left => x,
                Alignment::Center => x - entry.text_width(text, size) / 2.0,
            };
            content
                .begin_text()
                .set_font(Name(entry.pdf_name.as_bytes()), size)
                .next_line(x, baseline_from_top(top))
                .show(Str(&to_winansi_bytes(text)))
                .end_text();
        }
        VisualElement::Outline {
            x,
            top,
            width,
            height,
        } => {
            let r = rect_from_top(x, top, width, height);
            content
                .rect(r.x1, r.y1, r.x2 - r.x1, r.y2 - r.y1)
                .stroke();
        }
    }
}

/// Draw the static page and serialize it as a one-page PDF.
pub fn render(elements: &[VisualElement]) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_id = alloc();
    let content_id = alloc();
    let info_id = alloc();

    let fonts = register_page_fonts(&mut pdf, &mut alloc);

    let mut content = Content::new();
    content.set_line_width(OUTLINE_WIDTH);
    for element in elements {
        draw_element(&mut content, element, &fonts);
    }
    let raw = content.finish();
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
    pdf.stream(content_id, &compressed)
        .filter(Filter::FlateDecode);

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_id);
        let mut resources = page.resources();
        let mut font_dict = resources.fonts();
        for entry in fonts.iter() {
            font_dict.pair(Name(entry.pdf_name.as_bytes()), entry.font_ref);
        }
    }

    pdf.document_info(info_id)
        .title(TextStr("Acupuncture SOAP Note"))
        .producer(TextStr(concat!("soapnote-pdf ", env!("CARGO_PKG_VERSION"))));

    log::info!(
        "Rendered {} elements in {:.1}ms (content {} bytes, compressed {})",
        elements.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
        raw.as_slice().len(),
        compressed.len(),
    );

    Ok(pdf.finish())
}
