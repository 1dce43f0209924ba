mod acroform;
mod error;
mod fonts;
pub mod model;
mod pdf;
pub mod sheet;

pub use acroform::{attach_fields, overlay, read_fields};
pub use error::Error;
pub use sheet::{field_descriptors, visual_elements};

use std::path::Path;
use std::time::Instant;

pub const DEFAULT_BASE_PDF: &str = "acupuncture_soap_base.pdf";
pub const DEFAULT_OUTPUT_PDF: &str = "fillable_acupuncture_soap.pdf";

pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })
}

/// Phase 1: draw the static SOAP note page to `output`.
pub fn render_base_pdf(output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let bytes = pdf::render(&visual_elements())?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Base page: render={:.1}ms, write={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

/// Phase 2: read the base page at `input`, overlay every form field and
/// write the fillable document to `output`.
pub fn make_fillable_form(input: &Path, output: &Path) -> Result<(), Error> {
    let t0 = Instant::now();

    let base = read_file(input)?;
    let fields = field_descriptors()?;
    let t_read = t0.elapsed();

    let bytes = overlay(&base, &fields)?;
    let t_overlay = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Form overlay: {} fields, read={:.1}ms, overlay={:.1}ms, write={:.1}ms (output {} bytes)",
        fields.len(),
        t_read.as_secs_f64() * 1000.0,
        (t_overlay - t_read).as_secs_f64() * 1000.0,
        (t_total - t_overlay).as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}

/// Run both phases: `base` receives the static page, `output` the fillable form.
pub fn generate(base: &Path, output: &Path) -> Result<(), Error> {
    render_base_pdf(base)?;
    make_fillable_form(base, output)
}
