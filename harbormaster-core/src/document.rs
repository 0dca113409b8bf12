//! Word-document rendering for the fleet registry.
//!
//! The byte layout is owned by `docx-rs`; this module only fixes the content
//! structure: a title line, then the seven labeled fields per ship.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use crate::error::{ExportError, Result};
use crate::ship::{SHIP_FIELD_LABELS, ShipRecord};

/// Attachment filename for the whole-fleet document export.
pub const FLEET_DOCUMENT_FILENAME: &str = "fleet.docx";

/// Attachment filename for a single-ship document export.
pub fn ship_document_filename(id: i32) -> String {
    format!("ship_{id}.docx")
}

fn title_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(32))
}

fn field_paragraphs(ship: &ShipRecord) -> Vec<Paragraph> {
    SHIP_FIELD_LABELS
        .iter()
        .zip(ship.field_values())
        .map(|(label, value)| {
            Paragraph::new().add_run(Run::new().add_text(format!("{label}: {value}")))
        })
        .collect()
}

fn pack(mut docx: Docx) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|err| ExportError::Document(err.to_string()))?;
    Ok(cursor.into_inner())
}

/// Render the whole fleet into a document: a count title, then one labeled
/// block per ship in listing order, blocks separated by a blank paragraph.
pub fn render_fleet_document(ships: &[ShipRecord]) -> Result<Vec<u8>> {
    let title = format!("Fleet register: {} ships", ships.len());
    let mut docx = Docx::new().add_paragraph(title_paragraph(&title));
    for ship in ships {
        docx = docx.add_paragraph(Paragraph::new());
        for paragraph in field_paragraphs(ship) {
            docx = docx.add_paragraph(paragraph);
        }
    }
    pack(docx)
}

/// Render a single ship into a document titled with the ship's name.
pub fn render_ship_document(ship: &ShipRecord) -> Result<Vec<u8>> {
    let title = format!("Ship {}", ship.name);
    let mut docx = Docx::new().add_paragraph(title_paragraph(&title));
    for paragraph in field_paragraphs(ship) {
        docx = docx.add_paragraph(paragraph);
    }
    pack(docx)
}

#[cfg(test)]
mod tests {
    use super::{FLEET_DOCUMENT_FILENAME, render_fleet_document, render_ship_document};
    use crate::ship::sample_ship;

    // OOXML documents are zip containers.
    const ZIP_MAGIC: [u8; 2] = [0x50, 0x4b];

    #[test]
    fn fleet_document_is_a_zip_container() {
        let bytes = render_fleet_document(&[sample_ship()]).expect("render");
        assert!(bytes.len() > 2);
        assert_eq!(&bytes[..2], &ZIP_MAGIC);
    }

    #[test]
    fn empty_fleet_still_renders_a_document() {
        // Emptiness policy is enforced at the service boundary, not here.
        let bytes = render_fleet_document(&[]).expect("render");
        assert_eq!(&bytes[..2], &ZIP_MAGIC);
    }

    #[test]
    fn single_ship_document_renders() {
        let bytes = render_ship_document(&sample_ship()).expect("render");
        assert_eq!(&bytes[..2], &ZIP_MAGIC);
    }

    #[test]
    fn filenames_follow_the_attachment_contract() {
        assert_eq!(FLEET_DOCUMENT_FILENAME, "fleet.docx");
        assert_eq!(super::ship_document_filename(4), "ship_4.docx");
    }
}
