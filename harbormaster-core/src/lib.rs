#![deny(missing_docs)]
//! Harbormaster core library.
//!
//! This crate contains the fleet registry domain types and the document and
//! spreadsheet renderers used by the Harbormaster server and CLI.

pub mod document;
pub mod error;
pub mod ship;
pub mod spreadsheet;

pub use document::{
    FLEET_DOCUMENT_FILENAME, render_fleet_document, render_ship_document, ship_document_filename,
};
pub use error::{ExportError, Result};
pub use ship::{SHIP_FIELD_LABELS, ShipInput, ShipRecord};
pub use spreadsheet::{
    FLEET_SPREADSHEET_FILENAME, render_fleet_spreadsheet, render_ship_spreadsheet,
    ship_spreadsheet_filename,
};
