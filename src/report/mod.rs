//! PDF report export: the table as a paginated grid with a repeated header

mod exporter;
pub mod layout;

pub use exporter::ReportExporter;
pub use layout::{Orientation, ReportLayout, NULL_PLACEHOLDER};
