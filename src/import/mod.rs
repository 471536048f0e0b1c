mod clean;
mod csv_import;
mod detect;
mod validate;

pub(crate) use csv_import::{CsvImporter, CsvProfile};
pub(crate) use detect::{detect_bank, DetectionResult};
pub(crate) use validate::{confirm_unknown, validate_upload, UploadDecision};
