//! OCR-assisted labels for clicked UI elements.
//!
//! Pipeline: crop a neighborhood around the click, hand it to a
//! [`TextRecognizer`], normalize the returned word boxes, pick the anchor word
//! under (or nearest to) the click, expand it to its text line and truncate the
//! result to a short label.

pub mod backend;
pub mod geometry;
pub mod select;
pub mod suggester;
pub mod tesseract;
pub mod text;
pub mod word;

pub use backend::{NoRecognizer, RecognizerError, TextRecognizer};
pub use geometry::{CropRegion, Point, Rect};
pub use suggester::LabelSuggester;
pub use tesseract::TesseractCli;
pub use text::{pick_label, sanitize_label};
pub use word::{BoxCoords, RawWord, RecognizedWord};
