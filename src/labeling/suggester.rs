//! Click-to-label suggestion over a captured frame.

use std::fmt;
use std::sync::Arc;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use super::backend::TextRecognizer;
use super::geometry::{CropRegion, Point};
use super::select::{candidate_phrase, pick_anchor};
use super::tesseract::TesseractCli;
use super::text::pick_label;
use super::word::{normalize_words, RawWord};
use crate::config::{Config, SuggestConfig};

/// Proposes a short label for the UI element under a click.
///
/// Every failure (backend missing, backend error, no words, blank text)
/// resolves to `None`; nothing here returns an error to the caller.
#[derive(Clone)]
pub struct LabelSuggester {
    recognizer: Arc<dyn TextRecognizer>,
    config: SuggestConfig,
}

impl fmt::Debug for LabelSuggester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelSuggester")
            .field("recognizer", &self.recognizer.name())
            .field("config", &self.config)
            .finish()
    }
}

impl LabelSuggester {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, config: SuggestConfig) -> Self {
        Self { recognizer, config }
    }

    /// Tesseract-backed suggester using the configured binary and languages.
    pub fn from_config(config: &Config) -> Self {
        let backend = match &config.tesseract_bin {
            Some(bin) => TesseractCli::new(bin),
            None => TesseractCli::default(),
        };
        Self::new(Arc::new(backend), config.suggest.clone())
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    /// Suggests a label for `click`, given in full-frame coordinates.
    pub async fn suggest_label(&self, frame: &DynamicImage, click: Point) -> Option<String> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return None;
        }

        let crop = CropRegion::around(click, width, height, &self.config);
        let local_click = crop.to_local(click);
        debug!(?crop, x = local_click.x, y = local_click.y, "cropping frame for recognition");

        let sub_image = frame.crop_imm(crop.x, crop.y, crop.width, crop.height);
        let words = match self
            .recognizer
            .recognize(&sub_image, &self.config.languages)
            .await
        {
            Ok(words) => words,
            Err(err) => {
                warn!(backend = self.recognizer.name(), error = %err, "text recognition failed");
                return None;
            }
        };

        self.label_from_words(words, local_click)
    }

    /// Runs anchor selection, line grouping and truncation over backend words.
    /// `local_click` is in the same coordinate space as the word boxes.
    pub fn label_from_words(&self, words: Vec<RawWord>, local_click: Point) -> Option<String> {
        let words = normalize_words(words);
        let anchor = pick_anchor(&words, local_click)?;
        debug!(anchor = %anchor.text, "picked anchor word");

        let phrase = candidate_phrase(&words, anchor, self.config.band_padding());
        pick_label(
            &phrase,
            self.config.max_label_chars,
            self.config.min_break_index,
        )
    }
}
