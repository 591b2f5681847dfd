//! Anchor selection and same-line grouping over recognized words.

use super::geometry::Point;
use super::word::RecognizedWord;

/// Vertical padding rule for the line band around an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPadding {
    pub min: f64,
    pub ratio: f64,
}

impl BandPadding {
    pub fn for_height(&self, height: f64) -> f64 {
        self.min.max((height * self.ratio).round())
    }
}

/// First word whose box contains `click`, in backend order.
pub fn word_at_click(words: &[RecognizedWord], click: Point) -> Option<&RecognizedWord> {
    words.iter().find(|word| word.bbox.contains(click))
}

/// Word whose box center is nearest to `click`; earlier words win ties.
pub fn closest_word(words: &[RecognizedWord], click: Point) -> Option<&RecognizedWord> {
    let mut best: Option<(&RecognizedWord, f64)> = None;
    for word in words {
        let dist = word.bbox.center().distance_to(click);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((word, dist)),
        }
    }
    best.map(|(word, _)| word)
}

/// Containing word if any, else the nearest one.
pub fn pick_anchor(words: &[RecognizedWord], click: Point) -> Option<&RecognizedWord> {
    word_at_click(words, click).or_else(|| closest_word(words, click))
}

/// Words whose boxes overlap the anchor's padded vertical band, sorted left to right.
pub fn line_mates<'a>(
    words: &'a [RecognizedWord],
    anchor: &RecognizedWord,
    padding: BandPadding,
) -> Vec<&'a RecognizedWord> {
    let pad = padding.for_height(anchor.bbox.height());
    let top = anchor.bbox.min_y - pad;
    let bottom = anchor.bbox.max_y + pad;

    let mut mates: Vec<&RecognizedWord> = words
        .iter()
        .filter(|word| word.bbox.vertical_overlap(top, bottom) > 0.0)
        .collect();
    mates.sort_by(|a, b| a.bbox.min_x.total_cmp(&b.bbox.min_x));
    mates
}

/// Joins the trimmed line-mate texts, falling back to the anchor's own text.
pub fn candidate_phrase(
    words: &[RecognizedWord],
    anchor: &RecognizedWord,
    padding: BandPadding,
) -> String {
    let phrase = line_mates(words, anchor, padding)
        .iter()
        .map(|word| word.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if phrase.trim().is_empty() {
        anchor.text.trim().to_string()
    } else {
        phrase
    }
}
