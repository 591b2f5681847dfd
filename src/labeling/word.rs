//! Backend word output and its normalization into [`RecognizedWord`].

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Bounding box as reported by a recognition backend.
///
/// Backends disagree on field names, so every field is optional and
/// [`BoxCoords::to_rect`] picks whichever complete encoding is present:
/// `{x0,y0,x1,y1}`, `{left,top,width,height}` or `{x,y,width,height}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxCoords {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y0: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl BoxCoords {
    pub fn corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: Some(x0),
            y0: Some(y0),
            x1: Some(x1),
            y1: Some(y1),
            ..Self::default()
        }
    }

    pub fn left_top(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Resolves the first complete encoding into a canonical rect.
    ///
    /// Partial encodings (e.g. `left`, `top` and `width` without `height`)
    /// resolve to `None` on purpose, so the word is skipped.
    pub fn to_rect(&self) -> Option<Rect> {
        if let (Some(x0), Some(y0), Some(x1), Some(y1)) = (self.x0, self.y0, self.x1, self.y1) {
            return Rect::from_corners(x0, y0, x1, y1);
        }
        let (width, height) = (self.width?, self.height?);
        if let (Some(left), Some(top)) = (self.left, self.top) {
            return Rect::from_origin_size(left, top, width, height);
        }
        if let (Some(x), Some(y)) = (self.x, self.y) {
            return Rect::from_origin_size(x, y, width, height);
        }
        None
    }
}

/// One word as returned by a backend, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWord {
    #[serde(default)]
    pub text: String,
    #[serde(default, alias = "boundingBox", alias = "bounding_box")]
    pub bbox: Option<BoxCoords>,
}

impl RawWord {
    pub fn new(text: impl Into<String>, bbox: BoxCoords) -> Self {
        Self {
            text: text.into(),
            bbox: Some(bbox),
        }
    }
}

/// A word with a canonical box in crop-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedWord {
    pub text: String,
    pub bbox: Rect,
}

impl RecognizedWord {
    pub fn new(text: impl Into<String>, bbox: Rect) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// Normalizes backend output once, dropping words without a usable box.
/// Order is preserved; selection tie-breaks depend on it.
pub fn normalize_words(raw: Vec<RawWord>) -> Vec<RecognizedWord> {
    raw.into_iter()
        .filter_map(|word| {
            let bbox = word.bbox.as_ref()?.to_rect();
            match bbox {
                Some(bbox) => Some(RecognizedWord::new(word.text, bbox)),
                None => {
                    tracing::debug!(text = %word.text, "skipping word with malformed bounding box");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_three_box_encodings() {
        let expected = Rect::from_corners(10.0, 20.0, 40.0, 30.0).unwrap();
        assert_eq!(BoxCoords::corners(10.0, 20.0, 40.0, 30.0).to_rect(), Some(expected));
        assert_eq!(BoxCoords::left_top(10.0, 20.0, 30.0, 10.0).to_rect(), Some(expected));
        assert_eq!(BoxCoords::origin_size(10.0, 20.0, 30.0, 10.0).to_rect(), Some(expected));
    }

    #[test]
    fn incomplete_box_is_rejected() {
        let partial = BoxCoords {
            left: Some(1.0),
            top: Some(2.0),
            ..BoxCoords::default()
        };
        assert_eq!(partial.to_rect(), None);
        assert_eq!(BoxCoords::default().to_rect(), None);
    }

    #[test]
    fn deserializes_backend_json_shapes() {
        let json = r#"[
            {"text": "Salvar", "bbox": {"x0": 1, "y0": 2, "x1": 3, "y1": 4}},
            {"text": "Abrir", "boundingBox": {"left": 5, "top": 6, "width": 7, "height": 8}},
            {"text": "Fechar", "bbox": {"x": 9, "y": 10, "width": 1, "height": 1}},
            {"text": "Sem caixa"}
        ]"#;
        let raw: Vec<RawWord> = serde_json::from_str(json).expect("parse words");
        let words = normalize_words(raw);
        assert_eq!(words.len(), 3);
        assert_eq!(words[1].text, "Abrir");
        assert_eq!(words[1].bbox, Rect::from_corners(5.0, 6.0, 12.0, 14.0).unwrap());
        assert_eq!(words[2].bbox.max_x, 10.0);
    }

    #[test]
    fn normalization_preserves_order() {
        let raw = vec![
            RawWord::new("b", BoxCoords::corners(0.0, 0.0, 1.0, 1.0)),
            RawWord {
                text: "skip".into(),
                bbox: None,
            },
            RawWord::new("a", BoxCoords::corners(0.0, 0.0, 1.0, 1.0)),
        ];
        let texts: Vec<_> = normalize_words(raw).into_iter().map(|w| w.text).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }
}
