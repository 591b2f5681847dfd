use base64::Engine;
use image::{DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::labeling::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepField {
    Title,
    Description,
    Tag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Name of the clicked item, when one was recognized.
    pub tag: String,
    /// PNG data URL of the captured frame.
    pub screenshot: Option<String>,
    pub click: Option<Point>,
    pub created_at_ms: i64,
}

impl Step {
    pub fn set(&mut self, field: StepField, value: impl Into<String>) {
        let value = value.into();
        match field {
            StepField::Title => self.title = value,
            StepField::Description => self.description = value,
            StepField::Tag => self.tag = value,
        }
    }

    #[cfg(test)]
    pub fn sample() -> Self {
        Self {
            id: "step-001".to_string(),
            title: "Clicado no ponto (10, 20)".to_string(),
            description: String::new(),
            tag: String::new(),
            screenshot: Some("data:image/png;base64,AAAA".to_string()),
            click: Some(Point::new(10.0, 20.0)),
            created_at_ms: 0,
        }
    }
}

/// Encodes a frame as a `data:image/png;base64,...` URL.
pub fn png_data_url(frame: &DynamicImage) -> Result<String, image::ImageError> {
    let mut out = std::io::Cursor::new(Vec::new());
    frame.write_to(&mut out, ImageFormat::Png)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(out.into_inner());
    Ok(format!("data:image/png;base64,{encoded}"))
}
