//! Rectangles and crop math for the label suggester.

use serde::{Deserialize, Serialize};

use crate::config::SuggestConfig;

/// A point in frame (or crop-local) pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Canonical axis-aligned box every backend encoding is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Rect {
    /// Builds a rect from two corners in any order. Non-finite input yields `None`.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Option<Self> {
        if ![x0, y0, x1, y1].iter().all(|v| v.is_finite()) {
            return None;
        }
        Some(Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        })
    }

    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        Self::from_corners(x, y, x + width, y + height)
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Edge-inclusive containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Signed vertical overlap with the band `[top, bottom]`; `<= 0` means disjoint or touching.
    pub fn vertical_overlap(&self, top: f64, bottom: f64) -> f64 {
        self.max_y.min(bottom) - self.min_y.max(top)
    }
}

/// Region of the frame handed to the recognition backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Centers a crop on `click`, then shifts it back inside the frame.
    ///
    /// The crop never shrinks to stay inside the frame, except when the frame
    /// itself is smaller than the minimum crop size, where the crop becomes the
    /// whole frame on that axis.
    pub fn around(click: Point, frame_width: u32, frame_height: u32, config: &SuggestConfig) -> Self {
        let width = crop_extent(
            frame_width,
            config.crop_min_width,
            config.crop_width_ratio,
        );
        let height = crop_extent(
            frame_height,
            config.crop_min_height,
            config.crop_height_ratio,
        );
        Self {
            x: crop_origin(click.x, width, frame_width),
            y: crop_origin(click.y, height, frame_height),
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Translates a frame-space point into crop-local space.
    pub fn to_local(&self, p: Point) -> Point {
        Point::new(p.x - self.x as f64, p.y - self.y as f64)
    }
}

fn crop_extent(frame: u32, min: u32, ratio: f64) -> u32 {
    let scaled = (frame as f64 * ratio).round() as u32;
    scaled.max(min).min(frame.max(1))
}

fn crop_origin(center: f64, extent: u32, frame: u32) -> u32 {
    let half = (extent as f64 / 2.0).round();
    let max_origin = frame.saturating_sub(extent) as f64;
    (center.round() - half).clamp(0.0, max_origin) as u32
}
