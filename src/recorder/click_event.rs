use serde::{Deserialize, Serialize};

use crate::labeling::Point;

/// On-screen rectangle where the captured video is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps a click in view coordinates to frame pixel coordinates.
///
/// Returns `None` when the click lands outside the view or the view has no area.
pub fn frame_point_from_view(
    view: &ViewRect,
    frame_width: u32,
    frame_height: u32,
    client_x: f64,
    client_y: f64,
) -> Option<Point> {
    if view.width <= 0.0 || view.height <= 0.0 {
        return None;
    }
    let rel_x = client_x - view.left;
    let rel_y = client_y - view.top;
    if rel_x < 0.0 || rel_y < 0.0 || rel_x > view.width || rel_y > view.height {
        return None;
    }

    let scale_x = frame_width as f64 / view.width;
    let scale_y = frame_height as f64 / view.height;
    Some(Point::new(
        (rel_x * scale_x).round(),
        (rel_y * scale_y).round(),
    ))
}

/// Inclusive bounds check: `0 <= x <= width`, `0 <= y <= height`.
pub fn is_within_frame(click: Point, frame_width: u32, frame_height: u32) -> bool {
    click.x.is_finite()
        && click.y.is_finite()
        && (0.0..=frame_width as f64).contains(&click.x)
        && (0.0..=frame_height as f64).contains(&click.y)
}
