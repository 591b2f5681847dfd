//! Pointer marker drawn onto click screenshots.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut, Blend};
use imageproc::point::Point as PixelPoint;

use crate::labeling::Point;

const ARROW_FILL: Rgba<u8> = Rgba([239, 68, 68, 255]);
const ARROW_STROKE: Rgba<u8> = Rgba([220, 38, 38, 255]);
const GLOW_LAYERS: u32 = 6;
const GLOW_LAYER_ALPHA: u8 = 20;

/// Marker radius for a frame: 2.5% of the short side, at least 18 px.
pub fn highlight_radius(width: u32, height: u32) -> f64 {
    (f64::from(width.min(height)) * 0.025).round().max(18.0)
}

/// Draws a red glow around `click` and a red arrow pointing at it (tip on the
/// click, tail towards the lower right).
pub fn draw_click_highlight(image: &mut RgbaImage, click: Point) {
    let r = highlight_radius(image.width(), image.height());
    draw_glow(image, click, r);
    draw_arrow(image, click, r);
}

fn draw_glow(image: &mut RgbaImage, click: Point, r: f64) {
    // Stacked translucent discs, outermost first, approximate the radial falloff.
    let outer = r * 1.6;
    let inner = r * 0.35;
    let center = (click.x.round() as i32, click.y.round() as i32);
    let mut canvas = Blend(image.clone());
    for layer in 0..GLOW_LAYERS {
        let t = f64::from(layer) / f64::from(GLOW_LAYERS - 1);
        let radius = (outer - (outer - inner) * t).round() as i32;
        draw_filled_circle_mut(
            &mut canvas,
            center,
            radius,
            Rgba([239, 68, 68, GLOW_LAYER_ALPHA]),
        );
    }
    *image = canvas.0;
}

fn arrow_outline(click: Point, r: f64) -> [(f64, f64); 7] {
    let size = r * 1.2;
    let head_len = size * 0.58;
    let head_width = size * 0.5;
    let tail_len = size * 0.9;
    let tail_width = (size * 0.14).round().max(2.0);
    let (sin, cos) = (-std::f64::consts::FRAC_PI_4).sin_cos();
    let rot = |px: f64, py: f64| (click.x + px * cos - py * sin, click.y + px * sin + py * cos);
    [
        rot(0.0, 0.0),
        rot(-head_width / 2.0, head_len),
        rot(-tail_width / 2.0, head_len),
        rot(-tail_width / 2.0, head_len + tail_len),
        rot(tail_width / 2.0, head_len + tail_len),
        rot(tail_width / 2.0, head_len),
        rot(head_width / 2.0, head_len),
    ]
}

fn draw_arrow(image: &mut RgbaImage, click: Point, r: f64) {
    let outline = arrow_outline(click, r);
    let mut polygon: Vec<PixelPoint<i32>> = outline
        .iter()
        .map(|&(x, y)| PixelPoint::new(x.round() as i32, y.round() as i32))
        .collect();
    polygon.dedup();
    if polygon.len() >= 3 && polygon.first() != polygon.last() {
        draw_polygon_mut(image, &polygon, ARROW_FILL);
    }
    for (i, &(x, y)) in outline.iter().enumerate() {
        let (nx, ny) = outline[(i + 1) % outline.len()];
        draw_line_segment_mut(image, (x as f32, y as f32), (nx as f32, ny as f32), ARROW_STROKE);
    }
}
