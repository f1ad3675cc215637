use crate::buffer::RgbBuffer;
use crate::theme::Rgb;

/// Draw a filled square centred on `(cx, cy)`, clipped to the canvas.
///
/// Marker projections can land off-canvas (markers are never culled by
/// the viewport test); clipping here keeps the draw in bounds.
pub fn draw_square(buffer: &mut RgbBuffer, cx: i32, cy: i32, size: u32, color: Rgb) {
    let half = size as i32 / 2;
    buffer.fill_rect(cx - half, cy - half, size, size, color);
}
