//! Coordinate mapping from surface positions to symbol centers.

/// Offsets a surface reference point by half the template size.
///
/// Halves use integer division so the result lands on the template's central
/// pixel index; for even sizes that is the pixel just right of/below center.
/// For odd sizes this differs from `x + w as f32 / 2.0` by half a pixel: a
/// 7 px wide template offsets by 3, not 3.5.
pub fn to_symbol_center(x: f32, y: f32, template_width: usize, template_height: usize) -> (f32, f32) {
    (
        x + (template_width / 2) as f32,
        y + (template_height / 2) as f32,
    )
}
