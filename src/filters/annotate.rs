//! Detection annotation renderer.
//!
//! Thin compositing kernel that draws detector output onto an image: a
//! rectangle outline per detection plus a label bar with the label text and
//! confidence percentage. Text comes from a built-in 5x7 bitmap font so the
//! kernel stays self-contained; lowercase is folded to uppercase and
//! unsupported characters render blank.

use ndarray::{Array3, ArrayView3};

use crate::detect::DetectedObject;

/// Outline and label bar color.
const BOX_COLOR: [u8; 4] = [0, 255, 0, 255];
/// Label text color.
const TEXT_COLOR: [u8; 4] = [0, 0, 0, 255];

const GLYPH_WIDTH: usize = 5;
const GLYPH_HEIGHT: usize = 7;
/// Glyph advance: 5 pixel columns plus 1 of spacing.
const GLYPH_ADVANCE: usize = GLYPH_WIDTH + 1;
const OUTLINE_THICKNESS: usize = 2;
const LABEL_PAD: usize = 2;

/// 5x7 glyph rows, bit 4 is the leftmost column.
fn glyph(c: char) -> [u8; GLYPH_HEIGHT] {
    match c.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '%' => [0b11001, 0b11010, 0b00010, 0b00100, 0b01000, 0b01011, 0b10011],
        _ => [0; GLYPH_HEIGHT],
    }
}

/// Set one pixel, silently skipping coordinates off the canvas.
#[inline]
fn put_pixel(canvas: &mut Array3<u8>, x: i64, y: i64, color: [u8; 4]) {
    let (height, width, _) = canvas.dim();
    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
        return;
    }
    for (c, &v) in color.iter().enumerate() {
        canvas[[y as usize, x as usize, c]] = v;
    }
}

/// Fill an axis-aligned rectangle, clipped to the canvas.
fn fill_rect(canvas: &mut Array3<u8>, x: i64, y: i64, w: i64, h: i64, color: [u8; 4]) {
    for py in y..y + h {
        for px in x..x + w {
            put_pixel(canvas, px, py, color);
        }
    }
}

/// Draw a rectangle outline of `OUTLINE_THICKNESS` pixels.
fn draw_outline(canvas: &mut Array3<u8>, x: i64, y: i64, w: i64, h: i64, color: [u8; 4]) {
    let t = OUTLINE_THICKNESS as i64;
    fill_rect(canvas, x, y, w, t, color); // top
    fill_rect(canvas, x, y + h - t, w, t, color); // bottom
    fill_rect(canvas, x, y, t, h, color); // left
    fill_rect(canvas, x + w - t, y, t, h, color); // right
}

/// Render one line of 5x7 text with its top-left corner at `(x, y)`.
fn draw_text(canvas: &mut Array3<u8>, x: i64, y: i64, text: &str, color: [u8; 4]) {
    let mut pen_x = x;
    for ch in text.chars() {
        let rows = glyph(ch);
        for (gy, row) in rows.iter().enumerate() {
            for gx in 0..GLYPH_WIDTH {
                if row & (1 << (GLYPH_WIDTH - 1 - gx)) != 0 {
                    put_pixel(canvas, pen_x + gx as i64, y + gy as i64, color);
                }
            }
        }
        pen_x += GLYPH_ADVANCE as i64;
    }
}

/// Draw bounding boxes and labels for a set of detections.
///
/// Each detection gets a 2px outline around its bounding box and a filled
/// label bar reading `LABEL NN%` above the box (or inside its top edge when
/// the box touches the top of the image). Detections are drawn in order, so
/// later ones overdraw earlier ones where they overlap.
///
/// # Arguments
/// * `input` - RGBA image of shape (height, width, 4)
/// * `detections` - Detector output to render
///
/// # Returns
/// Annotated copy of the image
pub fn draw_detections(input: ArrayView3<u8>, detections: &[DetectedObject]) -> Array3<u8> {
    let mut canvas = input.to_owned();

    for det in detections {
        let x = det.bounding_box.x.round() as i64;
        let y = det.bounding_box.y.round() as i64;
        let w = (det.bounding_box.width.round() as i64).max(1);
        let h = (det.bounding_box.height.round() as i64).max(1);

        draw_outline(&mut canvas, x, y, w, h, BOX_COLOR);

        let text = format!(
            "{} {}%",
            det.label,
            (det.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
        );
        let bar_w = (text.chars().count() * GLYPH_ADVANCE + 2 * LABEL_PAD) as i64;
        let bar_h = (GLYPH_HEIGHT + 2 * LABEL_PAD) as i64;
        // Above the box when there is room, otherwise inside the top edge.
        let bar_y = if y >= bar_h { y - bar_h } else { y };

        fill_rect(&mut canvas, x, bar_y, bar_w, bar_h, BOX_COLOR);
        draw_text(
            &mut canvas,
            x + LABEL_PAD as i64,
            bar_y + LABEL_PAD as i64,
            &text,
            TEXT_COLOR,
        );
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::BoundingBox;

    fn detection(x: f32, y: f32, w: f32, h: f32) -> DetectedObject {
        DetectedObject {
            label: "cat".to_string(),
            confidence: 0.87,
            bounding_box: BoundingBox {
                x,
                y,
                width: w,
                height: h,
            },
            detail: None,
        }
    }

    #[test]
    fn test_outline_lands_on_box_edges() {
        let img = Array3::<u8>::zeros((40, 40, 4));
        let result = draw_detections(img.view(), &[detection(10.0, 12.0, 20.0, 15.0)]);

        // Top-left corner of the outline.
        assert_eq!(result[[12, 10, 1]], 255);
        // Center of the box is untouched.
        assert_eq!(result[[19, 20, 1]], 0);
        assert_eq!(result.dim(), (40, 40, 4));
    }

    #[test]
    fn test_label_bar_sits_above_box() {
        let img = Array3::<u8>::zeros((40, 60, 4));
        let result = draw_detections(img.view(), &[detection(5.0, 20.0, 30.0, 15.0)]);
        // Bar occupies rows y-11 .. y-1.
        assert_eq!(result[[10, 6, 1]], 255);
    }

    #[test]
    fn test_offscreen_box_is_clipped_not_panicking() {
        let img = Array3::<u8>::zeros((10, 10, 4));
        let result = draw_detections(img.view(), &[detection(-5.0, -5.0, 30.0, 30.0)]);
        assert_eq!(result.dim(), (10, 10, 4));
    }

    #[test]
    fn test_empty_detections_is_noop() {
        let mut img = Array3::<u8>::zeros((8, 8, 4));
        img[[3, 3, 0]] = 99;
        let result = draw_detections(img.view(), &[]);
        assert_eq!(result, img);
    }
}
