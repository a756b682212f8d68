// CPU-side 2D drawing context
//
// Mirrors the handful of canvas operations the game needs: clearing, filling,
// and blitting a sub-rectangle of an image. The renderer presents the finished
// framebuffer once per frame.

use crate::core::math::Rect;
use image::{imageops, Pixel, Rgba, RgbaImage};

/// RGBA color with 8 bits per channel
pub type Color = Rgba<u8>;

/// Fully transparent black, the result of `clear_rect`
pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);

/// Drawing operations available to game code
pub trait DrawContext {
    /// Surface size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    /// Rectangle covering the whole surface
    fn bounds(&self) -> Rect {
        let (width, height) = self.size();
        Rect::full(width, height)
    }

    /// Reset every pixel inside `rect` to transparent
    fn clear_rect(&mut self, rect: Rect);

    /// Paint `rect` with `color` (alpha blended)
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Copy the `src` region of `image` into the `dst` region, scaling with nearest-neighbour
    fn draw_image(&mut self, image: &RgbaImage, src: Rect, dst: Rect);
}

/// Fixed-size RGBA framebuffer
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Create a transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, TRANSPARENT),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read a single pixel
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x < self.width() && y < self.height() {
            Some(*self.pixels.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Raw RGBA bytes, row-major, 4 bytes per pixel
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }
}

impl DrawContext for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some(span) = rect.clip_to(self.width(), self.height()) else {
            return;
        };

        for y in span.y0..span.y1 {
            for x in span.x0..span.x1 {
                self.pixels.put_pixel(x, y, TRANSPARENT);
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(span) = rect.clip_to(self.width(), self.height()) else {
            return;
        };

        for y in span.y0..span.y1 {
            for x in span.x0..span.x1 {
                self.pixels.get_pixel_mut(x, y).blend(&color);
            }
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, src: Rect, dst: Rect) {
        if src.is_empty() || dst.is_empty() || image.width() == 0 || image.height() == 0 {
            return;
        }

        if src.width == dst.width && src.height == dst.height {
            self.blit(image, src, dst);
        } else {
            self.blit_scaled(image, src, dst);
        }
    }
}

impl Canvas {
    /// Unscaled copy of `src` with its top-left corner snapped to the pixel grid
    fn blit(&mut self, image: &RgbaImage, src: Rect, dst: Rect) {
        let frame = imageops::crop_imm(
            image,
            src.x.max(0.0).floor() as u32,
            src.y.max(0.0).floor() as u32,
            src.width.round() as u32,
            src.height.round() as u32,
        );
        imageops::overlay(&mut self.pixels, &*frame, snap(dst.x), snap(dst.y));
    }

    /// Nearest-neighbour copy of `src` stretched over `dst`
    fn blit_scaled(&mut self, image: &RgbaImage, src: Rect, dst: Rect) {
        let Some(span) = dst.clip_to(self.width(), self.height()) else {
            return;
        };

        let scale_x = src.width / dst.width;
        let scale_y = src.height / dst.height;

        for y in span.y0..span.y1 {
            let v = src.y + (y as f32 + 0.5 - dst.y) * scale_y;
            if v < 0.0 || v >= src.bottom() {
                continue;
            }
            let sy = v.floor() as u32;
            if sy >= image.height() {
                continue;
            }

            for x in span.x0..span.x1 {
                let u = src.x + (x as f32 + 0.5 - dst.x) * scale_x;
                if u < 0.0 || u >= src.right() {
                    continue;
                }
                let sx = u.floor() as u32;
                if sx >= image.width() {
                    continue;
                }

                self.pixels.get_pixel_mut(x, y).blend(image.get_pixel(sx, sy));
            }
        }
    }
}

/// First pixel whose centre lies at or after `coord`, matching `Rect::clip_to`
fn snap(coord: f32) -> i64 {
    (coord - 0.5).ceil() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Rgba([255, 0, 0, 255]);
    const BLUE: Color = Rgba([0, 0, 255, 255]);
    const BLACK: Color = Rgba([0, 0, 0, 255]);

    /// Two 2x2 frames side by side: red then blue
    fn two_frame_sheet() -> RgbaImage {
        RgbaImage::from_fn(4, 2, |x, _| if x < 2 { RED } else { BLUE })
    }

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(8, 4);
        assert_eq!(canvas.size(), (8, 4));
        assert_eq!(canvas.pixel(0, 0), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(8, 0), None);
        assert_eq!(canvas.as_bytes().len(), 8 * 4 * 4);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill_rect(canvas.bounds(), BLACK);
        assert!(canvas.as_bytes().chunks(4).all(|p| p == [0, 0, 0, 255]));

        canvas.clear_rect(Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(canvas.pixel(1, 1), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(2, 2), Some(BLACK));
    }

    #[test]
    fn test_draw_sub_image() {
        let mut canvas = Canvas::new(16, 16);
        canvas.fill_rect(canvas.bounds(), BLACK);

        // Second frame of the strip
        canvas.draw_image(
            &two_frame_sheet(),
            Rect::new(2.0, 0.0, 2.0, 2.0),
            Rect::new(10.0, 10.0, 2.0, 2.0),
        );

        assert_eq!(canvas.pixel(10, 10), Some(BLUE));
        assert_eq!(canvas.pixel(11, 11), Some(BLUE));
        assert_eq!(canvas.pixel(12, 10), Some(BLACK));
        assert_eq!(canvas.pixel(9, 10), Some(BLACK));
    }

    #[test]
    fn test_draw_image_scaled() {
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_image(
            &two_frame_sheet(),
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Rect::new(0.0, 0.0, 4.0, 4.0),
        );

        assert_eq!(canvas.pixel(3, 3), Some(RED));
        assert_eq!(canvas.pixel(4, 4), Some(TRANSPARENT));
    }

    #[test]
    fn test_draw_clipped_at_edges() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_image(
            &two_frame_sheet(),
            Rect::new(0.0, 0.0, 4.0, 2.0),
            Rect::new(-2.0, 3.0, 4.0, 2.0),
        );

        // Only the blue half lands on screen, and only its first row
        assert_eq!(canvas.pixel(0, 3), Some(BLUE));
        assert_eq!(canvas.pixel(1, 3), Some(BLUE));
        assert_eq!(canvas.pixel(2, 3), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(0, 2), Some(TRANSPARENT));
    }

    #[test]
    fn test_draw_outside_is_noop() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_image(
            &two_frame_sheet(),
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Rect::new(100.0, 100.0, 2.0, 2.0),
        );
        assert!(canvas.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_empty_image_is_noop() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_image(
            &RgbaImage::new(0, 0),
            Rect::new(0.0, 0.0, 0.0, 0.0),
            Rect::new(0.0, 0.0, 0.0, 0.0),
        );
        assert!(canvas.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_transparent_texels_keep_background() {
        let mut canvas = Canvas::new(2, 1);
        canvas.fill_rect(canvas.bounds(), BLACK);

        let sprite = RgbaImage::from_fn(2, 1, |x, _| if x == 0 { TRANSPARENT } else { RED });
        canvas.draw_image(&sprite, Rect::new(0.0, 0.0, 2.0, 1.0), Rect::new(0.0, 0.0, 2.0, 1.0));

        assert_eq!(canvas.pixel(0, 0), Some(BLACK));
        assert_eq!(canvas.pixel(1, 0), Some(RED));
    }

    #[test]
    fn test_half_alpha_fill_blends_over_background() {
        let mut canvas = Canvas::new(1, 1);
        canvas.fill_rect(canvas.bounds(), BLACK);
        canvas.fill_rect(canvas.bounds(), Rgba([255, 255, 255, 128]));

        let pixel = canvas.pixel(0, 0).unwrap();
        assert_eq!(pixel.0[3], 255);
        assert!((pixel.0[0] as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_fractional_position_snaps_to_nearest_pixel() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_image(
            &two_frame_sheet(),
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Rect::new(1.4, 0.6, 2.0, 2.0),
        );

        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(1, 0), Some(TRANSPARENT));
        assert_eq!(canvas.pixel(3, 1), Some(TRANSPARENT));
    }

    #[test]
    fn test_src_past_sheet_edge_is_cropped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_image(
            &two_frame_sheet(),
            Rect::new(3.0, 0.0, 2.0, 2.0),
            Rect::new(0.0, 0.0, 2.0, 2.0),
        );

        assert_eq!(canvas.pixel(0, 0), Some(BLUE));
        assert_eq!(canvas.pixel(1, 0), Some(TRANSPARENT));
    }
}
