use image::{imageops, ImageFormat, RgbImage};
use std::io::Cursor;

/// Draw `frame` onto a `width`x`height` surface, scaling when sizes differ.
/// A frame with no pixels leaves the surface blank.
pub fn render_frame(frame: &RgbImage, width: u32, height: u32) -> RgbImage {
    if frame.dimensions() == (width, height) {
        return frame.clone();
    }
    if frame.width() == 0 || frame.height() == 0 {
        return RgbImage::new(width, height);
    }

    imageops::resize(frame, width, height, imageops::FilterType::Triangle)
}

pub fn encode_png(surface: &RgbImage) -> Result<Vec<u8>, image::ImageError> {
    let _span = tracing::debug_span!("encode_png").entered();

    let mut bytes = Vec::new();
    surface.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn scales_frame_to_surface() {
        let frame = RgbImage::from_pixel(64, 48, Rgb([255, 0, 0]));
        let surface = render_frame(&frame, 32, 24);

        assert_eq!(surface.dimensions(), (32, 24));
        let pixel = surface.get_pixel(10, 10);
        assert!(pixel[0] > 250 && pixel[1] < 5 && pixel[2] < 5);
    }

    #[test]
    fn empty_frame_renders_blank() {
        let surface = render_frame(&RgbImage::new(0, 0), 4, 2);
        assert_eq!(surface.dimensions(), (4, 2));
        assert!(surface.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn encodes_png_signature() {
        let bytes = encode_png(&RgbImage::new(2, 2)).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
