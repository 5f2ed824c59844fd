//! Owned 2D pixel grids used as diffuse textures and blit sources. Pixels are
//! stored in B,G,R byte order; the loader swaps channels once so nothing
//! downstream ever reorders them.

use std::path::Path;

use crate::{color::Color, error::RenderError};

#[derive(Clone, Debug, Default)]
pub struct Image {
    pub pixels: Vec<Color>,
    pub width: usize,
    pub height: usize,
    /// Channel count of the source file, retained from load.
    pub channels: u8,
}

impl Image {
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Self {
        assert!(
            width * height == 0 || pixels.len() == width * height,
            "pixel grid does not match {width}x{height}"
        );

        Self {
            pixels,
            width,
            height,
            channels: 3,
        }
    }

    /// A 1×1 image of a single color; handy as a stand-in diffuse texture.
    pub fn solid(color: Color) -> Self {
        Self::from_pixels(1, 1, vec![color])
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RenderError::MissingFilePath(path.to_path_buf()));
        }

        let decoded = image::open(path)?;
        let channels = decoded.color().channel_count();

        let rgb = decoded.into_rgb8();
        let (width, height) = rgb.dimensions();

        // Swap into BGR order once, at load.
        let pixels = rgb
            .pixels()
            .map(|p| Color::new(p.0[0], p.0[1], p.0[2]))
            .collect();

        Ok(Self {
            pixels,
            width: width as usize,
            height: height as usize,
            channels,
        })
    }

    /// Direct texel read. Out-of-range reads return a sentinel pink marking
    /// the call as malformed.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        if x >= self.width || y >= self.height {
            return Color::new(200, 100, 100);
        }
        self.pixels[y * self.width + x]
    }

    /// Nearest-neighbor sample at normalized coordinates. Outside [0, 1] (or
    /// on an empty image) there is nothing to sample and black is returned.
    pub fn sample(&self, u: f32, v: f32) -> Color {
        if self.width == 0 || !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return Color::BLACK;
        }

        let x = (u * (self.width - 1) as f32) as usize;
        let y = (v * (self.height - 1) as f32) as usize;

        self.pixels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Image {
        // 2x2: red, black / black, red.
        Image::from_pixels(
            2,
            2,
            vec![
                Color::new(255, 0, 0),
                Color::BLACK,
                Color::BLACK,
                Color::new(255, 0, 0),
            ],
        )
    }

    #[test]
    fn sample_quadrants() {
        let img = checker();
        assert_eq!(img.sample(0.0, 0.0), Color::new(255, 0, 0));
        assert_eq!(img.sample(1.0, 0.0), Color::BLACK);
        assert_eq!(img.sample(0.0, 1.0), Color::BLACK);
        assert_eq!(img.sample(1.0, 1.0), Color::new(255, 0, 0));
    }

    #[test]
    fn sample_out_of_range_is_black() {
        let img = checker();
        assert_eq!(img.sample(-0.1, 0.5), Color::BLACK);
        assert_eq!(img.sample(0.5, 1.1), Color::BLACK);
        assert_eq!(Image::default().sample(0.5, 0.5), Color::BLACK);
    }

    #[test]
    fn pixel_out_of_range_is_sentinel() {
        let img = checker();
        assert_eq!(img.pixel(2, 0), Color::new(200, 100, 100));
        assert_eq!(img.pixel(0, 0), Color::new(255, 0, 0));
    }
}
