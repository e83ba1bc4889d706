//! Offscreen raster surfaces

use image::{imageops, Rgba, RgbaImage};

/// Translation applied when drawing a page onto a surface, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

impl Offset {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An RGBA raster. Pixels nothing was drawn on stay fully transparent.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// A transparent surface of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Draw `content` onto a new `width` x `height` surface with its origin
    /// moved to `origin`. Whatever falls outside the surface is clipped.
    pub fn place(content: &RgbaImage, width: u32, height: u32, origin: Offset) -> Self {
        let mut surface = Self::new(width, height);
        imageops::replace(
            &mut surface.image,
            content,
            origin.x.round() as i64,
            origin.y.round() as i64,
        );
        surface
    }

    /// Copy the `width` x `height` region at the top-left corner into a new
    /// surface of exactly that size. Parts of the region beyond this
    /// surface's edges come out transparent.
    pub fn crop_top_left(&self, width: u32, height: u32) -> Self {
        let mut cropped = Self::new(width, height);
        imageops::replace(&mut cropped.image, &self.image, 0, 0);
        cropped
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.image.get_pixel(x, y))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
