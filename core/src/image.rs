use std::{
    io,
    sync::Arc,
    fmt::{self, Display, Formatter}
};

use tiny_skia::{
    Pixmap as SkiaPixmap, PixmapRef, Paint, Shader,
    BlendMode, Transform
};

use crate::{
    color::Color,
    geometry::{IntRect, Size}
};

/// An immutable, premultiplied RGBA pixel buffer. Clones share the pixels.
#[derive(Clone, Debug)]
pub struct Bitmap {
    pixmap: Arc<SkiaPixmap>
}

/// A resolved image resource, before rasterization.
pub enum Drawable {
    Bitmap(Bitmap),
    #[cfg(feature = "svg")]
    Vector(resvg::usvg::Tree)
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ColorFilter {
    /// Replaces the color of every pixel with the given color while
    /// keeping the pixel's alpha, i.e. source-atop compositing of a
    /// solid color onto the image.
    SourceAtop(Color)
}

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    DecodeError(String),
    InvalidSize,
    Unsupported,
    /// No asset is registered under the requested resource id.
    NotFound(u32)
}

impl Bitmap {
    #[inline]
    pub fn new(pixmap: SkiaPixmap) -> Self {
        Self { pixmap: Arc::new(pixmap) }
    }

    pub fn decode_png(data: &[u8]) -> Result<Self, Error> {
        let pixmap = SkiaPixmap::decode_png(data)
            .map_err(|x| Error::DecodeError(x.to_string()))?;

        Ok(Self::new(pixmap))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The full bounds of the buffer: `[0, 0, width, height]`.
    #[inline]
    pub fn bounds(&self) -> IntRect {
        IntRect::new(0, 0, self.width() as i32, self.height() as i32)
    }

    #[inline]
    pub fn as_pixmap(&self) -> PixmapRef<'_> {
        (*self.pixmap).as_ref()
    }

    /// Returns `true` if both bitmaps point to the same pixel buffer.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixmap, &other.pixmap)
    }

    /// Reads a single pixel with its color channels demultiplied.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let pixel = self.pixmap.pixel(x, y)?.demultiply();

        Some(Color::rgba(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()))
    }
}

impl Drawable {
    /// The natural pixel size of the asset.
    pub fn intrinsic_size(&self) -> Size {
        match self {
            Self::Bitmap(bitmap) =>
                Size::new(bitmap.width() as f32, bitmap.height() as f32),
            #[cfg(feature = "svg")]
            Self::Vector(tree) => {
                let size = tree.size();

                Size::new(size.width(), size.height())
            }
        }
    }

    /// Produces a pixel buffer at the drawable's intrinsic size. Raster
    /// drawables hand out their existing buffer without copying.
    pub fn rasterize(self) -> Result<Bitmap, Error> {
        match self {
            Self::Bitmap(bitmap) => Ok(bitmap),
            #[cfg(feature = "svg")]
            Self::Vector(tree) => {
                let size = tree.size();
                let width = size.width().ceil() as u32;
                let height = size.height().ceil() as u32;

                let mut pixmap = SkiaPixmap::new(width, height)
                    .ok_or(Error::InvalidSize)?;

                resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
                log::debug!("Rasterized vector drawable at {}x{}", width, height);

                Ok(Bitmap::new(pixmap))
            }
        }
    }
}

impl ColorFilter {
    /// Returns a filtered copy of `bitmap`. A fully transparent color leaves
    /// the image unchanged so the original buffer is shared in that case.
    pub fn apply(&self, bitmap: &Bitmap) -> Bitmap {
        match *self {
            Self::SourceAtop(color) => {
                if color.is_transparent() {
                    return bitmap.clone();
                }

                let mut pixmap = (*bitmap.pixmap).clone();
                let rect = tiny_skia::Rect::from_xywh(
                    0f32,
                    0f32,
                    pixmap.width() as f32,
                    pixmap.height() as f32
                );

                if let Some(rect) = rect {
                    let mut paint = Paint::default();
                    paint.shader = Shader::SolidColor(color.into());
                    paint.blend_mode = BlendMode::SourceAtop;

                    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
                }

                Bitmap::new(pixmap)
            }
        }
    }
}

impl fmt::Debug for Drawable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let size = self.intrinsic_size();

        match self {
            Self::Bitmap(_) => write!(f, "Drawable::Bitmap({}x{})", size.width, size.height),
            #[cfg(feature = "svg")]
            Self::Vector(_) => write!(f, "Drawable::Vector({}x{})", size.width, size.height)
        }
    }
}

impl From<io::Error> for Error {
    #[inline]
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl Display for Error {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => Display::fmt(err, f),
            Self::DecodeError(err) => f.write_str(err),
            Self::InvalidSize => f.write_str("Image has an invalid (zero) size."),
            Self::Unsupported => f.write_str("Unsupported image format."),
            Self::NotFound(id) => write!(f, "No resource registered with id {}.", id)
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A 24x24 viewbox with a filled 12x12 square in the middle.
    pub(crate) const SQUARE_SVG: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
  <rect x="6" y="6" width="12" height="12" fill="#00ff00"/>
</svg>"##;

    pub(crate) fn solid_bitmap(width: u32, height: u32, color: Color) -> Bitmap {
        let mut pixmap = SkiaPixmap::new(width, height).unwrap();
        pixmap.fill(color.into());

        Bitmap::new(pixmap)
    }

    #[test]
    fn raster_drawable_is_not_copied() {
        let bitmap = solid_bitmap(4, 4, Color::BLUE);
        let rasterized = Drawable::Bitmap(bitmap.clone()).rasterize().unwrap();

        assert!(rasterized.ptr_eq(&bitmap));
        assert_eq!(rasterized.bounds(), IntRect::new(0, 0, 4, 4));
    }

    #[test]
    fn transparent_filter_shares_buffer() {
        let bitmap = solid_bitmap(2, 2, Color::BLUE);
        let filtered = ColorFilter::SourceAtop(Color::TRANSPARENT).apply(&bitmap);

        assert!(filtered.ptr_eq(&bitmap));
    }

    #[test]
    fn source_atop_keeps_alpha_shape() {
        let mut pixmap = SkiaPixmap::new(2, 1).unwrap();
        pixmap.pixels_mut()[0] = tiny_skia::ColorU8::from_rgba(0, 0, 255, 128).premultiply();

        let filtered = ColorFilter::SourceAtop(Color::RED).apply(&Bitmap::new(pixmap));

        let tinted = filtered.pixel(0, 0).unwrap();
        assert_eq!(tinted.a, 128);
        assert!(tinted.r >= 250);
        assert_eq!((tinted.g, tinted.b), (0, 0));

        assert_eq!(filtered.pixel(1, 0), Some(Color::TRANSPARENT));
    }

    #[cfg(feature = "svg")]
    #[test]
    fn vector_rasterized_and_tinted() {
        let options = resvg::usvg::Options::default();
        let tree = resvg::usvg::Tree::from_data(SQUARE_SVG, &options).unwrap();
        let drawable = Drawable::Vector(tree);

        assert_eq!(drawable.intrinsic_size(), Size::new(24f32, 24f32));

        let bitmap = drawable.rasterize().unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (24, 24));

        let tint = Color::rgb(200, 30, 90);
        let tinted = ColorFilter::SourceAtop(tint).apply(&bitmap);

        assert_eq!(tinted.pixel(12, 12), Some(tint));
        assert_eq!(tinted.pixel(1, 1), Some(Color::TRANSPARENT));
        assert_eq!(tinted.pixel(23, 23), Some(Color::TRANSPARENT));
        // The source buffer is left untouched.
        assert_eq!(bitmap.pixel(12, 12), Some(Color::GREEN));
    }
}
