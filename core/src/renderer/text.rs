use std::{
    num::NonZeroUsize,
    collections::{HashMap, HashSet, hash_map::Entry},
    hash::{Hash, Hasher}
};

use ahash::AHasher;
use lru::LruCache;
use tiny_skia::{Pixmap, PixmapRef, PixmapPaint, Transform, ColorU8};
use cosmic_text::{
    FontSystem, Buffer, Attrs, Metrics, Shaping,
    SwashCache, SwashContent, Placement
};

use crate::{color::Color, geometry::Size, draw::TextInfo};

const GLYPH_CACHE_SIZE: usize = 64;
const TRIM_ROUNDS: u8 = 3;

pub struct Renderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    cache: HashMap<CacheKey, CachedText>,
    recently_used: HashSet<CacheKey>,
    trim_rounds: u8,
    glyph_cache: LruCache<CachedGlyphKey, CachedGlyph>
}

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub(crate) struct CacheKey(u64);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct CachedGlyphKey {
    swash_key: cosmic_text::CacheKey,
    /// RGB color
    color: [u8; 3]
}

#[derive(Debug)]
struct CachedGlyph {
    image: Pixmap,
    placement: Placement
}

struct CachedText {
    texture: Option<Texture>,
    buffer: Buffer,
    requested_size: Size,
    computed_size: Size
}

struct Texture {
    color: Color,
    scale_factor: f32,
    pixmap: Pixmap
}

struct NoGlyphImage;

impl Renderer {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            cache: HashMap::new(),
            recently_used: HashSet::new(),
            trim_rounds: 0,
            glyph_cache: LruCache::new(
                NonZeroUsize::new(GLYPH_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN)
            )
        }
    }

    pub fn measure(&mut self, info: &TextInfo, size: Size) -> Size {
        let key = CacheKey::new(info);

        match self.cache.entry(key) {
            Entry::Occupied(mut entry) => {
                let text = entry.get_mut();
                text.layout(&mut self.font_system, size);

                text.computed_size
            },
            Entry::Vacant(entry) => {
                let text = CachedText::new(info, &mut self.font_system, size);
                let size = text.computed_size;

                entry.insert(text);

                size
            }
        }
    }

    pub(super) fn trim(&mut self) {
        self.trim_rounds += 1;

        if self.trim_rounds == TRIM_ROUNDS {
            self.trim_rounds = 0;
            self.cache.retain(|key, _| self.recently_used.contains(key));
            self.recently_used.clear();
        }
    }

    pub(super) fn ensure_is_cached(&mut self, info: &TextInfo, size: Size) -> CacheKey {
        let key = CacheKey::new(info);

        match self.cache.entry(key) {
            Entry::Occupied(mut entry) =>
                entry.get_mut().layout(&mut self.font_system, size),
            Entry::Vacant(entry) => {
                entry.insert(CachedText::new(info, &mut self.font_system, size));
            }
        }

        key
    }

    /// Returns `None` for empty text or if `ensure_is_cached()` wasn't called.
    pub(super) fn get_texture(
        &mut self,
        key: CacheKey,
        color: Color,
        scale_factor: f32
    ) -> Option<PixmapRef<'_>> {
        let text = self.cache.get_mut(&key)?;
        self.recently_used.insert(key);

        let is_valid = text.texture.as_ref().is_some_and(|x|
            x.color == color && x.scale_factor == scale_factor
        );

        if !is_valid {
            text.texture = None;

            let mut pixmap = Pixmap::new(
                (text.computed_size.width * scale_factor).ceil() as u32,
                (text.computed_size.height * scale_factor).ceil() as u32
            )?;

            for run in text.buffer.layout_runs() {
                for glyph in run.glyphs {
                    let phys_glyph = glyph.physical((0., 0.), scale_factor);
                    let key = CachedGlyphKey::new(phys_glyph.cache_key, color);

                    let glyph = self.glyph_cache.try_get_or_insert(key, || {
                        rasterize_glyph(
                            &mut self.font_system,
                            &mut self.swash_cache,
                            key
                        )
                    });

                    if let Ok(glyph) = glyph {
                        pixmap.draw_pixmap(
                            phys_glyph.x + glyph.placement.left,
                            phys_glyph.y - glyph.placement.top +
                                (run.line_y * scale_factor).round() as i32,
                            glyph.image.as_ref(),
                            &PixmapPaint::default(),
                            Transform::identity(),
                            None
                        );
                    }
                }
            }

            text.texture = Some(Texture { color, scale_factor, pixmap });
        }

        text.texture.as_ref().map(|x| x.pixmap.as_ref())
    }
}

fn rasterize_glyph(
    font_system: &mut FontSystem,
    cache: &mut SwashCache,
    key: CachedGlyphKey
) -> Result<CachedGlyph, NoGlyphImage> {
    let Some(image) = cache.get_image_uncached(
        font_system,
        key.swash_key
    ) else {
        return Err(NoGlyphImage);
    };

    let placement = image.placement;

    let mut pixmap = Pixmap::new(placement.width, placement.height)
        .ok_or(NoGlyphImage)?;

    let pixels = pixmap.pixels_mut();

    match image.content {
        SwashContent::Color => {
            for (i, pixel) in image.data.chunks_exact(4).enumerate() {
                pixels[i] = ColorU8::from_rgba(
                    pixel[0],
                    pixel[1],
                    pixel[2],
                    pixel[3]
                ).premultiply();
            }
        }
        SwashContent::Mask => {
            let [r, g, b] = key.color;

            for (i, alpha) in image.data.iter().enumerate() {
                pixels[i] = ColorU8::from_rgba(r, g, b, *alpha).premultiply();
            }
        }
        SwashContent::SubpixelMask => { }
    }

    Ok(CachedGlyph { image: pixmap, placement })
}

impl CachedGlyphKey {
    #[inline]
    fn new(swash_key: cosmic_text::CacheKey, color: Color) -> Self {
        Self { swash_key, color: [color.r, color.g, color.b] }
    }
}

impl CachedText {
    fn new(info: &TextInfo, font_system: &mut FontSystem, size: Size) -> Self {
        let line_height = info.line_height.to_absolute(info.size);
        let metrics = Metrics {
            font_size: info.size,
            line_height
        };

        let attrs = Attrs {
            color_opt: None,
            family: info.font.family,
            stretch: info.font.stretch,
            style: info.font.style,
            weight: info.font.weight,
            metadata: 0
        };

        let mut buffer = Buffer::new_empty(metrics);
        buffer.set_size(font_system, size.width, size.height);
        buffer.set_text(font_system, info.text, attrs, Shaping::Advanced);

        let mut text = CachedText {
            texture: None,
            buffer,
            requested_size: size,
            computed_size: Size::ZERO
        };
        text.compute_size();

        text
    }

    #[inline]
    fn layout(&mut self, font_system: &mut FontSystem, size: Size) {
        if self.requested_size == size {
            return;
        }

        self.buffer.set_size(font_system, size.width, size.height);
        self.requested_size = size;

        let prev = self.computed_size;
        self.compute_size();

        if prev != self.computed_size {
            self.texture = None;
        }
    }

    #[inline]
    fn compute_size(&mut self) {
        let mut lines = 0;
        let mut width = 0f32;

        for run in self.buffer.layout_runs() {
            lines += 1;
            width = run.line_w.max(width);
        }

        let line_height = self.buffer.metrics().line_height;
        self.computed_size = Size::new(width, lines as f32 * line_height);
    }
}

impl CacheKey {
    fn new(info: &TextInfo) -> Self {
        let mut hasher = AHasher::default();
        info.text.hash(&mut hasher);
        info.size.to_bits().hash(&mut hasher);
        info.line_height.hash(&mut hasher);
        info.font.hash(&mut hasher);

        Self(hasher.finish())
    }
}
