mod text;

use std::mem;

use smallvec::SmallVec;
use tiny_skia::{
    PixmapMut, PathBuilder, FillRule, Transform,
    Paint, Shader, Stroke, PixmapPaint,
    FilterQuality, BlendMode
};

use crate::{
    geometry::{Rect, Point, Size, IntRect},
    color::Color,
    draw::{Quad, BorderRadius, TextInfo},
    image::Bitmap
};

/// Records drawing commands during a paint pass and rasterizes them
/// into a pixmap on `render()`.
pub struct Renderer {
    /// Created on first use so that painting without text never loads fonts.
    text_renderer: Option<text::Renderer>,
    commands: Vec<Command>,
    /// Number of `save()` calls not yet matched by a `restore()`.
    save_depth: usize
}

#[derive(Debug)]
pub(crate) enum Command {
    Draw(Primitive),
    Save,
    Translate(f32, f32),
    Restore
}

#[derive(Debug)]
pub(crate) enum Primitive {
    Quad {
        rect: Rect,
        background: Color,
        border_radius: BorderRadius,
        border_width: f32,
        border_color: Color
    },
    Text {
        key: text::CacheKey,
        color: Color,
        rect: Rect
    },
    Bitmap {
        bitmap: Bitmap,
        src: IntRect,
        dst: IntRect
    }
}

impl Renderer {
    #[inline]
    pub fn new() -> Self {
        Self {
            text_renderer: None,
            commands: Vec::with_capacity(64),
            save_depth: 0
        }
    }

    #[inline]
    fn text_renderer(&mut self) -> &mut text::Renderer {
        self.text_renderer.get_or_insert_with(text::Renderer::new)
    }

    #[inline]
    pub fn measure_text(&mut self, info: &TextInfo, size: Size) -> Size {
        self.text_renderer().measure(info, size)
    }

    #[inline]
    pub fn fill_quad(&mut self, quad: Quad) {
        self.commands.push(
            Command::Draw(Primitive::Quad {
                rect: quad.rect,
                background: quad.style.background,
                border_radius: quad.style.border_radius,
                border_width: quad.style.border_width,
                border_color: quad.style.border_color
            })
        );
    }

    #[inline]
    pub fn fill_text(&mut self, info: &TextInfo, rect: Rect, color: Color) {
        if info.text.is_empty() {
            return;
        }

        let key = self.text_renderer().ensure_is_cached(info, rect.size());
        self.commands.push(Command::Draw(
            Primitive::Text { key, color, rect }
        ));
    }

    /// Draws the `src` region of `bitmap` scaled into `dst`.
    #[inline]
    pub fn draw_bitmap(&mut self, bitmap: Bitmap, src: IntRect, dst: IntRect) {
        if src.is_empty() || dst.is_empty() {
            return;
        }

        self.commands.push(Command::Draw(
            Primitive::Bitmap { bitmap, src, dst }
        ));
    }

    /// Saves the current canvas translation. Must be paired with `restore()`.
    #[inline]
    pub fn save(&mut self) {
        self.save_depth += 1;
        self.commands.push(Command::Save);
    }

    /// Offsets everything drawn until the matching `restore()`.
    #[inline]
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.commands.push(Command::Translate(dx, dy));
    }

    #[inline]
    pub fn restore(&mut self) {
        if self.save_depth == 0 {
            log::warn!("Renderer::restore() called without a matching save().");

            return;
        }

        self.save_depth -= 1;
        self.commands.push(Command::Restore);
    }

    #[cfg(test)]
    #[inline]
    pub(crate) fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn render(&mut self, pixmap: &mut PixmapMut, scale_factor: f32) {
        let mut saved: SmallVec<[Point; 8]> = SmallVec::new();
        let mut offset = Point::ZERO;

        let mut builder = PathBuilder::new();

        let mut commands = mem::take(&mut self.commands);
        for command in commands.drain(..) {
            let transform = Transform::from_scale(scale_factor, scale_factor)
                .pre_translate(offset.x, offset.y);

            match command {
                Command::Draw(primitive) => {
                    match primitive {
                        Primitive::Quad {
                            rect,
                            background,
                            border_radius,
                            border_width,
                            border_color
                        } => {
                            let radius = border_radius.0;

                            if radius[0] +
                                radius[1] +
                                radius[2] +
                                radius[3] > 0f32
                            {
                                rounded_rect(&mut builder, rect, radius)
                            } else if let Some(rect) = to_skia_rect(rect) {
                                builder.push_rect(rect);
                            }

                            let Some(path) = builder.finish() else {
                                builder = PathBuilder::new();
                                continue;
                            };

                            let mut paint = Paint::default();
                            paint.anti_alias = true;
                            paint.shader = Shader::SolidColor(background.into());

                            pixmap.fill_path(
                                &path,
                                &paint,
                                FillRule::EvenOdd,
                                transform,
                                None
                            );

                            if border_width > 0f32 {
                                paint.shader = Shader::SolidColor(border_color.into());

                                let mut stroke = Stroke::default();
                                stroke.width = border_width;

                                pixmap.stroke_path(
                                    &path,
                                    &paint,
                                    &stroke,
                                    transform,
                                    None
                                )
                            }

                            builder = path.clear();
                        }
                        Primitive::Text { key, color, rect } => {
                            let Some(text_renderer) = self.text_renderer.as_mut() else {
                                continue;
                            };

                            if let Some(texture) = text_renderer.get_texture(
                                key,
                                color,
                                scale_factor
                            ) {
                                let paint = PixmapPaint {
                                    opacity: 1f32,
                                    blend_mode: BlendMode::SourceOver,
                                    quality: FilterQuality::Nearest
                                };

                                pixmap.draw_pixmap(
                                    ((rect.x + offset.x) * scale_factor).round() as i32,
                                    ((rect.y + offset.y) * scale_factor).round() as i32,
                                    texture,
                                    &paint,
                                    // Glyph images are scaled by cosmic-text
                                    Transform::identity(),
                                    None
                                );
                            }
                        }
                        Primitive::Bitmap { bitmap, src, dst } => {
                            let sx = dst.width() as f32 / src.width() as f32;
                            let sy = dst.height() as f32 / src.height() as f32;

                            let transform = transform
                                .pre_translate(dst.left as f32, dst.top as f32)
                                .pre_scale(sx, sy)
                                .pre_translate(-src.left as f32, -src.top as f32);

                            let paint = PixmapPaint {
                                opacity: 1f32,
                                blend_mode: BlendMode::SourceOver,
                                quality: FilterQuality::Bilinear
                            };

                            pixmap.draw_pixmap(
                                0,
                                0,
                                bitmap.as_pixmap(),
                                &paint,
                                transform,
                                None
                            );
                        }
                    }
                }
                Command::Save => saved.push(offset),
                Command::Translate(dx, dy) => {
                    offset.x += dx;
                    offset.y += dy;
                }
                Command::Restore => {
                    if let Some(prev) = saved.pop() {
                        offset = prev;
                    }
                }
            }
        }

        // Assign back the buffer in order to reuse the memory.
        self.commands = commands;
        self.save_depth = 0;

        if let Some(text_renderer) = self.text_renderer.as_mut() {
            text_renderer.trim();
        }
    }
}

impl Default for Renderer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn to_skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    tiny_skia::Rect::from_xywh(
        rect.x,
        rect.y,
        rect.width,
        rect.height
    )
}

#[inline(always)]
fn rounded_rect(
    builder: &mut PathBuilder,
    rect: Rect,
    radius: [f32; 4]
) {
    let [tl, tr, br, bl] = radius;
    let mut cursor = Point::new(rect.x, rect.y + tl);

    builder.move_to(cursor.x, cursor.y);

    builder.cubic_to(
        cursor.x,
        cursor.y,
        cursor.x,
        cursor.y - tl,
        {
            cursor.x += tl;
            cursor.x
        },
        {
            cursor.y -= tl;
            cursor.y
        }
    );

    builder.line_to(
        {
            cursor.x = rect.x + rect.width - tr;
            cursor.x
        },
        cursor.y
    );

    builder.cubic_to(
        cursor.x,
        cursor.y,
        cursor.x + tr,
        cursor.y,
        {
            cursor.x += tr;
            cursor.x
        },
        {
            cursor.y += tr;
            cursor.y
        }
    );

    builder.line_to(
        cursor.x,
        {
            cursor.y = rect.y + rect.height - br;
            cursor.y
        }
    );

    builder.cubic_to(
        cursor.x,
        cursor.y,
        cursor.x,
        cursor.y + br,
        {
            cursor.x -= br;
            cursor.x
        },
        {
            cursor.y += br;
            cursor.y
        }
    );

    builder.line_to(
        {
            cursor.x = rect.x + bl;
            cursor.x
        },
        cursor.y
    );

    builder.cubic_to(
        cursor.x,
        cursor.y,
        cursor.x - bl,
        cursor.y,
        {
            cursor.x -= bl;
            cursor.x
        },
        {
            cursor.y -= bl;
            cursor.y
        }
    );

    builder.close();
}
