use tiny_skia::PixmapMut;

use crate::{
    geometry::{Rect, Size},
    widget::{Widget, SizeConstraints},
    theme::Theme,
    renderer::Renderer
};

/// Drives layout and painting of a widget into a pixmap.
pub struct Ui {
    renderer: Renderer,
    theme: Theme,
    scale_factor: f32
}

pub struct LayoutCtx<'a> {
    renderer: &'a mut Renderer,
    theme: &'a Theme
}

pub struct DrawCtx<'a> {
    renderer: &'a mut Renderer,
    theme: &'a Theme
}

impl Ui {
    #[inline]
    pub fn new(theme: Theme) -> Self {
        Self {
            renderer: Renderer::new(),
            theme,
            scale_factor: 1f32
        }
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Sets the ratio of physical to logical pixels.
    #[inline]
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        if scale_factor > 0f32 && scale_factor.is_finite() {
            self.scale_factor = scale_factor;
        } else {
            log::warn!("Ignoring invalid scale factor {}.", scale_factor);
        }
    }

    /// Measures `widget` against `size` and places it at the origin.
    pub fn layout<W: Widget>(&mut self, widget: &mut W, size: Size) -> Size {
        let mut ctx = LayoutCtx::new(&mut self.renderer, &self.theme);

        let size = widget.measure(&mut ctx, SizeConstraints::new(Size::ZERO, size));
        widget.layout(&mut ctx, Rect::from_size(size));

        size
    }

    pub fn draw<W: Widget>(&mut self, widget: &mut W, pixmap: &mut PixmapMut) {
        let mut ctx = DrawCtx::new(&mut self.renderer, &self.theme);
        widget.paint(&mut ctx);

        self.renderer.render(pixmap, self.scale_factor);
    }
}

impl<'a> LayoutCtx<'a> {
    #[inline]
    pub(crate) fn new(renderer: &'a mut Renderer, theme: &'a Theme) -> Self {
        Self { renderer, theme }
    }

    #[inline]
    pub fn renderer(&mut self) -> &mut Renderer {
        self.renderer
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        self.theme
    }
}

impl<'a> DrawCtx<'a> {
    #[inline]
    pub(crate) fn new(renderer: &'a mut Renderer, theme: &'a Theme) -> Self {
        Self { renderer, theme }
    }

    #[inline]
    pub fn renderer(&mut self) -> &mut Renderer {
        self.renderer
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        self.theme
    }
}
