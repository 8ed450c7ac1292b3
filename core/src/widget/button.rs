use crate::{
    geometry::{Size, Rect},
    ui::{DrawCtx, LayoutCtx},
    draw::{Quad, QuadStyle, TextInfo, LineHeight},
    color::Color,
    theme::Font
};
use super::{
    Widget, Label, SizeConstraints,
    Padding, Length, Alignment, Axis
};

pub type StyleFn = fn() -> Style;

#[derive(Clone, PartialEq, Debug)]
pub struct Style {
    pub quad: QuadStyle,
    /// Falls back to [`crate::Theme::text_color`] if `None`.
    pub text_color: Option<Color>
}

/// A plain text button: a background quad with a centered label.
pub struct Button {
    text: String,
    text_size: Option<f32>,
    font: Option<Font>,
    line_height: LineHeight,
    style: Option<StyleFn>,
    padding: Padding,
    width: Length,
    height: Length,
    rect: Rect,
    text_rect: Rect
}

pub fn default_style() -> Style {
    Style {
        quad: QuadStyle::solid_background(Color::rgb(13, 110, 253))
            .rounded(4f32),
        text_color: None
    }
}

impl Button {
    #[inline]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_size: None,
            font: None,
            line_height: LineHeight::default(),
            style: None,
            padding: Padding::from(4f32),
            width: Length::Fit,
            height: Length::Fit,
            rect: Rect::default(),
            text_rect: Rect::default()
        }
    }

    #[inline]
    pub fn text_size(mut self, size: f32) -> Self {
        self.text_size = Some(size);

        self
    }

    #[inline]
    pub fn font(mut self, font: Font) -> Self {
        self.font = Some(font);

        self
    }

    #[inline]
    pub fn line_height(mut self, line_height: LineHeight) -> Self {
        self.line_height = line_height;

        self
    }

    #[inline]
    pub fn padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = padding.into();

        self
    }

    #[inline]
    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();

        self
    }

    #[inline]
    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();

        self
    }

    #[inline]
    pub fn style(mut self, style: StyleFn) -> Self {
        self.style = Some(style);

        self
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    fn style_fn(&self, ctx: &DrawCtx) -> StyleFn {
        self.style.unwrap_or(ctx.theme().button)
    }

    #[inline]
    fn text_info<'a>(&'a self, ctx_font: Font, ctx_size: f32) -> TextInfo<'a> {
        TextInfo::new(&self.text, self.text_size.unwrap_or(ctx_size))
            .with_font(self.font.unwrap_or(ctx_font))
            .with_line_height(self.line_height)
    }
}

impl Widget for Button {
    fn measure(
        &mut self,
        ctx: &mut LayoutCtx,
        bounds: SizeConstraints
    ) -> Size {
        let bounds = bounds.width(self.width).height(self.height);
        let layout_bounds = bounds.pad(self.padding).loosen();

        let theme = ctx.theme();
        let info = self.text_info(theme.font, theme.font_size);
        let text_size = layout_bounds.constrain(
            ctx.renderer().measure_text(&info, layout_bounds.max)
        );

        self.text_rect.set_size(text_size);

        let width = match self.width {
            Length::Fit => text_size.width + self.padding.horizontal(),
            Length::Expand | Length::Fixed(_) => bounds.max.width
        };

        let height = match self.height {
            Length::Fit => text_size.height + self.padding.vertical(),
            Length::Expand | Length::Fixed(_) => bounds.max.height
        };

        bounds.constrain(Size::new(width, height))
    }

    fn layout(&mut self, _ctx: &mut LayoutCtx, rect: Rect) {
        self.rect = rect;
        self.text_rect.set_origin(rect.origin());

        Alignment::Center.align(&mut self.text_rect, rect.width, Axis::Horizontal);
        Alignment::Center.align(&mut self.text_rect, rect.height, Axis::Vertical);
    }

    #[inline]
    fn paint(&mut self, ctx: &mut DrawCtx) {
        self.paint_background(ctx);
        self.paint_label(ctx);
    }
}

impl Label for Button {
    #[inline]
    fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    fn set_text(&mut self, text: String) {
        self.text = text;
    }

    fn text_width(&self, ctx: &mut DrawCtx) -> f32 {
        let theme = ctx.theme();
        let info = self.text_info(theme.font, theme.font_size);

        // Same size as in `paint_label()` so the cached layout is reused.
        ctx.renderer().measure_text(&info, self.text_rect.size()).width
    }

    fn paint_background(&mut self, ctx: &mut DrawCtx) {
        let style = self.style_fn(ctx)();

        ctx.renderer().fill_quad(Quad::new(self.rect, style.quad));
    }

    fn paint_label(&mut self, ctx: &mut DrawCtx) {
        let style = self.style_fn(ctx)();

        let theme = ctx.theme();
        let color = style.text_color.unwrap_or(theme.text_color);
        let info = self.text_info(theme.font, theme.font_size);

        ctx.renderer().fill_text(&info, self.text_rect, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{renderer::Renderer, theme::Theme};

    #[test]
    fn empty_label_fits_padding() {
        let mut renderer = Renderer::new();
        let theme = Theme::default();
        let mut ctx = LayoutCtx::new(&mut renderer, &theme);

        let mut button = Button::new("").padding(Padding::new(4f32, 10f32, 4f32, 10f32));
        let bounds = SizeConstraints::new(Size::ZERO, Size::new(200f32, 100f32));

        let size = button.measure(&mut ctx, bounds);
        assert_eq!(size.width, 20f32);

        button.layout(&mut ctx, Rect::from_size(size));
        assert_eq!(button.rect(), Rect::from_size(size));
    }

    #[test]
    fn fixed_size_is_respected() {
        let mut renderer = Renderer::new();
        let theme = Theme::default();
        let mut ctx = LayoutCtx::new(&mut renderer, &theme);

        let mut button = Button::new("")
            .width(Length::Fixed(120f32))
            .height(Length::Fixed(48f32));
        let bounds = SizeConstraints::new(Size::ZERO, Size::new(200f32, 100f32));

        assert_eq!(button.measure(&mut ctx, bounds), Size::new(120f32, 48f32));
    }

    #[test]
    fn text_width_matches_drawn_layout() {
        let mut renderer = Renderer::new();
        let theme = Theme::default();

        let mut button = Button::new("buy now");
        let bounds = SizeConstraints::new(Size::ZERO, Size::new(200f32, 100f32));

        let mut ctx = LayoutCtx::new(&mut renderer, &theme);
        let size = button.measure(&mut ctx, bounds);
        button.layout(&mut ctx, Rect::from_size(size));

        let mut ctx = DrawCtx::new(&mut renderer, &theme);
        let width = button.text_width(&mut ctx);

        // The label rect is the laid out width rounded up.
        assert!(width <= button.text_rect.width);
        assert!(button.text_rect.width - width < 1f32);
    }
}
