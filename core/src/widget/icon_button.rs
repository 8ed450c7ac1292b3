//! A button that paints a tinted icon next to, or at the edge of, its label.
//!
//! The icon is resolved and rasterized once when the button is built. Each
//! paint pass only recomputes where the icon goes:
//!
//! ```text
//! dx = (icon_size + icon_padding) / 2
//!
//! Left         icon at x = 0
//! Right        icon at x = width - icon_size
//! LeftOfText   canvas shifted by +dx, icon at width/2 - text/2 - icon_size - icon_padding
//! RightOfText  canvas shifted by -dx, icon at width/2 + text/2 + dx + icon_padding
//! ```
//!
//! The shift applies to the icon and to the label, so the pair stays centered.
//! The icon goes on top of the base button's background and under its label.

use std::{fmt, str::FromStr};

use crate::{
    color::Color,
    geometry::{Size, Rect, IntRect},
    image::{Bitmap, ColorFilter},
    resources::{Resources, ResourceId},
    style::{Attr, StyledAttributes, StyleError},
    ui::{DrawCtx, LayoutCtx}
};
use super::{Widget, Label, SizeConstraints, Button};

/// Where the icon is placed relative to the button.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub enum IconAlign {
    /// Against the left edge.
    #[default]
    Left,
    /// Against the right edge.
    Right,
    /// Immediately left of the centered label.
    LeftOfText,
    /// Immediately right of the centered label.
    RightOfText
}

/// Ordinal to alignment, as stored in style attributes.
const ALIGN_ORDINALS: [IconAlign; 4] = [
    IconAlign::Left,
    IconAlign::Right,
    IconAlign::LeftOfText,
    IconAlign::RightOfText
];

#[derive(Clone, PartialEq, Debug)]
pub struct IconButtonConfig {
    /// Uppercase the label once, when the button is built.
    pub text_all_caps: bool,
    /// Space between the icon and the label or edge, in pixels.
    pub icon_padding: u32,
    /// Side of the square the icon is drawn into, in pixels.
    pub icon_size: u32,
    /// Source-atop tint. Fully transparent leaves the icon as is.
    pub icon_color: Color,
    pub icon_resource: ResourceId,
    pub align: IconAlign
}

pub struct IconButton<B = Button> {
    base: B,
    config: IconButtonConfig,
    icon: Option<Icon>,
    original_text: String,
    rect: Rect,
    /// Reused across paint passes.
    dest_rect: IntRect
}

struct Icon {
    bitmap: Bitmap,
    source_rect: IntRect
}

impl IconAlign {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::LeftOfText => "left_of_text",
            Self::RightOfText => "right_of_text"
        }
    }
}

impl TryFrom<i64> for IconAlign {
    type Error = StyleError;

    #[inline]
    fn try_from(ordinal: i64) -> Result<Self, Self::Error> {
        usize::try_from(ordinal).ok()
            .and_then(|x| ALIGN_ORDINALS.get(x).copied())
            .ok_or_else(|| StyleError::InvalidAlign(ordinal.to_string()))
    }
}

impl FromStr for IconAlign {
    type Err = StyleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if let Some(align) = ALIGN_ORDINALS.iter().find(|x| x.name() == value) {
            return Ok(*align);
        }

        match value.parse::<i64>() {
            Ok(ordinal) => Self::try_from(ordinal),
            Err(_) => Err(StyleError::InvalidAlign(value.to_string()))
        }
    }
}

impl fmt::Display for IconAlign {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for IconButtonConfig {
    fn default() -> Self {
        Self {
            text_all_caps: false,
            icon_padding: 0,
            icon_size: 0,
            icon_color: Color::TRANSPARENT,
            icon_resource: ResourceId::NONE,
            align: IconAlign::Left
        }
    }
}

impl IconButtonConfig {
    /// Reads the configuration, falling back to the defaults for anything
    /// unset. Only an unknown alignment is an error.
    pub fn from_attributes(attrs: &StyledAttributes) -> Result<Self, StyleError> {
        let defaults = Self::default();

        Ok(Self {
            text_all_caps: attrs.get_bool(Attr::TextAllCaps, defaults.text_all_caps),
            icon_padding: attrs.get_dimension_pixel_size(Attr::IconPadding, defaults.icon_padding),
            icon_size: attrs.get_dimension_pixel_size(Attr::IconSize, defaults.icon_size),
            icon_color: attrs.get_color(Attr::IconColor, defaults.icon_color),
            icon_resource: attrs.get_resource_id(Attr::IconSrc, defaults.icon_resource),
            align: attrs.get_align(Attr::IconAlign, defaults.align)?
        })
    }

    /// Half of the space the icon takes up together with its padding.
    #[inline]
    pub fn dx(&self) -> i32 {
        (self.icon_size as i32 + self.icon_padding as i32) / 2
    }

    /// Horizontal canvas translation applied while painting.
    #[inline]
    pub fn canvas_shift(&self) -> i32 {
        match self.align {
            IconAlign::LeftOfText => self.dx(),
            IconAlign::RightOfText => -self.dx(),
            IconAlign::Left | IconAlign::Right => 0
        }
    }

    /// Left edge of the icon in the button's (unshifted) coordinates.
    pub fn icon_left(&self, width: i32, text_width: f32) -> i32 {
        let size = self.icon_size as i32;
        let padding = self.icon_padding as i32;

        match self.align {
            IconAlign::Left => 0,
            IconAlign::Right => width - size,
            IconAlign::LeftOfText =>
                (width as f32 / 2f32 - text_width / 2f32 - size as f32 - padding as f32) as i32,
            IconAlign::RightOfText =>
                (width as f32 / 2f32 + text_width / 2f32 + self.dx() as f32 + padding as f32) as i32
        }
    }

    /// Top edge of the vertically centered icon.
    #[inline]
    pub fn icon_top(&self, height: i32) -> i32 {
        height / 2 - self.icon_size as i32 / 2
    }
}

impl<B: Widget + Label> IconButton<B> {
    /// Builds the button from style attributes, resolving the icon through
    /// `resources`.
    pub fn new(
        base: B,
        attrs: &StyledAttributes,
        resources: &Resources
    ) -> Result<Self, StyleError> {
        let config = IconButtonConfig::from_attributes(attrs)?;

        Ok(Self::with_config(base, config, resources))
    }

    /// The label is uppercased here, once, if `text_all_caps` is set. Text
    /// assigned later through [`IconButton::set_text`] is used as is.
    pub fn with_config(
        mut base: B,
        config: IconButtonConfig,
        resources: &Resources
    ) -> Self {
        let icon = load_icon(&config, resources);
        let original_text = base.text().to_string();

        if config.text_all_caps {
            base.set_text(original_text.to_uppercase());
        }

        Self {
            base,
            config,
            icon,
            original_text,
            rect: Rect::default(),
            dest_rect: IntRect::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &IconButtonConfig {
        &self.config
    }

    #[inline]
    pub fn base(&self) -> &B {
        &self.base
    }

    #[inline]
    pub fn base_mut(&mut self) -> &mut B {
        &mut self.base
    }

    /// The label as displayed.
    #[inline]
    pub fn text(&self) -> &str {
        self.base.text()
    }

    /// Replaces the label. Not affected by `text_all_caps`.
    #[inline]
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.base.set_text(text.into());
    }

    /// The label the button was built with, before any case transform.
    #[inline]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    #[inline]
    pub fn icon(&self) -> Option<&Bitmap> {
        self.icon.as_ref().map(|x| &x.bitmap)
    }

    /// Full bounds of the icon buffer, if there is one.
    #[inline]
    pub fn source_rect(&self) -> Option<IntRect> {
        self.icon.as_ref().map(|x| x.source_rect)
    }

    /// Where the icon was drawn during the last paint pass, relative to the
    /// button and before the canvas shift.
    #[inline]
    pub fn dest_rect(&self) -> IntRect {
        self.dest_rect
    }
}

impl<B: Widget + Label> Widget for IconButton<B> {
    #[inline]
    fn measure(&mut self, ctx: &mut LayoutCtx, bounds: SizeConstraints) -> Size {
        self.base.measure(ctx, bounds)
    }

    #[inline]
    fn layout(&mut self, ctx: &mut LayoutCtx, rect: Rect) {
        self.rect = rect;
        self.base.layout(ctx, rect);
    }

    fn paint(&mut self, ctx: &mut DrawCtx) {
        ctx.renderer().save();

        if matches!(self.config.align, IconAlign::LeftOfText | IconAlign::RightOfText) {
            ctx.renderer().translate(self.config.canvas_shift() as f32, 0f32);
        }

        self.base.paint_background(ctx);

        if let Some(icon) = &self.icon {
            let text_width = self.base.text_width(ctx);
            let size = self.config.icon_size as i32;

            let left = self.config.icon_left(self.rect.width as i32, text_width);
            let top = self.config.icon_top(self.rect.height as i32);
            self.dest_rect.set(left, top, left + size, top + size);

            let x = self.rect.x.round() as i32;
            let y = self.rect.y.round() as i32;
            let dst = IntRect::new(
                self.dest_rect.left + x,
                self.dest_rect.top + y,
                self.dest_rect.right + x,
                self.dest_rect.bottom + y
            );

            ctx.renderer().draw_bitmap(icon.bitmap.clone(), icon.source_rect, dst);
        }

        self.base.paint_label(ctx);
        ctx.renderer().restore();
    }
}

fn load_icon(config: &IconButtonConfig, resources: &Resources) -> Option<Icon> {
    if config.icon_resource.is_none() {
        return None;
    }

    let result = resources.resolve(config.icon_resource)
        .and_then(|drawable| drawable.rasterize());

    match result {
        Ok(bitmap) => {
            let bitmap = ColorFilter::SourceAtop(config.icon_color).apply(&bitmap);
            let source_rect = bitmap.bounds();

            Some(Icon { bitmap, source_rect })
        }
        Err(err) => {
            log::warn!(
                "Unable to load icon resource {}, drawing without an icon: {}",
                config.icon_resource.0,
                err
            );

            None
        }
    }
}
