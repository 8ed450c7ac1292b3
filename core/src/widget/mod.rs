pub mod button;
pub mod icon_button;
mod layout;

pub use layout::*;
pub use button::Button;
pub use icon_button::{IconButton, IconButtonConfig, IconAlign};

use crate::{
    geometry::{Size, Rect},
    ui::{LayoutCtx, DrawCtx}
};

/// Measure, layout and paint: the contract between the [`crate::Ui`] and a widget.
pub trait Widget {
    /// Returns the size the widget wants within `bounds`.
    fn measure(&mut self, ctx: &mut LayoutCtx, bounds: SizeConstraints) -> Size;

    /// Assigns the final bounds. Always preceded by `measure()`.
    fn layout(&mut self, ctx: &mut LayoutCtx, rect: Rect);

    /// Records the widget's drawing commands. Must leave the canvas
    /// translation the way it found it.
    fn paint(&mut self, ctx: &mut DrawCtx);
}

/// A widget that displays a single text label.
pub trait Label {
    fn text(&self) -> &str;

    fn set_text(&mut self, text: String);

    /// Width of the current label under the current text style, as laid out
    /// for drawing.
    fn text_width(&self, ctx: &mut DrawCtx) -> f32;

    /// Everything drawn behind the label. [`Widget::paint`] for a label
    /// widget is this followed by [`Label::paint_label`], so decorators can
    /// draw in between.
    fn paint_background(&mut self, ctx: &mut DrawCtx);

    fn paint_label(&mut self, ctx: &mut DrawCtx);
}
