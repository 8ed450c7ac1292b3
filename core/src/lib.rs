pub mod widget;
pub mod image;
pub mod resources;
pub mod style;
mod ui;
mod geometry;
mod theme;
mod renderer;
mod color;
mod draw;

pub use ui::*;
pub use geometry::*;
pub use theme::*;
pub use renderer::Renderer;
pub use color::*;
pub use draw::*;
pub use cosmic_text::{Family, Stretch, Style, Weight};
pub use tiny_skia;
