use cosmic_text::{Family, Stretch, Style, Weight};

use crate::{color::Color, widget::button};

pub struct Theme {
    pub font: Font,
    pub font_size: f32,
    pub text_color: Color,
    pub button: button::StyleFn
}

#[derive(Clone, Copy, PartialEq, Hash, Debug)]
pub struct Font {
    pub family: Family<'static>,
    pub stretch: Stretch,
    pub style: Style,
    pub weight: Weight
}

impl Theme {
    #[inline]
    pub fn new(
        font: Font,
        font_size: f32,
        text_color: Color,
        button: button::StyleFn
    ) -> Self {
        Self { font, font_size, text_color, button }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font: Font::default(),
            font_size: 16f32,
            text_color: Color::WHITE,
            button: button::default_style
        }
    }
}

impl Default for Font {
    #[inline]
    fn default() -> Self {
        Self {
            family: Family::SansSerif,
            stretch: Stretch::Normal,
            style: Style::Normal,
            weight: Weight::NORMAL
        }
    }
}
