#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255}
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a}
    }

    /// Unpacks a `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8
        }
    }

    #[inline]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 |
            (self.r as u32) << 16 |
            (self.g as u32) << 8 |
            self.b as u32
    }

    /// Parses `#RRGGBB` or `#AARRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;

        if !digits.bytes().all(|x| x.is_ascii_hexdigit()) {
            return None;
        }

        let value = u32::from_str_radix(digits, 16).ok()?;

        match digits.len() {
            6 => Some(Self::from_argb(0xff000000 | value)),
            8 => Some(Self::from_argb(value)),
            _ => None
        }
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl From<Color> for tiny_skia::Color {
    #[inline]
    fn from(color: Color) -> Self {
        tiny_skia::Color::from_rgba8(
            color.r,
            color.g,
            color.b,
            color.a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argb_round_trip_keeps_channels() {
        let color = Color::from_argb(0x80ff2010);

        assert_eq!(color, Color::rgba(0xff, 0x20, 0x10, 0x80));
        assert_eq!(color.to_argb(), 0x80ff2010);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("#00000000"), Some(Color::TRANSPARENT));
        assert_eq!(Color::from_hex("ff0000"), None);
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn hex_rejects_signs() {
        assert_eq!(Color::from_hex("#+fffff"), None);
        assert_eq!(Color::from_hex("#+fffffff"), None);
        assert_eq!(Color::from_hex("#-0000000"), None);
    }
}
