use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter}
};

use ahash::RandomState;
use serde::Deserialize;

use crate::{
    color::Color,
    resources::ResourceId,
    widget::icon_button::IconAlign
};

/// Style attributes understood by the icon button.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Deserialize, Debug)]
pub enum Attr {
    #[serde(rename = "textAllCaps")]
    TextAllCaps,
    #[serde(rename = "iconPadding")]
    IconPadding,
    #[serde(rename = "iconSize")]
    IconSize,
    #[serde(rename = "iconColor")]
    IconColor,
    #[serde(rename = "iconSrc")]
    IconSrc,
    #[serde(rename = "iconAlign")]
    IconAlign
}

/// A raw attribute value as written in a style definition.
#[derive(Clone, PartialEq, Deserialize, Debug)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Str(String)
}

/// A set of explicitly specified attribute values.
#[derive(Clone, Default, PartialEq, Deserialize, Debug)]
#[serde(transparent)]
pub struct Attributes(HashMap<Attr, AttrValue, RandomState>);

/// Attribute lookup layered the way toolkit styles are: explicit values
/// win over the default style, which wins over the caller's default.
#[derive(Clone, Copy, Debug)]
pub struct StyledAttributes<'a> {
    attrs: &'a Attributes,
    default_style: Option<&'a Attributes>,
    density: f32
}

#[derive(Clone, PartialEq, Debug)]
pub enum StyleError {
    InvalidAlign(String)
}

impl Attributes {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set(mut self, attr: Attr, value: impl Into<AttrValue>) -> Self {
        self.0.insert(attr, value.into());

        self
    }

    #[inline]
    pub fn insert(&mut self, attr: Attr, value: impl Into<AttrValue>) {
        self.0.insert(attr, value.into());
    }

    #[inline]
    pub fn get(&self, attr: Attr) -> Option<&AttrValue> {
        self.0.get(&attr)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> StyledAttributes<'a> {
    #[inline]
    pub fn new(attrs: &'a Attributes) -> Self {
        Self {
            attrs,
            default_style: None,
            density: 1f32
        }
    }

    #[inline]
    pub fn default_style(mut self, style: &'a Attributes) -> Self {
        self.default_style = Some(style);

        self
    }

    /// Pixels per density-independent pixel, used to resolve `dp` values.
    #[inline]
    pub fn density(mut self, density: f32) -> Self {
        self.density = density;

        self
    }

    #[inline]
    pub fn value(&self, attr: Attr) -> Option<&'a AttrValue> {
        self.attrs.get(attr)
            .or_else(|| self.default_style.and_then(|x| x.get(attr)))
    }

    pub fn get_bool(&self, attr: Attr, default: bool) -> bool {
        match self.value(attr) {
            None => default,
            Some(AttrValue::Bool(value)) => *value,
            Some(AttrValue::Str(value)) => match value.as_str() {
                "true" => true,
                "false" => false,
                _ => malformed(attr, default)
            }
            Some(AttrValue::Int(_)) => malformed(attr, default)
        }
    }

    pub fn get_int(&self, attr: Attr, default: i64) -> i64 {
        match self.value(attr) {
            None => default,
            Some(AttrValue::Int(value)) => *value,
            Some(AttrValue::Str(value)) => value.trim()
                .parse()
                .unwrap_or_else(|_| malformed(attr, default)),
            Some(AttrValue::Bool(_)) => malformed(attr, default)
        }
    }

    /// Resolves a dimension to whole pixels. Accepts plain numbers (pixels)
    /// as well as `"12px"` and `"12dp"`. Negative values are clamped to 0.
    pub fn get_dimension_pixel_size(&self, attr: Attr, default: u32) -> u32 {
        let px = match self.value(attr) {
            None => return default,
            Some(AttrValue::Int(value)) => *value as f32,
            Some(AttrValue::Str(value)) => {
                let value = value.trim();

                let parsed = if let Some(dp) = value.strip_suffix("dp") {
                    dp.trim().parse::<f32>().ok().map(|x| x * self.density)
                } else if let Some(px) = value.strip_suffix("px") {
                    px.trim().parse::<f32>().ok()
                } else {
                    value.parse::<f32>().ok()
                };

                match parsed {
                    Some(px) if px.is_finite() => px,
                    _ => return malformed(attr, default)
                }
            }
            Some(AttrValue::Bool(_)) => return malformed(attr, default)
        };

        pixel_size(px)
    }

    /// Accepts a packed `0xAARRGGBB` integer or a `#RRGGBB`/`#AARRGGBB` string.
    pub fn get_color(&self, attr: Attr, default: Color) -> Color {
        match self.value(attr) {
            None => default,
            Some(AttrValue::Int(value)) => match u32::try_from(*value) {
                Ok(argb) => Color::from_argb(argb),
                // Packed colors are often written as signed 32-bit ints.
                Err(_) => match i32::try_from(*value) {
                    Ok(argb) => Color::from_argb(argb as u32),
                    Err(_) => malformed(attr, default)
                }
            }
            Some(AttrValue::Str(value)) => Color::from_hex(value.trim())
                .unwrap_or_else(|| malformed(attr, default)),
            Some(AttrValue::Bool(_)) => malformed(attr, default)
        }
    }

    /// Accepts an integer id, or its decimal string form.
    pub fn get_resource_id(&self, attr: Attr, default: ResourceId) -> ResourceId {
        let id = self.get_int(attr, i64::from(default.0));

        u32::try_from(id)
            .map(ResourceId)
            .unwrap_or_else(|_| malformed(attr, default))
    }

    /// Decodes the icon alignment from its ordinal or its name. Unlike the
    /// other getters an unknown value is an error.
    pub fn get_align(&self, attr: Attr, default: IconAlign) -> Result<IconAlign, StyleError> {
        match self.value(attr) {
            None => Ok(default),
            Some(AttrValue::Int(value)) => IconAlign::try_from(*value),
            Some(AttrValue::Str(value)) => value.parse(),
            Some(AttrValue::Bool(value)) =>
                Err(StyleError::InvalidAlign(value.to_string()))
        }
    }
}

/// Rounds to the nearest pixel, never collapsing a non-zero dimension to 0.
#[inline]
fn pixel_size(px: f32) -> u32 {
    if px <= 0f32 {
        return 0;
    }

    let size = px.round() as u32;

    if size == 0 { 1 } else { size }
}

#[inline]
fn malformed<T>(attr: Attr, default: T) -> T {
    log::warn!("Malformed value for attribute {:?}, using the default.", attr);

    default
}

impl From<bool> for AttrValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttrValue {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for AttrValue {
    #[inline]
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i32> for AttrValue {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for AttrValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<ResourceId> for AttrValue {
    #[inline]
    fn from(id: ResourceId) -> Self {
        Self::Int(id.0.into())
    }
}

impl Display for StyleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlign(value) => write!(
                f,
                "Invalid icon alignment \"{}\". Expected 0-3 or one of: left, right, left_of_text, right_of_text.",
                value
            )
        }
    }
}

impl std::error::Error for StyleError { }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let attrs = Attributes::new();
        let styled = StyledAttributes::new(&attrs);

        assert!(!styled.get_bool(Attr::TextAllCaps, false));
        assert_eq!(styled.get_dimension_pixel_size(Attr::IconSize, 0), 0);
        assert_eq!(styled.get_color(Attr::IconColor, Color::TRANSPARENT), Color::TRANSPARENT);
        assert_eq!(styled.get_resource_id(Attr::IconSrc, ResourceId::NONE), ResourceId::NONE);
        assert_eq!(styled.get_align(Attr::IconAlign, IconAlign::Left), Ok(IconAlign::Left));
    }

    #[test]
    fn explicit_values_override_default_style() {
        let style = Attributes::new()
            .set(Attr::IconSize, 32)
            .set(Attr::IconPadding, 4);
        let attrs = Attributes::new().set(Attr::IconSize, 48);

        let styled = StyledAttributes::new(&attrs).default_style(&style);

        assert_eq!(styled.get_dimension_pixel_size(Attr::IconSize, 0), 48);
        assert_eq!(styled.get_dimension_pixel_size(Attr::IconPadding, 0), 4);
        assert_eq!(styled.get_dimension_pixel_size(Attr::IconColor, 7), 7);
    }

    #[test]
    fn dimensions_are_scaled_by_density() {
        let attrs = Attributes::new()
            .set(Attr::IconSize, "12dp")
            .set(Attr::IconPadding, "5px");
        let styled = StyledAttributes::new(&attrs).density(2f32);

        assert_eq!(styled.get_dimension_pixel_size(Attr::IconSize, 0), 24);
        assert_eq!(styled.get_dimension_pixel_size(Attr::IconPadding, 0), 5);

        // 0.4 px rounds to 0 but a non-zero dimension keeps at least a pixel.
        let attrs = Attributes::new().set(Attr::IconSize, "0.2dp");
        let styled = StyledAttributes::new(&attrs).density(2f32);

        assert_eq!(styled.get_dimension_pixel_size(Attr::IconSize, 0), 1);
    }

    #[test]
    fn malformed_values_fall_back() {
        let attrs = Attributes::new()
            .set(Attr::IconSize, "huge")
            .set(Attr::IconColor, "red")
            .set(Attr::IconSrc, -3)
            .set(Attr::TextAllCaps, 1);
        let styled = StyledAttributes::new(&attrs);

        assert_eq!(styled.get_dimension_pixel_size(Attr::IconSize, 3), 3);
        assert_eq!(styled.get_color(Attr::IconColor, Color::BLUE), Color::BLUE);
        assert_eq!(styled.get_resource_id(Attr::IconSrc, ResourceId::NONE), ResourceId::NONE);
        assert!(styled.get_bool(Attr::TextAllCaps, true));
    }

    #[test]
    fn resource_ids_from_ints_and_strings() {
        let attrs = Attributes::new().set(Attr::IconSrc, "7");
        let styled = StyledAttributes::new(&attrs);
        assert_eq!(styled.get_resource_id(Attr::IconSrc, ResourceId::NONE), ResourceId(7));

        let attrs = Attributes::new().set(Attr::IconSrc, "cart");
        let styled = StyledAttributes::new(&attrs);
        assert_eq!(styled.get_resource_id(Attr::IconSrc, ResourceId(2)), ResourceId(2));
    }

    #[test]
    fn colors_from_ints_and_hex() {
        let attrs = Attributes::new().set(Attr::IconColor, -16777216i64);
        assert_eq!(
            StyledAttributes::new(&attrs).get_color(Attr::IconColor, Color::WHITE),
            Color::BLACK
        );

        let attrs = Attributes::new().set(Attr::IconColor, "#80ff0000");
        assert_eq!(
            StyledAttributes::new(&attrs).get_color(Attr::IconColor, Color::WHITE),
            Color::rgba(255, 0, 0, 128)
        );
    }

    #[test]
    fn align_by_ordinal_and_name() {
        let attrs = Attributes::new().set(Attr::IconAlign, 3);
        assert_eq!(
            StyledAttributes::new(&attrs).get_align(Attr::IconAlign, IconAlign::Left),
            Ok(IconAlign::RightOfText)
        );

        let attrs = Attributes::new().set(Attr::IconAlign, "left_of_text");
        assert_eq!(
            StyledAttributes::new(&attrs).get_align(Attr::IconAlign, IconAlign::Left),
            Ok(IconAlign::LeftOfText)
        );

        let attrs = Attributes::new().set(Attr::IconAlign, 4);
        assert_eq!(
            StyledAttributes::new(&attrs).get_align(Attr::IconAlign, IconAlign::Left),
            Err(StyleError::InvalidAlign("4".to_string()))
        );
    }

    #[test]
    fn deserializes_from_json() {
        let attrs: Attributes = serde_json::from_str(r##"{
            "textAllCaps": true,
            "iconSize": "24dp",
            "iconColor": "#ffffff",
            "iconSrc": 1,
            "iconAlign": "right"
        }"##).unwrap();

        assert_eq!(attrs.get(Attr::TextAllCaps), Some(&AttrValue::Bool(true)));
        assert_eq!(attrs.get(Attr::IconSize), Some(&AttrValue::Str("24dp".to_string())));
        assert_eq!(attrs.get(Attr::IconSrc), Some(&AttrValue::Int(1)));
        assert_eq!(attrs.get(Attr::IconPadding), None);
    }
}
