use std::{
    fs,
    path::PathBuf,
    hash::{Hash, Hasher}
};

use nohash::IntMap;

use crate::image::{Bitmap, Drawable, Error};

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Handle to a registered image asset. `ResourceId::NONE` (0) means
/// "no resource".
#[derive(Clone, Copy, Default, PartialOrd, Ord, Eq, PartialEq, Debug)]
pub struct ResourceId(pub u32);

#[derive(Debug)]
pub enum AssetDataSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    StaticBytes(&'static [u8])
}

/// Registry that resolves resource handles to drawables.
#[derive(Default, Debug)]
pub struct Resources {
    assets: IntMap<ResourceId, AssetDataSource>,
    next_id: u32
}

impl ResourceId {
    pub const NONE: Self = Self(0);

    #[inline]
    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl Resources {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` under a freshly allocated id.
    pub fn register(&mut self, source: impl Into<AssetDataSource>) -> ResourceId {
        self.next_id += 1;

        while self.assets.contains_key(&ResourceId(self.next_id)) {
            self.next_id += 1;
        }

        let id = ResourceId(self.next_id);
        self.assets.insert(id, source.into());

        id
    }

    /// Binds `source` to an explicit id, replacing any previous asset.
    /// Binding to `ResourceId::NONE` is ignored.
    pub fn insert(&mut self, id: ResourceId, source: impl Into<AssetDataSource>) {
        if id.is_none() {
            log::warn!("Ignoring asset bound to the reserved resource id 0.");

            return;
        }

        self.assets.insert(id, source.into());
    }

    #[inline]
    pub fn contains(&self, id: ResourceId) -> bool {
        self.assets.contains_key(&id)
    }

    /// Loads and decodes the asset behind `id`. PNG data is detected by its
    /// signature, anything else is parsed as SVG.
    pub fn resolve(&self, id: ResourceId) -> Result<Drawable, Error> {
        let source = self.assets.get(&id).ok_or(Error::NotFound(id.0))?;

        match source {
            AssetDataSource::Path(path) => {
                let bytes = fs::read(path)?;

                decode(&bytes)
            }
            AssetDataSource::Bytes(bytes) => decode(bytes),
            AssetDataSource::StaticBytes(bytes) => decode(bytes)
        }
    }
}

fn decode(data: &[u8]) -> Result<Drawable, Error> {
    if data.starts_with(PNG_SIGNATURE) {
        return Bitmap::decode_png(data).map(Drawable::Bitmap);
    }

    decode_vector(data)
}

#[cfg(feature = "svg")]
#[inline]
fn decode_vector(data: &[u8]) -> Result<Drawable, Error> {
    use resvg::usvg::{Tree, Options};

    let tree = Tree::from_data(data, &Options::default())
        .map_err(|x| Error::DecodeError(x.to_string()))?;

    Ok(Drawable::Vector(tree))
}

#[cfg(not(feature = "svg"))]
#[inline]
fn decode_vector(_data: &[u8]) -> Result<Drawable, Error> {
    Err(Error::Unsupported)
}

impl Hash for ResourceId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.0);
    }
}

impl nohash::IsEnabled for ResourceId { }

impl From<u32> for ResourceId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<PathBuf> for AssetDataSource {
    #[inline]
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&str> for AssetDataSource {
    #[inline]
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for AssetDataSource {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&'static [u8]> for AssetDataSource {
    #[inline]
    fn from(bytes: &'static [u8]) -> Self {
        Self::StaticBytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, image::tests::solid_bitmap};

    #[test]
    fn register_skips_taken_ids() {
        let mut resources = Resources::new();
        resources.insert(ResourceId(1), b"".as_slice());

        let id = resources.register(b"".as_slice());
        assert_eq!(id, ResourceId(2));
        assert!(resources.contains(ResourceId(1)));
    }

    #[test]
    fn reserved_id_is_never_bound() {
        let mut resources = Resources::new();
        resources.insert(ResourceId::NONE, b"".as_slice());

        assert!(!resources.contains(ResourceId::NONE));
        assert!(matches!(resources.resolve(ResourceId::NONE), Err(Error::NotFound(0))));
    }

    #[test]
    fn unregistered_id_is_not_found() {
        let resources = Resources::new();

        let err = resources.resolve(ResourceId(9)).unwrap_err();
        assert!(matches!(err, Error::NotFound(9)));
        assert_eq!(err.to_string(), "No resource registered with id 9.");
    }

    #[test]
    fn png_is_detected() {
        let png = solid_bitmap(3, 2, Color::RED).as_pixmap().encode_png().unwrap();

        let mut resources = Resources::new();
        let id = resources.register(png);

        match resources.resolve(id) {
            Ok(Drawable::Bitmap(bitmap)) => {
                assert_eq!((bitmap.width(), bitmap.height()), (3, 2));
                assert_eq!(bitmap.pixel(0, 0), Some(Color::RED));
            }
            other => panic!("expected a bitmap, got {:?}", other)
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut resources = Resources::new();
        let id = resources.register("/nonexistent/icon.svg");

        assert!(matches!(resources.resolve(id), Err(Error::Io(_))));
    }

    #[cfg(feature = "svg")]
    #[test]
    fn svg_is_parsed() {
        let mut resources = Resources::new();
        let id = resources.register(crate::image::tests::SQUARE_SVG);

        let drawable = resources.resolve(id).unwrap();
        assert!(matches!(drawable, Drawable::Vector(_)));
    }

    #[cfg(feature = "svg")]
    #[test]
    fn garbage_fails_to_decode() {
        let mut resources = Resources::new();
        let id = resources.register(b"not an image".to_vec());

        assert!(matches!(resources.resolve(id), Err(Error::DecodeError(_))));
    }
}
