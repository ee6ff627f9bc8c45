use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use glamour::Size2;
use image::ImageReader;
use slotmap::SlotMap;
use slotmap::new_key_type;
use tracing::debug;
use tracing::info;
use tracing::instrument;

use crate::Pixels;

new_key_type! {
    pub struct TextureId;
}

#[derive(Debug)]
pub enum TextureLoadError {
    Decoding(Box<dyn std::error::Error + Send + Sync>),
    Io(std::io::Error),
}

impl From<std::io::Error> for TextureLoadError {
    fn from(err: std::io::Error) -> Self {
        TextureLoadError::Io(err)
    }
}

impl From<image::ImageError> for TextureLoadError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(err) => TextureLoadError::Io(err),
            other => TextureLoadError::Decoding(Box::new(other)),
        }
    }
}

impl std::fmt::Display for TextureLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureLoadError::Decoding(err) => write!(f, "failed to decode image: {err}"),
            TextureLoadError::Io(err) => write!(f, "failed to read image: {err}"),
        }
    }
}

impl std::error::Error for TextureLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureLoadError::Decoding(err) => Some(err.as_ref()),
            TextureLoadError::Io(err) => Some(err),
        }
    }
}

/// A reference-counted handle to a drawable image.
///
/// The handle only knows the image's natural size; pixel storage belongs to
/// whatever backend consumes the [`crate::Canvas`].
pub struct Texture {
    id: TextureId,
    size: Size2<Pixels>,

    manager: Rc<TextureManagerInner>,
}

impl Texture {
    #[must_use]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[must_use]
    pub fn natural_size(&self) -> Size2<Pixels> {
        self.size
    }

    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.manager.inspect(self.id, |usage| usage.name.clone())?
    }
}

impl Clone for Texture {
    fn clone(&self) -> Self {
        self.manager.retain(self.id);

        Self {
            id: self.id,
            size: self.size,
            manager: self.manager.clone(),
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.manager.release(self.id);
    }
}

impl PartialEq for Texture {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Rc::ptr_eq(&self.manager, &other.manager)
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.id)
            .field("size", &self.size)
            .finish()
    }
}

/// Hands out [`Texture`] handles and tracks how many are alive.
///
/// Entries are removed once the last handle is dropped.
#[derive(Default)]
pub struct TextureManager {
    inner: Rc<TextureManagerInner>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an in-memory texture with a known natural size.
    pub fn create(&self, width: f32, height: f32, name: Option<&str>) -> Texture {
        self.inner.insert(Size2::new(width, height), name)
    }

    /// Reads the natural size of an image file without decoding its pixels.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Texture, TextureLoadError> {
        let path = path.as_ref();

        let (width, height) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()?;

        info!("Loaded texture header: {width}x{height}");

        let name = path.file_stem().and_then(|stem| stem.to_str());
        Ok(self.inner.insert(Size2::new(width as f32, height as f32), name))
    }

    /// The number of textures with at least one live handle.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.inner.texture_map.borrow().len()
    }
}

struct TextureUsage {
    refcount: u32,
    name: Option<String>,
}

#[derive(Default)]
struct TextureManagerInner {
    texture_map: RefCell<SlotMap<TextureId, TextureUsage>>,
}

impl TextureManagerInner {
    fn insert(self: &Rc<Self>, size: Size2<Pixels>, name: Option<&str>) -> Texture {
        let id = self.texture_map.borrow_mut().insert(TextureUsage {
            refcount: 1,
            name: name.map(str::to_string),
        });

        debug!("Created texture {id:?} ({name:?}) with size {size:?}");

        Texture {
            id,
            size,
            manager: self.clone(),
        }
    }

    fn retain(&self, id: TextureId) {
        if let Some(usage) = self.texture_map.borrow_mut().get_mut(id) {
            usage.refcount += 1;
        }
    }

    fn release(&self, id: TextureId) {
        let mut texture_map = self.texture_map.borrow_mut();

        if let Some(usage) = texture_map.get_mut(id) {
            usage.refcount -= 1;
            if usage.refcount == 0 {
                texture_map.remove(id);
            }
        }
    }

    fn inspect<T>(&self, id: TextureId, callback: impl Fn(&TextureUsage) -> T) -> Option<T> {
        self.texture_map.borrow().get(id).map(callback)
    }
}
