use glamour::Unit;

pub use crate::color::Color;
pub use crate::color::ColorParseError;
pub use crate::draw::Canvas;
pub use crate::draw::Primitive;
pub use crate::draw::RenderSurface;
pub use crate::texture::Texture;
pub use crate::texture::TextureId;
pub use crate::texture::TextureLoadError;
pub use crate::texture::TextureManager;

mod color;
mod draw;
mod texture;

/// Logical pixels, the unit shared by positions, sizes and hit-testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixels;

impl Unit for Pixels {
    type Scalar = f32;
}
