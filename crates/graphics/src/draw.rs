use glamour::Point2;
use glamour::Rect;
use tracing::trace;

use crate::Pixels;
use crate::color::Color;
use crate::texture::Texture;

/// A drawing target that accepts textured quads.
pub trait RenderSurface {
    /// Draws `texture` at its natural size with its top-left corner at
    /// `top_left`, multiplied by `tint`.
    fn blit(&mut self, texture: &Texture, top_left: Point2<Pixels>, tint: Color);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub placement: Rect<Pixels>,
    pub color: Color,
    pub texture: Texture,
}

impl Primitive {
    #[must_use]
    pub fn new(texture: Texture, top_left: Point2<Pixels>, color: Color) -> Self {
        Self {
            placement: Rect::new(top_left, texture.natural_size()),
            color,
            texture,
        }
    }
}

/// A [`RenderSurface`] that records every blit of a frame in draw order.
#[derive(Debug, Default)]
pub struct Canvas {
    clear_color: Option<Color>,
    primitives: Vec<Primitive>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame, dropping everything recorded so far.
    pub fn begin_frame(&mut self, clear_color: Option<Color>) {
        self.clear_color = clear_color;
        self.primitives.clear();
    }

    #[must_use]
    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }

    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn draw(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }
}

impl RenderSurface for Canvas {
    fn blit(&mut self, texture: &Texture, top_left: Point2<Pixels>, tint: Color) {
        trace!("blit {:?} at {top_left:?}", texture.id());
        self.draw(Primitive::new(texture.clone(), top_left, tint));
    }
}
