use std::rc::Rc;

use glamour::Point2;
use graphics::Color;
use graphics::Texture;

use crate::Pixels;

/// One axis of a position: either a fixed value or a value computed at the
/// moment a state becomes active.
#[derive(Clone)]
pub enum Coordinate {
    Literal(f32),
    Computed(Rc<dyn Fn() -> f32>),
}

impl Coordinate {
    pub fn computed(f: impl Fn() -> f32 + 'static) -> Self {
        Coordinate::Computed(Rc::new(f))
    }

    #[inline]
    pub fn resolve(&self) -> f32 {
        match self {
            Coordinate::Literal(value) => *value,
            Coordinate::Computed(f) => f(),
        }
    }
}

impl From<f32> for Coordinate {
    fn from(value: f32) -> Self {
        Coordinate::Literal(value)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Coordinate::Literal(a), Coordinate::Literal(b)) => a == b,
            (Coordinate::Computed(a), Coordinate::Computed(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl std::fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Coordinate::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Coordinate::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// The top-left corner of a widget in a given state.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub x: Coordinate,
    pub y: Coordinate,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: Coordinate::Literal(x),
            y: Coordinate::Literal(y),
        }
    }

    pub fn from_coordinates(x: Coordinate, y: Coordinate) -> Self {
        Self { x, y }
    }

    pub fn resolve(&self) -> Point2<Pixels> {
        Point2::new(self.x.resolve(), self.y.resolve())
    }
}

/// A single visual key of a style entry.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleProperty {
    Pos(Position),
    /// `None` explicitly clears a texture inherited from the default entry.
    Texture(Option<Texture>),
    Tint(Color),
    /// Any other key, carried through untouched.
    Custom(String, String),
}

impl StyleProperty {
    pub fn key(&self) -> PropertyKey<'_> {
        match self {
            StyleProperty::Pos(_) => PropertyKey::Pos,
            StyleProperty::Texture(_) => PropertyKey::Texture,
            StyleProperty::Tint(_) => PropertyKey::Tint,
            StyleProperty::Custom(name, _) => PropertyKey::Custom(name),
        }
    }
}

/// Identifies which key a [`StyleProperty`] sets. Two properties with the
/// same key replace each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey<'a> {
    Pos,
    Texture,
    Tint,
    Custom(&'a str),
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn computed_coordinate_runs_on_each_resolve() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();

        let coordinate = Coordinate::computed(move || {
            counter.set(counter.get() + 1);
            10.0 * counter.get() as f32
        });

        assert_eq!(coordinate.resolve(), 10.0);
        assert_eq!(coordinate.resolve(), 20.0);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn coordinate_equality() {
        let shared = Coordinate::computed(|| 1.0);

        assert_eq!(Coordinate::from(1.0_f32), Coordinate::Literal(1.0));
        assert_eq!(shared, shared.clone());
        assert_ne!(shared, Coordinate::computed(|| 1.0));
        assert_ne!(shared, Coordinate::Literal(1.0));
    }

    #[test]
    fn custom_keys_compare_by_name() {
        let a = StyleProperty::Custom("Sound".into(), "click.wav".into());
        let b = StyleProperty::Custom("Sound".into(), "other.wav".into());
        let c = StyleProperty::Custom("Cursor".into(), "hand".into());

        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
        assert_ne!(a.key(), PropertyKey::Tint);
    }
}
