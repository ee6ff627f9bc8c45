//! Per-state styles.
//!
//! A widget's [`StyleTable`] maps each state name to a [`StyleEntry`]. Before
//! a widget runs, [`normalize`] makes every entry inherit the keys it leaves
//! unset from the `"Default"` entry, so states only need to describe what
//! differs. When a widget enters a state, [`Visuals::resolve`] turns that
//! state's entry into a concrete placement, texture and tint.
//!
//! # Example
//!
//! ```
//! use ui_base::style::{normalize, Position, StyleEntry, StyleTable, Visuals};
//! use graphics::TextureManager;
//!
//! let textures = TextureManager::new();
//!
//! let mut table = StyleTable::new()
//!     .with(
//!         "Default",
//!         StyleEntry::new()
//!             .with_pos(Position::new(10.0, 10.0))
//!             .with_texture(Some(textures.create(80.0, 24.0, None))),
//!     )
//!     .with("Hovered", StyleEntry::new().with_pos(Position::new(12.0, 12.0)));
//!
//! normalize(&mut table, "Default").unwrap();
//!
//! let mut visuals = Visuals::default();
//! visuals.resolve(table.get("Hovered").unwrap());
//!
//! assert_eq!(visuals.placement.origin.x, 12.0);
//! assert_eq!(visuals.placement.size.width, 80.0);
//! ```

use glamour::Point2;
use glamour::Rect;
use glamour::Size2;
use graphics::Color;
use graphics::Texture;

use crate::Pixels;

mod properties;
mod table;

pub use properties::*;
pub use table::*;

/// What a widget draws, resolved from the entry of its current state.
#[derive(Clone, Debug, PartialEq)]
pub struct Visuals {
    pub placement: Rect<Pixels>,
    pub texture: Option<Texture>,
    pub tint: Color,
}

impl Default for Visuals {
    fn default() -> Self {
        Self {
            placement: Rect::new(Point2::new(0.0, 0.0), Size2::new(0.0, 0.0)),
            texture: None,
            tint: Color::WHITE,
        }
    }
}

impl Visuals {
    /// Applies `entry`, evaluating any computed coordinates now.
    ///
    /// With a texture, the placement becomes the texture's natural size at
    /// the resolved position. Without one, only the origin moves and the
    /// previous size is kept. An entry without a position keeps the current
    /// origin.
    pub fn resolve(&mut self, entry: &StyleEntry) {
        let origin = entry
            .position()
            .map_or(self.placement.origin, Position::resolve);

        self.texture = entry.texture().cloned();
        self.tint = entry.tint().unwrap_or(Color::WHITE);

        let size = self
            .texture
            .as_ref()
            .map_or(self.placement.size, Texture::natural_size);

        self.placement = Rect::new(origin, size);
    }
}
