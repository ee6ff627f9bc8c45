//! A declarative widget-state engine.
//!
//! Widgets declare named visual states in a [`style::StyleTable`]. Every
//! frame each widget recomputes its condition flags from input, the
//! [`state`] module picks the single active state, and the [`style`] module
//! resolves that state's position and texture.

pub use graphics::Pixels;

pub use crate::config::*;
pub use crate::input::*;
pub use crate::registry::*;
pub use crate::widget::*;

mod config;
pub mod input;
mod registry;
pub mod state;
pub mod style;
mod widget;
