use std::cell::Cell;
use std::rc::Rc;

use serde::Deserialize;
use ui_base::WindowSize;
use ui_base::style::Coordinate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Where along an axis an anchored coordinate is measured from.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    #[serde(alias = "left", alias = "top")]
    Start,
    Center,
    #[serde(alias = "right", alias = "bottom")]
    End,
}

/// The live window size, shared with the coordinates that depend on it.
///
/// Anchored coordinates read the size when a widget enters a state, not
/// when the configuration is loaded.
#[derive(Clone, Debug, Default)]
pub struct Viewport {
    size: Rc<Cell<WindowSize>>,
}

impl Viewport {
    pub fn new(size: WindowSize) -> Self {
        Self {
            size: Rc::new(Cell::new(size)),
        }
    }

    pub fn get(&self) -> WindowSize {
        self.size.get()
    }

    pub fn set(&self, size: WindowSize) {
        self.size.set(size);
    }

    pub fn anchored(&self, axis: Axis, anchor: Anchor, offset: f32) -> Coordinate {
        let size = self.size.clone();

        Coordinate::computed(move || {
            let size = size.get();
            let extent = match axis {
                Axis::X => size.width,
                Axis::Y => size.height,
            };

            let base = match anchor {
                Anchor::Start => 0.0,
                Anchor::Center => extent / 2.0,
                Anchor::End => extent,
            };

            base + offset
        })
    }
}
