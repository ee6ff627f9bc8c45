use graphics::RenderSurface;

use super::Widget;
use super::WidgetState;
use crate::ConfigError;
use crate::FrameInput;
use crate::WidgetConfig;
use crate::state::HOVERED;
use crate::state::PRESSED;

/// A button that latches: each primary press while hovered flips `Pressed`.
///
/// Presses are taken from the frame's events rather than the button level,
/// so holding the button down across frames toggles only once. Several
/// presses delivered in the same frame toggle once each.
#[derive(Debug)]
pub struct ToggleButton {
    state: WidgetState,
}

impl ToggleButton {
    pub fn new(config: WidgetConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: WidgetState::new(config)?,
        })
    }

    pub fn is_pressed(&self) -> bool {
        self.state.flag(PRESSED)
    }
}

impl Widget for ToggleButton {
    fn update(&mut self, input: &FrameInput) {
        let is_hovered = self.state.contains(input.pointer.current_position());

        let flags = self.state.flags_mut();
        flags.set(HOVERED, is_hovered);

        if is_hovered {
            for _ in input.events.iter().filter(|e| e.is_primary_press()) {
                flags.toggle(PRESSED);
            }
        }

        self.state.on_update();
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        self.state.render(surface);
    }

    fn state(&self) -> &WidgetState {
        &self.state
    }
}
