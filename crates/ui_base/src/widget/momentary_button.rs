use graphics::RenderSurface;

use super::Widget;
use super::WidgetState;
use crate::ConfigError;
use crate::FrameInput;
use crate::WidgetConfig;
use crate::state::HOVERED;
use crate::state::PRESSED;

/// A button that is pressed exactly while the primary button is held over it.
#[derive(Debug)]
pub struct MomentaryButton {
    state: WidgetState,
}

impl MomentaryButton {
    pub fn new(config: WidgetConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: WidgetState::new(config)?,
        })
    }

    pub fn is_pressed(&self) -> bool {
        self.state.flag(PRESSED)
    }
}

impl Widget for MomentaryButton {
    fn update(&mut self, input: &FrameInput) {
        let is_hovered = self.state.contains(input.pointer.current_position());
        let is_pressed = is_hovered && input.buttons.is_primary_button_down();

        let flags = self.state.flags_mut();
        flags.set(HOVERED, is_hovered);
        flags.set(PRESSED, is_pressed);

        self.state.on_update();
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        self.state.render(surface);
    }

    fn state(&self) -> &WidgetState {
        &self.state
    }
}
