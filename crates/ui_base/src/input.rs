use glamour::Point2;

use crate::Pixels;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseButtonState {
    pub is_left_down: bool,
    pub is_right_down: bool,
    pub is_middle_down: bool,
}

impl MouseButtonState {
    pub fn is_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Primary => self.is_left_down,
            MouseButton::Secondary => self.is_right_down,
            MouseButton::Middle => self.is_middle_down,
            MouseButton::Other(_) => false,
        }
    }

    pub fn set(&mut self, button: MouseButton, is_down: bool) {
        match button {
            MouseButton::Primary => self.is_left_down = is_down,
            MouseButton::Secondary => self.is_right_down = is_down,
            MouseButton::Middle => self.is_middle_down = is_down,
            MouseButton::Other(_) => {}
        }
    }
}

/// Level state of the pointer and window, sampled once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub pointer: Point2<Pixels>,
    pub mouse_state: MouseButtonState,
    pub window_size: WindowSize,
}

pub trait PointerSource {
    fn current_position(&self) -> Point2<Pixels>;
}

pub trait ButtonLevelSource {
    fn is_primary_button_down(&self) -> bool;
}

impl PointerSource for InputState {
    fn current_position(&self) -> Point2<Pixels> {
        self.pointer
    }
}

impl ButtonLevelSource for InputState {
    fn is_primary_button_down(&self) -> bool {
        self.mouse_state.is_left_down
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    ButtonDown,
    ButtonUp,
}

/// A discrete input event. Events are delivered once, in the frame they
/// occurred, and are not retained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: EventKind,
    pub button: MouseButton,
}

impl InputEvent {
    pub fn button_down(button: MouseButton) -> Self {
        Self {
            kind: EventKind::ButtonDown,
            button,
        }
    }

    pub fn button_up(button: MouseButton) -> Self {
        Self {
            kind: EventKind::ButtonUp,
            button,
        }
    }

    pub fn is_primary_press(&self) -> bool {
        self.kind == EventKind::ButtonDown && self.button == MouseButton::Primary
    }
}

/// Everything a widget may read during one update.
#[derive(Clone, Copy)]
pub struct FrameInput<'a> {
    pub pointer: &'a dyn PointerSource,
    pub buttons: &'a dyn ButtonLevelSource,
    pub events: &'a [InputEvent],
}

impl<'a> FrameInput<'a> {
    pub fn new(state: &'a InputState, events: &'a [InputEvent]) -> Self {
        Self {
            pointer: state,
            buttons: state,
            events,
        }
    }
}
