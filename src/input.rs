use glamour::Point2;
use smallvec::SmallVec;
use ui_base::FrameInput;
use ui_base::InputEvent;
use ui_base::InputState;
use ui_base::MouseButton;
use ui_base::WindowSize;
use winit::dpi::PhysicalPosition;
use winit::dpi::PhysicalSize;
use winit::event::ElementState;
use winit::event::WindowEvent;

/// Accumulates window events into the input widgets read each frame.
///
/// Level state (pointer, held buttons, window size) carries over between
/// frames. Discrete events are kept until [`InputRecorder::end_frame`].
#[derive(Clone, Debug, Default)]
pub struct InputRecorder {
    state: InputState,
    events: SmallVec<[InputEvent; 4]>,
}

impl InputRecorder {
    pub fn new(window_size: WindowSize) -> Self {
        Self {
            state: InputState {
                window_size,
                ..Default::default()
            },
            events: SmallVec::new(),
        }
    }

    pub fn window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position),
            WindowEvent::CursorLeft { .. } => self.cursor_left(),
            WindowEvent::MouseInput { state, button, .. } => self.mouse_input(*state, *button),
            WindowEvent::Resized(size) => self.resized(*size),
            _ => {}
        }
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.state.pointer = Point2::new(position.x as f32, position.y as f32);
    }

    /// Moves the pointer somewhere no widget can contain it.
    pub fn cursor_left(&mut self) {
        self.state.pointer = Point2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
    }

    pub fn mouse_input(&mut self, state: ElementState, button: winit::event::MouseButton) {
        let button = map_button(button);

        self.state.mouse_state.set(button, state.is_pressed());
        self.events.push(match state {
            ElementState::Pressed => InputEvent::button_down(button),
            ElementState::Released => InputEvent::button_up(button),
        });
    }

    pub fn resized(&mut self, size: PhysicalSize<u32>) {
        self.state.window_size = WindowSize {
            width: size.width as f32,
            height: size.height as f32,
        };
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    pub fn frame(&self) -> FrameInput<'_> {
        FrameInput::new(&self.state, &self.events)
    }

    pub fn end_frame(&mut self) {
        self.events.clear();
    }
}

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Primary,
        winit::event::MouseButton::Right => MouseButton::Secondary,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Other(3),
        winit::event::MouseButton::Forward => MouseButton::Other(4),
        winit::event::MouseButton::Other(id) => MouseButton::Other(id),
    }
}
