//! Scripted input for running scenes without a window.
//!
//! ```toml
//! viewport = [800, 600]
//!
//! [[frame]]
//! pointer = [60, 40]
//!
//! [[frame]]
//! press = ["left"]
//! repeat = 3
//!
//! [[frame]]
//! release = ["left"]
//! ```

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use winit::dpi::PhysicalPosition;
use winit::dpi::PhysicalSize;
use winit::event::ElementState;

use crate::input::InputRecorder;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub viewport: Option<[u32; 2]>,
    #[serde(default, rename = "frame")]
    pub frames: Vec<ScriptFrame>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptFrame {
    pub pointer: Option<[f64; 2]>,
    #[serde(default)]
    pub press: Vec<ButtonName>,
    #[serde(default)]
    pub release: Vec<ButtonName>,
    /// Runs the frame this many times. Events are only delivered on the
    /// first run; later runs see the held levels.
    #[serde(default = "one")]
    pub repeat: u32,
}

fn one() -> u32 {
    1
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonName {
    Left,
    Right,
    Middle,
}

impl From<ButtonName> for winit::event::MouseButton {
    fn from(button: ButtonName) -> Self {
        match button {
            ButtonName::Left => winit::event::MouseButton::Left,
            ButtonName::Right => winit::event::MouseButton::Right,
            ButtonName::Middle => winit::event::MouseButton::Middle,
        }
    }
}

impl Script {
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("Failed to parse script")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;

        Self::from_toml(&source).with_context(|| format!("In script {}", path.display()))
    }

    pub fn viewport_size(&self) -> Option<PhysicalSize<u32>> {
        self.viewport.map(|[w, h]| PhysicalSize::new(w, h))
    }
}

impl ScriptFrame {
    /// Feeds this frame's input into `recorder`, presses before releases.
    pub fn apply(&self, recorder: &mut InputRecorder) {
        if let Some([x, y]) = self.pointer {
            recorder.cursor_moved(PhysicalPosition::new(x, y));
        }

        for button in &self.press {
            recorder.mouse_input(ElementState::Pressed, (*button).into());
        }

        for button in &self.release {
            recorder.mouse_input(ElementState::Released, (*button).into());
        }
    }
}

#[cfg(test)]
mod tests {
    use ui_base::ButtonLevelSource;
    use ui_base::MouseButton;

    use super::*;

    #[test]
    fn parses_frames_with_defaults() {
        let script = Script::from_toml(
            r#"
            viewport = [640, 480]

            [[frame]]
            pointer = [1, 2]

            [[frame]]
            press = ["left", "right"]
            repeat = 4
            "#,
        )
        .unwrap();

        assert_eq!(script.viewport_size(), Some(PhysicalSize::new(640, 480)));
        assert_eq!(script.frames.len(), 2);
        assert_eq!(script.frames[0].repeat, 1);
        assert_eq!(script.frames[1].press, [ButtonName::Left, ButtonName::Right]);
        assert_eq!(script.frames[1].repeat, 4);
    }

    #[test]
    fn apply_feeds_recorder() {
        let frame = ScriptFrame {
            pointer: Some([3.0, 4.0]),
            press: vec![ButtonName::Left],
            release: vec![ButtonName::Middle],
            repeat: 1,
        };

        let mut recorder = InputRecorder::default();
        frame.apply(&mut recorder);

        assert!(recorder.state().is_primary_button_down());
        assert_eq!(recorder.state().pointer.x, 3.0);
        assert_eq!(recorder.events().len(), 2);
        assert_eq!(recorder.events()[1].button, MouseButton::Middle);
    }

    #[test]
    fn unknown_button_is_rejected() {
        assert!(Script::from_toml("[[frame]]\npress = [\"thumb\"]").is_err());
    }
}
