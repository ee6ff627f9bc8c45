use std::path::Path;

use graphics::Canvas;
use graphics::Color;
use graphics::TextureManager;
use tracing::debug;
use tracing::info;
use tracing::instrument;
use ui_base::Widget;
use ui_base::WidgetRegistry;
use ui_base::WindowSize;
use winit::event::WindowEvent;

use crate::config::SceneConfig;
use crate::input::InputRecorder;
use crate::script::Script;
use crate::viewport::Viewport;

/// Drives a scene one frame at a time without a window.
pub struct App {
    // Keeps the texture slots alive for as long as widgets refer to them.
    textures: TextureManager,
    viewport: Viewport,
    registry: WidgetRegistry,
    recorder: InputRecorder,
    canvas: Canvas,
    clear_color: Option<Color>,
    frame: u64,
}

impl App {
    pub fn from_scene(
        scene: &SceneConfig,
        base_dir: &Path,
        window_size: WindowSize,
    ) -> anyhow::Result<Self> {
        let textures = TextureManager::new();
        let viewport = Viewport::new(window_size);
        let registry = scene.build(base_dir, &textures, &viewport)?;

        Ok(Self {
            textures,
            viewport,
            registry,
            recorder: InputRecorder::new(window_size),
            canvas: Canvas::new(),
            clear_color: Some(Color::BLACK),
            frame: 0,
        })
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn recorder_mut(&mut self) -> &mut InputRecorder {
        &mut self.recorder
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn live_textures(&self) -> usize {
        self.textures.live_count()
    }

    pub fn window_event(&mut self, event: &WindowEvent) {
        self.recorder.window_event(event);
    }

    /// Updates and renders every widget against the input recorded since the
    /// last step. Returns the number of widgets that changed state.
    #[instrument(skip(self), fields(frame = self.frame))]
    pub fn step(&mut self) -> usize {
        self.viewport.set(self.recorder.state().window_size);

        let before = self
            .registry
            .iter()
            .map(|(_, widget)| widget.state().current_state().to_owned())
            .collect::<Vec<_>>();

        self.registry.update_all(&self.recorder.frame());

        let mut transitions = 0;
        for ((id, widget), previous) in self.registry.iter().zip(&before) {
            let current = widget.state().current_state();
            if current != previous {
                info!("{id}: {previous} -> {current}");
                transitions += 1;
            }
        }

        self.canvas.begin_frame(self.clear_color);
        self.registry.render_all(&mut self.canvas);
        debug!("Drew {} primitives", self.canvas.primitives().len());

        self.recorder.end_frame();
        self.frame += 1;

        transitions
    }

    /// Replays `script`, stepping once per frame repetition.
    pub fn run_script(&mut self, script: &Script) -> usize {
        if let Some(size) = script.viewport_size() {
            self.recorder.resized(size);
        }

        let mut transitions = 0;
        for frame in &script.frames {
            for i in 0..frame.repeat {
                if i == 0 {
                    frame.apply(&mut self.recorder);
                }
                transitions += self.step();
            }
        }

        transitions
    }

    pub fn run_idle(&mut self, frames: u32) {
        for _ in 0..frames {
            self.step();
        }
    }
}
