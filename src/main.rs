use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui_base::Widget;
use ui_base::WindowSize;

use cameo::app::App;
use cameo::config::SceneConfig;
use cameo::script::Script;

const DEFAULT_WINDOW_SIZE: WindowSize = WindowSize {
    width: 800.0,
    height: 600.0,
};

/// Runs a widget scene headlessly, logging state changes and draw calls.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene file describing textures and widgets.
    config: PathBuf,

    /// Input to replay, one entry per frame.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Frames to run when no script is given.
    #[arg(long, default_value_t = 1)]
    frames: u32,
}

#[cfg(feature = "profile")]
#[derive(Default)]
struct TracyConfig(tracing_subscriber::fmt::format::DefaultFields);

#[cfg(feature = "profile")]
impl tracing_tracy::Config for TracyConfig {
    type Formatter = tracing_subscriber::fmt::format::DefaultFields;

    fn formatter(&self) -> &Self::Formatter {
        &self.0
    }

    fn stack_depth(&self, _: &tracing::metadata::Metadata<'_>) -> u16 {
        10
    }
}

fn main() -> anyhow::Result<()> {
    color_backtrace::install();

    let args = Args::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().ok();
    let def_filter = env_filter.is_none().then(|| {
        tracing_subscriber::filter::Targets::new()
            .with_default(Level::DEBUG)
            .with_targets([("winit", Level::WARN)])
    });

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().pretty())
        .with(env_filter)
        .with(def_filter);

    #[cfg(feature = "profile")]
    let registry = registry.with(tracing_tracy::TracyLayer::new(TracyConfig::default()));

    registry.init();

    let scene = SceneConfig::load(&args.config)?;
    let base_dir = args.config.parent().unwrap_or(Path::new("."));

    let mut app = App::from_scene(&scene, base_dir, DEFAULT_WINDOW_SIZE)
        .with_context(|| format!("Failed to build scene {}", args.config.display()))?;

    let transitions = match &args.script {
        Some(path) => app.run_script(&Script::load(path)?),
        None => {
            app.run_idle(args.frames);
            0
        }
    };

    for (id, widget) in app.registry().iter() {
        info!("{id}: {}", widget.state().current_state());
    }

    info!(
        "Ran {} frames, {transitions} transitions",
        app.frame_count()
    );

    Ok(())
}
