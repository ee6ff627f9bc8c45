//! Headless driver for declarative widget scenes.
//!
//! Scenes are TOML files ([`config`]) built into a [`ui_base::WidgetRegistry`].
//! [`app::App`] steps the registry frame by frame against input recorded
//! from winit events or replayed from a [`script`].

pub mod app;
pub mod config;
pub mod input;
pub mod script;
pub mod viewport;
