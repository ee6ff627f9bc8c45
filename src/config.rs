//! TOML scene files.
//!
//! A scene declares named textures and the widgets that use them:
//!
//! ```toml
//! [textures]
//! idle = "buttons/idle.png"
//! hover = { width = 120, height = 32 }
//!
//! [[widget]]
//! id = "play"
//! kind = "toggle"
//! state_order = ["Pressed&Hovered", "Pressed", "Hovered", "Default"]
//!
//! [widget.states.Default]
//! pos = [20, { anchor = "bottom", offset = -52 }]
//! texture = "idle"
//!
//! [widget.states.Hovered]
//! texture = "hover"
//! tint = "#ffe0e0"
//! cursor = "hand"
//! ```
//!
//! Keys other than `pos`, `texture` and `tint` are kept as custom string
//! properties. `texture = false` clears a texture inherited from `Default`.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::bail;
use graphics::Color;
use graphics::Texture;
use graphics::TextureManager;
use serde::Deserialize;
use tracing::info;
use ui_base::WidgetConfig;
use ui_base::WidgetKind;
use ui_base::WidgetRegistry;
use ui_base::style::Coordinate;
use ui_base::style::Position;
use ui_base::style::StyleEntry;
use ui_base::style::StyleTable;

use crate::viewport::Anchor;
use crate::viewport::Axis;
use crate::viewport::Viewport;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default)]
    pub textures: BTreeMap<String, TextureSource>,
    #[serde(default, rename = "widget")]
    pub widgets: Vec<WidgetDef>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TextureSource {
    /// An image file, relative to the scene file. Only its header is read.
    File(PathBuf),
    Size { width: f32, height: f32 },
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KindDef {
    Toggle,
    Momentary,
}

impl From<KindDef> for WidgetKind {
    fn from(kind: KindDef) -> Self {
        match kind {
            KindDef::Toggle => WidgetKind::Toggle,
            KindDef::Momentary => WidgetKind::Momentary,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetDef {
    pub id: String,
    pub kind: KindDef,
    pub state_order: Option<Vec<String>>,
    #[serde(default)]
    pub states: BTreeMap<String, StateDef>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StateDef {
    pub pos: Option<[CoordinateDef; 2]>,
    pub texture: Option<TextureRef>,
    pub tint: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CoordinateDef {
    Literal(f32),
    Anchored {
        anchor: Anchor,
        #[serde(default)]
        offset: f32,
    },
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TextureRef {
    Named(String),
    /// Only `false` is meaningful: it clears the texture.
    Enabled(bool),
}

impl SceneConfig {
    pub fn from_toml(source: &str) -> anyhow::Result<Self> {
        toml::from_str(source).context("Failed to parse scene")
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;

        Self::from_toml(&source).with_context(|| format!("In scene {}", path.display()))
    }

    /// Loads textures and builds every widget, in file order.
    ///
    /// Texture paths are resolved against `base_dir`.
    pub fn build(
        &self,
        base_dir: &Path,
        textures: &TextureManager,
        viewport: &Viewport,
    ) -> anyhow::Result<WidgetRegistry> {
        let loaded = self.load_textures(base_dir, textures)?;

        let mut registry = WidgetRegistry::new();
        for widget in &self.widgets {
            let config = widget
                .to_config(&loaded, viewport)
                .with_context(|| format!("Invalid widget {:?}", widget.id))?;

            registry
                .create_widget(widget.id.clone(), widget.kind.into(), config)
                .with_context(|| format!("Failed to create widget {:?}", widget.id))?;
        }

        info!("Built {} widgets", registry.len());
        Ok(registry)
    }

    fn load_textures(
        &self,
        base_dir: &Path,
        textures: &TextureManager,
    ) -> anyhow::Result<HashMap<String, Texture>> {
        let mut loaded = HashMap::with_capacity(self.textures.len());

        for (name, source) in &self.textures {
            let texture = match source {
                TextureSource::File(path) => textures
                    .load(base_dir.join(path))
                    .with_context(|| format!("Failed to load texture {name:?}"))?,
                TextureSource::Size { width, height } => {
                    textures.create(*width, *height, Some(name.as_str()))
                }
            };

            loaded.insert(name.clone(), texture);
        }

        Ok(loaded)
    }
}

impl WidgetDef {
    pub fn to_config(
        &self,
        textures: &HashMap<String, Texture>,
        viewport: &Viewport,
    ) -> anyhow::Result<WidgetConfig> {
        let mut table = StyleTable::new();

        for (name, state) in &self.states {
            let entry = state
                .to_entry(textures, viewport)
                .with_context(|| format!("In state {name:?}"))?;
            table.insert(name.clone(), entry);
        }

        Ok(WidgetConfig {
            states: table,
            state_order: self.state_order.clone(),
        })
    }
}

impl StateDef {
    pub fn to_entry(
        &self,
        textures: &HashMap<String, Texture>,
        viewport: &Viewport,
    ) -> anyhow::Result<StyleEntry> {
        let mut entry = StyleEntry::new();

        if let Some([x, y]) = self.pos {
            entry = entry.with_pos(Position::from_coordinates(
                x.to_coordinate(Axis::X, viewport),
                y.to_coordinate(Axis::Y, viewport),
            ));
        }

        match &self.texture {
            Some(TextureRef::Named(name)) => {
                let Some(texture) = textures.get(name) else {
                    bail!("Unknown texture {name:?}");
                };
                entry = entry.with_texture(Some(texture.clone()));
            }
            Some(TextureRef::Enabled(false)) => entry = entry.with_texture(None),
            Some(TextureRef::Enabled(true)) => {
                bail!("`texture = true` is not valid, name a texture or use `false`")
            }
            None => {}
        }

        if let Some(tint) = &self.tint {
            let color = Color::from_hex(tint).with_context(|| format!("Invalid tint {tint:?}"))?;
            entry = entry.with_tint(color);
        }

        for (key, value) in &self.extra {
            let value = match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            entry = entry.with_custom(key.clone(), value);
        }

        Ok(entry)
    }
}

impl CoordinateDef {
    pub fn to_coordinate(self, axis: Axis, viewport: &Viewport) -> Coordinate {
        match self {
            CoordinateDef::Literal(value) => Coordinate::Literal(value),
            CoordinateDef::Anchored { anchor, offset } => viewport.anchored(axis, anchor, offset),
        }
    }
}
