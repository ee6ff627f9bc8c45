use std::collections::HashMap;

use graphics::RenderSurface;
use slotmap::SlotMap;
use slotmap::new_key_type;
use tracing::debug;
use tracing::instrument;

use crate::AnyWidget;
use crate::ConfigError;
use crate::FrameInput;
use crate::Widget;
use crate::WidgetConfig;
use crate::WidgetKind;

new_key_type! {
    struct WidgetKey;
}

struct Entry {
    id: String,
    widget: AnyWidget,
}

/// Owns widgets by id and drives them once per frame.
///
/// Updates and renders visit widgets in the order their ids were first
/// added. Adding a widget under an existing id replaces the old widget in
/// its original slot.
#[derive(Default)]
pub struct WidgetRegistry {
    widgets: SlotMap<WidgetKey, Entry>,
    ids: HashMap<String, WidgetKey>,
    order: Vec<WidgetKey>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a widget of `kind` and stores it under `id`.
    ///
    /// Nothing is stored if the configuration is rejected.
    pub fn create_widget(
        &mut self,
        id: impl Into<String>,
        kind: WidgetKind,
        config: WidgetConfig,
    ) -> Result<&mut AnyWidget, ConfigError> {
        let widget = AnyWidget::new(kind, config)?;
        Ok(self.insert(id, widget))
    }

    pub fn insert(&mut self, id: impl Into<String>, widget: impl Into<AnyWidget>) -> &mut AnyWidget {
        let id = id.into();
        let widget = widget.into();

        let existing = self.ids.get(&id).copied();

        let key = match existing {
            Some(key) => {
                debug!("Replacing widget {id:?}");
                self.widgets[key].widget = widget;
                key
            }
            None => {
                let key = self.widgets.insert(Entry {
                    id: id.clone(),
                    widget,
                });
                self.ids.insert(id, key);
                self.order.push(key);
                key
            }
        };

        &mut self.widgets[key].widget
    }

    pub fn remove(&mut self, id: &str) -> Option<AnyWidget> {
        let key = self.ids.remove(id)?;
        self.order.retain(|k| *k != key);
        self.widgets.remove(key).map(|entry| entry.widget)
    }

    pub fn get(&self, id: &str) -> Option<&AnyWidget> {
        let key = self.ids.get(id)?;
        self.widgets.get(*key).map(|entry| &entry.widget)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut AnyWidget> {
        let key = self.ids.get(id)?;
        self.widgets.get_mut(*key).map(|entry| &mut entry.widget)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids and widgets in update order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnyWidget)> {
        self.order
            .iter()
            .filter_map(|key| self.widgets.get(*key))
            .map(|entry| (entry.id.as_str(), &entry.widget))
    }

    #[instrument(skip_all, fields(widgets = self.order.len()))]
    pub fn update_all(&mut self, input: &FrameInput) {
        for key in &self.order {
            if let Some(entry) = self.widgets.get_mut(*key) {
                entry.widget.update(input);
            }
        }
    }

    #[instrument(skip_all, fields(widgets = self.order.len()))]
    pub fn render_all(&self, surface: &mut dyn RenderSurface) {
        for (_, widget) in self.iter() {
            widget.render(surface);
        }
    }
}
