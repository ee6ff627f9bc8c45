use tracing::debug;

use crate::state::DEFAULT_STATE;
use crate::state::STANDARD_ORDER;
use crate::state::StateOrder;
use crate::style::StyleTable;
use crate::style::normalize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The style table has no entry for the default state.
    MissingDefault { key: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingDefault { key } => {
                write!(f, "style table has no {key:?} entry")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// The declarative description of a widget: its styles per state and,
/// optionally, the priority order in which states are tried.
#[derive(Clone, Debug, Default)]
pub struct WidgetConfig {
    pub states: StyleTable,
    pub state_order: Option<Vec<String>>,
}

impl WidgetConfig {
    pub fn new(states: StyleTable) -> Self {
        Self {
            states,
            state_order: None,
        }
    }

    pub fn with_state_order<S: Into<String>>(mut self, order: impl IntoIterator<Item = S>) -> Self {
        self.state_order = Some(order.into_iter().map(Into::into).collect());
        self
    }

    /// Normalizes the configuration into the form widgets run on.
    ///
    /// States listed in the order without a style entry are dropped; an
    /// order left empty falls back to just the default state. Every style
    /// entry then inherits the keys it does not set from the default entry.
    pub fn correct_data(self) -> Result<(StyleTable, StateOrder), ConfigError> {
        let Self {
            mut states,
            state_order,
        } = self;

        normalize(&mut states, DEFAULT_STATE)?;

        let requested =
            state_order.unwrap_or_else(|| STANDARD_ORDER.iter().map(|s| s.to_string()).collect());

        let mut names = Vec::with_capacity(requested.len());
        for name in requested {
            if states.contains(&name) {
                names.push(name);
            } else {
                debug!("Dropping state {name:?} from state order: no style entry");
            }
        }

        if names.is_empty() {
            names.push(DEFAULT_STATE.to_string());
        }

        Ok((states, StateOrder::parse(names)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Position;
    use crate::style::StyleEntry;

    fn table(names: &[&str]) -> StyleTable {
        names
            .iter()
            .map(|name| (*name, StyleEntry::new().with_pos(Position::new(0.0, 0.0))))
            .collect()
    }

    #[test]
    fn missing_order_uses_standard_filtered() {
        let config = WidgetConfig::new(table(&["Default", "Hovered", "Pressed"]));
        let (_, order) = config.correct_data().unwrap();

        assert_eq!(order.names().collect::<Vec<_>>(), ["Pressed", "Hovered", "Default"]);
    }

    #[test]
    fn order_drops_states_without_styles() {
        let config = WidgetConfig::new(table(&["Default", "Hovered"]))
            .with_state_order(["Pressed", "Hovered", "Default"]);
        let (_, order) = config.correct_data().unwrap();

        assert_eq!(order.names().collect::<Vec<_>>(), ["Hovered", "Default"]);
    }

    #[test]
    fn empty_order_falls_back_to_default() {
        let config = WidgetConfig::new(table(&["Default"])).with_state_order(["Pressed"]);
        let (_, order) = config.correct_data().unwrap();

        assert_eq!(order.names().collect::<Vec<_>>(), [DEFAULT_STATE]);

        let config = WidgetConfig::new(table(&["Default"])).with_state_order(Vec::<String>::new());
        let (_, order) = config.correct_data().unwrap();

        assert_eq!(order.len(), 1);
    }

    #[test]
    fn missing_default_is_fatal() {
        let config = WidgetConfig::new(table(&["Hovered"]));

        assert_eq!(
            config.correct_data().unwrap_err(),
            ConfigError::MissingDefault {
                key: DEFAULT_STATE.to_string()
            }
        );
    }

    #[test]
    fn empty_condition_is_kept_but_never_selected() {
        let config =
            WidgetConfig::new(table(&["Default", "Hovered&"])).with_state_order(["Hovered&"]);
        let (_, order) = config.correct_data().unwrap();

        assert_eq!(order.names().collect::<Vec<_>>(), ["Hovered&"]);

        let flags = [("Hovered", true), ("Pressed", true)].into_iter().collect();
        assert_eq!(order.resolve(&flags), DEFAULT_STATE);
    }
}
