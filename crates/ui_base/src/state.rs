//! State resolution.
//!
//! A widget's condition flags (such as `Hovered` or `Pressed`) are matched
//! against a [`StateOrder`], a priority list of composite state names like
//! `"Pressed&Hovered"`. The first composite whose conditions all hold is the
//! active state. When nothing matches, the widget falls back to
//! [`DEFAULT_STATE`].
//!
//! Resolution is a first-match scan. Unlike a most-specific-match lookup,
//! the caller decides precedence by ordering the list, so more restrictive
//! composites must come before the states they refine.

use std::borrow::Cow;

use smallvec::SmallVec;

/// The baseline state. Never tested as a condition.
pub const DEFAULT_STATE: &str = "Default";

/// Joins condition names inside a composite state name.
pub const SEPARATOR: char = '&';

pub const HOVERED: &str = "Hovered";
pub const PRESSED: &str = "Pressed";

/// The state order used when a widget does not provide one, most specific
/// first.
pub const STANDARD_ORDER: [&str; 4] = ["Pressed&Hovered", "Pressed", "Hovered", DEFAULT_STATE];

/// Named boolean conditions owned by a widget. Missing names read as false.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConditionFlags {
    flags: SmallVec<[(Cow<'static, str>, bool); 4]>,
}

impl ConditionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, name: &str) -> bool {
        self.flags
            .iter()
            .find(|(n, _)| n == name)
            .is_some_and(|(_, value)| *value)
    }

    pub fn set(&mut self, name: impl Into<Cow<'static, str>>, value: bool) {
        let name = name.into();

        if let Some(existing) = self.flags.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value;
        } else {
            self.flags.push((name, value));
        }
    }

    /// Flips a condition, treating a missing one as false.
    pub fn toggle(&mut self, name: impl Into<Cow<'static, str>>) {
        let name = name.into();
        let value = self.get(&name);
        self.set(name, !value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, value)| (&**name, *value))
    }
}

impl<N: Into<Cow<'static, str>>> FromIterator<(N, bool)> for ConditionFlags {
    fn from_iter<I: IntoIterator<Item = (N, bool)>>(iter: I) -> Self {
        let mut flags = Self::new();
        for (name, value) in iter {
            flags.set(name, value);
        }
        flags
    }
}

/// A state name split into the conditions it requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeState {
    name: String,
    conditions: SmallVec<[String; 2]>,
}

impl CompositeState {
    /// Splits `name` on [`SEPARATOR`]. Empty segments are kept as conditions
    /// no flag can satisfy, so `"Hovered&"` is accepted but never selected.
    pub fn parse(name: &str) -> Self {
        let conditions = name
            .split(SEPARATOR)
            .filter(|condition| *condition != DEFAULT_STATE)
            .map(str::to_string)
            .collect();

        Self {
            name: name.to_string(),
            conditions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn conditions(&self) -> impl Iterator<Item = &str> {
        self.conditions.iter().map(String::as_str)
    }

    /// True when every required condition is set. A composite with no
    /// conditions (such as `"Default"`) always matches.
    #[inline]
    pub fn matches(&self, flags: &ConditionFlags) -> bool {
        self.conditions.iter().all(|c| flags.get(c))
    }
}

/// A priority-ordered list of composite states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateOrder {
    states: SmallVec<[CompositeState; 4]>,
}

impl StateOrder {
    pub fn parse<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            states: names
                .into_iter()
                .map(|name| CompositeState::parse(name.as_ref()))
                .collect(),
        }
    }

    pub fn standard() -> Self {
        Self::parse(STANDARD_ORDER)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(CompositeState::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompositeState> {
        self.states.iter()
    }

    /// Returns the first state whose conditions all hold, or
    /// [`DEFAULT_STATE`] if none do.
    #[inline]
    pub fn resolve(&self, flags: &ConditionFlags) -> &str {
        resolve(flags, self)
    }
}

/// Picks the active state for `flags`.
///
/// This is a pure function of its inputs: the first composite in `order`
/// whose every non-default condition is set wins. `"Default"` is returned
/// when nothing matches, whether or not `order` lists it.
pub fn resolve<'a>(flags: &ConditionFlags, order: &'a StateOrder) -> &'a str {
    order
        .states
        .iter()
        .find(|state| state.matches(flags))
        .map_or(DEFAULT_STATE, CompositeState::name)
}
