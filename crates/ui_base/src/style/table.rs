use graphics::Color;
use graphics::Texture;
use smallvec::SmallVec;

use super::Position;
use super::PropertyKey;
use super::StyleProperty;
use crate::ConfigError;

/// The visual keys of one state. Each key appears at most once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleEntry {
    properties: SmallVec<[StyleProperty; 4]>,
}

impl StyleEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a property, replacing any existing value for the same key.
    pub fn set(&mut self, property: StyleProperty) {
        let index = self.properties.iter().position(|p| p.key() == property.key());

        match index {
            Some(index) => self.properties[index] = property,
            None => self.properties.push(property),
        }
    }

    #[must_use]
    pub fn with(mut self, property: StyleProperty) -> Self {
        self.set(property);
        self
    }

    #[must_use]
    pub fn with_pos(self, pos: Position) -> Self {
        self.with(StyleProperty::Pos(pos))
    }

    #[must_use]
    pub fn with_texture(self, texture: Option<Texture>) -> Self {
        self.with(StyleProperty::Texture(texture))
    }

    #[must_use]
    pub fn with_tint(self, tint: Color) -> Self {
        self.with(StyleProperty::Tint(tint))
    }

    #[must_use]
    pub fn with_custom(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(StyleProperty::Custom(key.into(), value.into()))
    }

    pub fn get(&self, key: PropertyKey) -> Option<&StyleProperty> {
        self.properties.iter().find(|p| p.key() == key)
    }

    pub fn contains(&self, key: PropertyKey) -> bool {
        self.get(key).is_some()
    }

    pub fn position(&self) -> Option<&Position> {
        match self.get(PropertyKey::Pos)? {
            StyleProperty::Pos(pos) => Some(pos),
            _ => None,
        }
    }

    /// The texture to draw. Absent and explicitly cleared both read as
    /// `None`.
    pub fn texture(&self) -> Option<&Texture> {
        match self.get(PropertyKey::Texture)? {
            StyleProperty::Texture(texture) => texture.as_ref(),
            _ => None,
        }
    }

    pub fn tint(&self) -> Option<Color> {
        match self.get(PropertyKey::Tint)? {
            StyleProperty::Tint(tint) => Some(*tint),
            _ => None,
        }
    }

    pub fn custom(&self, key: &str) -> Option<&str> {
        match self.get(PropertyKey::Custom(key))? {
            StyleProperty::Custom(_, value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn properties(&self) -> &[StyleProperty] {
        &self.properties
    }

    /// Copies every property of `base` whose key this entry does not set.
    /// One level only: values themselves are never merged.
    pub fn inherit(&mut self, base: &StyleEntry) {
        for property in &base.properties {
            if !self.contains(property.key()) {
                self.properties.push(property.clone());
            }
        }
    }
}

impl FromIterator<StyleProperty> for StyleEntry {
    fn from_iter<I: IntoIterator<Item = StyleProperty>>(iter: I) -> Self {
        let mut entry = Self::new();
        for property in iter {
            entry.set(property);
        }
        entry
    }
}

/// Style entries by state name, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleTable {
    entries: SmallVec<[(String, StyleEntry); 4]>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, replacing one with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, entry: StyleEntry) {
        let name = name.into();

        if let Some(existing) = self.get_mut(&name) {
            *existing = entry;
        } else {
            self.entries.push((name, entry));
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, entry: StyleEntry) -> Self {
        self.insert(name, entry);
        self
    }

    pub fn get(&self, name: &str) -> Option<&StyleEntry> {
        self.entries
            .iter()
            .find_map(|(n, entry)| (n == name).then_some(entry))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut StyleEntry> {
        self.entries
            .iter_mut()
            .find_map(|(n, entry)| (n == name).then_some(entry))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

impl<N: Into<String>> FromIterator<(N, StyleEntry)> for StyleTable {
    fn from_iter<I: IntoIterator<Item = (N, StyleEntry)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, entry) in iter {
            table.insert(name, entry);
        }
        table
    }
}

/// Makes every entry other than `default_key` inherit the keys it does not
/// set from the `default_key` entry.
///
/// The default entry is copied before any other entry is touched, so the
/// result does not depend on iteration order and running this twice gives
/// the same table as running it once.
pub fn normalize(table: &mut StyleTable, default_key: &str) -> Result<(), ConfigError> {
    let Some(default) = table.get(default_key).cloned() else {
        return Err(ConfigError::MissingDefault {
            key: default_key.to_string(),
        });
    };

    for (name, entry) in &mut table.entries {
        if name != default_key {
            entry.inherit(&default);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use graphics::TextureManager;

    use super::*;
    use crate::style::Coordinate;

    fn sample_table(textures: &TextureManager) -> StyleTable {
        StyleTable::new()
            .with(
                "Default",
                StyleEntry::new()
                    .with_pos(Position::new(10.0, 20.0))
                    .with_texture(Some(textures.create(50.0, 20.0, Some("idle"))))
                    .with_custom("Cursor", "arrow"),
            )
            .with(
                "Hovered",
                StyleEntry::new().with_texture(Some(textures.create(60.0, 24.0, Some("hover")))),
            )
            .with("Pressed", StyleEntry::new().with_pos(Position::new(12.0, 22.0)))
    }

    // ==================== Entries ====================

    #[test]
    fn set_replaces_same_key() {
        let entry = StyleEntry::new()
            .with_tint(Color::BLACK)
            .with_tint(Color::WHITE);

        assert_eq!(entry.properties().len(), 1);
        assert_eq!(entry.tint(), Some(Color::WHITE));
    }

    #[test]
    fn explicit_none_texture_is_a_set_key() {
        let entry = StyleEntry::new().with_texture(None);

        assert!(entry.contains(PropertyKey::Texture));
        assert!(entry.texture().is_none());
    }

    #[test]
    fn table_insert_keeps_position() {
        let table = StyleTable::new()
            .with("Default", StyleEntry::new())
            .with("Hovered", StyleEntry::new())
            .with("Default", StyleEntry::new().with_tint(Color::BLACK));

        assert_eq!(table.names().collect::<Vec<_>>(), ["Default", "Hovered"]);
        assert_eq!(table.get("Default").and_then(StyleEntry::tint), Some(Color::BLACK));
    }

    // ==================== Normalization ====================

    #[test]
    fn missing_default_is_an_error() {
        let mut table = StyleTable::new().with("Hovered", StyleEntry::new());

        assert_eq!(
            normalize(&mut table, "Default"),
            Err(ConfigError::MissingDefault {
                key: "Default".to_string()
            })
        );
    }

    #[test]
    fn unset_keys_come_from_default() {
        let textures = TextureManager::new();
        let mut table = sample_table(&textures);
        normalize(&mut table, "Default").unwrap();

        let default = table.get("Default").unwrap().clone();
        let hovered = table.get("Hovered").unwrap();
        let pressed = table.get("Pressed").unwrap();

        assert_eq!(hovered.position(), default.position());
        assert_eq!(hovered.custom("Cursor"), Some("arrow"));
        assert_eq!(pressed.texture(), default.texture());
    }

    #[test]
    fn overrides_win() {
        let textures = TextureManager::new();
        let mut table = sample_table(&textures);
        normalize(&mut table, "Default").unwrap();

        let hovered = table.get("Hovered").unwrap();
        let pressed = table.get("Pressed").unwrap();

        assert_eq!(hovered.texture().and_then(Texture::name).as_deref(), Some("hover"));
        assert_eq!(pressed.position(), Some(&Position::new(12.0, 22.0)));
    }

    #[test]
    fn default_entry_is_unchanged() {
        let textures = TextureManager::new();
        let mut table = sample_table(&textures);
        let before = table.get("Default").cloned();

        normalize(&mut table, "Default").unwrap();

        assert_eq!(table.get("Default").cloned(), before);
    }

    #[test]
    fn normalize_is_idempotent() {
        let textures = TextureManager::new();
        let mut once = sample_table(&textures);
        normalize(&mut once, "Default").unwrap();

        let mut twice = once.clone();
        normalize(&mut twice, "Default").unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn default_listed_last_still_merges_into_all() {
        let mut table = StyleTable::new()
            .with("Hovered", StyleEntry::new().with_tint(Color::BLACK))
            .with("Pressed", StyleEntry::new())
            .with("Default", StyleEntry::new().with_pos(Position::new(1.0, 2.0)));

        normalize(&mut table, "Default").unwrap();

        for name in ["Hovered", "Pressed"] {
            assert_eq!(
                table.get(name).and_then(StyleEntry::position),
                Some(&Position::new(1.0, 2.0))
            );
        }
        assert_eq!(table.get("Default").and_then(StyleEntry::tint), None);
    }

    #[test]
    fn computed_positions_are_shared_not_evaluated() {
        let x = Coordinate::computed(|| 5.0);
        let mut table = StyleTable::new()
            .with(
                "Default",
                StyleEntry::new().with_pos(Position::from_coordinates(x.clone(), Coordinate::Literal(0.0))),
            )
            .with("Hovered", StyleEntry::new());

        normalize(&mut table, "Default").unwrap();

        let pos = table.get("Hovered").and_then(StyleEntry::position).unwrap();
        assert_eq!(pos.x, x);
    }
}
