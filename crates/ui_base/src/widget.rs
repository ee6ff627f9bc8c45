use glamour::Point2;
use glamour::Rect;
use graphics::Color;
use graphics::RenderSurface;
use graphics::Texture;
use tracing::debug;

use crate::ConfigError;
use crate::FrameInput;
use crate::Pixels;
use crate::WidgetConfig;
use crate::state::ConditionFlags;
use crate::state::DEFAULT_STATE;
use crate::state::HOVERED;
use crate::state::PRESSED;
use crate::state::StateOrder;
use crate::style::StyleTable;
use crate::style::Visuals;

pub use momentary_button::MomentaryButton;
pub use toggle_button::ToggleButton;

mod momentary_button;
mod toggle_button;

pub trait Widget {
    /// Recomputes condition flags from `input` and moves to the state they
    /// select.
    fn update(&mut self, input: &FrameInput);

    fn render(&self, surface: &mut dyn RenderSurface);

    fn state(&self) -> &WidgetState;
}

/// The state machine and resolved visuals shared by every widget variant.
///
/// Variants only decide which condition flags are set; everything from
/// picking the active state to drawing happens here.
#[derive(Debug)]
pub struct WidgetState {
    styles: StyleTable,
    order: StateOrder,
    flags: ConditionFlags,
    current: String,
    visuals: Visuals,
}

impl WidgetState {
    /// Normalizes `config` and resolves the default state's visuals.
    pub fn new(config: WidgetConfig) -> Result<Self, ConfigError> {
        let (styles, order) = config.correct_data()?;

        let mut state = Self {
            styles,
            order,
            flags: [(HOVERED, false), (PRESSED, false)].into_iter().collect(),
            current: DEFAULT_STATE.to_string(),
            visuals: Visuals::default(),
        };

        state.resolve_visuals();
        Ok(state)
    }

    /// Switches to the state selected by the current flags. Visuals are only
    /// recomputed when the state actually changes.
    ///
    /// Returns true on a transition.
    pub fn on_update(&mut self) -> bool {
        let next = self.order.resolve(&self.flags);
        if next == self.current {
            return false;
        }

        debug!("State transition {:?} -> {next:?}", self.current);

        self.current = next.to_string();
        self.resolve_visuals();
        true
    }

    fn resolve_visuals(&mut self) {
        if let Some(entry) = self.styles.get(&self.current) {
            self.visuals.resolve(entry);
        }
    }

    pub fn render(&self, surface: &mut dyn RenderSurface) {
        if let Some(texture) = &self.visuals.texture {
            surface.blit(texture, self.visuals.placement.origin, self.visuals.tint);
        }
    }

    /// Hit-tests against the bounding box. The right and bottom edges are
    /// outside, so a zero-size box contains nothing.
    pub fn contains(&self, point: Point2<Pixels>) -> bool {
        let Rect { origin, size } = self.visuals.placement;

        (origin.x..origin.x + size.width).contains(&point.x)
            && (origin.y..origin.y + size.height).contains(&point.y)
    }

    pub fn flags(&self) -> &ConditionFlags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut ConditionFlags {
        &mut self.flags
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name)
    }

    pub fn current_state(&self) -> &str {
        &self.current
    }

    pub fn state_order(&self) -> &StateOrder {
        &self.order
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn placement(&self) -> Rect<Pixels> {
        self.visuals.placement
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.visuals.texture.as_ref()
    }

    pub fn tint(&self) -> Color {
        self.visuals.tint
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetKind {
    Toggle,
    Momentary,
}

/// Every widget variant the registry can create.
#[derive(Debug)]
pub enum AnyWidget {
    Toggle(ToggleButton),
    Momentary(MomentaryButton),
}

impl AnyWidget {
    pub fn new(kind: WidgetKind, config: WidgetConfig) -> Result<Self, ConfigError> {
        Ok(match kind {
            WidgetKind::Toggle => AnyWidget::Toggle(ToggleButton::new(config)?),
            WidgetKind::Momentary => AnyWidget::Momentary(MomentaryButton::new(config)?),
        })
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            AnyWidget::Toggle(_) => WidgetKind::Toggle,
            AnyWidget::Momentary(_) => WidgetKind::Momentary,
        }
    }
}

impl Widget for AnyWidget {
    fn update(&mut self, input: &FrameInput) {
        match self {
            AnyWidget::Toggle(widget) => widget.update(input),
            AnyWidget::Momentary(widget) => widget.update(input),
        }
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        match self {
            AnyWidget::Toggle(widget) => widget.render(surface),
            AnyWidget::Momentary(widget) => widget.render(surface),
        }
    }

    fn state(&self) -> &WidgetState {
        match self {
            AnyWidget::Toggle(widget) => widget.state(),
            AnyWidget::Momentary(widget) => widget.state(),
        }
    }
}

impl From<ToggleButton> for AnyWidget {
    fn from(widget: ToggleButton) -> Self {
        AnyWidget::Toggle(widget)
    }
}

impl From<MomentaryButton> for AnyWidget {
    fn from(widget: MomentaryButton) -> Self {
        AnyWidget::Momentary(widget)
    }
}


#[cfg(test)]
mod tests {
    use graphics::Canvas;
    use graphics::TextureManager;

    use super::test_support::*;
    use super::*;
    use crate::style::Position;
    use crate::style::StyleEntry;

    #[test]
    fn construction_resolves_default_visuals() {
        let textures = TextureManager::new();
        let state = WidgetState::new(button_config(&textures)).unwrap();

        assert_eq!(state.current_state(), DEFAULT_STATE);
        assert_eq!(state.placement().origin, Point2::new(10.0, 10.0));
        assert_eq!(state.texture().and_then(Texture::name).as_deref(), Some("idle"));
        assert!(!state.flag(HOVERED));
        assert!(!state.flag(PRESSED));
    }

    #[test]
    fn construction_fails_without_default() {
        let config = WidgetConfig::new(
            StyleTable::new().with("Hovered", StyleEntry::new().with_pos(Position::new(0.0, 0.0))),
        );

        assert!(matches!(
            AnyWidget::new(WidgetKind::Toggle, config),
            Err(ConfigError::MissingDefault { .. })
        ));
    }

    #[test]
    fn transition_recomputes_visuals_from_merged_entry() {
        let textures = TextureManager::new();
        let mut state = WidgetState::new(button_config(&textures)).unwrap();

        state.flags_mut().set(HOVERED, true);
        assert!(state.on_update());

        // Hovered sets only a texture, the position comes from Default.
        assert_eq!(state.current_state(), "Hovered");
        assert_eq!(state.placement().origin, Point2::new(10.0, 10.0));
        assert_eq!(state.texture().and_then(Texture::name).as_deref(), Some("hover"));
    }

    #[test]
    fn visuals_only_resolve_on_transition() {
        let calls = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = calls.clone();
        let x = crate::style::Coordinate::computed(move || {
            counter.set(counter.get() + 1);
            0.0
        });

        let config = WidgetConfig::new(
            StyleTable::new()
                .with("Default", StyleEntry::new().with_pos(Position::new(0.0, 0.0)))
                .with(
                    "Hovered",
                    StyleEntry::new().with_pos(Position::from_coordinates(
                        x,
                        crate::style::Coordinate::Literal(0.0),
                    )),
                ),
        );

        let mut state = WidgetState::new(config).unwrap();
        assert_eq!(calls.get(), 0);

        state.flags_mut().set(HOVERED, true);
        assert!(state.on_update());
        assert!(!state.on_update());
        assert!(!state.on_update());
        assert_eq!(calls.get(), 1);

        state.flags_mut().set(HOVERED, false);
        assert!(state.on_update());
        state.flags_mut().set(HOVERED, true);
        assert!(state.on_update());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn render_blits_current_texture() {
        let textures = TextureManager::new();
        let state = WidgetState::new(button_config(&textures)).unwrap();

        let mut canvas = Canvas::new();
        state.render(&mut canvas);

        let [primitive] = canvas.primitives() else {
            panic!("expected one primitive");
        };
        assert_eq!(primitive.placement, state.placement());
    }

    #[test]
    fn render_without_texture_draws_nothing() {
        let config = WidgetConfig::new(
            StyleTable::new().with("Default", StyleEntry::new().with_pos(Position::new(0.0, 0.0))),
        );
        let state = WidgetState::new(config).unwrap();

        let mut canvas = Canvas::new();
        state.render(&mut canvas);

        assert!(canvas.primitives().is_empty());
    }

    #[test]
    fn hit_test_excludes_right_and_bottom_edges() {
        let textures = TextureManager::new();
        let state = WidgetState::new(button_config(&textures)).unwrap();

        // 100x40 at (10, 10).
        assert!(state.contains(Point2::new(10.0, 10.0)));
        assert!(state.contains(Point2::new(109.5, 49.5)));
        assert!(!state.contains(Point2::new(110.0, 30.0)));
        assert!(!state.contains(Point2::new(50.0, 50.0)));
        assert!(!state.contains(Point2::new(9.5, 30.0)));
    }

    #[test]
    fn adjacent_widgets_do_not_share_an_edge() {
        let left = WidgetState::new(WidgetConfig::new(StyleTable::new().with(
            "Default",
            StyleEntry::new().with_pos(Position::new(0.0, 0.0)).with_texture(Some(
                TextureManager::new().create(50.0, 20.0, None),
            )),
        )))
        .unwrap();
        let right = WidgetState::new(WidgetConfig::new(StyleTable::new().with(
            "Default",
            StyleEntry::new().with_pos(Position::new(50.0, 0.0)).with_texture(Some(
                TextureManager::new().create(50.0, 20.0, None),
            )),
        )))
        .unwrap();

        let seam = Point2::new(50.0, 10.0);
        assert!(!left.contains(seam));
        assert!(right.contains(seam));
    }

    #[test]
    fn zero_size_box_contains_nothing() {
        let config = WidgetConfig::new(
            StyleTable::new().with("Default", StyleEntry::new().with_pos(Position::new(10.0, 10.0))),
        );
        let state = WidgetState::new(config).unwrap();

        assert_eq!(state.placement().size.width, 0.0);
        assert!(!state.contains(Point2::new(10.0, 10.0)));
    }

    #[test]
    fn any_widget_dispatches_by_kind() {
        let textures = TextureManager::new();

        for kind in [WidgetKind::Toggle, WidgetKind::Momentary] {
            let widget = AnyWidget::new(kind, button_config(&textures)).unwrap();
            assert_eq!(widget.kind(), kind);
            assert_eq!(widget.state().current_state(), DEFAULT_STATE);
        }
    }
}
