//! Score counter and HUD refresh

use super::Behavior;
use crate::entity::GameEntity;
use crate::state::GameState;

/// Attribute holding the score on the source entity
pub const SCORE: &str = "score";

/// Increments the source entity's score every update and mirrors it into the
/// owning text entity.
///
/// The text is built from a pattern where `{}` is replaced by the score,
/// zero-padded to the configured width.
#[derive(Debug, Clone)]
pub struct ScoreUpdateBehavior {
    source: String,
    pattern: String,
    width: usize,
}

impl ScoreUpdateBehavior {
    /// Count on the entity named `source`, displayed as five digits
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            pattern: "{}".to_string(),
            width: 5,
        }
    }

    /// Set the display pattern; `{}` marks the score
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Set the zero-padding width
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Text shown for `score`
    pub fn render(&self, score: i64) -> String {
        self.pattern.replace("{}", &format!("{score:0width$}", width = self.width))
    }
}

impl Default for ScoreUpdateBehavior {
    fn default() -> Self {
        Self::new("player")
    }
}

impl Behavior for ScoreUpdateBehavior {
    fn update(&mut self, state: &mut GameState, entity: &mut GameEntity, _dt: f64) {
        let Some(source) = state.entities.get_mut(&self.source) else {
            log::trace!("Score source '{}' is not registered", self.source);
            return;
        };
        let score = source.attributes().i64_or(SCORE, 0) + 1;
        source.set_attribute(SCORE, score);
        entity.set_text(self.render(score));
    }
}
