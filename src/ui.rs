//! HUD text fields and the game over overlay
//!
//! [`Hud::sync`] diffs the game state against what was last shown and
//! returns only the changes, so the DOM is touched when a value moves.

use crate::sim::GameState;

/// A single change to apply to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HudUpdate {
    Score(u64),
    Level(u32),
    Lives(u32),
    ShowOverlay(String),
    HideOverlay,
}

/// Overlay text for a finished run
pub fn game_over_message(score: u64) -> String {
    format!("GAME OVER! Final Score: {score}")
}

/// Last values pushed to the page
#[derive(Debug, Clone, Default)]
pub struct Hud {
    score: Option<u64>,
    level: Option<u32>,
    lives: Option<u32>,
    overlay: Option<String>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay text currently shown, if any
    pub fn overlay(&self) -> Option<&str> {
        self.overlay.as_deref()
    }

    /// Compare against the state and report what changed.
    ///
    /// The first call reports every field.
    pub fn sync(&mut self, state: &GameState) -> Vec<HudUpdate> {
        let mut updates = Vec::new();

        if self.score != Some(state.score) {
            self.score = Some(state.score);
            updates.push(HudUpdate::Score(state.score));
        }
        if self.level != Some(state.level) {
            self.level = Some(state.level);
            updates.push(HudUpdate::Level(state.level));
        }
        if self.lives != Some(state.lives) {
            self.lives = Some(state.lives);
            updates.push(HudUpdate::Lives(state.lives));
        }

        let overlay = state
            .is_game_over()
            .then(|| game_over_message(state.score));
        if overlay != self.overlay {
            updates.push(match &overlay {
                Some(text) => HudUpdate::ShowOverlay(text.clone()),
                None => HudUpdate::HideOverlay,
            });
            self.overlay = overlay;
        }

        updates
    }
}
