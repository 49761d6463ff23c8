//! Decoded per-tick input handed to the world by the windowing layer.
//!
//! The core never polls devices. The caller samples key states once per
//! frame and forwards every cursor position it received since the last tick.

/// Held state of the movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "This struct represents the pressed state of four directional keys plus sprint."
)]
pub struct MoveKeys {
    /// Walk along the look direction (W).
    pub forward: bool,
    /// Walk against the look direction (S).
    pub back: bool,
    /// Strafe left (A).
    pub left: bool,
    /// Strafe right (D).
    pub right: bool,
    /// Double the walking speed (Shift).
    pub sprint: bool,
}

/// Everything the world consumes for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Movement keys.
    pub movement: MoveKeys,
    /// Interact key is held; acted on only on the press edge.
    pub interact: bool,
    /// Switch key is held; acted on whenever the cooldown allows.
    pub toggle: bool,
    /// Restart key is held; acted on only on the press edge.
    pub restart: bool,
    /// Wall-clock seconds since the previous tick.
    pub delta_seconds: f32,
    /// Cursor positions received since the previous tick, oldest first.
    pub cursor: Vec<(f64, f64)>,
}

impl TickInput {
    /// Input with no keys held and no cursor motion.
    #[must_use]
    pub fn idle(delta_seconds: f32) -> Self {
        Self {
            delta_seconds,
            ..Self::default()
        }
    }
}

/// Tracks a key across ticks to report press edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    /// Records this tick's key state and reports whether it was just pressed.
    ///
    /// # Examples
    /// ```
    /// use escape::input::EdgeTrigger;
    /// let mut key = EdgeTrigger::default();
    /// assert!(key.pressed(true));
    /// assert!(!key.pressed(true));
    /// assert!(!key.pressed(false));
    /// assert!(key.pressed(true));
    /// ```
    pub fn pressed(&mut self, down: bool) -> bool {
        let edge = down && !self.was_down;
        self.was_down = down;
        edge
    }
}
