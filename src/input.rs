//! Per-tick input handed to the simulation by the presentation layer.
//!
//! Movement is a snapshot of keys currently held; everything that must fire
//! exactly once per key press arrives as a buffered [`Action`].

/// Directional and modifier keys held during this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Speed modifier.
    pub boost: bool,
}

impl HeldKeys {
    /// Net movement as a per-axis step in {-1, 0, +1}. Opposite keys cancel.
    pub fn net(&self) -> (i32, i32) {
        let dx = self.right as i32 - self.left as i32;
        let dy = self.down as i32 - self.up as i32;
        (dx, dy)
    }
}

/// Discrete trigger actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    FireBeam,
    Hyper,
    Gravity,
    NeoGravity,
    Shield,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub held: HeldKeys,
    pub presses: Vec<Action>,
}

impl InputFrame {
    /// A frame with nothing held and nothing pressed.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_held(held: HeldKeys) -> Self {
        Self {
            held,
            presses: Vec::new(),
        }
    }

    pub fn with_presses(presses: Vec<Action>) -> Self {
        Self {
            held: HeldKeys::default(),
            presses,
        }
    }
}
