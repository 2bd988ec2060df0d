//! First-mover selection.
//!
//! Starting a game picks the opening player uniformly at random between the
//! challenger and the challenged. The choice sits behind a trait so tests
//! can pin the outcome.

use rand::Rng;

/// Decides which participant opens the game.
pub trait FirstMoverPicker: Send + Sync {
    /// True when the challenger should take slot 0 and move first.
    fn challenger_first(&self) -> bool;
}

/// Uniformly random pick.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFirstMover;

impl FirstMoverPicker for RandomFirstMover {
    fn challenger_first(&self) -> bool {
        rand::thread_rng().gen_bool(0.5)
    }
}

/// Fixed pick for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedFirstMover(pub bool);

impl FirstMoverPicker for FixedFirstMover {
    fn challenger_first(&self) -> bool {
        self.0
    }
}
