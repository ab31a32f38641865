//! Typed decision-variable identity.

use lineupforge_core::SlotId;

/// Dense index of a player within the candidate pool of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerIx(usize);

impl PlayerIx {
    /// Creates a player index from a raw pool position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying pool position.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Dense index of a decision variable within one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Creates a variable id from a raw index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Structured identity of a decision variable: this player occupying this
/// slot. A player eligible for several slots gets one variable per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarKey {
    pub player: PlayerIx,
    pub slot: SlotId,
}

impl VarKey {
    /// Creates a variable key.
    pub fn new(player: PlayerIx, slot: SlotId) -> Self {
        Self { player, slot }
    }
}
