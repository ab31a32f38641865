//! Slot plans: the fixed roster-position vocabulary of one sport.
//!
//! A [`SlotPlan`] is an ordered list of slots, each of which must be filled
//! by exactly one eligible player in every lineup. Slots are addressed by
//! dense [`SlotId`] indexes internally; labels are the input/display keys.

use serde::Serialize;

use crate::error::{EngineError, Result};

/// Dense index of a slot within its [`SlotPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Creates a slot id from a raw index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One named roster position within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// Display/input label, e.g. `"PG"` or `"UTIL"`.
    pub label: String,
}

impl Slot {
    /// Creates a slot with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// The ordered, fixed slot vocabulary for one sport.
///
/// # Example
///
/// ```
/// use lineupforge_core::SlotPlan;
///
/// let plan = SlotPlan::nba();
/// assert_eq!(plan.len(), 8);
/// assert_eq!(plan.label_of(plan.id_of("UTIL").unwrap()), "UTIL");
/// ```
#[derive(Debug, Clone)]
pub struct SlotPlan {
    slots: Vec<Slot>,
}

impl SlotPlan {
    /// Builds a plan from an ordered list of slot labels.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] if the list is empty or a
    /// label is duplicated.
    pub fn new(labels: &[&str]) -> Result<Self> {
        if labels.is_empty() {
            return Err(EngineError::Configuration(
                "slot plan must contain at least one slot".into(),
            ));
        }
        let mut slots = Vec::with_capacity(labels.len());
        for label in labels {
            if slots.iter().any(|s: &Slot| s.label == *label) {
                return Err(EngineError::Configuration(format!(
                    "duplicate slot label '{label}' in plan"
                )));
            }
            slots.push(Slot::new(*label));
        }
        Ok(Self { slots })
    }

    /// The 8-slot basketball plan: five positions plus three flexible slots.
    pub fn nba() -> Self {
        Self {
            slots: crate::nba::SLOT_LABELS.iter().copied().map(Slot::new).collect(),
        }
    }

    /// Number of slots in the plan.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the plan has no slots. Never true for a built plan.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Looks up the id of a slot by label.
    pub fn id_of(&self, label: &str) -> Option<SlotId> {
        self.slots
            .iter()
            .position(|s| s.label == label)
            .map(SlotId::new)
    }

    /// Returns the label of a slot.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this plan.
    pub fn label_of(&self, id: SlotId) -> &str {
        &self.slots[id.index()].label
    }

    /// Iterates slots in plan order with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Slot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (SlotId::new(i), s))
    }

    /// Iterates all slot ids in plan order.
    pub fn ids(&self) -> impl Iterator<Item = SlotId> {
        (0..self.slots.len()).map(SlotId::new)
    }
}
