use serde::{Deserialize, Serialize};

use crate::{
    catalog::Candidates,
    costs::CostStructure,
    equipment::{Equipment, Selection},
};

/// Stable slot identifier, kept across edits.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct SlotKey(pub u32);

impl SlotKey {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Comparison slot: what the user picked and what it costs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slot {
    pub key: SlotKey,
    pub selection: Selection,
    pub costs: CostStructure,
}

impl Slot {
    pub fn new(key: SlotKey, selection: Selection) -> Self {
        Self { key, selection, costs: CostStructure::default() }
    }

    #[must_use]
    pub fn resolve(&self, candidates: &Candidates<'_>) -> Option<Equipment> {
        self.selection.resolve(candidates)
    }
}
