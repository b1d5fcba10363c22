use crate::{
    catalog::Filters,
    costs::CostStructure,
    equipment::Selection,
    session::slot::SlotKey,
    usage::UsageProfile,
};

/// Input change fed to [`super::Session::reduce`].
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    UsageChanged(UsageProfile),
    FiltersChanged(Filters),

    /// Requested number of slots, clamped to the supported range.
    SlotCountChanged(usize),

    SlotAdded(Selection),
    SlotRemoved(SlotKey),
    SelectionChanged(SlotKey, Selection),
    CostsChanged(SlotKey, CostStructure),

    /// Slots under binary comparison, [`None`] to fall back to the first two resolvable ones.
    ComparisonChanged(Option<(SlotKey, SlotKey)>),
}
