use crate::client::ItemId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseMode {
    /// Buy a fixed quantity, then never again this run.
    OneTime,
    /// Top the owned quantity back up to the limit whenever it drops below.
    KeepStocked,
}

impl PurchaseMode {
    pub fn label(self) -> &'static str {
        match self {
            PurchaseMode::OneTime => "one-time",
            PurchaseMode::KeepStocked => "keep stocked",
        }
    }
}

/// A single wish-list entry resolved against the catalog for the duration of
/// one run. `effective_limit` is the only field that changes after
/// construction: one-time purchases decrement it by the quantity actually
/// bought.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub item_id: ItemId,
    pub name: String,
    pub effective_limit: u32,
    pub scrip_cost: u32,
    pub tier: u8,
    pub subgroup: u8,
    pub stack_size: u32,
    pub mode: PurchaseMode,
    pub check_secondary_stock: bool,
}

/// One row of the supply counter's delivery list. Rebuilt from the visible
/// list on every poll; never cached across ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnInCandidate {
    pub item_id: ItemId,
    pub name: String,
    pub value_with_bonus: u32,
    pub value_without_bonus: u32,
    pub ui_category: u8,
}
