use crate::catalog;
use crate::client::{ItemId, SlotContent};
use crate::config::Config;

/// Scrip that must stay untouched by purchases. Profiles can opt out, and a
/// distinct amount may apply exactly at the top rank.
pub fn effective_reserved_balance(config: &Config, rank: u8) -> u32 {
    if config.profile.ignore_reserved_balance {
        return 0;
    }
    if rank >= catalog::MAX_RANK && config.reserve_different_at_max_rank {
        config.reserved_at_max_rank
    } else {
        config.reserved_balance
    }
}

pub fn scrip_ceiling(rank: u8) -> u32 {
    catalog::scrip_ceiling(rank)
}

/// Largest quantity of an item that can physically be carried, bounded by
/// the requested limit and the item's inventory limit. Ordinary items are
/// limited by free-or-matching bag slots times stack size; the dispatch
/// voucher ignores slot capacity entirely.
pub fn max_purchasable(
    slots: &[SlotContent],
    item_id: ItemId,
    requested_limit: u32,
    stack_size: u32,
    inventory_limit: u32,
) -> u32 {
    if item_id == catalog::DISPATCH_VOUCHER {
        return requested_limit.min(inventory_limit);
    }

    let usable_slots = slots
        .iter()
        .filter(|slot| match slot {
            SlotContent::Empty => true,
            SlotContent::Occupied { item_id: held, .. } => *held == item_id,
        })
        .count() as u32;

    requested_limit
        .min(usable_slots.saturating_mul(stack_size))
        .min(inventory_limit)
}
