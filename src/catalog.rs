use crate::client::{ItemId, Unit};

pub const MAX_RANK: u8 = 11;

/// The dispatch voucher stacks far beyond the per-transaction cap that
/// applies to every other reward, so quantity clamping special-cases it.
pub const DISPATCH_VOUCHER: ItemId = 9001;

/// Largest quantity the exchange accepts in a single transaction for
/// ordinary items.
pub const TRANSACTION_CAP: u32 = 99;

#[derive(Debug, Clone, Copy)]
pub struct RankInfo {
    pub title: &'static str,
    pub scrip_ceiling: u32,
    pub promotion_cost: u32,
}

const RANKS: [RankInfo; MAX_RANK as usize] = [
    RankInfo { title: "Recruit", scrip_ceiling: 10_000, promotion_cost: 2_000 },
    RankInfo { title: "Private", scrip_ceiling: 15_000, promotion_cost: 3_000 },
    RankInfo { title: "Corporal", scrip_ceiling: 20_000, promotion_cost: 4_000 },
    RankInfo { title: "Sergeant", scrip_ceiling: 25_000, promotion_cost: 5_000 },
    RankInfo { title: "Staff Sergeant", scrip_ceiling: 30_000, promotion_cost: 6_000 },
    RankInfo { title: "Master Sergeant", scrip_ceiling: 35_000, promotion_cost: 7_000 },
    RankInfo { title: "Warrant Officer", scrip_ceiling: 40_000, promotion_cost: 8_000 },
    RankInfo { title: "Ensign", scrip_ceiling: 45_000, promotion_cost: 9_000 },
    RankInfo { title: "Lieutenant", scrip_ceiling: 50_000, promotion_cost: 10_000 },
    RankInfo { title: "Captain", scrip_ceiling: 80_000, promotion_cost: 15_000 },
    RankInfo { title: "Commander", scrip_ceiling: 90_000, promotion_cost: 0 },
];

/// Ranks are 1-based; rank 0 means "no company affiliation".
pub fn rank_info(rank: u8) -> Option<&'static RankInfo> {
    if rank == 0 {
        return None;
    }
    RANKS.get(rank as usize - 1)
}

pub fn scrip_ceiling(rank: u8) -> u32 {
    rank_info(rank).map_or(0, |info| info.scrip_ceiling)
}

pub fn subgroup_name(subgroup: u8) -> &'static str {
    match subgroup {
        1 => "Materiel",
        2 => "Weapons",
        3 => "Armor",
        4 => "Materials",
        _ => "Misc",
    }
}

/// Static reference data for one purchasable reward. Loaded once per
/// session and shared read-only afterwards.
#[derive(Debug, Clone, Copy)]
pub struct RewardCatalogEntry {
    pub item_id: ItemId,
    pub name: &'static str,
    pub tier: u8,
    pub subgroup: u8,
    pub required_rank: u8,
    pub stack_size: u32,
    pub scrip_cost: u32,
    pub eligible_units: &'static [Unit],
    pub inventory_limit: u32,
}

const ALL_UNITS: &[Unit] = &[Unit::CoralConcord, Unit::EmberLegion, Unit::SableWatch];

const STANDARD_REWARDS: &[RewardCatalogEntry] = &[
    RewardCatalogEntry {
        item_id: DISPATCH_VOUCHER,
        name: "Dispatch Voucher",
        tier: 1,
        subgroup: 1,
        required_rank: 2,
        stack_size: 65_000,
        scrip_cost: 200,
        eligible_units: ALL_UNITS,
        inventory_limit: 65_000,
    },
    RewardCatalogEntry {
        item_id: 9014,
        name: "Field Ration",
        tier: 1,
        subgroup: 1,
        required_rank: 1,
        stack_size: 99,
        scrip_cost: 150,
        eligible_units: ALL_UNITS,
        inventory_limit: 999,
    },
    RewardCatalogEntry {
        item_id: 9022,
        name: "Signal Flare",
        tier: 1,
        subgroup: 1,
        required_rank: 1,
        stack_size: 99,
        scrip_cost: 120,
        eligible_units: ALL_UNITS,
        inventory_limit: 999,
    },
    RewardCatalogEntry {
        item_id: 9031,
        name: "Drill Saber",
        tier: 1,
        subgroup: 2,
        required_rank: 1,
        stack_size: 1,
        scrip_cost: 1_200,
        eligible_units: &[Unit::CoralConcord, Unit::EmberLegion],
        inventory_limit: 10,
    },
    RewardCatalogEntry {
        item_id: 9035,
        name: "Watch Halberd",
        tier: 2,
        subgroup: 2,
        required_rank: 4,
        stack_size: 1,
        scrip_cost: 2_400,
        eligible_units: &[Unit::SableWatch],
        inventory_limit: 10,
    },
    RewardCatalogEntry {
        item_id: 9042,
        name: "Patrol Jacket",
        tier: 2,
        subgroup: 3,
        required_rank: 3,
        stack_size: 1,
        scrip_cost: 1_800,
        eligible_units: ALL_UNITS,
        inventory_limit: 10,
    },
    RewardCatalogEntry {
        item_id: 9047,
        name: "Ceremonial Sabatons",
        tier: 3,
        subgroup: 3,
        required_rank: 6,
        stack_size: 1,
        scrip_cost: 3_600,
        eligible_units: ALL_UNITS,
        inventory_limit: 10,
    },
    RewardCatalogEntry {
        item_id: 9053,
        name: "Alchemical Coke",
        tier: 3,
        subgroup: 4,
        required_rank: 6,
        stack_size: 999,
        scrip_cost: 200,
        eligible_units: ALL_UNITS,
        inventory_limit: 9_999,
    },
    RewardCatalogEntry {
        item_id: 9057,
        name: "Brass Ingot",
        tier: 2,
        subgroup: 4,
        required_rank: 3,
        stack_size: 999,
        scrip_cost: 250,
        eligible_units: ALL_UNITS,
        inventory_limit: 9_999,
    },
    RewardCatalogEntry {
        item_id: 9061,
        name: "Thick Canvas",
        tier: 1,
        subgroup: 4,
        required_rank: 2,
        stack_size: 999,
        scrip_cost: 180,
        eligible_units: ALL_UNITS,
        inventory_limit: 9_999,
    },
    RewardCatalogEntry {
        item_id: 9066,
        name: "Oiled Whetstone",
        tier: 1,
        subgroup: 4,
        required_rank: 1,
        stack_size: 99,
        scrip_cost: 90,
        eligible_units: ALL_UNITS,
        inventory_limit: 999,
    },
];

/// Items that can never be reacquired once turned in; the automation
/// refuses to deliver them.
const IRREPLACEABLE_ITEMS: &[ItemId] = &[7101, 7102, 7115, 7121, 7130];

pub fn is_irreplaceable(item_id: ItemId) -> bool {
    IRREPLACEABLE_ITEMS.contains(&item_id)
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<RewardCatalogEntry>,
}

impl Catalog {
    pub fn standard() -> Self {
        Self { entries: STANDARD_REWARDS.to_vec() }
    }

    pub fn entry(&self, item_id: ItemId) -> Option<&RewardCatalogEntry> {
        self.entries.iter().find(|entry| entry.item_id == item_id)
    }

    pub fn entries(&self) -> &[RewardCatalogEntry] {
        &self.entries
    }
}
