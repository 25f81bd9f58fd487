use crate::automation::request::PurchaseMode;
use crate::catalog;
use crate::client::{ItemId, ListFilter};
use serde::{Deserialize, Serialize};

/// Where the end-of-run delivery report goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportChannel {
    #[default]
    ActivityLog,
    StatusLine,
}

impl ReportChannel {
    pub fn label(self) -> &'static str {
        match self {
            ReportChannel::ActivityLog => "activity log",
            ReportChannel::StatusLine => "status line",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Profile {
    pub disabled: bool,
    pub ignore_reserved_balance: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishListEntry {
    pub item_id: ItemId,
    limit: u32,
    mode: PurchaseMode,
    enabled: bool,
    check_secondary_stock: bool,
}

impl WishListEntry {
    pub fn new(item_id: ItemId, limit: u32, mode: PurchaseMode) -> Self {
        Self { item_id, limit, mode, enabled: true, check_secondary_stock: false }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn mode(&self) -> PurchaseMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn checks_secondary_stock(&self) -> bool {
        self.check_secondary_stock
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
    }

    pub fn adjust_limit(&mut self, delta: i64) {
        let adjusted = i64::from(self.limit) + delta;
        self.limit = adjusted.clamp(0, i64::from(u32::MAX)) as u32;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn cycle_mode(&mut self) {
        self.mode = match self.mode {
            PurchaseMode::OneTime => PurchaseMode::KeepStocked,
            PurchaseMode::KeepStocked => PurchaseMode::OneTime,
        };
    }

    pub fn toggle_secondary_stock(&mut self) {
        self.check_secondary_stock = !self.check_secondary_stock;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: u32,
    pub wish_list: Vec<WishListEntry>,
    pub reserved_balance: u32,
    #[serde(default)]
    pub reserve_different_at_max_rank: bool,
    #[serde(default)]
    pub reserved_at_max_rank: u32,
    #[serde(default)]
    pub rank_pause_threshold: Option<u8>,
    #[serde(default)]
    pub disable_when_away: bool,
    #[serde(default)]
    pub use_armoury_filter: bool,
    #[serde(default)]
    pub report_channel: ReportChannel,
    #[serde(default)]
    pub profile: Profile,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            wish_list: vec![WishListEntry::new(
                catalog::DISPATCH_VOUCHER,
                30,
                PurchaseMode::KeepStocked,
            )],
            reserved_balance: 0,
            reserve_different_at_max_rank: false,
            reserved_at_max_rank: 0,
            rank_pause_threshold: None,
            disable_when_away: false,
            use_armoury_filter: false,
            report_channel: ReportChannel::default(),
            profile: Profile::default(),
        }
    }
}

impl Config {
    pub fn expected_filter(&self) -> ListFilter {
        if self.use_armoury_filter {
            ListFilter::HideArmouryItems
        } else {
            ListFilter::HideEquippedSets
        }
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut WishListEntry> {
        self.wish_list.get_mut(index)
    }

    pub fn cycle_report_channel(&mut self) {
        self.report_channel = match self.report_channel {
            ReportChannel::ActivityLog => ReportChannel::StatusLine,
            ReportChannel::StatusLine => ReportChannel::ActivityLog,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_stocks_dispatch_vouchers() {
        let config = Config::default();
        assert_eq!(config.wish_list.len(), 1);
        let entry = &config.wish_list[0];
        assert_eq!(entry.item_id, catalog::DISPATCH_VOUCHER);
        assert_eq!(entry.mode(), PurchaseMode::KeepStocked);
        assert!(entry.is_enabled());
    }

    #[test]
    fn limit_adjustment_clamps_at_zero() {
        let mut entry = WishListEntry::new(1, 3, PurchaseMode::OneTime);
        entry.adjust_limit(-10);
        assert_eq!(entry.limit(), 0);
        entry.adjust_limit(5);
        assert_eq!(entry.limit(), 5);
    }

    #[test]
    fn direct_setters_overwrite_entry_state() {
        let mut entry = WishListEntry::new(1, 3, PurchaseMode::OneTime);
        entry.set_limit(40);
        entry.set_enabled(false);
        assert_eq!(entry.limit(), 40);
        assert!(!entry.is_enabled());
    }

    #[test]
    fn mode_cycles_between_both_variants() {
        let mut entry = WishListEntry::new(1, 3, PurchaseMode::OneTime);
        entry.cycle_mode();
        assert_eq!(entry.mode(), PurchaseMode::KeepStocked);
        entry.cycle_mode();
        assert_eq!(entry.mode(), PurchaseMode::OneTime);
    }

    #[test]
    fn filter_follows_armoury_flag() {
        let mut config = Config::default();
        assert_eq!(config.expected_filter(), ListFilter::HideEquippedSets);
        config.use_armoury_filter = true;
        assert_eq!(config.expected_filter(), ListFilter::HideArmouryItems);
    }
}
