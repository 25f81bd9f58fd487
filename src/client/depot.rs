use crate::catalog::{self, Catalog};
use crate::client::{
    ClientSurface, Counter, HostAutomations, ItemId, ListFilter, MenuAction, Prompt, PromptChoice,
    Screen, SlotContent, Unit, VisibleEntry,
};
use rand::{thread_rng, Rng};
use std::collections::HashMap;
use std::time::Duration;

const BAG_SLOTS: usize = 140;

const MENU_OPEN_MS: u64 = 250;
const LIST_OPEN_MS: u64 = 400;
const REWARD_OPEN_MS: u64 = 300;
const PROMPT_OPEN_MS: u64 = 150;
const LIST_SETTLE_MS: u64 = 300;
const REFRESH_MS: u64 = 100;
/// How long the delivery list keeps showing its pre-turn-in snapshot when
/// nothing forces a rebuild.
const STALE_LIST_MS: u64 = 400;

/// One turn-in-eligible item sitting in the depot's intake.
#[derive(Debug, Clone)]
pub struct DepotItem {
    pub item_id: ItemId,
    pub name: String,
    pub value: u32,
    pub ui_category: u8,
    pub high_quality: bool,
}

#[derive(Debug)]
struct CounterMenuState {
    ready_in_ms: u64,
}

#[derive(Debug)]
struct SupplyListState {
    ready_in_ms: u64,
    tab: u8,
    stale: Option<(Vec<VisibleEntry>, u64)>,
}

#[derive(Debug)]
struct RewardState {
    ready_in_ms: u64,
    item_id: ItemId,
    awaiting_quality_answer: bool,
}

#[derive(Debug)]
struct PromptState {
    ready_in_ms: u64,
    prompt: Prompt,
    pending: Option<PendingPurchase>,
}

#[derive(Debug, Clone, Copy)]
struct PendingPurchase {
    item_id: ItemId,
    quantity: u32,
    total_cost: u32,
    stack_size: u32,
}

#[derive(Debug)]
struct ExchangeState {
    ready_in_ms: u64,
    tier: Option<u8>,
    subgroup: Option<u8>,
}

/// In-memory stand-in for the external client: screens open with a small
/// latency, the delivery list can lag behind a turn-in, and purchases land
/// in simulated bags. Implements the same capability surface a real host
/// adapter would.
pub struct Depot {
    catalog: Catalog,

    balance: u32,
    rank: u8,
    unit: Unit,
    bonus: f64,
    bags: Vec<SlotContent>,
    secondary: HashMap<ItemId, u32>,
    stock: Vec<DepotItem>,

    target: Option<Counter>,
    counter_menu: Option<CounterMenuState>,
    supply_list: Option<SupplyListState>,
    reward: Option<RewardState>,
    prompt: Option<PromptState>,
    exchange: Option<ExchangeState>,
    remembered_filter: ListFilter,

    auto_confirm: Option<bool>,
    vendor_shortcut: Option<bool>,
    frame_throttle: bool,
    service_area: bool,
    home_realm: bool,
}

const INTAKE_POOL: &[(&str, u8)] = &[
    ("Worn Pike", 10),
    ("Bent Halberd", 10),
    ("Dull Saber", 10),
    ("Chipped Dagger", 10),
    ("Split Longbow", 11),
    ("Warped Staff", 12),
    ("Cracked Buckler", 20),
    ("Rusty Cuirass", 30),
    ("Frayed Doublet", 30),
    ("Patched Gambeson", 30),
    ("Tattered Coat", 30),
    ("Scuffed Greaves", 32),
];

impl Depot {
    fn with_character(catalog: Catalog, rank: u8, balance: u32, unit: Unit, bonus: f64) -> Self {
        Self {
            catalog,
            balance,
            rank,
            unit,
            bonus,
            bags: vec![SlotContent::Empty; BAG_SLOTS],
            secondary: HashMap::new(),
            stock: Vec::new(),
            target: None,
            counter_menu: None,
            supply_list: None,
            reward: None,
            prompt: None,
            exchange: None,
            remembered_filter: ListFilter::HideEquippedSets,
            auto_confirm: Some(true),
            vendor_shortcut: Some(false),
            frame_throttle: true,
            service_area: true,
            home_realm: true,
        }
    }

    /// A depot with a randomized intake, bags and character, for the
    /// interactive binary.
    pub fn new(catalog: Catalog) -> Self {
        let mut rng = thread_rng();

        let rank = rng.gen_range(5..=9);
        let ceiling = catalog::scrip_ceiling(rank);
        let balance = rng.gen_range(ceiling / 4..ceiling / 2);
        let unit = match rng.gen_range(0..3) {
            0 => Unit::CoralConcord,
            1 => Unit::EmberLegion,
            _ => Unit::SableWatch,
        };
        let bonus = if rng.gen_bool(0.5) { 1.15 } else { 1.0 };

        let mut depot = Self::with_character(catalog, rank, balance, unit, bonus);
        let intake_size = rng.gen_range(8..=14);
        for i in 0..intake_size {
            let (name, category) = INTAKE_POOL[rng.gen_range(0..INTAKE_POOL.len())];
            depot.stock.push(DepotItem {
                item_id: 6001 + i as ItemId,
                name: name.to_string(),
                value: rng.gen_range(80..=420),
                ui_category: category,
                high_quality: rng.gen_bool(0.25),
            });
        }
        if rng.gen_bool(1.0 / 6.0) {
            depot.stock.push(DepotItem {
                item_id: 7101,
                name: "Founder's Signet".to_string(),
                value: 800,
                ui_category: 40,
                high_quality: false,
            });
        }

        for slot in depot.bags.iter_mut().take(rng.gen_range(8..=16)) {
            *slot = SlotContent::Occupied {
                item_id: 5000 + rng.gen_range(0..40),
                quantity: rng.gen_range(1..=20),
            };
        }
        depot.add_secondary_stock(catalog::DISPATCH_VOUCHER, rng.gen_range(0..20));
        depot
    }

    /// A depot with exactly the given character and intake; used by tests
    /// that need reproducible runs.
    pub fn scripted(catalog: Catalog, rank: u8, balance: u32, stock: Vec<DepotItem>) -> Self {
        let mut depot = Self::with_character(catalog, rank, balance, Unit::CoralConcord, 1.0);
        depot.stock = stock;
        depot
    }

    /// Advances every pending screen/latency timer.
    pub fn advance(&mut self, delta: Duration) {
        let ms = delta.as_millis() as u64;
        if let Some(menu) = &mut self.counter_menu {
            menu.ready_in_ms = menu.ready_in_ms.saturating_sub(ms);
        }
        if let Some(list) = &mut self.supply_list {
            list.ready_in_ms = list.ready_in_ms.saturating_sub(ms);
            if let Some((_, stale_ms)) = &mut list.stale {
                *stale_ms = stale_ms.saturating_sub(ms);
                if *stale_ms == 0 {
                    list.stale = None;
                }
            }
        }
        if let Some(reward) = &mut self.reward {
            reward.ready_in_ms = reward.ready_in_ms.saturating_sub(ms);
        }
        if let Some(prompt) = &mut self.prompt {
            prompt.ready_in_ms = prompt.ready_in_ms.saturating_sub(ms);
        }
        if let Some(exchange) = &mut self.exchange {
            exchange.ready_in_ms = exchange.ready_in_ms.saturating_sub(ms);
        }
    }

    pub fn intake_len(&self) -> usize {
        self.stock.len()
    }

    pub fn set_bonus_multiplier(&mut self, bonus: f64) {
        self.bonus = bonus;
    }

    pub fn set_service_area(&mut self, inside: bool) {
        self.service_area = inside;
    }

    pub fn set_home_realm(&mut self, home: bool) {
        self.home_realm = home;
    }

    pub fn add_secondary_stock(&mut self, item_id: ItemId, quantity: u32) {
        *self.secondary.entry(item_id).or_insert(0) += quantity;
    }

    pub fn auto_confirm_feature(&self) -> Option<bool> {
        self.auto_confirm
    }

    fn ordered_intake(&self) -> Vec<VisibleEntry> {
        let mut entries: Vec<VisibleEntry> = self
            .stock
            .iter()
            .map(|item| VisibleEntry {
                item_id: item.item_id,
                name: item.name.clone(),
                raw_value: item.value,
                ui_category: item.ui_category,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.raw_value
                .cmp(&a.raw_value)
                .then_with(|| a.ui_category.cmp(&b.ui_category))
                .then_with(|| a.item_id.cmp(&b.item_id))
        });
        entries
    }

    fn exchange_page(&self) -> Vec<VisibleEntry> {
        let Some(exchange) = &self.exchange else {
            return Vec::new();
        };
        let (Some(tier), Some(subgroup)) = (exchange.tier, exchange.subgroup) else {
            return Vec::new();
        };
        self.catalog
            .entries()
            .iter()
            .filter(|entry| {
                entry.tier == tier
                    && entry.subgroup == subgroup
                    && entry.required_rank <= self.rank
                    && entry.eligible_units.contains(&self.unit)
            })
            .map(|entry| VisibleEntry {
                item_id: entry.item_id,
                name: entry.name.to_string(),
                raw_value: entry.scrip_cost,
                ui_category: entry.subgroup,
            })
            .collect()
    }

    fn bag_count(&self, item_id: ItemId) -> u32 {
        self.bags
            .iter()
            .map(|slot| match slot {
                SlotContent::Occupied { item_id: held, quantity } if *held == item_id => *quantity,
                _ => 0,
            })
            .sum()
    }

    fn store_in_bags(&mut self, item_id: ItemId, mut quantity: u32, stack_size: u32) {
        for slot in &mut self.bags {
            if quantity == 0 {
                return;
            }
            if let SlotContent::Occupied { item_id: held, quantity: held_quantity } = slot {
                if *held == item_id && *held_quantity < stack_size {
                    let space = stack_size - *held_quantity;
                    let moved = space.min(quantity);
                    *held_quantity += moved;
                    quantity -= moved;
                }
            }
        }
        for slot in &mut self.bags {
            if quantity == 0 {
                return;
            }
            if matches!(slot, SlotContent::Empty) {
                let moved = stack_size.min(quantity);
                *slot = SlotContent::Occupied { item_id, quantity: moved };
                quantity -= moved;
            }
        }
    }

    fn submit_turn_in(&mut self) {
        let Some(reward) = self.reward.take() else {
            return;
        };
        let snapshot = self.ordered_intake();
        let Some(position) = self.stock.iter().position(|i| i.item_id == reward.item_id) else {
            return;
        };
        let item = self.stock.remove(position);
        let gained = (f64::from(item.value) * self.bonus).round() as u32;
        let ceiling = catalog::scrip_ceiling(self.rank);
        self.balance = self.balance.saturating_add(gained).min(ceiling);

        if let Some(list) = &mut self.supply_list {
            list.ready_in_ms = LIST_SETTLE_MS;
            // the client keeps displaying the old list for a moment
            list.stale = Some((snapshot, STALE_LIST_MS));
        }
    }

    fn answer_prompt(&mut self, choice: PromptChoice) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        match prompt.prompt {
            Prompt::TradeHighQuality => match choice {
                PromptChoice::Yes => {
                    if let Some(reward) = &mut self.reward {
                        reward.awaiting_quality_answer = false;
                    }
                }
                PromptChoice::No => self.reward = None,
            },
            Prompt::ConfirmExchange => {
                if choice == PromptChoice::Yes {
                    if let Some(pending) = prompt.pending {
                        self.balance = self.balance.saturating_sub(pending.total_cost);
                        self.store_in_bags(pending.item_id, pending.quantity, pending.stack_size);
                    }
                    if let Some(exchange) = &mut self.exchange {
                        exchange.ready_in_ms = LIST_SETTLE_MS;
                    }
                }
            }
        }
    }

    fn handle_supply_list_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::SelectTab(tab) => {
                if let Some(list) = &mut self.supply_list {
                    list.tab = tab;
                    list.ready_in_ms = LIST_SETTLE_MS;
                }
            }
            MenuAction::SelectFilter(filter) => {
                self.remembered_filter = filter;
                if let Some(list) = &mut self.supply_list {
                    list.stale = None;
                    list.ready_in_ms = LIST_SETTLE_MS;
                }
            }
            MenuAction::RefreshList => {
                if let Some(list) = &mut self.supply_list {
                    list.stale = None;
                    list.ready_in_ms = REFRESH_MS;
                }
            }
            MenuAction::SelectListEntry(position) => {
                let entries = self.visible_list(Screen::SupplyList);
                let Some(entry) = entries.get(position) else {
                    return;
                };
                let Some(item) = self.stock.iter().find(|i| i.item_id == entry.item_id) else {
                    return;
                };
                let high_quality = item.high_quality;
                self.reward = Some(RewardState {
                    ready_in_ms: REWARD_OPEN_MS,
                    item_id: entry.item_id,
                    awaiting_quality_answer: high_quality,
                });
                if high_quality {
                    self.prompt = Some(PromptState {
                        ready_in_ms: PROMPT_OPEN_MS,
                        prompt: Prompt::TradeHighQuality,
                        pending: None,
                    });
                }
            }
            MenuAction::Close => {
                self.supply_list = None;
                self.counter_menu = Some(CounterMenuState { ready_in_ms: MENU_OPEN_MS });
            }
            _ => {}
        }
    }

    fn handle_exchange_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::SelectTier(tier) => {
                if let Some(exchange) = &mut self.exchange {
                    exchange.tier = Some(tier);
                    exchange.subgroup = None;
                    exchange.ready_in_ms = LIST_SETTLE_MS;
                }
            }
            MenuAction::SelectSubgroup(subgroup) => {
                if let Some(exchange) = &mut self.exchange {
                    exchange.subgroup = Some(subgroup);
                    exchange.ready_in_ms = LIST_SETTLE_MS;
                }
            }
            MenuAction::Buy { position, quantity } => {
                let page = self.exchange_page();
                let Some(entry) = page.get(position) else {
                    return;
                };
                let Some(item) = self.catalog.entry(entry.item_id) else {
                    return;
                };
                let total_cost = item.scrip_cost.saturating_mul(quantity);
                if quantity == 0 || total_cost > self.balance {
                    return;
                }
                self.prompt = Some(PromptState {
                    ready_in_ms: PROMPT_OPEN_MS,
                    prompt: Prompt::ConfirmExchange,
                    pending: Some(PendingPurchase {
                        item_id: item.item_id,
                        quantity,
                        total_cost,
                        stack_size: item.stack_size,
                    }),
                });
            }
            MenuAction::Close => {
                self.exchange = None;
                self.target = None;
            }
            _ => {}
        }
    }
}

impl ClientSurface for Depot {
    fn is_screen_ready(&self, screen: Screen) -> bool {
        match screen {
            Screen::CounterMenu => {
                self.counter_menu.as_ref().is_some_and(|menu| menu.ready_in_ms == 0)
            }
            Screen::SupplyList => {
                self.supply_list.as_ref().is_some_and(|list| list.ready_in_ms == 0)
            }
            Screen::SupplyReward => self.reward.as_ref().is_some_and(|reward| {
                reward.ready_in_ms == 0 && !reward.awaiting_quality_answer && self.prompt.is_none()
            }),
            Screen::ConfirmPrompt => {
                self.prompt.as_ref().is_some_and(|prompt| prompt.ready_in_ms == 0)
            }
            Screen::ExchangeShop => {
                self.exchange.as_ref().is_some_and(|exchange| exchange.ready_in_ms == 0)
            }
        }
    }

    fn visible_list(&self, screen: Screen) -> Vec<VisibleEntry> {
        match screen {
            Screen::SupplyList => {
                let Some(list) = &self.supply_list else {
                    return Vec::new();
                };
                if let Some((snapshot, _)) = &list.stale {
                    return snapshot.clone();
                }
                self.ordered_intake()
            }
            Screen::ExchangeShop => self.exchange_page(),
            _ => Vec::new(),
        }
    }

    fn invoke(&mut self, screen: Screen, action: MenuAction) {
        if !self.is_screen_ready(screen) {
            return;
        }
        match screen {
            Screen::CounterMenu => {
                if let MenuAction::ChooseMenuEntry(entry) = action {
                    self.counter_menu = None;
                    if entry == 0 {
                        self.supply_list = Some(SupplyListState {
                            ready_in_ms: LIST_OPEN_MS,
                            tab: 0,
                            stale: None,
                        });
                    } else {
                        self.target = None;
                    }
                }
            }
            Screen::SupplyList => self.handle_supply_list_action(action),
            Screen::SupplyReward => match action {
                MenuAction::Submit => self.submit_turn_in(),
                MenuAction::Cancel => self.reward = None,
                _ => {}
            },
            Screen::ConfirmPrompt => {
                if let MenuAction::AnswerPrompt(choice) = action {
                    self.answer_prompt(choice);
                }
            }
            Screen::ExchangeShop => self.handle_exchange_action(action),
        }
    }

    fn set_target(&mut self, counter: Counter) {
        if !self.service_area {
            return;
        }
        self.target = Some(counter);
        match counter {
            Counter::Supply => {
                self.counter_menu = Some(CounterMenuState { ready_in_ms: MENU_OPEN_MS });
            }
            Counter::Exchange => {
                self.exchange =
                    Some(ExchangeState { ready_in_ms: LIST_OPEN_MS, tier: None, subgroup: None });
            }
        }
    }

    fn current_target(&self) -> Option<Counter> {
        self.target
    }

    fn selected_delivery_tab(&self) -> Option<u8> {
        self.supply_list.as_ref().map(|list| list.tab)
    }

    fn selected_list_filter(&self) -> Option<ListFilter> {
        self.supply_list.as_ref().map(|_| self.remembered_filter)
    }

    fn active_prompt(&self) -> Option<Prompt> {
        self.prompt.as_ref().filter(|prompt| prompt.ready_in_ms == 0).map(|prompt| prompt.prompt)
    }

    fn shown_reward_item(&self) -> Option<ItemId> {
        self.reward
            .as_ref()
            .filter(|reward| reward.ready_in_ms == 0)
            .map(|reward| reward.item_id)
    }

    fn live_item_count(&self, item_id: ItemId, include_secondary: bool) -> u32 {
        let mut count = self.bag_count(item_id);
        if include_secondary {
            count += self.secondary.get(&item_id).copied().unwrap_or(0);
        }
        count
    }

    fn scrip_balance(&self) -> u32 {
        self.balance
    }

    fn rank(&self) -> u8 {
        self.rank
    }

    fn unit(&self) -> Unit {
        self.unit
    }

    fn bonus_multiplier(&self) -> f64 {
        self.bonus
    }

    fn inventory_slots(&self) -> Vec<SlotContent> {
        self.bags.clone()
    }

    fn in_service_area(&self) -> bool {
        self.service_area
    }

    fn on_home_realm(&self) -> bool {
        self.home_realm
    }
}

impl HostAutomations for Depot {
    fn auto_confirm_enabled(&self) -> Option<bool> {
        self.auto_confirm
    }

    fn set_auto_confirm(&mut self, enabled: bool) {
        if self.auto_confirm.is_some() {
            self.auto_confirm = Some(enabled);
        }
    }

    fn vendor_shortcut_enabled(&self) -> Option<bool> {
        self.vendor_shortcut
    }

    fn set_vendor_shortcut(&mut self, enabled: bool) {
        if self.vendor_shortcut.is_some() {
            self.vendor_shortcut = Some(enabled);
        }
    }

    fn frame_throttle_enabled(&self) -> bool {
        self.frame_throttle
    }

    fn set_frame_throttle(&mut self, enabled: bool) {
        self.frame_throttle = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::AutomationRunner;
    use crate::automation::Stage;
    use crate::config::{Config, WishListEntry};
    use crate::automation::PurchaseMode;
    use std::time::Instant;

    fn intake(item_id: ItemId, name: &str, value: u32, high_quality: bool) -> DepotItem {
        DepotItem {
            item_id,
            name: name.to_string(),
            value,
            ui_category: 10,
            high_quality,
        }
    }

    fn settled(depot: &mut Depot) {
        depot.advance(Duration::from_secs(2));
    }

    #[test]
    fn screens_open_with_latency() {
        let mut depot = Depot::scripted(Catalog::standard(), 5, 1_000, Vec::new());
        depot.set_target(Counter::Supply);
        assert!(!depot.is_screen_ready(Screen::CounterMenu));
        settled(&mut depot);
        assert!(depot.is_screen_ready(Screen::CounterMenu));
    }

    #[test]
    fn turn_in_pays_scrip_and_shrinks_the_intake() {
        let mut depot = Depot::scripted(
            Catalog::standard(),
            5,
            1_000,
            vec![intake(6001, "Worn Pike", 300, false), intake(6002, "Dull Saber", 100, false)],
        );
        depot.set_target(Counter::Supply);
        settled(&mut depot);
        depot.invoke(Screen::CounterMenu, MenuAction::ChooseMenuEntry(0));
        settled(&mut depot);
        depot.invoke(Screen::SupplyList, MenuAction::SelectTab(2));
        settled(&mut depot);

        depot.invoke(Screen::SupplyList, MenuAction::SelectListEntry(0));
        settled(&mut depot);
        depot.invoke(Screen::SupplyReward, MenuAction::Submit);
        settled(&mut depot);

        assert_eq!(depot.intake_len(), 1);
        assert_eq!(depot.scrip_balance(), 1_300);
    }

    #[test]
    fn turn_in_income_is_capped_at_the_ceiling() {
        let mut depot = Depot::scripted(
            Catalog::standard(),
            1, // ceiling 10,000
            9_950,
            vec![intake(6001, "Worn Pike", 300, false)],
        );
        depot.set_target(Counter::Supply);
        settled(&mut depot);
        depot.invoke(Screen::CounterMenu, MenuAction::ChooseMenuEntry(0));
        settled(&mut depot);
        depot.invoke(Screen::SupplyList, MenuAction::SelectListEntry(0));
        settled(&mut depot);
        depot.invoke(Screen::SupplyReward, MenuAction::Submit);

        assert_eq!(depot.scrip_balance(), 10_000);
    }

    #[test]
    fn delivery_list_stays_stale_until_refreshed() {
        let mut depot = Depot::scripted(
            Catalog::standard(),
            5,
            0,
            vec![intake(6001, "Worn Pike", 300, false), intake(6002, "Dull Saber", 100, false)],
        );
        depot.set_target(Counter::Supply);
        settled(&mut depot);
        depot.invoke(Screen::CounterMenu, MenuAction::ChooseMenuEntry(0));
        settled(&mut depot);
        depot.invoke(Screen::SupplyList, MenuAction::SelectListEntry(0));
        settled(&mut depot);
        depot.invoke(Screen::SupplyReward, MenuAction::Submit);
        depot.advance(Duration::from_millis(LIST_SETTLE_MS));

        // still showing two entries
        assert_eq!(depot.visible_list(Screen::SupplyList).len(), 2);

        depot.invoke(Screen::SupplyList, MenuAction::RefreshList);
        settled(&mut depot);
        assert_eq!(depot.visible_list(Screen::SupplyList).len(), 1);
    }

    #[test]
    fn declining_the_quality_prompt_cancels_the_turn_in() {
        let mut depot = Depot::scripted(
            Catalog::standard(),
            5,
            0,
            vec![intake(6001, "Worn Pike", 300, true)],
        );
        depot.set_target(Counter::Supply);
        settled(&mut depot);
        depot.invoke(Screen::CounterMenu, MenuAction::ChooseMenuEntry(0));
        settled(&mut depot);
        depot.invoke(Screen::SupplyList, MenuAction::SelectListEntry(0));
        settled(&mut depot);

        assert_eq!(depot.active_prompt(), Some(Prompt::TradeHighQuality));
        depot.invoke(Screen::ConfirmPrompt, MenuAction::AnswerPrompt(PromptChoice::No));

        assert!(!depot.is_screen_ready(Screen::SupplyReward));
        assert_eq!(depot.intake_len(), 1);
    }

    #[test]
    fn purchases_deduct_scrip_and_fill_bags() {
        let mut depot = Depot::scripted(Catalog::standard(), 5, 2_000, Vec::new());
        depot.set_target(Counter::Exchange);
        settled(&mut depot);
        depot.invoke(Screen::ExchangeShop, MenuAction::SelectTier(1));
        settled(&mut depot);
        depot.invoke(Screen::ExchangeShop, MenuAction::SelectSubgroup(4));
        settled(&mut depot);

        let page = depot.visible_list(Screen::ExchangeShop);
        let position = page.iter().position(|e| e.item_id == 9066).unwrap();
        depot.invoke(Screen::ExchangeShop, MenuAction::Buy { position, quantity: 5 });
        settled(&mut depot);
        depot.invoke(
            Screen::ConfirmPrompt,
            MenuAction::AnswerPrompt(PromptChoice::Yes),
        );

        assert_eq!(depot.scrip_balance(), 2_000 - 5 * 90);
        assert_eq!(depot.live_item_count(9066, false), 5);
    }

    #[test]
    fn full_run_drains_the_intake_and_buys_the_wish_list() {
        let catalog = Catalog::standard();
        let mut depot = Depot::scripted(
            catalog.clone(),
            5,
            1_000,
            vec![
                intake(6001, "Worn Pike", 310, false),
                intake(6002, "Dull Saber", 120, true),
                intake(6003, "Cracked Buckler", 205, false),
            ],
        );
        let mut config = Config::default();
        config.wish_list = vec![WishListEntry::new(9066, 5, PurchaseMode::OneTime)];

        let mut runner = AutomationRunner::new();
        runner.toggle_enabled();

        let mut now = Instant::now();
        for _ in 0..300 {
            runner.tick(&mut depot, &config, &catalog, now);
            depot.advance(Duration::from_secs(1));
            now += Duration::from_secs(1);
            if runner.stage() == Stage::Stopped && !runner.is_enabled() {
                break;
            }
        }

        assert_eq!(runner.stage(), Stage::Stopped);
        assert_eq!(depot.intake_len(), 0);
        assert_eq!(depot.live_item_count(9066, false), 5);
        assert_eq!(runner.delivered(), 3);
        // suppressed host automation came back
        assert_eq!(depot.auto_confirm_feature(), Some(true));
        assert!(runner.messages().any(|m| m.contains("Supply run finished")));
    }

    #[test]
    fn forced_stop_mid_run_restores_host_state() {
        let catalog = Catalog::standard();
        let mut depot = Depot::scripted(
            catalog.clone(),
            5,
            0,
            vec![intake(6001, "Worn Pike", 310, false)],
        );
        let config = Config::default();
        let mut runner = AutomationRunner::new();
        runner.toggle_enabled();

        let mut now = Instant::now();
        for _ in 0..5 {
            runner.tick(&mut depot, &config, &catalog, now);
            depot.advance(Duration::from_secs(1));
            now += Duration::from_secs(1);
        }
        assert_eq!(depot.auto_confirm_feature(), Some(false));

        depot.set_service_area(false);
        runner.tick(&mut depot, &config, &catalog, now);

        assert_eq!(runner.stage(), Stage::Stopped);
        assert_eq!(depot.auto_confirm_feature(), Some(true));
    }
}
