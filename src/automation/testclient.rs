use crate::client::{
    ClientSurface, Counter, HostAutomations, ItemId, ListFilter, MenuAction, Prompt, Screen,
    SlotContent, Unit, VisibleEntry,
};
use std::collections::{HashMap, HashSet};

/// Hand-scripted client for state-machine tests: screens, lists and stock
/// are plain fields the test mutates between ticks, and every invoked
/// action is recorded verbatim.
pub(crate) struct ScriptedClient {
    pub ready: HashSet<Screen>,
    pub lists: HashMap<Screen, Vec<VisibleEntry>>,
    pub target: Option<Counter>,
    pub tab: Option<u8>,
    pub filter: Option<ListFilter>,
    pub prompt: Option<Prompt>,
    pub reward_item: Option<ItemId>,
    pub primary_stock: HashMap<ItemId, u32>,
    pub secondary_stock: HashMap<ItemId, u32>,
    pub balance: u32,
    pub rank: u8,
    pub unit: Unit,
    pub multiplier: f64,
    pub slots: Vec<SlotContent>,
    pub service_area: bool,
    pub home_realm: bool,
    pub actions: Vec<(Screen, MenuAction)>,
    pub auto_confirm: Option<bool>,
    pub vendor_shortcut: Option<bool>,
    pub frame_throttle: bool,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            ready: HashSet::new(),
            lists: HashMap::new(),
            target: None,
            tab: None,
            filter: None,
            prompt: None,
            reward_item: None,
            primary_stock: HashMap::new(),
            secondary_stock: HashMap::new(),
            balance: 0,
            rank: 5,
            unit: Unit::CoralConcord,
            multiplier: 1.0,
            slots: vec![SlotContent::Empty; 20],
            service_area: true,
            home_realm: true,
            actions: Vec::new(),
            auto_confirm: None,
            vendor_shortcut: None,
            frame_throttle: false,
        }
    }
}

impl ClientSurface for ScriptedClient {
    fn is_screen_ready(&self, screen: Screen) -> bool {
        self.ready.contains(&screen)
    }

    fn visible_list(&self, screen: Screen) -> Vec<VisibleEntry> {
        self.lists.get(&screen).cloned().unwrap_or_default()
    }

    fn invoke(&mut self, screen: Screen, action: MenuAction) {
        self.actions.push((screen, action));
    }

    fn set_target(&mut self, counter: Counter) {
        self.target = Some(counter);
    }

    fn current_target(&self) -> Option<Counter> {
        self.target
    }

    fn selected_delivery_tab(&self) -> Option<u8> {
        self.tab
    }

    fn selected_list_filter(&self) -> Option<ListFilter> {
        self.filter
    }

    fn active_prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    fn shown_reward_item(&self) -> Option<ItemId> {
        self.reward_item
    }

    fn live_item_count(&self, item_id: ItemId, include_secondary: bool) -> u32 {
        let mut count = self.primary_stock.get(&item_id).copied().unwrap_or(0);
        if include_secondary {
            count += self.secondary_stock.get(&item_id).copied().unwrap_or(0);
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
        self.multiplier
    }

    fn inventory_slots(&self) -> Vec<SlotContent> {
        self.slots.clone()
    }

    fn in_service_area(&self) -> bool {
        self.service_area
    }

    fn on_home_realm(&self) -> bool {
        self.home_realm
    }
}

impl HostAutomations for ScriptedClient {
    fn auto_confirm_enabled(&self) -> Option<bool> {
        self.auto_confirm
    }

    fn set_auto_confirm(&mut self, enabled: bool) {
        self.auto_confirm = Some(enabled);
    }

    fn vendor_shortcut_enabled(&self) -> Option<bool> {
        self.vendor_shortcut
    }

    fn set_vendor_shortcut(&mut self, enabled: bool) {
        self.vendor_shortcut = Some(enabled);
    }

    fn frame_throttle_enabled(&self) -> bool {
        self.frame_throttle
    }

    fn set_frame_throttle(&mut self, enabled: bool) {
        self.frame_throttle = enabled;
    }
}
