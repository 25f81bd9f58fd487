use crate::automation::cooperation::CooperationGuard;
use crate::automation::exchange::next_purchase;
use crate::automation::request::PurchaseRequest;
use crate::automation::stage::Stage;
use crate::automation::supply::TurnInAttempt;
use crate::catalog::Catalog;
use crate::client::{ClientSurface, HostAutomations, ItemId, ListFilter, Screen};
use crate::config::{Config, ReportChannel};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use thiserror::Error;

const MAX_MESSAGES: usize = 8;

/// Deadline after a manual list refresh before polling again.
pub(crate) const RETRY_REFRESH_DELAY: Duration = Duration::from_millis(100);
/// Deadline after submitting a turn-in; the reward animation blocks input.
pub(crate) const TURN_IN_SETTLE_DELAY: Duration = Duration::from_millis(580);
/// Deadline after a tier/subgroup selection in the exchange shop.
pub(crate) const MENU_NAVIGATION_DELAY: Duration = Duration::from_millis(500);
/// Deadline after minor screen changes.
pub(crate) const SCREEN_SETTLE_DELAY: Duration = Duration::from_millis(200);
/// Deadline before walking from one counter to the other.
pub(crate) const COUNTER_HOP_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunError {
    #[error("unable to refresh the delivery list")]
    ListRefreshFailed,
    #[error("wrong tab selected")]
    WrongTab,
    #[error("delivery list filter is not set to \"{expected}\"")]
    WrongFilter { expected: ListFilter },
}

/// Drives one supply run, one step per tick. All waiting is a deadline;
/// every fault is handled here and surfaced as status text rather than
/// propagated.
#[derive(Debug)]
pub struct AutomationRunner {
    pub(crate) stage: Stage,
    pub(crate) continue_at: Option<Instant>,
    pub(crate) enabled: bool,
    run_active: bool,
    pub(crate) requests: Vec<PurchaseRequest>,
    pub(crate) attempt: TurnInAttempt,
    pub(crate) previous_purchase: Option<PurchaseRequest>,
    pub(crate) pending_purchase: Option<(ItemId, u32)>,
    guard: CooperationGuard,
    pub(crate) advisory: Option<RunError>,
    fatal: Option<RunError>,
    pub(crate) delivered: u32,
    last_report: Option<String>,
    messages: VecDeque<String>,
}

impl Default for AutomationRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomationRunner {
    pub fn new() -> Self {
        Self {
            stage: Stage::Stopped,
            continue_at: None,
            enabled: false,
            run_active: false,
            requests: Vec::new(),
            attempt: TurnInAttempt::fresh(),
            previous_purchase: None,
            pending_purchase: None,
            guard: CooperationGuard::default(),
            advisory: None,
            fatal: None,
            delivered: 0,
            last_report: None,
            messages: VecDeque::with_capacity(MAX_MESSAGES),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn advisory(&self) -> Option<RunError> {
        self.advisory
    }

    pub fn fatal(&self) -> Option<RunError> {
        self.fatal
    }

    pub fn delivered(&self) -> u32 {
        self.delivered
    }

    pub fn last_report(&self) -> Option<&str> {
        self.last_report.as_deref()
    }

    pub fn messages(&self) -> impl Iterator<Item = &String> {
        self.messages.iter()
    }

    pub fn add_message<S: Into<String>>(&mut self, message: S) {
        self.push_message(message.into());
    }

    /// One scheduler step. Verifies the run is still allowed, honors the
    /// current deadline, then lets the current stage's handler act at most
    /// once.
    pub fn tick<C: ClientSurface + HostAutomations>(
        &mut self,
        client: &mut C,
        config: &Config,
        catalog: &Catalog,
        now: Instant,
    ) {
        self.advisory = None;

        if !client.in_service_area()
            || config.profile.disabled
            || (config.disable_when_away && !client.on_home_realm())
        {
            self.enabled = false;
            if !self.stage.is_stopped() {
                self.finish_run(client, config);
            }
            return;
        }

        if let Some(deadline) = self.continue_at {
            if now < deadline {
                return;
            }
            self.continue_at = None;
        }

        if !self.enabled {
            if !self.stage.is_stopped() {
                self.finish_run(client, config);
            }
            return;
        }

        if self.stage.is_stopped() && !self.try_begin_run(client, config, catalog) {
            return;
        }

        if !matches!(self.stage, Stage::Stopped | Stage::RequestStop)
            && !self.guard.is_suppressing()
        {
            self.guard.suppress(client);
        }

        match self.stage {
            Stage::Stopped => {}
            Stage::SeekSupplyOfficer => self.seek_supply_officer(client),
            Stage::OpenSupplyMenu => self.open_supply_menu(client),
            Stage::SelectDeliveryCategory => self.select_delivery_category(client),
            Stage::SelectItemToTurnIn => self.select_item_to_turn_in(client, config, now),
            Stage::ConfirmTurnIn => self.confirm_turn_in(client, now),
            Stage::FinalizeTurnIn => self.finalize_turn_in(client, config),
            Stage::CloseSupplyMenu { then_stop } => {
                self.close_supply_menu(client, config, now, then_stop);
            }
            Stage::SeekExchangeClerk => self.seek_exchange_clerk(client, config),
            Stage::SelectRewardTier => self.select_reward_tier(client, now),
            Stage::SelectRewardSubgroup => self.select_reward_subgroup(client, now),
            Stage::SelectRewardItem => self.select_reward_item(client, config, catalog, now),
            Stage::ConfirmPurchase => self.confirm_purchase(client, now),
            Stage::CloseExchangeMenu => self.close_exchange_menu(client, now),
            Stage::RequestStop => self.finish_run(client, config),
        }
    }

    fn try_begin_run<C: ClientSurface>(
        &mut self,
        client: &C,
        config: &Config,
        catalog: &Catalog,
    ) -> bool {
        if let Some(threshold) = config.rank_pause_threshold {
            if client.rank() >= threshold {
                self.push_message(
                    "A promotion is available; raise the pause threshold to keep running."
                        .to_string(),
                );
                self.enabled = false;
                return false;
            }
        }

        self.fatal = None;
        self.delivered = 0;
        self.run_active = true;
        self.previous_purchase = None;
        self.pending_purchase = None;
        self.attempt = TurnInAttempt::fresh();
        self.requests = build_purchase_requests(client, config, catalog);
        self.stage = Stage::SeekSupplyOfficer;

        // spend surplus scrip first when the budget already covers a purchase
        if let Some(request) = next_purchase(client, &self.requests, None) {
            let reserved =
                crate::automation::accounting::effective_reserved_balance(config, client.rank());
            if client.scrip_balance() >= reserved.saturating_add(request.scrip_cost) {
                self.stage = Stage::SeekExchangeClerk;
            }
        }

        // pick up wherever a screen is already open
        if client.is_screen_ready(Screen::SupplyList) {
            self.stage = Stage::SelectDeliveryCategory;
        }
        if client.is_screen_ready(Screen::ExchangeShop) {
            self.stage = Stage::SelectRewardTier;
        }

        true
    }

    /// Disposal path: stops whatever is in flight and hands back suppressed
    /// host state before the process goes away.
    pub fn shutdown<C: ClientSurface + HostAutomations>(
        &mut self,
        client: &mut C,
        config: &Config,
    ) {
        self.enabled = false;
        self.finish_run(client, config);
    }

    /// Restores suppressed host state and reports the run outcome. Safe to
    /// reach from any stage, including abnormal stops.
    pub(crate) fn finish_run<C: ClientSurface + HostAutomations>(
        &mut self,
        client: &mut C,
        config: &Config,
    ) {
        self.guard.restore(client);

        if self.run_active {
            self.run_active = false;
            let text = if self.delivered > 0 {
                format!(
                    "Supply run finished: delivered {} item(s), {} scrip on hand.",
                    self.delivered,
                    client.scrip_balance()
                )
            } else {
                "Supply run finished: nothing delivered.".to_string()
            };
            match config.report_channel {
                ReportChannel::ActivityLog => self.push_message(text),
                ReportChannel::StatusLine => {
                    self.push_message(text.clone());
                    self.last_report = Some(text);
                }
            }
        }

        self.stage = Stage::Stopped;
        self.continue_at = None;
        self.pending_purchase = None;
    }

    pub(crate) fn fail_run(&mut self, error: RunError) {
        self.push_message(format!("Supply run failed: {error}."));
        self.fatal = Some(error);
        self.enabled = false;
        self.stage = Stage::RequestStop;
    }

    pub(crate) fn record_purchase(&mut self, item_id: ItemId, quantity: u32) {
        if let Some(request) = self.requests.iter_mut().find(|r| r.item_id == item_id) {
            if request.mode == crate::automation::request::PurchaseMode::OneTime {
                request.effective_limit = request.effective_limit.saturating_sub(quantity);
            }
            self.previous_purchase = Some(request.clone());
        }
    }

    pub(crate) fn wait(&mut self, now: Instant, delay: Duration) {
        self.continue_at = Some(now + delay);
    }

    pub(crate) fn push_message(&mut self, message: String) {
        if self.messages.len() >= MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }
}

/// Resolves the enabled wish-list entries against the catalog and the
/// player's rank and branch. Produced fresh at every activation.
fn build_purchase_requests<C: ClientSurface>(
    client: &C,
    config: &Config,
    catalog: &Catalog,
) -> Vec<PurchaseRequest> {
    config
        .wish_list
        .iter()
        .filter(|entry| entry.is_enabled() && entry.limit() > 0)
        .filter_map(|entry| {
            let item = catalog.entry(entry.item_id)?;
            if item.required_rank > client.rank() {
                return None;
            }
            if !item.eligible_units.contains(&client.unit()) {
                return None;
            }
            Some(PurchaseRequest {
                item_id: item.item_id,
                name: item.name.to_string(),
                effective_limit: entry.limit(),
                scrip_cost: item.scrip_cost,
                tier: item.tier,
                subgroup: item.subgroup,
                stack_size: item.stack_size,
                mode: entry.mode(),
                check_secondary_stock: entry.checks_secondary_stock(),
            })
        })
        .collect()
}
