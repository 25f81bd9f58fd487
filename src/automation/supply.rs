use crate::automation::accounting;
use crate::automation::exchange::next_purchase;
use crate::automation::machine::{
    AutomationRunner, RunError, COUNTER_HOP_DELAY, RETRY_REFRESH_DELAY, TURN_IN_SETTLE_DELAY,
};
use crate::automation::ranking;
use crate::automation::stage::Stage;
use crate::client::{ClientSurface, Counter, MenuAction, Prompt, PromptChoice, Screen};
use crate::config::Config;
use std::time::Instant;

/// Tab index of the delivery list that holds turn-in-eligible gear.
pub(crate) const DELIVERIES_TAB: u8 = 2;
/// Counter-menu entry that opens the delivery list.
pub(crate) const OPEN_DELIVERIES_ENTRY: usize = 0;
/// Counter-menu entry that ends the conversation.
pub(crate) const LEAVE_COUNTER_ENTRY: usize = 3;

/// Consecutive manual-refresh attempts before the run is declared failed.
pub(crate) const MAX_REFRESH_RETRIES: u32 = 10;

/// Retry bookkeeping for one pass over the delivery list. Reset whenever
/// the turn-in phase starts fresh so stale counts never leak into a new
/// run.
#[derive(Debug)]
pub(crate) struct TurnInAttempt {
    pub(crate) last_list_size: usize,
    pub(crate) error_count: u32,
}

impl TurnInAttempt {
    pub(crate) fn fresh() -> Self {
        Self { last_list_size: usize::MAX, error_count: 0 }
    }

    pub(crate) fn accept(&mut self, list_size: usize) {
        self.last_list_size = list_size;
        self.error_count = 0;
    }
}

impl AutomationRunner {
    pub(crate) fn seek_supply_officer<C: ClientSurface>(&mut self, client: &mut C) {
        // an interaction with the exchange clerk may still be resolving
        if client.current_target() == Some(Counter::Exchange) {
            return;
        }

        client.set_target(Counter::Supply);
        self.stage = Stage::OpenSupplyMenu;
    }

    pub(crate) fn open_supply_menu<C: ClientSurface>(&mut self, client: &mut C) {
        if !client.is_screen_ready(Screen::CounterMenu) {
            return;
        }

        client.invoke(Screen::CounterMenu, MenuAction::ChooseMenuEntry(OPEN_DELIVERIES_ENTRY));
        self.stage = Stage::SelectDeliveryCategory;
    }

    pub(crate) fn select_delivery_category<C: ClientSurface>(&mut self, client: &mut C) {
        if !client.is_screen_ready(Screen::SupplyList) {
            return;
        }

        self.attempt = TurnInAttempt::fresh();

        // a host tweak may have landed on the deliveries tab already
        if client.selected_delivery_tab() == Some(DELIVERIES_TAB) {
            self.stage = Stage::SelectItemToTurnIn;
            return;
        }

        client.invoke(Screen::SupplyList, MenuAction::SelectTab(DELIVERIES_TAB));
        self.stage = Stage::SelectItemToTurnIn;
    }

    pub(crate) fn select_item_to_turn_in<C: ClientSurface>(
        &mut self,
        client: &mut C,
        config: &Config,
        now: Instant,
    ) {
        if !client.is_screen_ready(Screen::SupplyList) {
            return;
        }

        if client.selected_delivery_tab() != Some(DELIVERIES_TAB) {
            self.advisory = Some(RunError::WrongTab);
            return;
        }

        let expected = config.expected_filter();
        if client.selected_list_filter() != Some(expected) {
            self.advisory = Some(RunError::WrongFilter { expected });
            return;
        }

        let entries = client.visible_list(Screen::SupplyList);
        if entries.is_empty() {
            self.stage = Stage::CloseSupplyMenu { then_stop: true };
            return;
        }

        // Two successive polls must not see lists of the same length, or
        // the previous turn-in has not been reflected yet.
        let list_size = entries.len();
        if list_size >= self.attempt.last_list_size {
            if self.attempt.error_count >= MAX_REFRESH_RETRIES {
                self.fail_run(RunError::ListRefreshFailed);
                return;
            }
            self.attempt.error_count += 1;
            client.invoke(Screen::SupplyList, MenuAction::RefreshList);
            self.wait(now, RETRY_REFRESH_DELAY);
            return;
        }
        self.attempt.accept(list_size);

        let candidates =
            ranking::ranked(ranking::build_candidates(&entries, client.bonus_multiplier()));
        let top = &candidates[0];

        // never hand in something whose value would be wasted above the cap
        let ceiling = accounting::scrip_ceiling(client.rank());
        if u64::from(client.scrip_balance()) + u64::from(top.value_with_bonus) > u64::from(ceiling)
        {
            self.push_message(format!(
                "Holding {} back: {} scrip ({} before bonus) would overflow the cap.",
                top.name, top.value_with_bonus, top.value_without_bonus
            ));
            self.stage = Stage::CloseSupplyMenu { then_stop: false };
            return;
        }

        // The first visible entry is not guaranteed to be the top-ranked
        // candidate under every filter combination; budgeting against the
        // top-ranked value keeps the ceiling safe either way.
        client.invoke(Screen::SupplyList, MenuAction::SelectListEntry(0));
        self.stage = Stage::ConfirmTurnIn;
    }

    pub(crate) fn confirm_turn_in<C: ClientSurface>(&mut self, client: &mut C, now: Instant) {
        if client.active_prompt() == Some(Prompt::TradeHighQuality) {
            client.invoke(Screen::ConfirmPrompt, MenuAction::AnswerPrompt(PromptChoice::Yes));
            return;
        }

        if !client.is_screen_ready(Screen::SupplyReward) {
            return;
        }

        if let Some(item_id) = client.shown_reward_item() {
            if crate::catalog::is_irreplaceable(item_id) {
                self.push_message(
                    "Skipping an item that cannot be reacquired once delivered.".to_string(),
                );
                client.invoke(Screen::SupplyReward, MenuAction::Cancel);
                self.stage = Stage::CloseSupplyMenu { then_stop: true };
                return;
            }
        }

        client.invoke(Screen::SupplyReward, MenuAction::Submit);
        self.delivered += 1;
        self.wait(now, TURN_IN_SETTLE_DELAY);
        self.stage = Stage::FinalizeTurnIn;
    }

    pub(crate) fn finalize_turn_in<C: ClientSurface>(&mut self, client: &mut C, config: &Config) {
        if !client.is_screen_ready(Screen::SupplyList) {
            return;
        }

        // reapplying the filter forces the client to rebuild the list
        client.invoke(Screen::SupplyList, MenuAction::SelectFilter(config.expected_filter()));
        self.stage = Stage::SelectItemToTurnIn;
    }

    pub(crate) fn close_supply_menu<C: ClientSurface>(
        &mut self,
        client: &mut C,
        config: &Config,
        now: Instant,
        then_stop: bool,
    ) {
        if client.is_screen_ready(Screen::SupplyList) {
            client.invoke(Screen::SupplyList, MenuAction::Close);
            return;
        }

        if !client.is_screen_ready(Screen::CounterMenu) {
            return;
        }

        client.invoke(Screen::CounterMenu, MenuAction::ChooseMenuEntry(LEAVE_COUNTER_ENTRY));

        let Some(request) = next_purchase(client, &self.requests, None) else {
            self.enabled = false;
            self.stage = Stage::RequestStop;
            return;
        };

        if then_stop {
            let reserved = accounting::effective_reserved_balance(config, client.rank());
            if client.scrip_balance() <= reserved.saturating_add(request.scrip_cost) {
                self.enabled = false;
                self.stage = Stage::RequestStop;
                return;
            }
        }

        // the clerk occasionally rejects the first interaction right after
        // the menu closes, so give the client a moment
        self.wait(now, COUNTER_HOP_DELAY);
        self.stage = Stage::SeekExchangeClerk;
    }
}
