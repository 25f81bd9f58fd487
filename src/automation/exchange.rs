use crate::automation::accounting;
use crate::automation::machine::{
    AutomationRunner, COUNTER_HOP_DELAY, MENU_NAVIGATION_DELAY, SCREEN_SETTLE_DELAY,
};
use crate::automation::request::{PurchaseMode, PurchaseRequest};
use crate::automation::stage::Stage;
use crate::catalog::{self, Catalog};
use crate::client::{ClientSurface, Counter, MenuAction, Prompt, PromptChoice, Screen};
use crate::config::Config;
use std::time::Instant;

/// Picks the next wish-list entry worth buying, in configured order; the
/// first qualifying entry wins. When called right after a purchase of the
/// same entry, the just-bought stack is projected onto the owned quantity
/// so a freshly exhausted limit is detected without waiting for the
/// client's stock counts to catch up.
pub fn next_purchase<'a>(
    client: &impl ClientSurface,
    requests: &'a [PurchaseRequest],
    previous: Option<&PurchaseRequest>,
) -> Option<&'a PurchaseRequest> {
    requests.iter().find(|request| {
        let mut projected = 0;
        if previous.is_some_and(|p| p.item_id == request.item_id) {
            projected = request.stack_size;
            if request.item_id != catalog::DISPATCH_VOUCHER {
                projected = projected.min(catalog::TRANSACTION_CAP);
            }
        }

        match request.mode {
            PurchaseMode::KeepStocked => {
                let owned =
                    client.live_item_count(request.item_id, request.check_secondary_stock);
                owned.saturating_add(projected) < request.effective_limit
            }
            PurchaseMode::OneTime => projected < request.effective_limit,
        }
    })
}

impl AutomationRunner {
    pub(crate) fn seek_exchange_clerk<C: ClientSurface>(&mut self, client: &mut C, config: &Config) {
        let reserved = accounting::effective_reserved_balance(config, client.rank());
        if client.scrip_balance() < reserved {
            self.stage = Stage::RequestStop;
            return;
        }

        // an interaction with the supply officer may still be resolving
        if client.current_target() == Some(Counter::Supply) {
            return;
        }

        client.set_target(Counter::Exchange);
        self.stage = Stage::SelectRewardTier;
    }

    pub(crate) fn select_reward_tier<C: ClientSurface>(&mut self, client: &mut C, now: Instant) {
        let Some(request) =
            next_purchase(client, &self.requests, self.previous_purchase.as_ref()).cloned()
        else {
            self.stage = Stage::CloseExchangeMenu;
            return;
        };

        if !client.is_screen_ready(Screen::ExchangeShop) {
            return;
        }

        client.invoke(Screen::ExchangeShop, MenuAction::SelectTier(request.tier));
        self.wait(now, MENU_NAVIGATION_DELAY);
        self.stage = Stage::SelectRewardSubgroup;
    }

    pub(crate) fn select_reward_subgroup<C: ClientSurface>(
        &mut self,
        client: &mut C,
        now: Instant,
    ) {
        let Some(request) =
            next_purchase(client, &self.requests, self.previous_purchase.as_ref()).cloned()
        else {
            self.stage = Stage::CloseExchangeMenu;
            return;
        };

        if !client.is_screen_ready(Screen::ExchangeShop) {
            return;
        }

        client.invoke(Screen::ExchangeShop, MenuAction::SelectSubgroup(request.subgroup));
        self.wait(now, MENU_NAVIGATION_DELAY);
        self.stage = Stage::SelectRewardItem;
    }

    pub(crate) fn select_reward_item<C: ClientSurface>(
        &mut self,
        client: &mut C,
        config: &Config,
        catalog: &Catalog,
        now: Instant,
    ) {
        if !client.is_screen_ready(Screen::ExchangeShop) {
            return;
        }

        let Some(request) =
            next_purchase(client, &self.requests, self.previous_purchase.as_ref()).cloned()
        else {
            self.wait(now, SCREEN_SETTLE_DELAY);
            self.stage = Stage::CloseExchangeMenu;
            return;
        };

        let entries = client.visible_list(Screen::ExchangeShop);
        let Some(position) = entries.iter().position(|entry| entry.item_id == request.item_id)
        else {
            self.push_message(format!("Could not find {} in the exchange list.", request.name));
            self.wait(now, SCREEN_SETTLE_DELAY);
            self.stage = Stage::CloseExchangeMenu;
            return;
        };

        let quantity = self.purchase_quantity(client, config, catalog, &request);
        if quantity == 0 {
            self.wait(now, SCREEN_SETTLE_DELAY);
            self.stage = Stage::CloseExchangeMenu;
            return;
        }

        self.push_message(format!("Buying {quantity}x {}...", request.name));
        client.invoke(Screen::ExchangeShop, MenuAction::Buy { position, quantity });
        self.pending_purchase = Some((request.item_id, quantity));
        self.wait(now, SCREEN_SETTLE_DELAY);
        self.stage = Stage::ConfirmPurchase;
    }

    /// How many of `request` to buy right now: bounded by the scrip budget
    /// above the reserve, the entry's remaining limit, carrying capacity
    /// and the per-transaction cap.
    fn purchase_quantity<C: ClientSurface>(
        &self,
        client: &C,
        config: &Config,
        catalog: &Catalog,
        request: &PurchaseRequest,
    ) -> u32 {
        if request.scrip_cost == 0 {
            return 0;
        }

        let reserved = accounting::effective_reserved_balance(config, client.rank());
        let mut quantity =
            client.scrip_balance().saturating_sub(reserved) / request.scrip_cost;

        quantity = match request.mode {
            PurchaseMode::KeepStocked => {
                let owned =
                    client.live_item_count(request.item_id, request.check_secondary_stock);
                quantity.min(request.effective_limit.saturating_sub(owned))
            }
            PurchaseMode::OneTime => quantity.min(request.effective_limit),
        };

        if let Some(entry) = catalog.entry(request.item_id) {
            quantity = accounting::max_purchasable(
                &client.inventory_slots(),
                request.item_id,
                quantity,
                entry.stack_size,
                entry.inventory_limit,
            );
        }

        if request.item_id != catalog::DISPATCH_VOUCHER {
            quantity = quantity.min(catalog::TRANSACTION_CAP);
        }

        quantity
    }

    pub(crate) fn confirm_purchase<C: ClientSurface>(&mut self, client: &mut C, now: Instant) {
        if client.active_prompt() != Some(Prompt::ConfirmExchange) {
            return;
        }

        client.invoke(Screen::ConfirmPrompt, MenuAction::AnswerPrompt(PromptChoice::Yes));
        if let Some((item_id, quantity)) = self.pending_purchase.take() {
            self.record_purchase(item_id, quantity);
        }

        let has_next =
            next_purchase(client, &self.requests, self.previous_purchase.as_ref()).is_some();
        self.wait(now, MENU_NAVIGATION_DELAY);
        self.stage = if has_next { Stage::SelectRewardTier } else { Stage::CloseExchangeMenu };
    }

    pub(crate) fn close_exchange_menu<C: ClientSurface>(&mut self, client: &mut C, now: Instant) {
        if !client.is_screen_ready(Screen::ExchangeShop) {
            return;
        }

        client.invoke(Screen::ExchangeShop, MenuAction::Close);

        // if the final delivery was just handed in, there is nothing left
        // to return to at the supply counter
        if self.attempt.last_list_size == 1 {
            self.enabled = false;
            self.stage = Stage::RequestStop;
        } else {
            self.wait(now, COUNTER_HOP_DELAY);
            self.stage = Stage::SeekSupplyOfficer;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::testclient::ScriptedClient;

    fn request(item_id: u32, limit: u32, mode: PurchaseMode) -> PurchaseRequest {
        PurchaseRequest {
            item_id,
            name: format!("item {item_id}"),
            effective_limit: limit,
            scrip_cost: 200,
            tier: 1,
            subgroup: 1,
            stack_size: 1,
            mode,
            check_secondary_stock: false,
        }
    }

    #[test]
    fn keep_stocked_qualifies_only_below_limit() {
        let mut client = ScriptedClient::new();
        client.primary_stock.insert(42, 9);
        let requests = vec![request(42, 10, PurchaseMode::KeepStocked)];
        assert!(next_purchase(&client, &requests, None).is_some());

        client.primary_stock.insert(42, 10);
        assert!(next_purchase(&client, &requests, None).is_none());
    }

    #[test]
    fn fully_stocked_wish_list_yields_nothing() {
        let mut client = ScriptedClient::new();
        client.primary_stock.insert(42, 10);
        let requests = vec![request(42, 10, PurchaseMode::KeepStocked)];
        assert_eq!(next_purchase(&client, &requests, None), None);
    }

    #[test]
    fn secondary_stock_counts_when_requested() {
        let mut client = ScriptedClient::new();
        client.primary_stock.insert(42, 4);
        client.secondary_stock.insert(42, 6);

        let mut checked = request(42, 10, PurchaseMode::KeepStocked);
        checked.check_secondary_stock = true;
        assert!(next_purchase(&client, std::slice::from_ref(&checked), None).is_none());

        let unchecked = request(42, 10, PurchaseMode::KeepStocked);
        assert!(next_purchase(&client, std::slice::from_ref(&unchecked), None).is_some());
    }

    #[test]
    fn one_time_request_stops_after_projected_stack_reaches_limit() {
        let client = ScriptedClient::new();
        let mut bought = request(7, 5, PurchaseMode::OneTime);
        bought.stack_size = 5;
        let requests = vec![bought.clone()];

        assert!(next_purchase(&client, &requests, None).is_some());
        assert_eq!(next_purchase(&client, &requests, Some(&bought)), None);
    }

    #[test]
    fn projection_only_applies_to_the_same_item() {
        let mut client = ScriptedClient::new();
        client.primary_stock.insert(8, 0);
        let mut first = request(7, 5, PurchaseMode::OneTime);
        first.stack_size = 5;
        let second = request(8, 3, PurchaseMode::KeepStocked);
        let requests = vec![first.clone(), second];

        let next = next_purchase(&client, &requests, Some(&first)).unwrap();
        assert_eq!(next.item_id, 8);
    }

    #[test]
    fn projected_stack_is_capped_for_ordinary_items() {
        let mut client = ScriptedClient::new();
        client.primary_stock.insert(7, 0);
        let mut bulk = request(7, 150, PurchaseMode::KeepStocked);
        bulk.stack_size = 999;
        let requests = vec![bulk.clone()];

        // projection clamps to the transaction cap of 99, which stays below
        // the limit of 150, so the entry still qualifies
        assert!(next_purchase(&client, &requests, Some(&bulk)).is_some());
    }

    #[test]
    fn voucher_projection_is_uncapped() {
        let mut client = ScriptedClient::new();
        client.primary_stock.insert(catalog::DISPATCH_VOUCHER, 0);
        let mut voucher = request(catalog::DISPATCH_VOUCHER, 150, PurchaseMode::KeepStocked);
        voucher.stack_size = 65_000;
        let requests = vec![voucher.clone()];

        assert!(next_purchase(&client, &requests, Some(&voucher)).is_none());
    }

    #[test]
    fn first_qualifying_entry_wins_regardless_of_cost() {
        let mut client = ScriptedClient::new();
        client.primary_stock.insert(1, 0);
        client.primary_stock.insert(2, 0);
        let cheap = request(1, 5, PurchaseMode::KeepStocked);
        let mut dear = request(2, 5, PurchaseMode::KeepStocked);
        dear.scrip_cost = 9_000;
        let requests = vec![dear.clone(), cheap];

        assert_eq!(next_purchase(&client, &requests, None).unwrap().item_id, 2);
    }
}
