/// Discrete steps of a supply run, one per externally observable screen or
/// sub-step. The runner advances at most one stage per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Stopped,

    SeekSupplyOfficer,
    OpenSupplyMenu,
    SelectDeliveryCategory,
    SelectItemToTurnIn,
    ConfirmTurnIn,
    FinalizeTurnIn,
    CloseSupplyMenu { then_stop: bool },

    SeekExchangeClerk,
    SelectRewardTier,
    SelectRewardSubgroup,
    SelectRewardItem,
    ConfirmPurchase,
    CloseExchangeMenu,

    RequestStop,
}

impl Stage {
    pub fn is_stopped(self) -> bool {
        self == Stage::Stopped
    }

    pub fn describe(self) -> &'static str {
        match self {
            Stage::Stopped => "idle",
            Stage::SeekSupplyOfficer => "walking up to the supply officer",
            Stage::OpenSupplyMenu => "opening the delivery menu",
            Stage::SelectDeliveryCategory => "switching to deliveries",
            Stage::SelectItemToTurnIn => "picking the next delivery",
            Stage::ConfirmTurnIn => "confirming the delivery",
            Stage::FinalizeTurnIn => "waiting for the list to refresh",
            Stage::CloseSupplyMenu { .. } => "leaving the supply counter",
            Stage::SeekExchangeClerk => "walking up to the exchange clerk",
            Stage::SelectRewardTier => "selecting the reward tier",
            Stage::SelectRewardSubgroup => "selecting the reward category",
            Stage::SelectRewardItem => "selecting the reward",
            Stage::ConfirmPurchase => "confirming the purchase",
            Stage::CloseExchangeMenu => "leaving the exchange counter",
            Stage::RequestStop => "stopping",
        }
    }
}
