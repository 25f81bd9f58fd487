pub mod accounting;
pub mod cooperation;
pub mod exchange;
pub mod machine;
pub mod ranking;
pub mod request;
pub mod stage;
mod supply;

#[cfg(test)]
pub(crate) mod testclient;

pub use machine::{AutomationRunner, RunError};
pub use request::{PurchaseMode, PurchaseRequest, TurnInCandidate};
pub use stage::Stage;
