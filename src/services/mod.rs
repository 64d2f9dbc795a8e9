pub mod auth;
pub mod cleanup;
pub mod inventory;
pub mod ledger;

pub use auth::AdminAuth;
pub use cleanup::ExpirySweeper;
pub use inventory::SeatInventory;
pub use ledger::{BookingLedger, ReleaseSummary};
