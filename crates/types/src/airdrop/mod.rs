//! Airdrop domain: validated requests and the orchestration state machine vocabulary

pub mod errors;
pub mod request;
pub mod state;

pub use errors::{AirdropValidationError, AirdropValidationResult};
pub use request::{parse_amounts, parse_recipients, split_entries, AirdropRequest};
pub use state::{AirdropFailure, AirdropOutcome, AirdropState, TransactionStep};
