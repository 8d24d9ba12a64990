//! TSender Service
//!
//! Amount aggregation, airdrop orchestration, token metadata lookup and the
//! airdrop form built on top of them.

pub mod aggregator;
pub mod airdrop;
pub mod calls;
pub mod form;
pub mod progress;
pub mod token;

pub use aggregator::calculate_total;
pub use airdrop::{AirdropService, AirdropTrait};
pub use calls::read_call;
pub use form::{AirdropForm, FormError, FormValues, TransactionDetails};
pub use progress::{ProgressReporter, RecordingProgress, Tee, TracingProgress};
pub use token::TokenService;
