//! Chain client seam: the read/write/wait capabilities supplied by the host

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::ChainClientError;
pub use models::{TransactionOutcome, TransactionReceipt, WalletContext};
pub use traits::ChainClient;
#[cfg(any(test, feature = "test-utils"))]
pub use traits::MockChainClient;

pub type ChainResult<T> = Result<T, ChainClientError>;
