//! Storage-related types and traits

pub mod errors;
pub mod traits;

pub use errors::*;
pub use traits::*;

pub type StorageResult<T> = Result<T, StorageError>;

/// Keys under which the airdrop form persists its inputs
pub mod keys {
	pub const TOKEN_ADDRESS: &str = "tsender_token_address";
	pub const RECIPIENTS: &str = "tsender_recipients";
	pub const AMOUNTS: &str = "tsender_amounts";

	/// Every form key, cleared together
	pub const ALL: [&str; 3] = [TOKEN_ADDRESS, RECIPIENTS, AMOUNTS];
}
