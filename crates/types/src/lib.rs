//! TSender Types
//!
//! Shared models and collaborator traits for the TSender airdrop client.
//! This crate contains the domain models organized by concern: addresses and
//! token metadata, chain routes, contract bindings, the chain client seam,
//! the airdrop state machine vocabulary and the key-value storage seam.

pub mod airdrop;
pub mod chains;
pub mod client;
pub mod contracts;
pub mod models;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export the primitive types used across every crate
pub use alloy_primitives::{Address, Bytes, TxHash, U256};
pub use serde_json;

pub use airdrop::{
	split_entries, AirdropFailure, AirdropOutcome, AirdropRequest, AirdropState,
	AirdropValidationError, AirdropValidationResult, TransactionStep,
};

pub use chains::{ChainContracts, ChainRoutes};

pub use client::{
	ChainClient, ChainClientError, ChainResult, TransactionOutcome, TransactionReceipt,
	WalletContext,
};

#[cfg(any(test, feature = "test-utils"))]
pub use client::MockChainClient;

pub use contracts::{ContractCall, IERC20, ITSender};

pub use models::{
	format_token_amount, looks_like_address, parse_address, AddressError, SecretString,
	TokenDetails, PLACEHOLDER,
};

pub use storage::{keys as storage_keys, KeyValueStore, StorageError, StorageResult};
