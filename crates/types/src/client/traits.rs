//! Core chain client trait for host-supplied implementations

use alloy_primitives::{Bytes, TxHash};
use async_trait::async_trait;
use std::fmt::Debug;

use super::{ChainResult, TransactionReceipt};
use crate::contracts::ContractCall;

/// Read, write and wait capabilities of a connected wallet/chain
///
/// Implementations wrap whatever actually talks to the chain: a JSON-RPC
/// endpoint, a browser wallet bridge, or a scripted mock in tests.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync + Debug {
	/// Execute a read-only call and return the raw ABI-encoded result
	async fn read_contract(&self, call: &ContractCall) -> ChainResult<Bytes>;

	/// Ask the wallet to sign and broadcast a call
	///
	/// Returns the transaction hash once the wallet accepts the request, not
	/// once it is mined. A declined prompt yields `ChainClientError::UserRejected`.
	async fn write_contract(&self, call: &ContractCall) -> ChainResult<TxHash>;

	/// Wait until the transaction is mined, or the client gives up
	async fn wait_for_transaction_receipt(&self, hash: TxHash) -> ChainResult<TransactionReceipt>;
}
