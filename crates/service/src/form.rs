//! Airdrop form state
//!
//! Holds the three raw inputs (token address, recipients, amounts), keeps them
//! in a `KeyValueStore` across sessions, derives the display values and guards
//! submissions so only one airdrop runs at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy_primitives::U256;
use thiserror::Error;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};
use tsender_storage::{keys, KeyValueStore};
use tsender_types::{
	AirdropOutcome, AirdropRequest, AirdropState, AirdropValidationError, TokenDetails,
	WalletContext, PLACEHOLDER,
};

use crate::aggregator::calculate_total;
use crate::airdrop::AirdropTrait;
use crate::progress::{ProgressReporter, Tee};
use crate::token::TokenService;

#[derive(Debug, Error)]
pub enum FormError {
	#[error("an airdrop is already in progress")]
	Busy,
	#[error("invalid airdrop input: {0}")]
	Validation(#[from] AirdropValidationError),
}

/// Raw text inputs as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
	pub token_address: String,
	pub recipients: String,
	pub amounts: String,
}

/// Summary shown next to the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetails {
	pub token_label: String,
	pub amount_wei: String,
	pub amount_tokens: String,
}

pub struct AirdropForm {
	store: Arc<dyn KeyValueStore>,
	airdrop: Arc<dyn AirdropTrait>,
	tokens: TokenService,
	values: RwLock<FormValues>,
	token_details: RwLock<Option<TokenDetails>>,
	busy: AtomicBool,
	loading: watch::Sender<String>,
}

impl AirdropForm {
	pub fn new(
		store: Arc<dyn KeyValueStore>,
		airdrop: Arc<dyn AirdropTrait>,
		tokens: TokenService,
	) -> Self {
		let (loading, _) = watch::channel(String::new());
		Self {
			store,
			airdrop,
			tokens,
			values: RwLock::new(FormValues::default()),
			token_details: RwLock::new(None),
			busy: AtomicBool::new(false),
			loading,
		}
	}

	/// Pre-fill the inputs from storage
	pub async fn load(&self) {
		let token_address = self.restore(keys::TOKEN_ADDRESS).await;
		let recipients = self.restore(keys::RECIPIENTS).await;
		let amounts = self.restore(keys::AMOUNTS).await;

		{
			let mut values = self.values.write().await;
			if let Some(token_address) = token_address {
				values.token_address = token_address;
			}
			if let Some(recipients) = recipients {
				values.recipients = recipients;
			}
			if let Some(amounts) = amounts {
				values.amounts = amounts;
			}
		}

		self.refresh_token_details().await;
	}

	pub async fn values(&self) -> FormValues {
		self.values.read().await.clone()
	}

	/// Update the token address, persist it and look the token up again
	pub async fn set_token_address(&self, value: impl Into<String>) {
		let value = value.into();
		self.values.write().await.token_address = value.clone();
		self.persist(keys::TOKEN_ADDRESS, &value).await;
		self.refresh_token_details().await;
	}

	pub async fn set_recipients(&self, value: impl Into<String>) {
		let value = value.into();
		self.values.write().await.recipients = value.clone();
		self.persist(keys::RECIPIENTS, &value).await;
	}

	pub async fn set_amounts(&self, value: impl Into<String>) {
		let value = value.into();
		self.values.write().await.amounts = value.clone();
		self.persist(keys::AMOUNTS, &value).await;
	}

	/// Running total of the amounts input
	pub async fn total(&self) -> U256 {
		calculate_total(&self.values.read().await.amounts)
	}

	pub async fn token_details(&self) -> Option<TokenDetails> {
		self.token_details.read().await.clone()
	}

	/// Re-read token metadata for the current token address
	pub async fn refresh_token_details(&self) {
		let token_address = self.values.read().await.token_address.clone();
		let details = self.tokens.fetch_details(&token_address).await;
		*self.token_details.write().await = details;
	}

	pub async fn transaction_details(&self) -> TransactionDetails {
		let total = self.total().await;
		let details = self.token_details.read().await;

		// amounts are only shown for a positive total
		let (amount_wei, amount_tokens) = if total.is_zero() {
			(PLACEHOLDER.to_string(), PLACEHOLDER.to_string())
		} else {
			(
				total.to_string(),
				details
					.as_ref()
					.map(|token| token.format_amount(total))
					.unwrap_or_else(|| PLACEHOLDER.to_string()),
			)
		};

		TransactionDetails {
			token_label: details
				.as_ref()
				.map(TokenDetails::label)
				.unwrap_or_else(|| PLACEHOLDER.to_string()),
			amount_wei,
			amount_tokens,
		}
	}

	pub fn is_busy(&self) -> bool {
		self.busy.load(Ordering::SeqCst)
	}

	/// Label of the step currently running, empty when idle
	pub fn loading_message(&self) -> String {
		self.loading.borrow().clone()
	}

	/// Watch the loading label as it changes
	pub fn subscribe_loading(&self) -> watch::Receiver<String> {
		self.loading.subscribe()
	}

	/// Validate the inputs and run an airdrop
	pub async fn submit(
		&self,
		ctx: &WalletContext,
		progress: &dyn ProgressReporter,
	) -> Result<AirdropOutcome, FormError> {
		if self.is_busy() {
			return Err(FormError::Busy);
		}

		let request = {
			let values = self.values.read().await;
			AirdropRequest::from_text(&values.token_address, &values.recipients, &values.amounts)?
		};

		let _guard = BusyGuard::acquire(&self.busy, &self.loading).ok_or(FormError::Busy)?;

		let loading = LoadingReporter {
			loading: &self.loading,
		};
		let outcome = self
			.airdrop
			.run(ctx, &request, &Tee::new(&loading, progress))
			.await;

		match outcome.failure() {
			Some(failure) if failure.is_user_rejection() => info!("Airdrop cancelled: {}", failure),
			Some(failure) => warn!("Airdrop failed: {}", failure),
			None => info!("Airdrop submitted to {} recipients", request.len()),
		}

		Ok(outcome)
	}

	/// Reset every input and drop the persisted values
	///
	/// Refused while a submission is in flight.
	pub async fn clear(&self) -> Result<(), FormError> {
		if self.is_busy() {
			return Err(FormError::Busy);
		}

		*self.values.write().await = FormValues::default();
		*self.token_details.write().await = None;

		for key in keys::ALL {
			if let Err(e) = self.store.remove(key).await {
				warn!("Failed to remove stored {}: {}", key, e);
			}
		}

		Ok(())
	}

	async fn restore(&self, key: &str) -> Option<String> {
		match self.store.get(key).await {
			Ok(value) => value,
			Err(e) => {
				warn!("Failed to read stored {}: {}", key, e);
				None
			},
		}
	}

	async fn persist(&self, key: &str, value: &str) {
		match self.store.set(key, value).await {
			Ok(()) => debug!("Stored {}", key),
			Err(e) => warn!("Failed to store {}: {}", key, e),
		}
	}
}

/// Holds the busy flag for one submission and resets it on every exit path
struct BusyGuard<'a> {
	busy: &'a AtomicBool,
	loading: &'a watch::Sender<String>,
}

impl<'a> BusyGuard<'a> {
	fn acquire(busy: &'a AtomicBool, loading: &'a watch::Sender<String>) -> Option<Self> {
		busy.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
			.ok()
			.map(|_| Self { busy, loading })
	}
}

impl Drop for BusyGuard<'_> {
	fn drop(&mut self) {
		self.loading.send_replace(String::new());
		self.busy.store(false, Ordering::SeqCst);
	}
}

struct LoadingReporter<'a> {
	loading: &'a watch::Sender<String>,
}

impl ProgressReporter for LoadingReporter<'_> {
	fn on_state(&self, state: &AirdropState) {
		if !state.is_terminal() {
			self.loading.send_replace(state.label().into_owned());
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::airdrop::AirdropService;
	use crate::progress::RecordingProgress;
	use alloy_primitives::{Bytes, TxHash};
	use alloy_sol_types::{sol_data, SolType, SolValue};
	use tsender_storage::MemoryStore;
	use tsender_types::test_utils::{anvil_context, ALICE, BOB, TOKEN};
	use tsender_types::{
		ChainClientError, ChainRoutes, ContractCall, MockChainClient, TransactionReceipt, IERC20,
	};

	fn expect_token_metadata(client: &mut MockChainClient) {
		client
			.expect_read_contract()
			.withf(|call| !call.is::<IERC20::allowanceCall>())
			.returning(|call: &ContractCall| {
				let data = if call.is::<IERC20::nameCall>() {
					"Mock Token".to_string().abi_encode()
				} else if call.is::<IERC20::symbolCall>() {
					"MOCK".to_string().abi_encode()
				} else {
					sol_data::Uint::<8>::abi_encode(&18u8)
				};
				Ok(Bytes::from(data))
			});
	}

	fn form_with(client: MockChainClient, store: MemoryStore) -> AirdropForm {
		let client = Arc::new(client);
		let airdrop = AirdropService::new(ChainRoutes::builtin(), client.clone());
		AirdropForm::new(
			Arc::new(store),
			Arc::new(airdrop),
			TokenService::new(client),
		)
	}

	async fn fill(form: &AirdropForm, amounts: &str) {
		form.set_token_address(TOKEN.to_string()).await;
		form.set_recipients(format!("{}, {}", ALICE, BOB)).await;
		form.set_amounts(amounts).await;
	}

	#[tokio::test]
	async fn test_persists_and_reloads_values() {
		let store = MemoryStore::new();
		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		let form = form_with(client, store.clone());
		fill(&form, "100\n200").await;

		assert_eq!(
			store.get(keys::AMOUNTS).await.unwrap().as_deref(),
			Some("100\n200")
		);

		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		let reloaded = form_with(client, store);
		reloaded.load().await;

		assert_eq!(reloaded.values().await, form.values().await);
		assert_eq!(reloaded.total().await, U256::from(300u64));
		assert!(reloaded.token_details().await.is_some());
	}

	#[tokio::test]
	async fn test_transaction_details() {
		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		let form = form_with(client, MemoryStore::new());

		assert_eq!(
			form.transaction_details().await,
			TransactionDetails {
				token_label: "-".to_string(),
				amount_wei: "-".to_string(),
				amount_tokens: "-".to_string(),
			}
		);

		form.set_token_address(TOKEN.to_string()).await;
		assert_eq!(
			form.transaction_details().await,
			TransactionDetails {
				token_label: "Mock Token (MOCK)".to_string(),
				amount_wei: "-".to_string(),
				amount_tokens: "-".to_string(),
			}
		);

		fill(&form, "1000000000000000000, 500000000000000000").await;
		assert_eq!(
			form.transaction_details().await,
			TransactionDetails {
				token_label: "Mock Token (MOCK)".to_string(),
				amount_wei: "1500000000000000000".to_string(),
				amount_tokens: "1.50".to_string(),
			}
		);
	}

	#[tokio::test]
	async fn test_clear_removes_persisted_keys() {
		let store = MemoryStore::new();
		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		let form = form_with(client, store.clone());
		fill(&form, "1,2").await;

		form.clear().await.unwrap();

		assert_eq!(form.values().await, FormValues::default());
		assert!(form.token_details().await.is_none());
		for key in keys::ALL {
			assert!(store.get(key).await.unwrap().is_none());
		}
	}

	#[tokio::test]
	async fn test_invalid_input_is_rejected_before_running() {
		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		let form = form_with(client, MemoryStore::new());
		fill(&form, "100, abc").await;

		let result = form
			.submit(&anvil_context(), &RecordingProgress::new())
			.await;

		assert!(matches!(
			result,
			Err(FormError::Validation(
				AirdropValidationError::InvalidAmount { index: 1, .. }
			))
		));
		assert!(!form.is_busy());
	}

	#[tokio::test]
	async fn test_busy_cleared_after_rejection() {
		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		client
			.expect_read_contract()
			.withf(|call| call.is::<IERC20::allowanceCall>())
			.returning(|_| Ok(Bytes::from(U256::ZERO.abi_encode())));
		client.expect_write_contract().times(1).returning(|_| {
			Err(ChainClientError::UserRejected {
				message: "rejected".to_string(),
			})
		});

		let form = form_with(client, MemoryStore::new());
		fill(&form, "10, 20").await;

		let outcome = form
			.submit(&anvil_context(), &RecordingProgress::new())
			.await
			.unwrap();

		assert!(outcome.failure().unwrap().is_user_rejection());
		assert!(!form.is_busy());
		assert_eq!(form.loading_message(), "");
	}

	#[tokio::test]
	async fn test_busy_cleared_after_success() {
		let hash = TxHash::repeat_byte(0x42);
		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		client
			.expect_read_contract()
			.withf(|call| call.is::<IERC20::allowanceCall>())
			.returning(|_| Ok(Bytes::from(U256::MAX.abi_encode())));
		client
			.expect_write_contract()
			.times(1)
			.returning(move |_| Ok(hash));
		client
			.expect_wait_for_transaction_receipt()
			.times(1)
			.returning(|hash| Ok(TransactionReceipt::confirmed(hash, 1)));

		let form = form_with(client, MemoryStore::new());
		fill(&form, "10, 20").await;

		let progress = RecordingProgress::new();
		let outcome = form.submit(&anvil_context(), &progress).await.unwrap();

		assert!(outcome.is_success());
		assert!(!form.is_busy());
		assert_eq!(form.loading_message(), "");
		assert_eq!(
			progress.states().last(),
			Some(&AirdropState::Succeeded { hash })
		);
	}

	#[tokio::test]
	async fn test_second_submit_while_busy() {
		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		let form = form_with(client, MemoryStore::new());
		fill(&form, "10, 20").await;

		form.busy.store(true, Ordering::SeqCst);
		let result = form
			.submit(&anvil_context(), &RecordingProgress::new())
			.await;

		assert!(matches!(result, Err(FormError::Busy)));
		assert!(form.is_busy());
	}

	#[tokio::test]
	async fn test_clear_refused_while_busy() {
		let store = MemoryStore::new();
		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		let form = form_with(client, store.clone());
		fill(&form, "1,2").await;

		form.busy.store(true, Ordering::SeqCst);
		assert!(matches!(form.clear().await, Err(FormError::Busy)));
		assert_eq!(form.total().await, U256::from(3u64));
		assert!(store.get(keys::AMOUNTS).await.unwrap().is_some());

		form.busy.store(false, Ordering::SeqCst);
		form.clear().await.unwrap();
		assert_eq!(form.values().await, FormValues::default());
	}

	#[tokio::test]
	async fn test_overflowing_total_sends_nothing() {
		// only token metadata reads are expected, any other call panics
		let mut client = MockChainClient::new();
		expect_token_metadata(&mut client);
		let form = form_with(client, MemoryStore::new());
		fill(&form, &format!("{}, 5", U256::MAX)).await;

		let result = form
			.submit(&anvil_context(), &RecordingProgress::new())
			.await;

		assert!(matches!(
			result,
			Err(FormError::Validation(AirdropValidationError::TotalOverflow))
		));
		assert!(!form.is_busy());
	}

	#[test]
	fn test_loading_reporter_ignores_terminal_states() {
		let (loading, _) = watch::channel(String::new());
		let reporter = LoadingReporter { loading: &loading };

		reporter.on_state(&AirdropState::FetchingAllowance);
		assert_eq!(*loading.borrow(), "Checking token allowance...");

		reporter.on_state(&AirdropState::Succeeded {
			hash: TxHash::ZERO,
		});
		assert_eq!(*loading.borrow(), "Checking token allowance...");
	}
}
