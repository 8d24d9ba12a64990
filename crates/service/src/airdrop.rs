//! Airdrop orchestration
//!
//! Drives a single submission through allowance check, optional exact-amount
//! approval and the batched `airdropERC20` transfer. The flow is a small state
//! machine: every step inspects the current [`AirdropState`], talks to the
//! chain at most once and returns a [`Transition`].

use std::sync::Arc;

use alloy_primitives::{Address, TxHash};
use async_trait::async_trait;
use tracing::{debug, info, warn};
use tsender_types::{
	AirdropFailure, AirdropOutcome, AirdropRequest, AirdropState, ChainClient, ChainClientError,
	ChainRoutes, ContractCall, TransactionOutcome, TransactionStep, WalletContext, IERC20,
	ITSender,
};
use uuid::Uuid;

use crate::calls::read_call;
use crate::progress::ProgressReporter;

/// Runs airdrop submissions for a connected wallet
#[async_trait]
pub trait AirdropTrait: Send + Sync {
	/// Run one submission to a terminal state
	async fn run(
		&self,
		ctx: &WalletContext,
		request: &AirdropRequest,
		progress: &dyn ProgressReporter,
	) -> AirdropOutcome;
}

/// Result of a single step
#[derive(Debug, Clone, PartialEq, Eq)]
enum Transition {
	Advance(AirdropState),
	Fail(AirdropFailure),
}

impl Transition {
	fn into_state(self) -> AirdropState {
		match self {
			Transition::Advance(state) => state,
			Transition::Fail(failure) => AirdropState::Failed(failure),
		}
	}
}

/// Account and contract a submission is bound to once the chain is resolved
#[derive(Debug, Clone, Copy)]
struct Route {
	owner: Address,
	tsender: Address,
}

#[derive(Debug, Clone)]
pub struct AirdropService {
	routes: ChainRoutes,
	client: Arc<dyn ChainClient>,
}

impl AirdropService {
	pub fn new(routes: ChainRoutes, client: Arc<dyn ChainClient>) -> Self {
		Self { routes, client }
	}

	pub fn routes(&self) -> &ChainRoutes {
		&self.routes
	}

	pub fn client(&self) -> Arc<dyn ChainClient> {
		Arc::clone(&self.client)
	}

	/// Run one submission until it succeeds or fails
	///
	/// Steps are never retried. A failed flow ends in `Failed`, and
	/// submitting again starts over from the allowance check.
	pub async fn run(
		&self,
		ctx: &WalletContext,
		request: &AirdropRequest,
		progress: &dyn ProgressReporter,
	) -> AirdropOutcome {
		let submission_id = Uuid::new_v4();
		info!(
			"Starting airdrop {} on chain {}: {} recipients, total {}",
			submission_id,
			ctx.chain_id,
			request.len(),
			request.total()
		);

		let mut outcome = AirdropOutcome {
			state: AirdropState::Idle,
			approval_hash: None,
			transfer_hash: None,
			transitions: Vec::new(),
		};

		let route = match self.resolve_route(ctx) {
			Ok(route) => route,
			Err(failure) => {
				Self::enter(
					&mut outcome,
					AirdropState::Failed(failure),
					submission_id,
					progress,
				);
				return outcome;
			},
		};

		while !outcome.state.is_terminal() {
			let transition = self.step(&outcome.state, route, request).await;
			let next = transition.into_state();

			match &next {
				AirdropState::ApprovalConfirming { hash } => outcome.approval_hash = Some(*hash),
				AirdropState::TransferConfirming { hash, .. } => outcome.transfer_hash = Some(*hash),
				_ => {},
			}

			Self::enter(&mut outcome, next, submission_id, progress);
		}

		match &outcome.state {
			AirdropState::Succeeded { hash } => {
				info!("Airdrop {} succeeded in transaction {}", submission_id, hash)
			},
			AirdropState::Failed(failure) if failure.is_user_rejection() => {
				info!("Airdrop {} aborted: {}", submission_id, failure)
			},
			AirdropState::Failed(failure) => warn!("Airdrop {} failed: {}", submission_id, failure),
			_ => {},
		}

		outcome
	}

	fn enter(
		outcome: &mut AirdropOutcome,
		state: AirdropState,
		submission_id: Uuid,
		progress: &dyn ProgressReporter,
	) {
		debug!(
			"Airdrop {}: {} -> {}",
			submission_id, outcome.state, state
		);
		progress.on_state(&state);
		outcome.transitions.push(state.clone());
		outcome.state = state;
	}

	fn resolve_route(&self, ctx: &WalletContext) -> Result<Route, AirdropFailure> {
		let tsender = self
			.routes
			.tsender(ctx.chain_id)
			.ok_or(AirdropFailure::UnsupportedChain {
				chain_id: ctx.chain_id,
			})?;
		let owner = ctx.account.ok_or(AirdropFailure::WalletNotConnected)?;

		Ok(Route { owner, tsender })
	}

	async fn step(
		&self,
		state: &AirdropState,
		route: Route,
		request: &AirdropRequest,
	) -> Transition {
		match state {
			AirdropState::Idle => Transition::Advance(AirdropState::FetchingAllowance),

			AirdropState::FetchingAllowance => {
				let call = IERC20::allowanceCall {
					owner: route.owner,
					spender: route.tsender,
				};
				match read_call(self.client.as_ref(), request.token(), &call).await {
					Ok(allowance) if allowance < request.total() => {
						debug!(
							"Allowance {} below total {}, approval required",
							allowance,
							request.total()
						);
						Transition::Advance(AirdropState::ApprovalPending)
					},
					Ok(_) => Transition::Advance(AirdropState::TransferPending {
						after_approval: false,
					}),
					Err(e) => {
						warn!("Failed to read allowance for {}: {}", request.token(), e);
						Transition::Fail(AirdropFailure::ReadFailed {
							reason: e.to_string(),
						})
					},
				}
			},

			AirdropState::ApprovalPending => {
				let call = ContractCall::new(
					request.token(),
					&IERC20::approveCall {
						spender: route.tsender,
						amount: request.total(),
					},
				)
				.from_account(route.owner);

				match self.client.write_contract(&call).await {
					Ok(hash) => Transition::Advance(AirdropState::ApprovalConfirming { hash }),
					Err(e) => Transition::Fail(write_failure(TransactionStep::Approval, e)),
				}
			},

			AirdropState::ApprovalConfirming { hash } => {
				match self.confirm(TransactionStep::Approval, *hash).await {
					Ok(()) => Transition::Advance(AirdropState::TransferPending {
						after_approval: true,
					}),
					Err(failure) => Transition::Fail(failure),
				}
			},

			AirdropState::TransferPending { after_approval } => {
				let call = ContractCall::new(
					route.tsender,
					&ITSender::airdropERC20Call {
						tokenAddress: request.token(),
						recipients: request.recipients().to_vec(),
						amounts: request.amounts().to_vec(),
						totalAmount: request.total(),
					},
				)
				.from_account(route.owner);

				match self.client.write_contract(&call).await {
					Ok(hash) => Transition::Advance(AirdropState::TransferConfirming {
						hash,
						after_approval: *after_approval,
					}),
					Err(e) => Transition::Fail(write_failure(TransactionStep::Transfer, e)),
				}
			},

			AirdropState::TransferConfirming { hash, .. } => {
				match self.confirm(TransactionStep::Transfer, *hash).await {
					Ok(()) => Transition::Advance(AirdropState::Succeeded { hash: *hash }),
					Err(failure) => Transition::Fail(failure),
				}
			},

			// terminal states are never stepped
			AirdropState::Succeeded { .. } | AirdropState::Failed(_) => {
				Transition::Advance(state.clone())
			},
		}
	}

	async fn confirm(&self, step: TransactionStep, hash: TxHash) -> Result<(), AirdropFailure> {
		let receipt = self
			.client
			.wait_for_transaction_receipt(hash)
			.await
			.map_err(|e| {
				warn!("Waiting for {} transaction {} failed: {}", step, hash, e);
				AirdropFailure::ConfirmationFailed {
					step,
					hash,
					reason: e.to_string(),
				}
			})?;

		match receipt.outcome() {
			TransactionOutcome::Confirmed => {
				debug!(
					"{} transaction {} confirmed in block {:?}",
					step, hash, receipt.block_number
				);
				Ok(())
			},
			TransactionOutcome::Failed => Err(AirdropFailure::Reverted { step, hash }),
			TransactionOutcome::Pending => Err(AirdropFailure::ConfirmationFailed {
				step,
				hash,
				reason: "receipt has no block number".to_string(),
			}),
		}
	}
}

#[async_trait]
impl AirdropTrait for AirdropService {
	async fn run(
		&self,
		ctx: &WalletContext,
		request: &AirdropRequest,
		progress: &dyn ProgressReporter,
	) -> AirdropOutcome {
		AirdropService::run(self, ctx, request, progress).await
	}
}

fn write_failure(step: TransactionStep, error: ChainClientError) -> AirdropFailure {
	if error.is_user_rejection() {
		AirdropFailure::UserRejected { step }
	} else {
		warn!("{} transaction could not be submitted: {}", step, error);
		AirdropFailure::WriteFailed {
			step,
			reason: error.to_string(),
		}
	}
}
