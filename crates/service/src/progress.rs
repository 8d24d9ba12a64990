//! Progress reporting for airdrop submissions
//!
//! The orchestrator publishes every state it enters to a `ProgressReporter`.
//! Hosts use it to drive a loading indicator and to surface failures.

use std::sync::Mutex;

use tracing::{info, warn};
use tsender_types::AirdropState;

/// Receives state changes while an airdrop runs
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
	/// Called once per state entered, in order, ending with a terminal state
	fn on_state(&self, state: &AirdropState);
}

/// Reporter that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
	fn on_state(&self, state: &AirdropState) {
		match state {
			AirdropState::Failed(failure) => warn!("Airdrop failed: {}", failure),
			AirdropState::Succeeded { hash } => info!("Airdrop successful: {}", hash),
			other => info!("{}", other.label()),
		}
	}
}

/// Reporter that keeps every state it receives
#[derive(Debug, Default)]
pub struct RecordingProgress {
	states: Mutex<Vec<AirdropState>>,
}

impl RecordingProgress {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn states(&self) -> Vec<AirdropState> {
		self.states
			.lock()
			.map(|states| states.clone())
			.unwrap_or_default()
	}

	pub fn labels(&self) -> Vec<String> {
		self.states()
			.iter()
			.map(|state| state.label().into_owned())
			.collect()
	}
}

impl ProgressReporter for RecordingProgress {
	fn on_state(&self, state: &AirdropState) {
		if let Ok(mut states) = self.states.lock() {
			states.push(state.clone());
		}
	}
}

/// Forwards every state to two reporters
pub struct Tee<'a> {
	first: &'a dyn ProgressReporter,
	second: &'a dyn ProgressReporter,
}

impl<'a> Tee<'a> {
	pub fn new(first: &'a dyn ProgressReporter, second: &'a dyn ProgressReporter) -> Self {
		Self { first, second }
	}
}

impl ProgressReporter for Tee<'_> {
	fn on_state(&self, state: &AirdropState) {
		self.first.on_state(state);
		self.second.on_state(state);
	}
}
