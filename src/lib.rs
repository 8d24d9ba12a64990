//! TSender Airdrop Client
//!
//! Library for sending an ERC-20 token to many recipients in one transaction
//! through a TSender contract: amount aggregation, allowance check, exact
//! approval, batched transfer and a persistent airdrop form.

// Re-export core types
pub use alloy_primitives::address;
pub use tsender_types::{
	format_token_amount, parse_address, split_entries, Address, AddressError, AirdropFailure,
	AirdropOutcome, AirdropRequest, AirdropState, AirdropValidationError, Bytes, ChainClient,
	ChainClientError, ChainContracts, ChainResult, ChainRoutes, ContractCall, KeyValueStore,
	SecretString, StorageError, TokenDetails, TransactionOutcome, TransactionReceipt,
	TransactionStep, TxHash, WalletContext, IERC20, ITSender, U256,
};

// Re-export services
pub use tsender_service::{
	calculate_total, read_call, AirdropForm, AirdropService, AirdropTrait, FormError, FormValues,
	ProgressReporter, RecordingProgress, TokenService, TracingProgress, TransactionDetails,
};

pub use tsender_adapters::{JsonRpcChainClient, RpcClientConfig};
pub use tsender_config::{load_config, log_service_info, log_startup_complete, Settings};
pub use tsender_storage::{FileStore, MemoryStore};

/// Organized module access
pub mod models {
	pub use tsender_types::*;
}

pub mod storage {
	pub use tsender_storage::*;
}

pub mod config {
	pub use tsender_config::*;
}

pub mod adapters {
	pub use tsender_adapters::*;
}

pub mod service {
	pub use tsender_service::*;
}

pub mod mocks;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tsender_config::{LogFormat, StorageBackend};

/// Builder wiring the chain client, storage and services together
#[derive(Default)]
pub struct TSenderBuilder {
	settings: Option<Settings>,
	storage: Option<Arc<dyn KeyValueStore>>,
	client: Option<Arc<dyn ChainClient>>,
	routes: Option<ChainRoutes>,
	init_tracing: bool,
}

impl TSenderBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Load `.env` and the configuration file, and install the tracing
	/// subscriber when the client is built
	pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();
		let settings = load_config()?;
		Ok(Self::new().with_settings(settings).with_tracing())
	}

	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Use a custom store instead of the configured backend
	pub fn with_storage<S: KeyValueStore + 'static>(mut self, storage: S) -> Self {
		self.storage = Some(Arc::new(storage));
		self
	}

	/// Use a custom chain client instead of the JSON-RPC client
	pub fn with_client(mut self, client: Arc<dyn ChainClient>) -> Self {
		self.client = Some(client);
		self
	}

	/// Replace the chain routes derived from settings
	pub fn with_routes(mut self, routes: ChainRoutes) -> Self {
		self.routes = Some(routes);
		self
	}

	/// Install a tracing subscriber from the logging settings during `build`
	pub fn with_tracing(mut self) -> Self {
		self.init_tracing = true;
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error>> {
		// RUST_LOG wins over the configured level
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		let result = match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);

				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
		};
		result.map_err(|e| format!("Failed to initialize tracing: {}", e))?;

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);

		Ok(())
	}

	/// Validate the settings and wire up every service
	pub async fn build(self) -> Result<TSender, Box<dyn std::error::Error>> {
		let settings = self.settings.clone().unwrap_or_default();
		settings.validate()?;

		if self.init_tracing {
			self.init_tracing_from_settings(&settings)?;
			log_service_info();
		}

		let routes = match self.routes {
			Some(routes) => routes,
			None => settings.chain_routes()?,
		};

		let client: Arc<dyn ChainClient> = match self.client {
			Some(client) => client,
			None => {
				let rpc_url = settings
					.rpc_url()
					.map_err(|e| format!("Failed to resolve RPC URL: {}", e))?;
				let config = RpcClientConfig::new(rpc_url)
					.with_request_timeout(Duration::from_millis(
						settings.client.request_timeout_ms,
					))
					.with_poll_interval(Duration::from_millis(
						settings.client.receipt_poll_interval_ms,
					))
					.with_receipt_timeout(Duration::from_millis(settings.client.receipt_timeout_ms));
				Arc::new(JsonRpcChainClient::new(config)?)
			},
		};

		let storage: Arc<dyn KeyValueStore> = match self.storage {
			Some(storage) => storage,
			None => match settings.storage.backend {
				StorageBackend::Memory => Arc::new(MemoryStore::new()),
				StorageBackend::File => Arc::new(FileStore::open(&settings.storage.path).await?),
			},
		};

		let airdrop = Arc::new(AirdropService::new(routes.clone(), Arc::clone(&client)));
		let tokens = TokenService::new(Arc::clone(&client));
		let form = Arc::new(AirdropForm::new(
			Arc::clone(&storage),
			Arc::clone(&airdrop) as Arc<dyn AirdropTrait>,
			tokens.clone(),
		));
		form.load().await;

		log_startup_complete(&routes.chain_ids());

		Ok(TSender {
			settings,
			routes,
			client,
			storage,
			airdrop,
			tokens,
			form,
		})
	}
}

/// A fully wired airdrop client
pub struct TSender {
	settings: Settings,
	routes: ChainRoutes,
	client: Arc<dyn ChainClient>,
	storage: Arc<dyn KeyValueStore>,
	airdrop: Arc<AirdropService>,
	tokens: TokenService,
	form: Arc<AirdropForm>,
}

impl TSender {
	pub fn builder() -> TSenderBuilder {
		TSenderBuilder::new()
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn routes(&self) -> &ChainRoutes {
		&self.routes
	}

	pub fn client(&self) -> Arc<dyn ChainClient> {
		Arc::clone(&self.client)
	}

	pub fn storage(&self) -> Arc<dyn KeyValueStore> {
		Arc::clone(&self.storage)
	}

	pub fn airdrop(&self) -> &AirdropService {
		&self.airdrop
	}

	pub fn tokens(&self) -> &TokenService {
		&self.tokens
	}

	pub fn form(&self) -> Arc<AirdropForm> {
		Arc::clone(&self.form)
	}
}
