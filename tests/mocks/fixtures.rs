//! Well-known anvil accounts and settings used across tests

#![allow(dead_code)]

use std::sync::Arc;

use tsender::config::{StorageBackend, StorageSettings};
use tsender::mocks::MockTokenChain;
use tsender::{address, Address, ChainClient, Settings, TSender, WalletContext};

pub const OWNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const ALICE: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
pub const BOB: Address = address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");
pub const TOKEN: Address = address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512");
/// TSender deployed first on a fresh anvil node
pub const ANVIL_TSENDER: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const ANVIL: u64 = 31337;

pub fn anvil_wallet() -> WalletContext {
	WalletContext::connected(OWNER, ANVIL)
}

pub fn file_settings(path: &std::path::Path) -> Settings {
	let mut settings = Settings::default();
	settings.storage = StorageSettings {
		backend: StorageBackend::File,
		path: path.to_string_lossy().into_owned(),
	};
	settings
}

/// Client wired to an in-memory chain
pub async fn client_with(chain: Arc<MockTokenChain>) -> TSender {
	TSender::builder()
		.with_client(chain as Arc<dyn ChainClient>)
		.build()
		.await
		.expect("build client")
}
