//! Startup logging for the TSender client
//!
//! Prints a short banner with version, platform and the effective
//! configuration sources when the client is built from configuration.

use std::env;
use tracing::info;

/// Logs client information at startup
pub fn log_service_info() {
	let service_name = "tsender";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== TSender Airdrop Client Starting ===");
	info!("🚀 Client: {} v{}", service_name, service_version);
	info!("💻 Platform: {}", env::consts::OS);
	info!("🏗️ Architecture: {}", env::consts::ARCH);

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the chains the client can route airdrops to
pub fn log_startup_complete(supported_chains: &[u64]) {
	info!("✅ TSender Airdrop Client Ready");
	info!("🔗 Supported chains: {:?}", supported_chains);
}
