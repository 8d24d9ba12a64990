//! TSender Adapters
//!
//! Chain client implementations for the TSender airdrop client.

pub mod rpc_client;
pub mod rpc_models;

pub use rpc_client::{JsonRpcChainClient, RpcClientConfig};
pub use tsender_types::{ChainClient, ChainClientError, ChainResult};
