//! Shared fixtures for integration tests

pub mod fake_node;
pub mod fixtures;

#[allow(unused_imports)]
pub use fake_node::FakeNode;
#[allow(unused_imports)]
pub use fixtures::*;
