//! Shared domain models used by the client, the services and the adapters

pub mod address;
pub mod secret_string;
pub mod token;

pub use address::{looks_like_address, parse_address, AddressError};
pub use secret_string::SecretString;
pub use token::{format_token_amount, TokenDetails, PLACEHOLDER};
