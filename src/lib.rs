//! UNDO - un-deletable posts on the Symbol blockchain
//!
//! Posts are plain-text transfers to a shared channel address, likes are
//! small currency transfers to the author tagged with the post hash, and
//! NFTs are one-of-one mosaics carrying name/image metadata.
//!
//! ## Layout
//! - [`symbol`]: keys, addresses and transaction serialization/signing
//! - [`builder`]: the three transactions users sign
//! - [`node_api`], [`alchemy_api`]: remote REST clients
//! - [`feed`], [`nfts`], [`account`]: read-side aggregation
//! - [`server`]: axum router exposing everything as JSON

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Protocol
pub mod builder;
pub mod symbol;

// Remote services
pub mod alchemy_api;
pub mod node_api;

// Read side
pub mod account;
pub mod feed;
pub mod nfts;

pub mod server;

pub use config::Config;
pub use error::{Result, UndoError};
pub use symbol::{Address, KeyPair, NetworkParams};
