use anyhow::{anyhow, Result};
use clap::Parser;

use crate::constants::{indexer, network, query};
use crate::symbol::{parse_hex32, parse_id_hex, Address, NetworkParams};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Network {
    Testnet,
    Mainnet,
}

impl Network {
    /// Built-in parameters; individual fields may still be overridden
    pub fn params(self) -> NetworkParams {
        match self {
            Network::Testnet => NetworkParams::testnet(),
            Network::Mainnet => NetworkParams::mainnet(),
        }
    }
}

impl std::str::FromStr for Network {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "testnet" | "test" => Ok(Network::Testnet),
            "mainnet" | "main" => Ok(Network::Mainnet),
            _ => Err(anyhow!("Invalid network '{s}'. Valid options: testnet, mainnet")),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Testnet => write!(f, "testnet"),
            Network::Mainnet => write!(f, "mainnet"),
        }
    }
}

/// UNDO - un-deletable posts on the Symbol blockchain
///
/// JSON API that signs posts, likes and NFT mints and reads the public feed
/// back from a Symbol node.
/// Configuration priority: CLI args > Environment variables > Defaults
#[derive(Parser, Debug)]
#[command(name = "undo-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "UNDO API server", long_about = None)]
pub struct CliArgs {
    /// Symbol network: testnet or mainnet
    #[arg(long, env = "SYMBOL_NETWORK", value_parser = clap::value_parser!(Network))]
    pub network: Option<Network>,

    /// Symbol node REST endpoint
    #[arg(long, env = "SYMBOL_NODE_URL")]
    pub node_url: Option<String>,

    /// Shared inbox address whose incoming transfers form the public feed
    #[arg(long, env = "UNDO_CHANNEL_ADDRESS")]
    pub channel_address: String,

    /// Override the network's generation hash seed (64 hex digits)
    #[arg(long, env = "SYMBOL_GENERATION_HASH")]
    pub generation_hash: Option<String>,

    /// Override the network's epoch adjustment in seconds
    #[arg(long, env = "SYMBOL_EPOCH_ADJUSTMENT")]
    pub epoch_adjustment: Option<u64>,

    /// Override the native currency mosaic id (hex)
    #[arg(long, env = "SYMBOL_CURRENCY_MOSAIC_ID")]
    pub currency_mosaic_id: Option<String>,

    /// Posts fetched for the feed (1-100)
    #[arg(long, env = "FEED_PAGE_SIZE")]
    pub feed_page_size: Option<u32>,

    /// Max fee attached to post transfers, in micro XYM
    #[arg(long, env = "POST_FEE")]
    pub post_fee: Option<u64>,

    /// Node/indexer request timeout in milliseconds (1000-60000)
    #[arg(long, env = "RPC_TIMEOUT_MS")]
    pub rpc_timeout_ms: Option<u64>,

    /// Alchemy API key for Polygon NFT lookups
    #[arg(long, env = "ALCHEMY_API_KEY")]
    pub alchemy_api_key: Option<String>,

    /// Alchemy base URL (Polygon mainnet)
    #[arg(long, env = "ALCHEMY_BASE_URL")]
    pub alchemy_base_url: Option<String>,

    /// HTTP listen port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub network_name: Network,
    pub network: NetworkParams,
    pub node_url: String,
    pub channel_address: Address,
    pub feed_page_size: u32,
    pub post_fee: u64,
    pub rpc_timeout_ms: u64,
    pub alchemy_api_key: String,
    pub alchemy_base_url: String,
    pub port: u16,
}

/// Validate that a value is within a given range (inclusive)
fn validate_in_range<T>(val: T, min: T, max: T, name: &str) -> Result<T>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if val < min || val > max {
        Err(anyhow!("{name} must be in range [{min}, {max}], got {val}"))
    } else {
        Ok(val)
    }
}

/// Load configuration from CLI args and environment variables
/// Priority: CLI args > Environment variables > Defaults
pub fn load() -> Result<Config> {
    from_args(CliArgs::parse())
}

pub fn from_args(args: CliArgs) -> Result<Config> {
    let network_name = args.network.unwrap_or(Network::Testnet);
    let mut network = network_name.params();

    if let Some(seed) = args.generation_hash {
        network.generation_hash = parse_hex32(&seed)
            .ok_or_else(|| anyhow!("SYMBOL_GENERATION_HASH must be 64 hex digits"))?;
    }
    if let Some(epoch) = args.epoch_adjustment {
        network.epoch_adjustment = epoch;
    }
    if let Some(id) = args.currency_mosaic_id {
        network.currency_mosaic_id = parse_id_hex(&id)
            .ok_or_else(|| anyhow!("SYMBOL_CURRENCY_MOSAIC_ID must be a hex mosaic id"))?;
    }

    let node_url = args
        .node_url
        .unwrap_or_else(|| network::DEFAULT_NODE_URL.to_string());
    validate_url(&node_url, "SYMBOL_NODE_URL")?;
    let node_url = node_url.trim_end_matches('/').to_string();

    let channel_address = Address::parse(&args.channel_address, network.identifier)
        .map_err(|e| anyhow!("UNDO_CHANNEL_ADDRESS: {e}"))?;

    let feed_page_size = validate_in_range(
        args.feed_page_size.unwrap_or(query::DEFAULT_FEED_PAGE_SIZE),
        1,
        query::MAX_PAGE_SIZE,
        "FEED_PAGE_SIZE",
    )?;

    let rpc_timeout_ms =
        validate_in_range(args.rpc_timeout_ms.unwrap_or(8000), 1000, 60000, "RPC_TIMEOUT_MS")?;

    let alchemy_base_url = args
        .alchemy_base_url
        .unwrap_or_else(|| indexer::DEFAULT_BASE_URL.to_string());
    validate_url(&alchemy_base_url, "ALCHEMY_BASE_URL")?;

    Ok(Config {
        network_name,
        network,
        node_url,
        channel_address,
        feed_page_size,
        post_fee: args.post_fee.unwrap_or(0),
        rpc_timeout_ms,
        alchemy_api_key: args
            .alchemy_api_key
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| indexer::DEMO_API_KEY.to_string()),
        alchemy_base_url: alchemy_base_url.trim_end_matches('/').to_string(),
        port: args.port.unwrap_or(3030),
    })
}

/// Validate URL format (basic check)
fn validate_url(url: &str, name: &str) -> Result<()> {
    if url.is_empty() {
        return Err(anyhow!("{name} cannot be empty"));
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(anyhow!("{name} must start with http:// or https://"))
    }
}

impl Config {
    pub fn log_summary(&self) {
        log::info!("UNDO configuration:");
        log::info!("  Network: {}", self.network_name);
        log::info!("  Node: {}", self.node_url);
        log::info!("  Channel: {}", self.channel_address);
        log::info!("  Feed page size: {}", self.feed_page_size);
        log::info!("  Request timeout: {}ms", self.rpc_timeout_ms);
        log::info!(
            "  Alchemy key: {}",
            if self.alchemy_api_key == indexer::DEMO_API_KEY {
                "demo"
            } else {
                "configured"
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::KeyPair;

    fn args(extra: &[&str]) -> CliArgs {
        let channel = KeyPair::random().address(0x98).to_string();
        let mut argv = vec!["undo-server", "--channel-address", channel.as_str()];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_network_parsing() {
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("MAINNET".parse::<Network>().unwrap(), Network::Mainnet);
        assert!("devnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let config = from_args(args(&[
            "--node-url",
            "http://localhost:3000/",
            "--epoch-adjustment",
            "42",
            "--feed-page-size",
            "100",
        ]))
        .unwrap();
        assert_eq!(config.node_url, "http://localhost:3000");
        assert_eq!(config.network.epoch_adjustment, 42);
        assert_eq!(config.feed_page_size, 100);
    }

    #[test]
    fn test_page_size_bounded() {
        assert!(from_args(args(&["--feed-page-size", "101"])).is_err());
        assert!(from_args(args(&["--feed-page-size", "0"])).is_err());
    }

    #[test]
    fn test_bad_url_rejected() {
        assert!(from_args(args(&["--node-url", "ftp://node"])).is_err());
    }

    #[test]
    fn test_channel_must_match_network() {
        let channel = KeyPair::random().address(0x98).to_string();
        let cli = CliArgs::try_parse_from([
            "undo-server",
            "--channel-address",
            channel.as_str(),
            "--network",
            "mainnet",
        ])
        .unwrap();
        assert!(from_args(cli).is_err());
    }
}
