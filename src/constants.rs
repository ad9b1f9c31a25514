//! Application constants
//!
//! Centralized Symbol network constants, transaction type codes, fees and
//! other magic numbers used throughout the service. Values that differ per
//! deployment have a config override (see [`crate::config`]).

/// Symbol network parameters (testnet is the default)
pub mod network {
    /// Public testnet node used when no node URL is configured
    pub const DEFAULT_NODE_URL: &str = "https://sym-test-01.opening-line.jp:3001";

    /// Address prefix byte for testnet
    pub const TESTNET_IDENTIFIER: u8 = 0x98;

    /// Generation hash seed of the public testnet
    /// (`49D6E1CE276A85B70EAFE52349AACCA389302E7A9754BCF1221E79494FC665A4`)
    #[rustfmt::skip]
    pub const TESTNET_GENERATION_HASH: [u8; 32] = [
        0x49, 0xD6, 0xE1, 0xCE, 0x27, 0x6A, 0x85, 0xB7,
        0x0E, 0xAF, 0xE5, 0x23, 0x49, 0xAA, 0xCC, 0xA3,
        0x89, 0x30, 0x2E, 0x7A, 0x97, 0x54, 0xBC, 0xF1,
        0x22, 0x1E, 0x79, 0x49, 0x4F, 0xC6, 0x65, 0xA4,
    ];

    /// Seconds between the Unix epoch and the network's nemesis block
    ///
    /// Node timestamps and transaction deadlines are expressed relative to
    /// this instant.
    pub const TESTNET_EPOCH_ADJUSTMENT: u64 = 1_667_250_467;

    /// Native currency (XYM) mosaic id on testnet
    pub const TESTNET_CURRENCY_MOSAIC_ID: u64 = 0x72C0_212E_67A0_8BCE;

    pub const MAINNET_IDENTIFIER: u8 = 0x68;

    /// `57F7DA205008026C776CB6AED843393F04CD458E0AA2D9F1D5F31A402072B2D6`
    #[rustfmt::skip]
    pub const MAINNET_GENERATION_HASH: [u8; 32] = [
        0x57, 0xF7, 0xDA, 0x20, 0x50, 0x08, 0x02, 0x6C,
        0x77, 0x6C, 0xB6, 0xAE, 0xD8, 0x43, 0x39, 0x3F,
        0x04, 0xCD, 0x45, 0x8E, 0x0A, 0xA2, 0xD9, 0xF1,
        0xD5, 0xF3, 0x1A, 0x40, 0x20, 0x72, 0xB2, 0xD6,
    ];

    pub const MAINNET_EPOCH_ADJUSTMENT: u64 = 1_615_853_185;

    pub const MAINNET_CURRENCY_MOSAIC_ID: u64 = 0x6BED_913F_A202_23F8;

    /// Divisibility of the native currency
    pub const CURRENCY_DIVISIBILITY: u32 = 6;
}

/// Transaction type codes and versions
pub mod tx {
    pub const TRANSFER: u16 = 0x4154;
    pub const TRANSFER_VERSION: u8 = 1;

    pub const AGGREGATE_COMPLETE: u16 = 0x4141;
    pub const AGGREGATE_COMPLETE_VERSION: u8 = 2;

    pub const MOSAIC_DEFINITION: u16 = 0x414D;
    pub const MOSAIC_DEFINITION_VERSION: u8 = 1;

    pub const MOSAIC_SUPPLY_CHANGE: u16 = 0x424D;
    pub const MOSAIC_SUPPLY_CHANGE_VERSION: u8 = 1;

    pub const MOSAIC_METADATA: u16 = 0x4244;
    pub const MOSAIC_METADATA_VERSION: u8 = 1;

    /// Largest transfer message a node accepts, type byte included
    pub const MAX_MESSAGE_SIZE: usize = 1024;

    /// Largest metadata value a node accepts
    pub const MAX_METADATA_VALUE_SIZE: usize = 1024;

    /// Validity window added to "now" when computing deadlines (seconds)
    pub const DEADLINE_WINDOW_SECS: u64 = 2 * 60 * 60;
}

/// UNDO product constants
pub mod undo {
    /// Plain-text message type byte
    pub const PLAIN_MESSAGE: u8 = 0;

    /// Prefix of like messages (`LIKE:<postHash>`)
    pub const LIKE_PREFIX: &str = "LIKE:";

    /// Like stake: 0.1 XYM in micro units
    pub const LIKE_AMOUNT: u64 = 100_000;

    /// Human-readable like stake returned to clients
    pub const LIKE_AMOUNT_DISPLAY: &str = "0.1";

    /// Max fee attached to like transfers (1 XYM)
    pub const LIKE_FEE: u64 = 1_000_000;

    /// Max fee attached to NFT mint aggregates (2 XYM, aggregates are larger)
    pub const NFT_MINT_FEE: u64 = 2_000_000;

    /// Scoped metadata key holding NFT info ("NFT" as big-endian ASCII)
    pub const NFT_METADATA_KEY: u64 = 0x4E_46_54;

    /// Metadata type code for mosaic metadata in node queries
    pub const MOSAIC_METADATA_TYPE: u8 = 1;
}

/// Node query limits
pub mod query {
    /// Default page size of the channel feed
    pub const DEFAULT_FEED_PAGE_SIZE: u32 = 50;

    /// Largest page the node accepts
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Page size used for per-author like scans and profiles
    pub const LIKE_SCAN_PAGE_SIZE: u32 = 100;

    /// Metadata entries fetched per mosaic
    pub const METADATA_PAGE_SIZE: u32 = 10;
}

/// Third-party NFT indexer (Alchemy, Polygon mainnet)
pub mod indexer {
    pub const DEFAULT_BASE_URL: &str = "https://polygon-mainnet.g.alchemy.com";

    /// Key used when none is configured; the indexer answers 401 for most calls
    pub const DEMO_API_KEY: &str = "demo";

    /// Page size requested from the indexer
    pub const PAGE_SIZE: u32 = 50;

    /// Maximum NFTs returned to clients
    pub const MAX_RESULTS: usize = 20;

    pub const CHAIN_NAME: &str = "polygon";

    pub const MISSING_KEY_MESSAGE: &str =
        "Alchemy API key required. Set ALCHEMY_API_KEY in the environment";
}
