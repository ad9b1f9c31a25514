//! Account service and balance lookup

use crate::error::Result;
use crate::node_api::NodeClient;
use crate::symbol::{parse_id_hex, KeyPair, NetworkParams};
use crate::types::{AccountView, MosaicAmount};

fn view(key_pair: &KeyPair, params: &NetworkParams) -> AccountView {
    AccountView {
        private_key: key_pair.private_key_hex(),
        public_key: key_pair.public_key_hex(),
        address: key_pair.address(params.identifier).to_string(),
    }
}

/// Fresh key pair from the OS RNG
pub fn create_account(params: &NetworkParams) -> AccountView {
    view(&KeyPair::random(), params)
}

/// Re-derive the account behind a hex private key
pub fn restore_account(params: &NetworkParams, private_key_hex: &str) -> Result<AccountView> {
    let key_pair = KeyPair::from_private_key_hex(private_key_hex)?;
    Ok(view(&key_pair, params))
}

/// Amount of `mosaic_id` among `mosaics`, `0` when not held
pub fn mosaic_amount(mosaics: &[MosaicAmount], mosaic_id: u64) -> u64 {
    mosaics
        .iter()
        .find(|m| parse_id_hex(&m.id) == Some(mosaic_id))
        .and_then(|m| m.amount.parse().ok())
        .unwrap_or(0)
}

/// Native currency balance in micro units, as a decimal string
///
/// An address the node does not know has a zero balance.
pub async fn balance(node: &NodeClient, params: &NetworkParams, address: &str) -> Result<String> {
    let amount = match node.get_account(address).await? {
        Some(account) => mosaic_amount(&account.mosaics, params.currency_mosaic_id),
        None => 0,
    };
    Ok(amount.to_string())
}

/// Micro units rendered with two decimals (`1234567` -> `"1.23"`)
pub fn format_currency(micro: u64) -> String {
    let divisor = 10u64.pow(crate::constants::network::CURRENCY_DIVISIBILITY - 2);
    let cents = (micro + divisor / 2) / divisor;
    format!("{}.{:02}", cents / 100, cents % 100)
}
