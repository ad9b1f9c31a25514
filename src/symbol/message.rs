//! Transfer message encoding
//!
//! Messages carry a one-byte type prefix; UNDO only writes and reads plain
//! text (type 0).

use crate::constants::undo::{LIKE_PREFIX, PLAIN_MESSAGE};

pub fn encode_plain(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() + 1);
    bytes.push(PLAIN_MESSAGE);
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Decode raw message bytes; anything but valid plain text yields `None`
pub fn decode_plain(bytes: &[u8]) -> Option<String> {
    match bytes.split_first() {
        Some((&PLAIN_MESSAGE, rest)) => String::from_utf8(rest.to_vec()).ok(),
        _ => None,
    }
}

/// Decode a message as the node reports it (hex)
///
/// Non-plain types, bad hex and invalid UTF-8 all collapse to an empty string.
pub fn decode_message_hex(message_hex: &str) -> String {
    hex::decode(message_hex.trim())
        .ok()
        .and_then(|bytes| decode_plain(&bytes))
        .unwrap_or_default()
}

pub fn like_message(post_hash: &str) -> String {
    format!("{LIKE_PREFIX}{post_hash}")
}

/// Post hash referenced by a `LIKE:<hash>` message
pub fn parse_like(message: &str) -> Option<&str> {
    message
        .strip_prefix(LIKE_PREFIX)
        .filter(|hash| !hash.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_round_trip() {
        for text in ["hello", "消せない投稿", ""] {
            let encoded = encode_plain(text);
            assert_eq!(encoded[0], 0);
            assert_eq!(decode_message_hex(&hex::encode_upper(&encoded)), text);
        }
    }

    #[test]
    fn test_non_plain_type_is_empty() {
        let mut encoded = encode_plain("secret");
        encoded[0] = 1;
        assert_eq!(decode_message_hex(&hex::encode(&encoded)), "");
        assert_eq!(decode_plain(&encoded), None);
    }

    #[test]
    fn test_garbage_is_empty() {
        assert_eq!(decode_message_hex(""), "");
        assert_eq!(decode_message_hex("0"), "");
        assert_eq!(decode_message_hex("zz"), "");
        // type 0 followed by an invalid UTF-8 byte
        assert_eq!(decode_message_hex("00FF"), "");
    }

    #[test]
    fn test_like_parsing() {
        let msg = like_message("ABC123");
        assert_eq!(msg, "LIKE:ABC123");
        assert_eq!(parse_like(&msg), Some("ABC123"));
        assert_eq!(parse_like("LIKE:"), None);
        assert_eq!(parse_like("UNDO:LIKE"), None);
        assert_eq!(parse_like("hello"), None);
    }
}
