//! Helpers for Sui coin type identifiers (`<address>::<module>::<name>`).

/// Coin type of the chain's native coin.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Decimals assumed for the native coin when metadata is missing.
pub const NATIVE_FALLBACK_DECIMALS: u8 = 9;

/// Returns true when `coin_type` names the native SUI coin, in either the
/// short (`0x2`) or zero-padded address form.
pub fn is_native_coin(coin_type: &str) -> bool {
    let mut parts = coin_type.split("::");
    let (Some(address), Some(module), Some(name), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let address = address.strip_prefix("0x").unwrap_or(address);
    module == "sui" && name == "SUI" && address.trim_start_matches('0') == "2"
}

/// Readable token name derived from a coin type, e.g. `0x2::sui::SUI` -> `SUI`.
///
/// Identifiers with fewer than three segments are returned unchanged.
pub fn display_name(coin_type: &str) -> &str {
    let parts: Vec<&str> = coin_type.split("::").collect();
    if parts.len() >= 3 {
        parts[2]
    } else {
        coin_type
    }
}

/// Decimals used when a coin type's metadata cannot be resolved.
pub fn fallback_decimals(coin_type: &str) -> u8 {
    if is_native_coin(coin_type) {
        NATIVE_FALLBACK_DECIMALS
    } else {
        0
    }
}
