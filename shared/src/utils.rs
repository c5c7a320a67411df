//! # Shared Utility Functions
//!
//! Address formatting used by both the core and the web front end.
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0x52908400098527886e0f7030069857d2e4169ee7";
//! assert_eq!(format_address(address, 6, 4), "0x5290...9ee7");
//! ```

/// Show the first `prefix_len` and last `suffix_len` characters of an address.
///
/// Addresses too short to shorten meaningfully come back unchanged.
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x52908400098527886e0f7030069857d2e4169ee7";
/// assert_eq!(format_address(addr, 6, 4), "0x5290...9ee7");
/// assert_eq!(format_address("0xabc", 6, 4), "0xabc");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let len = address.len();
    if len <= prefix_len + suffix_len {
        return address.to_string();
    }

    match (address.get(..prefix_len), address.get(len - suffix_len..)) {
        (Some(prefix), Some(suffix)) => format!("{}...{}", prefix, suffix),
        _ => address.to_string(),
    }
}

/// `0x` plus four hex digits, an ellipsis, and the last four digits.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "0x52908400098527886E0F7030069857D2E4169EE7";
        assert_eq!(format_address(addr, 6, 4), "0x5290...9EE7");
        assert_eq!(format_address(addr, 4, 4), "0x52...9EE7");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("", 6, 4), "");
        assert_eq!(format_address("0x12345678", 6, 4), "0x12345678");
    }
}
