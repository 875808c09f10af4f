/// Format bytes as a hex string
pub fn format_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Format bytes as a hex string with spaces
pub fn format_hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_functions() {
        let bytes = vec![0x3B, 0x8F, 0x80, 0x01];
        assert_eq!(format_hex(&bytes), "3B8F8001");
        assert_eq!(format_hex_spaced(&bytes), "3B 8F 80 01");

        // Test empty bytes
        assert_eq!(format_hex(&[]), "");
        assert_eq!(format_hex_spaced(&[]), "");

        // Test single byte
        assert_eq!(format_hex(&[0xFF]), "FF");
        assert_eq!(format_hex_spaced(&[0xFF]), "FF");
    }

    #[test]
    fn test_format_lowercase_input_is_uppercased() {
        let bytes = vec![0x0a, 0xbc, 0xde];
        assert_eq!(format_hex(&bytes), "0ABCDE");
        assert_eq!(format_hex_spaced(&bytes), "0A BC DE");
    }

    #[test]
    fn test_format_long_atr() {
        let atr = vec![
            0x3B, 0xAC, 0x00, 0x40, 0x2A, 0x00, 0x12, 0x25, 0x00, 0x64, 0x80, 0x00, 0x03, 0x10,
            0x00, 0x90, 0x00,
        ];
        let spaced = format_hex_spaced(&atr);
        assert_eq!(spaced.split(' ').count(), atr.len());
        assert!(spaced.starts_with("3B AC 00 40"));
        assert!(spaced.ends_with("90 00"));
    }
}
