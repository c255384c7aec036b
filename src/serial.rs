//! Random certificate serial numbers.
//!
//! RFC 5280 section 4.1.2.2 requires serial numbers to be positive. The
//! INTEGER encoding is two's complement, so a serial whose most significant
//! bit is set reads as negative and has to be adjusted before use.

use rand_core::{OsRng, RngCore};
use tracing::debug;

use crate::error::{Result, SelfCertError};

/// Number of random bytes drawn for each serial number.
pub const SERIAL_NUMBER_ENTROPY_BYTES: usize = 9;

/// Draws a fresh serial number and renders it as positive lowercase hex.
pub fn random_serial_hex() -> Result<String> {
    let mut bytes = [0u8; SERIAL_NUMBER_ENTROPY_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| SelfCertError::KeyGenerationError(e.to_string()))?;
    let serial = to_positive_hex(&hex::encode(bytes));
    debug!(serial = %serial, "selected certificate serial number");
    Ok(serial)
}

/// Clears the sign of a hex serial by subtracting 8 from its leading digit.
///
/// Only the first hex digit is touched. Digits `0`-`7` are returned unchanged.
pub fn to_positive_hex(hex_string: &str) -> String {
    let mut chars = hex_string.chars();
    let Some(leading) = chars.next().and_then(|c| c.to_digit(16)) else {
        return hex_string.to_string();
    };
    if leading < 8 {
        return hex_string.to_string();
    }
    format!("{}{}", leading - 8, chars.as_str())
}

/// Converts a serial hex string into the content octets of a DER INTEGER.
///
/// Leading zero octets are dropped as long as the next octet keeps the sign
/// bit clear, which keeps the encoding minimal.
pub fn serial_to_der_bytes(hex_string: &str) -> Result<Vec<u8>> {
    let padded;
    let even = if hex_string.len() % 2 == 1 {
        padded = format!("0{hex_string}");
        padded.as_str()
    } else {
        hex_string
    };
    let bytes = hex::decode(even).map_err(|e| SelfCertError::EncodingError(e.to_string()))?;
    let start = bytes
        .windows(2)
        .take_while(|pair| pair[0] == 0 && pair[1] < 0x80)
        .count();
    match bytes.get(start..) {
        Some(rest) if !rest.is_empty() => Ok(rest.to_vec()),
        _ => Err(SelfCertError::EncodingError(
            "Serial number is empty".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_hex_is_left_alone() {
        assert_eq!(to_positive_hex("7fffffffffffffffff"), "7fffffffffffffffff");
        assert_eq!(to_positive_hex("00ab"), "00ab");
    }

    #[test]
    fn test_negative_hex_has_leading_digit_reduced_by_eight() {
        assert_eq!(to_positive_hex("8000"), "0000");
        assert_eq!(to_positive_hex("f0a1"), "70a1");
        assert_eq!(to_positive_hex("c3"), "43");
        assert_eq!(to_positive_hex("Ab"), "2b");
    }

    #[test]
    fn test_random_serials_are_positive() {
        for _ in 0..256 {
            let serial = random_serial_hex().unwrap();
            assert_eq!(serial.len(), SERIAL_NUMBER_ENTROPY_BYTES * 2);
            let leading = serial.chars().next().unwrap().to_digit(16).unwrap();
            assert!(leading < 8, "serial {serial} would be negative");
        }
    }

    #[test]
    fn test_der_bytes_are_minimal() {
        assert_eq!(serial_to_der_bytes("0042").unwrap(), vec![0x42]);
        assert_eq!(serial_to_der_bytes("000000").unwrap(), vec![0x00]);
        assert_eq!(serial_to_der_bytes("7f01").unwrap(), vec![0x7f, 0x01]);
        assert_eq!(serial_to_der_bytes("00ff").unwrap(), vec![0x00, 0xff]);
        assert_eq!(serial_to_der_bytes("abc").unwrap(), vec![0x0a, 0xbc]);
        assert!(serial_to_der_bytes("").is_err());
        assert!(serial_to_der_bytes("zz").is_err());
    }
}
