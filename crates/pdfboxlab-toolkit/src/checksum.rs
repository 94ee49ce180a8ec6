//! SHA-512 verification of downloaded archives
//!
//! Apache publishes `.sha512` files in several shapes:
//!
//! ```text
//! 1c5a...e9                                   bare digest
//! 1c5a...e9  pdfbox-app-2.0.27.jar            sha512sum
//! pdfbox-app-2.0.27.jar: 1C5A 77D0 ...        gpg --print-md (may wrap lines)
//!                        ... E9
//! ```

use sha2::{Digest, Sha512};

/// Length of a SHA-512 digest in hex characters
pub const SHA512_HEX_LEN: usize = 128;

/// Computes the lowercase hex SHA-512 of `data`
pub fn sha512_hex(data: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Extracts the hex digest from a checksum resource
///
/// Returns the digest lowercased, or `None` if no 128-digit hex digest is present.
pub fn parse_checksum_resource(content: &str) -> Option<String> {
    let content = content.trim();

    // gpg --print-md: "<file>: XXXX XXXX ..." possibly spread over lines
    if let Some((_, rest)) = content.split_once(':') {
        let compact: String = rest.chars().filter(|c| !c.is_whitespace()).collect();
        if is_sha512_hex(&compact) {
            return Some(compact.to_ascii_lowercase());
        }
    }

    // bare digest or "<digest>  <file>"
    content
        .split_whitespace()
        .find(|token| is_sha512_hex(token))
        .map(str::to_ascii_lowercase)
}

/// Case-insensitive comparison of `data`'s digest against `expected`
pub fn verify_sha512(data: &[u8], expected: &str) -> bool {
    sha512_hex(data).eq_ignore_ascii_case(expected.trim())
}

fn is_sha512_hex(s: &str) -> bool {
    s.len() == SHA512_HEX_LEN && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    // sha512("abc")
    const ABC: &str = "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
                       2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f";

    #[test]
    fn test_sha512_known_vector() {
        assert_eq!(sha512_hex(b"abc"), ABC);
    }

    #[test]
    fn test_verify_is_case_insensitive() {
        assert!(verify_sha512(b"abc", ABC));
        assert!(verify_sha512(b"abc", &ABC.to_ascii_uppercase()));
        assert!(verify_sha512(b"abc", &format!("  {}\n", ABC)));
    }

    #[test]
    fn test_verify_detects_single_byte_change() {
        assert!(!verify_sha512(b"abd", ABC));
    }

    #[test]
    fn test_parse_bare_digest() {
        assert_eq!(parse_checksum_resource(&format!("{}\n", ABC)), Some(ABC.to_string()));
    }

    #[test]
    fn test_parse_sha512sum_format() {
        let content = format!("{}  pdfbox-app-2.0.27.jar\n", ABC.to_ascii_uppercase());
        assert_eq!(parse_checksum_resource(&content), Some(ABC.to_string()));
    }

    #[test]
    fn test_parse_gpg_print_md_format() {
        let upper = ABC.to_ascii_uppercase();
        let groups: Vec<String> = upper
            .as_bytes()
            .chunks(8)
            .map(|c| String::from_utf8(c.to_vec()).unwrap())
            .collect();
        let content = format!(
            "pdfbox-app-2.0.27.jar: {}\n                       {}\n",
            groups[..8].join(" "),
            groups[8..].join(" ")
        );

        assert_eq!(parse_checksum_resource(&content), Some(ABC.to_string()));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_checksum_resource(""), None);
        assert_eq!(parse_checksum_resource("<html>Not Found</html>"), None);
        assert_eq!(parse_checksum_resource(&ABC[..64]), None);
    }
}
