//! Hexadecimal dump helper for logging binary payloads
//!
//! Produces a deterministic multi-line hex+ASCII rendering of a byte
//! sequence, independent of platform byte order. The result is meant to be
//! passed as a log message.

const BYTES_PER_LINE: usize = 16;

/// Render `bytes` as a hex+ASCII dump.
///
/// Each line carries a four-digit offset, sixteen lowercase two-digit hex
/// bytes and a printable-ASCII column (`.` for non-printable bytes). The
/// last line is padded so the ASCII column stays aligned. Empty input
/// yields an empty string.
///
/// # Examples
///
/// ```
/// let dump = multilog::to_hex([0x40u8, 0x41, 0x42]);
/// assert_eq!(dump, "0000: 40 41 42                                         @AB");
/// ```
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    let bytes = bytes.as_ref();
    let mut out = String::with_capacity(bytes.len() * 4);

    for (line_index, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        if line_index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{:04x}:", line_index * BYTES_PER_LINE));
        for byte in chunk {
            out.push_str(&format!(" {:02x}", byte));
        }
        // Pad short final lines so the ASCII column lines up
        for _ in chunk.len()..BYTES_PER_LINE {
            out.push_str("   ");
        }
        out.push_str("  ");
        for byte in chunk {
            if (0x20..=0x7e).contains(byte) {
                out.push(*byte as char);
            } else {
                out.push('.');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(to_hex([]), "");
    }

    #[test]
    fn test_full_line() {
        let bytes: Vec<u8> = (0x40..0x50).collect();
        assert_eq!(
            to_hex(&bytes),
            "0000: 40 41 42 43 44 45 46 47 48 49 4a 4b 4c 4d 4e 4f  @ABCDEFGHIJKLMNO"
        );
    }

    #[test]
    fn test_non_printable_column() {
        let bytes: Vec<u8> = (0x00..0x10).collect();
        assert_eq!(
            to_hex(&bytes),
            "0000: 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f  ................"
        );
    }

    #[test]
    fn test_eighty_byte_buffer() {
        // The canonical 80-byte buffer: values 0x00..0x4f
        let buf: Vec<u8> = (0u8..80).map(|i| i & 0xff).collect();
        let dump = to_hex(&buf);

        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("0000:"));
        assert!(lines[4].starts_with("0040:"));
        assert_eq!(
            lines[4],
            "0040: 40 41 42 43 44 45 46 47 48 49 4a 4b 4c 4d 4e 4f  @ABCDEFGHIJKLMNO"
        );
    }

    #[test]
    fn test_idempotent() {
        let buf: Vec<u8> = (0u8..80).collect();
        assert_eq!(to_hex(&buf), to_hex(&buf));
    }

    #[test]
    fn test_partial_line_padding() {
        let dump = to_hex([0x41u8, 0x00]);
        assert_eq!(
            dump,
            "0000: 41 00                                            A."
        );
    }

    #[test]
    fn test_line_offsets_advance() {
        let dump = to_hex(vec![0u8; 40]);
        let lines: Vec<&str> = dump.lines().map(|l| &l[..5]).collect();
        assert_eq!(lines, ["0000:", "0010:", "0020:"]);
    }
}
