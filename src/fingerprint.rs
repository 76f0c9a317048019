// Content fingerprints for archive entries.
//
// A fingerprint is a 128-bit MD5 digest over an entry's decompressed byte
// stream, used purely as an equality proxy: two entries are "unchanged" iff
// their fingerprints are byte-equal. Each computation constructs its own
// hasher; there is no shared digest state anywhere in the crate.

use std::fmt;
use std::io::{self, Read};

use md5::{Digest, Md5};

const BUF_SIZE: usize = 64 * 1024; // 64 KiB

/// A 128-bit content digest. Equality is the only meaningful operation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint(")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

/// Computes the fingerprint of everything `reader` yields until EOF.
pub fn fingerprint_reader<R: Read>(reader: &mut R) -> io::Result<Fingerprint> {
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(Fingerprint(hasher.finalize().into()))
}

/// One-shot fingerprint of an in-memory slice.
pub fn fingerprint_bytes(data: &[u8]) -> Fingerprint {
    let mut hasher = Md5::new();
    hasher.update(data);
    Fingerprint(hasher.finalize().into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_content_equal_fingerprint() {
        assert_eq!(fingerprint_bytes(b"hello"), fingerprint_bytes(b"hello"));
    }

    #[test]
    fn different_content_different_fingerprint() {
        assert_ne!(fingerprint_bytes(b"hello"), fingerprint_bytes(b"hellO"));
    }

    #[test]
    fn reader_matches_one_shot() {
        let data = b"some longer content spanning a few words".as_slice();
        let mut cursor = io::Cursor::new(data);
        assert_eq!(
            fingerprint_reader(&mut cursor).unwrap(),
            fingerprint_bytes(data)
        );
    }

    #[test]
    fn reader_spanning_multiple_buffers() {
        let data: Vec<u8> = (0..=255u8).cycle().take(3 * BUF_SIZE + 17).collect();
        let mut cursor = io::Cursor::new(&data);
        assert_eq!(
            fingerprint_reader(&mut cursor).unwrap(),
            fingerprint_bytes(&data)
        );
    }

    #[test]
    fn empty_input_is_a_valid_fingerprint() {
        let mut cursor = io::Cursor::new(&b""[..]);
        assert_eq!(
            fingerprint_reader(&mut cursor).unwrap(),
            fingerprint_bytes(b"")
        );
    }
}
