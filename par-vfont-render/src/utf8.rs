//! Lenient UTF-8 decoding into code points.
//!
//! Sequences are recognised by their leading byte (`0xxxxxxx`, `110xxxxx`,
//! `1110xxxx`, `11110xxx`). A byte that starts no sequence, or a lead byte
//! whose sequence is truncated or has a non-continuation follow-up byte, is
//! skipped on its own and decoding resumes at the next byte. Nothing here
//! ever fails.

/// Iterator over the code points of a UTF-8 byte sequence.
#[derive(Debug, Clone)]
pub struct CodePoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> CodePoints<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Decode the sequence starting at `self.pos`, returning the code point
    /// and its encoded length.
    fn decode_at(&self) -> Option<(u32, usize)> {
        let rest = &self.bytes[self.pos..];
        let lead = *rest.first()?;

        let (len, initial) = if lead & 0x80 == 0 {
            return Some((lead as u32, 1));
        } else if lead & 0xE0 == 0xC0 {
            (2, (lead & 0x1F) as u32)
        } else if lead & 0xF0 == 0xE0 {
            (3, (lead & 0x0F) as u32)
        } else if lead & 0xF8 == 0xF0 {
            (4, (lead & 0x07) as u32)
        } else {
            return None;
        };

        let tail = rest.get(1..len)?;
        let mut codepoint = initial;
        for &byte in tail {
            if byte & 0xC0 != 0x80 {
                return None;
            }
            codepoint = (codepoint << 6) | (byte & 0x3F) as u32;
        }
        Some((codepoint, len))
    }
}

impl Iterator for CodePoints<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        while self.pos < self.bytes.len() {
            match self.decode_at() {
                Some((codepoint, len)) => {
                    self.pos += len;
                    return Some(codepoint);
                }
                None => self.pos += 1,
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.bytes.len() - self.pos))
    }
}

/// Decode `bytes` into code points, dropping malformed sequences.
pub fn code_points(bytes: &[u8]) -> CodePoints<'_> {
    CodePoints::new(bytes)
}
