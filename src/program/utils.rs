//! Serialization and validation helpers for the metadata program.
//!
//! The metadata program expects Borsh-encoded instruction data. Only a
//! handful of shapes are needed (length-prefixed strings, options, the
//! creator vector), so they are written out by hand instead of pulling in a
//! serialization framework for two instructions.

use solana_pubkey::Pubkey;

use crate::error::{SdkError, SdkResult};
use crate::program::constants::{
    MAX_CREATOR_LIMIT, MAX_NAME_LENGTH, MAX_SYMBOL_LENGTH, MAX_URI_LENGTH,
};
use crate::program::types::{Collection, Creator, MetadataDescriptor, Uses};

// ============================================================================
// Writers (Borsh wire format)
// ============================================================================

/// Append a string with a u32 length prefix.
///
/// Format: [length (4 bytes LE)][utf-8 bytes]
pub fn put_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Append an option tag byte, then the payload when present.
pub fn put_option<T: ?Sized>(buf: &mut Vec<u8>, value: Option<&T>, put: impl FnOnce(&mut Vec<u8>, &T)) {
    match value {
        Some(inner) => {
            buf.push(1);
            put(buf, inner);
        }
        None => buf.push(0),
    }
}

/// Append a creator entry: address (32), verified (1), share (1).
pub fn put_creator(buf: &mut Vec<u8>, creator: &Creator) {
    buf.extend_from_slice(creator.address.as_ref());
    buf.push(creator.verified as u8);
    buf.push(creator.share);
}

/// Append a creator vector with a u32 length prefix.
pub fn put_creators(buf: &mut Vec<u8>, creators: &[Creator]) {
    buf.extend_from_slice(&(creators.len() as u32).to_le_bytes());
    for creator in creators {
        put_creator(buf, creator);
    }
}

/// Append a collection reference: verified (1), key (32).
pub fn put_collection(buf: &mut Vec<u8>, collection: &Collection) {
    buf.push(collection.verified as u8);
    buf.extend_from_slice(collection.key.as_ref());
}

/// Append a uses descriptor: use_method (1), remaining (8), total (8).
pub fn put_uses(buf: &mut Vec<u8>, uses: &Uses) {
    buf.push(uses.use_method);
    buf.extend_from_slice(&uses.remaining.to_le_bytes());
    buf.extend_from_slice(&uses.total.to_le_bytes());
}

// ============================================================================
// Readers
// ============================================================================

/// Cursor over raw account data for prefix decoding.
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    fn take(&mut self, len: usize) -> SdkResult<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or(SdkError::Overflow)?;
        if end > self.data.len() {
            return Err(SdkError::InvalidDataLength {
                expected: end,
                actual: self.data.len(),
            });
        }
        let slice = &self.data[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> SdkResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_bool(&mut self) -> SdkResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u16(&mut self) -> SdkResult<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> SdkResult<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_u64(&mut self) -> SdkResult<u64> {
        let bytes = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(arr))
    }

    pub fn read_pubkey(&mut self) -> SdkResult<Pubkey> {
        let bytes = self.take(32)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(bytes);
        Ok(Pubkey::from(arr))
    }

    /// Read a u32-length-prefixed string, trimming the trailing NUL padding
    /// the metadata program stores strings with.
    pub fn read_string(&mut self) -> SdkResult<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        let s = String::from_utf8(bytes.to_vec())
            .map_err(|e| SdkError::Serialization(e.to_string()))?;
        Ok(s.trim_end_matches('\0').to_string())
    }

    pub fn read_option<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> SdkResult<T>,
    ) -> SdkResult<Option<T>> {
        match self.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(read(self)?)),
            tag => Err(SdkError::Serialization(format!(
                "invalid option tag: {tag}"
            ))),
        }
    }

    pub fn read_creators(&mut self) -> SdkResult<Vec<Creator>> {
        let len = self.read_u32()? as usize;
        if len > MAX_CREATOR_LIMIT {
            return Err(SdkError::Serialization(format!(
                "creator count {len} exceeds limit {MAX_CREATOR_LIMIT}"
            )));
        }
        let mut creators = Vec::with_capacity(len);
        for _ in 0..len {
            let address = self.read_pubkey()?;
            let verified = self.read_bool()?;
            let share = self.read_u8()?;
            creators.push(Creator {
                address,
                verified,
                share,
            });
        }
        Ok(creators)
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Validate descriptor fields against the metadata program's limits before
/// submitting, so oversized fields fail locally with a clear message.
pub fn validate_descriptor(descriptor: &MetadataDescriptor) -> SdkResult<()> {
    validate_metadata_fields(
        Some(&descriptor.name),
        Some(&descriptor.symbol),
        Some(&descriptor.uri),
    )?;

    if let Some(creators) = &descriptor.creators {
        if creators.is_empty() || creators.len() > MAX_CREATOR_LIMIT {
            return Err(SdkError::InvalidMetadata(format!(
                "creator count must be 1-{MAX_CREATOR_LIMIT}, got {}",
                creators.len()
            )));
        }
        let total: u32 = creators.iter().map(|c| c.share as u32).sum();
        if total != 100 {
            return Err(SdkError::InvalidMetadata(format!(
                "creator shares must sum to 100, got {total}"
            )));
        }
    }

    Ok(())
}

/// Validate individual field lengths; `None` fields are skipped.
pub fn validate_metadata_fields(
    name: Option<&str>,
    symbol: Option<&str>,
    uri: Option<&str>,
) -> SdkResult<()> {
    if let Some(name) = name {
        if name.len() > MAX_NAME_LENGTH {
            return Err(SdkError::InvalidMetadata(format!(
                "name exceeds {MAX_NAME_LENGTH} bytes"
            )));
        }
    }
    if let Some(symbol) = symbol {
        if symbol.len() > MAX_SYMBOL_LENGTH {
            return Err(SdkError::InvalidMetadata(format!(
                "symbol exceeds {MAX_SYMBOL_LENGTH} bytes"
            )));
        }
    }
    if let Some(uri) = uri {
        if uri.len() > MAX_URI_LENGTH {
            return Err(SdkError::InvalidMetadata(format!(
                "uri exceeds {MAX_URI_LENGTH} bytes"
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Checked Arithmetic
// ============================================================================

/// Add two u64 values and check for overflow.
pub fn checked_add_u64(a: u64, b: u64) -> SdkResult<u64> {
    a.checked_add(b).ok_or(SdkError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_roundtrip() {
        let mut buf = Vec::new();
        put_string(&mut buf, "hello");
        assert_eq!(&buf[0..4], &5u32.to_le_bytes());

        let mut reader = Reader::new(&buf);
        assert_eq!(reader.read_string().unwrap(), "hello");
    }

    #[test]
    fn test_string_nul_padding_trimmed() {
        let mut buf = Vec::new();
        put_string(&mut buf, "YTN\0\0\0\0");

        let mut reader = Reader::new(&buf);
        assert_eq!(reader.read_string().unwrap(), "YTN");
    }

    #[test]
    fn test_option_encoding() {
        let mut buf = Vec::new();
        put_option(&mut buf, None::<&u8>, |b, v| b.push(*v));
        put_option(&mut buf, Some(&7u8), |b, v| b.push(*v));
        assert_eq!(buf, vec![0, 1, 7]);

        let mut reader = Reader::new(&buf);
        assert_eq!(reader.read_option(|r| r.read_u8()).unwrap(), None);
        assert_eq!(reader.read_option(|r| r.read_u8()).unwrap(), Some(7));
    }

    #[test]
    fn test_creators_roundtrip() {
        let creators = Creator::sole(Pubkey::new_unique());
        let mut buf = Vec::new();
        put_creators(&mut buf, &creators);
        // u32 length + 34 bytes per creator
        assert_eq!(buf.len(), 4 + 34);

        let mut reader = Reader::new(&buf);
        assert_eq!(reader.read_creators().unwrap(), creators);
    }

    #[test]
    fn test_truncated_data_fails() {
        let mut buf = Vec::new();
        put_string(&mut buf, "hello");
        buf.truncate(6);

        let mut reader = Reader::new(&buf);
        assert!(matches!(
            reader.read_string(),
            Err(SdkError::InvalidDataLength { .. })
        ));
    }

    #[test]
    fn test_invalid_option_tag_fails() {
        let mut reader = Reader::new(&[9]);
        assert!(matches!(
            reader.read_option(|r| r.read_u8()),
            Err(SdkError::Serialization(_))
        ));
    }

    #[test]
    fn test_descriptor_validation_limits() {
        let ok = MetadataDescriptor::new("Your Token Name", "YTN", "https://x.test/m.json");
        assert!(validate_descriptor(&ok).is_ok());

        let long_name = MetadataDescriptor::new("n".repeat(33), "YTN", "u");
        assert!(validate_descriptor(&long_name).is_err());

        let long_symbol = MetadataDescriptor::new("n", "s".repeat(11), "u");
        assert!(validate_descriptor(&long_symbol).is_err());

        let long_uri = MetadataDescriptor::new("n", "s", "u".repeat(201));
        assert!(validate_descriptor(&long_uri).is_err());
    }

    #[test]
    fn test_creator_shares_must_sum_to_100() {
        let mut descriptor = MetadataDescriptor::new("n", "s", "u");
        descriptor.creators = Some(vec![Creator {
            address: Pubkey::new_unique(),
            verified: false,
            share: 60,
        }]);
        assert!(matches!(
            validate_descriptor(&descriptor),
            Err(SdkError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(checked_add_u64(2, 3).unwrap(), 5);
        assert!(checked_add_u64(u64::MAX, 1).is_err());
    }
}
