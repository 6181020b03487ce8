//! # OBI Codec
//!
//! Oracle Binary Encoding as used by Band-style oracle scripts. Fields are
//! written in declaration order with no framing:
//!
//! - `u64`: 8 bytes, big-endian
//! - `string`: `u32` big-endian byte length, then UTF-8 bytes
//!
//! Only the two shapes the relay exchanges are modelled.

use super::errors::ObiError;

/// Sequential OBI encoder.
#[derive(Debug, Default)]
pub struct ObiWriter {
    buf: Vec<u8>,
}

impl ObiWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `u64`.
    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Append a length-prefixed string.
    pub fn write_string(&mut self, value: &str) -> Result<&mut Self, ObiError> {
        let len = u32::try_from(value.len()).map_err(|_| ObiError::TooLong(value.len()))?;
        self.buf.extend_from_slice(&len.to_be_bytes());
        self.buf.extend_from_slice(value.as_bytes());
        Ok(self)
    }

    /// Encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Sequential OBI decoder over a borrowed buffer.
#[derive(Debug)]
pub struct ObiReader<'a> {
    buf: &'a [u8],
}

impl<'a> ObiReader<'a> {
    /// Start reading `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], ObiError> {
        if self.buf.len() < needed {
            return Err(ObiError::UnexpectedEnd {
                needed,
                remaining: self.buf.len(),
            });
        }
        let (head, tail) = self.buf.split_at(needed);
        self.buf = tail;
        Ok(head)
    }

    /// Read a `u64`.
    pub fn read_u64(&mut self) -> Result<u64, ObiError> {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(self.take(8)?);
        Ok(u64::from_be_bytes(bytes))
    }

    /// Read a length-prefixed string.
    pub fn read_string(&mut self) -> Result<String, ObiError> {
        let mut len = [0u8; 4];
        len.copy_from_slice(self.take(4)?);
        let bytes = self.take(u32::from_be_bytes(len) as usize)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ObiError::InvalidUtf8)
    }

    /// Fail if any input is left.
    pub fn finish(self) -> Result<(), ObiError> {
        match self.buf.len() {
            0 => Ok(()),
            n => Err(ObiError::TrailingBytes(n)),
        }
    }
}

/// Input of the verification oracle script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleScriptCallData {
    /// Lower-case application name.
    pub application: String,
    /// Application-specific call data, usually a hex-encoded JSON document
    /// pointing at the public verification post.
    pub call_data: String,
}

impl OracleScriptCallData {
    /// OBI-encode.
    pub fn encode(&self) -> Result<Vec<u8>, ObiError> {
        let mut writer = ObiWriter::new();
        writer
            .write_string(&self.application)?
            .write_string(&self.call_data)?;
        Ok(writer.finish())
    }

    /// OBI-decode.
    pub fn decode(bytes: &[u8]) -> Result<Self, ObiError> {
        let mut reader = ObiReader::new(bytes);
        let decoded = Self {
            application: reader.read_string()?,
            call_data: reader.read_string()?,
        };
        reader.finish()?;
        Ok(decoded)
    }
}

/// Output of the verification oracle script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleScriptResult {
    /// Hex-encoded signature of `value` by the profile owner's account key.
    pub signature: String,
    /// Hex-encoded attested value found in the verification post.
    pub value: String,
    /// Username the oracle read the post from.
    pub username: String,
}

impl OracleScriptResult {
    /// OBI-encode.
    pub fn encode(&self) -> Result<Vec<u8>, ObiError> {
        let mut writer = ObiWriter::new();
        writer
            .write_string(&self.signature)?
            .write_string(&self.value)?
            .write_string(&self.username)?;
        Ok(writer.finish())
    }

    /// OBI-decode.
    pub fn decode(bytes: &[u8]) -> Result<Self, ObiError> {
        let mut reader = ObiReader::new(bytes);
        let decoded = Self {
            signature: reader.read_string()?,
            value: reader.read_string()?,
            username: reader.read_string()?,
        };
        reader.finish()?;
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_layout_is_length_prefixed_big_endian() {
        let encoded = OracleScriptCallData {
            application: "twitter".to_string(),
            call_data: "7b7d".to_string(),
        }
        .encode()
        .unwrap();

        let mut expected = vec![0, 0, 0, 7];
        expected.extend_from_slice(b"twitter");
        expected.extend_from_slice(&[0, 0, 0, 4]);
        expected.extend_from_slice(b"7b7d");
        assert_eq!(encoded, expected);
    }

    #[test]
    fn test_u64_layout() {
        let mut writer = ObiWriter::new();
        writer.write_u64(0x0102);
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(ObiReader::new(&bytes).read_u64().unwrap(), 0x0102);
    }

    #[test]
    fn test_result_decodes() {
        let result = OracleScriptResult {
            signature: "ab12".to_string(),
            value: "alice".to_string(),
            username: "Alice".to_string(),
        };
        assert_eq!(OracleScriptResult::decode(&result.encode().unwrap()).unwrap(), result);
    }

    #[test]
    fn test_truncated_input_is_rejected() {
        let bytes = [0, 0, 0, 9, b'a'];
        assert_eq!(
            OracleScriptCallData::decode(&bytes).unwrap_err(),
            ObiError::UnexpectedEnd {
                needed: 9,
                remaining: 1
            }
        );
    }

    #[test]
    fn test_trailing_bytes_are_rejected() {
        let mut bytes = OracleScriptCallData {
            application: "github".to_string(),
            call_data: String::new(),
        }
        .encode()
        .unwrap();
        bytes.push(0);
        assert_eq!(
            OracleScriptCallData::decode(&bytes).unwrap_err(),
            ObiError::TrailingBytes(1)
        );
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let bytes = [0, 0, 0, 1, 0xff];
        let mut reader = ObiReader::new(&bytes);
        assert_eq!(reader.read_string().unwrap_err(), ObiError::InvalidUtf8);
    }
}
