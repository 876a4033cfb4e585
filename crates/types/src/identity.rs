use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a Roadledger identity string.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity must start with 'd'")]
    InvalidPrefix,
    #[error("identity must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("identity payload is not valid hexadecimal")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("identity payload must be exactly 32 bytes")]
    InvalidPayloadLength,
}

/// Number of raw bytes contained in an identity.
pub const IDENTITY_BYTES: usize = 32;
/// Expected string length of an encoded identity (prefix + 64 hex chars).
pub const IDENTITY_STRING_LENGTH: usize = 1 + IDENTITY_BYTES * 2;

/// Encode a 32-byte principal into the human readable Roadledger format.
///
/// The encoded identity always begins with the character `d` followed by
/// the hexadecimal representation of the raw bytes.
pub fn encode_identity(bytes: &[u8; IDENTITY_BYTES]) -> String {
    let mut encoded = String::with_capacity(IDENTITY_STRING_LENGTH);
    encoded.push('d');
    encoded.push_str(&hex::encode(bytes));
    encoded
}

/// Attempt to decode a human readable identity string into the raw bytes.
pub fn decode_identity(identity: &str) -> Result<[u8; IDENTITY_BYTES], IdentityError> {
    if !identity.starts_with('d') {
        return Err(IdentityError::InvalidPrefix);
    }

    if identity.len() != IDENTITY_STRING_LENGTH {
        return Err(IdentityError::InvalidLength {
            expected: IDENTITY_STRING_LENGTH,
            actual: identity.len(),
        });
    }

    let payload = &identity[1..];
    let decoded = hex::decode(payload)?;

    let bytes: [u8; IDENTITY_BYTES] = decoded
        .try_into()
        .map_err(|_| IdentityError::InvalidPayloadLength)?;

    Ok(bytes)
}

/// Check whether the provided string is a valid Roadledger identity.
pub fn is_valid_identity(identity: &str) -> bool {
    decode_identity(identity).is_ok()
}

/// Opaque principal used for authorization checks.
///
/// The registry never inspects the payload beyond equality comparison;
/// the hosting environment decides what the bytes mean (a public key, an
/// account address). Serialized as the prefixed hex string form in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(pub [u8; IDENTITY_BYTES]);

impl Identity {
    /// Create an identity from a raw byte array.
    pub fn new(bytes: [u8; IDENTITY_BYTES]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; IDENTITY_BYTES] {
        &self.0
    }

    /// The all-zero identity is reserved as the null principal and is
    /// rejected by admin management.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; IDENTITY_BYTES]
    }
}

impl From<[u8; IDENTITY_BYTES]> for Identity {
    fn from(value: [u8; IDENTITY_BYTES]) -> Self {
        Identity(value)
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        encode_identity(&value.0)
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        decode_identity(&value).map(Identity)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode_identity(&self.0))
    }
}
