//! Raw secrets and stored hashes as distinct types.
//!
//! A [`RawSecret`] exists only on the issuance response path: it is
//! generated, hashed, serialized into the one-time response, and zeroized
//! on drop. It deliberately implements neither `Serialize` nor `Display`,
//! so it cannot leak into a persisted field or a log line by accident.
//! [`SecretHash`] is the only form that ever reaches storage.

use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Decode, Encode, Sqlite, Type};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A freshly generated credential secret, disclosed exactly once.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RawSecret(String);

impl RawSecret {
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    /// Borrow the secret material for hashing or the issuance response.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RawSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RawSecret(***)")
    }
}

/// Argon2 PHC-format hash of a credential secret. Opaque to callers;
/// only `CredentialHasher` interprets the contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretHash(String);

impl SecretHash {
    pub fn from_string(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Type<Sqlite> for SecretHash {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }
}

impl<'q> Encode<'q, Sqlite> for SecretHash {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<IsNull, BoxDynError> {
        <String as Encode<'q, Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

impl<'r> Decode<'r, Sqlite> for SecretHash {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let s = <String as Decode<'r, Sqlite>>::decode(value)?;
        Ok(Self(s))
    }
}
