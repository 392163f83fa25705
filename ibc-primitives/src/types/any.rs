use borsh::{BorshDeserialize, BorshSerialize};

use crate::{DecodingError, ToVec};

/// A type-tagged opaque payload.
///
/// Light-client specific values (client states, consensus states, headers,
/// misbehaviour evidence) travel through the protocol layer in this form and
/// are only interpreted by the client implementation registered for the
/// matching `type_url`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub struct Any {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl Any {
    pub fn new<T: BorshSerialize>(type_url: impl Into<String>, value: &T) -> Self {
        Self {
            type_url: type_url.into(),
            value: value.to_vec(),
        }
    }

    /// Decodes the payload into `T`, provided the type URL matches.
    pub fn decode<T: BorshDeserialize>(&self, expected_type_url: &str) -> Result<T, DecodingError> {
        if self.type_url != expected_type_url {
            return Err(DecodingError::MismatchedTypeUrls {
                expected: expected_type_url.to_string(),
                actual: self.type_url.clone(),
            });
        }

        T::try_from_slice(&self.value).map_err(|e| DecodingError::FailedToDecode {
            description: e.to_string(),
        })
    }
}
