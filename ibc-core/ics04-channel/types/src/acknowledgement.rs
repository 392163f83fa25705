//! Defines acknowledgment types used by various IBC messages and applications.

use core::fmt::{Display, Error as FmtError, Formatter};

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use derive_more::Into;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::PacketError;

/// The acknowledgement bytes as they are committed on the receiving chain.
///
/// Modules may interpret them as they like. An acknowledgement cannot be
/// empty.
#[derive(Clone, Debug, PartialEq, Eq, Into, borsh::BorshSerialize, borsh::BorshDeserialize)]
pub struct Acknowledgement(Vec<u8>);

impl Acknowledgement {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl AsRef<[u8]> for Acknowledgement {
    fn as_ref(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl TryFrom<Vec<u8>> for Acknowledgement {
    type Error = PacketError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            Err(PacketError::EmptyAcknowledgement)
        } else {
            Ok(Self(bytes))
        }
    }
}

/// Outcome of processing a received packet, as reported by the receiving
/// application.
///
/// Encodes to the JSON envelope `{"result":"<base64>"}` or
/// `{"error":"<message>"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcknowledgementStatus {
    /// Successful Acknowledgement, e.g. `{"result":"AQ=="}`
    #[serde(rename = "result", with = "Base64")]
    Success(Vec<u8>),
    /// Error Acknowledgement, e.g. `{"error":"cannot decode packet data"}`
    Error(String),
}

impl AcknowledgementStatus {
    /// Creates a success acknowledgement status with a non-empty result.
    pub fn success(result: impl Into<Vec<u8>>) -> Result<Self, PacketError> {
        let status = Self::Success(result.into());
        status.validate_basic()?;
        Ok(status)
    }

    /// Creates an error acknowledgement status with a non-empty message.
    pub fn error(message: impl ToString) -> Result<Self, PacketError> {
        let status = Self::Error(message.to_string());
        status.validate_basic()?;
        Ok(status)
    }

    /// Returns true if the acknowledgement status is successful.
    pub fn is_successful(&self) -> bool {
        matches!(self, AcknowledgementStatus::Success(_))
    }

    pub fn validate_basic(&self) -> Result<(), PacketError> {
        let empty = match self {
            Self::Success(result) => result.is_empty(),
            Self::Error(message) => message.is_empty(),
        };

        if empty {
            return Err(PacketError::EmptyAcknowledgementStatus);
        }

        Ok(())
    }
}

impl Display for AcknowledgementStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            Self::Success(result) => write!(f, "result: {}", BASE64_STANDARD.encode(result)),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}

impl TryFrom<AcknowledgementStatus> for Acknowledgement {
    type Error = PacketError;

    fn try_from(status: AcknowledgementStatus) -> Result<Self, Self::Error> {
        status.validate_basic()?;

        let bytes = serde_json::to_vec(&status).map_err(|e| PacketError::InvalidAcknowledgement {
            description: e.to_string(),
        })?;

        Self::try_from(bytes)
    }
}

impl TryFrom<&Acknowledgement> for AcknowledgementStatus {
    type Error = PacketError;

    fn try_from(ack: &Acknowledgement) -> Result<Self, PacketError> {
        let status: Self =
            serde_json::from_slice(ack.as_bytes()).map_err(|e| PacketError::InvalidAcknowledgement {
                description: e.to_string(),
            })?;

        status.validate_basic()?;

        Ok(status)
    }
}

struct Base64;

impl Base64 {
    fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        String::serialize(&BASE64_STANDARD.encode(bytes), serializer)
    }

    fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;

        BASE64_STANDARD
            .decode(encoded.as_bytes())
            .map_err(D::Error::custom)
    }
}
