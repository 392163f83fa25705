use derive_more::Display;

/// Represents the address of the signer of the current transaction
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    borsh::BorshSerialize,
    borsh::BorshDeserialize,
)]
pub struct Signer(String);

impl Signer {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn new_empty() -> Self {
        Self::new(String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for Signer {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Signer {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Signer {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
