/// A single key/value pair of an [`AbciEvent`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EventAttribute {
    pub key: String,
    pub value: String,
}

impl EventAttribute {
    pub fn key_str(&self) -> &str {
        &self.key
    }

    pub fn value_str(&self) -> &str {
        &self.value
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for EventAttribute {
    fn from((key, value): (K, V)) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Flat, string-only representation of an event, in the shape block
/// explorers and relayers index: an event kind plus ordered attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AbciEvent {
    pub kind: String,
    pub attributes: Vec<EventAttribute>,
}

impl AbciEvent {
    pub fn new(kind: impl Into<String>, attributes: Vec<EventAttribute>) -> Self {
        Self {
            kind: kind.into(),
            attributes,
        }
    }

    /// Value of the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}
