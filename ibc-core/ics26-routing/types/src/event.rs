use ibc_tao_primitives::{AbciEvent, EventAttribute};

use crate::module::ModuleId;

/// An event emitted by an application module from one of its callbacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleEvent {
    pub kind: String,
    pub module_name: ModuleId,
    pub attributes: Vec<ModuleEventAttribute>,
}

impl From<ModuleEvent> for AbciEvent {
    fn from(event: ModuleEvent) -> Self {
        AbciEvent::new(
            event.kind,
            event.attributes.into_iter().map(Into::into).collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleEventAttribute {
    pub key: String,
    pub value: String,
}

impl<K: ToString, V: ToString> From<(K, V)> for ModuleEventAttribute {
    fn from((k, v): (K, V)) -> Self {
        Self {
            key: k.to_string(),
            value: v.to_string(),
        }
    }
}

impl From<ModuleEventAttribute> for EventAttribute {
    fn from(attr: ModuleEventAttribute) -> Self {
        (attr.key, attr.value).into()
    }
}
