use std::borrow::Borrow;
use core::fmt::{Debug, Display, Error as FmtError, Formatter};

use crate::event::ModuleEvent;

/// Module name, internal to the chain.
///
/// That is, the IBC protocol never exposes this name. Note that this is
/// different from IBC host [identifiers][ibc_tao_host_types::identifiers],
/// which are exposed to other chains by the protocol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ModuleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for ModuleId {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Logs and events produced during module callbacks
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleExtras {
    pub events: Vec<ModuleEvent>,
    pub log: Vec<String>,
}

impl ModuleExtras {
    pub fn empty() -> Self {
        ModuleExtras {
            events: Vec::new(),
            log: Vec::new(),
        }
    }
}
