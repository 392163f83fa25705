//! Ownership tokens for ports and channels.
//!
//! A [`Capability`] can only be minted by a [`CapabilityTable`]. Knowing a
//! port or channel identifier is therefore not enough to act on it: a module
//! has to present the token it was handed when the port was bound or the
//! channel was opened.

use std::collections::BTreeMap;

use derive_more::Display;
use ibc_tao_host_types::identifiers::{ChannelId, PortId};
use ibc_tao_host_types::path::{ChannelEndPath, PortPath};

use crate::error::RouterError;
use crate::module::ModuleId;

/// Prefix of channel capability names, in front of the channel end path.
pub const CAPABILITIES_PREFIX: &str = "capabilities";

/// An unforgeable token. The index is private and only assigned by
/// [`CapabilityTable::new_capability`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Capability {
    index: u64,
}

impl Capability {
    pub fn index(&self) -> u64 {
        self.index
    }
}

/// The name a capability is bound to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub struct CapabilityName(String);

impl CapabilityName {
    pub fn port(port_id: &PortId) -> Self {
        Self(PortPath(port_id.clone()).to_string())
    }

    pub fn channel(port_id: &PortId, channel_id: &ChannelId) -> Self {
        Self(format!(
            "{CAPABILITIES_PREFIX}/{}",
            ChannelEndPath::new(port_id, channel_id)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    index: u64,
    owner: ModuleId,
}

/// Owner-indexed table of the capabilities handed out so far.
#[derive(Clone, Debug, Default)]
pub struct CapabilityTable {
    next_index: u64,
    entries: BTreeMap<CapabilityName, Entry>,
}

impl CapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints a capability under `name`, owned by `owner`. Fails if the name
    /// is already taken.
    pub fn new_capability(
        &mut self,
        name: CapabilityName,
        owner: ModuleId,
    ) -> Result<Capability, RouterError> {
        if self.entries.contains_key(&name) {
            return Err(RouterError::CapabilityTaken { name });
        }

        let index = self.next_index;
        self.next_index += 1;
        self.entries.insert(name, Entry { index, owner });

        Ok(Capability { index })
    }

    /// Binds a port to a module and returns the port capability.
    pub fn bind_port(&mut self, port_id: &PortId, owner: ModuleId) -> Result<Capability, RouterError> {
        self.new_capability(CapabilityName::port(port_id), owner)
    }

    pub fn is_bound(&self, port_id: &PortId) -> bool {
        self.entries.contains_key(&CapabilityName::port(port_id))
    }

    pub fn authenticate(&self, name: &CapabilityName, capability: &Capability) -> bool {
        self.entries
            .get(name)
            .is_some_and(|entry| entry.index == capability.index)
    }

    /// Like [`Self::authenticate`], but reports which check failed.
    pub fn verify(&self, name: &CapabilityName, capability: &Capability) -> Result<(), RouterError> {
        match self.entries.get(name) {
            None => Err(RouterError::CapabilityNotFound { name: name.clone() }),
            Some(entry) if entry.index != capability.index => {
                Err(RouterError::UnauthenticatedCapability { name: name.clone() })
            }
            Some(_) => Ok(()),
        }
    }

    /// Frees `name`, e.g. when the handshake step that minted it fails.
    pub fn release(&mut self, name: &CapabilityName) -> Result<(), RouterError> {
        self.entries
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RouterError::CapabilityNotFound { name: name.clone() })
    }

    pub fn owner(&self, name: &CapabilityName) -> Option<&ModuleId> {
        self.entries.get(name).map(|entry| &entry.owner)
    }

    fn lookup(&self, name: &CapabilityName) -> Option<(ModuleId, Capability)> {
        self.entries.get(name).map(|entry| {
            (
                entry.owner.clone(),
                Capability { index: entry.index },
            )
        })
    }

    /// The module bound to `port_id`, with the port capability it holds.
    pub fn lookup_module_by_port(
        &self,
        port_id: &PortId,
    ) -> Result<(ModuleId, Capability), RouterError> {
        self.lookup(&CapabilityName::port(port_id))
            .ok_or_else(|| RouterError::UnknownPort {
                port_id: port_id.clone(),
            })
    }

    /// The module owning the channel, with its channel capability.
    pub fn lookup_module_by_channel(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(ModuleId, Capability), RouterError> {
        self.lookup(&CapabilityName::channel(port_id, channel_id))
            .ok_or_else(|| RouterError::UnknownChannel {
                port_id: port_id.clone(),
                channel_id: channel_id.clone(),
            })
    }
}
