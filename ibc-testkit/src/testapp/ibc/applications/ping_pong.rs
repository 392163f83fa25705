//! A minimal application: answers a `ping` packet with a `pong`
//! acknowledgement and keeps track of every callback it receives.

use std::collections::BTreeMap;
use std::sync::Arc;

use ibc_tao::channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use ibc_tao::channel::types::channel::{Counterparty, Order};
use ibc_tao::channel::types::error::{ChannelError, PacketError};
use ibc_tao::channel::types::packet::Packet;
use ibc_tao::channel::types::Version;
use ibc_tao::host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_tao::host::types::store::KvStore;
use ibc_tao::primitives::Signer;
use ibc_tao::router::module::Module;
use ibc_tao::router::types::capability::Capability;
use ibc_tao::router::types::event::ModuleEvent;
use ibc_tao::router::types::module::{ModuleExtras, ModuleId};
use parking_lot::Mutex;

pub const MODULE_ID_STR: &str = "pingpong";
pub const PORT_ID_STR: &str = "pingpong";
pub const VERSION: &str = "ping-pong-1";

pub const PING: &[u8] = b"ping";
pub const PONG: &[u8] = b"pong";

pub fn port_id() -> PortId {
    PortId::new(PORT_ID_STR.to_string()).expect("never fails because it's a valid port id")
}

pub fn version() -> Version {
    Version::from(VERSION)
}

/// Key under which a received ping is recorded in the application store.
pub fn ping_key(packet: &Packet) -> Vec<u8> {
    format!(
        "pings/{}/{}/{}",
        packet.port_id_on_b, packet.chan_id_on_b, packet.seq_on_a
    )
    .into_bytes()
}

#[derive(Debug, Default)]
pub struct PingPongState {
    /// Capabilities minted for the channels this module opened or accepted.
    pub channel_caps: BTreeMap<(PortId, ChannelId), Capability>,
    pub opened: Vec<ChannelId>,
    pub closed: Vec<ChannelId>,
    pub received: Vec<Sequence>,
    pub acknowledged: Vec<(Sequence, AcknowledgementStatus)>,
    pub timed_out: Vec<Sequence>,
    /// When set, received packets are not acknowledged right away but queued
    /// in `deferred`, to be acknowledged through `write_acknowledgement`.
    pub async_acks: bool,
    pub deferred: Vec<Packet>,
}

#[derive(Clone, Debug, Default)]
pub struct PingPongModule {
    state: Arc<Mutex<PingPongState>>,
}

impl PingPongModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_async_acks(self) -> Self {
        self.state.lock().async_acks = true;
        self
    }

    pub fn state(&self) -> Arc<Mutex<PingPongState>> {
        self.state.clone()
    }

    pub fn channel_capability(&self, port_id: &PortId, channel_id: &ChannelId) -> Option<Capability> {
        self.state
            .lock()
            .channel_caps
            .get(&(port_id.clone(), channel_id.clone()))
            .cloned()
    }

    fn check_version(proposed: &Version) -> Result<Version, ChannelError> {
        if proposed.is_empty() {
            return Ok(version());
        }

        if *proposed != version() {
            return Err(ChannelError::UnsupportedVersion {
                expected: version(),
                actual: proposed.clone(),
            });
        }

        Ok(proposed.clone())
    }

    fn event(kind: &str, attributes: Vec<(&str, String)>) -> ModuleEvent {
        ModuleEvent {
            kind: kind.to_string(),
            module_name: ModuleId::from(MODULE_ID_STR),
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    fn record_channel(&mut self, port_id: &PortId, channel_id: &ChannelId, chan_cap: &Capability) {
        self.state
            .lock()
            .channel_caps
            .insert((port_id.clone(), channel_id.clone()), chan_cap.clone());
    }
}

impl Module for PingPongModule {
    fn on_chan_open_init_validate(
        &self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<Version, ChannelError> {
        Self::check_version(version)
    }

    fn on_chan_open_init_execute(
        &mut self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        chan_cap: &Capability,
        _counterparty: &Counterparty,
        version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        self.record_channel(port_id, channel_id, chan_cap);
        Ok((ModuleExtras::empty(), Self::check_version(version)?))
    }

    fn on_chan_open_try_validate(
        &self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        _port_id: &PortId,
        _channel_id: &ChannelId,
        _counterparty: &Counterparty,
        counterparty_version: &Version,
    ) -> Result<Version, ChannelError> {
        counterparty_version.verify_is_expected(version())?;
        Ok(version())
    }

    fn on_chan_open_try_execute(
        &mut self,
        _order: Order,
        _connection_hops: &[ConnectionId],
        port_id: &PortId,
        channel_id: &ChannelId,
        chan_cap: &Capability,
        _counterparty: &Counterparty,
        _counterparty_version: &Version,
    ) -> Result<(ModuleExtras, Version), ChannelError> {
        self.record_channel(port_id, channel_id, chan_cap);
        Ok((ModuleExtras::empty(), version()))
    }

    fn on_chan_open_ack_validate(
        &self,
        _port_id: &PortId,
        _channel_id: &ChannelId,
        counterparty_version: &Version,
    ) -> Result<(), ChannelError> {
        counterparty_version.verify_is_expected(version())
    }

    fn on_chan_open_ack_execute(
        &mut self,
        _port_id: &PortId,
        channel_id: &ChannelId,
        _counterparty_version: &Version,
    ) -> Result<ModuleExtras, ChannelError> {
        self.state.lock().opened.push(channel_id.clone());
        Ok(ModuleExtras::empty())
    }

    fn on_chan_open_confirm_execute(
        &mut self,
        _port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.state.lock().opened.push(channel_id.clone());
        Ok(ModuleExtras::empty())
    }

    fn on_chan_close_init_execute(
        &mut self,
        _port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.state.lock().closed.push(channel_id.clone());
        Ok(ModuleExtras::empty())
    }

    fn on_chan_close_confirm_execute(
        &mut self,
        _port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<ModuleExtras, ChannelError> {
        self.state.lock().closed.push(channel_id.clone());
        Ok(ModuleExtras::empty())
    }

    fn on_recv_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
        store: &mut dyn KvStore,
    ) -> Result<(ModuleExtras, Option<AcknowledgementStatus>), PacketError> {
        let mut state = self.state.lock();
        state.received.push(packet.seq_on_a);

        // Written before the outcome is known; an error acknowledgement
        // discards it.
        store.set(ping_key(packet), packet.data.clone());

        let extras = ModuleExtras {
            events: vec![Self::event(
                "ping_pong_recv",
                vec![("sequence", packet.seq_on_a.to_string())],
            )],
            log: vec![format!("received packet {}", packet.seq_on_a)],
        };

        if state.async_acks {
            state.deferred.push(packet.clone());
            return Ok((extras, None));
        }

        let status = if packet.data == PING {
            AcknowledgementStatus::success(PONG)?
        } else {
            AcknowledgementStatus::error("expected a ping")?
        };

        Ok((extras, Some(status)))
    }

    fn on_acknowledgement_packet_execute(
        &mut self,
        packet: &Packet,
        acknowledgement: &Acknowledgement,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        let status = match AcknowledgementStatus::try_from(acknowledgement) {
            Ok(status) => status,
            Err(e) => return (ModuleExtras::empty(), Err(e)),
        };

        let extras = ModuleExtras {
            events: vec![Self::event(
                "ping_pong_ack",
                vec![
                    ("sequence", packet.seq_on_a.to_string()),
                    ("success", status.is_successful().to_string()),
                ],
            )],
            log: Vec::new(),
        };

        self.state
            .lock()
            .acknowledged
            .push((packet.seq_on_a, status));

        (extras, Ok(()))
    }

    fn on_timeout_packet_execute(
        &mut self,
        packet: &Packet,
        _relayer: &Signer,
    ) -> (ModuleExtras, Result<(), PacketError>) {
        self.state.lock().timed_out.push(packet.seq_on_a);

        (ModuleExtras::empty(), Ok(()))
    }
}
