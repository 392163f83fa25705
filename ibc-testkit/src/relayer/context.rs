use ibc_tao::channel::types::acknowledgement::Acknowledgement;
use ibc_tao::channel::types::channel::Order;
use ibc_tao::channel::types::error::ChannelError;
use ibc_tao::channel::types::packet::Packet;
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::response::ResponseResultType;
use ibc_tao::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId};
use ibc_tao::primitives::Signer;

use crate::context::MockContext;
use crate::relayer::error::RelayerError;
use crate::relayer::utils;
use crate::testapp::ibc::applications::ping_pong::{port_id, PING};

/// Two chains and a relayer between them.
///
/// Every `*_on_a` operation has an `*_on_b` twin doing the same in the
/// opposite direction. Channels are always opened between the ping-pong
/// ports of both chains.
#[derive(Debug)]
pub struct RelayerContext {
    ctx_a: MockContext,
    ctx_b: MockContext,
}

impl RelayerContext {
    pub fn new(ctx_a: MockContext, ctx_b: MockContext) -> Self {
        Self { ctx_a, ctx_b }
    }

    pub fn get_ctx_a(&self) -> &MockContext {
        &self.ctx_a
    }

    pub fn get_ctx_b(&self) -> &MockContext {
        &self.ctx_b
    }

    pub fn get_ctx_a_mut(&mut self) -> &mut MockContext {
        &mut self.ctx_a
    }

    pub fn get_ctx_b_mut(&mut self) -> &mut MockContext {
        &mut self.ctx_b
    }

    /// Swaps the roles of both chains.
    pub fn reverse(self) -> Self {
        Self::new(self.ctx_b, self.ctx_a)
    }

    pub fn into_contexts(self) -> (MockContext, MockContext) {
        (self.ctx_a, self.ctx_b)
    }

    pub fn create_client_on_a(&mut self, signer: Signer) -> Result<ClientId, RelayerError> {
        utils::create_client_on_a(&mut self.ctx_a, &self.ctx_b, signer)
    }

    pub fn create_client_on_b(&mut self, signer: Signer) -> Result<ClientId, RelayerError> {
        utils::create_client_on_a(&mut self.ctx_b, &self.ctx_a, signer)
    }

    pub fn update_client_on_a_with_sync(
        &mut self,
        client_id_on_a: ClientId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        utils::update_client_on_a_with_sync(&mut self.ctx_a, &self.ctx_b, client_id_on_a, signer)
    }

    pub fn update_client_on_b_with_sync(
        &mut self,
        client_id_on_b: ClientId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        utils::update_client_on_a_with_sync(&mut self.ctx_b, &self.ctx_a, client_id_on_b, signer)
    }

    /// Returns the connection identifiers of `A` and `B`, in that order.
    pub fn create_connection_on_a(
        &mut self,
        client_id_on_a: ClientId,
        client_id_on_b: ClientId,
        signer: Signer,
    ) -> Result<(ConnectionId, ConnectionId), RelayerError> {
        utils::create_connection_on_a(
            &mut self.ctx_a,
            &mut self.ctx_b,
            client_id_on_a,
            client_id_on_b,
            signer,
        )
    }

    /// Returns the connection identifiers of `B` and `A`, in that order.
    pub fn create_connection_on_b(
        &mut self,
        client_id_on_b: ClientId,
        client_id_on_a: ClientId,
        signer: Signer,
    ) -> Result<(ConnectionId, ConnectionId), RelayerError> {
        utils::create_connection_on_a(
            &mut self.ctx_b,
            &mut self.ctx_a,
            client_id_on_b,
            client_id_on_a,
            signer,
        )
    }

    /// Returns the channel identifiers of `A` and `B`, in that order.
    pub fn create_channel_on_a(
        &mut self,
        conn_id_on_a: ConnectionId,
        conn_id_on_b: ConnectionId,
        ordering: Order,
        signer: Signer,
    ) -> Result<(ChannelId, ChannelId), RelayerError> {
        let client_id_on_a = self.ctx_a.connection_end(&conn_id_on_a)?.client_id().clone();
        let client_id_on_b = self.ctx_b.connection_end(&conn_id_on_b)?.client_id().clone();

        utils::create_channel_on_a(
            &mut self.ctx_a,
            &mut self.ctx_b,
            client_id_on_a,
            conn_id_on_a,
            port_id(),
            client_id_on_b,
            conn_id_on_b,
            port_id(),
            ordering,
            signer,
        )
    }

    /// Returns the channel identifiers of `B` and `A`, in that order.
    pub fn create_channel_on_b(
        &mut self,
        conn_id_on_b: ConnectionId,
        conn_id_on_a: ConnectionId,
        ordering: Order,
        signer: Signer,
    ) -> Result<(ChannelId, ChannelId), RelayerError> {
        let client_id_on_a = self.ctx_a.connection_end(&conn_id_on_a)?.client_id().clone();
        let client_id_on_b = self.ctx_b.connection_end(&conn_id_on_b)?.client_id().clone();

        utils::create_channel_on_a(
            &mut self.ctx_b,
            &mut self.ctx_a,
            client_id_on_b,
            conn_id_on_b,
            port_id(),
            client_id_on_a,
            conn_id_on_a,
            port_id(),
            ordering,
            signer,
        )
    }

    pub fn close_channel_on_a(
        &mut self,
        chan_id_on_a: ChannelId,
        chan_id_on_b: ChannelId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let client_id_on_a = client_id_of_channel(&self.ctx_a, &port_id(), &chan_id_on_a)?;
        let client_id_on_b = client_id_of_channel(&self.ctx_b, &port_id(), &chan_id_on_b)?;

        utils::close_channel_on_a(
            &mut self.ctx_a,
            &mut self.ctx_b,
            client_id_on_a,
            chan_id_on_a,
            port_id(),
            client_id_on_b,
            chan_id_on_b,
            port_id(),
            signer,
        )
    }

    pub fn close_channel_on_b(
        &mut self,
        chan_id_on_b: ChannelId,
        chan_id_on_a: ChannelId,
        signer: Signer,
    ) -> Result<(), RelayerError> {
        let client_id_on_a = client_id_of_channel(&self.ctx_a, &port_id(), &chan_id_on_a)?;
        let client_id_on_b = client_id_of_channel(&self.ctx_b, &port_id(), &chan_id_on_b)?;

        utils::close_channel_on_a(
            &mut self.ctx_b,
            &mut self.ctx_a,
            client_id_on_b,
            chan_id_on_b,
            port_id(),
            client_id_on_a,
            chan_id_on_a,
            port_id(),
            signer,
        )
    }

    /// Sends a `ping` from `A` over `chan_id_on_a`.
    pub fn send_ping_on_a(
        &mut self,
        chan_id_on_a: &ChannelId,
        timeout_height_on_b: TimeoutHeight,
        timeout_timestamp_on_b: TimeoutTimestamp,
    ) -> Result<Packet, RelayerError> {
        Ok(self.ctx_a.send_packet_on(
            chan_id_on_a,
            PING.to_vec(),
            timeout_height_on_b,
            timeout_timestamp_on_b,
        )?)
    }

    /// Sends a `ping` from `B` over `chan_id_on_b`.
    pub fn send_ping_on_b(
        &mut self,
        chan_id_on_b: &ChannelId,
        timeout_height_on_a: TimeoutHeight,
        timeout_timestamp_on_a: TimeoutTimestamp,
    ) -> Result<Packet, RelayerError> {
        Ok(self.ctx_b.send_packet_on(
            chan_id_on_b,
            PING.to_vec(),
            timeout_height_on_a,
            timeout_timestamp_on_a,
        )?)
    }

    /// Relays a packet sent by `A` to `B` and its acknowledgement back.
    pub fn relay_packet_on_a(
        &mut self,
        packet: Packet,
        signer: Signer,
    ) -> Result<Option<Acknowledgement>, RelayerError> {
        let client_id_on_a =
            client_id_of_channel(&self.ctx_a, &packet.port_id_on_a, &packet.chan_id_on_a)?;
        let client_id_on_b =
            client_id_of_channel(&self.ctx_b, &packet.port_id_on_b, &packet.chan_id_on_b)?;

        utils::relay_packet_on_a(
            &mut self.ctx_a,
            &mut self.ctx_b,
            packet,
            client_id_on_a,
            client_id_on_b,
            signer,
        )
    }

    /// Relays a packet sent by `B` to `A` and its acknowledgement back.
    pub fn relay_packet_on_b(
        &mut self,
        packet: Packet,
        signer: Signer,
    ) -> Result<Option<Acknowledgement>, RelayerError> {
        let client_id_on_b =
            client_id_of_channel(&self.ctx_b, &packet.port_id_on_a, &packet.chan_id_on_a)?;
        let client_id_on_a =
            client_id_of_channel(&self.ctx_a, &packet.port_id_on_b, &packet.chan_id_on_b)?;

        utils::relay_packet_on_a(
            &mut self.ctx_b,
            &mut self.ctx_a,
            packet,
            client_id_on_b,
            client_id_on_a,
            signer,
        )
    }

    /// Times out on `A` a packet `A` sent, after updating its client of `B`.
    pub fn timeout_packet_on_a(
        &mut self,
        packet: Packet,
        signer: Signer,
    ) -> Result<ResponseResultType, RelayerError> {
        let client_id_on_a =
            client_id_of_channel(&self.ctx_a, &packet.port_id_on_a, &packet.chan_id_on_a)?;

        utils::update_client_on_a_with_sync(
            &mut self.ctx_a,
            &self.ctx_b,
            client_id_on_a,
            signer.clone(),
        )?;

        utils::packet_timeout_on_a(&mut self.ctx_a, &self.ctx_b, packet, signer)
    }
}

/// The client under the connection a channel end is built on.
fn client_id_of_channel(
    ctx: &MockContext,
    port_id: &PortId,
    chan_id: &ChannelId,
) -> Result<ClientId, RelayerError> {
    let chan_end = ctx.channel_end(port_id, chan_id)?;

    let conn_id = chan_end
        .connection_hops()
        .first()
        .ok_or(ContextError::from(ChannelError::InvalidConnectionHopsLength {
            expected: 1,
            actual: 0,
        }))?;

    Ok(ctx.connection_end(conn_id)?.client_id().clone())
}
