//! Relayer steps between two [`MockContext`]s.
//!
//! Every function goes in one direction, from `A` to `B`, so that variable
//! names line up with the message fields. For the opposite direction, pass
//! the contexts the other way around.

use core::time::Duration;

use ibc_tao::channel::types::acknowledgement::Acknowledgement;
use ibc_tao::channel::types::channel::Order;
use ibc_tao::channel::types::msgs::{
    ChannelMsg, MsgAcknowledgement, MsgChannelCloseConfirm, MsgChannelCloseInit,
    MsgChannelOpenAck, MsgChannelOpenConfirm, MsgChannelOpenInit, MsgChannelOpenTry,
    MsgRecvPacket, MsgTimeout, MsgTimeoutOnClose, PacketMsg,
};
use ibc_tao::channel::types::packet::Packet;
use ibc_tao::channel::types::Version as ChannelVersion;
use ibc_tao::client::types::msgs::{ClientMsg, MsgCreateClient, MsgUpdateClient};
use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentProofBytes;
use ibc_tao::connection::types::msgs::{
    ConnectionMsg, MsgConnectionOpenAck, MsgConnectionOpenConfirm, MsgConnectionOpenInit,
    MsgConnectionOpenTry,
};
use ibc_tao::connection::types::version::Version as ConnectionVersion;
use ibc_tao::connection::types::Counterparty as ConnectionCounterparty;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::handler::types::response::{MsgResponse, ResponseResultType};
use ibc_tao::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId, Sequence};
use ibc_tao::host::types::path::SeqRecvPath;
use ibc_tao::host::ValidationContext;
use ibc_tao::primitives::Signer;

use crate::context::MockContext;
use crate::relayer::error::RelayerError;
use crate::testapp::ibc::clients::mock::client_state::MockClientState;
use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;

fn proof_at(ctx: &MockContext, height: &Height) -> Result<CommitmentProofBytes, RelayerError> {
    ctx.proof_at(height)
        .ok_or(RelayerError::MissingBlock { height: *height })
}

fn packet_result(response: MsgResponse) -> Result<ResponseResultType, RelayerError> {
    response
        .packet_result()
        .ok_or(RelayerError::UnexpectedResponse {
            expected: "packet",
            actual: response,
        })
}

/// Creates a client on `A` tracking `B` as of its latest block.
/// Returns the client identifier on `A`.
pub fn create_client_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &MockContext,
    signer: Signer,
) -> Result<ClientId, RelayerError> {
    let height_of_b = ctx_b.latest_height();
    let header_of_b = ctx_b
        .header_at(&height_of_b)
        .ok_or(RelayerError::MissingBlock {
            height: height_of_b,
        })?;

    let msg_for_a = MsgEnvelope::Client(ClientMsg::CreateClient(MsgCreateClient::new(
        MockClientState::from_header(&header_of_b).into(),
        MockConsensusState::from(header_of_b).into(),
        signer,
    )));

    match ctx_a.deliver(msg_for_a)? {
        MsgResponse::Client(client_id_on_a) => Ok(client_id_on_a),
        actual => Err(RelayerError::UnexpectedResponse {
            expected: "client",
            actual,
        }),
    }
}

/// Advances `A` until its clock catches up with the latest timestamp of `B`.
pub fn sync_clock_on_a(ctx_a: &mut MockContext, ctx_b: &MockContext) {
    while ctx_b.latest_timestamp() > ctx_a.latest_timestamp() {
        ctx_a.advance_block();
    }
}

/// Updates the client on `A` with the latest header of `B`.
pub fn update_client_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &MockContext,
    client_id_on_a: ClientId,
    signer: Signer,
) -> Result<(), RelayerError> {
    let trusted_height_of_b = ctx_a
        .client_latest_height(&client_id_on_a)
        .map_err(|_| RelayerError::ClientStateNotFound {
            client_id: client_id_on_a.clone(),
        })?;

    let target_height_of_b = ctx_b.latest_height();

    if trusted_height_of_b == target_height_of_b {
        return Err(RelayerError::ClientAlreadyUpToDate {
            client_id: client_id_on_a,
            source_height: target_height_of_b,
            destination_height: trusted_height_of_b,
        });
    }

    if trusted_height_of_b > target_height_of_b {
        return Err(RelayerError::ClientAtHigherHeight {
            client_id: client_id_on_a,
            source_height: target_height_of_b,
            destination_height: trusted_height_of_b,
        });
    }

    let header_of_b = ctx_b
        .header_at(&target_height_of_b)
        .ok_or(RelayerError::MissingBlock {
            height: target_height_of_b,
        })?;

    let msg_for_a = MsgEnvelope::Client(ClientMsg::UpdateClient(MsgUpdateClient {
        client_id: client_id_on_a,
        client_message: header_of_b.into(),
        signer,
    }));

    ctx_a.deliver(msg_for_a)?;

    Ok(())
}

/// Updates the client on `A` with the latest header of `B` after syncing the
/// clocks.
pub fn update_client_on_a_with_sync(
    ctx_a: &mut MockContext,
    ctx_b: &MockContext,
    client_id_on_a: ClientId,
    signer: Signer,
) -> Result<(), RelayerError> {
    sync_clock_on_a(ctx_a, ctx_b);
    update_client_on_a(ctx_a, ctx_b, client_id_on_a, signer)
}

/// `A` initiates a connection with the other end on `B`.
/// Returns the connection identifier on `A`.
pub fn connection_open_init_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &MockContext,
    client_id_on_a: ClientId,
    client_id_on_b: ClientId,
    signer: Signer,
) -> Result<ConnectionId, RelayerError> {
    let counterparty_b = ConnectionCounterparty::new(
        client_id_on_b,
        None,
        ctx_b.ibc_store().commitment_prefix(),
    );

    let msg_for_a = MsgEnvelope::Connection(ConnectionMsg::OpenInit(MsgConnectionOpenInit {
        client_id_on_a,
        counterparty: counterparty_b,
        version: None,
        delay_period: Duration::from_secs(0),
        signer,
    }));

    match ctx_a.deliver(msg_for_a)? {
        MsgResponse::Connection(conn_id_on_a) => Ok(conn_id_on_a),
        actual => Err(RelayerError::UnexpectedResponse {
            expected: "connection",
            actual,
        }),
    }
}

/// `B` answers the connection opening attempt of `A`.
/// Returns the connection identifier on `B`.
pub fn connection_open_try_on_b(
    ctx_b: &mut MockContext,
    ctx_a: &MockContext,
    conn_id_on_a: ConnectionId,
    client_id_on_a: ClientId,
    client_id_on_b: ClientId,
    signer: Signer,
) -> Result<ConnectionId, RelayerError> {
    let proofs_height_on_a = ctx_a.latest_height();
    let proof_on_a = proof_at(ctx_a, &proofs_height_on_a)?;

    let client_state_of_b_on_a = ctx_a.client_state(&client_id_on_a)?;
    let consensus_height_of_b_on_a = ctx_a.client_latest_height(&client_id_on_a)?;

    let versions_on_a = ctx_a.connection_end(&conn_id_on_a)?.versions().to_vec();

    let counterparty_a = ConnectionCounterparty::new(
        client_id_on_a,
        Some(conn_id_on_a),
        ctx_a.ibc_store().commitment_prefix(),
    );

    let msg_for_b = MsgEnvelope::Connection(ConnectionMsg::OpenTry(MsgConnectionOpenTry {
        client_id_on_b,
        client_state_of_b_on_a: client_state_of_b_on_a.into(),
        counterparty: counterparty_a,
        versions_on_a,
        proof_conn_end_on_a: proof_on_a.clone(),
        proof_client_state_of_b_on_a: proof_on_a.clone(),
        proof_consensus_state_of_b_on_a: proof_on_a,
        proofs_height_on_a,
        consensus_height_of_b_on_a,
        delay_period: Duration::from_secs(0),
        signer,
    }));

    match ctx_b.deliver(msg_for_b)? {
        MsgResponse::Connection(conn_id_on_b) => Ok(conn_id_on_b),
        actual => Err(RelayerError::UnexpectedResponse {
            expected: "connection",
            actual,
        }),
    }
}

/// `A` acknowledges the connection end `B` wrote.
pub fn connection_open_ack_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &MockContext,
    conn_id_on_a: ConnectionId,
    conn_id_on_b: ConnectionId,
    client_id_on_b: ClientId,
    signer: Signer,
) -> Result<(), RelayerError> {
    let proofs_height_on_b = ctx_b.latest_height();
    let proof_on_b = proof_at(ctx_b, &proofs_height_on_b)?;

    let client_state_of_a_on_b = ctx_b.client_state(&client_id_on_b)?;
    let consensus_height_of_a_on_b = ctx_b.client_latest_height(&client_id_on_b)?;

    let version = ctx_b
        .connection_end(&conn_id_on_b)?
        .versions()
        .first()
        .cloned()
        .unwrap_or_else(|| ConnectionVersion::compatibles().remove(0));

    let msg_for_a = MsgEnvelope::Connection(ConnectionMsg::OpenAck(MsgConnectionOpenAck {
        conn_id_on_a,
        conn_id_on_b,
        client_state_of_a_on_b: client_state_of_a_on_b.into(),
        proof_conn_end_on_b: proof_on_b.clone(),
        proof_client_state_of_a_on_b: proof_on_b.clone(),
        proof_consensus_state_of_a_on_b: proof_on_b,
        proofs_height_on_b,
        consensus_height_of_a_on_b,
        version,
        signer,
    }));

    ctx_a.deliver(msg_for_a)?;

    Ok(())
}

/// `B` confirms the connection is open on `A` as well.
pub fn connection_open_confirm_on_b(
    ctx_b: &mut MockContext,
    ctx_a: &MockContext,
    conn_id_on_b: ConnectionId,
    signer: Signer,
) -> Result<(), RelayerError> {
    let proof_height_on_a = ctx_a.latest_height();

    let msg_for_b =
        MsgEnvelope::Connection(ConnectionMsg::OpenConfirm(MsgConnectionOpenConfirm {
            conn_id_on_b,
            proof_conn_end_on_a: proof_at(ctx_a, &proof_height_on_a)?,
            proof_height_on_a,
            signer,
        }));

    ctx_b.deliver(msg_for_b)?;

    Ok(())
}

/// A connection is created by `A` towards `B` through the four handshake
/// steps, updating each client before it is used to verify a proof.
/// Returns the connection identifiers of `A` and `B`.
pub fn create_connection_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &mut MockContext,
    client_id_on_a: ClientId,
    client_id_on_b: ClientId,
    signer: Signer,
) -> Result<(ConnectionId, ConnectionId), RelayerError> {
    let conn_id_on_a = connection_open_init_on_a(
        ctx_a,
        ctx_b,
        client_id_on_a.clone(),
        client_id_on_b.clone(),
        signer.clone(),
    )?;

    update_client_on_a_with_sync(ctx_b, ctx_a, client_id_on_b.clone(), signer.clone())?;

    let conn_id_on_b = connection_open_try_on_b(
        ctx_b,
        ctx_a,
        conn_id_on_a.clone(),
        client_id_on_a.clone(),
        client_id_on_b.clone(),
        signer.clone(),
    )?;

    update_client_on_a_with_sync(ctx_a, ctx_b, client_id_on_a.clone(), signer.clone())?;

    connection_open_ack_on_a(
        ctx_a,
        ctx_b,
        conn_id_on_a.clone(),
        conn_id_on_b.clone(),
        client_id_on_b.clone(),
        signer.clone(),
    )?;

    update_client_on_a_with_sync(ctx_b, ctx_a, client_id_on_b, signer.clone())?;

    connection_open_confirm_on_b(ctx_b, ctx_a, conn_id_on_b.clone(), signer.clone())?;

    update_client_on_a_with_sync(ctx_a, ctx_b, client_id_on_a, signer)?;

    Ok((conn_id_on_a, conn_id_on_b))
}

/// `A` initiates a channel on top of `conn_id_on_a`.
/// Returns the channel identifier on `A`.
pub fn channel_open_init_on_a(
    ctx_a: &mut MockContext,
    conn_id_on_a: ConnectionId,
    port_id_on_a: PortId,
    port_id_on_b: PortId,
    ordering: Order,
    signer: Signer,
) -> Result<ChannelId, RelayerError> {
    let msg_for_a = MsgEnvelope::Channel(ChannelMsg::OpenInit(MsgChannelOpenInit {
        port_id_on_a,
        connection_hops_on_a: vec![conn_id_on_a],
        port_id_on_b,
        ordering,
        signer,
        version_proposal: ChannelVersion::empty(),
    }));

    match ctx_a.deliver(msg_for_a)? {
        MsgResponse::Channel(chan_id_on_a) => Ok(chan_id_on_a),
        actual => Err(RelayerError::UnexpectedResponse {
            expected: "channel",
            actual,
        }),
    }
}

/// `B` answers the channel opening attempt of `A`.
/// Returns the channel identifier on `B`.
pub fn channel_open_try_on_b(
    ctx_b: &mut MockContext,
    ctx_a: &MockContext,
    conn_id_on_b: ConnectionId,
    chan_id_on_a: ChannelId,
    port_id_on_a: PortId,
    port_id_on_b: PortId,
    signer: Signer,
) -> Result<ChannelId, RelayerError> {
    let chan_end_on_a = ctx_a.channel_end(&port_id_on_a, &chan_id_on_a)?;
    let proof_height_on_a = ctx_a.latest_height();

    let msg_for_b = MsgEnvelope::Channel(ChannelMsg::OpenTry(MsgChannelOpenTry {
        port_id_on_b,
        connection_hops_on_b: vec![conn_id_on_b],
        port_id_on_a,
        chan_id_on_a,
        version_supported_on_a: chan_end_on_a.version().clone(),
        proof_chan_end_on_a: proof_at(ctx_a, &proof_height_on_a)?,
        proof_height_on_a,
        ordering: *chan_end_on_a.ordering(),
        signer,
    }));

    match ctx_b.deliver(msg_for_b)? {
        MsgResponse::Channel(chan_id_on_b) => Ok(chan_id_on_b),
        actual => Err(RelayerError::UnexpectedResponse {
            expected: "channel",
            actual,
        }),
    }
}

/// `A` acknowledges the channel end `B` wrote.
pub fn channel_open_ack_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &MockContext,
    chan_id_on_a: ChannelId,
    port_id_on_a: PortId,
    chan_id_on_b: ChannelId,
    port_id_on_b: PortId,
    signer: Signer,
) -> Result<(), RelayerError> {
    let version_on_b = ctx_b
        .channel_end(&port_id_on_b, &chan_id_on_b)?
        .version()
        .clone();
    let proof_height_on_b = ctx_b.latest_height();

    let msg_for_a = MsgEnvelope::Channel(ChannelMsg::OpenAck(MsgChannelOpenAck {
        port_id_on_a,
        chan_id_on_a,
        chan_id_on_b,
        version_on_b,
        proof_chan_end_on_b: proof_at(ctx_b, &proof_height_on_b)?,
        proof_height_on_b,
        signer,
    }));

    ctx_a.deliver(msg_for_a)?;

    Ok(())
}

/// `B` confirms the channel is open on `A` as well.
pub fn channel_open_confirm_on_b(
    ctx_b: &mut MockContext,
    ctx_a: &MockContext,
    chan_id_on_b: ChannelId,
    port_id_on_b: PortId,
    signer: Signer,
) -> Result<(), RelayerError> {
    let proof_height_on_a = ctx_a.latest_height();

    let msg_for_b = MsgEnvelope::Channel(ChannelMsg::OpenConfirm(MsgChannelOpenConfirm {
        port_id_on_b,
        chan_id_on_b,
        proof_chan_end_on_a: proof_at(ctx_a, &proof_height_on_a)?,
        proof_height_on_a,
        signer,
    }));

    ctx_b.deliver(msg_for_b)?;

    Ok(())
}

/// `A` closes its end of a channel.
pub fn channel_close_init_on_a(
    ctx_a: &mut MockContext,
    chan_id_on_a: ChannelId,
    port_id_on_a: PortId,
    signer: Signer,
) -> Result<(), RelayerError> {
    let msg_for_a = MsgEnvelope::Channel(ChannelMsg::CloseInit(MsgChannelCloseInit {
        port_id_on_a,
        chan_id_on_a,
        signer,
    }));

    ctx_a.deliver(msg_for_a)?;

    Ok(())
}

/// `B` closes its end after `A` closed its own.
pub fn channel_close_confirm_on_b(
    ctx_b: &mut MockContext,
    ctx_a: &MockContext,
    chan_id_on_b: ChannelId,
    port_id_on_b: PortId,
    signer: Signer,
) -> Result<(), RelayerError> {
    let proof_height_on_a = ctx_a.latest_height();

    let msg_for_b = MsgEnvelope::Channel(ChannelMsg::CloseConfirm(MsgChannelCloseConfirm {
        port_id_on_b,
        chan_id_on_b,
        proof_chan_end_on_a: proof_at(ctx_a, &proof_height_on_a)?,
        proof_height_on_a,
        signer,
    }));

    ctx_b.deliver(msg_for_b)?;

    Ok(())
}

/// A channel is created by `A` towards `B` through the four handshake
/// steps. Returns the channel identifiers of `A` and `B`.
#[allow(clippy::too_many_arguments)]
pub fn create_channel_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &mut MockContext,
    client_id_on_a: ClientId,
    conn_id_on_a: ConnectionId,
    port_id_on_a: PortId,
    client_id_on_b: ClientId,
    conn_id_on_b: ConnectionId,
    port_id_on_b: PortId,
    ordering: Order,
    signer: Signer,
) -> Result<(ChannelId, ChannelId), RelayerError> {
    let chan_id_on_a = channel_open_init_on_a(
        ctx_a,
        conn_id_on_a,
        port_id_on_a.clone(),
        port_id_on_b.clone(),
        ordering,
        signer.clone(),
    )?;

    update_client_on_a_with_sync(ctx_b, ctx_a, client_id_on_b.clone(), signer.clone())?;

    let chan_id_on_b = channel_open_try_on_b(
        ctx_b,
        ctx_a,
        conn_id_on_b,
        chan_id_on_a.clone(),
        port_id_on_a.clone(),
        port_id_on_b.clone(),
        signer.clone(),
    )?;

    update_client_on_a_with_sync(ctx_a, ctx_b, client_id_on_a.clone(), signer.clone())?;

    channel_open_ack_on_a(
        ctx_a,
        ctx_b,
        chan_id_on_a.clone(),
        port_id_on_a,
        chan_id_on_b.clone(),
        port_id_on_b.clone(),
        signer.clone(),
    )?;

    update_client_on_a_with_sync(ctx_b, ctx_a, client_id_on_b, signer.clone())?;

    channel_open_confirm_on_b(
        ctx_b,
        ctx_a,
        chan_id_on_b.clone(),
        port_id_on_b,
        signer.clone(),
    )?;

    update_client_on_a_with_sync(ctx_a, ctx_b, client_id_on_a, signer)?;

    Ok((chan_id_on_a, chan_id_on_b))
}

/// A channel is closed by `A`, then by `B`.
#[allow(clippy::too_many_arguments)]
pub fn close_channel_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &mut MockContext,
    client_id_on_a: ClientId,
    chan_id_on_a: ChannelId,
    port_id_on_a: PortId,
    client_id_on_b: ClientId,
    chan_id_on_b: ChannelId,
    port_id_on_b: PortId,
    signer: Signer,
) -> Result<(), RelayerError> {
    channel_close_init_on_a(ctx_a, chan_id_on_a, port_id_on_a, signer.clone())?;

    update_client_on_a_with_sync(ctx_b, ctx_a, client_id_on_b, signer.clone())?;

    channel_close_confirm_on_b(ctx_b, ctx_a, chan_id_on_b, port_id_on_b, signer.clone())?;

    update_client_on_a_with_sync(ctx_a, ctx_b, client_id_on_a, signer)
}

/// The message with which `B` receives `packet`, proven at the latest height
/// of `A`.
pub fn msg_recv_packet_on_b(
    ctx_a: &MockContext,
    packet: Packet,
    signer: Signer,
) -> Result<MsgEnvelope, RelayerError> {
    let proof_height_on_a = ctx_a.latest_height();

    Ok(MsgEnvelope::Packet(PacketMsg::Recv(MsgRecvPacket {
        packet,
        proof_commitment_on_a: proof_at(ctx_a, &proof_height_on_a)?,
        proof_height_on_a,
        signer,
    })))
}

/// `B` receives a packet sent by `A`.
///
/// Returns the acknowledgement `B` wrote, if any: a packet received before
/// or acknowledged asynchronously has none yet.
pub fn packet_recv_on_b(
    ctx_b: &mut MockContext,
    ctx_a: &MockContext,
    packet: Packet,
    signer: Signer,
) -> Result<Option<Acknowledgement>, RelayerError> {
    let msg_for_b = msg_recv_packet_on_b(ctx_a, packet, signer)?;

    let events_before = ctx_b.events().len();

    packet_result(ctx_b.deliver(msg_for_b)?)?;

    let acknowledgement = ctx_b.events()[events_before..]
        .iter()
        .find_map(|event| match event {
            IbcEvent::WriteAcknowledgement(e) => Some(e.acknowledgement().clone()),
            _ => None,
        });

    Ok(acknowledgement)
}

/// The message with which `A` settles `packet` with the acknowledgement `B`
/// wrote for it.
pub fn msg_acknowledgement_on_a(
    ctx_b: &MockContext,
    packet: Packet,
    acknowledgement: Acknowledgement,
    signer: Signer,
) -> Result<MsgEnvelope, RelayerError> {
    let proof_height_on_b = ctx_b.latest_height();

    Ok(MsgEnvelope::Packet(PacketMsg::Ack(MsgAcknowledgement {
        packet,
        acknowledgement,
        proof_acked_on_b: proof_at(ctx_b, &proof_height_on_b)?,
        proof_height_on_b,
        signer,
    })))
}

/// `A` processes the acknowledgement `B` wrote for a packet of `A`.
pub fn packet_ack_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &MockContext,
    packet: Packet,
    acknowledgement: Acknowledgement,
    signer: Signer,
) -> Result<ResponseResultType, RelayerError> {
    let msg_for_a = msg_acknowledgement_on_a(ctx_b, packet, acknowledgement, signer)?;

    packet_result(ctx_a.deliver(msg_for_a)?)
}

/// Next receive sequence of the destination channel of `packet` on `B`, as
/// a timeout proves it for ordered channels.
fn next_seq_recv_on_b(
    ctx_a: &MockContext,
    ctx_b: &MockContext,
    packet: &Packet,
) -> Result<Sequence, RelayerError> {
    let chan_end_on_a = ctx_a.channel_end(&packet.port_id_on_a, &packet.chan_id_on_a)?;

    match chan_end_on_a.ordering() {
        Order::Ordered => Ok(ctx_b.ibc_store().get_next_sequence_recv(&SeqRecvPath::new(
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
        ))?),
        Order::Unordered => Ok(packet.seq_on_a),
    }
}

/// The message with which `A` times out `packet`, proven at the latest
/// height of `B`.
pub fn msg_timeout_on_a(
    ctx_a: &MockContext,
    ctx_b: &MockContext,
    packet: Packet,
    signer: Signer,
) -> Result<MsgEnvelope, RelayerError> {
    let proof_height_on_b = ctx_b.latest_height();

    Ok(MsgEnvelope::Packet(PacketMsg::Timeout(MsgTimeout {
        next_seq_recv_on_b: next_seq_recv_on_b(ctx_a, ctx_b, &packet)?,
        packet,
        proof_unreceived_on_b: proof_at(ctx_b, &proof_height_on_b)?,
        proof_height_on_b,
        signer,
    })))
}

/// `A` times out a packet `B` never received.
pub fn packet_timeout_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &MockContext,
    packet: Packet,
    signer: Signer,
) -> Result<ResponseResultType, RelayerError> {
    let msg_for_a = msg_timeout_on_a(ctx_a, ctx_b, packet, signer)?;

    packet_result(ctx_a.deliver(msg_for_a)?)
}

/// `A` times out a packet `B` never received because it closed its end of
/// the channel.
pub fn packet_timeout_on_close_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &MockContext,
    packet: Packet,
    signer: Signer,
) -> Result<ResponseResultType, RelayerError> {
    let proof_height_on_b = ctx_b.latest_height();
    let proof_on_b = proof_at(ctx_b, &proof_height_on_b)?;

    let msg_for_a = MsgEnvelope::Packet(PacketMsg::TimeoutOnClose(MsgTimeoutOnClose {
        next_seq_recv_on_b: next_seq_recv_on_b(ctx_a, ctx_b, &packet)?,
        packet,
        proof_unreceived_on_b: proof_on_b.clone(),
        proof_close_on_b: proof_on_b,
        proof_height_on_b,
        signer,
    }));

    packet_result(ctx_a.deliver(msg_for_a)?)
}

/// Relays a packet `A` sent: received on `B`, then acknowledged on `A`.
/// Returns the acknowledgement, or `None` when `B` acknowledges
/// asynchronously, in which case `A` is left waiting.
pub fn relay_packet_on_a(
    ctx_a: &mut MockContext,
    ctx_b: &mut MockContext,
    packet: Packet,
    client_id_on_a: ClientId,
    client_id_on_b: ClientId,
    signer: Signer,
) -> Result<Option<Acknowledgement>, RelayerError> {
    update_client_on_a_with_sync(ctx_b, ctx_a, client_id_on_b, signer.clone())?;

    let Some(acknowledgement) = packet_recv_on_b(ctx_b, ctx_a, packet.clone(), signer.clone())?
    else {
        return Ok(None);
    };

    update_client_on_a_with_sync(ctx_a, ctx_b, client_id_on_a, signer.clone())?;

    packet_ack_on_a(ctx_a, ctx_b, packet, acknowledgement.clone(), signer)?;

    Ok(Some(acknowledgement))
}
