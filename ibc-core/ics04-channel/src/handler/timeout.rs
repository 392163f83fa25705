use ibc_tao_channel_types::channel::{ChannelEnd, Counterparty, Order, State};
use ibc_tao_channel_types::commitment::compute_packet_commitment;
use ibc_tao_channel_types::error::{ChannelError, PacketError};
use ibc_tao_channel_types::events::{ChannelClosed, TimeoutPacket};
use ibc_tao_channel_types::msgs::{MsgTimeout, MsgTimeoutOnClose};
use ibc_tao_channel_types::packet::Packet;
use ibc_tao_client_context::prelude::*;
use ibc_tao_commitment_types::commitment::CommitmentProofBytes;
use ibc_tao_connection::delay::verify_conn_delay_passed;
use ibc_tao_connection::types::ConnectionEnd;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_handler_types::response::ResponseResultType;
use ibc_tao_host::types::identifiers::Sequence;
use ibc_tao_host::types::path::{ChannelEndPath, CommitmentPath, Path, ReceiptPath, SeqRecvPath};
use ibc_tao_host::{ClientStateRef, ConsensusStateRef, ExecutionContext, ValidationContext};
use ibc_tao_router::module::Module;
use ibc_tao_router::types::capability::{Capability, CapabilityName};

use super::{counterparty_client, emit_module_extras, timeout_on_close};

/// The two ways a sender proves that a packet will never be received.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::From)]
pub enum TimeoutMsgType {
    Timeout(MsgTimeout),
    TimeoutOnClose(MsgTimeoutOnClose),
}

impl TimeoutMsgType {
    pub fn packet(&self) -> &Packet {
        match self {
            Self::Timeout(msg) => &msg.packet,
            Self::TimeoutOnClose(msg) => &msg.packet,
        }
    }
}

pub fn timeout_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    chan_cap: &Capability,
    timeout_msg_type: &TimeoutMsgType,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    match timeout_msg_type {
        TimeoutMsgType::Timeout(msg) => validate(ctx_a, chan_cap, msg),
        TimeoutMsgType::TimeoutOnClose(msg) => timeout_on_close::validate(ctx_a, chan_cap, msg),
    }?;

    let (packet, signer) = match timeout_msg_type {
        TimeoutMsgType::Timeout(msg) => (&msg.packet, &msg.signer),
        TimeoutMsgType::TimeoutOnClose(msg) => (&msg.packet, &msg.signer),
    };

    module
        .on_timeout_packet_validate(packet, signer)
        .map_err(ContextError::PacketError)
}

/// Settles a timed-out packet. An ordered channel does not survive a
/// timeout and is closed.
pub fn timeout_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    timeout_msg_type: TimeoutMsgType,
) -> Result<ResponseResultType, ContextError>
where
    ExecCtx: ExecutionContext,
{
    let (packet, signer) = match timeout_msg_type {
        TimeoutMsgType::Timeout(msg) => (msg.packet, msg.signer),
        TimeoutMsgType::TimeoutOnClose(msg) => (msg.packet, msg.signer),
    };
    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    // The packet was already acknowledged or timed out.
    if ctx_a.get_packet_commitment(&commitment_path_on_a)?.is_none() {
        return Ok(ResponseResultType::Noop);
    }

    let (extras, cb_result) = module.on_timeout_packet_execute(&packet, &signer);

    cb_result?;

    // apply state changes
    let chan_end_on_a = {
        ctx_a.delete_packet_commitment(&commitment_path_on_a)?;

        if let Order::Ordered = chan_end_on_a.ordering {
            let mut chan_end_on_a = chan_end_on_a;
            chan_end_on_a.set_state(State::Closed);
            ctx_a.store_channel(&chan_end_path_on_a, chan_end_on_a.clone())?;

            chan_end_on_a
        } else {
            chan_end_on_a
        }
    };

    // emit events and logs
    {
        ctx_a.log_message(format!(
            "success: packet timeout with sequence {}",
            packet.seq_on_a
        ))?;

        if let Order::Ordered = chan_end_on_a.ordering {
            ctx_a.log_message(format!(
                "success: channel {} closed after ordered packet timeout",
                packet.chan_id_on_a
            ))?;
        }

        let conn_id_on_a = chan_end_on_a.connection_hops()[0].clone();

        let timeout_event = IbcEvent::TimeoutPacket(TimeoutPacket::new(
            packet.clone(),
            chan_end_on_a.ordering,
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(timeout_event)?;

        if let Order::Ordered = chan_end_on_a.ordering {
            let close_event = IbcEvent::ChannelClosed(ChannelClosed::new(
                packet.port_id_on_a.clone(),
                packet.chan_id_on_a.clone(),
                chan_end_on_a.counterparty().port_id.clone(),
                chan_end_on_a.counterparty().channel_id.clone(),
                conn_id_on_a,
                chan_end_on_a.ordering,
            ));
            ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
            ctx_a.emit_ibc_event(close_event)?;
        }

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(ResponseResultType::Success)
}

fn validate<Ctx>(ctx_a: &Ctx, chan_cap: &Capability, msg: &MsgTimeout) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_a.validate_message_signer(&msg.signer)?;

    let Some(chan_end_on_a) = settlement_channel(ctx_a, chan_cap, &msg.packet)? else {
        return Ok(());
    };

    chan_end_on_a.verify_state_matches(&State::Open)?;

    let conn_id_on_a = chan_end_on_a.connection_hops()[0].clone();
    let conn_end_on_a = ctx_a.connection_end(&conn_id_on_a)?;

    // verify packet receipt has not been recorded on the counterparty
    {
        let (client_state_of_b_on_a, consensus_state_of_b_on_a) =
            counterparty_client(ctx_a, &conn_end_on_a, msg.proof_height_on_b)?;

        // check that timeout height or timeout timestamp has passed on the other end
        let timestamp_of_b = consensus_state_of_b_on_a.timestamp();
        if !msg.packet.timed_out(&timestamp_of_b, msg.proof_height_on_b) {
            return Err(PacketError::PacketTimeoutNotReached {
                timeout_height: msg.packet.timeout_height_on_b,
                chain_height: msg.proof_height_on_b,
                timeout_timestamp: msg.packet.timeout_timestamp_on_b,
                chain_timestamp: timestamp_of_b,
            }
            .into());
        }

        verify_conn_delay_passed(ctx_a, msg.proof_height_on_b, &conn_end_on_a)?;

        verify_unreceived::<Ctx>(
            &client_state_of_b_on_a,
            &consensus_state_of_b_on_a,
            &conn_end_on_a,
            chan_end_on_a.ordering,
            &msg.packet,
            msg.next_seq_recv_on_b,
            &msg.proof_unreceived_on_b,
        )?;
    }

    Ok(())
}

/// Checks shared by both timeout messages. Returns `None` when the packet
/// commitment is gone, in which case the message is a no-op.
pub(super) fn settlement_channel<Ctx>(
    ctx_a: &Ctx,
    chan_cap: &Capability,
    packet: &Packet,
) -> Result<Option<ChannelEnd>, ContextError>
where
    Ctx: ValidationContext,
{
    ctx_a.authenticate_capability(
        &CapabilityName::channel(&packet.port_id_on_a, &packet.chan_id_on_a),
        chan_cap,
    )?;

    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    let counterparty = Counterparty::new(
        packet.port_id_on_b.clone(),
        Some(packet.chan_id_on_b.clone()),
    );

    chan_end_on_a
        .verify_counterparty_matches(&counterparty)
        .map_err(|_| PacketError::InvalidPacketCounterparty {
            port_id: packet.port_id_on_b.clone(),
            channel_id: packet.chan_id_on_b.clone(),
        })?;

    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    let Some(commitment_on_a) = ctx_a.get_packet_commitment(&commitment_path_on_a)? else {
        return Ok(None);
    };

    let expected_commitment_on_a = compute_packet_commitment(
        &packet.data,
        &packet.timeout_height_on_b,
        &packet.timeout_timestamp_on_b,
    );
    if commitment_on_a != expected_commitment_on_a {
        return Err(PacketError::MismatchedPacketCommitments {
            sequence: packet.seq_on_a,
            expected: expected_commitment_on_a,
            actual: commitment_on_a,
        }
        .into());
    }

    if chan_end_on_a.connection_hops().is_empty() {
        return Err(ChannelError::InvalidConnectionHopsLength {
            expected: 1,
            actual: 0,
        }
        .into());
    }

    Ok(Some(chan_end_on_a))
}

/// Proves the counterparty never received `packet`: ordered channels through
/// the next receive sequence, unordered ones through the absence of a
/// receipt.
pub(super) fn verify_unreceived<Ctx>(
    client_state_of_b_on_a: &ClientStateRef<Ctx>,
    consensus_state_of_b_on_a: &ConsensusStateRef<Ctx>,
    conn_end_on_a: &ConnectionEnd,
    ordering: Order,
    packet: &Packet,
    next_seq_recv_on_b: Sequence,
    proof_unreceived_on_b: &CommitmentProofBytes,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let verification = match ordering {
        Order::Ordered => {
            if packet.seq_on_a < next_seq_recv_on_b {
                return Err(PacketError::MismatchedPacketSequences {
                    expected: next_seq_recv_on_b,
                    actual: packet.seq_on_a,
                }
                .into());
            }
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);

            client_state_of_b_on_a.verify_membership(
                conn_end_on_a.counterparty().prefix(),
                proof_unreceived_on_b,
                consensus_state_of_b_on_a.root(),
                Path::SeqRecv(seq_recv_path_on_b),
                next_seq_recv_on_b.to_vec(),
            )
        }
        Order::Unordered => {
            let receipt_path_on_b =
                ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

            client_state_of_b_on_a.verify_non_membership(
                conn_end_on_a.counterparty().prefix(),
                proof_unreceived_on_b,
                consensus_state_of_b_on_a.root(),
                Path::Receipt(receipt_path_on_b),
            )
        }
    };

    verification.map_err(|e| PacketError::FailedPacketVerification {
        sequence: packet.seq_on_a,
        client_error: e,
    })?;

    Ok(())
}
