use ibc_tao_channel_types::acknowledgement::Acknowledgement;
use ibc_tao_channel_types::channel::{Counterparty, Order, State};
use ibc_tao_channel_types::commitment::{compute_ack_commitment, compute_packet_commitment};
use ibc_tao_channel_types::error::PacketError;
use ibc_tao_channel_types::events::{ReceivePacket, WriteAcknowledgement};
use ibc_tao_channel_types::msgs::MsgRecvPacket;
use ibc_tao_channel_types::packet::{Packet, Receipt};
use ibc_tao_client_context::prelude::*;
use ibc_tao_connection::delay::verify_conn_delay_passed;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_handler_types::response::ResponseResultType;
use ibc_tao_host::types::path::{
    AckPath, ChannelEndPath, CommitmentPath, Path, ReceiptPath, SeqRecvPath,
};
use ibc_tao_host::types::store::CacheKvStore;
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_router::module::Module;
use ibc_tao_router::types::capability::{Capability, CapabilityName};

use super::{counterparty_client, emit_module_extras, open_connection};

pub fn recv_packet_validate<ValCtx>(
    ctx_b: &ValCtx,
    chan_cap: &Capability,
    msg: &MsgRecvPacket,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    // Note: this contains the validation for `write_acknowledgement` as well.
    validate(ctx_b, chan_cap, msg)

    // nothing to validate with the module, since `onRecvPacket` cannot fail.
    // If any error occurs, then an "error acknowledgement" must be returned.
}

/// Runs the receiving module over a cached view of the application store
/// and records the receipt. Returns [`ResponseResultType::Noop`] when the
/// packet was already received.
pub fn recv_packet_execute<ExecCtx>(
    ctx_b: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgRecvPacket,
) -> Result<ResponseResultType, ContextError>
where
    ExecCtx: ExecutionContext,
{
    let chan_end_path_on_b =
        ChannelEndPath::new(&msg.packet.port_id_on_b, &msg.packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    // Check if another relayer already relayed the packet.
    // We don't want to fail the transaction in this case.
    if packet_already_received(ctx_b, chan_end_on_b.ordering, &msg.packet)? {
        return Ok(ResponseResultType::Noop);
    }

    let (extras, acknowledgement) = {
        let mut cache = CacheKvStore::new(ctx_b.application_store());

        let (extras, ack_status) =
            module.on_recv_packet_execute(&msg.packet, &msg.signer, &mut cache)?;

        match &ack_status {
            Some(status) if !status.is_successful() => cache.discard(),
            _ => cache.write(),
        }

        let acknowledgement = ack_status.map(Acknowledgement::try_from).transpose()?;

        (extras, acknowledgement)
    };

    // state changes
    {
        // `recvPacket` core handler state changes
        match chan_end_on_b.ordering {
            Order::Unordered => {
                let path = ReceiptPath::new(
                    &msg.packet.port_id_on_b,
                    &msg.packet.chan_id_on_b,
                    msg.packet.seq_on_a,
                );

                ctx_b.store_packet_receipt(&path, Receipt::Ok)?;
            }
            Order::Ordered => {
                let seq_recv_path_on_b =
                    SeqRecvPath::new(&msg.packet.port_id_on_b, &msg.packet.chan_id_on_b);
                let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;

                ctx_b.store_next_sequence_recv(&seq_recv_path_on_b, next_seq_recv.increment())?;
            }
        }

        // `writeAcknowledgement` handler state changes
        if let Some(acknowledgement) = &acknowledgement {
            let ack_path_on_b = AckPath::new(
                &msg.packet.port_id_on_b,
                &msg.packet.chan_id_on_b,
                msg.packet.seq_on_a,
            );
            ctx_b.store_packet_acknowledgement(
                &ack_path_on_b,
                compute_ack_commitment(acknowledgement),
            )?;
        }
    }

    // emit events and logs
    {
        // receive packet events/logs
        ctx_b.log_message(format!(
            "success: packet receive with sequence {}",
            msg.packet.seq_on_a
        ))?;
        let conn_id_on_b = &chan_end_on_b.connection_hops()[0];
        let event = IbcEvent::ReceivePacket(ReceivePacket::new(
            msg.packet.clone(),
            chan_end_on_b.ordering,
            conn_id_on_b.clone(),
        ));
        ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_b.emit_ibc_event(event)?;

        // write ack events/logs
        if let Some(acknowledgement) = acknowledgement {
            ctx_b.log_message("success: packet write acknowledgement".to_string())?;

            let event = IbcEvent::WriteAcknowledgement(WriteAcknowledgement::new(
                msg.packet,
                acknowledgement,
                conn_id_on_b.clone(),
            ));
            ctx_b.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
            ctx_b.emit_ibc_event(event)?;
        }

        emit_module_extras(ctx_b, extras)?;
    }

    Ok(ResponseResultType::Success)
}

fn validate<Ctx>(ctx_b: &Ctx, chan_cap: &Capability, msg: &MsgRecvPacket) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_b.validate_message_signer(&msg.signer)?;

    if !ctx_b.params().inbound_enabled {
        return Err(PacketError::InboundDisabled.into());
    }

    ctx_b.authenticate_capability(
        &CapabilityName::channel(&msg.packet.port_id_on_b, &msg.packet.chan_id_on_b),
        chan_cap,
    )?;

    // Read channel end to verify the state of the channel
    let chan_end_path_on_b =
        ChannelEndPath::new(&msg.packet.port_id_on_b, &msg.packet.chan_id_on_b);
    let chan_end_on_b = ctx_b.channel_end(&chan_end_path_on_b)?;

    chan_end_on_b.verify_state_matches(&State::Open)?;

    let counterparty = Counterparty::new(
        msg.packet.port_id_on_a.clone(),
        Some(msg.packet.chan_id_on_a.clone()),
    );

    chan_end_on_b
        .verify_counterparty_matches(&counterparty)
        .map_err(|_| PacketError::InvalidPacketCounterparty {
            port_id: msg.packet.port_id_on_a.clone(),
            channel_id: msg.packet.chan_id_on_a.clone(),
        })?;

    let conn_end_on_b = open_connection(ctx_b, chan_end_on_b.connection_hops())?;

    let latest_height = ctx_b.host_height()?;
    if msg.packet.timeout_height_on_b.has_expired(latest_height) {
        return Err(PacketError::InsufficientPacketHeight {
            chain_height: latest_height,
            timeout_height: msg.packet.timeout_height_on_b,
        }
        .into());
    }

    let latest_timestamp = ctx_b.host_timestamp()?;
    if msg.packet.timeout_timestamp_on_b.has_expired(&latest_timestamp) {
        return Err(PacketError::InsufficientPacketTimestamp {
            chain_timestamp: latest_timestamp,
            timeout_timestamp: msg.packet.timeout_timestamp_on_b,
        }
        .into());
    }

    // Verify proofs
    {
        let (client_state_of_a_on_b, consensus_state_of_a_on_b) =
            counterparty_client(ctx_b, &conn_end_on_b, msg.proof_height_on_a)?;

        let expected_commitment_on_a = compute_packet_commitment(
            &msg.packet.data,
            &msg.packet.timeout_height_on_b,
            &msg.packet.timeout_timestamp_on_b,
        );
        let commitment_path_on_a = CommitmentPath::new(
            &msg.packet.port_id_on_a,
            &msg.packet.chan_id_on_a,
            msg.packet.seq_on_a,
        );

        verify_conn_delay_passed(ctx_b, msg.proof_height_on_a, &conn_end_on_b)?;

        // Verify the proof for the packet against the chain store.
        client_state_of_a_on_b
            .verify_membership(
                conn_end_on_b.counterparty().prefix(),
                &msg.proof_commitment_on_a,
                consensus_state_of_a_on_b.root(),
                Path::Commitment(commitment_path_on_a),
                expected_commitment_on_a.into_vec(),
            )
            .map_err(|e| PacketError::FailedPacketVerification {
                sequence: msg.packet.seq_on_a,
                client_error: e,
            })?;
    }

    if chan_end_on_b.ordering == Order::Ordered {
        let seq_recv_path_on_b =
            SeqRecvPath::new(&msg.packet.port_id_on_b, &msg.packet.chan_id_on_b);
        let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;
        if msg.packet.seq_on_a > next_seq_recv {
            return Err(PacketError::MismatchedPacketSequences {
                expected: next_seq_recv,
                actual: msg.packet.seq_on_a,
            }
            .into());
        }
    }

    if !packet_already_received(ctx_b, chan_end_on_b.ordering, &msg.packet)? {
        // Case where the recvPacket is successful and an
        // acknowledgement will be written (not a no-op)
        validate_write_acknowledgement(ctx_b, &msg.packet)?;
    }

    Ok(())
}

/// Unordered channels keep a receipt per sequence; ordered channels consider
/// everything below the next receive sequence as delivered.
fn packet_already_received<Ctx>(
    ctx_b: &Ctx,
    ordering: Order,
    packet: &Packet,
) -> Result<bool, ContextError>
where
    Ctx: ValidationContext,
{
    let received = match ordering {
        Order::Unordered => {
            let receipt_path_on_b = ReceiptPath::new(
                &packet.port_id_on_b,
                &packet.chan_id_on_b,
                packet.seq_on_a,
            );
            ctx_b.get_packet_receipt(&receipt_path_on_b)?.is_ok()
        }
        Order::Ordered => {
            let seq_recv_path_on_b = SeqRecvPath::new(&packet.port_id_on_b, &packet.chan_id_on_b);
            let next_seq_recv = ctx_b.get_next_sequence_recv(&seq_recv_path_on_b)?;
            packet.seq_on_a < next_seq_recv
        }
    };

    Ok(received)
}

fn validate_write_acknowledgement<Ctx>(ctx_b: &Ctx, packet: &Packet) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let ack_path_on_b = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    if ctx_b.get_packet_acknowledgement(&ack_path_on_b)?.is_some() {
        return Err(PacketError::DuplicateAcknowledgement(packet.seq_on_a).into());
    }

    Ok(())
}
