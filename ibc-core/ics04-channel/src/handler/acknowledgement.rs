use ibc_tao_channel_types::channel::{Counterparty, Order, State};
use ibc_tao_channel_types::commitment::{compute_ack_commitment, compute_packet_commitment};
use ibc_tao_channel_types::error::PacketError;
use ibc_tao_channel_types::events::AcknowledgePacket;
use ibc_tao_channel_types::msgs::MsgAcknowledgement;
use ibc_tao_client_context::prelude::*;
use ibc_tao_connection::delay::verify_conn_delay_passed;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::{IbcEvent, MessageEvent};
use ibc_tao_handler_types::response::ResponseResultType;
use ibc_tao_host::types::path::{AckPath, ChannelEndPath, CommitmentPath, Path, SeqAckPath};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_router::module::Module;
use ibc_tao_router::types::capability::{Capability, CapabilityName};

use super::{counterparty_client, emit_module_extras, open_connection};

pub fn acknowledgement_packet_validate<ValCtx>(
    ctx_a: &ValCtx,
    module: &dyn Module,
    chan_cap: &Capability,
    msg: &MsgAcknowledgement,
) -> Result<(), ContextError>
where
    ValCtx: ValidationContext,
{
    validate(ctx_a, chan_cap, msg)?;

    module
        .on_acknowledgement_packet_validate(&msg.packet, &msg.acknowledgement, &msg.signer)
        .map_err(ContextError::PacketError)
}

pub fn acknowledgement_packet_execute<ExecCtx>(
    ctx_a: &mut ExecCtx,
    module: &mut dyn Module,
    msg: MsgAcknowledgement,
) -> Result<ResponseResultType, ContextError>
where
    ExecCtx: ExecutionContext,
{
    let chan_end_path_on_a =
        ChannelEndPath::new(&msg.packet.port_id_on_a, &msg.packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;
    let conn_id_on_a = &chan_end_on_a.connection_hops()[0];

    let commitment_path_on_a = CommitmentPath::new(
        &msg.packet.port_id_on_a,
        &msg.packet.chan_id_on_a,
        msg.packet.seq_on_a,
    );

    // The packet was already acknowledged, most likely by another relayer.
    if ctx_a.get_packet_commitment(&commitment_path_on_a)?.is_none() {
        return Ok(ResponseResultType::Noop);
    };

    let (extras, cb_result) =
        module.on_acknowledgement_packet_execute(&msg.packet, &msg.acknowledgement, &msg.signer);

    cb_result?;

    // apply state changes
    {
        ctx_a.delete_packet_commitment(&commitment_path_on_a)?;

        if let Order::Ordered = chan_end_on_a.ordering {
            // validation checked `seq_on_a == next_seq_ack`
            let seq_ack_path_on_a =
                SeqAckPath::new(&msg.packet.port_id_on_a, &msg.packet.chan_id_on_a);
            ctx_a.store_next_sequence_ack(&seq_ack_path_on_a, msg.packet.seq_on_a.increment())?;
        }
    }

    // emit events and logs
    {
        ctx_a.log_message(format!(
            "success: packet acknowledgement with sequence {}",
            msg.packet.seq_on_a
        ))?;

        let event = IbcEvent::AcknowledgePacket(AcknowledgePacket::new(
            msg.packet,
            chan_end_on_a.ordering,
            conn_id_on_a.clone(),
        ));
        ctx_a.emit_ibc_event(IbcEvent::Message(MessageEvent::Channel))?;
        ctx_a.emit_ibc_event(event)?;

        emit_module_extras(ctx_a, extras)?;
    }

    Ok(ResponseResultType::Success)
}

fn validate<Ctx>(
    ctx_a: &Ctx,
    chan_cap: &Capability,
    msg: &MsgAcknowledgement,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_a.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;

    ctx_a.authenticate_capability(
        &CapabilityName::channel(&packet.port_id_on_a, &packet.chan_id_on_a),
        chan_cap,
    )?;

    let chan_end_path_on_a = ChannelEndPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
    let chan_end_on_a = ctx_a.channel_end(&chan_end_path_on_a)?;

    chan_end_on_a.verify_state_matches(&State::Open)?;

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

    let conn_end_on_a = open_connection(ctx_a, chan_end_on_a.connection_hops())?;

    let commitment_path_on_a =
        CommitmentPath::new(&packet.port_id_on_a, &packet.chan_id_on_a, packet.seq_on_a);

    // Verify packet commitment
    let Some(commitment_on_a) = ctx_a.get_packet_commitment(&commitment_path_on_a)? else {
        // Already acknowledged: `execute` turns this message into a no-op.
        return Ok(());
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

    if let Order::Ordered = chan_end_on_a.ordering {
        let seq_ack_path_on_a = SeqAckPath::new(&packet.port_id_on_a, &packet.chan_id_on_a);
        let next_seq_ack = ctx_a.get_next_sequence_ack(&seq_ack_path_on_a)?;
        if packet.seq_on_a != next_seq_ack {
            return Err(PacketError::MismatchedPacketSequences {
                expected: next_seq_ack,
                actual: packet.seq_on_a,
            }
            .into());
        }
    }

    // Verify proofs
    {
        let (client_state_of_b_on_a, consensus_state_of_b_on_a) =
            counterparty_client(ctx_a, &conn_end_on_a, msg.proof_height_on_b)?;

        let ack_commitment = compute_ack_commitment(&msg.acknowledgement);
        let ack_path_on_b =
            AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

        verify_conn_delay_passed(ctx_a, msg.proof_height_on_b, &conn_end_on_a)?;

        // Verify the proof for the packet against the chain store.
        client_state_of_b_on_a
            .verify_membership(
                conn_end_on_a.counterparty().prefix(),
                &msg.proof_acked_on_b,
                consensus_state_of_b_on_a.root(),
                Path::Ack(ack_path_on_b),
                ack_commitment.into_vec(),
            )
            .map_err(|e| PacketError::FailedPacketVerification {
                sequence: packet.seq_on_a,
                client_error: e,
            })?;
    }

    Ok(())
}
