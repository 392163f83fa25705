use ibc_tao_channel_types::channel::{ChannelEnd, Counterparty, State};
use ibc_tao_channel_types::error::ChannelError;
use ibc_tao_channel_types::msgs::MsgTimeoutOnClose;
use ibc_tao_client_context::prelude::*;
use ibc_tao_connection::delay::verify_conn_delay_passed;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_host::types::path::{ChannelEndPath, Path};
use ibc_tao_host::ValidationContext;
use ibc_tao_primitives::ToVec;
use ibc_tao_router::types::capability::Capability;

use super::counterparty_client;
use super::timeout::{settlement_channel, verify_unreceived};

/// Unlike a plain timeout, the packet's own timeout need not have elapsed:
/// a closed counterparty channel can never receive it.
pub(super) fn validate<Ctx>(
    ctx_a: &Ctx,
    chan_cap: &Capability,
    msg: &MsgTimeoutOnClose,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    msg.validate_basic()?;

    ctx_a.validate_message_signer(&msg.signer)?;

    let packet = &msg.packet;

    let Some(chan_end_on_a) = settlement_channel(ctx_a, chan_cap, packet)? else {
        return Ok(());
    };

    let conn_id_on_a = chan_end_on_a.connection_hops()[0].clone();
    let conn_end_on_a = ctx_a.connection_end(&conn_id_on_a)?;

    let (client_state_of_b_on_a, consensus_state_of_b_on_a) =
        counterparty_client(ctx_a, &conn_end_on_a, msg.proof_height_on_b)?;

    // Verify the counterparty channel end is closed
    {
        let chan_id_on_b = chan_end_on_a
            .counterparty()
            .channel_id()
            .ok_or(ChannelError::MissingCounterparty)?;
        let conn_id_on_b = conn_end_on_a
            .counterparty()
            .connection_id()
            .ok_or(ChannelError::MissingCounterparty)?;

        let expected_chan_end_on_b = ChannelEnd::new(
            State::Closed,
            *chan_end_on_a.ordering(),
            Counterparty::new(packet.port_id_on_a.clone(), Some(packet.chan_id_on_a.clone())),
            vec![conn_id_on_b.clone()],
            chan_end_on_a.version().clone(),
        )?;

        let chan_end_path_on_b = ChannelEndPath::new(&packet.port_id_on_b, chan_id_on_b);

        client_state_of_b_on_a
            .verify_membership(
                conn_end_on_a.counterparty().prefix(),
                &msg.proof_close_on_b,
                consensus_state_of_b_on_a.root(),
                Path::ChannelEnd(chan_end_path_on_b),
                expected_chan_end_on_b.to_vec(),
            )
            .map_err(ChannelError::FailedProofVerification)?;
    }

    verify_conn_delay_passed(ctx_a, msg.proof_height_on_b, &conn_end_on_a)?;

    verify_unreceived::<Ctx>(
        &client_state_of_b_on_a,
        &consensus_state_of_b_on_a,
        &conn_end_on_a,
        chan_end_on_a.ordering,
        packet,
        msg.next_seq_recv_on_b,
        &msg.proof_unreceived_on_b,
    )
}
