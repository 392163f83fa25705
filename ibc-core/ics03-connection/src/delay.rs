//! Connection delay: a packet proof is only usable once both the delay time
//! and the derived block delay have passed since the client learned the
//! proof height.

use ibc_tao_client_context::ClientValidationContext;
use ibc_tao_client_types::Height;
use ibc_tao_connection_types::error::ConnectionError;
use ibc_tao_connection_types::ConnectionEnd;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_host::ValidationContext;

pub fn verify_conn_delay_passed<Ctx>(
    ctx: &Ctx,
    packet_proof_height: Height,
    connection_end: &ConnectionEnd,
) -> Result<(), ContextError>
where
    Ctx: ValidationContext,
{
    let current_host_time = ctx.host_timestamp()?;
    let current_host_height = ctx.host_height()?;

    // When and where the host processed the header for `packet_proof_height`.
    let (processed_time, processed_height) = ctx
        .get_client_validation_context()
        .client_update_meta(connection_end.client_id(), &packet_proof_height)?;

    let delay_period_time = connection_end.delay_period();
    let delay_period_blocks = ctx.block_delay(&delay_period_time);

    let earliest_valid_time =
        (processed_time + delay_period_time).map_err(ConnectionError::TimestampOverflow)?;
    if current_host_time < earliest_valid_time {
        return Err(ConnectionError::NotEnoughTimeElapsed {
            current_host_time,
            earliest_valid_time,
        }
        .into());
    }

    let earliest_valid_height = processed_height.add(delay_period_blocks);
    if current_host_height < earliest_valid_height {
        return Err(ConnectionError::NotEnoughBlocksElapsed {
            current_host_height,
            earliest_valid_height,
        }
        .into());
    }

    Ok(())
}
