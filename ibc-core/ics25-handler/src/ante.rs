//! Mempool-side filter that rejects relay transactions in which every
//! packet message was already settled.

use displaydoc::Display;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::msgs::MsgEnvelope;
use ibc_tao_host::ExecutionContext;
use ibc_tao_router::router::Router;

use crate::entrypoint::dispatch;

/// Whether a transaction is being checked for mempool admission or executed
/// as part of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecMode {
    /// Tentative execution against the mempool check state.
    Check,
    /// Final execution while delivering a block.
    Deliver,
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum AnteError {
    /// all `{packet_msgs}` packet messages in the transaction are redundant
    RedundantRelay { packet_msgs: usize },
    /// message execution failed: `{0}`
    Execution(ContextError),
}

impl From<ContextError> for AnteError {
    fn from(err: ContextError) -> Self {
        Self::Execution(err)
    }
}

impl std::error::Error for AnteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::Execution(e) => Some(e),
            Self::RedundantRelay { .. } => None,
        }
    }
}

/// Rejects transactions made only of client updates and packet messages
/// when every packet message turns out to be a no-op.
///
/// Messages are executed against `ctx`, which must be the check state: a
/// packet received here is redundant for later transactions of the same
/// block as well.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedundancyFilter;

impl RedundancyFilter {
    pub fn ante_handle<Ctx>(
        &self,
        ctx: &mut Ctx,
        router: &mut impl Router,
        msgs: &[MsgEnvelope],
        mode: ExecMode,
    ) -> Result<(), AnteError>
    where
        Ctx: ExecutionContext,
    {
        if mode == ExecMode::Deliver {
            return Ok(());
        }

        // Any other message type gives the transaction a purpose of its own.
        if !msgs
            .iter()
            .all(|msg| msg.is_packet_msg() || msg.is_update_client())
        {
            return Ok(());
        }

        let mut packet_msgs = 0;
        let mut redundancies = 0;

        for msg in msgs {
            let response = dispatch(ctx, router, msg.clone())?;

            if let Some(result) = response.packet_result() {
                packet_msgs += 1;
                if result.is_noop() {
                    redundancies += 1;
                }
            }
        }

        if packet_msgs > 0 && redundancies == packet_msgs {
            ctx.log_message(format!(
                "rejected transaction: {redundancies} redundant packet messages"
            ))?;
            return Err(AnteError::RedundantRelay { packet_msgs });
        }

        Ok(())
    }
}
