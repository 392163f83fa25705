//! ICS4 (channel) context.
//!
//! The narrow slice of the host an application needs to send packets on its
//! own, outside of a relayed message.

use ibc_tao_channel_types::channel::ChannelEnd;
use ibc_tao_channel_types::commitment::PacketCommitment;
use ibc_tao_client_context::ClientValidationContext;
use ibc_tao_connection::types::ConnectionEnd;
use ibc_tao_handler_types::error::ContextError;
use ibc_tao_handler_types::events::IbcEvent;
use ibc_tao_host::types::identifiers::{ConnectionId, Sequence};
use ibc_tao_host::types::path::{ChannelEndPath, CommitmentPath, SeqSendPath};
use ibc_tao_host::{ExecutionContext, ValidationContext};
use ibc_tao_router::types::capability::{Capability, CapabilityName};

/// Methods required in send packet validation, to be implemented by the host
pub trait SendPacketValidationContext {
    type V: ClientValidationContext;

    /// Retrieve the context that implements all clients' `ValidationContext`.
    fn get_client_validation_context(&self) -> &Self::V;

    /// Returns the ChannelEnd for the given `port_id` and `chan_id`.
    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError>;

    /// Returns the ConnectionState for the given identifier `connection_id`.
    fn connection_end(&self, connection_id: &ConnectionId) -> Result<ConnectionEnd, ContextError>;

    fn get_next_sequence_send(&self, seq_send_path: &SeqSendPath)
        -> Result<Sequence, ContextError>;

    fn authenticate_capability(
        &self,
        name: &CapabilityName,
        capability: &Capability,
    ) -> Result<(), ContextError>;
}

impl<T> SendPacketValidationContext for T
where
    T: ValidationContext,
{
    type V = T::V;

    fn get_client_validation_context(&self) -> &Self::V {
        ValidationContext::get_client_validation_context(self)
    }

    fn channel_end(&self, channel_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError> {
        ValidationContext::channel_end(self, channel_end_path)
    }

    fn connection_end(&self, connection_id: &ConnectionId) -> Result<ConnectionEnd, ContextError> {
        ValidationContext::connection_end(self, connection_id)
    }

    fn get_next_sequence_send(
        &self,
        seq_send_path: &SeqSendPath,
    ) -> Result<Sequence, ContextError> {
        ValidationContext::get_next_sequence_send(self, seq_send_path)
    }

    fn authenticate_capability(
        &self,
        name: &CapabilityName,
        capability: &Capability,
    ) -> Result<(), ContextError> {
        ValidationContext::authenticate_capability(self, name, capability)
    }
}

/// Methods required in send packet execution, to be implemented by the host
pub trait SendPacketExecutionContext: SendPacketValidationContext {
    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError>;

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError>;

    /// Ibc events
    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ContextError>;

    /// Logging facility
    fn log_message(&mut self, message: String) -> Result<(), ContextError>;
}

impl<T> SendPacketExecutionContext for T
where
    T: ExecutionContext,
{
    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        ExecutionContext::store_next_sequence_send(self, seq_send_path, seq)
    }

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError> {
        ExecutionContext::store_packet_commitment(self, commitment_path, commitment)
    }

    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ContextError> {
        ExecutionContext::emit_ibc_event(self, event)
    }

    fn log_message(&mut self, message: String) -> Result<(), ContextError> {
        ExecutionContext::log_message(self, message)
    }
}
