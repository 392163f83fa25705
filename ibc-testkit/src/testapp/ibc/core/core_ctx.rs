//! Implementation of the host contexts for the mock store.

use core::time::Duration;

use ibc_tao::channel::types::channel::ChannelEnd;
use ibc_tao::channel::types::commitment::{AcknowledgementCommitment, PacketCommitment};
use ibc_tao::channel::types::error::{ChannelError, PacketError};
use ibc_tao::channel::types::packet::Receipt;
use ibc_tao::client::context::prelude::*;
use ibc_tao::client::types::error::ClientError;
use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentPrefix;
use ibc_tao::connection::types::error::ConnectionError;
use ibc_tao::connection::types::ConnectionEnd;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::host::types::identifiers::{ChannelId, ConnectionId, PortId, Sequence};
use ibc_tao::host::types::params::Params;
use ibc_tao::host::types::path::{
    AckPath, ChannelEndPath, ClientConnectionPath, CommitmentPath, ConnectionPath,
    NextChannelSequencePath, NextClientSequencePath, NextConnectionSequencePath, Path,
    ReceiptPath, SeqAckPath, SeqRecvPath, SeqSendPath,
};
use ibc_tao::host::types::store::KvStore;
use ibc_tao::host::{ExecutionContext, ValidationContext};
use ibc_tao::primitives::{Signer, Timestamp, ToVec};
use ibc_tao::router::types::capability::{Capability, CapabilityName};
use ibc_tao::router::types::module::ModuleId;

use super::types::MockIbcStore;
use crate::testapp::ibc::clients::{AnyClientState, AnyConsensusState};

impl MockIbcStore {
    fn missing_sequence(port_id: &PortId, channel_id: &ChannelId) -> ContextError {
        PacketError::MissingNextSequence {
            port_id: port_id.clone(),
            channel_id: channel_id.clone(),
        }
        .into()
    }

    fn self_client_error(reason: String) -> ContextError {
        ConnectionError::InvalidSelfClientState { reason }.into()
    }
}

impl ValidationContext for MockIbcStore {
    type V = Self;
    type HostClientState = AnyClientState;
    type HostConsensusState = AnyConsensusState;

    fn get_client_validation_context(&self) -> &Self::V {
        self
    }

    fn host_height(&self) -> Result<Height, ContextError> {
        Ok(self.host.latest_height())
    }

    fn host_timestamp(&self) -> Result<Timestamp, ContextError> {
        Ok(self.host.latest_timestamp())
    }

    fn host_consensus_state(&self, height: &Height) -> Result<AnyConsensusState, ContextError> {
        self.host
            .block_at(height)
            .map(|block| block.consensus_state().into())
            .ok_or_else(|| ConnectionError::MissingLocalConsensusState { height: *height }.into())
    }

    fn client_counter(&self) -> Result<u64, ContextError> {
        Ok(self.counter(NextClientSequencePath))
    }

    fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError> {
        self.decode(&ConnectionPath::new(conn_id).into())?
            .ok_or_else(|| {
                ConnectionError::ConnectionNotFound {
                    connection_id: conn_id.clone(),
                }
                .into()
            })
    }

    fn validate_self_client(
        &self,
        client_state_of_host_on_counterparty: AnyClientState,
    ) -> Result<(), ContextError> {
        let AnyClientState::Mock(client_state) = client_state_of_host_on_counterparty else {
            return Err(Self::self_client_error(
                "the host is only tracked by mock clients".to_string(),
            ));
        };

        if client_state.is_frozen() {
            return Err(Self::self_client_error("client is frozen".to_string()));
        }

        if client_state.chain_id != self.host.chain_id {
            return Err(Self::self_client_error(format!(
                "client tracks chain `{}`, the host is `{}`",
                client_state.chain_id, self.host.chain_id
            )));
        }

        let host_height = self.host.latest_height();
        if client_state.latest_height > host_height {
            return Err(Self::self_client_error(format!(
                "client height {} is ahead of the host height {host_height}",
                client_state.latest_height
            )));
        }

        Ok(())
    }

    fn commitment_prefix(&self) -> CommitmentPrefix {
        self.commitment_prefix.clone()
    }

    fn connection_counter(&self) -> Result<u64, ContextError> {
        Ok(self.counter(NextConnectionSequencePath))
    }

    fn channel_end(&self, chan_end_path: &ChannelEndPath) -> Result<ChannelEnd, ContextError> {
        self.decode(&chan_end_path.clone().into())?.ok_or_else(|| {
            ChannelError::NonexistentChannel {
                port_id: chan_end_path.0.clone(),
                channel_id: chan_end_path.1.clone(),
            }
            .into()
        })
    }

    fn get_next_sequence_send(
        &self,
        seq_send_path: &SeqSendPath,
    ) -> Result<Sequence, ContextError> {
        self.sequence(seq_send_path.clone())
            .ok_or_else(|| Self::missing_sequence(&seq_send_path.0, &seq_send_path.1))
    }

    fn get_next_sequence_recv(
        &self,
        seq_recv_path: &SeqRecvPath,
    ) -> Result<Sequence, ContextError> {
        self.sequence(seq_recv_path.clone())
            .ok_or_else(|| Self::missing_sequence(&seq_recv_path.0, &seq_recv_path.1))
    }

    fn get_next_sequence_ack(&self, seq_ack_path: &SeqAckPath) -> Result<Sequence, ContextError> {
        self.sequence(seq_ack_path.clone())
            .ok_or_else(|| Self::missing_sequence(&seq_ack_path.0, &seq_ack_path.1))
    }

    fn get_packet_commitment(
        &self,
        commitment_path: &CommitmentPath,
    ) -> Result<Option<PacketCommitment>, ContextError> {
        Ok(self
            .read(&commitment_path.clone().into())
            .map(|bytes| PacketCommitment::from(bytes.to_vec())))
    }

    fn get_packet_receipt(&self, receipt_path: &ReceiptPath) -> Result<Receipt, ContextError> {
        match self.read(&receipt_path.clone().into()) {
            Some(_) => Ok(Receipt::Ok),
            None => Ok(Receipt::None),
        }
    }

    fn get_packet_acknowledgement(
        &self,
        ack_path: &AckPath,
    ) -> Result<Option<AcknowledgementCommitment>, ContextError> {
        Ok(self
            .read(&ack_path.clone().into())
            .map(|bytes| AcknowledgementCommitment::from(bytes.to_vec())))
    }

    fn channel_counter(&self) -> Result<u64, ContextError> {
        Ok(self.counter(NextChannelSequencePath))
    }

    fn max_expected_time_per_block(&self) -> Duration {
        self.max_expected_time_per_block
    }

    fn validate_message_signer(&self, signer: &Signer) -> Result<(), ContextError> {
        if signer.is_empty() {
            return Err(ClientError::EmptySigner.into());
        }
        Ok(())
    }

    fn params(&self) -> Params {
        self.params.clone()
    }

    fn lookup_module_by_port(
        &self,
        port_id: &PortId,
    ) -> Result<(ModuleId, Capability), ContextError> {
        Ok(self.capabilities.lookup_module_by_port(port_id)?)
    }

    fn lookup_module_by_channel(
        &self,
        port_id: &PortId,
        channel_id: &ChannelId,
    ) -> Result<(ModuleId, Capability), ContextError> {
        Ok(self
            .capabilities
            .lookup_module_by_channel(port_id, channel_id)?)
    }

    fn authenticate_capability(
        &self,
        name: &CapabilityName,
        capability: &Capability,
    ) -> Result<(), ContextError> {
        Ok(self.capabilities.verify(name, capability)?)
    }
}

impl ExecutionContext for MockIbcStore {
    type E = Self;

    fn get_client_execution_context(&mut self) -> &mut Self::E {
        self
    }

    fn increase_client_counter(&mut self) -> Result<(), ContextError> {
        self.increase_counter(NextClientSequencePath).ok_or_else(|| {
            ClientError::Other {
                description: "client counter overflow".to_string(),
            }
            .into()
        })
    }

    fn store_connection(
        &mut self,
        connection_path: &ConnectionPath,
        connection_end: ConnectionEnd,
    ) -> Result<(), ContextError> {
        self.write(connection_path.clone().into(), connection_end.to_vec());
        Ok(())
    }

    fn store_connection_to_client(
        &mut self,
        client_connection_path: &ClientConnectionPath,
        conn_id: ConnectionId,
    ) -> Result<(), ContextError> {
        let path: Path = client_connection_path.clone().into();

        // Several connections may share a client; keep them all.
        let mut conn_ids: Vec<ConnectionId> = self.decode(&path)?.unwrap_or_default();
        conn_ids.push(conn_id);
        self.write(path, ToVec::to_vec(&conn_ids));
        Ok(())
    }

    fn increase_connection_counter(&mut self) -> Result<(), ContextError> {
        self.increase_counter(NextConnectionSequencePath)
            .ok_or_else(|| ConnectionError::CounterOverflow.into())
    }

    fn store_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
        commitment: PacketCommitment,
    ) -> Result<(), ContextError> {
        self.write(commitment_path.clone().into(), commitment.into_vec());
        Ok(())
    }

    fn delete_packet_commitment(
        &mut self,
        commitment_path: &CommitmentPath,
    ) -> Result<(), ContextError> {
        self.remove(&commitment_path.clone().into());
        Ok(())
    }

    fn store_packet_receipt(
        &mut self,
        receipt_path: &ReceiptPath,
        receipt: Receipt,
    ) -> Result<(), ContextError> {
        if receipt == Receipt::Ok {
            self.write(receipt_path.clone().into(), vec![1]);
        }
        Ok(())
    }

    fn store_packet_acknowledgement(
        &mut self,
        ack_path: &AckPath,
        ack_commitment: AcknowledgementCommitment,
    ) -> Result<(), ContextError> {
        self.write(ack_path.clone().into(), ack_commitment.into_vec());
        Ok(())
    }

    fn store_channel(
        &mut self,
        channel_end_path: &ChannelEndPath,
        channel_end: ChannelEnd,
    ) -> Result<(), ContextError> {
        self.write(channel_end_path.clone().into(), channel_end.to_vec());
        Ok(())
    }

    fn store_next_sequence_send(
        &mut self,
        seq_send_path: &SeqSendPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.write(seq_send_path.clone().into(), seq.to_vec());
        Ok(())
    }

    fn store_next_sequence_recv(
        &mut self,
        seq_recv_path: &SeqRecvPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.write(seq_recv_path.clone().into(), seq.to_vec());
        Ok(())
    }

    fn store_next_sequence_ack(
        &mut self,
        seq_ack_path: &SeqAckPath,
        seq: Sequence,
    ) -> Result<(), ContextError> {
        self.write(seq_ack_path.clone().into(), seq.to_vec());
        Ok(())
    }

    fn increase_channel_counter(&mut self) -> Result<(), ContextError> {
        self.increase_counter(NextChannelSequencePath)
            .ok_or_else(|| ChannelError::CounterOverflow.into())
    }

    fn new_capability(
        &mut self,
        name: CapabilityName,
        owner: ModuleId,
    ) -> Result<Capability, ContextError> {
        Ok(self.capabilities.new_capability(name, owner)?)
    }

    fn release_capability(&mut self, name: &CapabilityName) -> Result<(), ContextError> {
        Ok(self.capabilities.release(name)?)
    }

    fn application_store(&mut self) -> &mut dyn KvStore {
        &mut self.app_store
    }

    fn emit_ibc_event(&mut self, event: IbcEvent) -> Result<(), ContextError> {
        tracing::debug!(chain_id = %self.host.chain_id, ?event, "emitted event");
        self.events.push(event);
        Ok(())
    }

    fn log_message(&mut self, message: String) -> Result<(), ContextError> {
        tracing::debug!(chain_id = %self.host.chain_id, "{message}");
        self.logs.push(message);
        Ok(())
    }
}
