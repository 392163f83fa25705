use core::fmt::Debug;
use core::time::Duration;

use ibc_tao::channel::handler::{send_packet, write_acknowledgement};
use ibc_tao::channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use ibc_tao::channel::types::channel::ChannelEnd;
use ibc_tao::channel::types::error::ChannelError;
use ibc_tao::channel::types::packet::Packet;
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::client::context::prelude::*;
use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentProofBytes;
use ibc_tao::connection::types::ConnectionEnd;
use ibc_tao::entrypoint::dispatch;
use ibc_tao::handler::ante::{AnteError, ExecMode, RedundancyFilter};
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::handler::types::response::MsgResponse;
use ibc_tao::host::types::identifiers::{ChannelId, ClientId, ConnectionId, PortId};
use ibc_tao::host::types::path::{ChannelEndPath, Path, SeqSendPath, UpgradeClientPath};
use ibc_tao::host::ValidationContext;
use ibc_tao::primitives::{Any, Timestamp, ToVec};
use ibc_tao::router::types::capability::{Capability, CapabilityName};
use ibc_tao::router::types::error::RouterError;
use ibc_tao::router::types::module::ModuleId;

use crate::fixtures::core::context::MockContextConfig;
use crate::hosts::MockBlock;
use crate::testapp::ibc::applications::ping_pong::{port_id, PingPongModule, MODULE_ID_STR};
use crate::testapp::ibc::clients::mock::client_state::MockClientState;
use crate::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use crate::testapp::ibc::clients::mock::header::MockHeader;
use crate::testapp::ibc::clients::AnyClientState;
use crate::testapp::ibc::core::router::MockRouter;
use crate::testapp::ibc::core::types::MockIbcStore;

/// A test chain: an IBC store on top of an in-memory host, a router with a
/// [`PingPongModule`] bound to its port, and the helpers a test or a relayer
/// needs to drive it.
///
/// Every successfully delivered message is followed by a new block, so that
/// the state it wrote can be proven to a counterparty right away.
pub struct MockContext {
    pub ibc_store: MockIbcStore,
    pub ibc_router: MockRouter,
    pub ping_pong: PingPongModule,
    check_state: Option<CheckState>,
}

/// Mempool view of the chain: starts from the delivered state at each block
/// and accumulates the transactions admitted since.
struct CheckState {
    ibc_store: MockIbcStore,
    ibc_router: MockRouter,
}

impl Debug for MockContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MockContext")
            .field("chain_id", &self.chain_id())
            .field("latest_height", &self.latest_height())
            .field("ibc_store", &self.ibc_store)
            .finish_non_exhaustive()
    }
}

/// Returns a [`MockContext`] with bare default parameters.
impl Default for MockContext {
    fn default() -> Self {
        MockContextConfig::builder().build()
    }
}

impl From<MockContextConfig> for MockContext {
    fn from(config: MockContextConfig) -> Self {
        let ping_pong = if config.async_acks {
            PingPongModule::new().with_async_acks()
        } else {
            PingPongModule::new()
        };

        let mut ibc_store = MockIbcStore::new(config.host_params(), config.params);
        ibc_store
            .capabilities
            .bind_port(&port_id(), ModuleId::from(MODULE_ID_STR))
            .expect("never fails on a fresh store");

        Self {
            ibc_store,
            ibc_router: MockRouter::new_with_ping_pong(&ping_pong),
            ping_pong,
            check_state: None,
        }
    }
}

impl MockContext {
    pub fn ibc_store(&self) -> &MockIbcStore {
        &self.ibc_store
    }

    pub fn ibc_store_mut(&mut self) -> &mut MockIbcStore {
        self.check_state = None;
        &mut self.ibc_store
    }

    pub fn chain_id(&self) -> &str {
        &self.ibc_store.host.chain_id
    }

    pub fn latest_height(&self) -> Height {
        self.ibc_store.host.latest_height()
    }

    pub fn latest_timestamp(&self) -> Timestamp {
        self.ibc_store.host.latest_timestamp()
    }

    pub fn host_block(&self, height: &Height) -> Option<&MockBlock> {
        self.ibc_store.host.block_at(height)
    }

    /// Commits a new block one block time after the latest one.
    pub fn advance_block(&mut self) {
        let block_time = self.ibc_store.host.block_time;
        self.advance_time(block_time);
    }

    /// Commits a single block `elapsed` after the latest one. The mempool
    /// check state restarts from the committed state.
    pub fn advance_time(&mut self, elapsed: Duration) {
        self.ibc_store.commit_block(elapsed);
        self.check_state = None;
    }

    pub fn advance_block_up_to_height(mut self, target_height: Height) -> Self {
        let latest_height = self.latest_height();
        if target_height.revision_number() != latest_height.revision_number() {
            panic!("Cannot advance block to a different revision number");
        } else if target_height.revision_height() < latest_height.revision_height() {
            panic!("Cannot advance block to a lower height");
        }

        while self.latest_height() < target_height {
            self.advance_block();
        }

        self
    }

    /// Validates and executes `msg`, then commits a block. A failed message
    /// leaves the IBC store as it was before.
    ///
    /// The state of the application module is not part of the checkpoint.
    pub fn deliver(&mut self, msg: MsgEnvelope) -> Result<MsgResponse, ContextError> {
        let checkpoint = self.ibc_store.clone();

        match dispatch(&mut self.ibc_store, &mut self.ibc_router, msg) {
            Ok(response) => {
                self.advance_block();
                Ok(response)
            }
            Err(e) => {
                tracing::debug!(chain_id = %self.chain_id(), error = %e, "message failed, rolled back");
                self.ibc_store = checkpoint;
                Err(e)
            }
        }
    }

    /// Runs the mempool admission check on a transaction of `msgs`.
    ///
    /// The messages are executed against the check state of the current
    /// block, never against the delivered state. An admitted transaction
    /// stays in the check state, so relaying the same packets again before
    /// the next block is redundant. A rejected one leaves no trace.
    pub fn check_tx(&mut self, msgs: &[MsgEnvelope]) -> Result<(), AnteError> {
        let check_state = self.check_state.get_or_insert_with(|| CheckState {
            ibc_store: self.ibc_store.clone(),
            ibc_router: MockRouter::new_with_ping_pong(&PingPongModule::new()),
        });

        let mut ibc_store = check_state.ibc_store.clone();
        RedundancyFilter.ante_handle(
            &mut ibc_store,
            &mut check_state.ibc_router,
            msgs,
            ExecMode::Check,
        )?;
        check_state.ibc_store = ibc_store;

        Ok(())
    }

    /// Binds `port_id` to `module_id`, as a host does for each of its
    /// applications at genesis.
    pub fn bind_port(
        &mut self,
        port_id: &PortId,
        module_id: ModuleId,
    ) -> Result<Capability, RouterError> {
        self.check_state = None;
        self.ibc_store.capabilities.bind_port(port_id, module_id)
    }

    /// Proof over the whole provable store as of `height`.
    pub fn proof_at(&self, height: &Height) -> Option<CommitmentProofBytes> {
        self.host_block(height)
            .map(|block| block.snapshot.to_proof_bytes())
    }

    pub fn header_at(&self, height: &Height) -> Option<MockHeader> {
        self.ibc_store.host.header_at(height)
    }

    /// A light client state of this chain, trusting it up to `height`.
    pub fn client_state_of_host(&self, height: Height) -> MockClientState {
        self.ibc_store.host.client_state_at(height)
    }

    pub fn consensus_state_of_host(&self, height: &Height) -> Option<MockConsensusState> {
        self.host_block(height).map(MockBlock::consensus_state)
    }

    pub fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, ContextError> {
        self.ibc_store
            .get_client_validation_context()
            .client_state(client_id)
    }

    pub fn client_latest_height(&self, client_id: &ClientId) -> Result<Height, ContextError> {
        Ok(self.client_state(client_id)?.latest_height())
    }

    pub fn connection_end(&self, conn_id: &ConnectionId) -> Result<ConnectionEnd, ContextError> {
        self.ibc_store.connection_end(conn_id)
    }

    pub fn channel_end(
        &self,
        port_id: &PortId,
        chan_id: &ChannelId,
    ) -> Result<ChannelEnd, ContextError> {
        self.ibc_store
            .channel_end(&ChannelEndPath::new(port_id, chan_id))
    }

    /// Commits an upgrade plan: the client and consensus states that clients
    /// of this chain move to once they have seen `plan_height`.
    pub fn schedule_upgrade(
        &mut self,
        plan_height: u64,
        upgraded_client_state: MockClientState,
        upgraded_consensus_state: MockConsensusState,
    ) {
        self.ibc_store.write(
            Path::UpgradeClient(UpgradeClientPath::UpgradedClientState(plan_height)),
            Any::from(upgraded_client_state).to_vec(),
        );
        self.ibc_store.write(
            Path::UpgradeClient(UpgradeClientPath::UpgradedClientConsensusState(plan_height)),
            Any::from(upgraded_consensus_state).to_vec(),
        );
        self.advance_block();
    }

    /// Sends `data` from the ping-pong module over `(port_id, chan_id)`.
    ///
    /// The sequence is the channel's next send sequence and the counterparty
    /// is read from the channel end.
    pub fn send_packet_on(
        &mut self,
        chan_id: &ChannelId,
        data: Vec<u8>,
        timeout_height_on_b: TimeoutHeight,
        timeout_timestamp_on_b: TimeoutTimestamp,
    ) -> Result<Packet, ContextError> {
        let port_id = port_id();
        let chan_end = self.channel_end(&port_id, chan_id)?;

        let counterparty = chan_end.counterparty();
        let chan_id_on_b = counterparty
            .channel_id()
            .cloned()
            .ok_or(ChannelError::MissingCounterparty)?;

        let seq_on_a = self
            .ibc_store
            .get_next_sequence_send(&SeqSendPath::new(&port_id, chan_id))?;

        let packet = Packet {
            seq_on_a,
            port_id_on_a: port_id.clone(),
            chan_id_on_a: chan_id.clone(),
            port_id_on_b: counterparty.port_id().clone(),
            chan_id_on_b,
            data,
            timeout_height_on_b,
            timeout_timestamp_on_b,
        };

        let chan_cap = self
            .ping_pong
            .channel_capability(&port_id, chan_id)
            .ok_or_else(|| RouterError::CapabilityNotFound {
                name: CapabilityName::channel(&port_id, chan_id),
            })?;

        send_packet(&mut self.ibc_store, &chan_cap, packet.clone())?;
        self.advance_block();

        Ok(packet)
    }

    /// Acknowledges every packet the ping-pong module deferred, answering
    /// with `status`, and commits a block.
    pub fn write_deferred_acks(
        &mut self,
        status: AcknowledgementStatus,
    ) -> Result<Vec<(Packet, Acknowledgement)>, ContextError> {
        let deferred = core::mem::take(&mut self.ping_pong.state().lock().deferred);
        let mut written = Vec::with_capacity(deferred.len());

        for packet in deferred {
            let chan_cap = self
                .ping_pong
                .channel_capability(&packet.port_id_on_b, &packet.chan_id_on_b)
                .ok_or_else(|| RouterError::CapabilityNotFound {
                    name: CapabilityName::channel(&packet.port_id_on_b, &packet.chan_id_on_b),
                })?;

            let ack = Acknowledgement::try_from(status.clone())?;
            write_acknowledgement(&mut self.ibc_store, &chan_cap, packet.clone(), ack.clone())?;
            written.push((packet, ack));
        }

        self.advance_block();

        Ok(written)
    }

    pub fn events(&self) -> &[IbcEvent] {
        &self.ibc_store.events
    }

    pub fn last_event(&self) -> Option<&IbcEvent> {
        self.ibc_store.events.last()
    }

    pub fn logs(&self) -> &[String] {
        &self.ibc_store.logs
    }
}
