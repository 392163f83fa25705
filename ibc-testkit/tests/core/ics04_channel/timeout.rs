use core::time::Duration;

use ibc_tao::channel::types::channel::{Order, State};
use ibc_tao::channel::types::error::PacketError;
use ibc_tao::channel::types::packet::Packet;
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::response::ResponseResultType;
use ibc_tao::host::types::identifiers::ClientId;
use ibc_tao::host::types::path::CommitmentPath;
use ibc_tao::host::ValidationContext;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::core::channel::{default_open_channel, OpenChannel};
use ibc_tao_testkit::relayer::error::RelayerError;
use ibc_tao_testkit::relayer::utils::{
    packet_ack_on_a, packet_recv_on_b, packet_timeout_on_a, update_client_on_a_with_sync,
};
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::{port_id, PING};
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

/// How far past the latest block of `B` a packet expires.
enum Deadline {
    Blocks(u64),
    Seconds(u64),
}

/// A packet sent by `A` and not yet settled.
struct Pending {
    ctx_a: MockContext,
    ctx_b: MockContext,
    client_id_on_a: ClientId,
    client_id_on_b: ClientId,
    packet: Packet,
}

fn pending(ordering: Order, deadline: Deadline) -> Pending {
    let OpenChannel {
        relayer,
        client_id_on_a,
        client_id_on_b,
        chan_id_on_a,
        ..
    } = default_open_channel(ordering);
    let (mut ctx_a, ctx_b) = relayer.into_contexts();

    let (timeout_height, timeout_timestamp) = match deadline {
        Deadline::Blocks(blocks) => (
            TimeoutHeight::At(ctx_b.latest_height().add(blocks)),
            TimeoutTimestamp::Never,
        ),
        Deadline::Seconds(secs) => (
            TimeoutHeight::Never,
            TimeoutTimestamp::At((ctx_b.latest_timestamp() + Duration::from_secs(secs)).unwrap()),
        ),
    };

    let packet = ctx_a
        .send_packet_on(&chan_id_on_a, PING.to_vec(), timeout_height, timeout_timestamp)
        .unwrap();

    Pending {
        ctx_a,
        ctx_b,
        client_id_on_a,
        client_id_on_b,
        packet,
    }
}

impl Pending {
    /// Moves `B` to the packet deadline and lets `A` learn about it.
    fn expire(&mut self) {
        while !self
            .packet
            .timed_out(&self.ctx_b.latest_timestamp(), self.ctx_b.latest_height())
        {
            self.ctx_b.advance_time(Duration::from_secs(1));
        }
        self.sync_a();
    }

    fn sync_a(&mut self) {
        update_client_on_a_with_sync(
            &mut self.ctx_a,
            &self.ctx_b,
            self.client_id_on_a.clone(),
            dummy_signer(),
        )
        .unwrap();
    }

    fn timeout(&mut self) -> Result<ResponseResultType, RelayerError> {
        packet_timeout_on_a(
            &mut self.ctx_a,
            &self.ctx_b,
            self.packet.clone(),
            dummy_signer(),
        )
    }

    fn commitment_on_a(&self) -> bool {
        self.ctx_a
            .ibc_store()
            .get_packet_commitment(&CommitmentPath::new(
                &self.packet.port_id_on_a,
                &self.packet.chan_id_on_a,
                self.packet.seq_on_a,
            ))
            .unwrap()
            .is_some()
    }
}

#[fixture]
fn unordered() -> Pending {
    pending(Order::Unordered, Deadline::Blocks(1))
}

/// Leaves `B` room to receive the packet before it expires.
#[fixture]
fn unordered_far() -> Pending {
    pending(Order::Unordered, Deadline::Blocks(100))
}

#[rstest]
fn timeout_ok(mut unordered: Pending) {
    unordered.expire();

    let result = unordered.timeout().unwrap();

    assert_eq!(result, ResponseResultType::Success);
    assert!(!unordered.commitment_on_a());
    assert_eq!(
        unordered.ctx_a.ping_pong.state().lock().timed_out,
        vec![unordered.packet.seq_on_a]
    );
    assert!(unordered
        .ctx_a
        .channel_end(&port_id(), &unordered.packet.chan_id_on_a)
        .unwrap()
        .is_open());

    let Some(IbcEvent::TimeoutPacket(event)) = unordered.ctx_a.last_event() else {
        panic!("timeout packet event expected");
    };
    assert_eq!(event.packet(), &unordered.packet);
}

#[rstest]
fn timeout_by_timestamp_ok() {
    let mut pending = pending(Order::Unordered, Deadline::Seconds(5));
    pending.expire();

    assert_eq!(pending.timeout().unwrap(), ResponseResultType::Success);
    assert!(!pending.commitment_on_a());
}

#[rstest]
fn ordered_timeout_closes_the_channel() {
    let mut pending = pending(Order::Ordered, Deadline::Blocks(1));
    pending.expire();

    assert_eq!(pending.timeout().unwrap(), ResponseResultType::Success);

    let chan_id_on_a = pending.packet.chan_id_on_a.clone();
    assert_eq!(
        pending
            .ctx_a
            .channel_end(&port_id(), &chan_id_on_a)
            .unwrap()
            .state(),
        &State::Closed
    );

    let events = pending.ctx_a.events();
    let timeout_at = events
        .iter()
        .position(|e| matches!(e, IbcEvent::TimeoutPacket(_)))
        .unwrap();
    let Some(IbcEvent::ChannelClosed(closed)) = pending.ctx_a.last_event() else {
        panic!("channel closed event expected last");
    };
    assert_eq!(closed.chan_id_on_a(), &chan_id_on_a);
    assert!(timeout_at < events.len() - 1);
}

#[rstest]
#[case::one_block_short(1, false)]
#[case::at_the_timeout_height(2, true)]
#[test_log::test]
fn timeout_is_proven_from_the_timeout_height_on(#[case] blocks_on_b: u64, #[case] expired: bool) {
    let mut pending = pending(Order::Unordered, Deadline::Blocks(2));
    let TimeoutHeight::At(timeout_height) = pending.packet.timeout_height_on_b else {
        panic!("height timeout expected");
    };

    for _ in 0..blocks_on_b {
        pending.ctx_b.advance_block();
    }
    pending.sync_a();
    assert_eq!(pending.ctx_b.latest_height() >= timeout_height, expired);

    let res = pending.timeout();

    if expired {
        assert_eq!(res.unwrap(), ResponseResultType::Success);
        assert!(!pending.commitment_on_a());
        return;
    }

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("timeout before the deadline must fail: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::PacketError(PacketError::PacketTimeoutNotReached { .. })
        ),
        "{e:?}"
    );
    assert!(pending.commitment_on_a());
}

#[rstest]
fn received_packet_cannot_time_out(#[from(unordered_far)] mut unordered: Pending) {
    update_client_on_a_with_sync(
        &mut unordered.ctx_b,
        &unordered.ctx_a,
        unordered.client_id_on_b.clone(),
        dummy_signer(),
    )
    .unwrap();
    packet_recv_on_b(
        &mut unordered.ctx_b,
        &unordered.ctx_a,
        unordered.packet.clone(),
        dummy_signer(),
    )
    .unwrap();
    unordered.expire();

    let res = unordered.timeout();

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("timeout of a received packet must fail: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::PacketError(PacketError::FailedPacketVerification { .. })
        ),
        "{e:?}"
    );
    assert!(unordered.ctx_a.ping_pong.state().lock().timed_out.is_empty());
}

#[rstest]
fn timeout_after_acknowledgement_is_a_noop(#[from(unordered_far)] mut unordered: Pending) {
    update_client_on_a_with_sync(
        &mut unordered.ctx_b,
        &unordered.ctx_a,
        unordered.client_id_on_b.clone(),
        dummy_signer(),
    )
    .unwrap();
    let ack = packet_recv_on_b(
        &mut unordered.ctx_b,
        &unordered.ctx_a,
        unordered.packet.clone(),
        dummy_signer(),
    )
    .unwrap()
    .unwrap();
    unordered.expire();
    packet_ack_on_a(
        &mut unordered.ctx_a,
        &unordered.ctx_b,
        unordered.packet.clone(),
        ack,
        dummy_signer(),
    )
    .unwrap();

    assert_eq!(unordered.timeout().unwrap(), ResponseResultType::Noop);
    assert!(unordered.ctx_a.ping_pong.state().lock().timed_out.is_empty());
}
