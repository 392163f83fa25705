use ibc_tao::channel::types::channel::{Order, State};
use ibc_tao::channel::types::error::{ChannelError, PacketError};
use ibc_tao::channel::types::packet::Packet;
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::client::types::Height;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::response::ResponseResultType;
use ibc_tao::host::types::identifiers::{ChannelId, ClientId};
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::core::channel::{default_open_channel, OpenChannel};
use ibc_tao_testkit::relayer::error::RelayerError;
use ibc_tao_testkit::relayer::utils::{
    channel_close_init_on_a, packet_recv_on_b, packet_timeout_on_close_on_a,
    update_client_on_a_with_sync,
};
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::{port_id, PING};
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

struct Sent {
    ctx_a: MockContext,
    ctx_b: MockContext,
    client_id_on_a: ClientId,
    client_id_on_b: ClientId,
    chan_id_on_b: ChannelId,
    packet: Packet,
}

fn sent(ordering: Order) -> Sent {
    let OpenChannel {
        relayer,
        client_id_on_a,
        client_id_on_b,
        chan_id_on_a,
        chan_id_on_b,
        ..
    } = default_open_channel(ordering);
    let (mut ctx_a, ctx_b) = relayer.into_contexts();

    let packet = ctx_a
        .send_packet_on(
            &chan_id_on_a,
            PING.to_vec(),
            TimeoutHeight::At(Height::new(0, 1000).unwrap()),
            TimeoutTimestamp::Never,
        )
        .unwrap();

    Sent {
        ctx_a,
        ctx_b,
        client_id_on_a,
        client_id_on_b,
        chan_id_on_b,
        packet,
    }
}

impl Sent {
    fn close_on_b(&mut self) {
        channel_close_init_on_a(
            &mut self.ctx_b,
            self.chan_id_on_b.clone(),
            port_id(),
            dummy_signer(),
        )
        .unwrap();
    }

    fn timeout_on_close(&mut self) -> Result<ResponseResultType, RelayerError> {
        update_client_on_a_with_sync(
            &mut self.ctx_a,
            &self.ctx_b,
            self.client_id_on_a.clone(),
            dummy_signer(),
        )?;

        packet_timeout_on_close_on_a(
            &mut self.ctx_a,
            &self.ctx_b,
            self.packet.clone(),
            dummy_signer(),
        )
    }
}

#[rstest]
#[case::unordered(Order::Unordered, State::Open)]
#[case::ordered(Order::Ordered, State::Closed)]
#[test_log::test]
fn timeout_on_close_ok(#[case] ordering: Order, #[case] state_on_a: State) {
    let mut sent = sent(ordering);
    sent.close_on_b();

    // The packet is far from its timeout height.
    let result = sent.timeout_on_close().unwrap();

    assert_eq!(result, ResponseResultType::Success);
    assert_eq!(
        sent.ctx_a.ping_pong.state().lock().timed_out,
        vec![sent.packet.seq_on_a]
    );
    assert_eq!(
        sent.ctx_a
            .channel_end(&port_id(), &sent.packet.chan_id_on_a)
            .unwrap()
            .state(),
        &state_on_a
    );
}

#[rstest]
fn open_counterparty_is_rejected() {
    let mut sent = sent(Order::Unordered);
    sent.ctx_b.advance_block();

    let res = sent.timeout_on_close();

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("timeout on close with an open counterparty must fail: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::ChannelError(ChannelError::FailedProofVerification(_))
        ),
        "{e:?}"
    );
    assert!(sent.ctx_a.ping_pong.state().lock().timed_out.is_empty());
}

#[rstest]
fn packet_received_before_the_close_is_rejected() {
    let mut sent = sent(Order::Unordered);

    update_client_on_a_with_sync(
        &mut sent.ctx_b,
        &sent.ctx_a,
        sent.client_id_on_b.clone(),
        dummy_signer(),
    )
    .unwrap();
    packet_recv_on_b(&mut sent.ctx_b, &sent.ctx_a, sent.packet.clone(), dummy_signer()).unwrap();
    sent.close_on_b();

    let res = sent.timeout_on_close();

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("timeout on close of a received packet must fail: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::PacketError(PacketError::FailedPacketVerification { .. })
        ),
        "{e:?}"
    );
}
