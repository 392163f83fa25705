use ibc_tao::channel::types::channel::Order;
use ibc_tao::channel::types::error::PacketError;
use ibc_tao::channel::types::msgs::{ChannelMsg, MsgChannelCloseInit, PacketMsg};
use ibc_tao::channel::types::packet::Receipt;
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::client::types::Height;
use ibc_tao::handler::ante::{AnteError, ExecMode, RedundancyFilter};
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::host::types::path::ReceiptPath;
use ibc_tao::host::ValidationContext;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::core::channel::{default_open_channel, OpenChannel};
use ibc_tao_testkit::relayer::utils::{msg_recv_packet_on_b, update_client_on_a_with_sync};
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::{port_id, PING};
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

/// A receive message for a packet `A` sent, ready to be checked on `B`.
struct Relay {
    ctx_b: MockContext,
    recv_msg: MsgEnvelope,
    receipt_path: ReceiptPath,
}

#[fixture]
fn relay() -> Relay {
    let OpenChannel {
        relayer,
        client_id_on_b,
        chan_id_on_a,
        ..
    } = default_open_channel(Order::Unordered);
    let (mut ctx_a, mut ctx_b) = relayer.into_contexts();

    let packet = ctx_a
        .send_packet_on(
            &chan_id_on_a,
            PING.to_vec(),
            TimeoutHeight::At(Height::new(0, 1000).unwrap()),
            TimeoutTimestamp::Never,
        )
        .unwrap();

    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b, dummy_signer()).unwrap();

    let receipt_path = ReceiptPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);
    let recv_msg = msg_recv_packet_on_b(&ctx_a, packet, dummy_signer()).unwrap();

    Relay {
        ctx_b,
        recv_msg,
        receipt_path,
    }
}

#[rstest]
fn fresh_relay_is_admitted(relay: Relay) {
    let Relay {
        mut ctx_b,
        recv_msg,
        receipt_path,
    } = relay;

    ctx_b.check_tx(&[recv_msg]).unwrap();

    // The check ran against a copy of the store.
    assert_eq!(
        ctx_b.ibc_store().get_packet_receipt(&receipt_path).unwrap(),
        Receipt::None
    );
}

#[rstest]
fn relay_already_admitted_in_the_block_is_rejected(relay: Relay) {
    let Relay {
        mut ctx_b,
        recv_msg,
        receipt_path,
    } = relay;

    ctx_b.check_tx(&[recv_msg.clone()]).unwrap();

    assert_eq!(
        ctx_b.check_tx(&[recv_msg.clone()]),
        Err(AnteError::RedundantRelay { packet_msgs: 1 })
    );
    assert_eq!(
        ctx_b.ibc_store().get_packet_receipt(&receipt_path).unwrap(),
        Receipt::None
    );

    // Nothing was delivered, so the next block starts from a state without
    // the receipt.
    ctx_b.advance_block();
    ctx_b.check_tx(&[recv_msg]).unwrap();
}

#[rstest]
fn redundant_relay_is_rejected(relay: Relay) {
    let Relay {
        mut ctx_b,
        recv_msg,
        ..
    } = relay;

    ctx_b.deliver(recv_msg.clone()).unwrap();

    assert_eq!(
        ctx_b.check_tx(&[recv_msg]),
        Err(AnteError::RedundantRelay { packet_msgs: 1 })
    );
}

#[rstest]
fn partially_redundant_relay_is_admitted(relay: Relay) {
    let Relay {
        mut ctx_b, recv_msg, ..
    } = relay;

    // The second copy is a no-op once the first one ran, but not the first.
    ctx_b.check_tx(&[recv_msg.clone(), recv_msg]).unwrap();
}

#[rstest]
fn transaction_with_other_messages_is_admitted(relay: Relay) {
    let Relay {
        mut ctx_b,
        recv_msg,
        receipt_path,
    } = relay;

    ctx_b.deliver(recv_msg.clone()).unwrap();

    let close_msg = MsgEnvelope::from(ChannelMsg::from(MsgChannelCloseInit {
        port_id_on_a: port_id(),
        chan_id_on_a: receipt_path.channel_id.clone(),
        signer: dummy_signer(),
    }));

    ctx_b.check_tx(&[recv_msg, close_msg]).unwrap();
}

#[rstest]
fn failing_message_fails_the_check(relay: Relay) {
    let Relay {
        mut ctx_b, recv_msg, ..
    } = relay;

    let MsgEnvelope::Packet(PacketMsg::Recv(mut msg)) = recv_msg.clone() else {
        panic!("receive message expected");
    };
    msg.packet.data = b"tampered".to_vec();

    let res = ctx_b.check_tx(&[MsgEnvelope::from(PacketMsg::from(msg))]);

    assert!(
        matches!(
            res,
            Err(AnteError::Execution(ContextError::PacketError(
                PacketError::FailedPacketVerification { .. }
            )))
        ),
        "{res:?}"
    );

    // A rejected transaction leaves nothing behind in the check state.
    ctx_b.check_tx(&[recv_msg]).unwrap();
}

#[rstest]
fn delivery_mode_is_not_filtered(relay: Relay) {
    let Relay {
        mut ctx_b,
        recv_msg,
        ..
    } = relay;

    ctx_b.deliver(recv_msg.clone()).unwrap();

    let MockContext {
        ibc_store,
        ibc_router,
        ..
    } = &mut ctx_b;
    RedundancyFilter
        .ante_handle(ibc_store, ibc_router, &[recv_msg], ExecMode::Deliver)
        .unwrap();
}
