use ibc_tao::channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use ibc_tao::channel::types::channel::Order;
use ibc_tao::channel::types::commitment::compute_ack_commitment;
use ibc_tao::channel::types::error::PacketError;
use ibc_tao::channel::types::packet::{Packet, Receipt};
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::client::types::error::ClientError;
use ibc_tao::client::types::msgs::{ClientMsg, MsgUpdateClient};
use ibc_tao::client::types::{Height, Status};
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::handler::types::response::ResponseResultType;
use ibc_tao::host::types::error::ErrorKind;
use ibc_tao::host::types::identifiers::{ClientId, Sequence};
use ibc_tao::host::types::params::Params;
use ibc_tao::host::types::path::{AckPath, ReceiptPath, SeqRecvPath};
use ibc_tao::host::ValidationContext;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::clients::mock::dummy_forged_header;
use ibc_tao_testkit::fixtures::core::channel::{default_open_channel, open_channel, OpenChannel};
use ibc_tao_testkit::fixtures::core::context::MockContextConfig;
use ibc_tao_testkit::relayer::error::RelayerError;
use ibc_tao_testkit::relayer::utils::{
    packet_ack_on_a, packet_recv_on_b, update_client_on_a_with_sync,
};
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::{ping_key, port_id, PING, PONG};
use ibc_tao_testkit::testapp::ibc::clients::mock::client_state::client_type as mock_client_type;
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

/// Both ends of an open channel, with `A` having sent some packets that
/// `B`'s client already knows about.
struct Sent {
    ctx_a: MockContext,
    ctx_b: MockContext,
    client_id_on_a: ClientId,
    packets: Vec<Packet>,
}

fn far_height() -> TimeoutHeight {
    TimeoutHeight::At(Height::new(0, 1000).unwrap())
}

fn send_on_a(channel: OpenChannel, payloads: &[&[u8]]) -> Sent {
    let OpenChannel {
        relayer,
        client_id_on_a,
        client_id_on_b,
        chan_id_on_a,
        ..
    } = channel;
    let (mut ctx_a, mut ctx_b) = relayer.into_contexts();

    let packets = payloads
        .iter()
        .map(|data| {
            ctx_a
                .send_packet_on(&chan_id_on_a, data.to_vec(), far_height(), TimeoutTimestamp::Never)
                .unwrap()
        })
        .collect();

    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b, dummy_signer()).unwrap();

    Sent {
        ctx_a,
        ctx_b,
        client_id_on_a,
        packets,
    }
}

fn pong() -> Acknowledgement {
    Acknowledgement::try_from(AcknowledgementStatus::success(PONG).unwrap()).unwrap()
}

#[fixture]
fn sent_ping() -> Sent {
    send_on_a(default_open_channel(Order::Unordered), &[PING])
}

#[rstest]
fn recv_packet_ok(sent_ping: Sent) {
    let Sent {
        ctx_a,
        mut ctx_b,
        mut packets,
        ..
    } = sent_ping;
    let packet = packets.remove(0);

    let ack = packet_recv_on_b(&mut ctx_b, &ctx_a, packet.clone(), dummy_signer())
        .unwrap()
        .expect("ping-pong acknowledges synchronously");

    assert_eq!(ack, pong());

    let store = ctx_b.ibc_store();
    let receipt = store
        .get_packet_receipt(&ReceiptPath::new(
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            packet.seq_on_a,
        ))
        .unwrap();
    assert_eq!(receipt, Receipt::Ok);

    let ack_commitment = store
        .get_packet_acknowledgement(&AckPath::new(
            &packet.port_id_on_b,
            &packet.chan_id_on_b,
            packet.seq_on_a,
        ))
        .unwrap();
    assert_eq!(ack_commitment, Some(compute_ack_commitment(&ack)));

    assert_eq!(store.app_value(&ping_key(&packet)), Some(PING));
    assert_eq!(ctx_b.ping_pong.state().lock().received, vec![packet.seq_on_a]);

    assert!(ctx_b.events().iter().any(
        |event| matches!(event, IbcEvent::ReceivePacket(e) if e.packet() == &packet)
    ));
    let Some(IbcEvent::Module(module_event)) = ctx_b.last_event() else {
        panic!("module event expected last");
    };
    assert_eq!(module_event.kind, "ping_pong_recv");
}

#[rstest]
fn second_delivery_is_a_noop(sent_ping: Sent) {
    let Sent {
        ctx_a,
        mut ctx_b,
        mut packets,
        ..
    } = sent_ping;
    let packet = packets.remove(0);

    packet_recv_on_b(&mut ctx_b, &ctx_a, packet.clone(), dummy_signer()).unwrap();
    let events_before = ctx_b.events().len();

    let ack = packet_recv_on_b(&mut ctx_b, &ctx_a, packet, dummy_signer()).unwrap();

    assert_eq!(ack, None);
    assert_eq!(ctx_b.events().len(), events_before);
    assert_eq!(ctx_b.ping_pong.state().lock().received.len(), 1);
}

#[rstest]
fn unexpected_data_gets_an_error_ack() {
    let Sent {
        ctx_a,
        mut ctx_b,
        mut packets,
        ..
    } = send_on_a(default_open_channel(Order::Unordered), &[b"hello"]);
    let packet = packets.remove(0);

    let ack = packet_recv_on_b(&mut ctx_b, &ctx_a, packet.clone(), dummy_signer())
        .unwrap()
        .unwrap();

    let status = AcknowledgementStatus::try_from(&ack).unwrap();
    assert!(!status.is_successful());

    // The application write is discarded together with the failed packet,
    // but the receipt is kept.
    assert_eq!(ctx_b.ibc_store().app_value(&ping_key(&packet)), None);
    assert_eq!(
        ctx_b
            .ibc_store()
            .get_packet_receipt(&ReceiptPath::new(
                &packet.port_id_on_b,
                &packet.chan_id_on_b,
                packet.seq_on_a,
            ))
            .unwrap(),
        Receipt::Ok
    );
}

#[rstest]
fn expired_packet_is_rejected() {
    let channel = default_open_channel(Order::Unordered);
    let chan_id_on_a = channel.chan_id_on_a.clone();
    let client_id_on_b = channel.client_id_on_b.clone();
    let (mut ctx_a, mut ctx_b) = channel.relayer.into_contexts();

    let timeout_height = ctx_b.latest_height().add(1);
    let packet = ctx_a
        .send_packet_on(
            &chan_id_on_a,
            PING.to_vec(),
            TimeoutHeight::At(timeout_height),
            TimeoutTimestamp::Never,
        )
        .unwrap();

    // Updating the client moves B past the timeout height.
    ctx_b.advance_block();
    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b, dummy_signer()).unwrap();
    assert!(ctx_b.latest_height() > timeout_height);

    let res = packet_recv_on_b(&mut ctx_b, &ctx_a, packet, dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("expired packet must be rejected: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::PacketError(PacketError::InsufficientPacketHeight { .. })
        ),
        "{e:?}"
    );
}

#[rstest]
fn packet_cannot_be_received_at_its_timeout_height() {
    let channel = default_open_channel(Order::Unordered);
    let chan_id_on_a = channel.chan_id_on_a.clone();
    let client_id_on_b = channel.client_id_on_b.clone();
    let (mut ctx_a, mut ctx_b) = channel.relayer.into_contexts();

    let timeout_height = ctx_b.latest_height().add(20);
    let packet = ctx_a
        .send_packet_on(
            &chan_id_on_a,
            PING.to_vec(),
            TimeoutHeight::At(timeout_height),
            TimeoutTimestamp::Never,
        )
        .unwrap();

    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b, dummy_signer()).unwrap();
    assert!(ctx_b.latest_height() < timeout_height);
    let mut ctx_b = ctx_b.advance_block_up_to_height(timeout_height);
    assert_eq!(ctx_b.latest_height(), timeout_height);

    let res = packet_recv_on_b(&mut ctx_b, &ctx_a, packet, dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("packet at its timeout height must be rejected: {res:?}");
    };
    assert_eq!(
        e,
        ContextError::from(PacketError::InsufficientPacketHeight {
            chain_height: timeout_height,
            timeout_height: TimeoutHeight::At(timeout_height),
        })
    );
    assert!(ctx_b.ping_pong.state().lock().received.is_empty());
}

#[rstest]
fn frozen_client_rejects_packets() {
    let channel = default_open_channel(Order::Unordered);
    let chan_id_on_a = channel.chan_id_on_a.clone();
    let client_id_on_b = channel.client_id_on_b.clone();
    let (mut ctx_a, mut ctx_b) = channel.relayer.into_contexts();

    let packet = ctx_a
        .send_packet_on(&chan_id_on_a, PING.to_vec(), far_height(), TimeoutTimestamp::Never)
        .unwrap();
    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b.clone(), dummy_signer())
        .unwrap();

    // A second header for a height the client already trusts freezes it.
    let trusted_height = ctx_b.client_latest_height(&client_id_on_b).unwrap();
    let forged = dummy_forged_header(&ctx_a, &trusted_height);
    ctx_b
        .deliver(MsgEnvelope::from(ClientMsg::from(MsgUpdateClient {
            client_id: client_id_on_b.clone(),
            client_message: forged.into(),
            signer: dummy_signer(),
        })))
        .unwrap();

    let res = packet_recv_on_b(&mut ctx_b, &ctx_a, packet, dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("packet over a frozen client must be rejected: {res:?}");
    };
    assert_eq!(e.kind(), ErrorKind::InvalidState);
    assert_eq!(
        e,
        ContextError::from(ClientError::ClientNotActive {
            client_id: client_id_on_b,
            status: Status::Frozen,
        })
    );
    assert!(ctx_b.ping_pong.state().lock().received.is_empty());
}

#[rstest]
fn tampered_packet_is_rejected(sent_ping: Sent) {
    let Sent {
        ctx_a,
        mut ctx_b,
        mut packets,
        ..
    } = sent_ping;
    let mut packet = packets.remove(0);
    packet.data = PONG.to_vec();

    let res = packet_recv_on_b(&mut ctx_b, &ctx_a, packet, dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("tampered packet must be rejected: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::PacketError(PacketError::FailedPacketVerification { .. })
        ),
        "{e:?}"
    );
    assert!(ctx_b.ping_pong.state().lock().received.is_empty());
}

#[rstest]
fn inbound_disabled_rejects_packets(sent_ping: Sent) {
    let Sent {
        ctx_a,
        mut ctx_b,
        mut packets,
        ..
    } = sent_ping;
    ctx_b.ibc_store.params = Params::new(vec![mock_client_type()], false, true);

    let res = packet_recv_on_b(&mut ctx_b, &ctx_a, packets.remove(0), dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("inbound packets must be rejected: {res:?}");
    };
    assert_eq!(e, ContextError::from(PacketError::InboundDisabled));
}

#[rstest]
fn ordered_channel_receives_in_sequence() {
    let Sent {
        ctx_a,
        mut ctx_b,
        packets,
        ..
    } = send_on_a(default_open_channel(Order::Ordered), &[PING, PING]);

    let res = packet_recv_on_b(&mut ctx_b, &ctx_a, packets[1].clone(), dummy_signer());
    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("second packet must wait for the first: {res:?}");
    };
    assert_eq!(
        e,
        ContextError::from(PacketError::MismatchedPacketSequences {
            expected: Sequence::from(1),
            actual: Sequence::from(2),
        })
    );

    for packet in &packets {
        packet_recv_on_b(&mut ctx_b, &ctx_a, packet.clone(), dummy_signer()).unwrap();
    }

    let next_seq_recv = ctx_b
        .ibc_store()
        .get_next_sequence_recv(&SeqRecvPath::new(
            &packets[0].port_id_on_b,
            &packets[0].chan_id_on_b,
        ))
        .unwrap();
    assert_eq!(next_seq_recv, Sequence::from(3));

    // Anything below the next receive sequence was already delivered.
    let ack = packet_recv_on_b(&mut ctx_b, &ctx_a, packets[0].clone(), dummy_signer()).unwrap();
    assert_eq!(ack, None);
}

#[rstest]
fn unordered_channel_receives_in_any_order() {
    let Sent {
        ctx_a,
        mut ctx_b,
        packets,
        ..
    } = send_on_a(default_open_channel(Order::Unordered), &[PING, PING, PING]);

    for packet in packets.iter().rev() {
        let ack = packet_recv_on_b(&mut ctx_b, &ctx_a, packet.clone(), dummy_signer()).unwrap();
        assert_eq!(ack, Some(pong()));
    }

    assert_eq!(
        ctx_b.ping_pong.state().lock().received,
        vec![Sequence::from(3), Sequence::from(2), Sequence::from(1)]
    );
}

#[rstest]
fn asynchronous_acknowledgement_is_written_later() {
    let ctx_b = MockContextConfig::builder().async_acks(true).build();
    let Sent {
        mut ctx_a,
        mut ctx_b,
        client_id_on_a,
        mut packets,
    } = send_on_a(
        open_channel(MockContext::default(), ctx_b, Order::Unordered),
        &[PING],
    );
    let packet = packets.remove(0);
    let ack_path = AckPath::new(&packet.port_id_on_b, &packet.chan_id_on_b, packet.seq_on_a);

    let ack = packet_recv_on_b(&mut ctx_b, &ctx_a, packet.clone(), dummy_signer()).unwrap();
    assert_eq!(ack, None);
    assert_eq!(
        ctx_b.ibc_store().get_packet_acknowledgement(&ack_path).unwrap(),
        None
    );
    assert_eq!(ctx_b.ping_pong.state().lock().deferred, vec![packet.clone()]);

    let written = ctx_b
        .write_deferred_acks(AcknowledgementStatus::success(PONG).unwrap())
        .unwrap();
    assert_eq!(written, vec![(packet.clone(), pong())]);
    assert_eq!(
        ctx_b.ibc_store().get_packet_acknowledgement(&ack_path).unwrap(),
        Some(compute_ack_commitment(&pong()))
    );
    assert!(matches!(
        ctx_b.last_event(),
        Some(IbcEvent::WriteAcknowledgement(_))
    ));

    // A can settle the packet once it sees the acknowledgement.
    update_client_on_a_with_sync(&mut ctx_a, &ctx_b, client_id_on_a, dummy_signer()).unwrap();
    let result = packet_ack_on_a(&mut ctx_a, &ctx_b, packet, pong(), dummy_signer()).unwrap();
    assert_eq!(result, ResponseResultType::Success);
}

#[rstest]
fn acknowledgement_cannot_be_written_twice() {
    let ctx_b = MockContextConfig::builder().async_acks(true).build();
    let Sent {
        ctx_a,
        mut ctx_b,
        mut packets,
        ..
    } = send_on_a(
        open_channel(MockContext::default(), ctx_b, Order::Unordered),
        &[PING],
    );
    let packet = packets.remove(0);

    packet_recv_on_b(&mut ctx_b, &ctx_a, packet.clone(), dummy_signer()).unwrap();
    ctx_b
        .write_deferred_acks(AcknowledgementStatus::success(PONG).unwrap())
        .unwrap();

    ctx_b.ping_pong.state().lock().deferred.push(packet.clone());
    let res = ctx_b.write_deferred_acks(AcknowledgementStatus::success(PONG).unwrap());

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(PacketError::DuplicateAcknowledgement(packet.seq_on_a))
    );
}
