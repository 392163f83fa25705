use ibc_tao::channel::types::acknowledgement::{Acknowledgement, AcknowledgementStatus};
use ibc_tao::channel::types::channel::Order;
use ibc_tao::channel::types::error::PacketError;
use ibc_tao::channel::types::packet::Packet;
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::client::types::Height;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::response::ResponseResultType;
use ibc_tao::host::types::identifiers::Sequence;
use ibc_tao::host::types::path::{CommitmentPath, SeqAckPath};
use ibc_tao::host::ValidationContext;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::core::channel::{default_open_channel, OpenChannel};
use ibc_tao_testkit::relayer::error::RelayerError;
use ibc_tao_testkit::relayer::utils::{
    packet_ack_on_a, packet_recv_on_b, update_client_on_a_with_sync,
};
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::{PING, PONG};
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

/// Packets `A` sent and `B` acknowledged, with `A`'s client up to date.
struct Received {
    ctx_a: MockContext,
    ctx_b: MockContext,
    acked: Vec<(Packet, Acknowledgement)>,
}

fn received(ordering: Order, count: usize) -> Received {
    let OpenChannel {
        relayer,
        client_id_on_a,
        client_id_on_b,
        chan_id_on_a,
        ..
    } = default_open_channel(ordering);
    let (mut ctx_a, mut ctx_b) = relayer.into_contexts();

    let packets: Vec<_> = (0..count)
        .map(|_| {
            ctx_a
                .send_packet_on(
                    &chan_id_on_a,
                    PING.to_vec(),
                    TimeoutHeight::At(Height::new(0, 1000).unwrap()),
                    TimeoutTimestamp::Never,
                )
                .unwrap()
        })
        .collect();

    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b, dummy_signer()).unwrap();

    let acked = packets
        .into_iter()
        .map(|packet| {
            let ack = packet_recv_on_b(&mut ctx_b, &ctx_a, packet.clone(), dummy_signer())
                .unwrap()
                .unwrap();
            (packet, ack)
        })
        .collect();

    update_client_on_a_with_sync(&mut ctx_a, &ctx_b, client_id_on_a, dummy_signer()).unwrap();

    Received {
        ctx_a,
        ctx_b,
        acked,
    }
}

#[fixture]
fn one_received() -> Received {
    received(Order::Unordered, 1)
}

#[rstest]
fn acknowledgement_ok(one_received: Received) {
    let Received {
        mut ctx_a,
        ctx_b,
        mut acked,
    } = one_received;
    let (packet, ack) = acked.remove(0);

    let result = packet_ack_on_a(&mut ctx_a, &ctx_b, packet.clone(), ack, dummy_signer()).unwrap();

    assert_eq!(result, ResponseResultType::Success);
    assert_eq!(
        ctx_a
            .ibc_store()
            .get_packet_commitment(&CommitmentPath::new(
                &packet.port_id_on_a,
                &packet.chan_id_on_a,
                packet.seq_on_a,
            ))
            .unwrap(),
        None
    );
    assert_eq!(
        ctx_a.ping_pong.state().lock().acknowledged,
        vec![(
            packet.seq_on_a,
            AcknowledgementStatus::Success(PONG.to_vec())
        )]
    );

    assert!(ctx_a.events().iter().any(
        |event| matches!(event, IbcEvent::AcknowledgePacket(e) if e.packet() == &packet)
    ));
    let Some(IbcEvent::Module(module_event)) = ctx_a.last_event() else {
        panic!("module event expected last");
    };
    assert_eq!(module_event.kind, "ping_pong_ack");
}

#[rstest]
fn second_acknowledgement_is_a_noop(one_received: Received) {
    let Received {
        mut ctx_a,
        ctx_b,
        mut acked,
    } = one_received;
    let (packet, ack) = acked.remove(0);

    packet_ack_on_a(&mut ctx_a, &ctx_b, packet.clone(), ack.clone(), dummy_signer()).unwrap();
    let result = packet_ack_on_a(&mut ctx_a, &ctx_b, packet, ack, dummy_signer()).unwrap();

    assert_eq!(result, ResponseResultType::Noop);
    assert_eq!(ctx_a.ping_pong.state().lock().acknowledged.len(), 1);
}

#[rstest]
fn acknowledgement_b_never_wrote_is_rejected(one_received: Received) {
    let Received {
        mut ctx_a,
        ctx_b,
        mut acked,
    } = one_received;
    let (packet, _) = acked.remove(0);
    let forged =
        Acknowledgement::try_from(AcknowledgementStatus::error("forged").unwrap()).unwrap();

    let res = packet_ack_on_a(&mut ctx_a, &ctx_b, packet, forged, dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("forged acknowledgement must be rejected: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::PacketError(PacketError::FailedPacketVerification { .. })
        ),
        "{e:?}"
    );
    assert!(ctx_a.ping_pong.state().lock().acknowledged.is_empty());
}

#[rstest]
fn acknowledgement_of_a_different_packet_is_rejected(one_received: Received) {
    let Received {
        mut ctx_a,
        ctx_b,
        mut acked,
    } = one_received;
    let (mut packet, ack) = acked.remove(0);
    packet.data = PONG.to_vec();

    let res = packet_ack_on_a(&mut ctx_a, &ctx_b, packet, ack, dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("acknowledgement of an unknown packet must be rejected: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::PacketError(PacketError::MismatchedPacketCommitments { .. })
        ),
        "{e:?}"
    );
}

#[rstest]
fn ordered_acknowledgements_follow_the_sequence() {
    let Received {
        mut ctx_a,
        ctx_b,
        acked,
    } = received(Order::Ordered, 2);

    let (second, second_ack) = acked[1].clone();
    let res = packet_ack_on_a(&mut ctx_a, &ctx_b, second, second_ack, dummy_signer());
    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("second acknowledgement must wait for the first: {res:?}");
    };
    assert_eq!(
        e,
        ContextError::from(PacketError::MismatchedPacketSequences {
            expected: Sequence::from(1),
            actual: Sequence::from(2),
        })
    );

    for (packet, ack) in &acked {
        packet_ack_on_a(&mut ctx_a, &ctx_b, packet.clone(), ack.clone(), dummy_signer()).unwrap();
    }

    let (first, _) = &acked[0];
    let next_seq_ack = ctx_a
        .ibc_store()
        .get_next_sequence_ack(&SeqAckPath::new(&first.port_id_on_a, &first.chan_id_on_a))
        .unwrap();
    assert_eq!(next_seq_ack, Sequence::from(3));
}
