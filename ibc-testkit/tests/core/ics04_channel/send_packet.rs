use core::time::Duration;

use ibc_tao::channel::handler::send_packet;
use ibc_tao::channel::types::channel::Order;
use ibc_tao::channel::types::commitment::compute_packet_commitment;
use ibc_tao::channel::types::error::PacketError;
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::client::types::Height;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::host::types::identifiers::{PortId, Sequence};
use ibc_tao::host::types::path::{CommitmentPath, SeqSendPath};
use ibc_tao::host::ValidationContext;
use ibc_tao::router::types::capability::CapabilityName;
use ibc_tao::router::types::error::RouterError;
use ibc_tao::router::types::module::ModuleId;
use ibc_tao_testkit::fixtures::core::channel::{default_open_channel, OpenChannel};
use ibc_tao_testkit::fixtures::core::packet::PacketConfig;
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::{port_id, PING};
use ibc_tao_testkit::utils::year_2023;
use rstest::*;
use test_log::test;

#[fixture]
fn open_channel() -> OpenChannel {
    default_open_channel(Order::Unordered)
}

fn far_height() -> TimeoutHeight {
    TimeoutHeight::At(Height::new(0, 1000).unwrap())
}

#[rstest]
fn send_packet_ok(mut open_channel: OpenChannel) {
    let chan_id_on_a = open_channel.chan_id_on_a.clone();
    let ctx_a = open_channel.ctx_a_mut();

    let packet = ctx_a
        .send_packet_on(&chan_id_on_a, PING.to_vec(), far_height(), TimeoutTimestamp::Never)
        .unwrap();

    assert_eq!(packet.seq_on_a, Sequence::from(1));

    let store = ctx_a.ibc_store();
    let commitment = store
        .get_packet_commitment(&CommitmentPath::new(&port_id(), &chan_id_on_a, packet.seq_on_a))
        .unwrap();
    assert_eq!(
        commitment,
        Some(compute_packet_commitment(
            &packet.data,
            &packet.timeout_height_on_b,
            &packet.timeout_timestamp_on_b,
        ))
    );
    assert_eq!(
        store
            .get_next_sequence_send(&SeqSendPath::new(&port_id(), &chan_id_on_a))
            .unwrap(),
        Sequence::from(2)
    );

    let Some(IbcEvent::SendPacket(event)) = ctx_a.last_event() else {
        panic!("send packet event expected");
    };
    assert_eq!(event.packet(), &packet);
}

#[rstest]
fn sequences_increase_per_packet(mut open_channel: OpenChannel) {
    let chan_id_on_a = open_channel.chan_id_on_a.clone();
    let ctx_a = open_channel.ctx_a_mut();

    let sequences: Vec<_> = (0..3)
        .map(|_| {
            ctx_a
                .send_packet_on(&chan_id_on_a, PING.to_vec(), far_height(), TimeoutTimestamp::Never)
                .unwrap()
                .seq_on_a
        })
        .collect();

    assert_eq!(
        sequences,
        vec![Sequence::from(1), Sequence::from(2), Sequence::from(3)]
    );
}

#[rstest]
fn packet_without_timeout_is_rejected(mut open_channel: OpenChannel) {
    let chan_id_on_a = open_channel.chan_id_on_a.clone();
    let ctx_a = open_channel.ctx_a_mut();

    let res = ctx_a.send_packet_on(
        &chan_id_on_a,
        PING.to_vec(),
        TimeoutHeight::Never,
        TimeoutTimestamp::Never,
    );

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(PacketError::MissingTimeout)
    );
}

#[rstest]
fn packet_with_empty_data_is_rejected(mut open_channel: OpenChannel) {
    let chan_id_on_a = open_channel.chan_id_on_a.clone();
    let ctx_a = open_channel.ctx_a_mut();

    let res = ctx_a.send_packet_on(&chan_id_on_a, Vec::new(), far_height(), TimeoutTimestamp::Never);

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(PacketError::ZeroPacketData)
    );
}

#[rstest]
fn timeout_height_already_reached_is_rejected(mut open_channel: OpenChannel) {
    let chan_id_on_a = open_channel.chan_id_on_a.clone();
    let ctx_a = open_channel.ctx_a_mut();

    let res = ctx_a.send_packet_on(
        &chan_id_on_a,
        PING.to_vec(),
        TimeoutHeight::At(Height::new(0, 1).unwrap()),
        TimeoutTimestamp::Never,
    );

    assert!(
        matches!(
            res,
            Err(ContextError::PacketError(
                PacketError::InsufficientPacketHeight { .. }
            ))
        ),
        "{res:?}"
    );
    assert_eq!(
        ctx_a
            .ibc_store()
            .get_next_sequence_send(&SeqSendPath::new(&port_id(), &chan_id_on_a))
            .unwrap(),
        Sequence::from(1)
    );
}

#[rstest]
fn timeout_timestamp_already_reached_is_rejected(mut open_channel: OpenChannel) {
    let chan_id_on_a = open_channel.chan_id_on_a.clone();
    let ctx_a = open_channel.ctx_a_mut();

    let res = ctx_a.send_packet_on(
        &chan_id_on_a,
        PING.to_vec(),
        TimeoutHeight::Never,
        TimeoutTimestamp::At(year_2023()),
    );

    assert!(
        matches!(
            res,
            Err(ContextError::PacketError(
                PacketError::InsufficientPacketTimestamp { .. }
            ))
        ),
        "{res:?}"
    );
}

#[rstest]
fn timeout_is_judged_against_the_counterparty_clock(mut open_channel: OpenChannel) {
    let chan_id_on_a = open_channel.chan_id_on_a.clone();
    let ctx_a = open_channel.ctx_a_mut();

    // A's own clock runs ahead; only the latest time of B known to A counts.
    let timeout = (ctx_a.latest_timestamp() + Duration::from_secs(60)).unwrap();
    ctx_a.advance_time(Duration::from_secs(3600));

    ctx_a
        .send_packet_on(
            &chan_id_on_a,
            PING.to_vec(),
            TimeoutHeight::Never,
            TimeoutTimestamp::At(timeout),
        )
        .unwrap();
}

#[rstest]
fn out_of_order_sequence_is_rejected(mut open_channel: OpenChannel) {
    let chan_id_on_a = open_channel.chan_id_on_a.clone();
    let chan_id_on_b = open_channel.chan_id_on_b.clone();
    let ctx_a = open_channel.ctx_a_mut();
    let chan_cap = ctx_a
        .ping_pong
        .channel_capability(&port_id(), &chan_id_on_a)
        .unwrap();

    let packet = PacketConfig::builder()
        .seq_on_a(Sequence::from(5))
        .chan_id_on_a(chan_id_on_a)
        .chan_id_on_b(chan_id_on_b)
        .build();

    let res = send_packet(&mut ctx_a.ibc_store, &chan_cap, packet);

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(PacketError::MismatchedPacketSequences {
            expected: Sequence::from(1),
            actual: Sequence::from(5),
        })
    );
}

#[rstest]
fn foreign_capability_cannot_send(mut open_channel: OpenChannel) {
    let chan_id_on_a = open_channel.chan_id_on_a.clone();
    let chan_id_on_b = open_channel.chan_id_on_b.clone();
    let ctx_a = open_channel.ctx_a_mut();

    let other_port = PortId::new("other".to_string()).unwrap();
    let foreign_cap = ctx_a
        .bind_port(&other_port, ModuleId::from("other"))
        .unwrap();

    let packet = PacketConfig::builder()
        .chan_id_on_a(chan_id_on_a.clone())
        .chan_id_on_b(chan_id_on_b)
        .build();

    let res = send_packet(&mut ctx_a.ibc_store, &foreign_cap, packet);

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(RouterError::UnauthenticatedCapability {
            name: CapabilityName::channel(&port_id(), &chan_id_on_a),
        })
    );
}
