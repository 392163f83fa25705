use ibc_tao::channel::types::acknowledgement::AcknowledgementStatus;
use ibc_tao::channel::types::channel::{Order, State as ChannelState};
use ibc_tao::channel::types::timeout::{TimeoutHeight, TimeoutTimestamp};
use ibc_tao::client::types::Height;
use ibc_tao::host::types::identifiers::{ChannelId, ConnectionId};

use crate::context::MockContext;
use crate::relayer::context::RelayerContext;
use crate::testapp::ibc::applications::ping_pong::{port_id, PONG};
use crate::utils::dummy_signer;

/// Drives two chains through the whole protocol: clients, connections in
/// both directions, an unordered channel, a ping from each side and the
/// closing of the channel.
pub fn ibc_integration_test(ctx_a: MockContext, ctx_b: MockContext) {
    let signer = dummy_signer();

    let mut relayer = RelayerContext::new(ctx_a, ctx_b);

    let client_id_on_a = relayer
        .create_client_on_a(signer.clone())
        .expect("client of B on A");
    let client_id_on_b = relayer
        .create_client_on_b(signer.clone())
        .expect("client of A on B");

    let (conn_id_on_a, conn_id_on_b) = relayer
        .create_connection_on_a(client_id_on_a.clone(), client_id_on_b.clone(), signer.clone())
        .expect("connection from A to B");

    assert_eq!(conn_id_on_a, ConnectionId::new(0));
    assert_eq!(conn_id_on_b, ConnectionId::new(0));

    let (conn_id_on_b, conn_id_on_a) = relayer
        .create_connection_on_b(client_id_on_b, client_id_on_a, signer.clone())
        .expect("connection from B to A");

    assert_eq!(conn_id_on_a, ConnectionId::new(1));
    assert_eq!(conn_id_on_b, ConnectionId::new(1));

    let (chan_id_on_a, chan_id_on_b) = relayer
        .create_channel_on_a(conn_id_on_a, conn_id_on_b, Order::Unordered, signer.clone())
        .expect("channel from A to B");

    assert_eq!(chan_id_on_a, ChannelId::new(0));
    assert_eq!(chan_id_on_b, ChannelId::new(0));

    let far_height = TimeoutHeight::At(Height::new(0, 1_000).expect("valid height"));

    let ping_of_a = relayer
        .send_ping_on_a(&chan_id_on_a, far_height, TimeoutTimestamp::Never)
        .expect("ping sent by A");
    let ack_of_b = relayer
        .relay_packet_on_a(ping_of_a.clone(), signer.clone())
        .expect("ping relayed to B")
        .expect("B acknowledges right away");

    assert_eq!(
        AcknowledgementStatus::try_from(&ack_of_b).expect("valid ack"),
        AcknowledgementStatus::Success(PONG.to_vec())
    );

    let ping_of_b = relayer
        .send_ping_on_b(&chan_id_on_b, far_height, TimeoutTimestamp::Never)
        .expect("ping sent by B");
    relayer
        .relay_packet_on_b(ping_of_b.clone(), signer.clone())
        .expect("ping relayed to A")
        .expect("A acknowledges right away");

    assert_eq!(
        relayer.get_ctx_a().ping_pong.state().lock().acknowledged.len(),
        1
    );
    assert_eq!(
        relayer.get_ctx_b().ping_pong.state().lock().received,
        vec![ping_of_a.seq_on_a]
    );

    relayer
        .close_channel_on_a(chan_id_on_a.clone(), chan_id_on_b.clone(), signer)
        .expect("channel closed on both ends");

    for (ctx, chan_id) in [
        (relayer.get_ctx_a(), &chan_id_on_a),
        (relayer.get_ctx_b(), &chan_id_on_b),
    ] {
        let chan_end = ctx
            .channel_end(&port_id(), chan_id)
            .expect("channel end exists");
        assert_eq!(chan_end.state, ChannelState::Closed);
    }
}
