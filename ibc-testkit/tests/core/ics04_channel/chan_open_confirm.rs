use ibc_tao::channel::types::channel::{Order, State};
use ibc_tao::channel::types::error::ChannelError;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::host::types::identifiers::{ChannelId, ClientId};
use ibc_tao::router::types::error::RouterError;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::relayer::context::RelayerContext;
use ibc_tao_testkit::relayer::error::RelayerError;
use ibc_tao_testkit::relayer::utils::{
    channel_open_ack_on_a, channel_open_confirm_on_b, channel_open_init_on_a,
    channel_open_try_on_b, update_client_on_a_with_sync,
};
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::port_id;
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

/// A channel in `TryOpen` on `B`, after `A` either acknowledged it or not.
struct Handshake {
    ctx_a: MockContext,
    ctx_b: MockContext,
    client_id_on_b: ClientId,
    chan_id_on_a: ChannelId,
    chan_id_on_b: ChannelId,
}

fn handshake(ack_on_a: bool) -> Handshake {
    let mut relayer = RelayerContext::new(MockContext::default(), MockContext::default());

    let client_id_on_a = relayer.create_client_on_a(dummy_signer()).unwrap();
    let client_id_on_b = relayer.create_client_on_b(dummy_signer()).unwrap();
    let (conn_id_on_a, conn_id_on_b) = relayer
        .create_connection_on_a(client_id_on_a.clone(), client_id_on_b.clone(), dummy_signer())
        .unwrap();

    let (mut ctx_a, mut ctx_b) = relayer.into_contexts();

    let chan_id_on_a = channel_open_init_on_a(
        &mut ctx_a,
        conn_id_on_a,
        port_id(),
        port_id(),
        Order::Ordered,
        dummy_signer(),
    )
    .unwrap();

    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b.clone(), dummy_signer())
        .unwrap();

    let chan_id_on_b = channel_open_try_on_b(
        &mut ctx_b,
        &ctx_a,
        conn_id_on_b,
        chan_id_on_a.clone(),
        port_id(),
        port_id(),
        dummy_signer(),
    )
    .unwrap();

    if ack_on_a {
        update_client_on_a_with_sync(&mut ctx_a, &ctx_b, client_id_on_a, dummy_signer())
            .unwrap();

        channel_open_ack_on_a(
            &mut ctx_a,
            &ctx_b,
            chan_id_on_a.clone(),
            port_id(),
            chan_id_on_b.clone(),
            port_id(),
            dummy_signer(),
        )
        .unwrap();
    } else {
        ctx_a.advance_block();
    }

    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b.clone(), dummy_signer())
        .unwrap();

    Handshake {
        ctx_a,
        ctx_b,
        client_id_on_b,
        chan_id_on_a,
        chan_id_on_b,
    }
}

#[fixture]
fn acked() -> Handshake {
    handshake(true)
}

#[rstest]
fn chan_open_confirm_ok(acked: Handshake) {
    let Handshake {
        ctx_a,
        mut ctx_b,
        chan_id_on_a,
        chan_id_on_b,
        ..
    } = acked;

    channel_open_confirm_on_b(&mut ctx_b, &ctx_a, chan_id_on_b.clone(), port_id(), dummy_signer())
        .unwrap();

    let chan_end_on_b = ctx_b.channel_end(&port_id(), &chan_id_on_b).unwrap();
    assert_eq!(chan_end_on_b.state(), &State::Open);
    assert_eq!(chan_end_on_b.ordering(), &Order::Ordered);
    assert!(ctx_a.channel_end(&port_id(), &chan_id_on_a).unwrap().is_open());

    assert_eq!(ctx_b.ping_pong.state().lock().opened, vec![chan_id_on_b.clone()]);

    let Some(IbcEvent::OpenConfirmChannel(event)) = ctx_b.last_event() else {
        panic!("open confirm channel event expected");
    };
    assert_eq!(event.chan_id(), &chan_id_on_b);
    assert_eq!(event.counterparty_chan_id(), &chan_id_on_a);
}

#[rstest]
fn confirm_before_ack_is_rejected() {
    let Handshake {
        ctx_a,
        mut ctx_b,
        chan_id_on_b,
        ..
    } = handshake(false);

    let res =
        channel_open_confirm_on_b(&mut ctx_b, &ctx_a, chan_id_on_b.clone(), port_id(), dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("confirm of an unacknowledged channel must fail: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::ChannelError(ChannelError::FailedProofVerification(_))
        ),
        "{e:?}"
    );
    assert_eq!(
        ctx_b.channel_end(&port_id(), &chan_id_on_b).unwrap().state(),
        &State::TryOpen
    );
}

#[rstest]
fn second_confirm_is_rejected(acked: Handshake) {
    let Handshake {
        mut ctx_a,
        mut ctx_b,
        client_id_on_b,
        chan_id_on_b,
        ..
    } = acked;

    channel_open_confirm_on_b(&mut ctx_b, &ctx_a, chan_id_on_b.clone(), port_id(), dummy_signer())
        .unwrap();

    ctx_a.advance_block();
    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b, dummy_signer()).unwrap();

    let res = channel_open_confirm_on_b(&mut ctx_b, &ctx_a, chan_id_on_b, port_id(), dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("second confirm must fail: {res:?}");
    };
    assert!(
        matches!(e, ContextError::ChannelError(ChannelError::InvalidState { .. })),
        "{e:?}"
    );
}

#[rstest]
fn confirm_of_unknown_channel_is_rejected(acked: Handshake) {
    let Handshake {
        ctx_a, mut ctx_b, ..
    } = acked;

    let res = channel_open_confirm_on_b(
        &mut ctx_b,
        &ctx_a,
        ChannelId::new(9),
        port_id(),
        dummy_signer(),
    );

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("confirm of an unknown channel must fail: {res:?}");
    };
    assert_eq!(
        e,
        ContextError::from(RouterError::UnknownChannel {
            port_id: port_id(),
            channel_id: ChannelId::new(9),
        })
    );
}
