use ibc_tao::connection::types::error::ConnectionError;
use ibc_tao::connection::types::State;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::host::types::identifiers::{ClientId, ConnectionId};
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::relayer::error::RelayerError;
use ibc_tao_testkit::relayer::utils::{
    connection_open_ack_on_a, connection_open_confirm_on_b, connection_open_init_on_a,
    connection_open_try_on_b, create_client_on_a, update_client_on_a_with_sync,
};
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

/// A connection in `TryOpen` on `B`, after `A` either acknowledged it or not.
struct Handshake {
    ctx_a: MockContext,
    ctx_b: MockContext,
    client_id_on_b: ClientId,
    conn_id_on_b: ConnectionId,
}

fn handshake(ack_on_a: bool) -> Handshake {
    let mut ctx_a = MockContext::default();
    let mut ctx_b = MockContext::default();

    let client_id_on_a = create_client_on_a(&mut ctx_a, &ctx_b, dummy_signer()).unwrap();
    let client_id_on_b = create_client_on_a(&mut ctx_b, &ctx_a, dummy_signer()).unwrap();

    let conn_id_on_a = connection_open_init_on_a(
        &mut ctx_a,
        &ctx_b,
        client_id_on_a.clone(),
        client_id_on_b.clone(),
        dummy_signer(),
    )
    .unwrap();

    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b.clone(), dummy_signer())
        .unwrap();

    let conn_id_on_b = connection_open_try_on_b(
        &mut ctx_b,
        &ctx_a,
        conn_id_on_a.clone(),
        client_id_on_a.clone(),
        client_id_on_b.clone(),
        dummy_signer(),
    )
    .unwrap();

    if ack_on_a {
        update_client_on_a_with_sync(&mut ctx_a, &ctx_b, client_id_on_a, dummy_signer())
            .unwrap();

        connection_open_ack_on_a(
            &mut ctx_a,
            &ctx_b,
            conn_id_on_a,
            conn_id_on_b.clone(),
            client_id_on_b.clone(),
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
        conn_id_on_b,
    }
}

#[fixture]
fn acked() -> Handshake {
    handshake(true)
}

#[rstest]
fn conn_open_confirm_ok(acked: Handshake) {
    let Handshake {
        ctx_a,
        mut ctx_b,
        conn_id_on_b,
        ..
    } = acked;

    connection_open_confirm_on_b(&mut ctx_b, &ctx_a, conn_id_on_b.clone(), dummy_signer())
        .unwrap();

    assert_eq!(
        ctx_b.connection_end(&conn_id_on_b).unwrap().state,
        State::Open
    );

    let Some(IbcEvent::OpenConfirmConnection(event)) = ctx_b.last_event() else {
        panic!("open confirm connection event expected");
    };
    assert_eq!(event.connection_id(), &conn_id_on_b);
}

#[rstest]
fn confirm_before_ack_is_rejected() {
    let Handshake {
        ctx_a,
        mut ctx_b,
        conn_id_on_b,
        ..
    } = handshake(false);

    let res = connection_open_confirm_on_b(&mut ctx_b, &ctx_a, conn_id_on_b.clone(), dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("confirm of an unacknowledged connection must fail: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::ConnectionError(ConnectionError::VerifyConnectionState(_))
        ),
        "{e:?}"
    );
    assert_eq!(
        ctx_b.connection_end(&conn_id_on_b).unwrap().state,
        State::TryOpen
    );
}

#[rstest]
fn second_confirm_is_rejected(acked: Handshake) {
    let Handshake {
        mut ctx_a,
        mut ctx_b,
        client_id_on_b,
        conn_id_on_b,
    } = acked;

    connection_open_confirm_on_b(&mut ctx_b, &ctx_a, conn_id_on_b.clone(), dummy_signer())
        .unwrap();

    ctx_a.advance_block();
    update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b, dummy_signer()).unwrap();

    let res = connection_open_confirm_on_b(&mut ctx_b, &ctx_a, conn_id_on_b, dummy_signer());

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("second confirm must fail: {res:?}");
    };
    assert!(
        matches!(
            e,
            ContextError::ConnectionError(ConnectionError::InvalidState { .. })
        ),
        "{e:?}"
    );
}

#[rstest]
fn confirm_of_unknown_connection_is_rejected(acked: Handshake) {
    let Handshake {
        ctx_a, mut ctx_b, ..
    } = acked;

    let res = connection_open_confirm_on_b(&mut ctx_b, &ctx_a, ConnectionId::new(4), dummy_signer());

    assert!(res.is_err());
}
