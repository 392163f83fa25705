use ibc_tao::connection::types::error::ConnectionError;
use ibc_tao::connection::types::State;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::host::types::identifiers::{ClientId, ConnectionId};
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::core::context::MockContextConfig;
use ibc_tao_testkit::relayer::error::RelayerError;
use ibc_tao_testkit::relayer::utils::{
    connection_open_ack_on_a, connection_open_init_on_a, connection_open_try_on_b,
    create_client_on_a, create_connection_on_a, update_client_on_a_with_sync,
};
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

/// `B` answered the connection attempt of `A`, and `A`'s client saw it.
struct TryOnB {
    ctx_a: MockContext,
    ctx_b: MockContext,
    client_id_on_b: ClientId,
    conn_id_on_a: ConnectionId,
    conn_id_on_b: ConnectionId,
}

#[fixture]
fn try_on_b() -> TryOnB {
    let mut ctx_a = MockContextConfig::builder().chain_id("chain-a").build();
    let mut ctx_b = MockContextConfig::builder().chain_id("chain-b").build();

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

    update_client_on_a_with_sync(&mut ctx_a, &ctx_b, client_id_on_a, dummy_signer()).unwrap();

    TryOnB {
        ctx_a,
        ctx_b,
        client_id_on_b,
        conn_id_on_a,
        conn_id_on_b,
    }
}

#[rstest]
fn conn_open_ack_ok(try_on_b: TryOnB) {
    let TryOnB {
        mut ctx_a,
        ctx_b,
        client_id_on_b,
        conn_id_on_a,
        conn_id_on_b,
        ..
    } = try_on_b;

    connection_open_ack_on_a(
        &mut ctx_a,
        &ctx_b,
        conn_id_on_a.clone(),
        conn_id_on_b.clone(),
        client_id_on_b,
        dummy_signer(),
    )
    .unwrap();

    let conn_end_on_a = ctx_a.connection_end(&conn_id_on_a).unwrap();
    assert_eq!(conn_end_on_a.state, State::Open);
    assert_eq!(conn_end_on_a.versions().len(), 1);
    assert_eq!(
        conn_end_on_a.counterparty().connection_id(),
        Some(&conn_id_on_b)
    );

    let Some(IbcEvent::OpenAckConnection(event)) = ctx_a.last_event() else {
        panic!("open ack connection event expected");
    };
    assert_eq!(event.connection_id(), &conn_id_on_a);
    assert_eq!(event.counterparty_connection_id(), Some(&conn_id_on_b));
}

#[rstest]
fn ack_of_unknown_connection_is_rejected(try_on_b: TryOnB) {
    let TryOnB {
        mut ctx_a,
        ctx_b,
        client_id_on_b,
        conn_id_on_b,
        ..
    } = try_on_b;

    let res = connection_open_ack_on_a(
        &mut ctx_a,
        &ctx_b,
        ConnectionId::new(7),
        conn_id_on_b,
        client_id_on_b,
        dummy_signer(),
    );

    assert!(
        matches!(res, Err(RelayerError::TransactionFailed(_))),
        "{res:?}"
    );
}

#[rstest]
fn second_ack_is_rejected(try_on_b: TryOnB) {
    let TryOnB {
        mut ctx_a,
        ctx_b,
        client_id_on_b,
        conn_id_on_a,
        conn_id_on_b,
        ..
    } = try_on_b;

    let ack = |ctx_a: &mut MockContext| {
        connection_open_ack_on_a(
            ctx_a,
            &ctx_b,
            conn_id_on_a.clone(),
            conn_id_on_b.clone(),
            client_id_on_b.clone(),
            dummy_signer(),
        )
    };

    ack(&mut ctx_a).unwrap();
    let res = ack(&mut ctx_a);

    let Err(RelayerError::TransactionFailed(e)) = res else {
        panic!("second ack must fail: {res:?}");
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
fn ack_with_stale_client_is_rejected(try_on_b: TryOnB) {
    let TryOnB {
        mut ctx_a,
        mut ctx_b,
        client_id_on_b,
        conn_id_on_a,
        conn_id_on_b,
        ..
    } = try_on_b;

    // A's client of B has not seen this block yet.
    ctx_b.advance_block();

    let res = connection_open_ack_on_a(
        &mut ctx_a,
        &ctx_b,
        conn_id_on_a.clone(),
        conn_id_on_b,
        client_id_on_b,
        dummy_signer(),
    );

    assert!(res.is_err());
    assert_eq!(
        ctx_a.connection_end(&conn_id_on_a).unwrap().state,
        State::Init
    );
}

#[rstest]
fn full_handshake_opens_both_ends() {
    let mut ctx_a = MockContext::default();
    let mut ctx_b = MockContext::default();

    let client_id_on_a = create_client_on_a(&mut ctx_a, &ctx_b, dummy_signer()).unwrap();
    let client_id_on_b = create_client_on_a(&mut ctx_b, &ctx_a, dummy_signer()).unwrap();

    let (conn_id_on_a, conn_id_on_b) = create_connection_on_a(
        &mut ctx_a,
        &mut ctx_b,
        client_id_on_a,
        client_id_on_b,
        dummy_signer(),
    )
    .unwrap();

    assert!(ctx_a.connection_end(&conn_id_on_a).unwrap().is_open());
    assert!(ctx_b.connection_end(&conn_id_on_b).unwrap().is_open());
}
