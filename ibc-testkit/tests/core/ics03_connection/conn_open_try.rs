use core::time::Duration;

use ibc_tao::client::types::error::ClientError;
use ibc_tao::connection::types::error::ConnectionError;
use ibc_tao::connection::types::msgs::{ConnectionMsg, MsgConnectionOpenTry};
use ibc_tao::connection::types::version::Version;
use ibc_tao::connection::types::{Counterparty, State};
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::handler::types::response::MsgResponse;
use ibc_tao::host::types::identifiers::{ClientId, ConnectionId};
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::core::context::MockContextConfig;
use ibc_tao_testkit::relayer::utils::{
    connection_open_init_on_a, create_client_on_a, update_client_on_a_with_sync,
};
use ibc_tao_testkit::testapp::ibc::clients::mock::client_state::MockClientState;
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

/// `A` initiated a connection and `B`'s client of `A` saw it.
struct InitOnA {
    ctx_a: MockContext,
    ctx_b: MockContext,
    client_id_on_a: ClientId,
    client_id_on_b: ClientId,
    conn_id_on_a: ConnectionId,
}

fn init_on_a(update_b: bool) -> InitOnA {
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

    if update_b {
        update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b.clone(), dummy_signer())
            .unwrap();
    }

    InitOnA {
        ctx_a,
        ctx_b,
        client_id_on_a,
        client_id_on_b,
        conn_id_on_a,
    }
}

#[fixture]
fn fixture() -> InitOnA {
    init_on_a(true)
}

/// The `ConnOpenTry` a relayer builds from the latest state of `A`.
fn msg_conn_open_try(fxt: &InitOnA) -> MsgConnectionOpenTry {
    let ctx_a = &fxt.ctx_a;
    let proofs_height_on_a = ctx_a.latest_height();
    let proof = ctx_a.proof_at(&proofs_height_on_a).unwrap();

    MsgConnectionOpenTry {
        client_id_on_b: fxt.client_id_on_b.clone(),
        client_state_of_b_on_a: ctx_a.client_state(&fxt.client_id_on_a).unwrap().into(),
        counterparty: Counterparty::new(
            fxt.client_id_on_a.clone(),
            Some(fxt.conn_id_on_a.clone()),
            ctx_a.ibc_store.commitment_prefix.clone(),
        ),
        versions_on_a: ctx_a
            .connection_end(&fxt.conn_id_on_a)
            .unwrap()
            .versions()
            .to_vec(),
        proof_conn_end_on_a: proof.clone(),
        proof_client_state_of_b_on_a: proof.clone(),
        proof_consensus_state_of_b_on_a: proof,
        proofs_height_on_a,
        consensus_height_of_b_on_a: ctx_a.client_latest_height(&fxt.client_id_on_a).unwrap(),
        delay_period: Duration::ZERO,
        signer: dummy_signer(),
    }
}

fn deliver_try(ctx_b: &mut MockContext, msg: MsgConnectionOpenTry) -> Result<MsgResponse, ContextError> {
    ctx_b.deliver(MsgEnvelope::from(ConnectionMsg::from(msg)))
}

#[rstest]
fn conn_open_try_ok(fixture: InitOnA) {
    let msg = msg_conn_open_try(&fixture);
    let mut ctx_b = fixture.ctx_b;

    let res = deliver_try(&mut ctx_b, msg).unwrap();
    let MsgResponse::Connection(conn_id_on_b) = res else {
        panic!("connection response expected: {res:?}");
    };

    assert_eq!(conn_id_on_b, ConnectionId::new(0));

    let conn_end_on_b = ctx_b.connection_end(&conn_id_on_b).unwrap();
    assert_eq!(conn_end_on_b.state, State::TryOpen);
    assert_eq!(conn_end_on_b.versions().len(), 1);
    assert_eq!(conn_end_on_b.client_id(), &fixture.client_id_on_b);
    assert_eq!(
        conn_end_on_b.counterparty().connection_id(),
        Some(&fixture.conn_id_on_a)
    );

    let Some(IbcEvent::OpenTryConnection(event)) = ctx_b.last_event() else {
        panic!("open try connection event expected");
    };
    assert_eq!(event.connection_id(), &conn_id_on_b);
    assert_eq!(
        event.counterparty_connection_id(),
        Some(&fixture.conn_id_on_a)
    );
}

#[rstest]
fn proof_above_client_height_is_rejected() {
    let fixture = init_on_a(false);
    let msg = msg_conn_open_try(&fixture);
    let mut ctx_b = fixture.ctx_b;

    let res = deliver_try(&mut ctx_b, msg);

    assert!(
        matches!(
            res,
            Err(ContextError::ClientError(ClientError::InvalidProofHeight { .. }))
        ),
        "{res:?}"
    );
}

#[rstest]
fn client_of_another_chain_is_rejected(fixture: InitOnA) {
    let mut msg = msg_conn_open_try(&fixture);
    msg.client_state_of_b_on_a =
        MockClientState::new("chain-c", fixture.ctx_b.latest_height()).into();
    let mut ctx_b = fixture.ctx_b;

    let res = deliver_try(&mut ctx_b, msg);

    assert!(res.is_err());
    assert!(ctx_b.connection_end(&ConnectionId::new(0)).is_err());
}

#[rstest]
fn consensus_height_from_the_future_is_rejected(fixture: InitOnA) {
    let mut msg = msg_conn_open_try(&fixture);
    msg.consensus_height_of_b_on_a = fixture.ctx_b.latest_height().increment();
    let mut ctx_b = fixture.ctx_b;

    let res = deliver_try(&mut ctx_b, msg);

    assert!(
        matches!(
            res,
            Err(ContextError::ConnectionError(
                ConnectionError::InvalidConsensusHeight { .. }
            ))
        ),
        "{res:?}"
    );
}

#[rstest]
fn disjoint_versions_are_rejected(fixture: InitOnA) {
    let mut msg = msg_conn_open_try(&fixture);
    msg.versions_on_a =
        vec![Version::new("7".to_string(), vec!["ORDER_ORDERED".to_string()]).unwrap()];
    let mut ctx_b = fixture.ctx_b;

    let res = deliver_try(&mut ctx_b, msg);

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(ConnectionError::NoCommonVersion)
    );
}

#[rstest]
fn forged_connection_proof_is_rejected(fixture: InitOnA) {
    let mut msg = msg_conn_open_try(&fixture);
    msg.counterparty = Counterparty::new(
        fixture.client_id_on_a.clone(),
        Some(ConnectionId::new(5)),
        fixture.ctx_a.ibc_store.commitment_prefix.clone(),
    );
    let mut ctx_b = fixture.ctx_b;

    let res = deliver_try(&mut ctx_b, msg);

    assert!(
        matches!(
            res,
            Err(ContextError::ConnectionError(
                ConnectionError::VerifyConnectionState(_)
            ))
        ),
        "{res:?}"
    );
}
