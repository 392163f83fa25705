use ibc_tao::client::types::error::{ClientError, UpgradeClientError};
use ibc_tao::client::types::msgs::{ClientMsg, MsgUpgradeClient};
use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentRoot;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::host::types::identifiers::ClientId;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::core::context::MockContextConfig;
use ibc_tao_testkit::fixtures::{Expect, Fixture};
use ibc_tao_testkit::relayer::utils::{create_client_on_a, update_client_on_a_with_sync};
use ibc_tao_testkit::testapp::ibc::clients::mock::client_state::MockClientState;
use ibc_tao_testkit::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use ibc_tao_testkit::testapp::ibc::clients::AnyClientState;
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

const CHAIN_B: &str = "chain-b";

fn upgraded_height() -> Height {
    Height::new(1, 1).unwrap()
}

/// Chain `A` tracking chain `B` through the height at which `B` committed
/// an upgrade plan to `upgraded`.
fn upgrade_fixture(
    upgraded_client_state: MockClientState,
    schedule: bool,
) -> (Fixture<MsgUpgradeClient>, ClientId) {
    let mut ctx_a = MockContext::default();
    let mut ctx_b = MockContextConfig::builder().chain_id(CHAIN_B).build();

    let client_id = create_client_on_a(&mut ctx_a, &ctx_b, dummy_signer()).unwrap();

    let upgraded_consensus_state = MockConsensusState::new(
        CommitmentRoot::from_bytes(b"upgraded"),
        ctx_b.latest_timestamp(),
    );

    if schedule {
        let plan_height = ctx_b.latest_height().increment().revision_height();
        ctx_b.schedule_upgrade(
            plan_height,
            upgraded_client_state.clone(),
            upgraded_consensus_state.clone(),
        );
    } else {
        ctx_b.advance_block();
    }

    update_client_on_a_with_sync(&mut ctx_a, &ctx_b, client_id.clone(), dummy_signer()).unwrap();

    let proof_height = ctx_a.client_latest_height(&client_id).unwrap();
    let proof = ctx_b.proof_at(&proof_height).unwrap();

    let msg = MsgUpgradeClient {
        client_id: client_id.clone(),
        upgraded_client_state: upgraded_client_state.into(),
        upgraded_consensus_state: upgraded_consensus_state.into(),
        proof_upgrade_client: proof.clone(),
        proof_upgrade_consensus_state: proof,
        signer: dummy_signer(),
    };

    (Fixture { ctx: ctx_a, msg }, client_id)
}

#[fixture]
fn scheduled() -> (Fixture<MsgUpgradeClient>, ClientId) {
    upgrade_fixture(MockClientState::new(CHAIN_B, upgraded_height()), true)
}

fn upgrade_client_deliver(fxt: &mut Fixture<MsgUpgradeClient>, expect: Expect) {
    let msg_envelope = MsgEnvelope::from(ClientMsg::from(fxt.msg.clone()));
    let res = fxt.ctx.deliver(msg_envelope);
    let err_msg = fxt.generate_error_msg(&expect, "upgrade client", &res);

    match expect {
        Expect::Failure(err) => {
            assert!(res.is_err(), "{err_msg}");
            if let Some(err) = err {
                assert_eq!(res.unwrap_err(), err, "{err_msg}");
            }
        }
        Expect::Success => {
            res.expect(&err_msg);
        }
    }
}

#[rstest]
fn upgrade_client_ok(scheduled: (Fixture<MsgUpgradeClient>, ClientId)) {
    let (mut fxt, client_id) = scheduled;

    upgrade_client_deliver(&mut fxt, Expect::Success);

    let AnyClientState::Mock(client_state) = fxt.ctx.client_state(&client_id).unwrap() else {
        panic!("mock client expected");
    };
    assert_eq!(client_state.latest_height, upgraded_height());
    assert!(!client_state.is_frozen());
    assert!(fxt
        .ctx
        .ibc_store
        .consensus_heights(&client_id)
        .contains(&upgraded_height()));

    let Some(IbcEvent::UpgradeClient(event)) = fxt.ctx.last_event() else {
        panic!("upgrade client event expected");
    };
    assert_eq!(event.client_id(), &client_id);
    assert_eq!(event.consensus_height(), &upgraded_height());
}

#[rstest]
fn upgrade_without_plan_fails() {
    let (mut fxt, _) = upgrade_fixture(MockClientState::new(CHAIN_B, upgraded_height()), false);

    let res = fxt.ctx.deliver(MsgEnvelope::from(ClientMsg::from(fxt.msg.clone())));

    assert!(
        matches!(
            res,
            Err(ContextError::ClientError(ClientError::Upgrade(
                UpgradeClientError::InvalidUpgradeClientStateProof(_)
            )))
        ),
        "{res:?}"
    );
}

#[rstest]
fn upgrade_to_lower_height_fails() {
    let (mut fxt, _) = upgrade_fixture(
        MockClientState::new(CHAIN_B, Height::new(0, 3).unwrap()),
        true,
    );

    let res = fxt.ctx.deliver(MsgEnvelope::from(ClientMsg::from(fxt.msg.clone())));

    assert!(
        matches!(
            res,
            Err(ContextError::ClientError(ClientError::Upgrade(
                UpgradeClientError::InsufficientUpgradeHeight { .. }
            )))
        ),
        "{res:?}"
    );
}

#[rstest]
fn upgrade_with_unproven_consensus_state_fails(
    scheduled: (Fixture<MsgUpgradeClient>, ClientId),
) {
    let (mut fxt, client_id) = scheduled;

    fxt.msg.upgraded_consensus_state = MockConsensusState::new(
        CommitmentRoot::from_bytes(b"tampered"),
        fxt.ctx.latest_timestamp(),
    )
    .into();

    let res = fxt.ctx.deliver(MsgEnvelope::from(ClientMsg::from(fxt.msg.clone())));

    assert!(
        matches!(
            res,
            Err(ContextError::ClientError(ClientError::Upgrade(
                UpgradeClientError::InvalidUpgradeConsensusStateProof(_)
            )))
        ),
        "{res:?}"
    );
    assert_ne!(
        fxt.ctx.client_latest_height(&client_id).unwrap(),
        upgraded_height()
    );
}
