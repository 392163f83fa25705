use core::time::Duration;

use ibc_tao::client::types::error::ClientError;
use ibc_tao::client::types::msgs::{ClientMsg, MsgRecoverClient, MsgUpdateClient};
use ibc_tao::client::types::{Height, Status};
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::host::types::identifiers::ClientId;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::clients::mock::dummy_forged_header;
use ibc_tao_testkit::fixtures::core::context::MockContextConfig;
use ibc_tao_testkit::relayer::utils::{create_client_on_a, sync_clock_on_a};
use ibc_tao_testkit::testapp::ibc::clients::mock::client_state::DEFAULT_TRUSTING_PERIOD;
use ibc_tao_testkit::testapp::ibc::clients::AnyClientState;
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

fn height(revision_height: u64) -> Height {
    Height::new(0, revision_height).unwrap()
}

fn msg_recover(subject_client_id: &ClientId, substitute_client_id: &ClientId) -> MsgEnvelope {
    MsgEnvelope::from(ClientMsg::from(MsgRecoverClient {
        subject_client_id: subject_client_id.clone(),
        substitute_client_id: substitute_client_id.clone(),
        signer: dummy_signer(),
    }))
}

/// Freezes `client_id` with a header conflicting with the one it trusts at
/// `height`.
fn freeze(ctx_a: &mut MockContext, ctx_b: &MockContext, client_id: &ClientId, height: Height) {
    let msg = MsgEnvelope::from(ClientMsg::from(MsgUpdateClient {
        client_id: client_id.clone(),
        client_message: dummy_forged_header(ctx_b, &height).into(),
        signer: dummy_signer(),
    }));
    ctx_a.deliver(msg).unwrap();

    assert!(ctx_a.client_state(client_id).unwrap().is_frozen());
}

struct Chains {
    ctx_a: MockContext,
    ctx_b: MockContext,
    subject: ClientId,
}

#[fixture]
fn chains() -> Chains {
    let mut ctx_a = MockContext::default();
    let ctx_b = MockContextConfig::builder().chain_id("chain-b").build();

    let subject = create_client_on_a(&mut ctx_a, &ctx_b, dummy_signer()).unwrap();

    Chains {
        ctx_a,
        ctx_b,
        subject,
    }
}

/// Creates a fresh client of `ctx_b` on `ctx_a` once `ctx_b` reached
/// `target`.
fn substitute_at(ctx_a: &mut MockContext, ctx_b: MockContext, target: Height) -> (MockContext, ClientId) {
    let ctx_b = ctx_b.advance_block_up_to_height(target);
    sync_clock_on_a(ctx_a, &ctx_b);

    let substitute = create_client_on_a(ctx_a, &ctx_b, dummy_signer()).unwrap();

    (ctx_b, substitute)
}

#[rstest]
fn recover_frozen_client_ok(chains: Chains) {
    let Chains {
        mut ctx_a,
        ctx_b,
        subject,
    } = chains;

    freeze(&mut ctx_a, &ctx_b, &subject, height(5));
    let (_, substitute) = substitute_at(&mut ctx_a, ctx_b, height(7));

    ctx_a.deliver(msg_recover(&subject, &substitute)).unwrap();

    let AnyClientState::Mock(recovered) = ctx_a.client_state(&subject).unwrap() else {
        panic!("mock client expected");
    };
    assert!(!recovered.is_frozen());
    assert_eq!(recovered.latest_height, height(7));
    assert!(ctx_a
        .ibc_store
        .consensus_heights(&subject)
        .contains(&height(7)));

    let Some(IbcEvent::RecoverClient(event)) = ctx_a.last_event() else {
        panic!("recover client event expected");
    };
    assert_eq!(event.subject_client_id(), &subject);
    assert_eq!(event.substitute_client_id(), &substitute);
}

#[rstest]
fn recover_expired_client_ok(chains: Chains) {
    let Chains {
        mut ctx_a,
        mut ctx_b,
        subject,
    } = chains;

    ctx_a.advance_time(DEFAULT_TRUSTING_PERIOD + Duration::from_secs(1));
    ctx_b.advance_time(DEFAULT_TRUSTING_PERIOD + Duration::from_secs(1));

    let substitute = create_client_on_a(&mut ctx_a, &ctx_b, dummy_signer()).unwrap();

    ctx_a.deliver(msg_recover(&subject, &substitute)).unwrap();

    assert_eq!(ctx_a.client_latest_height(&subject).unwrap(), height(6));

    let header = ctx_b.header_at(&height(6)).unwrap();
    let update = MsgEnvelope::from(ClientMsg::from(MsgUpdateClient {
        client_id: subject.clone(),
        client_message: header.into(),
        signer: dummy_signer(),
    }));
    ctx_a
        .deliver(update)
        .expect("a recovered client accepts updates again");
}

#[rstest]
fn active_subject_cannot_be_recovered(chains: Chains) {
    let Chains {
        mut ctx_a,
        ctx_b,
        subject,
    } = chains;

    let (_, substitute) = substitute_at(&mut ctx_a, ctx_b, height(7));

    let res = ctx_a.deliver(msg_recover(&subject, &substitute));

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(ClientError::ClientNotInactive {
            client_id: subject,
            status: Status::Active,
        })
    );
}

#[rstest]
fn substitute_must_be_ahead_of_subject(chains: Chains) {
    let Chains {
        mut ctx_a,
        ctx_b,
        subject,
    } = chains;

    freeze(&mut ctx_a, &ctx_b, &subject, height(5));
    let substitute = create_client_on_a(&mut ctx_a, &ctx_b, dummy_signer()).unwrap();

    let res = ctx_a.deliver(msg_recover(&subject, &substitute));

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(ClientError::NotAllowedClientRecoveryHeights {
            subject_height: height(5),
            substitute_height: height(5),
        })
    );
}

#[rstest]
fn substitute_must_track_the_same_chain(chains: Chains) {
    let Chains {
        mut ctx_a,
        ctx_b,
        subject,
    } = chains;

    freeze(&mut ctx_a, &ctx_b, &subject, height(5));

    let ctx_c = MockContextConfig::builder()
        .chain_id("chain-c")
        .latest_height(7)
        .build();
    let (_, substitute) = substitute_at(&mut ctx_a, ctx_c, height(7));

    let res = ctx_a.deliver(msg_recover(&subject, &substitute));

    assert!(
        matches!(
            res,
            Err(ContextError::ClientError(
                ClientError::InvalidClientState { .. }
            ))
        ),
        "{res:?}"
    );
    assert!(ctx_a.client_state(&subject).unwrap().is_frozen());
}

#[rstest]
fn frozen_substitute_is_rejected(chains: Chains) {
    let Chains {
        mut ctx_a,
        ctx_b,
        subject,
    } = chains;

    freeze(&mut ctx_a, &ctx_b, &subject, height(5));
    let (ctx_b, substitute) = substitute_at(&mut ctx_a, ctx_b, height(7));
    freeze(&mut ctx_a, &ctx_b, &substitute, height(7));

    let res = ctx_a.deliver(msg_recover(&subject, &substitute));

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(ClientError::ClientNotActive {
            client_id: substitute,
            status: Status::Frozen,
        })
    );
}
