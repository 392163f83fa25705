use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentProofBytes;
use ibc_tao::connection::types::error::ConnectionError;
use ibc_tao::connection::types::msgs::{
    ConnectionMsg, MsgConnectionOpenAck, MsgConnectionOpenConfirm,
};
use ibc_tao::connection::types::version::Version;
use ibc_tao::connection::types::State;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::host::types::identifiers::ConnectionId;
use ibc_tao::primitives::Any;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::relayer::utils::{
    connection_open_init_on_a, connection_open_try_on_b, create_client_on_a,
    create_connection_on_a, update_client_on_a_with_sync,
};
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

#[derive(Clone, Copy, Debug)]
enum Step {
    OpenAck,
    OpenConfirm,
}

impl Step {
    /// Local states from which the step may proceed.
    fn allowed_states(self) -> &'static [State] {
        match self {
            // TRYOPEN is reached on both ends when each sent `OpenInit`.
            Self::OpenAck => &[State::Init, State::TryOpen],
            Self::OpenConfirm => &[State::TryOpen],
        }
    }

    /// The step's message, carrying proofs that never get checked when the
    /// local state is wrong.
    fn msg(self, conn_id: ConnectionId) -> MsgEnvelope {
        let proof = CommitmentProofBytes::try_from(vec![1]).unwrap();
        let proof_height = Height::new(0, 1).unwrap();

        let msg = match self {
            Self::OpenAck => ConnectionMsg::from(MsgConnectionOpenAck {
                conn_id_on_a: conn_id,
                conn_id_on_b: ConnectionId::new(0),
                client_state_of_a_on_b: Any {
                    type_url: String::new(),
                    value: Vec::new(),
                },
                proof_conn_end_on_b: proof.clone(),
                proof_client_state_of_a_on_b: proof.clone(),
                proof_consensus_state_of_a_on_b: proof,
                proofs_height_on_b: proof_height,
                consensus_height_of_a_on_b: proof_height,
                version: Version::compatibles().remove(0),
                signer: dummy_signer(),
            }),
            Self::OpenConfirm => ConnectionMsg::from(MsgConnectionOpenConfirm {
                conn_id_on_b: conn_id,
                proof_conn_end_on_a: proof,
                proof_height_on_a: proof_height,
                signer: dummy_signer(),
            }),
        };

        MsgEnvelope::from(msg)
    }
}

/// A chain holding a connection end in `state`.
fn connection_in(state: State) -> (MockContext, ConnectionId) {
    let mut ctx_a = MockContext::default();
    let mut ctx_b = MockContext::default();

    let client_id_on_a = create_client_on_a(&mut ctx_a, &ctx_b, dummy_signer()).unwrap();
    let client_id_on_b = create_client_on_a(&mut ctx_b, &ctx_a, dummy_signer()).unwrap();

    match state {
        State::Init | State::TryOpen => {
            let conn_id_on_a = connection_open_init_on_a(
                &mut ctx_a,
                &ctx_b,
                client_id_on_a.clone(),
                client_id_on_b.clone(),
                dummy_signer(),
            )
            .unwrap();

            if state == State::Init {
                return (ctx_a, conn_id_on_a);
            }

            update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b.clone(), dummy_signer())
                .unwrap();
            let conn_id_on_b = connection_open_try_on_b(
                &mut ctx_b,
                &ctx_a,
                conn_id_on_a,
                client_id_on_a,
                client_id_on_b,
                dummy_signer(),
            )
            .unwrap();

            (ctx_b, conn_id_on_b)
        }
        State::Open => {
            let (conn_id_on_a, _) = create_connection_on_a(
                &mut ctx_a,
                &mut ctx_b,
                client_id_on_a,
                client_id_on_b,
                dummy_signer(),
            )
            .unwrap();

            (ctx_a, conn_id_on_a)
        }
        State::Uninitialized => unreachable!("no connection end is stored uninitialized"),
    }
}

#[rstest]
#[test_log::test]
fn handshake_steps_only_move_forward(
    #[values(State::Init, State::TryOpen, State::Open)] state: State,
    #[values(Step::OpenAck, Step::OpenConfirm)] step: Step,
) {
    let (mut ctx, conn_id) = connection_in(state);

    let res = ctx.deliver(step.msg(conn_id.clone()));

    // Allowed states get past the state check and fail on the proofs.
    assert!(res.is_err(), "{step:?} on a connection in {state:?}");

    let wrong_state = matches!(
        res,
        Err(ContextError::ConnectionError(ConnectionError::InvalidState { .. }))
    );
    assert_eq!(
        wrong_state,
        !step.allowed_states().contains(&state),
        "{step:?} on a connection in {state:?}: {res:?}"
    );
    assert_eq!(ctx.connection_end(&conn_id).unwrap().state, state);
}
