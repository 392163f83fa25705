use ibc_tao::channel::types::channel::{Order, State};
use ibc_tao::channel::types::error::ChannelError;
use ibc_tao::channel::types::msgs::{
    ChannelMsg, MsgChannelCloseConfirm, MsgChannelCloseInit, MsgChannelOpenAck,
    MsgChannelOpenConfirm,
};
use ibc_tao::client::types::Height;
use ibc_tao::commitment_types::commitment::CommitmentProofBytes;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::host::types::identifiers::ChannelId;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::core::channel::default_open_channel;
use ibc_tao_testkit::relayer::context::RelayerContext;
use ibc_tao_testkit::relayer::utils::{
    channel_close_init_on_a, channel_open_init_on_a, channel_open_try_on_b,
    update_client_on_a_with_sync,
};
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::{port_id, version};
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

#[derive(Clone, Copy, Debug)]
enum Step {
    OpenAck,
    OpenConfirm,
    CloseInit,
    CloseConfirm,
}

impl Step {
    /// The only local state from which the step may proceed.
    fn required_state(self) -> State {
        match self {
            Self::OpenAck => State::Init,
            Self::OpenConfirm => State::TryOpen,
            Self::CloseInit | Self::CloseConfirm => State::Open,
        }
    }

    /// The step's message, carrying a proof that never gets checked when
    /// the local state is wrong.
    fn msg(self, chan_id: ChannelId) -> MsgEnvelope {
        let proof = CommitmentProofBytes::try_from(vec![1]).unwrap();
        let proof_height = Height::new(0, 1).unwrap();

        let msg = match self {
            Self::OpenAck => ChannelMsg::from(MsgChannelOpenAck {
                port_id_on_a: port_id(),
                chan_id_on_a: chan_id,
                chan_id_on_b: ChannelId::new(0),
                version_on_b: version(),
                proof_chan_end_on_b: proof,
                proof_height_on_b: proof_height,
                signer: dummy_signer(),
            }),
            Self::OpenConfirm => ChannelMsg::from(MsgChannelOpenConfirm {
                port_id_on_b: port_id(),
                chan_id_on_b: chan_id,
                proof_chan_end_on_a: proof,
                proof_height_on_a: proof_height,
                signer: dummy_signer(),
            }),
            Self::CloseInit => ChannelMsg::from(MsgChannelCloseInit {
                port_id_on_a: port_id(),
                chan_id_on_a: chan_id,
                signer: dummy_signer(),
            }),
            Self::CloseConfirm => ChannelMsg::from(MsgChannelCloseConfirm {
                port_id_on_b: port_id(),
                chan_id_on_b: chan_id,
                proof_chan_end_on_a: proof,
                proof_height_on_a: proof_height,
                signer: dummy_signer(),
            }),
        };

        MsgEnvelope::from(msg)
    }
}

/// A chain holding a channel end in `state`.
fn channel_in(state: State) -> (MockContext, ChannelId) {
    match state {
        State::Init | State::TryOpen => {
            let mut relayer = RelayerContext::new(MockContext::default(), MockContext::default());
            let client_id_on_a = relayer.create_client_on_a(dummy_signer()).unwrap();
            let client_id_on_b = relayer.create_client_on_b(dummy_signer()).unwrap();
            let (conn_id_on_a, conn_id_on_b) = relayer
                .create_connection_on_a(client_id_on_a, client_id_on_b.clone(), dummy_signer())
                .unwrap();
            let (mut ctx_a, mut ctx_b) = relayer.into_contexts();

            let chan_id_on_a = channel_open_init_on_a(
                &mut ctx_a,
                conn_id_on_a,
                port_id(),
                port_id(),
                Order::Unordered,
                dummy_signer(),
            )
            .unwrap();

            if state == State::Init {
                return (ctx_a, chan_id_on_a);
            }

            update_client_on_a_with_sync(&mut ctx_b, &ctx_a, client_id_on_b, dummy_signer())
                .unwrap();
            let chan_id_on_b = channel_open_try_on_b(
                &mut ctx_b,
                &ctx_a,
                conn_id_on_b,
                chan_id_on_a,
                port_id(),
                port_id(),
                dummy_signer(),
            )
            .unwrap();

            (ctx_b, chan_id_on_b)
        }
        State::Open | State::Closed => {
            let open = default_open_channel(Order::Unordered);
            let chan_id_on_a = open.chan_id_on_a.clone();
            let (mut ctx_a, _) = open.relayer.into_contexts();

            if state == State::Closed {
                channel_close_init_on_a(&mut ctx_a, chan_id_on_a.clone(), port_id(), dummy_signer())
                    .unwrap();
            }

            (ctx_a, chan_id_on_a)
        }
        State::Uninitialized => unreachable!("no channel end is stored uninitialized"),
    }
}

#[rstest]
#[test_log::test]
fn handshake_steps_only_move_forward(
    #[values(State::Init, State::TryOpen, State::Open, State::Closed)] state: State,
    #[values(Step::OpenAck, Step::OpenConfirm, Step::CloseInit, Step::CloseConfirm)] step: Step,
) {
    let (mut ctx, chan_id) = channel_in(state);

    let res = ctx.deliver(step.msg(chan_id.clone()));

    let wrong_state = matches!(
        res,
        Err(ContextError::ChannelError(ChannelError::InvalidState { .. }))
    );
    assert_eq!(
        wrong_state,
        state != step.required_state(),
        "{step:?} on a channel in {state:?}: {res:?}"
    );
    if wrong_state {
        assert_eq!(ctx.channel_end(&port_id(), &chan_id).unwrap().state(), &state);
    }
}
