use ibc_tao::channel::types::channel::{Order, State};
use ibc_tao::channel::types::error::ChannelError;
use ibc_tao::channel::types::msgs::{ChannelMsg, MsgChannelOpenInit};
use ibc_tao::channel::types::Version;
use ibc_tao::connection::types::error::ConnectionError;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::handler::types::response::MsgResponse;
use ibc_tao::host::types::identifiers::{ChannelId, ConnectionId, PortId};
use ibc_tao::host::types::params::Params;
use ibc_tao::router::types::error::RouterError;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::{Expect, Fixture};
use ibc_tao_testkit::relayer::utils::{
    connection_open_init_on_a, create_client_on_a, create_connection_on_a,
};
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::{port_id, version};
use ibc_tao_testkit::testapp::ibc::clients::mock::client_state::client_type as mock_client_type;
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

/// `ctx_a` with a connection to a default chain, fully open when `open` is
/// set and only initialized otherwise.
fn chan_open_init_fixture(ctx_a: MockContext, open: bool) -> Fixture<MsgChannelOpenInit> {
    let mut ctx_a = ctx_a;
    let mut ctx_b = MockContext::default();

    let client_id_on_a = create_client_on_a(&mut ctx_a, &ctx_b, dummy_signer()).unwrap();
    let client_id_on_b = create_client_on_a(&mut ctx_b, &ctx_a, dummy_signer()).unwrap();

    let conn_id_on_a = if open {
        create_connection_on_a(
            &mut ctx_a,
            &mut ctx_b,
            client_id_on_a,
            client_id_on_b,
            dummy_signer(),
        )
        .unwrap()
        .0
    } else {
        connection_open_init_on_a(
            &mut ctx_a,
            &ctx_b,
            client_id_on_a,
            client_id_on_b,
            dummy_signer(),
        )
        .unwrap()
    };

    let msg = MsgChannelOpenInit {
        port_id_on_a: port_id(),
        connection_hops_on_a: vec![conn_id_on_a],
        port_id_on_b: port_id(),
        ordering: Order::Unordered,
        signer: dummy_signer(),
        version_proposal: Version::empty(),
    };

    Fixture { ctx: ctx_a, msg }
}

#[fixture]
fn fixture() -> Fixture<MsgChannelOpenInit> {
    chan_open_init_fixture(MockContext::default(), true)
}

fn chan_open_init_deliver(
    fxt: &mut Fixture<MsgChannelOpenInit>,
    expect: Expect,
) -> Option<ChannelId> {
    let msg_envelope = MsgEnvelope::from(ChannelMsg::from(fxt.msg.clone()));
    let res = fxt.ctx.deliver(msg_envelope);
    let err_msg = fxt.generate_error_msg(&expect, "chan_open_init", &res);

    match expect {
        Expect::Failure(err) => {
            assert!(res.is_err(), "{err_msg}");
            if let Some(err) = err {
                assert_eq!(res.unwrap_err(), err, "{err_msg}");
            }
            None
        }
        Expect::Success => match res.expect(&err_msg) {
            MsgResponse::Channel(chan_id) => Some(chan_id),
            other => panic!("unexpected response: {other:?}"),
        },
    }
}

#[rstest]
fn chan_open_init_ok(mut fixture: Fixture<MsgChannelOpenInit>) {
    let chan_id = chan_open_init_deliver(&mut fixture, Expect::Success).unwrap();

    assert_eq!(chan_id, ChannelId::new(0));

    let chan_end = fixture.ctx.channel_end(&port_id(), &chan_id).unwrap();
    assert_eq!(chan_end.state(), &State::Init);
    assert_eq!(chan_end.version(), &version());
    assert_eq!(chan_end.counterparty().channel_id(), None);

    assert!(fixture
        .ctx
        .ping_pong
        .channel_capability(&port_id(), &chan_id)
        .is_some());

    let Some(IbcEvent::OpenInitChannel(event)) = fixture.ctx.last_event() else {
        panic!("open init channel event expected");
    };
    assert_eq!(event.chan_id_on_a(), &chan_id);
    assert_eq!(event.port_id_on_b(), &port_id());
    assert_eq!(event.version_on_a(), &version());
}

#[rstest]
fn proposed_version_is_kept(mut fixture: Fixture<MsgChannelOpenInit>) {
    fixture.msg.version_proposal = version();
    fixture.msg.ordering = Order::Ordered;

    let chan_id = chan_open_init_deliver(&mut fixture, Expect::Success).unwrap();

    let chan_end = fixture.ctx.channel_end(&port_id(), &chan_id).unwrap();
    assert_eq!(chan_end.version(), &version());
    assert_eq!(chan_end.ordering(), &Order::Ordered);
}

#[rstest]
fn channel_counter_increases(mut fixture: Fixture<MsgChannelOpenInit>) {
    let first = chan_open_init_deliver(&mut fixture, Expect::Success).unwrap();
    let second = chan_open_init_deliver(&mut fixture, Expect::Success).unwrap();

    assert_eq!(first, ChannelId::new(0));
    assert_eq!(second, ChannelId::new(1));

    // Each channel gets its own capability.
    let ping_pong = &fixture.ctx.ping_pong;
    assert_ne!(
        ping_pong.channel_capability(&port_id(), &first),
        ping_pong.channel_capability(&port_id(), &second)
    );
}

#[rstest]
fn foreign_version_is_rejected(mut fixture: Fixture<MsgChannelOpenInit>) {
    fixture.msg.version_proposal = Version::from("ics20-1");

    let expected = ContextError::from(ChannelError::UnsupportedVersion {
        expected: version(),
        actual: Version::from("ics20-1"),
    });
    chan_open_init_deliver(&mut fixture, Expect::Failure(Some(expected)));

    assert!(fixture
        .ctx
        .ping_pong
        .channel_capability(&port_id(), &ChannelId::new(0))
        .is_none());
}

#[rstest]
fn connection_must_be_open() {
    let mut fixture = chan_open_init_fixture(MockContext::default(), false);

    let expected = ContextError::from(ChannelError::ConnectionNotOpen {
        connection_id: ConnectionId::new(0),
    });
    chan_open_init_deliver(&mut fixture, Expect::Failure(Some(expected)));
}

#[rstest]
fn unknown_connection_is_rejected(mut fixture: Fixture<MsgChannelOpenInit>) {
    fixture.msg.connection_hops_on_a = vec![ConnectionId::new(3)];

    chan_open_init_deliver(&mut fixture, Expect::Failure(None));
}

#[rstest]
fn multi_hop_channels_are_rejected(mut fixture: Fixture<MsgChannelOpenInit>) {
    fixture.msg.connection_hops_on_a = vec![ConnectionId::new(0), ConnectionId::new(1)];

    chan_open_init_deliver(&mut fixture, Expect::Failure(None));
}

#[rstest]
fn unbound_port_is_rejected(mut fixture: Fixture<MsgChannelOpenInit>) {
    let transfer = PortId::new("transfer".to_string()).unwrap();
    fixture.msg.port_id_on_a = transfer.clone();

    let expected = ContextError::from(RouterError::UnknownPort { port_id: transfer });
    chan_open_init_deliver(&mut fixture, Expect::Failure(Some(expected)));
}

#[rstest]
fn outbound_disabled_rejects_init(mut fixture: Fixture<MsgChannelOpenInit>) {
    fixture.ctx.ibc_store.params = Params::new(vec![mock_client_type()], true, false);

    let expected = ContextError::from(ChannelError::OutboundDisabled);
    chan_open_init_deliver(&mut fixture, Expect::Failure(Some(expected)));
}

#[rstest]
fn init_is_rejected_before_any_connection() {
    let mut fixture = chan_open_init_fixture(MockContext::default(), true);
    fixture.ctx = MockContext::default();

    let res = fixture.ctx.deliver(MsgEnvelope::from(ChannelMsg::from(fixture.msg.clone())));

    assert_eq!(
        res.unwrap_err(),
        ContextError::from(ConnectionError::ConnectionNotFound {
            connection_id: ConnectionId::new(0),
        })
    );
}
