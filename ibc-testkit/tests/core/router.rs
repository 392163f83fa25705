use ibc_tao::channel::types::channel::Order;
use ibc_tao::channel::types::msgs::{ChannelMsg, MsgChannelOpenInit};
use ibc_tao::channel::types::Version;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::host::types::identifiers::{ChannelId, PortId};
use ibc_tao::host::ValidationContext;
use ibc_tao::router::router::Router;
use ibc_tao::router::types::capability::CapabilityName;
use ibc_tao::router::types::error::RouterError;
use ibc_tao::router::types::module::ModuleId;
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::core::channel::{default_open_channel, OpenChannel};
use ibc_tao_testkit::testapp::ibc::applications::ping_pong::{port_id, MODULE_ID_STR};
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

#[fixture]
fn open_channel() -> OpenChannel {
    default_open_channel(Order::Unordered)
}

#[rstest]
fn bound_port_resolves_to_its_module() {
    let ctx = MockContext::default();

    let (module_id, _) = ctx.ibc_store().lookup_module_by_port(&port_id()).unwrap();

    assert_eq!(module_id, ModuleId::from(MODULE_ID_STR));
    assert!(ctx.ibc_router.has_route(&module_id));
}

#[rstest]
fn unbound_port_is_unknown() {
    let ctx = MockContext::default();
    let transfer = PortId::transfer();

    assert_eq!(
        ctx.ibc_store().lookup_module_by_port(&transfer).unwrap_err(),
        ContextError::from(RouterError::UnknownPort { port_id: transfer })
    );
}

#[rstest]
fn opened_channel_resolves_to_its_module(open_channel: OpenChannel) {
    let ctx_a = open_channel.ctx_a();
    let chan_id_on_a = &open_channel.chan_id_on_a;

    let (module_id, capability) = ctx_a
        .ibc_store()
        .lookup_module_by_channel(&port_id(), chan_id_on_a)
        .unwrap();

    assert_eq!(module_id, ModuleId::from(MODULE_ID_STR));
    assert_eq!(
        ctx_a.ping_pong.channel_capability(&port_id(), chan_id_on_a),
        Some(capability)
    );
    assert_eq!(
        ctx_a
            .ibc_store()
            .lookup_module_by_channel(&port_id(), &ChannelId::new(7))
            .unwrap_err(),
        ContextError::from(RouterError::UnknownChannel {
            port_id: port_id(),
            channel_id: ChannelId::new(7),
        })
    );
}

#[rstest]
fn port_binds_only_once() {
    let mut ctx = MockContext::default();

    assert_eq!(
        ctx.bind_port(&port_id(), ModuleId::from("squatter")),
        Err(RouterError::CapabilityTaken {
            name: CapabilityName::port(&port_id()),
        })
    );
}

#[rstest]
fn capabilities_do_not_cross_channels(open_channel: OpenChannel) {
    let ctx_a = open_channel.ctx_a();
    let chan_id_on_a = &open_channel.chan_id_on_a;
    let port_cap = ctx_a.ibc_store().lookup_module_by_port(&port_id()).unwrap().1;
    let chan_name = CapabilityName::channel(&port_id(), chan_id_on_a);

    assert_eq!(
        ctx_a
            .ibc_store()
            .authenticate_capability(&chan_name, &port_cap)
            .unwrap_err(),
        ContextError::from(RouterError::UnauthenticatedCapability { name: chan_name })
    );

    let missing = CapabilityName::channel(&port_id(), &ChannelId::new(7));
    assert_eq!(
        ctx_a
            .ibc_store()
            .authenticate_capability(&missing, &port_cap)
            .unwrap_err(),
        ContextError::from(RouterError::CapabilityNotFound { name: missing })
    );
}

#[rstest]
fn port_without_a_routed_module_is_rejected(mut open_channel: OpenChannel) {
    let conn_id_on_a = open_channel.conn_id_on_a.clone();
    let ctx_a = open_channel.ctx_a_mut();

    let orphan_port = PortId::new("orphan".to_string()).unwrap();
    ctx_a
        .bind_port(&orphan_port, ModuleId::from("orphan"))
        .unwrap();

    let msg = MsgEnvelope::from(ChannelMsg::from(MsgChannelOpenInit {
        port_id_on_a: orphan_port.clone(),
        connection_hops_on_a: vec![conn_id_on_a],
        port_id_on_b: orphan_port,
        ordering: Order::Unordered,
        signer: dummy_signer(),
        version_proposal: Version::empty(),
    }));

    assert_eq!(
        ctx_a.deliver(msg).unwrap_err(),
        ContextError::from(RouterError::MissingModule {
            module_id: ModuleId::from("orphan"),
        })
    );
}
