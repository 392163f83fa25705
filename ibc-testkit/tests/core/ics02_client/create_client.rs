use core::time::Duration;

use ibc_tao::client::handler::create_client;
use ibc_tao::client::types::error::ClientError;
use ibc_tao::client::types::msgs::{ClientMsg, MsgCreateClient};
use ibc_tao::client::types::{Height, Status};
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::events::IbcEvent;
use ibc_tao::handler::types::msgs::MsgEnvelope;
use ibc_tao::handler::types::response::MsgResponse;
use ibc_tao::host::types::identifiers::{ClientId, ClientType};
use ibc_tao::host::types::params::Params;
use ibc_tao::host::types::path::ClientConsensusStatePath;
use ibc_tao::host::ValidationContext;
use ibc_tao::primitives::{Any, Signer};
use ibc_tao_testkit::context::MockContext;
use ibc_tao_testkit::fixtures::clients::mock::MockClientConfig;
use ibc_tao_testkit::fixtures::core::context::MockContextConfig;
use ibc_tao_testkit::fixtures::{Expect, Fixture};
use ibc_tao_testkit::testapp::ibc::clients::localhost::LocalhostClientState;
use ibc_tao_testkit::testapp::ibc::clients::mock::client_state::{
    client_type as mock_client_type, MockClientState,
};
use ibc_tao_testkit::testapp::ibc::clients::mock::consensus_state::MockConsensusState;
use ibc_tao_testkit::testapp::ibc::clients::AnyClientState;
use ibc_tao_testkit::utils::dummy_signer;
use rstest::*;
use test_log::test;

#[fixture]
fn fixture() -> Fixture<MsgCreateClient> {
    let counterparty = MockContextConfig::builder().chain_id("counterparty").build();
    let header = counterparty
        .header_at(&counterparty.latest_height())
        .expect("block exists");

    let msg = MsgCreateClient::new(
        MockClientState::from_header(&header).into(),
        MockConsensusState::from(header).into(),
        dummy_signer(),
    );

    Fixture {
        ctx: MockContext::default(),
        msg,
    }
}

fn create_client_deliver(fxt: &mut Fixture<MsgCreateClient>, expect: Expect) -> Option<ClientId> {
    let msg_envelope = MsgEnvelope::from(ClientMsg::from(fxt.msg.clone()));
    let res = fxt.ctx.deliver(msg_envelope);
    let err_msg = fxt.generate_error_msg(&expect, "create client", &res);

    match expect {
        Expect::Failure(err) => {
            assert!(res.is_err(), "{err_msg}");
            if let Some(err) = err {
                assert_eq!(res.unwrap_err(), err, "{err_msg}");
            }
            None
        }
        Expect::Success => match res.expect(&err_msg) {
            MsgResponse::Client(client_id) => Some(client_id),
            other => panic!("unexpected response: {other:?}"),
        },
    }
}

#[rstest]
fn create_mock_client_ok(mut fixture: Fixture<MsgCreateClient>) {
    let client_id = create_client_deliver(&mut fixture, Expect::Success).unwrap();

    assert_eq!(client_id, ClientId::new("9999-mock", 0).unwrap());

    let ctx = &fixture.ctx;
    let AnyClientState::Mock(client_state) = ctx.client_state(&client_id).unwrap() else {
        panic!("mock client expected");
    };
    assert_eq!(client_state.chain_id, "counterparty");

    let consensus_path = ClientConsensusStatePath::new(client_id.clone(), 0, 5);
    assert!(ctx.ibc_store.read(&consensus_path.into()).is_some());

    let Some(IbcEvent::CreateClient(event)) = ctx.last_event() else {
        panic!("create client event expected");
    };
    assert_eq!(event.client_id(), &client_id);
}

#[rstest]
fn client_identifiers_follow_the_counter(mut fixture: Fixture<MsgCreateClient>) {
    let first = create_client_deliver(&mut fixture, Expect::Success).unwrap();
    let second = create_client_deliver(&mut fixture, Expect::Success).unwrap();

    assert_eq!(first, ClientId::new("9999-mock", 0).unwrap());
    assert_eq!(second, ClientId::new("9999-mock", 1).unwrap());
}

#[rstest]
fn client_type_must_be_allowed(mut fixture: Fixture<MsgCreateClient>) {
    fixture.ctx = MockContextConfig::builder()
        .params(Params::new(vec![ClientType::localhost()], true, true))
        .build();

    let expected = ContextError::from(ClientError::ClientTypeNotAllowed {
        client_type: mock_client_type(),
    });

    create_client_deliver(&mut fixture, Expect::Failure(Some(expected)));
}

#[rstest]
fn frozen_client_is_rejected(mut fixture: Fixture<MsgCreateClient>) {
    let height = Height::new(0, 5).unwrap();
    let client_state: MockClientState = MockClientConfig::builder()
        .chain_id("counterparty")
        .latest_height(height)
        .frozen_height(height)
        .build();
    fixture.msg.client_state = client_state.into();

    let expected = ContextError::from(ClientError::ClientNotActive {
        client_id: ClientId::new("9999-mock", 0).unwrap(),
        status: Status::Frozen,
    });

    create_client_deliver(&mut fixture, Expect::Failure(Some(expected)));
}

#[rstest]
fn degenerate_client_state_is_rejected(mut fixture: Fixture<MsgCreateClient>) {
    let client_state: MockClientState = MockClientConfig::builder()
        .chain_id("counterparty")
        .trusting_period(Duration::ZERO)
        .build();
    fixture.msg.client_state = client_state.into();

    create_client_deliver(&mut fixture, Expect::Failure(None));

    assert!(fixture.ctx.events().is_empty());
}

#[rstest]
fn empty_signer_is_rejected(mut fixture: Fixture<MsgCreateClient>) {
    fixture.msg.signer = Signer::new_empty();

    let expected = ContextError::from(ClientError::EmptySigner);
    create_client_deliver(&mut fixture, Expect::Failure(Some(expected)));
}

#[rstest]
fn localhost_client_keeps_no_consensus_state(mut fixture: Fixture<MsgCreateClient>) {
    let latest_height = fixture.ctx.latest_height();
    fixture.msg.client_state = LocalhostClientState::new(latest_height).into();

    let client_id = create_client_deliver(&mut fixture, Expect::Success).unwrap();

    assert_eq!(client_id, ClientId::new("09-localhost", 0).unwrap());
    assert!(fixture.ctx.ibc_store.consensus_heights(&client_id).is_empty());
    assert_eq!(
        fixture.ctx.client_state(&client_id).unwrap(),
        AnyClientState::Localhost(LocalhostClientState::new(latest_height))
    );
}

#[rstest]
fn undecodable_consensus_state_leaves_no_client(mut fixture: Fixture<MsgCreateClient>) {
    fixture.msg.consensus_state = Any {
        type_url: "/unknown.ConsensusState".to_owned(),
        value: vec![1, 2, 3],
    };

    let res = create_client::execute(&mut fixture.ctx.ibc_store, fixture.msg.clone());

    assert!(res.is_err());
    assert!(fixture
        .ctx
        .client_state(&ClientId::new("9999-mock", 0).unwrap())
        .is_err());
    assert_eq!(fixture.ctx.ibc_store.client_counter().unwrap(), 0);
}
