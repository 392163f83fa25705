use ibc_tao::channel::types::channel::Order;
use ibc_tao::host::types::identifiers::{ChannelId, ClientId, ConnectionId};

use crate::context::MockContext;
use crate::relayer::context::RelayerContext;
use crate::utils::dummy_signer;

/// Two chains with a client of each other, an open connection and an open
/// channel between their ping-pong ports.
#[derive(Debug)]
pub struct OpenChannel {
    pub relayer: RelayerContext,
    pub client_id_on_a: ClientId,
    pub client_id_on_b: ClientId,
    pub conn_id_on_a: ConnectionId,
    pub conn_id_on_b: ConnectionId,
    pub chan_id_on_a: ChannelId,
    pub chan_id_on_b: ChannelId,
}

impl OpenChannel {
    pub fn ctx_a(&self) -> &MockContext {
        self.relayer.get_ctx_a()
    }

    pub fn ctx_b(&self) -> &MockContext {
        self.relayer.get_ctx_b()
    }

    pub fn ctx_a_mut(&mut self) -> &mut MockContext {
        self.relayer.get_ctx_a_mut()
    }

    pub fn ctx_b_mut(&mut self) -> &mut MockContext {
        self.relayer.get_ctx_b_mut()
    }
}

/// Runs every handshake from scratch between `ctx_a` and `ctx_b`.
pub fn open_channel(ctx_a: MockContext, ctx_b: MockContext, ordering: Order) -> OpenChannel {
    let signer = dummy_signer();
    let mut relayer = RelayerContext::new(ctx_a, ctx_b);

    let client_id_on_a = relayer
        .create_client_on_a(signer.clone())
        .expect("client of B created on A");
    let client_id_on_b = relayer
        .create_client_on_b(signer.clone())
        .expect("client of A created on B");

    let (conn_id_on_a, conn_id_on_b) = relayer
        .create_connection_on_a(client_id_on_a.clone(), client_id_on_b.clone(), signer.clone())
        .expect("connection handshake succeeds");

    let (chan_id_on_a, chan_id_on_b) = relayer
        .create_channel_on_a(conn_id_on_a.clone(), conn_id_on_b.clone(), ordering, signer)
        .expect("channel handshake succeeds");

    OpenChannel {
        relayer,
        client_id_on_a,
        client_id_on_b,
        conn_id_on_a,
        conn_id_on_b,
        chan_id_on_a,
        chan_id_on_b,
    }
}

/// [`open_channel`] between two default chains.
pub fn default_open_channel(ordering: Order) -> OpenChannel {
    open_channel(MockContext::default(), MockContext::default(), ordering)
}
