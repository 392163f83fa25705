use displaydoc::Display;
use ibc_tao::client::types::Height;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::handler::types::response::MsgResponse;
use ibc_tao::host::types::identifiers::ClientId;

#[derive(Debug, Display)]
pub enum RelayerError {
    /// client state on destination chain not found, (client id: `{client_id}`)
    ClientStateNotFound { client_id: ClientId },
    /// the client on destination chain is already up-to-date (client id: `{client_id}`, source height: `{source_height}`, dest height: `{destination_height}`)
    ClientAlreadyUpToDate {
        client_id: ClientId,
        source_height: Height,
        destination_height: Height,
    },
    /// the client on destination chain is at a higher height (client id: `{client_id}`, source height: `{source_height}`, dest height: `{destination_height}`)
    ClientAtHigherHeight {
        client_id: ClientId,
        source_height: Height,
        destination_height: Height,
    },
    /// source chain has no block at height `{height}`
    MissingBlock { height: Height },
    /// expected a `{expected}` response, got `{actual:?}`
    UnexpectedResponse {
        expected: &'static str,
        actual: MsgResponse,
    },
    /// transaction processing by modules failed error: `{0}`
    TransactionFailed(ContextError),
}

impl From<ContextError> for RelayerError {
    fn from(e: ContextError) -> Self {
        Self::TransactionFailed(e)
    }
}

impl std::error::Error for RelayerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self {
            Self::TransactionFailed(e) => Some(e),
            _ => None,
        }
    }
}
