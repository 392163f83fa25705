use ibc_tao::client::context::prelude::*;
use ibc_tao::client::types::error::ClientError;
use ibc_tao::client::types::Height;
use ibc_tao::handler::types::error::ContextError;
use ibc_tao::host::types::identifiers::ClientId;
use ibc_tao::host::types::path::{
    ClientConsensusStatePath, ClientStatePath, ClientUpdateMetaPath, Path,
};
use ibc_tao::primitives::{Any, Timestamp, ToVec};

use super::types::MockIbcStore;
use crate::testapp::ibc::clients::{AnyClientState, AnyConsensusState};

impl ClientValidationContext for MockIbcStore {
    type ClientStateRef = AnyClientState;
    type ConsensusStateRef = AnyConsensusState;

    fn client_state(&self, client_id: &ClientId) -> Result<AnyClientState, ContextError> {
        let raw: Any = self
            .decode(&ClientStatePath::new(client_id.clone()).into())?
            .ok_or_else(|| ClientError::ClientNotFound {
                client_id: client_id.clone(),
            })?;

        Ok(raw.try_into()?)
    }

    fn consensus_state(
        &self,
        client_cons_state_path: &ClientConsensusStatePath,
    ) -> Result<AnyConsensusState, ContextError> {
        let height = Height::new(
            client_cons_state_path.revision_number,
            client_cons_state_path.revision_height,
        )?;

        let raw: Any = self
            .decode(&client_cons_state_path.clone().into())?
            .ok_or_else(|| ClientError::ConsensusStateNotFound {
                client_id: client_cons_state_path.client_id.clone(),
                height,
            })?;

        Ok(raw.try_into()?)
    }

    fn client_update_meta(
        &self,
        client_id: &ClientId,
        height: &Height,
    ) -> Result<(Timestamp, Height), ContextError> {
        let path = ClientUpdateMetaPath::new(
            client_id.clone(),
            height.revision_number(),
            height.revision_height(),
        );

        Ok(self
            .decode(&path.into())?
            .ok_or_else(|| ClientError::UpdateMetaNotFound {
                client_id: client_id.clone(),
                height: *height,
            })?)
    }
}

impl ClientExecutionContext for MockIbcStore {
    type ClientStateMut = AnyClientState;

    fn store_client_state(
        &mut self,
        client_state_path: ClientStatePath,
        client_state: AnyClientState,
    ) -> Result<(), ContextError> {
        let raw = Any::from(client_state);
        self.write(Path::ClientState(client_state_path), raw.to_vec());
        Ok(())
    }

    fn store_consensus_state(
        &mut self,
        consensus_state_path: ClientConsensusStatePath,
        consensus_state: AnyConsensusState,
    ) -> Result<(), ContextError> {
        let raw = Any::from(consensus_state);
        self.write(Path::ClientConsensusState(consensus_state_path), raw.to_vec());
        Ok(())
    }

    fn store_update_meta(
        &mut self,
        client_id: ClientId,
        height: Height,
        host_timestamp: Timestamp,
        host_height: Height,
    ) -> Result<(), ContextError> {
        let path = ClientUpdateMetaPath::new(
            client_id,
            height.revision_number(),
            height.revision_height(),
        );
        self.write(path.into(), (host_timestamp, host_height).to_vec());
        Ok(())
    }
}

impl ExtClientValidationContext for MockIbcStore {
    fn host_timestamp(&self) -> Result<Timestamp, ContextError> {
        Ok(self.host.latest_timestamp())
    }

    fn host_height(&self) -> Result<Height, ContextError> {
        Ok(self.host.latest_height())
    }

    fn consensus_state_heights(&self, client_id: &ClientId) -> Result<Vec<Height>, ContextError> {
        Ok(self.consensus_heights(client_id))
    }
}
