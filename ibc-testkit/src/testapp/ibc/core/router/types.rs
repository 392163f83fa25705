use std::collections::BTreeMap;
use std::sync::Arc;

use ibc_tao::router::module::Module;
use ibc_tao::router::types::module::ModuleId;

use crate::testapp::ibc::applications::ping_pong::{PingPongModule, MODULE_ID_STR};

#[derive(Default)]
pub struct MockRouter {
    pub router: BTreeMap<ModuleId, Arc<dyn Module>>,
}

impl MockRouter {
    /// A router with a single [`PingPongModule`], sharing its state with
    /// `module`.
    pub fn new_with_ping_pong(module: &PingPongModule) -> Self {
        let mut router = Self::default();

        router
            .add_route(ModuleId::from(MODULE_ID_STR), module.clone())
            .expect("Never fails");

        router
    }

    pub fn add_route(
        &mut self,
        module_id: ModuleId,
        module: impl Module + 'static,
    ) -> Result<(), String> {
        match self.router.insert(module_id, Arc::new(module)) {
            None => Ok(()),
            Some(_) => Err("Duplicate module_id".to_owned()),
        }
    }
}
