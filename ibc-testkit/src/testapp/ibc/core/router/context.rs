use std::sync::Arc;

use ibc_tao::router::module::Module;
use ibc_tao::router::router::Router;
use ibc_tao::router::types::module::ModuleId;

use super::types::MockRouter;

impl Router for MockRouter {
    fn get_route(&self, module_id: &ModuleId) -> Option<&dyn Module> {
        self.router.get(module_id).map(Arc::as_ref)
    }

    fn get_route_mut(&mut self, module_id: &ModuleId) -> Option<&mut dyn Module> {
        // `self.router.get_mut(module_id).and_then(Arc::get_mut)` trips over
        // the trait object lifetime, so the match is spelled out.
        match self.router.get_mut(module_id) {
            Some(arc_mod) => match Arc::get_mut(arc_mod) {
                Some(m) => Some(m),
                None => None,
            },
            None => None,
        }
    }
}
