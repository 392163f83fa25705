//! Defines the `Router`, which resolves module identifiers to modules

use ibc_tao_router_types::module::ModuleId;

use crate::module::Module;

/// Router as defined in ICS-26.
///
/// Ports and channels are bound to modules through capabilities held by the
/// host; the router only resolves the owning `ModuleId` to the module itself.
pub trait Router {
    /// Returns a reference to a `Module` registered against the specified `ModuleId`
    fn get_route(&self, module_id: &ModuleId) -> Option<&dyn Module>;

    /// Returns a mutable reference to a `Module` registered against the specified `ModuleId`
    fn get_route_mut(&mut self, module_id: &ModuleId) -> Option<&mut dyn Module>;

    /// Returns true if a module is registered under `module_id`
    fn has_route(&self, module_id: &ModuleId) -> bool {
        self.get_route(module_id).is_some()
    }
}
