use alloc::string::String;

use crate::TypeRegistry;
use crate::impls::impl_primitive;

impl_primitive!(String, "alloc::string::String", "String");

pub(super) fn register(registry: &mut TypeRegistry) {
    registry.register::<String>();
}
