use crate::TypeRegistry;
use crate::impls::impl_primitive;

impl_primitive!(bool);
impl_primitive!(char);
impl_primitive!(i8);
impl_primitive!(i16);
impl_primitive!(i32);
impl_primitive!(i64);
impl_primitive!(i128);
impl_primitive!(isize);
impl_primitive!(u8);
impl_primitive!(u16);
impl_primitive!(u32);
impl_primitive!(u64);
impl_primitive!(u128);
impl_primitive!(usize);
impl_primitive!(f32);
impl_primitive!(f64);

pub(super) fn register(registry: &mut TypeRegistry) {
    registry.register::<bool>();
    registry.register::<char>();
    registry.register::<i8>();
    registry.register::<i16>();
    registry.register::<i32>();
    registry.register::<i64>();
    registry.register::<i128>();
    registry.register::<isize>();
    registry.register::<u8>();
    registry.register::<u16>();
    registry.register::<u32>();
    registry.register::<u64>();
    registry.register::<u128>();
    registry.register::<usize>();
    registry.register::<f32>();
    registry.register::<f64>();
}
