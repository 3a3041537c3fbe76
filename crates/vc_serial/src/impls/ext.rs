//! Primitive types of external crates, each behind its own feature.

use crate::TypeRegistry;
#[cfg(any(feature = "uuid", feature = "bigint", feature = "decimal"))]
use crate::impls::impl_primitive;

#[cfg(feature = "uuid")]
impl_primitive!(uuid::Uuid, "uuid::Uuid", "Uuid");

#[cfg(feature = "bigint")]
impl_primitive!(num_bigint::BigInt, "num_bigint::BigInt", "BigInt");

#[cfg(feature = "decimal")]
impl_primitive!(rust_decimal::Decimal, "rust_decimal::Decimal", "Decimal");

#[cfg_attr(
    not(any(feature = "uuid", feature = "bigint", feature = "decimal")),
    expect(unused_variables, reason = "no external primitive enabled")
)]
pub(super) fn register(registry: &mut TypeRegistry) {
    #[cfg(feature = "uuid")]
    registry.register::<uuid::Uuid>();
    #[cfg(feature = "bigint")]
    registry.register::<num_bigint::BigInt>();
    #[cfg(feature = "decimal")]
    registry.register::<rust_decimal::Decimal>();
}
