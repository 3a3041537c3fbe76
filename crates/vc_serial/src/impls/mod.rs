//! [`Serializable`] implementations of the built-in primitive types.
//!
//! ## Implemented Menu
//!
//! - native: `bool` `char` `i8`-`i128` `isize` `u8`-`u128` `usize` `f32` `f64`
//! - alloc: `String`
//! - `uuid::Uuid` (feature `uuid`)
//! - `num_bigint::BigInt` (feature `bigint`)
//! - `rust_decimal::Decimal` (feature `decimal`)
//!
//! Every one of them is a primitive with a default constructor and a
//! [`TextCodec`](crate::registry::TextCodec) built from `Display` and `FromStr`.
//!
//! [`Serializable`]: crate::Serializable

// -----------------------------------------------------------------------------
// Modules

mod alloc;
mod ext;
mod native;

// -----------------------------------------------------------------------------
// impl_primitive

/// Implements `TypePath` and `Serializable` for a primitive type.
macro_rules! impl_primitive {
    ($ty:ident) => {
        $crate::impls::impl_primitive!($ty, stringify!($ty), stringify!($ty));
    };
    ($ty:ty, $path:expr, $name:expr) => {
        impl $crate::info::TypePath for $ty {
            #[inline(always)]
            fn type_path() -> &'static str {
                $path
            }

            #[inline(always)]
            fn type_name() -> &'static str {
                $name
            }
        }

        impl $crate::Serializable for $ty {
            fn type_descriptor() -> $crate::registry::TypeDescriptor {
                $crate::registry::TypeDescriptor::new::<Self>()
                    .with_markers($crate::info::SerialMarkers::PRIMITIVE)
                    .with_default::<Self>()
                    .with_text_codec::<Self>()
            }
        }
    };
}

pub(crate) use impl_primitive;

/// Registers every built-in primitive enabled by the crate features.
pub(crate) fn register_primitives(registry: &mut crate::TypeRegistry) {
    native::register(registry);
    self::alloc::register(registry);
    ext::register(registry);
}
