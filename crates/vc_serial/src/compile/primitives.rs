//! Leaf delegates of primitive types.
//!
//! A primitive is written as a node carrying its text in the
//! [`Value`](crate::node::VALUE_ATTRIBUTE) attribute. The text comes from
//! the type's [`TextCodec`], or from its override hooks.

use alloc::sync::Arc;

use crate::compile::{
    Delegate, Delegates, DeserializeFn, SerializeFn, erase_deserializer, erase_serializer,
};
use crate::error::{Direction, FormatError, InitError};
use crate::info::{Serializability, Type};
use crate::node::Node;
use crate::registry::{TextCodec, TypeDescriptor};

/// Compiles the leaf delegate of a primitive type.
pub(crate) fn compile(descriptor: &TypeDescriptor) -> Result<Delegate, InitError> {
    let ty = descriptor.ty();
    let codec = descriptor.text_codec();

    let serialize = match (descriptor.serialize_hook(), codec) {
        (Some(hook), _) => erase_serializer(move |name, value| hook(name, value, &Delegates::default())),
        (None, Some(codec)) => text_serializer(ty, codec),
        (None, None) => {
            return Err(InitError::MissingPrimitiveCodec {
                ty,
                direction: Direction::Serialize,
            });
        }
    };

    let deserialize = match (descriptor.deserialize_hook(), codec) {
        (Some(hook), _) => erase_deserializer(move |node| hook(node, &Delegates::default())),
        (None, Some(codec)) => text_deserializer(ty, codec),
        (None, None) => {
            return Err(InitError::MissingPrimitiveCodec {
                ty,
                direction: Direction::Deserialize,
            });
        }
    };

    Ok(Delegate::new(
        ty,
        Serializability::Primitive,
        serialize,
        deserialize,
    ))
}

fn text_serializer(ty: Type, codec: TextCodec) -> Arc<SerializeFn> {
    erase_serializer(move |name, value| match codec.format(value) {
        Some(text) => Ok(Node::primitive(name, text)),
        None => Err(FormatError::type_mismatch(name, ty)),
    })
}

fn text_deserializer(ty: Type, codec: TextCodec) -> Arc<DeserializeFn> {
    erase_deserializer(move |node| {
        let text = node.value().ok_or_else(|| FormatError::MissingValue {
            node: node.name().into(),
            expected: ty.path(),
        })?;
        codec
            .parse(text)
            .map_err(|reason| FormatError::MalformedPrimitive {
                node: node.name().into(),
                value: text.into(),
                expected: ty.path(),
                reason,
            })
    })
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::compile;
    use crate::error::{FormatError, InitError};
    use crate::info::SerialMarkers;
    use crate::node::Node;
    use crate::registry::TypeDescriptor;

    #[test]
    fn text_round_trip() {
        let descriptor = TypeDescriptor::new::<i32>()
            .with_markers(SerialMarkers::PRIMITIVE)
            .with_text_codec::<i32>();
        let delegate = compile(&descriptor).unwrap();

        let node = delegate.serialize("n", &42_i32).unwrap();
        assert_eq!(node, Node::primitive("n", "42"));

        let value = delegate.deserialize(&node).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&42));
    }

    #[test]
    fn malformed_text() {
        let descriptor = TypeDescriptor::new::<i32>().with_text_codec::<i32>();
        let delegate = compile(&descriptor).unwrap();

        let err = delegate
            .deserialize(&Node::primitive("n", "forty-two"))
            .unwrap_err();
        assert!(matches!(err, FormatError::MalformedPrimitive { .. }));

        let message = err.to_string();
        assert!(message.contains("forty-two"));
        assert!(message.contains("i32"));

        assert!(matches!(
            delegate.deserialize(&Node::new("n")),
            Err(FormatError::MissingValue { .. })
        ));
        assert!(matches!(
            delegate.serialize("n", &1_u8),
            Err(FormatError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn codec_is_required() {
        let descriptor = TypeDescriptor::new::<i32>().with_markers(SerialMarkers::PRIMITIVE);
        assert!(matches!(
            compile(&descriptor),
            Err(InitError::MissingPrimitiveCodec { .. })
        ));
    }
}
