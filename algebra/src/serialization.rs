use crate::prelude::*;
use serde::de::{SeqAccess, Visitor};

/// Helper trait to serialize objects that implement from/to bytes
pub trait FromToBytes: Sized {
    /// convert to bytes
    fn encode_bytes(&self) -> Vec<u8>;
    /// reconstruct from bytes
    fn decode_bytes(bytes: &[u8]) -> Result<Self>;
}

/// The visitor that collects bytes from either a byte string, a sequence, or a base64 string.
pub struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> core::fmt::Result {
        formatter.write_str("a valid byte encoding")
    }

    fn visit_seq<V>(self, mut seq: V) -> core::result::Result<Vec<u8>, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let mut vec: Vec<u8> = vec![];
        while let Some(x) = seq.next_element()? {
            vec.push(x);
        }
        Ok(vec)
    }

    fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(v.to_vec())
    }

    fn visit_str<E>(self, v: &str) -> core::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        b64dec(v).map_err(serde::de::Error::custom)
    }
}

/// Derive `serde` implementations from [`FromToBytes`]: base64 strings for
/// human-readable formats, raw bytes otherwise.
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&$crate::utils::b64enc(
                        &$crate::serialization::FromToBytes::encode_bytes(self),
                    ))
                } else {
                    serializer.serialize_bytes(&$crate::serialization::FromToBytes::encode_bytes(self))
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let bytes = if deserializer.is_human_readable() {
                    deserializer.deserialize_str($crate::serialization::BytesVisitor)?
                } else {
                    deserializer.deserialize_bytes($crate::serialization::BytesVisitor)?
                };
                <$t as $crate::serialization::FromToBytes>::decode_bytes(bytes.as_slice())
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}
