use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Digest of the serialized form, which is the object's identity
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }
}

/// Frame an object body as `<type> <size>\0<body>`
pub(crate) fn frame(object_type: ObjectType, body: &[u8]) -> Bytes {
    let mut framed = format!("{} {}\0", object_type.as_str(), body.len()).into_bytes();
    framed.extend_from_slice(body);

    Bytes::from(framed)
}
