//! Blob object
//!
//! A blob pairs a tracked file's name with its raw content. Because the name is part of
//! the hashed form, the same bytes stored under two names are two different blobs, and a
//! (name, content) pair always hashes to the same id.
//!
//! ## Format
//!
//! `blob <size>\0<name>\0<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read};

/// Blob object holding one version of one tracked file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    /// Name of the tracked file, relative to the repository root
    name: String,
    /// Raw file content
    content: Bytes,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut body = Vec::with_capacity(self.name.len() + 1 + self.content.len());
        body.extend_from_slice(self.name.as_bytes());
        body.push(0);
        body.extend_from_slice(&self.content);

        Ok(frame(self.object_type(), &body))
    }
}

impl Unpackable for Blob {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        // the header has already been read
        let mut name = Vec::new();
        reader.read_until(b'\0', &mut name)?;
        if name.pop() != Some(0) {
            anyhow::bail!("Invalid blob object: missing name terminator");
        }
        let name = String::from_utf8(name).context("Invalid blob object: name is not UTF-8")?;

        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Ok(Self::new(name, Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
