use crate::artifacts::index::CHECKSUM_SIZE;
use anyhow::anyhow;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// Stream wrapper hashing every byte that passes through it
///
/// Used for both directions: reading an index while accumulating the digest to verify
/// against the trailer, and writing one while accumulating the digest to append.
#[derive(Debug)]
pub struct Checksum<S> {
    stream: S,
    digest: Sha1,
}

impl<S> Checksum<S> {
    pub(crate) fn new(stream: S) -> Self {
        Checksum {
            stream,
            digest: Sha1::new(),
        }
    }

    pub(crate) fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Read> Checksum<S> {
    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        let mut buffer = vec![0; size];
        self.stream
            .read_exact(&mut buffer)
            .map_err(|_| anyhow!("Unexpected end-of-file while reading index"))?;

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub(crate) fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.stream
            .read_exact(&mut expected_checksum)
            .map_err(|_| anyhow!("Index is missing its checksum"))?;

        let actual_checksum = self.digest.clone().finalize();
        if expected_checksum != actual_checksum.as_slice() {
            return Err(anyhow!("Checksum does not match value stored on disk"));
        }

        Ok(())
    }
}

impl<S: Write> Checksum<S> {
    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.stream.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    pub(crate) fn write_checksum(&mut self) -> anyhow::Result<()> {
        let checksum = self.digest.clone().finalize();
        self.stream
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to index"))?;

        Ok(())
    }
}
