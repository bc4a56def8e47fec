use std::{
    fmt,
    fs::File,
    io::{self, Read},
    path::Path,
    str::FromStr,
};

use data_encoding::HEXLOWER;
use ring::digest::{Algorithm, Context, SHA1_FOR_LEGACY_USE_ONLY, SHA256, SHA512};

use super::error::Error;

/// Bytes read by the partial strategy.
pub const PREVIEW_SIZE: usize = 2048;

const CHUNK_SIZE: usize = 64 * 1024;

/// Consumes bytes and produces a hex digest.
pub trait Digest {
    fn update(&mut self, bytes: &[u8]);
    fn finish(self: Box<Self>) -> String;
}

/// Hands out a fresh [`Digest`] per file. Both hash phases share one factory.
pub trait DigestFactory {
    fn create(&self) -> Box<dyn Digest>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    fn ring_algorithm(self) -> Option<&'static Algorithm> {
        match self {
            HashAlgorithm::Md5 => None,
            HashAlgorithm::Sha1 => Some(&SHA1_FOR_LEGACY_USE_ONLY),
            HashAlgorithm::Sha256 => Some(&SHA256),
            HashAlgorithm::Sha512 => Some(&SHA512),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(Error::UnsupportedAlgorithm(name.to_string())),
        }
    }
}

impl DigestFactory for HashAlgorithm {
    fn create(&self) -> Box<dyn Digest> {
        match self.ring_algorithm() {
            Some(algorithm) => Box::new(RingDigest(Context::new(algorithm))),
            None => Box::new(Md5Digest(md5::Context::new())),
        }
    }
}

struct RingDigest(Context);

impl Digest for RingDigest {
    fn update(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn finish(self: Box<Self>) -> String {
        HEXLOWER.encode(self.0.finish().as_ref())
    }
}

struct Md5Digest(md5::Context);

impl Digest for Md5Digest {
    fn update(&mut self, bytes: &[u8]) {
        self.0.consume(bytes);
    }

    fn finish(self: Box<Self>) -> String {
        HEXLOWER.encode(&self.0.compute().0)
    }
}

/// How much of a file goes into its digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashStrategy {
    /// The first [`PREVIEW_SIZE`] bytes; shorter files hash what they have.
    Partial,
    /// The whole file.
    Full,
}

impl HashStrategy {
    pub fn hash_file(self, path: &Path, factory: &dyn DigestFactory) -> io::Result<String> {
        let file = File::open(path)?;
        let mut digest = factory.create();
        match self {
            HashStrategy::Partial => {
                let mut preview = Vec::with_capacity(PREVIEW_SIZE);
                file.take(PREVIEW_SIZE as u64).read_to_end(&mut preview)?;
                digest.update(&preview);
            }
            HashStrategy::Full => {
                let mut reader = file;
                let mut buffer = vec![0u8; CHUNK_SIZE];
                loop {
                    let read = match reader.read(&mut buffer) {
                        Ok(0) => break,
                        Ok(read) => read,
                        Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
                        Err(error) => return Err(error),
                    };
                    digest.update(&buffer[..read]);
                }
            }
        }
        Ok(digest.finish())
    }
}
