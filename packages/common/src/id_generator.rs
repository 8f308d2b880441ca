use crc32fast::Hasher;

/// Derive a session seed from a page slug using CRC32
pub fn get_page_seed(slug: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(slug.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential identity generator for builder nodes within one editing session
///
/// Identities look like `{kind}-{seed}-{n}`. They are unique per generator, not
/// across reloads: a page reopened with the same slug starts counting again.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(slug: &str) -> Self {
        Self {
            seed: get_page_seed(slug),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Mint the next identity for a node of `kind`
    pub fn mint(&mut self, kind: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", kind, self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of identities minted so far
    pub fn count(&self) -> u64 {
        self.count
    }
}
