use crc32fast::Hasher;

use crate::document::Document;

/// Derive a short, stable seed from a session identifier using CRC32
pub fn session_seed(session_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(session_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential paragraph-name generator for one editing session
#[derive(Debug, Clone)]
pub struct NameGenerator {
    seed: String,
    count: u32,
}

impl NameGenerator {
    pub fn new(session_id: &str) -> Self {
        Self::from_seed(session_seed(session_id))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    /// Next name not already used in `doc`
    pub fn next_name(&mut self, doc: &Document) -> String {
        loop {
            self.count += 1;
            let name = format!("{}-{}", self.seed, self.count);
            if !doc.contains(&name) {
                return name;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
