//! Stable visual identifiers
//!
//! The viewer draws each tenant with a colour and an avatar seed. Both are
//! derived from the SHA-256 digest of the label, so they are identical
//! across runs, processes and machines.

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Colour and avatar seed for one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualKey {
    pub rgb: [u8; 3],
    /// 16 lowercase hex characters, safe to embed in a URL
    pub avatar_seed: String,
}

impl VisualKey {
    /// `#rrggbb`
    pub fn hex_color(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

pub fn visual_key(label: &str) -> VisualKey {
    let digest = Sha256::digest(label.as_bytes());
    let rgb = [digest[0], digest[1], digest[2]];
    let avatar_seed = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
    VisualKey { rgb, avatar_seed }
}
