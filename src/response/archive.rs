//! Versioned byte encoding of [`TokenResponse`] for callers restoring a session.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::response::token_response::TokenResponse;

pub const ARCHIVE_VERSION: u32 = 1;

#[derive(Serialize)]
struct ArchiveRef<'a> {
    version: u32,
    response: &'a TokenResponse,
}

#[derive(Deserialize)]
struct Archive {
    version: u32,
    response: TokenResponse,
}

impl TokenResponse {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = serde_json::to_vec(&ArchiveRef {
            version: ARCHIVE_VERSION,
            response: self,
        })
        .context("encode token response archive")?;
        debug!(len = bytes.len(), "token response archived");
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let archive: Archive =
            serde_json::from_slice(bytes).context("decode token response archive")?;

        if archive.version != ARCHIVE_VERSION {
            bail!(
                "unsupported token response archive version {} (expected {})",
                archive.version,
                ARCHIVE_VERSION
            );
        }

        debug!(len = bytes.len(), "token response restored");
        Ok(archive.response)
    }
}
