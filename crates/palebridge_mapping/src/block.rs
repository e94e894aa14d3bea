use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

/// Bedrock's placeholder for a block it (or we) can't express: the old
/// "info update" block. Reserved outside the range used by `data/blocks.json`
/// so it never collides with a real mapped block (including air, which is a
/// real, separately mapped entry at runtime id 0).
pub const FALLBACK_BEDROCK_RUNTIME_ID: u32 = u32::MAX;
pub const FALLBACK_JAVA_STATE: &str = "minecraft:info_update";

#[derive(Deserialize)]
struct Entry {
    java_state: String,
    bedrock_identifier: String,
    bedrock_runtime_id: u32,
}

/// Java block state (namespaced id, optionally with a bracketed property
/// list) to Bedrock runtime id, and back.
pub struct BlockTable {
    java_to_bedrock: HashMap<String, u32>,
    bedrock_to_java: HashMap<u32, (String, String)>,
}

impl BlockTable {
    /// Java block state string -> Bedrock runtime id. Unknown states fall
    /// back to the "info update" placeholder so a single unrecognized block
    /// never aborts a chunk translation.
    pub fn to_bedrock(&self, java_state: &str) -> u32 {
        self.java_to_bedrock
            .get(java_state)
            .copied()
            .unwrap_or_else(|| {
                tracing::debug!(java_state, "unmapped block state, using fallback");
                FALLBACK_BEDROCK_RUNTIME_ID
            })
    }

    /// Bedrock runtime id -> Java block state string.
    pub fn to_java(&self, bedrock_runtime_id: u32) -> &str {
        self.bedrock_to_java
            .get(&bedrock_runtime_id)
            .map(|(java, _)| java.as_str())
            .unwrap_or(FALLBACK_JAVA_STATE)
    }

    /// Bedrock runtime id -> Bedrock namespaced identifier (for debugging /
    /// NBT palette entries, not wire identification).
    pub fn bedrock_identifier(&self, bedrock_runtime_id: u32) -> Option<&str> {
        self.bedrock_to_java
            .get(&bedrock_runtime_id)
            .map(|(_, ident)| ident.as_str())
    }
}

pub(crate) fn table() -> &'static BlockTable {
    static TABLE: Lazy<BlockTable> = Lazy::new(|| {
        let entries: Vec<Entry> =
            serde_json::from_str(include_str!("data/blocks.json")).expect("embedded blocks.json");

        let mut java_to_bedrock = HashMap::with_capacity(entries.len());
        let mut bedrock_to_java = HashMap::with_capacity(entries.len());

        for entry in entries {
            java_to_bedrock.insert(entry.java_state.clone(), entry.bedrock_runtime_id);
            bedrock_to_java.insert(
                entry.bedrock_runtime_id,
                (entry.java_state, entry.bedrock_identifier),
            );
        }

        BlockTable {
            java_to_bedrock,
            bedrock_to_java,
        }
    });

    &TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_block_round_trips() {
        let table = table();
        let runtime_id = table.to_bedrock("minecraft:stone");
        assert_ne!(runtime_id, FALLBACK_BEDROCK_RUNTIME_ID);
        assert_eq!(table.to_java(runtime_id), "minecraft:stone");
    }

    #[test]
    fn unknown_java_state_falls_back() {
        let table = table();
        assert_eq!(
            table.to_bedrock("minecraft:totally_made_up_block"),
            FALLBACK_BEDROCK_RUNTIME_ID
        );
    }

    #[test]
    fn unknown_runtime_id_falls_back() {
        let table = table();
        assert_eq!(table.to_java(u32::MAX), FALLBACK_JAVA_STATE);
    }
}
