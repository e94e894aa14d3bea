use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

/// Fallback entity kind for an unrecognized Java entity type: a generic NPC,
/// the closest thing Bedrock has to "some entity we don't understand".
pub const FALLBACK_BEDROCK_IDENTIFIER: &str = "minecraft:npc";
pub const FALLBACK_BEDROCK_NETWORK_ID: u32 = 0;
pub const FALLBACK_JAVA_IDENTIFIER: &str = "minecraft:pig";

#[derive(Deserialize)]
struct Entry {
    java_identifier: String,
    bedrock_identifier: String,
    bedrock_network_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedrockEntityKind {
    pub network_id: u32,
}

pub struct EntityTable {
    java_to_bedrock: HashMap<String, (String, u32)>,
    bedrock_to_java: HashMap<u32, String>,
}

impl EntityTable {
    /// Java entity type identifier -> (Bedrock identifier, Bedrock network
    /// id). Unrecognized kinds fall back to a generic NPC rather than
    /// failing the spawn.
    pub fn to_bedrock(&self, java_identifier: &str) -> (&str, u32) {
        self.java_to_bedrock
            .get(java_identifier)
            .map(|(ident, id)| (ident.as_str(), *id))
            .unwrap_or_else(|| {
                tracing::debug!(java_identifier, "unmapped entity kind, using fallback NPC");
                (FALLBACK_BEDROCK_IDENTIFIER, FALLBACK_BEDROCK_NETWORK_ID)
            })
    }

    pub fn to_java(&self, bedrock_network_id: u32) -> &str {
        self.bedrock_to_java
            .get(&bedrock_network_id)
            .map(String::as_str)
            .unwrap_or(FALLBACK_JAVA_IDENTIFIER)
    }
}

pub(crate) fn table() -> &'static EntityTable {
    static TABLE: Lazy<EntityTable> = Lazy::new(|| {
        let entries: Vec<Entry> = serde_json::from_str(include_str!("data/entities.json"))
            .expect("embedded entities.json");

        let mut java_to_bedrock = HashMap::with_capacity(entries.len());
        let mut bedrock_to_java = HashMap::with_capacity(entries.len());

        for entry in entries {
            java_to_bedrock.insert(
                entry.java_identifier.clone(),
                (entry.bedrock_identifier, entry.bedrock_network_id),
            );
            bedrock_to_java.insert(entry.bedrock_network_id, entry.java_identifier);
        }

        EntityTable {
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
    fn known_entity_round_trips() {
        let table = table();
        let (_, network_id) = table.to_bedrock("minecraft:zombie");
        assert_eq!(table.to_java(network_id), "minecraft:zombie");
    }

    #[test]
    fn unknown_entity_falls_back_to_npc() {
        let table = table();
        let (identifier, network_id) = table.to_bedrock("minecraft:totally_new_mob");
        assert_eq!(identifier, FALLBACK_BEDROCK_IDENTIFIER);
        assert_eq!(network_id, FALLBACK_BEDROCK_NETWORK_ID);
    }
}
