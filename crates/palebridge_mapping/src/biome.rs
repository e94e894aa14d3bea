use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

pub const FALLBACK_BEDROCK_BIOME: u8 = 1; // plains
pub const FALLBACK_JAVA_BIOME: &str = "minecraft:plains";

#[derive(Deserialize)]
struct Entry {
    java_identifier: String,
    bedrock_id: u8,
}

pub struct BiomeTable {
    java_to_bedrock: HashMap<String, u8>,
    bedrock_to_java: HashMap<u8, String>,
}

impl BiomeTable {
    pub fn to_bedrock(&self, java_identifier: &str) -> u8 {
        self.java_to_bedrock
            .get(java_identifier)
            .copied()
            .unwrap_or(FALLBACK_BEDROCK_BIOME)
    }

    pub fn to_java(&self, bedrock_id: u8) -> &str {
        self.bedrock_to_java
            .get(&bedrock_id)
            .map(String::as_str)
            .unwrap_or(FALLBACK_JAVA_BIOME)
    }
}

pub(crate) fn table() -> &'static BiomeTable {
    static TABLE: Lazy<BiomeTable> = Lazy::new(|| {
        let entries: Vec<Entry> =
            serde_json::from_str(include_str!("data/biomes.json")).expect("embedded biomes.json");

        let mut java_to_bedrock = HashMap::with_capacity(entries.len());
        let mut bedrock_to_java = HashMap::with_capacity(entries.len());

        for entry in entries {
            java_to_bedrock.insert(entry.java_identifier.clone(), entry.bedrock_id);
            bedrock_to_java.insert(entry.bedrock_id, entry.java_identifier);
        }

        BiomeTable {
            java_to_bedrock,
            bedrock_to_java,
        }
    });

    &TABLE
}
