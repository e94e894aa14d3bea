use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

pub const FALLBACK_BEDROCK_SOUND: &str = "random.pop";
pub const FALLBACK_JAVA_SOUND: &str = "minecraft:entity.item.pickup";

#[derive(Deserialize)]
struct Entry {
    java_identifier: String,
    bedrock_identifier: String,
}

pub struct SoundTable {
    java_to_bedrock: HashMap<String, String>,
    bedrock_to_java: HashMap<String, String>,
}

impl SoundTable {
    pub fn to_bedrock(&self, java_identifier: &str) -> &str {
        self.java_to_bedrock
            .get(java_identifier)
            .map(String::as_str)
            .unwrap_or(FALLBACK_BEDROCK_SOUND)
    }

    pub fn to_java(&self, bedrock_identifier: &str) -> &str {
        self.bedrock_to_java
            .get(bedrock_identifier)
            .map(String::as_str)
            .unwrap_or(FALLBACK_JAVA_SOUND)
    }
}

pub(crate) fn table() -> &'static SoundTable {
    static TABLE: Lazy<SoundTable> = Lazy::new(|| {
        let entries: Vec<Entry> =
            serde_json::from_str(include_str!("data/sounds.json")).expect("embedded sounds.json");

        let mut java_to_bedrock = HashMap::with_capacity(entries.len());
        let mut bedrock_to_java = HashMap::with_capacity(entries.len());

        for entry in entries {
            java_to_bedrock.insert(entry.java_identifier.clone(), entry.bedrock_identifier.clone());
            bedrock_to_java.insert(entry.bedrock_identifier, entry.java_identifier);
        }

        SoundTable {
            java_to_bedrock,
            bedrock_to_java,
        }
    });

    &TABLE
}
