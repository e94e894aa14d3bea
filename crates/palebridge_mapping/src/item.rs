use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

/// A Bedrock-side item stack identity: numeric id plus metadata/damage
/// value, mirroring how Bedrock folds Java's separate item+durability model
/// into a single (id, damage) pair for non-component items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemStack {
    pub bedrock_id: i16,
    pub bedrock_damage: i16,
}

pub const FALLBACK_ITEM: ItemStack = ItemStack {
    bedrock_id: 0,
    bedrock_damage: 0,
};
pub const FALLBACK_JAVA_ITEM_ID: i32 = 0;

#[derive(Deserialize)]
struct Entry {
    java_id: i32,
    #[allow(dead_code)]
    java_identifier: String,
    bedrock_id: i16,
    bedrock_damage: i16,
}

pub struct ItemTable {
    java_to_bedrock: HashMap<i32, ItemStack>,
    bedrock_to_java: HashMap<(i16, i16), i32>,
}

impl ItemTable {
    pub fn to_bedrock(&self, java_id: i32) -> ItemStack {
        self.java_to_bedrock.get(&java_id).copied().unwrap_or_else(|| {
            tracing::debug!(java_id, "unmapped item id, using air fallback");
            FALLBACK_ITEM
        })
    }

    pub fn to_java(&self, item: ItemStack) -> i32 {
        self.bedrock_to_java
            .get(&(item.bedrock_id, item.bedrock_damage))
            .copied()
            .unwrap_or(FALLBACK_JAVA_ITEM_ID)
    }
}

pub(crate) fn table() -> &'static ItemTable {
    static TABLE: Lazy<ItemTable> = Lazy::new(|| {
        let entries: Vec<Entry> =
            serde_json::from_str(include_str!("data/items.json")).expect("embedded items.json");

        let mut java_to_bedrock = HashMap::with_capacity(entries.len());
        let mut bedrock_to_java = HashMap::with_capacity(entries.len());

        for entry in entries {
            let stack = ItemStack {
                bedrock_id: entry.bedrock_id,
                bedrock_damage: entry.bedrock_damage,
            };
            java_to_bedrock.insert(entry.java_id, stack);
            bedrock_to_java.insert((stack.bedrock_id, stack.bedrock_damage), entry.java_id);
        }

        ItemTable {
            java_to_bedrock,
            bedrock_to_java,
        }
    });

    &TABLE
}
