use std::collections::HashMap;

use glam::DVec3;

/// Everything the session remembers about one translated entity.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub java_id: i32,
    pub bedrock_runtime_id: u64,
    pub kind: i32,
    pub position: DVec3,
    pub yaw: f32,
    pub pitch: f32,
}

/// Bidirectional Java-id <-> Bedrock-runtime-id table for one session. Every
/// runtime id handed out is unique for the life of the session; ids are never
/// reused even after `unregister`.
#[derive(Debug, Default)]
pub struct EntityTable {
    by_java_id: HashMap<i32, EntityRecord>,
    by_runtime_id: HashMap<u64, i32>,
    next_runtime_id: u64,
}

/// Runtime id reserved for the player's own entity; never handed to
/// `register_entity`.
pub const PLAYER_RUNTIME_ID: u64 = 1;

impl EntityTable {
    pub fn new() -> Self {
        EntityTable {
            by_java_id: HashMap::new(),
            by_runtime_id: HashMap::new(),
            next_runtime_id: PLAYER_RUNTIME_ID + 1,
        }
    }

    /// Allocates a fresh Bedrock runtime id and registers a new entity.
    /// Returns the record so the caller can build the peer-facing spawn
    /// packet from it.
    pub fn register(&mut self, java_id: i32, kind: i32, position: DVec3, yaw: f32, pitch: f32) -> EntityRecord {
        let bedrock_runtime_id = self.next_runtime_id;
        self.next_runtime_id += 1;

        let record = EntityRecord {
            java_id,
            bedrock_runtime_id,
            kind,
            position,
            yaw,
            pitch,
        };

        self.by_java_id.insert(java_id, record.clone());
        self.by_runtime_id.insert(bedrock_runtime_id, java_id);
        record
    }

    pub fn unregister_by_java_id(&mut self, java_id: i32) -> Option<EntityRecord> {
        let record = self.by_java_id.remove(&java_id)?;
        self.by_runtime_id.remove(&record.bedrock_runtime_id);
        Some(record)
    }

    pub fn get_by_java_id(&self, java_id: i32) -> Option<&EntityRecord> {
        self.by_java_id.get(&java_id)
    }

    pub fn get_by_bedrock_id(&self, bedrock_runtime_id: u64) -> Option<&EntityRecord> {
        let java_id = self.by_runtime_id.get(&bedrock_runtime_id)?;
        self.by_java_id.get(java_id)
    }

    pub fn update_position(&mut self, java_id: i32, position: DVec3) {
        if let Some(record) = self.by_java_id.get_mut(&java_id) {
            record.position = position;
        }
    }

    pub fn update_rotation(&mut self, java_id: i32, yaw: f32, pitch: f32) {
        if let Some(record) = self.by_java_id.get_mut(&java_id) {
            record.yaw = yaw;
            record.pitch = pitch;
        }
    }

    pub fn len(&self) -> usize {
        self.by_java_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_java_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_either_id_returns_the_same_record() {
        let mut table = EntityTable::new();
        let record = table.register(42, 1, DVec3::ZERO, 0.0, 0.0);

        let by_java = table.get_by_java_id(42).unwrap();
        let by_bedrock = table.get_by_bedrock_id(record.bedrock_runtime_id).unwrap();
        assert_eq!(by_java.java_id, by_bedrock.java_id);
        assert_eq!(by_java.bedrock_runtime_id, by_bedrock.bedrock_runtime_id);
    }

    #[test]
    fn runtime_ids_are_never_reused() {
        let mut table = EntityTable::new();
        let a = table.register(1, 0, DVec3::ZERO, 0.0, 0.0);
        table.unregister_by_java_id(1);
        let b = table.register(2, 0, DVec3::ZERO, 0.0, 0.0);
        assert_ne!(a.bedrock_runtime_id, b.bedrock_runtime_id);
    }

    #[test]
    fn unregister_removes_both_directions() {
        let mut table = EntityTable::new();
        let record = table.register(7, 0, DVec3::ZERO, 0.0, 0.0);
        table.unregister_by_java_id(7);
        assert!(table.get_by_java_id(7).is_none());
        assert!(table.get_by_bedrock_id(record.bedrock_runtime_id).is_none());
    }

    #[test]
    fn player_runtime_id_is_never_allocated() {
        let mut table = EntityTable::new();
        let record = table.register(1, 0, DVec3::ZERO, 0.0, 0.0);
        assert_ne!(record.bedrock_runtime_id, PLAYER_RUNTIME_ID);
    }
}
