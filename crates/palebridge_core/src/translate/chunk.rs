//! Chunk section translation: each Java chunk section carries its own
//! palette of block state strings plus a flat array of indices into it; each
//! Bedrock sub-chunk carries the same shape but with a palette of runtime
//! ids. The indices never need touching, only the palette entries.

use palebridge_protocol::bedrock::packet::{BedrockBlockEntity, BedrockSubChunk, LevelChunk};
use palebridge_protocol::bedrock::ServerPacket;
use palebridge_protocol::java::packet::{ChunkData, JavaBlockEntity, JavaChunkSection, UnloadChunk};

use crate::context::Context;
use crate::session::Session;

fn translate_section(ctx: &Context, section: &JavaChunkSection) -> BedrockSubChunk {
    let palette = section
        .palette
        .iter()
        .map(|java_state| ctx.tables.block().to_bedrock(java_state))
        .collect();

    let biomes = section
        .biomes
        .iter()
        .map(|java_biome| ctx.tables.biome().to_bedrock(java_biome))
        .collect();

    BedrockSubChunk {
        palette,
        blocks: section.blocks.clone(),
        biomes,
    }
}

/// Block entity identifiers ride the block table rather than a dedicated
/// one: the java identifier is looked up for its runtime id, then that id's
/// Bedrock identifier is read back out, falling back to the java identifier
/// unchanged when the block table has no entry for it.
fn translate_block_entity(ctx: &Context, block_entity: &JavaBlockEntity) -> BedrockBlockEntity {
    let runtime_id = ctx.tables.block().to_bedrock(&block_entity.identifier);
    let identifier = ctx
        .tables
        .block()
        .bedrock_identifier(runtime_id)
        .unwrap_or(&block_entity.identifier)
        .to_string();

    BedrockBlockEntity {
        x: block_entity.x,
        y: block_entity.y,
        z: block_entity.z,
        identifier,
        data: block_entity.data.clone(),
    }
}

pub fn handle_chunk_data(ctx: &Context, session: &mut Session, packet: ChunkData) {
    let sub_chunks = packet
        .sections
        .iter()
        .map(|section| translate_section(ctx, section))
        .collect();
    let block_entities = packet
        .block_entities
        .iter()
        .map(|block_entity| translate_block_entity(ctx, block_entity))
        .collect();

    session.chunks.remember(packet.chunk_x, packet.chunk_z);
    session.send_bedrock(ServerPacket::LevelChunk(LevelChunk {
        chunk_x: packet.chunk_x,
        chunk_z: packet.chunk_z,
        sub_chunks,
        heightmap: packet.heightmap,
        block_entities,
    }));
}

pub fn handle_unload_chunk(_ctx: &Context, session: &mut Session, packet: UnloadChunk) {
    session.chunks.forget(packet.chunk_x, packet.chunk_z);
    session.send_bedrock(ServerPacket::UnloadChunk(
        palebridge_protocol::bedrock::packet::UnloadChunk {
            chunk_x: packet.chunk_x,
            chunk_z: packet.chunk_z,
        },
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProxyConfig;
    use crate::session::SessionId;
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn new_ctx() -> Context {
        let (tx, _rx) = mpsc::channel(8);
        Context::new(Arc::new(ProxyConfig::default()), tx)
    }

    fn new_session() -> Session {
        Session::new(SessionId::next(), "en_US".into())
    }

    #[test]
    fn uniform_section_maps_every_block_to_the_same_runtime_id() {
        let ctx = new_ctx();
        let section = JavaChunkSection {
            palette: vec!["minecraft:stone".into()],
            blocks: vec![0; 4096],
            biomes: vec!["minecraft:plains".into()],
        };

        let translated = translate_section(&ctx, &section);
        assert_eq!(translated.blocks.len(), 4096);
        assert_eq!(translated.palette.len(), 1);
        assert_eq!(
            translated.palette[0],
            ctx.tables.block().to_bedrock("minecraft:stone")
        );
        assert_eq!(translated.biomes.len(), 1);
        assert_eq!(
            translated.biomes[0],
            ctx.tables.biome().to_bedrock("minecraft:plains")
        );
    }

    #[test]
    fn unmapped_block_state_falls_back_without_panicking() {
        let ctx = new_ctx();
        let section = JavaChunkSection {
            palette: vec!["minecraft:totally_made_up_block".into()],
            blocks: vec![0; 4096],
            biomes: vec!["minecraft:also_made_up".into()],
        };

        let translated = translate_section(&ctx, &section);
        assert_eq!(
            translated.palette[0],
            ctx.tables.block().to_bedrock("minecraft:another_made_up_block")
        );
        assert_eq!(
            translated.biomes[0],
            ctx.tables.biome().to_bedrock("minecraft:also_made_up")
        );
    }

    #[test]
    fn block_entity_identifier_rides_the_block_table() {
        let ctx = new_ctx();
        let block_entity = JavaBlockEntity {
            x: 1,
            y: 64,
            z: -2,
            identifier: "minecraft:chest".into(),
            data: "{\"Items\":[]}".into(),
        };

        let translated = translate_block_entity(&ctx, &block_entity);
        assert_eq!(translated.x, 1);
        assert_eq!(translated.y, 64);
        assert_eq!(translated.z, -2);
        assert_eq!(translated.data, "{\"Items\":[]}");
    }

    #[test]
    fn chunk_data_marks_the_chunk_loaded_and_unload_clears_it() {
        let ctx = new_ctx();
        let mut session = new_session();
        let (tx, mut rx) = mpsc::channel(8);
        session.attach_bedrock_sink(tx);

        handle_chunk_data(
            &ctx,
            &mut session,
            ChunkData {
                chunk_x: 3,
                chunk_z: -4,
                sections: vec![JavaChunkSection {
                    palette: vec!["minecraft:air".into()],
                    blocks: vec![0; 4096],
                    biomes: vec!["minecraft:plains".into()],
                }],
                heightmap: vec![64; 256],
                block_entities: vec![JavaBlockEntity {
                    x: 3,
                    y: 70,
                    z: -4,
                    identifier: "minecraft:chest".into(),
                    data: "{}".into(),
                }],
            },
        );
        assert!(session.chunks.contains(3, -4));
        assert!(rx.try_recv().is_ok());

        handle_unload_chunk(&ctx, &mut session, UnloadChunk { chunk_x: 3, chunk_z: -4 });
        assert!(!session.chunks.contains(3, -4));
        assert!(rx.try_recv().is_ok());
    }
}
