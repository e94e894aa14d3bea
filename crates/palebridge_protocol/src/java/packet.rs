use bytes::{Buf, BufMut, Bytes, BytesMut};
use uuid::Uuid;

use super::codec::{read_string, read_uuid, write_string};
use crate::error::{CodecError, CodecResult};
use crate::varint::VarInt;

const MAX_STRING_CHARS: usize = 32767;

/// A slot in a Java inventory window: present items carry an id, stack
/// count, and damage/metadata value; an empty slot is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaItemSlot {
    pub item_id: i16,
    pub count: u8,
    pub damage: i16,
}

fn read_slot(buf: &mut Bytes) -> CodecResult<Option<JavaItemSlot>> {
    if buf.remaining() < 1 {
        return Err(CodecError::Underflow { needed: 1 });
    }
    if buf.get_u8() == 0 {
        return Ok(None);
    }
    if buf.remaining() < 5 {
        return Err(CodecError::Underflow { needed: 5 - buf.remaining() });
    }
    Ok(Some(JavaItemSlot {
        item_id: buf.get_i16(),
        count: buf.get_u8(),
        damage: buf.get_i16(),
    }))
}

macro_rules! packet_ids {
    ($($name:ident = $id:expr),* $(,)?) => {
        $(pub const $name: i32 = $id;)*
    };
}

pub mod id {
    packet_ids! {
        // handshake/login, sent to the server
        C2S_HANDSHAKE = 0x00,
        C2S_LOGIN_START = 0x00,
        C2S_ENCRYPTION_RESPONSE = 0x01,
        // play, sent to the server
        C2S_CHAT_MESSAGE = 0x03,
        C2S_CLIENT_STATUS = 0x04,
        C2S_KEEP_ALIVE = 0x0f,
        C2S_PLAYER_POSITION = 0x11,
        C2S_PLAYER_POSITION_AND_ROTATION = 0x12,
        C2S_PLAYER_ROTATION = 0x13,
        // login, received from the server
        S2C_DISCONNECT_LOGIN = 0x00,
        S2C_ENCRYPTION_REQUEST = 0x01,
        S2C_LOGIN_SUCCESS = 0x02,
        S2C_SET_COMPRESSION = 0x03,
        // play, received from the server
        S2C_SPAWN_ENTITY = 0x00,
        S2C_SPAWN_PLAYER = 0x04,
        S2C_CHAT_MESSAGE = 0x0e,
        S2C_WINDOW_ITEMS = 0x14,
        S2C_SET_SLOT = 0x16,
        S2C_DISCONNECT_PLAY = 0x1a,
        S2C_ENTITY_POSITION = 0x27,
        S2C_ENTITY_POSITION_AND_ROTATION = 0x28,
        S2C_ENTITY_ROTATION = 0x29,
        S2C_JOIN_GAME = 0x25,
        S2C_GAME_STATE_CHANGE = 0x1e,
        S2C_OPEN_WINDOW = 0x2e,
        S2C_CLOSE_WINDOW = 0x13,
        S2C_DESTROY_ENTITIES = 0x38,
        S2C_UNLOAD_CHUNK = 0x1d,
        S2C_CHUNK_DATA = 0x21,
        S2C_KEEP_ALIVE = 0x21,
    }
}

/// Values the Java client sends during the handshake's `next_state` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextState {
    Status,
    Login,
}

#[derive(Debug, Clone)]
pub struct Handshake {
    pub protocol_version: i32,
    pub server_address: String,
    pub server_port: u16,
    pub next_state: NextState,
}

#[derive(Debug, Clone)]
pub struct LoginStart {
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct EncryptionResponse {
    pub shared_secret: Vec<u8>,
    pub verify_token: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ChatMessageC2s {
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
pub struct ClientStatus {
    pub action_id: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct KeepAliveC2s {
    pub id: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerPositionAndRotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct PlayerRotation {
    pub yaw: f32,
    pub pitch: f32,
    pub on_ground: bool,
}

/// Everything the proxy sends to the configured Java server.
#[derive(Debug, Clone)]
pub enum ServerboundPacket {
    Handshake(Handshake),
    LoginStart(LoginStart),
    EncryptionResponse(EncryptionResponse),
    ChatMessage(ChatMessageC2s),
    ClientStatus(ClientStatus),
    KeepAlive(KeepAliveC2s),
    PlayerPosition(PlayerPosition),
    PlayerPositionAndRotation(PlayerPositionAndRotation),
    PlayerRotation(PlayerRotation),
}

impl ServerboundPacket {
    pub fn encode(&self) -> (i32, BytesMut) {
        let mut buf = BytesMut::new();
        let packet_id = match self {
            ServerboundPacket::Handshake(p) => {
                VarInt(p.protocol_version).encode(&mut buf);
                write_string(&mut buf, &p.server_address);
                buf.put_u16(p.server_port);
                VarInt(match p.next_state {
                    NextState::Status => 1,
                    NextState::Login => 2,
                })
                .encode(&mut buf);
                id::C2S_HANDSHAKE
            }
            ServerboundPacket::LoginStart(p) => {
                write_string(&mut buf, &p.username);
                id::C2S_LOGIN_START
            }
            ServerboundPacket::EncryptionResponse(p) => {
                VarInt(p.shared_secret.len() as i32).encode(&mut buf);
                buf.extend_from_slice(&p.shared_secret);
                VarInt(p.verify_token.len() as i32).encode(&mut buf);
                buf.extend_from_slice(&p.verify_token);
                id::C2S_ENCRYPTION_RESPONSE
            }
            ServerboundPacket::ChatMessage(p) => {
                write_string(&mut buf, &p.message);
                id::C2S_CHAT_MESSAGE
            }
            ServerboundPacket::ClientStatus(p) => {
                VarInt(p.action_id).encode(&mut buf);
                id::C2S_CLIENT_STATUS
            }
            ServerboundPacket::KeepAlive(p) => {
                buf.put_i64(p.id);
                id::C2S_KEEP_ALIVE
            }
            ServerboundPacket::PlayerPosition(p) => {
                buf.put_f64(p.x);
                buf.put_f64(p.y);
                buf.put_f64(p.z);
                buf.put_u8(p.on_ground as u8);
                id::C2S_PLAYER_POSITION
            }
            ServerboundPacket::PlayerPositionAndRotation(p) => {
                buf.put_f64(p.x);
                buf.put_f64(p.y);
                buf.put_f64(p.z);
                buf.put_f32(p.yaw);
                buf.put_f32(p.pitch);
                buf.put_u8(p.on_ground as u8);
                id::C2S_PLAYER_POSITION_AND_ROTATION
            }
            ServerboundPacket::PlayerRotation(p) => {
                buf.put_f32(p.yaw);
                buf.put_f32(p.pitch);
                buf.put_u8(p.on_ground as u8);
                id::C2S_PLAYER_ROTATION
            }
        };
        (packet_id, buf)
    }
}

#[derive(Debug, Clone)]
pub struct DisconnectLogin {
    pub reason_json: String,
}

#[derive(Debug, Clone)]
pub struct EncryptionRequest {
    pub server_id: String,
    pub public_key: Vec<u8>,
    pub verify_token: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub uuid: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SetCompression {
    pub threshold: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct JoinGame {
    pub entity_id: i32,
    pub gamemode: u8,
    pub dimension: i32,
}

/// Blocks per cubic chunk section (16x16x16), the unit both editions agree on.
pub const SECTION_BLOCK_COUNT: usize = 16 * 16 * 16;

/// One paletted 16x16x16 section: `blocks[i]` indexes into `palette`, the way
/// the real protocol's paletted containers avoid repeating a block state
/// string for every one of the 4096 positions. `biomes` is this section's
/// biome palette, one namespaced identifier per entry.
#[derive(Debug, Clone)]
pub struct JavaChunkSection {
    pub palette: Vec<String>,
    pub blocks: Vec<u16>,
    pub biomes: Vec<String>,
}

/// A block entity (chest, sign, furnace, ...) attached to a chunk. `data` is
/// the entity's opaque payload, carried as a raw string the way `json` is on
/// `ChatMessageS2c` rather than parsed here.
#[derive(Debug, Clone)]
pub struct JavaBlockEntity {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub identifier: String,
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct ChunkData {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub sections: Vec<JavaChunkSection>,
    pub heightmap: Vec<i32>,
    pub block_entities: Vec<JavaBlockEntity>,
}

#[derive(Debug, Clone, Copy)]
pub struct UnloadChunk {
    pub chunk_x: i32,
    pub chunk_z: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct SpawnEntity {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub kind: i32,
    pub position: glam::DVec3,
    pub pitch: crate::byte_angle::ByteAngle,
    pub yaw: crate::byte_angle::ByteAngle,
}

#[derive(Debug, Clone, Copy)]
pub struct SpawnPlayer {
    pub entity_id: i32,
    pub uuid: Uuid,
    pub position: glam::DVec3,
    pub yaw: crate::byte_angle::ByteAngle,
    pub pitch: crate::byte_angle::ByteAngle,
}

#[derive(Debug, Clone)]
pub struct DestroyEntities {
    pub entity_ids: Vec<i32>,
}

#[derive(Debug, Clone, Copy)]
pub struct EntityPosition {
    pub entity_id: i32,
    pub dx: i16,
    pub dy: i16,
    pub dz: i16,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct EntityPositionAndRotation {
    pub entity_id: i32,
    pub dx: i16,
    pub dy: i16,
    pub dz: i16,
    pub yaw: crate::byte_angle::ByteAngle,
    pub pitch: crate::byte_angle::ByteAngle,
    pub on_ground: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct EntityRotation {
    pub entity_id: i32,
    pub yaw: crate::byte_angle::ByteAngle,
    pub pitch: crate::byte_angle::ByteAngle,
    pub on_ground: bool,
}

/// `NotifyClient`/`GameStateChange`: gamemode changes and weather events both
/// ride this packet, distinguished by `reason`.
#[derive(Debug, Clone, Copy)]
pub struct GameStateChange {
    pub reason: u8,
    pub value: f32,
}

pub const GAME_EVENT_START_RAIN: u8 = 1;
pub const GAME_EVENT_STOP_RAIN: u8 = 2;
pub const GAME_EVENT_CHANGE_GAMEMODE: u8 = 3;
pub const GAME_EVENT_RAIN_LEVEL_CHANGE: u8 = 7;
pub const GAME_EVENT_THUNDER_LEVEL_CHANGE: u8 = 8;

#[derive(Debug, Clone, Copy)]
pub struct KeepAliveS2c {
    pub id: i64,
}

#[derive(Debug, Clone)]
pub struct ChatMessageS2c {
    pub json: String,
    pub position: u8,
}

#[derive(Debug, Clone)]
pub struct OpenScreen {
    pub window_id: u8,
    pub window_type: i32,
    pub title_json: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SetSlot {
    pub window_id: i8,
    pub slot: i16,
    pub item: Option<JavaItemSlot>,
}

#[derive(Debug, Clone, Copy)]
pub struct CloseWindow {
    pub window_id: u8,
}

#[derive(Debug, Clone)]
pub struct DisconnectPlay {
    pub reason_json: String,
}

/// Everything the configured Java server can send to the proxy.
#[derive(Debug, Clone)]
pub enum ClientboundPacket {
    DisconnectLogin(DisconnectLogin),
    EncryptionRequest(EncryptionRequest),
    LoginSuccess(LoginSuccess),
    SetCompression(SetCompression),
    JoinGame(JoinGame),
    ChunkData(ChunkData),
    UnloadChunk(UnloadChunk),
    SpawnEntity(SpawnEntity),
    SpawnPlayer(SpawnPlayer),
    DestroyEntities(DestroyEntities),
    EntityPosition(EntityPosition),
    EntityPositionAndRotation(EntityPositionAndRotation),
    EntityRotation(EntityRotation),
    GameStateChange(GameStateChange),
    KeepAlive(KeepAliveS2c),
    ChatMessage(ChatMessageS2c),
    OpenScreen(OpenScreen),
    SetSlot(SetSlot),
    CloseWindow(CloseWindow),
    DisconnectPlay(DisconnectPlay),
}

impl ClientboundPacket {
    /// Decodes a packet from a `(packet_id, body)` pair as produced by
    /// [`PacketDecoder::try_next_packet`][super::codec::PacketDecoder::try_next_packet].
    /// `login` selects which id table applies, since login and play phases
    /// reuse small ids for different packets.
    pub fn decode(login: bool, packet_id: i32, mut body: Bytes) -> CodecResult<Option<Self>> {
        if login {
            return Ok(Some(match packet_id {
                id::S2C_DISCONNECT_LOGIN => ClientboundPacket::DisconnectLogin(DisconnectLogin {
                    reason_json: read_string(&mut body, MAX_STRING_CHARS)?,
                }),
                id::S2C_ENCRYPTION_REQUEST => {
                    let server_id = read_string(&mut body, 20)?;
                    let key_len = VarInt::decode(&mut body)?.0 as usize;
                    let public_key = take_bytes(&mut body, key_len)?;
                    let token_len = VarInt::decode(&mut body)?.0 as usize;
                    let verify_token = take_bytes(&mut body, token_len)?;
                    ClientboundPacket::EncryptionRequest(EncryptionRequest {
                        server_id,
                        public_key,
                        verify_token,
                    })
                }
                id::S2C_LOGIN_SUCCESS => {
                    let uuid = read_uuid(&mut body)?;
                    let username = read_string(&mut body, 16)?;
                    ClientboundPacket::LoginSuccess(LoginSuccess { uuid, username })
                }
                id::S2C_SET_COMPRESSION => ClientboundPacket::SetCompression(SetCompression {
                    threshold: VarInt::decode(&mut body)?.0,
                }),
                _ => return Ok(None),
            }));
        }

        Ok(Some(match packet_id {
            id::S2C_JOIN_GAME => {
                let entity_id = body.get_i32();
                let gamemode = body.get_u8();
                let dimension = body.get_i32();
                ClientboundPacket::JoinGame(JoinGame {
                    entity_id,
                    gamemode,
                    dimension,
                })
            }
            id::S2C_CHUNK_DATA => {
                let chunk_x = body.get_i32();
                let chunk_z = body.get_i32();
                let section_count = VarInt::decode(&mut body)?.0;
                let mut sections = Vec::with_capacity(section_count.max(0) as usize);
                for _ in 0..section_count {
                    sections.push(read_chunk_section(&mut body)?);
                }
                let heightmap = read_heightmap(&mut body)?;
                let block_entity_count = VarInt::decode(&mut body)?.0;
                let mut block_entities = Vec::with_capacity(block_entity_count.max(0) as usize);
                for _ in 0..block_entity_count {
                    block_entities.push(read_block_entity(&mut body)?);
                }
                ClientboundPacket::ChunkData(ChunkData {
                    chunk_x,
                    chunk_z,
                    sections,
                    heightmap,
                    block_entities,
                })
            }
            id::S2C_UNLOAD_CHUNK => ClientboundPacket::UnloadChunk(UnloadChunk {
                chunk_x: body.get_i32(),
                chunk_z: body.get_i32(),
            }),
            id::S2C_SPAWN_ENTITY => {
                let entity_id = VarInt::decode(&mut body)?.0;
                let uuid = read_uuid(&mut body)?;
                let kind = VarInt::decode(&mut body)?.0;
                let position =
                    glam::DVec3::new(body.get_f64(), body.get_f64(), body.get_f64());
                let pitch = crate::byte_angle::ByteAngle::decode(&mut body);
                let yaw = crate::byte_angle::ByteAngle::decode(&mut body);
                ClientboundPacket::SpawnEntity(SpawnEntity {
                    entity_id,
                    uuid,
                    kind,
                    position,
                    yaw,
                    pitch,
                })
            }
            id::S2C_SPAWN_PLAYER => {
                let entity_id = VarInt::decode(&mut body)?.0;
                let uuid = read_uuid(&mut body)?;
                let position =
                    glam::DVec3::new(body.get_f64(), body.get_f64(), body.get_f64());
                let yaw = crate::byte_angle::ByteAngle::decode(&mut body);
                let pitch = crate::byte_angle::ByteAngle::decode(&mut body);
                ClientboundPacket::SpawnPlayer(SpawnPlayer {
                    entity_id,
                    uuid,
                    position,
                    yaw,
                    pitch,
                })
            }
            id::S2C_DESTROY_ENTITIES => {
                let count = VarInt::decode(&mut body)?.0;
                let mut entity_ids = Vec::with_capacity(count.max(0) as usize);
                for _ in 0..count {
                    entity_ids.push(VarInt::decode(&mut body)?.0);
                }
                ClientboundPacket::DestroyEntities(DestroyEntities { entity_ids })
            }
            id::S2C_ENTITY_POSITION => {
                let entity_id = VarInt::decode(&mut body)?.0;
                let dx = body.get_i16();
                let dy = body.get_i16();
                let dz = body.get_i16();
                let on_ground = body.get_u8() != 0;
                ClientboundPacket::EntityPosition(EntityPosition {
                    entity_id,
                    dx,
                    dy,
                    dz,
                    on_ground,
                })
            }
            id::S2C_ENTITY_POSITION_AND_ROTATION => {
                let entity_id = VarInt::decode(&mut body)?.0;
                let dx = body.get_i16();
                let dy = body.get_i16();
                let dz = body.get_i16();
                let yaw = crate::byte_angle::ByteAngle::decode(&mut body);
                let pitch = crate::byte_angle::ByteAngle::decode(&mut body);
                let on_ground = body.get_u8() != 0;
                ClientboundPacket::EntityPositionAndRotation(EntityPositionAndRotation {
                    entity_id,
                    dx,
                    dy,
                    dz,
                    yaw,
                    pitch,
                    on_ground,
                })
            }
            id::S2C_ENTITY_ROTATION => {
                let entity_id = VarInt::decode(&mut body)?.0;
                let yaw = crate::byte_angle::ByteAngle::decode(&mut body);
                let pitch = crate::byte_angle::ByteAngle::decode(&mut body);
                let on_ground = body.get_u8() != 0;
                ClientboundPacket::EntityRotation(EntityRotation {
                    entity_id,
                    yaw,
                    pitch,
                    on_ground,
                })
            }
            id::S2C_GAME_STATE_CHANGE => ClientboundPacket::GameStateChange(GameStateChange {
                reason: body.get_u8(),
                value: body.get_f32(),
            }),
            id::S2C_KEEP_ALIVE => ClientboundPacket::KeepAlive(KeepAliveS2c {
                id: body.get_i64(),
            }),
            id::S2C_CHAT_MESSAGE => ClientboundPacket::ChatMessage(ChatMessageS2c {
                json: read_string(&mut body, MAX_STRING_CHARS)?,
                position: body.get_u8(),
            }),
            id::S2C_OPEN_WINDOW => {
                let window_id = body.get_u8();
                let window_type = VarInt::decode(&mut body)?.0;
                let title_json = read_string(&mut body, MAX_STRING_CHARS)?;
                ClientboundPacket::OpenScreen(OpenScreen {
                    window_id,
                    window_type,
                    title_json,
                })
            }
            id::S2C_SET_SLOT => {
                let window_id = body.get_i8();
                let slot = body.get_i16();
                let item = read_slot(&mut body)?;
                ClientboundPacket::SetSlot(SetSlot {
                    window_id,
                    slot,
                    item,
                })
            }
            id::S2C_CLOSE_WINDOW => ClientboundPacket::CloseWindow(CloseWindow {
                window_id: body.get_u8(),
            }),
            id::S2C_DISCONNECT_PLAY => ClientboundPacket::DisconnectPlay(DisconnectPlay {
                reason_json: read_string(&mut body, MAX_STRING_CHARS)?,
            }),
            _ => return Ok(None),
        }))
    }
}

fn read_chunk_section(buf: &mut Bytes) -> CodecResult<JavaChunkSection> {
    let palette_len = VarInt::decode(buf)?.0;
    if palette_len < 0 {
        return Err(CodecError::Malformed("negative palette length".into()));
    }
    let mut palette = Vec::with_capacity(palette_len as usize);
    for _ in 0..palette_len {
        palette.push(read_string(buf, MAX_STRING_CHARS)?);
    }

    if buf.remaining() < SECTION_BLOCK_COUNT * 2 {
        return Err(CodecError::Underflow {
            needed: SECTION_BLOCK_COUNT * 2 - buf.remaining(),
        });
    }
    let mut blocks = Vec::with_capacity(SECTION_BLOCK_COUNT);
    for _ in 0..SECTION_BLOCK_COUNT {
        blocks.push(buf.get_u16());
    }

    let biome_len = VarInt::decode(buf)?.0;
    if biome_len < 0 {
        return Err(CodecError::Malformed("negative biome palette length".into()));
    }
    let mut biomes = Vec::with_capacity(biome_len as usize);
    for _ in 0..biome_len {
        biomes.push(read_string(buf, MAX_STRING_CHARS)?);
    }

    Ok(JavaChunkSection { palette, blocks, biomes })
}

/// Reads a length-prefixed array of per-column surface heights (one entry
/// per position in the chunk's 16x16 footprint).
fn read_heightmap(buf: &mut Bytes) -> CodecResult<Vec<i32>> {
    let len = VarInt::decode(buf)?.0;
    if len < 0 {
        return Err(CodecError::Malformed("negative heightmap length".into()));
    }
    if buf.remaining() < len as usize * 4 {
        return Err(CodecError::Underflow {
            needed: len as usize * 4 - buf.remaining(),
        });
    }
    let mut heights = Vec::with_capacity(len as usize);
    for _ in 0..len {
        heights.push(buf.get_i32());
    }
    Ok(heights)
}

fn read_block_entity(buf: &mut Bytes) -> CodecResult<JavaBlockEntity> {
    if buf.remaining() < 12 {
        return Err(CodecError::Underflow { needed: 12 - buf.remaining() });
    }
    let x = buf.get_i32();
    let y = buf.get_i32();
    let z = buf.get_i32();
    let identifier = read_string(buf, MAX_STRING_CHARS)?;
    let data = read_string(buf, MAX_STRING_CHARS)?;
    Ok(JavaBlockEntity { x, y, z, identifier, data })
}

fn take_bytes(buf: &mut Bytes, len: usize) -> CodecResult<Vec<u8>> {
    if buf.remaining() < len {
        return Err(CodecError::Underflow {
            needed: len - buf.remaining(),
        });
    }
    Ok(buf.copy_to_bytes(len).to_vec())
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    #[test]
    fn handshake_round_trips_through_encode() {
        let pkt = ServerboundPacket::Handshake(Handshake {
            protocol_version: 340,
            server_address: "play.example.com".into(),
            server_port: 25565,
            next_state: NextState::Login,
        });
        let (id, body) = pkt.encode();
        assert_eq!(id, id::C2S_HANDSHAKE);
        assert!(!body.is_empty());
    }

    #[test]
    fn join_game_decodes_fields_in_order() {
        let mut body = BytesMut::new();
        body.put_i32(42);
        body.put_u8(1);
        body.put_i32(0);

        let decoded =
            ClientboundPacket::decode(false, id::S2C_JOIN_GAME, body.freeze())
                .unwrap()
                .unwrap();

        match decoded {
            ClientboundPacket::JoinGame(j) => {
                assert_eq!(j.entity_id, 42);
                assert_eq!(j.gamemode, 1);
                assert_eq!(j.dimension, 0);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn unknown_packet_id_decodes_to_none() {
        assert!(ClientboundPacket::decode(false, 0x7f7f, Bytes::new())
            .unwrap()
            .is_none());
    }

    #[test]
    fn chunk_data_decodes_one_uniform_section() {
        let mut body = BytesMut::new();
        body.put_i32(3);
        body.put_i32(-1);
        VarInt(1).encode(&mut body); // section count
        VarInt(1).encode(&mut body); // palette length
        write_string(&mut body, "minecraft:stone");
        for _ in 0..SECTION_BLOCK_COUNT {
            body.put_u16(0);
        }
        VarInt(1).encode(&mut body); // biome palette length
        write_string(&mut body, "minecraft:plains");
        VarInt(1).encode(&mut body); // heightmap length
        body.put_i32(64);
        VarInt(1).encode(&mut body); // block entity count
        body.put_i32(3 * 16);
        body.put_i32(70);
        body.put_i32(-1 * 16);
        write_string(&mut body, "minecraft:chest");
        write_string(&mut body, "{}");

        let decoded = ClientboundPacket::decode(false, id::S2C_CHUNK_DATA, body.freeze())
            .unwrap()
            .unwrap();

        match decoded {
            ClientboundPacket::ChunkData(c) => {
                assert_eq!(c.chunk_x, 3);
                assert_eq!(c.chunk_z, -1);
                assert_eq!(c.sections.len(), 1);
                assert_eq!(c.sections[0].palette, vec!["minecraft:stone".to_string()]);
                assert_eq!(c.sections[0].blocks.len(), SECTION_BLOCK_COUNT);
                assert_eq!(c.sections[0].biomes, vec!["minecraft:plains".to_string()]);
                assert_eq!(c.heightmap, vec![64]);
                assert_eq!(c.block_entities.len(), 1);
                assert_eq!(c.block_entities[0].identifier, "minecraft:chest");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn set_slot_with_empty_item_round_trips() {
        let mut body = BytesMut::new();
        body.put_i8(0);
        body.put_i16(5);
        body.put_u8(0);

        let decoded = ClientboundPacket::decode(false, id::S2C_SET_SLOT, body.freeze())
            .unwrap()
            .unwrap();

        match decoded {
            ClientboundPacket::SetSlot(s) => {
                assert_eq!(s.slot, 5);
                assert!(s.item.is_none());
            }
            _ => panic!("wrong variant"),
        }
    }
}
