use bytes::{Buf, BufMut, Bytes, BytesMut};
use uuid::Uuid;

use super::codec::{read_string, write_string};
use crate::error::{CodecError, CodecResult};
use crate::varint::VarInt;

const MAX_STRING_BYTES: usize = 512;

pub mod id {
    pub const C2S_REQUEST_NETWORK_SETTINGS: u32 = 0xc1;
    pub const C2S_LOGIN: u32 = 0x01;
    pub const C2S_MOVE_PLAYER: u32 = 0x13;
    pub const C2S_TEXT: u32 = 0x09;
    pub const C2S_MODAL_FORM_RESPONSE: u32 = 0x26;
    pub const C2S_DISCONNECT: u32 = 0x05;

    pub const S2C_PLAY_STATUS: u32 = 0x02;
    pub const S2C_START_GAME: u32 = 0x0b;
    pub const S2C_ADD_PLAYER: u32 = 0x0c;
    pub const S2C_ADD_ENTITY: u32 = 0x0d;
    pub const S2C_REMOVE_ENTITY: u32 = 0x0e;
    pub const S2C_MOVE_ENTITY: u32 = 0x12;
    pub const S2C_TEXT: u32 = 0x09;
    pub const S2C_SET_PLAYER_GAME_TYPE: u32 = 0x3e;
    pub const S2C_LEVEL_EVENT: u32 = 0x19;
    pub const S2C_LEVEL_CHUNK: u32 = 0x3a;
    pub const S2C_UNLOAD_CHUNK: u32 = 0x3b;
    pub const S2C_MODAL_FORM_REQUEST: u32 = 0x64;
    pub const S2C_CONTAINER_OPEN: u32 = 0x2e;
    pub const S2C_INVENTORY_CONTENT: u32 = 0x31;
    pub const S2C_CONTAINER_CLOSE: u32 = 0x2f;
    pub const S2C_DISCONNECT: u32 = 0x05;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStatusCode {
    LoginSuccess,
    FailedClient,
    FailedServer,
    PlayerSpawn,
}

#[derive(Debug, Clone)]
pub struct RequestNetworkSettings {
    pub protocol_version: i32,
}

#[derive(Debug, Clone)]
pub struct Login {
    pub protocol_version: i32,
    pub username: String,
    pub uuid: Uuid,
    pub locale: String,
}

#[derive(Debug, Clone, Copy)]
pub struct MovePlayer {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone)]
pub struct TextC2s {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct ModalFormResponse {
    pub form_id: i32,
    /// `None` represents the player closing the form without a choice.
    pub data_json: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DisconnectC2s {
    pub message: Option<String>,
}

/// Everything the Bedrock client can send.
#[derive(Debug, Clone)]
pub enum ClientPacket {
    RequestNetworkSettings(RequestNetworkSettings),
    Login(Login),
    MovePlayer(MovePlayer),
    Text(TextC2s),
    ModalFormResponse(ModalFormResponse),
    Disconnect(DisconnectC2s),
}

impl ClientPacket {
    pub fn decode(packet_id: u32, mut body: Bytes) -> CodecResult<Option<Self>> {
        Ok(Some(match packet_id {
            id::C2S_REQUEST_NETWORK_SETTINGS => {
                ClientPacket::RequestNetworkSettings(RequestNetworkSettings {
                    protocol_version: body.get_i32(),
                })
            }
            id::C2S_LOGIN => {
                let protocol_version = body.get_i32();
                let username = read_string(&mut body, MAX_STRING_BYTES)?;
                let uuid = Uuid::parse_str(&read_string(&mut body, 64)?)
                    .map_err(|e| CodecError::Malformed(e.to_string()))?;
                let locale = read_string(&mut body, 32)?;
                ClientPacket::Login(Login {
                    protocol_version,
                    username,
                    uuid,
                    locale,
                })
            }
            id::C2S_MOVE_PLAYER => ClientPacket::MovePlayer(MovePlayer {
                x: body.get_f32(),
                y: body.get_f32(),
                z: body.get_f32(),
                pitch: body.get_f32(),
                yaw: body.get_f32(),
                head_yaw: body.get_f32(),
                on_ground: body.get_u8() != 0,
            }),
            id::C2S_TEXT => ClientPacket::Text(TextC2s {
                message: read_string(&mut body, MAX_STRING_BYTES)?,
            }),
            id::C2S_MODAL_FORM_RESPONSE => {
                let form_id = VarInt::decode(&mut body)?.0;
                let has_response = body.get_u8() != 0;
                let data_json = if has_response {
                    Some(read_string(&mut body, MAX_STRING_BYTES)?)
                } else {
                    None
                };
                ClientPacket::ModalFormResponse(ModalFormResponse { form_id, data_json })
            }
            id::C2S_DISCONNECT => {
                let has_message = body.get_u8() != 0;
                let message = if has_message {
                    Some(read_string(&mut body, MAX_STRING_BYTES)?)
                } else {
                    None
                };
                ClientPacket::Disconnect(DisconnectC2s { message })
            }
            _ => return Ok(None),
        }))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlayStatus {
    pub status: PlayStatusCode,
}

#[derive(Debug, Clone, Copy)]
pub struct StartGame {
    pub runtime_entity_id: u64,
    pub dimension: i32,
    pub gamemode: i32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub spawn_z: f32,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone)]
pub struct AddPlayer {
    pub uuid: Uuid,
    pub username: String,
    pub runtime_entity_id: u64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone)]
pub struct AddEntity {
    pub runtime_entity_id: u64,
    pub entity_type: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub yaw: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveEntity {
    pub runtime_entity_id: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct MoveEntity {
    pub runtime_entity_id: u64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub head_yaw: f32,
    pub on_ground: bool,
}

#[derive(Debug, Clone)]
pub struct TextS2c {
    pub sender_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SetPlayerGameType {
    pub gamemode: i32,
}

/// `LevelEvent`: the catch-all for weather, particle, and informational events.
#[derive(Debug, Clone, Copy)]
pub struct LevelEvent {
    pub event: i32,
    pub data: i32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

pub const LEVEL_EVENT_START_RAIN: i32 = 3001;
pub const LEVEL_EVENT_STOP_RAIN: i32 = 3002;
pub const LEVEL_EVENT_START_THUNDER: i32 = 3003;
pub const LEVEL_EVENT_STOP_THUNDER: i32 = 3004;

/// One 16x16x16 sub-chunk with a local runtime-id palette, mirroring the
/// paletted-storage layout the real Bedrock chunk format uses. `biomes` is
/// this section's biome palette, one Bedrock biome id per entry.
#[derive(Debug, Clone)]
pub struct BedrockSubChunk {
    pub palette: Vec<u32>,
    pub blocks: Vec<u16>,
    pub biomes: Vec<u8>,
}

/// A block entity attached to a chunk. `data` carries the entity's opaque
/// payload through untranslated, the way `data_json` does on a form request.
#[derive(Debug, Clone)]
pub struct BedrockBlockEntity {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub identifier: String,
    pub data: String,
}

#[derive(Debug, Clone)]
pub struct LevelChunk {
    pub chunk_x: i32,
    pub chunk_z: i32,
    pub sub_chunks: Vec<BedrockSubChunk>,
    pub heightmap: Vec<i32>,
    pub block_entities: Vec<BedrockBlockEntity>,
}

#[derive(Debug, Clone, Copy)]
pub struct UnloadChunk {
    pub chunk_x: i32,
    pub chunk_z: i32,
}

#[derive(Debug, Clone)]
pub struct ModalFormRequest {
    pub form_id: i32,
    pub data_json: String,
}

#[derive(Debug, Clone)]
pub struct ContainerOpen {
    pub window_id: u8,
    pub container_type: i8,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct InventorySlot {
    pub bedrock_id: i16,
    pub damage: i16,
    pub count: u8,
}

#[derive(Debug, Clone)]
pub struct InventoryContent {
    pub window_id: u8,
    pub slots: Vec<Option<InventorySlot>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ContainerClose {
    pub window_id: u8,
}

#[derive(Debug, Clone)]
pub struct DisconnectS2c {
    pub message: String,
}

/// Everything the proxy sends to the Bedrock client.
#[derive(Debug, Clone)]
pub enum ServerPacket {
    PlayStatus(PlayStatus),
    StartGame(StartGame),
    AddPlayer(AddPlayer),
    AddEntity(AddEntity),
    RemoveEntity(RemoveEntity),
    MoveEntity(MoveEntity),
    Text(TextS2c),
    SetPlayerGameType(SetPlayerGameType),
    LevelEvent(LevelEvent),
    LevelChunk(LevelChunk),
    UnloadChunk(UnloadChunk),
    ModalFormRequest(ModalFormRequest),
    ContainerOpen(ContainerOpen),
    InventoryContent(InventoryContent),
    ContainerClose(ContainerClose),
    Disconnect(DisconnectS2c),
}

impl ServerPacket {
    pub fn encode(&self) -> (u32, BytesMut) {
        let mut buf = BytesMut::new();
        let packet_id = match self {
            ServerPacket::PlayStatus(p) => {
                buf.put_i32(match p.status {
                    PlayStatusCode::LoginSuccess => 0,
                    PlayStatusCode::FailedClient => 1,
                    PlayStatusCode::FailedServer => 2,
                    PlayStatusCode::PlayerSpawn => 3,
                });
                id::S2C_PLAY_STATUS
            }
            ServerPacket::StartGame(p) => {
                VarInt(p.runtime_entity_id as i32).encode(&mut buf);
                buf.put_i32(p.dimension);
                buf.put_i32(p.gamemode);
                buf.put_f32(p.spawn_x);
                buf.put_f32(p.spawn_y);
                buf.put_f32(p.spawn_z);
                buf.put_f32(p.yaw);
                buf.put_f32(p.pitch);
                id::S2C_START_GAME
            }
            ServerPacket::AddPlayer(p) => {
                write_string(&mut buf, &p.uuid.to_string());
                write_string(&mut buf, &p.username);
                VarInt(p.runtime_entity_id as i32).encode(&mut buf);
                buf.put_f32(p.x);
                buf.put_f32(p.y);
                buf.put_f32(p.z);
                buf.put_f32(p.yaw);
                buf.put_f32(p.pitch);
                id::S2C_ADD_PLAYER
            }
            ServerPacket::AddEntity(p) => {
                VarInt(p.runtime_entity_id as i32).encode(&mut buf);
                write_string(&mut buf, &p.entity_type);
                buf.put_f32(p.x);
                buf.put_f32(p.y);
                buf.put_f32(p.z);
                buf.put_f32(p.yaw);
                buf.put_f32(p.pitch);
                id::S2C_ADD_ENTITY
            }
            ServerPacket::RemoveEntity(p) => {
                VarInt(p.runtime_entity_id as i32).encode(&mut buf);
                id::S2C_REMOVE_ENTITY
            }
            ServerPacket::MoveEntity(p) => {
                VarInt(p.runtime_entity_id as i32).encode(&mut buf);
                buf.put_f32(p.x);
                buf.put_f32(p.y);
                buf.put_f32(p.z);
                buf.put_f32(p.yaw);
                buf.put_f32(p.pitch);
                buf.put_f32(p.head_yaw);
                buf.put_u8(p.on_ground as u8);
                id::S2C_MOVE_ENTITY
            }
            ServerPacket::Text(p) => {
                write_string(&mut buf, &p.sender_name);
                write_string(&mut buf, &p.message);
                id::S2C_TEXT
            }
            ServerPacket::SetPlayerGameType(p) => {
                buf.put_i32(p.gamemode);
                id::S2C_SET_PLAYER_GAME_TYPE
            }
            ServerPacket::LevelEvent(p) => {
                buf.put_i32(p.event);
                buf.put_i32(p.data);
                buf.put_f32(p.x);
                buf.put_f32(p.y);
                buf.put_f32(p.z);
                id::S2C_LEVEL_EVENT
            }
            ServerPacket::LevelChunk(p) => {
                buf.put_i32(p.chunk_x);
                buf.put_i32(p.chunk_z);
                VarInt(p.sub_chunks.len() as i32).encode(&mut buf);
                for sub in &p.sub_chunks {
                    VarInt(sub.palette.len() as i32).encode(&mut buf);
                    for runtime_id in &sub.palette {
                        VarInt(*runtime_id as i32).encode(&mut buf);
                    }
                    for block in &sub.blocks {
                        buf.put_u16(*block);
                    }
                    VarInt(sub.biomes.len() as i32).encode(&mut buf);
                    for biome in &sub.biomes {
                        buf.put_u8(*biome);
                    }
                }
                VarInt(p.heightmap.len() as i32).encode(&mut buf);
                for height in &p.heightmap {
                    buf.put_i32(*height);
                }
                VarInt(p.block_entities.len() as i32).encode(&mut buf);
                for block_entity in &p.block_entities {
                    buf.put_i32(block_entity.x);
                    buf.put_i32(block_entity.y);
                    buf.put_i32(block_entity.z);
                    write_string(&mut buf, &block_entity.identifier);
                    write_string(&mut buf, &block_entity.data);
                }
                id::S2C_LEVEL_CHUNK
            }
            ServerPacket::UnloadChunk(p) => {
                buf.put_i32(p.chunk_x);
                buf.put_i32(p.chunk_z);
                id::S2C_UNLOAD_CHUNK
            }
            ServerPacket::ModalFormRequest(p) => {
                VarInt(p.form_id).encode(&mut buf);
                write_string(&mut buf, &p.data_json);
                id::S2C_MODAL_FORM_REQUEST
            }
            ServerPacket::ContainerOpen(p) => {
                buf.put_u8(p.window_id);
                buf.put_i8(p.container_type);
                buf.put_i32(p.x);
                buf.put_i32(p.y);
                buf.put_i32(p.z);
                id::S2C_CONTAINER_OPEN
            }
            ServerPacket::InventoryContent(p) => {
                buf.put_u8(p.window_id);
                VarInt(p.slots.len() as i32).encode(&mut buf);
                for slot in &p.slots {
                    match slot {
                        Some(s) => {
                            buf.put_u8(1);
                            buf.put_i16(s.bedrock_id);
                            buf.put_i16(s.damage);
                            buf.put_u8(s.count);
                        }
                        None => buf.put_u8(0),
                    }
                }
                id::S2C_INVENTORY_CONTENT
            }
            ServerPacket::ContainerClose(p) => {
                buf.put_u8(p.window_id);
                id::S2C_CONTAINER_CLOSE
            }
            ServerPacket::Disconnect(p) => {
                write_string(&mut buf, &p.message);
                id::S2C_DISCONNECT
            }
        };
        (packet_id, buf)
    }
}
