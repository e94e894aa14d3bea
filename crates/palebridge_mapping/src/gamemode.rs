/// Gamemode, shared by both wire formats as a small closed enum. Java
/// encodes it as a signed byte (`-1` meaning "no previous gamemode" is
/// handled by the caller, not this type); Bedrock encodes it as a varint
/// with the same ordinal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    pub fn from_java(value: i32) -> Self {
        match value {
            0 => GameMode::Survival,
            1 => GameMode::Creative,
            2 => GameMode::Adventure,
            3 => GameMode::Spectator,
            other => {
                tracing::debug!(other, "unmapped java gamemode id, using survival");
                GameMode::Survival
            }
        }
    }

    pub fn to_java(self) -> i32 {
        self as i32
    }

    pub fn to_bedrock(self) -> i32 {
        self as i32
    }
}
