//! Per-packet translation functions, grouped by the part of the game they
//! cover. Every function here takes `(&Context, &mut Session, packet)` and is
//! called from [`crate::registry`]'s match dispatch — this module has no
//! dispatch logic of its own.

pub mod chat;
pub mod chunk;
pub mod coords;
pub mod entity;
pub mod form;
pub mod inventory;
pub mod login;
pub mod movement;
pub mod world_event;
