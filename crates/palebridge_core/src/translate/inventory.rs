//! Inventory windows: Java `OpenScreen`/`SetSlot`/`CloseWindow` translate to
//! Bedrock `ContainerOpen`/`InventoryContent`/`ContainerClose`, with the
//! session's window table as the source of truth for what's currently open
//! so a `SetSlot` for a window the proxy never saw opened is dropped instead
//! of panicking.

use palebridge_protocol::bedrock::packet::{ContainerClose, ContainerOpen, InventoryContent, InventorySlot};
use palebridge_protocol::bedrock::ServerPacket;
use palebridge_protocol::java::packet::{CloseWindow, OpenScreen, SetSlot};

use crate::context::Context;
use crate::session::Session;

/// Slot count for the small set of vanilla window kinds this bridge names
/// explicitly; anything else gets a generic single-row chest's worth, which
/// is wrong for larger containers but never panics.
fn slot_count_for_window_type(window_type: i32) -> usize {
    match window_type {
        0 => 9,  // generic_9x1
        1 => 18, // generic_9x2
        2 => 27, // generic_9x3
        3 => 54, // generic_9x6 (double chest)
        _ => 27,
    }
}

pub fn handle_open_screen(_ctx: &Context, session: &mut Session, packet: OpenScreen) {
    let slot_count = slot_count_for_window_type(packet.window_type);
    session.windows.open(packet.window_id, packet.window_type, slot_count);

    session.send_bedrock(ServerPacket::ContainerOpen(ContainerOpen {
        window_id: packet.window_id,
        container_type: packet.window_type as i8,
        x: 0,
        y: 0,
        z: 0,
    }));
}

pub fn handle_set_slot(ctx: &Context, session: &mut Session, packet: SetSlot) {
    let Ok(window_id) = u8::try_from(packet.window_id) else {
        // Negative window ids address the cursor item, not a real window;
        // out of scope for this bridge.
        return;
    };
    let Ok(slot) = usize::try_from(packet.slot) else {
        return;
    };

    let Some(contents) = session.windows.set_slot(window_id, slot, packet.item) else {
        tracing::debug!(window_id, slot, "set_slot for an unopened window, dropping");
        return;
    };

    let slots = contents
        .iter()
        .map(|item| {
            item.map(|slot| {
                let stack = ctx.tables.item().to_bedrock(slot.item_id as i32);
                InventorySlot {
                    bedrock_id: stack.bedrock_id,
                    damage: stack.bedrock_damage,
                    count: slot.count,
                }
            })
        })
        .collect();

    session.send_bedrock(ServerPacket::InventoryContent(InventoryContent { window_id, slots }));
}

pub fn handle_close_window(_ctx: &Context, session: &mut Session, packet: CloseWindow) {
    session.windows.close(packet.window_id);
    session.send_bedrock(ServerPacket::ContainerClose(ContainerClose {
        window_id: packet.window_id,
    }));
}
