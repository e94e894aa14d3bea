//! UI forms: a translator-initiated request/response dialog riding on the
//! Bedrock-only `ModalFormRequest`/`ModalFormResponse` pair, fulfilled by a
//! one-shot channel per pending form id.

use palebridge_protocol::bedrock::packet::{ModalFormRequest, ModalFormResponse};
use palebridge_protocol::bedrock::ServerPacket;
use tokio::sync::oneshot;

use crate::context::Context;
use crate::session::{FormResponse, Session};

/// Game ticks per second at the documented 50ms tick rate.
const TICKS_PER_SECOND: u64 = 20;

/// Allocates a form id, installs the pending slot, and sends the request to
/// the Bedrock peer. The returned receiver resolves with the peer's answer,
/// or with [`FormResponse::Cancelled`] on timeout or session death.
pub fn send_form(ctx: &Context, session: &mut Session, data_json: String) -> oneshot::Receiver<FormResponse> {
    let form_id = session.forms.next_form_id();
    let timeout_ticks = ctx.config.form_response_timeout_secs * TICKS_PER_SECOND;
    let rx = session.forms.put_pending(form_id, session.tick + timeout_ticks);

    session.send_bedrock(ServerPacket::ModalFormRequest(ModalFormRequest {
        form_id,
        data_json,
    }));

    rx
}

pub fn handle_modal_form_response(_ctx: &Context, session: &mut Session, packet: ModalFormResponse) {
    let response = match packet.data_json {
        Some(json) => FormResponse::Data(json),
        None => FormResponse::Cancelled,
    };
    session.forms.complete(packet.form_id, response);
}
