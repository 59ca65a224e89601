//! Network message encoding
//!
//! The socket itself lives in the host page; this module only turns
//! requests into frames and frames back into replies.

use proto::{Slot, UserId, C2S, S2C};

pub fn encode(msg: &C2S) -> Result<Vec<u8>, String> {
    msg.to_bytes()
        .map_err(|e| format!("Failed to serialize {:?} message: {:?}", msg.kind(), e))
}

pub fn decode(bytes: &[u8]) -> Result<S2C, String> {
    S2C::from_bytes(bytes).map_err(|e| format!("Failed to decode server message: {:?}", e))
}

/// Slot numbers as the page shows them: 1 or 2
pub fn slot_from_number(number: u8) -> Result<Slot, String> {
    match number {
        1 => Ok(Slot::Player1),
        2 => Ok(Slot::Player2),
        other => Err(format!("No such player slot: {other}")),
    }
}

pub fn create_logout_message(slot: Slot) -> Result<Vec<u8>, String> {
    encode(&C2S::Logout { slot })
}

pub fn create_history_message(user_id: UserId) -> Result<Vec<u8>, String> {
    encode(&C2S::History { user_id })
}

pub fn create_record_match_message(left_score: u32, right_score: u32) -> Result<Vec<u8>, String> {
    encode(&C2S::RecordMatch {
        left_score,
        right_score,
    })
}

pub fn create_ping_message(t_ms: u32) -> Result<Vec<u8>, String> {
    encode(&C2S::Ping { t_ms })
}
