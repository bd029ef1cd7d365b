/// X11 protocol implementation
///
/// This module implements the X11 wire protocol, including types, requests,
/// replies, events, and errors, plus the framing rules that tell a reader
/// where one message ends and the next begins.

pub mod wire;
pub mod types;
pub mod errors;
pub mod events;
pub mod requests;
pub mod replies;
pub mod parser;
pub mod encoder;

pub use types::*;
pub use errors::*;
pub use events::*;
pub use requests::*;
pub use replies::*;
pub use parser::*;
pub use encoder::*;
pub use wire::{WireField, WireReader, WireWriter};

/// X11 protocol version
pub const PROTOCOL_MAJOR_VERSION: u16 = 11;
pub const PROTOCOL_MINOR_VERSION: u16 = 0;

/// Padding helper - X11 requires data to be padded to 4-byte boundaries
pub fn pad_len(n: usize) -> usize {
    (4 - (n % 4)) % 4
}

/// Calculate padded length
pub fn padded_len(n: usize) -> usize {
    n + pad_len(n)
}

/// Any message that can appear on an X11 connection after setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Request(Request),
    Reply { sequence: u16, reply: Reply },
    Error(X11Error),
    Event(Event),
}

impl Message {
    pub fn encode(&self, order: ByteOrder) -> Vec<u8> {
        match self {
            Message::Request(request) => request.encode(order),
            Message::Reply { sequence, reply } => reply.encode(*sequence, order),
            Message::Error(error) => error.encode(order).to_vec(),
            Message::Event(event) => event.encode(order).to_vec(),
        }
    }
}

/// Size in bytes of the client request starting at `bytes[0]`, or `None`
/// while too few bytes have arrived to tell.
///
/// A zero 16-bit length selects the BIG-REQUESTS form. Lengths below the
/// header size are reported as the header size so a streaming reader
/// always makes progress; decoding such a frame fails with a Length error.
pub fn request_frame_len(bytes: &[u8], order: ByteOrder) -> Option<usize> {
    let length = wire::read_u16(bytes.get(2..4)?, order).ok()?;
    if length != 0 {
        return Some(length as usize * 4);
    }
    let extended = wire::read_u32(bytes.get(4..8)?, order).ok()?;
    Some((extended as usize).saturating_mul(4).max(8))
}

/// Size in bytes of the server message starting at `bytes[0]`, or `None`
/// while too few bytes have arrived to tell.
///
/// Errors and events are always 32 bytes. Replies and GenericEvents carry
/// a length of additional 4-byte units after the first 32 bytes.
pub fn server_frame_len(bytes: &[u8], order: ByteOrder) -> Option<usize> {
    match *bytes.first()? & 0x7f {
        1 | events::GENERIC_EVENT => {
            let length = wire::read_u32(bytes.get(4..8)?, order).ok()?;
            Some(32 + (length as usize).saturating_mul(4))
        }
        _ => Some(32),
    }
}

/// Decode one server message.
///
/// Replies do not name the request they answer, so `lookup` maps a reply's
/// sequence number to the `(major, minor)` opcode of the outstanding
/// request. A reply nobody is waiting for is a Request error.
pub fn decode_server_message<F>(bytes: &[u8], order: ByteOrder, lookup: F) -> X11Result<Message>
where
    F: FnOnce(u16) -> Option<(u8, u16)>,
{
    let tag = *bytes.first().ok_or_else(|| X11Error::bad_length(0, 0))?;
    match tag {
        0 => Ok(Message::Error(decode_error(bytes, order)?)),
        1 => {
            let sequence = wire::read_u16(bytes.get(2..).unwrap_or(&[]), order)?;
            let (major, minor) =
                lookup(sequence).ok_or_else(|| X11Error::bad_request(sequence, 0))?;
            log::trace!(
                "Reply seq={} matched to request major={} minor={}",
                sequence,
                major,
                minor
            );
            let (sequence, reply) = decode_reply(major, minor, bytes, order)?;
            Ok(Message::Reply { sequence, reply })
        }
        _ => Ok(Message::Event(decode_event(bytes, order)?)),
    }
}
