/// x11wire - X11 wire protocol codec
///
/// This library turns X11 byte streams into typed requests, replies, errors
/// and events and back, for the core protocol plus the XInputExtension and
/// BIG-REQUESTS. It performs no I/O; every call takes the connection's byte
/// order explicitly.

pub mod protocol;
pub mod extensions;

pub use protocol::{
    decode_error, decode_event, decode_reply, decode_request, decode_server_message,
    encode_error, encode_event, request_frame_len, server_frame_len, ByteOrder, ErrorCode, Event,
    Message, ProtocolEncoder, ProtocolParser, Reply, Request, X11Error, X11Result,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol version
pub const PROTOCOL_MAJOR: u16 = protocol::PROTOCOL_MAJOR_VERSION;
pub const PROTOCOL_MINOR: u16 = protocol::PROTOCOL_MINOR_VERSION;
