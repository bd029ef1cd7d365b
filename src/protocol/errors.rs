//! X11 protocol error codes and error handling
//!
//! [`X11Error`] is both the 32-byte error frame that travels on the wire and
//! the error type every decoder in this crate returns for malformed input.

use super::types::ByteOrder;
use super::wire::{WireReader, WireWriter};
use std::fmt;

/// First error code assigned to the XInputExtension.
pub const XINPUT_FIRST_ERROR: u8 = 129;

/// X11 error codes as defined in the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Request,
    Value,
    Window,
    Pixmap,
    Atom,
    Cursor,
    Font,
    Match,
    Drawable,
    Access,
    Alloc,
    Colormap,
    GContext,
    IDChoice,
    Name,
    Length,
    Implementation,
    /// XInput BadDevice
    Device,
    /// Any other code, kept verbatim so it can be forwarded.
    Generic(u8),
}

impl ErrorCode {
    pub fn from_u8(code: u8) -> Self {
        match code {
            1 => ErrorCode::Request,
            2 => ErrorCode::Value,
            3 => ErrorCode::Window,
            4 => ErrorCode::Pixmap,
            5 => ErrorCode::Atom,
            6 => ErrorCode::Cursor,
            7 => ErrorCode::Font,
            8 => ErrorCode::Match,
            9 => ErrorCode::Drawable,
            10 => ErrorCode::Access,
            11 => ErrorCode::Alloc,
            12 => ErrorCode::Colormap,
            13 => ErrorCode::GContext,
            14 => ErrorCode::IDChoice,
            15 => ErrorCode::Name,
            16 => ErrorCode::Length,
            17 => ErrorCode::Implementation,
            XINPUT_FIRST_ERROR => ErrorCode::Device,
            other => ErrorCode::Generic(other),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            ErrorCode::Request => 1,
            ErrorCode::Value => 2,
            ErrorCode::Window => 3,
            ErrorCode::Pixmap => 4,
            ErrorCode::Atom => 5,
            ErrorCode::Cursor => 6,
            ErrorCode::Font => 7,
            ErrorCode::Match => 8,
            ErrorCode::Drawable => 9,
            ErrorCode::Access => 10,
            ErrorCode::Alloc => 11,
            ErrorCode::Colormap => 12,
            ErrorCode::GContext => 13,
            ErrorCode::IDChoice => 14,
            ErrorCode::Name => 15,
            ErrorCode::Length => 16,
            ErrorCode::Implementation => 17,
            ErrorCode::Device => XINPUT_FIRST_ERROR,
            ErrorCode::Generic(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Request => "Request: bad request code",
            ErrorCode::Value => "Value: integer parameter out of range",
            ErrorCode::Window => "Window: invalid Window parameter",
            ErrorCode::Pixmap => "Pixmap: invalid Pixmap parameter",
            ErrorCode::Atom => "Atom: invalid Atom parameter",
            ErrorCode::Cursor => "Cursor: invalid Cursor parameter",
            ErrorCode::Font => "Font: invalid Font parameter",
            ErrorCode::Match => "Match: parameter mismatch",
            ErrorCode::Drawable => "Drawable: invalid Drawable parameter",
            ErrorCode::Access => "Access: attempt to access private resource",
            ErrorCode::Alloc => "Alloc: insufficient resources",
            ErrorCode::Colormap => "Colormap: invalid Colormap parameter",
            ErrorCode::GContext => "GContext: invalid GC parameter",
            ErrorCode::IDChoice => "IDChoice: invalid resource ID for this connection",
            ErrorCode::Name => "Name: font or color name doesn't exist",
            ErrorCode::Length => "Length: request length incorrect",
            ErrorCode::Implementation => "Implementation: server implementation error",
            ErrorCode::Device => "Device: invalid input device",
            ErrorCode::Generic(_) => "Generic: error code not known to this codec",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Generic(code) => write!(f, "{} ({})", self.as_str(), code),
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

/// X11 error packet
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "X11 Error: {code} (sequence: {sequence}, value: 0x{bad_value:08x}, major: {major_opcode}, minor: {minor_opcode})"
)]
pub struct X11Error {
    pub code: ErrorCode,
    pub sequence: u16,
    pub bad_value: u32,
    /// Minor opcode; core requests leave it 0, extensions use one byte of it.
    pub minor_opcode: u16,
    pub major_opcode: u8,
}

/// Result type for X11 operations
pub type X11Result<T> = Result<T, X11Error>;

impl X11Error {
    pub fn new(
        code: ErrorCode,
        sequence: u16,
        bad_value: u32,
        minor_opcode: u16,
        major_opcode: u8,
    ) -> Self {
        X11Error {
            code,
            sequence,
            bad_value,
            minor_opcode,
            major_opcode,
        }
    }

    /// Encode error to wire format (32 bytes)
    pub fn encode(&self, order: ByteOrder) -> [u8; 32] {
        let mut w = WireWriter::with_capacity(order, 32);
        w.write_u8(0); // Error
        w.write_u8(self.code.code());
        w.write_u16(self.sequence);
        w.write_u32(self.bad_value);
        w.write_u16(self.minor_opcode);
        w.write_u8(self.major_opcode);
        w.into_frame()
    }

    /// Decode an error frame. Only the first 32 bytes are examined.
    pub fn decode(bytes: &[u8], order: ByteOrder) -> X11Result<Self> {
        if bytes.len() < 32 {
            return Err(X11Error::bad_length(0, 0));
        }
        let mut r = WireReader::new(&bytes[..32], order);
        let tag = r.read_u8()?;
        if tag != 0 {
            return Err(X11Error::bad_value(0, tag as u32, 0));
        }
        let code = ErrorCode::from_u8(r.read_u8()?);
        let sequence = r.read_u16()?;
        let bad_value = r.read_u32()?;
        let minor_opcode = r.read_u16()?;
        let major_opcode = r.read_u8()?;
        Ok(X11Error::new(code, sequence, bad_value, minor_opcode, major_opcode))
    }

    /// Attribute the error to a request, filling in its opcodes.
    pub fn for_request(mut self, major_opcode: u8, minor_opcode: u16) -> Self {
        self.major_opcode = major_opcode;
        self.minor_opcode = minor_opcode;
        self
    }

    pub fn with_sequence(mut self, sequence: u16) -> Self {
        self.sequence = sequence;
        self
    }
}

/// Encode an error frame.
pub fn encode_error(error: &X11Error, order: ByteOrder) -> [u8; 32] {
    error.encode(order)
}

/// Decode an error frame.
pub fn decode_error(bytes: &[u8], order: ByteOrder) -> X11Result<X11Error> {
    X11Error::decode(bytes, order)
}

/// Helper functions to create common errors
impl X11Error {
    pub fn bad_request(sequence: u16, major_opcode: u8) -> Self {
        X11Error::new(ErrorCode::Request, sequence, 0, 0, major_opcode)
    }

    pub fn bad_value(sequence: u16, value: u32, major_opcode: u8) -> Self {
        X11Error::new(ErrorCode::Value, sequence, value, 0, major_opcode)
    }

    pub fn bad_match(sequence: u16, major_opcode: u8) -> Self {
        X11Error::new(ErrorCode::Match, sequence, 0, 0, major_opcode)
    }

    pub fn bad_length(sequence: u16, major_opcode: u8) -> Self {
        X11Error::new(ErrorCode::Length, sequence, 0, 0, major_opcode)
    }

    pub fn implementation_error(sequence: u16, value: u32, major_opcode: u8) -> Self {
        X11Error::new(ErrorCode::Implementation, sequence, value, 0, major_opcode)
    }

    pub fn bad_device(sequence: u16, device: u32, major_opcode: u8) -> Self {
        X11Error::new(ErrorCode::Device, sequence, device, 0, major_opcode)
    }
}
