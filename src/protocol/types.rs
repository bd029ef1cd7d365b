//! Core X11 protocol types
//!
//! These types represent the fundamental data types used in the X11 protocol.
//! They are kept minimal and close to the wire protocol. Resource identifiers
//! are opaque: the codec checks their width, never their liveness.

use super::errors::{X11Error, X11Result};
use super::wire::{WireField, WireReader, WireWriter};
use std::fmt;

/// X11 resource ID - used for windows, pixmaps, graphics contexts, etc.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct XID(pub u32);

impl XID {
    pub const NONE: XID = XID(0);

    pub fn new(id: u32) -> Self {
        XID(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for XID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub XID);

        impl $name {
            pub const NONE: $name = $name(XID::NONE);

            pub fn new(id: u32) -> Self {
                $name(XID::new(id))
            }

            pub fn id(&self) -> XID {
                self.0
            }
        }

        impl WireField for $name {
            fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
                Ok($name::new(r.read_u32()?))
            }

            fn write_to(&self, w: &mut WireWriter) {
                w.write_u32(self.0.get());
            }
        }
    };
}

resource_id!(
    /// Window ID
    Window
);
resource_id!(
    /// Pixmap ID
    Pixmap
);
resource_id!(
    /// Drawable - a window or a pixmap. The wire format does not say which.
    Drawable
);
resource_id!(
    /// Graphics Context ID
    GContext
);
resource_id!(
    /// Colormap ID
    Colormap
);
resource_id!(
    /// Cursor ID
    Cursor
);
resource_id!(
    /// Font ID
    Font
);
resource_id!(
    /// Font or graphics context, as accepted by QueryFont/QueryTextExtents
    Fontable
);

impl From<Window> for Drawable {
    fn from(window: Window) -> Self {
        Drawable(window.id())
    }
}

impl From<Pixmap> for Drawable {
    fn from(pixmap: Pixmap) -> Self {
        Drawable(pixmap.id())
    }
}

macro_rules! plain_u32 {
    ($name:ident) => {
        impl WireField for $name {
            fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
                Ok($name(r.read_u32()?))
            }

            fn write_to(&self, w: &mut WireWriter) {
                w.write_u32(self.0);
            }
        }
    };
}

/// Atom - interned string identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Atom(pub u32);

impl Atom {
    pub const NONE: Atom = Atom(0);
    pub const PRIMARY: Atom = Atom(1);
    pub const SECONDARY: Atom = Atom(2);
    pub const ATOM: Atom = Atom(4);
    pub const CARDINAL: Atom = Atom(6);
    pub const INTEGER: Atom = Atom(19);
    pub const STRING: Atom = Atom(31);
    pub const WINDOW: Atom = Atom(33);
    pub const WM_NAME: Atom = Atom(39);

    pub fn new(id: u32) -> Self {
        Atom(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

plain_u32!(Atom);

/// Visual ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VisualID(pub u32);

impl VisualID {
    pub fn new(id: u32) -> Self {
        VisualID(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

plain_u32!(VisualID);

/// Timestamp (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(pub u32);

impl Timestamp {
    pub const CURRENT_TIME: Timestamp = Timestamp(0);

    pub fn new(ms: u32) -> Self {
        Timestamp(ms)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

plain_u32!(Timestamp);

/// Keycode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Keycode(pub u8);

impl Keycode {
    pub fn new(code: u8) -> Self {
        Keycode(code)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl WireField for Keycode {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(Keycode(r.read_u8()?))
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(self.0);
    }
}

/// Point (x, y coordinate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub fn new(x: i16, y: i16) -> Self {
        Point { x, y }
    }
}

impl WireField for Point {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(Point {
            x: r.read_i16()?,
            y: r.read_i16()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_i16(self.x);
        w.write_i16(self.y);
    }
}

/// Rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rectangle {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rectangle {
    pub fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Rectangle {
            x,
            y,
            width,
            height,
        }
    }
}

impl WireField for Rectangle {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(Rectangle {
            x: r.read_i16()?,
            y: r.read_i16()?,
            width: r.read_u16()?,
            height: r.read_u16()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_i16(self.x);
        w.write_i16(self.y);
        w.write_u16(self.width);
        w.write_u16(self.height);
    }
}

/// Segment (for drawing line segments)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segment {
    pub x1: i16,
    pub y1: i16,
    pub x2: i16,
    pub y2: i16,
}

impl WireField for Segment {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(Segment {
            x1: r.read_i16()?,
            y1: r.read_i16()?,
            x2: r.read_i16()?,
            y2: r.read_i16()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_i16(self.x1);
        w.write_i16(self.y1);
        w.write_i16(self.x2);
        w.write_i16(self.y2);
    }
}

/// Arc (for drawing arcs and ellipses)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Arc {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    pub angle1: i16, // Start angle in 1/64 degrees
    pub angle2: i16, // Arc angle in 1/64 degrees
}

impl WireField for Arc {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(Arc {
            x: r.read_i16()?,
            y: r.read_i16()?,
            width: r.read_u16()?,
            height: r.read_u16()?,
            angle1: r.read_i16()?,
            angle2: r.read_i16()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_i16(self.x);
        w.write_i16(self.y);
        w.write_u16(self.width);
        w.write_u16(self.height);
        w.write_i16(self.angle1);
        w.write_i16(self.angle2);
    }
}

/// Two-byte character used by the 16-bit text requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Char2b {
    pub byte1: u8,
    pub byte2: u8,
}

impl WireField for Char2b {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(Char2b {
            byte1: r.read_u8()?,
            byte2: r.read_u8()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(self.byte1);
        w.write_u8(self.byte2);
    }
}

/// RGB triple as carried by color requests and replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl WireField for Rgb {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(Rgb {
            red: r.read_u16()?,
            green: r.read_u16()?,
            blue: r.read_u16()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u16(self.red);
        w.write_u16(self.green);
        w.write_u16(self.blue);
    }
}

/// Window class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowClass {
    #[default]
    CopyFromParent = 0,
    InputOutput = 1,
    InputOnly = 2,
}

impl WindowClass {
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(WindowClass::CopyFromParent),
            1 => Some(WindowClass::InputOutput),
            2 => Some(WindowClass::InputOnly),
            _ => None,
        }
    }
}

impl WireField for WindowClass {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let value = r.read_u16()?;
        WindowClass::from_u16(value).ok_or_else(|| X11Error::bad_value(0, value as u32, 0))
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u16(*self as u16);
    }
}

/// Event masks
pub mod event_mask {
    pub const NO_EVENT: u32 = 0;
    pub const KEY_PRESS: u32 = 1 << 0;
    pub const KEY_RELEASE: u32 = 1 << 1;
    pub const BUTTON_PRESS: u32 = 1 << 2;
    pub const BUTTON_RELEASE: u32 = 1 << 3;
    pub const ENTER_WINDOW: u32 = 1 << 4;
    pub const LEAVE_WINDOW: u32 = 1 << 5;
    pub const POINTER_MOTION: u32 = 1 << 6;
    pub const EXPOSURE: u32 = 1 << 15;
    pub const STRUCTURE_NOTIFY: u32 = 1 << 17;
    pub const SUBSTRUCTURE_NOTIFY: u32 = 1 << 19;
    pub const SUBSTRUCTURE_REDIRECT: u32 = 1 << 20;
    pub const FOCUS_CHANGE: u32 = 1 << 21;
    pub const PROPERTY_CHANGE: u32 = 1 << 22;
}

/// Keyboard/pointer modifier masks
pub mod modifier_mask {
    pub const SHIFT: u16 = 1 << 0;
    pub const LOCK: u16 = 1 << 1;
    pub const CONTROL: u16 = 1 << 2;
    pub const MOD1: u16 = 1 << 3;
    pub const MOD4: u16 = 1 << 6;
    pub const BUTTON1: u16 = 1 << 8;
    pub const ANY_MODIFIER: u16 = 1 << 15;
}

/// Byte order negotiated at connection setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    LSBFirst = 0,
    MSBFirst = 1,
}

impl ByteOrder {
    /// Both orders, handy for exercising a codec path under each.
    pub const ALL: [ByteOrder; 2] = [ByteOrder::LSBFirst, ByteOrder::MSBFirst];

    /// Map the first byte of a connection setup ('l' or 'B') to an order.
    pub fn from_setup_byte(byte: u8) -> Option<Self> {
        match byte {
            b'l' => Some(ByteOrder::LSBFirst),
            b'B' => Some(ByteOrder::MSBFirst),
            _ => None,
        }
    }

    pub fn setup_byte(&self) -> u8 {
        match self {
            ByteOrder::LSBFirst => b'l',
            ByteOrder::MSBFirst => b'B',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_byte_mapping() {
        for order in ByteOrder::ALL {
            assert_eq!(ByteOrder::from_setup_byte(order.setup_byte()), Some(order));
        }
        assert_eq!(ByteOrder::from_setup_byte(b'x'), None);
    }

    #[test]
    fn test_window_class_rejects_unknown() {
        let bytes = [3u8, 0];
        let mut r = WireReader::new(&bytes, ByteOrder::LSBFirst);
        let err = r.read::<WindowClass>().unwrap_err();
        assert_eq!(err.code, super::super::errors::ErrorCode::Value);
        assert_eq!(err.bad_value, 3);
    }

    #[test]
    fn test_drawable_from_window() {
        let d: Drawable = Window::new(0x400001).into();
        assert_eq!(d.id().get(), 0x400001);
    }
}
