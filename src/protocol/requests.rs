//! X11 protocol requests
//!
//! This module defines the core request opcodes, the request header, and the
//! body records of every core request. Each record knows its own byte layout
//! through [`RequestBody`]; dispatch by opcode lives in the parser.

use super::errors::*;
use super::types::*;
use super::wire::{
    clamp_u16, clamp_u8, fixed_request, list_bytes, read_u16, read_u32, WireReader, WireWriter,
};
use super::{pad_len, padded_len};

/// X11 request opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RequestOpcode {
    CreateWindow = 1,
    ChangeWindowAttributes = 2,
    GetWindowAttributes = 3,
    DestroyWindow = 4,
    DestroySubwindows = 5,
    ChangeSaveSet = 6,
    ReparentWindow = 7,
    MapWindow = 8,
    MapSubwindows = 9,
    UnmapWindow = 10,
    UnmapSubwindows = 11,
    ConfigureWindow = 12,
    CirculateWindow = 13,
    GetGeometry = 14,
    QueryTree = 15,
    InternAtom = 16,
    GetAtomName = 17,
    ChangeProperty = 18,
    DeleteProperty = 19,
    GetProperty = 20,
    ListProperties = 21,
    SetSelectionOwner = 22,
    GetSelectionOwner = 23,
    ConvertSelection = 24,
    SendEvent = 25,
    GrabPointer = 26,
    UngrabPointer = 27,
    GrabButton = 28,
    UngrabButton = 29,
    ChangeActivePointerGrab = 30,
    GrabKeyboard = 31,
    UngrabKeyboard = 32,
    GrabKey = 33,
    UngrabKey = 34,
    AllowEvents = 35,
    GrabServer = 36,
    UngrabServer = 37,
    QueryPointer = 38,
    GetMotionEvents = 39,
    TranslateCoordinates = 40,
    WarpPointer = 41,
    SetInputFocus = 42,
    GetInputFocus = 43,
    QueryKeymap = 44,
    OpenFont = 45,
    CloseFont = 46,
    QueryFont = 47,
    QueryTextExtents = 48,
    ListFonts = 49,
    ListFontsWithInfo = 50,
    SetFontPath = 51,
    GetFontPath = 52,
    CreatePixmap = 53,
    FreePixmap = 54,
    CreateGC = 55,
    ChangeGC = 56,
    CopyGC = 57,
    SetDashes = 58,
    SetClipRectangles = 59,
    FreeGC = 60,
    ClearArea = 61,
    CopyArea = 62,
    CopyPlane = 63,
    PolyPoint = 64,
    PolyLine = 65,
    PolySegment = 66,
    PolyRectangle = 67,
    PolyArc = 68,
    FillPoly = 69,
    PolyFillRectangle = 70,
    PolyFillArc = 71,
    PutImage = 72,
    GetImage = 73,
    PolyText8 = 74,
    PolyText16 = 75,
    ImageText8 = 76,
    ImageText16 = 77,
    CreateColormap = 78,
    FreeColormap = 79,
    CopyColormapAndFree = 80,
    InstallColormap = 81,
    UninstallColormap = 82,
    ListInstalledColormaps = 83,
    AllocColor = 84,
    AllocNamedColor = 85,
    AllocColorCells = 86,
    AllocColorPlanes = 87,
    FreeColors = 88,
    StoreColors = 89,
    StoreNamedColor = 90,
    QueryColors = 91,
    LookupColor = 92,
    CreateCursor = 93,
    CreateGlyphCursor = 94,
    FreeCursor = 95,
    RecolorCursor = 96,
    QueryBestSize = 97,
    QueryExtension = 98,
    ListExtensions = 99,
    ChangeKeyboardMapping = 100,
    GetKeyboardMapping = 101,
    ChangeKeyboardControl = 102,
    GetKeyboardControl = 103,
    Bell = 104,
    ChangePointerControl = 105,
    GetPointerControl = 106,
    SetScreenSaver = 107,
    GetScreenSaver = 108,
    ChangeHosts = 109,
    ListHosts = 110,
    SetAccessControl = 111,
    SetCloseDownMode = 112,
    KillClient = 113,
    RotateProperties = 114,
    ForceScreenSaver = 115,
    SetPointerMapping = 116,
    GetPointerMapping = 117,
    SetModifierMapping = 118,
    GetModifierMapping = 119,
    NoOperation = 127,
}

impl RequestOpcode {
    const TABLE: [RequestOpcode; 119] = {
        use RequestOpcode::*;
        [
            CreateWindow, ChangeWindowAttributes, GetWindowAttributes, DestroyWindow,
            DestroySubwindows, ChangeSaveSet, ReparentWindow, MapWindow, MapSubwindows,
            UnmapWindow, UnmapSubwindows, ConfigureWindow, CirculateWindow, GetGeometry,
            QueryTree, InternAtom, GetAtomName, ChangeProperty, DeleteProperty, GetProperty,
            ListProperties, SetSelectionOwner, GetSelectionOwner, ConvertSelection, SendEvent,
            GrabPointer, UngrabPointer, GrabButton, UngrabButton, ChangeActivePointerGrab,
            GrabKeyboard, UngrabKeyboard, GrabKey, UngrabKey, AllowEvents, GrabServer,
            UngrabServer, QueryPointer, GetMotionEvents, TranslateCoordinates, WarpPointer,
            SetInputFocus, GetInputFocus, QueryKeymap, OpenFont, CloseFont, QueryFont,
            QueryTextExtents, ListFonts, ListFontsWithInfo, SetFontPath, GetFontPath,
            CreatePixmap, FreePixmap, CreateGC, ChangeGC, CopyGC, SetDashes,
            SetClipRectangles, FreeGC, ClearArea, CopyArea, CopyPlane, PolyPoint, PolyLine,
            PolySegment, PolyRectangle, PolyArc, FillPoly, PolyFillRectangle, PolyFillArc,
            PutImage, GetImage, PolyText8, PolyText16, ImageText8, ImageText16,
            CreateColormap, FreeColormap, CopyColormapAndFree, InstallColormap,
            UninstallColormap, ListInstalledColormaps, AllocColor, AllocNamedColor,
            AllocColorCells, AllocColorPlanes, FreeColors, StoreColors, StoreNamedColor,
            QueryColors, LookupColor, CreateCursor, CreateGlyphCursor, FreeCursor,
            RecolorCursor, QueryBestSize, QueryExtension, ListExtensions,
            ChangeKeyboardMapping, GetKeyboardMapping, ChangeKeyboardControl,
            GetKeyboardControl, Bell, ChangePointerControl, GetPointerControl,
            SetScreenSaver, GetScreenSaver, ChangeHosts, ListHosts, SetAccessControl,
            SetCloseDownMode, KillClient, RotateProperties, ForceScreenSaver,
            SetPointerMapping, GetPointerMapping, SetModifierMapping, GetModifierMapping,
        ]
    };

    pub fn from_u8(opcode: u8) -> Option<Self> {
        match opcode {
            1..=119 => Some(Self::TABLE[opcode as usize - 1]),
            127 => Some(RequestOpcode::NoOperation),
            _ => None,
        }
    }

    /// Whether the server answers this request with a reply.
    pub fn has_reply(&self) -> bool {
        use RequestOpcode::*;
        matches!(
            self,
            GetWindowAttributes
                | GetGeometry
                | QueryTree
                | InternAtom
                | GetAtomName
                | GetProperty
                | ListProperties
                | GetSelectionOwner
                | GrabPointer
                | GrabKeyboard
                | QueryPointer
                | GetMotionEvents
                | TranslateCoordinates
                | GetInputFocus
                | QueryKeymap
                | QueryFont
                | QueryTextExtents
                | ListFonts
                | ListFontsWithInfo
                | GetFontPath
                | GetImage
                | ListInstalledColormaps
                | AllocColor
                | AllocNamedColor
                | AllocColorCells
                | AllocColorPlanes
                | QueryColors
                | LookupColor
                | QueryBestSize
                | QueryExtension
                | ListExtensions
                | GetKeyboardMapping
                | GetKeyboardControl
                | GetPointerControl
                | GetScreenSaver
                | ListHosts
                | SetPointerMapping
                | GetPointerMapping
                | SetModifierMapping
                | GetModifierMapping
        )
    }
}

/// Request header (common to all requests)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeader {
    pub opcode: u8,
    pub detail: u8, // Request-specific detail byte, or the minor opcode
    pub length: u32, // Whole request, in 4-byte units
    pub header_len: usize, // 4, or 8 when the BIG-REQUESTS form is used
}

impl RequestHeader {
    /// Parse request header from buffer
    pub fn parse(buffer: &[u8], order: ByteOrder) -> X11Result<Self> {
        if buffer.len() < 4 {
            return Err(X11Error::bad_length(0, buffer.first().copied().unwrap_or(0)));
        }
        let opcode = buffer[0];
        let detail = buffer[1];
        let length = read_u16(&buffer[2..4], order)?;
        if length != 0 {
            return Ok(RequestHeader {
                opcode,
                detail,
                length: length as u32,
                header_len: 4,
            });
        }

        // BIG-REQUESTS: a zero length is followed by a 32-bit length.
        let extended = read_u32(buffer.get(4..8).unwrap_or(&[]), order)
            .map_err(|e| e.for_request(opcode, 0))?;
        if extended < 2 {
            return Err(X11Error::bad_length(0, opcode));
        }
        Ok(RequestHeader {
            opcode,
            detail,
            length: extended,
            header_len: 8,
        })
    }

    /// Get total request size in bytes
    pub fn size(&self) -> usize {
        (self.length as usize) * 4
    }

    pub fn is_big(&self) -> bool {
        self.header_len == 8
    }
}

/// Wire layout of a request body (the bytes after the header).
pub trait RequestBody: Sized {
    /// Value carried in header byte 1.
    fn detail(&self) -> u8 {
        0
    }

    fn write_body(&self, w: &mut WireWriter);

    /// Decode a body. Implementations check the body length against the
    /// request's shape before reading fields.
    fn read_body(detail: u8, r: &mut WireReader<'_>) -> X11Result<Self>;
}

/// Bitmask-selected list of 32-bit values (window attributes, GC values,
/// keyboard control, ConfigureWindow).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueList {
    pub mask: u32,
    pub values: Vec<u32>, // One per set bit, lowest bit first
}

impl ValueList {
    pub fn new() -> Self {
        ValueList::default()
    }

    /// Set the value for a single mask `bit`, keeping values in bit order.
    pub fn with(mut self, bit: u32, value: u32) -> Self {
        debug_assert!(bit.is_power_of_two());
        let index = (self.mask & (bit - 1)).count_ones() as usize;
        if self.mask & bit != 0 {
            self.values[index] = value;
        } else {
            self.mask |= bit;
            self.values.insert(index, value);
        }
        self
    }

    pub fn get(&self, bit: u32) -> Option<u32> {
        if self.mask & bit == 0 {
            return None;
        }
        let index = (self.mask & (bit - 1)).count_ones() as usize;
        self.values.get(index).copied()
    }

    /// Read the values selected by `mask`; they must fill the rest of the body.
    pub fn read(mask: u32, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = mask.count_ones() as usize;
        r.require_exact(count * 4)?;
        Ok(ValueList {
            mask,
            values: r.read_list(count)?,
        })
    }

    pub fn write_values(&self, w: &mut WireWriter) {
        w.write_list(&self.values);
    }
}

/// Number of `format`-bit units covering `len` bytes of property data. A
/// trailing partial unit counts as whole: property data always starts on a
/// word boundary and the frame is zero-padded to one, so the unit is
/// completed with zeros on the wire.
pub(crate) fn format_units(format: u8, len: usize) -> u32 {
    match format_unit_size(format) {
        Ok(unit) => ((len + unit - 1) / unit) as u32,
        Err(_) => 0,
    }
}

/// Validate a property format and return its unit size in bytes.
pub(crate) fn format_unit_size(format: u8) -> X11Result<usize> {
    match format {
        8 => Ok(1),
        16 => Ok(2),
        32 => Ok(4),
        other => Err(X11Error::bad_value(0, other as u32, 0)),
    }
}

/// Read a `u16` length, two unused bytes, then that many padded bytes which
/// must end the body.
fn read_counted_name(r: &mut WireReader<'_>) -> X11Result<Vec<u8>> {
    r.require_min(4)?;
    let len = r.read_u16()? as usize;
    r.skip(2)?;
    r.require_exact(padded_len(len))?;
    r.read_padded_bytes(len)
}

fn write_counted_name(w: &mut WireWriter, name: &[u8]) {
    let name = clamp_u16(name);
    w.write_u16(name.len() as u16);
    w.write_zeros(2);
    w.write_padded_bytes(name);
}

/// Read records of `size` bytes until the body ends; the body must hold a
/// whole number of them.
fn read_trailing_list<T: super::wire::WireField>(
    r: &mut WireReader<'_>,
    size: usize,
) -> X11Result<Vec<T>> {
    if r.remaining() % size != 0 {
        return Err(X11Error::bad_length(0, 0));
    }
    r.read_list(r.remaining() / size)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateWindowRequest {
    pub depth: u8,
    pub wid: Window,
    pub parent: Window,
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    pub border_width: u16,
    pub class: WindowClass,
    pub visual: VisualID,
    pub values: ValueList,
}

impl RequestBody for CreateWindowRequest {
    fn detail(&self) -> u8 {
        self.depth
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.wid);
        w.write(&self.parent);
        w.write_i16(self.x);
        w.write_i16(self.y);
        w.write_u16(self.width);
        w.write_u16(self.height);
        w.write_u16(self.border_width);
        w.write(&self.class);
        w.write(&self.visual);
        w.write_u32(self.values.mask);
        self.values.write_values(w);
    }

    fn read_body(depth: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(28)?;
        Ok(CreateWindowRequest {
            depth,
            wid: r.read()?,
            parent: r.read()?,
            x: r.read_i16()?,
            y: r.read_i16()?,
            width: r.read_u16()?,
            height: r.read_u16()?,
            border_width: r.read_u16()?,
            class: r.read()?,
            visual: r.read()?,
            values: {
                let mask = r.read_u32()?;
                ValueList::read(mask, r)?
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeWindowAttributesRequest {
    pub window: Window,
    pub values: ValueList,
}

impl RequestBody for ChangeWindowAttributesRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.window);
        w.write_u32(self.values.mask);
        self.values.write_values(w);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        let window = r.read()?;
        let mask = r.read_u32()?;
        Ok(ChangeWindowAttributesRequest {
            window,
            values: ValueList::read(mask, r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSaveSetRequest {
    pub mode: u8,
    pub window: Window,
}

fixed_request!(ChangeSaveSetRequest, 4, detail: mode, { window });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReparentWindowRequest {
    pub window: Window,
    pub parent: Window,
    pub x: i16,
    pub y: i16,
}

fixed_request!(ReparentWindowRequest, 12, { window, parent, x, y });

/// ConfigureWindow uses a 16-bit mask followed by two unused bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigureWindowRequest {
    pub window: Window,
    pub values: ValueList,
}

impl RequestBody for ConfigureWindowRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.window);
        w.write_u16(self.values.mask as u16);
        w.write_zeros(2);
        self.values.write_values(w);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        let window = r.read()?;
        let mask = r.read_u16()? as u32;
        r.skip(2)?;
        Ok(ConfigureWindowRequest {
            window,
            values: ValueList::read(mask, r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CirculateWindowRequest {
    pub direction: u8,
    pub window: Window,
}

fixed_request!(CirculateWindowRequest, 4, detail: direction, { window });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InternAtomRequest {
    pub only_if_exists: bool,
    pub name: Vec<u8>,
}

impl RequestBody for InternAtomRequest {
    fn detail(&self) -> u8 {
        self.only_if_exists as u8
    }

    fn write_body(&self, w: &mut WireWriter) {
        write_counted_name(w, &self.name);
    }

    fn read_body(detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let name = read_counted_name(r)?;
        Ok(InternAtomRequest {
            only_if_exists: super::wire::DetailByte::from_detail(detail)?,
            name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangePropertyRequest {
    pub mode: u8,
    pub window: Window,
    pub property: Atom,
    pub type_: Atom,
    pub format: u8,
    pub data: Vec<u8>, // Raw units; a partial last unit is zero-padded on encode
}

impl RequestBody for ChangePropertyRequest {
    fn detail(&self) -> u8 {
        self.mode
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.window);
        w.write(&self.property);
        w.write(&self.type_);
        w.write_u8(self.format);
        w.write_zeros(3);
        w.write_u32(format_units(self.format, self.data.len()));
        w.write_padded_bytes(&self.data);
    }

    fn read_body(mode: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(20)?;
        let window = r.read()?;
        let property = r.read()?;
        let type_ = r.read()?;
        let format = r.read_u8()?;
        let unit = format_unit_size(format)?;
        r.skip(3)?;
        let len = list_bytes(r.read_u32()? as usize, unit)?;
        r.require_exact(padded_len(len))?;
        Ok(ChangePropertyRequest {
            mode,
            window,
            property,
            type_,
            format,
            data: r.read_padded_bytes(len)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeletePropertyRequest {
    pub window: Window,
    pub property: Atom,
}

fixed_request!(DeletePropertyRequest, 8, { window, property });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetPropertyRequest {
    pub delete: bool,
    pub window: Window,
    pub property: Atom,
    pub type_: Atom,
    pub long_offset: u32,
    pub long_length: u32,
}

fixed_request!(GetPropertyRequest, 20, detail: delete, {
    window, property, type_, long_offset, long_length
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetSelectionOwnerRequest {
    pub owner: Window,
    pub selection: Atom,
    pub time: Timestamp,
}

fixed_request!(SetSelectionOwnerRequest, 12, { owner, selection, time });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConvertSelectionRequest {
    pub requestor: Window,
    pub selection: Atom,
    pub target: Atom,
    pub property: Atom,
    pub time: Timestamp,
}

fixed_request!(ConvertSelectionRequest, 20, {
    requestor, selection, target, property, time
});

/// SendEvent; the event is carried as its raw 32 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendEventRequest {
    pub propagate: bool,
    pub destination: Window,
    pub event_mask: u32,
    pub event: [u8; 32],
}

fixed_request!(SendEventRequest, 40, detail: propagate, {
    destination, event_mask, event
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrabPointerRequest {
    pub owner_events: bool,
    pub grab_window: Window,
    pub event_mask: u16,
    pub pointer_mode: u8,
    pub keyboard_mode: u8,
    pub confine_to: Window,
    pub cursor: Cursor,
    pub time: Timestamp,
}

fixed_request!(GrabPointerRequest, 20, detail: owner_events, {
    grab_window, event_mask, pointer_mode, keyboard_mode, confine_to, cursor, time
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrabButtonRequest {
    pub owner_events: bool,
    pub grab_window: Window,
    pub event_mask: u16,
    pub pointer_mode: u8,
    pub keyboard_mode: u8,
    pub confine_to: Window,
    pub cursor: Cursor,
    pub button: u8,
    pub modifiers: u16,
}

impl RequestBody for GrabButtonRequest {
    fn detail(&self) -> u8 {
        self.owner_events as u8
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.grab_window);
        w.write_u16(self.event_mask);
        w.write_u8(self.pointer_mode);
        w.write_u8(self.keyboard_mode);
        w.write(&self.confine_to);
        w.write(&self.cursor);
        w.write_u8(self.button);
        w.write_zeros(1);
        w.write_u16(self.modifiers);
    }

    fn read_body(detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_exact(20)?;
        Ok(GrabButtonRequest {
            owner_events: super::wire::DetailByte::from_detail(detail)?,
            grab_window: r.read()?,
            event_mask: r.read_u16()?,
            pointer_mode: r.read_u8()?,
            keyboard_mode: r.read_u8()?,
            confine_to: r.read()?,
            cursor: r.read()?,
            button: {
                let button = r.read_u8()?;
                r.skip(1)?;
                button
            },
            modifiers: r.read_u16()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UngrabButtonRequest {
    pub button: u8,
    pub grab_window: Window,
    pub modifiers: u16,
}

fixed_request!(UngrabButtonRequest, 8, detail: button, { grab_window, modifiers });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeActivePointerGrabRequest {
    pub cursor: Cursor,
    pub time: Timestamp,
    pub event_mask: u16,
}

fixed_request!(ChangeActivePointerGrabRequest, 12, { cursor, time, event_mask });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrabKeyboardRequest {
    pub owner_events: bool,
    pub grab_window: Window,
    pub time: Timestamp,
    pub pointer_mode: u8,
    pub keyboard_mode: u8,
}

fixed_request!(GrabKeyboardRequest, 12, detail: owner_events, {
    grab_window, time, pointer_mode, keyboard_mode
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrabKeyRequest {
    pub owner_events: bool,
    pub grab_window: Window,
    pub modifiers: u16,
    pub key: Keycode,
    pub pointer_mode: u8,
    pub keyboard_mode: u8,
}

fixed_request!(GrabKeyRequest, 12, detail: owner_events, {
    grab_window, modifiers, key, pointer_mode, keyboard_mode
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UngrabKeyRequest {
    pub key: Keycode,
    pub grab_window: Window,
    pub modifiers: u16,
}

fixed_request!(UngrabKeyRequest, 8, detail: key, { grab_window, modifiers });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowEventsRequest {
    pub mode: u8,
    pub time: Timestamp,
}

fixed_request!(AllowEventsRequest, 4, detail: mode, { time });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetMotionEventsRequest {
    pub window: Window,
    pub start: Timestamp,
    pub stop: Timestamp,
}

fixed_request!(GetMotionEventsRequest, 12, { window, start, stop });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslateCoordinatesRequest {
    pub src_window: Window,
    pub dst_window: Window,
    pub src_x: i16,
    pub src_y: i16,
}

fixed_request!(TranslateCoordinatesRequest, 12, { src_window, dst_window, src_x, src_y });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WarpPointerRequest {
    pub src_window: Window,
    pub dst_window: Window,
    pub src_x: i16,
    pub src_y: i16,
    pub src_width: u16,
    pub src_height: u16,
    pub dst_x: i16,
    pub dst_y: i16,
}

fixed_request!(WarpPointerRequest, 20, {
    src_window, dst_window, src_x, src_y, src_width, src_height, dst_x, dst_y
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetInputFocusRequest {
    pub revert_to: u8,
    pub focus: Window,
    pub time: Timestamp,
}

fixed_request!(SetInputFocusRequest, 8, detail: revert_to, { focus, time });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenFontRequest {
    pub fid: Font,
    pub name: Vec<u8>,
}

impl RequestBody for OpenFontRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.fid);
        write_counted_name(w, &self.name);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        Ok(OpenFontRequest {
            fid: r.read()?,
            name: read_counted_name(r)?,
        })
    }
}

/// QueryTextExtents; the header's odd-length flag is derived from the string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryTextExtentsRequest {
    pub font: Fontable,
    pub string: Vec<Char2b>,
}

impl RequestBody for QueryTextExtentsRequest {
    fn detail(&self) -> u8 {
        (self.string.len() % 2) as u8
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.font);
        w.write_list(&self.string);
        w.pad();
    }

    fn read_body(odd_length: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let font = r.read()?;
        if r.remaining() % 4 != 0 || odd_length > 1 {
            return Err(X11Error::bad_length(0, 0));
        }
        let chars = (r.remaining() / 2)
            .checked_sub(odd_length as usize)
            .ok_or_else(|| X11Error::bad_length(0, 0))?;
        let string = r.read_list(chars)?;
        r.skip(r.remaining())?;
        Ok(QueryTextExtentsRequest { font, string })
    }
}

/// ListFonts and ListFontsWithInfo share this body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListFontsRequest {
    pub max_names: u16,
    pub pattern: Vec<u8>,
}

impl RequestBody for ListFontsRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u16(self.max_names);
        let pattern = clamp_u16(&self.pattern);
        w.write_u16(pattern.len() as u16);
        w.write_padded_bytes(pattern);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let max_names = r.read_u16()?;
        let len = r.read_u16()? as usize;
        r.require_exact(padded_len(len))?;
        Ok(ListFontsRequest {
            max_names,
            pattern: r.read_padded_bytes(len)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetFontPathRequest {
    pub paths: Vec<Vec<u8>>,
}

impl RequestBody for SetFontPathRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let paths = clamp_u16(&self.paths);
        w.write_u16(paths.len() as u16);
        w.write_zeros(2);
        for path in paths {
            w.write_str(path);
        }
        w.pad();
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let count = r.read_u16()? as usize;
        r.skip(2)?;
        let start = r.position();
        let mut paths = Vec::with_capacity(count.min(r.remaining()));
        for _ in 0..count {
            paths.push(r.read_str()?);
        }
        r.require_exact(pad_len(r.position() - start))?;
        r.skip(r.remaining())?;
        Ok(SetFontPathRequest { paths })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreatePixmapRequest {
    pub depth: u8,
    pub pid: Pixmap,
    pub drawable: Drawable,
    pub width: u16,
    pub height: u16,
}

fixed_request!(CreatePixmapRequest, 12, detail: depth, { pid, drawable, width, height });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateGCRequest {
    pub cid: GContext,
    pub drawable: Drawable,
    pub values: ValueList,
}

impl RequestBody for CreateGCRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.cid);
        w.write(&self.drawable);
        w.write_u32(self.values.mask);
        self.values.write_values(w);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(12)?;
        let cid = r.read()?;
        let drawable = r.read()?;
        let mask = r.read_u32()?;
        Ok(CreateGCRequest {
            cid,
            drawable,
            values: ValueList::read(mask, r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeGCRequest {
    pub gc: GContext,
    pub values: ValueList,
}

impl RequestBody for ChangeGCRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.gc);
        w.write_u32(self.values.mask);
        self.values.write_values(w);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        let gc = r.read()?;
        let mask = r.read_u32()?;
        Ok(ChangeGCRequest {
            gc,
            values: ValueList::read(mask, r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyGCRequest {
    pub src_gc: GContext,
    pub dst_gc: GContext,
    pub value_mask: u32,
}

fixed_request!(CopyGCRequest, 12, { src_gc, dst_gc, value_mask });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetDashesRequest {
    pub gc: GContext,
    pub dash_offset: u16,
    pub dashes: Vec<u8>,
}

impl RequestBody for SetDashesRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.gc);
        w.write_u16(self.dash_offset);
        let dashes = clamp_u16(&self.dashes);
        w.write_u16(dashes.len() as u16);
        w.write_padded_bytes(dashes);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        let gc = r.read()?;
        let dash_offset = r.read_u16()?;
        let len = r.read_u16()? as usize;
        r.require_exact(padded_len(len))?;
        Ok(SetDashesRequest {
            gc,
            dash_offset,
            dashes: r.read_padded_bytes(len)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetClipRectanglesRequest {
    pub ordering: u8,
    pub gc: GContext,
    pub clip_x_origin: i16,
    pub clip_y_origin: i16,
    pub rectangles: Vec<Rectangle>,
}

impl RequestBody for SetClipRectanglesRequest {
    fn detail(&self) -> u8 {
        self.ordering
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.gc);
        w.write_i16(self.clip_x_origin);
        w.write_i16(self.clip_y_origin);
        w.write_list(&self.rectangles);
    }

    fn read_body(ordering: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        Ok(SetClipRectanglesRequest {
            ordering,
            gc: r.read()?,
            clip_x_origin: r.read_i16()?,
            clip_y_origin: r.read_i16()?,
            rectangles: read_trailing_list(r, 8)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClearAreaRequest {
    pub exposures: bool,
    pub window: Window,
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

fixed_request!(ClearAreaRequest, 12, detail: exposures, { window, x, y, width, height });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyAreaRequest {
    pub src_drawable: Drawable,
    pub dst_drawable: Drawable,
    pub gc: GContext,
    pub src_x: i16,
    pub src_y: i16,
    pub dst_x: i16,
    pub dst_y: i16,
    pub width: u16,
    pub height: u16,
}

fixed_request!(CopyAreaRequest, 24, {
    src_drawable, dst_drawable, gc, src_x, src_y, dst_x, dst_y, width, height
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyPlaneRequest {
    pub src_drawable: Drawable,
    pub dst_drawable: Drawable,
    pub gc: GContext,
    pub src_x: i16,
    pub src_y: i16,
    pub dst_x: i16,
    pub dst_y: i16,
    pub width: u16,
    pub height: u16,
    pub bit_plane: u32,
}

fixed_request!(CopyPlaneRequest, 28, {
    src_drawable, dst_drawable, gc, src_x, src_y, dst_x, dst_y, width, height, bit_plane
});

/// PolyPoint and PolyLine share this body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolyPointRequest {
    pub coordinate_mode: u8,
    pub drawable: Drawable,
    pub gc: GContext,
    pub points: Vec<Point>,
}

impl RequestBody for PolyPointRequest {
    fn detail(&self) -> u8 {
        self.coordinate_mode
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.drawable);
        w.write(&self.gc);
        w.write_list(&self.points);
    }

    fn read_body(coordinate_mode: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        Ok(PolyPointRequest {
            coordinate_mode,
            drawable: r.read()?,
            gc: r.read()?,
            points: read_trailing_list(r, 4)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolySegmentRequest {
    pub drawable: Drawable,
    pub gc: GContext,
    pub segments: Vec<Segment>,
}

impl RequestBody for PolySegmentRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.drawable);
        w.write(&self.gc);
        w.write_list(&self.segments);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        Ok(PolySegmentRequest {
            drawable: r.read()?,
            gc: r.read()?,
            segments: read_trailing_list(r, 8)?,
        })
    }
}

/// PolyRectangle and PolyFillRectangle share this body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolyRectangleRequest {
    pub drawable: Drawable,
    pub gc: GContext,
    pub rectangles: Vec<Rectangle>,
}

impl RequestBody for PolyRectangleRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.drawable);
        w.write(&self.gc);
        w.write_list(&self.rectangles);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        Ok(PolyRectangleRequest {
            drawable: r.read()?,
            gc: r.read()?,
            rectangles: read_trailing_list(r, 8)?,
        })
    }
}

/// PolyArc and PolyFillArc share this body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolyArcRequest {
    pub drawable: Drawable,
    pub gc: GContext,
    pub arcs: Vec<Arc>,
}

impl RequestBody for PolyArcRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.drawable);
        w.write(&self.gc);
        w.write_list(&self.arcs);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        Ok(PolyArcRequest {
            drawable: r.read()?,
            gc: r.read()?,
            arcs: read_trailing_list(r, 12)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillPolyRequest {
    pub drawable: Drawable,
    pub gc: GContext,
    pub shape: u8,
    pub coordinate_mode: u8,
    pub points: Vec<Point>,
}

impl RequestBody for FillPolyRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.drawable);
        w.write(&self.gc);
        w.write_u8(self.shape);
        w.write_u8(self.coordinate_mode);
        w.write_zeros(2);
        w.write_list(&self.points);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(12)?;
        let drawable = r.read()?;
        let gc = r.read()?;
        let shape = r.read_u8()?;
        let coordinate_mode = r.read_u8()?;
        r.skip(2)?;
        Ok(FillPolyRequest {
            drawable,
            gc,
            shape,
            coordinate_mode,
            points: read_trailing_list(r, 4)?,
        })
    }
}

/// PutImage; `data` keeps the padded image bytes as sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PutImageRequest {
    pub format: u8,
    pub drawable: Drawable,
    pub gc: GContext,
    pub width: u16,
    pub height: u16,
    pub dst_x: i16,
    pub dst_y: i16,
    pub left_pad: u8,
    pub depth: u8,
    pub data: Vec<u8>,
}

impl RequestBody for PutImageRequest {
    fn detail(&self) -> u8 {
        self.format
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.drawable);
        w.write(&self.gc);
        w.write_u16(self.width);
        w.write_u16(self.height);
        w.write_i16(self.dst_x);
        w.write_i16(self.dst_y);
        w.write_u8(self.left_pad);
        w.write_u8(self.depth);
        w.write_zeros(2);
        w.write_padded_bytes(&self.data);
    }

    fn read_body(format: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(20)?;
        let drawable = r.read()?;
        let gc = r.read()?;
        let width = r.read_u16()?;
        let height = r.read_u16()?;
        let dst_x = r.read_i16()?;
        let dst_y = r.read_i16()?;
        let left_pad = r.read_u8()?;
        let depth = r.read_u8()?;
        r.skip(2)?;
        Ok(PutImageRequest {
            format,
            drawable,
            gc,
            width,
            height,
            dst_x,
            dst_y,
            left_pad,
            depth,
            data: r.rest().to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetImageRequest {
    pub format: u8,
    pub drawable: Drawable,
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    pub plane_mask: u32,
}

fixed_request!(GetImageRequest, 16, detail: format, {
    drawable, x, y, width, height, plane_mask
});

/// PolyText8 and PolyText16; the TEXTITEM list is kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolyTextRequest {
    pub drawable: Drawable,
    pub gc: GContext,
    pub x: i16,
    pub y: i16,
    pub items: Vec<u8>,
}

impl RequestBody for PolyTextRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.drawable);
        w.write(&self.gc);
        w.write_i16(self.x);
        w.write_i16(self.y);
        w.write_padded_bytes(&self.items);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(12)?;
        Ok(PolyTextRequest {
            drawable: r.read()?,
            gc: r.read()?,
            x: r.read_i16()?,
            y: r.read_i16()?,
            items: r.rest().to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageText8Request {
    pub drawable: Drawable,
    pub gc: GContext,
    pub x: i16,
    pub y: i16,
    pub string: Vec<u8>,
}

impl RequestBody for ImageText8Request {
    fn detail(&self) -> u8 {
        clamp_u8(&self.string).len() as u8
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.drawable);
        w.write(&self.gc);
        w.write_i16(self.x);
        w.write_i16(self.y);
        w.write_padded_bytes(clamp_u8(&self.string));
    }

    fn read_body(len: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let len = len as usize;
        r.require_exact(12 + padded_len(len))?;
        Ok(ImageText8Request {
            drawable: r.read()?,
            gc: r.read()?,
            x: r.read_i16()?,
            y: r.read_i16()?,
            string: r.read_padded_bytes(len)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageText16Request {
    pub drawable: Drawable,
    pub gc: GContext,
    pub x: i16,
    pub y: i16,
    pub string: Vec<Char2b>,
}

impl RequestBody for ImageText16Request {
    fn detail(&self) -> u8 {
        clamp_u8(&self.string).len() as u8
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.drawable);
        w.write(&self.gc);
        w.write_i16(self.x);
        w.write_i16(self.y);
        w.write_list(clamp_u8(&self.string));
        w.pad();
    }

    fn read_body(len: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let len = len as usize;
        r.require_exact(12 + padded_len(len * 2))?;
        let drawable = r.read()?;
        let gc = r.read()?;
        let x = r.read_i16()?;
        let y = r.read_i16()?;
        let string = r.read_list(len)?;
        r.skip(pad_len(len * 2))?;
        Ok(ImageText16Request {
            drawable,
            gc,
            x,
            y,
            string,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateColormapRequest {
    pub alloc: u8,
    pub mid: Colormap,
    pub window: Window,
    pub visual: VisualID,
}

fixed_request!(CreateColormapRequest, 12, detail: alloc, { mid, window, visual });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyColormapAndFreeRequest {
    pub mid: Colormap,
    pub src_cmap: Colormap,
}

fixed_request!(CopyColormapAndFreeRequest, 8, { mid, src_cmap });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocColorRequest {
    pub cmap: Colormap,
    pub color: Rgb,
}

fixed_request!(AllocColorRequest, 12, { cmap, color });

/// AllocNamedColor and LookupColor share this body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamedColorRequest {
    pub cmap: Colormap,
    pub name: Vec<u8>,
}

impl RequestBody for NamedColorRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.cmap);
        write_counted_name(w, &self.name);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        Ok(NamedColorRequest {
            cmap: r.read()?,
            name: read_counted_name(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocColorCellsRequest {
    pub contiguous: bool,
    pub cmap: Colormap,
    pub colors: u16,
    pub planes: u16,
}

fixed_request!(AllocColorCellsRequest, 8, detail: contiguous, { cmap, colors, planes });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocColorPlanesRequest {
    pub contiguous: bool,
    pub cmap: Colormap,
    pub colors: u16,
    pub reds: u16,
    pub greens: u16,
    pub blues: u16,
}

fixed_request!(AllocColorPlanesRequest, 12, detail: contiguous, {
    cmap, colors, reds, greens, blues
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FreeColorsRequest {
    pub cmap: Colormap,
    pub plane_mask: u32,
    pub pixels: Vec<u32>,
}

impl RequestBody for FreeColorsRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.cmap);
        w.write_u32(self.plane_mask);
        w.write_list(&self.pixels);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        Ok(FreeColorsRequest {
            cmap: r.read()?,
            plane_mask: r.read_u32()?,
            pixels: read_trailing_list(r, 4)?,
        })
    }
}

/// One COLORITEM of StoreColors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorItem {
    pub pixel: u32,
    pub color: Rgb,
    pub flags: u8, // do-red, do-green, do-blue
}

impl super::wire::WireField for ColorItem {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let item = ColorItem {
            pixel: r.read_u32()?,
            color: r.read()?,
            flags: r.read_u8()?,
        };
        r.skip(1)?;
        Ok(item)
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u32(self.pixel);
        w.write(&self.color);
        w.write_u8(self.flags);
        w.write_zeros(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreColorsRequest {
    pub cmap: Colormap,
    pub items: Vec<ColorItem>,
}

impl RequestBody for StoreColorsRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.cmap);
        w.write_list(&self.items);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        Ok(StoreColorsRequest {
            cmap: r.read()?,
            items: read_trailing_list(r, 12)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreNamedColorRequest {
    pub flags: u8,
    pub cmap: Colormap,
    pub pixel: u32,
    pub name: Vec<u8>,
}

impl RequestBody for StoreNamedColorRequest {
    fn detail(&self) -> u8 {
        self.flags
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.cmap);
        w.write_u32(self.pixel);
        write_counted_name(w, &self.name);
    }

    fn read_body(flags: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(12)?;
        Ok(StoreNamedColorRequest {
            flags,
            cmap: r.read()?,
            pixel: r.read_u32()?,
            name: read_counted_name(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryColorsRequest {
    pub cmap: Colormap,
    pub pixels: Vec<u32>,
}

impl RequestBody for QueryColorsRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.cmap);
        w.write_list(&self.pixels);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        Ok(QueryColorsRequest {
            cmap: r.read()?,
            pixels: read_trailing_list(r, 4)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateCursorRequest {
    pub cid: Cursor,
    pub source: Pixmap,
    pub mask: Pixmap,
    pub fore: Rgb,
    pub back: Rgb,
    pub x: u16,
    pub y: u16,
}

fixed_request!(CreateCursorRequest, 28, { cid, source, mask, fore, back, x, y });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateGlyphCursorRequest {
    pub cid: Cursor,
    pub source_font: Font,
    pub mask_font: Font,
    pub source_char: u16,
    pub mask_char: u16,
    pub fore: Rgb,
    pub back: Rgb,
}

fixed_request!(CreateGlyphCursorRequest, 28, {
    cid, source_font, mask_font, source_char, mask_char, fore, back
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecolorCursorRequest {
    pub cursor: Cursor,
    pub fore: Rgb,
    pub back: Rgb,
}

fixed_request!(RecolorCursorRequest, 16, { cursor, fore, back });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryBestSizeRequest {
    pub class: u8,
    pub drawable: Drawable,
    pub width: u16,
    pub height: u16,
}

fixed_request!(QueryBestSizeRequest, 8, detail: class, { drawable, width, height });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryExtensionRequest {
    pub name: Vec<u8>,
}

impl RequestBody for QueryExtensionRequest {
    fn write_body(&self, w: &mut WireWriter) {
        write_counted_name(w, &self.name);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(QueryExtensionRequest {
            name: read_counted_name(r)?,
        })
    }
}

/// ChangeKeyboardMapping; `keysyms` holds `keysyms_per_keycode` entries for
/// each keycode, so its length is a multiple of that count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeKeyboardMappingRequest {
    pub first_keycode: Keycode,
    pub keysyms_per_keycode: u8,
    pub keysyms: Vec<u32>,
}

impl ChangeKeyboardMappingRequest {
    pub fn keycode_count(&self) -> u8 {
        match self.keysyms_per_keycode {
            0 => 0,
            per => (self.keysyms.len() / per as usize).min(u8::MAX as usize) as u8,
        }
    }
}

impl RequestBody for ChangeKeyboardMappingRequest {
    fn detail(&self) -> u8 {
        self.keycode_count()
    }

    fn write_body(&self, w: &mut WireWriter) {
        let count = self.keycode_count() as usize * self.keysyms_per_keycode as usize;
        w.write(&self.first_keycode);
        w.write_u8(self.keysyms_per_keycode);
        w.write_zeros(2);
        w.write_list(&self.keysyms[..count]);
    }

    fn read_body(keycode_count: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let first_keycode = r.read()?;
        let keysyms_per_keycode = r.read_u8()?;
        r.skip(2)?;
        let count = keycode_count as usize * keysyms_per_keycode as usize;
        r.require_exact(count * 4)?;
        Ok(ChangeKeyboardMappingRequest {
            first_keycode,
            keysyms_per_keycode,
            keysyms: r.read_list(count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetKeyboardMappingRequest {
    pub first_keycode: Keycode,
    pub count: u8,
}

fixed_request!(GetKeyboardMappingRequest, 4, { first_keycode, count });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeKeyboardControlRequest {
    pub values: ValueList,
}

impl RequestBody for ChangeKeyboardControlRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u32(self.values.mask);
        self.values.write_values(w);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let mask = r.read_u32()?;
        Ok(ChangeKeyboardControlRequest {
            values: ValueList::read(mask, r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangePointerControlRequest {
    pub acceleration_numerator: i16,
    pub acceleration_denominator: i16,
    pub threshold: i16,
    pub do_acceleration: bool,
    pub do_threshold: bool,
}

fixed_request!(ChangePointerControlRequest, 8, {
    acceleration_numerator, acceleration_denominator, threshold, do_acceleration, do_threshold
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetScreenSaverRequest {
    pub timeout: i16,
    pub interval: i16,
    pub prefer_blanking: u8,
    pub allow_exposures: u8,
}

fixed_request!(SetScreenSaverRequest, 8, {
    timeout, interval, prefer_blanking, allow_exposures
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeHostsRequest {
    pub mode: u8,
    pub family: u8,
    pub address: Vec<u8>,
}

impl RequestBody for ChangeHostsRequest {
    fn detail(&self) -> u8 {
        self.mode
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write_u8(self.family);
        w.write_zeros(1);
        let address = clamp_u16(&self.address);
        w.write_u16(address.len() as u16);
        w.write_padded_bytes(address);
    }

    fn read_body(mode: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let family = r.read_u8()?;
        r.skip(1)?;
        let len = r.read_u16()? as usize;
        r.require_exact(padded_len(len))?;
        Ok(ChangeHostsRequest {
            mode,
            family,
            address: r.read_padded_bytes(len)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RotatePropertiesRequest {
    pub window: Window,
    pub delta: i16,
    pub atoms: Vec<Atom>,
}

impl RequestBody for RotatePropertiesRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.window);
        let atoms = clamp_u16(&self.atoms);
        w.write_u16(atoms.len() as u16);
        w.write_i16(self.delta);
        w.write_list(atoms);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        let window = r.read()?;
        let count = r.read_u16()? as usize;
        let delta = r.read_i16()?;
        r.require_exact(count * 4)?;
        Ok(RotatePropertiesRequest {
            window,
            delta,
            atoms: r.read_list(count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetPointerMappingRequest {
    pub map: Vec<u8>,
}

impl RequestBody for SetPointerMappingRequest {
    fn detail(&self) -> u8 {
        clamp_u8(&self.map).len() as u8
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write_padded_bytes(clamp_u8(&self.map));
    }

    fn read_body(len: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let len = len as usize;
        r.require_exact(padded_len(len))?;
        Ok(SetPointerMappingRequest {
            map: r.read_padded_bytes(len)?,
        })
    }
}

/// SetModifierMapping; eight modifiers with `keycodes_per_modifier` each.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetModifierMappingRequest {
    pub keycodes_per_modifier: u8,
    pub keycodes: Vec<Keycode>,
}

impl RequestBody for SetModifierMappingRequest {
    fn detail(&self) -> u8 {
        self.keycodes_per_modifier
    }

    fn write_body(&self, w: &mut WireWriter) {
        w.write_list(&self.keycodes);
    }

    fn read_body(keycodes_per_modifier: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = keycodes_per_modifier as usize * 8;
        r.require_exact(count)?;
        Ok(SetModifierMappingRequest {
            keycodes_per_modifier,
            keycodes: r.read_list(count)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode<T: RequestBody>(detail: u8, body: &[u8], order: ByteOrder) -> X11Result<T> {
        T::read_body(detail, &mut WireReader::new(body, order))
    }

    fn encode<T: RequestBody>(req: &T, order: ByteOrder) -> Vec<u8> {
        let mut w = WireWriter::new(order);
        req.write_body(&mut w);
        w.into_bytes()
    }

    #[test]
    fn test_opcode_table_is_dense() {
        for opcode in 1..=119u8 {
            let op = RequestOpcode::from_u8(opcode).unwrap();
            assert_eq!(op as u8, opcode);
        }
        for opcode in 120..=126u8 {
            assert!(RequestOpcode::from_u8(opcode).is_none());
        }
        assert_eq!(RequestOpcode::from_u8(127), Some(RequestOpcode::NoOperation));
        assert!(RequestOpcode::from_u8(0).is_none());
        assert!(RequestOpcode::from_u8(128).is_none());
    }

    #[test]
    fn test_header_parse_both_forms() {
        let normal = [8u8, 0, 0, 2, 0, 0, 0, 1];
        let header = RequestHeader::parse(&normal, ByteOrder::MSBFirst).unwrap();
        assert_eq!(header.length, 2);
        assert_eq!(header.header_len, 4);

        let big = [72u8, 2, 0, 0, 0, 1, 0, 0];
        let header = RequestHeader::parse(&big, ByteOrder::MSBFirst).unwrap();
        assert!(header.is_big());
        assert_eq!(header.length, 0x10000);
        assert_eq!(header.size(), 0x40000);
    }

    #[test]
    fn test_header_rejects_truncated_big_form() {
        let err = RequestHeader::parse(&[72, 2, 0, 0, 1], ByteOrder::LSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
        assert_eq!(err.major_opcode, 72);
    }

    #[test]
    fn test_value_list_keeps_bit_order() {
        let values = ValueList::new().with(1 << 11, 0xff).with(1 << 1, 7);
        assert_eq!(values.mask, (1 << 11) | (1 << 1));
        assert_eq!(values.values, vec![7, 0xff]);
        assert_eq!(values.get(1 << 11), Some(0xff));
        assert_eq!(values.get(1 << 3), None);
    }

    #[test]
    fn test_create_window_value_count_checked() {
        let req = CreateWindowRequest {
            depth: 24,
            wid: Window::new(0x200001),
            parent: Window::new(0x1e7),
            width: 640,
            height: 480,
            class: WindowClass::InputOutput,
            values: ValueList::new().with(1 << 1, 0xffffff).with(1 << 11, 0x8000),
            ..Default::default()
        };
        let order = ByteOrder::LSBFirst;
        let mut body = encode(&req, order);
        assert_eq!(body.len(), 28 + 8);
        assert_eq!(decode::<CreateWindowRequest>(24, &body, order).unwrap(), req);

        body.truncate(body.len() - 4);
        let err = decode::<CreateWindowRequest>(24, &body, order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_change_property_rejects_bad_format() {
        let req = ChangePropertyRequest {
            window: Window::new(1),
            property: Atom::WM_NAME,
            type_: Atom::STRING,
            format: 8,
            data: b"xterm".to_vec(),
            ..Default::default()
        };
        let mut body = encode(&req, ByteOrder::MSBFirst);
        assert_eq!(body.len(), 20 + 8);
        body[12] = 7;
        let err = decode::<ChangePropertyRequest>(0, &body, ByteOrder::MSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Value);
        assert_eq!(err.bad_value, 7);
    }

    #[test]
    fn test_change_property_units() {
        let req = ChangePropertyRequest {
            format: 32,
            data: vec![0; 12],
            ..Default::default()
        };
        let body = encode(&req, ByteOrder::LSBFirst);
        assert_eq!(&body[16..20], &[3, 0, 0, 0]);
    }

    #[test]
    fn test_change_property_partial_unit() {
        let req = ChangePropertyRequest {
            format: 16,
            data: vec![1, 2, 3],
            ..Default::default()
        };
        let body = encode(&req, ByteOrder::MSBFirst);
        assert_eq!(&body[16..20], &[0, 0, 0, 2]);
        assert_eq!(body.len(), 20 + 4);
        let decoded = decode::<ChangePropertyRequest>(0, &body, ByteOrder::MSBFirst).unwrap();
        assert_eq!(decoded.data, [1, 2, 3, 0]);
    }

    #[test]
    fn test_query_text_extents_odd_length() {
        let req = QueryTextExtentsRequest {
            font: Fontable::new(5),
            string: vec![Char2b { byte1: 0, byte2: b'a' }; 3],
        };
        assert_eq!(req.detail(), 1);
        let body = encode(&req, ByteOrder::LSBFirst);
        assert_eq!(body.len(), 4 + 8);
        assert_eq!(
            decode::<QueryTextExtentsRequest>(1, &body, ByteOrder::LSBFirst).unwrap(),
            req
        );
    }

    #[test]
    fn test_set_font_path_strs() {
        let req = SetFontPathRequest {
            paths: vec![b"/usr/share/fonts".to_vec(), b"built-ins".to_vec()],
        };
        let body = encode(&req, ByteOrder::MSBFirst);
        assert_eq!(body.len() % 4, 0);
        assert_eq!(
            decode::<SetFontPathRequest>(0, &body, ByteOrder::MSBFirst).unwrap(),
            req
        );
    }

    #[test]
    fn test_counted_list_rejects_extra_bytes() {
        let req = RotatePropertiesRequest {
            window: Window::new(9),
            delta: -1,
            atoms: vec![Atom::new(100), Atom::new(101)],
        };
        let mut body = encode(&req, ByteOrder::LSBFirst);
        body.extend_from_slice(&[0; 4]);
        let err = decode::<RotatePropertiesRequest>(0, &body, ByteOrder::LSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_grab_button_internal_padding() {
        let req = GrabButtonRequest {
            owner_events: true,
            grab_window: Window::new(3),
            event_mask: 0x0c,
            button: 3,
            modifiers: 0x8000,
            ..Default::default()
        };
        let body = encode(&req, ByteOrder::MSBFirst);
        assert_eq!(body.len(), 20);
        assert_eq!(body[16], 3);
        assert_eq!(&body[18..20], &[0x80, 0x00]);
        assert_eq!(
            decode::<GrabButtonRequest>(1, &body, ByteOrder::MSBFirst).unwrap(),
            req
        );
    }
}
