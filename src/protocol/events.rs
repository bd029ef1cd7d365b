//! X11 protocol events
//!
//! Events are sent from the server to clients to notify them of state changes,
//! user input, and other interesting occurrences. Every core event is a
//! 32-byte frame. Frames this module cannot represent faithfully are kept
//! verbatim as [`Event::Raw`] so they can still be forwarded.

use super::errors::{X11Error, X11Result};
use super::types::*;
use super::wire::{WireReader, WireWriter};

/// Flag set in the code byte of events delivered through SendEvent
pub const SEND_EVENT_FLAG: u8 = 0x80;

/// Code of the XGE GenericEvent, whose frames may exceed 32 bytes
pub const GENERIC_EVENT: u8 = 35;

/// Event type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EventType {
    KeyPress = 2,
    KeyRelease = 3,
    ButtonPress = 4,
    ButtonRelease = 5,
    MotionNotify = 6,
    EnterNotify = 7,
    LeaveNotify = 8,
    FocusIn = 9,
    FocusOut = 10,
    KeymapNotify = 11,
    Expose = 12,
    GraphicsExposure = 13,
    NoExposure = 14,
    VisibilityNotify = 15,
    CreateNotify = 16,
    DestroyNotify = 17,
    UnmapNotify = 18,
    MapNotify = 19,
    MapRequest = 20,
    ReparentNotify = 21,
    ConfigureNotify = 22,
    ConfigureRequest = 23,
    GravityNotify = 24,
    ResizeRequest = 25,
    CirculateNotify = 26,
    CirculateRequest = 27,
    PropertyNotify = 28,
    SelectionClear = 29,
    SelectionRequest = 30,
    SelectionNotify = 31,
    ColormapNotify = 32,
    ClientMessage = 33,
    MappingNotify = 34,
}

// Events whose fields follow the code, detail and sequence bytes in order.
macro_rules! define_event {
    ($name:ident, $code:expr, detail: $detail:ident: $dty:ty, { $($field:ident: $ty:ty),* $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            pub $detail: $dty,
            pub sequence: u16,
            $( pub $field: $ty, )*
        }

        impl $name {
            pub const CODE: u8 = $code;

            fn write_to(&self, w: &mut WireWriter) {
                w.write_u8($code);
                w.write(&self.$detail);
                w.write_u16(self.sequence);
                $( w.write(&self.$field); )*
            }

            fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
                r.skip(1)?;
                let $detail = r.read()?;
                let sequence = r.read_u16()?;
                $( let $field = r.read()?; )*
                Ok($name { $detail, sequence, $($field),* })
            }
        }
    };
    ($name:ident, $code:expr, { $($field:ident: $ty:ty),* $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Default)]
        pub struct $name {
            pub sequence: u16,
            $( pub $field: $ty, )*
        }

        impl $name {
            pub const CODE: u8 = $code;

            fn write_to(&self, w: &mut WireWriter) {
                w.write_u8($code);
                w.write_zeros(1);
                w.write_u16(self.sequence);
                $( w.write(&self.$field); )*
            }

            fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
                r.skip(2)?;
                let sequence = r.read_u16()?;
                $( let $field = r.read()?; )*
                Ok($name { sequence, $($field),* })
            }
        }
    };
}

// Key and button events share a common structure
macro_rules! define_key_button_event {
    ($name:ident, $code:expr, $detail:ty) => {
        define_event!($name, $code, detail: detail: $detail, {
            time: Timestamp,
            root: Window,
            event: Window,
            child: Window,
            root_x: i16,
            root_y: i16,
            event_x: i16,
            event_y: i16,
            state: u16, // Modifier mask
            same_screen: bool,
        });
    };
}

define_key_button_event!(KeyPressEvent, 2, Keycode);
define_key_button_event!(KeyReleaseEvent, 3, Keycode);
define_key_button_event!(ButtonPressEvent, 4, u8);
define_key_button_event!(ButtonReleaseEvent, 5, u8);
define_key_button_event!(MotionNotifyEvent, 6, u8); // Normal or hint

macro_rules! define_enter_leave_event {
    ($name:ident, $code:expr) => {
        define_event!($name, $code, detail: detail: u8, {
            time: Timestamp,
            root: Window,
            event: Window,
            child: Window,
            root_x: i16,
            root_y: i16,
            event_x: i16,
            event_y: i16,
            state: u16,
            mode: u8,
            same_screen_focus: u8,
        });
    };
}

define_enter_leave_event!(EnterNotifyEvent, 7);
define_enter_leave_event!(LeaveNotifyEvent, 8);

macro_rules! define_focus_event {
    ($name:ident, $code:expr) => {
        define_event!($name, $code, detail: detail: u8, { event: Window, mode: u8 });
    };
}

define_focus_event!(FocusInEvent, 9);
define_focus_event!(FocusOutEvent, 10);

define_event!(ExposeEvent, 12, {
    window: Window,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    count: u16, // Number of following expose events
});

define_event!(GraphicsExposureEvent, 13, {
    drawable: Drawable,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    minor_opcode: u16,
    count: u16,
    major_opcode: u8,
});

define_event!(NoExposureEvent, 14, {
    drawable: Drawable,
    minor_opcode: u16,
    major_opcode: u8,
});

define_event!(VisibilityNotifyEvent, 15, { window: Window, state: u8 });

define_event!(CreateNotifyEvent, 16, {
    parent: Window,
    window: Window,
    x: i16,
    y: i16,
    width: u16,
    height: u16,
    border_width: u16,
    override_redirect: bool,
});

define_event!(DestroyNotifyEvent, 17, { event: Window, window: Window });

define_event!(UnmapNotifyEvent, 18, {
    event: Window,
    window: Window,
    from_configure: bool,
});

define_event!(MapNotifyEvent, 19, {
    event: Window,
    window: Window,
    override_redirect: bool,
});

define_event!(MapRequestEvent, 20, { parent: Window, window: Window });

define_event!(ReparentNotifyEvent, 21, {
    event: Window,
    window: Window,
    parent: Window,
    x: i16,
    y: i16,
    override_redirect: bool,
});

define_event!(ConfigureNotifyEvent, 22, {
    event: Window,
    window: Window,
    above_sibling: Window,
    x: i16,
    y: i16,
    width: u16,
    height: u16,
    border_width: u16,
    override_redirect: bool,
});

define_event!(ConfigureRequestEvent, 23, detail: stack_mode: u8, {
    parent: Window,
    window: Window,
    sibling: Window,
    x: i16,
    y: i16,
    width: u16,
    height: u16,
    border_width: u16,
    value_mask: u16,
});

define_event!(GravityNotifyEvent, 24, {
    event: Window,
    window: Window,
    x: i16,
    y: i16,
});

define_event!(ResizeRequestEvent, 25, { window: Window, width: u16, height: u16 });

define_event!(PropertyNotifyEvent, 28, {
    window: Window,
    atom: Atom,
    time: Timestamp,
    state: u8, // NewValue or Deleted
});

define_event!(SelectionClearEvent, 29, {
    time: Timestamp,
    owner: Window,
    selection: Atom,
});

define_event!(SelectionRequestEvent, 30, {
    time: Timestamp,
    owner: Window,
    requestor: Window,
    selection: Atom,
    target: Atom,
    property: Atom,
});

define_event!(SelectionNotifyEvent, 31, {
    time: Timestamp,
    requestor: Window,
    selection: Atom,
    target: Atom,
    property: Atom,
});

define_event!(ColormapNotifyEvent, 32, {
    window: Window,
    colormap: Colormap,
    new: bool,
    state: u8,
});

define_event!(MappingNotifyEvent, 34, {
    request: u8,
    first_keycode: Keycode,
    count: u8,
});

/// KeymapNotify has no sequence number; bytes 1..32 are keys 8..255.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeymapNotifyEvent {
    pub keys: [u8; 31],
}

impl KeymapNotifyEvent {
    pub const CODE: u8 = 11;

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(Self::CODE);
        w.write(&self.keys);
    }

    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        r.skip(1)?;
        Ok(KeymapNotifyEvent { keys: r.read()? })
    }
}

/// CirculateNotify and CirculateRequest share this layout; `window_event`
/// is the event window for notify and the parent for request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CirculateEvent {
    pub sequence: u16,
    pub window_event: Window,
    pub window: Window,
    pub place: u8, // PlaceOnTop or PlaceOnBottom
}

impl CirculateEvent {
    fn write_to(&self, code: u8, w: &mut WireWriter) {
        w.write_u8(code);
        w.write_zeros(1);
        w.write_u16(self.sequence);
        w.write(&self.window_event);
        w.write(&self.window);
        w.write_zeros(4);
        w.write_u8(self.place);
    }

    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        r.skip(2)?;
        let sequence = r.read_u16()?;
        let window_event = r.read()?;
        let window = r.read()?;
        r.skip(4)?;
        Ok(CirculateEvent {
            sequence,
            window_event,
            window,
            place: r.read_u8()?,
        })
    }
}

/// ClientMessage payload, interpreted according to the format byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMessageData {
    Data8([u8; 20]),
    Data16([u16; 10]),
    Data32([u32; 5]),
}

impl Default for ClientMessageData {
    fn default() -> Self {
        ClientMessageData::Data32([0; 5])
    }
}

impl ClientMessageData {
    pub fn format(&self) -> u8 {
        match self {
            ClientMessageData::Data8(_) => 8,
            ClientMessageData::Data16(_) => 16,
            ClientMessageData::Data32(_) => 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientMessageEvent {
    pub sequence: u16,
    pub window: Window,
    pub type_: Atom,
    pub data: ClientMessageData,
}

impl ClientMessageEvent {
    pub const CODE: u8 = 33;

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(Self::CODE);
        w.write_u8(self.data.format());
        w.write_u16(self.sequence);
        w.write(&self.window);
        w.write(&self.type_);
        match &self.data {
            ClientMessageData::Data8(data) => w.write(data),
            ClientMessageData::Data16(data) => w.write_list(data),
            ClientMessageData::Data32(data) => w.write_list(data),
        }
    }

    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        r.skip(1)?;
        let format = r.read_u8()?;
        let sequence = r.read_u16()?;
        let window = r.read()?;
        let type_ = r.read()?;
        let data = match format {
            8 => ClientMessageData::Data8(r.read()?),
            16 => {
                let mut data = [0u16; 10];
                for slot in data.iter_mut() {
                    *slot = r.read_u16()?;
                }
                ClientMessageData::Data16(data)
            }
            32 => {
                let mut data = [0u32; 5];
                for slot in data.iter_mut() {
                    *slot = r.read_u32()?;
                }
                ClientMessageData::Data32(data)
            }
            other => return Err(X11Error::bad_value(0, other as u32, 0)),
        };
        Ok(ClientMessageEvent {
            sequence,
            window,
            type_,
            data,
        })
    }
}

/// Any event frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    KeyPress(KeyPressEvent),
    KeyRelease(KeyReleaseEvent),
    ButtonPress(ButtonPressEvent),
    ButtonRelease(ButtonReleaseEvent),
    MotionNotify(MotionNotifyEvent),
    EnterNotify(EnterNotifyEvent),
    LeaveNotify(LeaveNotifyEvent),
    FocusIn(FocusInEvent),
    FocusOut(FocusOutEvent),
    KeymapNotify(KeymapNotifyEvent),
    Expose(ExposeEvent),
    GraphicsExposure(GraphicsExposureEvent),
    NoExposure(NoExposureEvent),
    VisibilityNotify(VisibilityNotifyEvent),
    CreateNotify(CreateNotifyEvent),
    DestroyNotify(DestroyNotifyEvent),
    UnmapNotify(UnmapNotifyEvent),
    MapNotify(MapNotifyEvent),
    MapRequest(MapRequestEvent),
    ReparentNotify(ReparentNotifyEvent),
    ConfigureNotify(ConfigureNotifyEvent),
    ConfigureRequest(ConfigureRequestEvent),
    GravityNotify(GravityNotifyEvent),
    ResizeRequest(ResizeRequestEvent),
    CirculateNotify(CirculateEvent),
    CirculateRequest(CirculateEvent),
    PropertyNotify(PropertyNotifyEvent),
    SelectionClear(SelectionClearEvent),
    SelectionRequest(SelectionRequestEvent),
    SelectionNotify(SelectionNotifyEvent),
    ColormapNotify(ColormapNotifyEvent),
    ClientMessage(ClientMessageEvent),
    MappingNotify(MappingNotifyEvent),
    /// Unrecognized, sent, or otherwise uninterpreted frame, kept verbatim
    Raw([u8; 32]),
}

impl Event {
    /// Get the event type code, `None` for raw frames
    pub fn event_type(&self) -> Option<EventType> {
        Some(match self {
            Event::KeyPress(_) => EventType::KeyPress,
            Event::KeyRelease(_) => EventType::KeyRelease,
            Event::ButtonPress(_) => EventType::ButtonPress,
            Event::ButtonRelease(_) => EventType::ButtonRelease,
            Event::MotionNotify(_) => EventType::MotionNotify,
            Event::EnterNotify(_) => EventType::EnterNotify,
            Event::LeaveNotify(_) => EventType::LeaveNotify,
            Event::FocusIn(_) => EventType::FocusIn,
            Event::FocusOut(_) => EventType::FocusOut,
            Event::KeymapNotify(_) => EventType::KeymapNotify,
            Event::Expose(_) => EventType::Expose,
            Event::GraphicsExposure(_) => EventType::GraphicsExposure,
            Event::NoExposure(_) => EventType::NoExposure,
            Event::VisibilityNotify(_) => EventType::VisibilityNotify,
            Event::CreateNotify(_) => EventType::CreateNotify,
            Event::DestroyNotify(_) => EventType::DestroyNotify,
            Event::UnmapNotify(_) => EventType::UnmapNotify,
            Event::MapNotify(_) => EventType::MapNotify,
            Event::MapRequest(_) => EventType::MapRequest,
            Event::ReparentNotify(_) => EventType::ReparentNotify,
            Event::ConfigureNotify(_) => EventType::ConfigureNotify,
            Event::ConfigureRequest(_) => EventType::ConfigureRequest,
            Event::GravityNotify(_) => EventType::GravityNotify,
            Event::ResizeRequest(_) => EventType::ResizeRequest,
            Event::CirculateNotify(_) => EventType::CirculateNotify,
            Event::CirculateRequest(_) => EventType::CirculateRequest,
            Event::PropertyNotify(_) => EventType::PropertyNotify,
            Event::SelectionClear(_) => EventType::SelectionClear,
            Event::SelectionRequest(_) => EventType::SelectionRequest,
            Event::SelectionNotify(_) => EventType::SelectionNotify,
            Event::ColormapNotify(_) => EventType::ColormapNotify,
            Event::ClientMessage(_) => EventType::ClientMessage,
            Event::MappingNotify(_) => EventType::MappingNotify,
            Event::Raw(_) => return None,
        })
    }

    /// Encode event to wire format (32 bytes)
    pub fn encode(&self, order: ByteOrder) -> [u8; 32] {
        let mut w = WireWriter::with_capacity(order, 32);
        match self {
            Event::KeyPress(e) => e.write_to(&mut w),
            Event::KeyRelease(e) => e.write_to(&mut w),
            Event::ButtonPress(e) => e.write_to(&mut w),
            Event::ButtonRelease(e) => e.write_to(&mut w),
            Event::MotionNotify(e) => e.write_to(&mut w),
            Event::EnterNotify(e) => e.write_to(&mut w),
            Event::LeaveNotify(e) => e.write_to(&mut w),
            Event::FocusIn(e) => e.write_to(&mut w),
            Event::FocusOut(e) => e.write_to(&mut w),
            Event::KeymapNotify(e) => e.write_to(&mut w),
            Event::Expose(e) => e.write_to(&mut w),
            Event::GraphicsExposure(e) => e.write_to(&mut w),
            Event::NoExposure(e) => e.write_to(&mut w),
            Event::VisibilityNotify(e) => e.write_to(&mut w),
            Event::CreateNotify(e) => e.write_to(&mut w),
            Event::DestroyNotify(e) => e.write_to(&mut w),
            Event::UnmapNotify(e) => e.write_to(&mut w),
            Event::MapNotify(e) => e.write_to(&mut w),
            Event::MapRequest(e) => e.write_to(&mut w),
            Event::ReparentNotify(e) => e.write_to(&mut w),
            Event::ConfigureNotify(e) => e.write_to(&mut w),
            Event::ConfigureRequest(e) => e.write_to(&mut w),
            Event::GravityNotify(e) => e.write_to(&mut w),
            Event::ResizeRequest(e) => e.write_to(&mut w),
            Event::CirculateNotify(e) => e.write_to(EventType::CirculateNotify as u8, &mut w),
            Event::CirculateRequest(e) => e.write_to(EventType::CirculateRequest as u8, &mut w),
            Event::PropertyNotify(e) => e.write_to(&mut w),
            Event::SelectionClear(e) => e.write_to(&mut w),
            Event::SelectionRequest(e) => e.write_to(&mut w),
            Event::SelectionNotify(e) => e.write_to(&mut w),
            Event::ColormapNotify(e) => e.write_to(&mut w),
            Event::ClientMessage(e) => e.write_to(&mut w),
            Event::MappingNotify(e) => e.write_to(&mut w),
            Event::Raw(bytes) => return *bytes,
        }
        w.into_frame()
    }

    /// Decode an event frame; see [`decode_event`].
    pub fn decode(bytes: &[u8], order: ByteOrder) -> X11Result<Self> {
        decode_event(bytes, order)
    }
}

/// Encode an event frame.
pub fn encode_event(event: &Event, order: ByteOrder) -> [u8; 32] {
    event.encode(order)
}

/// Decode an event frame. Only the first 32 bytes are examined.
///
/// Never fails on content: events sent with SendEvent, GenericEvents,
/// unknown codes, and frames whose fields are out of range all come back
/// as [`Event::Raw`] holding the original bytes.
pub fn decode_event(bytes: &[u8], order: ByteOrder) -> X11Result<Event> {
    let frame: [u8; 32] = bytes
        .get(..32)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| X11Error::bad_length(0, 0))?;

    let code = frame[0];
    if code & SEND_EVENT_FLAG != 0 || code == GENERIC_EVENT {
        return Ok(Event::Raw(frame));
    }

    let mut r = WireReader::new(&frame, order);
    match decode_typed(code, &mut r) {
        Ok(Some(event)) => Ok(event),
        Ok(None) => {
            log::trace!("Keeping event code {} as raw bytes", code);
            Ok(Event::Raw(frame))
        }
        Err(e) => {
            log::debug!("Event code {} did not decode ({}), keeping raw bytes", code, e);
            Ok(Event::Raw(frame))
        }
    }
}

fn decode_typed(code: u8, r: &mut WireReader<'_>) -> X11Result<Option<Event>> {
    let event = match code {
        2 => Event::KeyPress(KeyPressEvent::read_from(r)?),
        3 => Event::KeyRelease(KeyReleaseEvent::read_from(r)?),
        4 => Event::ButtonPress(ButtonPressEvent::read_from(r)?),
        5 => Event::ButtonRelease(ButtonReleaseEvent::read_from(r)?),
        6 => Event::MotionNotify(MotionNotifyEvent::read_from(r)?),
        7 => Event::EnterNotify(EnterNotifyEvent::read_from(r)?),
        8 => Event::LeaveNotify(LeaveNotifyEvent::read_from(r)?),
        9 => Event::FocusIn(FocusInEvent::read_from(r)?),
        10 => Event::FocusOut(FocusOutEvent::read_from(r)?),
        11 => Event::KeymapNotify(KeymapNotifyEvent::read_from(r)?),
        12 => Event::Expose(ExposeEvent::read_from(r)?),
        13 => Event::GraphicsExposure(GraphicsExposureEvent::read_from(r)?),
        14 => Event::NoExposure(NoExposureEvent::read_from(r)?),
        15 => Event::VisibilityNotify(VisibilityNotifyEvent::read_from(r)?),
        16 => Event::CreateNotify(CreateNotifyEvent::read_from(r)?),
        17 => Event::DestroyNotify(DestroyNotifyEvent::read_from(r)?),
        18 => Event::UnmapNotify(UnmapNotifyEvent::read_from(r)?),
        19 => Event::MapNotify(MapNotifyEvent::read_from(r)?),
        20 => Event::MapRequest(MapRequestEvent::read_from(r)?),
        21 => Event::ReparentNotify(ReparentNotifyEvent::read_from(r)?),
        22 => Event::ConfigureNotify(ConfigureNotifyEvent::read_from(r)?),
        23 => Event::ConfigureRequest(ConfigureRequestEvent::read_from(r)?),
        24 => Event::GravityNotify(GravityNotifyEvent::read_from(r)?),
        25 => Event::ResizeRequest(ResizeRequestEvent::read_from(r)?),
        26 => Event::CirculateNotify(CirculateEvent::read_from(r)?),
        27 => Event::CirculateRequest(CirculateEvent::read_from(r)?),
        28 => Event::PropertyNotify(PropertyNotifyEvent::read_from(r)?),
        29 => Event::SelectionClear(SelectionClearEvent::read_from(r)?),
        30 => Event::SelectionRequest(SelectionRequestEvent::read_from(r)?),
        31 => Event::SelectionNotify(SelectionNotifyEvent::read_from(r)?),
        32 => Event::ColormapNotify(ColormapNotifyEvent::read_from(r)?),
        33 => Event::ClientMessage(ClientMessageEvent::read_from(r)?),
        34 => Event::MappingNotify(MappingNotifyEvent::read_from(r)?),
        _ => return Ok(None),
    };
    Ok(Some(event))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_press() -> Event {
        Event::KeyPress(KeyPressEvent {
            detail: Keycode::new(38),
            sequence: 0x0102,
            time: Timestamp::new(0x11223344),
            root: Window::new(0x1e7),
            event: Window::new(0x400001),
            child: Window::NONE,
            root_x: 100,
            root_y: -5,
            event_x: 10,
            event_y: 20,
            state: 0x0001,
            same_screen: true,
        })
    }

    #[test]
    fn test_key_press_layout() {
        let bytes = key_press().encode(ByteOrder::MSBFirst);
        assert_eq!(bytes[0], 2);
        assert_eq!(bytes[1], 38);
        assert_eq!(&bytes[2..4], &[0x01, 0x02]);
        assert_eq!(&bytes[4..8], &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(&bytes[22..24], &[0xff, 0xfb]);
        assert_eq!(bytes[30], 1);
        assert_eq!(bytes[31], 0);
    }

    #[test]
    fn test_round_trip_both_orders() {
        let events = vec![
            key_press(),
            Event::KeymapNotify(KeymapNotifyEvent { keys: [0x5a; 31] }),
            Event::CirculateRequest(CirculateEvent {
                sequence: 4,
                window_event: Window::new(1),
                window: Window::new(2),
                place: 1,
            }),
            Event::ClientMessage(ClientMessageEvent {
                sequence: 9,
                window: Window::new(3),
                type_: Atom::new(300),
                data: ClientMessageData::Data16([7; 10]),
            }),
            Event::ConfigureRequest(ConfigureRequestEvent {
                stack_mode: 3,
                width: 800,
                height: 600,
                value_mask: 0x0c,
                ..Default::default()
            }),
        ];
        for order in ByteOrder::ALL {
            for event in &events {
                let bytes = event.encode(order);
                assert_eq!(&decode_event(&bytes, order).unwrap(), event);
            }
        }
    }

    #[test]
    fn test_unknown_code_is_raw() {
        let mut frame = [0u8; 32];
        frame[0] = 64;
        frame[5] = 0xaa;
        let event = decode_event(&frame, ByteOrder::LSBFirst).unwrap();
        assert_eq!(event, Event::Raw(frame));
        assert_eq!(event.encode(ByteOrder::MSBFirst), frame);
    }

    #[test]
    fn test_sent_event_is_raw() {
        let mut frame = key_press().encode(ByteOrder::LSBFirst);
        frame[0] |= SEND_EVENT_FLAG;
        assert_eq!(decode_event(&frame, ByteOrder::LSBFirst).unwrap(), Event::Raw(frame));
    }

    #[test]
    fn test_out_of_range_field_is_raw() {
        let mut frame = key_press().encode(ByteOrder::LSBFirst);
        frame[30] = 2; // same_screen is a BOOL
        assert_eq!(decode_event(&frame, ByteOrder::LSBFirst).unwrap(), Event::Raw(frame));
    }

    #[test]
    fn test_short_frame_is_length_error() {
        let err = decode_event(&[2u8; 31], ByteOrder::LSBFirst).unwrap_err();
        assert_eq!(err.code, super::super::errors::ErrorCode::Length);
    }

    #[test]
    fn test_longer_input_uses_first_frame() {
        let mut bytes = key_press().encode(ByteOrder::LSBFirst).to_vec();
        bytes.extend_from_slice(&[0xff; 32]);
        assert_eq!(decode_event(&bytes, ByteOrder::LSBFirst).unwrap(), key_press());
    }
}
