//! Self-describing XInput records
//!
//! Device classes, input states, feedback states and device controls all
//! start with a discriminant and their own length. Each record is read
//! through a sub-reader bounded by that length, so a record that claims
//! more or fewer bytes than its layout needs is a Length error.

use crate::protocol::errors::{X11Error, X11Result};
use crate::protocol::types::{Atom, Keycode};
use crate::protocol::wire::{clamp_list, clamp_u8, WireField, WireReader, WireWriter};

pub const KEY_CLASS: u8 = 0;
pub const BUTTON_CLASS: u8 = 1;
pub const VALUATOR_CLASS: u8 = 2;

pub const KBD_FEEDBACK_CLASS: u8 = 0;
pub const PTR_FEEDBACK_CLASS: u8 = 1;
pub const INTEGER_FEEDBACK_CLASS: u8 = 2;
pub const STRING_FEEDBACK_CLASS: u8 = 3;
pub const LED_FEEDBACK_CLASS: u8 = 4;
pub const BELL_FEEDBACK_CLASS: u8 = 5;

/// The only device control this codec understands
pub const DEVICE_RESOLUTION: u16 = 1;

/// Most axes a valuator class record can carry in its one-byte length
pub const MAX_CLASS_AXES: usize = (u8::MAX as usize - 8) / 12;
/// Most valuators a valuator state record can carry in its one-byte length
pub const MAX_STATE_VALUATORS: usize = (u8::MAX as usize - 4) / 4;
/// Most keysyms a string feedback record can carry in its two-byte length
pub const MAX_FEEDBACK_KEYSYMS: usize = (u16::MAX as usize - 8) / 4;
/// Most valuators a resolution state record can carry in its two-byte length
pub const MAX_RESOLUTION_STATES: usize = (u16::MAX as usize - 8) / 12;

/// Split off a record body of `len` bytes, where `len` includes a header
/// of `header` bytes that has already been read.
fn record<'a>(r: &mut WireReader<'a>, len: usize, header: usize) -> X11Result<WireReader<'a>> {
    let body_len = len
        .checked_sub(header)
        .ok_or_else(|| X11Error::bad_length(0, 0))?;
    Ok(WireReader::new(r.take(body_len)?, r.order()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisInfo {
    pub resolution: u32,
    pub minimum: i32,
    pub maximum: i32,
}

impl WireField for AxisInfo {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(AxisInfo {
            resolution: r.read_u32()?,
            minimum: r.read_i32()?,
            maximum: r.read_i32()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u32(self.resolution);
        w.write_i32(self.minimum);
        w.write_i32(self.maximum);
    }
}

/// Device class as reported by ListInputDevices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputClassInfo {
    Key {
        min_keycode: Keycode,
        max_keycode: Keycode,
        num_keys: u16,
    },
    Button {
        num_buttons: u16,
    },
    Valuator {
        mode: u8,
        motion_buffer_size: u32,
        axes: Vec<AxisInfo>,
    },
}

impl InputClassInfo {
    pub fn class_id(&self) -> u8 {
        match self {
            InputClassInfo::Key { .. } => KEY_CLASS,
            InputClassInfo::Button { .. } => BUTTON_CLASS,
            InputClassInfo::Valuator { .. } => VALUATOR_CLASS,
        }
    }

    /// Encoded size in bytes
    pub fn size(&self) -> usize {
        match self {
            InputClassInfo::Key { .. } => 8,
            InputClassInfo::Button { .. } => 4,
            InputClassInfo::Valuator { axes, .. } => 8 + 12 * axes.len().min(MAX_CLASS_AXES),
        }
    }
}

impl WireField for InputClassInfo {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let class = r.read_u8()?;
        let len = r.read_u8()? as usize;
        let mut body = record(r, len, 2)?;
        let info = match class {
            KEY_CLASS => {
                let min_keycode = body.read()?;
                let max_keycode = body.read()?;
                let num_keys = body.read_u16()?;
                body.skip(2)?;
                InputClassInfo::Key {
                    min_keycode,
                    max_keycode,
                    num_keys,
                }
            }
            BUTTON_CLASS => InputClassInfo::Button {
                num_buttons: body.read_u16()?,
            },
            VALUATOR_CLASS => {
                let num_axes = body.read_u8()? as usize;
                let mode = body.read_u8()?;
                let motion_buffer_size = body.read_u32()?;
                InputClassInfo::Valuator {
                    mode,
                    motion_buffer_size,
                    axes: body.read_list(num_axes)?,
                }
            }
            other => return Err(X11Error::bad_value(0, other as u32, 0)),
        };
        body.finish()?;
        Ok(info)
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(self.class_id());
        w.write_u8(self.size() as u8);
        match self {
            InputClassInfo::Key {
                min_keycode,
                max_keycode,
                num_keys,
            } => {
                w.write(min_keycode);
                w.write(max_keycode);
                w.write_u16(*num_keys);
                w.write_zeros(2);
            }
            InputClassInfo::Button { num_buttons } => w.write_u16(*num_buttons),
            InputClassInfo::Valuator {
                mode,
                motion_buffer_size,
                axes,
            } => {
                let axes = clamp_list(axes, MAX_CLASS_AXES);
                w.write_u8(axes.len() as u8);
                w.write_u8(*mode);
                w.write_u32(*motion_buffer_size);
                w.write_list(axes);
            }
        }
    }
}

/// Fixed 8-byte head of a device record in the ListInputDevices reply.
/// The device's classes and name follow all heads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceInfo {
    pub device_type: Atom,
    pub device_id: u8,
    /// IsXPointer, IsXKeyboard, IsXExtensionDevice, ...
    pub device_use: u8,
    pub attached: u8,
    pub classes: Vec<InputClassInfo>,
    pub name: Vec<u8>,
}

/// Class and event base pair in the OpenDevice reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputClassEventBase {
    pub class_id: u8,
    pub event_type_base: u8,
}

impl WireField for InputClassEventBase {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(InputClassEventBase {
            class_id: r.read_u8()?,
            event_type_base: r.read_u8()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(self.class_id);
        w.write_u8(self.event_type_base);
    }
}

/// Per-class state in the QueryDeviceState reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputState {
    Key { num_keys: u8, keys: [u8; 32] },
    Button { num_buttons: u8, buttons: [u8; 32] },
    Valuator { mode: u8, valuators: Vec<i32> },
}

impl InputState {
    pub fn class_id(&self) -> u8 {
        match self {
            InputState::Key { .. } => KEY_CLASS,
            InputState::Button { .. } => BUTTON_CLASS,
            InputState::Valuator { .. } => VALUATOR_CLASS,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            InputState::Key { .. } | InputState::Button { .. } => 36,
            InputState::Valuator { valuators, .. } => {
                4 + 4 * valuators.len().min(MAX_STATE_VALUATORS)
            }
        }
    }
}

impl WireField for InputState {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let class = r.read_u8()?;
        let len = r.read_u8()? as usize;
        let mut body = record(r, len, 2)?;
        let state = match class {
            KEY_CLASS => {
                let num_keys = body.read_u8()?;
                body.skip(1)?;
                InputState::Key {
                    num_keys,
                    keys: body.read()?,
                }
            }
            BUTTON_CLASS => {
                let num_buttons = body.read_u8()?;
                body.skip(1)?;
                InputState::Button {
                    num_buttons,
                    buttons: body.read()?,
                }
            }
            VALUATOR_CLASS => {
                let count = body.read_u8()? as usize;
                let mode = body.read_u8()?;
                InputState::Valuator {
                    mode,
                    valuators: body.read_list(count)?,
                }
            }
            other => return Err(X11Error::bad_value(0, other as u32, 0)),
        };
        body.finish()?;
        Ok(state)
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(self.class_id());
        w.write_u8(self.size() as u8);
        match self {
            InputState::Key { num_keys: n, keys: bits }
            | InputState::Button {
                num_buttons: n,
                buttons: bits,
            } => {
                w.write_u8(*n);
                w.write_zeros(1);
                w.write(bits);
            }
            InputState::Valuator { mode, valuators } => {
                let valuators = clamp_list(valuators, MAX_STATE_VALUATORS);
                w.write_u8(valuators.len() as u8);
                w.write_u8(*mode);
                w.write_list(valuators);
            }
        }
    }
}

/// Feedback state in the GetFeedbackControl reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackState {
    pub feedback_id: u8,
    pub data: FeedbackData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackData {
    Keyboard {
        pitch: u16,
        duration: u16,
        led_mask: u32,
        led_values: u32,
        global_auto_repeat: bool,
        click: u8,
        percent: u8,
        auto_repeats: [u8; 32],
    },
    Pointer {
        accel_num: u16,
        accel_denom: u16,
        threshold: u16,
    },
    Integer {
        resolution: u32,
        min_value: i32,
        max_value: i32,
    },
    String {
        max_symbols: u16,
        keysyms: Vec<u32>,
    },
    Led {
        led_mask: u32,
        led_values: u32,
    },
    Bell {
        percent: u8,
        pitch: u16,
        duration: u16,
    },
}

impl FeedbackData {
    pub fn class_id(&self) -> u8 {
        match self {
            FeedbackData::Keyboard { .. } => KBD_FEEDBACK_CLASS,
            FeedbackData::Pointer { .. } => PTR_FEEDBACK_CLASS,
            FeedbackData::Integer { .. } => INTEGER_FEEDBACK_CLASS,
            FeedbackData::String { .. } => STRING_FEEDBACK_CLASS,
            FeedbackData::Led { .. } => LED_FEEDBACK_CLASS,
            FeedbackData::Bell { .. } => BELL_FEEDBACK_CLASS,
        }
    }
}

impl FeedbackState {
    pub fn size(&self) -> usize {
        match &self.data {
            FeedbackData::Keyboard { .. } => 52,
            FeedbackData::Pointer { .. } | FeedbackData::Led { .. } | FeedbackData::Bell { .. } => {
                12
            }
            FeedbackData::Integer { .. } => 16,
            FeedbackData::String { keysyms, .. } => {
                8 + 4 * keysyms.len().min(MAX_FEEDBACK_KEYSYMS)
            }
        }
    }
}

impl WireField for FeedbackState {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let class = r.read_u8()?;
        let feedback_id = r.read_u8()?;
        let len = r.read_u16()? as usize;
        let mut body = record(r, len, 4)?;
        let data = match class {
            KBD_FEEDBACK_CLASS => {
                let pitch = body.read_u16()?;
                let duration = body.read_u16()?;
                let led_mask = body.read_u32()?;
                let led_values = body.read_u32()?;
                let global_auto_repeat = body.read_bool()?;
                let click = body.read_u8()?;
                let percent = body.read_u8()?;
                body.skip(1)?;
                FeedbackData::Keyboard {
                    pitch,
                    duration,
                    led_mask,
                    led_values,
                    global_auto_repeat,
                    click,
                    percent,
                    auto_repeats: body.read()?,
                }
            }
            PTR_FEEDBACK_CLASS => {
                body.skip(2)?;
                FeedbackData::Pointer {
                    accel_num: body.read_u16()?,
                    accel_denom: body.read_u16()?,
                    threshold: body.read_u16()?,
                }
            }
            INTEGER_FEEDBACK_CLASS => FeedbackData::Integer {
                resolution: body.read_u32()?,
                min_value: body.read_i32()?,
                max_value: body.read_i32()?,
            },
            STRING_FEEDBACK_CLASS => {
                let max_symbols = body.read_u16()?;
                let count = body.read_u16()? as usize;
                FeedbackData::String {
                    max_symbols,
                    keysyms: body.read_list(count)?,
                }
            }
            LED_FEEDBACK_CLASS => FeedbackData::Led {
                led_mask: body.read_u32()?,
                led_values: body.read_u32()?,
            },
            BELL_FEEDBACK_CLASS => {
                let percent = body.read_u8()?;
                body.skip(3)?;
                FeedbackData::Bell {
                    percent,
                    pitch: body.read_u16()?,
                    duration: body.read_u16()?,
                }
            }
            other => return Err(X11Error::bad_value(0, other as u32, 0)),
        };
        body.finish()?;
        Ok(FeedbackState { feedback_id, data })
    }

    fn write_to(&self, w: &mut WireWriter) {
        let start = w.len();
        w.write_u8(self.data.class_id());
        w.write_u8(self.feedback_id);
        w.write_u16(self.size() as u16);
        match &self.data {
            FeedbackData::Keyboard {
                pitch,
                duration,
                led_mask,
                led_values,
                global_auto_repeat,
                click,
                percent,
                auto_repeats,
            } => {
                w.write_u16(*pitch);
                w.write_u16(*duration);
                w.write_u32(*led_mask);
                w.write_u32(*led_values);
                w.write_bool(*global_auto_repeat);
                w.write_u8(*click);
                w.write_u8(*percent);
                w.write_zeros(1);
                w.write(auto_repeats);
            }
            FeedbackData::Pointer {
                accel_num,
                accel_denom,
                threshold,
            } => {
                w.write_zeros(2);
                w.write_u16(*accel_num);
                w.write_u16(*accel_denom);
                w.write_u16(*threshold);
            }
            FeedbackData::Integer {
                resolution,
                min_value,
                max_value,
            } => {
                w.write_u32(*resolution);
                w.write_i32(*min_value);
                w.write_i32(*max_value);
            }
            FeedbackData::String {
                max_symbols,
                keysyms,
            } => {
                let keysyms = clamp_list(keysyms, MAX_FEEDBACK_KEYSYMS);
                w.write_u16(*max_symbols);
                w.write_u16(keysyms.len() as u16);
                w.write_list(keysyms);
            }
            FeedbackData::Led {
                led_mask,
                led_values,
            } => {
                w.write_u32(*led_mask);
                w.write_u32(*led_values);
            }
            FeedbackData::Bell {
                percent,
                pitch,
                duration,
            } => {
                w.write_u8(*percent);
                w.write_zeros(3);
                w.write_u16(*pitch);
                w.write_u16(*duration);
            }
        }
        w.pad_to(start + self.size());
    }
}

// Field selectors in the ChangeFeedbackControl mask
pub const FEEDBACK_KEY_CLICK_PERCENT: u32 = 1 << 0;
pub const FEEDBACK_PERCENT: u32 = 1 << 1;
pub const FEEDBACK_PITCH: u32 = 1 << 2;
pub const FEEDBACK_DURATION: u32 = 1 << 3;
pub const FEEDBACK_LED: u32 = 1 << 4;
pub const FEEDBACK_LED_MODE: u32 = 1 << 5;
pub const FEEDBACK_KEY: u32 = 1 << 6;
pub const FEEDBACK_AUTO_REPEAT_MODE: u32 = 1 << 7;
pub const FEEDBACK_STRING: u32 = 1 << 8;
pub const FEEDBACK_INTEGER: u32 = 1 << 9;
pub const FEEDBACK_ACCEL_NUM: u32 = 1 << 10;
pub const FEEDBACK_ACCEL_DENOM: u32 = 1 << 11;
pub const FEEDBACK_THRESHOLD: u32 = 1 << 12;

/// New settings for one feedback in a ChangeFeedbackControl request.
/// Which fields apply is selected by the request's mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackControl {
    pub feedback_id: u8,
    pub data: FeedbackControlData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackControlData {
    Keyboard {
        key: Keycode,
        auto_repeat_mode: u8,
        click: i8,
        percent: i8,
        pitch: i16,
        duration: i16,
        led_mask: u32,
        led_values: u32,
    },
    Pointer {
        num: i16,
        denom: i16,
        threshold: i16,
    },
    Integer {
        int_to_display: i32,
    },
    String {
        keysyms: Vec<u32>,
    },
    Led {
        led_mask: u32,
        led_values: u32,
    },
    Bell {
        percent: i8,
        pitch: i16,
        duration: i16,
    },
}

impl FeedbackControlData {
    pub fn class_id(&self) -> u8 {
        match self {
            FeedbackControlData::Keyboard { .. } => KBD_FEEDBACK_CLASS,
            FeedbackControlData::Pointer { .. } => PTR_FEEDBACK_CLASS,
            FeedbackControlData::Integer { .. } => INTEGER_FEEDBACK_CLASS,
            FeedbackControlData::String { .. } => STRING_FEEDBACK_CLASS,
            FeedbackControlData::Led { .. } => LED_FEEDBACK_CLASS,
            FeedbackControlData::Bell { .. } => BELL_FEEDBACK_CLASS,
        }
    }
}

impl FeedbackControl {
    pub fn size(&self) -> usize {
        match &self.data {
            FeedbackControlData::Keyboard { .. } => 20,
            FeedbackControlData::Pointer { .. }
            | FeedbackControlData::Led { .. }
            | FeedbackControlData::Bell { .. } => 12,
            FeedbackControlData::Integer { .. } => 8,
            FeedbackControlData::String { keysyms } => {
                8 + 4 * keysyms.len().min(MAX_FEEDBACK_KEYSYMS)
            }
        }
    }
}

impl WireField for FeedbackControl {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let class = r.read_u8()?;
        let feedback_id = r.read_u8()?;
        let len = r.read_u16()? as usize;
        let mut body = record(r, len, 4)?;
        let data = match class {
            KBD_FEEDBACK_CLASS => FeedbackControlData::Keyboard {
                key: body.read()?,
                auto_repeat_mode: body.read_u8()?,
                click: body.read_i8()?,
                percent: body.read_i8()?,
                pitch: body.read_i16()?,
                duration: body.read_i16()?,
                led_mask: body.read_u32()?,
                led_values: body.read_u32()?,
            },
            PTR_FEEDBACK_CLASS => {
                body.skip(2)?;
                FeedbackControlData::Pointer {
                    num: body.read_i16()?,
                    denom: body.read_i16()?,
                    threshold: body.read_i16()?,
                }
            }
            INTEGER_FEEDBACK_CLASS => FeedbackControlData::Integer {
                int_to_display: body.read_i32()?,
            },
            STRING_FEEDBACK_CLASS => {
                body.skip(2)?;
                let count = body.read_u16()? as usize;
                FeedbackControlData::String {
                    keysyms: body.read_list(count)?,
                }
            }
            LED_FEEDBACK_CLASS => FeedbackControlData::Led {
                led_mask: body.read_u32()?,
                led_values: body.read_u32()?,
            },
            BELL_FEEDBACK_CLASS => {
                let percent = body.read_i8()?;
                body.skip(3)?;
                FeedbackControlData::Bell {
                    percent,
                    pitch: body.read_i16()?,
                    duration: body.read_i16()?,
                }
            }
            other => return Err(X11Error::bad_value(0, other as u32, 0)),
        };
        body.finish()?;
        Ok(FeedbackControl { feedback_id, data })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(self.data.class_id());
        w.write_u8(self.feedback_id);
        w.write_u16(self.size() as u16);
        match &self.data {
            FeedbackControlData::Keyboard {
                key,
                auto_repeat_mode,
                click,
                percent,
                pitch,
                duration,
                led_mask,
                led_values,
            } => {
                w.write(key);
                w.write_u8(*auto_repeat_mode);
                w.write_i8(*click);
                w.write_i8(*percent);
                w.write_i16(*pitch);
                w.write_i16(*duration);
                w.write_u32(*led_mask);
                w.write_u32(*led_values);
            }
            FeedbackControlData::Pointer {
                num,
                denom,
                threshold,
            } => {
                w.write_zeros(2);
                w.write_i16(*num);
                w.write_i16(*denom);
                w.write_i16(*threshold);
            }
            FeedbackControlData::Integer { int_to_display } => w.write_i32(*int_to_display),
            FeedbackControlData::String { keysyms } => {
                let keysyms = clamp_list(keysyms, MAX_FEEDBACK_KEYSYMS);
                w.write_zeros(2);
                w.write_u16(keysyms.len() as u16);
                w.write_list(keysyms);
            }
            FeedbackControlData::Led {
                led_mask,
                led_values,
            } => {
                w.write_u32(*led_mask);
                w.write_u32(*led_values);
            }
            FeedbackControlData::Bell {
                percent,
                pitch,
                duration,
            } => {
                w.write_i8(*percent);
                w.write_zeros(3);
                w.write_i16(*pitch);
                w.write_i16(*duration);
            }
        }
    }
}

fn unknown_control(control_id: u16) -> X11Error {
    X11Error::bad_value(0, control_id as u32, 0)
}

/// Fail with a Value error unless `control_id` names a supported control.
pub fn check_control_id(control_id: u16) -> X11Result<()> {
    match control_id {
        DEVICE_RESOLUTION => Ok(()),
        other => Err(unknown_control(other)),
    }
}

/// Payload of ChangeDeviceControl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceControl {
    Resolution {
        first_valuator: u8,
        resolutions: Vec<u32>,
    },
}

impl DeviceControl {
    pub fn control_id(&self) -> u16 {
        match self {
            DeviceControl::Resolution { .. } => DEVICE_RESOLUTION,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            DeviceControl::Resolution { resolutions, .. } => 8 + 4 * clamp_u8(resolutions).len(),
        }
    }
}

impl WireField for DeviceControl {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let control_id = r.read_u16()?;
        let len = r.read_u16()? as usize;
        check_control_id(control_id)?;
        let mut body = record(r, len, 4)?;
        let first_valuator = body.read_u8()?;
        let count = body.read_u8()? as usize;
        body.skip(2)?;
        let control = DeviceControl::Resolution {
            first_valuator,
            resolutions: body.read_list(count)?,
        };
        body.finish()?;
        Ok(control)
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u16(self.control_id());
        w.write_u16(self.size() as u16);
        match self {
            DeviceControl::Resolution {
                first_valuator,
                resolutions,
            } => {
                let resolutions = clamp_u8(resolutions);
                w.write_u8(*first_valuator);
                w.write_u8(resolutions.len() as u8);
                w.write_zeros(2);
                w.write_list(resolutions);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValuatorResolution {
    pub resolution: u32,
    pub min_resolution: u32,
    pub max_resolution: u32,
}

/// Payload of the GetDeviceControl reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
    /// Current, minimum and maximum resolution per valuator. On the wire
    /// the three columns are sent one after the other.
    Resolution(Vec<ValuatorResolution>),
}

impl DeviceState {
    pub fn control_id(&self) -> u16 {
        match self {
            DeviceState::Resolution(_) => DEVICE_RESOLUTION,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            DeviceState::Resolution(valuators) => {
                8 + 12 * valuators.len().min(MAX_RESOLUTION_STATES)
            }
        }
    }
}

impl WireField for DeviceState {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let control_id = r.read_u16()?;
        let len = r.read_u16()? as usize;
        check_control_id(control_id)?;
        let mut body = record(r, len, 4)?;
        let count = body.read_u32()? as usize;
        let resolutions: Vec<u32> = body.read_list(count)?;
        let minimums: Vec<u32> = body.read_list(count)?;
        let maximums: Vec<u32> = body.read_list(count)?;
        body.finish()?;
        let valuators = resolutions
            .into_iter()
            .zip(minimums)
            .zip(maximums)
            .map(|((resolution, min_resolution), max_resolution)| ValuatorResolution {
                resolution,
                min_resolution,
                max_resolution,
            })
            .collect();
        Ok(DeviceState::Resolution(valuators))
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u16(self.control_id());
        w.write_u16(self.size() as u16);
        match self {
            DeviceState::Resolution(valuators) => {
                let valuators = clamp_list(valuators, MAX_RESOLUTION_STATES);
                w.write_u32(valuators.len() as u32);
                for v in valuators {
                    w.write_u32(v.resolution);
                }
                for v in valuators {
                    w.write_u32(v.min_resolution);
                }
                for v in valuators {
                    w.write_u32(v.max_resolution);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::errors::ErrorCode;
    use crate::protocol::types::ByteOrder;

    fn encode<T: WireField>(value: &T, order: ByteOrder) -> Vec<u8> {
        let mut w = WireWriter::new(order);
        w.write(value);
        w.into_bytes()
    }

    fn decode<T: WireField>(bytes: &[u8], order: ByteOrder) -> X11Result<T> {
        let mut r = WireReader::new(bytes, order);
        let value = r.read()?;
        r.finish()?;
        Ok(value)
    }

    #[test]
    fn test_class_info_sizes() {
        let order = ByteOrder::LSBFirst;
        let key = InputClassInfo::Key {
            min_keycode: Keycode::new(8),
            max_keycode: Keycode::new(255),
            num_keys: 248,
        };
        let bytes = encode(&key, order);
        assert_eq!(bytes, vec![0, 8, 8, 255, 248, 0, 0, 0]);

        let button = InputClassInfo::Button { num_buttons: 5 };
        assert_eq!(encode(&button, order), vec![1, 4, 5, 0]);

        let valuator = InputClassInfo::Valuator {
            mode: 1,
            motion_buffer_size: 256,
            axes: vec![AxisInfo::default(); 2],
        };
        let bytes = encode(&valuator, order);
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[1], 32);
        assert_eq!(decode::<InputClassInfo>(&bytes, order).unwrap(), valuator);
    }

    #[test]
    fn test_class_info_length_mismatch() {
        // Button class claiming 8 bytes
        let err = decode::<InputClassInfo>(&[1, 8, 5, 0, 0, 0, 0, 0], ByteOrder::LSBFirst)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_feedback_states_round_trip() {
        let states = vec![
            FeedbackState {
                feedback_id: 0,
                data: FeedbackData::Keyboard {
                    pitch: 400,
                    duration: 100,
                    led_mask: 0x7,
                    led_values: 0x2,
                    global_auto_repeat: true,
                    click: 0,
                    percent: 50,
                    auto_repeats: [0xff; 32],
                },
            },
            FeedbackState {
                feedback_id: 1,
                data: FeedbackData::Pointer {
                    accel_num: 2,
                    accel_denom: 1,
                    threshold: 4,
                },
            },
            FeedbackState {
                feedback_id: 2,
                data: FeedbackData::String {
                    max_symbols: 16,
                    keysyms: vec![0x61, 0x62, 0x63],
                },
            },
            FeedbackState {
                feedback_id: 3,
                data: FeedbackData::Bell {
                    percent: 50,
                    pitch: 440,
                    duration: 200,
                },
            },
        ];
        for order in ByteOrder::ALL {
            for state in &states {
                let bytes = encode(state, order);
                assert_eq!(bytes.len(), state.size());
                assert_eq!(&decode::<FeedbackState>(&bytes, order).unwrap(), state);
            }
        }
    }

    #[test]
    fn test_feedback_controls_round_trip() {
        let controls = vec![
            FeedbackControl {
                feedback_id: 0,
                data: FeedbackControlData::Keyboard {
                    key: Keycode::new(38),
                    auto_repeat_mode: 1,
                    click: -1,
                    percent: 80,
                    pitch: 440,
                    duration: -1,
                    led_mask: 0x3,
                    led_values: 0x1,
                },
            },
            FeedbackControl {
                feedback_id: 1,
                data: FeedbackControlData::Pointer {
                    num: 3,
                    denom: 2,
                    threshold: 6,
                },
            },
            FeedbackControl {
                feedback_id: 2,
                data: FeedbackControlData::Integer { int_to_display: -42 },
            },
            FeedbackControl {
                feedback_id: 3,
                data: FeedbackControlData::String {
                    keysyms: vec![0x48, 0x49],
                },
            },
            FeedbackControl {
                feedback_id: 4,
                data: FeedbackControlData::Led {
                    led_mask: 0xff,
                    led_values: 0x0f,
                },
            },
            FeedbackControl {
                feedback_id: 5,
                data: FeedbackControlData::Bell {
                    percent: -1,
                    pitch: 880,
                    duration: 50,
                },
            },
        ];
        for order in ByteOrder::ALL {
            for control in &controls {
                let bytes = encode(control, order);
                assert_eq!(bytes.len(), control.size());
                assert_eq!(bytes[0], control.data.class_id());
                assert_eq!(&decode::<FeedbackControl>(&bytes, order).unwrap(), control);
            }
        }
    }

    #[test]
    fn test_feedback_control_length_mismatch() {
        // Integer control claiming 12 bytes but carrying 8
        let bytes = [2, 0, 0, 12, 0, 0, 0, 1];
        let err = decode::<FeedbackControl>(&bytes, ByteOrder::MSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);

        let err = decode::<FeedbackControl>(&[9, 0, 0, 4], ByteOrder::MSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Value);
        assert_eq!(err.bad_value, 9);
    }

    #[test]
    fn test_oversized_records_are_clamped() {
        let order = ByteOrder::LSBFirst;

        let valuator = InputClassInfo::Valuator {
            mode: 0,
            motion_buffer_size: 0,
            axes: vec![AxisInfo::default(); 300],
        };
        let bytes = encode(&valuator, order);
        assert_eq!(bytes.len(), 8 + 12 * MAX_CLASS_AXES);
        assert_eq!(bytes[1] as usize, bytes.len());
        assert_eq!(bytes[2] as usize, MAX_CLASS_AXES);
        match decode::<InputClassInfo>(&bytes, order).unwrap() {
            InputClassInfo::Valuator { axes, .. } => assert_eq!(axes.len(), MAX_CLASS_AXES),
            other => panic!("unexpected class {:?}", other),
        }

        let state = InputState::Valuator {
            mode: 1,
            valuators: vec![7; 300],
        };
        let bytes = encode(&state, order);
        assert_eq!(bytes.len(), 4 + 4 * MAX_STATE_VALUATORS);
        assert_eq!(bytes[1] as usize, bytes.len());
        assert_eq!(
            decode::<InputState>(&bytes, order).unwrap(),
            InputState::Valuator {
                mode: 1,
                valuators: vec![7; MAX_STATE_VALUATORS],
            }
        );

        let control = DeviceControl::Resolution {
            first_valuator: 0,
            resolutions: vec![1; 300],
        };
        let bytes = encode(&control, order);
        assert_eq!(bytes.len(), control.size());
        assert_eq!(bytes[5], 255);
        assert_eq!(
            decode::<DeviceControl>(&bytes, order).unwrap(),
            DeviceControl::Resolution {
                first_valuator: 0,
                resolutions: vec![1; 255],
            }
        );

        let feedback = FeedbackControl {
            feedback_id: 0,
            data: FeedbackControlData::String {
                keysyms: vec![0x20; MAX_FEEDBACK_KEYSYMS + 10],
            },
        };
        let bytes = encode(&feedback, order);
        assert_eq!(bytes.len(), 8 + 4 * MAX_FEEDBACK_KEYSYMS);
        assert_eq!(bytes.len(), feedback.size());
        match decode::<FeedbackControl>(&bytes, order).unwrap().data {
            FeedbackControlData::String { keysyms } => {
                assert_eq!(keysyms.len(), MAX_FEEDBACK_KEYSYMS)
            }
            other => panic!("unexpected control {:?}", other),
        }
    }

    #[test]
    fn test_unknown_control_is_value_error() {
        let order = ByteOrder::MSBFirst;
        let bytes = [0, 99, 0, 8, 0, 0, 0, 0];
        let err = decode::<DeviceControl>(&bytes, order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Value);
        assert_eq!(err.bad_value, 99);
    }

    #[test]
    fn test_device_state_columns() {
        let order = ByteOrder::LSBFirst;
        let state = DeviceState::Resolution(vec![
            ValuatorResolution {
                resolution: 1,
                min_resolution: 2,
                max_resolution: 3,
            },
            ValuatorResolution {
                resolution: 4,
                min_resolution: 5,
                max_resolution: 6,
            },
        ]);
        let bytes = encode(&state, order);
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[8], 1);
        assert_eq!(bytes[12], 4);
        assert_eq!(bytes[16], 2);
        assert_eq!(bytes[28], 6);
        assert_eq!(decode::<DeviceState>(&bytes, order).unwrap(), state);
    }
}
