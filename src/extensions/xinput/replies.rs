//! XInput replies
//!
//! Byte 1 of every XInput reply holds the minor opcode of the request it
//! answers, so reply-specific flags live at byte 8 onwards.

use super::classes::*;
use super::xi2::{EventMask, Fp1616, GrabModifierInfo, GroupInfo, ModifierInfo};
use crate::protocol::errors::X11Result;
use crate::protocol::replies::ReplyBody;
use crate::protocol::requests::{format_unit_size, format_units};
use crate::protocol::types::*;
use crate::protocol::wire::{
    clamp_u16, clamp_u8, fixed_reply, list_bytes, WireField, WireReader, WireWriter,
};

/// Read records from byte 32 to the end of the frame.
fn read_remaining<T: WireField>(r: &mut WireReader<'_>, size: usize) -> X11Result<Vec<T>> {
    r.skip_to(32)?;
    let count = r.remaining() / size;
    let items = r.read_list(count)?;
    r.finish_padded()?;
    Ok(items)
}

/// Read `count` records starting at byte 32.
fn read_list_at_32<T: WireField>(r: &mut WireReader<'_>, count: usize) -> X11Result<Vec<T>> {
    r.skip_to(32)?;
    let items = r.read_list(count)?;
    r.finish_padded()?;
    Ok(items)
}

/// Property data sized by format and item count; format 0 means the
/// property does not exist.
fn read_property_data(r: &mut WireReader<'_>, format: u8, items: usize) -> X11Result<Vec<u8>> {
    let unit = match format {
        0 => 0,
        _ => format_unit_size(format)?,
    };
    r.skip_to(32)?;
    let data = r.take(list_bytes(items, unit)?)?.to_vec();
    r.finish_padded()?;
    Ok(data)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetExtensionVersionReply {
    pub major_version: u16,
    pub minor_version: u16,
    pub present: bool,
}

fixed_reply!(GetExtensionVersionReply, { major_version, minor_version, present });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListInputDevicesReply {
    pub devices: Vec<DeviceInfo>,
}

impl ReplyBody for ListInputDevicesReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let devices = clamp_u8(&self.devices);
        w.write_u8(devices.len() as u8);
        w.pad_to(32);
        for device in devices {
            w.write(&device.device_type);
            w.write_u8(device.device_id);
            w.write_u8(clamp_u8(&device.classes).len() as u8);
            w.write_u8(device.device_use);
            w.write_u8(device.attached);
        }
        for device in devices {
            w.write_list(clamp_u8(&device.classes));
        }
        for device in devices {
            w.write_str(&device.name);
        }
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u8()? as usize;
        r.skip_to(32)?;
        let mut devices = Vec::with_capacity(count.min(r.remaining() / 8));
        let mut class_counts = Vec::with_capacity(devices.capacity());
        for _ in 0..count {
            let device_type = r.read()?;
            let device_id = r.read_u8()?;
            class_counts.push(r.read_u8()? as usize);
            let device_use = r.read_u8()?;
            let attached = r.read_u8()?;
            devices.push(DeviceInfo {
                device_type,
                device_id,
                device_use,
                attached,
                ..Default::default()
            });
        }
        for (device, classes) in devices.iter_mut().zip(&class_counts) {
            device.classes = r.read_list(*classes)?;
        }
        for device in devices.iter_mut() {
            device.name = r.read_str()?;
        }
        r.finish_padded()?;
        Ok(ListInputDevicesReply { devices })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenDeviceReply {
    pub classes: Vec<InputClassEventBase>,
}

impl ReplyBody for OpenDeviceReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let classes = clamp_u8(&self.classes);
        w.write_u8(classes.len() as u8);
        w.pad_to(32);
        w.write_list(classes);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u8()? as usize;
        Ok(OpenDeviceReply {
            classes: read_list_at_32(r, count)?,
        })
    }
}

/// Reply holding only a status byte: ChangeKeyboardDevice,
/// ChangePointerDevice, SetDeviceMode, GrabDevice, SetDeviceModifierMapping,
/// SetDeviceButtonMapping, SetDeviceValuators, ChangeDeviceControl and
/// XIGrabDevice
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceStatusReply {
    pub status: u8,
}

fixed_reply!(DeviceStatusReply, { status });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetSelectedExtensionEventsReply {
    pub this_client: Vec<u32>,
    pub all_clients: Vec<u32>,
}

impl ReplyBody for GetSelectedExtensionEventsReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let this_client = clamp_u16(&self.this_client);
        let all_clients = clamp_u16(&self.all_clients);
        w.write_u16(this_client.len() as u16);
        w.write_u16(all_clients.len() as u16);
        w.pad_to(32);
        w.write_list(this_client);
        w.write_list(all_clients);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let this_count = r.read_u16()? as usize;
        let all_count = r.read_u16()? as usize;
        r.skip_to(32)?;
        let this_client = r.read_list(this_count)?;
        let all_clients = r.read_list(all_count)?;
        r.finish_padded()?;
        Ok(GetSelectedExtensionEventsReply {
            this_client,
            all_clients,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDeviceDontPropagateListReply {
    pub classes: Vec<u32>,
}

impl ReplyBody for GetDeviceDontPropagateListReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let classes = clamp_u16(&self.classes);
        w.write_u16(classes.len() as u16);
        w.pad_to(32);
        w.write_list(classes);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u16()? as usize;
        Ok(GetDeviceDontPropagateListReply {
            classes: read_list_at_32(r, count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceTimeCoord {
    pub time: Timestamp,
    pub axis_values: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDeviceMotionEventsReply {
    pub num_axes: u8,
    pub mode: u8,
    /// Each event carries `num_axes` values; shorter lists are zero-filled
    /// and longer ones cut when encoding.
    pub events: Vec<DeviceTimeCoord>,
}

impl ReplyBody for GetDeviceMotionEventsReply {
    fn write_fields(&self, w: &mut WireWriter) {
        w.write_u32(self.events.len() as u32);
        w.write_u8(self.num_axes);
        w.write_u8(self.mode);
        w.pad_to(32);
        let axes = self.num_axes as usize;
        for event in &self.events {
            w.write(&event.time);
            let values = &event.axis_values[..event.axis_values.len().min(axes)];
            w.write_list(values);
            w.write_zeros(4 * (axes - values.len()));
        }
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u32()? as usize;
        let num_axes = r.read_u8()?;
        let mode = r.read_u8()?;
        r.skip_to(32)?;
        list_bytes(count, 4 + 4 * num_axes as usize)
            .and_then(|n| r.require_min(n))?;
        let mut events = Vec::with_capacity(count);
        for _ in 0..count {
            events.push(DeviceTimeCoord {
                time: r.read()?,
                axis_values: r.read_list(num_axes as usize)?,
            });
        }
        r.finish_padded()?;
        Ok(GetDeviceMotionEventsReply {
            num_axes,
            mode,
            events,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDeviceFocusReply {
    pub focus: Window,
    pub time: Timestamp,
    pub revert_to: u8,
}

fixed_reply!(GetDeviceFocusReply, { focus, time, revert_to });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetFeedbackControlReply {
    pub feedbacks: Vec<FeedbackState>,
}

impl ReplyBody for GetFeedbackControlReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let feedbacks = clamp_u16(&self.feedbacks);
        w.write_u16(feedbacks.len() as u16);
        w.pad_to(32);
        w.write_list(feedbacks);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u16()? as usize;
        Ok(GetFeedbackControlReply {
            feedbacks: read_list_at_32(r, count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDeviceKeyMappingReply {
    pub keysyms_per_keycode: u8,
    pub keysyms: Vec<u32>,
}

impl ReplyBody for GetDeviceKeyMappingReply {
    fn write_fields(&self, w: &mut WireWriter) {
        w.write_u8(self.keysyms_per_keycode);
        w.pad_to(32);
        w.write_list(&self.keysyms);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let keysyms_per_keycode = r.read_u8()?;
        Ok(GetDeviceKeyMappingReply {
            keysyms_per_keycode,
            keysyms: read_remaining(r, 4)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDeviceModifierMappingReply {
    /// Eight rows of `keycodes.len() / 8` keycodes
    pub keycodes: Vec<Keycode>,
}

impl ReplyBody for GetDeviceModifierMappingReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let per_modifier = (self.keycodes.len() / 8).min(u8::MAX as usize);
        w.write_u8(per_modifier as u8);
        w.pad_to(32);
        w.write_list(&self.keycodes[..per_modifier * 8]);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let per_modifier = r.read_u8()? as usize;
        Ok(GetDeviceModifierMappingReply {
            keycodes: read_list_at_32(r, per_modifier * 8)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDeviceButtonMappingReply {
    pub map: Vec<u8>,
}

impl ReplyBody for GetDeviceButtonMappingReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let map = clamp_u8(&self.map);
        w.write_u8(map.len() as u8);
        w.pad_to(32);
        w.write_bytes(map);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let len = r.read_u8()? as usize;
        r.skip_to(32)?;
        let map = r.take(len)?.to_vec();
        r.finish_padded()?;
        Ok(GetDeviceButtonMappingReply { map })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryDeviceStateReply {
    pub classes: Vec<InputState>,
}

impl ReplyBody for QueryDeviceStateReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let classes = clamp_u8(&self.classes);
        w.write_u8(classes.len() as u8);
        w.pad_to(32);
        w.write_list(classes);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u8()? as usize;
        Ok(QueryDeviceStateReply {
            classes: read_list_at_32(r, count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDeviceControlReply {
    pub status: u8,
    pub control: DeviceState,
}

impl ReplyBody for GetDeviceControlReply {
    fn write_fields(&self, w: &mut WireWriter) {
        w.write_u8(self.status);
        w.pad_to(32);
        w.write(&self.control);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let status = r.read_u8()?;
        r.skip_to(32)?;
        let control = r.read()?;
        r.finish_padded()?;
        Ok(GetDeviceControlReply { status, control })
    }
}

/// ListDeviceProperties and XIListProperties
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListDevicePropertiesReply {
    pub atoms: Vec<Atom>,
}

impl ReplyBody for ListDevicePropertiesReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let atoms = clamp_u16(&self.atoms);
        w.write_u16(atoms.len() as u16);
        w.pad_to(32);
        w.write_list(atoms);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u16()? as usize;
        Ok(ListDevicePropertiesReply {
            atoms: read_list_at_32(r, count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDevicePropertyReply {
    pub type_: Atom,
    pub bytes_after: u32,
    pub format: u8,
    pub device_id: u8,
    pub data: Vec<u8>,
}

impl ReplyBody for GetDevicePropertyReply {
    fn write_fields(&self, w: &mut WireWriter) {
        w.write(&self.type_);
        w.write_u32(self.bytes_after);
        w.write_u32(format_units(self.format, self.data.len()));
        w.write_u8(self.format);
        w.write_u8(self.device_id);
        w.pad_to(32);
        w.write_bytes(&self.data);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let type_ = r.read()?;
        let bytes_after = r.read_u32()?;
        let items = r.read_u32()? as usize;
        let format = r.read_u8()?;
        let device_id = r.read_u8()?;
        Ok(GetDevicePropertyReply {
            type_,
            bytes_after,
            format,
            device_id,
            data: read_property_data(r, format, items)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIGetClientPointerReply {
    pub set: bool,
    pub device_id: u16,
}

impl ReplyBody for XIGetClientPointerReply {
    fn write_fields(&self, w: &mut WireWriter) {
        w.write_bool(self.set);
        w.write_zeros(1);
        w.write_u16(self.device_id);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let set = r.read_bool()?;
        r.skip(1)?;
        let device_id = r.read_u16()?;
        r.skip_to(32)?;
        r.finish_padded()?;
        Ok(XIGetClientPointerReply { set, device_id })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIQueryPointerReply {
    pub root: Window,
    pub child: Window,
    pub root_x: Fp1616,
    pub root_y: Fp1616,
    pub win_x: Fp1616,
    pub win_y: Fp1616,
    pub same_screen: bool,
    pub mods: ModifierInfo,
    pub group: GroupInfo,
    /// Button state bits; bit `n` set while button `n` is down
    pub buttons: Vec<u32>,
}

impl ReplyBody for XIQueryPointerReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let buttons = clamp_u16(&self.buttons);
        w.write(&self.root);
        w.write(&self.child);
        w.write(&self.root_x);
        w.write(&self.root_y);
        w.write(&self.win_x);
        w.write(&self.win_y);
        w.write_bool(self.same_screen);
        w.write_zeros(1);
        w.write_u16(buttons.len() as u16);
        w.write(&self.mods);
        w.write(&self.group);
        w.write_list(buttons);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let root = r.read()?;
        let child = r.read()?;
        let root_x = r.read()?;
        let root_y = r.read()?;
        let win_x = r.read()?;
        let win_y = r.read()?;
        let same_screen = r.read_bool()?;
        r.skip(1)?;
        let count = r.read_u16()? as usize;
        let mods = r.read()?;
        let group = r.read()?;
        let buttons = r.read_list(count)?;
        r.finish_padded()?;
        Ok(XIQueryPointerReply {
            root,
            child,
            root_x,
            root_y,
            win_x,
            win_y,
            same_screen,
            mods,
            group,
            buttons,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIQueryVersionReply {
    pub major_version: u16,
    pub minor_version: u16,
}

fixed_reply!(XIQueryVersionReply, { major_version, minor_version });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIGetFocusReply {
    pub focus: Window,
}

fixed_reply!(XIGetFocusReply, { focus });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIPassiveGrabDeviceReply {
    /// Modifier combinations that could not be grabbed
    pub failed: Vec<GrabModifierInfo>,
}

impl ReplyBody for XIPassiveGrabDeviceReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let failed = clamp_u16(&self.failed);
        w.write_u16(failed.len() as u16);
        w.pad_to(32);
        w.write_list(failed);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u16()? as usize;
        Ok(XIPassiveGrabDeviceReply {
            failed: read_list_at_32(r, count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIGetPropertyReply {
    pub type_: Atom,
    pub bytes_after: u32,
    pub format: u8,
    pub data: Vec<u8>,
}

impl ReplyBody for XIGetPropertyReply {
    fn write_fields(&self, w: &mut WireWriter) {
        w.write(&self.type_);
        w.write_u32(self.bytes_after);
        w.write_u32(format_units(self.format, self.data.len()));
        w.write_u8(self.format);
        w.pad_to(32);
        w.write_bytes(&self.data);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let type_ = r.read()?;
        let bytes_after = r.read_u32()?;
        let items = r.read_u32()? as usize;
        let format = r.read_u8()?;
        Ok(XIGetPropertyReply {
            type_,
            bytes_after,
            format,
            data: read_property_data(r, format, items)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIGetSelectedEventsReply {
    pub masks: Vec<EventMask>,
}

impl ReplyBody for XIGetSelectedEventsReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let masks = clamp_u16(&self.masks);
        w.write_u16(masks.len() as u16);
        w.pad_to(32);
        w.write_list(masks);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u16()? as usize;
        Ok(XIGetSelectedEventsReply {
            masks: read_list_at_32(r, count)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::errors::ErrorCode;
    use crate::protocol::replies::{decode_reply_body, encode_reply_with};

    fn round_trip<T: ReplyBody + PartialEq + std::fmt::Debug>(minor: u8, reply: &T) -> Vec<u8> {
        let mut frames = Vec::new();
        for order in ByteOrder::ALL {
            let bytes = encode_reply_with(minor, reply, 0x1234, order);
            assert_eq!(bytes[1], minor);
            let (sequence, decoded) = decode_reply_body::<T>(&bytes, order).unwrap();
            assert_eq!(sequence, 0x1234);
            assert_eq!(&decoded, reply);
            frames = bytes;
        }
        frames
    }

    #[test]
    fn test_list_input_devices_layout() {
        let reply = ListInputDevicesReply {
            devices: vec![
                DeviceInfo {
                    device_type: Atom::new(100),
                    device_id: 2,
                    device_use: 0,
                    attached: 0,
                    classes: vec![InputClassInfo::Button { num_buttons: 3 }],
                    name: b"mouse".to_vec(),
                },
                DeviceInfo {
                    device_type: Atom::new(101),
                    device_id: 3,
                    device_use: 1,
                    attached: 0,
                    classes: vec![InputClassInfo::Key {
                        min_keycode: Keycode::new(8),
                        max_keycode: Keycode::new(255),
                        num_keys: 248,
                    }],
                    name: b"kbd".to_vec(),
                },
            ],
        };
        let bytes = round_trip(2, &reply);
        // Two heads, then both classes, then both names
        assert_eq!(bytes[8], 2);
        assert_eq!(bytes[32 + 4], 2);
        assert_eq!(bytes[32 + 5], 1);
        assert_eq!(bytes[48], BUTTON_CLASS);
        assert_eq!(bytes[52], KEY_CLASS);
        assert_eq!(&bytes[60..66], b"\x05mouse");
        assert_eq!(&bytes[66..70], b"\x03kbd");
        assert_eq!(bytes.len(), 72);
    }

    #[test]
    fn test_motion_events_zero_fill() {
        let reply = GetDeviceMotionEventsReply {
            num_axes: 2,
            mode: 1,
            events: vec![DeviceTimeCoord {
                time: Timestamp::new(5),
                axis_values: vec![7],
            }],
        };
        let bytes = encode_reply_with(10, &reply, 1, ByteOrder::LSBFirst);
        assert_eq!(bytes.len(), 44);
        let (_, decoded) =
            decode_reply_body::<GetDeviceMotionEventsReply>(&bytes, ByteOrder::LSBFirst).unwrap();
        assert_eq!(decoded.events[0].axis_values, vec![7, 0]);
    }

    #[test]
    fn test_variable_replies_round_trip() {
        round_trip(
            7,
            &GetSelectedExtensionEventsReply {
                this_client: vec![1, 2],
                all_clients: vec![3],
            },
        );
        round_trip(
            24,
            &GetDeviceKeyMappingReply {
                keysyms_per_keycode: 2,
                keysyms: vec![0x61, 0x41],
            },
        );
        round_trip(
            28,
            &GetDeviceButtonMappingReply {
                map: vec![1, 2, 3, 4, 5],
            },
        );
        round_trip(
            30,
            &QueryDeviceStateReply {
                classes: vec![
                    InputState::Button {
                        num_buttons: 5,
                        buttons: [0; 32],
                    },
                    InputState::Valuator {
                        mode: 0,
                        valuators: vec![-10, 20],
                    },
                ],
            },
        );
        round_trip(
            34,
            &GetDeviceControlReply {
                status: 0,
                control: DeviceState::Resolution(vec![ValuatorResolution::default(); 3]),
            },
        );
        round_trip(
            60,
            &XIGetSelectedEventsReply {
                masks: vec![EventMask {
                    device_id: 2,
                    mask: vec![0x1c],
                }],
            },
        );
    }

    #[test]
    fn test_device_property_reply() {
        let reply = GetDevicePropertyReply {
            type_: Atom::INTEGER,
            bytes_after: 0,
            format: 16,
            device_id: 6,
            data: vec![1, 0, 2, 0, 3, 0],
        };
        let bytes = round_trip(39, &reply);
        assert_eq!(&bytes[16..20], &[0, 0, 0, 3]);
        assert_eq!(bytes.len(), 40);
    }

    #[test]
    fn test_device_property_partial_unit() {
        let reply = GetDevicePropertyReply {
            type_: Atom::INTEGER,
            bytes_after: 0,
            format: 32,
            device_id: 6,
            data: vec![1, 2, 3, 4, 5, 6],
        };
        let bytes = encode_reply_with(39, &reply, 1, ByteOrder::LSBFirst);
        assert_eq!(&bytes[16..20], &[2, 0, 0, 0]);
        let (_, decoded) =
            decode_reply_body::<GetDevicePropertyReply>(&bytes, ByteOrder::LSBFirst).unwrap();
        assert_eq!(decoded.data, [1, 2, 3, 4, 5, 6, 0, 0]);
    }

    #[test]
    fn test_query_pointer_layout() {
        let reply = XIQueryPointerReply {
            root: Window::new(0x25),
            child: Window::NONE,
            root_x: Fp1616::from_f64(10.5),
            root_y: Fp1616::from_f64(-2.0),
            win_x: Fp1616::from_f64(0.25),
            win_y: Fp1616(0),
            same_screen: true,
            mods: ModifierInfo {
                effective: 0x4,
                ..Default::default()
            },
            group: GroupInfo {
                locked: 1,
                ..Default::default()
            },
            buttons: vec![0b10],
        };
        let bytes = round_trip(40, &reply);
        assert_eq!(bytes.len(), 60);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 7]);
        assert_eq!(&bytes[16..20], &[0, 0x0a, 0x80, 0]);
        assert_eq!(&bytes[32..36], &[1, 0, 0, 1]);
        assert_eq!(&bytes[48..52], &[0, 0, 0, 4]);
        assert_eq!(bytes[54], 1);
        assert_eq!(&bytes[56..60], &[0, 0, 0, 2]);
    }

    #[test]
    fn test_one_byte_counts_clamp_their_lists() {
        let order = ByteOrder::LSBFirst;
        let device = DeviceInfo {
            device_id: 4,
            classes: vec![InputClassInfo::Button { num_buttons: 3 }; 300],
            name: b"pad".to_vec(),
            ..Default::default()
        };
        let reply = ListInputDevicesReply {
            devices: vec![device; 256],
        };
        let bytes = encode_reply_with(2, &reply, 1, order);
        assert_eq!(bytes[8], 255);
        assert_eq!(bytes[32 + 5], 255);
        let (_, decoded) = decode_reply_body::<ListInputDevicesReply>(&bytes, order).unwrap();
        assert_eq!(decoded.devices.len(), 255);
        assert_eq!(decoded.devices[254].classes.len(), 255);
        assert_eq!(decoded.devices[254].name, b"pad");

        let reply = OpenDeviceReply {
            classes: vec![InputClassEventBase::default(); 300],
        };
        let bytes = encode_reply_with(3, &reply, 1, order);
        assert_eq!(bytes[8], 255);
        let (_, decoded) = decode_reply_body::<OpenDeviceReply>(&bytes, order).unwrap();
        assert_eq!(decoded.classes.len(), 255);

        let reply = QueryDeviceStateReply {
            classes: vec![
                InputState::Valuator {
                    mode: 0,
                    valuators: vec![1],
                };
                300
            ],
        };
        let bytes = encode_reply_with(30, &reply, 1, order);
        assert_eq!(bytes[8], 255);
        let (_, decoded) = decode_reply_body::<QueryDeviceStateReply>(&bytes, order).unwrap();
        assert_eq!(decoded.classes.len(), 255);
    }

    #[test]
    fn test_client_pointer_bool() {
        let reply = XIGetClientPointerReply {
            set: true,
            device_id: 2,
        };
        let mut bytes = round_trip(45, &reply);
        bytes[8] = 2;
        let err = decode_reply_body::<XIGetClientPointerReply>(&bytes, ByteOrder::MSBFirst)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Value);
    }
}
