//! XI 1.x requests
//!
//! Devices are addressed by 8-bit ids. Event classes are opaque 32-bit
//! values: the device id in the high bits and an event type in the low byte.

use super::classes::{check_control_id, DeviceControl, FeedbackControl};
use crate::protocol::errors::{X11Error, X11Result};
use crate::protocol::requests::{format_unit_size, format_units, RequestBody};
use crate::protocol::types::*;
use crate::protocol::wire::{
    clamp_u16, clamp_u8, fixed_request, list_bytes, WireReader, WireWriter,
};
use crate::protocol::padded_len;

/// Opaque event class
pub type EventClass = u32;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetExtensionVersionRequest {
    pub name: Vec<u8>,
}

impl RequestBody for GetExtensionVersionRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let name = clamp_u16(&self.name);
        w.write_u16(name.len() as u16);
        w.write_zeros(2);
        w.write_padded_bytes(name);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let len = r.read_u16()? as usize;
        r.skip(2)?;
        r.require_exact(padded_len(len))?;
        Ok(GetExtensionVersionRequest {
            name: r.read_padded_bytes(len)?,
        })
    }
}

/// Request naming only a device, used by several minor opcodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceRequest {
    pub device_id: u8,
}

fixed_request!(DeviceRequest, 4, { device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetDeviceModeRequest {
    pub device_id: u8,
    /// Relative or Absolute
    pub mode: u8,
}

fixed_request!(SetDeviceModeRequest, 4, { device_id, mode });

/// Read `count` event classes, which must end the body.
fn read_classes(r: &mut WireReader<'_>, count: usize) -> X11Result<Vec<EventClass>> {
    r.require_exact(list_bytes(count, 4)?)?;
    r.read_list(count)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectExtensionEventRequest {
    pub window: Window,
    pub classes: Vec<EventClass>,
}

impl RequestBody for SelectExtensionEventRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.window);
        let classes = clamp_u16(&self.classes);
        w.write_u16(classes.len() as u16);
        w.write_zeros(2);
        w.write_list(classes);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        let window = r.read()?;
        let count = r.read_u16()? as usize;
        r.skip(2)?;
        Ok(SelectExtensionEventRequest {
            window,
            classes: read_classes(r, count)?,
        })
    }
}

/// Request naming only a window
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowRequest {
    pub window: Window,
}

fixed_request!(WindowRequest, 4, { window });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeDeviceDontPropagateListRequest {
    pub window: Window,
    /// AddToList or DeleteFromList
    pub mode: u8,
    pub classes: Vec<EventClass>,
}

impl RequestBody for ChangeDeviceDontPropagateListRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.window);
        let classes = clamp_u16(&self.classes);
        w.write_u16(classes.len() as u16);
        w.write_u8(self.mode);
        w.write_zeros(1);
        w.write_list(classes);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        let window = r.read()?;
        let count = r.read_u16()? as usize;
        let mode = r.read_u8()?;
        r.skip(1)?;
        Ok(ChangeDeviceDontPropagateListRequest {
            window,
            mode,
            classes: read_classes(r, count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDeviceMotionEventsRequest {
    pub start: Timestamp,
    pub stop: Timestamp,
    pub device_id: u8,
}

fixed_request!(GetDeviceMotionEventsRequest, 12, { start, stop, device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangePointerDeviceRequest {
    pub x_axis: u8,
    pub y_axis: u8,
    pub device_id: u8,
}

fixed_request!(ChangePointerDeviceRequest, 4, { x_axis, y_axis, device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrabDeviceRequest {
    pub grab_window: Window,
    pub time: Timestamp,
    pub this_device_mode: u8,
    pub other_devices_mode: u8,
    pub owner_events: bool,
    pub device_id: u8,
    pub classes: Vec<EventClass>,
}

impl RequestBody for GrabDeviceRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let classes = clamp_u16(&self.classes);
        w.write(&self.grab_window);
        w.write(&self.time);
        w.write_u16(classes.len() as u16);
        w.write_u8(self.this_device_mode);
        w.write_u8(self.other_devices_mode);
        w.write_bool(self.owner_events);
        w.write_u8(self.device_id);
        w.write_zeros(2);
        w.write_list(classes);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(16)?;
        let grab_window = r.read()?;
        let time = r.read()?;
        let count = r.read_u16()? as usize;
        let this_device_mode = r.read_u8()?;
        let other_devices_mode = r.read_u8()?;
        let owner_events = r.read_bool()?;
        let device_id = r.read_u8()?;
        r.skip(2)?;
        Ok(GrabDeviceRequest {
            grab_window,
            time,
            this_device_mode,
            other_devices_mode,
            owner_events,
            device_id,
            classes: read_classes(r, count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UngrabDeviceRequest {
    pub time: Timestamp,
    pub device_id: u8,
}

fixed_request!(UngrabDeviceRequest, 8, { time, device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrabDeviceKeyRequest {
    pub grab_window: Window,
    pub modifiers: u16,
    pub modifier_device: u8,
    pub grabbed_device: u8,
    pub key: u8,
    pub this_device_mode: u8,
    pub other_devices_mode: u8,
    pub owner_events: bool,
    pub classes: Vec<EventClass>,
}

impl RequestBody for GrabDeviceKeyRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let classes = clamp_u16(&self.classes);
        w.write(&self.grab_window);
        w.write_u16(classes.len() as u16);
        w.write_u16(self.modifiers);
        w.write_u8(self.modifier_device);
        w.write_u8(self.grabbed_device);
        w.write_u8(self.key);
        w.write_u8(self.this_device_mode);
        w.write_u8(self.other_devices_mode);
        w.write_bool(self.owner_events);
        w.write_zeros(2);
        w.write_list(classes);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(16)?;
        let grab_window = r.read()?;
        let count = r.read_u16()? as usize;
        let modifiers = r.read_u16()?;
        let modifier_device = r.read_u8()?;
        let grabbed_device = r.read_u8()?;
        let key = r.read_u8()?;
        let this_device_mode = r.read_u8()?;
        let other_devices_mode = r.read_u8()?;
        let owner_events = r.read_bool()?;
        r.skip(2)?;
        Ok(GrabDeviceKeyRequest {
            grab_window,
            modifiers,
            modifier_device,
            grabbed_device,
            key,
            this_device_mode,
            other_devices_mode,
            owner_events,
            classes: read_classes(r, count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UngrabDeviceKeyRequest {
    pub grab_window: Window,
    pub modifiers: u16,
    pub modifier_device: u8,
    pub key: u8,
    pub grabbed_device: u8,
}

fixed_request!(UngrabDeviceKeyRequest, 12, {
    grab_window,
    modifiers,
    modifier_device,
    key,
    grabbed_device,
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrabDeviceButtonRequest {
    pub grab_window: Window,
    pub grabbed_device: u8,
    pub modifier_device: u8,
    pub modifiers: u16,
    pub this_device_mode: u8,
    pub other_devices_mode: u8,
    pub button: u8,
    pub owner_events: bool,
    pub classes: Vec<EventClass>,
}

impl RequestBody for GrabDeviceButtonRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let classes = clamp_u16(&self.classes);
        w.write(&self.grab_window);
        w.write_u8(self.grabbed_device);
        w.write_u8(self.modifier_device);
        w.write_u16(classes.len() as u16);
        w.write_u16(self.modifiers);
        w.write_u8(self.this_device_mode);
        w.write_u8(self.other_devices_mode);
        w.write_u8(self.button);
        w.write_bool(self.owner_events);
        w.write_zeros(2);
        w.write_list(classes);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(16)?;
        let grab_window = r.read()?;
        let grabbed_device = r.read_u8()?;
        let modifier_device = r.read_u8()?;
        let count = r.read_u16()? as usize;
        let modifiers = r.read_u16()?;
        let this_device_mode = r.read_u8()?;
        let other_devices_mode = r.read_u8()?;
        let button = r.read_u8()?;
        let owner_events = r.read_bool()?;
        r.skip(2)?;
        Ok(GrabDeviceButtonRequest {
            grab_window,
            grabbed_device,
            modifier_device,
            modifiers,
            this_device_mode,
            other_devices_mode,
            button,
            owner_events,
            classes: read_classes(r, count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UngrabDeviceButtonRequest {
    pub grab_window: Window,
    pub modifiers: u16,
    pub modifier_device: u8,
    pub button: u8,
    pub grabbed_device: u8,
}

fixed_request!(UngrabDeviceButtonRequest, 12, {
    grab_window,
    modifiers,
    modifier_device,
    button,
    grabbed_device,
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllowDeviceEventsRequest {
    pub time: Timestamp,
    pub mode: u8,
    pub device_id: u8,
}

fixed_request!(AllowDeviceEventsRequest, 8, { time, mode, device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetDeviceFocusRequest {
    pub focus: Window,
    pub time: Timestamp,
    pub revert_to: u8,
    pub device_id: u8,
}

fixed_request!(SetDeviceFocusRequest, 12, { focus, time, revert_to, device_id });

/// The byte after the device id names the feedback class; the record
/// carries the feedback id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeFeedbackControlRequest {
    /// `FEEDBACK_*` bits selecting which fields of `control` apply
    pub mask: u32,
    pub device_id: u8,
    pub control: FeedbackControl,
}

impl RequestBody for ChangeFeedbackControlRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u32(self.mask);
        w.write_u8(self.device_id);
        w.write_u8(self.control.data.class_id());
        w.write_zeros(2);
        w.write(&self.control);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        let mask = r.read_u32()?;
        let device_id = r.read_u8()?;
        let class = r.read_u8()?;
        r.skip(2)?;
        let control: FeedbackControl = r.read()?;
        if control.data.class_id() != class {
            return Err(X11Error::bad_match(0, 0));
        }
        r.finish()?;
        Ok(ChangeFeedbackControlRequest {
            mask,
            device_id,
            control,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDeviceKeyMappingRequest {
    pub device_id: u8,
    pub first_keycode: Keycode,
    pub count: u8,
}

fixed_request!(GetDeviceKeyMappingRequest, 4, { device_id, first_keycode, count });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeDeviceKeyMappingRequest {
    pub device_id: u8,
    pub first_keycode: Keycode,
    pub keysyms_per_keycode: u8,
    pub keycode_count: u8,
    pub keysyms: Vec<u32>,
}

impl RequestBody for ChangeDeviceKeyMappingRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u8(self.device_id);
        w.write(&self.first_keycode);
        w.write_u8(self.keysyms_per_keycode);
        w.write_u8(self.keycode_count);
        w.write_list(&self.keysyms);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let device_id = r.read_u8()?;
        let first_keycode = r.read()?;
        let keysyms_per_keycode = r.read_u8()?;
        let keycode_count = r.read_u8()?;
        let count = keysyms_per_keycode as usize * keycode_count as usize;
        r.require_exact(list_bytes(count, 4)?)?;
        Ok(ChangeDeviceKeyMappingRequest {
            device_id,
            first_keycode,
            keysyms_per_keycode,
            keycode_count,
            keysyms: r.read_list(count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetDeviceModifierMappingRequest {
    pub device_id: u8,
    /// Eight rows of `keycodes_per_modifier` keycodes
    pub keycodes: Vec<Keycode>,
}

impl SetDeviceModifierMappingRequest {
    pub fn keycodes_per_modifier(&self) -> u8 {
        (self.keycodes.len() / 8).min(u8::MAX as usize) as u8
    }
}

impl RequestBody for SetDeviceModifierMappingRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let per_modifier = self.keycodes_per_modifier();
        w.write_u8(self.device_id);
        w.write_u8(per_modifier);
        w.write_zeros(2);
        w.write_list(&self.keycodes[..per_modifier as usize * 8]);
        w.pad();
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let device_id = r.read_u8()?;
        let per_modifier = r.read_u8()? as usize;
        r.skip(2)?;
        let count = per_modifier * 8;
        r.require_exact(count)?;
        Ok(SetDeviceModifierMappingRequest {
            device_id,
            keycodes: r.read_list(count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetDeviceButtonMappingRequest {
    pub device_id: u8,
    pub map: Vec<u8>,
}

impl RequestBody for SetDeviceButtonMappingRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u8(self.device_id);
        let map = clamp_u8(&self.map);
        w.write_u8(map.len() as u8);
        w.write_zeros(2);
        w.write_padded_bytes(map);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let device_id = r.read_u8()?;
        let len = r.read_u8()? as usize;
        r.skip(2)?;
        r.require_exact(padded_len(len))?;
        Ok(SetDeviceButtonMappingRequest {
            device_id,
            map: r.read_padded_bytes(len)?,
        })
    }
}

/// Each event is a complete 32-byte event frame, sent as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendExtensionEventRequest {
    pub destination: Window,
    pub device_id: u8,
    pub propagate: bool,
    pub events: Vec<[u8; 32]>,
    pub classes: Vec<EventClass>,
}

impl RequestBody for SendExtensionEventRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let events = clamp_u8(&self.events);
        let classes = clamp_u16(&self.classes);
        w.write(&self.destination);
        w.write_u8(self.device_id);
        w.write_bool(self.propagate);
        w.write_u16(classes.len() as u16);
        w.write_u8(events.len() as u8);
        w.write_zeros(3);
        w.write_list(events);
        w.write_list(classes);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(12)?;
        let destination = r.read()?;
        let device_id = r.read_u8()?;
        let propagate = r.read_bool()?;
        let num_classes = r.read_u16()? as usize;
        let num_events = r.read_u8()? as usize;
        r.skip(3)?;
        r.require_exact(list_bytes(num_events, 32)? + list_bytes(num_classes, 4)?)?;
        Ok(SendExtensionEventRequest {
            destination,
            device_id,
            propagate,
            events: r.read_list(num_events)?,
            classes: r.read_list(num_classes)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceBellRequest {
    pub device_id: u8,
    pub feedback_id: u8,
    pub feedback_class: u8,
    pub percent: i8,
}

fixed_request!(DeviceBellRequest, 4, {
    device_id,
    feedback_id,
    feedback_class,
    percent,
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetDeviceValuatorsRequest {
    pub device_id: u8,
    pub first_valuator: u8,
    pub valuators: Vec<i32>,
}

impl RequestBody for SetDeviceValuatorsRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let valuators = clamp_u8(&self.valuators);
        w.write_u8(self.device_id);
        w.write_u8(self.first_valuator);
        w.write_u8(valuators.len() as u8);
        w.write_zeros(1);
        w.write_list(valuators);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let device_id = r.read_u8()?;
        let first_valuator = r.read_u8()?;
        let count = r.read_u8()? as usize;
        r.skip(1)?;
        r.require_exact(list_bytes(count, 4)?)?;
        Ok(SetDeviceValuatorsRequest {
            device_id,
            first_valuator,
            valuators: r.read_list(count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDeviceControlRequest {
    pub control_id: u16,
    pub device_id: u8,
}

impl RequestBody for GetDeviceControlRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u16(self.control_id);
        w.write_u8(self.device_id);
        w.write_zeros(1);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_exact(4)?;
        let control_id = r.read_u16()?;
        check_control_id(control_id)?;
        Ok(GetDeviceControlRequest {
            control_id,
            device_id: r.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDeviceControlRequest {
    pub device_id: u8,
    pub control: DeviceControl,
}

impl RequestBody for ChangeDeviceControlRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u16(self.control.control_id());
        w.write_u8(self.device_id);
        w.write_zeros(1);
        w.write(&self.control);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let control_id = r.read_u16()?;
        check_control_id(control_id)?;
        let device_id = r.read_u8()?;
        r.skip(1)?;
        let control: DeviceControl = r.read()?;
        if control.control_id() != control_id {
            return Err(X11Error::bad_match(0, 0));
        }
        r.finish()?;
        Ok(ChangeDeviceControlRequest { device_id, control })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeDevicePropertyRequest {
    pub property: Atom,
    pub type_: Atom,
    pub device_id: u8,
    pub format: u8,
    pub mode: u8,
    pub data: Vec<u8>,
}

impl RequestBody for ChangeDevicePropertyRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.property);
        w.write(&self.type_);
        w.write_u8(self.device_id);
        w.write_u8(self.format);
        w.write_u8(self.mode);
        w.write_zeros(1);
        w.write_u32(format_units(self.format, self.data.len()));
        w.write_padded_bytes(&self.data);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(16)?;
        let property = r.read()?;
        let type_ = r.read()?;
        let device_id = r.read_u8()?;
        let format = r.read_u8()?;
        let unit = format_unit_size(format)?;
        let mode = r.read_u8()?;
        r.skip(1)?;
        let len = list_bytes(r.read_u32()? as usize, unit)?;
        r.require_exact(padded_len(len))?;
        Ok(ChangeDevicePropertyRequest {
            property,
            type_,
            device_id,
            format,
            mode,
            data: r.read_padded_bytes(len)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteDevicePropertyRequest {
    pub property: Atom,
    pub device_id: u8,
}

fixed_request!(DeleteDevicePropertyRequest, 8, { property, device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetDevicePropertyRequest {
    pub property: Atom,
    pub type_: Atom,
    pub offset: u32,
    pub len: u32,
    pub device_id: u8,
    pub delete: bool,
}

fixed_request!(GetDevicePropertyRequest, 20, {
    property,
    type_,
    offset,
    len,
    device_id,
    delete,
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extensions::xinput::classes::{
        FeedbackControlData, FEEDBACK_PERCENT, FEEDBACK_PITCH, FEEDBACK_STRING, LED_FEEDBACK_CLASS,
    };
    use crate::protocol::errors::ErrorCode;

    fn body<T: RequestBody>(request: &T, order: ByteOrder) -> Vec<u8> {
        let mut w = WireWriter::new(order);
        request.write_body(&mut w);
        w.into_bytes()
    }

    fn parse<T: RequestBody>(bytes: &[u8], order: ByteOrder) -> X11Result<T> {
        T::read_body(0, &mut WireReader::new(bytes, order))
    }

    #[test]
    fn test_device_request_length() {
        let order = ByteOrder::LSBFirst;
        assert_eq!(
            parse::<DeviceRequest>(&[2, 0, 0, 0], order).unwrap(),
            DeviceRequest { device_id: 2 }
        );
        let err = parse::<DeviceRequest>(&[2], order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_dont_propagate_layout() {
        let order = ByteOrder::MSBFirst;
        let req = ChangeDeviceDontPropagateListRequest {
            window: Window::new(0x200001),
            mode: 1,
            classes: vec![0x0201, 0x0202],
        };
        let bytes = body(&req, order);
        assert_eq!(&bytes[..8], &[0x00, 0x20, 0x00, 0x01, 0, 2, 1, 0]);
        assert_eq!(bytes.len(), 16);
        assert_eq!(parse::<ChangeDeviceDontPropagateListRequest>(&bytes, order).unwrap(), req);
    }

    #[test]
    fn test_grab_device_key_layout() {
        let order = ByteOrder::LSBFirst;
        let req = GrabDeviceKeyRequest {
            grab_window: Window::new(1),
            modifiers: 0x8000,
            modifier_device: 3,
            grabbed_device: 4,
            key: 38,
            this_device_mode: 1,
            other_devices_mode: 0,
            owner_events: true,
            classes: vec![7],
        };
        let bytes = body(&req, order);
        assert_eq!(&bytes[4..16], &[1, 0, 0, 0x80, 3, 4, 38, 1, 0, 1, 0, 0]);
        assert_eq!(parse::<GrabDeviceKeyRequest>(&bytes, order).unwrap(), req);

        let err = parse::<GrabDeviceKeyRequest>(&bytes[..16], order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_change_device_control_unknown_id() {
        let order = ByteOrder::LSBFirst;
        let bytes = [99, 0, 2, 0, 99, 0, 8, 0, 0, 0, 0, 0];
        let err = parse::<ChangeDeviceControlRequest>(&bytes, order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Value);
        assert_eq!(err.bad_value, 99);
    }

    #[test]
    fn test_change_device_control_resolution() {
        let order = ByteOrder::MSBFirst;
        let req = ChangeDeviceControlRequest {
            device_id: 5,
            control: DeviceControl::Resolution {
                first_valuator: 0,
                resolutions: vec![1000, 2000],
            },
        };
        let bytes = body(&req, order);
        assert_eq!(bytes.len(), 4 + 16);
        assert_eq!(parse::<ChangeDeviceControlRequest>(&bytes, order).unwrap(), req);
    }

    fn bell_control() -> ChangeFeedbackControlRequest {
        ChangeFeedbackControlRequest {
            mask: FEEDBACK_PERCENT | FEEDBACK_PITCH,
            device_id: 3,
            control: FeedbackControl {
                feedback_id: 1,
                data: FeedbackControlData::Bell {
                    percent: 50,
                    pitch: 440,
                    duration: 100,
                },
            },
        }
    }

    #[test]
    fn test_change_feedback_control_layout() {
        let order = ByteOrder::MSBFirst;
        let req = bell_control();
        let bytes = body(&req, order);
        assert_eq!(
            bytes,
            [0, 0, 0, 6, 3, 5, 0, 0, 5, 1, 0, 12, 50, 0, 0, 0, 0x01, 0xb8, 0, 100]
        );
        assert_eq!(parse::<ChangeFeedbackControlRequest>(&bytes, order).unwrap(), req);

        for cut in [1, 4, 12, 13] {
            let err = parse::<ChangeFeedbackControlRequest>(&bytes[..cut], order).unwrap_err();
            assert_eq!(err.code, ErrorCode::Length, "cut {}", cut);
        }
        let mut long = bytes.clone();
        long.extend([0u8; 4]);
        let err = parse::<ChangeFeedbackControlRequest>(&long, order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_change_feedback_control_class_mismatch() {
        let order = ByteOrder::LSBFirst;
        let mut bytes = body(&bell_control(), order);
        // Header says LED, record is a bell
        bytes[5] = LED_FEEDBACK_CLASS;
        let err = parse::<ChangeFeedbackControlRequest>(&bytes, order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Match);
    }

    #[test]
    fn test_change_feedback_control_string() {
        let order = ByteOrder::LSBFirst;
        let req = ChangeFeedbackControlRequest {
            mask: FEEDBACK_STRING,
            device_id: 7,
            control: FeedbackControl {
                feedback_id: 0,
                data: FeedbackControlData::String {
                    keysyms: vec![0x48, 0x69],
                },
            },
        };
        let bytes = body(&req, order);
        assert_eq!(bytes.len(), 8 + 16);
        assert_eq!(&bytes[8..16], &[3, 0, 16, 0, 0, 0, 2, 0]);
        assert_eq!(parse::<ChangeFeedbackControlRequest>(&bytes, order).unwrap(), req);
    }

    #[test]
    fn test_change_pointer_device() {
        let order = ByteOrder::LSBFirst;
        let req = ChangePointerDeviceRequest {
            x_axis: 0,
            y_axis: 1,
            device_id: 6,
        };
        let bytes = body(&req, order);
        assert_eq!(bytes, [0, 1, 6, 0]);
        assert_eq!(parse::<ChangePointerDeviceRequest>(&bytes, order).unwrap(), req);
    }

    #[test]
    fn test_send_extension_event_layout() {
        let order = ByteOrder::MSBFirst;
        let mut event = [0u8; 32];
        event[0] = 70;
        event[1] = 3;
        let req = SendExtensionEventRequest {
            destination: Window::new(0x400001),
            device_id: 3,
            propagate: true,
            events: vec![event],
            classes: vec![0x0346, 0x0347],
        };
        let bytes = body(&req, order);
        assert_eq!(bytes.len(), 12 + 32 + 8);
        assert_eq!(&bytes[4..12], &[3, 1, 0, 2, 1, 0, 0, 0]);
        assert_eq!(bytes[12], 70);
        assert_eq!(parse::<SendExtensionEventRequest>(&bytes, order).unwrap(), req);

        let err = parse::<SendExtensionEventRequest>(&bytes[..48], order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_set_device_valuators() {
        let order = ByteOrder::LSBFirst;
        let req = SetDeviceValuatorsRequest {
            device_id: 4,
            first_valuator: 2,
            valuators: vec![-1, 300],
        };
        let bytes = body(&req, order);
        assert_eq!(&bytes[..4], &[4, 2, 2, 0]);
        assert_eq!(bytes.len(), 12);
        assert_eq!(parse::<SetDeviceValuatorsRequest>(&bytes, order).unwrap(), req);
        let err = parse::<SetDeviceValuatorsRequest>(&bytes[..8], order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_one_byte_counts_clamp_their_lists() {
        let order = ByteOrder::LSBFirst;

        let req = SetDeviceButtonMappingRequest {
            device_id: 2,
            map: (0..300).map(|i| i as u8).collect(),
        };
        let bytes = body(&req, order);
        assert_eq!(bytes[1], 255);
        assert_eq!(bytes.len(), 4 + 256);
        let decoded = parse::<SetDeviceButtonMappingRequest>(&bytes, order).unwrap();
        assert_eq!(decoded.map, req.map[..255]);

        let req = SetDeviceValuatorsRequest {
            device_id: 2,
            first_valuator: 0,
            valuators: vec![7; 300],
        };
        let bytes = body(&req, order);
        assert_eq!(bytes[2], 255);
        let decoded = parse::<SetDeviceValuatorsRequest>(&bytes, order).unwrap();
        assert_eq!(decoded.valuators.len(), 255);

        let req = SendExtensionEventRequest {
            events: vec![[1; 32]; 256],
            classes: vec![9],
            ..Default::default()
        };
        let bytes = body(&req, order);
        assert_eq!(bytes[8], 255);
        assert_eq!(bytes.len(), 12 + 255 * 32 + 4);
        let decoded = parse::<SendExtensionEventRequest>(&bytes, order).unwrap();
        assert_eq!(decoded.events.len(), 255);
        assert_eq!(decoded.classes, vec![9]);

        let req = SetDeviceModifierMappingRequest {
            device_id: 1,
            keycodes: vec![Keycode::new(10); 8 * 300],
        };
        let bytes = body(&req, order);
        assert_eq!(bytes[1], 255);
        let decoded = parse::<SetDeviceModifierMappingRequest>(&bytes, order).unwrap();
        assert_eq!(decoded.keycodes.len(), 8 * 255);
    }

    #[test]
    fn test_key_mapping_count() {
        let order = ByteOrder::LSBFirst;
        let req = ChangeDeviceKeyMappingRequest {
            device_id: 3,
            first_keycode: Keycode::new(8),
            keysyms_per_keycode: 2,
            keycode_count: 2,
            keysyms: vec![0x61, 0x41, 0x62, 0x42],
        };
        let bytes = body(&req, order);
        assert_eq!(parse::<ChangeDeviceKeyMappingRequest>(&bytes, order).unwrap(), req);
        let err = parse::<ChangeDeviceKeyMappingRequest>(&bytes[..16], order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_extension_version_name() {
        let order = ByteOrder::LSBFirst;
        let req = GetExtensionVersionRequest {
            name: b"XInputExtension".to_vec(),
        };
        let bytes = body(&req, order);
        assert_eq!(bytes.len(), 20);
        assert_eq!(parse::<GetExtensionVersionRequest>(&bytes, order).unwrap(), req);
    }
}
