//! XI2 requests
//!
//! XI2 addresses devices with 16-bit ids and uses 16.16 fixed point for
//! pointer coordinates.

use crate::protocol::errors::{X11Error, X11Result};
use crate::protocol::requests::{format_unit_size, format_units, RequestBody};
use crate::protocol::types::*;
use crate::protocol::wire::{
    clamp_u16, clamp_u8, fixed_request, list_bytes, WireField, WireReader, WireWriter,
};
use crate::protocol::padded_len;

pub const HIERARCHY_ADD_MASTER: u16 = 1;
pub const HIERARCHY_REMOVE_MASTER: u16 = 2;
pub const HIERARCHY_ATTACH_SLAVE: u16 = 3;
pub const HIERARCHY_DETACH_SLAVE: u16 = 4;

/// Signed 16.16 fixed point number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fp1616(pub i32);

impl Fp1616 {
    pub fn from_f64(value: f64) -> Self {
        Fp1616((value * 65536.0) as i32)
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 65536.0
    }
}

impl WireField for Fp1616 {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(Fp1616(r.read_i32()?))
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_i32(self.0);
    }
}

/// Per-device event selection. Bit `n` of the mask selects XI2 event `n`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventMask {
    pub device_id: u16,
    pub mask: Vec<u32>,
}

impl EventMask {
    pub fn is_set(&self, event: u16) -> bool {
        let word = (event / 32) as usize;
        self.mask
            .get(word)
            .map_or(false, |bits| bits & (1 << (event % 32)) != 0)
    }

    pub fn set(&mut self, event: u16) {
        let word = (event / 32) as usize;
        if self.mask.len() <= word {
            self.mask.resize(word + 1, 0);
        }
        self.mask[word] |= 1 << (event % 32);
    }
}

impl WireField for EventMask {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let device_id = r.read_u16()?;
        let len = r.read_u16()? as usize;
        Ok(EventMask {
            device_id,
            mask: r.read_list(len)?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        let mask = clamp_u16(&self.mask);
        w.write_u16(self.device_id);
        w.write_u16(mask.len() as u16);
        w.write_list(mask);
    }
}

/// One record of XIChangeHierarchy.
///
/// Creating and removing master devices is recognized on the wire but not
/// supported: such records fail to decode with an Implementation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyChange {
    AttachSlave { device_id: u16, master: u16 },
    DetachSlave { device_id: u16 },
}

impl HierarchyChange {
    pub fn change_type(&self) -> u16 {
        match self {
            HierarchyChange::AttachSlave { .. } => HIERARCHY_ATTACH_SLAVE,
            HierarchyChange::DetachSlave { .. } => HIERARCHY_DETACH_SLAVE,
        }
    }
}

impl WireField for HierarchyChange {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let change_type = r.read_u16()?;
        let words = r.read_u16()? as usize;
        match change_type {
            HIERARCHY_ADD_MASTER | HIERARCHY_REMOVE_MASTER => {
                log::debug!("Unsupported hierarchy change type {}", change_type);
                return Err(X11Error::implementation_error(0, change_type as u32, 0));
            }
            HIERARCHY_ATTACH_SLAVE | HIERARCHY_DETACH_SLAVE => {}
            other => return Err(X11Error::bad_value(0, other as u32, 0)),
        }
        // Both supported records are two words including the header.
        if words != 2 {
            return Err(X11Error::bad_length(0, 0));
        }
        let device_id = r.read_u16()?;
        let master = r.read_u16()?;
        Ok(match change_type {
            HIERARCHY_ATTACH_SLAVE => HierarchyChange::AttachSlave { device_id, master },
            _ => HierarchyChange::DetachSlave { device_id },
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u16(self.change_type());
        w.write_u16(2);
        match self {
            HierarchyChange::AttachSlave { device_id, master } => {
                w.write_u16(*device_id);
                w.write_u16(*master);
            }
            HierarchyChange::DetachSlave { device_id } => {
                w.write_u16(*device_id);
                w.write_zeros(2);
            }
        }
    }
}

/// Result for one modifier combination of XIPassiveGrabDevice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrabModifierInfo {
    pub modifiers: u32,
    pub status: u8,
}

impl WireField for GrabModifierInfo {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let modifiers = r.read_u32()?;
        let status = r.read_u8()?;
        r.skip(3)?;
        Ok(GrabModifierInfo { modifiers, status })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u32(self.modifiers);
        w.write_u8(self.status);
        w.write_zeros(3);
    }
}

/// Keyboard modifier state in XIQueryPointer and XI2 device events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierInfo {
    pub base: u32,
    pub latched: u32,
    pub locked: u32,
    pub effective: u32,
}

impl WireField for ModifierInfo {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(ModifierInfo {
            base: r.read_u32()?,
            latched: r.read_u32()?,
            locked: r.read_u32()?,
            effective: r.read_u32()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u32(self.base);
        w.write_u32(self.latched);
        w.write_u32(self.locked);
        w.write_u32(self.effective);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupInfo {
    pub base: u8,
    pub latched: u8,
    pub locked: u8,
    pub effective: u8,
}

impl WireField for GroupInfo {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(GroupInfo {
            base: r.read_u8()?,
            latched: r.read_u8()?,
            locked: r.read_u8()?,
            effective: r.read_u8()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(self.base);
        w.write_u8(self.latched);
        w.write_u8(self.locked);
        w.write_u8(self.effective);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BarrierReleaseInfo {
    pub device_id: u16,
    pub barrier: u32,
    pub event_id: u32,
}

impl WireField for BarrierReleaseInfo {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let device_id = r.read_u16()?;
        r.skip(2)?;
        Ok(BarrierReleaseInfo {
            device_id,
            barrier: r.read_u32()?,
            event_id: r.read_u32()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u16(self.device_id);
        w.write_zeros(2);
        w.write_u32(self.barrier);
        w.write_u32(self.event_id);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIQueryPointerRequest {
    pub window: Window,
    pub device_id: u16,
}

fixed_request!(XIQueryPointerRequest, 8, { window, device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIWarpPointerRequest {
    pub src_window: Window,
    pub dst_window: Window,
    pub src_x: Fp1616,
    pub src_y: Fp1616,
    pub src_width: u16,
    pub src_height: u16,
    pub dst_x: Fp1616,
    pub dst_y: Fp1616,
    pub device_id: u16,
}

fixed_request!(XIWarpPointerRequest, 32, {
    src_window,
    dst_window,
    src_x,
    src_y,
    src_width,
    src_height,
    dst_x,
    dst_y,
    device_id,
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIChangeCursorRequest {
    pub window: Window,
    pub cursor: Cursor,
    pub device_id: u16,
}

fixed_request!(XIChangeCursorRequest, 12, { window, cursor, device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIChangeHierarchyRequest {
    pub changes: Vec<HierarchyChange>,
}

impl RequestBody for XIChangeHierarchyRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let changes = clamp_u8(&self.changes);
        w.write_u8(changes.len() as u8);
        w.write_zeros(3);
        w.write_list(changes);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let count = r.read_u8()? as usize;
        r.skip(3)?;
        let changes = r.read_list(count)?;
        r.finish()?;
        Ok(XIChangeHierarchyRequest { changes })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XISetClientPointerRequest {
    pub window: Window,
    pub device_id: u16,
}

fixed_request!(XISetClientPointerRequest, 8, { window, device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIGetClientPointerRequest {
    pub window: Window,
}

fixed_request!(XIGetClientPointerRequest, 4, { window });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XISelectEventsRequest {
    pub window: Window,
    pub masks: Vec<EventMask>,
}

impl RequestBody for XISelectEventsRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let masks = clamp_u16(&self.masks);
        w.write(&self.window);
        w.write_u16(masks.len() as u16);
        w.write_zeros(2);
        w.write_list(masks);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(8)?;
        let window = r.read()?;
        let count = r.read_u16()? as usize;
        r.skip(2)?;
        let masks = r.read_list(count)?;
        r.finish()?;
        Ok(XISelectEventsRequest { window, masks })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIQueryVersionRequest {
    pub major_version: u16,
    pub minor_version: u16,
}

fixed_request!(XIQueryVersionRequest, 4, { major_version, minor_version });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XISetFocusRequest {
    pub window: Window,
    pub time: Timestamp,
    pub device_id: u16,
}

fixed_request!(XISetFocusRequest, 12, { window, time, device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIGetFocusRequest {
    pub device_id: u16,
}

fixed_request!(XIGetFocusRequest, 4, { device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIGrabDeviceRequest {
    pub grab_window: Window,
    pub time: Timestamp,
    pub cursor: Cursor,
    pub device_id: u16,
    pub grab_mode: u8,
    pub paired_device_mode: u8,
    pub owner_events: bool,
    pub mask: Vec<u32>,
}

impl RequestBody for XIGrabDeviceRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let mask = clamp_u16(&self.mask);
        w.write(&self.grab_window);
        w.write(&self.time);
        w.write(&self.cursor);
        w.write_u16(self.device_id);
        w.write_u8(self.grab_mode);
        w.write_u8(self.paired_device_mode);
        w.write_bool(self.owner_events);
        w.write_zeros(1);
        w.write_u16(mask.len() as u16);
        w.write_list(mask);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(20)?;
        let grab_window = r.read()?;
        let time = r.read()?;
        let cursor = r.read()?;
        let device_id = r.read_u16()?;
        let grab_mode = r.read_u8()?;
        let paired_device_mode = r.read_u8()?;
        let owner_events = r.read_bool()?;
        r.skip(1)?;
        let mask_len = r.read_u16()? as usize;
        r.require_exact(list_bytes(mask_len, 4)?)?;
        Ok(XIGrabDeviceRequest {
            grab_window,
            time,
            cursor,
            device_id,
            grab_mode,
            paired_device_mode,
            owner_events,
            mask: r.read_list(mask_len)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIUngrabDeviceRequest {
    pub time: Timestamp,
    pub device_id: u16,
}

fixed_request!(XIUngrabDeviceRequest, 8, { time, device_id });

/// Touch sequence named by the XI 2.2 form of XIAllowEvents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchRelease {
    pub touch_id: u32,
    pub grab_window: Window,
}

/// Clients speaking XI 2.0 or 2.1 send the 8-byte form without `touch`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIAllowEventsRequest {
    pub time: Timestamp,
    pub device_id: u16,
    pub event_mode: u8,
    pub touch: Option<TouchRelease>,
}

impl RequestBody for XIAllowEventsRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write(&self.time);
        w.write_u16(self.device_id);
        w.write_u8(self.event_mode);
        w.write_zeros(1);
        if let Some(touch) = &self.touch {
            w.write_u32(touch.touch_id);
            w.write(&touch.grab_window);
        }
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        if r.remaining() != 8 {
            r.require_exact(16)?;
        }
        let time = r.read()?;
        let device_id = r.read_u16()?;
        let event_mode = r.read_u8()?;
        r.skip(1)?;
        let touch = if r.is_empty() {
            None
        } else {
            Some(TouchRelease {
                touch_id: r.read_u32()?,
                grab_window: r.read()?,
            })
        };
        Ok(XIAllowEventsRequest {
            time,
            device_id,
            event_mode,
            touch,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIPassiveGrabDeviceRequest {
    pub time: Timestamp,
    pub grab_window: Window,
    pub cursor: Cursor,
    pub detail: u32,
    pub device_id: u16,
    /// Button, Keycode, Enter, FocusIn, TouchBegin
    pub grab_type: u8,
    pub grab_mode: u8,
    pub paired_device_mode: u8,
    pub owner_events: bool,
    pub mask: Vec<u32>,
    pub modifiers: Vec<u32>,
}

impl RequestBody for XIPassiveGrabDeviceRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let mask = clamp_u16(&self.mask);
        let modifiers = clamp_u16(&self.modifiers);
        w.write(&self.time);
        w.write(&self.grab_window);
        w.write(&self.cursor);
        w.write_u32(self.detail);
        w.write_u16(self.device_id);
        w.write_u16(modifiers.len() as u16);
        w.write_u16(mask.len() as u16);
        w.write_u8(self.grab_type);
        w.write_u8(self.grab_mode);
        w.write_u8(self.paired_device_mode);
        w.write_bool(self.owner_events);
        w.write_zeros(2);
        w.write_list(mask);
        w.write_list(modifiers);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(28)?;
        let time = r.read()?;
        let grab_window = r.read()?;
        let cursor = r.read()?;
        let detail = r.read_u32()?;
        let device_id = r.read_u16()?;
        let num_modifiers = r.read_u16()? as usize;
        let mask_len = r.read_u16()? as usize;
        let grab_type = r.read_u8()?;
        let grab_mode = r.read_u8()?;
        let paired_device_mode = r.read_u8()?;
        let owner_events = r.read_bool()?;
        r.skip(2)?;
        r.require_exact(list_bytes(mask_len + num_modifiers, 4)?)?;
        Ok(XIPassiveGrabDeviceRequest {
            time,
            grab_window,
            cursor,
            detail,
            device_id,
            grab_type,
            grab_mode,
            paired_device_mode,
            owner_events,
            mask: r.read_list(mask_len)?,
            modifiers: r.read_list(num_modifiers)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIPassiveUngrabDeviceRequest {
    pub grab_window: Window,
    pub detail: u32,
    pub device_id: u16,
    pub grab_type: u8,
    pub modifiers: Vec<u32>,
}

impl RequestBody for XIPassiveUngrabDeviceRequest {
    fn write_body(&self, w: &mut WireWriter) {
        let modifiers = clamp_u16(&self.modifiers);
        w.write(&self.grab_window);
        w.write_u32(self.detail);
        w.write_u16(self.device_id);
        w.write_u16(modifiers.len() as u16);
        w.write_u8(self.grab_type);
        w.write_zeros(3);
        w.write_list(modifiers);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(16)?;
        let grab_window = r.read()?;
        let detail = r.read_u32()?;
        let device_id = r.read_u16()?;
        let count = r.read_u16()? as usize;
        let grab_type = r.read_u8()?;
        r.skip(3)?;
        r.require_exact(list_bytes(count, 4)?)?;
        Ok(XIPassiveUngrabDeviceRequest {
            grab_window,
            detail,
            device_id,
            grab_type,
            modifiers: r.read_list(count)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIListPropertiesRequest {
    pub device_id: u16,
}

fixed_request!(XIListPropertiesRequest, 4, { device_id });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIChangePropertyRequest {
    pub device_id: u16,
    pub mode: u8,
    pub format: u8,
    pub property: Atom,
    pub type_: Atom,
    pub data: Vec<u8>,
}

impl RequestBody for XIChangePropertyRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u16(self.device_id);
        w.write_u8(self.mode);
        w.write_u8(self.format);
        w.write(&self.property);
        w.write(&self.type_);
        w.write_u32(format_units(self.format, self.data.len()));
        w.write_padded_bytes(&self.data);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(16)?;
        let device_id = r.read_u16()?;
        let mode = r.read_u8()?;
        let format = r.read_u8()?;
        let unit = format_unit_size(format)?;
        let property = r.read()?;
        let type_ = r.read()?;
        let len = list_bytes(r.read_u32()? as usize, unit)?;
        r.require_exact(padded_len(len))?;
        Ok(XIChangePropertyRequest {
            device_id,
            mode,
            format,
            property,
            type_,
            data: r.read_padded_bytes(len)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIDeletePropertyRequest {
    pub device_id: u16,
    pub property: Atom,
}

impl RequestBody for XIDeletePropertyRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u16(self.device_id);
        w.write_zeros(2);
        w.write(&self.property);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_exact(8)?;
        let device_id = r.read_u16()?;
        r.skip(2)?;
        Ok(XIDeletePropertyRequest {
            device_id,
            property: r.read()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIGetPropertyRequest {
    pub device_id: u16,
    pub delete: bool,
    pub property: Atom,
    pub type_: Atom,
    pub offset: u32,
    pub len: u32,
}

impl RequestBody for XIGetPropertyRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u16(self.device_id);
        w.write_bool(self.delete);
        w.write_zeros(1);
        w.write(&self.property);
        w.write(&self.type_);
        w.write_u32(self.offset);
        w.write_u32(self.len);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_exact(20)?;
        let device_id = r.read_u16()?;
        let delete = r.read_bool()?;
        r.skip(1)?;
        Ok(XIGetPropertyRequest {
            device_id,
            delete,
            property: r.read()?,
            type_: r.read()?,
            offset: r.read_u32()?,
            len: r.read_u32()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIGetSelectedEventsRequest {
    pub window: Window,
}

fixed_request!(XIGetSelectedEventsRequest, 4, { window });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XIBarrierReleasePointerRequest {
    pub barriers: Vec<BarrierReleaseInfo>,
}

impl RequestBody for XIBarrierReleasePointerRequest {
    fn write_body(&self, w: &mut WireWriter) {
        w.write_u32(self.barriers.len() as u32);
        w.write_list(&self.barriers);
    }

    fn read_body(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.require_min(4)?;
        let count = r.read_u32()? as usize;
        r.require_exact(list_bytes(count, 12)?)?;
        Ok(XIBarrierReleasePointerRequest {
            barriers: r.read_list(count)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::errors::ErrorCode;

    fn body<T: RequestBody>(request: &T, order: ByteOrder) -> Vec<u8> {
        let mut w = WireWriter::new(order);
        request.write_body(&mut w);
        w.into_bytes()
    }

    #[test]
    fn test_fp1616() {
        assert_eq!(Fp1616::from_f64(1.5).0, 0x18000);
        assert_eq!(Fp1616(-0x8000).to_f64(), -0.5);
    }

    #[test]
    fn test_event_mask_bits() {
        let mut mask = EventMask {
            device_id: 2,
            mask: vec![],
        };
        mask.set(2);
        mask.set(33);
        assert_eq!(mask.mask, vec![0b100, 0b10]);
        assert!(mask.is_set(33));
        assert!(!mask.is_set(3));
        assert!(!mask.is_set(100));
    }

    #[test]
    fn test_warp_pointer_is_32_bytes() {
        let req = XIWarpPointerRequest {
            dst_x: Fp1616::from_f64(10.0),
            device_id: 2,
            ..Default::default()
        };
        let bytes = body(&req, ByteOrder::LSBFirst);
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[28..30], &[2, 0]);
        let mut r = WireReader::new(&bytes, ByteOrder::LSBFirst);
        assert_eq!(XIWarpPointerRequest::read_body(0, &mut r).unwrap(), req);
    }

    #[test]
    fn test_hierarchy_changes() {
        let order = ByteOrder::MSBFirst;
        let req = XIChangeHierarchyRequest {
            changes: vec![
                HierarchyChange::AttachSlave {
                    device_id: 6,
                    master: 2,
                },
                HierarchyChange::DetachSlave { device_id: 7 },
            ],
        };
        let bytes = body(&req, order);
        assert_eq!(bytes.len(), 20);
        let mut r = WireReader::new(&bytes, order);
        assert_eq!(XIChangeHierarchyRequest::read_body(0, &mut r).unwrap(), req);
    }

    #[test]
    fn test_add_master_is_implementation_error() {
        let order = ByteOrder::LSBFirst;
        // One AddMaster record: type 1, 3 words, name "ab"
        let bytes = [1, 0, 0, 0, 1, 0, 3, 0, 2, 0, 1, 1, b'a', b'b', 0, 0];
        let mut r = WireReader::new(&bytes, order);
        let err = XIChangeHierarchyRequest::read_body(0, &mut r).unwrap_err();
        assert_eq!(err.code, ErrorCode::Implementation);
        assert_eq!(err.bad_value, 1);
    }

    #[test]
    fn test_unknown_hierarchy_type_is_value_error() {
        let bytes = [1, 0, 0, 0, 9, 0, 2, 0, 0, 0, 0, 0];
        let mut r = WireReader::new(&bytes, ByteOrder::LSBFirst);
        let err = XIChangeHierarchyRequest::read_body(0, &mut r).unwrap_err();
        assert_eq!(err.code, ErrorCode::Value);
        assert_eq!(err.bad_value, 9);
    }

    #[test]
    fn test_passive_grab_lists() {
        let order = ByteOrder::LSBFirst;
        let req = XIPassiveGrabDeviceRequest {
            detail: 1,
            device_id: 3,
            owner_events: true,
            mask: vec![0x4],
            modifiers: vec![0, 0x80000000],
            ..Default::default()
        };
        let bytes = body(&req, order);
        assert_eq!(bytes.len(), 28 + 12);
        let mut r = WireReader::new(&bytes, order);
        assert_eq!(XIPassiveGrabDeviceRequest::read_body(0, &mut r).unwrap(), req);

        let mut r = WireReader::new(&bytes[..36], order);
        let err = XIPassiveGrabDeviceRequest::read_body(0, &mut r).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_query_pointer_request() {
        let order = ByteOrder::MSBFirst;
        let req = XIQueryPointerRequest {
            window: Window::new(0x400001),
            device_id: 2,
        };
        let bytes = body(&req, order);
        assert_eq!(bytes, [0, 0x40, 0, 1, 0, 2, 0, 0]);
        let mut r = WireReader::new(&bytes, order);
        assert_eq!(XIQueryPointerRequest::read_body(0, &mut r).unwrap(), req);
    }

    #[test]
    fn test_grab_device_mask() {
        let order = ByteOrder::LSBFirst;
        let req = XIGrabDeviceRequest {
            grab_window: Window::new(0x25),
            time: Timestamp::CURRENT_TIME,
            cursor: Cursor::NONE,
            device_id: 3,
            grab_mode: 1,
            paired_device_mode: 1,
            owner_events: false,
            mask: vec![0x1c],
        };
        let bytes = body(&req, order);
        assert_eq!(bytes.len(), 24);
        assert_eq!(&bytes[12..20], &[3, 0, 1, 1, 0, 0, 1, 0]);
        let mut r = WireReader::new(&bytes, order);
        assert_eq!(XIGrabDeviceRequest::read_body(0, &mut r).unwrap(), req);

        let mut r = WireReader::new(&bytes[..20], order);
        let err = XIGrabDeviceRequest::read_body(0, &mut r).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_allow_events_both_forms() {
        let order = ByteOrder::LSBFirst;
        let plain = XIAllowEventsRequest {
            time: Timestamp::new(100),
            device_id: 2,
            event_mode: 6,
            touch: None,
        };
        let bytes = body(&plain, order);
        assert_eq!(bytes.len(), 8);
        let mut r = WireReader::new(&bytes, order);
        assert_eq!(XIAllowEventsRequest::read_body(0, &mut r).unwrap(), plain);

        let touch = XIAllowEventsRequest {
            touch: Some(TouchRelease {
                touch_id: 77,
                grab_window: Window::new(0x25),
            }),
            ..plain
        };
        let bytes = body(&touch, order);
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[8..12], &[77, 0, 0, 0]);
        let mut r = WireReader::new(&bytes, order);
        assert_eq!(XIAllowEventsRequest::read_body(0, &mut r).unwrap(), touch);

        let zeros = [0u8; 20];
        for len in [4, 12, 20] {
            let mut r = WireReader::new(&zeros[..len], order);
            let err = XIAllowEventsRequest::read_body(0, &mut r).unwrap_err();
            assert_eq!(err.code, ErrorCode::Length, "len {}", len);
        }
    }

    #[test]
    fn test_hierarchy_count_is_clamped() {
        let order = ByteOrder::LSBFirst;
        let req = XIChangeHierarchyRequest {
            changes: vec![HierarchyChange::DetachSlave { device_id: 8 }; 300],
        };
        let bytes = body(&req, order);
        assert_eq!(bytes[0], 255);
        assert_eq!(bytes.len(), 4 + 255 * 8);
        let mut r = WireReader::new(&bytes, order);
        let decoded = XIChangeHierarchyRequest::read_body(0, &mut r).unwrap();
        assert_eq!(decoded.changes, req.changes[..255]);
    }

    #[test]
    fn test_event_mask_length_is_clamped() {
        let order = ByteOrder::MSBFirst;
        let mask = EventMask {
            device_id: 1,
            mask: vec![u32::MAX; 70_000],
        };
        let mut w = WireWriter::new(order);
        mask.write_to(&mut w);
        let bytes = w.into_bytes();
        assert_eq!(&bytes[2..4], &[0xff, 0xff]);
        assert_eq!(bytes.len(), 4 + 4 * 65535);
        let decoded: EventMask = WireReader::new(&bytes, order).read().unwrap();
        assert_eq!(decoded.mask.len(), 65535);
    }

    #[test]
    fn test_change_property_padding() {
        let order = ByteOrder::MSBFirst;
        let req = XIChangePropertyRequest {
            device_id: 4,
            format: 8,
            property: Atom::new(300),
            type_: Atom::STRING,
            data: b"hello".to_vec(),
            ..Default::default()
        };
        let bytes = body(&req, order);
        assert_eq!(bytes.len(), 16 + 8);
        assert_eq!(&bytes[12..16], &[0, 0, 0, 5]);
        let mut r = WireReader::new(&bytes, order);
        assert_eq!(XIChangePropertyRequest::read_body(0, &mut r).unwrap(), req);
    }
}
