//! XInputExtension
//!
//! Requests carry their minor opcode in byte 1 of the request header, and
//! replies echo it in byte 1 of the reply. Minor opcodes this codec does
//! not model are Request errors.

pub mod classes;
pub mod replies;
pub mod requests;
pub mod xi2;

pub use classes::*;
pub use replies::*;
pub use requests::*;
pub use xi2::*;

use super::XINPUT_MAJOR_OPCODE;
use crate::protocol::errors::{X11Error, X11Result};
use crate::protocol::replies::{encode_reply_with, open_reply_frame, ReplyBody};
use crate::protocol::requests::RequestBody;
use crate::protocol::types::ByteOrder;
use crate::protocol::wire::{WireReader, WireWriter};

/// Highest XInput version this codec speaks
pub const XINPUT_MAJOR_VERSION: u16 = 2;
pub const XINPUT_MINOR_VERSION: u16 = 3;

/// XInput minor opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum XInputOpcode {
    GetExtensionVersion = 1,
    ListInputDevices = 2,
    OpenDevice = 3,
    CloseDevice = 4,
    SetDeviceMode = 5,
    SelectExtensionEvent = 6,
    GetSelectedExtensionEvents = 7,
    ChangeDeviceDontPropagateList = 8,
    GetDeviceDontPropagateList = 9,
    GetDeviceMotionEvents = 10,
    ChangeKeyboardDevice = 11,
    ChangePointerDevice = 12,
    GrabDevice = 13,
    UngrabDevice = 14,
    GrabDeviceKey = 15,
    UngrabDeviceKey = 16,
    GrabDeviceButton = 17,
    UngrabDeviceButton = 18,
    AllowDeviceEvents = 19,
    GetDeviceFocus = 20,
    SetDeviceFocus = 21,
    GetFeedbackControl = 22,
    ChangeFeedbackControl = 23,
    GetDeviceKeyMapping = 24,
    ChangeDeviceKeyMapping = 25,
    GetDeviceModifierMapping = 26,
    SetDeviceModifierMapping = 27,
    GetDeviceButtonMapping = 28,
    SetDeviceButtonMapping = 29,
    QueryDeviceState = 30,
    SendExtensionEvent = 31,
    DeviceBell = 32,
    SetDeviceValuators = 33,
    GetDeviceControl = 34,
    ChangeDeviceControl = 35,
    ListDeviceProperties = 36,
    ChangeDeviceProperty = 37,
    DeleteDeviceProperty = 38,
    GetDeviceProperty = 39,
    XIQueryPointer = 40,
    XIWarpPointer = 41,
    XIChangeCursor = 42,
    XIChangeHierarchy = 43,
    XISetClientPointer = 44,
    XIGetClientPointer = 45,
    XISelectEvents = 46,
    XIQueryVersion = 47,
    XISetFocus = 49,
    XIGetFocus = 50,
    XIGrabDevice = 51,
    XIUngrabDevice = 52,
    XIAllowEvents = 53,
    XIPassiveGrabDevice = 54,
    XIPassiveUngrabDevice = 55,
    XIListProperties = 56,
    XIChangeProperty = 57,
    XIDeleteProperty = 58,
    XIGetProperty = 59,
    XIGetSelectedEvents = 60,
    XIBarrierReleasePointer = 61,
}

impl XInputOpcode {
    const TABLE: [XInputOpcode; 60] = [
        XInputOpcode::GetExtensionVersion,
        XInputOpcode::ListInputDevices,
        XInputOpcode::OpenDevice,
        XInputOpcode::CloseDevice,
        XInputOpcode::SetDeviceMode,
        XInputOpcode::SelectExtensionEvent,
        XInputOpcode::GetSelectedExtensionEvents,
        XInputOpcode::ChangeDeviceDontPropagateList,
        XInputOpcode::GetDeviceDontPropagateList,
        XInputOpcode::GetDeviceMotionEvents,
        XInputOpcode::ChangeKeyboardDevice,
        XInputOpcode::ChangePointerDevice,
        XInputOpcode::GrabDevice,
        XInputOpcode::UngrabDevice,
        XInputOpcode::GrabDeviceKey,
        XInputOpcode::UngrabDeviceKey,
        XInputOpcode::GrabDeviceButton,
        XInputOpcode::UngrabDeviceButton,
        XInputOpcode::AllowDeviceEvents,
        XInputOpcode::GetDeviceFocus,
        XInputOpcode::SetDeviceFocus,
        XInputOpcode::GetFeedbackControl,
        XInputOpcode::ChangeFeedbackControl,
        XInputOpcode::GetDeviceKeyMapping,
        XInputOpcode::ChangeDeviceKeyMapping,
        XInputOpcode::GetDeviceModifierMapping,
        XInputOpcode::SetDeviceModifierMapping,
        XInputOpcode::GetDeviceButtonMapping,
        XInputOpcode::SetDeviceButtonMapping,
        XInputOpcode::QueryDeviceState,
        XInputOpcode::SendExtensionEvent,
        XInputOpcode::DeviceBell,
        XInputOpcode::SetDeviceValuators,
        XInputOpcode::GetDeviceControl,
        XInputOpcode::ChangeDeviceControl,
        XInputOpcode::ListDeviceProperties,
        XInputOpcode::ChangeDeviceProperty,
        XInputOpcode::DeleteDeviceProperty,
        XInputOpcode::GetDeviceProperty,
        XInputOpcode::XIQueryPointer,
        XInputOpcode::XIWarpPointer,
        XInputOpcode::XIChangeCursor,
        XInputOpcode::XIChangeHierarchy,
        XInputOpcode::XISetClientPointer,
        XInputOpcode::XIGetClientPointer,
        XInputOpcode::XISelectEvents,
        XInputOpcode::XIQueryVersion,
        XInputOpcode::XISetFocus,
        XInputOpcode::XIGetFocus,
        XInputOpcode::XIGrabDevice,
        XInputOpcode::XIUngrabDevice,
        XInputOpcode::XIAllowEvents,
        XInputOpcode::XIPassiveGrabDevice,
        XInputOpcode::XIPassiveUngrabDevice,
        XInputOpcode::XIListProperties,
        XInputOpcode::XIChangeProperty,
        XInputOpcode::XIDeleteProperty,
        XInputOpcode::XIGetProperty,
        XInputOpcode::XIGetSelectedEvents,
        XInputOpcode::XIBarrierReleasePointer,
    ];

    pub fn from_u8(minor: u8) -> Option<Self> {
        Self::TABLE.iter().copied().find(|op| *op as u8 == minor)
    }

    /// Whether the server answers this request with a reply
    pub fn has_reply(self) -> bool {
        use XInputOpcode::*;
        matches!(
            self,
            GetExtensionVersion
                | ListInputDevices
                | OpenDevice
                | SetDeviceMode
                | GetSelectedExtensionEvents
                | GetDeviceDontPropagateList
                | GetDeviceMotionEvents
                | ChangeKeyboardDevice
                | ChangePointerDevice
                | GrabDevice
                | GetDeviceFocus
                | GetFeedbackControl
                | GetDeviceKeyMapping
                | GetDeviceModifierMapping
                | SetDeviceModifierMapping
                | GetDeviceButtonMapping
                | SetDeviceButtonMapping
                | QueryDeviceState
                | SetDeviceValuators
                | GetDeviceControl
                | ChangeDeviceControl
                | ListDeviceProperties
                | GetDeviceProperty
                | XIQueryPointer
                | XIGetClientPointer
                | XIQueryVersion
                | XIGetFocus
                | XIGrabDevice
                | XIPassiveGrabDevice
                | XIListProperties
                | XIGetProperty
                | XIGetSelectedEvents
        )
    }
}

fn unknown_minor() -> X11Error {
    X11Error::bad_request(0, XINPUT_MAJOR_OPCODE)
}

/// A decoded XInput request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XInputRequest {
    GetExtensionVersion(GetExtensionVersionRequest),
    ListInputDevices,
    OpenDevice(DeviceRequest),
    CloseDevice(DeviceRequest),
    SetDeviceMode(SetDeviceModeRequest),
    SelectExtensionEvent(SelectExtensionEventRequest),
    GetSelectedExtensionEvents(WindowRequest),
    ChangeDeviceDontPropagateList(ChangeDeviceDontPropagateListRequest),
    GetDeviceDontPropagateList(WindowRequest),
    GetDeviceMotionEvents(GetDeviceMotionEventsRequest),
    ChangeKeyboardDevice(DeviceRequest),
    ChangePointerDevice(ChangePointerDeviceRequest),
    GrabDevice(GrabDeviceRequest),
    UngrabDevice(UngrabDeviceRequest),
    GrabDeviceKey(GrabDeviceKeyRequest),
    UngrabDeviceKey(UngrabDeviceKeyRequest),
    GrabDeviceButton(GrabDeviceButtonRequest),
    UngrabDeviceButton(UngrabDeviceButtonRequest),
    AllowDeviceEvents(AllowDeviceEventsRequest),
    GetDeviceFocus(DeviceRequest),
    SetDeviceFocus(SetDeviceFocusRequest),
    GetFeedbackControl(DeviceRequest),
    ChangeFeedbackControl(ChangeFeedbackControlRequest),
    GetDeviceKeyMapping(GetDeviceKeyMappingRequest),
    ChangeDeviceKeyMapping(ChangeDeviceKeyMappingRequest),
    GetDeviceModifierMapping(DeviceRequest),
    SetDeviceModifierMapping(SetDeviceModifierMappingRequest),
    GetDeviceButtonMapping(DeviceRequest),
    SetDeviceButtonMapping(SetDeviceButtonMappingRequest),
    QueryDeviceState(DeviceRequest),
    SendExtensionEvent(SendExtensionEventRequest),
    DeviceBell(DeviceBellRequest),
    SetDeviceValuators(SetDeviceValuatorsRequest),
    GetDeviceControl(GetDeviceControlRequest),
    ChangeDeviceControl(ChangeDeviceControlRequest),
    ListDeviceProperties(DeviceRequest),
    ChangeDeviceProperty(ChangeDevicePropertyRequest),
    DeleteDeviceProperty(DeleteDevicePropertyRequest),
    GetDeviceProperty(GetDevicePropertyRequest),
    XIQueryPointer(XIQueryPointerRequest),
    XIWarpPointer(XIWarpPointerRequest),
    XIChangeCursor(XIChangeCursorRequest),
    XIChangeHierarchy(XIChangeHierarchyRequest),
    XISetClientPointer(XISetClientPointerRequest),
    XIGetClientPointer(XIGetClientPointerRequest),
    XISelectEvents(XISelectEventsRequest),
    XIQueryVersion(XIQueryVersionRequest),
    XISetFocus(XISetFocusRequest),
    XIGetFocus(XIGetFocusRequest),
    XIGrabDevice(XIGrabDeviceRequest),
    XIUngrabDevice(XIUngrabDeviceRequest),
    XIAllowEvents(XIAllowEventsRequest),
    XIPassiveGrabDevice(XIPassiveGrabDeviceRequest),
    XIPassiveUngrabDevice(XIPassiveUngrabDeviceRequest),
    XIListProperties(XIListPropertiesRequest),
    XIChangeProperty(XIChangePropertyRequest),
    XIDeleteProperty(XIDeletePropertyRequest),
    XIGetProperty(XIGetPropertyRequest),
    XIGetSelectedEvents(XIGetSelectedEventsRequest),
    XIBarrierReleasePointer(XIBarrierReleasePointerRequest),
}

fn body<T: RequestBody>(r: &mut WireReader<'_>) -> X11Result<T> {
    T::read_body(0, r)
}

impl XInputRequest {
    /// Decode the body of a request with minor opcode `minor`.
    pub fn read_request(minor: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        use XInputOpcode as Op;
        let op = XInputOpcode::from_u8(minor).ok_or_else(unknown_minor)?;
        log::trace!("XInput request {:?} with {} body bytes", op, r.remaining());
        Ok(match op {
            Op::GetExtensionVersion => XInputRequest::GetExtensionVersion(body(r)?),
            Op::ListInputDevices => {
                r.require_exact(0)?;
                XInputRequest::ListInputDevices
            }
            Op::OpenDevice => XInputRequest::OpenDevice(body(r)?),
            Op::CloseDevice => XInputRequest::CloseDevice(body(r)?),
            Op::SetDeviceMode => XInputRequest::SetDeviceMode(body(r)?),
            Op::SelectExtensionEvent => XInputRequest::SelectExtensionEvent(body(r)?),
            Op::GetSelectedExtensionEvents => XInputRequest::GetSelectedExtensionEvents(body(r)?),
            Op::ChangeDeviceDontPropagateList => {
                XInputRequest::ChangeDeviceDontPropagateList(body(r)?)
            }
            Op::GetDeviceDontPropagateList => XInputRequest::GetDeviceDontPropagateList(body(r)?),
            Op::GetDeviceMotionEvents => XInputRequest::GetDeviceMotionEvents(body(r)?),
            Op::ChangeKeyboardDevice => XInputRequest::ChangeKeyboardDevice(body(r)?),
            Op::ChangePointerDevice => XInputRequest::ChangePointerDevice(body(r)?),
            Op::GrabDevice => XInputRequest::GrabDevice(body(r)?),
            Op::UngrabDevice => XInputRequest::UngrabDevice(body(r)?),
            Op::GrabDeviceKey => XInputRequest::GrabDeviceKey(body(r)?),
            Op::UngrabDeviceKey => XInputRequest::UngrabDeviceKey(body(r)?),
            Op::GrabDeviceButton => XInputRequest::GrabDeviceButton(body(r)?),
            Op::UngrabDeviceButton => XInputRequest::UngrabDeviceButton(body(r)?),
            Op::AllowDeviceEvents => XInputRequest::AllowDeviceEvents(body(r)?),
            Op::GetDeviceFocus => XInputRequest::GetDeviceFocus(body(r)?),
            Op::SetDeviceFocus => XInputRequest::SetDeviceFocus(body(r)?),
            Op::GetFeedbackControl => XInputRequest::GetFeedbackControl(body(r)?),
            Op::ChangeFeedbackControl => XInputRequest::ChangeFeedbackControl(body(r)?),
            Op::GetDeviceKeyMapping => XInputRequest::GetDeviceKeyMapping(body(r)?),
            Op::ChangeDeviceKeyMapping => XInputRequest::ChangeDeviceKeyMapping(body(r)?),
            Op::GetDeviceModifierMapping => XInputRequest::GetDeviceModifierMapping(body(r)?),
            Op::SetDeviceModifierMapping => XInputRequest::SetDeviceModifierMapping(body(r)?),
            Op::GetDeviceButtonMapping => XInputRequest::GetDeviceButtonMapping(body(r)?),
            Op::SetDeviceButtonMapping => XInputRequest::SetDeviceButtonMapping(body(r)?),
            Op::QueryDeviceState => XInputRequest::QueryDeviceState(body(r)?),
            Op::SendExtensionEvent => XInputRequest::SendExtensionEvent(body(r)?),
            Op::DeviceBell => XInputRequest::DeviceBell(body(r)?),
            Op::SetDeviceValuators => XInputRequest::SetDeviceValuators(body(r)?),
            Op::GetDeviceControl => XInputRequest::GetDeviceControl(body(r)?),
            Op::ChangeDeviceControl => XInputRequest::ChangeDeviceControl(body(r)?),
            Op::ListDeviceProperties => XInputRequest::ListDeviceProperties(body(r)?),
            Op::ChangeDeviceProperty => XInputRequest::ChangeDeviceProperty(body(r)?),
            Op::DeleteDeviceProperty => XInputRequest::DeleteDeviceProperty(body(r)?),
            Op::GetDeviceProperty => XInputRequest::GetDeviceProperty(body(r)?),
            Op::XIQueryPointer => XInputRequest::XIQueryPointer(body(r)?),
            Op::XIWarpPointer => XInputRequest::XIWarpPointer(body(r)?),
            Op::XIChangeCursor => XInputRequest::XIChangeCursor(body(r)?),
            Op::XIChangeHierarchy => XInputRequest::XIChangeHierarchy(body(r)?),
            Op::XISetClientPointer => XInputRequest::XISetClientPointer(body(r)?),
            Op::XIGetClientPointer => XInputRequest::XIGetClientPointer(body(r)?),
            Op::XISelectEvents => XInputRequest::XISelectEvents(body(r)?),
            Op::XIQueryVersion => XInputRequest::XIQueryVersion(body(r)?),
            Op::XISetFocus => XInputRequest::XISetFocus(body(r)?),
            Op::XIGetFocus => XInputRequest::XIGetFocus(body(r)?),
            Op::XIGrabDevice => XInputRequest::XIGrabDevice(body(r)?),
            Op::XIUngrabDevice => XInputRequest::XIUngrabDevice(body(r)?),
            Op::XIAllowEvents => XInputRequest::XIAllowEvents(body(r)?),
            Op::XIPassiveGrabDevice => XInputRequest::XIPassiveGrabDevice(body(r)?),
            Op::XIPassiveUngrabDevice => XInputRequest::XIPassiveUngrabDevice(body(r)?),
            Op::XIListProperties => XInputRequest::XIListProperties(body(r)?),
            Op::XIChangeProperty => XInputRequest::XIChangeProperty(body(r)?),
            Op::XIDeleteProperty => XInputRequest::XIDeleteProperty(body(r)?),
            Op::XIGetProperty => XInputRequest::XIGetProperty(body(r)?),
            Op::XIGetSelectedEvents => XInputRequest::XIGetSelectedEvents(body(r)?),
            Op::XIBarrierReleasePointer => XInputRequest::XIBarrierReleasePointer(body(r)?),
        })
    }

    pub fn opcode(&self) -> XInputOpcode {
        use XInputOpcode as Op;
        match self {
            XInputRequest::GetExtensionVersion(_) => Op::GetExtensionVersion,
            XInputRequest::ListInputDevices => Op::ListInputDevices,
            XInputRequest::OpenDevice(_) => Op::OpenDevice,
            XInputRequest::CloseDevice(_) => Op::CloseDevice,
            XInputRequest::SetDeviceMode(_) => Op::SetDeviceMode,
            XInputRequest::SelectExtensionEvent(_) => Op::SelectExtensionEvent,
            XInputRequest::GetSelectedExtensionEvents(_) => Op::GetSelectedExtensionEvents,
            XInputRequest::ChangeDeviceDontPropagateList(_) => Op::ChangeDeviceDontPropagateList,
            XInputRequest::GetDeviceDontPropagateList(_) => Op::GetDeviceDontPropagateList,
            XInputRequest::GetDeviceMotionEvents(_) => Op::GetDeviceMotionEvents,
            XInputRequest::ChangeKeyboardDevice(_) => Op::ChangeKeyboardDevice,
            XInputRequest::ChangePointerDevice(_) => Op::ChangePointerDevice,
            XInputRequest::GrabDevice(_) => Op::GrabDevice,
            XInputRequest::UngrabDevice(_) => Op::UngrabDevice,
            XInputRequest::GrabDeviceKey(_) => Op::GrabDeviceKey,
            XInputRequest::UngrabDeviceKey(_) => Op::UngrabDeviceKey,
            XInputRequest::GrabDeviceButton(_) => Op::GrabDeviceButton,
            XInputRequest::UngrabDeviceButton(_) => Op::UngrabDeviceButton,
            XInputRequest::AllowDeviceEvents(_) => Op::AllowDeviceEvents,
            XInputRequest::GetDeviceFocus(_) => Op::GetDeviceFocus,
            XInputRequest::SetDeviceFocus(_) => Op::SetDeviceFocus,
            XInputRequest::GetFeedbackControl(_) => Op::GetFeedbackControl,
            XInputRequest::ChangeFeedbackControl(_) => Op::ChangeFeedbackControl,
            XInputRequest::GetDeviceKeyMapping(_) => Op::GetDeviceKeyMapping,
            XInputRequest::ChangeDeviceKeyMapping(_) => Op::ChangeDeviceKeyMapping,
            XInputRequest::GetDeviceModifierMapping(_) => Op::GetDeviceModifierMapping,
            XInputRequest::SetDeviceModifierMapping(_) => Op::SetDeviceModifierMapping,
            XInputRequest::GetDeviceButtonMapping(_) => Op::GetDeviceButtonMapping,
            XInputRequest::SetDeviceButtonMapping(_) => Op::SetDeviceButtonMapping,
            XInputRequest::QueryDeviceState(_) => Op::QueryDeviceState,
            XInputRequest::SendExtensionEvent(_) => Op::SendExtensionEvent,
            XInputRequest::DeviceBell(_) => Op::DeviceBell,
            XInputRequest::SetDeviceValuators(_) => Op::SetDeviceValuators,
            XInputRequest::GetDeviceControl(_) => Op::GetDeviceControl,
            XInputRequest::ChangeDeviceControl(_) => Op::ChangeDeviceControl,
            XInputRequest::ListDeviceProperties(_) => Op::ListDeviceProperties,
            XInputRequest::ChangeDeviceProperty(_) => Op::ChangeDeviceProperty,
            XInputRequest::DeleteDeviceProperty(_) => Op::DeleteDeviceProperty,
            XInputRequest::GetDeviceProperty(_) => Op::GetDeviceProperty,
            XInputRequest::XIQueryPointer(_) => Op::XIQueryPointer,
            XInputRequest::XIWarpPointer(_) => Op::XIWarpPointer,
            XInputRequest::XIChangeCursor(_) => Op::XIChangeCursor,
            XInputRequest::XIChangeHierarchy(_) => Op::XIChangeHierarchy,
            XInputRequest::XISetClientPointer(_) => Op::XISetClientPointer,
            XInputRequest::XIGetClientPointer(_) => Op::XIGetClientPointer,
            XInputRequest::XISelectEvents(_) => Op::XISelectEvents,
            XInputRequest::XIQueryVersion(_) => Op::XIQueryVersion,
            XInputRequest::XISetFocus(_) => Op::XISetFocus,
            XInputRequest::XIGetFocus(_) => Op::XIGetFocus,
            XInputRequest::XIGrabDevice(_) => Op::XIGrabDevice,
            XInputRequest::XIUngrabDevice(_) => Op::XIUngrabDevice,
            XInputRequest::XIAllowEvents(_) => Op::XIAllowEvents,
            XInputRequest::XIPassiveGrabDevice(_) => Op::XIPassiveGrabDevice,
            XInputRequest::XIPassiveUngrabDevice(_) => Op::XIPassiveUngrabDevice,
            XInputRequest::XIListProperties(_) => Op::XIListProperties,
            XInputRequest::XIChangeProperty(_) => Op::XIChangeProperty,
            XInputRequest::XIDeleteProperty(_) => Op::XIDeleteProperty,
            XInputRequest::XIGetProperty(_) => Op::XIGetProperty,
            XInputRequest::XIGetSelectedEvents(_) => Op::XIGetSelectedEvents,
            XInputRequest::XIBarrierReleasePointer(_) => Op::XIBarrierReleasePointer,
        }
    }

    pub fn minor_opcode(&self) -> u8 {
        self.opcode() as u8
    }

    pub fn has_reply(&self) -> bool {
        self.opcode().has_reply()
    }

    /// Write the request body (everything after the 4-byte header).
    pub fn write_body(&self, w: &mut WireWriter) {
        match self {
            XInputRequest::ListInputDevices => {}
            XInputRequest::GetExtensionVersion(req) => req.write_body(w),
            XInputRequest::OpenDevice(req)
            | XInputRequest::CloseDevice(req)
            | XInputRequest::GetDeviceFocus(req)
            | XInputRequest::GetFeedbackControl(req)
            | XInputRequest::GetDeviceModifierMapping(req)
            | XInputRequest::GetDeviceButtonMapping(req)
            | XInputRequest::QueryDeviceState(req)
            | XInputRequest::ListDeviceProperties(req)
            | XInputRequest::ChangeKeyboardDevice(req) => req.write_body(w),
            XInputRequest::ChangePointerDevice(req) => req.write_body(w),
            XInputRequest::SetDeviceMode(req) => req.write_body(w),
            XInputRequest::SelectExtensionEvent(req) => req.write_body(w),
            XInputRequest::GetSelectedExtensionEvents(req)
            | XInputRequest::GetDeviceDontPropagateList(req) => req.write_body(w),
            XInputRequest::ChangeDeviceDontPropagateList(req) => req.write_body(w),
            XInputRequest::GetDeviceMotionEvents(req) => req.write_body(w),
            XInputRequest::GrabDevice(req) => req.write_body(w),
            XInputRequest::UngrabDevice(req) => req.write_body(w),
            XInputRequest::GrabDeviceKey(req) => req.write_body(w),
            XInputRequest::UngrabDeviceKey(req) => req.write_body(w),
            XInputRequest::GrabDeviceButton(req) => req.write_body(w),
            XInputRequest::UngrabDeviceButton(req) => req.write_body(w),
            XInputRequest::AllowDeviceEvents(req) => req.write_body(w),
            XInputRequest::SetDeviceFocus(req) => req.write_body(w),
            XInputRequest::ChangeFeedbackControl(req) => req.write_body(w),
            XInputRequest::GetDeviceKeyMapping(req) => req.write_body(w),
            XInputRequest::ChangeDeviceKeyMapping(req) => req.write_body(w),
            XInputRequest::SetDeviceModifierMapping(req) => req.write_body(w),
            XInputRequest::SetDeviceButtonMapping(req) => req.write_body(w),
            XInputRequest::SendExtensionEvent(req) => req.write_body(w),
            XInputRequest::DeviceBell(req) => req.write_body(w),
            XInputRequest::SetDeviceValuators(req) => req.write_body(w),
            XInputRequest::GetDeviceControl(req) => req.write_body(w),
            XInputRequest::ChangeDeviceControl(req) => req.write_body(w),
            XInputRequest::ChangeDeviceProperty(req) => req.write_body(w),
            XInputRequest::DeleteDeviceProperty(req) => req.write_body(w),
            XInputRequest::GetDeviceProperty(req) => req.write_body(w),
            XInputRequest::XIQueryPointer(req) => req.write_body(w),
            XInputRequest::XIWarpPointer(req) => req.write_body(w),
            XInputRequest::XIChangeCursor(req) => req.write_body(w),
            XInputRequest::XIChangeHierarchy(req) => req.write_body(w),
            XInputRequest::XISetClientPointer(req) => req.write_body(w),
            XInputRequest::XIGetClientPointer(req) => req.write_body(w),
            XInputRequest::XISelectEvents(req) => req.write_body(w),
            XInputRequest::XIQueryVersion(req) => req.write_body(w),
            XInputRequest::XISetFocus(req) => req.write_body(w),
            XInputRequest::XIGetFocus(req) => req.write_body(w),
            XInputRequest::XIGrabDevice(req) => req.write_body(w),
            XInputRequest::XIUngrabDevice(req) => req.write_body(w),
            XInputRequest::XIAllowEvents(req) => req.write_body(w),
            XInputRequest::XIPassiveGrabDevice(req) => req.write_body(w),
            XInputRequest::XIPassiveUngrabDevice(req) => req.write_body(w),
            XInputRequest::XIListProperties(req) => req.write_body(w),
            XInputRequest::XIChangeProperty(req) => req.write_body(w),
            XInputRequest::XIDeleteProperty(req) => req.write_body(w),
            XInputRequest::XIGetProperty(req) => req.write_body(w),
            XInputRequest::XIGetSelectedEvents(req) => req.write_body(w),
            XInputRequest::XIBarrierReleasePointer(req) => req.write_body(w),
        }
    }
}

/// A decoded XInput reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XInputReply {
    GetExtensionVersion(GetExtensionVersionReply),
    ListInputDevices(ListInputDevicesReply),
    OpenDevice(OpenDeviceReply),
    SetDeviceMode(DeviceStatusReply),
    GetSelectedExtensionEvents(GetSelectedExtensionEventsReply),
    GetDeviceDontPropagateList(GetDeviceDontPropagateListReply),
    GetDeviceMotionEvents(GetDeviceMotionEventsReply),
    ChangeKeyboardDevice(DeviceStatusReply),
    ChangePointerDevice(DeviceStatusReply),
    GrabDevice(DeviceStatusReply),
    GetDeviceFocus(GetDeviceFocusReply),
    GetFeedbackControl(GetFeedbackControlReply),
    GetDeviceKeyMapping(GetDeviceKeyMappingReply),
    GetDeviceModifierMapping(GetDeviceModifierMappingReply),
    SetDeviceModifierMapping(DeviceStatusReply),
    GetDeviceButtonMapping(GetDeviceButtonMappingReply),
    SetDeviceButtonMapping(DeviceStatusReply),
    QueryDeviceState(QueryDeviceStateReply),
    SetDeviceValuators(DeviceStatusReply),
    GetDeviceControl(GetDeviceControlReply),
    ChangeDeviceControl(DeviceStatusReply),
    ListDeviceProperties(ListDevicePropertiesReply),
    GetDeviceProperty(GetDevicePropertyReply),
    XIQueryPointer(XIQueryPointerReply),
    XIGetClientPointer(XIGetClientPointerReply),
    XIQueryVersion(XIQueryVersionReply),
    XIGetFocus(XIGetFocusReply),
    XIGrabDevice(DeviceStatusReply),
    XIPassiveGrabDevice(XIPassiveGrabDeviceReply),
    XIListProperties(ListDevicePropertiesReply),
    XIGetProperty(XIGetPropertyReply),
    XIGetSelectedEvents(XIGetSelectedEventsReply),
}

/// Decode a reply whose byte 1 must echo `minor`.
fn decode_body<T: ReplyBody>(minor: u8, bytes: &[u8], order: ByteOrder) -> X11Result<(u16, T)> {
    let (detail, sequence, mut r) = open_reply_frame(bytes, order)?;
    if detail != minor {
        log::debug!(
            "XInput reply seq={} carries minor {} but {} was expected",
            sequence,
            detail,
            minor
        );
        return Err(X11Error::bad_value(sequence, detail as u32, 0));
    }
    let body = T::read_fields(detail, &mut r).map_err(|e| e.with_sequence(sequence))?;
    Ok((sequence, body))
}

fn wrap<T: ReplyBody>(
    minor: u8,
    bytes: &[u8],
    order: ByteOrder,
    variant: fn(T) -> XInputReply,
) -> X11Result<(u16, XInputReply)> {
    let (sequence, body) = decode_body(minor, bytes, order)?;
    Ok((sequence, variant(body)))
}

impl XInputReply {
    /// Decode a reply to the request with minor opcode `minor`.
    pub fn decode(minor: u16, bytes: &[u8], order: ByteOrder) -> X11Result<(u16, Self)> {
        use XInputOpcode as Op;
        let op = u8::try_from(minor)
            .ok()
            .and_then(XInputOpcode::from_u8)
            .ok_or_else(unknown_minor)?;
        let m = op as u8;
        match op {
            Op::GetExtensionVersion => wrap(m, bytes, order, XInputReply::GetExtensionVersion),
            Op::ListInputDevices => wrap(m, bytes, order, XInputReply::ListInputDevices),
            Op::OpenDevice => wrap(m, bytes, order, XInputReply::OpenDevice),
            Op::SetDeviceMode => wrap(m, bytes, order, XInputReply::SetDeviceMode),
            Op::GetSelectedExtensionEvents => {
                wrap(m, bytes, order, XInputReply::GetSelectedExtensionEvents)
            }
            Op::GetDeviceDontPropagateList => {
                wrap(m, bytes, order, XInputReply::GetDeviceDontPropagateList)
            }
            Op::GetDeviceMotionEvents => wrap(m, bytes, order, XInputReply::GetDeviceMotionEvents),
            Op::ChangeKeyboardDevice => wrap(m, bytes, order, XInputReply::ChangeKeyboardDevice),
            Op::ChangePointerDevice => wrap(m, bytes, order, XInputReply::ChangePointerDevice),
            Op::GrabDevice => wrap(m, bytes, order, XInputReply::GrabDevice),
            Op::GetDeviceFocus => wrap(m, bytes, order, XInputReply::GetDeviceFocus),
            Op::GetFeedbackControl => wrap(m, bytes, order, XInputReply::GetFeedbackControl),
            Op::GetDeviceKeyMapping => wrap(m, bytes, order, XInputReply::GetDeviceKeyMapping),
            Op::GetDeviceModifierMapping => {
                wrap(m, bytes, order, XInputReply::GetDeviceModifierMapping)
            }
            Op::SetDeviceModifierMapping => {
                wrap(m, bytes, order, XInputReply::SetDeviceModifierMapping)
            }
            Op::GetDeviceButtonMapping => {
                wrap(m, bytes, order, XInputReply::GetDeviceButtonMapping)
            }
            Op::SetDeviceButtonMapping => {
                wrap(m, bytes, order, XInputReply::SetDeviceButtonMapping)
            }
            Op::QueryDeviceState => wrap(m, bytes, order, XInputReply::QueryDeviceState),
            Op::SetDeviceValuators => wrap(m, bytes, order, XInputReply::SetDeviceValuators),
            Op::GetDeviceControl => wrap(m, bytes, order, XInputReply::GetDeviceControl),
            Op::ChangeDeviceControl => wrap(m, bytes, order, XInputReply::ChangeDeviceControl),
            Op::ListDeviceProperties => wrap(m, bytes, order, XInputReply::ListDeviceProperties),
            Op::GetDeviceProperty => wrap(m, bytes, order, XInputReply::GetDeviceProperty),
            Op::XIQueryPointer => wrap(m, bytes, order, XInputReply::XIQueryPointer),
            Op::XIGetClientPointer => wrap(m, bytes, order, XInputReply::XIGetClientPointer),
            Op::XIQueryVersion => wrap(m, bytes, order, XInputReply::XIQueryVersion),
            Op::XIGetFocus => wrap(m, bytes, order, XInputReply::XIGetFocus),
            Op::XIGrabDevice => wrap(m, bytes, order, XInputReply::XIGrabDevice),
            Op::XIPassiveGrabDevice => wrap(m, bytes, order, XInputReply::XIPassiveGrabDevice),
            Op::XIListProperties => wrap(m, bytes, order, XInputReply::XIListProperties),
            Op::XIGetProperty => wrap(m, bytes, order, XInputReply::XIGetProperty),
            Op::XIGetSelectedEvents => wrap(m, bytes, order, XInputReply::XIGetSelectedEvents),
            _ => {
                log::debug!("XInput request {:?} has no reply", op);
                Err(unknown_minor())
            }
        }
    }

    pub fn opcode(&self) -> XInputOpcode {
        use XInputOpcode as Op;
        match self {
            XInputReply::GetExtensionVersion(_) => Op::GetExtensionVersion,
            XInputReply::ListInputDevices(_) => Op::ListInputDevices,
            XInputReply::OpenDevice(_) => Op::OpenDevice,
            XInputReply::SetDeviceMode(_) => Op::SetDeviceMode,
            XInputReply::GetSelectedExtensionEvents(_) => Op::GetSelectedExtensionEvents,
            XInputReply::GetDeviceDontPropagateList(_) => Op::GetDeviceDontPropagateList,
            XInputReply::GetDeviceMotionEvents(_) => Op::GetDeviceMotionEvents,
            XInputReply::ChangeKeyboardDevice(_) => Op::ChangeKeyboardDevice,
            XInputReply::ChangePointerDevice(_) => Op::ChangePointerDevice,
            XInputReply::GrabDevice(_) => Op::GrabDevice,
            XInputReply::GetDeviceFocus(_) => Op::GetDeviceFocus,
            XInputReply::GetFeedbackControl(_) => Op::GetFeedbackControl,
            XInputReply::GetDeviceKeyMapping(_) => Op::GetDeviceKeyMapping,
            XInputReply::GetDeviceModifierMapping(_) => Op::GetDeviceModifierMapping,
            XInputReply::SetDeviceModifierMapping(_) => Op::SetDeviceModifierMapping,
            XInputReply::GetDeviceButtonMapping(_) => Op::GetDeviceButtonMapping,
            XInputReply::SetDeviceButtonMapping(_) => Op::SetDeviceButtonMapping,
            XInputReply::QueryDeviceState(_) => Op::QueryDeviceState,
            XInputReply::SetDeviceValuators(_) => Op::SetDeviceValuators,
            XInputReply::GetDeviceControl(_) => Op::GetDeviceControl,
            XInputReply::ChangeDeviceControl(_) => Op::ChangeDeviceControl,
            XInputReply::ListDeviceProperties(_) => Op::ListDeviceProperties,
            XInputReply::GetDeviceProperty(_) => Op::GetDeviceProperty,
            XInputReply::XIQueryPointer(_) => Op::XIQueryPointer,
            XInputReply::XIGetClientPointer(_) => Op::XIGetClientPointer,
            XInputReply::XIQueryVersion(_) => Op::XIQueryVersion,
            XInputReply::XIGetFocus(_) => Op::XIGetFocus,
            XInputReply::XIGrabDevice(_) => Op::XIGrabDevice,
            XInputReply::XIPassiveGrabDevice(_) => Op::XIPassiveGrabDevice,
            XInputReply::XIListProperties(_) => Op::XIListProperties,
            XInputReply::XIGetProperty(_) => Op::XIGetProperty,
            XInputReply::XIGetSelectedEvents(_) => Op::XIGetSelectedEvents,
        }
    }

    pub fn minor_opcode(&self) -> u8 {
        self.opcode() as u8
    }

    pub fn encode(&self, sequence: u16, order: ByteOrder) -> Vec<u8> {
        let m = self.minor_opcode();
        match self {
            XInputReply::GetExtensionVersion(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::ListInputDevices(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::OpenDevice(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::ChangeKeyboardDevice(r)
            | XInputReply::ChangePointerDevice(r)
            | XInputReply::SetDeviceMode(r)
            | XInputReply::GrabDevice(r)
            | XInputReply::SetDeviceModifierMapping(r)
            | XInputReply::SetDeviceButtonMapping(r)
            | XInputReply::SetDeviceValuators(r)
            | XInputReply::ChangeDeviceControl(r)
            | XInputReply::XIGrabDevice(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::GetSelectedExtensionEvents(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::GetDeviceDontPropagateList(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::GetDeviceMotionEvents(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::GetDeviceFocus(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::GetFeedbackControl(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::GetDeviceKeyMapping(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::GetDeviceModifierMapping(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::GetDeviceButtonMapping(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::QueryDeviceState(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::GetDeviceControl(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::ListDeviceProperties(r) | XInputReply::XIListProperties(r) => {
                encode_reply_with(m, r, sequence, order)
            }
            XInputReply::GetDeviceProperty(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::XIQueryPointer(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::XIGetClientPointer(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::XIQueryVersion(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::XIGetFocus(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::XIPassiveGrabDevice(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::XIGetProperty(r) => encode_reply_with(m, r, sequence, order),
            XInputReply::XIGetSelectedEvents(r) => encode_reply_with(m, r, sequence, order),
        }
    }
}
