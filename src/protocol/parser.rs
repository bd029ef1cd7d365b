//! X11 request parser
//!
//! This module turns complete request frames into [`Request`] values and
//! back. Framing (including the BIG-REQUESTS extended length) is handled
//! here; body layouts live with each request record.

use super::requests::RequestBody;
use super::wire::{WireField, WireReader, WireWriter};
use super::*;

#[cfg(feature = "big-requests")]
use crate::extensions::big_requests::BigRequestsRequest;
#[cfg(feature = "xinput")]
use crate::extensions::xinput::XInputRequest;
use crate::extensions::{BIG_REQUESTS_MAJOR_OPCODE, XINPUT_MAJOR_OPCODE};

/// Parsed X11 request
#[allow(clippy::enum_variant_names)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    CreateWindow(CreateWindowRequest),
    ChangeWindowAttributes(ChangeWindowAttributesRequest),
    GetWindowAttributes(Window),
    DestroyWindow(Window),
    DestroySubwindows(Window),
    ChangeSaveSet(ChangeSaveSetRequest),
    ReparentWindow(ReparentWindowRequest),
    MapWindow(Window),
    MapSubwindows(Window),
    UnmapWindow(Window),
    UnmapSubwindows(Window),
    ConfigureWindow(ConfigureWindowRequest),
    CirculateWindow(CirculateWindowRequest),
    GetGeometry(Drawable),
    QueryTree(Window),
    InternAtom(InternAtomRequest),
    GetAtomName(Atom),
    ChangeProperty(ChangePropertyRequest),
    DeleteProperty(DeletePropertyRequest),
    GetProperty(GetPropertyRequest),
    ListProperties(Window),
    SetSelectionOwner(SetSelectionOwnerRequest),
    GetSelectionOwner(Atom),
    ConvertSelection(ConvertSelectionRequest),
    SendEvent(SendEventRequest),
    GrabPointer(GrabPointerRequest),
    UngrabPointer(Timestamp),
    GrabButton(GrabButtonRequest),
    UngrabButton(UngrabButtonRequest),
    ChangeActivePointerGrab(ChangeActivePointerGrabRequest),
    GrabKeyboard(GrabKeyboardRequest),
    UngrabKeyboard(Timestamp),
    GrabKey(GrabKeyRequest),
    UngrabKey(UngrabKeyRequest),
    AllowEvents(AllowEventsRequest),
    GrabServer,
    UngrabServer,
    QueryPointer(Window),
    GetMotionEvents(GetMotionEventsRequest),
    TranslateCoordinates(TranslateCoordinatesRequest),
    WarpPointer(WarpPointerRequest),
    SetInputFocus(SetInputFocusRequest),
    GetInputFocus,
    QueryKeymap,
    OpenFont(OpenFontRequest),
    CloseFont(Font),
    QueryFont(Fontable),
    QueryTextExtents(QueryTextExtentsRequest),
    ListFonts(ListFontsRequest),
    ListFontsWithInfo(ListFontsRequest),
    SetFontPath(SetFontPathRequest),
    GetFontPath,
    CreatePixmap(CreatePixmapRequest),
    FreePixmap(Pixmap),
    CreateGC(CreateGCRequest),
    ChangeGC(ChangeGCRequest),
    CopyGC(CopyGCRequest),
    SetDashes(SetDashesRequest),
    SetClipRectangles(SetClipRectanglesRequest),
    FreeGC(GContext),
    ClearArea(ClearAreaRequest),
    CopyArea(CopyAreaRequest),
    CopyPlane(CopyPlaneRequest),
    PolyPoint(PolyPointRequest),
    PolyLine(PolyPointRequest),
    PolySegment(PolySegmentRequest),
    PolyRectangle(PolyRectangleRequest),
    PolyArc(PolyArcRequest),
    FillPoly(FillPolyRequest),
    PolyFillRectangle(PolyRectangleRequest),
    PolyFillArc(PolyArcRequest),
    PutImage(PutImageRequest),
    GetImage(GetImageRequest),
    PolyText8(PolyTextRequest),
    PolyText16(PolyTextRequest),
    ImageText8(ImageText8Request),
    ImageText16(ImageText16Request),
    CreateColormap(CreateColormapRequest),
    FreeColormap(Colormap),
    CopyColormapAndFree(CopyColormapAndFreeRequest),
    InstallColormap(Colormap),
    UninstallColormap(Colormap),
    ListInstalledColormaps(Window),
    AllocColor(AllocColorRequest),
    AllocNamedColor(NamedColorRequest),
    AllocColorCells(AllocColorCellsRequest),
    AllocColorPlanes(AllocColorPlanesRequest),
    FreeColors(FreeColorsRequest),
    StoreColors(StoreColorsRequest),
    StoreNamedColor(StoreNamedColorRequest),
    QueryColors(QueryColorsRequest),
    LookupColor(NamedColorRequest),
    CreateCursor(CreateCursorRequest),
    CreateGlyphCursor(CreateGlyphCursorRequest),
    FreeCursor(Cursor),
    RecolorCursor(RecolorCursorRequest),
    QueryBestSize(QueryBestSizeRequest),
    QueryExtension(QueryExtensionRequest),
    ListExtensions,
    ChangeKeyboardMapping(ChangeKeyboardMappingRequest),
    GetKeyboardMapping(GetKeyboardMappingRequest),
    ChangeKeyboardControl(ChangeKeyboardControlRequest),
    GetKeyboardControl,
    Bell(i8),
    ChangePointerControl(ChangePointerControlRequest),
    GetPointerControl,
    SetScreenSaver(SetScreenSaverRequest),
    GetScreenSaver,
    ChangeHosts(ChangeHostsRequest),
    ListHosts,
    SetAccessControl(u8),
    SetCloseDownMode(u8),
    KillClient(u32),
    RotateProperties(RotatePropertiesRequest),
    ForceScreenSaver(u8),
    SetPointerMapping(SetPointerMappingRequest),
    GetPointerMapping,
    SetModifierMapping(SetModifierMappingRequest),
    GetModifierMapping,
    NoOperation,
    #[cfg(feature = "xinput")]
    XInput(XInputRequest),
    #[cfg(feature = "big-requests")]
    BigRequests(BigRequestsRequest),
}

/// Decode one complete request frame.
///
/// `bytes` must hold exactly the request: its length field (or extended
/// length) has to match `bytes.len()`. Errors carry the request's major and
/// minor opcode and a zero sequence number; the caller knows the sequence.
pub fn decode_request(bytes: &[u8], order: ByteOrder) -> X11Result<Request> {
    let header = RequestHeader::parse(bytes, order)?;
    let minor = minor_of(header.opcode, header.detail);
    if header.size() != bytes.len() {
        return Err(X11Error::bad_length(0, header.opcode).for_request(header.opcode, minor));
    }

    log::debug!(
        "Parsing request: opcode={}, detail={}, length={}{}",
        header.opcode,
        header.detail,
        header.length,
        if header.is_big() { " (big)" } else { "" }
    );

    decode_request_body(header.opcode, header.detail, &bytes[header.header_len..], order)
}

/// Decode a request body (everything after the header) given its opcode
/// and detail byte.
pub fn decode_request_body(
    opcode: u8,
    detail: u8,
    body: &[u8],
    order: ByteOrder,
) -> X11Result<Request> {
    let mut r = WireReader::new(body, order);
    let request = match opcode {
        XINPUT_MAJOR_OPCODE => decode_xinput(detail, &mut r),
        BIG_REQUESTS_MAJOR_OPCODE => decode_big_requests(detail, &mut r),
        _ => decode_core(opcode, detail, &mut r),
    };
    request.map_err(|e| {
        log::debug!("Rejected request opcode={}: {}", opcode, e);
        e.for_request(opcode, minor_of(opcode, detail))
    })
}

fn minor_of(opcode: u8, detail: u8) -> u16 {
    if opcode >= 128 {
        detail as u16
    } else {
        0
    }
}

#[cfg(feature = "xinput")]
fn decode_xinput(minor: u8, r: &mut WireReader<'_>) -> X11Result<Request> {
    XInputRequest::read_request(minor, r).map(Request::XInput)
}

#[cfg(not(feature = "xinput"))]
fn decode_xinput(_minor: u8, _r: &mut WireReader<'_>) -> X11Result<Request> {
    Err(X11Error::bad_request(0, XINPUT_MAJOR_OPCODE))
}

#[cfg(feature = "big-requests")]
fn decode_big_requests(minor: u8, r: &mut WireReader<'_>) -> X11Result<Request> {
    BigRequestsRequest::read_request(minor, r).map(Request::BigRequests)
}

#[cfg(not(feature = "big-requests"))]
fn decode_big_requests(_minor: u8, _r: &mut WireReader<'_>) -> X11Result<Request> {
    Err(X11Error::bad_request(0, BIG_REQUESTS_MAJOR_OPCODE))
}

fn body<T: RequestBody>(detail: u8, r: &mut WireReader<'_>) -> X11Result<T> {
    T::read_body(detail, r)
}

/// Body that is a single 32-bit value.
fn single<T: WireField>(r: &mut WireReader<'_>) -> X11Result<T> {
    r.require_exact(4)?;
    r.read()
}

fn empty(r: &mut WireReader<'_>) -> X11Result<()> {
    r.require_exact(0)
}

fn decode_core(opcode: u8, detail: u8, r: &mut WireReader<'_>) -> X11Result<Request> {
    let Some(op) = RequestOpcode::from_u8(opcode) else {
        log::warn!("Unknown request opcode: {}", opcode);
        return Err(X11Error::bad_request(0, opcode));
    };

    use RequestOpcode as Op;
    let request = match op {
        Op::CreateWindow => Request::CreateWindow(body(detail, r)?),
        Op::ChangeWindowAttributes => Request::ChangeWindowAttributes(body(detail, r)?),
        Op::GetWindowAttributes => Request::GetWindowAttributes(single(r)?),
        Op::DestroyWindow => Request::DestroyWindow(single(r)?),
        Op::DestroySubwindows => Request::DestroySubwindows(single(r)?),
        Op::ChangeSaveSet => Request::ChangeSaveSet(body(detail, r)?),
        Op::ReparentWindow => Request::ReparentWindow(body(detail, r)?),
        Op::MapWindow => Request::MapWindow(single(r)?),
        Op::MapSubwindows => Request::MapSubwindows(single(r)?),
        Op::UnmapWindow => Request::UnmapWindow(single(r)?),
        Op::UnmapSubwindows => Request::UnmapSubwindows(single(r)?),
        Op::ConfigureWindow => Request::ConfigureWindow(body(detail, r)?),
        Op::CirculateWindow => Request::CirculateWindow(body(detail, r)?),
        Op::GetGeometry => Request::GetGeometry(single(r)?),
        Op::QueryTree => Request::QueryTree(single(r)?),
        Op::InternAtom => Request::InternAtom(body(detail, r)?),
        Op::GetAtomName => Request::GetAtomName(single(r)?),
        Op::ChangeProperty => Request::ChangeProperty(body(detail, r)?),
        Op::DeleteProperty => Request::DeleteProperty(body(detail, r)?),
        Op::GetProperty => Request::GetProperty(body(detail, r)?),
        Op::ListProperties => Request::ListProperties(single(r)?),
        Op::SetSelectionOwner => Request::SetSelectionOwner(body(detail, r)?),
        Op::GetSelectionOwner => Request::GetSelectionOwner(single(r)?),
        Op::ConvertSelection => Request::ConvertSelection(body(detail, r)?),
        Op::SendEvent => Request::SendEvent(body(detail, r)?),
        Op::GrabPointer => Request::GrabPointer(body(detail, r)?),
        Op::UngrabPointer => Request::UngrabPointer(single(r)?),
        Op::GrabButton => Request::GrabButton(body(detail, r)?),
        Op::UngrabButton => Request::UngrabButton(body(detail, r)?),
        Op::ChangeActivePointerGrab => Request::ChangeActivePointerGrab(body(detail, r)?),
        Op::GrabKeyboard => Request::GrabKeyboard(body(detail, r)?),
        Op::UngrabKeyboard => Request::UngrabKeyboard(single(r)?),
        Op::GrabKey => Request::GrabKey(body(detail, r)?),
        Op::UngrabKey => Request::UngrabKey(body(detail, r)?),
        Op::AllowEvents => Request::AllowEvents(body(detail, r)?),
        Op::GrabServer => {
            empty(r)?;
            Request::GrabServer
        }
        Op::UngrabServer => {
            empty(r)?;
            Request::UngrabServer
        }
        Op::QueryPointer => Request::QueryPointer(single(r)?),
        Op::GetMotionEvents => Request::GetMotionEvents(body(detail, r)?),
        Op::TranslateCoordinates => Request::TranslateCoordinates(body(detail, r)?),
        Op::WarpPointer => Request::WarpPointer(body(detail, r)?),
        Op::SetInputFocus => Request::SetInputFocus(body(detail, r)?),
        Op::GetInputFocus => {
            empty(r)?;
            Request::GetInputFocus
        }
        Op::QueryKeymap => {
            empty(r)?;
            Request::QueryKeymap
        }
        Op::OpenFont => Request::OpenFont(body(detail, r)?),
        Op::CloseFont => Request::CloseFont(single(r)?),
        Op::QueryFont => Request::QueryFont(single(r)?),
        Op::QueryTextExtents => Request::QueryTextExtents(body(detail, r)?),
        Op::ListFonts => Request::ListFonts(body(detail, r)?),
        Op::ListFontsWithInfo => Request::ListFontsWithInfo(body(detail, r)?),
        Op::SetFontPath => Request::SetFontPath(body(detail, r)?),
        Op::GetFontPath => {
            empty(r)?;
            Request::GetFontPath
        }
        Op::CreatePixmap => Request::CreatePixmap(body(detail, r)?),
        Op::FreePixmap => Request::FreePixmap(single(r)?),
        Op::CreateGC => Request::CreateGC(body(detail, r)?),
        Op::ChangeGC => Request::ChangeGC(body(detail, r)?),
        Op::CopyGC => Request::CopyGC(body(detail, r)?),
        Op::SetDashes => Request::SetDashes(body(detail, r)?),
        Op::SetClipRectangles => Request::SetClipRectangles(body(detail, r)?),
        Op::FreeGC => Request::FreeGC(single(r)?),
        Op::ClearArea => Request::ClearArea(body(detail, r)?),
        Op::CopyArea => Request::CopyArea(body(detail, r)?),
        Op::CopyPlane => Request::CopyPlane(body(detail, r)?),
        Op::PolyPoint => Request::PolyPoint(body(detail, r)?),
        Op::PolyLine => Request::PolyLine(body(detail, r)?),
        Op::PolySegment => Request::PolySegment(body(detail, r)?),
        Op::PolyRectangle => Request::PolyRectangle(body(detail, r)?),
        Op::PolyArc => Request::PolyArc(body(detail, r)?),
        Op::FillPoly => Request::FillPoly(body(detail, r)?),
        Op::PolyFillRectangle => Request::PolyFillRectangle(body(detail, r)?),
        Op::PolyFillArc => Request::PolyFillArc(body(detail, r)?),
        Op::PutImage => Request::PutImage(body(detail, r)?),
        Op::GetImage => Request::GetImage(body(detail, r)?),
        Op::PolyText8 => Request::PolyText8(body(detail, r)?),
        Op::PolyText16 => Request::PolyText16(body(detail, r)?),
        Op::ImageText8 => Request::ImageText8(body(detail, r)?),
        Op::ImageText16 => Request::ImageText16(body(detail, r)?),
        Op::CreateColormap => Request::CreateColormap(body(detail, r)?),
        Op::FreeColormap => Request::FreeColormap(single(r)?),
        Op::CopyColormapAndFree => Request::CopyColormapAndFree(body(detail, r)?),
        Op::InstallColormap => Request::InstallColormap(single(r)?),
        Op::UninstallColormap => Request::UninstallColormap(single(r)?),
        Op::ListInstalledColormaps => Request::ListInstalledColormaps(single(r)?),
        Op::AllocColor => Request::AllocColor(body(detail, r)?),
        Op::AllocNamedColor => Request::AllocNamedColor(body(detail, r)?),
        Op::AllocColorCells => Request::AllocColorCells(body(detail, r)?),
        Op::AllocColorPlanes => Request::AllocColorPlanes(body(detail, r)?),
        Op::FreeColors => Request::FreeColors(body(detail, r)?),
        Op::StoreColors => Request::StoreColors(body(detail, r)?),
        Op::StoreNamedColor => Request::StoreNamedColor(body(detail, r)?),
        Op::QueryColors => Request::QueryColors(body(detail, r)?),
        Op::LookupColor => Request::LookupColor(body(detail, r)?),
        Op::CreateCursor => Request::CreateCursor(body(detail, r)?),
        Op::CreateGlyphCursor => Request::CreateGlyphCursor(body(detail, r)?),
        Op::FreeCursor => Request::FreeCursor(single(r)?),
        Op::RecolorCursor => Request::RecolorCursor(body(detail, r)?),
        Op::QueryBestSize => Request::QueryBestSize(body(detail, r)?),
        Op::QueryExtension => Request::QueryExtension(body(detail, r)?),
        Op::ListExtensions => {
            empty(r)?;
            Request::ListExtensions
        }
        Op::ChangeKeyboardMapping => Request::ChangeKeyboardMapping(body(detail, r)?),
        Op::GetKeyboardMapping => Request::GetKeyboardMapping(body(detail, r)?),
        Op::ChangeKeyboardControl => Request::ChangeKeyboardControl(body(detail, r)?),
        Op::GetKeyboardControl => {
            empty(r)?;
            Request::GetKeyboardControl
        }
        Op::Bell => {
            empty(r)?;
            Request::Bell(detail as i8)
        }
        Op::ChangePointerControl => Request::ChangePointerControl(body(detail, r)?),
        Op::GetPointerControl => {
            empty(r)?;
            Request::GetPointerControl
        }
        Op::SetScreenSaver => Request::SetScreenSaver(body(detail, r)?),
        Op::GetScreenSaver => {
            empty(r)?;
            Request::GetScreenSaver
        }
        Op::ChangeHosts => Request::ChangeHosts(body(detail, r)?),
        Op::ListHosts => {
            empty(r)?;
            Request::ListHosts
        }
        Op::SetAccessControl => {
            empty(r)?;
            Request::SetAccessControl(detail)
        }
        Op::SetCloseDownMode => {
            empty(r)?;
            Request::SetCloseDownMode(detail)
        }
        Op::KillClient => Request::KillClient(single(r)?),
        Op::RotateProperties => Request::RotateProperties(body(detail, r)?),
        Op::ForceScreenSaver => {
            empty(r)?;
            Request::ForceScreenSaver(detail)
        }
        Op::SetPointerMapping => Request::SetPointerMapping(body(detail, r)?),
        Op::GetPointerMapping => {
            empty(r)?;
            Request::GetPointerMapping
        }
        Op::SetModifierMapping => Request::SetModifierMapping(body(detail, r)?),
        Op::GetModifierMapping => {
            empty(r)?;
            Request::GetModifierMapping
        }
        // NoOperation may carry any amount of unused data.
        Op::NoOperation => Request::NoOperation,
    };
    Ok(request)
}

fn put<T: RequestBody>(req: &T, w: &mut WireWriter) -> u8 {
    req.write_body(w);
    req.detail()
}

fn put_single<T: WireField>(value: &T, w: &mut WireWriter) -> u8 {
    w.write(value);
    0
}

impl Request {
    pub fn major_opcode(&self) -> u8 {
        match self {
            #[cfg(feature = "xinput")]
            Request::XInput(_) => XINPUT_MAJOR_OPCODE,
            #[cfg(feature = "big-requests")]
            Request::BigRequests(_) => BIG_REQUESTS_MAJOR_OPCODE,
            core => core.core_opcode() as u8,
        }
    }

    /// Minor opcode for extension requests, 0 for core requests.
    pub fn minor_opcode(&self) -> u16 {
        match self {
            #[cfg(feature = "xinput")]
            Request::XInput(req) => req.minor_opcode() as u16,
            #[cfg(feature = "big-requests")]
            Request::BigRequests(req) => req.minor_opcode() as u16,
            _ => 0,
        }
    }

    /// Whether the server answers this request with a reply.
    pub fn has_reply(&self) -> bool {
        match self {
            #[cfg(feature = "xinput")]
            Request::XInput(req) => req.has_reply(),
            #[cfg(feature = "big-requests")]
            Request::BigRequests(_) => true,
            core => core.core_opcode().has_reply(),
        }
    }

    fn core_opcode(&self) -> RequestOpcode {
        use RequestOpcode as Op;
        match self {
            Request::CreateWindow(_) => Op::CreateWindow,
            Request::ChangeWindowAttributes(_) => Op::ChangeWindowAttributes,
            Request::GetWindowAttributes(_) => Op::GetWindowAttributes,
            Request::DestroyWindow(_) => Op::DestroyWindow,
            Request::DestroySubwindows(_) => Op::DestroySubwindows,
            Request::ChangeSaveSet(_) => Op::ChangeSaveSet,
            Request::ReparentWindow(_) => Op::ReparentWindow,
            Request::MapWindow(_) => Op::MapWindow,
            Request::MapSubwindows(_) => Op::MapSubwindows,
            Request::UnmapWindow(_) => Op::UnmapWindow,
            Request::UnmapSubwindows(_) => Op::UnmapSubwindows,
            Request::ConfigureWindow(_) => Op::ConfigureWindow,
            Request::CirculateWindow(_) => Op::CirculateWindow,
            Request::GetGeometry(_) => Op::GetGeometry,
            Request::QueryTree(_) => Op::QueryTree,
            Request::InternAtom(_) => Op::InternAtom,
            Request::GetAtomName(_) => Op::GetAtomName,
            Request::ChangeProperty(_) => Op::ChangeProperty,
            Request::DeleteProperty(_) => Op::DeleteProperty,
            Request::GetProperty(_) => Op::GetProperty,
            Request::ListProperties(_) => Op::ListProperties,
            Request::SetSelectionOwner(_) => Op::SetSelectionOwner,
            Request::GetSelectionOwner(_) => Op::GetSelectionOwner,
            Request::ConvertSelection(_) => Op::ConvertSelection,
            Request::SendEvent(_) => Op::SendEvent,
            Request::GrabPointer(_) => Op::GrabPointer,
            Request::UngrabPointer(_) => Op::UngrabPointer,
            Request::GrabButton(_) => Op::GrabButton,
            Request::UngrabButton(_) => Op::UngrabButton,
            Request::ChangeActivePointerGrab(_) => Op::ChangeActivePointerGrab,
            Request::GrabKeyboard(_) => Op::GrabKeyboard,
            Request::UngrabKeyboard(_) => Op::UngrabKeyboard,
            Request::GrabKey(_) => Op::GrabKey,
            Request::UngrabKey(_) => Op::UngrabKey,
            Request::AllowEvents(_) => Op::AllowEvents,
            Request::GrabServer => Op::GrabServer,
            Request::UngrabServer => Op::UngrabServer,
            Request::QueryPointer(_) => Op::QueryPointer,
            Request::GetMotionEvents(_) => Op::GetMotionEvents,
            Request::TranslateCoordinates(_) => Op::TranslateCoordinates,
            Request::WarpPointer(_) => Op::WarpPointer,
            Request::SetInputFocus(_) => Op::SetInputFocus,
            Request::GetInputFocus => Op::GetInputFocus,
            Request::QueryKeymap => Op::QueryKeymap,
            Request::OpenFont(_) => Op::OpenFont,
            Request::CloseFont(_) => Op::CloseFont,
            Request::QueryFont(_) => Op::QueryFont,
            Request::QueryTextExtents(_) => Op::QueryTextExtents,
            Request::ListFonts(_) => Op::ListFonts,
            Request::ListFontsWithInfo(_) => Op::ListFontsWithInfo,
            Request::SetFontPath(_) => Op::SetFontPath,
            Request::GetFontPath => Op::GetFontPath,
            Request::CreatePixmap(_) => Op::CreatePixmap,
            Request::FreePixmap(_) => Op::FreePixmap,
            Request::CreateGC(_) => Op::CreateGC,
            Request::ChangeGC(_) => Op::ChangeGC,
            Request::CopyGC(_) => Op::CopyGC,
            Request::SetDashes(_) => Op::SetDashes,
            Request::SetClipRectangles(_) => Op::SetClipRectangles,
            Request::FreeGC(_) => Op::FreeGC,
            Request::ClearArea(_) => Op::ClearArea,
            Request::CopyArea(_) => Op::CopyArea,
            Request::CopyPlane(_) => Op::CopyPlane,
            Request::PolyPoint(_) => Op::PolyPoint,
            Request::PolyLine(_) => Op::PolyLine,
            Request::PolySegment(_) => Op::PolySegment,
            Request::PolyRectangle(_) => Op::PolyRectangle,
            Request::PolyArc(_) => Op::PolyArc,
            Request::FillPoly(_) => Op::FillPoly,
            Request::PolyFillRectangle(_) => Op::PolyFillRectangle,
            Request::PolyFillArc(_) => Op::PolyFillArc,
            Request::PutImage(_) => Op::PutImage,
            Request::GetImage(_) => Op::GetImage,
            Request::PolyText8(_) => Op::PolyText8,
            Request::PolyText16(_) => Op::PolyText16,
            Request::ImageText8(_) => Op::ImageText8,
            Request::ImageText16(_) => Op::ImageText16,
            Request::CreateColormap(_) => Op::CreateColormap,
            Request::FreeColormap(_) => Op::FreeColormap,
            Request::CopyColormapAndFree(_) => Op::CopyColormapAndFree,
            Request::InstallColormap(_) => Op::InstallColormap,
            Request::UninstallColormap(_) => Op::UninstallColormap,
            Request::ListInstalledColormaps(_) => Op::ListInstalledColormaps,
            Request::AllocColor(_) => Op::AllocColor,
            Request::AllocNamedColor(_) => Op::AllocNamedColor,
            Request::AllocColorCells(_) => Op::AllocColorCells,
            Request::AllocColorPlanes(_) => Op::AllocColorPlanes,
            Request::FreeColors(_) => Op::FreeColors,
            Request::StoreColors(_) => Op::StoreColors,
            Request::StoreNamedColor(_) => Op::StoreNamedColor,
            Request::QueryColors(_) => Op::QueryColors,
            Request::LookupColor(_) => Op::LookupColor,
            Request::CreateCursor(_) => Op::CreateCursor,
            Request::CreateGlyphCursor(_) => Op::CreateGlyphCursor,
            Request::FreeCursor(_) => Op::FreeCursor,
            Request::RecolorCursor(_) => Op::RecolorCursor,
            Request::QueryBestSize(_) => Op::QueryBestSize,
            Request::QueryExtension(_) => Op::QueryExtension,
            Request::ListExtensions => Op::ListExtensions,
            Request::ChangeKeyboardMapping(_) => Op::ChangeKeyboardMapping,
            Request::GetKeyboardMapping(_) => Op::GetKeyboardMapping,
            Request::ChangeKeyboardControl(_) => Op::ChangeKeyboardControl,
            Request::GetKeyboardControl => Op::GetKeyboardControl,
            Request::Bell(_) => Op::Bell,
            Request::ChangePointerControl(_) => Op::ChangePointerControl,
            Request::GetPointerControl => Op::GetPointerControl,
            Request::SetScreenSaver(_) => Op::SetScreenSaver,
            Request::GetScreenSaver => Op::GetScreenSaver,
            Request::ChangeHosts(_) => Op::ChangeHosts,
            Request::ListHosts => Op::ListHosts,
            Request::SetAccessControl(_) => Op::SetAccessControl,
            Request::SetCloseDownMode(_) => Op::SetCloseDownMode,
            Request::KillClient(_) => Op::KillClient,
            Request::RotateProperties(_) => Op::RotateProperties,
            Request::ForceScreenSaver(_) => Op::ForceScreenSaver,
            Request::SetPointerMapping(_) => Op::SetPointerMapping,
            Request::GetPointerMapping => Op::GetPointerMapping,
            Request::SetModifierMapping(_) => Op::SetModifierMapping,
            Request::GetModifierMapping => Op::GetModifierMapping,
            Request::NoOperation => Op::NoOperation,
            #[cfg(feature = "xinput")]
            Request::XInput(_) => Op::NoOperation,
            #[cfg(feature = "big-requests")]
            Request::BigRequests(_) => Op::NoOperation,
        }
    }

    /// Write the body and return the header's detail byte.
    fn write_body(&self, w: &mut WireWriter) -> u8 {
        match self {
            Request::CreateWindow(req) => put(req, w),
            Request::ChangeWindowAttributes(req) => put(req, w),
            Request::GetWindowAttributes(window)
            | Request::DestroyWindow(window)
            | Request::DestroySubwindows(window)
            | Request::MapWindow(window)
            | Request::MapSubwindows(window)
            | Request::UnmapWindow(window)
            | Request::UnmapSubwindows(window)
            | Request::QueryTree(window)
            | Request::ListProperties(window)
            | Request::QueryPointer(window)
            | Request::ListInstalledColormaps(window) => put_single(window, w),
            Request::ChangeSaveSet(req) => put(req, w),
            Request::ReparentWindow(req) => put(req, w),
            Request::ConfigureWindow(req) => put(req, w),
            Request::CirculateWindow(req) => put(req, w),
            Request::GetGeometry(drawable) => put_single(drawable, w),
            Request::InternAtom(req) => put(req, w),
            Request::GetAtomName(atom) | Request::GetSelectionOwner(atom) => put_single(atom, w),
            Request::ChangeProperty(req) => put(req, w),
            Request::DeleteProperty(req) => put(req, w),
            Request::GetProperty(req) => put(req, w),
            Request::SetSelectionOwner(req) => put(req, w),
            Request::ConvertSelection(req) => put(req, w),
            Request::SendEvent(req) => put(req, w),
            Request::GrabPointer(req) => put(req, w),
            Request::UngrabPointer(time) | Request::UngrabKeyboard(time) => put_single(time, w),
            Request::GrabButton(req) => put(req, w),
            Request::UngrabButton(req) => put(req, w),
            Request::ChangeActivePointerGrab(req) => put(req, w),
            Request::GrabKeyboard(req) => put(req, w),
            Request::GrabKey(req) => put(req, w),
            Request::UngrabKey(req) => put(req, w),
            Request::AllowEvents(req) => put(req, w),
            Request::GetMotionEvents(req) => put(req, w),
            Request::TranslateCoordinates(req) => put(req, w),
            Request::WarpPointer(req) => put(req, w),
            Request::SetInputFocus(req) => put(req, w),
            Request::OpenFont(req) => put(req, w),
            Request::CloseFont(font) => put_single(font, w),
            Request::QueryFont(font) => put_single(font, w),
            Request::QueryTextExtents(req) => put(req, w),
            Request::ListFonts(req) | Request::ListFontsWithInfo(req) => put(req, w),
            Request::SetFontPath(req) => put(req, w),
            Request::CreatePixmap(req) => put(req, w),
            Request::FreePixmap(pixmap) => put_single(pixmap, w),
            Request::CreateGC(req) => put(req, w),
            Request::ChangeGC(req) => put(req, w),
            Request::CopyGC(req) => put(req, w),
            Request::SetDashes(req) => put(req, w),
            Request::SetClipRectangles(req) => put(req, w),
            Request::FreeGC(gc) => put_single(gc, w),
            Request::ClearArea(req) => put(req, w),
            Request::CopyArea(req) => put(req, w),
            Request::CopyPlane(req) => put(req, w),
            Request::PolyPoint(req) | Request::PolyLine(req) => put(req, w),
            Request::PolySegment(req) => put(req, w),
            Request::PolyRectangle(req) | Request::PolyFillRectangle(req) => put(req, w),
            Request::PolyArc(req) | Request::PolyFillArc(req) => put(req, w),
            Request::FillPoly(req) => put(req, w),
            Request::PutImage(req) => put(req, w),
            Request::GetImage(req) => put(req, w),
            Request::PolyText8(req) | Request::PolyText16(req) => put(req, w),
            Request::ImageText8(req) => put(req, w),
            Request::ImageText16(req) => put(req, w),
            Request::CreateColormap(req) => put(req, w),
            Request::FreeColormap(cmap)
            | Request::InstallColormap(cmap)
            | Request::UninstallColormap(cmap) => put_single(cmap, w),
            Request::CopyColormapAndFree(req) => put(req, w),
            Request::AllocColor(req) => put(req, w),
            Request::AllocNamedColor(req) | Request::LookupColor(req) => put(req, w),
            Request::AllocColorCells(req) => put(req, w),
            Request::AllocColorPlanes(req) => put(req, w),
            Request::FreeColors(req) => put(req, w),
            Request::StoreColors(req) => put(req, w),
            Request::StoreNamedColor(req) => put(req, w),
            Request::QueryColors(req) => put(req, w),
            Request::CreateCursor(req) => put(req, w),
            Request::CreateGlyphCursor(req) => put(req, w),
            Request::FreeCursor(cursor) => put_single(cursor, w),
            Request::RecolorCursor(req) => put(req, w),
            Request::QueryBestSize(req) => put(req, w),
            Request::QueryExtension(req) => put(req, w),
            Request::ChangeKeyboardMapping(req) => put(req, w),
            Request::GetKeyboardMapping(req) => put(req, w),
            Request::ChangeKeyboardControl(req) => put(req, w),
            Request::Bell(percent) => *percent as u8,
            Request::ChangePointerControl(req) => put(req, w),
            Request::SetScreenSaver(req) => put(req, w),
            Request::ChangeHosts(req) => put(req, w),
            Request::SetAccessControl(mode)
            | Request::SetCloseDownMode(mode)
            | Request::ForceScreenSaver(mode) => *mode,
            Request::KillClient(resource) => put_single(resource, w),
            Request::RotateProperties(req) => put(req, w),
            Request::SetPointerMapping(req) => put(req, w),
            Request::SetModifierMapping(req) => put(req, w),
            Request::GrabServer
            | Request::UngrabServer
            | Request::GetInputFocus
            | Request::QueryKeymap
            | Request::GetFontPath
            | Request::ListExtensions
            | Request::GetKeyboardControl
            | Request::GetPointerControl
            | Request::GetScreenSaver
            | Request::ListHosts
            | Request::GetPointerMapping
            | Request::GetModifierMapping
            | Request::NoOperation => 0,
            #[cfg(feature = "xinput")]
            Request::XInput(req) => {
                req.write_body(w);
                req.minor_opcode()
            }
            #[cfg(feature = "big-requests")]
            Request::BigRequests(req) => req.minor_opcode(),
        }
    }

    /// Encode the request as a complete frame.
    ///
    /// Requests longer than 0xFFFF words switch to the BIG-REQUESTS form: a
    /// zero 16-bit length followed by the 32-bit length of the whole frame.
    pub fn encode(&self, order: ByteOrder) -> Vec<u8> {
        let mut body = WireWriter::new(order);
        let detail = self.write_body(&mut body);
        body.pad();
        frame_request(self.major_opcode(), detail, body.as_bytes(), order)
    }
}

/// Prefix `body` (already padded) with a request header.
pub fn frame_request(opcode: u8, detail: u8, body: &[u8], order: ByteOrder) -> Vec<u8> {
    let words = body.len() / 4 + 1;
    let mut w = WireWriter::with_capacity(order, body.len() + 8);
    w.write_u8(opcode);
    w.write_u8(detail);
    if words <= u16::MAX as usize {
        w.write_u16(words as u16);
    } else {
        w.write_u16(0);
        w.write_u32((words + 1) as u32);
    }
    w.write_bytes(body);
    w.into_bytes()
}

/// Request parser bound to a connection's byte order
pub struct ProtocolParser {
    byte_order: ByteOrder,
}

impl ProtocolParser {
    pub fn new(byte_order: ByteOrder) -> Self {
        ProtocolParser { byte_order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Parse one request from the front of `buffer`, returning it with the
    /// number of bytes it occupied. `Ok(None)` means more data is needed.
    pub fn parse_request(&self, buffer: &[u8]) -> X11Result<Option<(Request, usize)>> {
        let Some(size) = request_frame_len(buffer, self.byte_order) else {
            return Ok(None);
        };
        if buffer.len() < size {
            return Ok(None);
        }
        let request = decode_request(&buffer[..size], self.byte_order)?;
        Ok(Some((request, size)))
    }

    /// Decode a server message; see [`decode_server_message`].
    pub fn parse_server_message<F>(&self, buffer: &[u8], lookup: F) -> X11Result<Message>
    where
        F: FnOnce(u16) -> Option<(u8, u16)>,
    {
        decode_server_message(buffer, self.byte_order, lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_window_frame() {
        let bytes = [8u8, 0, 2, 0, 0x01, 0x00, 0x40, 0x00];
        let request = decode_request(&bytes, ByteOrder::LSBFirst).unwrap();
        assert_eq!(request, Request::MapWindow(Window::new(0x400001)));
        assert_eq!(request.encode(ByteOrder::LSBFirst), bytes);
    }

    #[test]
    fn test_length_mismatch() {
        let bytes = [8u8, 0, 3, 0, 1, 0, 0, 0];
        let err = decode_request(&bytes, ByteOrder::LSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
        assert_eq!(err.major_opcode, 8);
    }

    #[test]
    fn test_unknown_opcode() {
        for opcode in [0u8, 120, 126, 200] {
            let err = decode_request(&[opcode, 0, 1, 0], ByteOrder::LSBFirst).unwrap_err();
            assert_eq!(err.code, ErrorCode::Request);
            assert_eq!(err.major_opcode, opcode);
        }
    }

    #[test]
    fn test_no_operation_accepts_payload() {
        let bytes = [127u8, 0, 3, 0, 1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(
            decode_request(&bytes, ByteOrder::LSBFirst).unwrap(),
            Request::NoOperation
        );
    }

    #[test]
    fn test_body_errors_carry_opcode() {
        // GetInputFocus takes no body.
        let err = decode_request(&[43, 0, 2, 0, 0, 0, 0, 0], ByteOrder::LSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
        assert_eq!(err.major_opcode, 43);
        assert_eq!(err.minor_opcode, 0);
    }

    #[test]
    fn test_big_request_encoding() {
        let request = Request::PutImage(PutImageRequest {
            format: 2,
            drawable: Drawable::new(1),
            gc: GContext::new(2),
            width: 512,
            height: 512,
            depth: 24,
            data: vec![0xaa; 512 * 512],
            ..Default::default()
        });
        for order in ByteOrder::ALL {
            let bytes = request.encode(order);
            assert_eq!(&bytes[2..4], &[0, 0]);
            assert_eq!(bytes.len(), 8 + 20 + 512 * 512);
            assert_eq!(request_frame_len(&bytes, order), Some(bytes.len()));
            assert_eq!(decode_request(&bytes, order).unwrap(), request);
        }
    }

    #[test]
    fn test_parser_streams_frames() {
        let parser = ProtocolParser::new(ByteOrder::MSBFirst);
        let mut buffer = Request::GrabServer.encode(ByteOrder::MSBFirst);
        buffer.extend(Request::Bell(-50).encode(ByteOrder::MSBFirst));
        buffer.extend_from_slice(&[36, 0]);

        let (first, used) = parser.parse_request(&buffer).unwrap().unwrap();
        assert_eq!(first, Request::GrabServer);
        let (second, used2) = parser.parse_request(&buffer[used..]).unwrap().unwrap();
        assert_eq!(second, Request::Bell(-50));
        assert!(parser.parse_request(&buffer[used + used2..]).unwrap().is_none());
    }
}
