//! X11 protocol replies
//!
//! Every reply shares a 32-byte head: tag 1, a reply-specific detail byte,
//! the sequence number, and the count of 4-byte units that follow the first
//! 32 bytes. The length is always computed from the encoded payload.

use super::errors::*;
use super::requests::{format_unit_size, format_units, RequestOpcode};
use super::types::*;
use super::wire::{
    clamp_u16, clamp_u8, fixed_reply, list_bytes, WireField, WireReader, WireWriter,
};

#[cfg(feature = "big-requests")]
use crate::extensions::big_requests::BigRequestsEnableReply;
#[cfg(feature = "xinput")]
use crate::extensions::xinput::XInputReply;
use crate::extensions::{BIG_REQUESTS_MAJOR_OPCODE, XINPUT_MAJOR_OPCODE};

/// Wire layout of the reply-specific part of a reply frame.
pub trait ReplyBody: Sized {
    /// Value carried in byte 1.
    fn detail(&self) -> u8 {
        0
    }

    /// Write fields starting at byte 8. Replies with trailing data call
    /// `w.pad_to(32)` before writing it.
    fn write_fields(&self, w: &mut WireWriter);

    /// Read fields with `r` positioned at byte 8 of the whole frame.
    fn read_fields(detail: u8, r: &mut WireReader<'_>) -> X11Result<Self>;
}

/// Encode a reply frame using `detail` for byte 1.
pub fn encode_reply_with<T: ReplyBody>(
    detail: u8,
    body: &T,
    sequence: u16,
    order: ByteOrder,
) -> Vec<u8> {
    let mut w = WireWriter::with_capacity(order, 32);
    w.write_u8(1); // Reply
    w.write_u8(detail);
    w.write_u16(sequence);
    w.write_u32(0); // Length, patched below
    body.write_fields(&mut w);
    w.pad_to(32);
    w.pad();
    let length = (w.len() - 32) / 4;
    w.patch_u32(4, length as u32);
    w.into_bytes()
}

/// Encode a reply frame.
pub fn encode_reply<T: ReplyBody>(body: &T, sequence: u16, order: ByteOrder) -> Vec<u8> {
    encode_reply_with(body.detail(), body, sequence, order)
}

/// Check a reply frame's tag and length and return its detail byte, its
/// sequence number, and a reader positioned at byte 8.
pub fn open_reply_frame(
    bytes: &[u8],
    order: ByteOrder,
) -> X11Result<(u8, u16, WireReader<'_>)> {
    if bytes.len() < 32 {
        return Err(X11Error::bad_length(0, 0));
    }
    let mut r = WireReader::new(bytes, order);
    let tag = r.read_u8()?;
    if tag != 1 {
        return Err(X11Error::bad_value(0, tag as u32, 0));
    }
    let detail = r.read_u8()?;
    let sequence = r.read_u16()?;
    let length = r.read_u32()? as usize;
    let expected = length.checked_mul(4).and_then(|n| n.checked_add(32));
    if expected != Some(bytes.len()) {
        log::debug!(
            "Reply seq={} declares {} words but frame has {} bytes",
            sequence,
            length,
            bytes.len()
        );
        return Err(X11Error::bad_length(sequence, 0));
    }
    Ok((detail, sequence, r))
}

/// Decode a reply frame into a specific reply type.
pub fn decode_reply_body<T: ReplyBody>(bytes: &[u8], order: ByteOrder) -> X11Result<(u16, T)> {
    let (detail, sequence, mut r) = open_reply_frame(bytes, order)?;
    let body = T::read_fields(detail, &mut r).map_err(|e| e.with_sequence(sequence))?;
    Ok((sequence, body))
}

/// Read a `u16` count at byte 8 and that many records from byte 32.
fn read_counted<T: WireField>(r: &mut WireReader<'_>) -> X11Result<Vec<T>> {
    let count = r.read_u16()? as usize;
    r.skip_to(32)?;
    let items = r.read_list(count)?;
    r.finish_padded()?;
    Ok(items)
}

/// Write a `u16` count at byte 8 and the records from byte 32. Items beyond
/// what the count can hold are dropped.
fn write_counted<T: WireField>(w: &mut WireWriter, items: &[T]) {
    let items = clamp_u16(items);
    w.write_u16(items.len() as u16);
    w.pad_to(32);
    w.write_list(items);
}

/// Read `count` STRs starting at byte 32.
fn read_strs(r: &mut WireReader<'_>, count: usize) -> X11Result<Vec<Vec<u8>>> {
    r.skip_to(32)?;
    let mut names = Vec::with_capacity(count.min(r.remaining()));
    for _ in 0..count {
        names.push(r.read_str()?);
    }
    r.finish_padded()?;
    Ok(names)
}

fn write_strs(w: &mut WireWriter, names: &[Vec<u8>]) {
    w.pad_to(32);
    for name in names {
        w.write_str(name);
    }
}

/// Read records of `size` bytes filling the rest of the frame.
fn read_remaining<T: WireField>(r: &mut WireReader<'_>, size: usize) -> X11Result<Vec<T>> {
    r.skip_to(32)?;
    if r.remaining() % size != 0 {
        return Err(X11Error::bad_length(0, 0));
    }
    r.read_list(r.remaining() / size)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetWindowAttributesReply {
    pub backing_store: u8,
    pub visual: VisualID,
    pub class: WindowClass,
    pub bit_gravity: u8,
    pub win_gravity: u8,
    pub backing_planes: u32,
    pub backing_pixel: u32,
    pub save_under: bool,
    pub map_is_installed: bool,
    pub map_state: u8,
    pub override_redirect: bool,
    pub colormap: Colormap,
    pub all_event_masks: u32,
    pub your_event_mask: u32,
    pub do_not_propagate_mask: u16,
}

fixed_reply!(GetWindowAttributesReply, detail: backing_store, {
    visual, class, bit_gravity, win_gravity, backing_planes, backing_pixel, save_under,
    map_is_installed, map_state, override_redirect, colormap, all_event_masks,
    your_event_mask, do_not_propagate_mask
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetGeometryReply {
    pub depth: u8,
    pub root: Window,
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    pub border_width: u16,
}

fixed_reply!(GetGeometryReply, detail: depth, { root, x, y, width, height, border_width });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryTreeReply {
    pub root: Window,
    pub parent: Window,
    pub children: Vec<Window>,
}

impl ReplyBody for QueryTreeReply {
    fn write_fields(&self, w: &mut WireWriter) {
        w.write(&self.root);
        w.write(&self.parent);
        write_counted(w, &self.children);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(QueryTreeReply {
            root: r.read()?,
            parent: r.read()?,
            children: read_counted(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InternAtomReply {
    pub atom: Atom,
}

fixed_reply!(InternAtomReply, { atom });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetAtomNameReply {
    pub name: Vec<u8>,
}

impl ReplyBody for GetAtomNameReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let name = clamp_u16(&self.name);
        w.write_u16(name.len() as u16);
        w.pad_to(32);
        w.write_bytes(name);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let len = r.read_u16()? as usize;
        r.skip_to(32)?;
        let name = r.take(len)?.to_vec();
        r.finish_padded()?;
        Ok(GetAtomNameReply { name })
    }
}

/// GetProperty; `value` holds whole `format`-bit units. A value ending in a
/// partial unit is zero-padded to a whole one when encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetPropertyReply {
    pub format: u8,
    pub type_: Atom,
    pub bytes_after: u32,
    pub value: Vec<u8>,
}

impl ReplyBody for GetPropertyReply {
    fn detail(&self) -> u8 {
        self.format
    }

    fn write_fields(&self, w: &mut WireWriter) {
        w.write(&self.type_);
        w.write_u32(self.bytes_after);
        w.write_u32(format_units(self.format, self.value.len()));
        w.pad_to(32);
        w.write_bytes(&self.value);
    }

    fn read_fields(format: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let type_ = r.read()?;
        let bytes_after = r.read_u32()?;
        let units = r.read_u32()? as usize;
        // Format 0 means the property does not exist.
        let unit = match format {
            0 => 0,
            _ => format_unit_size(format)?,
        };
        r.skip_to(32)?;
        let value = r.take(list_bytes(units, unit)?)?.to_vec();
        r.finish_padded()?;
        Ok(GetPropertyReply {
            format,
            type_,
            bytes_after,
            value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListPropertiesReply {
    pub atoms: Vec<Atom>,
}

impl ReplyBody for ListPropertiesReply {
    fn write_fields(&self, w: &mut WireWriter) {
        write_counted(w, &self.atoms);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(ListPropertiesReply {
            atoms: read_counted(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetSelectionOwnerReply {
    pub owner: Window,
}

fixed_reply!(GetSelectionOwnerReply, { owner });

/// Replies whose only content is a status byte: GrabPointer, GrabKeyboard,
/// SetPointerMapping, SetModifierMapping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusReply {
    pub status: u8,
}

fixed_reply!(StatusReply, detail: status, {});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPointerReply {
    pub same_screen: bool,
    pub root: Window,
    pub child: Window,
    pub root_x: i16,
    pub root_y: i16,
    pub win_x: i16,
    pub win_y: i16,
    pub mask: u16,
}

fixed_reply!(QueryPointerReply, detail: same_screen, {
    root, child, root_x, root_y, win_x, win_y, mask
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeCoord {
    pub time: Timestamp,
    pub x: i16,
    pub y: i16,
}

impl WireField for TimeCoord {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(TimeCoord {
            time: r.read()?,
            x: r.read_i16()?,
            y: r.read_i16()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write(&self.time);
        w.write_i16(self.x);
        w.write_i16(self.y);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetMotionEventsReply {
    pub events: Vec<TimeCoord>,
}

impl ReplyBody for GetMotionEventsReply {
    fn write_fields(&self, w: &mut WireWriter) {
        w.write_u32(self.events.len() as u32);
        w.pad_to(32);
        w.write_list(&self.events);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u32()? as usize;
        r.skip_to(32)?;
        let events = r.read_list(count)?;
        r.finish_padded()?;
        Ok(GetMotionEventsReply { events })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslateCoordinatesReply {
    pub same_screen: bool,
    pub child: Window,
    pub dst_x: i16,
    pub dst_y: i16,
}

fixed_reply!(TranslateCoordinatesReply, detail: same_screen, { child, dst_x, dst_y });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetInputFocusReply {
    pub revert_to: u8,
    pub focus: Window,
}

fixed_reply!(GetInputFocusReply, detail: revert_to, { focus });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryKeymapReply {
    pub keys: [u8; 32],
}

fixed_reply!(QueryKeymapReply, { keys });

/// Per-glyph metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharInfo {
    pub left_side_bearing: i16,
    pub right_side_bearing: i16,
    pub character_width: i16,
    pub ascent: i16,
    pub descent: i16,
    pub attributes: u16,
}

impl WireField for CharInfo {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(CharInfo {
            left_side_bearing: r.read_i16()?,
            right_side_bearing: r.read_i16()?,
            character_width: r.read_i16()?,
            ascent: r.read_i16()?,
            descent: r.read_i16()?,
            attributes: r.read_u16()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_i16(self.left_side_bearing);
        w.write_i16(self.right_side_bearing);
        w.write_i16(self.character_width);
        w.write_i16(self.ascent);
        w.write_i16(self.descent);
        w.write_u16(self.attributes);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontProp {
    pub name: Atom,
    pub value: u32,
}

impl WireField for FontProp {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(FontProp {
            name: r.read()?,
            value: r.read_u32()?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write(&self.name);
        w.write_u32(self.value);
    }
}

/// Font metrics shared by QueryFont and ListFontsWithInfo.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontInfo {
    pub min_bounds: CharInfo,
    pub max_bounds: CharInfo,
    pub min_char_or_byte2: u16,
    pub max_char_or_byte2: u16,
    pub default_char: u16,
    pub draw_direction: u8,
    pub min_byte1: u8,
    pub max_byte1: u8,
    pub all_chars_exist: bool,
    pub font_ascent: i16,
    pub font_descent: i16,
    pub properties: Vec<FontProp>,
}

impl FontInfo {
    /// Bytes 8..60; `extra` is the word at 56, whose meaning differs per reply.
    fn write_head(&self, w: &mut WireWriter, extra: u32) {
        w.write(&self.min_bounds);
        w.write_zeros(4);
        w.write(&self.max_bounds);
        w.write_zeros(4);
        w.write_u16(self.min_char_or_byte2);
        w.write_u16(self.max_char_or_byte2);
        w.write_u16(self.default_char);
        let properties = clamp_u16(&self.properties);
        w.write_u16(properties.len() as u16);
        w.write_u8(self.draw_direction);
        w.write_u8(self.min_byte1);
        w.write_u8(self.max_byte1);
        w.write_bool(self.all_chars_exist);
        w.write_i16(self.font_ascent);
        w.write_i16(self.font_descent);
        w.write_u32(extra);
        w.write_list(properties);
    }

    fn read_head(r: &mut WireReader<'_>) -> X11Result<(Self, u32)> {
        let min_bounds = r.read()?;
        r.skip(4)?;
        let max_bounds = r.read()?;
        r.skip(4)?;
        let min_char_or_byte2 = r.read_u16()?;
        let max_char_or_byte2 = r.read_u16()?;
        let default_char = r.read_u16()?;
        let prop_count = r.read_u16()? as usize;
        let draw_direction = r.read_u8()?;
        let min_byte1 = r.read_u8()?;
        let max_byte1 = r.read_u8()?;
        let all_chars_exist = r.read_bool()?;
        let font_ascent = r.read_i16()?;
        let font_descent = r.read_i16()?;
        let extra = r.read_u32()?;
        let properties = r.read_list(prop_count)?;
        let info = FontInfo {
            min_bounds,
            max_bounds,
            min_char_or_byte2,
            max_char_or_byte2,
            default_char,
            draw_direction,
            min_byte1,
            max_byte1,
            all_chars_exist,
            font_ascent,
            font_descent,
            properties,
        };
        Ok((info, extra))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryFontReply {
    pub info: FontInfo,
    pub char_infos: Vec<CharInfo>,
}

impl ReplyBody for QueryFontReply {
    fn write_fields(&self, w: &mut WireWriter) {
        self.info.write_head(w, self.char_infos.len() as u32);
        w.write_list(&self.char_infos);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let (info, count) = FontInfo::read_head(r)?;
        let char_infos = r.read_list(count as usize)?;
        r.finish_padded()?;
        Ok(QueryFontReply { info, char_infos })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryTextExtentsReply {
    pub draw_direction: u8,
    pub font_ascent: i16,
    pub font_descent: i16,
    pub overall_ascent: i16,
    pub overall_descent: i16,
    pub overall_width: i32,
    pub overall_left: i32,
    pub overall_right: i32,
}

fixed_reply!(QueryTextExtentsReply, detail: draw_direction, {
    font_ascent, font_descent, overall_ascent, overall_descent, overall_width,
    overall_left, overall_right
});

/// ListFonts, and the font names of GetFontPath / ListExtensions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListFontsReply {
    pub names: Vec<Vec<u8>>,
}

impl ReplyBody for ListFontsReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let names = clamp_u16(&self.names);
        w.write_u16(names.len() as u16);
        write_strs(w, names);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u16()? as usize;
        Ok(ListFontsReply {
            names: read_strs(r, count)?,
        })
    }
}

/// One reply of a ListFontsWithInfo series. The series ends with a reply
/// whose name is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListFontsWithInfoReply {
    pub name: Vec<u8>,
    pub info: FontInfo,
    pub replies_hint: u32,
}

impl ListFontsWithInfoReply {
    pub fn is_last(&self) -> bool {
        self.name.is_empty()
    }
}

impl ReplyBody for ListFontsWithInfoReply {
    fn detail(&self) -> u8 {
        clamp_u8(&self.name).len() as u8
    }

    fn write_fields(&self, w: &mut WireWriter) {
        self.info.write_head(w, self.replies_hint);
        w.write_bytes(clamp_u8(&self.name));
    }

    fn read_fields(name_len: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let (info, replies_hint) = FontInfo::read_head(r)?;
        let name = r.take(name_len as usize)?.to_vec();
        r.finish_padded()?;
        Ok(ListFontsWithInfoReply {
            name,
            info,
            replies_hint,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetFontPathReply {
    pub paths: Vec<Vec<u8>>,
}

impl ReplyBody for GetFontPathReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let paths = clamp_u16(&self.paths);
        w.write_u16(paths.len() as u16);
        write_strs(w, paths);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u16()? as usize;
        Ok(GetFontPathReply {
            paths: read_strs(r, count)?,
        })
    }
}

/// GetImage; `data` must already be padded to a multiple of four bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetImageReply {
    pub depth: u8,
    pub visual: VisualID,
    pub data: Vec<u8>,
}

impl ReplyBody for GetImageReply {
    fn detail(&self) -> u8 {
        self.depth
    }

    fn write_fields(&self, w: &mut WireWriter) {
        w.write(&self.visual);
        w.pad_to(32);
        w.write_bytes(&self.data);
    }

    fn read_fields(depth: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let visual = r.read()?;
        r.skip_to(32)?;
        Ok(GetImageReply {
            depth,
            visual,
            data: r.rest().to_vec(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListInstalledColormapsReply {
    pub cmaps: Vec<Colormap>,
}

impl ReplyBody for ListInstalledColormapsReply {
    fn write_fields(&self, w: &mut WireWriter) {
        write_counted(w, &self.cmaps);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(ListInstalledColormapsReply {
            cmaps: read_counted(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocColorReply {
    pub color: Rgb,
    pub pixel: u32,
}

impl ReplyBody for AllocColorReply {
    fn write_fields(&self, w: &mut WireWriter) {
        w.write(&self.color);
        w.write_zeros(2);
        w.write_u32(self.pixel);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let color = r.read()?;
        r.skip(2)?;
        let pixel = r.read_u32()?;
        r.skip_to(32)?;
        r.finish_padded()?;
        Ok(AllocColorReply { color, pixel })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocNamedColorReply {
    pub pixel: u32,
    pub exact: Rgb,
    pub visual: Rgb,
}

fixed_reply!(AllocNamedColorReply, { pixel, exact, visual });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocColorCellsReply {
    pub pixels: Vec<u32>,
    pub masks: Vec<u32>,
}

impl ReplyBody for AllocColorCellsReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let pixels = clamp_u16(&self.pixels);
        let masks = clamp_u16(&self.masks);
        w.write_u16(pixels.len() as u16);
        w.write_u16(masks.len() as u16);
        w.pad_to(32);
        w.write_list(pixels);
        w.write_list(masks);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let pixel_count = r.read_u16()? as usize;
        let mask_count = r.read_u16()? as usize;
        r.skip_to(32)?;
        let pixels = r.read_list(pixel_count)?;
        let masks = r.read_list(mask_count)?;
        r.finish_padded()?;
        Ok(AllocColorCellsReply { pixels, masks })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocColorPlanesReply {
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub pixels: Vec<u32>,
}

impl ReplyBody for AllocColorPlanesReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let pixels = clamp_u16(&self.pixels);
        w.write_u16(pixels.len() as u16);
        w.write_zeros(2);
        w.write_u32(self.red_mask);
        w.write_u32(self.green_mask);
        w.write_u32(self.blue_mask);
        w.pad_to(32);
        w.write_list(pixels);
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u16()? as usize;
        r.skip(2)?;
        let red_mask = r.read_u32()?;
        let green_mask = r.read_u32()?;
        let blue_mask = r.read_u32()?;
        r.skip_to(32)?;
        let pixels = r.read_list(count)?;
        r.finish_padded()?;
        Ok(AllocColorPlanesReply {
            red_mask,
            green_mask,
            blue_mask,
            pixels,
        })
    }
}

/// QueryColors; each color travels as RGB plus two unused bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryColorsReply {
    pub colors: Vec<Rgb>,
}

impl ReplyBody for QueryColorsReply {
    fn write_fields(&self, w: &mut WireWriter) {
        let colors = clamp_u16(&self.colors);
        w.write_u16(colors.len() as u16);
        w.pad_to(32);
        for color in colors {
            w.write(color);
            w.write_zeros(2);
        }
    }

    fn read_fields(_detail: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let count = r.read_u16()? as usize;
        r.skip_to(32)?;
        let mut colors = Vec::with_capacity(count.min(r.remaining() / 8));
        for _ in 0..count {
            colors.push(r.read()?);
            r.skip(2)?;
        }
        r.finish_padded()?;
        Ok(QueryColorsReply { colors })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupColorReply {
    pub exact: Rgb,
    pub visual: Rgb,
}

fixed_reply!(LookupColorReply, { exact, visual });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryBestSizeReply {
    pub width: u16,
    pub height: u16,
}

fixed_reply!(QueryBestSizeReply, { width, height });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryExtensionReply {
    pub present: bool,
    pub major_opcode: u8,
    pub first_event: u8,
    pub first_error: u8,
}

fixed_reply!(QueryExtensionReply, { present, major_opcode, first_event, first_error });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListExtensionsReply {
    pub names: Vec<Vec<u8>>,
}

impl ReplyBody for ListExtensionsReply {
    fn detail(&self) -> u8 {
        clamp_u8(&self.names).len() as u8
    }

    fn write_fields(&self, w: &mut WireWriter) {
        write_strs(w, clamp_u8(&self.names));
    }

    fn read_fields(count: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(ListExtensionsReply {
            names: read_strs(r, count as usize)?,
        })
    }
}

/// GetKeyboardMapping; the keysym count follows from the reply length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetKeyboardMappingReply {
    pub keysyms_per_keycode: u8,
    pub keysyms: Vec<u32>,
}

impl ReplyBody for GetKeyboardMappingReply {
    fn detail(&self) -> u8 {
        self.keysyms_per_keycode
    }

    fn write_fields(&self, w: &mut WireWriter) {
        w.pad_to(32);
        w.write_list(&self.keysyms);
    }

    fn read_fields(keysyms_per_keycode: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(GetKeyboardMappingReply {
            keysyms_per_keycode,
            keysyms: read_remaining(r, 4)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetKeyboardControlReply {
    pub global_auto_repeat: u8,
    pub led_mask: u32,
    pub key_click_percent: u8,
    pub bell_percent: u8,
    pub bell_pitch: u16,
    pub bell_duration: u16,
    pub auto_repeats: [u8; 32],
}

impl ReplyBody for GetKeyboardControlReply {
    fn detail(&self) -> u8 {
        self.global_auto_repeat
    }

    fn write_fields(&self, w: &mut WireWriter) {
        w.write_u32(self.led_mask);
        w.write_u8(self.key_click_percent);
        w.write_u8(self.bell_percent);
        w.write_u16(self.bell_pitch);
        w.write_u16(self.bell_duration);
        w.write_zeros(2);
        w.write(&self.auto_repeats);
    }

    fn read_fields(global_auto_repeat: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        let led_mask = r.read_u32()?;
        let key_click_percent = r.read_u8()?;
        let bell_percent = r.read_u8()?;
        let bell_pitch = r.read_u16()?;
        let bell_duration = r.read_u16()?;
        r.skip(2)?;
        let auto_repeats = r.read()?;
        r.finish_padded()?;
        Ok(GetKeyboardControlReply {
            global_auto_repeat,
            led_mask,
            key_click_percent,
            bell_percent,
            bell_pitch,
            bell_duration,
            auto_repeats,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetPointerControlReply {
    pub acceleration_numerator: u16,
    pub acceleration_denominator: u16,
    pub threshold: u16,
}

fixed_reply!(GetPointerControlReply, {
    acceleration_numerator, acceleration_denominator, threshold
});

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetScreenSaverReply {
    pub timeout: u16,
    pub interval: u16,
    pub prefer_blanking: u8,
    pub allow_exposures: u8,
}

fixed_reply!(GetScreenSaverReply, { timeout, interval, prefer_blanking, allow_exposures });

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Host {
    pub family: u8,
    pub address: Vec<u8>,
}

impl WireField for Host {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        let family = r.read_u8()?;
        r.skip(1)?;
        let len = r.read_u16()? as usize;
        Ok(Host {
            family,
            address: r.read_padded_bytes(len)?,
        })
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_u8(self.family);
        w.write_zeros(1);
        let address = clamp_u16(&self.address);
        w.write_u16(address.len() as u16);
        w.write_padded_bytes(address);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListHostsReply {
    pub mode: u8,
    pub hosts: Vec<Host>,
}

impl ReplyBody for ListHostsReply {
    fn detail(&self) -> u8 {
        self.mode
    }

    fn write_fields(&self, w: &mut WireWriter) {
        write_counted(w, &self.hosts);
    }

    fn read_fields(mode: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        Ok(ListHostsReply {
            mode,
            hosts: read_counted(r)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetPointerMappingReply {
    pub map: Vec<u8>,
}

impl ReplyBody for GetPointerMappingReply {
    fn detail(&self) -> u8 {
        clamp_u8(&self.map).len() as u8
    }

    fn write_fields(&self, w: &mut WireWriter) {
        w.pad_to(32);
        w.write_bytes(clamp_u8(&self.map));
    }

    fn read_fields(len: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.skip_to(32)?;
        let map = r.take(len as usize)?.to_vec();
        r.finish_padded()?;
        Ok(GetPointerMappingReply { map })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetModifierMappingReply {
    pub keycodes_per_modifier: u8,
    pub keycodes: Vec<Keycode>,
}

impl ReplyBody for GetModifierMappingReply {
    fn detail(&self) -> u8 {
        self.keycodes_per_modifier
    }

    fn write_fields(&self, w: &mut WireWriter) {
        w.pad_to(32);
        w.write_list(&self.keycodes);
    }

    fn read_fields(keycodes_per_modifier: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        r.skip_to(32)?;
        let keycodes = r.read_list(keycodes_per_modifier as usize * 8)?;
        r.finish()?;
        Ok(GetModifierMappingReply {
            keycodes_per_modifier,
            keycodes,
        })
    }
}

/// Any reply this codec understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    GetWindowAttributes(GetWindowAttributesReply),
    GetGeometry(GetGeometryReply),
    QueryTree(QueryTreeReply),
    InternAtom(InternAtomReply),
    GetAtomName(GetAtomNameReply),
    GetProperty(GetPropertyReply),
    ListProperties(ListPropertiesReply),
    GetSelectionOwner(GetSelectionOwnerReply),
    GrabPointer(StatusReply),
    GrabKeyboard(StatusReply),
    QueryPointer(QueryPointerReply),
    GetMotionEvents(GetMotionEventsReply),
    TranslateCoordinates(TranslateCoordinatesReply),
    GetInputFocus(GetInputFocusReply),
    QueryKeymap(QueryKeymapReply),
    QueryFont(QueryFontReply),
    QueryTextExtents(QueryTextExtentsReply),
    ListFonts(ListFontsReply),
    ListFontsWithInfo(ListFontsWithInfoReply),
    GetFontPath(GetFontPathReply),
    GetImage(GetImageReply),
    ListInstalledColormaps(ListInstalledColormapsReply),
    AllocColor(AllocColorReply),
    AllocNamedColor(AllocNamedColorReply),
    AllocColorCells(AllocColorCellsReply),
    AllocColorPlanes(AllocColorPlanesReply),
    QueryColors(QueryColorsReply),
    LookupColor(LookupColorReply),
    QueryBestSize(QueryBestSizeReply),
    QueryExtension(QueryExtensionReply),
    ListExtensions(ListExtensionsReply),
    GetKeyboardMapping(GetKeyboardMappingReply),
    GetKeyboardControl(GetKeyboardControlReply),
    GetPointerControl(GetPointerControlReply),
    GetScreenSaver(GetScreenSaverReply),
    ListHosts(ListHostsReply),
    SetPointerMapping(StatusReply),
    GetPointerMapping(GetPointerMappingReply),
    SetModifierMapping(StatusReply),
    GetModifierMapping(GetModifierMappingReply),
    #[cfg(feature = "xinput")]
    XInput(XInputReply),
    #[cfg(feature = "big-requests")]
    BigRequestsEnable(BigRequestsEnableReply),
}

impl Reply {
    /// Encode the reply as a complete frame for request `sequence`.
    pub fn encode(&self, sequence: u16, order: ByteOrder) -> Vec<u8> {
        match self {
            Reply::GetWindowAttributes(r) => encode_reply(r, sequence, order),
            Reply::GetGeometry(r) => encode_reply(r, sequence, order),
            Reply::QueryTree(r) => encode_reply(r, sequence, order),
            Reply::InternAtom(r) => encode_reply(r, sequence, order),
            Reply::GetAtomName(r) => encode_reply(r, sequence, order),
            Reply::GetProperty(r) => encode_reply(r, sequence, order),
            Reply::ListProperties(r) => encode_reply(r, sequence, order),
            Reply::GetSelectionOwner(r) => encode_reply(r, sequence, order),
            Reply::GrabPointer(r)
            | Reply::GrabKeyboard(r)
            | Reply::SetPointerMapping(r)
            | Reply::SetModifierMapping(r) => encode_reply(r, sequence, order),
            Reply::QueryPointer(r) => encode_reply(r, sequence, order),
            Reply::GetMotionEvents(r) => encode_reply(r, sequence, order),
            Reply::TranslateCoordinates(r) => encode_reply(r, sequence, order),
            Reply::GetInputFocus(r) => encode_reply(r, sequence, order),
            Reply::QueryKeymap(r) => encode_reply(r, sequence, order),
            Reply::QueryFont(r) => encode_reply(r, sequence, order),
            Reply::QueryTextExtents(r) => encode_reply(r, sequence, order),
            Reply::ListFonts(r) => encode_reply(r, sequence, order),
            Reply::ListFontsWithInfo(r) => encode_reply(r, sequence, order),
            Reply::GetFontPath(r) => encode_reply(r, sequence, order),
            Reply::GetImage(r) => encode_reply(r, sequence, order),
            Reply::ListInstalledColormaps(r) => encode_reply(r, sequence, order),
            Reply::AllocColor(r) => encode_reply(r, sequence, order),
            Reply::AllocNamedColor(r) => encode_reply(r, sequence, order),
            Reply::AllocColorCells(r) => encode_reply(r, sequence, order),
            Reply::AllocColorPlanes(r) => encode_reply(r, sequence, order),
            Reply::QueryColors(r) => encode_reply(r, sequence, order),
            Reply::LookupColor(r) => encode_reply(r, sequence, order),
            Reply::QueryBestSize(r) => encode_reply(r, sequence, order),
            Reply::QueryExtension(r) => encode_reply(r, sequence, order),
            Reply::ListExtensions(r) => encode_reply(r, sequence, order),
            Reply::GetKeyboardMapping(r) => encode_reply(r, sequence, order),
            Reply::GetKeyboardControl(r) => encode_reply(r, sequence, order),
            Reply::GetPointerControl(r) => encode_reply(r, sequence, order),
            Reply::GetScreenSaver(r) => encode_reply(r, sequence, order),
            Reply::ListHosts(r) => encode_reply(r, sequence, order),
            Reply::GetPointerMapping(r) => encode_reply(r, sequence, order),
            Reply::GetModifierMapping(r) => encode_reply(r, sequence, order),
            #[cfg(feature = "xinput")]
            Reply::XInput(r) => r.encode(sequence, order),
            #[cfg(feature = "big-requests")]
            Reply::BigRequestsEnable(r) => encode_reply(r, sequence, order),
        }
    }

    /// Opcode pair of the request this reply answers.
    pub fn request_opcodes(&self) -> (u8, u16) {
        use RequestOpcode as Op;
        let op = match self {
            Reply::GetWindowAttributes(_) => Op::GetWindowAttributes,
            Reply::GetGeometry(_) => Op::GetGeometry,
            Reply::QueryTree(_) => Op::QueryTree,
            Reply::InternAtom(_) => Op::InternAtom,
            Reply::GetAtomName(_) => Op::GetAtomName,
            Reply::GetProperty(_) => Op::GetProperty,
            Reply::ListProperties(_) => Op::ListProperties,
            Reply::GetSelectionOwner(_) => Op::GetSelectionOwner,
            Reply::GrabPointer(_) => Op::GrabPointer,
            Reply::GrabKeyboard(_) => Op::GrabKeyboard,
            Reply::QueryPointer(_) => Op::QueryPointer,
            Reply::GetMotionEvents(_) => Op::GetMotionEvents,
            Reply::TranslateCoordinates(_) => Op::TranslateCoordinates,
            Reply::GetInputFocus(_) => Op::GetInputFocus,
            Reply::QueryKeymap(_) => Op::QueryKeymap,
            Reply::QueryFont(_) => Op::QueryFont,
            Reply::QueryTextExtents(_) => Op::QueryTextExtents,
            Reply::ListFonts(_) => Op::ListFonts,
            Reply::ListFontsWithInfo(_) => Op::ListFontsWithInfo,
            Reply::GetFontPath(_) => Op::GetFontPath,
            Reply::GetImage(_) => Op::GetImage,
            Reply::ListInstalledColormaps(_) => Op::ListInstalledColormaps,
            Reply::AllocColor(_) => Op::AllocColor,
            Reply::AllocNamedColor(_) => Op::AllocNamedColor,
            Reply::AllocColorCells(_) => Op::AllocColorCells,
            Reply::AllocColorPlanes(_) => Op::AllocColorPlanes,
            Reply::QueryColors(_) => Op::QueryColors,
            Reply::LookupColor(_) => Op::LookupColor,
            Reply::QueryBestSize(_) => Op::QueryBestSize,
            Reply::QueryExtension(_) => Op::QueryExtension,
            Reply::ListExtensions(_) => Op::ListExtensions,
            Reply::GetKeyboardMapping(_) => Op::GetKeyboardMapping,
            Reply::GetKeyboardControl(_) => Op::GetKeyboardControl,
            Reply::GetPointerControl(_) => Op::GetPointerControl,
            Reply::GetScreenSaver(_) => Op::GetScreenSaver,
            Reply::ListHosts(_) => Op::ListHosts,
            Reply::SetPointerMapping(_) => Op::SetPointerMapping,
            Reply::GetPointerMapping(_) => Op::GetPointerMapping,
            Reply::SetModifierMapping(_) => Op::SetModifierMapping,
            Reply::GetModifierMapping(_) => Op::GetModifierMapping,
            #[cfg(feature = "xinput")]
            Reply::XInput(r) => return (XINPUT_MAJOR_OPCODE, r.minor_opcode() as u16),
            #[cfg(feature = "big-requests")]
            Reply::BigRequestsEnable(_) => return (BIG_REQUESTS_MAJOR_OPCODE, 0),
        };
        (op as u8, 0)
    }
}

fn wrap<T: ReplyBody>(
    bytes: &[u8],
    order: ByteOrder,
    variant: fn(T) -> Reply,
) -> X11Result<(u16, Reply)> {
    let (sequence, body) = decode_reply_body(bytes, order)?;
    Ok((sequence, variant(body)))
}

/// Decode a reply to the request identified by `(major, minor)`.
///
/// Replies are not self-describing; the caller supplies the opcode pair of
/// the outstanding request with the reply's sequence number.
pub fn decode_reply(
    major: u8,
    minor: u16,
    bytes: &[u8],
    order: ByteOrder,
) -> X11Result<(u16, Reply)> {
    log::trace!("Decoding reply for major={} minor={}", major, minor);
    let result = match major {
        XINPUT_MAJOR_OPCODE => decode_xinput_reply(minor, bytes, order),
        BIG_REQUESTS_MAJOR_OPCODE => decode_big_requests_reply(minor, bytes, order),
        _ => decode_core_reply(major, bytes, order),
    };
    result.map_err(|e| e.for_request(major, minor))
}

#[cfg(feature = "xinput")]
fn decode_xinput_reply(minor: u16, bytes: &[u8], order: ByteOrder) -> X11Result<(u16, Reply)> {
    let (sequence, reply) = XInputReply::decode(minor, bytes, order)?;
    Ok((sequence, Reply::XInput(reply)))
}

#[cfg(not(feature = "xinput"))]
fn decode_xinput_reply(_minor: u16, _bytes: &[u8], _order: ByteOrder) -> X11Result<(u16, Reply)> {
    Err(X11Error::bad_request(0, XINPUT_MAJOR_OPCODE))
}

#[cfg(feature = "big-requests")]
fn decode_big_requests_reply(
    minor: u16,
    bytes: &[u8],
    order: ByteOrder,
) -> X11Result<(u16, Reply)> {
    if minor != 0 {
        return Err(X11Error::bad_request(0, BIG_REQUESTS_MAJOR_OPCODE));
    }
    wrap(bytes, order, Reply::BigRequestsEnable)
}

#[cfg(not(feature = "big-requests"))]
fn decode_big_requests_reply(
    _minor: u16,
    _bytes: &[u8],
    _order: ByteOrder,
) -> X11Result<(u16, Reply)> {
    Err(X11Error::bad_request(0, BIG_REQUESTS_MAJOR_OPCODE))
}

fn decode_core_reply(major: u8, bytes: &[u8], order: ByteOrder) -> X11Result<(u16, Reply)> {
    let Some(op) = RequestOpcode::from_u8(major).filter(|op| op.has_reply()) else {
        return Err(X11Error::bad_request(0, major));
    };

    use RequestOpcode as Op;
    match op {
        Op::GetWindowAttributes => wrap(bytes, order, Reply::GetWindowAttributes),
        Op::GetGeometry => wrap(bytes, order, Reply::GetGeometry),
        Op::QueryTree => wrap(bytes, order, Reply::QueryTree),
        Op::InternAtom => wrap(bytes, order, Reply::InternAtom),
        Op::GetAtomName => wrap(bytes, order, Reply::GetAtomName),
        Op::GetProperty => wrap(bytes, order, Reply::GetProperty),
        Op::ListProperties => wrap(bytes, order, Reply::ListProperties),
        Op::GetSelectionOwner => wrap(bytes, order, Reply::GetSelectionOwner),
        Op::GrabPointer => wrap(bytes, order, Reply::GrabPointer),
        Op::GrabKeyboard => wrap(bytes, order, Reply::GrabKeyboard),
        Op::QueryPointer => wrap(bytes, order, Reply::QueryPointer),
        Op::GetMotionEvents => wrap(bytes, order, Reply::GetMotionEvents),
        Op::TranslateCoordinates => wrap(bytes, order, Reply::TranslateCoordinates),
        Op::GetInputFocus => wrap(bytes, order, Reply::GetInputFocus),
        Op::QueryKeymap => wrap(bytes, order, Reply::QueryKeymap),
        Op::QueryFont => wrap(bytes, order, Reply::QueryFont),
        Op::QueryTextExtents => wrap(bytes, order, Reply::QueryTextExtents),
        Op::ListFonts => wrap(bytes, order, Reply::ListFonts),
        Op::ListFontsWithInfo => wrap(bytes, order, Reply::ListFontsWithInfo),
        Op::GetFontPath => wrap(bytes, order, Reply::GetFontPath),
        Op::GetImage => wrap(bytes, order, Reply::GetImage),
        Op::ListInstalledColormaps => wrap(bytes, order, Reply::ListInstalledColormaps),
        Op::AllocColor => wrap(bytes, order, Reply::AllocColor),
        Op::AllocNamedColor => wrap(bytes, order, Reply::AllocNamedColor),
        Op::AllocColorCells => wrap(bytes, order, Reply::AllocColorCells),
        Op::AllocColorPlanes => wrap(bytes, order, Reply::AllocColorPlanes),
        Op::QueryColors => wrap(bytes, order, Reply::QueryColors),
        Op::LookupColor => wrap(bytes, order, Reply::LookupColor),
        Op::QueryBestSize => wrap(bytes, order, Reply::QueryBestSize),
        Op::QueryExtension => wrap(bytes, order, Reply::QueryExtension),
        Op::ListExtensions => wrap(bytes, order, Reply::ListExtensions),
        Op::GetKeyboardMapping => wrap(bytes, order, Reply::GetKeyboardMapping),
        Op::GetKeyboardControl => wrap(bytes, order, Reply::GetKeyboardControl),
        Op::GetPointerControl => wrap(bytes, order, Reply::GetPointerControl),
        Op::GetScreenSaver => wrap(bytes, order, Reply::GetScreenSaver),
        Op::ListHosts => wrap(bytes, order, Reply::ListHosts),
        Op::SetPointerMapping => wrap(bytes, order, Reply::SetPointerMapping),
        Op::GetPointerMapping => wrap(bytes, order, Reply::GetPointerMapping),
        Op::SetModifierMapping => wrap(bytes, order, Reply::SetModifierMapping),
        Op::GetModifierMapping => wrap(bytes, order, Reply::GetModifierMapping),
        _ => Err(X11Error::bad_request(0, major)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(reply: Reply) {
        let (major, minor) = reply.request_opcodes();
        for order in ByteOrder::ALL {
            let bytes = reply.encode(0x1234, order);
            assert!(bytes.len() >= 32);
            assert_eq!(bytes.len() % 4, 0);
            let (sequence, decoded) = decode_reply(major, minor, &bytes, order).unwrap();
            assert_eq!(sequence, 0x1234);
            assert_eq!(decoded, reply);
        }
    }

    #[test]
    fn test_three_word_list_reply() {
        let reply = Reply::ListProperties(ListPropertiesReply {
            atoms: vec![Atom::new(1), Atom::new(2), Atom::new(3)],
        });
        let bytes = reply.encode(15, ByteOrder::LSBFirst);
        assert_eq!(bytes.len(), 44);
        assert_eq!(bytes[0], 1);
        assert_eq!(&bytes[2..4], &[15, 0]);
        assert_eq!(&bytes[4..8], &[3, 0, 0, 0]);
        assert_eq!(&bytes[32..36], &[1, 0, 0, 0]);
        assert_eq!(&bytes[36..40], &[2, 0, 0, 0]);
        assert_eq!(&bytes[40..44], &[3, 0, 0, 0]);
    }

    #[test]
    fn test_window_attributes_layout() {
        let reply = GetWindowAttributesReply {
            backing_store: 1,
            win_gravity: 7,
            class: WindowClass::InputOutput,
            map_state: 2,
            ..Default::default()
        };
        let bytes = encode_reply(&reply, 1, ByteOrder::MSBFirst);
        assert_eq!(bytes.len(), 44);
        assert_eq!(bytes[1], 1);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 3]);
        assert_eq!(bytes[15], 7);
        assert_eq!(bytes[26], 2);
        round_trip(Reply::GetWindowAttributes(reply));
    }

    #[test]
    fn test_fixed_replies_are_32_bytes() {
        let bytes = encode_reply(&InternAtomReply { atom: Atom::new(300) }, 9, ByteOrder::LSBFirst);
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[4..8], &[0, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[0x2c, 0x01, 0, 0]);
    }

    #[test]
    fn test_detail_only_reply() {
        let bytes = encode_reply(&StatusReply { status: 3 }, 4, ByteOrder::MSBFirst);
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[1], 3);
        assert!(bytes[8..].iter().all(|b| *b == 0));
        round_trip(Reply::GrabPointer(StatusReply { status: 3 }));
    }

    #[test]
    fn test_get_property_units() {
        let reply = GetPropertyReply {
            format: 16,
            type_: Atom::INTEGER,
            bytes_after: 0,
            value: vec![1, 0, 2, 0, 3, 0],
        };
        let bytes = encode_reply(&reply, 2, ByteOrder::LSBFirst);
        assert_eq!(bytes[1], 16);
        assert_eq!(&bytes[16..20], &[3, 0, 0, 0]);
        assert_eq!(bytes.len(), 40);
        round_trip(Reply::GetProperty(reply));
    }

    #[test]
    fn test_partial_property_unit_is_zero_padded() {
        let reply = GetPropertyReply {
            format: 32,
            type_: Atom::INTEGER,
            bytes_after: 0,
            value: vec![0xaa, 0xbb, 0xcc, 0xdd, 0xee],
        };
        let bytes = encode_reply(&reply, 2, ByteOrder::LSBFirst);
        assert_eq!(&bytes[16..20], &[2, 0, 0, 0]);
        assert_eq!(bytes.len(), 40);
        let (_, decoded) = decode_reply(20, 0, &bytes, ByteOrder::LSBFirst).unwrap();
        let Reply::GetProperty(decoded) = decoded else {
            panic!("unexpected reply {:?}", decoded);
        };
        assert_eq!(decoded.value, [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0, 0, 0]);
    }

    #[test]
    fn test_counts_clamp_their_lists() {
        let order = ByteOrder::MSBFirst;
        let reply = ListPropertiesReply {
            atoms: (0..70_000).map(Atom::new).collect(),
        };
        let bytes = encode_reply(&reply, 1, order);
        assert_eq!(&bytes[8..10], &[0xff, 0xff]);
        assert_eq!(bytes.len(), 32 + 4 * 65535);
        let (_, decoded) = decode_reply(21, 0, &bytes, order).unwrap();
        let Reply::ListProperties(decoded) = decoded else {
            panic!("unexpected reply {:?}", decoded);
        };
        assert_eq!(decoded.atoms, reply.atoms[..65535]);

        let reply = Reply::GetPointerMapping(GetPointerMappingReply {
            map: vec![1; 300],
        });
        let bytes = reply.encode(1, order);
        assert_eq!(bytes[1], 255);
        assert_eq!(bytes.len(), 32 + 256);
        let (_, decoded) = decode_reply(117, 0, &bytes, order).unwrap();
        assert_eq!(
            decoded,
            Reply::GetPointerMapping(GetPointerMappingReply { map: vec![1; 255] })
        );
    }

    #[test]
    fn test_query_font_round_trip() {
        let bounds = CharInfo {
            left_side_bearing: -1,
            right_side_bearing: 7,
            character_width: 8,
            ascent: 11,
            descent: 2,
            attributes: 0,
        };
        round_trip(Reply::QueryFont(QueryFontReply {
            info: FontInfo {
                min_bounds: bounds,
                max_bounds: bounds,
                max_char_or_byte2: 255,
                all_chars_exist: true,
                font_ascent: 11,
                font_descent: 2,
                properties: vec![FontProp {
                    name: Atom::new(70),
                    value: 1,
                }],
                ..Default::default()
            },
            char_infos: vec![bounds; 3],
        }));
    }

    #[test]
    fn test_list_fonts_with_info_terminator() {
        let last = ListFontsWithInfoReply::default();
        assert!(last.is_last());
        let bytes = encode_reply(&last, 4, ByteOrder::MSBFirst);
        assert_eq!(bytes.len(), 60);
        assert_eq!(bytes[1], 0);
        round_trip(Reply::ListFontsWithInfo(last));
        round_trip(Reply::ListFontsWithInfo(ListFontsWithInfoReply {
            name: b"fixed".to_vec(),
            replies_hint: 1,
            ..Default::default()
        }));
    }

    #[test]
    fn test_variable_replies_round_trip() {
        round_trip(Reply::QueryTree(QueryTreeReply {
            root: Window::new(0x1e7),
            parent: Window::NONE,
            children: (1..=300).map(Window::new).collect(),
        }));
        round_trip(Reply::GetAtomName(GetAtomNameReply {
            name: b"_NET_WM_NAME".to_vec(),
        }));
        round_trip(Reply::ListExtensions(ListExtensionsReply {
            names: vec![b"BIG-REQUESTS".to_vec(), b"XInputExtension".to_vec()],
        }));
        round_trip(Reply::QueryColors(QueryColorsReply {
            colors: vec![Rgb { red: 1, green: 2, blue: 3 }; 5],
        }));
        round_trip(Reply::ListHosts(ListHostsReply {
            mode: 1,
            hosts: vec![Host {
                family: 0,
                address: vec![127, 0, 0, 1],
            }],
        }));
        round_trip(Reply::GetModifierMapping(GetModifierMappingReply {
            keycodes_per_modifier: 2,
            keycodes: (10..26).map(Keycode::new).collect(),
        }));
        round_trip(Reply::GetPointerMapping(GetPointerMappingReply {
            map: vec![1, 2, 3, 4, 5],
        }));
        round_trip(Reply::AllocColorCells(AllocColorCellsReply {
            pixels: vec![1, 2],
            masks: vec![0xf0],
        }));
        round_trip(Reply::GetKeyboardControl(GetKeyboardControlReply {
            global_auto_repeat: 1,
            bell_pitch: 400,
            auto_repeats: [0xff; 32],
            ..Default::default()
        }));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let mut bytes = encode_reply(
            &ListPropertiesReply {
                atoms: vec![Atom::new(1)],
            },
            3,
            ByteOrder::LSBFirst,
        );
        bytes.extend_from_slice(&[0; 4]);
        let err = decode_reply(21, 0, &bytes, ByteOrder::LSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
        assert_eq!(err.sequence, 3);
        assert_eq!(err.major_opcode, 21);

        // Count field claims more atoms than the frame holds.
        let mut bytes = encode_reply(&ListPropertiesReply::default(), 3, ByteOrder::LSBFirst);
        bytes[8] = 2;
        let err = decode_reply(21, 0, &bytes, ByteOrder::LSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_reply_without_request_is_rejected() {
        let bytes = encode_reply(&StatusReply { status: 0 }, 1, ByteOrder::LSBFirst);
        let err = decode_reply(8, 0, &bytes, ByteOrder::LSBFirst).unwrap_err();
        assert_eq!(err.code, ErrorCode::Request);
        assert_eq!(err.major_opcode, 8);
    }
}
