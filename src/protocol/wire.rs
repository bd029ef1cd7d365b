//! Primitive wire codec
//!
//! Byte-order-parameterized integer helpers plus the bounds-checked
//! [`WireReader`] and growable [`WireWriter`] that every message codec is
//! built on. Nothing here assumes a default byte order: it is always passed
//! in by the caller.

use super::errors::{X11Error, X11Result};
use super::types::{ByteOrder, Keycode};
use super::pad_len;
use byteorder::{BigEndian, ByteOrder as Endian, LittleEndian};

fn short_read() -> X11Error {
    X11Error::bad_length(0, 0)
}

/// Read a `u16` from the start of `bytes`.
pub fn read_u16(bytes: &[u8], order: ByteOrder) -> X11Result<u16> {
    let bytes = bytes.get(..2).ok_or_else(short_read)?;
    Ok(match order {
        ByteOrder::MSBFirst => BigEndian::read_u16(bytes),
        ByteOrder::LSBFirst => LittleEndian::read_u16(bytes),
    })
}

/// Read a `u32` from the start of `bytes`.
pub fn read_u32(bytes: &[u8], order: ByteOrder) -> X11Result<u32> {
    let bytes = bytes.get(..4).ok_or_else(short_read)?;
    Ok(match order {
        ByteOrder::MSBFirst => BigEndian::read_u32(bytes),
        ByteOrder::LSBFirst => LittleEndian::read_u32(bytes),
    })
}

/// Append a `u16` to `buf`.
pub fn write_u16(buf: &mut Vec<u8>, order: ByteOrder, value: u16) {
    let mut bytes = [0u8; 2];
    match order {
        ByteOrder::MSBFirst => BigEndian::write_u16(&mut bytes, value),
        ByteOrder::LSBFirst => LittleEndian::write_u16(&mut bytes, value),
    }
    buf.extend_from_slice(&bytes);
}

/// Append a `u32` to `buf`.
pub fn write_u32(buf: &mut Vec<u8>, order: ByteOrder, value: u32) {
    let mut bytes = [0u8; 4];
    match order {
        ByteOrder::MSBFirst => BigEndian::write_u32(&mut bytes, value),
        ByteOrder::LSBFirst => LittleEndian::write_u32(&mut bytes, value),
    }
    buf.extend_from_slice(&bytes);
}

/// Byte length of `count` records of `size` bytes, rejecting overflow.
pub fn list_bytes(count: usize, size: usize) -> X11Result<usize> {
    count.checked_mul(size).ok_or_else(short_read)
}

/// The leading part of `items` that a count field holding at most `max`
/// can describe. Encoders write the clamped count and exactly these items,
/// so the count always agrees with the payload.
pub fn clamp_list<T>(items: &[T], max: usize) -> &[T] {
    &items[..items.len().min(max)]
}

/// [`clamp_list`] for a one-byte count.
pub fn clamp_u8<T>(items: &[T]) -> &[T] {
    clamp_list(items, u8::MAX as usize)
}

/// [`clamp_list`] for a two-byte count.
pub fn clamp_u16<T>(items: &[T]) -> &[T] {
    clamp_list(items, u16::MAX as usize)
}

/// A value with a fixed wire representation.
pub trait WireField: Sized {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self>;
    fn write_to(&self, w: &mut WireWriter);
}

/// A value that travels in the one-byte "detail" slot of a header.
pub trait DetailByte: Sized {
    fn to_detail(&self) -> u8;
    fn from_detail(byte: u8) -> X11Result<Self>;
}

impl DetailByte for u8 {
    fn to_detail(&self) -> u8 {
        *self
    }

    fn from_detail(byte: u8) -> X11Result<Self> {
        Ok(byte)
    }
}

impl DetailByte for i8 {
    fn to_detail(&self) -> u8 {
        *self as u8
    }

    fn from_detail(byte: u8) -> X11Result<Self> {
        Ok(byte as i8)
    }
}

impl DetailByte for bool {
    fn to_detail(&self) -> u8 {
        *self as u8
    }

    fn from_detail(byte: u8) -> X11Result<Self> {
        decode_bool(byte)
    }
}

impl DetailByte for Keycode {
    fn to_detail(&self) -> u8 {
        self.get()
    }

    fn from_detail(byte: u8) -> X11Result<Self> {
        Ok(Keycode::new(byte))
    }
}

fn decode_bool(byte: u8) -> X11Result<bool> {
    match byte {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(X11Error::bad_value(0, other as u32, 0)),
    }
}

/// Bounds-checked cursor over a byte slice.
///
/// Every read checks the remaining length first and reports a `Length`
/// error instead of indexing past the end.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8], order: ByteOrder) -> Self {
        WireReader { buf, pos: 0, order }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail unless exactly `n` bytes are left.
    pub fn require_exact(&self, n: usize) -> X11Result<()> {
        if self.remaining() == n {
            Ok(())
        } else {
            Err(short_read())
        }
    }

    /// Fail unless at least `n` bytes are left.
    pub fn require_min(&self, n: usize) -> X11Result<()> {
        if self.remaining() >= n {
            Ok(())
        } else {
            Err(short_read())
        }
    }

    pub fn skip(&mut self, n: usize) -> X11Result<()> {
        self.take(n).map(|_| ())
    }

    /// Advance to absolute offset `pos`; a no-op when already past it.
    pub fn skip_to(&mut self, pos: usize) -> X11Result<()> {
        if pos > self.pos {
            self.skip(pos - self.pos)
        } else {
            Ok(())
        }
    }

    pub fn take(&mut self, n: usize) -> X11Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or_else(short_read)?;
        let slice = self.buf.get(self.pos..end).ok_or_else(short_read)?;
        self.pos = end;
        Ok(slice)
    }

    /// Everything left in the buffer.
    pub fn rest(&mut self) -> &'a [u8] {
        let slice = &self.buf[self.pos..];
        self.pos = self.buf.len();
        slice
    }

    pub fn read_u8(&mut self) -> X11Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i8(&mut self) -> X11Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_bool(&mut self) -> X11Result<bool> {
        decode_bool(self.read_u8()?)
    }

    pub fn read_u16(&mut self) -> X11Result<u16> {
        read_u16(self.take(2)?, self.order)
    }

    pub fn read_i16(&mut self) -> X11Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    pub fn read_u32(&mut self) -> X11Result<u32> {
        read_u32(self.take(4)?, self.order)
    }

    pub fn read_i32(&mut self) -> X11Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_array<const N: usize>(&mut self) -> X11Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read<T: WireField>(&mut self) -> X11Result<T> {
        T::read_from(self)
    }

    /// Read `count` consecutive records.
    pub fn read_list<T: WireField>(&mut self, count: usize) -> X11Result<Vec<T>> {
        // Every record is at least one byte, so this bounds the allocation.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(self.read()?);
        }
        Ok(items)
    }

    /// Read `n` bytes followed by their padding to a 4-byte boundary.
    pub fn read_padded_bytes(&mut self, n: usize) -> X11Result<Vec<u8>> {
        let bytes = self.take(n)?.to_vec();
        self.skip(pad_len(n))?;
        Ok(bytes)
    }

    /// Read a length-prefixed STR.
    pub fn read_str(&mut self) -> X11Result<Vec<u8>> {
        let len = self.read_u8()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    /// Fail unless the buffer has been consumed completely.
    pub fn finish(&self) -> X11Result<()> {
        self.require_exact(0)
    }

    /// Fail unless at most trailing padding (under one word) is left.
    pub fn finish_padded(&self) -> X11Result<()> {
        if self.remaining() < 4 {
            Ok(())
        } else {
            Err(short_read())
        }
    }
}

/// Growable output buffer bound to one byte order.
#[derive(Debug, Clone)]
pub struct WireWriter {
    buf: Vec<u8>,
    order: ByteOrder,
}

impl WireWriter {
    pub fn new(order: ByteOrder) -> Self {
        WireWriter {
            buf: Vec::new(),
            order,
        }
    }

    pub fn with_capacity(order: ByteOrder, capacity: usize) -> Self {
        WireWriter {
            buf: Vec::with_capacity(capacity),
            order,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        write_u16(&mut self.buf, self.order, value);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16);
    }

    pub fn write_u32(&mut self, value: u32) {
        write_u32(&mut self.buf, self.order, value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_zeros(&mut self, n: usize) {
        self.buf.resize(self.buf.len() + n, 0);
    }

    pub fn write<T: WireField>(&mut self, value: &T) {
        value.write_to(self);
    }

    pub fn write_list<T: WireField>(&mut self, items: &[T]) {
        for item in items {
            item.write_to(self);
        }
    }

    /// Write `bytes` and pad them to a 4-byte boundary.
    pub fn write_padded_bytes(&mut self, bytes: &[u8]) {
        self.write_bytes(bytes);
        self.write_zeros(pad_len(bytes.len()));
    }

    /// Write a length-prefixed STR. Names longer than 255 bytes are cut.
    pub fn write_str(&mut self, bytes: &[u8]) {
        let bytes = &bytes[..bytes.len().min(u8::MAX as usize)];
        self.write_u8(bytes.len() as u8);
        self.write_bytes(bytes);
    }

    /// Zero-fill to the next multiple of four bytes.
    pub fn pad(&mut self) {
        self.write_zeros(pad_len(self.buf.len()));
    }

    /// Zero-fill up to absolute length `len`.
    pub fn pad_to(&mut self, len: usize) {
        if self.buf.len() < len {
            self.buf.resize(len, 0);
        }
    }

    /// Overwrite a `u16` already written at `offset`.
    pub fn patch_u16(&mut self, offset: usize, value: u16) {
        let mut bytes = Vec::with_capacity(2);
        write_u16(&mut bytes, self.order, value);
        self.buf[offset..offset + 2].copy_from_slice(&bytes);
    }

    /// Overwrite a `u32` already written at `offset`.
    pub fn patch_u32(&mut self, offset: usize, value: u32) {
        let mut bytes = Vec::with_capacity(4);
        write_u32(&mut bytes, self.order, value);
        self.buf[offset..offset + 4].copy_from_slice(&bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Finish a fixed 32-byte frame.
    pub fn into_frame(mut self) -> [u8; 32] {
        self.pad_to(32);
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.buf[..32]);
        out
    }
}

macro_rules! wire_int {
    ($ty:ty, $read:ident, $write:ident) => {
        impl WireField for $ty {
            fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
                r.$read()
            }

            fn write_to(&self, w: &mut WireWriter) {
                w.$write(*self);
            }
        }
    };
}

wire_int!(u8, read_u8, write_u8);
wire_int!(i8, read_i8, write_i8);
wire_int!(bool, read_bool, write_bool);
wire_int!(u16, read_u16, write_u16);
wire_int!(i16, read_i16, write_i16);
wire_int!(u32, read_u32, write_u32);
wire_int!(i32, read_i32, write_i32);

impl<const N: usize> WireField for [u8; N] {
    fn read_from(r: &mut WireReader<'_>) -> X11Result<Self> {
        r.read_array()
    }

    fn write_to(&self, w: &mut WireWriter) {
        w.write_bytes(self);
    }
}

/// Implement `RequestBody` for a request whose body is a run of fixed-size
/// fields followed by padding up to `$size` bytes.
macro_rules! fixed_request {
    ($name:ident, $size:expr, detail: $detail:ident, { $($field:ident),* $(,)? }) => {
        impl $crate::protocol::requests::RequestBody for $name {
            fn detail(&self) -> u8 {
                $crate::protocol::wire::DetailByte::to_detail(&self.$detail)
            }

            fn write_body(&self, w: &mut $crate::protocol::wire::WireWriter) {
                let start = w.len();
                $( w.write(&self.$field); )*
                w.pad_to(start + $size);
            }

            fn read_body(
                detail: u8,
                r: &mut $crate::protocol::wire::WireReader<'_>,
            ) -> $crate::protocol::errors::X11Result<Self> {
                r.require_exact($size)?;
                let $detail = $crate::protocol::wire::DetailByte::from_detail(detail)?;
                $( let $field = r.read()?; )*
                Ok($name { $detail, $($field),* })
            }
        }
    };
    ($name:ident, $size:expr, { $($field:ident),* $(,)? }) => {
        impl $crate::protocol::requests::RequestBody for $name {
            fn write_body(&self, w: &mut $crate::protocol::wire::WireWriter) {
                let start = w.len();
                $( w.write(&self.$field); )*
                w.pad_to(start + $size);
            }

            fn read_body(
                _detail: u8,
                r: &mut $crate::protocol::wire::WireReader<'_>,
            ) -> $crate::protocol::errors::X11Result<Self> {
                r.require_exact($size)?;
                $( let $field = r.read()?; )*
                Ok($name { $($field),* })
            }
        }
    };
}

/// Implement `ReplyBody` for a reply made only of fixed fields starting at
/// byte 8.
macro_rules! fixed_reply {
    ($name:ident, detail: $detail:ident, { $($field:ident),* $(,)? }) => {
        impl $crate::protocol::replies::ReplyBody for $name {
            fn detail(&self) -> u8 {
                $crate::protocol::wire::DetailByte::to_detail(&self.$detail)
            }

            #[allow(unused_variables)]
            fn write_fields(&self, w: &mut $crate::protocol::wire::WireWriter) {
                $( w.write(&self.$field); )*
            }

            fn read_fields(
                detail: u8,
                r: &mut $crate::protocol::wire::WireReader<'_>,
            ) -> $crate::protocol::errors::X11Result<Self> {
                let $detail = $crate::protocol::wire::DetailByte::from_detail(detail)?;
                $( let $field = r.read()?; )*
                r.skip_to(32)?;
                r.finish_padded()?;
                Ok($name { $detail, $($field),* })
            }
        }
    };
    ($name:ident, { $($field:ident),* $(,)? }) => {
        impl $crate::protocol::replies::ReplyBody for $name {
            #[allow(unused_variables)]
            fn write_fields(&self, w: &mut $crate::protocol::wire::WireWriter) {
                $( w.write(&self.$field); )*
            }

            fn read_fields(
                _detail: u8,
                r: &mut $crate::protocol::wire::WireReader<'_>,
            ) -> $crate::protocol::errors::X11Result<Self> {
                $( let $field = r.read()?; )*
                r.skip_to(32)?;
                r.finish_padded()?;
                Ok($name { $($field),* })
            }
        }
    };
}

pub(crate) use fixed_reply;
pub(crate) use fixed_request;
