//! BIG-REQUESTS extension
//!
//! A single request, BigReqEnable, whose reply announces the largest
//! request length (in 4-byte units) the server accepts in the extended
//! length form.

use super::BIG_REQUESTS_MAJOR_OPCODE;
use crate::protocol::errors::{X11Error, X11Result};
use crate::protocol::wire::{fixed_reply, WireReader};

/// Minor opcode of BigReqEnable
pub const BIG_REQ_ENABLE: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BigRequestsRequest {
    Enable,
}

impl BigRequestsRequest {
    /// Decode a request body; `minor` is the request's detail byte.
    pub fn read_request(minor: u8, r: &mut WireReader<'_>) -> X11Result<Self> {
        if minor != BIG_REQ_ENABLE {
            return Err(X11Error::bad_request(0, BIG_REQUESTS_MAJOR_OPCODE));
        }
        r.require_exact(0)?;
        Ok(BigRequestsRequest::Enable)
    }

    pub fn minor_opcode(&self) -> u8 {
        match self {
            BigRequestsRequest::Enable => BIG_REQ_ENABLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BigRequestsEnableReply {
    pub maximum_request_length: u32,
}

fixed_reply!(BigRequestsEnableReply, { maximum_request_length });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::errors::ErrorCode;
    use crate::protocol::replies::{decode_reply_body, encode_reply};
    use crate::protocol::types::ByteOrder;

    #[test]
    fn test_enable_requires_empty_body() {
        let order = ByteOrder::LSBFirst;
        let mut r = WireReader::new(&[], order);
        assert_eq!(
            BigRequestsRequest::read_request(0, &mut r).unwrap(),
            BigRequestsRequest::Enable
        );

        let mut r = WireReader::new(&[0, 0, 0, 0], order);
        let err = BigRequestsRequest::read_request(0, &mut r).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
    }

    #[test]
    fn test_unknown_minor() {
        let mut r = WireReader::new(&[], ByteOrder::MSBFirst);
        let err = BigRequestsRequest::read_request(1, &mut r).unwrap_err();
        assert_eq!(err.code, ErrorCode::Request);
        assert_eq!(err.major_opcode, 133);
    }

    #[test]
    fn test_enable_reply() {
        let reply = BigRequestsEnableReply {
            maximum_request_length: 4_194_303,
        };
        let bytes = encode_reply(&reply, 3, ByteOrder::MSBFirst);
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[8..12], &[0x00, 0x3f, 0xff, 0xff]);
        let (sequence, decoded) =
            decode_reply_body::<BigRequestsEnableReply>(&bytes, ByteOrder::MSBFirst).unwrap();
        assert_eq!(sequence, 3);
        assert_eq!(decoded, reply);
    }
}
