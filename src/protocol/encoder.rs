//! X11 message encoder
//!
//! [`ProtocolEncoder`] binds the negotiated byte order once per connection
//! and forwards to the byte-order-parameterized encode functions.

use super::*;
use crate::extensions;

/// Message encoder for one connection
#[derive(Debug, Clone, Copy)]
pub struct ProtocolEncoder {
    byte_order: ByteOrder,
}

impl ProtocolEncoder {
    pub fn new(byte_order: ByteOrder) -> Self {
        ProtocolEncoder { byte_order }
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn encode_request(&self, request: &Request) -> Vec<u8> {
        request.encode(self.byte_order)
    }

    pub fn encode_reply(&self, sequence: u16, reply: &Reply) -> Vec<u8> {
        reply.encode(sequence, self.byte_order)
    }

    pub fn encode_error(&self, error: &X11Error) -> [u8; 32] {
        error.encode(self.byte_order)
    }

    pub fn encode_event(&self, event: &Event) -> [u8; 32] {
        event.encode(self.byte_order)
    }

    pub fn encode_message(&self, message: &Message) -> Vec<u8> {
        message.encode(self.byte_order)
    }

    /// Encode InternAtom reply
    pub fn encode_intern_atom_reply(&self, sequence: u16, atom: Atom) -> Vec<u8> {
        encode_reply(&InternAtomReply { atom }, sequence, self.byte_order)
    }

    /// Encode GetInputFocus reply
    pub fn encode_get_input_focus_reply(
        &self,
        sequence: u16,
        revert_to: u8,
        focus: Window,
    ) -> Vec<u8> {
        encode_reply(
            &GetInputFocusReply { revert_to, focus },
            sequence,
            self.byte_order,
        )
    }

    /// Encode the QueryExtension reply for `name` from the extension table.
    pub fn encode_query_extension_reply(&self, sequence: u16, name: &[u8]) -> Vec<u8> {
        let reply = match extensions::find_by_name(name) {
            Some(ext) => QueryExtensionReply {
                present: true,
                major_opcode: ext.major_opcode,
                first_event: ext.first_event,
                first_error: ext.first_error,
            },
            None => QueryExtensionReply::default(),
        };
        encode_reply(&reply, sequence, self.byte_order)
    }

    /// Encode ListExtensions reply naming every supported extension.
    pub fn encode_list_extensions_reply(&self, sequence: u16) -> Vec<u8> {
        let names = extensions::EXTENSIONS
            .iter()
            .map(|ext| ext.name.as_bytes().to_vec())
            .collect();
        encode_reply(&ListExtensionsReply { names }, sequence, self.byte_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_extension_reply() {
        let encoder = ProtocolEncoder::new(ByteOrder::LSBFirst);
        let bytes = encoder.encode_query_extension_reply(7, b"XInputExtension");
        let (sequence, reply) =
            decode_reply_body::<QueryExtensionReply>(&bytes, ByteOrder::LSBFirst).unwrap();
        assert_eq!(sequence, 7);
        if cfg!(feature = "xinput") {
            assert!(reply.present);
            assert_eq!(reply.major_opcode, 131);
            assert_eq!(reply.first_event, 66);
            assert_eq!(reply.first_error, 129);
        } else {
            assert!(!reply.present);
        }

        let bytes = encoder.encode_query_extension_reply(8, b"SHAPE");
        let (_, reply) =
            decode_reply_body::<QueryExtensionReply>(&bytes, ByteOrder::LSBFirst).unwrap();
        assert_eq!(reply, QueryExtensionReply::default());
    }

    #[test]
    fn test_encoder_uses_its_byte_order() {
        let big = ProtocolEncoder::new(ByteOrder::MSBFirst);
        let bytes = big.encode_intern_atom_reply(1, Atom::new(0x0102));
        assert_eq!(&bytes[2..4], &[0, 1]);
        assert_eq!(&bytes[8..12], &[0, 0, 1, 2]);
    }
}
