//! End-to-end checks of the concrete wire examples the codec must reproduce

mod common;

use common::{init_logging, request_frame};
use x11wire::protocol::*;

#[test]
fn value_error_frame() {
    init_logging();
    let err = X11Error::new(ErrorCode::Value, 1, 2, 3, 4);
    let bytes = encode_error(&err, ByteOrder::LSBFirst);

    let mut expected = [0u8; 32];
    expected[..11].copy_from_slice(&[0, 2, 1, 0, 2, 0, 0, 0, 3, 0, 4]);
    assert_eq!(bytes, expected);

    let decoded = decode_error(&bytes, ByteOrder::LSBFirst).unwrap();
    assert_eq!(decoded, err);
}

#[test]
fn reply_with_three_word_list() {
    init_logging();
    let reply = Reply::ListProperties(ListPropertiesReply {
        atoms: vec![Atom::new(1), Atom::new(2), Atom::new(3)],
    });
    let bytes = reply.encode(15, ByteOrder::LSBFirst);

    assert_eq!(bytes.len(), 44);
    assert_eq!(&bytes[2..4], &[15, 0]);
    assert_eq!(&bytes[4..8], &[3, 0, 0, 0]);
    assert_eq!(&bytes[32..36], &[1, 0, 0, 0]);
    assert_eq!(&bytes[36..40], &[2, 0, 0, 0]);
    assert_eq!(&bytes[40..44], &[3, 0, 0, 0]);

    let (sequence, decoded) = decode_reply(21, 0, &bytes, ByteOrder::LSBFirst).unwrap();
    assert_eq!(sequence, 15);
    assert_eq!(decoded, reply);
}

#[cfg(feature = "xinput")]
mod xinput_scenarios {
    use super::*;
    use x11wire::extensions::xinput::*;
    use x11wire::extensions::XINPUT_MAJOR_OPCODE;
    use x11wire::protocol::wire::write_u16;

    #[test]
    fn list_device_properties_body_length() {
        init_logging();
        let order = ByteOrder::LSBFirst;
        let frame = request_frame(XINPUT_MAJOR_OPCODE, 36, &[2, 0, 0, 0], order);
        let request = decode_request(&frame, order).unwrap();
        assert_eq!(
            request,
            Request::XInput(XInputRequest::ListDeviceProperties(DeviceRequest {
                device_id: 2
            }))
        );

        let err = decode_request_body(XINPUT_MAJOR_OPCODE, 36, &[2], order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Length);
        assert_eq!(err.major_opcode, XINPUT_MAJOR_OPCODE);
        assert_eq!(err.minor_opcode, 36);
    }

    #[test]
    fn unknown_device_control_is_value_error() {
        init_logging();
        for order in ByteOrder::ALL {
            let mut body = Vec::new();
            write_u16(&mut body, order, 99);
            body.extend_from_slice(&[2, 0]);
            write_u16(&mut body, order, 99);
            write_u16(&mut body, order, 8);
            body.extend_from_slice(&[0, 0, 0, 0]);
            let frame = request_frame(XINPUT_MAJOR_OPCODE, 35, &body, order);

            let err = decode_request(&frame, order).unwrap_err();
            assert_eq!(err.code, ErrorCode::Value);
            assert_eq!(err.bad_value, 99);
            assert_eq!(err.minor_opcode, 35);
        }
    }

    #[test]
    fn add_master_is_implementation_error() {
        init_logging();
        let order = ByteOrder::MSBFirst;
        // One change record: AddMaster, 3 words, name "ab", send_core, enable
        let body = [
            1, 0, 0, 0, // num_changes
            0, 1, 0, 3, // type, length
            0, 2, 1, 1, // name_len, send_core, enable
            b'a', b'b', 0, 0,
        ];
        let frame = request_frame(XINPUT_MAJOR_OPCODE, 43, &body, order);

        let err = decode_request(&frame, order).unwrap_err();
        assert_eq!(err.code, ErrorCode::Implementation);
        assert_eq!(err.bad_value, 1);
        assert_eq!(err.major_opcode, XINPUT_MAJOR_OPCODE);
        assert_eq!(err.minor_opcode, 43);
    }
}
