//! XInputExtension framing through the public request/reply entry points

#![cfg(feature = "xinput")]

mod common;

use common::init_logging;
use x11wire::extensions::xinput::*;
use x11wire::extensions::XINPUT_MAJOR_OPCODE;
use x11wire::protocol::*;

fn sample_requests() -> Vec<XInputRequest> {
    vec![
        XInputRequest::GetExtensionVersion(GetExtensionVersionRequest {
            name: b"XInputExtension".to_vec(),
        }),
        XInputRequest::ListInputDevices,
        XInputRequest::SelectExtensionEvent(SelectExtensionEventRequest {
            window: Window::new(0x600001),
            classes: vec![0x0205, 0x0206],
        }),
        XInputRequest::GrabDeviceButton(GrabDeviceButtonRequest {
            grab_window: Window::new(0x600001),
            grabbed_device: 4,
            modifier_device: 3,
            modifiers: 0x8000,
            this_device_mode: 1,
            other_devices_mode: 1,
            button: 1,
            owner_events: false,
            classes: vec![0x0401],
        }),
        XInputRequest::SetDeviceModifierMapping(SetDeviceModifierMappingRequest {
            device_id: 3,
            keycodes: (0..16).map(Keycode::new).collect(),
        }),
        XInputRequest::SetDeviceButtonMapping(SetDeviceButtonMappingRequest {
            device_id: 2,
            map: vec![3, 2, 1],
        }),
        XInputRequest::ChangeDeviceControl(ChangeDeviceControlRequest {
            device_id: 5,
            control: DeviceControl::Resolution {
                first_valuator: 1,
                resolutions: vec![100, 200, 300],
            },
        }),
        XInputRequest::ChangeFeedbackControl(ChangeFeedbackControlRequest {
            mask: FEEDBACK_KEY_CLICK_PERCENT | FEEDBACK_LED | FEEDBACK_LED_MODE,
            device_id: 3,
            control: FeedbackControl {
                feedback_id: 0,
                data: FeedbackControlData::Keyboard {
                    key: Keycode::new(0),
                    auto_repeat_mode: 0,
                    click: 80,
                    percent: -1,
                    pitch: -1,
                    duration: -1,
                    led_mask: 0b10,
                    led_values: 0b10,
                },
            },
        }),
        XInputRequest::ChangePointerDevice(ChangePointerDeviceRequest {
            x_axis: 0,
            y_axis: 1,
            device_id: 6,
        }),
        XInputRequest::SendExtensionEvent(SendExtensionEventRequest {
            destination: Window::new(0x600001),
            device_id: 4,
            propagate: false,
            events: vec![[0x45; 32]],
            classes: vec![0x0445],
        }),
        XInputRequest::SetDeviceValuators(SetDeviceValuatorsRequest {
            device_id: 5,
            first_valuator: 0,
            valuators: vec![10, -10],
        }),
        XInputRequest::ChangeDeviceProperty(ChangeDevicePropertyRequest {
            property: Atom::new(280),
            type_: Atom::INTEGER,
            device_id: 6,
            format: 32,
            mode: 0,
            data: vec![1, 0, 0, 0, 2, 0, 0, 0],
        }),
        XInputRequest::XIChangeHierarchy(XIChangeHierarchyRequest {
            changes: vec![HierarchyChange::DetachSlave { device_id: 9 }],
        }),
        XInputRequest::XIQueryPointer(XIQueryPointerRequest {
            window: Window::new(0x25),
            device_id: 2,
        }),
        XInputRequest::XIGrabDevice(XIGrabDeviceRequest {
            grab_window: Window::new(0x25),
            time: Timestamp::CURRENT_TIME,
            cursor: Cursor::NONE,
            device_id: 3,
            grab_mode: 1,
            paired_device_mode: 1,
            owner_events: true,
            mask: vec![0x0c],
        }),
        XInputRequest::XIAllowEvents(XIAllowEventsRequest {
            time: Timestamp::new(1000),
            device_id: 2,
            event_mode: 7,
            touch: Some(TouchRelease {
                touch_id: 3,
                grab_window: Window::new(0x25),
            }),
        }),
        XInputRequest::XIPassiveUngrabDevice(XIPassiveUngrabDeviceRequest {
            grab_window: Window::new(1),
            detail: 2,
            device_id: 3,
            grab_type: 0,
            modifiers: vec![0x10],
        }),
        XInputRequest::XIGetProperty(XIGetPropertyRequest {
            device_id: 3,
            delete: true,
            property: Atom::new(290),
            type_: Atom::NONE,
            offset: 0,
            len: 100,
        }),
        XInputRequest::XIBarrierReleasePointer(XIBarrierReleasePointerRequest {
            barriers: vec![BarrierReleaseInfo {
                device_id: 2,
                barrier: 0x800001,
                event_id: 7,
            }],
        }),
    ]
}

#[test]
fn requests_round_trip_as_frames() {
    init_logging();
    for order in ByteOrder::ALL {
        for xi in sample_requests() {
            let request = Request::XInput(xi);
            let frame = request.encode(order);
            assert_eq!(frame[0], XINPUT_MAJOR_OPCODE);
            assert_eq!(frame.len() % 4, 0);
            assert_eq!(request_frame_len(&frame, order), Some(frame.len()));
            assert_eq!(decode_request(&frame, order).unwrap(), request, "{:?}", order);
        }
    }
}

#[test]
fn parser_splits_pipelined_requests() {
    init_logging();
    let order = ByteOrder::MSBFirst;
    let parser = ProtocolParser::new(order);
    let first = Request::XInput(XInputRequest::XIQueryVersion(XIQueryVersionRequest {
        major_version: 2,
        minor_version: 3,
    }));
    let second = Request::XInput(XInputRequest::OpenDevice(DeviceRequest { device_id: 7 }));

    let mut stream = first.encode(order);
    stream.extend(second.encode(order));

    let (request, used) = parser.parse_request(&stream).unwrap().unwrap();
    assert_eq!(request, first);
    assert_eq!(request.minor_opcode(), 47);
    assert!(request.has_reply());
    let (request, rest) = parser.parse_request(&stream[used..]).unwrap().unwrap();
    assert_eq!(request, second);
    assert_eq!(used + rest, stream.len());
    assert_eq!(parser.parse_request(&stream[..used - 1]).unwrap(), None);
}

#[test]
fn replies_are_routed_by_outstanding_request() {
    init_logging();
    let order = ByteOrder::LSBFirst;
    let reply = Reply::XInput(XInputReply::GetFeedbackControl(GetFeedbackControlReply {
        feedbacks: vec![
            FeedbackState {
                feedback_id: 0,
                data: FeedbackData::Integer {
                    resolution: 1,
                    min_value: -100,
                    max_value: 100,
                },
            },
            FeedbackState {
                feedback_id: 1,
                data: FeedbackData::Led {
                    led_mask: 0b111,
                    led_values: 0b001,
                },
            },
        ],
    }));
    let bytes = reply.encode(42, order);
    assert_eq!(server_frame_len(&bytes, order), Some(bytes.len()));
    assert_eq!(reply.request_opcodes(), (XINPUT_MAJOR_OPCODE, 22));

    let message = decode_server_message(&bytes, order, |sequence| {
        assert_eq!(sequence, 42);
        Some((XINPUT_MAJOR_OPCODE, 22))
    })
    .unwrap();
    assert_eq!(
        message,
        Message::Reply {
            sequence: 42,
            reply
        }
    );
}

#[test]
fn query_device_state_reply() {
    init_logging();
    let order = ByteOrder::MSBFirst;
    let mut keys = [0u8; 32];
    keys[1] = 0x40; // keycode 14
    let reply = Reply::XInput(XInputReply::QueryDeviceState(QueryDeviceStateReply {
        classes: vec![
            InputState::Key { num_keys: 248, keys },
            InputState::Valuator {
                mode: 1,
                valuators: vec![512, -3],
            },
        ],
    }));
    let bytes = reply.encode(3, order);
    assert_eq!(bytes.len(), 32 + 36 + 12);
    assert_eq!(bytes[1], 30);
    assert_eq!(decode_reply(XINPUT_MAJOR_OPCODE, 30, &bytes, order).unwrap(), (3, reply));
}

#[test]
fn device_errors_round_trip() {
    init_logging();
    let err = X11Error::bad_device(12, 9, XINPUT_MAJOR_OPCODE).for_request(XINPUT_MAJOR_OPCODE, 3);
    let bytes = err.encode(ByteOrder::MSBFirst);
    assert_eq!(bytes[1], XINPUT_FIRST_ERROR);
    let decoded = decode_error(&bytes, ByteOrder::MSBFirst).unwrap();
    assert_eq!(decoded.code, ErrorCode::Device);
    assert_eq!(decoded, err);
}

#[test]
fn truncated_xinput_bodies_are_length_errors() {
    init_logging();
    let order = ByteOrder::LSBFirst;
    for xi in sample_requests() {
        let minor = xi.minor_opcode();
        let frame = Request::XInput(xi).encode(order);
        let body = &frame[4..];
        for cut in [0usize, 1, 3] {
            if body.len() <= cut {
                continue;
            }
            let short = &body[..body.len() - cut - 1];
            let err = decode_request_body(XINPUT_MAJOR_OPCODE, minor, short, order).unwrap_err();
            assert_eq!(err.code, ErrorCode::Length, "minor {} cut {}", minor, cut);
        }
    }
}

#[test]
fn grab_reply_follows_xi_grab_device() {
    init_logging();
    let order = ByteOrder::MSBFirst;
    let reply = Reply::XInput(XInputReply::XIGrabDevice(DeviceStatusReply { status: 0 }));
    let bytes = reply.encode(77, order);
    assert_eq!(bytes.len(), 32);
    assert_eq!(bytes[1], 51);
    assert_eq!(reply.request_opcodes(), (XINPUT_MAJOR_OPCODE, 51));
    assert_eq!(decode_reply(XINPUT_MAJOR_OPCODE, 51, &bytes, order).unwrap(), (77, reply));
}

#[test]
fn oversized_lists_encode_a_consistent_count() {
    init_logging();
    let order = ByteOrder::LSBFirst;
    let request = Request::XInput(XInputRequest::XIChangeHierarchy(XIChangeHierarchyRequest {
        changes: vec![HierarchyChange::DetachSlave { device_id: 9 }; 300],
    }));
    let frame = request.encode(order);
    assert_eq!(frame[4], 255);
    assert_eq!(request_frame_len(&frame, order), Some(frame.len()));
    let Request::XInput(XInputRequest::XIChangeHierarchy(decoded)) =
        decode_request(&frame, order).unwrap()
    else {
        panic!("expected XIChangeHierarchy");
    };
    assert_eq!(decoded.changes.len(), 255);

    let reply = Reply::XInput(XInputReply::ListInputDevices(ListInputDevicesReply {
        devices: (0..=255u8)
            .map(|device_id| DeviceInfo {
                device_id,
                name: b"slave".to_vec(),
                ..Default::default()
            })
            .collect(),
    }));
    let bytes = reply.encode(1, order);
    assert_eq!(bytes[8], 255);
    let (_, decoded) = decode_reply(XINPUT_MAJOR_OPCODE, 2, &bytes, order).unwrap();
    let Reply::XInput(XInputReply::ListInputDevices(decoded)) = decoded else {
        panic!("expected ListInputDevices");
    };
    assert_eq!(decoded.devices.len(), 255);
    assert_eq!(decoded.devices[254].device_id, 254);
}
