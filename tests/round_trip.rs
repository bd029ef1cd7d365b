//! Property tests: encode then decode returns the input, in both byte orders

mod common;

use proptest::prelude::*;
use x11wire::protocol::*;

fn any_order() -> impl Strategy<Value = ByteOrder> {
    prop_oneof![Just(ByteOrder::LSBFirst), Just(ByteOrder::MSBFirst)]
}

fn any_point() -> impl Strategy<Value = Point> {
    (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn error_frames(
        order in any_order(),
        code in any::<u8>(),
        sequence in any::<u16>(),
        bad_value in any::<u32>(),
        minor in any::<u16>(),
        major in any::<u8>(),
    ) {
        let err = X11Error::new(ErrorCode::from_u8(code), sequence, bad_value, minor, major);
        let bytes = encode_error(&err, order);
        prop_assert_eq!(bytes[0], 0);
        prop_assert_eq!(bytes[1], code);
        prop_assert_eq!(decode_error(&bytes, order).unwrap(), err);
    }

    #[test]
    fn key_press_events(
        order in any_order(),
        keycode in any::<u8>(),
        sequence in any::<u16>(),
        time in any::<u32>(),
        (root_x, root_y) in (any::<i16>(), any::<i16>()),
        (event_x, event_y) in (any::<i16>(), any::<i16>()),
        state in any::<u16>(),
        same_screen in any::<bool>(),
    ) {
        let event = Event::KeyPress(KeyPressEvent {
            detail: Keycode::new(keycode),
            sequence,
            time: Timestamp::new(time),
            root: Window::new(0x25),
            event: Window::new(0x400001),
            child: Window::NONE,
            root_x,
            root_y,
            event_x,
            event_y,
            state,
            same_screen,
        });
        let bytes = encode_event(&event, order);
        prop_assert_eq!(bytes[0], 2);
        prop_assert_eq!(decode_event(&bytes, order).unwrap(), event);
    }

    #[test]
    fn intern_atom_requests(
        order in any_order(),
        only_if_exists in any::<bool>(),
        name in proptest::collection::vec(any::<u8>(), 0..300),
    ) {
        let request = Request::InternAtom(InternAtomRequest { only_if_exists, name: name.clone() });
        let frame = request.encode(order);
        prop_assert_eq!(frame[0], 16);
        prop_assert_eq!(frame.len(), 8 + padded_len(name.len()));
        prop_assert_eq!(request_frame_len(&frame, order), Some(frame.len()));
        prop_assert_eq!(decode_request(&frame, order).unwrap(), request);
    }

    #[test]
    fn poly_point_requests(
        order in any_order(),
        coordinate_mode in 0u8..2,
        points in proptest::collection::vec(any_point(), 0..500),
    ) {
        let request = Request::PolyPoint(PolyPointRequest {
            coordinate_mode,
            drawable: Drawable::new(0x400002),
            gc: GContext::new(0x400003),
            points: points.clone(),
        });
        let frame = request.encode(order);
        prop_assert_eq!(frame.len(), 12 + 4 * points.len());
        let header_words = wire::read_u16(&frame[2..4], order).unwrap() as usize;
        prop_assert_eq!(header_words * 4, frame.len());
        prop_assert_eq!(decode_request(&frame, order).unwrap(), request);
    }

    #[test]
    fn put_image_requests(
        order in any_order(),
        words in 0usize..256,
        seed in any::<u8>(),
        (width, height) in (any::<u16>(), any::<u16>()),
        (dst_x, dst_y) in (any::<i16>(), any::<i16>()),
    ) {
        let data: Vec<u8> = (0..words * 4).map(|i| (i as u8).wrapping_add(seed)).collect();
        let request = Request::PutImage(PutImageRequest {
            format: 2,
            drawable: Drawable::new(0x400002),
            gc: GContext::new(0x400003),
            width,
            height,
            dst_x,
            dst_y,
            left_pad: 0,
            depth: 24,
            data,
        });
        let frame = request.encode(order);
        prop_assert_eq!(frame.len(), 24 + words * 4);
        prop_assert_eq!(request_frame_len(&frame, order), Some(frame.len()));
        prop_assert_eq!(decode_request(&frame, order).unwrap(), request);
    }

    #[test]
    fn query_tree_replies(
        order in any_order(),
        sequence in any::<u16>(),
        children in proptest::collection::vec(any::<u32>(), 0..400),
    ) {
        let reply = Reply::QueryTree(QueryTreeReply {
            root: Window::new(0x25),
            parent: Window::new(0x26),
            children: children.iter().copied().map(Window::new).collect(),
        });
        let bytes = reply.encode(sequence, order);
        prop_assert_eq!(bytes[0], 1);
        let length = wire::read_u32(&bytes[4..8], order).unwrap() as usize;
        prop_assert_eq!(bytes.len(), 32 + 4 * length);
        prop_assert_eq!(length, children.len());
        prop_assert_eq!(server_frame_len(&bytes, order), Some(bytes.len()));
        prop_assert_eq!(decode_reply(15, 0, &bytes, order).unwrap(), (sequence, reply));
    }

    #[test]
    fn pad_len_completes_a_word(n in 0usize..100_000) {
        let pad = pad_len(n);
        prop_assert!(pad < 4);
        prop_assert_eq!((n + pad) % 4, 0);
        prop_assert_eq!(padded_len(n), n + pad);
    }

    #[test]
    fn arbitrary_request_bytes_never_panic(
        order in any_order(),
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let _ = decode_request(&bytes, order);
        let _ = request_frame_len(&bytes, order);
    }

    #[test]
    fn arbitrary_server_bytes_never_panic(
        order in any_order(),
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        major in any::<u8>(),
        minor in any::<u16>(),
    ) {
        let _ = decode_server_message(&bytes, order, |_| Some((major, minor)));
        let _ = server_frame_len(&bytes, order);
    }
}

#[test]
fn big_request_frame_length() {
    common::init_logging();
    let order = ByteOrder::MSBFirst;
    let request = Request::PutImage(PutImageRequest {
        format: 2,
        drawable: Drawable::new(1),
        gc: GContext::new(2),
        width: 512,
        height: 256,
        depth: 24,
        data: vec![0xab; 512 * 256 * 4],
        ..Default::default()
    });
    let frame = request.encode(order);
    assert_eq!(&frame[2..4], &[0, 0]);
    assert_eq!(request_frame_len(&frame, order), Some(frame.len()));
    assert_eq!(decode_request(&frame, order).unwrap(), request);
}
