//! Helpers shared by the integration tests

#![allow(dead_code)]

use x11wire::protocol::ByteOrder;

/// Route `log` output through the test harness; `RUST_LOG=debug` shows
/// dispatch traces.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Frame a request body: opcode, detail, 16-bit length in words.
pub fn request_frame(opcode: u8, detail: u8, body: &[u8], order: ByteOrder) -> Vec<u8> {
    assert_eq!(body.len() % 4, 0, "request bodies are whole words");
    let words = (body.len() / 4 + 1) as u16;
    let mut frame = vec![opcode, detail];
    match order {
        ByteOrder::LSBFirst => frame.extend_from_slice(&words.to_le_bytes()),
        ByteOrder::MSBFirst => frame.extend_from_slice(&words.to_be_bytes()),
    }
    frame.extend_from_slice(body);
    frame
}
