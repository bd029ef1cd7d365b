//! Protocol extensions
//!
//! Each extension owns a fixed major opcode and its own minor-opcode space.
//! The registry below is what a server answers `QueryExtension` and
//! `ListExtensions` with, so it must agree with the request dispatch in
//! [`crate::protocol::parser`].

#[cfg(feature = "big-requests")]
pub mod big_requests;
#[cfg(feature = "xinput")]
pub mod xinput;

use crate::protocol::XINPUT_FIRST_ERROR;

/// Major opcode of the XInputExtension
pub const XINPUT_MAJOR_OPCODE: u8 = 131;
/// First event code of the XInputExtension
pub const XINPUT_FIRST_EVENT: u8 = 66;
/// Major opcode of BIG-REQUESTS
pub const BIG_REQUESTS_MAJOR_OPCODE: u8 = 133;

/// Registration data for one extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub name: &'static str,
    pub major_opcode: u8,
    /// 0 when the extension defines no events
    pub first_event: u8,
    /// 0 when the extension defines no errors
    pub first_error: u8,
}

/// Extensions compiled into this build
pub const EXTENSIONS: &[ExtensionInfo] = &[
    #[cfg(feature = "big-requests")]
    ExtensionInfo {
        name: "BIG-REQUESTS",
        major_opcode: BIG_REQUESTS_MAJOR_OPCODE,
        first_event: 0,
        first_error: 0,
    },
    #[cfg(feature = "xinput")]
    ExtensionInfo {
        name: "XInputExtension",
        major_opcode: XINPUT_MAJOR_OPCODE,
        first_event: XINPUT_FIRST_EVENT,
        first_error: XINPUT_FIRST_ERROR,
    },
];

/// Look up an extension by the name a client passes to QueryExtension.
pub fn find_by_name(name: &[u8]) -> Option<&'static ExtensionInfo> {
    EXTENSIONS.iter().find(|ext| ext.name.as_bytes() == name)
}

pub fn find_by_opcode(major_opcode: u8) -> Option<&'static ExtensionInfo> {
    EXTENSIONS.iter().find(|ext| ext.major_opcode == major_opcode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        if cfg!(feature = "xinput") {
            let ext = find_by_name(b"XInputExtension").unwrap();
            assert_eq!(ext.major_opcode, 131);
            assert_eq!(find_by_opcode(131), Some(ext));
        }
        if cfg!(feature = "big-requests") {
            assert_eq!(find_by_name(b"BIG-REQUESTS").unwrap().major_opcode, 133);
        }
        assert!(find_by_name(b"RANDR").is_none());
        assert!(find_by_opcode(1).is_none());
    }

    #[test]
    fn test_opcodes_are_extension_space() {
        for ext in EXTENSIONS {
            assert!(ext.major_opcode >= 128);
        }
    }
}
