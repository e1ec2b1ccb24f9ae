//! Fuzz target for the link -> network -> transport chain.
//!
//! Every link type is fed the same bytes. Besides not panicking:
//! - recorded layers are contiguous and stay inside the frame
//! - the payload offset is the end of the last layer
//! - the shortcut accessors agree with the full decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use pcapwalk_core::{Frame, LinkType};

fuzz_target!(|data: &[u8]| {
    for link_type in LinkType::ALL {
        let frame = Frame::new(link_type, data);
        let decoded = frame.decode();

        let mut end = 0;
        for layer in &decoded.layers {
            assert_eq!(layer.offset, end);
            end += layer.len;
        }
        assert!(end <= data.len());
        assert_eq!(decoded.payload_offset, end);

        assert_eq!(
            frame.transport().map(|t| t.protocol()),
            decoded.transport_protocol()
        );
        let _ = frame.ipv4();
        let _ = frame.ipv6();
    }
});
