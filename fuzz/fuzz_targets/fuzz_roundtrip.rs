#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = decoded.encode(enough::Unstoppable) else {
        panic!("decoded bitmap failed to encode");
    };
    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.header_region(), decoded2.header_region());
    assert_eq!(decoded.trailer(), decoded2.trailer());

    // Header region and pixel bytes come back exactly; only row padding may differ
    let offset = decoded.file_header().pixel_data_offset as usize;
    assert_eq!(&reencoded[..offset], &data[..offset]);
});
