#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and decode must never panic
    let _ = zenbmp::BitmapInfo::from_bytes(data);
    let Ok(mut bitmap) = zenbmp::decode(data, enough::Unstoppable) else {
        return;
    };

    // Transforms on any decodable input must not panic either
    bitmap.swap_red_blue();
    let _ = bitmap.downscale_half();
    let _ = bitmap.encode(enough::Unstoppable);
});
