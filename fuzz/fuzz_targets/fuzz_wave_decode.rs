#![no_main]

use cuemark_riff::WaveFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(mut wave) = WaveFile::from_bytes(data) else {
        return;
    };

    // A decoded file re-encodes to an equal file.
    let bytes = wave.to_bytes().expect("in-memory write");
    assert_eq!(WaveFile::from_bytes(&bytes).ok().as_ref(), Some(&wave));

    wave.clear_markers_and_labels();
    wave.add_label("fuzz", 0);
    assert_eq!(wave.declared_size(), wave.computed_size());
});
