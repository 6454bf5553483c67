//! Files written by `hound` stay readable by `hound` after patching.

use cuemark_riff::{LabelChunk, WaveFile};
use cuemark_tests::fixtures::WavFixture;
use cuemark_tests::layout::validate_layout;
use pretty_assertions::assert_eq;
use std::fs;

fn read_samples(path: &std::path::Path) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<i16>().collect::<Result<Vec<_>, _>>().unwrap();
    (spec, samples)
}

#[test]
fn hound_file_roundtrips_unchanged() {
    let fixture = WavFixture::new();
    let source = fixture.write_hound_pcm16("tone.wav", 22050, 999);
    let target = fixture.path().join("copy.wav");

    WaveFile::open(&source).unwrap().save(&target).unwrap();
    assert_eq!(fs::read(&target).unwrap(), fs::read(&source).unwrap());
}

#[test]
fn patched_hound_file_keeps_audio() {
    let fixture = WavFixture::new();
    let source = fixture.write_hound_pcm16("tone.wav", 44100, 4410);
    let target = fixture.path().join("tone-marked.wav");

    let mut wave = WaveFile::open(&source).unwrap();
    let fmt = wave.chunks()[0].payload().as_format().unwrap();
    assert_eq!(fmt.bits_per_sample, 16);
    assert_eq!(fmt.sample_rate, 44100);

    wave.clear_markers_and_labels();
    wave.add_label("tone", 2205);
    wave.save(&target).unwrap();

    let (spec_before, samples_before) = read_samples(&source);
    let (spec_after, samples_after) = read_samples(&target);
    assert_eq!(spec_after, spec_before);
    assert_eq!(samples_after, samples_before);

    let bytes = fs::read(&target).unwrap();
    let layout = validate_layout(&bytes).unwrap();
    assert_eq!(layout.ids(), vec!["fmt ", "data", "cue ", "LIST"]);

    let reloaded = WaveFile::open(&target).unwrap();
    assert_eq!(reloaded.labels(), vec![&LabelChunk::new(1, "tone")]);
    assert_eq!(reloaded.cue_points()[0].frame_offset, 2205);
}
