//! Builders for small audio files used by tests.

use std::path::Path;

/// Builds a silent mono PCM WAV file carrying a RIFF INFO tag.
///
/// `info` holds `(chunk id, value)` pairs, e.g. `("INAM", "title")` or
/// `("IPRD", "album")`.
pub fn wav_bytes(info: &[(&str, &str)]) -> Vec<u8> {
    const SAMPLE_RATE: u32 = 8000;
    let samples = vec![0u8; 400];

    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes()); // PCM
    fmt.extend_from_slice(&1u16.to_le_bytes()); // channels
    fmt.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    fmt.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
    fmt.extend_from_slice(&2u16.to_le_bytes()); // block align
    fmt.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    let mut body = Vec::new();
    body.extend_from_slice(b"WAVE");
    push_chunk(&mut body, b"fmt ", &fmt);
    push_chunk(&mut body, b"data", &samples);

    if !info.is_empty() {
        let mut list = Vec::new();
        list.extend_from_slice(b"INFO");
        for (id, value) in info {
            let mut text = value.as_bytes().to_vec();
            text.push(0);
            push_chunk(&mut list, id.as_bytes(), &text);
        }
        push_chunk(&mut body, b"LIST", &list);
    }

    let mut file = Vec::new();
    file.extend_from_slice(b"RIFF");
    file.extend_from_slice(&u32::try_from(body.len()).unwrap().to_le_bytes());
    file.extend_from_slice(&body);
    file
}

pub fn write_wav(path: &Path, info: &[(&str, &str)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, wav_bytes(info)).unwrap();
}

fn push_chunk(out: &mut Vec<u8>, id: &[u8], data: &[u8]) {
    out.extend_from_slice(id);
    out.extend_from_slice(&u32::try_from(data.len()).unwrap().to_le_bytes());
    out.extend_from_slice(data);
    if data.len() % 2 == 1 {
        out.push(0);
    }
}
