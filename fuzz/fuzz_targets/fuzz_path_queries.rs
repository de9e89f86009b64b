#![no_main]

use glam::Vec2;
use libfuzzer_sys::fuzz_target;
use path_trace::{PathConfig, PathGeometry, PathShape};

fn read_f32(bytes: &[u8]) -> f32 {
    let mut buf = [0u8; 4];
    buf[..bytes.len().min(4)].copy_from_slice(&bytes[..bytes.len().min(4)]);
    f32::from_le_bytes(buf)
}

fuzz_target!(|data: &[u8]| {
    // Byte 0: Form, danach Größe, Rotation und Abfragen als f32
    if data.len() < 9 {
        return;
    }
    let shape = PathShape::ALL[data[0] as usize % PathShape::ALL.len()];
    let size = read_f32(&data[1..5]);
    let rotation = read_f32(&data[5..9]);
    if !size.is_finite() || !rotation.is_finite() || size.abs() > 1.0e4 {
        return;
    }

    let mut path = PathGeometry::new();
    path.rebuild(
        Vec2::new(500.0, 500.0),
        1.0,
        &PathConfig::new(shape, size).with_rotation(rotation),
    );

    for chunk in data[9..].chunks(12) {
        if chunk.len() < 12 {
            break;
        }
        let point = Vec2::new(read_f32(&chunk[0..4]), read_f32(&chunk[4..8]));
        let current = read_f32(&chunk[8..12]);
        if !point.is_finite() || !current.is_finite() {
            continue;
        }
        let current = current.clamp(0.0, 1.0);

        let projected = path.progress_from_position(point);
        assert!((0.0..=1.0).contains(&projected), "Projektion außerhalb [0, 1]");

        if let Some(next) = path.next_valid_progress(point, current, 0.03, 60.0) {
            assert!(next > current, "Vorwärts-Fenster lieferte Rückschritt");
            assert!(next <= current + 0.03 + 1e-5, "Vorwärts-Fenster überschritten");
        }
        if let Some(back) = path.backward_correction(point, current, 0.05, 60.0) {
            assert!(back < current, "Korrektur ohne Rückschritt");
        }
        let _ = path.position_at(current);
        let _ = path.progress_polyline(current);
    }
});
