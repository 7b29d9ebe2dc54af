/// Frame header shared with the host page.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Vertices: vertex_count × 6 floats]   (separate buffer, see VectorState)
/// ```
///
/// The host reads the header first, then views `vertex_count × 6` floats at
/// the vertex pointer.

use bytemuck::{Pod, Zeroable};

use crate::core::zones::{Zone, ZoneWeights};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_WIDTH: usize = 2;
pub const HEADER_HEIGHT: usize = 3;
pub const HEADER_PROGRESS: usize = 4;
pub const HEADER_VERTEX_COUNT: usize = 5;
pub const HEADER_W_SPACE: usize = 6;
pub const HEADER_W_AURORA: usize = 7;
pub const HEADER_W_SKY: usize = 8;
pub const HEADER_W_SUNSET: usize = 9;
pub const HEADER_W_DEEP_SEA: usize = 10;
// 11..16 reserved.

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per vertex: x, y, r, g, b, a (wire format, fixed).
pub const VERTEX_FLOATS: usize = 6;

/// The header as written to linear memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameHeader {
    floats: [f32; HEADER_FLOATS],
}

impl Default for FrameHeader {
    fn default() -> Self {
        let mut floats = [0.0; HEADER_FLOATS];
        floats[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        Self { floats }
    }
}

impl FrameHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite every field for the frame just rendered.
    pub fn write(
        &mut self,
        frame: u64,
        width: f32,
        height: f32,
        progress: f32,
        vertex_count: usize,
        weights: &ZoneWeights,
    ) {
        let f = &mut self.floats;
        f[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        // f32 holds every frame count a session reaches exactly (2^24 frames
        // is over three days at 60 Hz).
        f[HEADER_FRAME_COUNTER] = frame as f32;
        f[HEADER_WIDTH] = width;
        f[HEADER_HEIGHT] = height;
        f[HEADER_PROGRESS] = progress;
        f[HEADER_VERTEX_COUNT] = vertex_count as f32;
        f[HEADER_W_SPACE] = weights[Zone::Space];
        f[HEADER_W_AURORA] = weights[Zone::Aurora];
        f[HEADER_W_SKY] = weights[Zone::Sky];
        f[HEADER_W_SUNSET] = weights[Zone::Sunset];
        f[HEADER_W_DEEP_SEA] = weights[Zone::DeepSea];
    }

    pub fn get(&self, field: usize) -> f32 {
        self.floats.get(field).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.floats
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.floats.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_64_bytes() {
        assert_eq!(std::mem::size_of::<FrameHeader>(), HEADER_FLOATS * 4);
        assert_eq!(bytemuck::bytes_of(&FrameHeader::new()).len(), 64);
    }

    #[test]
    fn fields_land_at_their_indices() {
        let mut header = FrameHeader::new();
        let weights = ZoneWeights::pure(Zone::Sky);
        header.write(42, 1280.0, 720.0, 0.5, 999, &weights);

        assert_eq!(header.get(HEADER_PROTOCOL_VERSION), PROTOCOL_VERSION);
        assert_eq!(header.get(HEADER_FRAME_COUNTER), 42.0);
        assert_eq!(header.get(HEADER_WIDTH), 1280.0);
        assert_eq!(header.get(HEADER_HEIGHT), 720.0);
        assert_eq!(header.get(HEADER_PROGRESS), 0.5);
        assert_eq!(header.get(HEADER_VERTEX_COUNT), 999.0);
        assert_eq!(header.get(HEADER_W_SKY), 1.0);
        assert_eq!(header.get(HEADER_W_SPACE), 0.0);
        assert!(header.as_slice()[11..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn out_of_range_field_reads_zero() {
        assert_eq!(FrameHeader::new().get(99), 0.0);
    }
}
