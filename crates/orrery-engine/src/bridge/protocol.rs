/// Shared frame buffer layout.
/// Must stay in sync with the browser's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 32 floats]
/// [SDF instances:   max_sdf_instances   × 16 floats]
/// [Labels:          max_labels          ×  8 floats]
/// [Stars:           max_stars           ×  4 floats]
/// [Hearts:          max_hearts          ×  8 floats]
/// [Vector vertices: max_vector_vertices ×  6 floats]
/// [Lights:          max_lights          ×  8 floats]
/// [Sounds:          max_sounds          ×  1 float]
/// [Events:          max_events          ×  4 floats]
/// ```
///
/// Capacities are written into the header at init; the browser reads them
/// back to compute offsets, then reads the per-section counts every frame.

use std::ops::Range;

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 32;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_VIEWPORT_WIDTH: usize = 3;
pub const HEADER_VIEWPORT_HEIGHT: usize = 4;
/// Ambient light RGB, premultiplied by intensity.
pub const HEADER_AMBIENT_R: usize = 5;
pub const HEADER_AMBIENT_G: usize = 6;
pub const HEADER_AMBIENT_B: usize = 7;
/// 1.0 when stars should be drawn as soft round points.
pub const HEADER_STAR_FADE: usize = 8;
/// First of the per-section `[capacity, count]` pairs, in `Section::ALL` order.
pub const HEADER_SECTIONS: usize = 10;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 2.0;

/// Floats per SDF instance (wire format, never changes).
pub const SDF_INSTANCE_FLOATS: usize = 16;
/// Floats per label: x, y, font_px, text_id, r, g, b, alpha.
pub const LABEL_FLOATS: usize = 8;
/// Floats per star: x, y, size, alpha.
pub const STAR_FLOATS: usize = 4;
/// Floats per heart: x, y, emoji, alpha, scale, age, pad×2.
pub const HEART_FLOATS: usize = 8;
/// Floats per vector vertex: x, y, r, g, b, a.
pub const VECTOR_VERTEX_FLOATS: usize = 6;
/// Floats per light: kind, x, y, z, r, g, b, intensity.
pub const LIGHT_FLOATS: usize = 8;
/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

pub const DEFAULT_MAX_LIGHTS: usize = 8;

/// One data section of the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Sdf,
    Labels,
    Stars,
    Hearts,
    Vectors,
    Lights,
    Sounds,
    Events,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Sdf,
        Section::Labels,
        Section::Stars,
        Section::Hearts,
        Section::Vectors,
        Section::Lights,
        Section::Sounds,
        Section::Events,
    ];

    /// Floats per element in this section.
    pub const fn stride(self) -> usize {
        match self {
            Section::Sdf => SDF_INSTANCE_FLOATS,
            Section::Labels => LABEL_FLOATS,
            Section::Stars => STAR_FLOATS,
            Section::Hearts => HEART_FLOATS,
            Section::Vectors => VECTOR_VERTEX_FLOATS,
            Section::Lights => LIGHT_FLOATS,
            Section::Sounds => 1,
            Section::Events => EVENT_FLOATS,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Header slot holding this section's capacity; the count follows it.
    pub const fn header_capacity_slot(self) -> usize {
        HEADER_SECTIONS + self.index() * 2
    }

    pub const fn header_count_slot(self) -> usize {
        self.header_capacity_slot() + 1
    }
}

/// Placement of one section inside the frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionSpan {
    /// Maximum elements.
    pub capacity: usize,
    /// Offset in floats from the start of the buffer.
    pub offset: usize,
    /// Size in floats.
    pub floats: usize,
}

impl SectionSpan {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.floats
    }
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    spans: [SectionSpan; 8],
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from per-section capacities, in `Section::ALL` order.
    pub fn new(capacities: [usize; 8]) -> Self {
        let mut spans = [SectionSpan::default(); 8];
        let mut offset = HEADER_FLOATS;
        for (span, (section, capacity)) in spans
            .iter_mut()
            .zip(Section::ALL.into_iter().zip(capacities))
        {
            let floats = capacity * section.stride();
            *span = SectionSpan { capacity, offset, floats };
            offset += floats;
        }
        Self {
            spans,
            buffer_total_floats: offset,
            buffer_total_bytes: offset * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new([
            config.max_sdf_instances,
            config.max_labels,
            config.max_stars,
            config.max_hearts,
            config.max_vector_vertices,
            config.max_lights,
            config.max_sounds,
            config.max_events,
        ])
    }

    pub fn span(&self, section: Section) -> SectionSpan {
        self.spans[section.index()]
    }

    pub fn capacity(&self, section: Section) -> usize {
        self.span(section).capacity
    }

    /// Write protocol version and every section capacity into `header`.
    pub fn write_capacities(&self, header: &mut [f32]) {
        if header.len() < HEADER_FLOATS {
            return;
        }
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        for section in Section::ALL {
            header[section.header_capacity_slot()] = self.capacity(section) as f32;
        }
    }

    /// Copy `data` into `section` of `frame` and record its element count.
    /// Data past the section's capacity is truncated.
    pub fn write_section(&self, frame: &mut [f32], section: Section, data: &[f32]) -> usize {
        let span = self.span(section);
        if frame.len() < self.buffer_total_floats {
            return 0;
        }
        let stride = section.stride();
        let count = (data.len() / stride).min(span.capacity);
        let floats = count * stride;
        frame[span.offset..span.offset + floats].copy_from_slice(&data[..floats]);
        frame[section.header_count_slot()] = count as f32;
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);

        assert_eq!(layout.capacity(Section::Sdf), config.max_sdf_instances);
        assert_eq!(layout.capacity(Section::Stars), config.max_stars);
        assert_eq!(layout.span(Section::Sdf).offset, HEADER_FLOATS);

        let expected: usize = HEADER_FLOATS
            + config.max_sdf_instances * 16
            + config.max_labels * 8
            + config.max_stars * 4
            + config.max_hearts * 8
            + config.max_vector_vertices * 6
            + config.max_lights * 8
            + config.max_sounds
            + config.max_events * 4;
        assert_eq!(layout.buffer_total_floats, expected);
        assert_eq!(layout.buffer_total_bytes, expected * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new([10, 20, 30, 40, 50, 4, 8, 16]);
        let mut expected = HEADER_FLOATS;
        for section in Section::ALL {
            let span = layout.span(section);
            assert_eq!(span.offset, expected, "{section:?}");
            expected += span.floats;
        }
        assert_eq!(layout.buffer_total_floats, expected);
    }

    #[test]
    fn header_slots_fit_in_header() {
        for section in Section::ALL {
            assert!(section.header_count_slot() < HEADER_FLOATS);
        }
    }

    #[test]
    fn write_section_truncates_and_counts() {
        let layout = ProtocolLayout::new([0, 0, 2, 0, 0, 0, 0, 0]);
        let mut frame = vec![0.0; layout.buffer_total_floats];
        layout.write_capacities(&mut frame);
        assert_eq!(frame[Section::Stars.header_capacity_slot()], 2.0);

        let data: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let written = layout.write_section(&mut frame, Section::Stars, &data);
        assert_eq!(written, 2);
        assert_eq!(frame[Section::Stars.header_count_slot()], 2.0);
        let span = layout.span(Section::Stars);
        assert_eq!(&frame[span.range()], &data[..8]);
    }
}
