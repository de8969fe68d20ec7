//! `edges.bin`, `profile_ids.bin`, and `elevations.bin` views.
//!
//! # Edge record (10 bytes, big-endian)
//!
//! ```text
//! offset 0  i32  target node id; one's complement of it when the edge runs
//!                against the direction of its OSM way (sign bit = inverted)
//! offset 4  u16  length, Q12.4 metres
//! offset 6  u16  elevation gain, Q12.4 metres
//! offset 8  u16  index into the attribute-set table
//! ```
//!
//! # Profiles
//!
//! `profile_ids.bin` holds one u32 per edge: the profile kind in bits 30..32
//! and the index of the first 16-bit slot in `elevations.bin` in bits 0..30.
//! An edge of raw length `l` (Q12.4) has `ceil(l / 32) + 1` samples, one
//! every two metres.  Samples are stored in the direction of the OSM way, so
//! the decoded array is reversed for inverted edges.

use std::ops::Range;

use velo_core::{bits, math, q28_4, EdgeId, NodeId};

use crate::{Buffer, GraphError, GraphResult};

const OFFSET_TARGET: usize = 0;
const OFFSET_LENGTH: usize = OFFSET_TARGET + 4;
const OFFSET_ELEVATION_GAIN: usize = OFFSET_LENGTH + 2;
const OFFSET_ATTRIBUTES: usize = OFFSET_ELEVATION_GAIN + 2;
pub const EDGE_BYTES: usize = OFFSET_ATTRIBUTES + 2;

pub const PROFILE_ID_BYTES: usize = 4;
pub const ELEVATION_BYTES: usize = 2;

const PROFILE_KIND_START: u32 = 30;
const PROFILE_KIND_BITS: u32 = 2;

/// Largest first-sample index a profile id can hold.
pub const MAX_FIRST_SAMPLE: u32 = (1 << PROFILE_KIND_START) - 1;

/// Distance between two consecutive profile samples, Q28.4 metres.
#[inline]
pub(crate) fn sample_spacing_q28_4() -> u32 {
    q28_4::of_int(2) as u32
}

/// Number of samples stored for an edge whose raw Q12.4 length is `raw_length`.
#[inline]
pub fn sample_count(raw_length: u16) -> usize {
    1 + math::ceil_div(raw_length as u32, sample_spacing_q28_4()) as usize
}

/// How an edge's altitude samples are encoded in `elevations.bin`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ProfileKind {
    /// No altitude data.
    Missing = 0,
    /// One unsigned Q12.4 altitude per slot.
    Raw = 1,
    /// First slot absolute; then two signed 8-bit Q4.4 deltas per slot.
    Delta8 = 2,
    /// First slot absolute; then four signed 4-bit Q0.4 deltas per slot.
    Delta4 = 3,
}

impl ProfileKind {
    fn from_bits(bits: u32) -> Self {
        match bits {
            1 => ProfileKind::Raw,
            2 => ProfileKind::Delta8,
            3 => ProfileKind::Delta4,
            _ => ProfileKind::Missing,
        }
    }

    /// Bits per delta field, for the delta encodings.
    pub fn delta_bits(self) -> u32 {
        match self {
            ProfileKind::Delta8 => 8,
            ProfileKind::Delta4 => 4,
            ProfileKind::Missing | ProfileKind::Raw => 16,
        }
    }

    /// Number of values packed in one 16-bit slot.
    pub fn per_slot(self) -> usize {
        (16 / self.delta_bits()) as usize
    }
}

#[derive(Debug)]
pub struct GraphEdges {
    edges:       Buffer,
    profile_ids: Buffer,
    elevations:  Buffer,
    count:       usize,
}

impl GraphEdges {
    pub fn new(edges: Buffer, profile_ids: Buffer, elevations: Buffer) -> GraphResult<Self> {
        let count = edges.record_count(EDGE_BYTES, "edges")?;
        let profiles = profile_ids.record_count(PROFILE_ID_BYTES, "profile ids")?;
        elevations.record_count(ELEVATION_BYTES, "elevations")?;
        if profiles != count {
            return Err(GraphError::InvalidFormat(format!(
                "{count} edges but {profiles} profile ids"
            )));
        }
        Ok(Self { edges, profile_ids, elevations, count })
    }

    #[inline]
    fn offset(edge: EdgeId, field: usize) -> usize {
        edge.index() * EDGE_BYTES + field
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    fn raw_target(&self, edge: EdgeId) -> i32 {
        self.edges.i32_at(Self::offset(edge, OFFSET_TARGET))
    }

    /// `true` if the edge runs against the direction of its OSM way.
    #[inline]
    pub fn is_inverted(&self, edge: EdgeId) -> bool {
        self.raw_target(edge) < 0
    }

    #[inline]
    pub fn target_node_id(&self, edge: EdgeId) -> NodeId {
        let raw = self.raw_target(edge);
        let id = if raw < 0 { !raw } else { raw };
        NodeId(id as u32)
    }

    #[inline]
    fn raw_length(&self, edge: EdgeId) -> u16 {
        self.edges.u16_at(Self::offset(edge, OFFSET_LENGTH))
    }

    /// Length in metres.
    #[inline]
    pub fn length(&self, edge: EdgeId) -> f64 {
        q28_4::as_f64(self.raw_length(edge) as i32)
    }

    /// Positive elevation difference accumulated along the edge, metres.
    #[inline]
    pub fn elevation_gain(&self, edge: EdgeId) -> f64 {
        q28_4::as_f64(self.edges.u16_at(Self::offset(edge, OFFSET_ELEVATION_GAIN)) as i32)
    }

    #[inline]
    pub fn attributes_index(&self, edge: EdgeId) -> usize {
        self.edges.u16_at(Self::offset(edge, OFFSET_ATTRIBUTES)) as usize
    }

    #[inline]
    fn profile_id(&self, edge: EdgeId) -> i32 {
        self.profile_ids.i32_at(edge.index() * PROFILE_ID_BYTES)
    }

    pub fn profile_kind(&self, edge: EdgeId) -> ProfileKind {
        ProfileKind::from_bits(bits::extract_unsigned(
            self.profile_id(edge),
            PROFILE_KIND_START,
            PROFILE_KIND_BITS,
        ))
    }

    #[inline]
    pub fn has_profile(&self, edge: EdgeId) -> bool {
        self.profile_kind(edge) != ProfileKind::Missing
    }

    /// Number of 16-bit slots in `elevations.bin`.
    #[inline]
    pub(crate) fn slot_count(&self) -> usize {
        self.elevations.len() / ELEVATION_BYTES
    }

    /// Slots of `elevations.bin` read by [`profile_samples`](Self::profile_samples),
    /// or `None` if the edge has no profile.
    pub(crate) fn profile_slots(&self, edge: EdgeId) -> Option<Range<usize>> {
        let kind = self.profile_kind(edge);
        let first = bits::extract_unsigned(self.profile_id(edge), 0, PROFILE_KIND_START) as usize;
        let count = sample_count(self.raw_length(edge));
        let slots = match kind {
            ProfileKind::Missing => return None,
            ProfileKind::Raw => count,
            ProfileKind::Delta8 | ProfileKind::Delta4 => 1 + (count - 1).div_ceil(kind.per_slot()),
        };
        Some(first..first + slots)
    }

    #[inline]
    fn slot(&self, index: usize) -> u16 {
        self.elevations.u16_at(index * ELEVATION_BYTES)
    }

    /// Altitude samples along the edge in its direction of travel, one every
    /// two metres.  Empty if the edge has no profile.
    pub fn profile_samples(&self, edge: EdgeId) -> Vec<f32> {
        let kind = self.profile_kind(edge);
        if kind == ProfileKind::Missing {
            return Vec::new();
        }

        let first = bits::extract_unsigned(self.profile_id(edge), 0, PROFILE_KIND_START) as usize;
        let count = sample_count(self.raw_length(edge));
        let mut samples = Vec::with_capacity(count);

        if kind == ProfileKind::Raw {
            samples.extend((0..count).map(|i| q28_4::as_f32(self.slot(first + i) as i32)));
        } else {
            let width = kind.delta_bits();
            let per_slot = kind.per_slot();
            let mut altitude = q28_4::as_f32(self.slot(first) as i32);
            samples.push(altitude);
            for i in 0..count - 1 {
                let word = self.slot(first + 1 + i / per_slot) as i32;
                // Most significant field first.
                let start = (per_slot - 1 - i % per_slot) as u32 * width;
                altitude += q28_4::as_f32(bits::extract_signed(word, start, width));
                samples.push(altitude);
            }
        }

        if self.is_inverted(edge) {
            samples.reverse();
        }
        samples
    }
}
