use serde::{Deserialize, Serialize};

/// Which part of a sequenced molecule a fragment record covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentRole {
    /// A complete fragment (`a`).
    Whole,
    /// The front half of a paired fragment (`f`).
    Front,
    /// The back half of a paired fragment (`b`).
    Back,
}

impl SegmentRole {
    /// Decode the single-character tag used in maln files.
    /// Unknown tags are preserved on the fragment and rejected later.
    #[must_use]
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'a' => Some(Self::Whole),
            'f' => Some(Self::Front),
            'b' => Some(Self::Back),
            _ => None,
        }
    }
}

/// An assembled fragment from a maln file.
///
/// `seq` is the fragment aligned against the assembly: one column per
/// assembly position in `[start, end]`, with `-` for positions the fragment
/// does not cover (deletions). Bases the fragment carries *between* assembly
/// positions live in `insertions`, keyed by the column after which they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub id: String,
    /// Raw segment tag from the file; see [`SegmentRole::from_tag`].
    pub segment: char,
    /// First covered assembly coordinate (0-based, inclusive).
    pub start: usize,
    /// Last covered assembly coordinate (0-based, inclusive).
    pub end: usize,
    /// Gapped sequence, exactly `end - start + 1` columns.
    pub seq: Vec<u8>,
    /// Insertion strings keyed by column offset into `seq`, sorted by offset.
    pub insertions: Vec<(usize, Vec<u8>)>,
}

impl Fragment {
    #[must_use]
    pub fn role(&self) -> Option<SegmentRole> {
        SegmentRole::from_tag(self.segment)
    }

    /// Reconstruct the gap-free read: covered bases in order, with each
    /// insertion spliced in after its column.
    #[must_use]
    pub fn read_sequence(&self) -> Vec<u8> {
        let mut read = Vec::with_capacity(self.seq.len());
        let mut ins = self.insertions.iter().peekable();
        for (i, &nt) in self.seq.iter().enumerate() {
            if nt != b'-' {
                read.push(nt);
            }
            while ins.peek().is_some_and(|(at, _)| *at == i) {
                if let Some((_, bases)) = ins.next() {
                    read.extend_from_slice(bases);
                }
            }
        }
        read
    }

    /// The base this fragment shows against assembly coordinate `coord`,
    /// or `None` outside `[start, end]`.
    #[must_use]
    pub fn base_at(&self, coord: usize) -> Option<u8> {
        if coord < self.start || coord > self.end {
            return None;
        }
        self.seq.get(coord - self.start).copied()
    }
}
