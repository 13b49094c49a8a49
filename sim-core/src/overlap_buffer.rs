use crate::types::BodyId;

/// Per-tick scratch buffer recording which bodies overlap which.
///
/// For each `BodyId`, this buffer stores the bodies it directly overlaps
/// (its overlap group) together with the center distance to each of them.
/// Groups are adjacency lists, not connected components: if `a` overlaps
/// `b` and `b` overlaps `c`, `a`'s group only contains `b`.
///
/// The engine keeps two of these, one for the tick being computed and one
/// for the previous tick, and swaps them after each committed tick. Inner
/// vectors keep their capacity across [`OverlapBuffer::clear`], so steady
/// state ticks do not allocate.
#[derive(Clone, Debug, Default)]
pub struct OverlapBuffer {
    /// `(partner, center distance)` pairs, indexed by body id, in ascending
    /// partner order when filled by the overlap phase.
    groups: Vec<Vec<(BodyId, f32)>>,
}

impl OverlapBuffer {
    /// Creates a new [`OverlapBuffer`] for `len` bodies, with empty groups.
    pub fn with_len(len: usize) -> Self {
        Self {
            groups: vec![Vec::new(); len],
        }
    }

    /// Number of bodies this buffer has a slot for.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Resizes to exactly `len` slots and clears every group, even if the
    /// length was already correct.
    pub fn ensure_len(&mut self, len: usize) {
        if self.groups.len() != len {
            self.groups.resize_with(len, Vec::new);
        }
        self.clear();
    }

    /// Empties every group; the length remains unchanged.
    pub fn clear(&mut self) {
        for g in &mut self.groups {
            g.clear();
        }
    }

    /// Records that `a` and `b` overlap at the given center distance.
    ///
    /// ### Panics
    /// Panics if either id is out of bounds.
    #[inline]
    pub fn add_pair(&mut self, a: BodyId, b: BodyId, distance: f32) {
        self.groups[a].push((b, distance));
        self.groups[b].push((a, distance));
    }

    /// Overlap group of `id` with the recorded distances.
    #[inline]
    pub fn partners(&self, id: BodyId) -> &[(BodyId, f32)] {
        &self.groups[id]
    }

    /// `true` if `id` overlaps at least one other body.
    #[inline]
    pub fn is_overlapping(&self, id: BodyId) -> bool {
        self.groups.get(id).is_some_and(|g| !g.is_empty())
    }

    /// Center distance recorded between `a` and `b`, if they overlapped.
    pub fn distance(&self, a: BodyId, b: BodyId) -> Option<f32> {
        self.groups
            .get(a)?
            .iter()
            .find_map(|&(other, d)| (other == b).then_some(d))
    }

    /// Ids of all bodies with a non-empty overlap group, ascending.
    pub fn overlapping_indices(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.groups
            .iter()
            .enumerate()
            .filter_map(|(i, g)| if g.is_empty() { None } else { Some(i) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_len_starts_with_empty_groups() {
        let buf = OverlapBuffer::with_len(4);
        assert_eq!(buf.len(), 4);
        assert!((0..4).all(|i| buf.partners(i).is_empty()));
        assert_eq!(buf.overlapping_indices().count(), 0);
    }

    #[test]
    fn add_pair_records_both_directions() {
        let mut buf = OverlapBuffer::with_len(3);
        buf.add_pair(0, 2, 7.5);

        assert_eq!(buf.partners(0), &[(2, 7.5)]);
        assert_eq!(buf.partners(2), &[(0, 7.5)]);
        assert!(!buf.is_overlapping(1));
        assert_eq!(buf.distance(0, 2), Some(7.5));
        assert_eq!(buf.distance(2, 0), Some(7.5));
        assert_eq!(buf.distance(0, 1), None);
    }

    #[test]
    fn groups_are_direct_neighbours_only() {
        let mut buf = OverlapBuffer::with_len(3);
        buf.add_pair(0, 1, 1.0);
        buf.add_pair(1, 2, 1.0);

        assert_eq!(buf.partners(0), &[(1, 1.0)]);
        assert_eq!(buf.partners(1), &[(0, 1.0), (2, 1.0)]);
        assert_eq!(buf.partners(2), &[(1, 1.0)]);
        assert_eq!(buf.overlapping_indices().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn ensure_len_clears_when_same_and_resizes_when_different() {
        let mut buf = OverlapBuffer::with_len(2);
        buf.add_pair(0, 1, 3.0);

        buf.ensure_len(2);
        assert_eq!(buf.len(), 2);
        assert!(!buf.is_overlapping(0));

        buf.add_pair(0, 1, 3.0);
        buf.ensure_len(5);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.overlapping_indices().count(), 0);
    }

    #[test]
    fn out_of_range_queries_are_empty() {
        let buf = OverlapBuffer::with_len(1);
        assert!(!buf.is_overlapping(9));
        assert_eq!(buf.distance(9, 0), None);
    }
}
