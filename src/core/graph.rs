use crate::domain::model::{Attendee, AttendeeId, Venue, VenueId};

/// Bipartite eligibility structure between attendees (rows) and room slots (columns).
///
/// Every venue contributes `capacity` consecutive columns, laid out in venue-list order, so
/// column `k` belongs to the venue whose slot range contains `k`. Rows follow the attendee
/// order the graph was built with. Adjacency is stored compressed: row `r` is eligible for
/// `columns[row_offsets[r]..row_offsets[r + 1]]`, sorted ascending.
#[derive(Debug, Clone)]
pub struct PreferenceGraph {
    rows: Vec<AttendeeId>,
    row_offsets: Vec<usize>,
    columns: Vec<usize>,
    slot_venues: Vec<VenueId>,
}

impl PreferenceGraph {
    /// Builds the graph with rows in input order.
    pub fn build(venues: &[Venue], attendees: &[Attendee]) -> Self {
        let order: Vec<AttendeeId> = (0..attendees.len()).map(AttendeeId).collect();
        Self::build_in_order(venues, attendees, &order)
    }

    /// Builds the graph with row `r` standing for `attendees[order[r]]`.
    pub fn build_in_order(venues: &[Venue], attendees: &[Attendee], order: &[AttendeeId]) -> Self {
        let mut slot_venues = Vec::with_capacity(venues.iter().map(Venue::capacity).sum());
        let mut slot_ranges = Vec::with_capacity(venues.len());
        for (index, venue) in venues.iter().enumerate() {
            let start = slot_venues.len();
            slot_venues.extend(std::iter::repeat(VenueId(index)).take(venue.capacity()));
            slot_ranges.push(start..slot_venues.len());
        }

        let mut row_offsets = Vec::with_capacity(order.len() + 1);
        let mut columns = Vec::new();
        row_offsets.push(0);

        for &attendee_id in order {
            let attendee = &attendees[attendee_id.0];
            for (venue, slots) in venues.iter().zip(&slot_ranges) {
                if attendee.accepts(venue.name()) {
                    columns.extend(slots.clone());
                }
            }
            row_offsets.push(columns.len());
        }

        tracing::debug!(
            attendees = order.len(),
            slots = slot_venues.len(),
            edges = columns.len(),
            "built preference graph"
        );

        Self {
            rows: order.to_vec(),
            row_offsets,
            columns,
            slot_venues,
        }
    }

    pub fn attendee_count(&self) -> usize {
        self.rows.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slot_venues.len()
    }

    pub fn edge_count(&self) -> usize {
        self.columns.len()
    }

    /// Eligible slot columns for `row`, ascending.
    pub fn neighbours(&self, row: usize) -> &[usize] {
        &self.columns[self.row_offsets[row]..self.row_offsets[row + 1]]
    }

    pub fn is_eligible(&self, row: usize, slot: usize) -> bool {
        self.neighbours(row).binary_search(&slot).is_ok()
    }

    pub fn attendee_at(&self, row: usize) -> AttendeeId {
        self.rows[row]
    }

    pub fn venue_of_slot(&self, slot: usize) -> VenueId {
        self.slot_venues[slot]
    }

    /// Dense 0/1 rendition, attendees by slots.
    pub fn to_dense(&self) -> Vec<Vec<u8>> {
        (0..self.attendee_count())
            .map(|row| {
                let mut dense = vec![0u8; self.slot_count()];
                for &slot in self.neighbours(row) {
                    dense[slot] = 1;
                }
                dense
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venues() -> Vec<Venue> {
        vec![Venue::new("a", 2), Venue::new("b", 1), Venue::new("c", 3)]
    }

    #[test]
    fn test_dense_matrix() {
        let attendees = vec![
            Attendee::new("1", Vec::<String>::new()),
            Attendee::new("2", ["a"]),
            Attendee::new("3", ["a", "b"]),
            Attendee::new("4", ["a", "b", "c"]),
            Attendee::new("5", ["b", "c"]),
            Attendee::new("6", ["c"]),
        ];

        let graph = PreferenceGraph::build(&venues(), &attendees);

        assert_eq!(
            graph.to_dense(),
            vec![
                vec![1, 1, 1, 1, 1, 1],
                vec![1, 1, 0, 0, 0, 0],
                vec![1, 1, 1, 0, 0, 0],
                vec![1, 1, 1, 1, 1, 1],
                vec![0, 0, 1, 1, 1, 1],
                vec![0, 0, 0, 1, 1, 1],
            ]
        );
        assert_eq!(graph.edge_count(), 6 + 2 + 3 + 6 + 4 + 3);
    }

    #[test]
    fn test_slot_expansion_follows_venue_order() {
        let graph = PreferenceGraph::build(&venues(), &[]);

        let owners: Vec<usize> = (0..graph.slot_count())
            .map(|slot| graph.venue_of_slot(slot).0)
            .collect();
        assert_eq!(owners, vec![0, 0, 1, 2, 2, 2]);
        assert_eq!(graph.attendee_count(), 0);
    }

    #[test]
    fn test_rows_follow_given_order() {
        let attendees = vec![Attendee::new("1", ["a"]), Attendee::new("2", ["c"])];
        let graph = PreferenceGraph::build_in_order(
            &venues(),
            &attendees,
            &[AttendeeId(1), AttendeeId(0)],
        );

        assert_eq!(graph.attendee_at(0), AttendeeId(1));
        assert_eq!(graph.neighbours(0), &[3, 4, 5]);
        assert_eq!(graph.neighbours(1), &[0, 1]);
        assert!(graph.is_eligible(1, 1));
        assert!(!graph.is_eligible(1, 2));
    }
}
