use crate::core::graph::PreferenceGraph;
use crate::core::matching::maximum_matching;
use crate::core::ordering::is_permutation;
use crate::domain::model::{Attendee, AttendeeId, Venue, VenueId};
use crate::utils::error::{Result, SummitError};

/// Assigns every attendee to a venue, honouring preferences as far as a maximum matching
/// allows. Attendees the matching cannot place go to the first venue with room.
///
/// Both slices are mutated in place; on error nothing is rolled back, but the capacity
/// check runs before any mutation.
pub fn assign(venues: &mut [Venue], attendees: &mut [Attendee]) -> Result<()> {
    let order: Vec<AttendeeId> = (0..attendees.len()).map(AttendeeId).collect();
    assign_in_order(venues, attendees, &order)
}

/// Like [`assign`], but attendees are visited in `order` instead of input order.
pub fn assign_in_order(
    venues: &mut [Venue],
    attendees: &mut [Attendee],
    order: &[AttendeeId],
) -> Result<()> {
    if !is_permutation(order, attendees.len()) {
        return Err(SummitError::ConfigError {
            message: format!(
                "attendee order must list each of the {} attendees exactly once",
                attendees.len()
            ),
        });
    }
    if attendees.iter().any(Attendee::is_assigned) || venues.iter().any(|v| v.used_capacity() > 0) {
        return Err(SummitError::ConfigError {
            message: "roster has already been assigned".to_string(),
        });
    }

    check_capacity(venues, attendees)?;

    let graph = PreferenceGraph::build_in_order(venues, attendees, order);
    let matching = maximum_matching(&graph);

    for (row, slot) in matching.pairs() {
        let attendee_id = graph.attendee_at(row);
        let venue_id = graph.venue_of_slot(slot);
        venues[venue_id.0]
            .assign(venue_id, attendee_id, &mut attendees[attendee_id.0])
            .map_err(|e| SummitError::MatchingInvariant {
                message: format!(
                    "matched '{}' into '{}' but the venue refused: {}",
                    attendees[attendee_id.0].name(),
                    venues[venue_id.0].name(),
                    e
                ),
            })?;
    }

    let unmatched: Vec<AttendeeId> = matching
        .unmatched_rows()
        .map(|row| graph.attendee_at(row))
        .collect();

    tracing::info!(
        matched = matching.size(),
        attendees = attendees.len(),
        "preference matching complete"
    );

    if !unmatched.is_empty() {
        let names: Vec<&str> = unmatched.iter().map(|id| attendees[id.0].name()).collect();
        tracing::warn!(
            "{} attendees could not be assigned their preference: {:?}",
            unmatched.len(),
            names
        );
        allocate_fallback(venues, attendees, &unmatched)?;
    }

    Ok(())
}

/// Fails when the venues together cannot seat every attendee.
pub fn check_capacity(venues: &[Venue], attendees: &[Attendee]) -> Result<()> {
    let capacity: usize = venues.iter().map(Venue::capacity).sum();
    if capacity < attendees.len() {
        return Err(SummitError::InsufficientCapacity {
            capacity,
            attendees: attendees.len(),
        });
    }
    Ok(())
}

/// Places each of `unmatched`, in order, into the first venue with room, ignoring
/// preferences.
pub fn allocate_fallback(
    venues: &mut [Venue],
    attendees: &mut [Attendee],
    unmatched: &[AttendeeId],
) -> Result<()> {
    for &attendee_id in unmatched {
        let attendee = &mut attendees[attendee_id.0];
        let Some(index) = venues.iter().position(Venue::has_capacity) else {
            // should never happen once check_capacity has passed
            return Err(SummitError::AllocatorExhausted {
                attendee: attendee.name().to_string(),
            });
        };

        venues[index].assign(VenueId(index), attendee_id, attendee)?;
        tracing::debug!(
            attendee = attendee.name(),
            venue = venues[index].name(),
            "fallback assignment"
        );
    }
    Ok(())
}
