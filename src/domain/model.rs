use crate::utils::error::{Result, SummitError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Position of a venue in the roster's venue list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VenueId(pub usize);

/// Position of an attendee in the roster's attendee list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttendeeId(pub usize);

impl fmt::Display for VenueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "venue#{}", self.0)
    }
}

impl fmt::Display for AttendeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attendee#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    name: String,
    capacity: usize,
    assigned: Vec<AttendeeId>,
}

impl Venue {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            assigned: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Attendees in the order they were assigned.
    pub fn assigned(&self) -> &[AttendeeId] {
        &self.assigned
    }

    pub fn used_capacity(&self) -> usize {
        self.assigned.len()
    }

    pub fn remaining_capacity(&self) -> usize {
        self.capacity - self.assigned.len()
    }

    pub fn has_capacity(&self) -> bool {
        self.used_capacity() < self.capacity
    }

    /// Places `attendee` here. A full venue refuses and leaves both records untouched.
    pub fn assign(
        &mut self,
        venue_id: VenueId,
        attendee_id: AttendeeId,
        attendee: &mut Attendee,
    ) -> Result<()> {
        if !self.has_capacity() {
            return Err(SummitError::CapacityExceeded {
                venue: self.name.clone(),
                capacity: self.capacity,
            });
        }

        self.assigned.push(attendee_id);
        attendee.assign(venue_id, &self.name);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    name: String,
    preferences: BTreeSet<String>,
    venue: Option<VenueId>,
    got_preference: Option<bool>,
}

impl Attendee {
    /// An empty preference set means any venue is acceptable.
    pub fn new<I, S>(name: impl Into<String>, preferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            preferences: preferences.into_iter().map(Into::into).collect(),
            venue: None,
            got_preference: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preferences(&self) -> &BTreeSet<String> {
        &self.preferences
    }

    pub fn venue(&self) -> Option<VenueId> {
        self.venue
    }

    pub fn got_preference(&self) -> Option<bool> {
        self.got_preference
    }

    pub fn is_assigned(&self) -> bool {
        self.venue.is_some()
    }

    pub fn accepts(&self, venue_name: &str) -> bool {
        self.preferences.is_empty() || self.preferences.contains(venue_name)
    }

    pub(crate) fn assign(&mut self, venue_id: VenueId, venue_name: &str) {
        self.got_preference = Some(self.accepts(venue_name));
        self.venue = Some(venue_id);
    }
}

/// The full input snapshot for one assignment run.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub venues: Vec<Venue>,
    pub attendees: Vec<Attendee>,
}

impl Roster {
    /// Builds a roster, rejecting preferences that name venues not in `venues`.
    pub fn new(venues: Vec<Venue>, attendees: Vec<Attendee>) -> Result<Self> {
        for attendee in &attendees {
            if let Some(unknown) = attendee
                .preferences()
                .iter()
                .find(|pref| !venues.iter().any(|venue| venue.name() == pref.as_str()))
            {
                return Err(SummitError::UnknownVenue {
                    attendee: attendee.name().to_string(),
                    venue: unknown.clone(),
                });
            }
        }

        Ok(Self { venues, attendees })
    }

    pub fn total_capacity(&self) -> usize {
        self.venues.iter().map(Venue::capacity).sum()
    }

    pub fn venue(&self, id: VenueId) -> Option<&Venue> {
        self.venues.get(id.0)
    }

    pub fn attendee(&self, id: AttendeeId) -> Option<&Attendee> {
        self.attendees.get(id.0)
    }

    pub fn venue_of(&self, attendee: &Attendee) -> Option<&Venue> {
        attendee.venue().and_then(|id| self.venue(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_assign_sets_both_sides() {
        let mut venue = Venue::new("a", 1);
        let mut attendee = Attendee::new("joe", ["a"]);

        venue.assign(VenueId(0), AttendeeId(3), &mut attendee).unwrap();

        assert_eq!(venue.assigned(), &[AttendeeId(3)]);
        assert_eq!(venue.used_capacity(), 1);
        assert!(!venue.has_capacity());
        assert_eq!(attendee.venue(), Some(VenueId(0)));
        assert_eq!(attendee.got_preference(), Some(true));
    }

    #[test]
    fn test_full_venue_refuses_without_mutation() {
        let mut venue = Venue::new("a", 1);
        let mut first = Attendee::new("joe", ["a"]);
        let mut second = Attendee::new("ann", ["a"]);
        venue.assign(VenueId(0), AttendeeId(0), &mut first).unwrap();

        let err = venue
            .assign(VenueId(0), AttendeeId(1), &mut second)
            .unwrap_err();

        assert!(matches!(err, SummitError::CapacityExceeded { ref venue, capacity: 1 } if venue == "a"));
        assert_eq!(venue.assigned(), &[AttendeeId(0)]);
        assert_eq!(second.venue(), None);
        assert_eq!(second.got_preference(), None);
    }

    #[test]
    fn test_got_preference() {
        let mut picky = Attendee::new("joe", ["b"]);
        picky.assign(VenueId(0), "a");
        assert_eq!(picky.got_preference(), Some(false));

        let mut easy = Attendee::new("ann", Vec::<String>::new());
        easy.assign(VenueId(0), "a");
        assert_eq!(easy.got_preference(), Some(true));
    }

    #[test]
    fn test_roster_rejects_unknown_preferences() {
        let err = Roster::new(
            vec![Venue::new("a", 2)],
            vec![Attendee::new("joe", ["a", "z"])],
        )
        .unwrap_err();

        assert!(matches!(err, SummitError::UnknownVenue { ref venue, .. } if venue == "z"));
    }

    #[test]
    fn test_roster_total_capacity() {
        let roster = Roster::new(
            vec![Venue::new("a", 2), Venue::new("b", 1), Venue::new("c", 3)],
            vec![],
        )
        .unwrap();
        assert_eq!(roster.total_capacity(), 6);
    }
}
