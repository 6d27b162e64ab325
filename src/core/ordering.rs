use crate::domain::model::AttendeeId;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

/// The order attendees are offered to the matching engine and the fallback allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendeeOrder {
    /// Input order, as parsed.
    #[default]
    Input,
    /// A shuffle fully determined by the seed.
    Seeded(u64),
}

impl AttendeeOrder {
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or(AttendeeOrder::Input, AttendeeOrder::Seeded)
    }

    pub fn permutation(&self, len: usize) -> Vec<AttendeeId> {
        let mut ids: Vec<AttendeeId> = (0..len).map(AttendeeId).collect();
        if let AttendeeOrder::Seeded(seed) = self {
            let mut rng = StdRng::seed_from_u64(*seed);
            ids.shuffle(&mut rng);
        }
        ids
    }
}

/// Checks that `order` visits each of `len` attendees exactly once.
pub fn is_permutation(order: &[AttendeeId], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    order.iter().all(|id| match seen.get_mut(id.0) {
        Some(slot) if !*slot => {
            *slot = true;
            true
        }
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_order_is_identity() {
        assert_eq!(
            AttendeeOrder::Input.permutation(3),
            vec![AttendeeId(0), AttendeeId(1), AttendeeId(2)]
        );
        assert_eq!(AttendeeOrder::from_seed(None), AttendeeOrder::Input);
    }

    #[test]
    fn test_seeded_order_is_reproducible() {
        let first = AttendeeOrder::Seeded(7).permutation(50);
        let second = AttendeeOrder::from_seed(Some(7)).permutation(50);

        assert_eq!(first, second);
        assert!(is_permutation(&first, 50));
        assert_ne!(first, AttendeeOrder::Input.permutation(50));
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[AttendeeId(1), AttendeeId(0)], 2));
        assert!(!is_permutation(&[AttendeeId(0), AttendeeId(0)], 2));
        assert!(!is_permutation(&[AttendeeId(0), AttendeeId(2)], 2));
        assert!(!is_permutation(&[AttendeeId(0)], 2));
    }
}
