//! Capacity ledger.
//!
//! Pure arithmetic over a task's declared capacity and its current signup
//! count. It takes no locks of its own: the answer is only authoritative when
//! `occupancy` was read inside the same transaction that holds the task's row
//! lock.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    HasCapacity { remaining: i64 },
    Full,
}

impl Capacity {
    pub fn is_full(self) -> bool {
        matches!(self, Capacity::Full)
    }
}

pub fn evaluate(required_students: i32, occupancy: i64) -> Capacity {
    let remaining = i64::from(required_students) - occupancy;
    if remaining > 0 {
        Capacity::HasCapacity { remaining }
    } else {
        Capacity::Full
    }
}

/// Slots left for display purposes, never negative
pub fn remaining_slots(required_students: i32, occupancy: i64) -> i64 {
    match evaluate(required_students, occupancy) {
        Capacity::HasCapacity { remaining } => remaining,
        Capacity::Full => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_task_has_full_capacity() {
        assert_eq!(evaluate(3, 0), Capacity::HasCapacity { remaining: 3 });
    }

    #[test]
    fn test_last_slot_is_still_available() {
        assert_eq!(evaluate(3, 2), Capacity::HasCapacity { remaining: 1 });
    }

    #[test]
    fn test_full_at_capacity() {
        assert!(evaluate(3, 3).is_full());
    }

    #[test]
    fn test_over_capacity_is_full() {
        // cannot happen through registration, but must never read as open
        assert!(evaluate(2, 5).is_full());
        assert_eq!(remaining_slots(2, 5), 0);
    }

    #[test]
    fn test_zero_capacity_is_full() {
        assert!(evaluate(0, 0).is_full());
        assert!(evaluate(-1, 0).is_full());
    }

    #[test]
    fn test_remaining_slots() {
        assert_eq!(remaining_slots(5, 2), 3);
        assert_eq!(remaining_slots(5, 5), 0);
    }
}
