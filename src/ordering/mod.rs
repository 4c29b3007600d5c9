//! Position reindexing for dense column ordering
//!
//! Pure planning logic: given a column edit (insert, remove, or move-within),
//! compute the minimal contiguous position shift that restores the dense
//! invariant. The store applies a plan as a single ranged `UPDATE` inside the
//! operation's transaction; the moved or inserted task's own position write
//! happens separately.

/// An edit to one column's ordered task list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEdit {
    /// A task enters the column at this index
    Insert { index: i64 },
    /// The task at this index leaves the column
    Remove { index: i64 },
    /// A task relocates within the column
    MoveWithin { from: i64, to: i64 },
}

/// A contiguous range of sibling positions to shift by `delta`
///
/// The range is inclusive on both ends; `hi = None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionShift {
    pub lo: i64,
    pub hi: Option<i64>,
    pub delta: i64,
}

/// The updates required to keep a column dense across an edit
///
/// At most one shift per edit; an empty plan means no sibling moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftPlan {
    pub shifts: Vec<PositionShift>,
}

impl ShiftPlan {
    fn none() -> Self {
        Self { shifts: Vec::new() }
    }

    fn single(lo: i64, hi: Option<i64>, delta: i64) -> Self {
        Self {
            shifts: vec![PositionShift { lo, hi, delta }],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }
}

/// Compute the sibling shifts for an edit
///
/// Insert at P shifts `position >= P` up by one; remove at P shifts
/// `position > P` down by one. A forward move shifts `(from, to]` down, a
/// backward move shifts `[to, from)` up, and a move to the same index is a
/// no-op.
pub fn plan(edit: ColumnEdit) -> ShiftPlan {
    match edit {
        ColumnEdit::Insert { index } => ShiftPlan::single(index, None, 1),
        ColumnEdit::Remove { index } => ShiftPlan::single(index + 1, None, -1),
        ColumnEdit::MoveWithin { from, to } => {
            if from == to {
                ShiftPlan::none()
            } else if from < to {
                ShiftPlan::single(from + 1, Some(to), -1)
            } else {
                ShiftPlan::single(to, Some(from - 1), 1)
            }
        }
    }
}

/// Clamp a requested insertion index to the valid range `[0, len]`
///
/// `len` is the column's current task count; an index past the end appends.
/// Negative indexes are a caller error and rejected before planning.
pub fn clamp_insert_index(requested: i64, len: i64) -> i64 {
    requested.min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Apply a plan plus the edited task's own write to an in-memory
    /// position vector, mirroring what the store does with SQL.
    fn apply(positions: &mut Vec<i64>, edit: ColumnEdit) {
        let p = plan(edit);
        for shift in &p.shifts {
            for pos in positions.iter_mut() {
                if *pos >= shift.lo && shift.hi.map_or(true, |hi| *pos <= hi) {
                    *pos += shift.delta;
                }
            }
        }
        match edit {
            ColumnEdit::Insert { index } => positions.push(index),
            ColumnEdit::Remove { index } => {
                // The moved-out task's old slot is already vacated by the
                // caller before the shift runs.
                debug_assert!(!positions.contains(&index));
            }
            ColumnEdit::MoveWithin { from, to } => {
                // Caller rewrites the moved task from `from` to `to`.
                let _ = from;
                positions.push(to);
            }
        }
    }

    fn is_dense(positions: &[i64]) -> bool {
        let mut sorted: Vec<i64> = positions.to_vec();
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &p)| p == i as i64)
    }

    #[test]
    fn test_insert_shifts_tail_up() {
        assert_eq!(
            plan(ColumnEdit::Insert { index: 2 }),
            ShiftPlan::single(2, None, 1)
        );
    }

    #[test]
    fn test_remove_shifts_tail_down() {
        assert_eq!(
            plan(ColumnEdit::Remove { index: 1 }),
            ShiftPlan::single(2, None, -1)
        );
    }

    #[test]
    fn test_forward_move_shifts_between_down() {
        // Moving 0 -> 2 pulls positions 1 and 2 down by one.
        assert_eq!(
            plan(ColumnEdit::MoveWithin { from: 0, to: 2 }),
            ShiftPlan::single(1, Some(2), -1)
        );
    }

    #[test]
    fn test_backward_move_shifts_between_up() {
        // Moving 3 -> 1 pushes positions 1 and 2 up by one.
        assert_eq!(
            plan(ColumnEdit::MoveWithin { from: 3, to: 1 }),
            ShiftPlan::single(1, Some(2), 1)
        );
    }

    #[test]
    fn test_same_index_move_is_noop() {
        assert!(plan(ColumnEdit::MoveWithin { from: 2, to: 2 }).is_empty());
    }

    #[test]
    fn test_clamp_insert_index() {
        assert_eq!(clamp_insert_index(0, 0), 0);
        assert_eq!(clamp_insert_index(5, 3), 3);
        assert_eq!(clamp_insert_index(2, 3), 2);
    }

    proptest! {
        #[test]
        fn insert_preserves_density(len in 0i64..20, raw_index in 0i64..25) {
            let mut positions: Vec<i64> = (0..len).collect();
            let index = clamp_insert_index(raw_index, len);
            apply(&mut positions, ColumnEdit::Insert { index });
            prop_assert!(is_dense(&positions));
            prop_assert!(positions.contains(&index));
        }

        #[test]
        fn remove_preserves_density(len in 1i64..20, seed in 0i64..20) {
            let index = seed % len;
            let mut positions: Vec<i64> = (0..len).filter(|&p| p != index).collect();
            apply(&mut positions, ColumnEdit::Remove { index });
            prop_assert!(is_dense(&positions));
            prop_assert_eq!(positions.len() as i64, len - 1);
        }

        #[test]
        fn move_within_preserves_density(len in 1i64..20, a in 0i64..20, b in 0i64..20) {
            let from = a % len;
            let to = b % len;
            // Vacate `from` first, as the store does when it rewrites the task row.
            let mut positions: Vec<i64> = (0..len).filter(|&p| p != from).collect();
            apply(&mut positions, ColumnEdit::MoveWithin { from, to });
            prop_assert!(is_dense(&positions));
            prop_assert_eq!(positions.len() as i64, len);
        }
    }
}
