//! "All signed" reduction.
//!
//! The repositories compute every actor's current state in one query; these
//! functions reduce those states per process without further reads.

use signature_core_api::domain::SignatureState;
use std::collections::HashMap;
use uuid::Uuid;

/// True iff every state is `Approved`. An empty set is all signed.
pub fn all_signed<I>(states: I) -> bool
where
    I: IntoIterator<Item = SignatureState>,
{
    states
        .into_iter()
        .all(|state| state == SignatureState::Approved)
}

/// Completion of each requested process, in the order of `process_ids`.
///
/// `actor_states` holds `(process_id, current_state)` for every actor of the
/// candidate processes. Processes without any actor are all signed.
pub fn completion_by_process<I>(process_ids: &[Uuid], actor_states: I) -> Vec<(Uuid, bool)>
where
    I: IntoIterator<Item = (Uuid, SignatureState)>,
{
    let mut pending: HashMap<Uuid, bool> = HashMap::with_capacity(process_ids.len());
    for (process_id, state) in actor_states {
        let entry = pending.entry(process_id).or_insert(false);
        *entry |= state != SignatureState::Approved;
    }
    process_ids
        .iter()
        .map(|id| (*id, !pending.get(id).copied().unwrap_or(false)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use SignatureState::*;

    #[test]
    fn test_all_signed() {
        assert!(all_signed([]));
        assert!(all_signed([Approved, Approved]));
        assert!(!all_signed([Approved, Declined]));
        assert!(!all_signed([Approved, NotInvited]));
        assert!(!all_signed([Invited]));
    }

    #[test]
    fn test_completion_by_process() {
        let signed = Uuid::new_v4();
        let pending = Uuid::new_v4();
        let empty = Uuid::new_v4();

        let rows = vec![
            (signed, Approved),
            (pending, Approved),
            (signed, Approved),
            (pending, Invited),
        ];
        let result = completion_by_process(&[pending, empty, signed], rows);

        assert_eq!(result, vec![(pending, false), (empty, true), (signed, true)]);
    }
}
