//! Participation accounting used to steer follow-up rounds

use super::entry::{DiscussionEntry, EntryKind};
use std::collections::HashMap;

/// Specialists who have said the least so far, in caller order.
///
/// Activity is the number of characters a specialist contributed through
/// real replies; fallback entries count as nothing. Everyone tied at the
/// minimum is returned, so a fresh transcript yields every specialist.
pub fn least_active(snapshot: &[DiscussionEntry], specialists: &[String]) -> Vec<String> {
    let mut volume: HashMap<&str, usize> =
        specialists.iter().map(|name| (name.as_str(), 0)).collect();

    for entry in snapshot {
        if entry.kind() != EntryKind::Contribution {
            continue;
        }
        if let Some(total) = volume.get_mut(entry.role()) {
            *total += entry.content().chars().count();
        }
    }

    let Some(min) = volume.values().copied().min() else {
        return Vec::new();
    };

    specialists
        .iter()
        .filter(|name| volume.get(name.as_str()) == Some(&min))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discussion::entry::EntryDraft;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_transcript_returns_everyone() {
        let specialists = names(&["A", "B"]);
        assert_eq!(least_active(&[], &specialists), specialists);
    }

    #[test]
    fn picks_quietest_specialist() {
        let entries = vec![
            EntryDraft::contribution("Host", "a very long opening statement").into_entry(0),
            EntryDraft::contribution("A", "short").into_entry(1),
            EntryDraft::contribution("B", "a somewhat longer reply").into_entry(2),
        ];
        assert_eq!(least_active(&entries, &names(&["A", "B"])), names(&["A"]));
    }

    #[test]
    fn fallbacks_do_not_count_as_activity() {
        let entries = vec![
            EntryDraft::fallback("A", "(A has nothing further to add at this time)")
                .into_entry(0),
            EntryDraft::contribution("B", "ok").into_entry(1),
        ];
        assert_eq!(least_active(&entries, &names(&["A", "B"])), names(&["A"]));
    }

    #[test]
    fn ties_keep_caller_order() {
        let entries = vec![
            EntryDraft::contribution("C", "four").into_entry(0),
            EntryDraft::contribution("A", "abcd").into_entry(1),
            EntryDraft::contribution("B", "longer").into_entry(2),
        ];
        assert_eq!(
            least_active(&entries, &names(&["C", "B", "A"])),
            names(&["C", "A"])
        );
    }
}
