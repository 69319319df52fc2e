//! # Order resolver.
//!
//! Computes the total run order over a registry snapshot, given the caller-declared
//! head and tail name orders.
//!
//! ## Sections
//! ```text
//!   head   (name in head order)              ─┐
//!   middle (name in neither)                  ├─► head < middle < tail
//!   tail   (name in tail order, not in head) ─┘
//! ```
//!
//! ## Comparator (first rule that decides wins)
//! 1. same name              → reverse registration index
//! 2. different sections     → section order
//! 3. both head              → position in head order
//! 4. both tail              → position in tail order
//! 5. otherwise              → reverse registration index
//!
//! ## Rules
//! - Registration indices are unique, so rule 5 resolves every remaining tie:
//!   the order is total and the result does not depend on the input order.
//! - A name listed in both orders belongs to the head section.
//! - A name listed twice in one order keeps its first position.
//! - Names that match no registered action have no effect.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::registry::Entry;

/// Which part of the run an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Section {
    Head,
    Middle,
    Tail,
}

/// Caller-declared head and tail name orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct NameOrder {
    pub(crate) head: Vec<String>,
    pub(crate) tail: Vec<String>,
}

/// Name → position lookup built once per resolution.
struct Resolver<'a> {
    head: HashMap<&'a str, usize>,
    tail: HashMap<&'a str, usize>,
}

impl<'a> Resolver<'a> {
    fn new(order: &'a NameOrder) -> Self {
        Self {
            head: positions(&order.head),
            tail: positions(&order.tail),
        }
    }

    fn section(&self, name: &str) -> Section {
        if self.head.contains_key(name) {
            Section::Head
        } else if self.tail.contains_key(name) {
            Section::Tail
        } else {
            Section::Middle
        }
    }

    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        if a.name == b.name {
            return b.index.cmp(&a.index);
        }

        let (sa, sb) = (self.section(&a.name), self.section(&b.name));
        if sa != sb {
            return sa.cmp(&sb);
        }

        let by_position = match sa {
            Section::Head => position_cmp(&self.head, &a.name, &b.name),
            Section::Tail => position_cmp(&self.tail, &a.name, &b.name),
            Section::Middle => Ordering::Equal,
        };
        by_position.then_with(|| b.index.cmp(&a.index))
    }
}

fn positions(names: &[String]) -> HashMap<&str, usize> {
    let mut map = HashMap::with_capacity(names.len());
    for (pos, name) in names.iter().enumerate() {
        map.entry(name.as_str()).or_insert(pos);
    }
    map
}

fn position_cmp(map: &HashMap<&str, usize>, a: &str, b: &str) -> Ordering {
    map.get(a).cmp(&map.get(b))
}

/// Sorts `entries` into run order.
pub(crate) fn resolve(mut entries: Vec<Entry>, order: &NameOrder) -> Vec<Entry> {
    let resolver = Resolver::new(order);
    entries.sort_by(|a, b| resolver.compare(a, b));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionRef, SyncActionFn};
    use crate::error::ActionError;
    use std::sync::Arc;

    fn entries(names: &[&str]) -> Vec<Entry> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let action: ActionRef = SyncActionFn::arc(|| Ok::<_, ActionError>(()));
                Entry {
                    name: Arc::from(*name),
                    index,
                    action,
                }
            })
            .collect()
    }

    fn order(head: &[&str], tail: &[&str]) -> NameOrder {
        NameOrder {
            head: head.iter().map(|s| s.to_string()).collect(),
            tail: tail.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn indices(resolved: &[Entry]) -> Vec<usize> {
        resolved.iter().map(|e| e.index).collect()
    }

    #[test]
    fn no_orders_is_reverse_registration() {
        let resolved = resolve(entries(&["a", "b", "c", "a"]), &NameOrder::default());
        assert_eq!(indices(&resolved), [3, 2, 1, 0]);
    }

    #[test]
    fn head_names_run_first_in_declared_order() {
        // 0:m 1:a 2:b 3:b
        let resolved = resolve(entries(&["m", "a", "b", "b"]), &order(&["a", "b"], &[]));
        assert_eq!(indices(&resolved), [1, 3, 2, 0]);
    }

    #[test]
    fn tail_names_run_last_in_declared_order() {
        // 0:m1 1:y 2:m2 3:x 4:y 5:m3
        let resolved = resolve(
            entries(&["m1", "y", "m2", "x", "y", "m3"]),
            &order(&[], &["x", "y"]),
        );
        assert_eq!(indices(&resolved), [5, 2, 0, 3, 4, 1]);
    }

    #[test]
    fn head_wins_over_tail() {
        let resolved = resolve(entries(&["both", "m"]), &order(&["both"], &["both"]));
        assert_eq!(indices(&resolved), [0, 1]);
    }

    #[test]
    fn duplicate_names_in_order_keep_first_position() {
        let resolved = resolve(entries(&["a", "b"]), &order(&["b", "a", "b"], &[]));
        assert_eq!(indices(&resolved), [1, 0]);
    }

    #[test]
    fn unknown_names_have_no_effect() {
        let resolved = resolve(entries(&["a", "b"]), &order(&["ghost"], &["phantom"]));
        assert_eq!(indices(&resolved), [1, 0]);
    }

    #[test]
    fn result_does_not_depend_on_input_order() {
        let o = order(&["a", "b"], &["x", "y"]);
        let forward = resolve(entries(&["m", "y", "a", "x", "b", "a", "m", "y"]), &o);
        let mut shuffled = entries(&["m", "y", "a", "x", "b", "a", "m", "y"]);
        shuffled.reverse();
        shuffled.swap(1, 5);
        let again = resolve(shuffled, &o);

        assert_eq!(indices(&forward), indices(&again));
        assert_eq!(indices(&forward), [5, 2, 4, 6, 0, 3, 7, 1]);
    }
}
