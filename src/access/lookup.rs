use hashbrown::HashMap;

use super::matcher::{self, Hashed};
use crate::object::types::Character;
use crate::object::OptionNA;

/// Result of looking up one name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    /// 0-based position of the first element carrying the name
    Found(usize),
    /// No element carries the name. The slot is a fresh position at or past
    /// the end of the container; repeated unmatched names share a slot.
    NotFound(usize),
}

/// Name Lookup
///
/// Finds positions of names within a container's names. Small lookups scan
/// linearly; once the number of comparisons outgrows the cost of building
/// it, a hash table from name hash to positions is used instead. Both paths
/// return the first match.
///
/// NA and empty names never match anything, on either side.
///
pub struct NameLookup<'a> {
    source: &'a [Character],
    names: Vec<Option<Hashed<'a>>>,
    table: Option<HashMap<u32, Vec<usize>>>,
}

fn hashed(x: &Character) -> Option<Hashed<'_>> {
    match x {
        OptionNA::Some(s) if !s.is_empty() => Some(Hashed::new(s)),
        _ => None,
    }
}

impl<'a> NameLookup<'a> {
    /// A lookup that scans linearly
    pub fn new(names: &'a [Character]) -> Self {
        NameLookup {
            source: names,
            names: names.iter().map(hashed).collect(),
            table: None,
        }
    }

    /// A lookup backed by a hash table
    pub fn indexed(names: &'a [Character]) -> Self {
        let mut lookup = NameLookup::new(names);
        let mut table: HashMap<u32, Vec<usize>> = HashMap::with_capacity(names.len());
        for (i, name) in lookup.names.iter().enumerate() {
            if let Some(name) = name {
                table.entry(name.hash).or_default().push(i);
            }
        }
        lookup.table = Some(table);
        lookup
    }

    /// Pick a strategy for `queries` lookups against `names`
    pub fn for_queries(names: &'a [Character], queries: usize) -> Self {
        let n = names.len();
        if n * queries > n * 10 + 10 + queries * 2 {
            NameLookup::indexed(names)
        } else {
            NameLookup::new(names)
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.table.is_some()
    }

    /// Position of the first name exactly equal to `query`
    pub fn find(&self, query: &str) -> Option<usize> {
        if query.is_empty() {
            return None;
        }

        let query = Hashed::new(query);
        match &self.table {
            Some(table) => table
                .get(&query.hash)?
                .iter()
                .copied()
                .find(|&i| self.names[i].is_some_and(|n| n.matches(&query))),
            None => self
                .names
                .iter()
                .position(|n| n.is_some_and(|n| n.matches(&query))),
        }
    }

    /// Exact match if there is one, otherwise the only name that starts
    /// with `query`. Ambiguous prefixes find nothing.
    pub fn find_partial(&self, query: &str) -> Option<usize> {
        if let Some(i) = self.find(query) {
            return Some(i);
        }

        if query.is_empty() {
            return None;
        }

        let prefix = Character::from(query);
        let mut candidates = self
            .names
            .iter()
            .enumerate()
            .filter(|(i, n)| n.is_some() && matcher::starts_with(&self.source[*i], &prefix))
            .map(|(i, _)| i);

        match (candidates.next(), candidates.next()) {
            (Some(i), None) => Some(i),
            _ => None,
        }
    }

    /// Look up every query in order, matching names exactly
    ///
    /// Unmatched names are assigned slots counting up from
    /// `not_found_start`. A name that was already unmatched earlier in
    /// `queries` reuses its slot; NA and empty queries always get a new
    /// one.
    ///
    pub fn find_all(
        names: &'a [Character],
        queries: &[Character],
        not_found_start: usize,
    ) -> Vec<NameMatch> {
        let lookup = NameLookup::for_queries(names, queries.len());
        let mut unmatched: HashMap<&str, usize> = HashMap::new();
        let mut next_slot = not_found_start;

        queries
            .iter()
            .map(|query| {
                let found = match query {
                    OptionNA::Some(q) => lookup.find(q),
                    OptionNA::NA => None,
                };

                if let Some(i) = found {
                    return NameMatch::Found(i);
                }

                match query {
                    OptionNA::Some(q) if !q.is_empty() => {
                        let slot = *unmatched.entry(q.as_str()).or_insert_with(|| {
                            next_slot += 1;
                            next_slot - 1
                        });
                        NameMatch::NotFound(slot)
                    }
                    _ => {
                        next_slot += 1;
                        NameMatch::NotFound(next_slot - 1)
                    }
                }
            })
            .collect()
    }
}
