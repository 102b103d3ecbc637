//! Disjoint-set over string keys.
//!
//! Keys are interned on first use, so every lookup is also a registration.
//! Union by rank plus path compression; `find` is iterative.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    index: HashMap<String, usize>,
    keys: Vec<String>,
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of `key`, creating a singleton set for unseen keys.
    pub fn insert(&mut self, key: &str) -> usize {
        if let Some(&slot) = self.index.get(key) {
            return slot;
        }
        let slot = self.keys.len();
        self.index.insert(key.to_string(), slot);
        self.keys.push(key.to_string());
        self.parent.push(slot);
        self.rank.push(0);
        slot
    }

    /// Root slot of the set containing `key`.
    pub fn find(&mut self, key: &str) -> usize {
        let slot = self.insert(key);
        self.find_slot(slot)
    }

    fn find_slot(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut cur = slot;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`.
    pub fn union(&mut self, a: &str, b: &str) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    pub fn connected(&mut self, a: &str, b: &str) -> bool {
        self.find(a) == self.find(b)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Partition of all registered keys.
    ///
    /// Groups come out in the order their first member was registered, and
    /// members keep registration order inside each group.
    pub fn groups(&mut self) -> Vec<Vec<String>> {
        let mut group_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<String>> = Vec::new();
        for slot in 0..self.keys.len() {
            let root = self.find_slot(slot);
            let g = *group_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[g].push(self.keys[slot].clone());
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_registers_key() {
        let mut ds = DisjointSet::new();
        let a = ds.find("a");
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.find("a"), a);
    }

    #[test]
    fn test_transitive_union() {
        let mut ds = DisjointSet::new();
        ds.union("a", "b");
        ds.union("c", "d");
        assert!(!ds.connected("a", "c"));
        ds.union("b", "c");
        assert!(ds.connected("a", "d"));
        assert!(!ds.connected("a", "e"));
    }

    #[test]
    fn test_partition_independent_of_union_order() {
        let pairs = [("p", "q"), ("r", "s"), ("q", "r"), ("t", "u")];

        let mut forward = DisjointSet::new();
        for (a, b) in pairs {
            forward.union(a, b);
        }
        let mut backward = DisjointSet::new();
        for (a, b) in pairs.iter().rev() {
            backward.union(b, a);
        }

        let keys = ["p", "q", "r", "s", "t", "u"];
        for x in keys {
            for y in keys {
                assert_eq!(forward.connected(x, y), backward.connected(x, y), "{} ~ {}", x, y);
            }
        }
    }

    #[test]
    fn test_groups_keep_registration_order() {
        let mut ds = DisjointSet::new();
        ds.union("x", "y");
        ds.insert("lonely");
        ds.union("z", "x");
        let groups = ds.groups();
        assert_eq!(groups, vec![vec!["x", "y", "z"], vec!["lonely"]]);
    }

    #[test]
    fn test_long_chain_does_not_recurse() {
        let mut ds = DisjointSet::new();
        let keys: Vec<String> = (0..50_000).map(|i| format!("k{i}")).collect();
        for pair in keys.windows(2) {
            ds.union(&pair[1], &pair[0]);
        }
        assert!(ds.connected("k0", "k49999"));
    }
}
