//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// A manifest-like entry: component name and its dependency names
    pub type Entry = (String, Vec<String>);

    /// Generate an acyclic, fully resolvable dependency relation
    ///
    /// Edges only point from a higher to a lower hidden index, then the
    /// declaration order is shuffled so the planner has to reorder.
    pub fn dag() -> impl Strategy<Value = Vec<Entry>> {
        (1usize..12)
            .prop_flat_map(|n| {
                (
                    proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n),
                    Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
                )
            })
            .prop_map(|(matrix, order)| {
                let name = |i: usize| format!("c{i}");
                let entries: Vec<Entry> = (0..order.len())
                    .map(|i| {
                        let deps = (0..i).filter(|&j| matrix[i][j]).map(name).collect();
                        (name(i), deps)
                    })
                    .collect();
                order.into_iter().map(|i| entries[i].clone()).collect()
            })
    }

    /// Generate a dependency relation containing a cycle of length 1..6
    ///
    /// A length-one cycle is a self-dependency.
    pub fn cyclic_graph() -> impl Strategy<Value = Vec<Entry>> {
        (1usize..6, dag()).prop_map(|(ring, mut entries)| {
            let anchor = entries[0].0.clone();
            for i in 0..ring {
                let next = (i + 1) % ring;
                entries.push((format!("r{i}"), vec![anchor.clone(), format!("r{next}")]));
            }
            entries
        })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_dag_generator_is_closed_and_unique(entries in dag()) {
            let names: HashSet<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
            prop_assert_eq!(names.len(), entries.len());
            for (_, deps) in &entries {
                for dep in deps {
                    prop_assert!(names.contains(dep.as_str()));
                }
            }
        }
    }
}
