/*!
Value ordering: the order in which the candidates at a branch are tried.

# Overview

The branch variable is fixed by the smallest-domain rule, so the only freedom
left to heuristics is the order of the candidate target vertices.
Four orderings are supported, per
[ValueOrdering](crate::config::ValueOrdering): two deterministic degree
sorts, a uniform shuffle, and a softmax-biased shuffle.

# The biased shuffle

Sampling proportionally to e^degree in floating point is far too slow, and
the base turns out not to matter, so the biased shuffle works with weights
2^shift(degree) in integer arithmetic, where

```text
shift(d) = max(d - largest_target_degree + headroom, 0)
```

and the headroom of 45 bits leaves enough room above for summing the weights
of up to 2^18 candidates in an [i64].
Candidates are then drawn without replacement by walking the weight prefix
sums against a uniformly random score.
*/

use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{
    config::ValueOrdering,
    context::GenericSearcher,
    types::Vertex,
};

impl<R: rand::Rng + SeedableRng> GenericSearcher<'_, R> {
    /// Orders the candidate targets of a branch in the configured way.
    pub(crate) fn order_branch_values(&mut self, branch: &mut [Vertex]) {
        match self.config.value_ordering {
            ValueOrdering::Degree => self.degree_sort(branch, false),
            ValueOrdering::AntiDegree => self.degree_sort(branch, true),
            ValueOrdering::Biased => self.softmax_shuffle(branch),
            ValueOrdering::Random => branch.shuffle(&mut self.rng),
        }
    }

    /// Stable sort by target degree, descending unless `reverse`.
    fn degree_sort(&self, branch: &mut [Vertex], reverse: bool) {
        match reverse {
            false => branch.sort_by_key(|v| std::cmp::Reverse(self.model.target_degree(0, *v))),
            true => branch.sort_by_key(|v| self.model.target_degree(0, *v)),
        }
    }

    /// Repeatedly draws a softmax-biased candidate and moves it to the front
    /// of the remaining suffix.
    fn softmax_shuffle(&mut self, branch: &mut [Vertex]) {
        const HEADROOM: i64 = i64::BITS as i64 - 1 - 18;

        let largest_target_degree = self.model.largest_target_degree() as i64;
        let expish = |degree: u32| -> i64 {
            let shift = (degree as i64 - largest_target_degree + HEADROOM).max(0);
            1_i64 << shift
        };

        let mut total: i64 = branch
            .iter()
            .map(|v| expish(self.model.target_degree(0, *v)))
            .sum();

        for start in 0..branch.len() {
            // a random score in [1, total], then walk the weights until hit
            let mut select_score = self.rng.random_range(1..=total);

            let mut select_element = start;
            while select_element + 1 < branch.len() {
                select_score -= expish(self.model.target_degree(0, branch[select_element]));
                if select_score <= 0 {
                    break;
                }
                select_element += 1;
            }

            total -= expish(self.model.target_degree(0, branch[select_element]));
            branch.swap(select_element, start);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        config::{Config, ValueOrdering},
        context::Searcher,
        model::Model,
        structures::Graph,
    };

    /// A star plus isolated vertices, so degrees are 3, 1, 1, 1, 0, 0.
    fn lopsided_target() -> Graph {
        let mut graph = Graph::undirected(6);
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(0, 2).unwrap();
        graph.add_edge(0, 3).unwrap();
        graph
    }

    fn ordered(ordering: ValueOrdering, seed: u64) -> Vec<u32> {
        let pattern = Graph::undirected(1);
        let target = lopsided_target();
        let model = Model::build(&pattern, &target).unwrap();

        let mut searcher = Searcher::new(
            &model,
            Config {
                value_ordering: ordering,
                ..Config::default()
            },
        );
        searcher.set_seed(seed);

        let mut branch: Vec<u32> = (0..6).collect();
        searcher.order_branch_values(&mut branch);
        branch
    }

    #[test]
    fn degree_sorts_are_stable() {
        assert_eq!(ordered(ValueOrdering::Degree, 0), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(ordered(ValueOrdering::AntiDegree, 0), vec![4, 5, 1, 2, 3, 0]);
    }

    #[test]
    fn shuffles_are_permutations_and_seed_stable() {
        for ordering in [ValueOrdering::Random, ValueOrdering::Biased] {
            let once = ordered(ordering, 17);
            let again = ordered(ordering, 17);
            assert_eq!(once, again);

            let mut sorted = once.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
        }
    }
}
