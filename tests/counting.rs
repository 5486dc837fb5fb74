use homsearch::{
    config::{Config, Injectivity, ValueOrdering},
    context::Searcher,
    model::Model,
    reports::Report,
    schedule::NoRestarts,
    structures::Graph,
    types::Mapping,
};

use std::cell::RefCell;
use std::rc::Rc;

fn complete(n: usize) -> Graph {
    let mut graph = Graph::undirected(n);
    for u in 0..n as u32 {
        for v in (u + 1)..n as u32 {
            graph.add_edge(u, v).unwrap();
        }
    }
    graph
}

fn cycle(n: usize) -> Graph {
    let mut graph = Graph::undirected(n);
    for u in 0..n as u32 {
        graph.add_edge(u, (u + 1) % n as u32).unwrap();
    }
    graph
}

fn path(n: usize) -> Graph {
    let mut graph = Graph::undirected(n);
    for u in 0..(n as u32).saturating_sub(1) {
        graph.add_edge(u, u + 1).unwrap();
    }
    graph
}

fn count(pattern: &Graph, target: &Graph, config: Config) -> u128 {
    let model = Model::build(pattern, target).unwrap();
    let mut searcher = Searcher::new(
        &model,
        Config {
            count_solutions: true,
            ..config
        },
    );
    searcher.solve(&mut NoRestarts).solution_count
}

/// Counts mappings by brute force, for cross-checking on small instances.
fn naive_count(pattern: &Graph, target: &Graph, injective: bool, induced: bool) -> u128 {
    let p = pattern.size();
    let t = target.size();
    if p == 0 {
        return 1;
    }
    if t == 0 {
        return 0;
    }

    let mut adjacent = vec![false; t * t];
    for e in target.edges() {
        adjacent[e.from as usize * t + e.to as usize] = true;
        adjacent[e.to as usize * t + e.from as usize] = true;
    }

    let mut found = 0;
    let mut image = vec![0usize; p];
    'tuples: loop {
        let ok = (0..p).all(|u| {
            (0..p).all(|v| {
                if u == v {
                    return true;
                }
                if injective && image[u] == image[v] {
                    return false;
                }
                let pattern_edge = pattern
                    .edges()
                    .iter()
                    .any(|e| {
                        (e.from as usize, e.to as usize) == (u, v)
                            || (e.from as usize, e.to as usize) == (v, u)
                    });
                let target_edge = adjacent[image[u] * t + image[v]];
                match pattern_edge {
                    true => target_edge,
                    false => !induced || !target_edge,
                }
            })
        });

        if ok {
            found += 1;
        }

        for position in 0..p {
            image[position] += 1;
            if image[position] < t {
                continue 'tuples;
            }
            image[position] = 0;
        }
        break;
    }
    found
}

#[test]
fn triangle_into_triangle_has_six_embeddings() {
    assert_eq!(count(&complete(3), &complete(3), Config::default()), 6);
}

#[test]
fn an_edge_into_a_triangle_has_six_homomorphisms() {
    let config = Config {
        injectivity: Injectivity::NonInjective,
        ..Config::default()
    };
    assert_eq!(count(&path(2), &complete(3), config), 6);
}

#[test]
fn an_edge_into_a_triangle_induced_has_six_embeddings() {
    let config = Config {
        induced: true,
        ..Config::default()
    };
    assert_eq!(count(&path(2), &complete(3), config), 6);
}

#[test]
fn counts_agree_with_brute_force() {
    let cases: Vec<(Graph, Graph)> = vec![
        (path(3), complete(4)),
        (path(3), cycle(4)),
        (complete(3), complete(4)),
        (cycle(4), complete(4)),
        (path(2), path(4)),
    ];

    for (pattern, target) in cases {
        for injectivity in [Injectivity::Injective, Injectivity::NonInjective] {
            for induced in [false, true] {
                let config = Config {
                    injectivity,
                    induced,
                    ..Config::default()
                };
                let expected = naive_count(
                    &pattern,
                    &target,
                    injectivity == Injectivity::Injective,
                    induced,
                );
                assert_eq!(
                    count(&pattern, &target, config),
                    expected,
                    "pattern {} target {} {:?} induced {}",
                    pattern.size(),
                    target.size(),
                    injectivity,
                    induced,
                );
            }
        }
    }
}

#[test]
fn every_enumerated_mapping_is_a_valid_embedding() {
    let pattern = cycle(4);
    let target = complete(4);
    let model = Model::build(&pattern, &target).unwrap();

    let seen: Rc<RefCell<Vec<Mapping>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();

    let config = Config {
        count_solutions: true,
        ..Config::default()
    };
    let mut searcher = Searcher::new(&model, config);
    searcher.set_enumerate_callback(Box::new(move |mapping| {
        sink.borrow_mut().push(mapping.clone());
    }));

    let outcome = searcher.solve(&mut NoRestarts);
    assert_eq!(outcome.report, Report::Satisfiable);
    assert_eq!(outcome.solution_count as usize, seen.borrow().len());

    for mapping in seen.borrow().iter() {
        assert_eq!(mapping.len(), 4);

        // injective
        let mut targets: Vec<_> = mapping.values().copied().collect();
        targets.sort_unstable();
        targets.dedup();
        assert_eq!(targets.len(), 4);

        // adjacency preserved
        for edge in pattern.edges() {
            let (x, y) = (mapping[&edge.from], mapping[&edge.to]);
            assert!(target
                .edges()
                .iter()
                .any(|e| (e.from, e.to) == (x, y) || (e.from, e.to) == (y, x)));
        }
    }
}

#[test]
fn deterministic_orderings_count_identically_across_runs() {
    for ordering in [ValueOrdering::Degree, ValueOrdering::AntiDegree] {
        let config = Config {
            value_ordering: ordering,
            ..Config::default()
        };
        let first = count(&path(3), &cycle(4), config.clone());
        let second = count(&path(3), &cycle(4), config);
        assert_eq!(first, second);
    }
}

#[test]
fn randomised_orderings_are_seed_stable_and_count_exactly() {
    let pattern = path(3);
    let target = complete(4);
    let expected = naive_count(&pattern, &target, true, false);

    for ordering in [ValueOrdering::Random, ValueOrdering::Biased] {
        let model = Model::build(&pattern, &target).unwrap();
        let config = Config {
            count_solutions: true,
            value_ordering: ordering,
            ..Config::default()
        };

        let mut counts = Vec::new();
        for _ in 0..2 {
            let mut searcher = Searcher::new(&model, config.clone());
            searcher.set_seed(42);
            counts.push(searcher.solve(&mut NoRestarts).solution_count);
        }

        assert_eq!(counts[0], expected);
        assert_eq!(counts[0], counts[1]);
    }
}
