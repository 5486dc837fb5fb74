use homsearch::{
    config::{Config, PropagateUsingLackey},
    context::{SearchResult, Searcher},
    lackey::{DeletionSink, Lackey},
    model::Model,
    proof::Proof,
    reports::Report,
    schedule::{LubyRestarts, NoRestarts},
    structures::{Graph, Trail},
    types::{Mapping, NamedVertex, Vertex},
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

mod restarting {
    use super::*;

    fn eager_luby() -> LubyRestarts {
        // restart at every opportunity, to stress the nogood machinery
        LubyRestarts::new(1)
    }

    #[test]
    fn unsatisfiable_instances_survive_constant_restarts() {
        let model = Model::build(&complete(3), &cycle(4)).unwrap();
        let config = Config {
            restarts: true,
            ..Config::default()
        };
        let mut searcher = Searcher::new(&model, config);

        let mut schedule = eager_luby();
        let outcome = searcher.solve(&mut schedule);

        assert_eq!(outcome.report, Report::Unsatisfiable);
        assert!(outcome.counters.restarts > 0);
    }

    #[test]
    fn satisfiable_instances_survive_constant_restarts() {
        let model = Model::build(&complete(3), &complete(4)).unwrap();
        let config = Config {
            restarts: true,
            ..Config::default()
        };
        let mut searcher = Searcher::new(&model, config);

        let outcome = searcher.solve(&mut eager_luby());
        assert_eq!(outcome.report, Report::Satisfiable);
        assert_eq!(outcome.mapping.unwrap().len(), 3);
    }

    fn path(n: usize) -> Graph {
        let mut graph = Graph::undirected(n);
        for u in 0..(n as u32) - 1 {
            graph.add_edge(u, u + 1).unwrap();
        }
        graph
    }

    #[test]
    fn counting_is_exact_under_restarts() {
        // embedding a three-path into a four-path fails often enough to keep
        // the eager schedule firing, and the learned nogoods must neither
        // hide nor repeat any of the four embeddings
        let model = Model::build(&path(3), &path(4)).unwrap();
        let config = Config {
            restarts: true,
            count_solutions: true,
            ..Config::default()
        };
        let mut searcher = Searcher::new(&model, config);

        let outcome = searcher.solve(&mut eager_luby());
        assert_eq!(outcome.report, Report::Satisfiable);
        assert_eq!(outcome.solution_count, 4);
        assert!(outcome.counters.restarts > 0);
    }

    #[test]
    fn counting_is_exact_under_restarts_with_solution_nogoods() {
        let model = Model::build(&path(3), &path(4)).unwrap();
        let config = Config {
            restarts: true,
            count_solutions: true,
            bigraph: true,
            ..Config::default()
        };
        let mut searcher = Searcher::new(&model, config);

        let outcome = searcher.solve(&mut eager_luby());
        assert_eq!(outcome.solution_count, 4);
    }

    #[test]
    fn the_raw_search_restores_the_trail_on_unsatisfiable() {
        let model = Model::build(&complete(3), &cycle(4)).unwrap();
        let mut searcher = Searcher::new(&model, Config::default());

        let domains = model.initial_domains();
        let mut trail = Trail::new();
        let (mut nodes, mut propagations, mut solutions) = (0u64, 0u64, 0u128);

        let result = searcher.restarting_search(
            &mut trail,
            &domains,
            &mut nodes,
            &mut propagations,
            &mut solutions,
            0,
            &mut NoRestarts,
        );

        assert_eq!(result, SearchResult::Unsatisfiable);
        assert!(trail.is_empty());
        assert!(nodes > 0);
    }

    #[test]
    fn the_raw_search_leaves_the_solution_on_the_trail() {
        let model = Model::build(&complete(3), &complete(3)).unwrap();
        let mut searcher = Searcher::new(&model, Config::default());

        let domains = model.initial_domains();
        let mut trail = Trail::new();
        let (mut nodes, mut propagations, mut solutions) = (0u64, 0u64, 0u128);

        let result = searcher.restarting_search(
            &mut trail,
            &domains,
            &mut nodes,
            &mut propagations,
            &mut solutions,
            0,
            &mut NoRestarts,
        );

        assert_eq!(result, SearchResult::Satisfiable);
        assert_eq!(trail.as_mapping().len(), 3);
    }
}

mod bigraph {
    use super::*;

    #[test]
    fn a_rejecting_checker_filters_solutions() {
        let mut model = Model::build(&complete(3), &complete(3)).unwrap();
        model.set_bigraph_checker(Box::new(|mapping: &Mapping| mapping[&0] != 0));

        let config = Config {
            bigraph: true,
            count_solutions: true,
            ..Config::default()
        };
        let mut searcher = Searcher::new(&model, config);

        // of the six embeddings, two send vertex 0 to vertex 0
        let outcome = searcher.solve(&mut NoRestarts);
        assert_eq!(outcome.solution_count, 4);
    }

    #[test]
    fn a_checker_rejecting_everything_gives_unsatisfiable() {
        let mut model = Model::build(&complete(3), &complete(3)).unwrap();
        model.set_bigraph_checker(Box::new(|_: &Mapping| false));

        let config = Config {
            bigraph: true,
            ..Config::default()
        };
        let mut searcher = Searcher::new(&model, config);

        let outcome = searcher.solve(&mut NoRestarts);
        assert_eq!(outcome.report, Report::Unsatisfiable);
    }
}

mod lackey {
    use super::*;

    /// Vetoes every complete mapping; accepts partials.
    struct VetoComplete;

    impl Lackey for VetoComplete {
        fn check_solution(
            &mut self,
            _mapping: &Mapping,
            partial: bool,
            _count: bool,
            _deletion: Option<DeletionSink>,
        ) -> bool {
            partial
        }
    }

    /// Deletes one (pattern, target) pair whenever given the chance.
    struct ForbidPair {
        pattern: Vertex,
        target: Vertex,
    }

    impl Lackey for ForbidPair {
        fn check_solution(
            &mut self,
            mapping: &Mapping,
            partial: bool,
            _count: bool,
            deletion: Option<DeletionSink>,
        ) -> bool {
            if let Some(deletion) = deletion {
                deletion(self.pattern, self.target);
            }
            if !partial {
                return mapping.get(&self.pattern) != Some(&self.target);
            }
            true
        }
    }

    #[test]
    fn a_vetoing_lackey_makes_the_instance_unsatisfiable() {
        let model = Model::build(&complete(3), &complete(3)).unwrap();
        let mut searcher = Searcher::new(&model, Config::default());
        searcher.set_lackey(Box::new(VetoComplete));

        let outcome = searcher.solve(&mut NoRestarts);
        assert_eq!(outcome.report, Report::Unsatisfiable);
    }

    #[test]
    fn a_vetoing_lackey_under_backjump_mode_is_still_unsatisfiable() {
        let model = Model::build(&complete(3), &complete(3)).unwrap();
        let config = Config {
            propagate_using_lackey: PropagateUsingLackey::RootAndBackjump,
            ..Config::default()
        };
        let mut searcher = Searcher::new(&model, config);
        searcher.set_lackey(Box::new(VetoComplete));

        let outcome = searcher.solve(&mut NoRestarts);
        assert_eq!(outcome.report, Report::Unsatisfiable);
    }

    #[test]
    fn lackey_deletions_prune_the_count() {
        let mut edge = Graph::undirected(2);
        edge.add_edge(0, 1).unwrap();

        let model = Model::build(&edge, &complete(3)).unwrap();
        let config = Config {
            count_solutions: true,
            propagate_using_lackey: PropagateUsingLackey::Always,
            ..Config::default()
        };
        let mut searcher = Searcher::new(&model, config);
        searcher.set_lackey(Box::new(ForbidPair {
            pattern: 0,
            target: 0,
        }));

        // six embeddings of an edge, minus the two sending vertex 0 to 0
        let outcome = searcher.solve(&mut NoRestarts);
        assert_eq!(outcome.solution_count, 4);
    }
}

mod proof_logging {
    use super::*;

    #[derive(Default)]
    struct Events {
        guesses: usize,
        unit_propagations: usize,
        solutions: usize,
        failures: usize,
    }

    struct Recorder(Rc<RefCell<Events>>);

    impl Proof for Recorder {
        fn guessing(&mut self, _depth: u32, _pattern: NamedVertex, _target: NamedVertex) {
            self.0.borrow_mut().guesses += 1;
        }

        fn propagation_failure(
            &mut self,
            _decisions: &[(Vertex, Vertex)],
            _pattern: NamedVertex,
            _target: NamedVertex,
        ) {
            self.0.borrow_mut().failures += 1;
        }

        fn unit_propagating(&mut self, _pattern: NamedVertex, _target: NamedVertex) {
            self.0.borrow_mut().unit_propagations += 1;
        }

        fn start_level(&mut self, _level: u32) {}
        fn back_up_to_level(&mut self, _level: u32) {}
        fn forget_level(&mut self, _level: u32) {}

        fn incorrect_guess(&mut self, _decisions: &[(Vertex, Vertex)], _was_failure: bool) {}

        fn post_solution(&mut self, _solution: &[(NamedVertex, NamedVertex)]) {
            self.0.borrow_mut().solutions += 1;
        }

        fn out_of_guesses(&mut self, _decisions: &[(Vertex, Vertex)]) {}
        fn post_restart_nogood(&mut self, _decisions: &[(Vertex, Vertex)]) {}
        fn back_up_to_top(&mut self) {}
    }

    #[test]
    fn a_decisive_solve_narrates_its_reasoning() {
        let events = Rc::new(RefCell::new(Events::default()));

        let model = Model::build(&complete(3), &complete(3)).unwrap();
        let mut searcher = Searcher::new(&model, Config::default());
        searcher.set_proof(Box::new(Recorder(events.clone())));

        let outcome = searcher.solve(&mut NoRestarts);
        assert_eq!(outcome.report, Report::Satisfiable);

        let events = events.borrow();
        assert!(events.guesses >= 1);
        assert!(events.unit_propagations >= 1);
        assert_eq!(events.solutions, 1);
    }

    #[test]
    fn refutations_narrate_their_failures() {
        let events = Rc::new(RefCell::new(Events::default()));

        let model = Model::build(&complete(3), &cycle(4)).unwrap();
        let mut searcher = Searcher::new(&model, Config::default());
        searcher.set_proof(Box::new(Recorder(events.clone())));

        let outcome = searcher.solve(&mut NoRestarts);
        assert_eq!(outcome.report, Report::Unsatisfiable);

        let events = events.borrow();
        assert!(events.guesses >= 1);
        assert!(events.failures >= 1);
        assert_eq!(events.solutions, 0);
    }
}
