use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_aco::colony::{Ant, Colony, ColonyConfig, DepositStrategy, EvaporationScope, Selection};
use u_aco::evaluation::{is_valid_tour, total_distance};
use u_aco::graph::{Point, WeightedGraph};

fn euclidean_graph() -> impl Strategy<Value = WeightedGraph> {
    prop::collection::hash_set((0i32..60, 0i32..60), 2..10).prop_map(|coords: HashSet<(i32, i32)>| {
        let mut coords: Vec<_> = coords.into_iter().collect();
        coords.sort_unstable();
        let points: Vec<Point> = coords
            .into_iter()
            .map(|(x, y)| Point::new(x as f64, y as f64))
            .collect();
        WeightedGraph::from_points(&points).expect("distinct points")
    })
}

fn deposit_strategy() -> impl Strategy<Value = DepositStrategy> {
    prop_oneof![
        Just(DepositStrategy::AllAnts),
        Just(DepositStrategy::IterationBest),
        Just(DepositStrategy::BestSoFar),
    ]
}

fn evaporation_scope() -> impl Strategy<Value = EvaporationScope> {
    prop_oneof![
        Just(EvaporationScope::AllEdges),
        Just(EvaporationScope::TraversedEdges),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ant_cost_matches_recomputed_length(
        graph in euclidean_graph(),
        alpha in 0.0f64..3.0,
        beta in 0.0f64..5.0,
        seed in any::<u64>(),
        start_pick in any::<prop::sample::Index>(),
    ) {
        let start = start_pick.index(graph.len());
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ant = Ant::new(0, &graph, start).unwrap();
        let tour = ant.construct_tour(&mut rng, alpha, beta).unwrap();

        prop_assert_eq!(tour.len(), graph.len() + 1);
        prop_assert!(is_valid_tour(&graph, tour.nodes()));
        prop_assert_eq!(tour.start(), Some(start));
        let recomputed = total_distance(&graph, tour.nodes()).unwrap();
        prop_assert!((recomputed - ant.cost()).abs() < 1e-9 * recomputed.max(1.0));
    }

    #[test]
    fn transition_probabilities_form_distribution(
        graph in euclidean_graph(),
        alpha in 0.0f64..3.0,
        beta in 0.0f64..5.0,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ant = Ant::new(0, &graph, 0).unwrap();
        loop {
            let available = ant.available_nodes();
            if available.is_empty() {
                break;
            }
            let probs = ant.transition_probabilities(&available, alpha, beta).unwrap();
            prop_assert_eq!(probs.len(), available.len());
            prop_assert!(probs.iter().all(|&p| p >= 0.0));
            prop_assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);

            match ant.select_move(&mut rng, alpha, beta).unwrap() {
                Selection::Next(node) => {
                    prop_assert!(available.contains(&node));
                    ant.move_to(node).unwrap();
                }
                Selection::NoMoreNodes => prop_assert!(false, "candidates remained"),
            }
        }
    }

    #[test]
    fn pheromone_stays_positive(
        graph in euclidean_graph(),
        rho in 0.01f64..0.99,
        q in 0.0f64..5.0,
        deposit in deposit_strategy(),
        evaporation in evaporation_scope(),
        seed in any::<u64>(),
    ) {
        let config = ColonyConfig::default()
            .with_population_size(3)
            .with_iterations(25)
            .with_deposit(deposit)
            .with_evaporation(evaporation)
            .with_seed(seed);
        let mut colony = Colony::with_config(graph, config).unwrap();
        colony.simulate(1.0, 2.0, rho, q).unwrap();

        for (u, v) in colony.graph().edges() {
            let tau = colony.graph().pheromone(u, v).unwrap();
            prop_assert!(tau > 0.0 && tau.is_finite());
        }
    }

    #[test]
    fn running_best_never_increases(
        graph in euclidean_graph(),
        rho in 0.05f64..0.95,
        q in 0.1f64..5.0,
        seed in any::<u64>(),
    ) {
        let config = ColonyConfig::default()
            .with_population_size(4)
            .with_iterations(15)
            .with_seed(seed);
        let mut colony = Colony::with_config(graph, config).unwrap();
        let result = colony.simulate(1.0, 2.0, rho, q).unwrap();

        prop_assert_eq!(result.iteration_best.len(), 15);
        for w in result.best_so_far.windows(2) {
            prop_assert!(w[1] <= w[0]);
        }
        let min_iteration = result
            .iteration_best
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        prop_assert_eq!(result.best_length, min_iteration);
        prop_assert!(is_valid_tour(colony.graph(), result.best_tour.nodes()));
    }

    #[test]
    fn seeded_runs_are_reproducible(
        graph in euclidean_graph(),
        seed in any::<u64>(),
    ) {
        let config = ColonyConfig::default()
            .with_population_size(4)
            .with_iterations(10)
            .with_seed(seed);
        let mut a = Colony::with_config(graph.clone(), config.clone()).unwrap();
        let mut b = Colony::with_config(graph, config).unwrap();
        let ra = a.simulate(1.2, 1.2, 0.4, 1.5).unwrap();
        let rb = b.simulate(1.2, 1.2, 0.4, 1.5).unwrap();
        prop_assert_eq!(ra, rb);
    }
}
