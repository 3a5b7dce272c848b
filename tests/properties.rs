//! Property tests for path enumeration on random rule graphs.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use segmentation_converter::{
    ConversionGraphSolver, ConversionPathAndCost, RuleRef, RuleRegistry, SolverLimits, StaticRule,
};

const NAMES: [&str; 5] = ["Labelmap", "Surface", "Contours", "Ribbon", "Points"];

fn build_rules(edges: &[(usize, usize, u32)]) -> Vec<RuleRef> {
    edges
        .iter()
        .enumerate()
        .map(|(i, &(s, t, cost))| {
            Arc::new(StaticRule::new(format!("rule{i}"), NAMES[s], NAMES[t], cost)) as RuleRef
        })
        .collect()
}

/// Collect simple paths as rule-name sequences, walking from `node` back to
/// `source` over the rules producing each node, in registration order.
fn simple_paths(
    rules: &[RuleRef],
    source: &str,
    node: &str,
    suffix: &mut Vec<String>,
    visited: &mut Vec<String>,
    found: &mut Vec<Vec<String>>,
) {
    for rule in rules.iter().filter(|r| r.target_representation_name() == node) {
        let previous = rule.source_representation_name();
        if previous == source {
            let mut names = vec![rule.name().to_string()];
            names.extend(suffix.iter().rev().cloned());
            found.push(names);
        } else if !visited.iter().any(|v| v == previous) {
            suffix.push(rule.name().to_string());
            visited.push(previous.to_string());
            simple_paths(rules, source, previous, suffix, visited, found);
            visited.pop();
            suffix.pop();
        }
    }
}

fn expected_paths(rules: &[RuleRef], source: &str, target: &str) -> Vec<Vec<String>> {
    let mut found = Vec::new();
    let mut visited = vec![target.to_string()];
    simple_paths(rules, source, target, &mut Vec::new(), &mut visited, &mut found);
    found
}

fn rule_names(entry: &ConversionPathAndCost) -> Vec<String> {
    entry.path.rules().iter().map(|r| r.name().to_string()).collect()
}

fn graph_strategy() -> impl Strategy<Value = (Vec<(usize, usize, u32)>, usize, usize)> {
    (
        prop::collection::vec((0usize..NAMES.len(), 0usize..NAMES.len(), 0u32..10), 0..12),
        0usize..NAMES.len(),
        0usize..NAMES.len(),
    )
}

proptest! {
    #[test]
    fn paths_are_well_formed((edges, s, t) in graph_strategy()) {
        prop_assume!(s != t);
        let rules = build_rules(&edges);
        let registry = RuleRegistry::with_rules(rules.iter().cloned());
        let paths = ConversionGraphSolver::new().possible_conversions(&registry, NAMES[s], NAMES[t]);

        for entry in &paths {
            prop_assert!(!entry.path.is_empty());
            prop_assert!(entry.path.is_chained());
            prop_assert_eq!(entry.path.source_representation_name(), Some(NAMES[s]));
            prop_assert_eq!(entry.path.target_representation_name(), Some(NAMES[t]));

            let chain = entry.path.representation_chain();
            let unique: HashSet<&str> = chain.iter().copied().collect();
            prop_assert_eq!(unique.len(), chain.len());

            let cost: u64 = entry.path.rules().iter().map(|r| u64::from(r.conversion_cost(None, None))).sum();
            prop_assert_eq!(entry.cost, cost);
        }
    }

    #[test]
    fn enumeration_follows_registration_order((edges, s, t) in graph_strategy()) {
        prop_assume!(s != t);
        let rules = build_rules(&edges);
        let registry = RuleRegistry::with_rules(rules.iter().cloned());
        let paths = ConversionGraphSolver::new().possible_conversions(&registry, NAMES[s], NAMES[t]);

        let actual: Vec<Vec<String>> = paths.iter().map(rule_names).collect();
        prop_assert_eq!(&actual, &expected_paths(&rules, NAMES[s], NAMES[t]));

        let distinct: HashSet<Vec<String>> = actual.iter().cloned().collect();
        prop_assert_eq!(distinct.len(), actual.len());
    }

    #[test]
    fn cheapest_is_first_minimum_of_registration_walk((edges, s, t) in graph_strategy()) {
        prop_assume!(s != t);
        let rules = build_rules(&edges);
        let registry = RuleRegistry::with_rules(rules.iter().cloned());
        let paths = ConversionGraphSolver::new().possible_conversions(&registry, NAMES[s], NAMES[t]);

        let cost_of = |names: &Vec<String>| -> u64 {
            names
                .iter()
                .map(|name| edges[name["rule".len()..].parse::<usize>().unwrap()].2 as u64)
                .sum()
        };
        let expected = expected_paths(&rules, NAMES[s], NAMES[t]);
        let mut first_min: Option<&Vec<String>> = None;
        for names in &expected {
            if first_min.map_or(true, |best| cost_of(names) < cost_of(best)) {
                first_min = Some(names);
            }
        }

        match ConversionGraphSolver::cheapest_entry(&paths) {
            Some(entry) => {
                let names = rule_names(entry);
                prop_assert_eq!(Some(&names), first_min);
            }
            None => prop_assert!(first_min.is_none()),
        }
    }

    #[test]
    fn cheapest_is_first_minimum((edges, s, t) in graph_strategy()) {
        let rules = build_rules(&edges);
        let registry = RuleRegistry::with_rules(rules);
        let paths = ConversionGraphSolver::new().possible_conversions(&registry, NAMES[s], NAMES[t]);

        match ConversionGraphSolver::cheapest_path(&paths) {
            Ok(cheapest) => {
                let min = paths.iter().map(|p| p.cost).min();
                let first = paths.iter().find(|p| Some(p.cost) == min);
                prop_assert!(first.is_some());
                prop_assert_eq!(&first.unwrap().path, cheapest);
            }
            Err(_) => prop_assert!(paths.is_empty()),
        }
    }

    #[test]
    fn duplicate_registration_keeps_size((edges, _s, _t) in graph_strategy()) {
        let rules = build_rules(&edges);
        let mut registry = RuleRegistry::with_rules(rules.iter().cloned());
        let fingerprint = registry.fingerprint().to_string();

        for rule in &rules {
            prop_assert!(!registry.register(Arc::clone(rule)));
        }
        prop_assert_eq!(registry.len(), rules.len());
        prop_assert_eq!(registry.fingerprint(), fingerprint.as_str());
    }

    #[test]
    fn limits_only_remove_paths((edges, s, t) in graph_strategy(), depth in 1usize..4, max in 0usize..4) {
        prop_assume!(s != t);
        let registry = RuleRegistry::with_rules(build_rules(&edges));
        let all: Vec<Vec<String>> = ConversionGraphSolver::new()
            .possible_conversions(&registry, NAMES[s], NAMES[t])
            .iter()
            .map(rule_names)
            .collect();

        let limited = ConversionGraphSolver::with_limits(
            SolverLimits::unlimited().with_max_depth(depth).with_max_paths(max),
        )
        .possible_conversions(&registry, NAMES[s], NAMES[t]);

        prop_assert!(limited.len() <= max);
        for entry in &limited {
            prop_assert!(entry.path.len() <= depth);
            prop_assert!(all.contains(&rule_names(entry)));
        }
    }
}
