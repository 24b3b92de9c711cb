//! Command dispatch

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{BinaryTree, Node, TraversalOrder};
use crate::fixtures::Fixture;
use crate::tree_traits::ToTermTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config_dir.as_deref())?;
    debug!(?settings, "settings loaded");

    match &cli.command {
        Commands::Show { fixture } => show(fixture.unwrap_or(settings.fixture)),
        Commands::Stats { fixture, depth } => stats(fixture.unwrap_or(settings.fixture), *depth),
        Commands::Walk { fixture, order } => walk(
            fixture.unwrap_or(settings.fixture),
            order.unwrap_or(settings.order),
            &settings.separator,
        ),
        Commands::Grow {
            fixture,
            after,
            left,
            right,
        } => grow(
            fixture.unwrap_or(settings.fixture),
            *after,
            *left,
            *right,
            &settings.separator,
        ),
        Commands::Config => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        Commands::Completion { shell } => {
            completion(*shell);
            Ok(())
        }
    }
}

fn show(fixture: Fixture) -> CliResult<()> {
    let tree = fixture.build();
    output::header(&fixture);
    output::info(&tree.to_termtree());
    Ok(())
}

#[instrument(level = "debug")]
fn stats(fixture: Fixture, depth: Option<i64>) -> CliResult<()> {
    let tree = fixture.build();
    output::header(&fixture);
    output::field("size", &tree.size());
    match tree.height() {
        Some(height) => output::field("height", &height),
        None => output::field("height", "- (empty)"),
    }
    output::field("leaves", &tree.number_of_leaves());

    match depth {
        Some(k) => output::field(&format!("depth {k}"), &tree.count_depth_k(k)?),
        None => {
            let deepest = tree.height().unwrap_or(0) as i64;
            for k in 0..=deepest {
                output::field(&format!("depth {k}"), &tree.count_depth_k(k)?);
            }
        }
    }
    Ok(())
}

fn walk(fixture: Fixture, order: TraversalOrder, separator: &str) -> CliResult<()> {
    let tree = fixture.build();
    output::info(&tree.collect(order).iter().join(separator));
    Ok(())
}

/// Outcome of one `grow` run.
#[derive(Debug, Default, PartialEq, Eq)]
struct Growth {
    visited: Vec<i64>,
    /// Payload of the node that received children, None if the walk ended first
    target: Option<i64>,
    attached: Vec<(&'static str, i64)>,
    skipped: Vec<(&'static str, i64)>,
    remaining: Vec<i64>,
}

/// Consumes `after` values, attaches the new children to the node the cursor
/// will produce next, then drains the cursor. The new children show up in the
/// remaining output because the cursor reads children only when it gets there.
#[instrument(level = "debug", skip(tree))]
fn grow_tree(
    tree: &BinaryTree<i64>,
    after: usize,
    left: Option<i64>,
    right: Option<i64>,
) -> CliResult<Growth> {
    if left.is_none() && right.is_none() {
        return Err(CliError::InvalidArgs(
            "grow needs --left and/or --right".to_string(),
        ));
    }

    let mut cursor = tree.cursor();
    let mut growth = Growth {
        visited: cursor.by_ref().take(after).collect(),
        ..Growth::default()
    };

    let Ok(pending) = cursor.peek_node() else {
        return Ok(growth);
    };
    growth.target = Some(pending.data());

    if let Some(value) = left {
        if pending.left_child().is_some() {
            growth.skipped.push(("left", value));
        } else {
            pending.set_left_child(Some(Node::new(value)))?;
            growth.attached.push(("left", value));
        }
    }
    if let Some(value) = right {
        if pending.right_child().is_some() {
            growth.skipped.push(("right", value));
        } else {
            pending.set_right_child(Some(Node::new(value)))?;
            growth.attached.push(("right", value));
        }
    }

    growth.remaining = cursor.collect();
    Ok(growth)
}

fn grow(
    fixture: Fixture,
    after: usize,
    left: Option<i64>,
    right: Option<i64>,
    separator: &str,
) -> CliResult<()> {
    let tree = fixture.build();
    let growth = grow_tree(&tree, after, left, right)?;
    output::field("visited", &growth.visited.iter().join(separator));

    let Some(target) = growth.target else {
        output::warning("walk already finished, nothing to grow");
        return Ok(());
    };
    for (side, value) in &growth.skipped {
        output::warning(&format!("{side} slot of {target} is occupied, skipping {value}"));
    }
    for (side, value) in &growth.attached {
        output::action("attached", &format!("{value} as {side} child of {target}"));
    }
    output::field("remaining", &growth.remaining.iter().join(separator));
    Ok(())
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_grow_without_children_is_usage_error() {
        let tree = fixtures::sample();

        let result = grow_tree(&tree, 0, None, None);

        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
        assert_eq!(tree, fixtures::sample());
    }

    #[test]
    fn test_grow_after_walk_end_attaches_nothing() {
        let tree = fixtures::sample();

        let growth = grow_tree(&tree, 100, Some(1), None).unwrap();

        assert_eq!(growth.visited, vec![5, 2, 1, 4, 8, -2, 6]);
        assert_eq!(growth.target, None);
        assert!(growth.attached.is_empty());
        assert!(growth.remaining.is_empty());
        assert_eq!(tree, fixtures::sample());
    }

    #[test]
    fn test_grow_into_pending_leaf_extends_walk() {
        let tree = fixtures::sample();

        let growth = grow_tree(&tree, 6, Some(100), Some(-50)).unwrap();

        assert_eq!(growth.target, Some(6));
        assert_eq!(growth.attached, vec![("left", 100), ("right", -50)]);
        assert_eq!(growth.remaining, vec![6, 100, -50]);
    }

    #[test]
    fn test_grow_skips_occupied_slot() {
        let tree = fixtures::complete();

        // pending node is 2, whose left slot holds 4
        let growth = grow_tree(&tree, 1, Some(10), None).unwrap();

        assert_eq!(growth.target, Some(2));
        assert_eq!(growth.skipped, vec![("left", 10)]);
        assert!(growth.attached.is_empty());
        assert_eq!(growth.remaining, vec![2, 4, 5, 3, 6, 7]);
    }
}
