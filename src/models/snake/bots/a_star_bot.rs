//! Autopilot that follows a shortest path to the fruit.
//!
//! The whole path is searched again on every tick against the current body, so
//! tail cells that would be free by the time the head arrives are still walls.
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashSet},
};

use log::debug;

use crate::models::snake::{
    snake_bot::SnakeBot,
    snake_game::{Heading, PartialSnakeGame, Position},
};

#[derive(Clone, Copy, Debug)]
struct Node {
    pos: Position,
    g: u32,
    parent: Option<usize>,
}

/// Finds a shortest path from the head to the fruit with A* and a Manhattan heuristic.
///
/// The returned cells start with the step next to the head and end on the fruit.
/// Returns `None` if the fruit can not be reached.
#[must_use]
pub fn find_path(game_state: &PartialSnakeGame) -> Option<Vec<Position>> {
    let start = game_state.head;
    let goal = game_state.fruit;

    // nodes are never removed, parents are indices into this arena
    let mut nodes = vec![Node {
        pos: start,
        g: 0,
        parent: None,
    }];
    // (f, insertion order) so equal priorities pop in a fixed order
    let mut open = BinaryHeap::new();
    open.push(Reverse((start.manhattan(goal), 0_usize)));
    let mut closed = HashSet::new();

    while let Some(Reverse((_, current))) = open.pop() {
        let Node { pos, g, .. } = nodes[current];
        if pos == goal {
            return Some(reconstruct_path(&nodes, current));
        }
        if !closed.insert(pos) {
            continue;
        }
        for heading in Heading::MOVES {
            let next = pos.step(heading);
            if game_state.is_blocked(next) || closed.contains(&next) {
                continue;
            }
            nodes.push(Node {
                pos: next,
                g: g + 1,
                parent: Some(current),
            });
            open.push(Reverse((g + 1 + next.manhattan(goal), nodes.len() - 1)));
        }
    }

    debug!("No path from {start:?} to fruit at {goal:?}");
    None
}

fn reconstruct_path(nodes: &[Node], goal: usize) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = goal;
    while let Some(parent) = nodes[current].parent {
        path.push(nodes[current].pos);
        current = parent;
    }
    path.reverse();
    path
}

/// Heading for the first step of a shortest path to the fruit.
///
/// Falls back to the current heading when there is no path or the head is already on the fruit.
#[must_use]
pub fn compute_heading(game_state: &PartialSnakeGame) -> Heading {
    let Some(path) = find_path(game_state) else {
        return game_state.heading;
    };
    let Some(first_step) = path.first() else {
        return game_state.heading;
    };
    let head = game_state.head;
    Heading::from_delta(first_step.x - head.x, first_step.y - head.y)
        .unwrap_or(game_state.heading)
}

#[derive(Debug, Default)]
pub struct AStarBot;

impl AStarBot {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SnakeBot for AStarBot {
    fn make_move(&self, game_state: &PartialSnakeGame) -> Heading {
        compute_heading(game_state)
    }
}
