//! **labyrinth** is a maze generation library built around one algorithm:
//! randomized recursive backtracking over a grid of cell bitfields.

extern crate itertools;
extern crate petgraph;
extern crate rand;
extern crate smallvec;

#[cfg(test)]
extern crate bit_set;
#[cfg(test)]
extern crate fnv;
#[cfg(test)]
extern crate quickcheck;

pub mod cells;
pub mod generators;
pub mod grid;
pub mod renderers;
pub mod units;
