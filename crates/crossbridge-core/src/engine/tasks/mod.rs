//! Computational units run by workflows. Each task evaluates one quantity over a
//! whole sampling grid.

pub mod evaluate;
