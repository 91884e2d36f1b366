//! CLI module graph.

pub mod check;
pub mod command;
pub mod evaluate;
pub mod factors;
pub mod normalize;
pub mod output;
