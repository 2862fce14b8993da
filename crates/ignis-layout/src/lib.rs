#![forbid(unsafe_code)]

//! Headless, tick-driven force-directed graph layout.
//!
//! The model mirrors the classic velocity-Verlet force simulation used by interactive network
//! views: a cooling `alpha` scales link springs, many-body repulsion, centering and collision
//! forces; nodes may be pinned to fixed coordinates while the user drags them.
//!
//! Graph data ([`Graph`]) is immutable; live layout state is kept in a separate
//! [`PositionTable`] owned by the [`Simulation`].

pub mod error;
pub mod graph;
pub mod position;
pub mod sim;

pub use error::{Error, Result};
pub use graph::{Graph, LayoutResult, Link, Node, Point};
pub use position::{NodeState, PositionTable};
pub use sim::{ForceOptions, Simulation, StepOutcome};

/// Headless entry point: builds a simulation and runs it until it settles.
pub fn layout(graph: &Graph, options: &ForceOptions) -> Result<LayoutResult> {
    let mut sim = Simulation::new(graph, options.clone())?;
    sim.run_until_settled();
    Ok(sim.layout_result())
}
