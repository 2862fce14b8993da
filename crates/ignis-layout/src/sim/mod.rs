//! Tick-driven force simulation.
//!
//! Each [`Simulation::step`] moves `alpha` toward `alpha_target`, applies the link, many-body,
//! center and collision forces in that order, then integrates velocities with friction. The
//! simulation stops by itself once `alpha` falls below `alpha_min` or, while cooling, once the
//! iteration budget is spent.

mod forces;
mod rng;

use crate::error::Result;
use crate::graph::{Graph, LayoutResult, Point};
use crate::position::PositionTable;
use forces::Spring;
use rng::XorShift64Star;

const INITIAL_RADIUS: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ForceOptions {
    pub link_distance: f64,
    /// Many-body strength; negative values repel.
    pub charge_strength: f64,
    pub distance_min: f64,
    pub center: Point,
    pub collide_strength: f64,
    pub alpha_min: f64,
    pub alpha_decay: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// Ticks allowed after a (re)start while the simulation is cooling.
    pub max_iterations: usize,
    pub random_seed: u64,
}

impl Default for ForceOptions {
    fn default() -> Self {
        let alpha_min = 0.001;
        Self {
            link_distance: 90.0,
            charge_strength: -220.0,
            distance_min: 1.0,
            center: Point { x: 0.0, y: 0.0 },
            collide_strength: 1.0,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            max_iterations: 300,
            random_seed: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Positions moved and the simulation keeps running.
    Ticked,
    /// Positions moved on this tick and the simulation has now stopped.
    Settled,
    /// Nothing happened; the simulation was already stopped.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    options: ForceOptions,
    springs: Vec<Spring>,
    radii: Vec<f64>,
    positions: PositionTable,
    alpha: f64,
    alpha_target: f64,
    iterations: usize,
    running: bool,
    rng: XorShift64Star,
}

impl Simulation {
    pub fn new(graph: &Graph, options: ForceOptions) -> Result<Self> {
        graph.validate()?;

        let mut positions = PositionTable::with_ids(graph.nodes.iter().map(|n| n.id.as_str()));
        let pairs: Vec<(usize, usize)> = graph
            .links
            .iter()
            .filter_map(|l| Some((positions.index_of(&l.source)?, positions.index_of(&l.target)?)))
            .collect();
        let springs = Spring::resolve(&pairs, positions.len());
        let radii = graph.nodes.iter().map(|n| n.collide_radius.max(0.0)).collect();

        // Phyllotaxis arrangement around the center: deterministic and free of coincident nodes.
        let angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
        for (i, s) in positions.states_mut().iter_mut().enumerate() {
            let r = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
            let a = i as f64 * angle;
            s.x = options.center.x + r * a.cos();
            s.y = options.center.y + r * a.sin();
        }

        let rng = XorShift64Star::new(options.random_seed);
        Ok(Self {
            options,
            springs,
            radii,
            positions,
            alpha: 1.0,
            alpha_target: 0.0,
            iterations: 0,
            running: true,
            rng,
        })
    }

    pub fn options(&self) -> &ForceOptions {
        &self.options
    }

    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_target(&self) -> f64 {
        self.alpha_target
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Dropping the target to zero starts cooling with a fresh iteration budget.
    pub fn set_alpha_target(&mut self, target: f64) {
        let target = target.clamp(0.0, 1.0);
        if target <= 0.0 && self.alpha_target > 0.0 {
            self.iterations = 0;
        }
        self.alpha_target = target;
    }

    /// Resumes ticking and resets the iteration budget. `alpha` is left as is.
    pub fn restart(&mut self) {
        self.running = true;
        self.iterations = 0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Pins node `id` at `(x, y)`. Returns `false` for unknown ids.
    pub fn pin(&mut self, id: &str, x: f64, y: f64) -> bool {
        let Some(s) = self
            .positions
            .index_of(id)
            .and_then(|i| self.positions.state_mut(i))
        else {
            return false;
        };
        s.fixed_x = Some(x);
        s.fixed_y = Some(y);
        true
    }

    pub fn unpin(&mut self, id: &str) -> bool {
        let Some(s) = self
            .positions
            .index_of(id)
            .and_then(|i| self.positions.state_mut(i))
        else {
            return false;
        };
        s.fixed_x = None;
        s.fixed_y = None;
        true
    }

    pub fn step(&mut self) -> StepOutcome {
        if !self.running {
            return StepOutcome::Stopped;
        }
        self.tick();
        self.iterations += 1;

        let cooled = self.alpha < self.options.alpha_min;
        let budget_spent =
            self.alpha_target <= 0.0 && self.iterations >= self.options.max_iterations;
        if cooled || budget_spent {
            self.running = false;
            StepOutcome::Settled
        } else {
            StepOutcome::Ticked
        }
    }

    /// Steps until the simulation stops; returns the number of ticks taken.
    pub fn run_until_settled(&mut self) -> usize {
        let mut ticks = 0;
        let limit = self.options.max_iterations.max(1);
        while ticks < limit {
            match self.step() {
                StepOutcome::Ticked => ticks += 1,
                StepOutcome::Settled => return ticks + 1,
                StepOutcome::Stopped => break,
            }
        }
        ticks
    }

    pub fn layout_result(&self) -> LayoutResult {
        LayoutResult {
            positions: self
                .positions
                .iter()
                .map(|(id, s)| (id.to_string(), s.point()))
                .collect(),
        }
    }

    fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.options.alpha_decay;
        let alpha = self.alpha;
        let o = &self.options;
        let nodes = self.positions.states_mut();

        forces::apply_links(nodes, &self.springs, o.link_distance, alpha, &mut self.rng);
        forces::apply_many_body(nodes, o.charge_strength, o.distance_min, alpha, &mut self.rng);
        forces::apply_center(nodes, o.center.x, o.center.y);
        forces::apply_collide(nodes, &self.radii, o.collide_strength, &mut self.rng);

        let keep = 1.0 - o.velocity_decay;
        for s in nodes.iter_mut() {
            match s.fixed_x {
                Some(fx) => {
                    s.x = fx;
                    s.vx = 0.0;
                }
                None => {
                    s.vx *= keep;
                    s.x += s.vx;
                }
            }
            match s.fixed_y {
                Some(fy) => {
                    s.y = fy;
                    s.vy = 0.0;
                }
                None => {
                    s.vy *= keep;
                    s.y += s.vy;
                }
            }
        }
    }
}
