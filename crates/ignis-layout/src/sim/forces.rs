use super::rng::XorShift64Star;
use crate::position::NodeState;

/// Resolved spring between two node indices.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Spring {
    pub(crate) source: usize,
    pub(crate) target: usize,
    pub(crate) strength: f64,
    /// Share of the correction applied to the target; the rest moves the source.
    pub(crate) bias: f64,
}

impl Spring {
    /// Strength is `1 / min(degree)` so hubs are not yanked around by their many leaves.
    pub(crate) fn resolve(pairs: &[(usize, usize)], node_count: usize) -> Vec<Spring> {
        let mut degree = vec![0usize; node_count];
        for &(s, t) in pairs {
            degree[s] += 1;
            degree[t] += 1;
        }
        pairs
            .iter()
            .map(|&(source, target)| {
                let ds = degree[source] as f64;
                let dt = degree[target] as f64;
                Spring {
                    source,
                    target,
                    strength: 1.0 / ds.min(dt),
                    bias: ds / (ds + dt),
                }
            })
            .collect()
    }
}

pub(crate) fn apply_links(
    nodes: &mut [NodeState],
    springs: &[Spring],
    distance: f64,
    alpha: f64,
    rng: &mut XorShift64Star,
) {
    for s in springs {
        let (src, tgt) = (nodes[s.source], nodes[s.target]);
        let mut dx = tgt.x + tgt.vx - src.x - src.vx;
        let mut dy = tgt.y + tgt.vy - src.y - src.vy;
        if dx == 0.0 {
            dx = rng.jiggle();
        }
        if dy == 0.0 {
            dy = rng.jiggle();
        }
        let len = (dx * dx + dy * dy).sqrt();
        let k = (len - distance) / len * alpha * s.strength;
        dx *= k;
        dy *= k;

        let t = &mut nodes[s.target];
        t.vx -= dx * s.bias;
        t.vy -= dy * s.bias;
        let src = &mut nodes[s.source];
        src.vx += dx * (1.0 - s.bias);
        src.vy += dy * (1.0 - s.bias);
    }
}

/// Exact pairwise many-body force. Negative strength repels.
pub(crate) fn apply_many_body(
    nodes: &mut [NodeState],
    strength: f64,
    distance_min: f64,
    alpha: f64,
    rng: &mut XorShift64Star,
) {
    let dmin2 = distance_min * distance_min;
    let n = nodes.len();
    for i in 0..n {
        let (xi, yi) = (nodes[i].x, nodes[i].y);
        let (mut ax, mut ay) = (0.0, 0.0);
        for (j, other) in nodes.iter().enumerate() {
            if i == j {
                continue;
            }
            let mut dx = other.x - xi;
            let mut dy = other.y - yi;
            let mut l2 = dx * dx + dy * dy;
            if dx == 0.0 {
                dx = rng.jiggle();
                l2 += dx * dx;
            }
            if dy == 0.0 {
                dy = rng.jiggle();
                l2 += dy * dy;
            }
            // Clamp near-coincident pairs so the force stays finite.
            if l2 < dmin2 {
                l2 = (dmin2 * l2).sqrt();
            }
            let w = strength * alpha / l2;
            ax += dx * w;
            ay += dy * w;
        }
        nodes[i].vx += ax;
        nodes[i].vy += ay;
    }
}

/// Translates all nodes so their mean position sits on `(cx, cy)`.
pub(crate) fn apply_center(nodes: &mut [NodeState], cx: f64, cy: f64) {
    if nodes.is_empty() {
        return;
    }
    let n = nodes.len() as f64;
    let (sx, sy) = nodes
        .iter()
        .fold((0.0, 0.0), |(sx, sy), s| (sx + s.x, sy + s.y));
    let (shift_x, shift_y) = (sx / n - cx, sy / n - cy);
    for s in nodes.iter_mut() {
        s.x -= shift_x;
        s.y -= shift_y;
    }
}

/// Pushes overlapping circles apart, splitting the correction by relative area.
pub(crate) fn apply_collide(
    nodes: &mut [NodeState],
    radii: &[f64],
    strength: f64,
    rng: &mut XorShift64Star,
) {
    let n = nodes.len();
    for i in 0..n {
        let ri = radii[i];
        let ri2 = ri * ri;
        for j in (i + 1)..n {
            let rj = radii[j];
            let r = ri + rj;
            let (a, b) = (nodes[i], nodes[j]);
            let mut dx = (a.x + a.vx) - (b.x + b.vx);
            let mut dy = (a.y + a.vy) - (b.y + b.vy);
            let mut l2 = dx * dx + dy * dy;
            if l2 >= r * r {
                continue;
            }
            if dx == 0.0 {
                dx = rng.jiggle();
                l2 += dx * dx;
            }
            if dy == 0.0 {
                dy = rng.jiggle();
                l2 += dy * dy;
            }
            let l = l2.sqrt();
            let k = (r - l) / l * strength;
            dx *= k;
            dy *= k;
            let rj2 = rj * rj;
            let share = rj2 / (ri2 + rj2);

            nodes[i].vx += dx * share;
            nodes[i].vy += dy * share;
            nodes[j].vx -= dx * (1.0 - share);
            nodes[j].vy -= dy * (1.0 - share);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> NodeState {
        NodeState {
            x,
            y,
            ..NodeState::default()
        }
    }

    #[test]
    fn star_springs_favor_the_hub() {
        let springs = Spring::resolve(&[(0, 1), (0, 2), (0, 3)], 4);
        for s in &springs {
            assert_eq!(s.strength, 1.0);
            assert_eq!(s.bias, 0.75);
        }
    }

    #[test]
    fn coincident_nodes_get_finite_repulsion() {
        let mut rng = XorShift64Star::new(1);
        let mut nodes = vec![at(5.0, 5.0), at(5.0, 5.0)];
        apply_many_body(&mut nodes, -220.0, 1.0, 1.0, &mut rng);
        for n in &nodes {
            assert!(n.vx.is_finite() && n.vy.is_finite());
        }
    }

    #[test]
    fn center_moves_the_mean() {
        let mut nodes = vec![at(0.0, 0.0), at(10.0, 20.0)];
        apply_center(&mut nodes, 100.0, 100.0);
        assert_eq!((nodes[0].x, nodes[0].y), (95.0, 90.0));
        assert_eq!((nodes[1].x, nodes[1].y), (105.0, 110.0));
    }

    #[test]
    fn collide_separates_overlapping_pair() {
        let mut rng = XorShift64Star::new(1);
        let mut nodes = vec![at(0.0, 0.0), at(10.0, 0.0)];
        apply_collide(&mut nodes, &[18.0, 18.0], 1.0, &mut rng);
        assert!(nodes[0].vx < 0.0);
        assert!(nodes[1].vx > 0.0);
    }
}
