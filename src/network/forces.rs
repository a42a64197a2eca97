use glam::{Vec2, vec2};

use super::data::ConnectionMatrix;

/// Strength of the pairwise repulsion between nodes. [0, 1]
pub(crate) const PROXIMITY_REPULSION_FORCE: f32 = 0.025;
/// Pull toward the centre while the layout is still unfolding. [0, 1]
pub(crate) const CENTER_ATTRACTION_FORCE: f32 = 0.001;
/// Pull toward the centre once the layout has stabilized. [0, 1]
pub(crate) const CENTER_ATTRACTION_FORCE_AFTER_STABILIZE: f32 = 0.1;
/// Strength of the attraction along links. [0, 1]
pub(crate) const LINK_ATTRACTION_FORCE: f32 = 1.0;

/// Below this squared distance two nodes count as coincident.
const MIN_DISTANCE_SQ: f32 = 1.0e-8;

/// Layout density normalization for a unit working area.
pub(crate) fn base_k_factor(node_count: usize) -> f32 {
    let area = 1.0 * 1.0;
    0.25 * (area / node_count as f32).sqrt()
}

/// Direction from `j` to `i` for nodes sitting on top of each other.
/// Stable per unordered pair and opposite for the two orderings.
fn coincident_direction(i: usize, j: usize) -> Vec2 {
    let (low, high) = if i < j { (i, j) } else { (j, i) };
    let angle = ((low as f32) * 0.618_034 + (high as f32) * 0.414_214) * std::f32::consts::TAU;
    let direction = vec2(angle.cos(), angle.sin());
    if i < j { direction } else { -direction }
}

/// Inverse-square repulsion. Every ordered pair `(i, j)` pushes only `i`; the reaction on `j`
/// comes from visiting `(j, i)`.
pub(crate) fn accumulate_repulsion(positions: &[Vec2], base_k: f32, displacements: &mut [Vec2]) {
    for (i, displacement) in displacements.iter_mut().enumerate() {
        let left = positions[i];
        for (j, &right) in positions.iter().enumerate() {
            // nodes do not repel themselves
            if j == i {
                continue;
            }

            let delta = left - right;
            let distance_sq = delta.length_squared();
            let (direction, distance_sq) = if distance_sq > MIN_DISTANCE_SQ {
                (delta / distance_sq.sqrt(), distance_sq)
            } else {
                (coincident_direction(i, j), MIN_DISTANCE_SQ)
            };

            let scale = base_k / distance_sq;
            *displacement += direction * scale * PROXIMITY_REPULSION_FORCE;
        }
    }
}

/// 0 before `time_to_stabilize` seconds of simulated time, 1 from then on.
pub(crate) fn stabilization_factor(runtime: f32, time_to_stabilize: f32) -> f32 {
    if time_to_stabilize <= 0.0 {
        return 1.0;
    }
    (runtime / time_to_stabilize).floor().clamp(0.0, 1.0)
}

/// Pull every node toward the origin.
///
/// Before stabilization nodes act as if twice as far out, under a weak force; afterwards the
/// force is 100x stronger. X is divided by the viewport aspect ratio so the layout fills
/// wide viewports.
pub(crate) fn accumulate_center_attraction(
    positions: &[Vec2],
    runtime: f32,
    time_to_stabilize: f32,
    aspect_ratio: f32,
    base_k: f32,
    displacements: &mut [Vec2],
) {
    let strength = if runtime < time_to_stabilize {
        CENTER_ATTRACTION_FORCE
    } else {
        CENTER_ATTRACTION_FORCE_AFTER_STABILIZE
    };
    let stab_t = stabilization_factor(runtime, time_to_stabilize);

    for (displacement, &base_pos) in displacements.iter_mut().zip(positions) {
        let mut pos = (base_pos * 2.0).lerp(base_pos, stab_t);
        pos.x /= aspect_ratio;
        *displacement -= strength * pos * base_k;
    }
}

/// Quadratic spring along each link: magnitude `(distance * strength)^2`, uncapped.
pub(crate) fn accumulate_link_attraction(
    positions: &[Vec2],
    links: &[(usize, usize)],
    connections: &ConnectionMatrix,
    use_link_weights: bool,
    base_k: f32,
    displacements: &mut [Vec2],
) {
    for &(left, right) in links {
        let delta = positions[left] - positions[right];

        let link_strength = if use_link_weights {
            connections.get(left, right)
        } else {
            1.0
        };

        let scale = (delta.length() * link_strength).powi(2);
        let displacement = delta.normalize_or_zero() * scale * LINK_ATTRACTION_FORCE * base_k;
        displacements[left] -= displacement;
        displacements[right] += displacement;
    }
}

/// Move each node along its displacement, at most `max_step` world units.
pub(crate) fn integrate(positions: &mut [Vec2], displacements: &[Vec2], max_step: f32) {
    for (position, displacement) in positions.iter_mut().zip(displacements) {
        let length = displacement.length();
        if length > 0.0 && length.is_finite() {
            *position += *displacement / length * length.min(max_step);
        }
    }
}
