//! Beeswarm placement of dots along a category's centre line.

/// Horizontal offsets that keep dots of `diameter` from overlapping.
///
/// `positions` are the dots' coordinates along the value axis, in the same
/// unit as `diameter` (pixels). Dots are placed from the lowest value up,
/// each at the offset closest to the centre line that clears every dot
/// already placed. Offsets beyond `max_offset` are clamped to it, which can
/// let dots in a crowded category touch.
pub fn swarm_offsets(positions: &[f64], diameter: f64, max_offset: f64) -> Vec<f64> {
    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by(|&a, &b| positions[a].total_cmp(&positions[b]));

    let mut offsets = vec![0.0; positions.len()];
    let mut placed: Vec<(f64, f64)> = Vec::with_capacity(positions.len());
    let mut clamped = 0usize;
    // Tolerance for floating point contact
    let min_distance = diameter * (1.0 - 1e-9);

    for index in order {
        let y = positions[index];
        let neighbours: Vec<(f64, f64)> = placed
            .iter()
            .copied()
            .filter(|&(_, py)| (py - y).abs() < diameter)
            .collect();

        let mut candidates = vec![0.0];
        for &(px, py) in &neighbours {
            let dx = (diameter * diameter - (py - y).powi(2)).sqrt();
            candidates.push(px + dx);
            candidates.push(px - dx);
        }
        candidates.sort_by(|a: &f64, b: &f64| a.abs().total_cmp(&b.abs()));

        let offset = candidates
            .into_iter()
            .find(|&x| {
                neighbours
                    .iter()
                    .all(|&(px, py)| (px - x).hypot(py - y) >= min_distance)
            })
            .unwrap_or(0.0);

        let offset = if offset.abs() > max_offset {
            clamped += 1;
            offset.clamp(-max_offset, max_offset)
        } else {
            offset
        };
        placed.push((offset, y));
        offsets[index] = offset;
    }

    if clamped > 0 {
        tracing::warn!(
            points = clamped,
            "swarm too wide for its category, some points overlap"
        );
    }
    offsets
}
