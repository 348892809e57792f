use crate::geometry::Point3D;

/// Staggered candidate grid.
///
/// Layer `k` takes every second midpoint starting at index `k % 2`, so even
/// layers sample even midpoints and odd layers odd ones. A layer with no
/// midpoint of its parity contributes nothing.
pub fn synthesize_grid(midpoints: &[Point3D], layers: &[f64]) -> Vec<Point3D> {
    layers
        .iter()
        .enumerate()
        .flat_map(|(k, &z)| {
            midpoints
                .iter()
                .skip(k % 2)
                .step_by(2)
                .map(move |m| Point3D::new(m.x, m.y, z))
        })
        .collect()
}

/// Number of candidates layer `k` receives from `m` midpoints
pub fn layer_candidate_count(m: usize, k: usize) -> usize {
    let parity = k % 2;
    if m < parity {
        0
    } else {
        (m - parity).div_ceil(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midpoints(n: usize) -> Vec<Point3D> {
        (0..n).map(|i| Point3D::new(i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_checkerboard_pattern() {
        let grid = synthesize_grid(&midpoints(5), &[1.0, 2.0, 3.0]);

        let layer0: Vec<f64> = grid.iter().filter(|p| p.z == 1.0).map(|p| p.x).collect();
        let layer1: Vec<f64> = grid.iter().filter(|p| p.z == 2.0).map(|p| p.x).collect();
        let layer2: Vec<f64> = grid.iter().filter(|p| p.z == 3.0).map(|p| p.x).collect();

        assert_eq!(layer0, vec![0.0, 2.0, 4.0]);
        assert_eq!(layer1, vec![1.0, 3.0]);
        assert_eq!(layer2, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_layer_sizes_match_count() {
        for m in 0..7 {
            let grid = synthesize_grid(&midpoints(m), &[0.0, 1.0]);
            let even = grid.iter().filter(|p| p.z == 0.0).count();
            let odd = grid.iter().filter(|p| p.z == 1.0).count();
            assert_eq!(even, layer_candidate_count(m, 0), "m = {}", m);
            assert_eq!(odd, layer_candidate_count(m, 1), "m = {}", m);
        }
    }

    #[test]
    fn test_single_midpoint_skips_odd_layer() {
        let grid = synthesize_grid(&midpoints(1), &[1.0, 4.0]);
        assert_eq!(grid, vec![Point3D::new(0.0, 0.0, 1.0)]);
        assert_eq!(layer_candidate_count(1, 1), 0);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(synthesize_grid(&[], &[1.0, 2.0]).is_empty());
        assert!(synthesize_grid(&midpoints(3), &[]).is_empty());
        assert_eq!(layer_candidate_count(0, 1), 0);
    }
}
