use ndarray::Array2;

/// Repeats a per-gate vector down `rays` rows, giving a (rays, gates) grid.
pub fn broadcast_gates(gates: &[f64], rays: usize) -> Array2<f64> {
    Array2::from_shape_fn((rays, gates.len()), |(_, gate)| gates[gate])
}

/// Repeats a per-ray vector across `gates` columns, giving a (rays, gates) grid.
pub fn broadcast_rays(rays: &[f64], gates: usize) -> Array2<f64> {
    Array2::from_shape_fn((rays.len(), gates), |(ray, _)| rays[ray])
}
