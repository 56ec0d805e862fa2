/// Colour for nodes when no centrality shading applies.
pub const DEFAULT_NODE_COLOR: &str = "#4a90e2";

/// Render size grows with degree, clamped to 5..=15.
pub fn node_size(degree: usize) -> f64 {
    (5.0 + degree as f64 * 0.3).clamp(5.0, 15.0)
}

/// Blue-to-pale shading by relative degree. `max_degree` of 0 is treated as 1.
pub fn node_color(degree: usize, max_degree: usize) -> String {
    let intensity = degree as f64 / max_degree.max(1) as f64;
    let r = (74.0 + intensity * 180.0).floor() as u8;
    let g = (144.0 + intensity * 110.0).floor() as u8;
    let b = (226.0 - intensity * 30.0).floor() as u8;
    format!("rgb({}, {}, {})", r, g, b)
}
