use crate::RaycastError;

/// Angular offset of one ray from the view direction, with its sine and
/// cosine ready for `math::rotate`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayRot {
    pub offset: f32,
    pub sin: f32,
    pub cos: f32,
}

impl RayRot {
    pub fn new(offset: f32) -> Self {
        let (sin, cos) = offset.sin_cos();
        Self { offset, sin, cos }
    }
}

/// `n` rays spread evenly over `fov_rad`. The outermost rays sit exactly on
/// `-fov/2` and `+fov/2`.
pub fn ray_rots(fov_rad: f32, n: usize) -> Result<Vec<RayRot>, RaycastError> {
    if n < 2 {
        return Err(RaycastError::TooFewRays(n));
    }
    let half = fov_rad / 2.0;
    let step = fov_rad / (n - 1) as f32;
    Ok((0..n)
        .map(|i| {
            // Pin the last ray so rounding in `step` can't move it
            let offset = if i == n - 1 {
                half
            } else {
                -half + i as f32 * step
            };
            RayRot::new(offset)
        })
        .collect())
}
