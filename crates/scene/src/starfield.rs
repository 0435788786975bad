use glam::Vec3;

/// Point cloud of background stars inside a cube centered at the origin.
///
/// Positions are derived from a splitmix64 stream, so the same seed always
/// gives the same sky.
#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    positions: Vec<Vec3>,
    spread: f32,
    seed: u64,
}

impl Starfield {
    /// Scatter `count` stars uniformly in `[-spread/2, spread/2)` on each axis.
    pub fn generate(count: usize, spread: f32, seed: u64) -> Self {
        let mut rng = SplitMix64::new(seed);
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.next_unit() - 0.5) * spread,
                    (rng.next_unit() - 0.5) * spread,
                    (rng.next_unit() - 0.5) * spread,
                )
            })
            .collect();
        Self {
            positions,
            spread,
            seed,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn spread(&self) -> f32 {
        self.spread
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Flat xyz buffer for a point-list vertex buffer.
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }
}

struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1) with 24 bits of precision.
    fn next_unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sky() {
        let a = Starfield::generate(500, 5.0, 42);
        let b = Starfield::generate(500, 5.0, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = Starfield::generate(10, 5.0, 1);
        let b = Starfield::generate(10, 5.0, 2);
        assert_ne!(a.positions(), b.positions());
    }

    #[test]
    fn stars_stay_inside_cube() {
        let field = Starfield::generate(2000, 5.0, 9);
        assert_eq!(field.len(), 2000);
        for p in field.positions() {
            assert!(p.abs().max_element() <= 2.5, "{p:?} outside cube");
        }
    }

    #[test]
    fn stars_fill_the_cube() {
        let field = Starfield::generate(2000, 5.0, 3);
        let max = field
            .positions()
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc.max(p.abs()));
        assert!(max.min_element() > 2.0);
    }

    #[test]
    fn flat_buffer_layout() {
        let field = Starfield::generate(4, 5.0, 0);
        let flat = field.as_flat();
        assert_eq!(flat.len(), 12);
        assert_eq!(flat[3], field.positions()[1].x);
    }

    #[test]
    fn empty_field() {
        let field = Starfield::generate(0, 5.0, 0);
        assert!(field.is_empty());
        assert!(field.as_flat().is_empty());
    }
}
