/// Small seedable generator used for spawn positions and radii.
///
/// xorshift64* seeded through splitmix64, so nearby seeds still give unrelated streams and a
/// session replays identically from the same seed.
#[derive(Clone, Debug)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn from_seed(seed: u64) -> Self {
        let mixed = splitmix64(seed ^ 0xA5A5_A5A5_5A5A_5A5A);
        // xorshift never leaves the all-zero state.
        let state = if mixed == 0 { 0x9E37_79B9_7F4A_7C15 } else { mixed };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f32_01(&mut self) -> f32 {
        // Top 24 bits fit an f32 mantissa exactly.
        let v = (self.next_u64() >> 40) as u32;
        (v as f32) / (1u32 << 24) as f32
    }

    /// Uniform in `[min, max)`; returns `min` when the range is empty.
    pub fn gen_range_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        min + (max - min) * self.next_f32_01()
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
