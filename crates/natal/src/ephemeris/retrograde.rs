use crate::angle::{normalize, signed_delta};
use crate::ephemeris::types::BodyPosition;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Share of bodies flagged by [`RetrogradeMode::Seeded`].
pub const SEEDED_RETROGRADE_RATE: f64 = 0.2;

/// How the retrograde display flag is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrogradeMode {
    /// Always false.
    Never,
    /// True when the longitude one day later lies behind today's.
    #[default]
    MotionSign,
    /// Reproducible coin flip per birth.
    Seeded,
}

/// Retrograde flag for every position, in input order.
pub fn retrograde_flags(mode: RetrogradeMode, positions: &[BodyPosition], seed: [u8; 32]) -> Vec<bool> {
    match mode {
        RetrogradeMode::Never => vec![false; positions.len()],
        RetrogradeMode::MotionSign => positions.iter().map(is_moving_backwards).collect(),
        RetrogradeMode::Seeded => {
            let mut rng = ChaCha20Rng::from_seed(seed);
            // keep this stream apart from the one used by SeededMock
            rng.set_stream(1);
            positions
                .iter()
                .map(|_| rng.gen_bool(SEEDED_RETROGRADE_RATE))
                .collect()
        }
    }
}

fn is_moving_backwards(position: &BodyPosition) -> bool {
    let tomorrow = normalize(position.longitude + position.speed);
    signed_delta(position.longitude, tomorrow) < 0.0
}
