use rand::Rng;
use serde::Serialize;

const ALTITUDE_KFT: std::ops::Range<u32> = 30..40;
const SPEED_KMH: std::ops::Range<u32> = 800..900;
const ETA_HOURS: std::ops::Range<u32> = 1..3;
const ETA_MINUTES: std::ops::Range<u32> = 10..59;

pub const NOT_AVAILABLE: &str = "-";

/// Cosmetic in-flight figures, drawn from fixed ranges rather than measured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Telemetry {
    pub altitude: String,
    pub speed: String,
    pub eta: String,
}

impl Telemetry {
    pub fn synthesize<R: Rng>(rng: &mut R) -> Self {
        Telemetry {
            altitude: format!("{},000 ft", rng.random_range(ALTITUDE_KFT)),
            speed: format!("{} km/h", rng.random_range(SPEED_KMH)),
            eta: format!("{}h {}m", rng.random_range(ETA_HOURS), rng.random_range(ETA_MINUTES)),
        }
    }
}
