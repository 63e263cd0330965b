pub mod calculator;
pub mod types;

pub use calculator::AspectCalculator;
pub use types::{
    Aspect, AspectKind, AspectMatch, AspectSettings, ASPECT_PRIORITY, DEFAULT_EXACT_THRESHOLD,
};
