use std::fmt;
use std::time::{Duration, Instant};

pub(crate) fn measure<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let tt = Instant::now();
    let val = f();

    (val, tt.elapsed())
}

/// Duration formatted for logs; human-friendly with the `metrics` feature.
pub(crate) struct Elapsed(pub Duration);

impl fmt::Display for Elapsed {
    #[cfg(feature = "metrics")]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", humantime::format_duration(self.0))
    }

    #[cfg(not(feature = "metrics"))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
