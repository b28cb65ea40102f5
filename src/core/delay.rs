//! Cooldown between a task settling and its capacity being released.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Delay applied after every task completion before the next admission.
#[derive(Clone, Default)]
pub enum Delay {
    /// No cooldown.
    #[default]
    Immediate,
    /// Fixed cooldown.
    Fixed(Duration),
    /// Cooldown produced fresh after each completion.
    Generated(Arc<dyn Fn() -> Duration + Send + Sync>),
}

impl Delay {
    /// Fixed delay of `ms` milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Self::Immediate
        } else {
            Self::Fixed(Duration::from_millis(ms))
        }
    }

    /// Delay computed by `generator` after every completion.
    pub fn from_fn<F>(generator: F) -> Self
    where
        F: Fn() -> Duration + Send + Sync + 'static,
    {
        Self::Generated(Arc::new(generator))
    }

    /// Evaluate the delay for the completion that just happened.
    #[must_use]
    pub fn next(&self) -> Duration {
        match self {
            Self::Immediate => Duration::ZERO,
            Self::Fixed(delay) => *delay,
            Self::Generated(generator) => generator(),
        }
    }
}

impl From<Duration> for Delay {
    fn from(delay: Duration) -> Self {
        if delay.is_zero() {
            Self::Immediate
        } else {
            Self::Fixed(delay)
        }
    }
}

impl fmt::Debug for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "Delay::Immediate"),
            Self::Fixed(delay) => write!(f, "Delay::Fixed({delay:?})"),
            Self::Generated(_) => write!(f, "Delay::Generated(<fn>)"),
        }
    }
}
