//! Fluent builder for [`Qew`].

use std::time::Duration;

use crate::config::QewConfig;
use crate::core::{AdmissionOrder, Delay, Qew, QewError, Spawn};
use crate::runtime::TokioSpawner;

/// Builder collecting qew settings before validation.
///
/// ```rust,ignore
/// use qew::builders::QewBuilder;
/// use std::time::Duration;
///
/// let qew: qew::Qew<String> = QewBuilder::new()
///     .max_concurrent(4)
///     .delay(Duration::from_millis(250))
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct QewBuilder {
    config: QewConfig,
    delay: Option<Delay>,
}

impl QewBuilder {
    /// Builder with default settings: one operation at a time, no delay, FIFO.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder seeded from a configuration.
    #[must_use]
    pub const fn from_config(config: QewConfig) -> Self {
        Self {
            config,
            delay: None,
        }
    }

    /// How many operations may run simultaneously.
    #[must_use]
    pub fn max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.config.max_concurrent = max_concurrent;
        self
    }

    /// Fixed cooldown between an operation settling and the next admission.
    #[must_use]
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(Delay::from(delay));
        self
    }

    /// Cooldown computed fresh after every completion.
    #[must_use]
    pub fn delay_fn<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Delay::from_fn(generator));
        self
    }

    /// Order in which pending work is admitted.
    #[must_use]
    pub fn admission_order(mut self, order: AdmissionOrder) -> Self {
        self.config.admission_order = order;
        self
    }

    /// Build on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// [`QewError::InvalidConfig`] for invalid settings, [`QewError::Runtime`]
    /// outside a tokio runtime.
    pub fn build<T, E>(self) -> Result<Qew<T, E>, QewError>
    where
        T: Send + 'static,
        E: Send + 'static,
    {
        let spawner = TokioSpawner::try_current()?;
        self.build_with_spawner(spawner)
    }

    /// Build with a custom spawner.
    ///
    /// # Errors
    ///
    /// [`QewError::InvalidConfig`] for invalid settings.
    pub fn build_with_spawner<T, E, S>(self, spawner: S) -> Result<Qew<T, E, S>, QewError>
    where
        T: Send + 'static,
        E: Send + 'static,
        S: Spawn + Clone + Send + 'static,
    {
        self.config.validate().map_err(QewError::InvalidConfig)?;
        let delay = self.delay.unwrap_or_else(|| self.config.delay());
        Qew::with_spawner(
            self.config.max_concurrent,
            delay,
            self.config.admission_order,
            spawner,
        )
    }
}
