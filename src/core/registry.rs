//! Name-keyed registry of logger drivers
//!
//! A driver registers a constructor under a unique name; application code
//! asks the registry for a logger by name. The first registration of a name
//! wins for the lifetime of the registry.

use super::{
    config::Config,
    error::{LoggerError, Result},
    logger::Logger,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Builds a logger from a config
pub type Constructor = Arc<dyn Fn(Config) -> Result<Arc<dyn Logger>> + Send + Sync>;

/// Concurrency-safe table of driver constructors
///
/// Lookups take a shared lock and run in parallel; registrations are
/// serialised against everything else.
///
/// # Example
///
/// ```
/// use rust_logger_facade::prelude::*;
/// use std::sync::Arc;
///
/// let registry = DriverRegistry::new();
/// registry.register("null", |_config: Config| Ok(null_logger()));
///
/// let logger = registry.create("null", Config::new(Output::stderr()))?;
/// logger.info("discarded");
///
/// assert!(registry.create("missing", Config::default()).is_err());
/// # Ok::<(), LoggerError>(())
/// ```
#[derive(Default)]
pub struct DriverRegistry {
    drivers: RwLock<HashMap<String, Constructor>>,
}

impl DriverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            drivers: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with the drivers bundled in this crate
    pub fn with_builtin_drivers() -> Self {
        let registry = Self::new();
        crate::drivers::register_builtin(&registry);
        registry
    }

    /// Register `constructor` under `name`.
    ///
    /// Returns `false` and logs a warning if the name is already taken; the
    /// existing constructor stays in place.
    pub fn register<F>(&self, name: impl Into<String>, constructor: F) -> bool
    where
        F: Fn(Config) -> Result<Arc<dyn Logger>> + Send + Sync + 'static,
    {
        let name = name.into();
        let mut drivers = self.drivers.write();
        if drivers.contains_key(&name) {
            tracing::warn!(driver = %name, "logger driver {:?} already registered", name);
            return false;
        }
        drivers.insert(name, Arc::new(constructor));
        true
    }

    /// Construct a logger with the driver registered under `name`.
    ///
    /// Constructor errors are returned unchanged.
    pub fn create(&self, name: &str, config: Config) -> Result<Arc<dyn Logger>> {
        let constructor = self
            .drivers
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| LoggerError::driver_not_found(name))?;
        constructor(config)
    }

    /// Like [`create`](Self::create), but exits the process on failure.
    ///
    /// The failure is reported through `tracing` before exiting. Meant for
    /// startup code only.
    pub fn must_create(&self, name: &str, config: Config) -> Arc<dyn Logger> {
        match self.create(name, config) {
            Ok(logger) => logger,
            Err(e) => {
                tracing::error!(driver = %name, "{}", e);
                std::process::exit(1);
            }
        }
    }

    /// Names of all registered drivers, sorted
    pub fn drivers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.drivers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.drivers.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.drivers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.read().is_empty()
    }
}

impl fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.drivers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Output;
    use crate::core::logger::{null_logger, NullLogger};
    use parking_lot::Mutex;
    use std::io::{self, Write};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Default)]
    struct TraceCapture(Arc<Mutex<Vec<u8>>>);

    impl TraceCapture {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for TraceCapture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn sink_config() -> Config {
        Config::new(Output::new(std::io::sink()))
    }

    #[test]
    fn test_register_and_create() {
        let registry = DriverRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register("null", |_| Ok(null_logger())));

        let logger = registry.create("null", sink_config()).unwrap();
        assert!(Arc::ptr_eq(&logger, &null_logger()));
        assert!(registry.contains("null"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_first_registration_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let registry = DriverRegistry::new();

        let counter = Arc::clone(&first);
        assert!(registry.register("a", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(null_logger())
        }));
        let counter = Arc::clone(&second);
        assert!(!registry.register("a", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(null_logger())
        }));

        registry.create("a", sink_config()).unwrap();
        registry.create("a", sink_config()).unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 0);
        assert_eq!(registry.drivers(), vec!["a".to_string()]);
    }

    #[test]
    fn test_duplicate_registration_warns_with_name() {
        let capture = TraceCapture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let registry = DriverRegistry::new();
        tracing::subscriber::with_default(subscriber, || {
            assert!(registry.register("zap", |_| Ok(null_logger())));
            assert!(capture.contents().is_empty());
            assert!(!registry.register("zap", |_| Ok(null_logger())));
        });

        let output = capture.contents();
        assert!(output.contains("WARN"), "{}", output);
        assert!(output.contains("\"zap\" already registered"), "{}", output);
    }

    #[test]
    fn test_missing_driver() {
        let registry = DriverRegistry::new();
        match registry.create("missing", sink_config()) {
            Err(LoggerError::DriverNotFound(name)) => assert_eq!(name, "missing"),
            other => panic!("expected DriverNotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_constructor_errors_pass_through() {
        let registry = DriverRegistry::new();
        registry.register("broken", |_| Err(LoggerError::driver("backend unavailable")));
        registry.register("strict", |config: Config| {
            config.validate()?;
            Ok(Arc::new(NullLogger) as Arc<dyn Logger>)
        });

        let err = registry.create("broken", sink_config()).err().unwrap();
        assert_eq!(err.to_string(), "backend unavailable");

        let err = registry.create("strict", Config::default()).err().unwrap();
        assert!(matches!(err, LoggerError::InvalidConfig(_)));
    }

    #[test]
    fn test_drivers_snapshot_is_sorted() {
        let registry = DriverRegistry::new();
        for name in ["zap", "logrus", "slog"] {
            registry.register(name, |_| Ok(null_logger()));
        }
        assert_eq!(registry.drivers(), vec!["logrus", "slog", "zap"]);
    }

    #[test]
    fn test_constructor_may_use_registry() {
        // The lookup lock is released before the constructor runs
        let registry = Arc::new(DriverRegistry::new());
        registry.register("inner", |_| Ok(null_logger()));

        let handle = Arc::clone(&registry);
        registry.register("outer", move |config| {
            handle.register("late", |_| Ok(null_logger()));
            handle.create("inner", config)
        });

        assert!(registry.create("outer", sink_config()).is_ok());
        assert!(registry.contains("late"));
    }

    #[test]
    fn test_concurrent_register_and_create() {
        let registry = Arc::new(DriverRegistry::new());
        registry.register("shared", |_| Ok(null_logger()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    registry.register(format!("driver-{}", i % 4), |_| Ok(null_logger()));
                    for _ in 0..100 {
                        assert!(registry.create("shared", sink_config()).is_ok());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 5);
    }
}
