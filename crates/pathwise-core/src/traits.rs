//! Core traits for Pathwise.
//!
//! The primary trait is [`ConfigProvider`], which abstracts where a host
//! application keeps its concept dataset.

use std::path::PathBuf;

use crate::Result;

/// Trait for host-specific configuration.
///
/// Every Pathwise-based application implements this trait to tell the
/// loaders where project data lives.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use pathwise_core::traits::ConfigProvider;
/// use pathwise_core::Result;
///
/// #[derive(Clone)]
/// struct TutorConfig {
///     data_dir: PathBuf,
/// }
///
/// impl ConfigProvider for TutorConfig {
///     fn project_name(&self) -> &str {
///         "tutor"
///     }
///
///     fn base_path(&self) -> Result<PathBuf> {
///         Ok(self.data_dir.clone())
///     }
/// }
///
/// let config = TutorConfig { data_dir: PathBuf::from("/srv/tutor") };
/// assert_eq!(
///     config.dataset_path().unwrap(),
///     PathBuf::from("/srv/tutor/data/concepts.json")
/// );
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used for env var prefixes and default paths.
    fn project_name(&self) -> &str;

    /// Base path for all project data.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined.
    fn base_path(&self) -> Result<PathBuf>;

    /// Path of the concept dataset document.
    ///
    /// Defaults to `<base_path>/data/concepts.json`.
    fn dataset_path(&self) -> Result<PathBuf> {
        Ok(self.base_path()?.join("data").join("concepts.json"))
    }
}
