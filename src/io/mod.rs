/// Command-line interface and batch board processing
pub mod cli;
/// Generation constants and defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// YAML content configuration loading
pub mod loader;
/// Progress bars for board batches
pub mod progress;
/// JSON board export and import
pub mod serialization;
