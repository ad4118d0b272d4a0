pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod readme;
pub mod sections;
pub mod session;
pub mod store;
pub mod terminal;

// Re-export commonly used types
pub use error::WizardError;
pub use readme::Readme;
pub use session::Session;
