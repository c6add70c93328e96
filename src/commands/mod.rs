pub mod plan;
pub mod run;
pub mod window;

// Re-export command functions for convenience
pub use plan::plan;
pub use run::run;
pub use window::window;
