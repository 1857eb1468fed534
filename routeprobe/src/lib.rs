pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{expand_path, load_routes, run_check};
