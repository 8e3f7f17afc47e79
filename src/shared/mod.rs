pub mod clipboard;
pub mod errors;
pub mod logging;
pub mod state_paths;

pub use clipboard::{ClipboardWriter, MemoryClipboard, SystemClipboard};
pub use errors::{ClipboardError, StatePathError};
pub use logging::{LogLevel, WizardLog};
pub use state_paths::{default_state_root_path, StatePaths};
