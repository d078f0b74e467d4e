pub mod config;
pub mod executor;
pub mod locator;
pub mod process;
pub mod sink;

pub use config::{ClientConfig, ConfigOverrides, load_config};
pub use executor::{CommandExecutor, Invocation, ProcessHandle};
pub use locator::{DEFAULT_BINARY, RuntimeBinary};
pub use process::SystemLauncher;
pub use sink::TracingSink;
