//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod command_executor;
pub mod device_source;
pub mod notifier;
pub mod renderer;

pub use command_executor::CommandExecutor;
pub use device_source::DeviceSource;
pub use notifier::Notifier;
pub use renderer::Renderer;
