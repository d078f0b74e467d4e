pub mod container;
pub mod context;
pub mod doctor;
pub mod image;
pub mod pod;

pub use container::{LogsArgs, PsArgs, StopArgs};
pub use context::AppContext;
pub use image::ImageCommand;
pub use pod::PodCommand;
