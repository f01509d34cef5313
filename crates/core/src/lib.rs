pub mod audio;
pub mod pipeline;
pub mod recognition;
pub mod shared;
