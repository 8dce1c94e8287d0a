/// Graphics device module - the immediate-mode interface the scene draws through

pub mod graphics_device;
pub mod shader_params;

pub use graphics_device::*;
pub use shader_params::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
