pub mod bridge;
pub mod dock;

pub use bridge::create_host_bridge;
