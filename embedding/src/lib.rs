mod control;
mod engine;
mod registry;

#[cfg(test)]
mod testutil;

pub use engine::Engine;
pub use registry::ConnectionRegistry;
