pub mod animator;
pub mod observer;
pub mod phase;
pub mod state;
pub mod timeline;
