pub mod decode;
pub mod sidecar;
pub mod store;
