pub mod dot;
pub mod sampler;
