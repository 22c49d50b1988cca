pub mod artifacts;
pub mod engine;
pub mod pipeline;
pub mod shared;
pub mod stages;

#[cfg(test)]
pub(crate) mod test_support;
