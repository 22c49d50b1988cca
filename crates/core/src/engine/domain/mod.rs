pub mod operation;
pub mod stage_result;
pub mod transform_engine;
