pub mod constants;
pub mod pipeline_error;
pub mod settings;
pub mod transform_parameters;
