pub mod artifact_manager;
