pub mod pipeline_logger;
pub mod pipeline_run;
pub mod pipeline_state;
pub mod process_audio_use_case;
pub mod process_folder_use_case;
