pub mod ffmpeg_cli_engine;
