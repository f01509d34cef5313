pub mod ffmpeg_decoder;
