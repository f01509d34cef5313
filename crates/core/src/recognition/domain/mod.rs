pub mod recognizer_factory;
pub mod speech_recognizer;
pub mod utterance;
