use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::Receiver;
use iced::widget::{button, column, container, progress_bar, row, scrollable, text};
use iced::{Element, Length, Subscription, Task};

use voicescribe_core::shared::constants::AUDIO_EXTENSIONS;

use crate::settings::Settings;
use crate::workers::transcribe_worker::{self, TranscribeParams, WorkerMessage};

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    SelectInput,
    InputSelected(Option<PathBuf>),
    SelectModel,
    ModelSelected(Option<PathBuf>),
    ClearModel,
    Transcribe,
    PollWorker,
    SaveTranscript,
    SavePathSelected(Option<PathBuf>),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Status {
    Idle,
    Transcribing,
    Done,
    Saved(PathBuf),
    Failed(String),
}

pub struct App {
    settings: Settings,
    input_path: Option<PathBuf>,
    transcript: Option<String>,
    status: Status,
    worker_rx: Option<Receiver<WorkerMessage>>,
    busy_progress: f32,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        (
            Self {
                settings: Settings::load(),
                input_path: None,
                transcript: None,
                status: Status::Idle,
                worker_rx: None,
                busy_progress: 0.0,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectInput => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select audio file")
                            .add_filter("Audio Files", AUDIO_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::InputSelected,
                );
            }
            Message::InputSelected(Some(path)) => {
                self.input_path = Some(path);
                self.transcript = None;
                self.status = Status::Idle;
            }
            Message::InputSelected(None) => {}
            Message::SelectModel => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Select Whisper model")
                            .add_filter("Whisper Models", &["bin"])
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::ModelSelected,
                );
            }
            Message::ModelSelected(Some(path)) => {
                self.settings.model_path = Some(path);
                self.settings.save();
            }
            Message::ModelSelected(None) => {}
            Message::ClearModel => {
                self.settings.model_path = None;
                self.settings.save();
            }
            Message::Transcribe => {
                if let Some(input) = self.input_path.clone() {
                    self.transcript = None;
                    self.status = Status::Transcribing;
                    self.busy_progress = 0.0;
                    self.worker_rx = Some(transcribe_worker::spawn(TranscribeParams {
                        input_path: input,
                        model_override: self.settings.model_path.clone(),
                    }));
                }
            }
            Message::PollWorker => {
                if let Some(rx) = &self.worker_rx {
                    match rx.try_recv() {
                        Ok(msg) => {
                            match msg {
                                WorkerMessage::Done(transcript) => {
                                    self.transcript = Some(transcript);
                                    self.status = Status::Done;
                                }
                                WorkerMessage::ModelMissing(message)
                                | WorkerMessage::Error(message) => {
                                    self.status = Status::Failed(message);
                                }
                            }
                            self.worker_rx = None;
                        }
                        // Still running; sweep the indeterminate bar.
                        Err(_) => self.busy_progress = (self.busy_progress + 4.0) % 100.0,
                    }
                }
            }
            Message::SaveTranscript => {
                let default_name = self
                    .input_path
                    .as_ref()
                    .and_then(|p| p.file_stem())
                    .map(|s| format!("{}.txt", s.to_string_lossy()))
                    .unwrap_or_else(|| "transcript.txt".to_string());
                return Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_title("Save transcript as")
                            .add_filter("Text Files", &["txt"])
                            .set_file_name(default_name)
                            .save_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::SavePathSelected,
                );
            }
            Message::SavePathSelected(Some(path)) => {
                if let Some(transcript) = &self.transcript {
                    match fs::write(&path, transcript) {
                        Ok(()) => self.status = Status::Saved(path),
                        Err(e) => self.status = Status::Failed(format!("Failed to save: {e}")),
                    }
                }
            }
            Message::SavePathSelected(None) => {}
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let input_label = match &self.input_path {
            Some(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            None => "No file selected".to_string(),
        };

        let pick_row = row![
            button(text("Pick Audio File")).on_press(Message::SelectInput),
            text(input_label).size(13),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center);

        let model_label = match &self.settings.model_path {
            Some(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            None => "Default model location".to_string(),
        };

        let model_row = row![
            button(text("Choose Model")).on_press(Message::SelectModel),
            button(text("Use Default"))
                .on_press_maybe(self.settings.model_path.is_some().then_some(Message::ClearModel)),
            text(model_label).size(13),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center);

        let transcribing = self.status == Status::Transcribing;
        let can_transcribe = self.input_path.is_some() && !transcribing;
        let transcribe_button = button(text("Transcribe"))
            .on_press_maybe(can_transcribe.then_some(Message::Transcribe));

        let save_button = button(text("Save Transcript"))
            .on_press_maybe(self.transcript.is_some().then_some(Message::SaveTranscript));

        let status_line = match &self.status {
            Status::Idle => text("").size(13),
            Status::Transcribing => text("Transcribing\u{2026}").size(13),
            Status::Done => text("Transcription complete.").size(13),
            Status::Saved(path) => text(format!("Saved to {}", path.display())).size(13),
            Status::Failed(message) => text(message.clone()).size(13),
        };

        let transcript_view: Element<'_, Message> = match &self.transcript {
            Some(transcript) if !transcript.is_empty() => {
                scrollable(text(transcript.clone()).size(14)).height(Length::Fill).into()
            }
            Some(_) => text("No speech recognized.").size(14).into(),
            None => text("").size(14).into(),
        };

        let mut content = column![
            pick_row,
            model_row,
            row![transcribe_button, save_button].spacing(12),
            status_line,
        ]
        .spacing(16);
        if transcribing {
            content = content.push(progress_bar(0.0..=100.0, self.busy_progress));
        }
        content = content.push(container(transcript_view).height(Length::Fill));

        container(content).padding(16).into()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.worker_rx.is_some() {
            iced::time::every(Duration::from_millis(200)).map(|_| Message::PollWorker)
        } else {
            Subscription::none()
        }
    }
}
