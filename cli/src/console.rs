use b64convert::plugin::{StatusLevel, StatusMessage, StatusSink};
use log::{error, info};

/// Status sink writing to the log and stderr
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn show_message(&mut self, message: StatusMessage) {
        match message.level {
            StatusLevel::Info => info!("{}", message.text),
            StatusLevel::Error => error!("{}", message.text),
        }
    }

    fn show_popup(&mut self, text: String) {
        eprintln!("b64convert: {}", text);
    }
}
