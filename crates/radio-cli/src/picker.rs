use anyhow::Context;
use inquire::{InquireError, Select};
use radio_core::station::{Choice, Station};
use tracing::debug;

/// Trailing entry that leaves the program.
pub const EXIT_LABEL: &str = "Exit";

const PROMPT: &str = "Station:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(String),
    Cancelled,
}

/// A blocking fuzzy-select prompt over a list of labels.
pub trait Selector {
    fn select(&mut self, prompt: &str, options: Vec<String>) -> anyhow::Result<Selection>;
}

pub struct InquireSelector {
    page_size: usize,
}

impl InquireSelector {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }
}

impl Selector for InquireSelector {
    fn select(&mut self, prompt: &str, options: Vec<String>) -> anyhow::Result<Selection> {
        match Select::new(prompt, options)
            .with_page_size(self.page_size)
            .prompt()
        {
            Ok(choice) => Ok(Selection::Chosen(choice)),
            // Esc and Ctrl+C both mean "leave"
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Ok(Selection::Cancelled)
            }
            Err(e) => Err(e).context("station prompt failed"),
        }
    }
}

pub fn pick_station<S: Selector>(selector: &mut S, stations: &[Station]) -> anyhow::Result<Choice> {
    let mut options: Vec<String> = stations.iter().map(|s| s.name.clone()).collect();
    options.push(EXIT_LABEL.to_string());

    let label = match selector.select(PROMPT, options)? {
        Selection::Chosen(label) => label,
        Selection::Cancelled => {
            debug!("picker cancelled");
            return Ok(Choice::Exit);
        }
    };

    if label == EXIT_LABEL {
        return Ok(Choice::Exit);
    }

    Ok(stations
        .iter()
        .find(|s| s.name == label)
        .cloned()
        .map(Choice::Station)
        .unwrap_or(Choice::Exit))
}
