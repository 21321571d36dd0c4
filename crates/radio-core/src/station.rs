use serde::{Deserialize, Serialize};

/// One playable stream or playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Label shown in the picker.  Falls back to `url` when the station file
    /// has no annotation for it.
    pub name: String,
    pub url: String,
}

impl Station {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// A station labelled by its own URL.
    pub fn unlabeled(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            name: url.clone(),
            url,
        }
    }
}

/// What the picker hands back to the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Station(Station),
    /// User picked "Exit" or cancelled the prompt.
    Exit,
}

/// Where control goes after a playback attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Reload the station file and reopen the picker.
    ReturnToMenu,
    /// Leave the main loop.
    Terminate,
}

impl Flow {
    /// Legacy loop code: 0 ends the program, 1 goes back to the picker.
    pub fn code(self) -> i32 {
        match self {
            Flow::ReturnToMenu => 1,
            Flow::Terminate => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlabeled_uses_url_as_name() {
        let s = Station::unlabeled("http://example.com/a.mp3");
        assert_eq!(s.name, s.url);
    }

    #[test]
    fn test_flow_codes() {
        assert_eq!(Flow::Terminate.code(), 0);
        assert_eq!(Flow::ReturnToMenu.code(), 1);
    }
}
