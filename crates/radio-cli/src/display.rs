use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use radio_core::station::Station;
use tabled::builder::Builder;
use tabled::settings::Style;

const TITLE: &str = "Radio";

/// Terminal output: the now-playing panel, notices and screen clearing.
pub struct Display<W: Write> {
    out: W,
    color: bool,
}

impl Display<io::Stdout> {
    pub fn stdout(color: bool) -> Self {
        // NO_COLOR wins over the settings file (https://no-color.org)
        let color = color && std::env::var_os("NO_COLOR").map_or(true, |v| v.is_empty());
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Display<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn station_info(&mut self, station: &Station) -> io::Result<()> {
        writeln!(self.out, "{}", render_station_info(station, self.color))?;
        self.out.flush()
    }

    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", message.yellow())?;
        } else {
            writeln!(self.out, "{}", message)?;
        }
        self.out.flush()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }
}

/// Two-by-two panel: station name and URL on the left, key hints on the
/// right, with a centred title line above.
pub fn render_station_info(station: &Station, color: bool) -> String {
    let (name, url, keys) = if color {
        (
            station.name.as_str().magenta().to_string(),
            station.url.as_str().blue().to_string(),
            "<ctrl> + c".red().to_string(),
        )
    } else {
        (
            station.name.clone(),
            station.url.clone(),
            "<ctrl> + c".to_string(),
        )
    };

    let mut builder = Builder::default();
    builder.push_record(["Station Info".to_string(), "User Interface".to_string()]);
    builder.push_record([
        format!("Station Name: {}", name),
        format!("Return to menu: {}", keys),
    ]);
    builder.push_record([
        format!("Station URL: {}", url),
        format!("Quit: 2x {}", keys),
    ]);

    let mut table = builder.build();
    table.with(Style::modern());
    let title = format!("{:^width$}", TITLE, width = table.total_width());
    if color {
        format!("{}\n{}", title.italic(), table)
    } else {
        format!("{}\n{}", title, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jazz() -> Station {
        Station::new("Jazz FM", "http://example.com/jazz.mp3")
    }

    #[test]
    fn test_plain_panel_contents() {
        let out = render_station_info(&jazz(), false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].trim(), "Radio");
        assert!(out.contains("Station Info"));
        assert!(out.contains("User Interface"));
        assert!(out.contains("Station Name: Jazz FM"));
        assert!(out.contains("Station URL: http://example.com/jazz.mp3"));
        assert!(out.contains("Return to menu: <ctrl> + c"));
        assert!(out.contains("Quit: 2x <ctrl> + c"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_rows_are_ordered() {
        let out = render_station_info(&jazz(), false);
        let header = out.find("Station Info").unwrap();
        let name = out.find("Station Name").unwrap();
        let url = out.find("Station URL").unwrap();
        assert!(header < name && name < url);
    }

    #[test]
    fn test_colored_panel_has_escape_codes() {
        let out = render_station_info(&jazz(), true);
        assert!(out.contains('\u{1b}'));
        assert!(out.contains("Jazz FM"));
    }

    #[test]
    fn test_notice_and_station_info_write_through() {
        let mut display = Display::new(Vec::new(), false);
        display.notice("Jazz FM is unreachable").unwrap();
        display.station_info(&jazz()).unwrap();
        let text = String::from_utf8(display.output().clone()).unwrap();
        assert!(text.starts_with("Jazz FM is unreachable\n"));
        assert!(text.contains("Station Name: Jazz FM"));
    }

    #[test]
    fn test_clear_emits_escape_sequence() {
        let mut display = Display::new(Vec::new(), false);
        display.clear().unwrap();
        assert!(display.output().starts_with(b"\x1b["));
    }
}
