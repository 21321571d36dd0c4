use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

use radio_core::player::Engine;
use radio_core::probe::Probe;
use radio_core::station::Flow;
use radio_core::stations::parse_stations;
use tracing::{debug, info};

use crate::controller::play_station;
use crate::display::Display;
use crate::picker::{pick_station, Selector};

/// The pick → play loop and the collaborators it drives.
pub struct App<S, P, E, W: Write, I> {
    pub stations_path: PathBuf,
    pub selector: S,
    pub probe: P,
    pub engine: E,
    pub display: Display<W>,
    /// Produces a fresh "user pressed Ctrl+C" future per playback.
    pub interrupt: I,
}

impl<S, P, E, W, I, F> App<S, P, E, W, I>
where
    S: Selector,
    P: Probe,
    E: Engine,
    W: Write,
    I: FnMut() -> F,
    F: Future,
{
    /// One round: reload stations, pick, play.
    pub async fn radio(&mut self) -> anyhow::Result<Flow> {
        let stations = parse_stations(&self.stations_path)?;
        let choice = pick_station(&mut self.selector, &stations)?;
        let interrupt = (self.interrupt)();
        Ok(play_station(&self.probe, &mut self.engine, &mut self.display, choice, interrupt).await)
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let flow = self.radio().await?;
            debug!("loop code {}", flow.code());
            if flow == Flow::Terminate {
                break;
            }
        }
        info!("exit requested");
        Ok(())
    }
}
