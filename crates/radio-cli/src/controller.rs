//! One playback attempt: probe, start mpv, show the panel, wait for Ctrl+C.

use std::future::Future;
use std::io::Write;

use radio_core::player::{Engine, PlaybackMode, PlayerExit, Session};
use radio_core::probe::{Probe, Reachability};
use radio_core::station::{Choice, Flow, Station};
use tracing::{error, info, warn};

use crate::display::Display;

/// Play `choice` until `interrupt` resolves or the player exits.
///
/// Only [`Choice::Exit`] terminates; every other outcome, including probe and
/// engine failures, goes back to the menu.
pub async fn play_station<P, E, W, I>(
    probe: &P,
    engine: &mut E,
    display: &mut Display<W>,
    choice: Choice,
    interrupt: I,
) -> Flow
where
    P: Probe,
    E: Engine,
    W: Write,
    I: Future,
{
    let station = match choice {
        Choice::Exit => return Flow::Terminate,
        Choice::Station(station) => station,
    };
    info!("selected {:?} <{}>", station.name, station.url);

    tokio::pin!(interrupt);

    let verdict = tokio::select! {
        biased;
        verdict = probe.check(&station.url) => verdict,
        _ = &mut interrupt => {
            info!("interrupted while probing {}", station.url);
            reset(display, None);
            return Flow::ReturnToMenu;
        }
    };
    if let Reachability::Unreachable(reason) = verdict {
        reset(
            display,
            Some(&format!("{} is unreachable: {}", station.name, reason)),
        );
        return Flow::ReturnToMenu;
    }

    let mode = PlaybackMode::for_url(&station.url);
    let mut session = match engine.start(&station.url, mode) {
        Ok(session) => session,
        Err(e) => {
            error!("failed to start playback of {}: {}", station.url, e);
            reset(display, Some(&format!("Could not play {}: {}", station.name, e)));
            return Flow::ReturnToMenu;
        }
    };

    if let Err(e) = display.station_info(&station) {
        warn!("failed to render station info: {}", e);
    }

    let ended = tokio::select! {
        _ = &mut interrupt => None,
        exit = session.wait() => Some(exit),
    };
    session.stop().await;

    match ended {
        // Ctrl+C hits mpv too, so it may win the race against our listener
        None | Some(Ok(PlayerExit::Signalled)) => {
            info!("playback of {} interrupted, back to menu", station.url);
            reset(display, None);
        }
        Some(exit) => {
            let message = describe_exit(&station, exit);
            warn!("{}", message);
            reset(display, Some(&message));
        }
    }
    Flow::ReturnToMenu
}

fn describe_exit(
    station: &Station,
    exit: Result<PlayerExit, radio_core::player::PlayerError>,
) -> String {
    match exit {
        Ok(PlayerExit::Finished) => format!("{} ended", station.name),
        Ok(PlayerExit::Signalled) => format!("Player for {} was stopped", station.name),
        Ok(PlayerExit::Failed(Some(code))) => {
            format!("Player failed on {} (exit code {})", station.name, code)
        }
        Ok(PlayerExit::Failed(None)) => format!("Player failed on {}", station.name),
        Err(e) => format!("Playback of {} broke off: {}", station.name, e),
    }
}

/// Clear the screen before the picker comes back, then show `notice`.
fn reset<W: Write>(display: &mut Display<W>, notice: Option<&str>) {
    if let Err(e) = display.clear() {
        warn!("failed to clear screen: {}", e);
    }
    if let Some(notice) = notice {
        if let Err(e) = display.notice(notice) {
            warn!("failed to show notice: {}", e);
        }
    }
}
