//! Stream reachability check run before handing a URL to the player.
//!
//! Local `file:` URLs always pass.  Network URLs get a GET whose status line
//! is the verdict; the body is never read, the response is dropped as soon as
//! the headers arrive.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable(String),
}

impl Reachability {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Reachability::Reachable)
    }
}

impl fmt::Display for Reachability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reachability::Reachable => f.write_str("reachable"),
            Reachability::Unreachable(reason) => write!(f, "unreachable ({})", reason),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Probe {
    async fn check(&self, url: &str) -> Reachability;
}

pub fn is_local(url: &str) -> bool {
    url.get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("file:"))
}

/// HTTP probe backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            // Icecast/Shoutcast often redirect to a load-balanced mount
            .redirect(reqwest::redirect::Policy::limited(10))
            .connect_timeout(timeout)
            .default_headers({
                let mut h = reqwest::header::HeaderMap::new();
                h.insert(
                    "Icy-MetaData",
                    reqwest::header::HeaderValue::from_static("1"),
                );
                h
            })
            .build()?;
        Ok(Self { client, timeout })
    }
}

impl Probe for HttpProbe {
    async fn check(&self, url: &str) -> Reachability {
        if is_local(url) {
            return Reachability::Reachable;
        }

        let request = self.client.get(url).send();
        let verdict = match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(resp)) if resp.status().is_success() => Reachability::Reachable,
            Ok(Ok(resp)) => Reachability::Unreachable(format!("HTTP {}", resp.status())),
            Ok(Err(e)) => Reachability::Unreachable(e.to_string()),
            Err(_) => Reachability::Unreachable(format!(
                "no response within {}s",
                self.timeout.as_secs_f32()
            )),
        };

        match &verdict {
            Reachability::Reachable => debug!("probe: {} is reachable", url),
            Reachability::Unreachable(reason) => warn!("probe: {} unreachable: {}", url, reason),
        }
        verdict
    }
}

/// Probe used when checking is turned off in the settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipProbe;

impl Probe for SkipProbe {
    async fn check(&self, _url: &str) -> Reachability {
        Reachability::Reachable
    }
}

/// Probe picked from the settings.
#[derive(Clone)]
pub enum StreamProbe {
    Http(HttpProbe),
    Skip(SkipProbe),
}

impl StreamProbe {
    pub fn from_config(config: &crate::config::Config) -> anyhow::Result<Self> {
        if config.probe.enabled {
            let timeout = Duration::from_secs(config.probe.timeout_secs.max(1));
            Ok(StreamProbe::Http(HttpProbe::new(timeout)?))
        } else {
            Ok(StreamProbe::Skip(SkipProbe))
        }
    }
}

impl Probe for StreamProbe {
    async fn check(&self, url: &str) -> Reachability {
        match self {
            StreamProbe::Http(p) => p.check(url).await,
            StreamProbe::Skip(p) => p.check(url).await,
        }
    }
}
