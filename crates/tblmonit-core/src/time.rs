//! Process clock locale.
//!
//! The configured `timeZone` is looked up as an IANA zone name. Lookup
//! failures never stop the tool: they produce a [`ZoneWarning`] and the
//! clock stays on UTC.
//!
//! Under [`TimeZonePolicy::AlwaysUtc`] (the default) the effective zone is
//! UTC even when the configured name resolves; the resolved zone is kept on
//! the clock as `configured` so callers can still see it.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::fmt;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};

/// What to do with a successfully resolved configured zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZonePolicy {
    /// Record the configured zone but keep the process clock on UTC
    #[default]
    AlwaysUtc,
    /// Make the configured zone the process clock
    Honor,
}

/// The process-wide notion of local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockLocale {
    effective: Tz,
    configured: Option<Tz>,
}

impl ClockLocale {
    /// A clock on UTC with no configured zone.
    pub fn utc() -> Self {
        Self {
            effective: Tz::UTC,
            configured: None,
        }
    }

    /// Zone used for all local-time rendering.
    pub fn effective(&self) -> Tz {
        self.effective
    }

    /// Zone named in configuration, if it resolved.
    pub fn configured(&self) -> Option<Tz> {
        self.configured
    }

    /// Whether the effective zone is UTC.
    pub fn is_utc(&self) -> bool {
        self.effective == Tz::UTC
    }

    /// Current time in the effective zone.
    pub fn now(&self) -> DateTime<Tz> {
        self.localize(Utc::now())
    }

    /// Convert a UTC timestamp to the effective zone.
    pub fn localize(&self, timestamp: DateTime<Utc>) -> DateTime<Tz> {
        timestamp.with_timezone(&self.effective)
    }
}

impl Default for ClockLocale {
    fn default() -> Self {
        Self::utc()
    }
}

impl FormatTime for ClockLocale {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", self.now().format("%Y-%m-%dT%H:%M:%S%.6f%:z"))
    }
}

/// A configured zone name that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneWarning {
    /// The value as it appeared in configuration
    pub value: String,
    /// Why the lookup failed
    pub reason: String,
}

impl fmt::Display for ZoneWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to load location from config file \"{}\" ({}); using UTC",
            self.value, self.reason
        )
    }
}

/// Outcome of resolving the configured zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneResolution {
    /// Clock to install
    pub clock: ClockLocale,
    /// Set when the configured name did not resolve
    pub warning: Option<ZoneWarning>,
}

/// Resolve a configured zone name into the process clock.
///
/// Total: an empty name is plain UTC, an unknown name is UTC plus a warning.
pub fn resolve_time_zone(tz: &str, policy: TimeZonePolicy) -> ZoneResolution {
    let name = tz.trim();
    if name.is_empty() {
        return ZoneResolution {
            clock: ClockLocale::utc(),
            warning: None,
        };
    }

    match name.parse::<Tz>() {
        Ok(zone) => {
            let effective = match policy {
                TimeZonePolicy::AlwaysUtc => Tz::UTC,
                TimeZonePolicy::Honor => zone,
            };
            ZoneResolution {
                clock: ClockLocale {
                    effective,
                    configured: Some(zone),
                },
                warning: None,
            }
        }
        Err(e) => ZoneResolution {
            clock: ClockLocale::utc(),
            warning: Some(ZoneWarning {
                value: tz.to_string(),
                reason: e.to_string(),
            }),
        },
    }
}
