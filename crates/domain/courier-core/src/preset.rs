use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::request::{EventType, SimulationRequest};

/// Named shortcuts over manual configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioPreset {
    Happy,
    Outage,
    Dnd,
    Async,
}

impl ScenarioPreset {
    pub const ALL: [ScenarioPreset; 4] = [
        ScenarioPreset::Happy,
        ScenarioPreset::Outage,
        ScenarioPreset::Dnd,
        ScenarioPreset::Async,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenarioPreset::Happy => "happy",
            ScenarioPreset::Outage => "outage",
            ScenarioPreset::Dnd => "dnd",
            ScenarioPreset::Async => "async",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ScenarioPreset::Happy => "Happy Path",
            ScenarioPreset::Outage => "Provider Outage",
            ScenarioPreset::Dnd => "Do Not Disturb",
            ScenarioPreset::Async => "Async Signup",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ScenarioPreset::Happy => "Online recipient, no failures.",
            ScenarioPreset::Outage => {
                "Every provider call fails; retries exhaust into the DLQ (slowed down)."
            }
            ScenarioPreset::Dnd => "Promotional event blocked by the recipient's DND setting.",
            ScenarioPreset::Async => "Signup fan-out in slow mode to watch the workers drain.",
        }
    }

    /// Hard defaults with this preset's overrides applied. Prior manual edits
    /// never leak into the result.
    pub fn request(self) -> SimulationRequest {
        let mut req = SimulationRequest::default();
        match self {
            ScenarioPreset::Happy => {
                req.recipient_online = true;
            }
            ScenarioPreset::Outage => {
                req.fail_rate = 100;
                req.event_type = EventType::PasswordReset;
                req.slow_mode = true;
            }
            ScenarioPreset::Dnd => {
                req.do_not_disturb = true;
                req.event_type = EventType::PromoFlashSale;
            }
            ScenarioPreset::Async => {
                req.slow_mode = true;
                req.event_type = EventType::UserSignup;
            }
        }
        req
    }
}

impl fmt::Display for ScenarioPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioPreset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioPreset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| CoreError::UnknownPreset(s.to_string()))
    }
}

/// Resolve a preset by catalog name.
pub fn apply_preset(name: &str) -> Result<SimulationRequest, CoreError> {
    name.parse::<ScenarioPreset>().map(ScenarioPreset::request)
}
