pub mod commands;
pub mod console;

use clap::{Args, ValueEnum};
use courier_core::{EventType, ScenarioPreset, SimulationRequest};

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum CliPreset {
    Happy,
    Outage,
    Dnd,
    Async,
}

impl From<CliPreset> for ScenarioPreset {
    fn from(p: CliPreset) -> Self {
        match p {
            CliPreset::Happy => ScenarioPreset::Happy,
            CliPreset::Outage => ScenarioPreset::Outage,
            CliPreset::Dnd => ScenarioPreset::Dnd,
            CliPreset::Async => ScenarioPreset::Async,
        }
    }
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum CliEvent {
    #[value(name = "user.signup")]
    UserSignup,
    #[value(name = "order.placed")]
    OrderPlaced,
    #[value(name = "password.reset")]
    PasswordReset,
    #[value(name = "promo.flash_sale")]
    PromoFlashSale,
}

impl From<CliEvent> for EventType {
    fn from(e: CliEvent) -> Self {
        match e {
            CliEvent::UserSignup => EventType::UserSignup,
            CliEvent::OrderPlaced => EventType::OrderPlaced,
            CliEvent::PasswordReset => EventType::PasswordReset,
            CliEvent::PromoFlashSale => EventType::PromoFlashSale,
        }
    }
}

/// Simulation parameters. A preset supplies the starting point; explicit
/// flags are layered on top of it.
#[derive(Args, Clone, Debug, Default)]
pub struct RequestArgs {
    #[arg(short, long, value_enum)]
    pub preset: Option<CliPreset>,
    #[arg(short, long, value_enum)]
    pub event: Option<CliEvent>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub fail_rate: Option<u8>,
    #[arg(long, help = "Recipient has Do Not Disturb enabled")]
    pub dnd: bool,
    #[arg(long, help = "Recipient is online")]
    pub online: bool,
    #[arg(long, help = "Slow the simulator down")]
    pub slow: bool,
}

impl RequestArgs {
    pub fn resolve(&self) -> SimulationRequest {
        let base = self
            .preset
            .map(|p| ScenarioPreset::from(p).request())
            .unwrap_or_default();

        SimulationRequest::build(
            self.event.map(EventType::from).unwrap_or(base.event_type),
            self.fail_rate.unwrap_or(base.fail_rate),
            base.do_not_disturb || self.dnd,
            base.recipient_online || self.online,
            base.slow_mode || self.slow,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_layer_over_the_preset() {
        let args = RequestArgs {
            preset: Some(CliPreset::Dnd),
            fail_rate: Some(30),
            online: true,
            ..Default::default()
        };
        let req = args.resolve();
        assert_eq!(req.event_type, EventType::PromoFlashSale);
        assert_eq!(req.fail_rate, 30);
        assert!(req.do_not_disturb);
        assert!(req.recipient_online);
        assert!(!req.slow_mode);
    }

    #[test]
    fn no_flags_means_defaults() {
        assert_eq!(RequestArgs::default().resolve(), SimulationRequest::default());
    }
}
