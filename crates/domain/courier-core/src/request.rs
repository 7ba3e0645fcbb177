use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Path of the push-stream endpoint on the simulator.
pub const SIMULATE_PATH: &str = "/simulate";

/// Unreserved characters (RFC 3986) stay literal in query values.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Domain events the simulator knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventType {
    #[serde(rename = "user.signup")]
    UserSignup,
    #[default]
    #[serde(rename = "order.placed")]
    OrderPlaced,
    #[serde(rename = "password.reset")]
    PasswordReset,
    #[serde(rename = "promo.flash_sale")]
    PromoFlashSale,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::UserSignup,
        EventType::OrderPlaced,
        EventType::PasswordReset,
        EventType::PromoFlashSale,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::UserSignup => "user.signup",
            EventType::OrderPlaced => "order.placed",
            EventType::PasswordReset => "password.reset",
            EventType::PromoFlashSale => "promo.flash_sale",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| CoreError::UnknownEventType(s.to_string()))
    }
}

/// Parameters of one simulation run. Built at trigger time and never mutated
/// once a session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub event_type: EventType,
    pub fail_rate: u8,
    pub do_not_disturb: bool,
    pub recipient_online: bool,
    pub slow_mode: bool,
}

impl SimulationRequest {
    /// Pure constructor. The fail rate is not re-validated here; the input
    /// control clamps it and the simulator rejects anything else.
    pub fn build(
        event_type: EventType,
        fail_rate: u8,
        do_not_disturb: bool,
        recipient_online: bool,
        slow_mode: bool,
    ) -> Self {
        Self {
            event_type,
            fail_rate,
            do_not_disturb,
            recipient_online,
            slow_mode,
        }
    }

    /// Query parameters in wire order. All five are always present.
    pub fn query_pairs(&self) -> [(&'static str, String); 5] {
        [
            ("event", self.event_type.as_str().to_string()),
            ("fail_rate", self.fail_rate.to_string()),
            ("dnd", self.do_not_disturb.to_string()),
            ("online", self.recipient_online.to_string()),
            ("slow", self.slow_mode.to_string()),
        ]
    }

    pub fn to_query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(k, v)| format!("{k}={}", utf8_percent_encode(v, QUERY_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full push-stream URL under `base_url`.
    pub fn simulate_url(&self, base_url: &str) -> String {
        format!(
            "{}{}?{}",
            base_url.trim_end_matches('/'),
            SIMULATE_PATH,
            self.to_query_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_carries_all_parameters_in_wire_order() {
        let req = SimulationRequest::build(EventType::PromoFlashSale, 35, true, false, true);
        assert_eq!(
            req.to_query_string(),
            "event=promo.flash_sale&fail_rate=35&dnd=true&online=false&slow=true"
        );
    }

    #[test]
    fn simulate_url_tolerates_trailing_slash() {
        let req = SimulationRequest::default();
        assert_eq!(
            req.simulate_url("http://localhost:5000/"),
            "http://localhost:5000/simulate?event=order.placed&fail_rate=0&dnd=false&online=false&slow=false"
        );
    }

    #[test]
    fn event_type_parses_wire_names_only() {
        assert_eq!(
            "password.reset".parse::<EventType>().unwrap(),
            EventType::PasswordReset
        );
        assert!(matches!(
            "password_reset".parse::<EventType>(),
            Err(CoreError::UnknownEventType(_))
        ));
    }
}
