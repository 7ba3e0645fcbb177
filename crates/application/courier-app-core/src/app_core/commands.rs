use courier_core::{ScenarioPreset, SimulationRequest};

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Controls
    SelectPreset(ScenarioPreset),
    SelectPresetByName(String),
    EditRequest(SimulationRequest),
    ToggleTooltips,

    // Session
    /// Fire a session with the current control values.
    Trigger,
    /// Fire a session with an explicit request, bypassing the controls.
    TriggerWith(SimulationRequest),
    Reset,
}
