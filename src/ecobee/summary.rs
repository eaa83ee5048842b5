//! Equipment status summary.
//!
//! The summary endpoint reports two parallel string lists:
//!
//! - `revisionList`: `identifier:name:connected:thermostatRev:alertsRev:runtimeRev:intervalRev`
//! - `statusList`:   `identifier:equip1,equip2,...` (empty after the colon when idle)
//!
//! They are joined by identifier into one [`ThermostatSummary`] per thermostat.

use std::collections::HashMap;

use crate::ecobee::{EcobeeError, SummaryResponse};

/// Every piece of equipment the summary endpoint can report as running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equipment {
    HeatPump,
    HeatPump2,
    HeatPump3,
    CompCool1,
    CompCool2,
    AuxHeat1,
    AuxHeat2,
    AuxHeat3,
    Fan,
    Humidifier,
    Dehumidifier,
    Ventilator,
    Economizer,
    CompHotWater,
    AuxHotWater,
}

impl Equipment {
    /// Parses the camelCase name used in `statusList`.
    pub fn from_api_name(name: &str) -> Option<Self> {
        let equipment = match name {
            "heatPump" => Self::HeatPump,
            "heatPump2" => Self::HeatPump2,
            "heatPump3" => Self::HeatPump3,
            "compCool1" => Self::CompCool1,
            "compCool2" => Self::CompCool2,
            "auxHeat1" => Self::AuxHeat1,
            "auxHeat2" => Self::AuxHeat2,
            "auxHeat3" => Self::AuxHeat3,
            "fan" => Self::Fan,
            "humidifier" => Self::Humidifier,
            "dehumidifier" => Self::Dehumidifier,
            "ventilator" => Self::Ventilator,
            "economizer" => Self::Economizer,
            "compHotWater" => Self::CompHotWater,
            "auxHotWater" => Self::AuxHotWater,
            _ => return None,
        };
        Some(equipment)
    }

    /// Value of the `equipment` label.
    pub fn label(self) -> &'static str {
        match self {
            Self::HeatPump => "HeatPump",
            Self::HeatPump2 => "HeatPump2",
            Self::HeatPump3 => "HeatPump3",
            Self::CompCool1 => "CompCool1",
            Self::CompCool2 => "CompCool2",
            Self::AuxHeat1 => "AuxHeat1",
            Self::AuxHeat2 => "AuxHeat2",
            Self::AuxHeat3 => "AuxHeat3",
            Self::Fan => "Fan",
            Self::Humidifier => "Humidifier",
            Self::Dehumidifier => "Dehumidifier",
            Self::Ventilator => "Ventilator",
            Self::Economizer => "Economizer",
            Self::CompHotWater => "CompHotWater",
            Self::AuxHotWater => "AuxHotWater",
        }
    }
}

/// Connectivity and running equipment of one thermostat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThermostatSummary {
    pub identifier: String,
    pub name: String,
    pub connected: bool,
    pub heat_pump: bool,
    pub heat_pump2: bool,
    pub heat_pump3: bool,
    pub comp_cool1: bool,
    pub comp_cool2: bool,
    pub aux_heat1: bool,
    pub aux_heat2: bool,
    pub aux_heat3: bool,
    pub fan: bool,
    pub humidifier: bool,
    pub dehumidifier: bool,
    pub ventilator: bool,
    pub economizer: bool,
    pub comp_hot_water: bool,
    pub aux_hot_water: bool,
}

impl ThermostatSummary {
    pub fn is_running(&self, equipment: Equipment) -> bool {
        match equipment {
            Equipment::HeatPump => self.heat_pump,
            Equipment::HeatPump2 => self.heat_pump2,
            Equipment::HeatPump3 => self.heat_pump3,
            Equipment::CompCool1 => self.comp_cool1,
            Equipment::CompCool2 => self.comp_cool2,
            Equipment::AuxHeat1 => self.aux_heat1,
            Equipment::AuxHeat2 => self.aux_heat2,
            Equipment::AuxHeat3 => self.aux_heat3,
            Equipment::Fan => self.fan,
            Equipment::Humidifier => self.humidifier,
            Equipment::Dehumidifier => self.dehumidifier,
            Equipment::Ventilator => self.ventilator,
            Equipment::Economizer => self.economizer,
            Equipment::CompHotWater => self.comp_hot_water,
            Equipment::AuxHotWater => self.aux_hot_water,
        }
    }

    pub fn set_running(&mut self, equipment: Equipment) {
        let field = match equipment {
            Equipment::HeatPump => &mut self.heat_pump,
            Equipment::HeatPump2 => &mut self.heat_pump2,
            Equipment::HeatPump3 => &mut self.heat_pump3,
            Equipment::CompCool1 => &mut self.comp_cool1,
            Equipment::CompCool2 => &mut self.comp_cool2,
            Equipment::AuxHeat1 => &mut self.aux_heat1,
            Equipment::AuxHeat2 => &mut self.aux_heat2,
            Equipment::AuxHeat3 => &mut self.aux_heat3,
            Equipment::Fan => &mut self.fan,
            Equipment::Humidifier => &mut self.humidifier,
            Equipment::Dehumidifier => &mut self.dehumidifier,
            Equipment::Ventilator => &mut self.ventilator,
            Equipment::Economizer => &mut self.economizer,
            Equipment::CompHotWater => &mut self.comp_hot_water,
            Equipment::AuxHotWater => &mut self.aux_hot_water,
        };
        *field = true;
    }
}

/// Number of colon-separated revision fields after the thermostat name.
const REVISION_TAIL_FIELDS: usize = 5;

/// Parses one `revisionList` entry into identifier, name and connectivity.
fn parse_revision(entry: &str) -> Result<(String, String, bool), EcobeeError> {
    let malformed = || EcobeeError::Summary(format!("malformed revision entry {:?}", entry));

    let (identifier, rest) = entry.split_once(':').ok_or_else(malformed)?;
    // The name may itself contain colons, so the fixed tail is split from the right.
    let mut tail = rest.rsplitn(REVISION_TAIL_FIELDS + 1, ':');
    let tail_fields: Vec<&str> = tail.by_ref().take(REVISION_TAIL_FIELDS).collect();
    let name = tail.next().ok_or_else(malformed)?;
    if tail_fields.len() != REVISION_TAIL_FIELDS {
        return Err(malformed());
    }

    // rsplitn yields right to left; connected is the left-most tail field.
    let connected = match tail_fields[REVISION_TAIL_FIELDS - 1] {
        "true" => true,
        "false" => false,
        _ => return Err(malformed()),
    };

    Ok((identifier.to_string(), name.to_string(), connected))
}

/// Joins `revisionList` and `statusList` into summaries, in revision order.
///
/// Unknown equipment names are skipped with a debug log; they carry no
/// tracked state.
pub fn parse_summary(resp: &SummaryResponse) -> Result<Vec<ThermostatSummary>, EcobeeError> {
    let mut running: HashMap<&str, Vec<&str>> = HashMap::new();
    for entry in &resp.status_list {
        let (identifier, equipment) = entry
            .split_once(':')
            .ok_or_else(|| EcobeeError::Summary(format!("malformed status entry {:?}", entry)))?;
        let names = equipment.split(',').filter(|s| !s.is_empty()).collect();
        running.insert(identifier, names);
    }

    let mut summaries = Vec::with_capacity(resp.revision_list.len());
    for entry in &resp.revision_list {
        let (identifier, name, connected) = parse_revision(entry)?;
        let mut summary = ThermostatSummary {
            identifier,
            name,
            connected,
            ..Default::default()
        };

        for equipment_name in running.get(summary.identifier.as_str()).into_iter().flatten() {
            match Equipment::from_api_name(equipment_name) {
                Some(equipment) => summary.set_running(equipment),
                None => tracing::debug!("Unknown equipment {:?} in status list", equipment_name),
            }
        }

        summaries.push(summary);
    }

    Ok(summaries)
}
