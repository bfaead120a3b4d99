//! Member redaction -- remove a list of named fields from a sub-tree and
//! record what happened to each.
//!
//! Each member gets one presence check before removal, one first-match
//! removal, and one presence check after. A member that occurs more than once
//! under the target is therefore still reported present afterwards; see
//! [`RedactionReport::residual`].

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::value::{parse_document, resolve_path_mut};
use crate::walker::{contains_key, remove_first_key};

/// What one redaction pass did for a single member name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberOutcome {
    pub member: String,
    pub present_before: bool,
    pub removed: bool,
    pub present_after: bool,
}

impl fmt::Display for MemberOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Is the '{}' member present... Before redaction? {} ----- After redaction? {}",
            self.member,
            u8::from(self.present_before),
            u8::from(self.present_after)
        )
    }
}

/// Per-member outcomes of [`redact_members`], in the order the members were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RedactionReport {
    pub outcomes: Vec<MemberOutcome>,
}

impl RedactionReport {
    pub fn removed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.removed).count()
    }

    /// Members still present somewhere under the target after the pass.
    pub fn residual(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.present_after)
            .map(|o| o.member.as_str())
            .collect()
    }

    pub fn fully_redacted(&self) -> bool {
        self.outcomes.iter().all(|o| !o.present_after)
    }
}

/// Remove the first occurrence of each member from `target`, in order.
///
/// # Examples
///
/// ```
/// use redact_core::redact_members;
/// use serde_json::json;
///
/// let mut part_ii = json!([{"value": {"yawRate": "test", "regional": []}}]);
/// let report = redact_members(&mut part_ii, &["yawRate", "sunSensor"]);
///
/// assert_eq!(part_ii, json!([{"value": {"regional": []}}]));
/// assert_eq!(report.removed_count(), 1);
/// assert!(report.fully_redacted());
/// ```
pub fn redact_members(target: &mut Value, members: &[&str]) -> RedactionReport {
    let outcomes = members
        .iter()
        .map(|&member| {
            let present_before = contains_key(target, member);
            let removed = remove_first_key(target, member);
            let present_after = contains_key(target, member);
            let outcome = MemberOutcome {
                member: member.to_string(),
                present_before,
                removed,
                present_after,
            };
            log::debug!("{outcome}");
            outcome
        })
        .collect();
    RedactionReport { outcomes }
}

/// Parse `json`, resolve `path` inside it, and redact `members` there.
///
/// Returns the whole edited document together with the report.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or `path` does not resolve.
///
/// # Examples
///
/// ```
/// use redact_core::redact_document;
///
/// let json = r#"{"payload":{"data":{"partII":[{"value":{"sunSensor":"test"}}]}},"sunSensor":1}"#;
/// let (doc, report) = redact_document(json, "payload.data.partII", &["sunSensor"]).unwrap();
///
/// assert!(report.fully_redacted());
/// assert_eq!(doc["sunSensor"], 1);
/// ```
pub fn redact_document(json: &str, path: &str, members: &[&str]) -> Result<(Value, RedactionReport)> {
    let mut document = parse_document(json)?;
    let target = resolve_path_mut(&mut document, path)?;
    let report = redact_members(target, members);
    Ok((document, report))
}

/// Predefined member lists for known message payloads.
pub struct RedactionPreset;

impl RedactionPreset {
    /// Location of the Part II extensions in an ODE BSM JSON record.
    pub const BSM_PART_II_PATH: &'static str = "payload.data.partII";

    /// Vehicle-status fields of the BSM supplemental vehicle extension
    /// (SAE J2735 Part II) that carry driver-identifying or
    /// behaviour-revealing information.
    pub fn bsm_part_ii() -> Vec<&'static str> {
        vec![
            "accelLong",
            "accelLat",
            "accelVert",
            "yawRate",
            "steeringWheelAngle",
            "leftTurnSignalOn",
            "rightTurnSignalOn",
            "hazardSignalOn",
            "fogLightOn",
            "lowBeamHeadlightsOn",
            "highBeamHeadlightsOn",
            "automaticLightControlOn",
            "daytimeRunningLightsOn",
            "parkingLightsOn",
            "wiperStatusFront",
            "wiperStatusRear",
            "wiperRateFront",
            "wiperRateRear",
            "eventAirBagDeployment",
            "sunSensor",
            "coefficientOfFriction",
            "ambientAirTemperature",
            "ambientAirPressure",
            "transmissionState",
            "vehicleSpeed",
            "antiLockBrakeStatus",
            "stabilityControlStatus",
            "tractionControlStatus",
            "brakeBoostApplied",
            "brakeAppliedStatus",
            "auxiliaryBrakeStatus",
            "tirePressure",
            "acceleratorPedalPosition",
            "brakePedalPosition",
            "disabledVehicle",
            "stalledVehicle",
            "airBagDeployment",
        ]
    }

    /// Look up a preset by its CLI name.
    pub fn by_name(name: &str) -> Option<(Vec<&'static str>, &'static str)> {
        match name {
            "bsm" => Some((Self::bsm_part_ii(), Self::BSM_PART_II_PATH)),
            _ => None,
        }
    }
}
