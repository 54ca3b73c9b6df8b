//! JSON status datagram codec and the device status vocabulary
//!
//! JSON datagrams carry any subset of the attitude fields plus the device
//! status block. Absent fields retain their previously stored value; the
//! merge happens in the link state store.
//!
//! The solar panel state historically appeared in two encodings: a boolean
//! (`true` = deployed) and a string (`"DEPLOYED"`/`"RETRACTED"`). The enum
//! below is the single canonical representation; its `Deserialize` accepts
//! both legacy encodings and `Serialize` always emits the string form.

use super::DecodeError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status LED state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LedState {
    On,
    #[default]
    Off,
}

/// Solar panel deployment state (canonical two-state representation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolarPanel {
    Deployed,
    #[default]
    Retracted,
}

/// Attitude/solar control mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ControlMode {
    #[default]
    Manual,
    Auto,
}

impl SolarPanel {
    /// Wire string for the canonical encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            SolarPanel::Deployed => "DEPLOYED",
            SolarPanel::Retracted => "RETRACTED",
        }
    }
}

impl Serialize for SolarPanel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SolarPanel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(true) => Ok(SolarPanel::Deployed),
            Repr::Flag(false) => Ok(SolarPanel::Retracted),
            Repr::Name(s) => match s.as_str() {
                "DEPLOYED" => Ok(SolarPanel::Deployed),
                "RETRACTED" => Ok(SolarPanel::Retracted),
                other => Err(D::Error::unknown_variant(
                    other,
                    &["DEPLOYED", "RETRACTED"],
                )),
            },
        }
    }
}

/// Device status block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct DeviceStatus {
    #[serde(default)]
    pub led: LedState,
    #[serde(default)]
    pub solar: SolarPanel,
    #[serde(default)]
    pub mode: ControlMode,
}

/// Partial telemetry carried by one JSON datagram
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct StatusUpdate {
    /// Pitch angle (degrees)
    pub pitch: Option<f32>,
    /// Roll angle (degrees)
    pub roll: Option<f32>,
    /// Yaw angle (degrees)
    pub yaw: Option<f32>,
    /// Z-axis acceleration (m/s^2)
    pub accel_z: Option<f32>,
    /// Solar light sensor reading
    pub light: Option<f32>,
    /// Device status block
    pub status: Option<DeviceStatus>,
}

impl StatusUpdate {
    /// Decode one JSON datagram
    pub fn decode(payload: &[u8]) -> Result<Self, DecodeError> {
        let text = std::str::from_utf8(payload).map_err(|_| DecodeError::NotUtf8)?;
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_update() {
        let payload = br#"{
            "pitch": 12.0, "roll": -4.5, "yaw": 180.0,
            "accel_z": 9.81, "light": 512,
            "status": {"led": "ON", "solar": "DEPLOYED", "mode": "AUTO"}
        }"#;
        let update = StatusUpdate::decode(payload).unwrap();
        assert_eq!(update.pitch, Some(12.0));
        assert_eq!(update.light, Some(512.0));
        let status = update.status.unwrap();
        assert_eq!(status.led, LedState::On);
        assert_eq!(status.solar, SolarPanel::Deployed);
        assert_eq!(status.mode, ControlMode::Auto);
    }

    #[test]
    fn test_decode_partial_update() {
        let update = StatusUpdate::decode(br#"{"pitch": 1.5}"#).unwrap();
        assert_eq!(update.pitch, Some(1.5));
        assert_eq!(update.roll, None);
        assert_eq!(update.status, None);
    }

    #[test]
    fn test_solar_accepts_legacy_boolean() {
        let update = StatusUpdate::decode(br#"{"status": {"solar": true}}"#).unwrap();
        assert_eq!(update.status.unwrap().solar, SolarPanel::Deployed);

        let update = StatusUpdate::decode(br#"{"status": {"solar": false}}"#).unwrap();
        assert_eq!(update.status.unwrap().solar, SolarPanel::Retracted);
    }

    #[test]
    fn test_solar_serializes_as_string() {
        let json = serde_json::to_string(&SolarPanel::Deployed).unwrap();
        assert_eq!(json, "\"DEPLOYED\"");
    }

    #[test]
    fn test_solar_rejects_unknown_string() {
        assert!(StatusUpdate::decode(br#"{"status": {"solar": "OPEN"}}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            StatusUpdate::decode(&[0xFF, 0xFE]),
            Err(DecodeError::NotUtf8)
        ));
        assert!(matches!(
            StatusUpdate::decode(b"not json"),
            Err(DecodeError::Json(_))
        ));
    }
}
