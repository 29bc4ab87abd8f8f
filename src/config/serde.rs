use std::time::Duration;

use humantime::{format_duration, parse_duration};
use serde::Deserialize;
use serde_with::{DeserializeAs, SerializeAs};

/// `"2s"`, `"500ms"`, `"1m 30s"` and friends.
pub(crate) struct HumantimeDuration;

impl<'de> DeserializeAs<'de, Duration> for HumantimeDuration {
    fn deserialize_as<D>(deserializer: D) -> std::result::Result<Duration, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}

impl SerializeAs<Duration> for HumantimeDuration {
    fn serialize_as<S>(value: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format_duration(*value).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::HumantimeDuration;
    use serde::{Deserialize, Serialize};
    use serde_with::serde_as;
    use std::time::Duration;

    #[serde_as]
    #[derive(Deserialize, Serialize)]
    struct Sample {
        #[serde_as(as = "Option<HumantimeDuration>")]
        delay: Option<Duration>,
    }

    #[test]
    fn parses_millisecond_strings() {
        let sample: Sample = match serde_json::from_str(r#"{"delay":"500ms"}"#) {
            Ok(value) => value,
            Err(err) => panic!("failed to parse sample json: {err}"),
        };
        assert_eq!(sample.delay, Some(Duration::from_millis(500)));
    }

    #[test]
    fn formats_back_to_humantime() {
        let sample = Sample {
            delay: Some(Duration::from_secs(10)),
        };
        let json = match serde_json::to_string(&sample) {
            Ok(json) => json,
            Err(err) => panic!("failed to serialize sample: {err}"),
        };
        assert_eq!(json, r#"{"delay":"10s"}"#);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"delay":"soon"}"#).is_err());
    }
}
