//! Datadog v2 series wire format

use serde::{Deserialize, Serialize, Serializer};

use crate::data::types::{Batch, IntakeType, Resource};

/// `POST /api/v2/series` body
#[derive(Debug, Serialize)]
pub struct MetricPayload<'a> {
    pub series: Vec<MetricSeries<'a>>,
}

#[derive(Debug, Serialize)]
pub struct MetricSeries<'a> {
    pub metric: &'a str,
    #[serde(rename = "type")]
    pub intake_type: IntakeType,
    pub points: [MetricPoint; 1],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<MetricResource<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct MetricPoint {
    pub timestamp: i64,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct MetricResource<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub name: &'a str,
}

impl<'a> From<&'a Resource> for MetricResource<'a> {
    fn from(r: &'a Resource) -> Self {
        Self {
            kind: &r.kind,
            name: &r.name,
        }
    }
}

impl<'a> From<&'a Batch> for MetricPayload<'a> {
    fn from(batch: &'a Batch) -> Self {
        let series = batch
            .points
            .iter()
            .map(|p| MetricSeries {
                metric: &p.metric,
                intake_type: p.intake_type,
                points: [MetricPoint {
                    timestamp: p.timestamp,
                    value: p.value,
                }],
                resources: p.resources.iter().map(MetricResource::from).collect(),
                tags: p.tags.iter().map(String::as_str).collect(),
            })
            .collect();
        Self { series }
    }
}

// The intake expects the numeric enum value
impl Serialize for IntakeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Intake response body (202 Accepted)
#[derive(Debug, Default, Deserialize)]
pub struct IntakeResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::SeriesPoint;
    use serde_json::json;

    #[test]
    fn test_payload_shape() {
        let batch = Batch {
            metric: "pulsar_msg_backlog".to_string(),
            points: vec![SeriesPoint {
                metric: "pulsar_msg_backlog".to_string(),
                intake_type: IntakeType::Gauge,
                value: 42.0,
                timestamp: 1_704_067_200,
                resources: vec![Resource {
                    kind: "topic".to_string(),
                    name: "t1".to_string(),
                }],
                tags: vec!["topic:t1".to_string()],
            }],
        };

        let value = serde_json::to_value(MetricPayload::from(&batch)).unwrap();
        assert_eq!(
            value,
            json!({
                "series": [{
                    "metric": "pulsar_msg_backlog",
                    "type": 3,
                    "points": [{ "timestamp": 1_704_067_200, "value": 42.0 }],
                    "resources": [{ "type": "topic", "name": "t1" }],
                    "tags": ["topic:t1"]
                }]
            })
        );
    }

    #[test]
    fn test_payload_omits_empty_resources_and_tags() {
        let batch = Batch {
            metric: "pulsar_topics_count".to_string(),
            points: vec![SeriesPoint {
                metric: "pulsar_topics_count".to_string(),
                intake_type: IntakeType::Gauge,
                value: 5.0,
                timestamp: 1,
                resources: Vec::new(),
                tags: Vec::new(),
            }],
        };

        let value = serde_json::to_value(MetricPayload::from(&batch)).unwrap();
        let series = &value["series"][0];
        assert!(series.get("resources").is_none());
        assert!(series.get("tags").is_none());
    }

    #[test]
    fn test_response_errors_default_empty() {
        let resp: IntakeResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.errors.is_empty());

        let resp: IntakeResponse =
            serde_json::from_str(r#"{"errors":["Invalid metric"]}"#).unwrap();
        assert_eq!(resp.errors, vec!["Invalid metric"]);
    }
}
