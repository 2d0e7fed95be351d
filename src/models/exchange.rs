use serde::{ Serialize, Deserialize, Deserializer };
use serde_json::Value;

/// Body of `POST /api/content`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExchangeRequest {
    #[serde(rename = "questions", default, deserialize_with = "lenient_prompt")]
    pub prompt: String,
}

/// `null` reads as an empty prompt; numbers, bools, arrays and objects are sent as their JSON text.
fn lenient_prompt<'de, D>(deserializer: D) -> Result<String, D::Error> where D: Deserializer<'de> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

/// Reply text on success, error text on failure. Both travel in `response`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeResponse {
    pub response: String,
}
