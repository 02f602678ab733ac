use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Identity reported by the health and greeting endpoints.
///
/// Each field also accepts a bare number or boolean, since the environment
/// provider types `GREETER_SERVICE__VERSION=2.0` as a float.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct ServiceConfig {
    #[serde(deserialize_with = "scalar_as_string")]
    #[schemars(with = "String")]
    pub name: String,
    #[serde(deserialize_with = "scalar_as_string")]
    #[schemars(with = "String")]
    pub message: String,
    #[serde(deserialize_with = "scalar_as_string")]
    #[schemars(with = "String")]
    pub version: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            name: "python".to_string(),
            message: "Hello from Python Application!".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Flag(bool),
}

/// Floats keep their fractional part (`2.0` stays `"2.0"`). Trailing zeros
/// beyond the first are lost (`2.10` becomes `"2.1"`); quote such values.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => format!("{:?}", n),
        Scalar::Flag(b) => b.to_string(),
    })
}
