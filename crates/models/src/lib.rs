
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Settings models
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorsHeaderPolicy {
	/// Only `Content-Type` is advertised in `Access-Control-Allow-Headers`.
	#[default]
	Narrow,
	/// `Origin, X-Requested-With, Content-Type, Accept`.
	Merged,
}

impl CorsHeaderPolicy {
	pub fn allow_headers(&self) -> &'static str {
		match self {
			CorsHeaderPolicy::Narrow => "Content-Type",
			CorsHeaderPolicy::Merged => "Origin, X-Requested-With, Content-Type, Accept",
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
	#[serde(default = "default_version")]
	pub version: String,
	#[serde(default = "default_git_repo", alias = "gitRepo")]
	pub git_repo: String,
	#[serde(default, alias = "taxPercent", deserialize_with = "deserialize_tax_percent")]
	pub tax_percent: u32,
	#[serde(default)]
	pub cors_headers: CorsHeaderPolicy,
	#[serde(default = "default_host")]
	pub host: String,
	#[serde(default = "default_port")]
	pub port: u16,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			version: default_version(),
			git_repo: default_git_repo(),
			tax_percent: 0,
			cors_headers: CorsHeaderPolicy::default(),
			host: default_host(),
			port: default_port(),
		}
	}
}

fn default_version() -> String {
	env!("CARGO_PKG_VERSION").to_string()
}

fn default_git_repo() -> String {
	"https://github.com/".to_string()
}

fn default_host() -> String {
	"127.0.0.1".to_string()
}

fn default_port() -> u16 {
	3000
}

/// Tax percentage may be written as a number (`21`) or as an integer string (`"21"`).
fn deserialize_tax_percent<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Repr {
		Number(u32),
		Text(String),
	}

	match Repr::deserialize(deserializer)? {
		Repr::Number(n) => Ok(n),
		Repr::Text(s) => parse_tax_percent(&s).map_err(serde::de::Error::custom),
	}
}

pub fn parse_tax_percent(raw: &str) -> Result<u32, String> {
	raw.trim()
		.parse::<u32>()
		.map_err(|e| format!("invalid tax percent '{}': {}", raw, e))
}

// Raw input entries
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyRate {
	#[serde(rename = "_text", default)]
	pub text: Option<String>,
}

/// Month-keyed raw payload. Keys keep the order they had in the source document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct AnnualEvolution {
	entries: Vec<(String, MonthlyRate)>,
}

impl AnnualEvolution {
	pub fn new(entries: Vec<(String, MonthlyRate)>) -> Self {
		Self { entries }
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &MonthlyRate)> {
		self.entries.iter().map(|(key, rate)| (key.as_str(), rate))
	}
}

impl TryFrom<Map<String, Value>> for AnnualEvolution {
	type Error = serde_json::Error;

	fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
		let entries = map
			.into_iter()
			.map(|(key, value)| Ok((key, serde_json::from_value(value)?)))
			.collect::<Result<Vec<_>, serde_json::Error>>()?;
		Ok(Self { entries })
	}
}

// Output models
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionRecord {
	#[serde(rename = "anio")]
	pub year: String,
	#[serde(rename = "mes")]
	pub month: String,
	#[serde(rename = "valor")]
	pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionReport {
	#[serde(rename = "fecha")]
	pub date: String,
	#[serde(rename = "meses")]
	pub months: Vec<EvolutionRecord>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_annual_evolution_keeps_key_order() {
		let raw = r#"{"mar": {"_text": "3"}, "ene": {"_text": "1"}, "feb": {"_text": "2"}}"#;
		let evolution: AnnualEvolution = serde_json::from_str(raw).unwrap();

		let keys: Vec<&str> = evolution.iter().map(|(key, _)| key).collect();
		assert_eq!(keys, vec!["mar", "ene", "feb"]);
		assert_eq!(evolution.len(), 3);
		assert!(!evolution.is_empty());
		assert!(AnnualEvolution::default().is_empty());
	}

	#[test]
	fn test_monthly_rate_without_text() {
		let evolution: AnnualEvolution = serde_json::from_str(r#"{"ene": {}}"#).unwrap();
		let (_, rate) = evolution.iter().next().unwrap();
		assert_eq!(rate.text, None);
	}

	#[test]
	fn test_annual_evolution_rejects_non_object_entry() {
		let result: Result<AnnualEvolution, _> = serde_json::from_str(r#"{"ene": "123,45"}"#);
		assert!(result.is_err());
	}

	#[test]
	fn test_settings_defaults() {
		let settings: Settings = serde_json::from_str("{}").unwrap();
		assert_eq!(settings.tax_percent, 0);
		assert_eq!(settings.cors_headers, CorsHeaderPolicy::Narrow);
		assert_eq!(settings.port, 3000);
		assert_eq!(settings.version, env!("CARGO_PKG_VERSION"));
	}

	#[test]
	fn test_settings_tax_percent_as_string_or_number() {
		let settings: Settings = serde_json::from_str(r#"{"taxPercent": "21"}"#).unwrap();
		assert_eq!(settings.tax_percent, 21);

		let settings: Settings = serde_json::from_str(r#"{"tax_percent": 30}"#).unwrap();
		assert_eq!(settings.tax_percent, 30);

		let result: Result<Settings, _> = serde_json::from_str(r#"{"tax_percent": "veinte"}"#);
		assert!(result.is_err());
	}

	#[test]
	fn test_cors_policy_headers() {
		assert_eq!(CorsHeaderPolicy::Narrow.allow_headers(), "Content-Type");
		let settings: Settings = serde_json::from_str(r#"{"cors_headers": "merged"}"#).unwrap();
		assert_eq!(
			settings.cors_headers.allow_headers(),
			"Origin, X-Requested-With, Content-Type, Accept"
		);
	}

	#[test]
	fn test_evolution_report_wire_names() {
		let report = EvolutionReport {
			date: "2024/03/05 14:07:09".to_string(),
			months: vec![EvolutionRecord {
				year: "2024".to_string(),
				month: "1".to_string(),
				value: "?".to_string(),
			}],
		};
		let json = serde_json::to_value(&report).unwrap();
		assert_eq!(json["fecha"], "2024/03/05 14:07:09");
		assert_eq!(json["meses"][0]["anio"], "2024");
		assert_eq!(json["meses"][0]["mes"], "1");
		assert_eq!(json["meses"][0]["valor"], "?");
	}
}
