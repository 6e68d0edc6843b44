use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SourceSection {
    pub account: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DestinationSection {
    pub url: String,
    pub owner: String,
    #[serde(default)]
    pub token: Option<String>,
}
