use section_pager_core::{ConfigError, PagerConfig};
use serde::{Deserialize, Serialize};

/// Options accepted by `mountSectionPager`, as JSON.
///
/// Everything is optional; the defaults match the markup of the landing
/// page (`.fp-section` panels, `.reveal` children, `.fp-dot` indicators).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostOptions {
    /// Element receiving wheel and touch listeners. The whole document when
    /// unset or not found.
    pub root_selector: Option<String>,
    pub section_selector: String,
    /// Resolved inside each section.
    pub reveal_selector: String,
    pub dot_selector: String,
    /// Attribute on each dot holding its section index.
    pub dot_index_attribute: String,
    pub active_class: String,
    pub reveal_active_class: String,
    pub keyboard: bool,
    /// Keep the `--vh` CSS property in sync with the inner window height.
    pub fix_viewport_height: bool,
    pub pager: PagerConfig,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            root_selector: None,
            section_selector: ".fp-section".into(),
            reveal_selector: ".reveal".into(),
            dot_selector: ".fp-dot".into(),
            dot_index_attribute: "data-index".into(),
            active_class: "active".into(),
            reveal_active_class: "reveal-active".into(),
            keyboard: true,
            fix_viewport_height: true,
            pager: PagerConfig::default(),
        }
    }
}

impl HostOptions {
    pub fn from_json(json: Option<&str>) -> Result<Self, ConfigError> {
        let options = match json.map(str::trim) {
            None | Some("") => HostOptions::default(),
            Some(text) => serde_json::from_str(text)?,
        };
        options.pager.validate()?;
        Ok(options)
    }
}
