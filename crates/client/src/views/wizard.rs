//! Provisioning wizard state.
//!
//! Steps: select plugin, fill inputs, review, submit. Required inputs are
//! checked locally against the plugin's declared inputs before anything is
//! sent, and locked plugins without access are refused up front.

use serde_json::{Map, Value};

use crate::error::{ClientError, Result};
use crate::models::{CreateDeploymentParams, Plugin, PluginInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectPlugin,
    FillInputs,
    Review,
}

/// Why the wizard cannot move on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardIssue {
    NoPlugin,
    /// The plugin is locked and the user has no access; offer an access request.
    AccessRequired { plugin_id: String },
    MissingName,
    MissingInputs(Vec<String>),
}

impl WizardIssue {
    pub fn message(&self) -> String {
        match self {
            Self::NoPlugin => "Select a plugin first".to_string(),
            Self::AccessRequired { plugin_id } => format!(
                "Plugin '{}' is locked. Request access before provisioning it",
                plugin_id
            ),
            Self::MissingName => "Deployment name is required".to_string(),
            Self::MissingInputs(names) => {
                format!("Missing required inputs: {}", names.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProvisionWizard {
    step: WizardStep,
    plugin: Option<Plugin>,
    name: String,
    version: Option<String>,
    inputs: Map<String, Value>,
}

impl Default for ProvisionWizard {
    fn default() -> Self {
        Self::new()
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(a) => a.is_empty(),
        _ => false,
    }
}

impl ProvisionWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectPlugin,
            plugin: None,
            name: String::new(),
            version: None,
            inputs: Map::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn plugin(&self) -> Option<&Plugin> {
        self.plugin.as_ref()
    }

    /// Choose the plugin. Declared defaults pre-fill the inputs.
    pub fn select_plugin(&mut self, plugin: Plugin) -> std::result::Result<(), WizardIssue> {
        if !plugin.can_provision() {
            return Err(WizardIssue::AccessRequired {
                plugin_id: plugin.id.clone(),
            });
        }
        self.inputs = plugin
            .inputs
            .iter()
            .filter_map(|input| input.default.clone().map(|d| (input.name.clone(), d)))
            .collect();
        self.version = plugin.version.clone();
        self.plugin = Some(plugin);
        self.step = WizardStep::FillInputs;
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_version(&mut self, version: Option<String>) {
        self.version = version;
    }

    pub fn set_input(&mut self, name: impl Into<String>, value: Value) {
        self.inputs.insert(name.into(), value);
    }

    pub fn inputs(&self) -> &Map<String, Value> {
        &self.inputs
    }

    /// Declared inputs of the selected plugin.
    pub fn declared_inputs(&self) -> &[PluginInput] {
        self.plugin.as_ref().map(|p| p.inputs.as_slice()).unwrap_or(&[])
    }

    /// Everything that currently blocks submission.
    pub fn issues(&self) -> Vec<WizardIssue> {
        let Some(plugin) = &self.plugin else {
            return vec![WizardIssue::NoPlugin];
        };
        let mut issues = Vec::new();
        if !plugin.can_provision() {
            issues.push(WizardIssue::AccessRequired {
                plugin_id: plugin.id.clone(),
            });
        }
        if self.name.trim().is_empty() {
            issues.push(WizardIssue::MissingName);
        }
        let missing: Vec<String> = plugin
            .inputs
            .iter()
            .filter(|input| input.required)
            .filter(|input| self.inputs.get(&input.name).is_none_or(is_blank))
            .map(|input| input.name.clone())
            .collect();
        if !missing.is_empty() {
            issues.push(WizardIssue::MissingInputs(missing));
        }
        issues
    }

    /// Move from inputs to review if nothing blocks submission.
    pub fn review(&mut self) -> std::result::Result<(), Vec<WizardIssue>> {
        let issues = self.issues();
        if !issues.is_empty() {
            return Err(issues);
        }
        self.step = WizardStep::Review;
        Ok(())
    }

    /// Return to input editing.
    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::Review => WizardStep::FillInputs,
            WizardStep::FillInputs | WizardStep::SelectPlugin => WizardStep::SelectPlugin,
        };
    }

    /// Build the create request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] listing every blocking issue.
    pub fn to_params(&self) -> Result<CreateDeploymentParams> {
        let issues = self.issues();
        if let Some(plugin) = self.plugin.as_ref().filter(|_| issues.is_empty()) {
            return Ok(CreateDeploymentParams {
                plugin_id: plugin.id.clone(),
                name: self.name.trim().to_string(),
                version: self.version.clone(),
                inputs: self.inputs.clone(),
            });
        }
        let message = issues
            .iter()
            .map(WizardIssue::message)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ClientError::Validation(message))
    }
}
