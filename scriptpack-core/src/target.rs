//! Packaging targets and the built-in target table.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// One packaging configuration: which sources to bundle, in which order, and
/// where the two generated artifacts go.
///
/// Output names default to `<name>_script.js` / `<name>_script.h` and the
/// embedded C identifier to `<name>_script`, which is the shape the host
/// build includes. Input order is semantically significant: it is the
/// concatenation order, and therefore the evaluation order of the bundled
/// script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackTarget {
    name: String,
    inputs: Vec<String>,
    script_file: String,
    header_file: String,
}

impl PackTarget {
    /// Create a target with output names derived from `name`.
    pub fn new<I, S>(name: &str, inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            inputs: inputs.into_iter().map(Into::into).collect(),
            script_file: format!("{name}_script.js"),
            header_file: format!("{name}_script.h"),
        }
    }

    /// Override the script output name.
    pub fn with_script_file(mut self, file: impl Into<String>) -> Self {
        self.script_file = file.into();
        self
    }

    /// Override the header output name.
    pub fn with_header_file(mut self, file: impl Into<String>) -> Self {
        self.header_file = file.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn script_file(&self) -> &str {
        &self.script_file
    }

    pub fn header_file(&self) -> &str {
        &self.header_file
    }

    /// Identifier of the generated C array.
    pub fn array_name(&self) -> String {
        format!("{}_script", self.name)
    }
}

/// The hardcoded packaging table: one entry per tool shipped by the host
/// build. Beautifiers bundle two sources; linters and minifiers carry an
/// extra `Settings.js` between the tool and the command-line driver.
pub fn builtin_targets() -> Vec<PackTarget> {
    vec![
        PackTarget::new("cssbeautify", ["cssbeautify.js", "CommandLine.js"]),
        PackTarget::new("cssmin", ["cssmin.js", "CommandLine.js"]),
        PackTarget::new("jsbeautify", ["beautify.js", "CommandLine.js"]),
        PackTarget::new("jshint", ["jshint.js", "Settings.js", "CommandLine.js"]),
        PackTarget::new("jslint", ["jslint.js", "Settings.js", "CommandLine.js"]),
        PackTarget::new("jsmin", ["jsmin.js", "Settings.js", "CommandLine.js"]),
    ]
}

/// Resolve target names against the built-in table, preserving the order
/// given. An empty selection means every built-in target.
pub fn select_targets(names: &[String]) -> Result<Vec<PackTarget>> {
    let table = builtin_targets();
    if names.is_empty() {
        return Ok(table);
    }

    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        let found = table
            .iter()
            .find(|target| target.name() == name)
            .cloned()
            .ok_or_else(|| {
                let known: Vec<&str> = table.iter().map(PackTarget::name).collect();
                anyhow!("unknown target: {name} (known targets: {})", known.join(", "))
            })?;
        selected.push(found);
    }

    Ok(selected)
}
