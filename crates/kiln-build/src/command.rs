//! Compile command assembly.
//!
//! A manifest renders into one single-line compiler invocation: the entry
//! file, each program, each module, then the output flag. Token order
//! follows manifest order exactly.

use crate::config::BuildSpec;

/// An assembled compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileCommand {
    text: String,
}

impl CompileCommand {
    /// Assemble the invocation for a build spec.
    ///
    /// Every source token carries a trailing separator, so the rendered
    /// text holds two spaces between the last source and `-o`.
    pub fn from_spec(spec: &BuildSpec) -> Self {
        let mut command = String::new();

        command.push_str(&spec.main);
        command.push(' ');
        for path in &spec.programs {
            command.push_str(path);
            command.push(' ');
        }
        for path in &spec.modules {
            command.push_str(path);
            command.push(' ');
        }

        let text = format!("{} -o {}", command, spec.output);
        Self { text }
    }

    /// The full command line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render the script artifact: interpreter directive, blank line, then
    /// the command as the sole executable line.
    pub fn script_text(&self) -> String {
        format!("#!/bin/bash\n\n{}", self.text)
    }
}

impl std::fmt::Display for CompileCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
