//! Collaborator surface: what the flow needs from a board/part
//! description and from the design emission step.

use crate::constraint::{NamedSignalConstraint, SignalNames};
use simple_error::bail;
use std::error::Error;

/// One synthesizable input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSource {
    pub filename: String,
    pub language: String,
    pub library: String,
}

impl BuildSource {
    pub fn new(
        filename: impl Into<String>,
        language: impl Into<String>,
        library: impl Into<String>,
    ) -> Self {
        BuildSource {
            filename: filename.into(),
            language: language.into(),
            library: library.into(),
        }
    }
}

/// Output of emitting a design: the rendered source text plus the
/// name-resolution table for its signals.
#[derive(Debug, Clone)]
pub struct EmittedDesign {
    pub text: String,
    pub names: SignalNames,
}

/// The board/part abstraction the flow builds against.
pub trait Platform {
    type Design;

    /// Target device identifier, e.g. `xc7a35t`.
    fn device(&self) -> &str;

    /// Extra synthesizable sources declared by the platform, in the
    /// order they should appear in the synthesis manifest.
    fn sources(&self) -> Vec<BuildSource>;

    /// Verilog include search paths.
    fn include_paths(&self) -> Vec<String>;

    /// Last chance to attach platform logic to the design before
    /// emission.
    fn finalize(&mut self, _design: &mut Self::Design) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    /// Renders the design to verilog.
    fn emit_verilog(&self, design: &Self::Design) -> Result<EmittedDesign, Box<dyn Error>>;

    /// Renders the design to an EDIF netlist.
    fn emit_netlist(&self, _design: &Self::Design) -> Result<EmittedDesign, Box<dyn Error>> {
        bail!("platform has no netlist writer")
    }

    /// Resolves the platform's pin declarations against the emitted
    /// net names, returning the signal constraints and the rendered
    /// platform command blocks for the constraint file.
    fn resolve_signals(&self, names: &SignalNames) -> (Vec<NamedSignalConstraint>, Vec<String>);

    /// Appends a rendered command block to the constraint file.
    fn add_platform_command(&mut self, command: String);

    /// Hook for a user-supplied synthesis flow that runs before the
    /// ISE pipeline (`SynthMode::External`).
    fn external_synthesize(&self, _design: &Self::Design) -> Result<(), Box<dyn Error>> {
        bail!("platform has no external synthesis flow")
    }
}
