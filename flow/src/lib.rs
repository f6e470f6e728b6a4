//! Xilinx ISE build flow.
//!
//! Renders per-signal physical constraints to a UCF file, generates
//! synthesis input for one of several interchangeable backends (XST,
//! yosys, precompiled EDIF, or an external flow), and drives the fixed
//! ngdbuild → map → par → bitgen pipeline through a generated,
//! host-appropriate build script.

pub mod build;
pub mod constraint;
pub mod exec;
pub mod platform;
pub mod script;
pub mod template;
pub mod ucf;
pub mod xst;
pub mod yosys;

pub use build::{BuildConfig, IseToolchain, SynthMode};
pub use constraint::{Constraint, NamedSignalConstraint, ResourceName, SignalNames};
pub use exec::{Runner, SystemRunner, ToolError};
pub use platform::{BuildSource, EmittedDesign, Platform};
