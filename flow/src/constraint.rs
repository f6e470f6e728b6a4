use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

/// One physical constraint attached to a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Site assignment, one pin per bit. Only the first identifier is
    /// ever emitted for a single net.
    Pins(Vec<String>),
    IoStandard(String),
    Drive(u32),
    /// Opaque vendor token, passed through verbatim.
    Misc(String),
}

/// Renders one constraint to its UCF attribute token. A `Pins` with no
/// identifiers is the one constraint with no textual effect; it yields
/// `None` and contributes nothing to the net line.
pub fn format_constraint(c: &Constraint) -> Option<String> {
    match c {
        Constraint::Pins(ids) => ids.first().map(|pin| format!("LOC={pin}")),
        Constraint::IoStandard(name) => Some(format!("IOSTANDARD={name}")),
        Constraint::Drive(strength) => Some(format!("DRIVE={strength}")),
        Constraint::Misc(text) => Some(text.clone()),
    }
}

/// Platform resource a signal was allocated from, e.g. `cmp:0.leds`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceName {
    pub kind: String,
    pub index: u32,
    pub subsignal: Option<String>,
}

impl ResourceName {
    pub fn new(kind: impl Into<String>, index: u32, subsignal: Option<&str>) -> Self {
        ResourceName {
            kind: kind.into(),
            index,
            subsignal: subsignal.map(str::to_string),
        }
    }
}

impl Display for ResourceName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.index)?;
        if let Some(sub) = &self.subsignal {
            write!(f, ".{sub}")?;
        }
        Ok(())
    }
}

/// A signal resolved to its final net name: one pin per bit, any extra
/// constraints, and the resource it was allocated from.
#[derive(Debug, Clone)]
pub struct NamedSignalConstraint {
    pub name: String,
    pub pins: Vec<String>,
    pub others: Vec<Constraint>,
    pub resource: ResourceName,
}

/// Name-resolution table mapping internal design identifiers to the
/// rendered net names used in emitted sources and constraints.
#[derive(Debug, Clone, Default)]
pub struct SignalNames {
    names: HashMap<String, String>,
}

impl SignalNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
