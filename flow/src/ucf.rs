//! UCF constraint file assembly.

use crate::constraint::{format_constraint, Constraint, NamedSignalConstraint, ResourceName};
use itertools::Itertools;

fn ucf_line(net: &str, pin: &str, others: &[Constraint], resource: &ResourceName) -> String {
    let placement = Constraint::Pins(vec![pin.to_string()]);
    let tokens = std::iter::once(&placement)
        .chain(others.iter())
        .filter_map(format_constraint)
        .join(" | ");
    format!("NET \"{net}\" {tokens}; # {resource}\n")
}

/// Builds the full UCF text. Multi-bit signals get one line per bit,
/// named `name(i)` and placed on the i-th pin; single-bit signals use
/// the bare name. Platform command blocks follow after a blank line,
/// separated by blank lines. Input order is preserved as received.
pub fn build_ucf(named_sc: &[NamedSignalConstraint], named_pc: &[String]) -> String {
    let mut ucf = String::new();
    for sc in named_sc {
        if sc.pins.len() > 1 {
            for (i, pin) in sc.pins.iter().enumerate() {
                let net = format!("{}({i})", sc.name);
                ucf.push_str(&ucf_line(&net, pin, &sc.others, &sc.resource));
            }
        } else if let Some(pin) = sc.pins.first() {
            ucf.push_str(&ucf_line(&sc.name, pin, &sc.others, &sc.resource));
        }
    }
    if !named_pc.is_empty() {
        ucf.push('\n');
        ucf.push_str(&named_pc.iter().join("\n\n"));
    }
    ucf
}
