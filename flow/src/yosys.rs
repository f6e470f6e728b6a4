//! Yosys synthesis backend. Unlike the XST path, this one both writes
//! its script and runs the tool, leaving `<name>.edif` behind for the
//! pipeline tail.

use crate::exec::Runner;
use crate::platform::BuildSource;
use std::error::Error;
use std::fs;

/// Yosys script: read each source with include flags, run the fixed
/// hierarchy/proc/memory/opt/fsm pass list, then synthesize for the
/// Xilinx family into an EDIF netlist.
pub fn ys_contents(sources: &[BuildSource], include_paths: &[String], build_name: &str) -> String {
    let mut incflags = String::new();
    for path in include_paths {
        incflags.push_str(&format!(" -I{path}"));
    }
    let mut ys = String::new();
    for src in sources {
        ys.push_str(&format!("read_{}{incflags} {}\n", src.language, src.filename));
    }
    ys.push_str("hierarchy -check -top top\n");
    ys.push_str("proc; memory; opt; fsm; opt\n");
    ys.push_str(&format!("synth_xilinx -top top -edif {build_name}.edif"));
    ys
}

/// Writes `<name>.ys` into the current directory and runs yosys on it.
pub fn run_yosys(
    runner: &mut dyn Runner,
    sources: &[BuildSource],
    include_paths: &[String],
    build_name: &str,
) -> Result<(), Box<dyn Error>> {
    let ys_name = format!("{build_name}.ys");
    fs::write(&ys_name, ys_contents(sources, include_paths, build_name))?;
    println!("running yosys");
    runner.run("yosys", &["yosys".to_string(), ys_name])
}
