//! Pipeline build script: one host-flavored script sequencing the
//! fixed ngdbuild → map → par → bitgen tail, optionally preceded by
//! settings sourcing and an xst invocation.

use crate::exec::Runner;
use crate::template::{render, TemplateError};
use ise_flow_toolchain::ScriptFlavor;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Netlist format feeding the pipeline tail. `Ngc` means the pipeline
/// script must run xst itself; `Edif` means the netlist is already on
/// disk when the script starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetlistFormat {
    Ngc,
    Edif,
}

impl NetlistFormat {
    pub fn ext(self) -> &'static str {
        match self {
            NetlistFormat::Ngc => "ngc",
            NetlistFormat::Edif => "edif",
        }
    }
}

/// Option strings substituted into the fixed stage lines.
pub struct StageOptions<'a> {
    pub ngdbuild_opt: &'a str,
    pub map_opt: &'a str,
    pub par_opt: &'a str,
    pub bitgen_opt: &'a str,
    /// Trailing commands appended after bitgen. Allowed template key:
    /// `build_name`.
    pub ise_commands: &'a str,
}

// Keys: build_name, ext, ngdbuild_opt, map_opt, par_opt, bitgen_opt.
const PIPELINE_TEMPLATE: &str = "
ngdbuild {ngdbuild_opt} -uc {build_name}.ucf {build_name}.{ext} {build_name}.ngd
map {map_opt} -o {build_name}_map.ncd {build_name}.ngd {build_name}.pcf
par {par_opt} {build_name}_map.ncd {build_name}.ncd {build_name}.pcf
bitgen {bitgen_opt} {build_name}.ncd {build_name}.bit
";

pub fn build_script(
    flavor: &ScriptFlavor,
    build_name: &str,
    settings: Option<&Path>,
    netlist: NetlistFormat,
    opt: &StageOptions<'_>,
) -> Result<String, TemplateError> {
    let mut script = String::from(flavor.header);
    if let Some(settings) = settings {
        script.push_str(&format!(
            "{}{}\n",
            flavor.source_cmd,
            settings.display()
        ));
    }
    if netlist == NetlistFormat::Ngc {
        script.push_str(&render(
            "\nxst -ifn {build_name}.xst\n",
            &[("build_name", build_name)],
        )?);
    }
    script.push_str(&render(
        PIPELINE_TEMPLATE,
        &[
            ("build_name", build_name),
            ("ext", netlist.ext()),
            ("ngdbuild_opt", opt.ngdbuild_opt),
            ("map_opt", opt.map_opt),
            ("par_opt", opt.par_opt),
            ("bitgen_opt", opt.bitgen_opt),
        ],
    )?);
    script.push_str(&render(opt.ise_commands, &[("build_name", build_name)])?);
    Ok(script)
}

/// Writes `build_<name>.<ext>` into the current directory and returns
/// its file name.
pub fn write_build_script(
    flavor: &ScriptFlavor,
    build_name: &str,
    settings: Option<&Path>,
    netlist: NetlistFormat,
    opt: &StageOptions<'_>,
) -> Result<String, Box<dyn Error>> {
    let script_file = format!("build_{build_name}{}", flavor.script_ext);
    fs::write(
        &script_file,
        build_script(flavor, build_name, settings, netlist, opt)?,
    )?;
    Ok(script_file)
}

/// Runs a previously written build script through the flavor's shell.
pub fn run_build_script(
    runner: &mut dyn Runner,
    flavor: &ScriptFlavor,
    script_file: &str,
) -> Result<(), Box<dyn Error>> {
    let mut argv: Vec<String> = flavor.shell.iter().map(|s| s.to_string()).collect();
    argv.push(script_file.to_string());
    println!("running {script_file}");
    runner.run("ise", &argv)
}
