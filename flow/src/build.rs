//! Top-level build orchestration.

use crate::constraint::SignalNames;
use crate::exec::{BuildDir, Runner, SystemRunner};
use crate::platform::{BuildSource, Platform};
use crate::script::{self, NetlistFormat, StageOptions};
use crate::template::{render, TemplateError};
use crate::{ucf, xst, yosys};
use ise_flow_toolchain::{host_flavor, Toolchain};
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Synthesis backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthMode {
    /// Native XST synthesis; the pipeline script runs xst itself.
    #[default]
    Xst,
    /// Yosys runs before the pipeline script and leaves an EDIF
    /// netlist behind.
    Yosys,
    /// A precompiled EDIF netlist emitted straight from the design.
    Edif,
    /// A user-supplied synthesis flow runs first, then the EDIF path.
    External,
}

/// Parameters for one build invocation.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub build_dir: PathBuf,
    pub build_name: String,
    /// ISE install description; detected from the host when unset.
    pub toolchain: Option<Toolchain>,
    /// Whether the script sources the ISE settings file; defaults to
    /// true everywhere but windows.
    pub source: Option<bool>,
    /// Execute the pipeline script after generating it.
    pub run: bool,
    pub mode: SynthMode,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            build_dir: PathBuf::from("build"),
            build_name: "top".to_string(),
            toolchain: None,
            source: None,
            run: true,
            mode: SynthMode::Xst,
        }
    }
}

/// Per-stage ISE option strings, substituted verbatim into the
/// generated scripts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IseToolchain {
    pub xst_opt: String,
    pub ngdbuild_opt: String,
    pub map_opt: String,
    pub par_opt: String,
    pub bitgen_opt: String,
    /// Extra commands appended after bitgen. Allowed template key:
    /// `build_name`.
    pub ise_commands: String,
}

impl Default for IseToolchain {
    fn default() -> Self {
        IseToolchain {
            xst_opt: "-ifmt MIXED\n-use_new_parser yes\n-opt_mode SPEED\n-register_balancing yes"
                .to_string(),
            ngdbuild_opt: String::new(),
            map_opt: "-ol high -w".to_string(),
            par_opt: "-ol high -w".to_string(),
            bitgen_opt: "-g Binary:Yes -w".to_string(),
            ise_commands: String::new(),
        }
    }
}

impl IseToolchain {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    pub fn build<P: Platform>(
        &self,
        platform: &mut P,
        design: P::Design,
        cfg: &BuildConfig,
    ) -> Result<Option<SignalNames>, Box<dyn Error>> {
        self.build_with_runner(platform, design, cfg, &mut SystemRunner)
    }

    /// Runs one full build: emit the design, generate backend input,
    /// write the constraint file and pipeline script, and (unless
    /// disabled) execute the pipeline. Any external tool failure
    /// aborts the remaining stages; the caller's working directory is
    /// restored on every exit path. Returns the name-resolution table
    /// of the emitted design.
    pub fn build_with_runner<P: Platform>(
        &self,
        platform: &mut P,
        mut design: P::Design,
        cfg: &BuildConfig,
        runner: &mut dyn Runner,
    ) -> Result<Option<SignalNames>, Box<dyn Error>> {
        let toolchain = match &cfg.toolchain {
            Some(tc) => tc.clone(),
            None => Toolchain::detect(),
        };
        let source = cfg.source.unwrap_or(cfg!(not(windows)));
        let flavor = host_flavor();
        let build_name = cfg.build_name.as_str();
        let mut ngdbuild_opt = self.ngdbuild_opt.clone();

        platform.finalize(&mut design)?;

        let _dir = BuildDir::enter(&cfg.build_dir)?;

        let mut names = None;
        let mut resolved = None;
        let mut netlist = NetlistFormat::Edif;
        if matches!(cfg.mode, SynthMode::Xst | SynthMode::Yosys) {
            let output = platform.emit_verilog(&design)?;
            resolved = Some(platform.resolve_signals(&output.names));
            let v_file = format!("{build_name}.v");
            fs::write(&v_file, &output.text)?;
            let mut sources = platform.sources();
            if !sources.iter().any(|s| s.filename == v_file) {
                sources.push(BuildSource::new(v_file, "verilog", "work"));
            }
            let include_paths = platform.include_paths();
            if cfg.mode == SynthMode::Xst {
                xst::write_xst_input(
                    platform.device(),
                    &sources,
                    &include_paths,
                    build_name,
                    &self.xst_opt,
                )?;
                netlist = NetlistFormat::Ngc;
            } else {
                yosys::run_yosys(runner, &sources, &include_paths, build_name)?;
                // The yosys netlist carries no device information, so
                // ngdbuild needs the part spelled out.
                if !ngdbuild_opt.is_empty() {
                    ngdbuild_opt.push(' ');
                }
                ngdbuild_opt.push_str(&format!("-p {}", platform.device()));
            }
            names = Some(output.names);
        }
        if cfg.mode == SynthMode::External {
            platform.external_synthesize(&design)?;
        }
        if matches!(cfg.mode, SynthMode::Edif | SynthMode::External) {
            let output = platform.emit_netlist(&design)?;
            resolved = Some(platform.resolve_signals(&output.names));
            fs::write(format!("{build_name}.edif"), &output.text)?;
            names = Some(output.names);
        }

        let (named_sc, named_pc) = resolved.unwrap_or_default();
        fs::write(
            format!("{build_name}.ucf"),
            ucf::build_ucf(&named_sc, &named_pc),
        )?;

        let settings = if source {
            Some(toolchain.settings_script(flavor)?)
        } else {
            None
        };
        let opt = StageOptions {
            ngdbuild_opt: &ngdbuild_opt,
            map_opt: &self.map_opt,
            par_opt: &self.par_opt,
            bitgen_opt: &self.bitgen_opt,
            ise_commands: &self.ise_commands,
        };
        let script_file =
            script::write_build_script(flavor, build_name, settings.as_deref(), netlist, &opt)?;
        if cfg.run {
            script::run_build_script(runner, flavor, &script_file)?;
        }

        Ok(names)
    }

    /// Emits a period constraint for a clock net. ISE cannot trace a
    /// period through DCM/PLL objects unless the timing group is bound
    /// directly to the net, so the period gets its own TNM_NET group,
    /// separate from any other constraint groups.
    pub fn add_period_constraint<P: Platform>(
        &self,
        platform: &mut P,
        clk: &str,
        period: f64,
    ) -> Result<(), TemplateError> {
        let period = period.to_string();
        platform.add_platform_command(render(
            "\nNET \"{clk}\" TNM_NET = \"PRD{clk}\";\nTIMESPEC \"TS{clk}\" = PERIOD \"PRD{clk}\" {period} ns HIGH 50%;\n",
            &[("clk", clk), ("period", &period)],
        )?);
        Ok(())
    }

    /// Emits a false path constraint between two nets: each gets its
    /// own TNM_NET group and a cross-group TIG directive.
    pub fn add_false_path_constraint<P: Platform>(
        &self,
        platform: &mut P,
        from: &str,
        to: &str,
    ) -> Result<(), TemplateError> {
        platform.add_platform_command(render(
            "\nNET \"{from}\" TNM_NET = \"TIG{from}\";\nNET \"{to}\" TNM_NET = \"TIG{to}\";\nTIMESPEC \"TS{from}TO{to}\" = FROM \"TIG{from}\" TO \"TIG{to}\" TIG;\n",
            &[("from", from), ("to", to)],
        )?);
        Ok(())
    }
}
