//! XST synthesis input: the project manifest and the run-script. Both
//! are only generated here; the pipeline script runs xst itself.

use crate::platform::BuildSource;
use std::fs;
use std::io;

/// Project manifest, one source per line. Order is preserved exactly:
/// within a library, later entries shadow earlier module definitions.
pub fn prj_contents(sources: &[BuildSource]) -> String {
    let mut prj = String::new();
    for src in sources {
        prj.push_str(&format!(
            "{} {} {}\n",
            src.language, src.library, src.filename
        ));
    }
    prj
}

/// XST run-script: the `run` directive with the manifest reference,
/// fixed top module `top`, the option block, the output NGC name, the
/// target device, and one include directive per search path.
pub fn xst_contents(
    device: &str,
    include_paths: &[String],
    build_name: &str,
    xst_opt: &str,
) -> String {
    let mut xst = format!(
        "run\n-ifn {build_name}.prj\n-top top\n{xst_opt}\n-ofn {build_name}.ngc\n-p {device}\n"
    );
    for path in include_paths {
        xst.push_str(&format!("-vlgincdir {path}\n"));
    }
    xst
}

/// Writes `<name>.prj` and `<name>.xst` into the current directory.
pub fn write_xst_input(
    device: &str,
    sources: &[BuildSource],
    include_paths: &[String],
    build_name: &str,
    xst_opt: &str,
) -> io::Result<()> {
    fs::write(format!("{build_name}.prj"), prj_contents(sources))?;
    fs::write(
        format!("{build_name}.xst"),
        xst_contents(device, include_paths, build_name, xst_opt),
    )?;
    Ok(())
}
