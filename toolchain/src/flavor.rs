//! Host script conventions, resolved in one place so the script
//! generators never branch on the platform themselves.

pub struct ScriptFlavor {
    /// Argv prefix used to execute a generated script.
    pub shell: &'static [&'static str],
    pub script_ext: &'static str,
    /// Statement prefix that sources an environment settings file.
    pub source_cmd: &'static str,
    pub comment: &'static str,
    pub header: &'static str,
}

pub static UNIX: ScriptFlavor = ScriptFlavor {
    shell: &["bash"],
    script_ext: ".sh",
    source_cmd: "source ",
    comment: "# ",
    header: "# Autogenerated by ise-flow\nset -e\n",
};

pub static WINDOWS: ScriptFlavor = ScriptFlavor {
    shell: &["cmd", "/c"],
    script_ext: ".bat",
    source_cmd: "call ",
    comment: "rem ",
    header: "@echo off\nrem Autogenerated by ise-flow\n",
};

pub fn host_flavor() -> &'static ScriptFlavor {
    if cfg!(windows) { &WINDOWS } else { &UNIX }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn host_flavor_is_shell() {
        let flavor = host_flavor();
        assert_eq!(flavor.script_ext, ".sh");
        assert_eq!(flavor.shell, ["bash"]);
        assert_eq!(flavor.source_cmd, "source ");
    }

    #[test]
    fn batch_flavor_sources_via_call() {
        assert_eq!(WINDOWS.source_cmd, "call ");
        assert_eq!(WINDOWS.shell, ["cmd", "/c"]);
        assert!(WINDOWS.header.starts_with("@echo off"));
    }
}
