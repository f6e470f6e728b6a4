use serde::Deserialize;
use simple_error::bail;
use std::collections::HashMap;
use std::error::Error;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use std::process::Command;
use which::which_in;

pub mod flavor;

pub use flavor::{host_flavor, ScriptFlavor};

/// Description of an ISE installation: where it lives, which version
/// to use, and any environment overrides for invoked tools.
#[derive(Debug, Clone, Deserialize)]
pub struct Toolchain {
    #[serde(default = "Toolchain::host_default_path")]
    pub path: PathBuf,
    /// Version directory under `path`; the newest one is picked when
    /// unset.
    #[serde(default)]
    pub ver: Option<String>,
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Toolchain {
            path: Self::host_default_path(),
            ver: None,
            env: HashMap::new(),
        }
    }
}

impl Toolchain {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let s = read_to_string(path)?;
        Ok(toml::from_str(&s)?)
    }

    /// Toolchain at the conventional install location for this host.
    pub fn detect() -> Self {
        Self::default()
    }

    fn host_default_path() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from("C:\\Xilinx")
        } else {
            PathBuf::from("/opt/Xilinx")
        }
    }

    pub fn command(&self, cmd: &str) -> Command {
        let mut res: Command;
        if let Some(path) = self.env.get("PATH") {
            match which_in(cmd, Some(path), "/") {
                Ok(rcmd) => res = Command::new(rcmd),
                Err(_) => res = Command::new(cmd),
            }
        } else {
            res = Command::new(cmd);
        }
        for (k, v) in self.env.iter() {
            res.env(k, v);
        }
        res
    }

    /// Locates the `settings*` environment script for this install,
    /// to be sourced at the top of generated build scripts. Probes the
    /// 64-bit variant first (reversed on 32-bit hosts).
    pub fn settings_script(&self, flavor: &ScriptFlavor) -> Result<PathBuf, Box<dyn Error>> {
        let ver = match &self.ver {
            Some(ver) => ver.clone(),
            None => self.newest_version()?,
        };
        let base = self.path.join(ver).join("ISE_DS");
        let mut bits = ["64", "32"];
        if cfg!(target_pointer_width = "32") {
            bits.reverse();
        }
        for b in bits {
            let candidate = base.join(format!("settings{b}{}", flavor.script_ext));
            if candidate.exists() {
                return Ok(candidate);
            }
        }
        bail!("no ISE settings script under {}", base.display())
    }

    /// Newest version directory under the install path, by numeric
    /// directory name.
    fn newest_version(&self) -> Result<String, Box<dyn Error>> {
        let mut best: Option<(f64, String)> = None;
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Ok(v) = name.parse::<f64>() {
                if best.as_ref().is_none_or(|(bv, _)| v > *bv) {
                    best = Some((v, name));
                }
            }
        }
        match best {
            Some((_, name)) => Ok(name),
            None => bail!("no ISE version directory under {}", self.path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, write};

    #[test]
    fn from_file_parses_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("toolchain.toml");
        write(&cfg, "path = \"/srv/ise\"\nver = \"14.7\"\n\n[env]\nLANG = \"C\"\n").unwrap();
        let tc = Toolchain::from_file(&cfg).unwrap();
        assert_eq!(tc.path, PathBuf::from("/srv/ise"));
        assert_eq!(tc.ver.as_deref(), Some("14.7"));
        assert_eq!(tc.env["LANG"], "C");
    }

    #[test]
    fn settings_script_picks_newest_version() {
        let dir = tempfile::tempdir().unwrap();
        for ver in ["13.3", "14.7"] {
            create_dir_all(dir.path().join(ver).join("ISE_DS")).unwrap();
        }
        let expected = dir.path().join("14.7/ISE_DS/settings64.sh");
        write(&expected, "").unwrap();
        write(dir.path().join("13.3/ISE_DS/settings64.sh"), "").unwrap();
        let tc = Toolchain {
            path: dir.path().to_path_buf(),
            ..Toolchain::default()
        };
        assert_eq!(tc.settings_script(&flavor::UNIX).unwrap(), expected);
    }

    #[test]
    fn settings_script_honors_explicit_version() {
        let dir = tempfile::tempdir().unwrap();
        create_dir_all(dir.path().join("13.3/ISE_DS")).unwrap();
        create_dir_all(dir.path().join("14.7/ISE_DS")).unwrap();
        write(dir.path().join("13.3/ISE_DS/settings32.sh"), "").unwrap();
        write(dir.path().join("14.7/ISE_DS/settings64.sh"), "").unwrap();
        let tc = Toolchain {
            path: dir.path().to_path_buf(),
            ver: Some("13.3".to_string()),
            ..Toolchain::default()
        };
        let found = tc.settings_script(&flavor::UNIX).unwrap();
        assert_eq!(found, dir.path().join("13.3/ISE_DS/settings32.sh"));
    }

    #[test]
    fn settings_script_missing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        create_dir_all(dir.path().join("14.7/ISE_DS")).unwrap();
        let tc = Toolchain {
            path: dir.path().to_path_buf(),
            ..Toolchain::default()
        };
        assert!(tc.settings_script(&flavor::UNIX).is_err());
    }

    #[test]
    fn command_applies_env() {
        let mut tc = Toolchain::default();
        tc.env.insert("XIL_TEST".to_string(), "1".to_string());
        let cmd = tc.command("xst");
        assert_eq!(cmd.get_program(), "xst");
        assert!(cmd
            .get_envs()
            .any(|(k, v)| k == "XIL_TEST" && v == Some("1".as_ref())));
    }
}
