//! Shared helpers for binary specs.

use assert_cmd::assert::Assert;
use assert_cmd::Command;

/// Command for the `rqe` binary with a hermetic environment: no color,
/// no ambient CA configuration.
pub fn rqe() -> Command {
    let mut cmd = Command::cargo_bin("rqe").expect("rqe binary should be built");
    cmd.env_remove("RQE_CA_CERT");
    cmd.env_remove("RQE_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("COLOR");
    cmd
}

pub trait AssertExt {
    fn stdout_has(self, needle: &str) -> Self;
    fn stderr_has(self, needle: &str) -> Self;
}

impl AssertExt for Assert {
    fn stdout_has(self, needle: &str) -> Self {
        let out = String::from_utf8_lossy(&self.get_output().stdout).to_string();
        assert!(out.contains(needle), "stdout missing {needle:?}:\n{out}");
        self
    }

    fn stderr_has(self, needle: &str) -> Self {
        let err = String::from_utf8_lossy(&self.get_output().stderr).to_string();
        assert!(err.contains(needle), "stderr missing {needle:?}:\n{err}");
        self
    }
}
