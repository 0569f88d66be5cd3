use anyhow::{Context as _, Result};
use regex::Regex;
use std::{process::ExitStatus, sync::LazyLock, time::Duration};
use tokio::process::Command;

static LEVEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+)%\].+?\[(on|off)\]").expect("level pattern is a valid regex")
});

const CAPTURE_MARKER: &str = "cvolume";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ChannelKind {
    #[default]
    Playback,
    Capture,
}

/// Device state as reported by the mixer after a `set` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct MixerReport {
    pub(crate) channel_kind: ChannelKind,
    pub(crate) volume_percent: u32,
    pub(crate) muted: bool,
}

impl MixerReport {
    /// The last line carrying a `[N%] ... [on|off]` pair wins. A `cvolume`
    /// token anywhere marks the control as a capture one.
    pub(crate) fn parse(output: &str) -> Self {
        let mut report = Self::default();
        let mut matched = false;

        for line in output.lines() {
            if line.split_whitespace().any(|token| token == CAPTURE_MARKER) {
                report.channel_kind = ChannelKind::Capture;
            }

            let Some(captures) = LEVEL_PATTERN.captures(line) else {
                continue;
            };
            match captures[1].parse::<u32>() {
                Ok(volume) => {
                    report.volume_percent = volume;
                    report.muted = &captures[2] == "off";
                    matched = true;
                }
                Err(err) => log::warn!("ignoring volume in {line:?}: {err}"),
            }
        }

        if !matched {
            log::warn!("mixer output has no volume line, assuming 0% unmuted");
        }

        report
    }
}

#[derive(Debug, thiserror::Error)]
#[error("mixer command `set {}` failed with {status}", .args.join(" "))]
pub(crate) struct MixerCommandError {
    pub(crate) args: Vec<String>,
    pub(crate) status: ExitStatus,
}

pub(crate) trait MixerControl {
    /// Runs `set <args>` and returns its stdout.
    async fn set(&self, args: &[String]) -> Result<String>;
}

pub(crate) struct Amixer {
    program: String,
    timeout: Duration,
}

impl Amixer {
    pub(crate) fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl MixerControl for Amixer {
    async fn set(&self, args: &[String]) -> Result<String> {
        log::debug!("running {} set {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .arg("set")
            .args(args)
            .kill_on_drop(true)
            .output();
        let output = tokio::time::timeout(self.timeout, output)
            .await
            .with_context(|| format!("{} did not finish in {:?}", self.program, self.timeout))?
            .with_context(|| format!("failed to run {}", self.program))?;

        if !output.status.success() {
            log::error!("{} has exited with non-zero status code", self.program);

            let stdout = String::from_utf8_lossy(&output.stdout);
            log::error!("stdout: {stdout}");

            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!("stderr: {stderr}");

            return Err(MixerCommandError {
                args: args.to_vec(),
                status: output.status,
            }
            .into());
        }

        String::from_utf8(output.stdout).context("mixer output is not valid UTF-8")
    }
}

pub(crate) async fn adjust(mixer: &impl MixerControl, args: &[String]) -> Result<MixerReport> {
    let output = mixer.set(args).await?;
    Ok(MixerReport::parse(&output))
}
