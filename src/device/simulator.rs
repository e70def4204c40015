use std::path::{Path, PathBuf};
use std::process::Command;

use super::DeviceChannel;
use crate::config::DeviceConfig;
use crate::error::{FirError, Result};
use crate::io::parse_int;

/// Device channel backed by an external command-line simulator
///
/// Each register access or sample exchange runs the simulator once. The
/// arguments come from templates in which `{addr}` and `{data}` are
/// substituted; the response is the last whitespace-separated token the
/// simulator prints on stdout.
#[derive(Debug, Clone)]
pub struct SimulatorChannel {
    program: PathBuf,
    extra_args: Vec<String>,
    read_args: Vec<String>,
    write_args: Vec<String>,
    sample_args: Vec<String>,
}

impl SimulatorChannel {
    /// Simulator at `program` with the default argument templates
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        let defaults = DeviceConfig::default();
        Self {
            program: program.as_ref().to_path_buf(),
            extra_args: defaults.extra_args,
            read_args: defaults.read_args,
            write_args: defaults.write_args,
            sample_args: defaults.sample_args,
        }
    }

    /// # Errors
    /// `FirError::Config` if no simulator program is configured.
    pub fn from_config(config: &DeviceConfig) -> Result<Self> {
        let program = config
            .simulator
            .clone()
            .ok_or_else(|| FirError::Config("no simulator program configured".to_string()))?;
        Ok(Self {
            program,
            extra_args: config.extra_args.clone(),
            read_args: config.read_args.clone(),
            write_args: config.write_args.clone(),
            sample_args: config.sample_args.clone(),
        })
    }

    fn run(&self, template: &[String], addr: Option<u32>, data: Option<&str>) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.extra_args)
            .args(render_args(template, addr, data));
        log::debug!("running: {:?}", cmd);

        let output = cmd.output().map_err(|e| {
            FirError::Device(format!("failed to run {}: {}", self.program.display(), e))
        })?;

        if !output.status.success() {
            return Err(FirError::Device(format!(
                "{:?} exited with {}: {}",
                cmd,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DeviceChannel for SimulatorChannel {
    fn read_register(&mut self, addr: u32) -> Result<u32> {
        let stdout = self.run(&self.read_args, Some(addr), None)?;
        let value = parse_response(&stdout)?;
        u32::try_from(value).map_err(|_| {
            FirError::Device(format!(
                "register {:#x} read returned {}, not a 32-bit value",
                addr, value
            ))
        })
    }

    fn write_register(&mut self, addr: u32, value: u32) -> Result<()> {
        let data = format!("{:#010X}", value);
        self.run(&self.write_args, Some(addr), Some(&data))?;
        Ok(())
    }

    fn exchange_sample(&mut self, sample: i64) -> Result<i64> {
        let data = sample.to_string();
        let stdout = self.run(&self.sample_args, None, Some(&data))?;
        parse_response(&stdout)
    }
}

/// Substitute `{addr}` (as `0x..` hex) and `{data}` into an argument template
pub fn render_args(template: &[String], addr: Option<u32>, data: Option<&str>) -> Vec<String> {
    let addr = addr.map(|a| format!("{:#X}", a)).unwrap_or_default();
    let data = data.unwrap_or_default();
    template
        .iter()
        .map(|arg| arg.replace("{addr}", &addr).replace("{data}", data))
        .collect()
}

fn parse_response(stdout: &str) -> Result<i64> {
    let token = stdout
        .split_whitespace()
        .last()
        .ok_or_else(|| FirError::Device("simulator produced no output".to_string()))?;
    parse_int(token)
        .map_err(|e| FirError::Device(format!("unexpected simulator response {:?}: {}", token, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_render_default_templates() {
        let config = DeviceConfig::default();
        assert_eq!(
            render_args(&config.read_args, Some(0x4), None),
            strings(&["cfg", "--address", "0x4"])
        );
        assert_eq!(
            render_args(&config.write_args, Some(0x0), Some("0x0000002A")),
            strings(&["cfg", "--address", "0x0", "--data", "0x0000002A"])
        );
        assert_eq!(
            render_args(&config.sample_args, None, Some("-12")),
            strings(&["sig", "--data", "-12"])
        );
    }

    #[test]
    fn test_render_embedded_placeholders() {
        let template = strings(&["--reg={addr}:{data}"]);
        assert_eq!(
            render_args(&template, Some(0x1F), Some("7")),
            strings(&["--reg=0x1F:7"])
        );
    }

    #[test]
    fn test_parse_response() {
        assert_eq!(parse_response("0x2A\n").unwrap(), 42);
        assert_eq!(parse_response("csr = 0b101\n").unwrap(), 5);
        assert!(parse_response("").is_err());
        assert!(parse_response("ok\n").is_err());
    }

    #[test]
    fn test_from_config_requires_program() {
        assert!(matches!(
            SimulatorChannel::from_config(&DeviceConfig::default()),
            Err(FirError::Config(_))
        ));
    }

    #[test]
    fn test_missing_program_is_device_error() {
        let mut channel = SimulatorChannel::new("/nonexistent/firlab/fir-sim");
        assert!(matches!(
            channel.read_register(0),
            Err(FirError::Device(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_echo_round_trip() {
        // echo prints its arguments, so the response is the last argument
        let mut channel = SimulatorChannel::new("echo");
        assert_eq!(channel.read_register(0x4).unwrap(), 4);
        assert_eq!(channel.exchange_sample(-17).unwrap(), -17);
        channel.write_register(0x0, 0xFF).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_device_error() {
        // `false` ignores its arguments and exits with status 1
        let mut channel = SimulatorChannel::new("false");
        match channel.write_register(0x0, 0x1) {
            Err(FirError::Device(message)) => {
                assert!(message.contains("exited with"), "{message}")
            }
            other => panic!("expected Device error, got {other:?}"),
        }
        assert!(matches!(
            channel.exchange_sample(3),
            Err(FirError::Device(_))
        ));
    }
}
