//! Console-backed value provider.

use std::io::{self, IsTerminal, Write};

use depot_core::{Error, Result, ValueKind, ValueProvider};

/// Supplies version/branch/auth-code values, preferring values passed on
/// the command line and falling back to interactive prompts.
pub struct ConsoleProvider {
  version: Option<String>,
  branch: Option<String>,
  auth_code: Option<String>,
}

impl ConsoleProvider {
  pub fn new(version: Option<String>, branch: Option<String>, auth_code: Option<String>) -> Self {
    Self {
      version,
      branch,
      auth_code,
    }
  }
}

impl ValueProvider for ConsoleProvider {
  fn supply(&mut self, kind: ValueKind) -> Result<String> {
    let (preset, name, label) = match kind {
      ValueKind::Version => (
        self.version.take(),
        "the version",
        "Enter a version number for the client",
      ),
      ValueKind::Branch => (
        self.branch.take(),
        "the branch",
        "Enter which branch we are building",
      ),
      ValueKind::AuthCode => (
        self.auth_code.take(),
        "the auth code",
        "Enter the distribution two-factor code",
      ),
    };

    if let Some(value) = preset {
      return Ok(value);
    }
    prompt(name, label, kind)
  }
}

fn prompt(name: &str, label: &str, kind: ValueKind) -> Result<String> {
  if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
    return Err(Error::NonInteractive(name.to_string()));
  }

  loop {
    write!(io::stderr(), "{}: ", label)?;
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let value = input.trim().to_string();

    if !value.is_empty() || kind == ValueKind::AuthCode {
      return Ok(value);
    }
  }
}
