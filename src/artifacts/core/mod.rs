//! Output plumbing shared by the commands
//!
//! Long listings (`log`, `global-log`) are shown through the `minus` pager when stdout is
//! an interactive terminal, and colors are only used on terminals.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable disabling the pager
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this wrapper adapts
/// it to be handed to a repository as its writer.
///
/// ## Usage
///
/// ```ignore
/// let pager = Pager::new();
/// let writer = PagerWriter::new(pager.clone());
/// let mut repository = Repository::new(".", Box::new(writer))?;
/// repository.log().await?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Whether paged output should be used: stdout is a terminal and `NO_PAGER` is unset
pub fn pager_enabled() -> bool {
    std::env::var_os(NO_PAGER_ENV).is_none() && io::stdout().is_terminal()
}

/// Whether colored output should be used
pub fn color_enabled() -> bool {
    io::stdout().is_terminal()
}
