use crate::areas::repository::Repository;
use crate::artifacts::core::color_enabled;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let current_branch = self.refs().current_branch()?;
        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        let marked = format!("*{}", current_branch);
        if color_enabled() {
            writeln!(writer, "{}", marked.green())?;
        } else {
            writeln!(writer, "{}", marked)?;
        }
        for branch in self.refs().list_branches()? {
            if branch != current_branch {
                writeln!(writer, "{}", branch)?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for name in index.staged().keys() {
            writeln!(writer, "{}", name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for name in index.removed() {
            writeln!(writer, "{}", name)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        writeln!(writer)?;

        Ok(())
    }
}
