use crate::terminal::Terminal;
use anyhow::Result;
use powershift::Catalog;

pub fn handle_command(terminal: &Terminal) -> Result<()> {
    for version in Catalog::builtin().versions() {
        terminal.println(version);
    }

    Ok(())
}
