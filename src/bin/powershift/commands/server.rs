use crate::terminal::Terminal;
use anyhow::Result;
use powershift::oc::Oc;

pub async fn handle_command(oc: &Oc, terminal: &Terminal) -> Result<()> {
    let url = oc.server_url().await?;
    terminal.println(url.as_str().trim_end_matches('/'));
    Ok(())
}
