use anyhow::Result;
use powershift::oc::Oc;
use tracing::info;

pub async fn handle_command(oc: &Oc) -> Result<()> {
    let url = oc.server_url().await?;

    if open::that(url.as_str()).is_err() {
        info!(
            "Unable to open browser, open the following URL in your browser: {}",
            url.as_str()
        );
    }

    Ok(())
}
