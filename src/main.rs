mod presets;
mod selector;
mod settings;

use crate::selector::{AspectSelector, Reply, SelectorError, SelectorMessage};
use crate::settings::SavedSettings;
use anyhow::{Context, Result};
use log::{error, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    let mut selector = AspectSelector::new(SavedSettings::load_settings()).await;
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read command from stdin")?
    {
        let message = match line.parse::<SelectorMessage>() {
            Ok(message) => message,
            Err(SelectorError::Empty) => continue,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        match selector.update(message).await {
            Ok(Reply::Exit) => break,
            Ok(reply) => {
                stdout
                    .write_all(format!("{}\n", reply).as_bytes())
                    .await
                    .context("Failed to write reply")?;
                stdout.flush().await.context("Failed to flush stdout")?;
            }
            Err(e) => error!("{:?}", e),
        }
    }
    Ok(())
}
