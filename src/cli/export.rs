use std::path::PathBuf;

use tabled::Table;

use crate::{config, error, info, management, success, warning};

pub async fn export(output: Option<PathBuf>) {
    let (client, token) = super::auth::login().await;
    let path = output.unwrap_or_else(config::default_library_export_path);

    info!("Exporting library...");
    let library = management::assemble_library(&client, &token).await;
    println!("{}", Table::new(library.summary()));

    if let Err(e) = library.persist(&path).await {
        error!("Failed to write Spotify library: {}", e);
    }

    if library.is_complete() {
        success!("Spotify library exported to {}", path.display());
    } else {
        warning!(
            "Spotify library exported to {} with missing parts: {}",
            path.display(),
            library.incomplete.join(", ")
        );
    }
}
