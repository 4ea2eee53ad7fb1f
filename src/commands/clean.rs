use std::path::{Path, PathBuf};

use crate::{CleanArgs, config::ProjectSettings};

pub async fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let settings = ProjectSettings::load_from_arg(args.path.as_deref())?;

    // Delete the generated site folder
    let site_path = settings.output_dir();
    if !site_path.exists() {
        println!("Nothing to clean at {}", site_path.display());
        return Ok(());
    }

    let site_path = checked_output_dir(&site_path, &settings)?;

    if args.dry_run {
        println!("Would delete {}", site_path.display());
    } else {
        tokio::fs::remove_dir_all(&site_path).await?;
        println!("Deleted {}", site_path.display());
    }

    Ok(())
}

/// Canonicalize the output directory and refuse it if deleting it would
/// take the project root or the input tree along.
fn checked_output_dir(
    site_path: &Path,
    settings: &ProjectSettings,
) -> Result<PathBuf, anyhow::Error> {
    let site = site_path.canonicalize()?;
    let project = canonical_or_self(&settings.project_path);
    let input = canonical_or_self(&settings.input_dir());

    if project.starts_with(&site) || input.starts_with(&site) {
        return Err(anyhow::anyhow!(
            "refusing to delete {}: it contains the project or input directory",
            site.display()
        ));
    }

    Ok(site)
}

fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
