use crate::{BuildArgs, build::Builder, config::ProjectSettings};

pub async fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    let settings = ProjectSettings::load_from_arg(args.path.as_deref())?;

    let builder = Builder::new(settings);
    let result = builder.build().await?;

    println!(
        "Built site to {} ({} pages, {} written, {} skipped)",
        result.output_dir.display(),
        result.pages,
        result.written,
        result.skipped
    );

    if result.is_clean() {
        return Ok(());
    }

    println!("{} page(s) built with problems:", result.diagnostics.len());
    for diagnostic in &result.diagnostics {
        println!(
            "  - {} ({}): {}",
            diagnostic.url,
            diagnostic.source_path.display(),
            diagnostic.message
        );
    }

    if args.deny_warnings {
        return Err(anyhow::anyhow!(
            "build finished with {} page problem(s)",
            result.diagnostics.len()
        ));
    }

    Ok(())
}
