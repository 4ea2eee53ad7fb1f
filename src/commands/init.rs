use crate::{
    InitArgs,
    config::{CONFIG_FILE, ProjectConfig, resolve_project_path},
};

const EXAMPLE_INDEX: &str = "<!doctype html>
<html>
  <head>
    <meta charset=\"utf-8\">
    <title>{{ \"Home\" }}</title>
  </head>
  <body>
    <h1>It works!</h1>
  </body>
</html>
";

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = resolve_project_path(args.path.as_deref())?;

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(anyhow::anyhow!(
            "{config_file} already exists",
            config_file = config_path.display()
        ));
    }

    let default_config = ProjectConfig {
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        ..ProjectConfig::default()
    };

    println!("Initializing project in {}", path.display());

    let config_text = toml::to_string(&default_config)?;
    tokio::fs::write(&config_path, config_text).await?;

    println!(
        "Created config file {config_file}",
        config_file = config_path.display()
    );

    let index_path = path.join(&default_config.input).join("+page.html");
    if !index_path.exists() {
        if let Some(parent) = index_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&index_path, EXAMPLE_INDEX).await?;
        println!("Created example page {}", index_path.display());
    }

    Ok(())
}
