use citymask::MapConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        eprintln!("Usage: {} [config.json]", args[0]);
        eprintln!("Composes a city map document and prints it as JSON.");
        eprintln!("Without a config file, the built-in Vienna dataset is used.");
        return Ok(());
    }

    let config = match args.get(1) {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::builtin(),
    };

    let document = citymask::compose(config).await?;
    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(())
}
