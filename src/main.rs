use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use log::{debug, error};

use repurposer::{
  Error, GenerationOutcome, GenerationRequest, Repurposer,
  RepurposerConfig,
};

/// Turn one long-form text into platform-tailored posts
#[derive(Debug, Parser)]
#[command(name = "repurposer", version)]
struct Cli
{   /// File holding the long-form content
    content_file: PathBuf
  , /// twitter, linkedin, instagram, tiktok, or all
    #[arg(default_value = "all")]
    platform: String
  , /// mock, zai, openai, or anthropic
    #[arg(default_value = "mock")]
    provider: String
  , /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>
  , /// Print results as JSON
    #[arg(long)]
    json: bool
}

#[tokio::main]
async fn main() -> ExitCode
{   env_logger::init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    match run(cli).await
    {   Ok(()) => ExitCode::SUCCESS
      , Err(e) => {
          error!("{} ({})", e, e.code());
          eprintln!("{}", e);
          ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Error>
{   let config = match &cli.config
    {   Some(path) => RepurposerConfig::from_json_file(path)?
      , None => RepurposerConfig::from_env()
    };

    let content = std::fs::read_to_string(&cli.content_file)
      .map_err(|e| {
        Error::from(
          format!("{}: {}", cli.content_file.display(), e)
        )
      })?;

    let engine = Repurposer::new(&config)?;
    let request
      = GenerationRequest::new(content, &cli.platform, cli.provider);
    let results = engine.handle(&request).await?;

    if cli.json
    {   let out = serde_json::to_string_pretty(&results)
          .map_err(|e| Error::from(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    let rule = "-".repeat(60);
    println!("\n{}", "=".repeat(60));
    for (format, outcome) in &results
    {   println!("\n### {} ###\n", format.as_str().to_uppercase());
        match outcome
        {   GenerationOutcome::Generated { text } => println!("{}", text)
          , GenerationOutcome::Failed { error } => {
              println!("Error: {}", error.message)
            }
        }
        println!("\n{}", rule);
    }
    Ok(())
}
