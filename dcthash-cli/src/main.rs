use clap::Parser;
use dcthash::io::load_gray_image;
use dcthash::{compare_signatures, HashConfig, Hasher, ImageView, NormalizeConfig, Signature};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "dcthash CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the hash pipeline.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct HashConfigJson {
    target_width: usize,
    target_height: usize,
    crop_divisor: usize,
}

impl Default for HashConfigJson {
    fn default() -> Self {
        let cfg = HashConfig::default();
        Self {
            target_width: cfg.normalize.target_width,
            target_height: cfg.normalize.target_height,
            crop_divisor: cfg.crop_divisor,
        }
    }
}

impl From<HashConfigJson> for HashConfig {
    fn from(value: HashConfigJson) -> Self {
        HashConfig {
            normalize: NormalizeConfig {
                target_width: value.target_width,
                target_height: value.target_height,
            },
            crop_divisor: value.crop_divisor,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    image_paths: Vec<String>,
    output_path: Option<String>,
    hash: HashConfigJson,
}

#[derive(Debug, Serialize)]
struct SignatureRecord {
    path: String,
    value: f32,
    bits: String,
}

#[derive(Debug, Serialize)]
struct SimilarityRecord {
    a: String,
    b: String,
    distance: u32,
    score: f32,
}

#[derive(Debug, Serialize)]
struct Output {
    signatures: Vec<SignatureRecord>,
    similarities: Vec<SimilarityRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("dcthash=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_paths.is_empty() {
        return Err("image_paths must list at least one image".into());
    }
    if config.hash.crop_divisor == 0 {
        return Err("crop_divisor must be at least 1".into());
    }

    let hasher = Hasher::new().with_config(config.hash.into());

    let mut images = Vec::with_capacity(config.image_paths.len());
    for path in &config.image_paths {
        let image = load_gray_image(path).map_err(|err| format!("{path}: {err}"))?;
        images.push(image);
    }
    let views: Vec<ImageView<'_, u8>> = images.iter().map(|img| img.view()).collect();

    let mut signatures: Vec<Signature> = Vec::with_capacity(views.len());
    for (path, result) in config.image_paths.iter().zip(hasher.hash_batch(&views)) {
        signatures.push(result.map_err(|err| format!("{path}: {err}"))?);
    }

    let mut similarities = Vec::new();
    for i in 0..signatures.len() {
        for j in (i + 1)..signatures.len() {
            similarities.push(SimilarityRecord {
                a: config.image_paths[i].clone(),
                b: config.image_paths[j].clone(),
                distance: signatures[i].distance(signatures[j]),
                score: compare_signatures(signatures[i], signatures[j]),
            });
        }
    }

    let signatures = config
        .image_paths
        .iter()
        .zip(&signatures)
        .map(|(path, sig)| SignatureRecord {
            path: path.clone(),
            value: sig.value(),
            bits: sig.to_string(),
        })
        .collect();
    let output = Output {
        signatures,
        similarities,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
