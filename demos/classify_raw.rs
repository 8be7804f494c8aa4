use clap::Parser;
use digit_classifier::{decode_scores, invoke, Prediction};
use std::path::PathBuf;

/// Run the linked digit classifier on a raw 30x30 f32 grid
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a file holding exactly 900 native-endian f32 values
    #[arg(short, long)]
    input: PathBuf,

    /// Print the prediction as JSON
    #[arg(short, long)]
    json: bool,

    /// Print all ten scores
    #[arg(short, long)]
    scores: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let bytes = match std::fs::read(&args.input) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args.input.display(), e);
            std::process::exit(1);
        }
    };

    let output = match invoke(&bytes) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Inference failed: {e}");
            std::process::exit(1);
        }
    };

    let scores = match decode_scores(&output) {
        Ok(scores) => scores,
        Err(e) => {
            eprintln!("Failed to decode scores: {e}");
            std::process::exit(1);
        }
    };
    let prediction = Prediction::from_scores(&scores);

    if args.scores {
        for (class, score) in scores.iter().enumerate() {
            println!("{class}: {score:.4}");
        }
    }

    if args.json {
        match serde_json::to_string(&prediction) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to serialize prediction: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("Prediction: {prediction}");
    }
}
