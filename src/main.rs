use std::env;
use std::fs;
use std::process;

use midisynth::{ConvertConfig, ConvertError};

const USAGE: &str = "Usage: midisynth [--summary] [--config <config.yaml>] <input.mid> [output]";

struct Args {
    summary: bool,
    config_path: Option<String>,
    input_path: String,
    output_path: Option<String>,
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut summary = false;
    let mut config_path = None;
    let mut positional = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--summary" => summary = true,
            "--config" => config_path = Some(iter.next()?.clone()),
            _ => positional.push(arg.clone()),
        }
    }

    if positional.is_empty() || positional.len() > 2 {
        return None;
    }
    let mut positional = positional.into_iter();

    Some(Args {
        summary,
        config_path,
        input_path: positional.next()?,
        output_path: positional.next(),
    })
}

fn load_config(path: Option<&str>) -> Result<ConvertConfig, ConvertError> {
    match path {
        Some(path) => ConvertConfig::from_yaml(&fs::read_to_string(path)?),
        None => Ok(ConvertConfig::default()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Some(args) => args,
        None => {
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let config = match load_config(args.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    // Read input file
    let bytes = match fs::read(&args.input_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", args.input_path, e);
            process::exit(1);
        }
    };

    // Convert
    let result = if args.summary {
        midisynth::summarize(&bytes, &config)
    } else {
        midisynth::convert(&bytes, &config)
    };

    let text = match result {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Conversion error: {}", e);
            process::exit(1);
        }
    };

    // Output
    match args.output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &text) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote synth literal to {}", path);
        }
        None => {
            print!("{}", text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("midisynth")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_input_only() {
        let parsed = parse_args(&args(&["song.mid"])).unwrap();
        assert_eq!(parsed.input_path, "song.mid");
        assert!(parsed.output_path.is_none());
        assert!(!parsed.summary);
    }

    #[test]
    fn test_flags_and_output() {
        let parsed =
            parse_args(&args(&["--config", "c.yaml", "song.mid", "out.h", "--summary"])).unwrap();
        assert_eq!(parsed.config_path.as_deref(), Some("c.yaml"));
        assert_eq!(parsed.input_path, "song.mid");
        assert_eq!(parsed.output_path.as_deref(), Some("out.h"));
        assert!(parsed.summary);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse_args(&args(&[])).is_none());
        assert!(parse_args(&args(&["a", "b", "c"])).is_none());
        assert!(parse_args(&args(&["song.mid", "--config"])).is_none());
    }
}
