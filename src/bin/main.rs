use crossterm::style::Stylize;
use lex_core::core::table::{self, NOTATIONS};
use lex_core::{equivalent, lexicon, persistence, LexConverter};
use serde::Serialize;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process::exit;

const PROGRAM_NAME: &str = "lexiconv - convert between lexicons of different speech synthesizers";

#[derive(Serialize)]
struct ConversionReport<'a> {
    source: &'a str,
    dest: &'a str,
    input: String,
    output: Vec<String>,
}

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let json = if let Some(idx) = args.iter().position(|a| a == "--json") {
        args.remove(idx);
        true
    } else {
        false
    };
    let snapshot = match args.iter().position(|a| a == "--snapshot") {
        Some(idx) if idx + 1 < args.len() => {
            args.remove(idx);
            Some(args.remove(idx))
        }
        Some(_) => {
            eprintln!("{} --snapshot needs a path", "Error:".red().bold());
            exit(1);
        }
        None => None,
    };

    let result = match args.first().map(String::as_str) {
        Some("--phones2phones") => phones2phones(&args[1..], json, snapshot.as_deref()),
        Some("--convert") => convert_lexicon(&args[1..], snapshot.as_deref()),
        Some("--check") => check(&args[1..], json),
        _ => {
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        exit(1);
    }
}

/// Builds the engine, restoring its dictionary cache from the snapshot path
/// if one was given.
fn make_engine(snapshot: Option<&str>) -> LexConverter {
    match snapshot {
        Some(path) => LexConverter::from_file_or_new(path),
        None => LexConverter::new(),
    }
}

/// `--phones2phones <from> <to> <phones…>`: one-off conversion of a phoneme
/// string. When the source notation space-separates words, each word is
/// converted on its own.
fn phones2phones(
    args: &[String],
    json: bool,
    snapshot: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (source, dest, rest) = match args {
        [source, dest, rest @ ..] if !rest.is_empty() => (source, dest, rest),
        _ => return Err("usage: --phones2phones <from> <to> <phones...>".into()),
    };
    let text = rest.join(" ");
    let mut engine = make_engine(snapshot);

    let mut outputs = Vec::new();
    if table::space_separates_words(source) {
        for word in text.split_whitespace() {
            outputs.push(engine.convert(word, source, dest)?);
        }
    } else {
        outputs.push(engine.convert(&text, source, dest)?);
    }

    if json {
        let report = ConversionReport {
            source,
            dest,
            input: text,
            output: outputs,
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        for out in &outputs {
            println!("{}", lexicon::inline_markup(dest, out).green());
        }
    }
    engine.save_snapshot()?;
    Ok(())
}

/// `--convert <from> <to> <infile> <outfile>`: whole-lexicon conversion.
/// The input file is parsed according to the source notation's own lexicon
/// shape; the output is written atomically.
fn convert_lexicon(
    args: &[String],
    snapshot: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (source, dest, infile, outfile) = match args {
        [source, dest, infile, outfile] => (source, dest, infile, outfile),
        _ => return Err("usage: --convert <from> <to> <infile> <outfile>".into()),
    };
    if source == dest {
        return Err("cannot convert a lexicon to its own format".into());
    }

    let reader = BufReader::new(File::open(infile)?);
    let entries = match source.as_str() {
        "festival" => lexicon::parse_festival_dict(reader)?,
        "espeak" => lexicon::parse_espeak_lexicon(reader)?,
        "cepstral" => lexicon::parse_cepstral_lexicon(reader)?,
        other => {
            return Err(format!("reading a '{}' lexicon is not supported", other).into());
        }
    };

    let mut engine = make_engine(snapshot);
    let mut body = Vec::new();
    lexicon::write_lexicon(&mut engine, &entries, source, dest, &mut body)?;
    persistence::write_atomic(Path::new(outfile), &body)?;
    engine.save_snapshot()?;

    println!(
        "Wrote {} entries to {}",
        entries.len().to_string().bold(),
        outfile.as_str().bold()
    );
    Ok(())
}

/// `--check <existing> <candidate>`: do two espeak pronunciations denote the
/// same thing once interchangeable spellings are folded?
fn check(args: &[String], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (existing, candidate) = match args {
        [existing, candidate] => (existing, candidate),
        _ => return Err("usage: --check <existing> <candidate>".into()),
    };
    let same = equivalent(existing, candidate);
    if json {
        println!("{}", serde_json::json!({ "equivalent": same }));
    } else if same {
        println!("{}", "equivalent".green());
    } else {
        println!("{}", "different".red());
    }
    Ok(())
}

fn print_usage() {
    println!("{}", PROGRAM_NAME.bold());
    let formats: Vec<&str> = NOTATIONS
        .iter()
        .copied()
        .filter(|n| *n != "ms-sapi")
        .collect();
    println!("\nAvailable pronunciation formats: {}", formats.join(", "));
    println!("\nUse --phones2phones <from> <to> <phones...> for a one-off conversion,");
    println!("  e.g.: lexiconv --phones2phones festival espeak h @ l ou1");
    println!("\nUse --convert <from> <to> <infile> <outfile> to convert a lexicon file");
    println!("  (festival, espeak and cepstral input shapes are understood).");
    println!("\nUse --check <existing> <candidate> to compare two espeak pronunciations.");
    println!("\nAdd --json to any mode for machine-readable output.");
    println!("Add --snapshot <path> to keep the derived dictionaries across runs.");
}
