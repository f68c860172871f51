use std::env;
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: tactus <piece.yaml> [output.html]");
        process::exit(1);
    }

    let input_path = &args[1];

    // Read input file
    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    // Generate the timing chart
    let html = match tactus::chart(&source) {
        Ok(html) => html,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Output next to the input unless told otherwise
    let output_path = match args.get(2) {
        Some(path) => path.clone(),
        None => Path::new(input_path)
            .with_extension("html")
            .to_string_lossy()
            .into_owned(),
    };

    if let Err(e) = fs::write(&output_path, &html) {
        eprintln!("Error writing to '{}': {}", output_path, e);
        process::exit(1);
    }
    eprintln!("Wrote timing chart to {}", output_path);
}
