//! Glyph toolchain CLI.

use glyphc::commands::{
    build_file, check_file, explain_error, lex_file, parse_build_options, parse_file,
    simulate_file, BuildOptions,
};

fn main() {
    glyphc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "sim" => {
            if args.len() < 3 {
                eprintln!("Usage: glyph sim <file.glyph>");
                std::process::exit(1);
            }
            simulate_file(&args[2]);
        }
        "com" => {
            if args.len() < 3 {
                eprintln!("Usage: glyph com <file.glyph> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  -o <path>           Output executable path");
                eprintln!("  -r, --run           Run the executable after building");
                eprintln!("  -S, --emit=asm      Stop after writing the .asm file");
                std::process::exit(1);
            }

            // Parse options, handling -o specially (needs lookahead)
            let mut options = BuildOptions::default();
            let mut i = 3;
            while i < args.len() {
                if args[i] == "-o" && i + 1 < args.len() {
                    options.output = Some(std::path::PathBuf::from(&args[i + 1]));
                    i += 2;
                } else {
                    let parsed = parse_build_options(&args[i..=i]);
                    options.merge(&parsed);
                    i += 1;
                }
            }

            build_file(&args[2], &options);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: glyph check <file.glyph>");
                std::process::exit(1);
            }
            check_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: glyph parse <file.glyph>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: glyph lex <file.glyph>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Glyph Compiler {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: glyph --explain <ERROR_CODE>");
                eprintln!("Example: glyph --explain E2003");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        _ => {
            // A bare .glyph path simulates it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("glyph"))
            {
                simulate_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Glyph Compiler");
    println!();
    println!("Usage: glyph <command> [options]");
    println!();
    println!("Commands:");
    println!("  sim <file.glyph>     Simulate the program");
    println!("  com <file.glyph>     Compile to a native executable");
    println!("  check <file.glyph>   Parse and resolve blocks (no execution)");
    println!("  parse <file.glyph>   Parse and display the op list");
    println!("  lex <file.glyph>     Tokenize and display tokens");
    println!("  --explain <code>     Explain an error code (e.g., E2003)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Com options:");
    println!("  -o <path>           Output executable path");
    println!("  -r, --run           Run the executable after building");
    println!("  -S, --emit=asm      Stop after writing the .asm file");
    println!();
    println!("Examples:");
    println!("  glyph sim loop.glyph");
    println!("  glyph com loop.glyph            # Build ./loop");
    println!("  glyph com loop.glyph -r         # Build and run");
    println!("  glyph com loop.glyph -o counter # Custom output name");
    println!("  glyph check loop.glyph");
    println!("  glyph --explain E2003           # Explain unclosed block");
}
