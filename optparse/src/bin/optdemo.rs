// Example driver: parses its own argument vector against a fixed
// specification and prints the classification.
//
//   optdemo -o out.txt --verbose build src
//   optdemo -oout.txt build

use optparse::parse;

const SHORT_SPEC: &str = "o:vq";
const LONG_SPEC: &[&str] = &["output=", "verbose", "quiet", "version"];

fn main() {
    let tokens: Vec<String> = std::env::args().skip(1).collect();

    let result = match parse(&tokens, SHORT_SPEC, LONG_SPEC) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("optdemo: {}", e);
            std::process::exit(1);
        }
    };

    let (options, positionals) = result.into_parts();

    // Sorted for stable output.
    let mut keys: Vec<&String> = options.keys().collect();
    keys.sort();
    for key in keys {
        match &options[key] {
            Some(value) => println!("option {} = {}", key, value),
            None => println!("option {}", key),
        }
    }
    for arg in &positionals {
        println!("arg {}", arg);
    }
}
