use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("colligo")
        .version("0.1.0")
        .author("Colligo Contributors")
        .about("Collect raw text from seed URLs and curate story records")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(
            clap::Command::new("scrape")
                .about("Fetch seed URLs for a subject and save extracted text")
                .arg(clap::arg!(-s --subject <NAME> "Public figure the seed URLs are about").required(true))
                .arg(clap::arg!(<URL> "Seed URLs, processed in order").num_args(1..))
                .arg(
                    clap::arg!(-o --output_dir <DIR> "Output directory for raw text files")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(clap::arg!(--delay <SECS> "Minimum seconds between fetches to the same host").default_value("2.5"))
                .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("20"))
                .arg(clap::arg!(--max_retries <NUM> "Retries for transient failures").default_value("3"))
                .arg(clap::arg!(--user_agent <UA> "Custom User-Agent for HTTP requests"))
                .arg(
                    clap::arg!(--min_text_length <NUM> "Minimum character threshold for extracted text")
                        .default_value("200"),
                ),
        )
        .subcommand(
            clap::Command::new("curate")
                .about("Interactively curate raw text files into JSON story entries")
                .arg(
                    clap::arg!(--raw_dir <DIR> "Directory containing raw text files")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    clap::arg!(--output_dir <DIR> "Directory receiving curated JSON entries")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "colligo", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "colligo", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "colligo", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "colligo", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
