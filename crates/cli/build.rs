use std::{env, fs, path::PathBuf};

fn input_arg() -> clap::Arg {
    clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin")
}

fn origin_arg() -> clap::Arg {
    clap::arg!(--origin <URL> "Site origin that article paths are resolved against").default_value("https://en.wikipedia.org")
}

fn data_arg(default: &'static str) -> clap::Arg {
    clap::arg!(-d --data <FILE> "Data file")
        .value_parser(clap::value_parser!(std::path::PathBuf))
        .default_value(default)
}

fn named_arg(long: &'static str, value: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(long).long(long).value_name(value).help(help)
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let dataset = "cocktails_categorized_detailed.csv";

    let mut cmd = clap::Command::new("cocktails")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Scrape and explore Wikipedia's list of cocktails")
        .arg(clap::arg!(-v --verbose "Enable debug logging").global(true))
        .subcommand(
            clap::Command::new("scrape")
                .about("Scrape the listing and every cocktail page into a CSV file")
                .arg(
                    clap::arg!(-o --output <FILE> "Output file")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value(dataset),
                )
                .arg(origin_arg())
                .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10"))
                .arg(named_arg("user-agent", "UA", "Custom User-Agent for HTTP requests")),
        )
        .subcommand(
            clap::Command::new("categories")
                .about("Print the categories of a listing page as JSON")
                .arg(input_arg())
                .arg(origin_arg()),
        )
        .subcommand(
            clap::Command::new("infobox")
                .about("Print the infobox fields of a cocktail page as JSON")
                .arg(input_arg())
                .arg(origin_arg()),
        )
        .subcommand(
            clap::Command::new("show")
                .about("Show one cocktail from a scraped dataset")
                .arg(data_arg(dataset))
                .arg(
                    clap::arg!(-m --mode <MODE> "Browse by alcohol base or by mixer")
                        .value_parser(["alcohol", "mixer"])
                        .default_value("alcohol"),
                )
                .arg(clap::arg!(-c --category <CATEGORY> "Category"))
                .arg(clap::arg!(-n --name <NAME> "Cocktail name")),
        )
        .subcommand(
            clap::Command::new("counts")
                .about("Count cocktails per alcohol-base category")
                .arg(data_arg(dataset)),
        )
        .subcommand(
            clap::Command::new("popular")
                .about("Rank drinks by visitors over a year range")
                .arg(data_arg("cocktail_popularity.csv"))
                .arg(clap::arg!(--from <YEAR> "First year"))
                .arg(clap::arg!(--to <YEAR> "Last year"))
                .arg(clap::arg!(--top <NUM> "Number of drinks to show").default_value("10")),
        )
        .subcommand(
            clap::Command::new("bars")
                .about("Find bars serving a cocktail in a city")
                .arg(clap::arg!(--cocktail <NAME> "Cocktail name").required(true))
                .arg(clap::arg!(--city <CITY> "City to search in").required(true))
                .arg(named_arg("api-key", "KEY", "Places API key"))
                .arg(clap::arg!(--endpoint <URL> "Text-search endpoint"))
                .arg(named_arg("max-results", "NUM", "Maximum number of results").default_value("20"))
                .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("10")),
        );

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "cocktails", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "cocktails", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "cocktails", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "cocktails", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}
