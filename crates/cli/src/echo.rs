use owo_colors::OwoColorize;

use cocktails_core::{CocktailCard, DrinkTotal, MapView, Place};

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Cocktails".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Scrape and explore Wikipedia's list of cocktails\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

fn print_rule(title: &str) {
    println!("{}", "═".repeat(60).dimmed());
    println!("{}", title.bold().cyan());
    println!("{}", "═".repeat(60).dimmed());
}

/// Print a cocktail card to stdout
pub fn print_card(card: &CocktailCard) {
    print_rule(card.name);
    println!("  {} {}", "Image:".dimmed(), card.image_url);
    println!("  {} {}", "Recipe:".dimmed(), card.recipe_url.underline());
    for (label, value) in &card.details {
        println!("  {} {}", format!("{label}:").bold(), value);
    }
}

/// Print ranked visitor totals
pub fn print_totals(title: &str, totals: &[DrinkTotal]) {
    print_rule(title);
    for (rank, total) in totals.iter().enumerate() {
        println!(
            "  {:>2}. {:<30} {}",
            rank + 1,
            total.name,
            total.visitors.to_string().bright_white()
        );
    }
}

/// Print a ranked list of bars
pub fn print_places(title: &str, places: &[&Place]) {
    print_rule(title);
    for (rank, place) in places.iter().enumerate() {
        let rating = place.rating.map(|r| format!("{r:.1}")).unwrap_or_else(|| "-".to_string());
        let count = place.user_ratings_total.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>2}. {:<40} {} {}",
            rank + 1,
            place.name,
            rating.bright_yellow(),
            format!("({count} ratings)").dimmed()
        );
        if let Some(address) = &place.formatted_address {
            println!("      {}", address.dimmed());
        }
    }
}

/// Print the map centre and markers
pub fn print_map(view: &MapView) {
    print_rule("Map");
    println!(
        "  {} {:.5}, {:.5} (zoom {})",
        "Centre:".dimmed(),
        view.center.lat,
        view.center.lng,
        view.zoom
    );
    for point in &view.points {
        println!("  {} {:.5}, {:.5}", format!("{}:", point.name).dimmed(), point.lat, point.lng);
    }
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
