use anyhow::Result;
use clap::{crate_version, App as ClapApp, Arg};
use menu_tui::{app::App, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new("menu-tui")
        .version(crate_version!())
        .about("Manage a shop's items and menu from the terminal")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Use a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("database-url")
                .short("d")
                .long("database-url")
                .value_name("URL")
                .help("Set the realtime database URL and save it to the configuration")
                .takes_value(true),
        )
        .get_matches();

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    if let Some(url) = matches.value_of("database-url") {
        config.save_database_url(url)?;
    }
    App::start(config).await
}
