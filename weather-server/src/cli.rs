use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use weather_core::{Config, Environment, WeatherGateway, WeatherResult};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Current-weather HTTP gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP gateway.
    Serve {
        /// Listen address; overrides HOST and the config file.
        #[arg(long)]
        host: Option<String>,

        /// Listen port; overrides PORT and the config file.
        #[arg(long, short)]
        port: Option<u16>,

        /// Include internal error detail in responses.
        #[arg(long)]
        dev: bool,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Look up current weather for a city once and print it.
    Show {
        /// City name, e.g. "London".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { host, port, dev } => {
                let mut config = Config::resolve()?;
                if let Some(host) = host {
                    config.host = host;
                }
                if let Some(port) = port {
                    config.port = port;
                }
                if dev {
                    config.environment = Environment::Development;
                }
                weather_server::serve(config).await
            }
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_help_message("Get one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(key);
    config.api_key().context("An empty API key was entered")?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let config = Config::resolve()?;
    let gateway = WeatherGateway::from_config(&config)?;

    let result = gateway.handle_weather_query(Some(city)).await?;
    println!("{}", format_result(&result));
    Ok(())
}

fn format_result(result: &WeatherResult) -> String {
    let place = match &result.country {
        Some(country) => format!("{}, {}", result.city, country),
        None => result.city.clone(),
    };

    format!(
        "{place}\n  {}\n  Temperature: {}\u{00b0}C\n  Humidity: {}%\n  Wind: {} km/h",
        result.description, result.temperature, result.humidity, result.wind_speed
    )
}
