//! Command-line arguments
//!
//! Uses clap derive macros; connection settings fall back to environment
//! variables.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Headless rider client for the Miichu ride-booking service
#[derive(Parser, Debug)]
#[command(name = "miichu")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the Miichu API
    #[arg(long, global = true, env = "MIICHU_API_URL", default_value = api_client::http::DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Directory holding the saved session
    #[arg(long, global = true, env = "MIICHU_DATA_DIR", default_value = ".miichu")]
    pub data_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "MIICHU_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Describe the trip between two stops
    Route {
        /// Start stop
        start: String,
        /// End stop
        end: String,
    },

    /// List the served stops
    Locations,

    /// Log in and save the session
    Login(LoginArgs),

    /// Register a new rider
    Register(RegisterArgs),

    /// Show the logged-in rider
    Whoami,

    /// Forget the saved session
    Logout,
}

/// Arguments for the login command
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Ten-digit phone number
    #[arg(long)]
    pub phone: String,

    /// Password
    #[arg(long, env = "MIICHU_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the register command
#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long)]
    pub full_name: String,

    /// Ten-digit phone number
    #[arg(long)]
    pub phone: String,

    /// Male or Female
    #[arg(long)]
    pub sex: String,

    /// Password
    #[arg(long, env = "MIICHU_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Password confirmation (defaults to the password)
    #[arg(long)]
    pub confirm_password: Option<String>,

    /// Workplace ID
    #[arg(long)]
    pub workplace_id: Option<String>,

    /// Organization
    #[arg(long)]
    pub organization: Option<String>,

    /// Start stop
    #[arg(long = "from")]
    pub location_start: String,

    /// End stop
    #[arg(long = "to")]
    pub location_end: String,

    /// Fiyda ID front photo (JPEG)
    #[arg(long)]
    pub front: PathBuf,

    /// Fiyda ID back photo (JPEG)
    #[arg(long)]
    pub back: PathBuf,
}

impl RegisterArgs {
    /// Fill the registration form from the arguments
    pub fn to_form(&self) -> app_core::RegistrationForm {
        app_core::RegistrationForm {
            full_name: self.full_name.clone(),
            phone_number: self.phone.clone(),
            sex: self.sex.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone().unwrap_or_else(|| self.password.clone()),
            workplace_id: self.workplace_id.clone().unwrap_or_default(),
            organization: self.organization.clone().unwrap_or_default(),
            location_start: self.location_start.clone(),
            location_end: self.location_end.clone(),
            fiyda_id_image: self.front.display().to_string(),
            fiyda_id_image_back: self.back.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_route() {
        let cli = Cli::try_parse_from(["miichu", "route", "Hayat", "Megenaga"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Route { ref start, ref end } if start == "Hayat" && end == "Megenaga"
        ));
    }

    #[test]
    fn test_parse_register_defaults_confirmation() {
        let cli = Cli::try_parse_from([
            "miichu",
            "register",
            "--full-name",
            "Abebe Kebede",
            "--phone",
            "0912345678",
            "--sex",
            "Male",
            "--password",
            "secret1",
            "--from",
            "Hayat",
            "--to",
            "Bole",
            "--front",
            "front.jpg",
            "--back",
            "back.jpg",
        ])
        .unwrap();

        let Commands::Register(args) = cli.command else {
            panic!("expected register");
        };
        let form = args.to_form();
        assert_eq!(form.confirm_password, "secret1");
        assert_eq!(form.organization, "");
        assert_eq!(form.fiyda_id_image, "front.jpg");
        assert!(form.check().is_ok());
    }
}
