//! Command-line interface definition

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bomwright")]
#[command(about = "Rescale a bill of materials to a new finished-good quantity", long_about = None)]
#[command(version)]
#[command(after_help = "\
ENVIRONMENT:
    BOMWRIGHT_API_BASE_URL     Backend base URL (enables env-only configuration)
    BOMWRIGHT_API_TOKEN        Bearer token sent with every request
    RUST_LOG                   Log filter, overrides the configured level")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Recost the BOM, update scrap stock and save it
    #[command(alias = "r")]
    Rescale(RescaleArgs),
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct RescaleArgs {
    /// BOM identifier
    pub bom_id: String,

    /// New finished-good quantity
    #[arg(allow_negative_numbers = true)]
    pub quantity: String,

    /// Print the computed plan without writing anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

impl RescaleArgs {
    /// Unparseable input becomes NaN so it is rejected with the same
    /// message as any other invalid quantity.
    pub fn target_quantity(&self) -> f64 {
        self.quantity.trim().parse().unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn rescale(args: &[&str]) -> RescaleArgs {
        let cli = Cli::try_parse_from(std::iter::once("bomwright").chain(args.iter().copied()))
            .unwrap();
        let Commands::Rescale(args) = cli.command;
        args
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rescale_takes_id_and_quantity() {
        let args = rescale(&["rescale", "bom-1", "25"]);
        assert_eq!(args.bom_id, "bom-1");
        assert_eq!(args.target_quantity(), 25.0);
        assert!(!args.dry_run);
    }

    #[test]
    fn dry_run_flag_may_appear_anywhere() {
        assert!(rescale(&["rescale", "--dry-run", "bom-1", "2.5"]).dry_run);
        assert!(rescale(&["rescale", "bom-1", "2.5", "-n"]).dry_run);
    }

    #[test]
    fn negative_quantity_reaches_validation() {
        assert_eq!(rescale(&["rescale", "bom-1", "-5"]).target_quantity(), -5.0);
    }

    #[test]
    fn unparseable_quantity_becomes_nan() {
        assert!(rescale(&["rescale", "bom-1", "lots"]).target_quantity().is_nan());
    }

    #[test]
    fn missing_quantity_and_unknown_flag_are_rejected() {
        assert!(Cli::try_parse_from(["bomwright", "rescale", "bom-1"]).is_err());
        assert!(Cli::try_parse_from(["bomwright", "rescale", "bom-1", "3", "--force"]).is_err());
        assert!(Cli::try_parse_from(["bomwright", "recost"]).is_err());
    }
}
