//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the
//! clap crate. Command groups live in separate files; shared parameter
//! builders and name constants live in `params`.

use clap::{ArgMatches, Command};

pub mod asset;
pub mod entity;
pub mod params;
pub mod sensor;

pub use params::{
    COMMAND_ASSET, COMMAND_ENTITY, COMMAND_EXPORT, COMMAND_LIST, COMMAND_SENSOR,
    PARAMETER_AFTER, PARAMETER_ASSET, PARAMETER_ASSET_TYPE, PARAMETER_CONCURRENT,
    PARAMETER_FORMAT, PARAMETER_INPUT, PARAMETER_LIMIT, PARAMETER_SKIP, PARAMETER_SORT,
    PARAMETER_TAKE, PARAMETER_WITH_SENSORS,
};

/// Build the command tree without parsing.
pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(asset::asset_command())
        .subcommand(entity::entity_command())
        .subcommand(sensor::sensor_command())
}

/// Create and parse all CLI commands and their arguments.
pub fn create_cli_commands() -> ArgMatches {
    build_cli().get_matches()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_well_formed() {
        // clap panics on inconsistent definitions (duplicate ids, bad
        // groups) when the tree is built for debugging.
        build_cli().debug_assert();
    }

    #[test]
    fn asset_list_parses_defaults() {
        let matches = build_cli()
            .try_get_matches_from(["dcimcli", "asset", "list"])
            .unwrap();

        let (_, asset) = matches.subcommand().unwrap();
        let (name, list) = asset.subcommand().unwrap();
        assert_eq!(name, COMMAND_LIST);
        assert_eq!(
            list.get_one::<String>(PARAMETER_ASSET_TYPE).unwrap(),
            "crac"
        );
        assert_eq!(*list.get_one::<u32>(PARAMETER_LIMIT).unwrap(), 10);
        assert_eq!(list.get_one::<String>(PARAMETER_SORT).unwrap(), "+Id");
    }

    #[test]
    fn sensor_list_requires_an_asset_source() {
        let result = build_cli().try_get_matches_from(["dcimcli", "sensor", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn sensor_list_accepts_multiple_asset_ids() {
        let matches = build_cli()
            .try_get_matches_from(["dcimcli", "sensor", "list", "--asset", "1", "--asset", "2"])
            .unwrap();

        let (_, sensor) = matches.subcommand().unwrap();
        let (_, list) = sensor.subcommand().unwrap();
        let ids: Vec<&String> = list.get_many::<String>(PARAMETER_ASSET).unwrap().collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn sensor_export_accepts_input_file() {
        let matches = build_cli()
            .try_get_matches_from(["dcimcli", "sensor", "export", "--input", "assets.csv"])
            .unwrap();

        let (_, sensor) = matches.subcommand().unwrap();
        let (name, export) = sensor.subcommand().unwrap();
        assert_eq!(name, COMMAND_EXPORT);
        assert!(export
            .get_one::<std::path::PathBuf>(PARAMETER_INPUT)
            .is_some());
    }

    #[test]
    fn rejects_unknown_format() {
        let result = build_cli().try_get_matches_from([
            "dcimcli", "asset", "list", "--format", "xml",
        ]);
        assert!(result.is_err());
    }
}
