//! Sensor command definitions.

use clap::{ArgGroup, Command};

use crate::commands::params::{
    asset_ids_parameter, concurrent_parameter, format_parameter, input_file_parameter,
    COMMAND_EXPORT, COMMAND_LIST, COMMAND_SENSOR, GROUP_ASSET_SOURCE, PARAMETER_ASSET,
    PARAMETER_INPUT,
};

fn asset_source_group() -> ArgGroup {
    ArgGroup::new(GROUP_ASSET_SOURCE)
        .args([PARAMETER_ASSET, PARAMETER_INPUT])
        .required(true)
        .multiple(false)
}

/// Create the sensor command with all its subcommands.
pub fn sensor_command() -> Command {
    Command::new(COMMAND_SENSOR)
        .about("Work with sensors")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List sensors for a set of assets")
                .arg(asset_ids_parameter())
                .arg(input_file_parameter())
                .group(asset_source_group())
                .arg(concurrent_parameter())
                .arg(format_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_EXPORT)
                .about("Export sensors for a set of assets to a timestamped CSV file")
                .arg(asset_ids_parameter())
                .arg(input_file_parameter())
                .group(asset_source_group())
                .arg(concurrent_parameter()),
        )
}
