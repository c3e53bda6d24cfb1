//! Asset command definitions.

use clap::{Arg, ArgAction, Command};

use crate::commands::params::{
    format_parameter, COMMAND_ASSET, COMMAND_LIST, PARAMETER_AFTER, PARAMETER_ASSET_TYPE,
    PARAMETER_LIMIT, PARAMETER_SORT, PARAMETER_WITH_SENSORS,
};

/// Create the asset command with all its subcommands.
pub fn asset_command() -> Command {
    Command::new(COMMAND_ASSET)
        .about("Work with assets")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List assets filtered by type")
                .arg(
                    Arg::new(PARAMETER_ASSET_TYPE)
                        .short('t')
                        .long(PARAMETER_ASSET_TYPE)
                        .num_args(1)
                        .required(false)
                        .default_value("crac")
                        .help("Asset type to filter by"),
                )
                .arg(
                    Arg::new(PARAMETER_AFTER)
                        .long(PARAMETER_AFTER)
                        .num_args(1)
                        .required(false)
                        .default_value("0")
                        .help("Offset of the first asset in the page")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new(PARAMETER_LIMIT)
                        .short('l')
                        .long(PARAMETER_LIMIT)
                        .num_args(1)
                        .required(false)
                        .default_value("10")
                        .help("Maximum number of assets in the page")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new(PARAMETER_SORT)
                        .long(PARAMETER_SORT)
                        .num_args(1)
                        .required(false)
                        .default_value("+Id")
                        .help("Sort expression applied by the server"),
                )
                .arg(
                    Arg::new(PARAMETER_WITH_SENSORS)
                        .long(PARAMETER_WITH_SENSORS)
                        .action(ArgAction::SetTrue)
                        .required(false)
                        .help("Also fetch and display the sensors of each listed asset"),
                )
                .arg(format_parameter()),
        )
}
