//! Business entity command definitions.

use clap::{Arg, Command};

use crate::commands::params::{
    format_parameter, COMMAND_ENTITY, COMMAND_LIST, PARAMETER_SKIP, PARAMETER_TAKE,
};

/// Create the business entity command with all its subcommands.
pub fn entity_command() -> Command {
    Command::new(COMMAND_ENTITY)
        .about("Work with business entities")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List business entities")
                .arg(
                    Arg::new(PARAMETER_SKIP)
                        .long(PARAMETER_SKIP)
                        .num_args(1)
                        .required(false)
                        .default_value("0")
                        .help("Number of entities to skip")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new(PARAMETER_TAKE)
                        .long(PARAMETER_TAKE)
                        .num_args(1)
                        .required(false)
                        .default_value("100")
                        .help("Maximum number of entities to return")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(format_parameter()),
        )
}
