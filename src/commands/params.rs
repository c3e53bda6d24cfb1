//! Shared CLI parameter builders and name constants.

use clap::{Arg, ArgAction};
use std::path::PathBuf;

use crate::format::OutputFormat;

pub const COMMAND_ASSET: &str = "asset";
pub const COMMAND_ENTITY: &str = "entity";
pub const COMMAND_SENSOR: &str = "sensor";
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_EXPORT: &str = "export";

pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_ASSET_TYPE: &str = "asset-type";
pub const PARAMETER_AFTER: &str = "after";
pub const PARAMETER_LIMIT: &str = "limit";
pub const PARAMETER_SORT: &str = "sort";
pub const PARAMETER_WITH_SENSORS: &str = "with-sensors";
pub const PARAMETER_SKIP: &str = "skip";
pub const PARAMETER_TAKE: &str = "take";
pub const PARAMETER_ASSET: &str = "asset";
pub const PARAMETER_INPUT: &str = "input";
pub const PARAMETER_CONCURRENT: &str = "concurrent";

pub const GROUP_ASSET_SOURCE: &str = "asset-source";

pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .default_value("table")
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

pub fn asset_ids_parameter() -> Arg {
    Arg::new(PARAMETER_ASSET)
        .short('a')
        .long(PARAMETER_ASSET)
        .num_args(1)
        .action(ArgAction::Append)
        .help("Asset ID to fetch sensors for (repeatable)")
}

pub fn input_file_parameter() -> Arg {
    Arg::new(PARAMETER_INPUT)
        .short('i')
        .long(PARAMETER_INPUT)
        .num_args(1)
        .help("CSV file with an AssetId column naming the assets to fetch")
        .value_parser(clap::value_parser!(PathBuf))
}

pub fn concurrent_parameter() -> Arg {
    Arg::new(PARAMETER_CONCURRENT)
        .long(PARAMETER_CONCURRENT)
        .num_args(1)
        .required(false)
        .help("Maximum number of concurrent sensor fetches (default: sequential)")
        .value_parser(clap::value_parser!(usize))
}
