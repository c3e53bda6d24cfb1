//! CLI command dispatch and execution.
//!
//! All errors are returned to `main` as typed values; no component in the
//! call chain terminates the process itself.

use clap::ArgMatches;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

use dcimcli::api::{self, ApiClient, AssetQuery};
use dcimcli::auth::{AuthClient, AuthError};
use dcimcli::commands::{
    create_cli_commands, COMMAND_ASSET, COMMAND_ENTITY, COMMAND_EXPORT, COMMAND_LIST,
    COMMAND_SENSOR, PARAMETER_AFTER, PARAMETER_ASSET, PARAMETER_ASSET_TYPE,
    PARAMETER_CONCURRENT, PARAMETER_FORMAT, PARAMETER_INPUT, PARAMETER_LIMIT, PARAMETER_SKIP,
    PARAMETER_SORT, PARAMETER_TAKE, PARAMETER_WITH_SENSORS,
};
use dcimcli::configuration::{ConfigurationError, Credentials};
use dcimcli::export::{write_sensor_csv, ExportError};
use dcimcli::format::{self, FormattingError, OutputFormat};
use dcimcli::http::ApiError;
use dcimcli::input::{read_asset_ids, InputError};
use dcimcli::model::SensorRecord;

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Undefined or unsupported subcommand")]
    UnsupportedSubcommand(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),
    #[error("API error: {0}")]
    ApiError(#[from] ApiError),
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),
    #[error("Input error: {0}")]
    InputError(#[from] InputError),
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),
}

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    match sub_matches.subcommand() {
        Some((name, _)) => name.to_string(),
        None => "unknown".to_string(),
    }
}

/// Parse the command line and execute the selected command.
///
/// Credentials are loaded only after parsing succeeds, so `--help` and usage
/// errors do not require a configured environment; they are still validated
/// before any network call.
pub async fn execute_command() -> Result<(), CliError> {
    let commands = create_cli_commands();

    let credentials = Credentials::from_env()?;

    match commands.subcommand() {
        Some((COMMAND_ASSET, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, sub_matches)) => list_assets(&credentials, sub_matches).await,
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        Some((COMMAND_ENTITY, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, sub_matches)) => list_entities(&credentials, sub_matches).await,
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        Some((COMMAND_SENSOR, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LIST, sub_matches)) => {
                list_sensors(&credentials, sub_matches, false).await
            }
            Some((COMMAND_EXPORT, sub_matches)) => {
                list_sensors(&credentials, sub_matches, true).await
            }
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        _ => Err(CliError::UnsupportedSubcommand("unknown".to_string())),
    }
}

/// Authenticate and build the API client for this run.
async fn connect(credentials: &Credentials) -> Result<ApiClient, CliError> {
    let token = AuthClient::new(credentials).get_access_token().await?;
    Ok(ApiClient::new(credentials.base_url(), token)?)
}

fn output_format(matches: &ArgMatches) -> Result<OutputFormat, CliError> {
    // unwrap is safe: the argument carries a default value
    let format_str = matches.get_one::<String>(PARAMETER_FORMAT).unwrap();
    Ok(OutputFormat::from_str(format_str)?)
}

/// Resolve the asset IDs for a sensor command from either `--asset`
/// arguments or an `--input` file.
fn resolve_asset_ids(matches: &ArgMatches) -> Result<Vec<String>, CliError> {
    if let Some(ids) = matches.get_many::<String>(PARAMETER_ASSET) {
        return Ok(ids.cloned().collect());
    }

    // unwrap is safe: the argument group makes one of the two mandatory
    let input = matches.get_one::<PathBuf>(PARAMETER_INPUT).unwrap();
    Ok(read_asset_ids(input)?)
}

async fn fetch_records(
    client: &ApiClient,
    asset_ids: &[String],
    concurrency: Option<usize>,
) -> Result<Vec<SensorRecord>, CliError> {
    let sensors = match concurrency {
        Some(limit) if limit > 1 => {
            api::collect_sensors_concurrent(client, asset_ids, limit).await?
        }
        _ => api::collect_sensors(client, asset_ids).await?,
    };

    Ok(sensors.iter().map(|sensor| sensor.to_record()).collect())
}

async fn list_assets(credentials: &Credentials, matches: &ArgMatches) -> Result<(), CliError> {
    let format = output_format(matches)?;

    // unwraps are safe: every argument carries a default value
    let query = AssetQuery {
        asset_type: matches
            .get_one::<String>(PARAMETER_ASSET_TYPE)
            .unwrap()
            .clone(),
        after: *matches.get_one::<u32>(PARAMETER_AFTER).unwrap(),
        limit: *matches.get_one::<u32>(PARAMETER_LIMIT).unwrap(),
        sort: matches.get_one::<String>(PARAMETER_SORT).unwrap().clone(),
    };

    let client = connect(credentials).await?;
    let assets = client.list_assets(&query).await?;

    match format {
        OutputFormat::Table => print!("{}", format::asset_table(&assets)),
        OutputFormat::Csv => print!("{}", format::to_csv(&assets, true)?),
        OutputFormat::Json => println!("{}", format::to_json(&assets)?),
    }

    if matches.get_flag(PARAMETER_WITH_SENSORS) {
        let asset_ids: Vec<String> = assets.iter().map(|asset| asset.id.clone()).collect();
        let records = fetch_records(&client, &asset_ids, None).await?;

        match format {
            OutputFormat::Table => {
                for asset_id in &asset_ids {
                    let asset_records: Vec<SensorRecord> = records
                        .iter()
                        .filter(|record| record.asset_id == *asset_id)
                        .cloned()
                        .collect();
                    print!(
                        "{}",
                        format::sensor_table_with_title(
                            &format!("Sensors for asset {}", asset_id),
                            &asset_records,
                        )
                    );
                }
            }
            OutputFormat::Csv => print!("{}", format::to_csv(&records, true)?),
            OutputFormat::Json => println!("{}", format::to_json(&records)?),
        }
    }

    Ok(())
}

async fn list_entities(credentials: &Credentials, matches: &ArgMatches) -> Result<(), CliError> {
    let format = output_format(matches)?;

    // unwraps are safe: both arguments carry default values
    let skip = *matches.get_one::<u32>(PARAMETER_SKIP).unwrap();
    let take = *matches.get_one::<u32>(PARAMETER_TAKE).unwrap();

    let client = connect(credentials).await?;
    let entities = client.list_business_entities(skip, take).await?;

    match format {
        OutputFormat::Table => print!("{}", format::entity_table(&entities)),
        OutputFormat::Csv => print!("{}", format::to_csv(&entities, true)?),
        OutputFormat::Json => println!("{}", format::to_json(&entities)?),
    }

    Ok(())
}

async fn list_sensors(
    credentials: &Credentials,
    matches: &ArgMatches,
    export: bool,
) -> Result<(), CliError> {
    let format = if export {
        OutputFormat::Table
    } else {
        output_format(matches)?
    };
    let asset_ids = resolve_asset_ids(matches)?;
    let concurrency = matches.get_one::<usize>(PARAMETER_CONCURRENT).copied();

    let client = connect(credentials).await?;
    let records = fetch_records(&client, &asset_ids, concurrency).await?;

    match format {
        OutputFormat::Table => print!("{}", format::sensor_table(&records)),
        OutputFormat::Csv => print!("{}", format::to_csv(&records, true)?),
        OutputFormat::Json => println!("{}", format::to_json(&records)?),
    }

    if export {
        let path = write_sensor_csv(&records)?;
        println!("Output file written to: {}", path.display());
    }

    Ok(())
}
