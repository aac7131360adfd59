use std::{fs, io, path::PathBuf};

use clap::{Args, Subcommand};
use jiff::civil::Date;
use stockroom_app::{
    context::AppConfig,
    domain::reports::models::{
        CustomReportFilters, CustomReportRequest, ReportFormat, ReportQuery,
    },
    render::{write_inventory_status, write_report, write_report_table},
};

use crate::cli::{context, failed, success};

#[derive(Debug, Args)]
pub(crate) struct ReportsCommand {
    #[command(subcommand)]
    command: ReportsSubcommand,

    #[command(flatten)]
    config: AppConfig,
}

#[derive(Debug, Subcommand)]
enum ReportsSubcommand {
    /// Generate a report and print it
    Generate(QueryArgs),

    /// Generate a report and save it to a file
    Download {
        #[command(flatten)]
        query: QueryArgs,

        /// Defaults to `report-<type>-<start>-<end>.<format>`
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Headline inventory figures
    Status,

    /// Tabulate selected fields
    Custom(CustomArgs),
}

#[derive(Debug, Args)]
struct QueryArgs {
    #[arg(long)]
    start: Date,

    #[arg(long)]
    end: Date,

    #[arg(long, value_enum, default_value_t)]
    format: ReportFormat,

    #[arg(long = "type", default_value = "inventory")]
    report_type: String,
}

impl From<QueryArgs> for ReportQuery {
    fn from(args: QueryArgs) -> Self {
        Self {
            start: args.start,
            end: args.end,
            format: args.format,
            report_type: args.report_type,
        }
    }
}

#[derive(Debug, Args)]
struct CustomArgs {
    /// Field to include; repeat for more
    #[arg(long = "field", required = true)]
    fields: Vec<String>,

    #[arg(long)]
    start: Option<Date>,

    #[arg(long)]
    end: Option<Date>,

    #[arg(long, default_value = "")]
    category: String,

    #[arg(long, default_value = "")]
    min_value: String,

    #[arg(long, default_value = "")]
    max_value: String,
}

pub(crate) async fn run(command: ReportsCommand) -> Result<(), String> {
    let context = context(&command.config)?;
    let reports = &context.reports;

    match command.command {
        ReportsSubcommand::Generate(args) => {
            let report = reports
                .generate_report(&args.into())
                .await
                .map_err(failed("generate report"))?;

            write_report(io::stdout().lock(), &report).map_err(|error| error.to_string())
        }
        ReportsSubcommand::Download { query, output } => {
            let query = ReportQuery::from(query);

            let bytes = reports
                .download_report(&query)
                .await
                .map_err(failed("download report"))?;

            let path = output.unwrap_or_else(|| PathBuf::from(query.file_name()));

            fs::write(&path, bytes).map_err(failed("save report"))?;

            success(&format!("Report saved to {}", path.display()))
        }
        ReportsSubcommand::Status => {
            let status = reports
                .inventory_status()
                .await
                .map_err(failed("load inventory status"))?;

            write_inventory_status(io::stdout().lock(), &status).map_err(|error| error.to_string())
        }
        ReportsSubcommand::Custom(args) => {
            let request = CustomReportRequest::new(
                args.fields,
                args.start,
                args.end,
                CustomReportFilters {
                    category: args.category,
                    min_value: args.min_value,
                    max_value: args.max_value,
                },
            );

            let table = reports
                .custom_report(request)
                .await
                .map_err(failed("run custom report"))?;

            write_report_table(io::stdout().lock(), &table).map_err(|error| error.to_string())
        }
    }
}
