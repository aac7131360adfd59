use std::io;

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use stockroom_app::{
    context::AppConfig,
    domain::movements::models::{MovementType, NewMovement},
    render::write_movements,
};

use crate::cli::{context, failed, success};

#[derive(Debug, Args)]
pub(crate) struct MovementsCommand {
    #[command(subcommand)]
    command: MovementsSubcommand,

    #[command(flatten)]
    config: AppConfig,
}

#[derive(Debug, Subcommand)]
enum MovementsSubcommand {
    /// Movement history with per-type counts
    List,

    /// Record a stock movement
    Add(AddMovementArgs),
}

#[derive(Debug, Args)]
struct AddMovementArgs {
    #[arg(long)]
    product_id: String,

    #[arg(long = "type", value_enum)]
    kind: MovementType,

    #[arg(long)]
    quantity: i64,

    #[arg(long)]
    reason: String,

    #[arg(long, default_value = "")]
    reference: String,

    #[arg(long, default_value_t = Decimal::ZERO)]
    unit_cost: Decimal,

    #[arg(long, default_value = "")]
    notes: String,
}

pub(crate) async fn run(command: MovementsCommand) -> Result<(), String> {
    let context = context(&command.config)?;

    match command.command {
        MovementsSubcommand::List => {
            let listed = context
                .movements
                .list_movements()
                .await
                .map_err(failed("load movements"))?;

            write_movements(io::stdout().lock(), &listed).map_err(|error| error.to_string())
        }
        MovementsSubcommand::Add(args) => {
            let recorded = context
                .movements
                .add_movement(NewMovement {
                    product_id: args.product_id,
                    kind: Some(args.kind),
                    quantity: args.quantity,
                    reason: args.reason,
                    reference: args.reference,
                    unit_cost: args.unit_cost,
                    notes: args.notes,
                })
                .await
                .map_err(failed("record movement"))?;

            success(&format!("Movement {} recorded", recorded.kind_label()))
        }
    }
}
