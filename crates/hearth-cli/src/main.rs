//! Hearth CLI - Household finance health and family reports
//!
//! Usage:
//!   hearth --family silva init --name "Família Silva" ...   Create a family
//!   hearth score --income 5000 --expenses 3500 --savings 1500
//!   hearth --family silva transactions add --member ana --kind expense --amount 120 -d Mercado
//!   hearth --family silva health                            Member health reports
//!   hearth --family silva dashboard                         Family summary

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use hearth_core::{
    HearthConfig, JsonFileStore, NewJar, NewTransaction, TransactionExportOptions,
    TransactionUpdate,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::Output;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .init();

    let config = HearthConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let output = Output {
        locale: cli.locale.unwrap_or(config.locale),
        json: cli.json,
    };

    let data_dir = cli.data_dir.clone();
    let family = cli.family.clone();
    // Every command except `score` works on one stored household
    let open = || -> Result<(JsonFileStore, String)> {
        let store = commands::open_store(&config, data_dir.as_deref())?;
        let family = commands::resolve_family(family.as_deref(), &config)?;
        Ok((store, family))
    };
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::Score {
            income,
            expenses,
            savings,
        } => commands::cmd_score(income, expenses, savings, &output),
        Commands::Init {
            name,
            admin_id,
            admin_name,
            admin_email,
            income,
            currency,
        } => {
            let (store, family) = open()?;
            commands::cmd_init(
                &store,
                &commands::NewFamily {
                    id: family,
                    name,
                    admin_id,
                    admin_name,
                    admin_email,
                    monthly_income: income,
                    currency: currency.unwrap_or_else(|| config.currency.clone()),
                },
                &output,
            )
        }
        Commands::Health { member } => {
            let (store, family) = open()?;
            commands::cmd_health(&store, &family, member.as_deref(), &output)
        }
        Commands::Stats {
            kind,
            member,
            from,
            to,
        } => {
            let (store, family) = open()?;
            let query = TransactionExportOptions {
                from,
                to,
                kind,
                member,
            };
            commands::cmd_stats(&store, &family, &query, &output)
        }
        Commands::Months { kind, details } => {
            let (store, family) = open()?;
            commands::cmd_months(&store, &family, kind, details, &output)
        }
        Commands::Members { action } => {
            let (store, family) = open()?;
            match action {
                None => commands::cmd_members_list(&store, &family, &output),
                Some(MembersAction::Add {
                    id,
                    name,
                    email,
                    income,
                    role,
                }) => commands::cmd_members_add(
                    &store,
                    &family,
                    commands::NewMember {
                        id,
                        name,
                        email,
                        monthly_income: income,
                        role,
                    },
                    &output,
                ),
            }
        }
        Commands::Transactions { action } => {
            let (store, family) = open()?;
            match action {
                TransactionsAction::Add {
                    member,
                    kind,
                    amount,
                    description,
                    category,
                    date,
                    status,
                    payment_method,
                    tags,
                } => commands::cmd_transactions_add(
                    &store,
                    &family,
                    NewTransaction {
                        user_id: member,
                        description,
                        amount,
                        kind,
                        category,
                        date: date.unwrap_or(today),
                        payment_method,
                        status,
                        tags,
                    },
                    &output,
                ),
                TransactionsAction::Update {
                    id,
                    description,
                    amount,
                    kind,
                    category,
                    date,
                    status,
                    payment_method,
                } => commands::cmd_transactions_update(
                    &store,
                    &family,
                    &id,
                    TransactionUpdate {
                        description,
                        amount,
                        kind,
                        category,
                        date,
                        payment_method,
                        status,
                    },
                    &output,
                ),
                TransactionsAction::Delete { id } => {
                    commands::cmd_transactions_delete(&store, &family, &id, &output)
                }
            }
        }
        Commands::Jars { action } => {
            let (store, family) = open()?;
            match action {
                None => commands::cmd_jars(&store, &family, today, &output),
                Some(JarsAction::Add {
                    name,
                    target,
                    description,
                    deadline,
                    icon,
                    color,
                }) => commands::cmd_jars_add(
                    &store,
                    &family,
                    NewJar {
                        name,
                        description,
                        target_amount: target,
                        icon,
                        color,
                        deadline,
                    },
                    &output,
                ),
                Some(JarsAction::Contribute { id, member, amount }) => {
                    commands::cmd_jars_contribute(&store, &family, &id, &member, amount, &output)
                }
                Some(JarsAction::Delete { id }) => {
                    commands::cmd_jars_delete(&store, &family, &id, &output)
                }
            }
        }
        Commands::Loans { status, action } => {
            let (store, family) = open()?;
            match action {
                None => commands::cmd_loans(&store, &family, status, today, &output),
                Some(LoansAction::Add {
                    lender,
                    borrower,
                    amount,
                    description,
                    due,
                    installments,
                    notes,
                }) => commands::cmd_loans_add(
                    &store,
                    &family,
                    commands::LoanRequest {
                        lender,
                        borrower,
                        amount,
                        description,
                        due,
                        installments,
                        notes,
                    },
                    &output,
                ),
                Some(LoansAction::Pay { id }) => {
                    commands::cmd_loans_pay(&store, &family, &id, &output)
                }
                Some(LoansAction::Settle { id }) => {
                    commands::cmd_loans_settle(&store, &family, &id, &output)
                }
                Some(LoansAction::Delete { id }) => {
                    commands::cmd_loans_delete(&store, &family, &id, &output)
                }
            }
        }
        Commands::Dashboard { from, to } => {
            let (store, family) = open()?;
            commands::cmd_dashboard(&store, &family, from, to, &output)
        }
        Commands::Export {
            output: path,
            kind,
            member,
            from,
            to,
        } => {
            let (store, family) = open()?;
            let query = TransactionExportOptions {
                from,
                to,
                kind,
                member,
            };
            commands::cmd_export(&store, &family, &query, path.as_deref())
        }
    }
}
