use std::fs;

use allflex_api::{save_orders, Allflex, OrderHeader, OrderStatus, OrderStatusDocument, XmlDocument};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;

mod core;

use crate::core::{Opts, SubCommand};

#[tokio::main]
async fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    // Set the logging level, RUST_LOG still wins when it is set.
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(if opts.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();

    let mut allflex = Allflex::new(&opts.api_key, &opts.api_url).context("creating the Allflex client")?;
    if opts.admin {
        allflex = allflex.admin();
    }

    run_cmd(opts.subcmd, &allflex).await
}

async fn run_cmd(subcmd: SubCommand, allflex: &Allflex) -> Result<()> {
    match subcmd {
        SubCommand::Pull(pull) => {
            let document = allflex.retrieve_orders().await.context("pulling orders")?;

            for order in &document.order_headers {
                println!(
                    "{}\t{}\t{}\t{} lines",
                    order.ws_order_id.as_deref().unwrap_or("-"),
                    order.customer_number,
                    order.po,
                    order.order_line_headers.len()
                );
            }

            if let Some(dir) = pull.save_dir {
                let paths = save_orders(&document, &dir).with_context(|| format!("saving orders to {}", dir.display()))?;
                info!("saved {} orders to {}", paths.len(), dir.display());
            }
        }
        SubCommand::Status(s) => {
            let status = allflex
                .get_order_status(&s.ws_order_id)
                .await
                .with_context(|| format!("getting the status of {}", s.ws_order_id))?;

            println!("{}\t{}\t{}", status.ws_order_id, status.order_id, status.status);
        }
        SubCommand::SetStatus(s) => {
            let mut document = OrderStatusDocument::new(&s.ws_order_id, &s.order_id, s.status);
            let sent = allflex
                .set_api_status(&mut document, s.status)
                .await
                .with_context(|| format!("setting the status of {} to {}", s.ws_order_id, s.status))?;

            if !sent {
                anyhow::bail!("order {} has no API id, status was not sent", s.order_id);
            }
        }
        SubCommand::PostOrder(p) => {
            let xml = fs::read_to_string(&p.file).with_context(|| format!("reading {}", p.file.display()))?;
            let order = OrderHeader::from_xml(&xml).with_context(|| format!("parsing {}", p.file.display()))?;

            let posted = allflex
                .post_order(&order)
                .await
                .with_context(|| format!("posting purchase order {}", order.po))?;

            info!(
                "posted purchase order {} as {}",
                posted.po,
                posted.ws_order_id.as_deref().unwrap_or("-")
            );
        }
        SubCommand::Statuses(_) => {
            for status in OrderStatus::ALL {
                println!("{}\t{}", status.code(), status);
            }
        }
    }

    Ok(())
}
