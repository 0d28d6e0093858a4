//! Command handlers: read CLI inputs, call the API, hand results to `render`.

use super::render::{
    print_document, print_identifier_options, print_messages, print_orders, print_templates,
};
use super::setup::{Commands, OrdersCommands, TemplatesCommands};
use anyhow::{Context, Result};
use docketapp::api::DocketApi;
use docketapp::store::fs_backend::FsBackend;
use std::fs;
use std::path::Path;

pub struct AppContext {
    pub api: DocketApi<FsBackend>,
}

pub fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Templates(cmd) => templates(ctx, cmd),
        Commands::Orders(cmd) => orders(ctx, cmd),
        Commands::Upload { file } => upload(ctx, &file),
    }
}

fn templates(ctx: &mut AppContext, cmd: TemplatesCommands) -> Result<()> {
    match cmd {
        TemplatesCommands::List => {
            let result = ctx.api.list_templates()?;
            print_templates(&result.templates);
            print_messages(&result.messages);
        }
        TemplatesCommands::Show { key } => {
            let result = ctx.api.show_template(&key)?;
            print_messages(&result.messages);
            if let Some(document) = &result.document {
                print_document(document)?;
            }
        }
        TemplatesCommands::Save { key, file } => {
            let raw = read_input(&file)?;
            let result = ctx.api.save_template_json(&key, &raw)?;
            print_messages(&result.messages);
        }
        TemplatesCommands::Fields => {
            let result = ctx.api.field_options()?;
            print_identifier_options(&result.identifier_options);
        }
    }
    Ok(())
}

fn orders(ctx: &mut AppContext, cmd: OrdersCommands) -> Result<()> {
    match cmd {
        OrdersCommands::List => {
            let result = ctx.api.list_orders()?;
            print_orders(&result.orders);
        }
        OrdersCommands::View { number } => {
            let result = ctx.api.view_order(&number)?;
            print_messages(&result.messages);
            if let Some(document) = &result.document {
                print_document(document)?;
            }
        }
        OrdersCommands::Place {
            key,
            number,
            values,
        } => {
            let raw = match values {
                Some(path) => read_input(&path)?,
                None => "{}".to_string(),
            };
            let result = ctx.api.place_order_json(&key, &number, &raw)?;
            print_messages(&result.messages);
        }
        OrdersCommands::Delete { number } => {
            let result = ctx.api.delete_order(&number)?;
            print_messages(&result.messages);
        }
        OrdersCommands::Export { number, out } => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let result = ctx.api.export_order(&number, out.as_deref(), &cwd)?;
            print_messages(&result.messages);
        }
    }
    Ok(())
}

fn upload(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let result = ctx.api.upload(file)?;
    if let Some(url) = &result.data_url {
        println!("{}", url);
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
